//! 结果页解析
//!
//! 纯函数：渲染后的 HTML → 结构化记录，无副作用。
//! 可选字段缺失时填空串而不是报错；零行是合法的空结果。

use scraper::{Html, Selector};

use crate::error::ExtractError;
use crate::models::PatentRecord;

/// 结果表行
const ROW_SELECTOR: &str = "tbody#resultListForm\\:resultTable_data > tr";
/// 专利标题
const NAME_SELECTOR: &str = "span.ps-patent-result--title--title";
/// 公开日期
const PUBDATE_SELECTOR: &str = "div.ps-patent-result--title--ctr-pubdate";
/// IPC 分类号所在元素（取 data-mt-ipc 属性）
const IPC_SELECTOR: &str = "div[data-mt-ipc]";

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::BadSelector {
        selector: selector.to_string(),
        detail: format!("{:?}", e),
    })
}

/// 从当前结果页提取全部专利记录
pub fn extract_records(html: &str) -> Result<Vec<PatentRecord>, ExtractError> {
    let row_sel = parse_selector(ROW_SELECTOR)?;
    let name_sel = parse_selector(NAME_SELECTOR)?;
    let pubdate_sel = parse_selector(PUBDATE_SELECTOR)?;
    let ipc_sel = parse_selector(IPC_SELECTOR)?;

    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for row in document.select(&row_sel) {
        let name = row
            .select(&name_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let pubdate = row
            .select(&pubdate_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        let ipc = row
            .select(&ipc_sel)
            .next()
            .and_then(|el| el.value().attr("data-mt-ipc"))
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        records.push(PatentRecord { name, pubdate, ipc });
    }

    Ok(records)
}
