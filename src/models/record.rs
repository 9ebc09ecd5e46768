/// 单条专利检索结果
///
/// 字段为纯文本，缺失字段以空串填充（解析层保证）。
/// 记录在提取后立即交给数据集写入器，不跨页累积。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatentRecord {
    /// 专利标题
    pub name: String,
    /// 公开日期
    pub pubdate: String,
    /// IPC 分类号（来自结果行的 data-mt-ipc 属性）
    pub ipc: String,
}

impl PatentRecord {
    /// CSV 表头字段名，顺序即列顺序
    pub const FIELDS: [&'static str; 3] = ["name", "pubdate", "ipc"];

    /// 按 `FIELDS` 顺序给出各列取值
    pub fn values(&self) -> [&str; 3] {
        [&self.name, &self.pubdate, &self.ipc]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_match_field_order() {
        let record = PatentRecord {
            name: "测试专利".to_string(),
            pubdate: "2024-01-01".to_string(),
            ipc: "A23P20/17".to_string(),
        };
        assert_eq!(record.values(), ["测试专利", "2024-01-01", "A23P20/17"]);
        assert_eq!(PatentRecord::FIELDS.len(), record.values().len());
    }
}
