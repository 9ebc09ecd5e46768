use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// IPC 分类号，即一次"检索 + 翻页"周期的工作项
///
/// 构造时去除首尾空白，相等性基于规范化后的文本。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IpcCode(String);

impl IpcCode {
    /// 从原始文本构造，去除首尾空白
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    /// 规范化后的分类号文本
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 是否为空（空行规范化后为空串）
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 是否符合 IPC 分类号的常见形态，如 `A23P20/17`
    ///
    /// 仅用于加载队列时的告警提示，不阻止入队：
    /// 站点对检索式的容忍度未知，格式判断不做硬约束。
    pub fn is_well_formed(&self) -> bool {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN
            .get_or_init(|| Regex::new(r"^[A-H]\d{2}[A-Z]\d{1,4}/\d{2,6}$").expect("固定正则"));
        re.is_match(&self.0)
    }
}

impl fmt::Display for IpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_whitespace() {
        assert_eq!(IpcCode::new("  A23P20/17 \n").as_str(), "A23P20/17");
        assert_eq!(IpcCode::new("A23P20/17"), IpcCode::new(" A23P20/17 "));
    }

    #[test]
    fn test_empty_line_is_empty() {
        assert!(IpcCode::new("   \t ").is_empty());
        assert!(!IpcCode::new("A01B1/00").is_empty());
    }

    #[test]
    fn test_well_formed() {
        assert!(IpcCode::new("A23P20/17").is_well_formed());
        assert!(IpcCode::new("A01B1/00").is_well_formed());
        assert!(!IpcCode::new("not-an-ipc").is_well_formed());
        assert!(!IpcCode::new("").is_well_formed());
    }
}
