use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::StorageError;
use crate::models::IpcCode;

/// 文件队列：待处理 IPC 分类号的有序后备清单
///
/// 一行一个分类号，读取时做空白规范化，空行忽略。
/// 队列为空即"全部工作完成"的终止信号。
pub struct WorkQueue {
    path: PathBuf,
}

impl WorkQueue {
    /// 打开队列文件（允许不存在，视作空队列）
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 队列文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 按文件顺序读出全部分类号
    ///
    /// 形态异常的行只告警不剔除，站点对检索式的容忍度未知。
    pub fn items(&self) -> Result<Vec<IpcCode>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::read(self.path.display().to_string(), e))?;

        let mut items = Vec::new();
        for line in contents.lines() {
            let code = IpcCode::new(line);
            if code.is_empty() {
                continue;
            }
            if !code.is_well_formed() {
                warn!("队列中存在形态异常的分类号: {}", code);
            }
            items.push(code);
        }
        Ok(items)
    }

    /// 队首分类号；队列为空返回 None
    pub fn peek_next(&self) -> Result<Option<IpcCode>, StorageError> {
        Ok(self.items()?.into_iter().next())
    }

    /// 是否包含指定分类号（空白不敏感匹配）
    pub fn contains(&self, code: &IpcCode) -> Result<bool, StorageError> {
        Ok(self.items()?.iter().any(|c| c == code))
    }

    /// 队列是否为空
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.items()?.is_empty())
    }

    /// 移除指定分类号：整读整写的原子重写
    ///
    /// 分类号不在队列中时为无操作，不报错。
    pub fn remove(&self, code: &IpcCode) -> Result<(), StorageError> {
        let items = self.items()?;
        if !items.iter().any(|c| c == code) {
            return Ok(());
        }

        let remaining: Vec<&str> = items
            .iter()
            .filter(|c| *c != code)
            .map(|c| c.as_str())
            .collect();
        let mut contents = remaining.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        fs::write(&self.path, contents)
            .map_err(|e| StorageError::write(self.path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn queue_with(dir: &tempfile::TempDir, contents: &str) -> WorkQueue {
        let path = dir.path().join("ipcs.txt");
        fs::write(&path, contents).unwrap();
        WorkQueue::open(path)
    }

    #[test]
    fn test_missing_file_is_empty_queue() {
        let dir = tempdir().unwrap();
        let queue = WorkQueue::open(dir.path().join("absent.txt"));
        assert!(queue.is_empty().unwrap());
        assert!(queue.peek_next().unwrap().is_none());
    }

    #[test]
    fn test_round_trip_preserves_order_and_text() {
        let dir = tempdir().unwrap();
        let queue = queue_with(&dir, "A01B1/00\n  A01B1/02 \n\nA23P20/17\n");
        let items = queue.items().unwrap();
        assert_eq!(
            items,
            vec![
                IpcCode::new("A01B1/00"),
                IpcCode::new("A01B1/02"),
                IpcCode::new("A23P20/17"),
            ]
        );
        assert_eq!(queue.peek_next().unwrap(), Some(IpcCode::new("A01B1/00")));
    }

    #[test]
    fn test_remove_rewrites_without_matching_line() {
        let dir = tempdir().unwrap();
        let queue = queue_with(&dir, "A01B1/00\nA01B1/02\n");
        queue.remove(&IpcCode::new(" A01B1/00 ")).unwrap();
        assert_eq!(queue.items().unwrap(), vec![IpcCode::new("A01B1/02")]);
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let dir = tempdir().unwrap();
        let queue = queue_with(&dir, "A01B1/00\n");
        queue.remove(&IpcCode::new("Z99Z9/99")).unwrap();
        assert_eq!(queue.items().unwrap(), vec![IpcCode::new("A01B1/00")]);
    }

    #[test]
    fn test_remove_last_item_leaves_empty_file() {
        let dir = tempdir().unwrap();
        let queue = queue_with(&dir, "A01B1/00\n");
        queue.remove(&IpcCode::new("A01B1/00")).unwrap();
        assert!(queue.is_empty().unwrap());
    }

    #[test]
    fn test_contains() {
        let dir = tempdir().unwrap();
        let queue = queue_with(&dir, "A01B1/00\n");
        assert!(queue.contains(&IpcCode::new("A01B1/00")).unwrap());
        assert!(!queue.contains(&IpcCode::new("A01B1/02")).unwrap());
    }
}
