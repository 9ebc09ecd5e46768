use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::StorageError;
use crate::models::IpcCode;

/// 追加式检查点日志
///
/// 一行一个分类号。写入时机是该分类号的检索**成功发出**之后，
/// 而不是翻页完成之后。因此最后一行代表"最近一次尝试"，
/// 重启时按"可能未完成，从第 1 页重跑"处理。
///
/// `append` 在返回前 flush 并 sync，作为宣告检索在途前的写屏障。
pub struct CheckpointLog {
    path: PathBuf,
}

impl CheckpointLog {
    /// 打开检查点文件（允许不存在，视作空日志）
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 检查点文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> Result<Vec<IpcCode>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::read(self.path.display().to_string(), e))?;
        Ok(contents
            .lines()
            .map(IpcCode::new)
            .filter(|c| !c.is_empty())
            .collect())
    }

    /// 追加一条检查点并落盘
    pub fn append(&self, code: &IpcCode) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::write(self.path.display().to_string(), e))?;
        writeln!(file, "{}", code)
            .map_err(|e| StorageError::write(self.path.display().to_string(), e))?;
        file.flush()
            .map_err(|e| StorageError::write(self.path.display().to_string(), e))?;
        // 检索在途的宣告必须先于后续动作持久化
        file.sync_all()
            .map_err(|e| StorageError::write(self.path.display().to_string(), e))?;

        info!(
            "📌 检查点已写入: {} ({})",
            code,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        Ok(())
    }

    /// 最近一次尝试的分类号；日志为空返回 None
    pub fn last(&self) -> Result<Option<IpcCode>, StorageError> {
        Ok(self.entries()?.into_iter().last())
    }

    /// 是否已有该分类号的检查点（用于跳过上轮已处理项）
    pub fn contains(&self, code: &IpcCode) -> Result<bool, StorageError> {
        Ok(self.entries()?.iter().any(|c| c == code))
    }

    /// 日志是否为空
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.entries()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let log = CheckpointLog::open(dir.path().join("checkpoint.log"));
        assert!(log.is_empty().unwrap());
        assert!(log.last().unwrap().is_none());
    }

    #[test]
    fn test_append_then_last() {
        let dir = tempdir().unwrap();
        let log = CheckpointLog::open(dir.path().join("checkpoint.log"));
        log.append(&IpcCode::new("A01B1/00")).unwrap();
        log.append(&IpcCode::new("A01B1/02")).unwrap();
        assert_eq!(log.last().unwrap(), Some(IpcCode::new("A01B1/02")));
    }

    #[test]
    fn test_contains() {
        let dir = tempdir().unwrap();
        let log = CheckpointLog::open(dir.path().join("checkpoint.log"));
        log.append(&IpcCode::new("A01B1/00")).unwrap();
        assert!(log.contains(&IpcCode::new(" A01B1/00")).unwrap());
        assert!(!log.contains(&IpcCode::new("A01B1/02")).unwrap());
    }

    #[test]
    fn test_append_is_append_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checkpoint.log");
        let log = CheckpointLog::open(&path);
        log.append(&IpcCode::new("A01B1/00")).unwrap();
        log.append(&IpcCode::new("A01B1/02")).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "A01B1/00\nA01B1/02\n");
    }
}
