use std::fs;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::models::IpcCode;

/// 当前工作项的翻页进度
///
/// 数据集只追加、从不去重，崩溃后直接重跑在途分类号会把已落盘的页
/// 再写一遍。这里记录"最后一个已落盘页码"，续跑时重走翻页但跳过
/// 已落盘页的写入。
///
/// 文件内容为单行 `分类号<TAB>页码`，每页落盘后整写一次；
/// 分类号完成后清空，保证过期页码不会套用到下一个分类号上。
pub struct PageProgress {
    path: PathBuf,
}

impl PageProgress {
    /// 打开进度文件（允许不存在）
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 读取当前进度；无进度（或格式损坏）返回 None
    pub fn load(&self) -> Result<Option<(IpcCode, u32)>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::read(self.path.display().to_string(), e))?;
        let line = match contents.lines().next() {
            Some(l) => l,
            None => return Ok(None),
        };
        let mut parts = line.splitn(2, '\t');
        let code = match parts.next() {
            Some(c) if !c.trim().is_empty() => IpcCode::new(c),
            _ => return Ok(None),
        };
        let page = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
        Ok(page.map(|p| (code, p)))
    }

    /// 记录某分类号已落盘至指定页
    pub fn set(&self, code: &IpcCode, page: u32) -> Result<(), StorageError> {
        fs::write(&self.path, format!("{}\t{}\n", code, page))
            .map_err(|e| StorageError::write(self.path.display().to_string(), e))
    }

    /// 清除进度（分类号完成，或切换到新分类号之前）
    pub fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .map_err(|e| StorageError::write(self.path.display().to_string(), e))?;
        }
        Ok(())
    }

    /// 取指定分类号的已落盘页码；进度属于别的分类号时返回 0
    pub fn flushed_pages_for(&self, code: &IpcCode) -> Result<u32, StorageError> {
        match self.load()? {
            Some((c, page)) if &c == code => Ok(page),
            _ => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_no_progress() {
        let dir = tempdir().unwrap();
        let progress = PageProgress::open(dir.path().join("progress.txt"));
        assert!(progress.load().unwrap().is_none());
        assert_eq!(
            progress.flushed_pages_for(&IpcCode::new("A01B1/00")).unwrap(),
            0
        );
    }

    #[test]
    fn test_set_then_load() {
        let dir = tempdir().unwrap();
        let progress = PageProgress::open(dir.path().join("progress.txt"));
        let code = IpcCode::new("A01B1/00");
        progress.set(&code, 7).unwrap();
        assert_eq!(progress.load().unwrap(), Some((code.clone(), 7)));
        assert_eq!(progress.flushed_pages_for(&code).unwrap(), 7);
    }

    #[test]
    fn test_progress_of_other_item_is_ignored() {
        let dir = tempdir().unwrap();
        let progress = PageProgress::open(dir.path().join("progress.txt"));
        progress.set(&IpcCode::new("A01B1/00"), 3).unwrap();
        assert_eq!(
            progress.flushed_pages_for(&IpcCode::new("A01B1/02")).unwrap(),
            0
        );
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let progress = PageProgress::open(dir.path().join("progress.txt"));
        progress.set(&IpcCode::new("A01B1/00"), 2).unwrap();
        progress.clear().unwrap();
        assert!(progress.load().unwrap().is_none());
        // 重复清除为无操作
        progress.clear().unwrap();
    }

    #[test]
    fn test_corrupt_line_is_no_progress() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.txt");
        fs::write(&path, "A01B1/00\tnot-a-number\n").unwrap();
        let progress = PageProgress::open(&path);
        assert!(progress.load().unwrap().is_none());
    }
}
