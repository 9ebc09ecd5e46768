use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::models::PatentRecord;

/// CSV 数据集写入器
///
/// 追加模式；文件不存在或为空时先写表头（来自 `PatentRecord::FIELDS`）。
/// 行按到达顺序追加，从不去重——续跑去重由 `PageProgress` 在上游保证。
pub struct DatasetWriter {
    path: PathBuf,
}

impl DatasetWriter {
    /// 打开数据集文件（允许不存在）
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 追加一批记录；空批为无操作
    pub fn append(&self, records: &[PatentRecord]) -> Result<(), StorageError> {
        if records.is_empty() {
            return Ok(());
        }

        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::write(self.path.display().to_string(), e))?;

        let mut buf = String::new();
        if needs_header {
            buf.push_str(&csv_line(&PatentRecord::FIELDS));
        }
        for record in records {
            buf.push_str(&csv_line(&record.values()));
        }

        file.write_all(buf.as_bytes())
            .map_err(|e| StorageError::write(self.path.display().to_string(), e))?;
        file.flush()
            .map_err(|e| StorageError::write(self.path.display().to_string(), e))
    }
}

/// 组装一行 CSV，逗号分隔，按需加引号
fn csv_line(cells: &[&str]) -> String {
    let mut line = cells
        .iter()
        .map(|c| csv_escape(c))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// 含逗号/引号/换行的单元格加引号，内部引号成对转义
fn csv_escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn record(name: &str) -> PatentRecord {
        PatentRecord {
            name: name.to_string(),
            pubdate: "2024-05-01".to_string(),
            ipc: "A01B1/00".to_string(),
        }
    }

    #[test]
    fn test_creates_file_with_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let writer = DatasetWriter::open(&path);
        writer.append(&[record("甲")]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "name,pubdate,ipc\n甲,2024-05-01,A01B1/00\n");
    }

    #[test]
    fn test_appends_without_repeating_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let writer = DatasetWriter::open(&path);
        writer.append(&[record("甲")]).unwrap();
        writer.append(&[record("乙"), record("丙")]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "name,pubdate,ipc");
        assert!(lines[3].starts_with("丙,"));
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let writer = DatasetWriter::open(&path);
        writer.append(&[]).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_escapes_commas_and_quotes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let writer = DatasetWriter::open(&path);
        writer
            .append(&[PatentRecord {
                name: "加热, 所谓\"快速\"装置".to_string(),
                pubdate: String::new(),
                ipc: "A23P20/17".to_string(),
            }])
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"加热, 所谓\"\"快速\"\"装置\",,A23P20/17"));
    }
}
