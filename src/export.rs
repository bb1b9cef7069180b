//! CSV export for spreadsheet consumption.
//!
//! The file keeps the exact shape downstream sheets expect: UTF-8 with BOM,
//! the Japanese header row, and the name/address/coin columns quoted while
//! id and balance stay bare.

use crate::types::UserRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "ユーザID,ユーザ名,アドレス,yukichi発行コイン,InuBalance";

const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

/// Writes `mch_users_<date>.csv` files into a target directory.
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Render and write all records. Returns the path of the written file.
    pub fn export(&self, records: &[UserRecord]) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let filename = format!("mch_users_{}.csv", chrono::Utc::now().format("%Y-%m-%d"));
        let path = self.output_dir.join(filename);

        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(render_csv(records).as_bytes())?;
        writer.flush()?;

        Ok(path)
    }
}

/// Render the full file content: BOM, header line, one row per record.
pub fn render_csv(records: &[UserRecord]) -> String {
    let mut out = String::from(UTF8_BOM);
    out.push_str(CSV_HEADER);
    out.push('\n');

    let rows: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "{},{},{},{},{}",
                r.user_id,
                quote(&r.user_name),
                quote(&r.address),
                quote(&r.yukichi_coin),
                r.inu_balance
            )
        })
        .collect();
    out.push_str(&rows.join("\n"));
    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, address: &str, balance: &str) -> UserRecord {
        UserRecord {
            user_id: id.to_string(),
            user_name: name.to_string(),
            address: address.to_string(),
            yukichi_coin: String::new(),
            inu_balance: balance.to_string(),
        }
    }

    #[test]
    fn test_render_header_plus_rows() {
        let records = vec![
            record("111", "Alice", "0xaaa", "100"),
            record("222", "Bob", "", "0"),
        ];
        let csv = render_csv(&records);
        let body = csv.strip_prefix('\u{feff}').unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], r#"111,"Alice","0xaaa","",100"#);
        assert_eq!(lines[2], r#"222,"Bob","","",0"#);
    }

    #[test]
    fn test_render_starts_with_bom() {
        let csv = render_csv(&[]);
        assert_eq!(&csv.as_bytes()[..3], &[0xEF, 0xBB, 0xBF]);
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let records = vec![record("1", r#"Say "hi""#, "0x1", "0")];
        let csv = render_csv(&records);
        assert!(csv.contains(r#""Say ""hi""""#));
    }

    #[test]
    fn test_export_writes_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path());
        let path = exporter.export(&[record("1", "A", "0x1", "5")]).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("mch_users_"));
        assert!(name.ends_with(".csv"));

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        let content = String::from_utf8(bytes).unwrap();
        assert!(content.contains(CSV_HEADER));
        assert!(content.ends_with(r#"1,"A","0x1","",5"#));
    }
}
