/// CSV output.
///
/// The file starts with a UTF-8 BOM so spreadsheet tools pick the right
/// encoding for the Cyrillic labels. Rows end in `\n`, fields are quoted only
/// when they need it.
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::activity::ActivityRecord;

pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Column order of the output.
pub const HEADER: [&str; 4] = ["case_id", "activity_type", "activity_date", "employee"];

/// Write BOM, header and one row per record to `out`.
pub fn write_records<W: Write>(mut out: W, records: &[ActivityRecord]) -> Result<()> {
    out.write_all(UTF8_BOM).context("failed to write BOM")?;
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    if records.is_empty() {
        // serialize() emits the header with the first row; keep it for an
        // empty log too.
        writer.write_record(HEADER).context("failed to write header")?;
    }
    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("failed to write row for case {}", record.case_id))?;
    }
    writer.flush().context("failed to flush output")?;
    Ok(())
}

/// Write the log to `path`, creating parent directories as needed.
pub fn write_csv(path: &Path, records: &[ActivityRecord]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("failed to create file: {}", path.display()))?;
    let mut out = BufWriter::with_capacity(128 * 1024, file);
    write_records(&mut out, records)?;
    out.flush().with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityType;
    use jiff::civil::date;

    fn record(case_id: u32, activity_type: ActivityType, employee: &str) -> ActivityRecord {
        ActivityRecord {
            case_id,
            activity_type,
            activity_date: date(2024, 3, 7),
            employee: employee.to_string(),
        }
    }

    fn strip_bom(buf: &[u8]) -> &[u8] {
        buf.strip_prefix(UTF8_BOM).unwrap_or(buf)
    }

    fn render(records: &[ActivityRecord]) -> Vec<u8> {
        let mut buf = Vec::new();
        write_records(&mut buf, records).unwrap();
        buf
    }

    #[test]
    fn bom_header_and_rows() {
        let buf = render(&[
            record(3, ActivityType::WritReceived, "Петров П.П."),
            record(12, ActivityType::ClaimFiled, "Новиков А.В."),
        ]);
        assert!(buf.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(strip_bom(&buf)).unwrap();
        assert_eq!(
            text,
            "case_id,activity_type,activity_date,employee\n\
             3,Получен исполнительный лист,2024-03-07,Петров П.П.\n\
             12,Подача искового заявления,2024-03-07,Новиков А.В.\n"
        );
    }

    #[test]
    fn empty_log_keeps_header() {
        let buf = render(&[]);
        assert_eq!(
            strip_bom(&buf),
            b"case_id,activity_type,activity_date,employee\n"
        );
    }

    #[test]
    fn quotes_only_when_needed() {
        let buf = render(&[record(1, ActivityType::CaseClosedPaid, "Doe, J.")]);
        let text = std::str::from_utf8(strip_bom(&buf)).unwrap();
        assert!(text.ends_with("1,Дело закрыто (оплата),2024-03-07,\"Doe, J.\"\n"), "{text}");
    }

    #[test]
    fn write_csv_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("activities.csv");
        write_csv(&path, &[record(1, ActivityType::WritSent, "Иванов И.И.")]).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        assert_eq!(bytes.iter().filter(|&&b| b == b'\n').count(), 2);
    }

    #[test]
    fn bom_written_exactly_once() {
        let buf = render(&[record(1, ActivityType::WritSent, "Иванов И.И.")]);
        assert!(!strip_bom(&buf).starts_with(UTF8_BOM));
    }
}
