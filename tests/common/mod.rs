/// Shared test utilities: run the `caselog` binary and parse its CSV.
use std::path::Path;
use std::process::{Command, Output, Stdio};

use caselog::ActivityType;

/// Run `caselog` with the given args. Returns the full Output.
pub fn run_caselog(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_caselog"))
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run caselog")
}

/// Run `caselog` writing to `path` and assert success.
pub fn generate_to(path: &Path, extra_args: &[&str]) -> Output {
    let path = path.to_str().expect("temp path is not UTF-8");
    let mut args = vec!["--output", path, "--quiet"];
    args.extend_from_slice(extra_args);
    let output = run_caselog(&args);
    assert!(
        output.status.success(),
        "caselog exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

/// One parsed data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub case_id: u32,
    pub activity_type: ActivityType,
    pub activity_date: jiff::civil::Date,
    pub employee: String,
}

/// Parse CSV bytes (BOM included) into the header and typed rows.
pub fn parse_rows(bytes: &[u8]) -> (Vec<String>, Vec<Row>) {
    let body = bytes
        .strip_prefix(caselog::output::UTF8_BOM)
        .unwrap_or(bytes);
    let mut reader = csv::Reader::from_reader(body);
    let header = reader
        .headers()
        .expect("missing header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|rec| {
            let rec = rec.expect("malformed CSV row");
            Row {
                case_id: rec[0].parse().expect("bad case_id"),
                activity_type: rec[1].parse().expect("bad activity_type"),
                activity_date: rec[2].parse().expect("bad activity_date"),
                employee: rec[3].to_string(),
            }
        })
        .collect();
    (header, rows)
}
