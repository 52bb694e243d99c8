use std::fs;
use std::time::Instant;

use crate::errors::ThreadDumpError;
use crate::parser::dump_parser::{Dump, parse};
use crate::utils::{pretty_bytes_size, report_file_name};

pub fn load_dump_file(file_path: &str) -> Result<String, ThreadDumpError> {
    let content = fs::read_to_string(file_path)?;
    Ok(content)
}

pub fn analyze_file(file_path: &str, debug_mode: bool) -> Result<Dump, ThreadDumpError> {
    let content = load_dump_file(file_path)?;
    println!(
        "Processing {} thread dump file '{file_path}'.",
        pretty_bytes_size(content.len() as u64)
    );

    let now = Instant::now();
    let dump = parse(&content);
    if debug_mode {
        eprintln!(
            "Parsed {} threads in {:?}, {} lines ignored",
            dump.threads.len(),
            now.elapsed(),
            dump.ignored.len()
        );
        for (index, line) in dump.ignored.iter().enumerate() {
            eprintln!("Ignored line {}: {line}", index + 1);
        }
    }
    Ok(dump)
}

/// Writes the report next to the dump and returns its path.
pub fn save_report(dump_path: &str, report: &str) -> Result<String, ThreadDumpError> {
    let report_path = report_file_name(dump_path);
    fs::write(&report_path, report)?;
    Ok(report_path)
}
