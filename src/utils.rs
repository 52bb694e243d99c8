use std::borrow::Cow;
use std::path::Path;

const KILOBYTE: f64 = 1024.0;
const MEGABYTE: f64 = KILOBYTE * KILOBYTE;

pub fn pretty_bytes_size(len: u64) -> String {
    let float_len = len as f64;
    let (unit, value) = if float_len > MEGABYTE {
        ("MiB", float_len / MEGABYTE)
    } else if float_len > KILOBYTE {
        ("KiB", float_len / KILOBYTE)
    } else {
        ("bytes", float_len)
    };
    format!("{value:.2}{unit}")
}

pub fn percentage(part: usize, total: usize) -> f64 {
    100.0 * part as f64 / total as f64
}

// "dumps/app.tdump" gives "dumps/app_report.txt"
pub fn report_file_name(dump_path: &str) -> String {
    let path = Path::new(dump_path);
    let stem = path
        .file_stem()
        .map_or(Cow::Borrowed(dump_path), |stem| stem.to_string_lossy());
    path.with_file_name(format!("{stem}_report.txt"))
        .to_string_lossy()
        .into_owned()
}
