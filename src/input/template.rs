use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::input::reader::{Delimiter, is_gzip, join_record};
use crate::model::record::Field;

const TEMPLATE_ROWS: [[&str; 10]; 3] = [
    ["45", "1", "25.5", "130", "85", "6.2", "1.1", "85", "13.5", "220"],
    ["55", "0", "28.2", "140", "90", "7.1", "1.3", "75", "12.8", "250"],
    ["35", "1", "22.1", "120", "75", "5.4", "0.9", "95", "14.2", "180"],
];

pub fn render_template(delim: Delimiter) -> String {
    let header = Field::ALL.map(Field::column_name);
    let mut out = join_record(&header, delim);
    out.push('\n');
    for row in &TEMPLATE_ROWS {
        out.push_str(&join_record(row, delim));
        out.push('\n');
    }
    out
}

pub fn write_template(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let delim = Delimiter::for_path(path);
    let body = render_template(delim);
    let file = BufWriter::new(File::create(path)?);
    if is_gzip(path) {
        let mut gz = GzEncoder::new(file, Compression::default());
        gz.write_all(body.as_bytes())?;
        gz.finish()?.flush()?;
    } else {
        let mut w = file;
        w.write_all(body.as_bytes())?;
        w.flush()?;
    }
    tracing::info!(path = %path.display(), "batch template written");
    Ok(())
}
