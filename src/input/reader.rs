use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::input::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Tab => '\t',
            Delimiter::Comma => ',',
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Delimiter::Tab => "tsv",
            Delimiter::Comma => "csv",
        }
    }

    pub fn for_path(path: &Path) -> Delimiter {
        let name = lower_file_name(path);
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".csv") {
            Delimiter::Comma
        } else {
            Delimiter::Tab
        }
    }
}

fn lower_file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

pub fn is_gzip(path: &Path) -> bool {
    lower_file_name(path).ends_with(".gz")
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(path.display().to_string()));
    }
    let file = File::open(path)?;
    if is_gzip(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

// Double quotes and `""` escapes are honored. Only unquoted cells are trimmed.
pub fn split_record(line: &str, delim: Delimiter) -> Vec<String> {
    let sep = delim.as_char();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == sep {
            fields.push(finish_field(&mut current, quoted));
            quoted = false;
        } else if ch == '"' && !quoted && current.trim().is_empty() {
            current.clear();
            in_quotes = true;
            quoted = true;
        } else if !(quoted && ch.is_whitespace()) {
            current.push(ch);
        }
    }
    fields.push(finish_field(&mut current, quoted));
    fields
}

fn finish_field(current: &mut String, quoted: bool) -> String {
    let field = if quoted {
        current.clone()
    } else {
        current.trim().to_string()
    };
    current.clear();
    field
}

pub fn escape_field(value: &str, delim: Delimiter) -> String {
    let needs_quotes = value.contains(delim.as_char())
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r')
        || value.trim() != value;
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn join_record<S: AsRef<str>>(fields: &[S], delim: Delimiter) -> String {
    let sep = delim.as_char().to_string();
    fields
        .iter()
        .map(|f| escape_field(f.as_ref(), delim))
        .collect::<Vec<_>>()
        .join(&sep)
}
