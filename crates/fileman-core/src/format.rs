//! Display formatting helpers.

use chrono::{DateTime, Datelike, Utc};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::Event;

use crate::error::{AppError, ErrorKind};
use crate::result::AppResult;

/// Human-readable size: `Mb` above one million bytes, `Kb` otherwise, both
/// decimal and rounded to the nearest whole unit.
pub fn file_size(bytes: u64) -> String {
    if bytes > 1_000_000 {
        format!("{}Mb", (bytes as f64 / 1_000_000.0).round() as u64)
    } else {
        format!("{}Kb", (bytes as f64 / 1_000.0).round() as u64)
    }
}

/// `d/m/yyyy` without leading zeros.
pub fn display_date(date: &DateTime<Utc>) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Re-indent an XML document with two spaces per level.
///
/// Whitespace-only text between elements is dropped so each element lands
/// on its own line; text content stays inline with its element.
pub fn format_xml(xml: &str) -> AppResult<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| AppError::with_source(ErrorKind::Serialization, "XML output is not UTF-8", e))
}
