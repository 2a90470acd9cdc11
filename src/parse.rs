use crate::error::{LocmapError, Result};
use crate::model::ChangeRow;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use log::debug;
use std::path::Path;

pub const COLUMNS: [&str; 11] = [
    "commit", "author", "date", "time", "timezone", "datetime", "line", "depth", "length", "file",
    "type",
];

pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Vec<ChangeRow>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let rows = parse_rows(&text)?;
    debug!("Parsed {} rows from {}", rows.len(), path.as_ref().display());
    Ok(rows)
}

pub fn parse_rows(text: &str) -> Result<Vec<ChangeRow>> {
    let mut records = split_records(text)?.into_iter();

    let (_, header) = match records.next() {
        Some(h) => h,
        None => return Ok(Vec::new()),
    };
    let columns = ColumnIndex::from_header(&header)?;

    let mut rows = Vec::new();
    for (line, fields) in records {
        if fields.len() != header.len() {
            return Err(LocmapError::parse(
                line,
                format!("expected {} fields, found {}", header.len(), fields.len()),
            ));
        }
        rows.push(columns.row(line, &fields)?);
    }
    Ok(rows)
}

struct ColumnIndex([usize; 11]);

impl ColumnIndex {
    fn from_header(header: &[String]) -> Result<Self> {
        let mut idx = [0usize; 11];
        for (slot, name) in idx.iter_mut().zip(COLUMNS) {
            *slot = header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LocmapError::MissingColumn(name.to_string()))?;
        }
        Ok(Self(idx))
    }

    fn row(&self, line: usize, fields: &[String]) -> Result<ChangeRow> {
        let get = |i: usize| fields[self.0[i]].as_str();

        let timezone = get(4).trim();
        let offset = parse_offset(timezone).ok_or_else(|| {
            LocmapError::parse(line, format!("invalid timezone '{timezone}'"))
        })?;

        Ok(ChangeRow {
            commit: get(0).to_string(),
            author: get(1).to_string(),
            date: parse_local_midnight(get(2), offset)
                .ok_or_else(|| LocmapError::parse(line, format!("invalid date '{}'", get(2))))?,
            time: get(3).to_string(),
            timezone: timezone.to_string(),
            datetime: parse_instant(get(5), offset).ok_or_else(|| {
                LocmapError::parse(line, format!("invalid datetime '{}'", get(5)))
            })?,
            line: parse_int(line, "line", get(6))?,
            depth: parse_int(line, "depth", get(7))?,
            length: parse_int(line, "length", get(8))?,
            file: get(9).to_string(),
            kind: get(10).to_string(),
        })
    }
}

fn parse_int(line: usize, column: &str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| LocmapError::parse(line, format!("invalid {column} '{value}'")))
}

/// Accepts `Z`, `+HH:MM`, `+HHMM` and `+HH`.
pub fn parse_offset(tz: &str) -> Option<FixedOffset> {
    if tz.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match tz.as_bytes().first()? {
        b'+' => (1, &tz[1..]),
        b'-' => (-1, &tz[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn parse_local_midnight(date: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    offset.from_local_datetime(&day.and_hms_opt(0, 0, 0)?).single()
}

fn parse_instant(value: &str, fallback: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .and_then(|naive| fallback.from_local_datetime(&naive).single())
}

/// Splits CSV text into records tagged with the 1-based line they start on.
/// Quoted fields may span lines and escape quotes by doubling them.
fn split_records(text: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut start_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                end_record(&mut records, &mut fields, &mut field, start_line);
                line += 1;
                start_line = line;
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err(LocmapError::parse(start_line, "unterminated quoted field"));
    }
    end_record(&mut records, &mut fields, &mut field, start_line);
    Ok(records)
}

fn end_record(
    records: &mut Vec<(usize, Vec<String>)>,
    fields: &mut Vec<String>,
    field: &mut String,
    line: usize,
) {
    fields.push(std::mem::take(field));
    let record = std::mem::take(fields);
    if record.len() == 1 && record[0].is_empty() {
        return;
    }
    records.push((line, record));
}
