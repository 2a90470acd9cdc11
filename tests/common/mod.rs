#![allow(dead_code)]

use chrono::{DateTime, TimeZone};
use locmap::aggregate::aggregate;
use locmap::model::{ChangeRow, Commit};

pub const HEADER: &str = "commit,author,date,time,timezone,datetime,line,depth,length,file,type";

/// A row for `commit` changed at `datetime` (RFC 3339).
pub fn row(commit: &str, datetime: &str, file: &str, kind: &str) -> ChangeRow {
    let dt = DateTime::parse_from_rfc3339(datetime).unwrap();
    let midnight = dt.date_naive().and_hms_opt(0, 0, 0).unwrap();
    ChangeRow {
        commit: commit.to_string(),
        author: "Ada".to_string(),
        date: dt.timezone().from_local_datetime(&midnight).unwrap(),
        time: dt.format("%H:%M:%S%:z").to_string(),
        timezone: dt.format("%:z").to_string(),
        datetime: dt,
        line: 1,
        depth: 1,
        length: 20,
        file: file.to_string(),
        kind: kind.to_string(),
    }
}

pub fn with_depth(mut row: ChangeRow, depth: u32) -> ChangeRow {
    row.depth = depth;
    row
}

/// `lines` rows of one commit, all in the same file.
pub fn commit_rows(commit: &str, datetime: &str, lines: usize, kind: &str) -> Vec<ChangeRow> {
    (0..lines)
        .map(|i| {
            let mut r = row(commit, datetime, &format!("src/{commit}.{kind}"), kind);
            r.line = i as u32 + 1;
            r
        })
        .collect()
}

/// Three commits on different days and hours with 1, 5 and 10 lines.
pub fn sample_commits() -> Vec<Commit> {
    let mut rows = commit_rows("small", "2024-01-01T09:00:00Z", 1, "js");
    rows.extend(commit_rows("medium", "2024-01-05T14:30:00Z", 5, "css"));
    rows.extend(commit_rows("large", "2024-01-10T21:15:00Z", 10, "js"));
    aggregate(&rows, None)
}

pub fn csv_line(commit: &str, datetime: &str, depth: u32, file: &str, kind: &str) -> String {
    let date = &datetime[..10];
    let tz = if datetime.ends_with('Z') { "+00:00" } else { &datetime[datetime.len() - 6..] };
    format!("{commit},Ada,{date},{},{tz},{datetime},1,{depth},20,{file},{kind}", &datetime[11..])
}

pub fn sample_csv() -> String {
    let lines = [
        csv_line("aaa111", "2024-01-01T09:00:00Z", 1, "index.js", "js"),
        csv_line("aaa111", "2024-01-01T09:00:00Z", 1, "style.css", "css"),
        csv_line("bbb222", "2024-01-03T14:00:00Z", 2, "meta/main.js", "js"),
        csv_line("bbb222", "2024-01-03T14:00:00Z", 2, "meta/main.js", "js"),
        csv_line("bbb222", "2024-01-03T14:00:00Z", 2, "meta/main.js", "js"),
        csv_line("ccc333", "2024-01-06T10:30:00Z", 1, "index.html", "html"),
    ];
    format!("{HEADER}\n{}\n", lines.join("\n"))
}
