// file: src/parser/grammar.rs
// description: labels, comment markers and compiled patterns of the benefit block format
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

pub const SECTION_HEADING: &str = "# الفوائد";
pub const TITLE_PREFIX: &str = "## ";

pub const ID_MARKER: &str = "benefit-id";
pub const DATE_CREATED_MARKER: &str = "date-created";
pub const DATE_MODIFIED_MARKER: &str = "date-modified";

pub const PAGE_LABEL: &str = "الصفحة:";
pub const VOLUME_LABEL: &str = "المجلد:";
pub const TIMESTAMP_LABEL: &str = "الوقت:";
pub const CATEGORIES_LABEL: &str = "التصنيفات:";
pub const TAGS_LABEL: &str = "الوسوم:";
pub const BODY_LABEL: &str = "الفائدة:";

/// Arabic comma, the only list separator of the format.
pub const LIST_SEPARATOR: char = '،';

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

lazy_static! {
    pub static ref SECTION_START: Regex = Regex::new(
        r"(?m)^# الفوائد[ \t]*\r?$"
    ).expect("SECTION_START regex is valid");

    /// A sibling top-level heading: one `#`, then whitespace.
    pub static ref TOP_LEVEL_HEADING: Regex = Regex::new(
        r"(?m)^#[ \t]"
    ).expect("TOP_LEVEL_HEADING regex is valid");

    pub static ref BLOCK_START: Regex = Regex::new(
        r"(?m)^##[ \t]"
    ).expect("BLOCK_START regex is valid");

    /// Either a record boundary or a top-level heading.
    pub static ref BLOCK_END: Regex = Regex::new(
        r"(?m)^#{1,2}[ \t]"
    ).expect("BLOCK_END regex is valid");

    pub static ref TITLE: Regex = Regex::new(
        r"^##[ \t]+(\S.*?)\s*$"
    ).expect("TITLE regex is valid");

    pub static ref ID_COMMENT: Regex = Regex::new(
        r"^\s*<!--\s*benefit-id:\s*(.+?)\s*-->\s*$"
    ).expect("ID_COMMENT regex is valid");

    pub static ref DATE_CREATED_COMMENT: Regex = Regex::new(
        r"^\s*<!--\s*date-created:\s*(.+?)\s*-->\s*$"
    ).expect("DATE_CREATED_COMMENT regex is valid");

    pub static ref DATE_MODIFIED_COMMENT: Regex = Regex::new(
        r"^\s*<!--\s*date-modified:\s*(.+?)\s*-->\s*$"
    ).expect("DATE_MODIFIED_COMMENT regex is valid");

    pub static ref PAGE: Regex = Regex::new(
        r"^\s*الصفحة:\s*(\d+)\s*$"
    ).expect("PAGE regex is valid");

    pub static ref VOLUME: Regex = Regex::new(
        r"^\s*المجلد:\s*(\d+)\s*$"
    ).expect("VOLUME regex is valid");

    pub static ref TIMESTAMP: Regex = Regex::new(
        r"^\s*الوقت:\s*(?:(\d+):)?(\d{1,2}):(\d{2})\s*$"
    ).expect("TIMESTAMP regex is valid");

    pub static ref CATEGORIES: Regex = Regex::new(
        r"^\s*التصنيفات:\s*(.*)$"
    ).expect("CATEGORIES regex is valid");

    pub static ref TAGS: Regex = Regex::new(
        r"^\s*الوسوم:\s*(.*)$"
    ).expect("TAGS regex is valid");

    pub static ref BODY: Regex = Regex::new(
        r"^\s*الفائدة:[ \t]?(.*)$"
    ).expect("BODY regex is valid");
}

/// Pattern matching the id comment of one specific record.
pub fn id_comment_for(id: &str) -> Regex {
    Regex::new(&format!(
        r"(?m)^[ \t]*<!--\s*benefit-id:\s*{}\s*-->[ \t]*\r?$",
        regex::escape(id)
    ))
    .expect("escaped id pattern is valid")
}

pub fn comment(marker: &str, value: &str) -> String {
    format!("<!-- {}: {} -->", marker, value)
}

/// Splits a `،`-separated list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    let mut items = Vec::new();
    for item in raw.split(LIST_SEPARATOR).map(str::trim) {
        if !item.is_empty() && !items.iter().any(|existing: &String| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}

pub fn join_list(items: &[String]) -> String {
    items.join(&format!("{} ", LIST_SEPARATOR))
}

/// `H:MM:SS` when there are hours, `MM:SS` otherwise.
pub fn format_timestamp(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Parses `H:MM:SS` or `MM:SS` into seconds.
pub fn parse_timestamp(raw: &str) -> Option<u32> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    let numbers: Vec<u32> = parts
        .iter()
        .map(|p| p.parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;

    match numbers.as_slice() {
        [m, s] => timestamp_seconds(0, *m, *s),
        [h, m, s] => timestamp_seconds(*h, *m, *s),
        _ => None,
    }
}

/// Total seconds, or `None` when the value does not fit in a `u32`.
pub fn timestamp_seconds(hours: u32, minutes: u32, seconds: u32) -> Option<u32> {
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}
