//! Normalisation of the free-text date cells found on wiki tournament tables.
//!
//! The tables use three shapes:
//! - `Jul 28, 2025`
//! - `Jan 23 - 26, 2025`
//! - `Jan 29 - Feb 09, 2025`
//!
//! Anything else goes through a looser fallback chain and, failing that,
//! resolves to an empty range. Parsing never fails loudly.

use chrono::NaiveDate;
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::OnceLock;

/// Calendar interval resolved from a date cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: Some(date),
            end: Some(date),
        }
    }

    fn span(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.start.is_some()
    }
}

struct DatePatterns {
    // Jan 23 - 26, 2025 | Jan 29 - Feb 09, 2025
    range: Regex,
    // Jul 28, 2025
    single: Regex,
    iso: Regex,
    slashed: Regex,
    month_day_year: Regex,
    day_month_year: Regex,
    year: Regex,
    whitespace: Regex,
}

fn patterns() -> &'static DatePatterns {
    static PATTERNS: OnceLock<DatePatterns> = OnceLock::new();
    PATTERNS.get_or_init(DatePatterns::new)
}

impl DatePatterns {
    fn new() -> Self {
        Self {
            range: compile(concat!(
                r"^([A-Za-z]{3,})\.?\s+(\d{1,2})\s*-\s*",
                r"(?:([A-Za-z]{3,})\.?\s*)?(\d{1,2}),\s*(\d{4})$",
            )),
            single: compile(r"^([A-Za-z]{3,})\.?\s+(\d{1,2}),\s*(\d{4})$"),
            iso: compile(r"(\d{4})-(\d{1,2})-(\d{1,2})"),
            slashed: compile(r"(\d{4})/(\d{1,2})/(\d{1,2})"),
            month_day_year: compile(r"([A-Za-z]{3,})\.?\s+(\d{1,2}),?\s+(\d{4})"),
            day_month_year: compile(r"(\d{1,2})\s+([A-Za-z]{3,})\.?,?\s+(\d{4})"),
            year: compile(r"\b(19\d{2}|20\d{2})\b"),
            whitespace: compile(r"\s+"),
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("date pattern is a valid regex")
}

/// Resolve a scraped date cell into a start/end pair.
///
/// Returns an empty range when nothing in the text can be read as a date.
pub fn parse_date_range(text: &str) -> DateRange {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return DateRange::empty();
    }

    structured_range(&normalized)
        .or_else(|| structured_single(&normalized))
        .or_else(|| parse_calendar_date(&normalized).map(DateRange::single))
        .or_else(|| split_range(&normalized))
        .or_else(|| find_calendar_date(&normalized).map(DateRange::single))
        .unwrap_or_default()
}

/// All four-digit years (19xx/20xx) mentioned in the text, in order of appearance
pub fn mentioned_years(text: &str) -> Vec<i32> {
    patterns()
        .year
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .collect()
}

/// Latest year mentioned in the text
pub fn latest_year(text: &str) -> Option<i32> {
    mentioned_years(text).into_iter().max()
}

/// Month number for an English month name or abbreviation
pub fn month_number(name: &str) -> Option<u32> {
    let month = match name.trim_end_matches('.').to_lowercase().as_str() {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

fn normalize(text: &str) -> String {
    let dashed = text.replace(['\u{2013}', '\u{2014}'], "-");
    patterns()
        .whitespace
        .replace_all(dashed.trim(), " ")
        .into_owned()
}

fn structured_range(text: &str) -> Option<DateRange> {
    let caps = patterns().range.captures(text)?;

    let first_month = month_number(&caps[1])?;
    let first_day = number(&caps, 2)?;
    let second_month = match caps.get(3) {
        Some(name) => month_number(name.as_str())?,
        None => first_month,
    };
    let second_day = number(&caps, 4)?;
    let year: i32 = caps[5].parse().ok()?;

    let end = NaiveDate::from_ymd_opt(year, second_month, second_day)?;
    let start = NaiveDate::from_ymd_opt(year, first_month, first_day)?;
    if start <= end {
        return Some(DateRange::span(start, end));
    }

    // Dec 28 - Jan 04, 2026: the trailing year belongs to the end date
    if second_month < first_month {
        let start = NaiveDate::from_ymd_opt(year - 1, first_month, first_day)?;
        return Some(DateRange::span(start, end));
    }
    None
}

fn structured_single(text: &str) -> Option<DateRange> {
    let caps = patterns().single.captures(text)?;
    let date = NaiveDate::from_ymd_opt(
        caps[3].parse().ok()?,
        month_number(&caps[1])?,
        number(&caps, 2)?,
    )?;
    Some(DateRange::single(date))
}

fn split_range(text: &str) -> Option<DateRange> {
    let (left, right) = text
        .split_once(" - ")
        .or_else(|| text.split_once('-'))?;

    match (find_calendar_date(left), find_calendar_date(right)) {
        (Some(start), Some(end)) if start <= end => Some(DateRange::span(start, end)),
        (Some(start), _) => Some(DateRange::single(start)),
        (None, Some(end)) => Some(DateRange::single(end)),
        (None, None) => None,
    }
}

/// Strict parse: the whole text must be one calendar date
fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let date = find_calendar_date(text)?;
    let whole = [
        &patterns().iso,
        &patterns().slashed,
        &patterns().month_day_year,
        &patterns().day_month_year,
    ]
    .iter()
    .filter_map(|pattern| pattern.find(text))
    .any(|found| found.start() == 0 && found.end() == text.len());

    whole.then_some(date)
}

/// Loose parse: the first recognisable calendar date anywhere in the text
fn find_calendar_date(text: &str) -> Option<NaiveDate> {
    let p = patterns();

    if let Some(caps) = p.iso.captures(text).or_else(|| p.slashed.captures(text)) {
        if let Some(date) = ymd(caps[1].parse().ok(), number(&caps, 2), number(&caps, 3)) {
            return Some(date);
        }
    }

    if let Some(caps) = p.month_day_year.captures(text) {
        if let Some(date) = ymd(caps[3].parse().ok(), month_number(&caps[1]), number(&caps, 2)) {
            return Some(date);
        }
    }

    let caps = p.day_month_year.captures(text)?;
    ymd(caps[3].parse().ok(), month_number(&caps[2]), number(&caps, 1))
}

fn ymd(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year?, month?, day?)
}

fn number(caps: &Captures, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}
