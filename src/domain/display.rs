use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Drop a redundant leading game name from a tournament title.
///
/// `Dota 2: The International` under game `Dota 2` becomes `The International`.
/// Titles that would be left empty are returned unchanged.
pub fn strip_game_prefix(name: &str, game: &str) -> String {
    let name = name.trim();
    let game = game.trim();
    if game.is_empty() {
        return name.to_string();
    }

    let escaped = regex::escape(game);
    let patterns = [
        format!(r"(?i)^\s*{escaped}\s*[:\-\u{{2013}}\u{{2014}}|]\s*"),
        format!(r"(?i)^\s*{escaped}\s+"),
    ];

    let stripped = patterns
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .fold(name.to_string(), |current, re| re.replace(&current, "").into_owned());

    if stripped.trim().is_empty() {
        name.to_string()
    } else {
        stripped
    }
}

/// Month/day pair for the calendar icon next to a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBadge {
    pub month: String,
    pub day: String,
}

impl DateBadge {
    /// Badge from stored `YYYY-MM-DD` text; anything else yields the placeholder
    pub fn from_iso(raw: Option<&str>) -> Self {
        date_badge(raw.and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()))
    }
}

impl Default for DateBadge {
    fn default() -> Self {
        Self {
            month: "???".to_string(),
            day: "?".to_string(),
        }
    }
}

pub fn date_badge(date: Option<NaiveDate>) -> DateBadge {
    match date {
        Some(date) => DateBadge {
            month: month_abbreviation(date).to_string(),
            day: date.day().to_string(),
        },
        None => DateBadge::default(),
    }
}

/// Human date range in the wiki's own style, e.g. `Jan 29 - Feb 09, 2025`
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let Some(start) = start else {
        return "TBA".to_string();
    };
    let end = end.unwrap_or(start);

    if end <= start {
        format!("{} {:02}, {}", month_abbreviation(start), start.day(), start.year())
    } else if start.year() != end.year() {
        format!(
            "{} {:02}, {} - {} {:02}, {}",
            month_abbreviation(start),
            start.day(),
            start.year(),
            month_abbreviation(end),
            end.day(),
            end.year()
        )
    } else if start.month() != end.month() {
        format!(
            "{} {:02} - {} {:02}, {}",
            month_abbreviation(start),
            start.day(),
            month_abbreviation(end),
            end.day(),
            end.year()
        )
    } else {
        format!(
            "{} {:02} - {:02}, {}",
            month_abbreviation(start),
            start.day(),
            end.day(),
            end.year()
        )
    }
}

fn month_abbreviation(date: NaiveDate) -> &'static str {
    MONTH_ABBREVIATIONS[date.month0() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dates::parse_date_range;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_strip_colon_prefix_is_idempotent() {
        let once = strip_game_prefix("Dota 2: The International", "Dota 2");
        assert_eq!(once, "The International");
        assert_eq!(strip_game_prefix(&once, "Dota 2"), once);
    }

    #[test]
    fn test_strip_other_separators() {
        assert_eq!(strip_game_prefix("valorant - Masters Toronto", "Valorant"), "Masters Toronto");
        assert_eq!(strip_game_prefix("Valorant \u{2013} Champions", "Valorant"), "Champions");
        assert_eq!(strip_game_prefix("Valorant|Champions", "valorant"), "Champions");
    }

    #[test]
    fn test_strip_bare_repetition() {
        assert_eq!(
            strip_game_prefix("Rocket League Championship Series", "rocket league"),
            "Championship Series"
        );
    }

    #[test]
    fn test_strip_leaves_unrelated_names() {
        assert_eq!(strip_game_prefix("The International 2025", "Dota 2"), "The International 2025");
        assert_eq!(strip_game_prefix("Dota2Cup", "Dota2"), "Dota2Cup");
        assert_eq!(strip_game_prefix("PGL Major", ""), "PGL Major");
    }

    #[test]
    fn test_strip_escapes_game_name() {
        assert_eq!(strip_game_prefix("C++ Cup: Finals", "C++ Cup"), "Finals");
        assert_eq!(strip_game_prefix("CxxCup: Finals", "C++ Cup"), "CxxCup: Finals");
    }

    #[test]
    fn test_strip_never_empties_a_name() {
        assert_eq!(strip_game_prefix("Dota 2", "Dota 2"), "Dota 2");
    }

    #[test]
    fn test_date_badge() {
        let badge = date_badge(Some(date(2025, 7, 8)));
        assert_eq!(badge.month, "Jul");
        assert_eq!(badge.day, "8");
        assert_eq!(date_badge(None), DateBadge::default());
    }

    #[test]
    fn test_date_badge_from_iso() {
        assert_eq!(DateBadge::from_iso(Some("2025-12-31")).month, "Dec");
        assert_eq!(DateBadge::from_iso(Some("Jul 28, 2025")), DateBadge::default());
        assert_eq!(DateBadge::from_iso(None).day, "?");
    }

    #[test]
    fn test_format_date_range_matches_wiki_style() {
        let cases = [
            "Jan 23 - 26, 2025",
            "Jan 29 - Feb 09, 2025",
            "Jul 28, 2025",
            "Dec 28, 2025 - Jan 04, 2026",
        ];
        for text in cases {
            let range = parse_date_range(text);
            assert_eq!(format_date_range(range.start, range.end), text);
        }
        assert_eq!(format_date_range(None, None), "TBA");
    }
}
