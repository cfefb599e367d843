use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::classify::Scheduled;
use super::filters::Named;

/// Placeholder stored when a prize or location cell is empty
pub const NOT_AVAILABLE: &str = "N/A";

/// Tournament row extracted from a wiki page, not yet stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDraft {
    pub name: String,
    pub date_text: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub prize_pool: String,
    pub location: String,
    pub url: Option<String>,
}

impl Scheduled for TournamentDraft {
    fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

/// Stored tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRecord {
    pub id: i64,
    pub tier_id: i64,
    pub name: String,
    pub date_text: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub prize_pool: String,
    pub location: String,
    pub url: Option<String>,
}

impl TournamentRecord {
    /// Deterministic key for rendering lists: `tierId|name|startDate`
    pub fn list_key(&self) -> String {
        let start = self.start_date.map(|d| d.to_string()).unwrap_or_default();
        format!("{}|{}|{}", self.tier_id, self.name, start)
    }

    pub fn has_prize(&self) -> bool {
        is_available(&self.prize_pool)
    }

    pub fn has_location(&self) -> bool {
        is_available(&self.location)
    }
}

impl Scheduled for TournamentRecord {
    fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

impl Named for TournamentRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Trimmed cell text, or the `N/A` placeholder when empty
pub fn text_or_placeholder(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text.to_string()
    }
}

fn is_available(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text != NOT_AVAILABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(start_date: Option<NaiveDate>) -> TournamentRecord {
        TournamentRecord {
            id: 1,
            tier_id: 7,
            name: "BLAST Premier".to_string(),
            date_text: None,
            start_date,
            end_date: start_date,
            prize_pool: "$425,000".to_string(),
            location: NOT_AVAILABLE.to_string(),
            url: None,
        }
    }

    #[test]
    fn test_list_key() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 4);
        assert_eq!(record(start).list_key(), "7|BLAST Premier|2025-03-04");
        assert_eq!(record(None).list_key(), "7|BLAST Premier|");
    }

    #[test]
    fn test_placeholders() {
        let record = record(None);
        assert!(record.has_prize());
        assert!(!record.has_location());
        assert_eq!(text_or_placeholder("   "), NOT_AVAILABLE);
        assert_eq!(text_or_placeholder(" Berlin "), "Berlin");
    }
}
