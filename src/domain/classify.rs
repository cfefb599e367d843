use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// Anything with an optional calendar interval
pub trait Scheduled {
    fn start_date(&self) -> Option<NaiveDate>;
    fn end_date(&self) -> Option<NaiveDate>;
}

/// Which bucket a record falls into relative to a reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Live,
    Upcoming,
    Past,
}

/// A record together with its countdown label
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classified<T> {
    #[serde(flatten)]
    pub record: T,
    pub relative_label: Option<String>,
}

/// Records partitioned into live, upcoming and past, each sorted by start date.
///
/// `highlight` is the soonest upcoming record; `upcoming` holds the rest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification<T> {
    pub live: Vec<Classified<T>>,
    pub highlight: Option<Classified<T>>,
    pub upcoming: Vec<Classified<T>>,
    pub past: Vec<Classified<T>>,
}

impl<T> Classification<T> {
    pub fn len(&self) -> usize {
        self.live.len()
            + usize::from(self.highlight.is_some())
            + self.upcoming.len()
            + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bucket for a single record; records without a start date count as upcoming
pub fn bucket_of<T: Scheduled>(record: &T, today: NaiveDate) -> Bucket {
    let Some(start) = record.start_date() else {
        return Bucket::Upcoming;
    };
    let end = record.end_date().unwrap_or(start);

    if start <= today && today <= end {
        Bucket::Live
    } else if start > today {
        Bucket::Upcoming
    } else {
        Bucket::Past
    }
}

/// Partition records relative to `today` (a UTC calendar day).
pub fn classify<T: Scheduled>(records: Vec<T>, today: NaiveDate) -> Classification<T> {
    let mut live = Vec::new();
    let mut upcoming = Vec::new();
    let mut past = Vec::new();

    for record in records {
        let bucket = bucket_of(&record, today);
        let relative_label = record.start_date().and_then(|start| relative_label(start, today));
        let entry = Classified {
            record,
            relative_label,
        };
        match bucket {
            Bucket::Live => live.push(entry),
            Bucket::Upcoming => upcoming.push(entry),
            Bucket::Past => past.push(entry),
        }
    }

    sort_by_start(&mut live);
    sort_by_start(&mut upcoming);
    sort_by_start(&mut past);

    let highlight = if upcoming.is_empty() {
        None
    } else {
        Some(upcoming.remove(0))
    };

    Classification {
        live,
        highlight,
        upcoming,
        past,
    }
}

/// Countdown label such as `in 3 days`, `in 2 weeks` or `in 5 months`.
///
/// `None` unless `start` lies after `today`.
pub fn relative_label(start: NaiveDate, today: NaiveDate) -> Option<String> {
    let days = (start - today).num_days();
    if days <= 0 {
        return None;
    }

    let (count, unit) = if days < 7 {
        (days, "day")
    } else if days < 28 {
        (rounded_ratio(days, 7), "week")
    } else {
        (rounded_ratio(days, 30), "month")
    };

    let suffix = if count == 1 { "" } else { "s" };
    Some(format!("in {count} {unit}{suffix}"))
}

fn rounded_ratio(days: i64, per_unit: i64) -> i64 {
    (days as f64 / per_unit as f64).round() as i64
}

fn sort_by_start<T: Scheduled>(entries: &mut [Classified<T>]) {
    entries.sort_by(|a, b| compare_start(a.record.start_date(), b.record.start_date()));
}

// Unknown starts sort last
fn compare_start(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
