use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use tourney_tracker::domain::{classify, strip_game_prefix, TournamentDraft};
use tourney_tracker::fetchers::RecordExtractor;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn extract(min_year: i32) -> Vec<TournamentDraft> {
    let html = read_fixture("dota2_tier1.html");
    RecordExtractor::new("https://liquipedia.net")
        .expect("selectors should compile")
        .extract_html(&html, min_year)
}

fn find<'a>(drafts: &'a [TournamentDraft], name: &str) -> &'a TournamentDraft {
    drafts
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| panic!("{name} should be extracted"))
}

#[test]
fn extracts_rows_from_tier_page() {
    let drafts = extract(2025);

    let names: Vec<_> = drafts.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "The International 2025",
            "FISSURE Universe: Episode 4",
            "Riyadh Masters 2025",
            "BLAST Slam VI",
            "ESL One 2026",
        ]
    );
}

#[test]
fn title_uses_edition_link_not_league_icon() {
    let drafts = extract(2025);
    let ti = find(&drafts, "The International 2025");

    assert_eq!(ti.url.as_deref(), Some("https://liquipedia.net/dota2/The_International/2025"));
    assert_eq!(ti.prize_pool, "$2,500,000+");
    assert_eq!(ti.location, "Hamburg");
    assert_eq!(ti.start_date, date(2025, 9, 4));
    assert_eq!(ti.end_date, date(2025, 9, 14));
}

#[test]
fn normalizes_wiki_date_formats() {
    let drafts = extract(2025);

    let fissure = find(&drafts, "FISSURE Universe: Episode 4");
    assert_eq!((fissure.start_date, fissure.end_date), (date(2025, 1, 29), date(2025, 2, 9)));

    let riyadh = find(&drafts, "Riyadh Masters 2025");
    assert_eq!((riyadh.start_date, riyadh.end_date), (date(2025, 7, 8), date(2025, 7, 27)));

    let blast = find(&drafts, "BLAST Slam VI");
    assert_eq!((blast.start_date, blast.end_date), (date(2025, 12, 28), date(2026, 1, 4)));
    assert_eq!(blast.prize_pool, "N/A");
}

#[test]
fn keeps_rows_with_unresolved_dates() {
    let drafts = extract(2025);
    let esl = find(&drafts, "ESL One 2026");

    assert_eq!(esl.date_text, "TBA 2026");
    assert_eq!(esl.start_date, None);
    assert_eq!(esl.end_date, None);
    assert_eq!(esl.location, "N/A");
}

#[test]
fn min_year_drops_older_rows() {
    let names: Vec<_> = extract(2026).into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["BLAST Slam VI", "ESL One 2026"]);

    assert_eq!(extract(2024).len(), 6);
}

#[test]
fn extracted_rows_classify_against_today() {
    let records = extract(2025);
    let today = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();

    let result = classify(records, today);

    let live: Vec<_> = result.live.iter().map(|e| e.record.name.as_str()).collect();
    assert_eq!(live, vec!["Riyadh Masters 2025"]);
    let highlight = result.highlight.expect("an upcoming event");
    assert_eq!(highlight.record.name, "The International 2025");
    assert_eq!(highlight.relative_label.as_deref(), Some("in 2 months"));
    let upcoming: Vec<_> = result.upcoming.iter().map(|e| e.record.name.as_str()).collect();
    assert_eq!(upcoming, vec!["BLAST Slam VI", "ESL One 2026"]);
    assert_eq!(result.past.len(), 1);
}

#[test]
fn display_names_drop_game_prefix() {
    assert_eq!(strip_game_prefix("Dota 2: The International", "Dota 2"), "The International");
    assert_eq!(strip_game_prefix("Riyadh Masters 2025", "dota2"), "Riyadh Masters 2025");
}
