use colored::Colorize;
use std::fmt::Write;

use crate::cache::SavedPage;
use crate::services::ingestion::SubmitOutcome;
use crate::services::overview::{Overview, Section, SectionKind, TournamentView};

/// Terminal rendering of an overview, one block per section
pub fn overview(overview: &Overview) -> String {
    let mut out = String::new();

    let scope = match (&overview.game, &overview.tier) {
        (_, Some(tier)) => format!("tier {} ({})", tier.id, tier.url),
        (Some(game), None) => game.clone(),
        (None, None) => "all games".to_string(),
    };
    let _ = writeln!(out, "{} {}", "Tournaments for".bold(), scope.bold());
    let _ = writeln!(out, "{}", format!("as of {}", overview.today).dimmed());

    if overview.sections.is_empty() {
        let _ = writeln!(out, "\n{}", "No tournaments. Submit a Liquipedia page first.".yellow());
    }
    for section in &overview.sections {
        render_section(&mut out, section);
    }

    if overview.hidden > 0 {
        let hidden = format!("{} hidden by tier filters", overview.hidden);
        let _ = writeln!(out, "\n{}", hidden.dimmed());
    }
    out
}

fn render_section(out: &mut String, section: &Section) {
    let title = match section.kind {
        SectionKind::Live => section.title.red().bold(),
        SectionKind::Highlight => section.title.green().bold(),
        SectionKind::NextUp => section.title.cyan().bold(),
        SectionKind::Past => section.title.dimmed().bold(),
    };
    let _ = writeln!(out, "\n{} ({})", title, section.tournaments.len());

    for item in &section.tournaments {
        render_item(out, item);
    }
}

fn render_item(out: &mut String, item: &TournamentView) {
    let badge = format!("{:>3} {:>2}", item.badge.month, item.badge.day);
    let mut line = format!("  {}  {}", badge.bold(), item.display_name);

    if item.is_live {
        line.push_str(&format!(" {}", "LIVE".red().bold()));
    }
    if item.show_eta {
        if let Some(label) = &item.relative_label {
            line.push_str(&format!(" {}", label.green()));
        }
    }
    let _ = writeln!(out, "{line}");

    let mut details = vec![item.date_range.clone()];
    if item.has_prize {
        details.push(item.prize_pool.clone());
    }
    if item.has_location {
        details.push(item.location.clone());
    }
    let _ = writeln!(out, "           {}", details.join(" | ").dimmed());
}

pub fn submit(outcome: &SubmitOutcome) -> String {
    let mut out = String::new();
    let source = if outcome.from_cache { "saved page" } else { "live page" };

    let _ = writeln!(
        out,
        "{} {} / {} ({})",
        "Scraped".green().bold(),
        outcome.game,
        outcome.tier,
        source
    );
    for draft in &outcome.tournaments {
        let _ = writeln!(out, "  {}  {}", draft.date_text.dimmed(), draft.name);
    }
    let _ = writeln!(
        out,
        "{} tournaments found, {} new (tier id {})",
        outcome.tournaments.len(),
        outcome.inserted.to_string().bold(),
        outcome.tier_id
    );
    out
}

pub fn saved_pages(pages: &[SavedPage]) -> String {
    if pages.is_empty() {
        return format!("{}\n", "No saved pages".yellow());
    }

    let mut out = String::new();
    for page in pages {
        let _ = writeln!(out, "{}  {}", page.file.bold(), page.url);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateBadge;
    use chrono::NaiveDate;

    fn view(name: &str, is_live: bool, label: Option<&str>) -> TournamentView {
        TournamentView {
            key: format!("1|{name}|"),
            id: 1,
            tier_id: 1,
            game: "dota2".to_string(),
            name: name.to_string(),
            display_name: name.to_string(),
            badge: DateBadge::default(),
            date_range: "TBA".to_string(),
            date_text: None,
            prize_pool: "$50,000".to_string(),
            location: "N/A".to_string(),
            url: None,
            has_prize: true,
            has_location: false,
            is_live,
            show_eta: label.is_some(),
            relative_label: label.map(str::to_string),
        }
    }

    fn overview_with(sections: Vec<Section>) -> Overview {
        Overview {
            today: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            game: Some("dota2".to_string()),
            tier: None,
            games: vec![],
            tiers: vec![],
            filters: None,
            sections,
            total: 0,
            hidden: 2,
        }
    }

    #[test]
    fn test_overview_lists_sections_and_items() {
        let sections = vec![
            Section {
                kind: SectionKind::Live,
                title: SectionKind::Live.title(),
                tournaments: vec![view("Riyadh Masters", true, None)],
            },
            Section {
                kind: SectionKind::Highlight,
                title: SectionKind::Highlight.title(),
                tournaments: vec![view("The International", false, Some("in 3 days"))],
            },
        ];

        let text = overview(&overview_with(sections));

        assert!(text.contains("dota2"));
        assert!(text.contains("Currently live"));
        assert!(text.contains("Riyadh Masters"));
        assert!(text.contains("LIVE"));
        assert!(text.contains("in 3 days"));
        assert!(text.contains("$50,000"));
        assert!(!text.contains("N/A"));
        assert!(text.contains("2 hidden by tier filters"));
    }

    #[test]
    fn test_empty_overview_hint() {
        let text = overview(&overview_with(vec![]));
        assert!(text.contains("No tournaments"));
    }

    #[test]
    fn test_saved_pages() {
        let pages = vec![SavedPage {
            file: "dota2_Tier_1_Tournaments.html".to_string(),
            url: "https://liquipedia.net/dota2/Tier_1_Tournaments".to_string(),
        }];

        assert!(saved_pages(&pages).contains("https://liquipedia.net/dota2/Tier_1_Tournaments"));
        assert!(saved_pages(&[]).contains("No saved pages"));
    }
}
