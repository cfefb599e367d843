use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};

use crate::config::ScraperSettings;
use crate::domain::dates::{latest_year, parse_date_range};
use crate::domain::models::{text_or_placeholder, TournamentDraft};
use crate::http::RateLimitedClient;

const ROW: &str = ".gridRow";
const TITLE_LINKS: &str = ".gridCell.Tournament.Header a";
const DATE_CELL: &str = ".gridCell.EventDetails.Date.Header";
const PRIZE_CELL: &str = ".gridCell.EventDetails.Prize.Header";
const LOCATION_CELL: &str = ".gridCell.EventDetails.Location.Header";

/// Pulls tournament rows out of a wiki tournament table
pub struct RecordExtractor {
    base_url: String,
    row: Selector,
    title_links: Selector,
    date_cell: Selector,
    prize_cell: Selector,
    location_cell: Selector,
}

impl RecordExtractor {
    /// `base_url` is the wiki origin used to resolve relative detail links
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            row: Self::compile_selector(ROW)?,
            title_links: Self::compile_selector(TITLE_LINKS)?,
            date_cell: Self::compile_selector(DATE_CELL)?,
            prize_cell: Self::compile_selector(PRIZE_CELL)?,
            location_cell: Self::compile_selector(LOCATION_CELL)?,
        })
    }

    /// Extract every usable row.
    ///
    /// Rows without a title or date, without any year in the date, or whose
    /// latest year is before `min_year` are skipped.
    pub fn extract(&self, document: &Html, min_year: i32) -> Vec<TournamentDraft> {
        let mut drafts = Vec::new();
        let mut skipped = 0;

        for row in document.select(&self.row) {
            match self.extract_row(row, min_year) {
                Some(draft) => drafts.push(draft),
                None => skipped += 1,
            }
        }

        debug!("Extracted {} tournaments, skipped {} rows", drafts.len(), skipped);
        drafts
    }

    pub fn extract_html(&self, html: &str, min_year: i32) -> Vec<TournamentDraft> {
        self.extract(&Html::parse_document(html), min_year)
    }

    // --- Row Parsing ---

    fn extract_row(&self, row: ElementRef, min_year: i32) -> Option<TournamentDraft> {
        // Pages nest the parent event link before the edition link; the last one wins
        let title_link = row.select(&self.title_links).last();
        let name = title_link.map(element_text).unwrap_or_default();
        let date_text = self.cell_text(row, &self.date_cell);

        if name.is_empty() || date_text.is_empty() {
            debug!("Skipping row without title or date: {:?} / {:?}", name, date_text);
            return None;
        }

        match latest_year(&date_text) {
            None => {
                debug!("Skipping {:?}: no year in {:?}", name, date_text);
                return None;
            }
            Some(year) if year < min_year => {
                debug!("Skipping {:?}: {} is before {}", name, year, min_year);
                return None;
            }
            Some(_) => {}
        }

        let range = parse_date_range(&date_text);
        if !range.is_resolved() {
            debug!("Keeping {:?} with unresolved dates {:?}", name, date_text);
        }

        let url = title_link
            .and_then(|link| link.value().attr("href"))
            .and_then(|href| self.resolve_link(href));

        Some(TournamentDraft {
            name,
            start_date: range.start,
            end_date: range.end,
            prize_pool: text_or_placeholder(&self.cell_text(row, &self.prize_cell)),
            location: text_or_placeholder(&self.cell_text(row, &self.location_cell)),
            date_text,
            url,
        })
    }

    fn cell_text(&self, row: ElementRef, selector: &Selector) -> String {
        row.select(selector).next().map(element_text).unwrap_or_default()
    }

    // --- Link Resolution ---

    fn resolve_link(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }

        if href.starts_with("http://") || href.starts_with("https://") {
            return Some(href.to_string());
        }
        if let Some(rest) = href.strip_prefix("//") {
            return Some(format!("{}://{}", self.scheme(), rest));
        }
        if href.starts_with('/') {
            return Some(format!("{}{}", self.base_url, href));
        }
        Some(format!("{}/{}", self.base_url, href))
    }

    fn scheme(&self) -> &str {
        self.base_url.split_once("://").map_or("https", |(scheme, _)| scheme)
    }

    fn compile_selector(css: &'static str) -> Result<Selector> {
        Selector::parse(css).map_err(|e| anyhow!("Invalid selector {css}: {e}"))
    }
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fetches wiki listing pages and turns them into tournament drafts
pub struct WikiScraper {
    client: RateLimitedClient,
    extractor: RecordExtractor,
}

impl WikiScraper {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        Ok(Self {
            client: RateLimitedClient::from_settings(settings)?,
            extractor: RecordExtractor::new(&settings.base_url)?,
        })
    }

    pub async fn fetch_page(&mut self, url: &str) -> Result<String> {
        info!("Fetching page: {}", url);
        self.client.fetch_text(url).await
    }

    pub fn extract(&self, html: &str, min_year: i32) -> Vec<TournamentDraft> {
        let drafts = self.extractor.extract_html(html, min_year);
        if drafts.is_empty() {
            warn!("No tournaments found in page ({} bytes)", html.len());
        }
        drafts
    }
}
