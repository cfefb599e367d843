mod wiki_scraper;
mod wiki_url;

pub use wiki_scraper::{RecordExtractor, WikiScraper};
pub use wiki_url::WikiPage;
