pub mod settings;

pub use settings::{AppConfig, ScraperSettings, StorageSettings};
