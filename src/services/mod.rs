pub mod ingestion;
pub mod overview;
pub mod server;
