pub mod connection;
pub mod games;
pub mod models;
pub mod setup;
pub mod tiers;
pub mod tournaments;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
pub use setup::open_database;
