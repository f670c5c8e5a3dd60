//! QRcade Persistence - SQLite storage for users, ledgers, and rewards

pub mod sqlite;

pub use sqlite::Database;
