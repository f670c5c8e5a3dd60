//! SQLite database management

mod avatars;
mod balances;
mod connection;
mod ledger;
mod openings;
mod purchases;
mod users;

pub use avatars::*;
pub use balances::*;
pub use connection::Database;
pub use ledger::*;
pub use openings::*;
pub use purchases::*;
pub use users::*;
