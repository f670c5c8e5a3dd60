//! QRcade Engine - Perk resolution, earnings math, and loot box opening

pub mod earnings;
pub mod lootbox;
pub mod perks;

pub use earnings::{calculate_spin_earnings, calculate_vote_earnings};
pub use lootbox::open_loot_box;
pub use perks::resolve_perks;
