pub mod client;
pub mod sold_listings;
