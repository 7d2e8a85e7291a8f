pub mod asset;
pub mod ownership;
pub mod user;
