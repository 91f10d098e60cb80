pub mod account;
pub mod team;
