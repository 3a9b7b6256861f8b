//! HTTP handlers

pub mod account;
pub mod health;
pub mod recreation;
pub mod restaurant;

pub use health::health;
