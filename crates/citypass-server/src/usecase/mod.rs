//! Business logic layer
//!
//! Thin orchestration over whichever repository implementation was injected
//! at startup (cache-decorated in production, bare store or fake in tests).

pub mod account;
pub mod recreation;
pub mod restaurant;

pub use account::AccountUsecase;
pub use recreation::RecreationUsecase;
pub use restaurant::RestaurantUsecase;
