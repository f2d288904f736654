pub mod error;
pub mod health;
pub mod outfit;
pub mod tags;
