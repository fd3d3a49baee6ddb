pub mod availability;
pub mod catalog;
pub mod conflict;
pub mod health;
pub mod routine;
