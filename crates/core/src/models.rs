pub mod catalog;
pub mod routine;
pub mod time_slot;
