//! # Routine Core
//!
//! Domain logic for building a department's weekly class timetable: the data
//! model, the static catalog of rooms, teachers and subjects, and the engine
//! that decides whether a class can be placed in a grid cell.
//!
//! - **models**: slots, routines, the persisted store and form drafts
//! - **catalog**: read-only reference data and the fixed teaching periods
//! - **conflict**: room/teacher collision lookups across every cohort
//! - **validation**: ordered slot rules, first failure wins
//! - **repository**: the storage seam implemented by `routine-db`
//! - **service**: serialised read-validate-write operations
//! - **export**: printable HTML grid

pub mod catalog;
pub mod conflict;
pub mod errors;
pub mod export;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;
