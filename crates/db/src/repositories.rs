pub mod file;
pub mod memory;
pub mod postgres;

pub use file::FileRoutineRepository;
pub use memory::MemoryRoutineRepository;
pub use postgres::PgRoutineRepository;
