pub mod config;
pub mod fs;
pub mod process;
pub mod queue;
pub mod structured_file;
