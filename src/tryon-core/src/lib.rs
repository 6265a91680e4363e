pub mod config;
pub mod error;
pub mod fs;
pub mod json;
pub mod process;
pub mod queue;
pub mod staging;
pub mod workflow;
