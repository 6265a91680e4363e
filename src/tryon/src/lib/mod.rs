pub mod comfy;
pub mod environment;
pub mod error;
pub mod logger;
