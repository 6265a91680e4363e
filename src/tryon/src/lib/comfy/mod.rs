pub mod install;
pub mod server;
