pub mod auction;
pub mod config;
pub mod kernel;
pub mod server;
