pub mod config;
pub mod top;
pub mod trace;
