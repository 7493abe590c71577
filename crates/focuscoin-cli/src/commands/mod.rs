pub mod config;
pub mod reward;
pub mod session;
pub mod wallet;
