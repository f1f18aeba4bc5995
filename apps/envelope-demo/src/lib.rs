// Library exports for testing
// The binary (main.rs) imports these as well

pub mod app;
pub mod error;
pub mod handlers;
pub mod inventory;
pub mod logger;
pub mod scenarios;
