//! # Menu Shared
//! 
//! Shared configuration, telemetry, and constants for the menu builder.

pub mod constants;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
