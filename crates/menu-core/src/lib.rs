//! # Menu Core
//! 
//! Domain entities, validation, the draft wizard, the access gate, and the
//! ports (repositories, asset host, identity provider) the services depend on.

pub mod access;
pub mod domain;
pub mod error;
pub mod ports;
pub mod repositories;
pub mod services;
pub mod wizard;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, FieldErrors};
