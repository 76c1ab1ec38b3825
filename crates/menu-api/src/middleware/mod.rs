//! HTTP middleware

pub mod gate;

pub use gate::{access_gate, resolve_subject};
