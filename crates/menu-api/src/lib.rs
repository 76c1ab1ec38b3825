//! # Menu API
//! 
//! HTTP handlers, the access gate middleware, response envelopes and router.

pub mod context;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
