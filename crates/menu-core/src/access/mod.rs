//! Access control: request subjects, route zones, and ownership checks.

pub mod gate;
pub mod subject;

pub use gate::{
    classify, denied_redirect, evaluate, require_owner, require_viewable, GateDecision, Zone,
};
pub use subject::Subject;
