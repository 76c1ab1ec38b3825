//! Three-step menu wizard: step addressing and per-step forms.

pub mod forms;
pub mod step;

pub use forms::{BrandingForm, ContentForm, PublishForm};
pub use step::WizardStep;
