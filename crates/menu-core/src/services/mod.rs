//! Domain services (business logic)

pub mod account_service;
pub mod auth_service;
pub mod draft_service;
pub mod wizard_service;

pub use account_service::{AccountService, AccountUpdate};
pub use auth_service::{AuthService, LoginResult, UserInfo};
pub use draft_service::{DraftQuery, DraftService, DraftSort};
pub use wizard_service::{PublishOutcome, StepOutcome, WizardService, WizardView};
