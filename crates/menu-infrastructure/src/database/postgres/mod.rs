//! PostgreSQL repository implementations

pub mod draft_repo_impl;
pub mod user_repo_impl;

pub use draft_repo_impl::PgDraftRepository;
pub use user_repo_impl::PgUserRepository;
