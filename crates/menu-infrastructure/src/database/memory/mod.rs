//! In-memory repository implementations, used by the `memory` backend and tests

pub mod draft_repo_impl;
pub mod user_repo_impl;

pub use draft_repo_impl::MemoryDraftRepository;
pub use user_repo_impl::MemoryUserRepository;
