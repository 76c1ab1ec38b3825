//! Repository traits (ports)

pub mod draft_repository;
pub mod user_repository;

pub use draft_repository::DraftRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use draft_repository::MockDraftRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
