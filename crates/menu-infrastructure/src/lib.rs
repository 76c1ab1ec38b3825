//! # Menu Infrastructure
//! 
//! Store adapters (PostgreSQL and in-memory) and HTTP adapters for the asset
//! host and the Google identity provider.

pub mod database;
pub mod external;

pub use database::{
    create_pool, run_migrations, MemoryDraftRepository, MemoryUserRepository, PgDraftRepository,
    PgUserRepository,
};
pub use external::{CloudinaryAssetHost, GoogleIdentityProvider};
