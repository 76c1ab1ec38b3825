//! HTTP adapters for third-party services

pub mod cloudinary;
pub mod google;

pub use cloudinary::CloudinaryAssetHost;
pub use google::GoogleIdentityProvider;
