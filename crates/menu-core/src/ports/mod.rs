//! Ports to external collaborators other than the store.

pub mod asset_host;
pub mod identity_provider;

pub use asset_host::{AssetHost, AssetUpload};
pub use identity_provider::{IdentityProvider, OAuthProfile};

#[cfg(test)]
pub use asset_host::MockAssetHost;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
