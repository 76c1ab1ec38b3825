//! Shared application state

use std::sync::Arc;

use menu_core::ports::{AssetHost, IdentityProvider};
use menu_core::repositories::{DraftRepository, UserRepository};
use menu_core::services::{AccountService, AuthService, DraftService, WizardService};
use menu_security::session::SessionCookie;
use menu_security::JwtService;
use menu_shared::config::AppConfig;
use menu_shared::constants::{OAUTH_STATE_COOKIE_NAME, SESSION_COOKIE_NAME};
use sqlx::PgPool;

/// Lifetime of the OAuth `state` cookie, in seconds.
const OAUTH_STATE_MAX_AGE: i64 = 600;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` on the in-memory backend.
    pub db: Option<PgPool>,
    pub wizard: Arc<WizardService>,
    pub drafts: Arc<DraftService>,
    pub auth: Arc<AuthService>,
    pub accounts: Arc<AccountService>,
    pub identity: Option<Arc<dyn IdentityProvider>>,
    pub session_cookie: SessionCookie,
    pub oauth_state_cookie: SessionCookie,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: Option<PgPool>,
        draft_repo: Arc<dyn DraftRepository>,
        user_repo: Arc<dyn UserRepository>,
        assets: Arc<dyn AssetHost>,
        identity: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);
        let secure = config.app.secure_cookies;

        Self {
            wizard: Arc::new(WizardService::new(
                draft_repo.clone(),
                assets,
                &config.app.public_base_url,
            )),
            drafts: Arc::new(DraftService::new(draft_repo)),
            auth: Arc::new(AuthService::new(user_repo.clone(), jwt)),
            accounts: Arc::new(AccountService::new(user_repo)),
            identity,
            session_cookie: SessionCookie::new(
                SESSION_COOKIE_NAME,
                config.jwt.access_token_expiry,
                secure,
            ),
            oauth_state_cookie: SessionCookie::new(OAUTH_STATE_COOKIE_NAME, OAUTH_STATE_MAX_AGE, secure),
            config: Arc::new(config),
            db,
        }
    }
}
