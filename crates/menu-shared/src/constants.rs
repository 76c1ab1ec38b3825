//! Application-wide constants

pub const SESSION_COOKIE_NAME: &str = "menu_session";
pub const OAUTH_STATE_COOKIE_NAME: &str = "menu_oauth_state";
pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 60 * 60 * 24 * 30;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

pub const DEFAULT_PRIMARY_COLOR: &str = "#4e342e";
pub const DEFAULT_ACCENT_COLOR: &str = "#ff7043";

pub const SIGN_IN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/designs";
pub const WIZARD_PATH: &str = "/menus/create";
pub const PUBLIC_MENU_PATH: &str = "/menu";

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
