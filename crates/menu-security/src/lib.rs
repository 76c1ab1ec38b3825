//! # Menu Security
//! 
//! Security utilities: JWT sessions, password hashing, session cookies, OAuth state.

pub mod jwt;
pub mod password;
pub mod session;
pub mod csrf;

pub use jwt::JwtService;
pub use password::PasswordService;
