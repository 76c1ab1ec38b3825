//! # Menu Core - Domain Module
//! 
//! Domain entities for the menu builder.

pub mod member_user;
pub mod menu_draft;

// Re-export all entities and enums
pub use member_user::{AuthProvider, LinkedAccount, MemberUser};
pub use menu_draft::{
    validate_categories, validate_hex_color, validate_price, Brand, Category, MenuDraft,
    MenuItem, Visibility,
};
