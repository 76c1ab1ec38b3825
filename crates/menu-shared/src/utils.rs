//! Utility functions

use uuid::Uuid;

use crate::constants::{PUBLIC_MENU_PATH, WIZARD_PATH};

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        match local.chars().count() {
            0 => format!("***{}", domain),
            1 | 2 => format!("{}***{}", local.chars().next().unwrap_or('*'), domain),
            _ => format!("{}***{}", local.chars().take(2).collect::<String>(), domain),
        }
    } else {
        "***".to_string()
    }
}

/// Public viewing link for a menu, the target encoded in its QR artifact.
pub fn share_link(public_base_url: &str, menu_id: &Uuid) -> String {
    format!("{}{}/{}", public_base_url.trim_end_matches('/'), PUBLIC_MENU_PATH, menu_id)
}

/// Location of a wizard step for a draft.
pub fn wizard_location(menu_id: &Uuid, step: u8) -> String {
    format!("{}?id={}&step={}", WIZARD_PATH, menu_id, step)
}
