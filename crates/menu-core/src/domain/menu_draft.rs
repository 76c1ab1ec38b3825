// ============================================================================
// Menu Core - Menu Draft Entity
// File: crates/menu-core/src/domain/menu_draft.rs
// Description: Menu aggregate persisted across wizard steps
// ============================================================================

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use menu_shared::constants::{DEFAULT_ACCENT_COLOR, DEFAULT_PRIMARY_COLOR};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::access::Subject;
use crate::error::FieldErrors;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex"));

static DECIMAL_PRICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("valid price regex"));

/// Visibility enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Archived,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "public" => Some(Visibility::Public),
            "private" => Some(Visibility::Private),
            "archived" => Some(Visibility::Archived),
            _ => None,
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Private
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub accent_color: String,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            logo_url: None,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MenuItem {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,

    #[validate(custom(function = "validate_price"))]
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Category {
    pub id: Uuid,

    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Each category must have at least one item"), nested)]
    pub items: Vec<MenuItem>,
}

impl Category {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, name: &str, price: &str) -> Self {
        self.items.push(MenuItem {
            name: name.to_string(),
            price: price.to_string(),
        });
        self
    }

    pub(crate) fn trimmed(self) -> Self {
        Self {
            id: self.id,
            name: self.name.trim().to_string(),
            items: self
                .items
                .into_iter()
                .map(|item| MenuItem {
                    name: item.name.trim().to_string(),
                    price: item.price.trim().to_string(),
                })
                .collect(),
        }
    }
}

/// Menu draft aggregate. `created_at` and `updated_at` are only ever filled
/// in by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuDraft {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub brand: Brand,
    pub name: Option<String>,
    pub categories: Vec<Category>,
    pub visibility: Visibility,
    pub published_artifact_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MenuDraft {
    pub fn new(id: Uuid, owner_id: Uuid) -> Self {
        Self {
            id,
            owner_id,
            brand: Brand::default(),
            name: None,
            categories: Vec::new(),
            visibility: Visibility::default(),
            published_artifact_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.owner_id == *user_id
    }

    /// Public drafts are visible to anyone, everything else only to the owner.
    pub fn is_viewable_by(&self, subject: &Subject) -> bool {
        self.is_public() || subject.user_id().is_some_and(|id| self.is_owned_by(&id))
    }

    pub fn has_logo(&self) -> bool {
        self.brand.logo_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Everything a draft needs before it can be published.
    pub fn publish_readiness(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.as_deref().map(str::trim).unwrap_or_default().is_empty() {
            errors.add("name", "Menu name is required");
        }
        if !self.has_logo() {
            errors.add("logo", "Logo is required");
        }
        if let Err(e) = validate_categories(&self.categories) {
            errors.add("categories", &e.message.map(|m| m.to_string()).unwrap_or_default());
        }
        for (index, category) in self.categories.iter().enumerate() {
            if let Err(e) = category.validate() {
                errors.merge(FieldErrors::nested(&format!("categories[{}]", index), &e));
            }
        }
        errors
    }
}

pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Color is required".into()));
    }
    if !HEX_COLOR.is_match(value.trim()) {
        return Err(ValidationError::new("hex_color")
            .with_message("Color must be a hex value such as #4e342e".into()));
    }
    Ok(())
}

pub fn validate_price(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Price is required".into()));
    }
    if !DECIMAL_PRICE.is_match(value.trim()) {
        return Err(ValidationError::new("decimal")
            .with_message("Price must be a decimal number".into()));
    }
    Ok(())
}

/// At least one category, category ids unique within the menu.
pub fn validate_categories(categories: &[Category]) -> Result<(), ValidationError> {
    if categories.is_empty() {
        return Err(ValidationError::new("required")
            .with_message("At least one category is required".into()));
    }
    let mut seen = HashSet::new();
    if categories.iter().any(|c| !seen.insert(c.id)) {
        return Err(ValidationError::new("unique")
            .with_message("Category ids must be unique".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latte_menu(owner: Uuid) -> MenuDraft {
        let mut draft = MenuDraft::new(Uuid::new_v4(), owner);
        draft.name = Some("Morning Menu".to_string());
        draft.brand.logo_url = Some("https://cdn.test/logo.png".to_string());
        draft.categories = vec![Category::new("Beverages").with_item("Latte", "50")];
        draft
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = MenuDraft::new(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(draft.brand.primary_color, "#4e342e");
        assert_eq!(draft.brand.accent_color, "#ff7043");
        assert_eq!(draft.visibility, Visibility::Private);
        assert!(draft.created_at.is_none());
        assert!(!draft.has_logo());
    }

    #[test]
    fn test_visibility_parsing() {
        assert_eq!(Visibility::from_str("Public"), Some(Visibility::Public));
        assert_eq!(Visibility::from_str("archived"), Some(Visibility::Archived));
        assert_eq!(Visibility::from_str("hidden"), None);
    }

    #[test]
    fn test_viewable_by() {
        let owner = Uuid::new_v4();
        let mut draft = latte_menu(owner);

        assert!(draft.is_viewable_by(&Subject::Authenticated(owner)));
        assert!(!draft.is_viewable_by(&Subject::Authenticated(Uuid::new_v4())));
        assert!(!draft.is_viewable_by(&Subject::Anonymous));

        draft.visibility = Visibility::Public;
        assert!(draft.is_viewable_by(&Subject::Anonymous));
    }

    #[test]
    fn test_hex_color_validation() {
        assert!(validate_hex_color("#4e342e").is_ok());
        assert!(validate_hex_color("#FFF").is_ok());
        assert!(validate_hex_color("").is_err());
        assert!(validate_hex_color("brown").is_err());
        assert!(validate_hex_color("#12345").is_err());
    }

    #[test]
    fn test_price_validation() {
        assert!(validate_price("50").is_ok());
        assert!(validate_price("12.75").is_ok());
        assert!(validate_price("").is_err());
        assert!(validate_price("fifty").is_err());
        assert!(validate_price("-3").is_err());
    }

    #[test]
    fn test_category_without_items_is_rejected() {
        let category = Category::new("Desserts");
        let errors = FieldErrors::from(&category.validate().unwrap_err());
        assert_eq!(
            errors.messages("items"),
            ["Each category must have at least one item".to_string()]
        );
    }

    #[test]
    fn test_duplicate_category_ids_are_rejected() {
        let first = Category::new("Beverages").with_item("Latte", "50");
        let mut second = Category::new("Pastries").with_item("Croissant", "35");
        second.id = first.id;
        assert!(validate_categories(&[first, second]).is_err());
    }

    #[test]
    fn test_publish_readiness() {
        let draft = latte_menu(Uuid::new_v4());
        assert!(draft.publish_readiness().is_empty());

        let mut incomplete = MenuDraft::new(Uuid::new_v4(), Uuid::new_v4());
        incomplete.categories = vec![Category::new("Beverages")];
        let errors = incomplete.publish_readiness();
        assert!(errors.contains("name"));
        assert!(errors.contains("logo"));
        assert!(errors.contains("categories[0].items"));
    }
}
