// ============================================================================
// Menu Core - Wizard Forms
// File: crates/menu-core/src/wizard/forms.rs
// Description: Step-local input, validated before anything is persisted
// ============================================================================

use serde::Deserialize;
use validator::Validate;

use crate::domain::{validate_categories, validate_hex_color, Category, Visibility};
use crate::error::{DomainError, FieldErrors};
use crate::ports::AssetUpload;

/// Branding step. The logo itself travels next to the form as an upload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BrandingForm {
    #[validate(custom(function = "validate_hex_color"))]
    pub primary_color: String,

    #[validate(custom(function = "validate_hex_color"))]
    pub accent_color: String,
}

impl BrandingForm {
    pub fn new(primary_color: &str, accent_color: &str) -> Self {
        Self {
            primary_color: primary_color.trim().to_string(),
            accent_color: accent_color.trim().to_string(),
        }
    }

    /// Field errors plus the logo rule: a new upload or an already stored logo.
    pub fn check(&self, logo: Option<&AssetUpload>, has_stored_logo: bool) -> Result<(), DomainError> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(&e),
        };
        let has_upload = logo.is_some_and(|upload| !upload.is_empty());
        if !has_upload && !has_stored_logo {
            errors.add("logo", "Logo is required");
        }
        errors.into_result()
    }
}

/// Content step: menu name and the category tree.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContentForm {
    #[validate(length(min = 1, message = "Menu name is required"))]
    pub name: String,

    #[validate(custom(function = "validate_categories"))]
    pub categories: Vec<Category>,
}

impl ContentForm {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            categories: self.categories.into_iter().map(Category::trimmed).collect(),
        }
    }

    /// Categories are checked one by one so paths read `categories[i].items[j].price`.
    pub fn check(&self) -> Result<(), DomainError> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(&e),
        };
        for (index, category) in self.categories.iter().enumerate() {
            if let Err(e) = category.validate() {
                errors.merge(FieldErrors::nested(&format!("categories[{}]", index), &e));
            }
        }
        errors.into_result()
    }
}

/// Review step. `visibility` defaults to `public`; the QR artifact travels as an upload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublishForm {
    pub visibility: Option<String>,
}

impl PublishForm {
    pub fn target_visibility(&self) -> Result<Visibility, DomainError> {
        match self.visibility.as_deref().map(str::trim) {
            None | Some("") => Ok(Visibility::Public),
            Some(raw) => Visibility::from_str(raw)
                .ok_or_else(|| DomainError::field("visibility", "Unknown visibility")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logo() -> AssetUpload {
        AssetUpload::new("logo.png", Some("image/png"), vec![1, 2, 3])
    }

    fn field_errors(result: Result<(), DomainError>) -> FieldErrors {
        match result {
            Err(DomainError::ValidationError(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_branding_requires_logo_once() {
        let form = BrandingForm::new("#4e342e", "#ff7043");
        assert!(form.check(Some(&logo()), false).is_ok());
        assert!(form.check(None, true).is_ok());

        let errors = field_errors(form.check(None, false));
        assert_eq!(errors.messages("logo"), ["Logo is required".to_string()]);

        let empty = AssetUpload::new("logo.png", None, Vec::new());
        assert!(form.check(Some(&empty), false).is_err());
    }

    #[test]
    fn test_branding_rejects_bad_colors() {
        let form = BrandingForm::new("", "orange");
        let errors = field_errors(form.check(Some(&logo()), false));
        assert_eq!(errors.messages("primary_color"), ["Color is required".to_string()]);
        assert!(errors.contains("accent_color"));
        assert!(!errors.contains("logo"));
    }

    #[test]
    fn test_content_reports_nested_paths() {
        let form = ContentForm {
            name: "  ".to_string(),
            categories: vec![
                Category::new("Beverages").with_item("Latte", "50"),
                Category::new("Desserts"),
                Category::new("Pastries").with_item("Croissant", "abc"),
            ],
        }
        .trimmed();

        let errors = field_errors(form.check());
        assert!(errors.contains("name"));
        assert!(errors.contains("categories[1].items"));
        assert!(errors.contains("categories[2].items[0].price"));
        assert!(!errors.contains("categories[0].items"));
    }

    #[test]
    fn test_content_requires_a_category() {
        let form = ContentForm {
            name: "Morning Menu".to_string(),
            categories: Vec::new(),
        };
        let errors = field_errors(form.check());
        assert_eq!(
            errors.messages("categories"),
            ["At least one category is required".to_string()]
        );
    }

    #[test]
    fn test_publish_visibility_defaults_to_public() {
        assert_eq!(PublishForm::default().target_visibility().unwrap(), Visibility::Public);

        let private = PublishForm { visibility: Some("private".to_string()) };
        assert_eq!(private.target_visibility().unwrap(), Visibility::Private);

        let bogus = PublishForm { visibility: Some("secret".to_string()) };
        assert!(bogus.target_visibility().is_err());
    }
}
