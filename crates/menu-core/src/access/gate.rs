// ============================================================================
// Menu Core - Access Gate
// File: crates/menu-core/src/access/gate.rs
// ============================================================================
//! Path-prefix zone classification and the per-request gate decision.
//!
//! The gate only knows paths and subjects. The single-menu view depends on the
//! stored visibility, so that zone is let through here and settled by
//! [`require_viewable`] once the record is loaded.

use menu_shared::constants::{DASHBOARD_PATH, HOME_PATH, SIGN_IN_PATH};
use uuid::Uuid;

use super::Subject;
use crate::domain::MenuDraft;
use crate::error::DomainError;

const AUTH_PAGE_PREFIXES: &[&str] = &["/login", "/register"];
const PROTECTED_PREFIXES: &[&str] = &[
    "/designs",
    "/menus",
    "/account",
    "/api/menus",
    "/api/account",
];
const OWNERSHIP_PREFIXES: &[&str] = &["/menu"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Landing, health, auth API.
    Public,
    /// Sign-in and registration entry points.
    AuthPage,
    /// Wizard, dashboard, account, menu API.
    Protected,
    /// Single menu view; public menus pass, others need the owner.
    Ownership,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(&'static str),
}

/// Matches whole path segments, so `/menus` never falls into `/menu`.
fn has_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

pub fn classify(path: &str) -> Zone {
    let path = path.to_lowercase();
    let path = path.trim_end_matches('/');
    let path = if path.is_empty() { "/" } else { path };

    let matches = |prefixes: &[&str]| prefixes.iter().any(|prefix| has_prefix(path, prefix));

    if matches(AUTH_PAGE_PREFIXES) {
        Zone::AuthPage
    } else if matches(PROTECTED_PREFIXES) {
        Zone::Protected
    } else if matches(OWNERSHIP_PREFIXES) {
        Zone::Ownership
    } else {
        Zone::Public
    }
}

pub fn evaluate(zone: Zone, subject: &Subject) -> GateDecision {
    match (zone, subject) {
        (Zone::Protected, Subject::Anonymous) => GateDecision::Redirect(SIGN_IN_PATH),
        (Zone::AuthPage, Subject::Authenticated(_)) => GateDecision::Redirect(DASHBOARD_PATH),
        _ => GateDecision::Allow,
    }
}

/// Where every failed ownership check ends up.
pub fn denied_redirect() -> &'static str {
    HOME_PATH
}

/// A missing draft is reported the same way as a foreign one.
pub fn require_viewable(draft: Option<MenuDraft>, subject: &Subject) -> Result<MenuDraft, DomainError> {
    match draft {
        Some(draft) if draft.is_viewable_by(subject) => Ok(draft),
        _ => Err(DomainError::AccessDenied),
    }
}

pub fn require_owner(draft: &MenuDraft, user_id: &Uuid) -> Result<(), DomainError> {
    if draft.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(DomainError::AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Visibility;

    #[test]
    fn test_classify_zones() {
        assert_eq!(classify("/"), Zone::Public);
        assert_eq!(classify("/health"), Zone::Public);
        assert_eq!(classify("/api/auth/login"), Zone::Public);
        assert_eq!(classify("/login"), Zone::AuthPage);
        assert_eq!(classify("/register"), Zone::AuthPage);
        assert_eq!(classify("/designs"), Zone::Protected);
        assert_eq!(classify("/Designs"), Zone::Protected);
        assert_eq!(classify("/menus/create"), Zone::Protected);
        assert_eq!(classify("/api/menus/123/visibility"), Zone::Protected);
        assert_eq!(classify("/account/"), Zone::Protected);
        assert_eq!(classify("/menu/8a7b"), Zone::Ownership);
        assert_eq!(classify("/menuboard"), Zone::Public);
        assert_eq!(classify("/loginx"), Zone::Public);
    }

    #[test]
    fn test_anonymous_is_sent_to_sign_in_from_protected_paths() {
        for path in ["/designs", "/menus/create", "/account", "/api/menus"] {
            assert_eq!(
                evaluate(classify(path), &Subject::Anonymous),
                GateDecision::Redirect("/login"),
                "path {}",
                path
            );
        }
    }

    #[test]
    fn test_authenticated_is_sent_away_from_auth_pages() {
        let subject = Subject::Authenticated(Uuid::new_v4());
        assert_eq!(evaluate(Zone::AuthPage, &subject), GateDecision::Redirect("/designs"));
        assert_eq!(evaluate(Zone::AuthPage, &Subject::Anonymous), GateDecision::Allow);
        assert_eq!(evaluate(Zone::Protected, &subject), GateDecision::Allow);
    }

    #[test]
    fn test_ownership_zone_is_deferred_to_the_record() {
        assert_eq!(evaluate(Zone::Ownership, &Subject::Anonymous), GateDecision::Allow);
    }

    #[test]
    fn test_require_viewable() {
        let owner = Uuid::new_v4();
        let stranger = Subject::Authenticated(Uuid::new_v4());
        let mut draft = MenuDraft::new(Uuid::new_v4(), owner);

        assert!(require_viewable(Some(draft.clone()), &Subject::Authenticated(owner)).is_ok());
        assert!(matches!(
            require_viewable(Some(draft.clone()), &stranger),
            Err(DomainError::AccessDenied)
        ));
        assert!(matches!(
            require_viewable(None, &Subject::Authenticated(owner)),
            Err(DomainError::AccessDenied)
        ));

        draft.visibility = Visibility::Public;
        assert!(require_viewable(Some(draft), &Subject::Anonymous).is_ok());
    }

    #[test]
    fn test_require_owner() {
        let owner = Uuid::new_v4();
        let draft = MenuDraft::new(Uuid::new_v4(), owner);
        assert!(require_owner(&draft, &owner).is_ok());
        assert!(require_owner(&draft, &Uuid::new_v4()).is_err());
    }
}
