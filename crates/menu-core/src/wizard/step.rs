// ============================================================================
// Menu Core - Wizard Step
// File: crates/menu-core/src/wizard/step.rs
// ============================================================================

use serde::Serialize;

/// Linear wizard states. Going back never re-validates earlier steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Branding = 1,
    Content = 2,
    Review = 3,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(WizardStep::Branding),
            2 => Some(WizardStep::Content),
            3 => Some(WizardStep::Review),
            _ => None,
        }
    }

    /// Reads the `step` query value; anything missing or unknown lands on Branding.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<u8>().ok())
            .and_then(Self::from_number)
            .unwrap_or_default()
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Branding => "branding",
            WizardStep::Content => "content",
            WizardStep::Review => "review",
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::Branding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step() {
        assert_eq!(WizardStep::parse(Some("2")), WizardStep::Content);
        assert_eq!(WizardStep::parse(Some(" 3 ")), WizardStep::Review);
        assert_eq!(WizardStep::parse(Some("9")), WizardStep::Branding);
        assert_eq!(WizardStep::parse(Some("two")), WizardStep::Branding);
        assert_eq!(WizardStep::parse(None), WizardStep::Branding);
    }

    #[test]
    fn test_step_navigation() {
        assert_eq!(WizardStep::Branding.next(), Some(WizardStep::Content));
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::Content.previous(), Some(WizardStep::Branding));
        assert_eq!(WizardStep::Branding.previous(), None);
    }
}
