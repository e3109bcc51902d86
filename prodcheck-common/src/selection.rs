//! Section identifiers and the per-site section selection
//!
//! A selection maps each known section to a 0/1 flag, mirroring the checkbox
//! map the administration form submits. Absent sections count as disabled;
//! any non-zero flag counts as enabled.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The closed set of checklist sections.
///
/// Variant order is the catalog display order, and because selections key a
/// `BTreeMap` by this enum, every iteration over a selection follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    /// System wide status and reports
    SystemStatus,
    /// Contributed projects review
    ContribReview,
    /// Vendors and custom code
    CustomCodebase,
    /// Spam prevention
    SpamPrevention,
    /// Security and access
    SecurityAccess,
    /// Content model review and proofreading
    Content,
    /// Frontend
    Frontend,
    /// Database and configuration
    Database,
    /// Performance and caching
    Performance,
    /// Testing
    #[serde(rename = "test")]
    Testing,
    /// Analytics
    Analytics,
    /// Sysadmin and backups
    Sysadmin,
    /// Basic SEO
    Seo,
    /// Legal aspects
    Legal,
    /// Project documentation
    Documentation,
}

impl SectionId {
    /// Parse a section id from its stored string form
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|id| id.as_str() == s)
    }

    /// Canonical stored string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::SystemStatus => "system_status",
            SectionId::ContribReview => "contrib_review",
            SectionId::CustomCodebase => "custom_codebase",
            SectionId::SpamPrevention => "spam_prevention",
            SectionId::SecurityAccess => "security_access",
            SectionId::Content => "content",
            SectionId::Frontend => "frontend",
            SectionId::Database => "database",
            SectionId::Performance => "performance",
            SectionId::Testing => "test",
            SectionId::Analytics => "analytics",
            SectionId::Sysadmin => "sysadmin",
            SectionId::Seo => "seo",
            SectionId::Legal => "legal",
            SectionId::Documentation => "documentation",
        }
    }

    /// Human-readable section title, used in checklist rendering and in the
    /// confirmation prompt
    pub fn title(&self) -> &'static str {
        match self {
            SectionId::SystemStatus => "System wide status and reports",
            SectionId::ContribReview => "Contributed projects review",
            SectionId::CustomCodebase => "Vendors and custom code",
            SectionId::SpamPrevention => "Spam prevention",
            SectionId::SecurityAccess => "Security and access",
            SectionId::Content => "Content model review and proofreading",
            SectionId::Frontend => "Frontend",
            SectionId::Database => "Database and configuration",
            SectionId::Performance => "Performance and caching",
            SectionId::Testing => "Testing",
            SectionId::Analytics => "Analytics",
            SectionId::Sysadmin => "Sysadmin and backups",
            SectionId::Seo => "Basic SEO",
            SectionId::Legal => "Legal aspects",
            SectionId::Documentation => "Project documentation",
        }
    }

    /// All sections in catalog order
    pub fn all() -> &'static [SectionId] {
        &[
            SectionId::SystemStatus,
            SectionId::ContribReview,
            SectionId::CustomCodebase,
            SectionId::SpamPrevention,
            SectionId::SecurityAccess,
            SectionId::Content,
            SectionId::Frontend,
            SectionId::Database,
            SectionId::Performance,
            SectionId::Testing,
            SectionId::Analytics,
            SectionId::Sysadmin,
            SectionId::Seo,
            SectionId::Legal,
            SectionId::Documentation,
        ]
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which sections are part of the site's checklist.
///
/// Stored as a `{section_id: 0|1}` map. A section missing from the map is
/// disabled; any non-zero flag is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionSelection {
    flags: BTreeMap<SectionId, u8>,
}

impl SectionSelection {
    /// Empty selection (every section disabled)
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection with every known section enabled, the first-run default
    pub fn all_enabled() -> Self {
        let mut selection = Self::default();
        for id in SectionId::all() {
            selection.enable(*id);
        }
        selection
    }

    pub fn enable(&mut self, id: SectionId) {
        self.flags.insert(id, 1);
    }

    /// Disabled sections keep an explicit 0 entry, matching the submitted
    /// checkbox map
    pub fn disable(&mut self, id: SectionId) {
        self.flags.insert(id, 0);
    }

    pub fn set_enabled(&mut self, id: SectionId, enabled: bool) {
        if enabled {
            self.enable(id);
        } else {
            self.disable(id);
        }
    }

    /// Non-zero flag means enabled; absent means disabled
    pub fn is_enabled(&self, id: SectionId) -> bool {
        self.flags.get(&id).is_some_and(|flag| *flag != 0)
    }

    /// Enabled sections in catalog order
    pub fn enabled(&self) -> Vec<SectionId> {
        self.flags
            .iter()
            .filter(|(_, flag)| **flag != 0)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Sections not enabled, over the full known set, in catalog order
    pub fn disabled(&self) -> Vec<SectionId> {
        SectionId::all()
            .iter()
            .copied()
            .filter(|id| !self.is_enabled(*id))
            .collect()
    }

    pub fn enabled_count(&self) -> usize {
        self.flags.values().filter(|flag| **flag != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_round_trip() {
        for id in SectionId::all() {
            let parsed = SectionId::parse(id.as_str()).unwrap();
            assert_eq!(*id, parsed, "Round-trip failed for {:?}", id);
        }
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(SectionId::parse("unknown"), None);
        assert_eq!(SectionId::parse(""), None);
        // Stored form is exact, not case-folded
        assert_eq!(SectionId::parse("SEO"), None);
    }

    #[test]
    fn test_all_sections_known() {
        assert_eq!(SectionId::all().len(), 15);
    }

    #[test]
    fn test_serde_uses_stored_string() {
        let json = serde_json::to_string(&SectionId::Testing).unwrap();
        assert_eq!(json, "\"test\"");
        let parsed: SectionId = serde_json::from_str("\"security_access\"").unwrap();
        assert_eq!(parsed, SectionId::SecurityAccess);
    }

    #[test]
    fn test_absent_section_is_disabled() {
        let selection = SectionSelection::new();
        assert!(!selection.is_enabled(SectionId::Seo));
        assert_eq!(selection.enabled_count(), 0);
    }

    #[test]
    fn test_explicit_zero_is_disabled() {
        let mut selection = SectionSelection::new();
        selection.enable(SectionId::Seo);
        selection.disable(SectionId::Seo);
        assert!(!selection.is_enabled(SectionId::Seo));
        assert!(selection.enabled().is_empty());
    }

    #[test]
    fn test_all_enabled_default() {
        let selection = SectionSelection::all_enabled();
        assert_eq!(selection.enabled_count(), SectionId::all().len());
        assert!(selection.disabled().is_empty());
    }

    #[test]
    fn test_enabled_follows_catalog_order() {
        let mut selection = SectionSelection::new();
        selection.enable(SectionId::Legal);
        selection.enable(SectionId::SystemStatus);
        selection.enable(SectionId::Seo);
        assert_eq!(
            selection.enabled(),
            vec![SectionId::SystemStatus, SectionId::Seo, SectionId::Legal]
        );
    }

    #[test]
    fn test_selection_serde_round_trip() {
        let mut selection = SectionSelection::new();
        selection.enable(SectionId::Seo);
        selection.disable(SectionId::Legal);

        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"seo":1,"legal":0}"#);

        let parsed: SectionSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, selection);
    }
}
