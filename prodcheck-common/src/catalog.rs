//! The checklist catalog: ordered sections of review items
//!
//! Pure data. The built-in catalog is a load-time constant; hosts and tests
//! may also assemble reduced catalogs. Section and item order here is the
//! order every user-visible listing follows, including the removed-item
//! report produced by pruning.

use crate::selection::SectionId;
use once_cell::sync::Lazy;

/// Reference link attached to a checklist item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLink {
    pub text: String,
    pub url: String,
}

/// A single manual review task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Identifier keying the saved-progress record
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: Option<ItemLink>,
}

impl Item {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            link: None,
        }
    }

    pub fn with_link(mut self, text: &str, url: &str) -> Self {
        self.link = Some(ItemLink {
            text: text.to_string(),
            url: url.to_string(),
        });
        self
    }
}

/// A section and its ordered items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: SectionId,
    pub items: Vec<Item>,
}

impl Section {
    pub fn new(id: SectionId, items: Vec<Item>) -> Self {
        Self { id, items }
    }

    pub fn title(&self) -> &'static str {
        self.id.title()
    }
}

/// Ordered collection of checklist sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// The full production checklist
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Sections in display order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up a section; a selection may reference sections this catalog
    /// does not carry, so absence is not an error
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Display titles for a list of section ids, in the order given,
    /// skipping ids without a catalog entry
    pub fn section_titles(&self, ids: &[SectionId]) -> Vec<&'static str> {
        ids.iter()
            .filter(|id| self.section(**id).is_some())
            .map(|id| id.title())
            .collect()
    }

    /// Id and title of every section this catalog carries, in display
    /// order, for building the section-selection form
    pub fn available_sections(&self) -> Vec<(SectionId, &'static str)> {
        self.sections
            .iter()
            .map(|section| (section.id, section.title()))
            .collect()
    }

    /// Title of a cataloged item, if present
    pub fn item_title(&self, item_id: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|section| section.items.iter())
            .find(|item| item.id == item_id)
            .map(|item| item.title.as_str())
    }
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::new(vec![
        Section::new(
            SectionId::SystemStatus,
            vec![
                Item::new(
                    "status_report",
                    "Status report",
                    "Review the site status report and resolve every error and warning.",
                ),
                Item::new(
                    "available_updates",
                    "Core and projects update",
                    "Check available updates.",
                ),
                Item::new(
                    "error_display",
                    "Error display",
                    "Errors are written to the log only; on-screen error display is switched off.",
                ),
                Item::new(
                    "cron_runs",
                    "Cron runs",
                    "Periodic tasks are scheduled and have run recently.",
                ),
            ],
        ),
        Section::new(
            SectionId::ContribReview,
            vec![
                Item::new(
                    "unused_projects",
                    "Unused projects",
                    "Uninstall contributed modules and themes that production does not need.",
                ),
                Item::new(
                    "development_modules",
                    "Development modules",
                    "Development helpers (devel, coder) are not installed on production.",
                ),
                Item::new(
                    "patched_projects",
                    "Patched projects",
                    "Locally patched projects are documented so updates do not silently drop the patches.",
                ),
            ],
        ),
        Section::new(
            SectionId::CustomCodebase,
            vec![
                Item::new(
                    "vendor_updates",
                    "Vendor libraries",
                    "Third-party libraries are current and free of known advisories.",
                ),
                Item::new(
                    "custom_code_review",
                    "Custom code review",
                    "Custom code passes coding-standards and static-analysis checks.",
                ),
                Item::new(
                    "leftover_code",
                    "Leftover code",
                    "Commented-out blocks, debug statements and unused files are removed.",
                ),
            ],
        ),
        Section::new(
            SectionId::SpamPrevention,
            vec![
                Item::new(
                    "antispam_protection",
                    "Anti-spam protection",
                    "An anti-spam measure (honeypot, captcha, recaptcha) covers the exposed forms.",
                ),
                Item::new(
                    "exposed_forms",
                    "Exposed forms",
                    "Every publicly reachable form has been reviewed for abuse potential.",
                ),
                Item::new(
                    "email_obfuscation",
                    "Email obfuscation",
                    "Are the email addresses protected against bots harvesting? Email addresses can be present in fields, WYSIWYG or templates.",
                ),
            ],
        ),
        Section::new(
            SectionId::SecurityAccess,
            vec![
                Item::new(
                    "security_updates",
                    "Security updates",
                    "All published security releases are applied.",
                ),
                Item::new(
                    "admin_accounts",
                    "Administrative accounts",
                    "Administrative accounts are nominative, use strong passwords and the least privilege required.",
                ),
                Item::new(
                    "permissions_review",
                    "Permissions review",
                    "Role permissions are audited; anonymous and authenticated roles carry no administrative grants.",
                ),
                Item::new(
                    "https_everywhere",
                    "HTTPS everywhere",
                    "TLS is enforced on every page, including authentication and administrative paths.",
                ),
                Item::new(
                    "file_permissions",
                    "File system permissions",
                    "Settings files are read-only and upload directories cannot execute code.",
                ),
            ],
        ),
        Section::new(
            SectionId::Content,
            vec![
                Item::new(
                    "content_model",
                    "Content model review",
                    "Content types and fields match the editorial needs; unused ones are removed.",
                ),
                Item::new(
                    "proofreading",
                    "Proofreading",
                    "An editorial pass covered every published page.",
                ),
                Item::new(
                    "placeholder_content",
                    "Placeholder content",
                    "Test nodes and lorem ipsum filler are gone.",
                ),
                Item::new(
                    "broken_links",
                    "Broken links",
                    "Internal and outbound links are checked.",
                ),
            ],
        ),
        Section::new(
            SectionId::Frontend,
            vec![
                Item::new(
                    "responsive_display",
                    "Responsive display",
                    "Breakpoints are verified on real devices, not only in the browser emulator.",
                ),
                Item::new(
                    "browser_matrix",
                    "Browser testing",
                    "The supported-browser matrix passes, including the oldest supported versions.",
                ),
                Item::new(
                    "accessibility",
                    "Accessibility",
                    "Pages pass WCAG AA checks for contrast, keyboard navigation and alt texts.",
                )
                .with_link("WCAG quick reference", "https://www.w3.org/WAI/WCAG21/quickref/"),
                Item::new(
                    "favicon",
                    "Favicon and touch icons",
                    "Favicon and home-screen icons are in place.",
                ),
            ],
        ),
        Section::new(
            SectionId::Database,
            vec![
                Item::new(
                    "config_export",
                    "Configuration export",
                    "Site configuration is exported, versioned and synchronized with production.",
                ),
                Item::new(
                    "database_cleanup",
                    "Database cleanup",
                    "Log and cache tables are truncated before the launch dump.",
                ),
                Item::new(
                    "environment_settings",
                    "Environment settings",
                    "Production overrides are active; no development settings leak into production.",
                ),
            ],
        ),
        Section::new(
            SectionId::Performance,
            vec![
                Item::new(
                    "page_cache",
                    "Page cache",
                    "Page caching is enabled with a sensible max-age.",
                ),
                Item::new(
                    "asset_aggregation",
                    "CSS and JS aggregation",
                    "Stylesheets and scripts are aggregated and minified.",
                ),
                Item::new(
                    "image_optimization",
                    "Image optimization",
                    "Derived image styles are used instead of full-size originals.",
                ),
                Item::new(
                    "reverse_proxy",
                    "Reverse proxy and CDN",
                    "Reverse proxy or CDN settings match the hosting setup.",
                ),
            ],
        ),
        Section::new(
            SectionId::Testing,
            vec![
                Item::new(
                    "smoke_tests",
                    "Smoke tests",
                    "The critical paths pass on the production infrastructure.",
                ),
                Item::new(
                    "forms_testing",
                    "Forms testing",
                    "Form submissions arrive and their notifications are delivered.",
                ),
                Item::new(
                    "user_journeys",
                    "User journeys",
                    "Registration, login and password reset work end to end.",
                ),
            ],
        ),
        Section::new(
            SectionId::Analytics,
            vec![
                Item::new(
                    "analytics_tracker",
                    "Analytics tracker",
                    "The tracking snippet is present on every page and excluded for administrators.",
                ),
                Item::new(
                    "goals_events",
                    "Goals and events",
                    "Conversion goals and events are configured and firing.",
                ),
                Item::new(
                    "search_console",
                    "Search console",
                    "The site is verified with the relevant search consoles.",
                ),
            ],
        ),
        Section::new(
            SectionId::Sysadmin,
            vec![
                Item::new(
                    "backup_schedule",
                    "Backup schedule",
                    "Database and file backups run automatically and are retained off-site.",
                ),
                Item::new(
                    "restore_test",
                    "Restore test",
                    "A restore from backup has actually been performed, not only configured.",
                ),
                Item::new(
                    "uptime_monitoring",
                    "Uptime monitoring",
                    "Uptime and disk-space monitoring alert a human.",
                ),
                Item::new(
                    "log_rotation",
                    "Log rotation",
                    "Server and application logs rotate and do not fill the disk.",
                ),
            ],
        ),
        Section::new(
            SectionId::Seo,
            vec![
                Item::new(
                    "sitemap",
                    "Sitemap",
                    "An XML sitemap is generated and submitted to the search engines.",
                )
                .with_link("Sitemaps protocol", "https://www.sitemaps.org/protocol.html"),
                Item::new(
                    "robots",
                    "Robots.txt",
                    "Crawlers are allowed; the staging disallow rules are removed.",
                ),
                Item::new(
                    "meta_tags",
                    "Meta tags",
                    "Page titles and meta descriptions are set on the key pages.",
                ),
                Item::new(
                    "redirects",
                    "Redirects",
                    "Legacy URLs redirect permanently to their new locations.",
                ),
                Item::new(
                    "not_found_page",
                    "404 page",
                    "The not-found page helps visitors back into the site.",
                ),
            ],
        ),
        Section::new(
            SectionId::Legal,
            vec![
                Item::new(
                    "privacy_policy",
                    "Privacy policy",
                    "The privacy policy is published and reachable from every page.",
                ),
                Item::new(
                    "cookie_consent",
                    "Cookie consent",
                    "Consent is collected before non-essential cookies are set.",
                ),
                Item::new(
                    "terms_conditions",
                    "Terms and conditions",
                    "Terms of service are published where the site requires them.",
                ),
                Item::new(
                    "legal_mentions",
                    "Legal mentions",
                    "Site ownership and publication mentions meet the local requirements.",
                ),
            ],
        ),
        Section::new(
            SectionId::Documentation,
            vec![
                Item::new(
                    "editor_guide",
                    "Editor guide",
                    "Content editors have a guide covering the day-to-day tasks.",
                ),
                Item::new(
                    "operations_runbook",
                    "Operations runbook",
                    "Deployment, rollback and incident steps are written down.",
                ),
                Item::new(
                    "credentials_handover",
                    "Credentials handover",
                    "Hosting, DNS and third-party credentials are handed over to the owner.",
                ),
            ],
        ),
    ])
});
