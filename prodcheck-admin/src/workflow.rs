//! The section-change workflow
//!
//! Changing which sections are part of the checklist walks a small state
//! machine, one administrator request per transition:
//!
//! - Idle → Applying → Idle: [`SectionsWorkflow::submit`] finds no
//!   completed items at risk and persists the new selection immediately.
//! - Idle → PendingConfirmation: `submit` finds the enabled-section count
//!   shrinking while completed items exist; it returns a [`PendingChange`]
//!   and mutates nothing.
//! - PendingConfirmation → Applying → Idle: [`SectionsWorkflow::confirm`]
//!   receives the pending section list back, disables those sections on the
//!   persisted selection, prunes the progress record and reports what was
//!   removed.
//! - PendingConfirmation → Idle: the administrator cancels by dropping the
//!   pending change; nothing was mutated.
//!
//! The pending change carries only the ordered section-id list, so the
//! confirmation step rebuilds the final selection from the persisted one.
//! Confirming with an empty list is a caller bug and fails fast.

use crate::store::ChecklistStore;
use prodcheck_common::catalog::Catalog;
use prodcheck_common::progress::ProgressRecord;
use prodcheck_common::reconcile::{compute_diff, prune, requires_confirmation};
use prodcheck_common::selection::{SectionId, SectionSelection};
use prodcheck_common::{Error, Result, CHECKLIST_ID};
use tracing::{debug, info};

/// A selection change held back for explicit confirmation.
///
/// Pass [`PendingChange::sections`] unmodified to
/// [`SectionsWorkflow::confirm`]; dropping the value abandons the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    /// Sections that will be disabled, in catalog order
    pub sections: Vec<SectionId>,
}

/// A selection change that has been persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedChange {
    /// The selection now in effect
    pub selection: SectionSelection,
    /// Titles of the progress items removed by the change, in catalog order
    pub removed_titles: Vec<String>,
}

/// Outcome of submitting a new section selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The change was persisted immediately
    Applied(AppliedChange),
    /// The change would discard saved progress; confirm or abandon it
    ConfirmationRequired(PendingChange),
}

/// Drives section-selection changes against the persisted state
pub struct SectionsWorkflow<'a, S> {
    catalog: &'a Catalog,
    store: &'a S,
}

impl<'a, S: ChecklistStore> SectionsWorkflow<'a, S> {
    pub fn new(catalog: &'a Catalog, store: &'a S) -> Self {
        Self { catalog, store }
    }

    /// Submit a new section selection.
    ///
    /// Compares the proposal with the persisted selection. When fewer
    /// sections stay enabled and the checklist has completed items, nothing
    /// is written and the pending change is returned for confirmation.
    /// Otherwise the proposal is persisted and the items of its disabled
    /// sections are cleared from the progress record.
    pub async fn submit(&self, proposed: &SectionSelection) -> Result<SubmitOutcome> {
        let current = self.store.load_selection().await?;
        let progress = self.store.load_progress(CHECKLIST_ID).await?;

        if let Some(record) = &progress {
            if requires_confirmation(&current, proposed, record) {
                let sections = compute_diff(&current, proposed);
                debug!(
                    "Selection change held for confirmation: {}",
                    join_ids(&sections)
                );
                return Ok(SubmitOutcome::ConfirmationRequired(PendingChange {
                    sections,
                }));
            }
        }

        self.store.save_selection(proposed).await?;
        let removed_titles = self.prune_disabled(&proposed.disabled(), progress).await?;

        Ok(SubmitOutcome::Applied(AppliedChange {
            selection: proposed.clone(),
            removed_titles,
        }))
    }

    /// Apply a confirmed change: disable the pending sections on the
    /// persisted selection and clear their saved items.
    ///
    /// `sections` must be the list a prior [`submit`](Self::submit) returned;
    /// an empty list is a precondition violation, not a no-op.
    pub async fn confirm(&self, sections: &[SectionId]) -> Result<AppliedChange> {
        if sections.is_empty() {
            return Err(Error::InvalidInput(
                "no sections were given to clear".to_string(),
            ));
        }

        let mut selection = self.store.load_selection().await?;
        for id in sections {
            selection.disable(*id);
        }
        self.store.save_selection(&selection).await?;

        // Clear over the full disabled set of the updated selection, which
        // also sweeps stale items left under sections disabled earlier.
        let progress = self.store.load_progress(CHECKLIST_ID).await?;
        let removed_titles = self.prune_disabled(&selection.disabled(), progress).await?;

        Ok(AppliedChange {
            selection,
            removed_titles,
        })
    }

    /// The question the confirmation step asks for a pending change
    pub fn confirmation_question(&self, pending: &PendingChange) -> String {
        let titles = self.catalog.section_titles(&pending.sections);
        format!(
            "Do you want to clear the items from the following sections: {}?",
            titles.join(", ")
        )
    }

    /// Prune the given sections from the progress record and persist the
    /// result when anything was removed. A checklist without a progress
    /// record has nothing to prune and none is created.
    async fn prune_disabled(
        &self,
        sections: &[SectionId],
        progress: Option<ProgressRecord>,
    ) -> Result<Vec<String>> {
        let record = match progress {
            Some(record) => record,
            None => return Ok(Vec::new()),
        };

        let outcome = prune(self.catalog, sections, &record);
        if !outcome.removed_titles.is_empty() {
            self.store.save_progress(CHECKLIST_ID, &outcome.record).await?;
            info!(
                "Cleared section items: {}",
                outcome.removed_titles.join(", ")
            );
        }

        Ok(outcome.removed_titles)
    }
}

fn join_ids(sections: &[SectionId]) -> String {
    sections
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
