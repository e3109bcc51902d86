//! Section reconciliation: diffing selections and pruning saved progress
//!
//! Pure functions over the selection and progress data model. Callers decide
//! what to persist; nothing here touches storage.

use crate::catalog::Catalog;
use crate::progress::ProgressRecord;
use crate::selection::{SectionId, SectionSelection};

/// Result of pruning a progress record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneOutcome {
    /// The progress record with the pruned items removed
    pub record: ProgressRecord,
    /// Titles of the removed items, sections in the order they were given,
    /// items in catalog order within each section
    pub removed_titles: Vec<String>,
}

/// Sections enabled in `old` but no longer enabled in `new`, in catalog
/// order. Sections untouched by the change never appear, whatever their
/// state.
pub fn compute_diff(old: &SectionSelection, new: &SectionSelection) -> Vec<SectionId> {
    old.enabled()
        .into_iter()
        .filter(|id| !new.is_enabled(*id))
        .collect()
}

/// Whether applying `new` over `old` needs explicit confirmation first.
///
/// Count-based: true whenever progress holds at least one completed item and
/// the number of enabled sections strictly shrinks, even if the sections
/// being removed hold no completed items. The administrator is asked before
/// anything that could delete saved progress, not only when it certainly
/// will.
pub fn requires_confirmation(
    old: &SectionSelection,
    new: &SectionSelection,
    progress: &ProgressRecord,
) -> bool {
    !progress.is_empty() && new.enabled_count() < old.enabled_count()
}

/// Remove the completed items of every listed section from `progress`.
///
/// A section without a catalog entry is skipped; items the catalog lists but
/// progress never recorded are skipped too, so pruning an already-pruned
/// record removes nothing. `completed_count` of the returned record is
/// recomputed from the surviving items.
pub fn prune(
    catalog: &Catalog,
    sections_to_disable: &[SectionId],
    progress: &ProgressRecord,
) -> PruneOutcome {
    let mut record = progress.clone();
    let mut removed_titles = Vec::new();

    for section_id in sections_to_disable {
        if let Some(section) = catalog.section(*section_id) {
            for item in &section.items {
                if record.clear(&item.id) {
                    removed_titles.push(item.title.clone());
                }
            }
        }
    }

    PruneOutcome {
        record,
        removed_titles,
    }
}
