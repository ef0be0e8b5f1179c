use std::sync::Mutex;

use serde::Serialize;
use tracing::{info, warn};

use crate::classify::Classification;
use crate::error::LabelError;
use crate::validate::ValidatedRange;

/// Range categories curators are told about even when labelling succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Deletion,
    DeletionInsertion,
    Increase,
    ManualCuration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationNotice {
    pub feature_id: String,
    pub range_id: String,
    pub kind: NoticeKind,
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub resulting: String,
}

impl MutationNotice {
    /// Notices raised by one classified range, possibly none.
    pub fn for_range(
        feature_id: &str,
        range: &ValidatedRange,
        classification: &Classification,
    ) -> Vec<MutationNotice> {
        let mut kinds = Vec::new();
        match classification {
            Classification::Deletion => kinds.push(NoticeKind::Deletion),
            Classification::DeletionInsertion => kinds.push(NoticeKind::DeletionInsertion),
            Classification::Insertion { .. } | Classification::PolyRepeat { .. } => {
                kinds.push(NoticeKind::Increase)
            }
            Classification::Substitution => {}
        }
        if classification.needs_manual_curation() {
            kinds.push(NoticeKind::ManualCuration);
        }

        kinds
            .into_iter()
            .map(|kind| MutationNotice {
                feature_id: feature_id.to_string(),
                range_id: range.range_id.clone(),
                kind,
                start: range.start,
                end: range.end,
                original: range.original.clone(),
                resulting: range.resulting.clone(),
            })
            .collect()
    }
}

/// Everything the generator reports about a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LabelEvent {
    Notice(MutationNotice),
    Generated {
        feature_id: String,
        interactor_id: String,
        previous: Option<String>,
        label: String,
        /// False when the label equals the one already stored on the feature
        modified: bool,
    },
    Failed {
        feature_id: String,
        error: LabelError,
    },
}

impl LabelEvent {
    pub fn feature_id(&self) -> &str {
        match self {
            LabelEvent::Notice(notice) => &notice.feature_id,
            LabelEvent::Generated { feature_id, .. } | LabelEvent::Failed { feature_id, .. } => {
                feature_id
            }
        }
    }
}

/// Receives events from the generator. Delivery is fire-and-forget.
pub trait EventSink {
    fn emit(&self, event: LabelEvent);
}

/// Discards every event.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: LabelEvent) {}
}

/// Keeps events in memory, for tests and batch reports.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<LabelEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LabelEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn take(&self) -> Vec<LabelEvent> {
        std::mem::take(
            &mut *self
                .events
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: LabelEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

/// Writes events to the `tracing` subscriber.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: LabelEvent) {
        match event {
            LabelEvent::Notice(notice) if notice.kind == NoticeKind::ManualCuration => warn!(
                feature = %notice.feature_id,
                range = %notice.range_id,
                original = %notice.original,
                resulting = %notice.resulting,
                "range needs manual curation"
            ),
            LabelEvent::Notice(notice) => info!(
                feature = %notice.feature_id,
                range = %notice.range_id,
                kind = ?notice.kind,
                start = notice.start,
                end = notice.end,
                original = %notice.original,
                resulting = %notice.resulting,
                "mutation notice"
            ),
            LabelEvent::Generated {
                feature_id,
                label,
                modified,
                ..
            } => info!(feature = %feature_id, %label, modified, "short label generated"),
            LabelEvent::Failed { feature_id, error } => {
                warn!(feature = %feature_id, %error, "short label not generated")
            }
        }
    }
}
