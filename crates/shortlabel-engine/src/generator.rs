use tracing::{debug, info, instrument, warn};

use shortlabel_core::notation::parse_label;
use shortlabel_core::{Feature, Interactor};

use crate::classify::classify;
use crate::config::GeneratorConfig;
use crate::eligibility::EligibilitySet;
use crate::encode::{encode, Label};
use crate::error::{LabelError, RangeError, TypeError};
use crate::event::{EventSink, LabelEvent, MutationNotice};
use crate::order::order_ranges;
use crate::provider::{FeatureProvider, InteractorProvider};
use crate::validate::validate;

/// A generated label and the notices its ranges raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOutcome {
    pub label: Label,
    pub notices: Vec<MutationNotice>,
}

/// Produces short labels for mutation features.
///
/// Holds no per-call state, so one generator can serve many threads.
#[derive(Debug, Clone)]
pub struct ShortLabelGenerator {
    eligibility: EligibilitySet,
}

impl ShortLabelGenerator {
    pub fn new(eligibility: EligibilitySet) -> Self {
        Self { eligibility }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.eligibility_set())
    }

    pub fn eligibility(&self) -> &EligibilitySet {
        &self.eligibility
    }

    /// Build the label without reporting anything.
    ///
    /// Ranges are processed in start order and the first failing range aborts
    /// the whole feature.
    pub fn label(
        &self,
        feature: &Feature,
        interactor: &Interactor,
    ) -> Result<LabelOutcome, LabelError> {
        if !interactor.interactor_type.is_polypeptide() {
            return Err(TypeError::InteractorType {
                interactor_id: interactor.id.clone(),
                found: interactor.interactor_type,
            }
            .into());
        }
        if !self.eligibility.contains(&feature.mutation_type) {
            return Err(TypeError::MutationType {
                feature_id: feature.id.clone(),
                mutation_type: feature.mutation_type.clone(),
            }
            .into());
        }
        if feature.ranges.is_empty() {
            return Err(RangeError::NoRanges {
                feature_id: feature.id.clone(),
            }
            .into());
        }

        let mut fragments = Vec::with_capacity(feature.ranges.len());
        let mut notices = Vec::new();
        for range in order_ranges(&feature.ranges) {
            let validated = validate(range, &interactor.sequence)?;
            let classification = classify(&validated)?;
            debug!(
                range = %validated.range_id,
                start = validated.start,
                end = validated.end,
                kind = classification.name(),
                "classified range"
            );
            fragments.push(encode(&validated, &classification)?);
            notices.extend(MutationNotice::for_range(
                &feature.id,
                &validated,
                &classification,
            ));
        }

        Ok(LabelOutcome {
            label: Label::assemble(fragments),
            notices,
        })
    }

    /// Build the label and report the outcome to `sink`.
    ///
    /// On success the sink receives the range notices followed by one
    /// `Generated` event; on failure it receives a single `Failed` event.
    #[instrument(skip_all, fields(feature = %feature.id, interactor = %interactor.id))]
    pub fn generate(
        &self,
        feature: &Feature,
        interactor: &Interactor,
        sink: &dyn EventSink,
    ) -> Result<Label, LabelError> {
        match self.label(feature, interactor) {
            Ok(outcome) => {
                for notice in outcome.notices {
                    sink.emit(LabelEvent::Notice(notice));
                }
                let modified = label_changed(feature.short_label.as_deref(), &outcome.label);
                info!(label = %outcome.label, modified, "generated short label");
                sink.emit(LabelEvent::Generated {
                    feature_id: feature.id.clone(),
                    interactor_id: interactor.id.clone(),
                    previous: feature.short_label.clone(),
                    label: outcome.label.to_string(),
                    modified,
                });
                Ok(outcome.label)
            }
            Err(error) => Err(self.fail(&feature.id, error, sink)),
        }
    }

    /// Fetch a feature and its interactor, then [`generate`](Self::generate).
    #[instrument(skip(self, features, interactors, sink))]
    pub fn generate_by_id(
        &self,
        feature_id: &str,
        features: &dyn FeatureProvider,
        interactors: &dyn InteractorProvider,
        sink: &dyn EventSink,
    ) -> Result<Label, LabelError> {
        let feature = match features.feature(feature_id) {
            Ok(feature) => feature,
            Err(error) => return Err(self.fail(feature_id, error.into(), sink)),
        };
        let interactor = match interactors.interactor_for(&feature) {
            Ok(interactor) => interactor,
            Err(error) => return Err(self.fail(feature_id, error.into(), sink)),
        };
        self.generate(&feature, &interactor, sink)
    }

    fn fail(&self, feature_id: &str, error: LabelError, sink: &dyn EventSink) -> LabelError {
        warn!(feature = feature_id, %error, "short label generation failed");
        sink.emit(LabelEvent::Failed {
            feature_id: feature_id.to_string(),
            error: error.clone(),
        });
        error
    }
}

/// Compare a stored label with a new one, ignoring notation-only differences
/// such as a `p.` prefix. Unparseable stored labels count as changed.
fn label_changed(previous: Option<&str>, label: &Label) -> bool {
    let Some(previous) = previous else {
        return true;
    };
    if previous == label.as_str() {
        return false;
    }
    match (parse_label(previous), parse_label(label.as_str())) {
        (Ok(old), Ok(new)) => old != new,
        _ => true,
    }
}
