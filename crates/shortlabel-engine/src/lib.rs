pub mod classify;
pub mod config;
pub mod eligibility;
pub mod encode;
pub mod error;
pub mod event;
pub mod generator;
pub mod order;
pub mod provider;
pub mod validate;

pub use classify::{classify, Classification};
pub use config::{ConfigError, GeneratorConfig};
pub use eligibility::EligibilitySet;
pub use encode::{encode, Label, LabelFragment};
pub use error::*;
pub use event::{CollectingSink, EventSink, LabelEvent, MutationNotice, NoopSink, NoticeKind, TracingSink};
pub use generator::{LabelOutcome, ShortLabelGenerator};
pub use order::order_ranges;
pub use provider::{
    FeatureProvider, InMemoryProvider, InteractorProvider, OntologyProvider, Retrying, RetryPolicy,
};
pub use validate::{validate, ValidatedRange};
