use std::collections::BTreeSet;
use std::sync::{Mutex, OnceLock, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RetrievalError;
use crate::provider::OntologyProvider;

/// Ontology ids of the feature types that may be labelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EligibilitySet {
    terms: BTreeSet<String>,
}

impl EligibilitySet {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// A root term together with every descendant the ontology reports.
    pub fn from_ontology(
        root: &str,
        ontology: &dyn OntologyProvider,
    ) -> Result<Self, RetrievalError> {
        let mut set = Self::new([root]);
        set.terms.extend(ontology.descendants(root)?);
        info!(root, terms = set.len(), "expanded eligible mutation types");
        Ok(set)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

static PROCESS_ELIGIBILITY: OnceLock<EligibilitySet> = OnceLock::new();
static PROCESS_ELIGIBILITY_INIT: Mutex<()> = Mutex::new(());

/// Process-wide eligibility set, built by `init` on first use.
///
/// `init` runs at most once per successful initialisation; concurrent callers
/// wait for it and share its result. A failed `init` leaves the cache empty.
pub fn cached_or_init<E>(
    init: impl FnOnce() -> Result<EligibilitySet, E>,
) -> Result<&'static EligibilitySet, E> {
    init_once(&PROCESS_ELIGIBILITY, &PROCESS_ELIGIBILITY_INIT, init)
}

fn init_once<T, E>(
    cell: &'static OnceLock<T>,
    lock: &Mutex<()>,
    init: impl FnOnce() -> Result<T, E>,
) -> Result<&'static T, E> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    // A panicking init leaves nothing behind to protect.
    let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}
