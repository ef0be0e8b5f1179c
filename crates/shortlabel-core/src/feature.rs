use serde::{Deserialize, Serialize};

/// How precisely a range bound is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionStatus {
    #[default]
    Certain,
    /// `?`: position unknown
    Undetermined,
    /// `n`: somewhere at the N-terminus
    NTerminal,
    /// `c`: somewhere at the C-terminus
    CTerminal,
    LessThan,
    GreaterThan,
    /// `x..y`: somewhere within an interval
    Fuzzy,
}

/// A 1-based range bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub value: usize,
    #[serde(default)]
    pub status: PositionStatus,
}

impl Position {
    pub fn certain(value: usize) -> Self {
        Self {
            value,
            status: PositionStatus::Certain,
        }
    }

    pub fn with_status(value: usize, status: PositionStatus) -> Self {
        Self { value, status }
    }

    pub fn is_determinate(&self) -> bool {
        self.status == PositionStatus::Certain
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            PositionStatus::Certain => write!(f, "{}", self.value),
            PositionStatus::Undetermined => write!(f, "?"),
            PositionStatus::NTerminal => write!(f, "n"),
            PositionStatus::CTerminal => write!(f, "c"),
            PositionStatus::LessThan => write!(f, "<{}", self.value),
            PositionStatus::GreaterThan => write!(f, ">{}", self.value),
            PositionStatus::Fuzzy => write!(f, "~{}", self.value),
        }
    }
}

/// One contiguous span of residues touched by a feature, with the declared
/// residues before and after the mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRange {
    pub id: String,
    pub start: Position,
    pub end: Position,
    #[serde(default)]
    pub original_sequence: Option<String>,
    #[serde(default)]
    pub resulting_sequence: Option<String>,
}

impl FeatureRange {
    pub fn new(
        id: impl Into<String>,
        start: usize,
        end: usize,
        original: impl Into<String>,
        resulting: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start: Position::certain(start),
            end: Position::certain(end),
            original_sequence: Some(original.into()),
            resulting_sequence: Some(resulting.into()),
        }
    }
}

impl std::fmt::Display for FeatureRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A curated mutation annotated on an interactor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub interactor_id: String,
    /// Ontology identifier of the declared feature type, e.g. `MI:0118`.
    pub mutation_type: String,
    /// Label currently stored for the feature, if any.
    #[serde(default)]
    pub short_label: Option<String>,
    #[serde(default)]
    pub ranges: Vec<FeatureRange>,
}

impl Feature {
    pub fn new(
        id: impl Into<String>,
        interactor_id: impl Into<String>,
        mutation_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            interactor_id: interactor_id.into(),
            mutation_type: mutation_type.into(),
            short_label: None,
            ranges: Vec::new(),
        }
    }

    pub fn with_range(mut self, range: FeatureRange) -> Self {
        self.ranges.push(range);
        self
    }

    pub fn add_range(&mut self, range: FeatureRange) {
        self.ranges.push(range);
    }
}
