use crate::actor::DistanceAdvisory;

/// Which user-editable offset an edit targets.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EditField {
    DeltaSpeed,
    DeltaDistance,
}

/// A retroactive change to one actor's offset at one checkpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edit {
    pub checkpoint: usize,
    pub actor: usize,
    pub field: EditField,
    pub value: f64,
}

impl Edit {
    pub fn new(checkpoint: usize, actor: usize, field: EditField, value: f64) -> Self {
        Self {
            checkpoint,
            actor,
            field,
            value,
        }
    }

    pub fn delta_speed(checkpoint: usize, actor: usize, value: f64) -> Self {
        Self::new(checkpoint, actor, EditField::DeltaSpeed, value)
    }

    pub fn delta_distance(checkpoint: usize, actor: usize, value: f64) -> Self {
        Self::new(checkpoint, actor, EditField::DeltaDistance, value)
    }
}

/// Result of a successful edit-and-recompute.
#[derive(Clone, Debug, PartialEq)]
pub struct EditOutcome {
    /// Number of checkpoints after the edited one that were discarded.
    pub discarded: usize,
    /// Number of freshly simulated checkpoints appended.
    pub appended: usize,
    /// Set when a distance edit drove the remaining distance below zero.
    pub advisory: Option<DistanceAdvisory>,
}
