//! Per-actor progress record.
//!
//! An [`ActorState`] tracks how far one roster member has travelled since its
//! last action, plus the two user-editable offsets layered on top of that
//! progress. Edits are validated here; the engine and ledger never write the
//! offsets directly.

use crate::error::{ErrorSeverity, SimError};

/// Construction parameters for one roster member.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSpec {
    pub name: String,
    pub base_speed: f64,
}

impl ActorSpec {
    pub fn new(name: impl Into<String>, base_speed: f64) -> Self {
        Self {
            name: name.into(),
            base_speed,
        }
    }
}

impl From<(&str, f64)> for ActorSpec {
    fn from((name, base_speed): (&str, f64)) -> Self {
        Self::new(name, base_speed)
    }
}

/// Errors raised while creating or editing an actor.
///
/// Every variant is an invalid-parameter failure; no state is mutated when one
/// is returned.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ActorError {
    #[error("actor name must not be empty")]
    EmptyName,

    #[error("base speed of '{name}' must be a positive number (got {base_speed})")]
    NonPositiveBaseSpeed { name: String, base_speed: f64 },

    #[error(
        "current speed must stay above zero (base {base_speed} + delta {delta_speed} = {current_speed})"
    )]
    NonPositiveCurrentSpeed {
        base_speed: f64,
        delta_speed: f64,
        current_speed: f64,
    },

    #[error("{field} must be a finite number (got {value})")]
    NonNumericValue { field: &'static str, value: f64 },
}

impl SimError for ActorError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ActorError::*;
        match self {
            EmptyName => "ACTOR_EMPTY_NAME",
            NonPositiveBaseSpeed { .. } => "ACTOR_NON_POSITIVE_BASE_SPEED",
            NonPositiveCurrentSpeed { .. } => "ACTOR_NON_POSITIVE_CURRENT_SPEED",
            NonNumericValue { .. } => "ACTOR_NON_NUMERIC_VALUE",
        }
    }
}

/// Advisory raised when a distance edit pushes the remaining distance below zero.
///
/// The edit is still applied; the actor simply becomes due immediately.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceAdvisory {
    /// Remaining distance before the offset was considered.
    pub original_remaining: f64,
    /// The offset that was applied.
    pub delta_distance: f64,
}

impl DistanceAdvisory {
    /// Remaining distance the edit would have produced without clamping.
    pub fn unclamped_remaining(&self) -> f64 {
        self.original_remaining + self.delta_distance
    }
}

/// Progress record for one roster member.
///
/// # Invariants
///
/// - `current_speed == base_speed + delta_speed` and `current_speed > 0`
/// - `base_speed` never changes after creation
/// - `delta_distance` is consumed (reset to 0) whenever this actor acts
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    name: String,
    base_speed: f64,
    delta_speed: f64,
    current_speed: f64,
    distance_covered_since_last_action: f64,
    delta_distance: f64,
}

impl ActorState {
    /// Creates a fresh actor at the start of its first cycle.
    pub fn create(name: impl Into<String>, base_speed: f64) -> Result<Self, ActorError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ActorError::EmptyName);
        }
        if !base_speed.is_finite() || base_speed <= 0.0 {
            return Err(ActorError::NonPositiveBaseSpeed { name, base_speed });
        }

        Ok(Self {
            name,
            base_speed,
            delta_speed: 0.0,
            current_speed: base_speed,
            distance_covered_since_last_action: 0.0,
            delta_distance: 0.0,
        })
    }

    pub fn from_spec(spec: &ActorSpec) -> Result<Self, ActorError> {
        Self::create(spec.name.clone(), spec.base_speed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_speed(&self) -> f64 {
        self.base_speed
    }

    pub fn delta_speed(&self) -> f64 {
        self.delta_speed
    }

    pub fn current_speed(&self) -> f64 {
        self.current_speed
    }

    pub fn distance_covered_since_last_action(&self) -> f64 {
        self.distance_covered_since_last_action
    }

    pub fn delta_distance(&self) -> f64 {
        self.delta_distance
    }

    /// Distance still to cover before the next action, without the user offset.
    pub fn original_remaining(&self, action_distance: f64) -> f64 {
        (action_distance - self.distance_covered_since_last_action).max(0.0)
    }

    /// Distance still to cover before the next action, offset included.
    pub fn effective_remaining(&self, action_distance: f64) -> f64 {
        (action_distance - self.distance_covered_since_last_action + self.delta_distance).max(0.0)
    }

    /// Time until this actor's next action at its current speed.
    ///
    /// Returns `f64::INFINITY` for a non-positive speed so the actor never wins
    /// the scheduling scan.
    pub fn time_to_next_action(&self, action_distance: f64) -> f64 {
        if self.current_speed <= 0.0 {
            return f64::INFINITY;
        }
        self.effective_remaining(action_distance) / self.current_speed
    }

    /// Replaces the speed offset.
    ///
    /// Rejected without mutation if the resulting current speed would be `<= 0`.
    pub fn apply_delta_speed_edit(&mut self, new_delta_speed: f64) -> Result<(), ActorError> {
        if !new_delta_speed.is_finite() {
            return Err(ActorError::NonNumericValue {
                field: "delta speed",
                value: new_delta_speed,
            });
        }

        let current_speed = self.base_speed + new_delta_speed;
        if current_speed <= 0.0 {
            return Err(ActorError::NonPositiveCurrentSpeed {
                base_speed: self.base_speed,
                delta_speed: new_delta_speed,
                current_speed,
            });
        }

        self.delta_speed = new_delta_speed;
        self.current_speed = current_speed;
        Ok(())
    }

    /// Replaces the remaining-distance offset.
    ///
    /// Any finite value is accepted. An advisory is returned when the actor had
    /// distance left and the offset would drive it below zero.
    pub fn apply_delta_distance_edit(
        &mut self,
        new_delta_distance: f64,
        action_distance: f64,
    ) -> Result<Option<DistanceAdvisory>, ActorError> {
        if !new_delta_distance.is_finite() {
            return Err(ActorError::NonNumericValue {
                field: "delta distance",
                value: new_delta_distance,
            });
        }

        let original_remaining = self.original_remaining(action_distance);
        let advisory = (original_remaining > 0.0 && original_remaining + new_delta_distance < 0.0)
            .then_some(DistanceAdvisory {
                original_remaining,
                delta_distance: new_delta_distance,
            });

        self.delta_distance = new_delta_distance;
        Ok(advisory)
    }

    /// Moves the actor forward by `dt` at its current speed.
    ///
    /// A result within `epsilon` of the threshold is snapped onto it so the next
    /// scan sees exactly zero remaining distance. The covered distance never
    /// goes below zero, even when a negative offset puts the threshold there.
    pub(crate) fn advance(&mut self, dt: f64, action_distance: f64, epsilon: f64) {
        self.distance_covered_since_last_action += self.current_speed * dt;

        let remaining =
            action_distance - self.distance_covered_since_last_action + self.delta_distance;
        if remaining <= epsilon {
            self.distance_covered_since_last_action = (action_distance + self.delta_distance).max(0.0);
        }
    }

    /// Starts a new cycle after this actor acted.
    pub(crate) fn complete_action(&mut self) {
        self.distance_covered_since_last_action = 0.0;
        self.delta_distance = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    const DISTANCE: f64 = SimConfig::ACTION_DISTANCE;

    #[test]
    fn create_initializes_fresh_cycle() {
        let actor = ActorState::create("A", 100.0).unwrap();

        assert_eq!(actor.name(), "A");
        assert_eq!(actor.current_speed(), 100.0);
        assert_eq!(actor.delta_speed(), 0.0);
        assert_eq!(actor.delta_distance(), 0.0);
        assert_eq!(actor.distance_covered_since_last_action(), 0.0);
        assert_eq!(actor.time_to_next_action(DISTANCE), 100.0);
    }

    #[test]
    fn create_rejects_blank_name_and_bad_speed() {
        assert_eq!(ActorState::create("  ", 10.0), Err(ActorError::EmptyName));
        assert!(matches!(
            ActorState::create("A", 0.0),
            Err(ActorError::NonPositiveBaseSpeed { .. })
        ));
        assert!(matches!(
            ActorState::create("A", -5.0),
            Err(ActorError::NonPositiveBaseSpeed { .. })
        ));
        assert!(matches!(
            ActorState::create("A", f64::NAN),
            Err(ActorError::NonPositiveBaseSpeed { .. })
        ));
    }

    #[test]
    fn delta_speed_edit_updates_current_speed() {
        let mut actor = ActorState::create("A", 100.0).unwrap();
        actor.apply_delta_speed_edit(-40.0).unwrap();

        assert_eq!(actor.delta_speed(), -40.0);
        assert_eq!(actor.current_speed(), 60.0);
    }

    #[test]
    fn delta_speed_edit_at_floor_leaves_actor_untouched() {
        let mut actor = ActorState::create("A", 100.0).unwrap();
        actor.apply_delta_speed_edit(25.0).unwrap();
        let before = actor.clone();

        let err = actor.apply_delta_speed_edit(-100.0).unwrap_err();
        assert!(matches!(err, ActorError::NonPositiveCurrentSpeed { .. }));
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(actor, before);

        assert!(actor.apply_delta_speed_edit(f64::NAN).is_err());
        assert_eq!(actor, before);
    }

    #[test]
    fn delta_distance_edit_accepts_negative_values() {
        let mut actor = ActorState::create("A", 100.0).unwrap();

        let advisory = actor.apply_delta_distance_edit(-2_500.0, DISTANCE).unwrap();
        assert!(advisory.is_none());
        assert_eq!(actor.effective_remaining(DISTANCE), 7_500.0);
    }

    #[test]
    fn delta_distance_past_threshold_is_advisory_only() {
        let mut actor = ActorState::create("A", 100.0).unwrap();

        let advisory = actor
            .apply_delta_distance_edit(-12_000.0, DISTANCE)
            .unwrap()
            .expect("advisory expected");
        assert_eq!(advisory.original_remaining, DISTANCE);
        assert_eq!(advisory.unclamped_remaining(), -2_000.0);

        // Applied anyway: the actor is due immediately.
        assert_eq!(actor.delta_distance(), -12_000.0);
        assert_eq!(actor.time_to_next_action(DISTANCE), 0.0);
    }

    #[test]
    fn advance_snaps_onto_threshold() {
        let mut actor = ActorState::create("A", 3.0).unwrap();
        actor.advance(DISTANCE / 3.0, DISTANCE, SimConfig::EPSILON);

        assert_eq!(actor.distance_covered_since_last_action(), DISTANCE);
        assert_eq!(actor.time_to_next_action(DISTANCE), 0.0);

        actor.complete_action();
        assert_eq!(actor.distance_covered_since_last_action(), 0.0);
    }

    #[test]
    fn snap_never_drives_covered_negative() {
        let mut actor = ActorState::create("A", 50.0).unwrap();
        actor.apply_delta_distance_edit(-25_000.0, DISTANCE).unwrap();
        actor.advance(0.0, DISTANCE, SimConfig::EPSILON);

        assert_eq!(actor.distance_covered_since_last_action(), 0.0);
        assert_eq!(actor.effective_remaining(DISTANCE), 0.0);
    }
}
