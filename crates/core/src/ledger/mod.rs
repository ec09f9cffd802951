//! Ordered checkpoint history with retroactive edits.
//!
//! The ledger is an append-only log of [`Checkpoint`]s: one `Initial`, the
//! `Action`s produced by the engine, and a terminal `HorizonReached`. An edit
//! at checkpoint *k* is a truncate-and-replay: the edited snapshot seeds a new
//! engine run from the checkpoint's time, and the run replaces everything
//! after *k*. Nothing at or before *k* changes except the edited field.

mod edit;
mod error;

pub use edit::{Edit, EditField, EditOutcome};
pub use error::LedgerError;

use crate::actor::{ActorSpec, ActorState};
use crate::checkpoint::{Checkpoint, EventKind};
use crate::config::SimConfig;
use crate::engine::TurnEngine;

/// Checkpoint history for one roster and horizon.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryLedger {
    config: SimConfig,
    horizon: f64,
    checkpoints: Vec<Checkpoint>,
}

impl HistoryLedger {
    /// Builds a ledger with the default configuration.
    pub fn initialize(actors: &[ActorSpec], horizon: f64) -> Result<Self, LedgerError> {
        Self::initialize_with_config(actors, horizon, SimConfig::default())
    }

    /// Builds a ledger: one `Initial` checkpoint followed by a full run from time zero.
    pub fn initialize_with_config(
        actors: &[ActorSpec],
        horizon: f64,
        config: SimConfig,
    ) -> Result<Self, LedgerError> {
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(LedgerError::InvalidHorizon(horizon));
        }
        if !config.action_distance.is_finite() || config.action_distance <= 0.0 {
            return Err(LedgerError::InvalidActionDistance(config.action_distance));
        }
        if actors.is_empty() {
            return Err(LedgerError::EmptyRoster);
        }

        let roster = actors
            .iter()
            .map(ActorState::from_spec)
            .collect::<Result<Vec<_>, _>>()?;

        let run = TurnEngine::new(&config).simulate(&roster, 0.0, horizon)?;

        let mut checkpoints = Vec::with_capacity(run.len() + 1);
        checkpoints.push(Checkpoint::initial(roster));
        checkpoints.extend(run);

        Ok(Self {
            config,
            horizon,
            checkpoints,
        })
    }

    /// Applies `edit` to its checkpoint and regenerates every later checkpoint.
    ///
    /// All validation and simulation happen on a copy; the ledger is modified
    /// only after everything succeeded. Editing the terminal checkpoint updates
    /// its snapshot and regenerates nothing, since no time remains after it.
    pub fn apply_edit_and_recompute(&mut self, edit: Edit) -> Result<EditOutcome, LedgerError> {
        let len = self.checkpoints.len();
        let checkpoint = self
            .checkpoints
            .get(edit.checkpoint)
            .ok_or(LedgerError::CheckpointOutOfRange {
                index: edit.checkpoint,
                len,
            })?;

        let mut snapshot = checkpoint.snapshot.clone();
        let roster_len = snapshot.len();
        let actor = snapshot
            .get_mut(edit.actor)
            .ok_or(LedgerError::ActorOutOfRange {
                index: edit.actor,
                len: roster_len,
            })?;

        let advisory = match edit.field {
            EditField::DeltaSpeed => {
                actor.apply_delta_speed_edit(edit.value)?;
                None
            }
            EditField::DeltaDistance => {
                actor.apply_delta_distance_edit(edit.value, self.config.action_distance)?
            }
        };

        let mut suffix = if checkpoint.is_terminal() {
            Vec::new()
        } else {
            TurnEngine::new(&self.config).simulate(&snapshot, checkpoint.time, self.horizon)?
        };

        // An action recorded exactly at the horizon replays to nothing; seal the log.
        if suffix.is_empty() && !checkpoint.is_terminal() {
            suffix.push(Checkpoint::horizon_reached(self.horizon, snapshot.clone()));
        }

        let discarded = len - edit.checkpoint - 1;
        let appended = suffix.len();

        self.checkpoints.truncate(edit.checkpoint + 1);
        self.checkpoints[edit.checkpoint].snapshot = snapshot;
        self.checkpoints.extend(suffix);

        Ok(EditOutcome {
            discarded,
            appended,
            advisory,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn get(&self, index: usize) -> Option<&Checkpoint> {
        self.checkpoints.get(index)
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Always false for a ledger built by `initialize`.
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Roster names in index order, taken from the initial checkpoint.
    pub fn roster_names(&self) -> Vec<&str> {
        self.checkpoints
            .first()
            .map(|initial| initial.snapshot.iter().map(ActorState::name).collect())
            .unwrap_or_default()
    }

    /// Number of `Action` checkpoints in the ledger.
    pub fn action_count(&self) -> usize {
        self.checkpoints
            .iter()
            .filter(|checkpoint| checkpoint.kind == EventKind::Action)
            .count()
    }

    /// Checks the structural invariants of the ledger.
    ///
    /// Ledgers built through this API always pass; the check exists for
    /// ledgers restored from storage.
    pub fn validate(&self) -> Result<(), LedgerError> {
        let violation = |index, reason| Err(LedgerError::InvariantViolation { index, reason });

        let Some(first) = self.checkpoints.first() else {
            return violation(0, "ledger is empty");
        };
        if first.kind != EventKind::Initial || first.time != 0.0 {
            return violation(0, "first checkpoint must be Initial at time zero");
        }
        if !self.horizon.is_finite() || self.horizon <= 0.0 {
            return violation(0, "horizon must be positive");
        }
        if !self.config.action_distance.is_finite() || self.config.action_distance <= 0.0 {
            return violation(0, "action distance must be positive");
        }
        if !(self.config.epsilon >= 0.0) || self.config.max_steps == 0 {
            return violation(0, "epsilon and step cap must be usable");
        }

        let last_index = self.checkpoints.len() - 1;
        let roster_len = first.snapshot.len();
        let mut previous_time = 0.0;

        for (index, checkpoint) in self.checkpoints.iter().enumerate() {
            if checkpoint.time < previous_time {
                return violation(index, "time decreased");
            }
            if checkpoint.time > self.horizon {
                return violation(index, "time exceeds horizon");
            }
            if checkpoint.snapshot.len() != roster_len {
                return violation(index, "roster size changed");
            }
            if checkpoint
                .snapshot
                .iter()
                .any(|actor| !(actor.current_speed() > 0.0))
            {
                return violation(index, "actor with non-positive current speed");
            }
            if checkpoint
                .snapshot
                .iter()
                .any(|actor| actor.current_speed() != actor.base_speed() + actor.delta_speed())
            {
                return violation(index, "current speed differs from base plus delta");
            }
            match (checkpoint.kind, checkpoint.triggerer) {
                (EventKind::Action, Some(actor)) if actor < roster_len => {}
                (EventKind::Action, _) => return violation(index, "action without triggerer"),
                (EventKind::Initial, _) if index != 0 => {
                    return violation(index, "initial checkpoint after start");
                }
                (EventKind::HorizonReached, _) if index != last_index => {
                    return violation(index, "checkpoint after horizon");
                }
                (_, Some(_)) => return violation(index, "unexpected triggerer"),
                _ => {}
            }
            previous_time = checkpoint.time;
        }

        let last = &self.checkpoints[last_index];
        if last.kind != EventKind::HorizonReached {
            return violation(last_index, "last checkpoint must be HorizonReached");
        }
        if last.time != self.horizon {
            return violation(last_index, "terminal checkpoint is not at the horizon");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorSeverity, SimError};

    fn two_actor_ledger() -> HistoryLedger {
        let actors = [ActorSpec::new("A", 100.0), ActorSpec::new("B", 50.0)];
        HistoryLedger::initialize(&actors, 300.0).unwrap()
    }

    fn timeline(ledger: &HistoryLedger) -> Vec<(f64, EventKind, Option<usize>)> {
        ledger
            .checkpoints()
            .iter()
            .map(|checkpoint| (checkpoint.time, checkpoint.kind, checkpoint.triggerer))
            .collect()
    }

    #[test]
    fn initialize_prepends_initial_checkpoint() {
        let ledger = two_actor_ledger();

        assert_eq!(
            timeline(&ledger),
            vec![
                (0.0, EventKind::Initial, None),
                (100.0, EventKind::Action, Some(0)),
                (200.0, EventKind::Action, Some(0)),
                (200.0, EventKind::Action, Some(1)),
                (300.0, EventKind::Action, Some(0)),
                (300.0, EventKind::HorizonReached, None),
            ]
        );
        assert_eq!(ledger.roster_names(), vec!["A", "B"]);
        assert_eq!(ledger.action_count(), 4);
        ledger.validate().unwrap();
    }

    #[test]
    fn initialize_rejects_bad_input() {
        let actors = [ActorSpec::new("A", 100.0)];

        assert_eq!(
            HistoryLedger::initialize(&actors, 0.0),
            Err(LedgerError::InvalidHorizon(0.0))
        );
        assert_eq!(
            HistoryLedger::initialize(&[], 10.0),
            Err(LedgerError::EmptyRoster)
        );

        let err = HistoryLedger::initialize(&[ActorSpec::new("", 100.0)], 10.0).unwrap_err();
        assert!(err.is_invalid_parameter());

        let err = HistoryLedger::initialize(&[ActorSpec::new("A", -1.0)], 10.0).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert_eq!(err.error_code(), "ACTOR_NON_POSITIVE_BASE_SPEED");
    }

    #[test]
    fn speed_edit_below_floor_leaves_ledger_unchanged() {
        let mut ledger = two_actor_ledger();
        let before = ledger.clone();

        let err = ledger
            .apply_edit_and_recompute(Edit::delta_speed(1, 0, -100.0))
            .unwrap_err();

        assert!(err.is_invalid_parameter());
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(ledger, before);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut ledger = two_actor_ledger();
        let before = ledger.clone();

        let err = ledger
            .apply_edit_and_recompute(Edit::delta_speed(ledger.len(), 0, 10.0))
            .unwrap_err();
        assert!(err.is_out_of_range());

        let err = ledger
            .apply_edit_and_recompute(Edit::delta_speed(0, 2, 10.0))
            .unwrap_err();
        assert_eq!(err, LedgerError::ActorOutOfRange { index: 2, len: 2 });
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(err.severity().is_user_correctable());
        assert_eq!(ledger, before);
    }

    #[test]
    fn distance_edit_at_start_delays_first_action() {
        let mut ledger = two_actor_ledger();

        let outcome = ledger
            .apply_edit_and_recompute(Edit::delta_distance(0, 1, 5_000.0))
            .unwrap();

        assert!(outcome.advisory.is_none());
        assert_eq!(outcome.discarded, 5);
        // B now needs 15000 units at speed 50: first action at 300, after A's tie win.
        assert_eq!(
            timeline(&ledger),
            vec![
                (0.0, EventKind::Initial, None),
                (100.0, EventKind::Action, Some(0)),
                (200.0, EventKind::Action, Some(0)),
                (300.0, EventKind::Action, Some(0)),
                (300.0, EventKind::Action, Some(1)),
                (300.0, EventKind::HorizonReached, None),
            ]
        );
        assert_eq!(outcome.appended, 5);
        assert_eq!(ledger.get(0).unwrap().snapshot[1].delta_distance(), 5_000.0);
        // Consumed by B's action.
        assert_eq!(ledger.get(4).unwrap().snapshot[1].delta_distance(), 0.0);
    }

    #[test]
    fn negative_distance_edit_warns_but_applies() {
        let mut ledger = two_actor_ledger();

        let outcome = ledger
            .apply_edit_and_recompute(Edit::delta_distance(0, 1, -20_000.0))
            .unwrap();

        let advisory = outcome.advisory.expect("advisory expected");
        assert_eq!(advisory.original_remaining, 10_000.0);
        // B is due immediately and acts at time zero.
        let first_action = ledger.get(1).unwrap();
        assert_eq!(first_action.time, 0.0);
        assert_eq!(first_action.triggerer, Some(1));
        ledger.validate().unwrap();
    }

    #[test]
    fn edit_preserves_prefix() {
        let mut ledger = two_actor_ledger();
        let before = ledger.clone();

        ledger
            .apply_edit_and_recompute(Edit::delta_speed(2, 1, 50.0))
            .unwrap();

        assert_eq!(&ledger.checkpoints()[..2], &before.checkpoints()[..2]);

        let edited = &ledger.checkpoints()[2];
        let original = &before.checkpoints()[2];
        assert_eq!(edited.time, original.time);
        assert_eq!(edited.triggerer, original.triggerer);
        assert_eq!(edited.snapshot[0], original.snapshot[0]);
        assert_eq!(edited.snapshot[1].current_speed(), 100.0);
        ledger.validate().unwrap();
    }

    #[test]
    fn editing_terminal_checkpoint_keeps_it_last() {
        let mut ledger = two_actor_ledger();
        let last = ledger.len() - 1;

        let outcome = ledger
            .apply_edit_and_recompute(Edit::delta_speed(last, 0, 20.0))
            .unwrap();

        assert_eq!(outcome.discarded, 0);
        assert_eq!(outcome.appended, 0);
        assert_eq!(ledger.len(), last + 1);
        assert_eq!(ledger.get(last).unwrap().snapshot[0].current_speed(), 120.0);
        ledger.validate().unwrap();
    }

    #[test]
    fn editing_action_at_horizon_reseals_ledger() {
        let mut ledger = two_actor_ledger();
        // A's action at t=300 sits right before the terminal checkpoint.
        let at_horizon = ledger.len() - 2;
        assert_eq!(ledger.get(at_horizon).unwrap().time, 300.0);

        ledger
            .apply_edit_and_recompute(Edit::delta_speed(at_horizon, 1, 10.0))
            .unwrap();

        let terminal = ledger.checkpoints().last().unwrap();
        assert!(terminal.is_terminal());
        assert_eq!(terminal.time, 300.0);
        assert_eq!(terminal.snapshot[1].current_speed(), 60.0);
        ledger.validate().unwrap();
    }

    #[test]
    fn validate_flags_out_of_order_times() {
        let mut ledger = two_actor_ledger();
        ledger.checkpoints.swap(1, 4);

        let err = ledger.validate().unwrap_err();
        assert!(matches!(err, LedgerError::InvariantViolation { index: 2, .. }));
    }

    #[test]
    fn validate_flags_unusable_config() {
        let mut ledger = two_actor_ledger();
        ledger.config.action_distance = 0.0;
        assert!(matches!(
            ledger.validate(),
            Err(LedgerError::InvariantViolation { index: 0, .. })
        ));

        let mut ledger = two_actor_ledger();
        ledger.config.action_distance = -10_000.0;
        assert!(ledger.validate().is_err());

        let mut ledger = two_actor_ledger();
        ledger.config.epsilon = f64::NAN;
        assert!(ledger.validate().is_err());

        let mut ledger = two_actor_ledger();
        ledger.config.max_steps = 0;
        assert!(ledger.validate().is_err());
    }

    #[test]
    fn validate_flags_terminal_off_the_horizon() {
        let mut ledger = two_actor_ledger();
        let last = ledger.len() - 1;
        ledger.checkpoints[last].time = 250.0;
        ledger.checkpoints[last - 1].time = 250.0;
        let err = ledger.validate().unwrap_err();
        assert!(matches!(err, LedgerError::InvariantViolation { index, .. } if index == last));
        assert_eq!(err.severity(), ErrorSeverity::Internal);
        assert!(!err.severity().is_user_correctable());
    }

    #[test]
    fn sub_epsilon_remaining_distance_stalls_the_replay() {
        let mut ledger = two_actor_ledger();

        // A is left 1e-8 units short: 1e-10 time units at speed 100.
        ledger
            .apply_edit_and_recompute(Edit::delta_distance(0, 0, -(10_000.0 - 1e-8)))
            .unwrap();

        assert_eq!(
            timeline(&ledger),
            vec![
                (0.0, EventKind::Initial, None),
                (300.0, EventKind::HorizonReached, None),
            ]
        );
        ledger.validate().unwrap();
    }

    #[test]
    fn custom_action_distance_shortens_cycles() {
        let actors = [ActorSpec::new("A", 100.0)];
        let config = SimConfig::default().with_action_distance(5_000.0);
        let ledger = HistoryLedger::initialize_with_config(&actors, 120.0, config).unwrap();

        assert_eq!(
            timeline(&ledger),
            vec![
                (0.0, EventKind::Initial, None),
                (50.0, EventKind::Action, Some(0)),
                (100.0, EventKind::Action, Some(0)),
                (120.0, EventKind::HorizonReached, None),
            ]
        );

        let err = HistoryLedger::initialize_with_config(
            &actors,
            120.0,
            SimConfig::default().with_action_distance(0.0),
        )
        .unwrap_err();
        assert_eq!(err, LedgerError::InvalidActionDistance(0.0));
        assert!(err.severity().is_user_correctable());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip_is_verbatim() {
        let ledger = two_actor_ledger();
        let json = serde_json::to_string(&ledger).unwrap();
        let restored: HistoryLedger = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, ledger);
    }
}
