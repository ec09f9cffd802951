//! Discrete-event stepping engine.
//!
//! [`TurnEngine::simulate`] advances a roster from a start time to the horizon
//! and returns every action it produced, followed by a terminal
//! `HorizonReached` checkpoint. The engine is pure: it clones its input roster
//! and the same inputs always yield the same checkpoints.

mod errors;
mod turns;

pub use errors::EngineError;

use crate::actor::ActorState;
use crate::checkpoint::Checkpoint;
use crate::config::SimConfig;

use turns::select_next_turn;

/// Stepping engine bound to a configuration.
#[derive(Clone, Copy, Debug)]
pub struct TurnEngine<'a> {
    config: &'a SimConfig,
}

impl<'a> TurnEngine<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimConfig {
        self.config
    }

    /// Simulates `roster` from `start_time` until no further action fits before `horizon`.
    ///
    /// Each loop iteration:
    /// 1. selects the actor with the smallest time to its next action (lowest index on ties)
    /// 2. stops if that time is infinite, stalled (`0 < dt < epsilon`), or overshoots the horizon
    /// 3. advances every actor by `dt` and moves the clock
    /// 4. resets the acting actor's cycle and records an `Action` checkpoint
    ///
    /// A `HorizonReached` checkpoint at exactly `horizon` closes the run whenever
    /// any action was produced or `start_time < horizon`.
    pub fn simulate(
        &self,
        roster: &[ActorState],
        start_time: f64,
        horizon: f64,
    ) -> Result<Vec<Checkpoint>, EngineError> {
        if !start_time.is_finite() || !horizon.is_finite() {
            return Err(EngineError::InvalidWindow {
                start_time,
                horizon,
            });
        }

        let SimConfig {
            action_distance,
            epsilon,
            max_steps,
        } = *self.config;

        let mut actors = roster.to_vec();
        let mut clock = start_time;
        let mut events = Vec::new();

        while let Some(turn) = select_next_turn(&actors, action_distance) {
            let dt = turn.delay;

            if dt < epsilon && dt != 0.0 {
                break;
            }
            if clock + dt > horizon {
                break;
            }
            if events.len() >= max_steps {
                return Err(EngineError::SimulationDivergence {
                    max_steps,
                    clock,
                    horizon,
                });
            }

            for actor in actors.iter_mut() {
                actor.advance(dt, action_distance, epsilon);
            }
            clock += dt;

            actors[turn.actor].complete_action();
            events.push(Checkpoint::action(clock, turn.actor, actors.clone()));
        }

        if !events.is_empty() || start_time < horizon {
            let last_snapshot = events
                .last()
                .map(|event: &Checkpoint| event.snapshot.clone())
                .unwrap_or_else(|| roster.to_vec());
            events.push(Checkpoint::horizon_reached(horizon, last_snapshot));
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::EventKind;

    fn roster(members: &[(&str, f64)]) -> Vec<ActorState> {
        members
            .iter()
            .map(|&(name, speed)| ActorState::create(name, speed).unwrap())
            .collect()
    }

    fn timeline(events: &[Checkpoint]) -> Vec<(f64, Option<&str>)> {
        events
            .iter()
            .map(|event| (event.time, event.triggerer_name()))
            .collect()
    }

    #[test]
    fn two_actor_reference_scenario() {
        let config = SimConfig::default();
        let engine = TurnEngine::new(&config);
        let actors = roster(&[("A", 100.0), ("B", 50.0)]);

        let events = engine.simulate(&actors, 0.0, 300.0).unwrap();

        assert_eq!(
            timeline(&events),
            vec![
                (100.0, Some("A")),
                (200.0, Some("A")),
                (200.0, Some("B")),
                (300.0, Some("A")),
                (300.0, None),
            ]
        );
        assert_eq!(events.last().unwrap().kind, EventKind::HorizonReached);
    }

    #[test]
    fn acting_actor_starts_a_fresh_cycle() {
        let config = SimConfig::default();
        let engine = TurnEngine::new(&config);
        let actors = roster(&[("A", 100.0), ("B", 50.0)]);

        let events = engine.simulate(&actors, 0.0, 150.0).unwrap();
        let first = &events[0];

        assert_eq!(first.triggerer, Some(0));
        assert_eq!(first.snapshot[0].distance_covered_since_last_action(), 0.0);
        assert_eq!(first.snapshot[1].distance_covered_since_last_action(), 5_000.0);
    }

    #[test]
    fn input_roster_is_not_mutated() {
        let config = SimConfig::default();
        let engine = TurnEngine::new(&config);
        let actors = roster(&[("A", 100.0), ("B", 50.0)]);
        let before = actors.clone();

        engine.simulate(&actors, 0.0, 1_000.0).unwrap();
        assert_eq!(actors, before);
    }

    #[test]
    fn horizon_without_actions_still_closes_the_run() {
        let config = SimConfig::default();
        let engine = TurnEngine::new(&config);
        let actors = roster(&[("Slow", 1.0)]);

        let events = engine.simulate(&actors, 0.0, 50.0).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::HorizonReached);
        assert_eq!(events[0].time, 50.0);
        assert_eq!(events[0].snapshot, actors);
    }

    #[test]
    fn start_at_horizon_with_nothing_due_produces_nothing() {
        let config = SimConfig::default();
        let engine = TurnEngine::new(&config);
        let actors = roster(&[("A", 100.0)]);

        let events = engine.simulate(&actors, 300.0, 300.0).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn sub_epsilon_step_stops_the_run() {
        let config = SimConfig::default();
        let engine = TurnEngine::new(&config);
        let mut actors = roster(&[("A", 100.0), ("B", 50.0)]);
        actors[0]
            .apply_delta_distance_edit(-(SimConfig::ACTION_DISTANCE - 1e-8), config.action_distance)
            .unwrap();
        assert!(actors[0].time_to_next_action(config.action_distance) < config.epsilon);

        let events = engine.simulate(&actors, 0.0, 300.0).unwrap();

        assert_eq!(timeline(&events), vec![(300.0, None)]);
        assert_eq!(events[0].snapshot, actors);
    }

    #[test]
    fn step_cap_reports_divergence() {
        let config = SimConfig::default().with_max_steps(3);
        let engine = TurnEngine::new(&config);
        let actors = roster(&[("A", 100.0)]);

        let err = engine.simulate(&actors, 0.0, 10_000.0).unwrap_err();
        assert!(matches!(
            err,
            EngineError::SimulationDivergence { max_steps: 3, .. }
        ));
    }

    #[test]
    fn non_finite_horizon_is_rejected() {
        let config = SimConfig::default();
        let engine = TurnEngine::new(&config);

        let err = engine.simulate(&[], 0.0, f64::INFINITY).unwrap_err();
        assert!(matches!(err, EngineError::InvalidWindow { .. }));
    }
}
