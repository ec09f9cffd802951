use crate::actor::ActorState;

/// The actor that acts next and how long until it does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScheduledTurn {
    pub actor: usize,
    pub delay: f64,
}

/// Selects the next actor by a single pass over the roster.
///
/// Strict `<` keeps the first minimum, so the lowest roster index wins ties.
/// Returns `None` when no actor can ever act (empty roster or every delay infinite).
pub(crate) fn select_next_turn(roster: &[ActorState], action_distance: f64) -> Option<ScheduledTurn> {
    let mut best: Option<ScheduledTurn> = None;
    let mut best_delay = f64::INFINITY;

    for (index, actor) in roster.iter().enumerate() {
        let delay = actor.time_to_next_action(action_distance);
        if delay < best_delay {
            best_delay = delay;
            best = Some(ScheduledTurn {
                actor: index,
                delay,
            });
        }
    }

    best
}
