/// Simulation constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Progress an actor must accumulate between two consecutive actions.
    pub action_distance: f64,

    /// Tolerance for both the "stalled step" and the "snap to completed" checks.
    pub epsilon: f64,

    /// Upper bound on committed steps in a single `simulate` run.
    /// Exceeding it is reported as `EngineError::SimulationDivergence`.
    pub max_steps: usize,
}

impl SimConfig {
    // ===== fixed reference values =====
    pub const ACTION_DISTANCE: f64 = 10_000.0;
    pub const EPSILON: f64 = 1e-9;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HORIZON: f64 = 1_500.0;
    pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

    pub const fn new() -> Self {
        Self {
            action_distance: Self::ACTION_DISTANCE,
            epsilon: Self::EPSILON,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn with_action_distance(mut self, action_distance: f64) -> Self {
        self.action_distance = action_distance;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset roster used when no members are supplied: `(name, base_speed)`.
pub const DEFAULT_ROSTER: [(&str, f64); 4] = [
    ("Clara", 90.0),
    ("Tingyun", 175.0),
    ("Yukong", 163.0),
    ("Gallagher", 168.0),
];
