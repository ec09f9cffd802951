//! Runtime configuration and environment loading.

use std::env;
use std::path::PathBuf;

use turnline_core::SimConfig;

/// Configuration shared by sessions and the command-line frontend.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub sim: SimConfig,
    pub horizon: f64,
    pub enable_persistence: bool,
    pub session_id: Option<String>,
    pub save_data_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            horizon: SimConfig::DEFAULT_HORIZON,
            enable_persistence: true,
            session_id: None,
            save_data_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TURNLINE_HORIZON` - Simulation horizon (default: 1500)
    /// - `TURNLINE_MAX_STEPS` - Step cap per simulation run (default: 1000000)
    /// - `TURNLINE_SESSION_ID` - Session identifier for save files (default: auto-generated)
    /// - `SAVE_DATA_DIR` - Directory for save data (default: platform-specific)
    /// - `ENABLE_PERSISTENCE` - Save ledgers after every change (default: true)
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(horizon) = read_env::<f64>("TURNLINE_HORIZON") {
            config.horizon = horizon;
        }

        if let Some(max_steps) = read_env::<usize>("TURNLINE_MAX_STEPS") {
            config.sim = config.sim.with_max_steps(max_steps);
        }

        if let Some(enable) = read_env::<bool>("ENABLE_PERSISTENCE") {
            config.enable_persistence = enable;
        }

        config.session_id = env::var("TURNLINE_SESSION_ID").ok();
        config.save_data_dir = env::var("SAVE_DATA_DIR").ok().map(PathBuf::from);

        config
    }

    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_save_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_data_dir = Some(dir.into());
        self
    }

    /// Directory ledgers are saved to: `save_data_dir`, or the platform data dir.
    ///
    /// Follows platform conventions:
    /// - macOS: `~/Library/Application Support/turnline`
    /// - Linux: `~/.local/share/turnline` (or `$XDG_DATA_HOME/turnline`)
    /// - Windows: `%APPDATA%\turnline`
    /// - Fallback: `./save_data`
    pub fn resolved_save_dir(&self) -> PathBuf {
        self.save_data_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "turnline")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("./save_data"))
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
