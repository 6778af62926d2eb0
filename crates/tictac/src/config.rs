//! Configuration file for tictac.

use crate::cli::RoundArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictac_core::{Players, RoundConfig};
use tracing::{debug, info, instrument};

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Player names from the `[players]` table. Blank names play as "Unnamed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerNames {
    /// Name of the X player.
    x: String,
    /// Name of the O player.
    o: String,
}

/// Contents of `tictac.toml`.
///
/// ```toml
/// [players]
/// x = "Ann"
/// o = "Bo"
///
/// [round]
/// round_secs = 30
/// chaos = true
/// timeout_policy = "halt"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Player names.
    players: PlayerNames,
    /// Round settings.
    round: RoundConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(round_secs = config.round.round_secs(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file when it exists, defaults otherwise, then applies the
    /// command-line overrides.
    #[instrument(skip(args), fields(path = %args.config.display()))]
    pub fn load(args: &RoundArgs) -> Result<Self, ConfigError> {
        let config = if args.config.exists() {
            Self::from_file(&args.config)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        Ok(config.with_overrides(args))
    }

    /// Applies command-line flags on top of file values.
    pub fn with_overrides(mut self, args: &RoundArgs) -> Self {
        if let Some(secs) = args.duration {
            debug!(secs, "Overriding round duration");
            self.round = self.round.with_round_secs(secs);
        }
        if args.no_chaos {
            self.round = self.round.with_chaos(false);
        }
        if let Some(seed) = args.seed {
            self.round = self.round.with_seed(Some(seed));
        }
        if let Some(name) = &args.player_x {
            self.players.x = name.clone();
        }
        if let Some(name) = &args.player_o {
            self.players.o = name.clone();
        }
        self
    }

    /// Builds the two players.
    pub fn build_players(&self) -> Players {
        Players::with_names(self.players.x.as_str(), self.players.o.as_str())
    }
}
