use std::env;
use std::num::NonZeroUsize;

use once_cell::sync::OnceCell;

use crate::direction::Direction;
use crate::error::ConfigError;

/// Run size used when none is configured.
pub const DEFAULT_RUN_SIZE: usize = 4;

/// Environment variable that overrides [`DEFAULT_RUN_SIZE`] for the whole process.
pub const RUN_SIZE_ENV_VAR: &str = "HYBRID_SORT_RUN_SIZE";

/// Parameters of one sort call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SortConfig {
    run_size: NonZeroUsize,
    direction: Direction,
}

impl SortConfig {
    pub fn new(run_size: usize) -> Result<Self, ConfigError> {
        let run_size = NonZeroUsize::new(run_size).ok_or(ConfigError::ZeroRunSize)?;

        Ok(Self {
            run_size,
            direction: Direction::Ascending,
        })
    }

    /// Reads the run size from [`RUN_SIZE_ENV_VAR`], falling back to [`DEFAULT_RUN_SIZE`] if the
    /// variable is unset. Unlike [`SortConfig::default`] a malformed value is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(RUN_SIZE_ENV_VAR) {
            Ok(value) => Ok(Self::from_run_size(parse_run_size(&value)?)),
            Err(_) => Ok(Self::from_run_size(default_run_size())),
        }
    }

    pub const fn from_run_size(run_size: NonZeroUsize) -> Self {
        Self {
            run_size,
            direction: Direction::Ascending,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn run_size(&self) -> NonZeroUsize {
        self.run_size
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::from_run_size(env_or_default_run_size())
    }
}

fn parse_run_size(value: &str) -> Result<NonZeroUsize, ConfigError> {
    value
        .trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| ConfigError::InvalidEnvValue {
            var: RUN_SIZE_ENV_VAR,
            value: value.to_owned(),
        })
}

fn default_run_size() -> NonZeroUsize {
    NonZeroUsize::MIN.saturating_add(DEFAULT_RUN_SIZE - 1)
}

// The override is read once per process, later changes to the environment are not observed.
fn env_or_default_run_size() -> NonZeroUsize {
    static RUN_SIZE: OnceCell<NonZeroUsize> = OnceCell::new();

    *RUN_SIZE.get_or_init(|| match env::var(RUN_SIZE_ENV_VAR) {
        Ok(value) => parse_run_size(&value).unwrap_or_else(|err| {
            log::warn!("{err}, using the default run size {DEFAULT_RUN_SIZE}");
            default_run_size()
        }),
        Err(_) => default_run_size(),
    })
}
