//! Sequential-vs-parallel decision policy.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::MatrixError;

/// Default volume above which [`ParallelPolicy::Heuristic`] splits work.
pub const MIN_PARALLEL_VOLUME: u64 = 8192;

/// Environment variable read by [`ParallelConfig::from_env`] for the policy.
pub const PARALLEL_ENV: &str = "MATRIX2D_PARALLEL";

/// Environment variable read by [`ParallelConfig::from_env`] for the threshold.
pub const THRESHOLD_ENV: &str = "MATRIX2D_PARALLEL_THRESHOLD";

/// Whether bulk operations fan out across the worker pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParallelPolicy {
    /// Split only when the iteration volume exceeds the threshold.
    #[default]
    Heuristic,
    /// Always split.
    ForceParallel,
    /// Never split; iterate row-major on the calling thread.
    ForceSequential,
}

impl ParallelPolicy {
    fn to_u8(self) -> u8 {
        match self {
            ParallelPolicy::Heuristic => 0,
            ParallelPolicy::ForceParallel => 1,
            ParallelPolicy::ForceSequential => 2,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => ParallelPolicy::ForceParallel,
            2 => ParallelPolicy::ForceSequential,
            _ => ParallelPolicy::Heuristic,
        }
    }
}

impl fmt::Display for ParallelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParallelPolicy::Heuristic => "heuristic",
            ParallelPolicy::ForceParallel => "parallel",
            ParallelPolicy::ForceSequential => "sequential",
        })
    }
}

impl FromStr for ParallelPolicy {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "heuristic" | "auto" => Ok(ParallelPolicy::Heuristic),
            "yes" | "parallel" | "force-parallel" => Ok(ParallelPolicy::ForceParallel),
            "no" | "sequential" | "force-sequential" => Ok(ParallelPolicy::ForceSequential),
            other => Err(MatrixError::InvalidArgument(format!(
                "unknown parallel policy {other:?}"
            ))),
        }
    }
}

static GLOBAL_POLICY: AtomicU8 = AtomicU8::new(0);

/// The process-wide policy used by [`ParallelConfig::current`].
pub fn parallel_policy() -> ParallelPolicy {
    ParallelPolicy::from_u8(GLOBAL_POLICY.load(Ordering::Relaxed))
}

/// Replace the process-wide policy.
///
/// Operations already dispatching may still observe the previous value.
pub fn set_parallel_policy(policy: ParallelPolicy) {
    let previous = ParallelPolicy::from_u8(GLOBAL_POLICY.swap(policy.to_u8(), Ordering::Relaxed));
    tracing::debug!(%previous, %policy, "parallel policy changed");
}

/// Dispatch configuration passed to the `*_with` functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    pub policy: ParallelPolicy,
    /// Heuristic threshold: split when the volume is strictly greater.
    pub threshold: u64,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            policy: ParallelPolicy::Heuristic,
            threshold: MIN_PARALLEL_VOLUME,
        }
    }
}

impl ParallelConfig {
    pub fn sequential() -> Self {
        Self::default().with_policy(ParallelPolicy::ForceSequential)
    }

    pub fn parallel() -> Self {
        Self::default().with_policy(ParallelPolicy::ForceParallel)
    }

    pub fn with_policy(mut self, policy: ParallelPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    /// The process-wide policy with the default threshold.
    pub fn current() -> Self {
        Self::default().with_policy(parallel_policy())
    }

    /// Read [`PARALLEL_ENV`] and [`THRESHOLD_ENV`]; unset or unparseable values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        let policy = std::env::var(PARALLEL_ENV).ok();
        let threshold = std::env::var(THRESHOLD_ENV).ok();
        Self::from_settings(policy.as_deref(), threshold.as_deref())
    }

    pub(crate) fn from_settings(policy: Option<&str>, threshold: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = policy {
            match raw.parse() {
                Ok(p) => config.policy = p,
                Err(err) => tracing::warn!(%err, "ignoring {PARALLEL_ENV}"),
            }
        }
        if let Some(raw) = threshold {
            match raw.trim().parse::<u64>() {
                Ok(t) => config.threshold = t,
                Err(err) => tracing::warn!(%err, value = raw, "ignoring {THRESHOLD_ENV}"),
            }
        }
        config
    }

    /// Whether an operation visiting `volume` cells should split.
    ///
    /// Always `false` when the `parallel` feature is disabled.
    pub fn should_parallelize(&self, volume: u64) -> bool {
        if !cfg!(feature = "parallel") {
            return false;
        }
        match self.policy {
            ParallelPolicy::ForceSequential => false,
            ParallelPolicy::ForceParallel => true,
            ParallelPolicy::Heuristic => volume > self.threshold,
        }
    }
}
