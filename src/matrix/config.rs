//! Configuration for the parallel kernels

use tracing::warn;

/// Environment variable overriding the worker count in [`SpmatConfig::from_env`]
pub const NUM_THREADS_ENV: &str = "SPMAT_NUM_THREADS";

/// Configuration for the parallel sparse product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpmatConfig {
    /// Number of workers; A's rows are split into this many contiguous chunks
    pub n_threads: usize,
}

impl Default for SpmatConfig {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
        }
    }
}

impl SpmatConfig {
    /// Config with a fixed number of workers; `0` means all available cores
    pub fn with_threads(n_threads: usize) -> Self {
        if n_threads == 0 {
            Self::default()
        } else {
            Self { n_threads }
        }
    }

    /// Reads the worker count from `SPMAT_NUM_THREADS`
    ///
    /// Falls back to the default if the variable is unset or not a number.
    pub fn from_env() -> Self {
        match std::env::var(NUM_THREADS_ENV) {
            Ok(val) => match val.trim().parse::<usize>() {
                Ok(n) => Self::with_threads(n),
                Err(_) => {
                    warn!(value = %val, "ignoring unparsable {}", NUM_THREADS_ENV);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
