//!
//! Execution config of batch alignment
//!
use serde::{Deserialize, Serialize};

///
/// Environment variable that disables threading when set to a non-zero integer
///
pub const NOTHREAD_VAR: &str = "CTC_NOTHREAD";

///
/// How batch elements are dispatched
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    ///
    /// run elements on a rayon pool (`true`) or one by one on the caller thread (`false`)
    pub parallel: bool,
    ///
    /// size of a dedicated worker pool. `None` uses the global rayon pool,
    /// which has one worker per available cpu.
    pub n_threads: Option<usize>,
}

impl BatchConfig {
    pub fn parallel() -> BatchConfig {
        BatchConfig {
            parallel: true,
            n_threads: None,
        }
    }
    pub fn serial() -> BatchConfig {
        BatchConfig {
            parallel: false,
            n_threads: None,
        }
    }
    /// Use a dedicated pool of `n_threads` workers
    pub fn with_threads(self, n_threads: usize) -> BatchConfig {
        BatchConfig {
            n_threads: Some(n_threads),
            ..self
        }
    }
    ///
    /// Serial if `CTC_NOTHREAD` is a non-zero integer, parallel otherwise.
    ///
    pub fn from_env() -> BatchConfig {
        let value = std::env::var(NOTHREAD_VAR).ok();
        BatchConfig::from_nothread(value.as_deref())
    }
    fn from_nothread(value: Option<&str>) -> BatchConfig {
        let nothread = value
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map_or(false, |v| v != 0);
        if nothread {
            BatchConfig::serial()
        } else {
            BatchConfig::parallel()
        }
    }
}

impl Default for BatchConfig {
    fn default() -> BatchConfig {
        BatchConfig::parallel()
    }
}

impl std::fmt::Display for BatchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.parallel, self.n_threads) {
            (false, _) => write!(f, "serial"),
            (true, None) => write!(f, "parallel(n_threads={})", rayon::current_num_threads()),
            (true, Some(n)) => write!(f, "parallel(n_threads={})", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothread_values() {
        assert_eq!(BatchConfig::from_nothread(None), BatchConfig::parallel());
        assert_eq!(BatchConfig::from_nothread(Some("0")), BatchConfig::parallel());
        assert_eq!(BatchConfig::from_nothread(Some("1")), BatchConfig::serial());
        assert_eq!(BatchConfig::from_nothread(Some(" 2 ")), BatchConfig::serial());
        assert_eq!(BatchConfig::from_nothread(Some("yes")), BatchConfig::parallel());
    }
    #[test]
    fn with_threads() {
        let c = BatchConfig::parallel().with_threads(4);
        assert!(c.parallel);
        assert_eq!(c.n_threads, Some(4));
        assert_eq!(c.to_string(), "parallel(n_threads=4)");
        assert_eq!(BatchConfig::serial().to_string(), "serial");
        assert_eq!(BatchConfig::default(), BatchConfig::parallel());
    }
}
