//! Runtime configuration for a batch generation run.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration passed into the batch driver at construction time.
///
/// All fields have defaults suitable for a ComfyUI instance on the
/// local loopback. Override via environment variables or CLI flags.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Base HTTP URL of the ComfyUI server (default: `http://127.0.0.1:8190`).
    pub server_url: String,
    /// Directory that receives the generated images (default: `images`).
    pub output_dir: PathBuf,
    /// Sleep between history checks while polling (default: 2s).
    pub poll_interval: Duration,
    /// Deadline for a single job to appear in history (default: 120s).
    pub poll_timeout: Duration,
    /// Pause between batch entries (default: 1s).
    pub inter_job_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8190".into(),
            output_dir: PathBuf::from("images"),
            poll_interval: Duration::from_secs(2),
            poll_timeout: Duration::from_secs(120),
            inter_job_delay: Duration::from_secs(1),
        }
    }
}

impl BatchConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `COMFYUI_URL`         | `http://127.0.0.1:8190` |
    /// | `OUTPUT_DIR`          | `images`                |
    /// | `POLL_INTERVAL_SECS`  | `2`                     |
    /// | `POLL_TIMEOUT_SECS`   | `120`                   |
    /// | `INTER_JOB_DELAY_SECS`| `1`                     |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let server_url = std::env::var("COMFYUI_URL").unwrap_or(defaults.server_url);

        let output_dir = std::env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        let poll_interval = env_secs("POLL_INTERVAL_SECS").unwrap_or(defaults.poll_interval);
        let poll_timeout = env_secs("POLL_TIMEOUT_SECS").unwrap_or(defaults.poll_timeout);
        let inter_job_delay = env_secs("INTER_JOB_DELAY_SECS").unwrap_or(defaults.inter_job_delay);

        Self {
            server_url,
            output_dir,
            poll_interval,
            poll_timeout,
            inter_job_delay,
        }
    }
}

/// Read a whole-second duration from an environment variable.
///
/// Returns `None` when the variable is unset. Panics with the variable
/// name when the value is not a valid integer, since a misconfigured
/// environment should fail loudly at startup.
fn env_secs(name: &str) -> Option<Duration> {
    let raw = std::env::var(name).ok()?;
    let secs: u64 = raw
        .parse()
        .unwrap_or_else(|_| panic!("{name} must be a whole number of seconds, got {raw:?}"));
    Some(Duration::from_secs(secs))
}
