//! Logging initialization

use std::sync::Once;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEVELOPMENT_FILTER: &str = "expectdiff=debug";
const PRODUCTION_FILTER: &str = "expectdiff=info";

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable, debug level
    Development,
    /// JSON lines, info level
    Production,
    /// Bare registry with no output. The CLI default, and what tests use
    /// when they need a subscriber but not capture.
    Silent,
}

static INIT_ONCE: Once = Once::new();

/// `RUST_LOG` when set, the profile default otherwise
fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber for `profile`.
///
/// Only the first call has any effect, and a subscriber installed earlier
/// (test capture, an embedding application) is left in place. Output goes
/// to stderr; stdout is reserved for reports.
///
/// ```
/// use expectdiff_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter(DEVELOPMENT_FILTER))
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter(PRODUCTION_FILTER))
                .finish()
                .try_init(),
            Profile::Silent => tracing_subscriber::registry().try_init(),
        };
        if installed.is_err() {
            tracing::debug!("global subscriber already set, keeping it");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(Profile::Silent);
        init(Profile::Silent);
        init(Profile::Production);
    }
}
