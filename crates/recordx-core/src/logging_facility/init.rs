//! Subscriber installation

use std::io;
use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Output style of the global subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug detail from the recordx crates
    Development,
    /// One JSON object per event, info and above
    Production,
    /// No output layer; tests use `init_test_capture`
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    pub fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "recordx=debug",
            Profile::Production => "recordx=info",
            Profile::Test => "recordx=trace",
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

static INIT: Once = Once::new();

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has any effect. Output goes to stderr so
/// it never mixes with command feedback on stdout. If another global
/// subscriber is already installed it is left in place.
pub fn init(profile: Profile) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry();
        let installed = match profile {
            Profile::Development => registry
                .with(profile.filter())
                .with(fmt::layer().with_writer(io::stderr).with_target(false))
                .try_init(),
            Profile::Production => registry
                .with(profile.filter())
                .with(fmt::layer().json().with_writer(io::stderr))
                .try_init(),
            Profile::Test => registry.try_init(),
        };
        if installed.is_err() {
            tracing::debug!(?profile, "global subscriber already set");
        }
    });
}
