//! Logging setup for the binary

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug,reqwest=info,hyper_util=info"
    } else {
        "info"
    }
}

/// Initialize the `tracing` subscriber once; log lines go to stderr so command
/// output stays clean
pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_err() {
        // Safety: single-threaded at startup
        unsafe {
            std::env::set_var("RUST_LOG", default_filter());
        }
    }

    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
        return;
    }
    tracing::debug!(
        "Logging initialized ({})",
        std::env::var("RUST_LOG").unwrap_or_default()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(default_filter()).is_ok());
    }
}
