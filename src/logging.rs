//! Native log output
//!
//! The simulation only talks to the `log` facade; hosts decide where it goes.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default filter: this crate at `level`, everything else at warn
fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("warn,star_siege={}", level.as_str().to_lowercase())
}

/// Route `log` records to stderr. `RUST_LOG` overrides the default filter.
///
/// Safe to call more than once; only the first call installs a logger.
pub fn init(verbose: bool) {
    let installed = Builder::from_env(Env::default().default_filter_or(default_filter(verbose)))
        .format_timestamp_millis()
        .try_init()
        .is_ok();
    if installed {
        log::debug!("Logger ready (verbose: {})", verbose);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_scopes_crate() {
        assert_eq!(default_filter(false), "warn,star_siege=info");
        assert_eq!(default_filter(true), "warn,star_siege=debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
