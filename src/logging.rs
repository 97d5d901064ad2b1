//! Logger setup for the binary and for hosts embedding the flight core.
//!
//! The core only talks to the `log` facade. Hosts that already install a
//! logger can skip this module entirely.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` wins when set. Otherwise flight messages are shown at debug
/// level when `verbose` is `true` and at info level when it is not.
pub fn init(verbose: bool) {
    let flight_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let default_filter = format!("warn,avatar_flight={flight_level}");
    let env = Env::default().default_filter_or(default_filter);
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set. Tests call this
    // repeatedly.
    if let Err(err) = builder.try_init() {
        log::debug!("keeping existing logger: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::quiet(false)]
    #[case::verbose(true)]
    fn init_is_repeatable(#[case] verbose: bool) {
        init(verbose);
        init(verbose);
        log::debug!("logger installed");
    }
}
