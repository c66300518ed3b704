use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Installs the global subscriber. `RUST_LOG` wins over `verbose` when set.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(build_filter(verbose, rust_log.as_deref()))
        .init();
}

fn build_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let directives = match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ if verbose => "warn,xconv=debug",
        _ => "off",
    };
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("off"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_rust_log_wins_over_quiet_default() {
        let filter = build_filter(false, Some("xconv=debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_verbose_without_rust_log() {
        assert_eq!(
            build_filter(true, None).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            build_filter(true, Some("  ")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_quiet_by_default() {
        assert_eq!(
            build_filter(false, None).max_level_hint(),
            Some(LevelFilter::OFF)
        );
    }
}
