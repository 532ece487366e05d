use tracing_subscriber::EnvFilter;

/// Workspace crate targets that receive log output.
const CRATE_TARGETS: &[&str] = &[
    "rainmap",
    "rainmap_classify",
    "rainmap_grid",
    "rainmap_idw",
    "rainmap_index",
    "rainmap_io",
    "rainmap_pipeline",
];

/// Maps `-v` occurrences to a level: none → warn, `-v` → info, `-vv` →
/// debug, `-vvv` and more → trace.
fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `EnvFilter` directives enabling `level(verbosity)` for every workspace
/// crate and nothing else.
fn default_directives(verbosity: u8) -> String {
    let level = level(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber, logging to stderr.
///
/// `RUST_LOG` replaces the verbosity-derived filter when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level(0), "warn");
        assert_eq!(level(1), "info");
        assert_eq!(level(2), "debug");
        assert_eq!(level(3), "trace");
        assert_eq!(level(9), "trace");
    }

    #[test]
    fn directives_cover_every_crate() {
        let d = default_directives(2);
        assert!(d.starts_with("rainmap=debug,"));
        assert!(d.contains("rainmap_pipeline=debug"));
        assert_eq!(d.split(',').count(), CRATE_TARGETS.len());
    }
}
