use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dashboard_core::settings::{app_dir, Settings};
use dashboard_runtime::session::DataSource;

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.consumption-dashboard/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.consumption-dashboard/`
/// - `~/.consumption-dashboard/logs/`
/// - `~/.consumption-dashboard/exports/`
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let dir = app_dir();
    std::fs::create_dir_all(dir.join("logs"))?;
    std::fs::create_dir_all(dir.join("exports"))?;
    Ok(dir)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a configured level name onto an [`EnvFilter`] directive.
fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber, appending to `log_file`.
///
/// The terminal belongs to the dashboard while it runs, so nothing is
/// written to stdout or stderr. `RUST_LOG` overrides the configured level.
pub fn setup_logging(log_level: &str, log_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("cannot open log file {}", log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level_directive(log_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("logging already initialised")?;

    Ok(())
}

// ── Data source ────────────────────────────────────────────────────────────────

/// The workspace file when `--data` is given, generated sample data
/// otherwise.
pub fn data_source(settings: &Settings) -> DataSource {
    match &settings.data {
        Some(path) => DataSource::File(path.clone()),
        None => DataSource::Sample {
            seed: settings.seed,
            days: settings.sample_days,
        },
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── test_ensure_directories ───────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        let dir = result.expect("ensure_directories should succeed");
        assert_eq!(dir, tmp.path().join(".consumption-dashboard"));
        assert!(dir.join("logs").is_dir(), "logs subdir must exist");
        assert!(dir.join("exports").is_dir(), "exports subdir must exist");
    }

    // ── test_level_directive ──────────────────────────────────────────────────

    #[test]
    fn test_level_directive_maps_names() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("trace"), "trace");
    }

    // ── test_data_source ──────────────────────────────────────────────────────

    #[test]
    fn test_data_source_defaults_to_sample() {
        let settings = Settings::load_from_args(["consumption-dashboard", "--seed", "7"]);
        assert_eq!(
            data_source(&settings),
            DataSource::Sample {
                seed: Some(7),
                days: settings.sample_days,
            }
        );
    }

    #[test]
    fn test_data_source_uses_data_file() {
        let settings =
            Settings::load_from_args(["consumption-dashboard", "--data", "/tmp/workspace.json"]);
        assert_eq!(
            data_source(&settings),
            DataSource::File(PathBuf::from("/tmp/workspace.json"))
        );
    }
}
