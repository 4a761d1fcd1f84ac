use clap::Parser;
use std::path::{Path, PathBuf};

/// Name of the per-user application directory under `$HOME`.
pub const APP_DIR_NAME: &str = ".consumption-dashboard";

/// Number of days of sample data generated when no data file is given.
pub const DEFAULT_SAMPLE_DAYS: u32 = 120;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Consumption and billing dashboard for AI, OCR and workflow usage
#[derive(Parser, Debug, Clone)]
#[command(
    name = "consumption-dashboard",
    about = "Consumption and billing dashboard for AI, OCR and workflow usage",
    version
)]
pub struct Settings {
    /// Workspace JSON file (client, plan and daily records); sample data when omitted
    #[arg(long, env = "CONSUMPTION_DASHBOARD_DATA")]
    pub data: Option<PathBuf>,

    /// Timezone used to decide calendar days (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Directory CSV exports are written to
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Seed for the sample data generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Days of sample data to generate, ending today (1-3650)
    #[arg(long, default_value_t = DEFAULT_SAMPLE_DAYS, value_parser = clap::value_parser!(u32).range(1..=3650))]
    pub sample_days: u32,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path (defaults to ~/.consumption-dashboard/logs/dashboard.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments and resolve `"auto"` values.
    pub fn load() -> Self {
        Self::resolve_auto_values(Settings::parse())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve_auto_values(Settings::parse_from(args))
    }

    /// Resolve `"auto"` sentinel values and apply the `--debug` flag.
    fn resolve_auto_values(mut settings: Settings) -> Settings {
        if settings.timezone == "auto" {
            settings.timezone = crate::time_utils::get_system_timezone();
        }

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }

    /// Export directory, defaulting to `~/.consumption-dashboard/exports`.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| app_dir().join("exports"))
    }

    /// Log file, defaulting to `~/.consumption-dashboard/logs/dashboard.log`.
    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| app_dir().join("logs").join("dashboard.log"))
    }
}

/// The per-user application directory, `~/.consumption-dashboard`.
pub fn app_dir() -> PathBuf {
    app_dir_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
}

/// The application directory rooted at `base_dir` (used for testing).
pub fn app_dir_in(base_dir: &Path) -> PathBuf {
    base_dir.join(APP_DIR_NAME)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
