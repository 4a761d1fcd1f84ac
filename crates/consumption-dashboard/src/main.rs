mod bootstrap;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_core::time_utils::TimezoneHandler;
use dashboard_runtime::session::DashboardSession;
use dashboard_ui::app::{restore_terminal, App};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, &settings.log_file())?;

    tracing::info!(
        "Consumption Dashboard v{} starting",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!(
        "Timezone: {}, Theme: {}, Export dir: {}",
        settings.timezone,
        settings.theme,
        settings.export_dir().display()
    );

    let timezone = TimezoneHandler::new(&settings.timezone);
    let source = bootstrap::data_source(&settings);
    let description = source.describe();

    let session = DashboardSession::new(source, timezone.now())
        .with_context(|| format!("failed to load consumption data from {}", description))?;

    let app = App::new(&settings.theme, timezone, session, settings.export_dir());

    // The loop exits on 'q' / Ctrl+C inside the TUI. An OS-level Ctrl+C
    // (raw mode not yet active, or a signal from outside) also ends it.
    tokio::select! {
        result = app.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down");
            restore_terminal()?;
        }
    }

    tracing::info!("Consumption Dashboard stopped");
    Ok(())
}
