//! Heartwise terminal application.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use heartwise::tui::App;

const LOG_MODE_ENV: &str = "HEARTWISE_LOG_MODE";
const LOG_FILE_ENV: &str = "HEARTWISE_LOG_FILE";
const DEFAULT_LOG_FILE: &str = "heartwise.log";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LogTarget {
    File(PathBuf),
    Stdout,
}

impl LogTarget {
    /// Pick a target from `HEARTWISE_LOG_MODE`.
    ///
    /// `auto` (or anything unrecognised) logs to a file while the TUI owns the
    /// terminal and to stdout when output is piped.
    fn resolve(mode: Option<&str>, file: Option<String>, interactive: bool) -> Self {
        let to_file = match mode.map(str::trim) {
            Some("file") => true,
            Some("stdout") => false,
            _ => interactive,
        };

        if to_file {
            Self::File(PathBuf::from(
                file.unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            ))
        } else {
            Self::Stdout
        }
    }

    fn from_env() -> Self {
        let mode = std::env::var(LOG_MODE_ENV).ok();
        Self::resolve(
            mode.as_deref(),
            std::env::var(LOG_FILE_ENV).ok(),
            std::io::stdout().is_terminal(),
        )
    }
}

/// Install the global subscriber. The guard must outlive the app.
fn init_logging(target: &LogTarget) -> Result<WorkerGuard> {
    let (writer, guard) = match target {
        LogTarget::File(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating log directory {}", dir.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        }
        LogTarget::Stdout => tracing_appender::non_blocking(std::io::stdout()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let target = LogTarget::from_env();
    let _guard = init_logging(&target)?;

    tracing::info!("Heartwise starting (logs: {:?})", target);

    let mut app = App::new()?;
    app.run()?;

    tracing::info!("Heartwise exited cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follows_terminal() {
        assert_eq!(
            LogTarget::resolve(None, None, true),
            LogTarget::File(PathBuf::from(DEFAULT_LOG_FILE))
        );
        assert_eq!(LogTarget::resolve(Some("auto"), None, false), LogTarget::Stdout);
    }

    #[test]
    fn test_explicit_mode_wins() {
        assert_eq!(LogTarget::resolve(Some("stdout"), None, true), LogTarget::Stdout);
        assert_eq!(
            LogTarget::resolve(Some("file"), Some("/tmp/hw.log".into()), false),
            LogTarget::File(PathBuf::from("/tmp/hw.log"))
        );
    }
}
