use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("json") => LogFormat::Json,
            Some("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            format: LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref()),
        }
    }

    /// Installs the global subscriber. Logs go to stderr; stdout carries
    /// command output.
    pub fn init(&self) -> anyhow::Result<()> {
        let filter = EnvFilter::try_new(&self.level)
            .unwrap_or_else(|_| EnvFilter::new("info"))
            .add_directive(
                "sqlx=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            );
        let registry = tracing_subscriber::registry().with(filter);

        match self.format {
            LogFormat::Json => registry
                .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
                .try_init()?,
            LogFormat::Pretty => registry
                .with(fmt::layer().with_target(true).with_writer(io::stderr))
                .try_init()?,
            LogFormat::Compact => registry
                .with(fmt::layer().compact().with_target(false).with_writer(io::stderr))
                .try_init()?,
        }

        Ok(())
    }
}
