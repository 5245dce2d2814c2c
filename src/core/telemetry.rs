use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::Settings;

/// `RUST_LOG` wins over the configured level. Spans are logged when they close.
pub(crate) fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let telemetry = settings.telemetry();
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&telemetry.log_level)?,
    };

    let output = fmt::layer().with_target(false).with_span_events(FmtSpan::CLOSE);
    let registry = tracing_subscriber::registry().with(filter);

    if telemetry.json {
        registry.with(output.json()).try_init()?;
    } else {
        registry.with(output).try_init()?;
    }
    Ok(())
}
