use crate::error::MyResult;
use eyre::WrapErr;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// filter. On Windows every line is also sent to an attached debugger.
pub fn init_tracing() -> MyResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_target(false);
    let registry = tracing_subscriber::registry().with(filter).with(stderr);

    #[cfg(windows)]
    let registry = registry.with(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(|| crate::win32::DebugOutput),
    );

    registry
        .try_init()
        .wrap_err("installing tracing subscriber")?;
    Ok(())
}
