use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise the filter is `info`, or `debug` for
/// the horde crates when `verbose` is on.
pub fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default_filter = if verbose {
        "info,horde_sim=debug,horde_tactics=debug,horde_campaign=debug,horde_app=debug"
    } else {
        "info"
    };
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::Layer::new().with_writer(std::io::stderr).with_target(false));

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
