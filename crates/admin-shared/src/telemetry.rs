//! Tracing setup shared by the stub server binary and the integration tests.
//! Spans and events are written as bunyan formatted json lines

use std::{
    fs::{self, File},
    path::PathBuf,
};

use anyhow::Context as _;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt as _, EnvFilter, Registry};

use crate::const_config::telemetry::TELEMETRY_TRACES_DIR;

/// Builds the subscriber without installing it.
///
/// `RUST_LOG` takes precedence over `fallback_directive` when it is set
pub fn get_subscriber<N, D, W>(
    name: N,
    fallback_directive: D,
    writer: W,
) -> impl Subscriber + Send + Sync
where
    N: Into<String>,
    D: AsRef<str>,
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_directive));
    Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name.into(), writer))
}

/// Installs `subscriber` for the whole process and forwards `log` records to
/// it. Fails if called a second time
pub fn init_subscriber<S>(subscriber: S) -> anyhow::Result<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    tracing_log::LogTracer::init().context("log records are already being captured")?;
    tracing::subscriber::set_global_default(subscriber)
        .context("a global subscriber is already installed")
}

/// Creates `traces/<timestamp>_<app_name>.log` and returns the open file with
/// its path
pub fn create_trace_file(app_name: &str) -> anyhow::Result<(File, PathBuf)> {
    let dir = PathBuf::from(TELEMETRY_TRACES_DIR);
    fs::create_dir_all(&dir).with_context(|| format!("unable to create {dir:?}"))?;
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("{stamp}_{app_name}.log"));
    let file = File::create(&path).with_context(|| format!("unable to create {path:?}"))?;
    Ok((file, path))
}
