use actix_web::web;
use admin_shared::telemetry;
use admin_stub_server::{
    get_configuration,
    startup::{build_runnable_api_server, get_socket_address, initialize_tracing},
    store::AdminStore,
};
use anyhow::Context;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (file, path) = telemetry::create_trace_file("admin-stub-server")
        .context("failed to create file for traces")?;
    initialize_tracing("admin_stub_server", "info", file)?;
    println!("Traces being written to: {path:?}");

    let configuration = get_configuration().context("failed to read configuration")?;
    let store = web::Data::new(
        AdminStore::seeded(&configuration.seed).context("failed to seed the store")?,
    );
    let addr = get_socket_address(&configuration.application)
        .context("failed to get socket address")?;
    let (server, port) = build_runnable_api_server(addr, store)?;
    println!("Listening on port {port}");

    match server.run().await {
        Ok(()) => info!("API Server has exited with Ok(())"),
        Err(e) => {
            error!(
                error.cause_chain = ?e,
                error.message = %e,
                "API Server resulted in an error: {e}"
            );
            return Err(e);
        }
    }
    Ok(())
}
