use std::{
    net::{SocketAddr, TcpListener},
    str::FromStr,
};

use actix_web::{middleware::from_fn, web, App, HttpServer};
use admin_shared::telemetry;
use anyhow::Context as _;
use tracing::{info, instrument};
use tracing_actix_web::TracingLogger;

use crate::{
    authentication::validate_user_access,
    routes::{
        dict_item_create, dict_item_delete, dict_item_update, dict_items, dict_types_list,
        health_check, log_delete, log_out, login, logs_clear, logs_list, menu_create, menu_delete,
        menu_tree, menu_update, not_found, role_create, role_delete, role_permissions,
        role_update, roles_list, user, user_create, user_delete, user_info, user_password_reset,
        user_status, user_update, users_list,
    },
    store::AdminStore,
    ApiError, ApplicationSettings,
};

pub struct RunnableApiServer(actix_web::dev::Server);

/// Initializes Tracing
pub fn initialize_tracing<Sink, D, N>(
    subscriber_name: N,
    default_env_filter_directive: D,
    sink: Sink,
) -> anyhow::Result<()>
where
    Sink: for<'b> tracing_subscriber::fmt::MakeWriter<'b> + Send + Sync + 'static,
    D: AsRef<str>,
    N: Into<String>,
{
    let subscriber =
        telemetry::get_subscriber(subscriber_name.into(), default_env_filter_directive, sink);
    telemetry::init_subscriber(subscriber).context("failed to initialize the subscriber")
}

/// Binds to `addr` and prepares the server. Returns the server and the port it
/// bound to (useful when `addr` uses port 0)
#[instrument(err(Debug), skip_all)]
pub fn build_runnable_api_server(
    addr: SocketAddr,
    store: web::Data<AdminStore>,
) -> anyhow::Result<(RunnableApiServer, u16)> {
    let listener = TcpListener::bind(addr)
        .with_context(|| format!("failed to bind to address: {}", addr))?;
    let port = listener
        .local_addr()
        .context("failed to get local address of listener")?
        .port();
    info!(?port, "Port assigned to the server is {port}");

    let server = HttpServer::new(move || {
        let json_config = web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());
        App::new()
            .wrap(TracingLogger::default())
            .app_data(store.clone())
            .app_data(json_config)
            .route("/health_check", web::get().to(health_check))
            .route("/api/auth/login", web::post().to(login))
            .service(
                web::scope("/api")
                    .wrap(from_fn(validate_user_access))
                    .route("/auth/logout", web::post().to(log_out))
                    .route("/auth/info", web::get().to(user_info))
                    .service(
                        web::scope("/system")
                            .route("/users", web::get().to(users_list))
                            .route("/users", web::post().to(user_create))
                            .route("/users/{id}", web::get().to(user))
                            .route("/users/{id}", web::put().to(user_update))
                            .route("/users/{id}", web::delete().to(user_delete))
                            .route("/users/{id}/password", web::put().to(user_password_reset))
                            .route("/users/{id}/status", web::put().to(user_status))
                            .route("/roles", web::get().to(roles_list))
                            .route("/roles", web::post().to(role_create))
                            .route("/roles/{id}", web::put().to(role_update))
                            .route("/roles/{id}", web::delete().to(role_delete))
                            .route("/roles/{id}/permissions", web::put().to(role_permissions))
                            .route("/menus/tree", web::get().to(menu_tree))
                            .route("/menus", web::post().to(menu_create))
                            .route("/menus/{id}", web::put().to(menu_update))
                            .route("/menus/{id}", web::delete().to(menu_delete))
                            .route("/dicts", web::get().to(dict_types_list))
                            .route("/dicts/items", web::post().to(dict_item_create))
                            .route("/dicts/items/{id}", web::put().to(dict_item_update))
                            .route("/dicts/items/{id}", web::delete().to(dict_item_delete))
                            .route("/dicts/{code}/items", web::get().to(dict_items))
                            .route("/logs", web::get().to(logs_list))
                            .route("/logs", web::delete().to(logs_clear))
                            .route("/logs/{id}", web::delete().to(log_delete)),
                    ),
            )
            .default_service(web::route().to(not_found))
    })
    .listen(listener)
    .context("Failed to bind HTTP Server to listener")?
    .run();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        "API Server prepared to be run"
    );
    Ok((RunnableApiServer(server), port))
}

impl RunnableApiServer {
    pub async fn run(self) -> anyhow::Result<()> {
        self.0.await.context("api server crashed")
    }
}

pub fn get_socket_address(app_config: &ApplicationSettings) -> anyhow::Result<SocketAddr> {
    let address = format!("{}:{}", app_config.host, app_config.port);
    info!("Socket address to parse is: {address}");
    let result = SocketAddr::from_str(&address)
        .with_context(|| format!("failed to parse address: {address}"))?;
    Ok(result)
}
