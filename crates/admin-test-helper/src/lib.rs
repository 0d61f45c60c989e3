#![warn(unused_crate_dependencies)]

use std::fmt::Debug;
use std::ops::Deref;
use std::sync::LazyLock;

use actix_web::web;
use admin_client_core::{Client, RecordingNotifier, RequestError, SessionStore};
use admin_shared::{
    id::DbId,
    req_args::LoginReqArgs,
    telemetry::{self, get_subscriber, init_subscriber},
    uac::{LoginResponse, Permissions, RoleDraft, UserDraft, UserStatus, Username},
};
use admin_stub_server::{
    get_configuration,
    startup::{build_runnable_api_server, get_socket_address},
    store::AdminStore,
    Configuration,
};
use anyhow::Context;
use secrecy::{ExposeSecret as _, SecretString};
use uuid::Uuid;

// Ensure that the `tracing` stack is only initialised once
pub static TRACING: LazyLock<String> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let log_file_name = format!("server_tests{}", Uuid::new_v4());
        let (file, path) = telemetry::create_trace_file(&log_file_name).unwrap();
        let subscriber = get_subscriber(subscriber_name, default_filter_level, file);
        init_subscriber(subscriber).unwrap();
        format!("Traces for tests being written to: {path:?}")
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).unwrap();
        "Traces set to std::io::sink".to_string()
    }
});

/// A running stub server plus a client pointed at it
pub struct TestApp {
    pub address: String,
    pub store: web::Data<AdminStore>,
    pub admin_user: TestUser,
    pub test_user: TestUser,
    pub core_client: Client,
    pub notifier: RecordingNotifier,
}

impl Debug for TestApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestApp")
            .field("address", &self.address)
            .field("test_user", &self.test_user)
            .finish()
    }
}

/// Starts a freshly seeded server on a random port in the background
pub async fn spawn_app() -> TestApp {
    start_tracing();
    let configuration = get_randomized_configuration();
    let store = web::Data::new(
        AdminStore::seeded(&configuration.seed).expect("failed to seed the store"),
    );
    let addr = get_socket_address(&configuration.application).expect("invalid socket address");
    let (server, port) =
        build_runnable_api_server(addr, store.clone()).expect("failed to build the server");
    // The task runs until the test's runtime is shut down
    tokio::spawn(server.run());

    let address = port_to_test_address(port);
    let (core_client, notifier) = build_client(&address);
    let admin_user = TestUser {
        username: configuration.seed.admin_username.clone(),
        password: configuration.seed.admin_password.expose_secret().to_string(),
    };
    let test_user = TestUser::generate("normal");
    test_user.store(&store, vec![]);

    TestApp {
        address,
        store,
        admin_user,
        test_user,
        core_client,
        notifier,
    }
}

pub fn port_to_test_address(application_port: u16) -> String {
    format!("http://127.0.0.1:{application_port}")
}

/// Client with its own in memory session and a notifier to inspect
pub fn build_client(address: &str) -> (Client, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let client =
        Client::new(address.to_string(), SessionStore::in_memory()).with_notifier(notifier.clone());
    (client, notifier)
}

/// Randomise configuration to ensure test isolation
fn get_randomized_configuration() -> Configuration {
    let mut c = get_configuration().expect("failed to read configuration");
    // Use a random OS port
    c.application.port = 0;
    c.application.host = "127.0.0.1".to_string();
    c
}

fn start_tracing() {
    // Accessing TRACING also forces the LazyLock to initialize
    let logging_msg = TRACING.deref();
    println!("{logging_msg}");
}

impl TestApp {
    pub async fn login(&self) -> Result<LoginResponse, RequestError> {
        self.core_client.login(self.test_user.login_args()).await
    }

    pub async fn login_admin(&self) -> Result<LoginResponse, RequestError> {
        self.core_client.login(self.admin_user.login_args()).await
    }

    pub async fn login_assert(&self) {
        assert!(self.login().await.is_ok(), "login failed");
    }

    pub async fn login_admin_assert(&self) {
        assert!(self.login_admin().await.is_ok(), "admin login failed");
    }

    pub async fn logout_assert(&self) {
        self.core_client
            .logout()
            .await
            .expect("logout should succeed");
        assert!(!self.core_client.is_logged_in());
    }

    /// Creates a user holding a fresh role with exactly `permissions`
    pub fn create_user_with_permissions(&self, permissions: &[&str]) -> TestUser {
        let key = format!("role-{}", &Uuid::new_v4().to_string()[..8]);
        let role = self
            .store
            .create_role(RoleDraft {
                name: key.clone().try_into().unwrap(),
                key: key.try_into().unwrap(),
                description: Default::default(),
                permissions: permissions.iter().collect::<Permissions>(),
            })
            .expect("failed to store test role");
        let result = TestUser::generate("perm");
        result.store(&self.store, vec![role.id]);
        result
    }

    /// Another client against the same server, with its own session
    pub fn new_client(&self) -> (Client, RecordingNotifier) {
        build_client(&self.address)
    }
}

#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub password: String,
}

impl TestUser {
    pub fn generate(username_prefix: &str) -> Self {
        let remaining_length = Username::MAX_LENGTH - username_prefix.len() - 1;
        let username = format!(
            "{username_prefix}-{}",
            &Uuid::new_v4().to_string()[..remaining_length]
        );
        Self {
            username,
            password: Uuid::new_v4().to_string(),
        }
    }

    pub fn login_args(&self) -> LoginReqArgs {
        LoginReqArgs::new(
            self.username.clone(),
            SecretString::from(self.password.clone()),
        )
    }

    pub fn store(&self, store: &AdminStore, role_ids: Vec<DbId>) -> DbId {
        store
            .create_user(
                UserDraft {
                    username: self.username.clone().try_into().unwrap(),
                    display_name: "Test User".try_into().unwrap(),
                    email: None,
                    phone: None,
                    status: UserStatus::Enabled,
                    role_ids,
                },
                SecretString::from(self.password.clone()),
            )
            .context("failed to store test user")
            .unwrap()
            .id
    }

    /// Id of the user in `store`
    pub fn id(&self, store: &AdminStore) -> DbId {
        let (users, _) = store.list_users(&Default::default());
        users
            .into_iter()
            .find(|x| x.username.as_ref() == self.username)
            .expect("test user not stored")
            .id
    }
}
