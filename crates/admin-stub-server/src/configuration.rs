use std::path::PathBuf;

use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(serde::Deserialize, Clone)]
pub struct Configuration {
    pub application: ApplicationSettings,
    pub seed: SeedSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

/// Account created when the store is seeded. It holds the superuser role
#[derive(serde::Deserialize, Clone)]
pub struct SeedSettings {
    pub admin_username: String,
    pub admin_password: SecretString,
}

/// Environment variable selecting the second configuration layer
pub const ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";

/// Reads `base.toml`, then the file of the selected [`Environment`], then
/// `APP_*` variables using `__` between nested keys (`APP_APPLICATION__PORT`)
pub fn get_configuration() -> Result<Configuration, config::ConfigError> {
    let dir = configuration_directory();
    let environment = match std::env::var(ENVIRONMENT_VAR) {
        Ok(name) => name.parse().map_err(config::ConfigError::Message)?,
        Err(_) => Environment::default(),
    };
    config::Config::builder()
        .add_source(config::File::from(dir.join("base.toml")))
        .add_source(config::File::from(dir.join(environment.file_name())))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

/// Uses `./configuration` if it exists, otherwise the folder shipped with this
/// crate. Tests of other crates start in their own crate root
fn configuration_directory() -> PathBuf {
    let local = std::env::current_dir()
        .map(|dir| dir.join("configuration"))
        .unwrap_or_default();
    if local.join("base.toml").exists() {
        local
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configuration")
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Local,
    Production,
}

impl Environment {
    fn file_name(self) -> &'static str {
        match self {
            Self::Local => "local.toml",
            Self::Production => "production.toml",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("local") {
            Ok(Self::Local)
        } else if s.eq_ignore_ascii_case("production") {
            Ok(Self::Production)
        } else {
            Err(format!("unknown environment {s:?}, expected local or production"))
        }
    }
}
