use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config`, `database` and
/// `axum-helpers` libraries
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    /// Collection holding task documents (`MONGODB_TASKS_COLLECTION`)
    pub tasks_collection: String,
    pub jwt: JwtConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let tasks_collection = env_or_default(
            "MONGODB_TASKS_COLLECTION",
            domain_tasks::mongodb::DEFAULT_COLLECTION,
        );
        let jwt = JwtConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            tasks_collection,
            jwt,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "tasks-api-config-secret-32-characters";

    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("tasks_db")),
                ("MONGODB_TASKS_COLLECTION", None),
                ("JWT_SECRET", Some(SECRET)),
                ("PORT", None),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "tasks_api");
                assert_eq!(config.tasks_collection, "tasks");
                assert_eq!(config.mongodb.database(), "tasks_db");
                assert_eq!(config.server.port, 8080);
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_config_custom_collection() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("tasks_db")),
                ("MONGODB_TASKS_COLLECTION", Some("todo_items")),
                ("JWT_SECRET", Some(SECRET)),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.tasks_collection, "todo_items");
            },
        );
    }

    #[test]
    fn test_config_requires_jwt_secret() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://localhost:27017")),
                ("MONGODB_DATABASE", Some("tasks_db")),
                ("JWT_SECRET", None),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_SECRET"));
            },
        );
    }
}
