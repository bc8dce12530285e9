use std::env;

use config::builder::DefaultState;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

pub type Builder = config::ConfigBuilder<DefaultState>;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub hashing: HashingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_minutes: i64,
}

impl JwtConfig {
    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.expiration_minutes)
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

/// Argon2id cost parameters used for new hashes.
#[derive(Debug, Deserialize, Clone)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `JWT_SECRET`, `DATABASE_URL` and `PORT`
    /// 2. Environment variables (DATABASE__URL, JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = Self::with_defaults(ConfigBuilder::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Self::environment())
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option(
                "server.http_port",
                env::var("PORT").ok().and_then(|p| p.parse::<i64>().ok()),
            )?;

        Self::build(builder)
    }

    /// `SECTION__KEY` variables, e.g. `DATABASE__URL=postgres://...` overrides database.url
    pub fn environment() -> Environment {
        Environment::default().separator("__").try_parsing(true)
    }

    /// Defaults for everything except secrets and the database location.
    pub fn with_defaults(builder: Builder) -> Result<Builder, ConfigError> {
        builder
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 3000)?
            .set_default(
                "jwt.expiration_minutes",
                auth::jwt::DEFAULT_TOKEN_LIFETIME_MINUTES,
            )?
            .set_default("hashing.memory_kib", 19 * 1024)?
            .set_default("hashing.iterations", 2)?
            .set_default("hashing.parallelism", 1)
    }

    pub fn build(builder: Builder) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;
    use config::Map;

    use super::*;

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        let builder = Config::with_defaults(ConfigBuilder::builder())?
            .add_source(File::from_str(toml, FileFormat::Toml));
        Config::build(builder)
    }

    #[test]
    fn test_defaults_applied() {
        let config = from_toml(
            r#"
            [database]
            url = "postgres://localhost/auth"

            [jwt]
            secret = "s3cret"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.http_port, 3000);
        assert_eq!(config.jwt.expiration_minutes, 15);
        assert_eq!(config.jwt.lifetime(), chrono::Duration::minutes(15));
        assert_eq!(config.hashing.memory_kib, 19 * 1024);
        assert_eq!(config.hashing.iterations, 2);
        assert_eq!(config.hashing.parallelism, 1);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = from_toml(
            r#"
            [database]
            url = "postgres://localhost/auth"
            max_connections = 20

            [server]
            http_port = 8080

            [jwt]
            secret = "s3cret"
            expiration_minutes = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.jwt.expiration_minutes, 5);
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let result = from_toml(
            r#"
            [database]
            url = "postgres://localhost/auth"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let vars: Map<String, String> = [
            ("DATABASE__URL", "postgres://env-host/auth"),
            ("JWT__SECRET", "env-secret"),
            ("JWT__EXPIRATION_MINUTES", "30"),
            ("HASHING__MEMORY_KIB", "4096"),
            ("SERVER__HTTP_PORT", "9090"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let builder = Config::with_defaults(ConfigBuilder::builder())
            .unwrap()
            .add_source(Config::environment().source(Some(vars)));
        let config = Config::build(builder).unwrap();

        assert_eq!(config.database.url, "postgres://env-host/auth");
        assert_eq!(config.jwt.secret, "env-secret");
        assert_eq!(config.jwt.expiration_minutes, 30);
        assert_eq!(config.hashing.memory_kib, 4096);
        assert_eq!(config.server.http_port, 9090);
        assert_eq!(config.hashing.iterations, 2);
    }

    #[test]
    fn test_environment_overrides_file() {
        let vars: Map<String, String> =
            [("HASHING__ITERATIONS".to_string(), "4".to_string())].into_iter().collect();

        let builder = Config::with_defaults(ConfigBuilder::builder())
            .unwrap()
            .add_source(File::from_str(
                r#"
                [database]
                url = "postgres://localhost/auth"

                [jwt]
                secret = "s3cret"

                [hashing]
                iterations = 3
                "#,
                FileFormat::Toml,
            ))
            .add_source(Config::environment().source(Some(vars)));
        let config = Config::build(builder).unwrap();

        assert_eq!(config.hashing.iterations, 4);
    }

    #[test]
    fn test_secret_redacted_in_debug() {
        let jwt = JwtConfig {
            secret: "s3cret".to_string(),
            expiration_minutes: 15,
        };

        assert!(!format!("{:?}", jwt).contains("s3cret"));
    }
}
