use super::parsing::{
    env_flag, env_number, env_optional, env_or_default, parse_cors_origins, parse_environment,
};
use super::secret::load_or_create_secret_key;
use super::types::{
    AdminSettings, ApiSettings, ConfigError, CorsSettings, DatabaseSettings, ListingSettings,
    RedisSettings, RuntimeSettings, SecuritySettings, ServerHost, ServerPort, ServerSettings,
    Settings, TelemetrySettings,
};

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("SIDANG_HOST", "0.0.0.0");
        let port = env_or_default("SIDANG_PORT", "8000");

        let environment =
            parse_environment(env_optional("SIDANG_ENV").or_else(|| env_optional("ENVIRONMENT")));
        let strict_config = env_flag("SIDANG_STRICT_CONFIG") || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "Sidang API");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        let secret_key = match env_optional("SECRET_KEY") {
            Some(value) => value,
            None => load_or_create_secret_key(),
        };
        let algorithm = env_or_default("ALGORITHM", "HS256");

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let postgres_server = env_or_default("POSTGRES_SERVER", "localhost");
        let postgres_port = env_number("POSTGRES_PORT", 5432_u16)?;
        let postgres_user = env_or_default("POSTGRES_USER", "sidang");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "sidang_db");
        let database_url = env_optional("DATABASE_URL");
        let max_connections = env_number("DB_MAX_CONNECTIONS", 20_u32)?;

        let redis_host = env_or_default("REDIS_HOST", "localhost");
        let redis_port = env_number("REDIS_PORT", 6379_u16)?;
        let redis_db = env_number("REDIS_DB", 0_u16)?;
        let redis_password = env_or_default("REDIS_PASSWORD", "");
        let revalidate_channel = env_or_default("REVALIDATE_CHANNEL", "sidang:revalidate");

        let dashboard_size = env_number("DASHBOARD_SIZE", 5_i64)?;
        let notification_preview_size = env_number("NOTIFICATION_PREVIEW_SIZE", 7_i64)?;
        let default_page_size = env_number("DEFAULT_PAGE_SIZE", 10_i64)?;
        let max_page_size = env_number("MAX_PAGE_SIZE", 100_i64)?;

        let first_admin_id_number = env_or_default("FIRST_ADMIN_ID_NUMBER", "");
        let first_admin_name = env_or_default("FIRST_ADMIN_NAME", "Department Admin");

        let log_level = env_or_default("SIDANG_LOG_LEVEL", "info");
        let json = env_flag("SIDANG_LOG_JSON");
        let prometheus_enabled = env_flag("PROMETHEUS_ENABLED");

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version, api_v1_str },
            security: SecuritySettings { secret_key, algorithm },
            cors: CorsSettings { origins: cors_origins },
            database: DatabaseSettings {
                postgres_server,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db,
                database_url,
                max_connections,
            },
            redis: RedisSettings {
                host: redis_host,
                port: redis_port,
                db: redis_db,
                password: redis_password,
                revalidate_channel,
            },
            listing: ListingSettings {
                dashboard_size,
                notification_preview_size,
                default_page_size,
                max_page_size,
            },
            admin: AdminSettings { first_admin_id_number, first_admin_name },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn security(&self) -> &SecuritySettings {
        &self.security
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn redis(&self) -> &RedisSettings {
        &self.redis
    }

    pub(crate) fn listing(&self) -> &ListingSettings {
        &self.listing
    }

    pub(crate) fn admin(&self) -> &AdminSettings {
        &self.admin
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let listing = &self.listing;
        if listing.dashboard_size < 1 {
            return Err(ConfigError::InvalidValue {
                field: "DASHBOARD_SIZE",
                value: listing.dashboard_size.to_string(),
            });
        }
        if listing.notification_preview_size < 1 {
            return Err(ConfigError::InvalidValue {
                field: "NOTIFICATION_PREVIEW_SIZE",
                value: listing.notification_preview_size.to_string(),
            });
        }
        if listing.max_page_size < 1 {
            return Err(ConfigError::InvalidValue {
                field: "MAX_PAGE_SIZE",
                value: listing.max_page_size.to_string(),
            });
        }
        if listing.default_page_size < 1 || listing.default_page_size > listing.max_page_size {
            return Err(ConfigError::InvalidValue {
                field: "DEFAULT_PAGE_SIZE",
                value: listing.default_page_size.to_string(),
            });
        }

        if self.security.algorithm != "HS256" {
            return Err(ConfigError::InvalidValue {
                field: "ALGORITHM",
                value: self.security.algorithm.clone(),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }
        if std::env::var("SECRET_KEY").map(|value| value.trim().is_empty()).unwrap_or(true) {
            return Err(ConfigError::MissingSecret("SECRET_KEY"));
        }

        Ok(())
    }
}
