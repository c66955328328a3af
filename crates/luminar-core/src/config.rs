use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so it
/// can be tested with a plain `HashMap` lookup — no `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("LUMINAR_ENV", "development"));
    let bind_addr = parse_addr("LUMINAR_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("LUMINAR_LOG_LEVEL", "info");
    let inventory_path = lookup("LUMINAR_INVENTORY_PATH").ok().map(PathBuf::from);
    let geocoder_base_url = or_default(
        "LUMINAR_GEOCODER_BASE_URL",
        "https://nominatim.openstreetmap.org",
    );
    let image_base_url = lookup("LUMINAR_IMAGE_BASE_URL").ok();
    let http_timeout_secs = parse_u64("LUMINAR_HTTP_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("LUMINAR_USER_AGENT", "luminar/0.1 (street-light inventory)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        inventory_path,
        geocoder_base_url,
        image_base_url,
        http_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_succeeds_with_empty_environment() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults suffice");
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.inventory_path.is_none());
        assert_eq!(cfg.geocoder_base_url, "https://nominatim.openstreetmap.org");
        assert!(cfg.image_base_url.is_none());
        assert_eq!(cfg.http_timeout_secs, 10);
        assert_eq!(cfg.user_agent, "luminar/0.1 (street-light inventory)");
    }

    #[test]
    fn build_app_config_reads_inventory_path() {
        let mut map = HashMap::new();
        map.insert("LUMINAR_INVENTORY_PATH", "/srv/data/luminarias.csv");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(
            cfg.inventory_path.as_deref(),
            Some(std::path::Path::new("/srv/data/luminarias.csv"))
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = HashMap::new();
        map.insert("LUMINAR_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LUMINAR_BIND_ADDR"),
            "expected InvalidEnvVar(LUMINAR_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("LUMINAR_HTTP_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LUMINAR_HTTP_TIMEOUT_SECS"),
            "expected InvalidEnvVar(LUMINAR_HTTP_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_overrides_geocoder_base_url() {
        let mut map = HashMap::new();
        map.insert("LUMINAR_GEOCODER_BASE_URL", "http://localhost:8080");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.geocoder_base_url, "http://localhost:8080");
    }
}
