//! Runtime configuration for the coordination services.

use std::env;
use std::path::PathBuf;

use log::{debug, info};

/// Radius applied to volunteer/organization lookups when none is given.
pub const DEFAULT_HELP_RADIUS_KM: f64 = 15.0;

/// Radius applied to shelter lookups when none is given. Shelters are
/// only useful within walking or short-drive range.
pub const DEFAULT_SHELTER_RADIUS_KM: f64 = 10.0;

/// Maximum entries a ranked listing shows by default.
pub const DEFAULT_RESULT_LIMIT: usize = 5;

const DEFAULT_STORE_ROOT: &str = ".sanrakshak";

/// Environment-driven settings, with sane defaults for a fresh checkout.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub store_root: PathBuf,
    pub help_radius_km: f64,
    pub shelter_radius_km: f64,
    pub result_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store_root: PathBuf::from(DEFAULT_STORE_ROOT),
            help_radius_km: DEFAULT_HELP_RADIUS_KM,
            shelter_radius_km: DEFAULT_SHELTER_RADIUS_KM,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let store_root = env::var("STORE_ROOT")
            .map(PathBuf::from)
            .unwrap_or(defaults.store_root);
        let help_radius_km = parse_var("HELP_RADIUS_KM", defaults.help_radius_km);
        let shelter_radius_km = parse_var("SHELTER_RADIUS_KM", defaults.shelter_radius_km);
        let result_limit = parse_var("RESULT_LIMIT", defaults.result_limit);

        let config = Self {
            store_root,
            help_radius_km,
            shelter_radius_km,
            result_limit,
        };
        debug!("Service config: {:?}", config);
        config
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        info!("Store root: {}", self.store_root.display());
        info!(
            "Lookup defaults: help radius {} km, shelter radius {} km, limit {}",
            self.help_radius_km, self.shelter_radius_km, self.result_limit
        );
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env mutations cannot interleave across threads.
    #[test]
    fn test_config_from_env() {
        env::remove_var("HELP_RADIUS_KM");
        env::remove_var("SHELTER_RADIUS_KM");
        env::remove_var("RESULT_LIMIT");

        let config = ServiceConfig::from_env();
        assert_eq!(config.help_radius_km, DEFAULT_HELP_RADIUS_KM);
        assert_eq!(config.shelter_radius_km, DEFAULT_SHELTER_RADIUS_KM);
        assert_eq!(config.result_limit, DEFAULT_RESULT_LIMIT);

        env::set_var("HELP_RADIUS_KM", "25.5");
        env::set_var("RESULT_LIMIT", "not-a-number");

        let config = ServiceConfig::from_env();
        assert_eq!(config.help_radius_km, 25.5);
        assert_eq!(config.result_limit, DEFAULT_RESULT_LIMIT);

        // Cleanup
        env::remove_var("HELP_RADIUS_KM");
        env::remove_var("RESULT_LIMIT");
    }
}
