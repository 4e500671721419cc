//! Origin acquisition for proximity queries.
//!
//! The ranking path never asks the platform for a position itself; it
//! takes whichever [`LocationProvider`] the caller hands in. Providers
//! are pluggable so the CLI, the environment, and tests can each supply
//! their own.

use std::env;

use log::debug;

use crate::errors::LocationError;
use crate::models::Coordinate;

/// Asynchronous source of the coordinate a query is ranked against.
pub trait LocationProvider {
    async fn request_location(&self) -> Result<Coordinate, LocationError>;
}

/// A coordinate supplied up front (e.g. CLI `--lat`/`--lon` flags).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl LocationProvider for FixedLocation {
    async fn request_location(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Reads the origin from `ORIGIN_LATITUDE` / `ORIGIN_LONGITUDE`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLocation;

impl EnvLocation {
    const LAT_VAR: &'static str = "ORIGIN_LATITUDE";
    const LON_VAR: &'static str = "ORIGIN_LONGITUDE";

    fn read_var(name: &str) -> Result<f64, LocationError> {
        let raw = env::var(name)
            .map_err(|_| LocationError::Unavailable(format!("{} is not set", name)))?;
        raw.trim()
            .parse::<f64>()
            .map_err(|_| LocationError::Unavailable(format!("{} is not a number: '{}'", name, raw)))
    }
}

impl LocationProvider for EnvLocation {
    async fn request_location(&self) -> Result<Coordinate, LocationError> {
        let latitude = Self::read_var(Self::LAT_VAR)?;
        let longitude = Self::read_var(Self::LON_VAR)?;
        let origin = Coordinate::new(latitude, longitude);
        debug!(
            "Location: resolved origin ({:.4}, {:.4}) from environment",
            origin.latitude, origin.longitude
        );
        Ok(origin)
    }
}

/// A provider whose permission request always fails. Stands in for a
/// user declining the platform's location prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocation;

impl LocationProvider for DeniedLocation {
    async fn request_location(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_location_resolves() {
        let provider = FixedLocation(Coordinate::new(28.6139, 77.2090));
        let origin = provider.request_location().await.unwrap();
        assert_eq!(origin.latitude, 28.6139);
        assert_eq!(origin.longitude, 77.2090);
    }

    #[tokio::test]
    async fn test_denied_location_reports_permission() {
        let err = DeniedLocation.request_location().await.unwrap_err();
        assert!(matches!(err, LocationError::PermissionDenied));
    }

    #[tokio::test]
    async fn test_env_location_reads_and_validates() {
        env::set_var(EnvLocation::LAT_VAR, "28.6139");
        env::set_var(EnvLocation::LON_VAR, "77.2090");
        let origin = EnvLocation.request_location().await.unwrap();
        assert_eq!(origin.latitude, 28.6139);
        assert_eq!(origin.longitude, 77.2090);

        env::set_var(EnvLocation::LON_VAR, "not-a-number");
        let err = EnvLocation.request_location().await.unwrap_err();
        assert!(matches!(err, LocationError::Unavailable(_)));

        env::remove_var(EnvLocation::LAT_VAR);
        env::remove_var(EnvLocation::LON_VAR);
        let err = EnvLocation.request_location().await.unwrap_err();
        assert!(matches!(err, LocationError::Unavailable(_)));
    }
}
