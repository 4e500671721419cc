//! Error types shared across the coordination services.
//!
//! Library seams return typed errors so callers can branch on them;
//! the binary wraps everything in `anyhow` at the top level.

use thiserror::Error;

/// Malformed ranking parameters. Terminal for the request; never retried.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidInputError {
    #[error("radius must be non-negative, got {0} km")]
    NegativeRadius(f64),
}

/// Failures while acquiring the query origin.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Failures in the JSON document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid collection name '{0}'")]
    InvalidName(String),

    #[error("failed to initialize store root '{path}'")]
    Init {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read collection '{collection}'")]
    Read {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write collection '{collection}'")]
    Write {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    #[error("collection '{collection}' holds malformed JSON")]
    Malformed {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures in the mock credential flow.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no account registered for {0}")]
    UserNotFound(String),

    #[error("signup requires a non-empty email, password, and name")]
    InvalidSignup,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Union of the failures a nearby-lookup call can surface. The location
/// case is kept distinguishable so callers can fall back to an unranked
/// listing instead of failing the whole query.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("lookup task failed: {0}")]
    Task(String),
}
