//! Nearby-help lookups: thin adapters from named store collections to
//! the distance ranker, one module per candidate source, coordinated by
//! [`manager`] for the combined query.

pub mod manager;
pub mod organizations;
pub mod shelters;
pub mod volunteers;

pub use manager::{find_nearby_help, NearbyHelp, NearbyHelpKind};
pub use organizations::find_nearby_organizations;
pub use shelters::find_nearby_shelters;
pub use volunteers::find_nearby_volunteers;

use log::debug;
use serde::de::DeserializeOwned;

use crate::errors::LookupError;
use crate::models::{Coordinate, Locatable};
use crate::ranking::{rank, RankedCandidate};
use crate::store::{JsonStore, StoredRecord};

/// Loads a collection off the blocking pool so independent reads can
/// run concurrently.
pub(crate) async fn load_collection<T>(
    store: &JsonStore,
    collection: &str,
) -> Result<Vec<StoredRecord<T>>, LookupError>
where
    T: DeserializeOwned + Send + 'static,
{
    let store = store.clone();
    let name = collection.to_string();
    tokio::task::spawn_blocking(move || store.list::<T>(&name))
        .await
        .map_err(|e| LookupError::Task(e.to_string()))?
        .map_err(LookupError::from)
}

/// Reads a collection and ranks it against `origin`.
pub(crate) async fn ranked_collection<T>(
    store: &JsonStore,
    collection: &str,
    origin: Coordinate,
    radius_km: f64,
    limit: Option<usize>,
) -> Result<Vec<RankedCandidate<StoredRecord<T>>>, LookupError>
where
    T: DeserializeOwned + Locatable + Send + 'static,
{
    let candidates = load_collection::<T>(store, collection).await?;
    let total = candidates.len();
    let ranked = rank(origin, candidates, radius_km, limit)?;
    debug!(
        "Lookup: '{}' has {} candidates, {} within {} km",
        collection,
        total,
        ranked.len(),
        radius_km
    );
    Ok(ranked)
}

/// Fallback listing for when no origin could be acquired: stored order,
/// no distances. Callers should prefer the ranked path.
pub async fn list_unranked<T>(
    store: &JsonStore,
    collection: &str,
    limit: Option<usize>,
) -> Result<Vec<StoredRecord<T>>, LookupError>
where
    T: DeserializeOwned + Send + 'static,
{
    let mut records = load_collection::<T>(store, collection).await?;
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    Ok(records)
}
