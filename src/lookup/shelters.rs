//! Nearby shelter lookup.

use std::time::Instant;

use log::info;

use crate::errors::LookupError;
use crate::location::LocationProvider;
use crate::models::ShelterRecord;
use crate::ranking::RankedCandidate;
use crate::store::{JsonStore, StoredRecord};

/// Collection shelters are seeded into.
pub const SHELTERS_COLLECTION: &str = "shelters";

/// Shelters within `radius_km` of the provider's position, closest
/// first. Occupancy is whatever the store holds; no availability filter
/// is applied here.
pub async fn find_nearby_shelters(
    store: &JsonStore,
    provider: &impl LocationProvider,
    radius_km: f64,
    limit: Option<usize>,
) -> Result<Vec<RankedCandidate<StoredRecord<ShelterRecord>>>, LookupError> {
    let origin = provider.request_location().await?;
    let start_time = Instant::now();
    let ranked =
        super::ranked_collection::<ShelterRecord>(store, SHELTERS_COLLECTION, origin, radius_km, limit)
            .await?;
    info!(
        "Shelters: {} within {} km of ({:.4}, {:.4}) in {:.2?}",
        ranked.len(),
        radius_km,
        origin.latitude,
        origin.longitude,
        start_time.elapsed()
    );
    Ok(ranked)
}
