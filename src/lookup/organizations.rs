//! Nearby organization lookup.

use std::time::Instant;

use log::info;

use crate::errors::LookupError;
use crate::location::LocationProvider;
use crate::models::OrganizationRecord;
use crate::ranking::RankedCandidate;
use crate::store::{JsonStore, StoredRecord};

/// Collection the registration flow appends organizations to.
pub const ORGANIZATIONS_COLLECTION: &str = "organizations";

/// Organizations within `radius_km` of the provider's position, closest
/// first.
pub async fn find_nearby_organizations(
    store: &JsonStore,
    provider: &impl LocationProvider,
    radius_km: f64,
    limit: Option<usize>,
) -> Result<Vec<RankedCandidate<StoredRecord<OrganizationRecord>>>, LookupError> {
    let origin = provider.request_location().await?;
    let start_time = Instant::now();
    let ranked = super::ranked_collection::<OrganizationRecord>(
        store,
        ORGANIZATIONS_COLLECTION,
        origin,
        radius_km,
        limit,
    )
    .await?;
    info!(
        "Organizations: {} within {} km of ({:.4}, {:.4}) in {:.2?}",
        ranked.len(),
        radius_km,
        origin.latitude,
        origin.longitude,
        start_time.elapsed()
    );
    Ok(ranked)
}
