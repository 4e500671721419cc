//! Coordinates the combined nearby-help query across the volunteer and
//! organization collections.

use std::time::Instant;

use log::info;

use crate::errors::LookupError;
use crate::location::LocationProvider;
use crate::models::{OrganizationRecord, VolunteerRecord};
use crate::ranking::RankedCandidate;
use crate::store::{JsonStore, StoredRecord};

use super::organizations::ORGANIZATIONS_COLLECTION;
use super::volunteers::VOLUNTEERS_COLLECTION;

/// Which candidate sources a combined query should consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearbyHelpKind {
    All,
    Volunteers,
    Organizations,
}

/// Result of a combined nearby-help query. Sources the query did not
/// ask for stay empty.
#[derive(Debug, Default)]
pub struct NearbyHelp {
    pub volunteers: Vec<RankedCandidate<StoredRecord<VolunteerRecord>>>,
    pub organizations: Vec<RankedCandidate<StoredRecord<OrganizationRecord>>>,
}

impl NearbyHelp {
    pub fn total(&self) -> usize {
        self.volunteers.len() + self.organizations.len()
    }
}

/// Main entry point for the combined query: resolves the origin once,
/// then ranks the requested collections against it. For
/// [`NearbyHelpKind::All`] the two collection reads are independent and
/// run concurrently; each collection is ranked separately.
pub async fn find_nearby_help(
    store: &JsonStore,
    provider: &impl LocationProvider,
    kind: NearbyHelpKind,
    radius_km: f64,
    limit: Option<usize>,
) -> Result<NearbyHelp, LookupError> {
    let origin = provider.request_location().await?;
    let start_time = Instant::now();

    let mut result = NearbyHelp::default();
    match kind {
        NearbyHelpKind::Volunteers => {
            result.volunteers = super::ranked_collection::<VolunteerRecord>(
                store,
                VOLUNTEERS_COLLECTION,
                origin,
                radius_km,
                limit,
            )
            .await?;
        }
        NearbyHelpKind::Organizations => {
            result.organizations = super::ranked_collection::<OrganizationRecord>(
                store,
                ORGANIZATIONS_COLLECTION,
                origin,
                radius_km,
                limit,
            )
            .await?;
        }
        NearbyHelpKind::All => {
            let (volunteers, organizations) = futures::try_join!(
                super::ranked_collection::<VolunteerRecord>(
                    store,
                    VOLUNTEERS_COLLECTION,
                    origin,
                    radius_km,
                    limit,
                ),
                super::ranked_collection::<OrganizationRecord>(
                    store,
                    ORGANIZATIONS_COLLECTION,
                    origin,
                    radius_km,
                    limit,
                ),
            )?;
            result.volunteers = volunteers;
            result.organizations = organizations;
        }
    }

    info!(
        "Nearby help: {} volunteers, {} organizations within {} km of ({:.4}, {:.4}) in {:.2?}",
        result.volunteers.len(),
        result.organizations.len(),
        radius_km,
        origin.latitude,
        origin.longitude,
        start_time.elapsed()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LocationError;
    use crate::location::{DeniedLocation, FixedLocation};
    use crate::lookup::{find_nearby_shelters, list_unranked};
    use crate::models::Coordinate;
    use crate::seed::seed_store;
    use uuid::Uuid;

    const NEW_DELHI: Coordinate = Coordinate {
        latitude: 28.6139,
        longitude: 77.2090,
    };

    fn seeded_store() -> JsonStore {
        let root = std::env::temp_dir().join(format!("sanrakshak-lookup-test-{}", Uuid::new_v4()));
        let store = JsonStore::open(root).unwrap();
        seed_store(&store).unwrap();
        store
    }

    #[tokio::test]
    async fn test_combined_query_ranks_both_collections() {
        let store = seeded_store();
        let provider = FixedLocation(NEW_DELHI);

        let help = find_nearby_help(&store, &provider, NearbyHelpKind::All, 15.0, None)
            .await
            .unwrap();

        // All five seeded volunteers sit within 15 km; one seeded
        // organization is farther out.
        assert_eq!(help.volunteers.len(), 5);
        assert_eq!(help.organizations.len(), 4);
        assert_eq!(help.total(), 9);

        for list_sorted in [
            help.volunteers
                .iter()
                .map(|r| r.distance_km)
                .collect::<Vec<_>>(),
            help.organizations
                .iter()
                .map(|r| r.distance_km)
                .collect::<Vec<_>>(),
        ] {
            for pair in list_sorted.windows(2) {
                assert!(pair[0] <= pair[1]);
            }
            for d in list_sorted {
                assert!(d <= 15.0);
            }
        }

        // The first seeded volunteer is pinned at the origin itself.
        assert_eq!(help.volunteers[0].candidate.record.name, "Rahul Sharma");
        assert_eq!(help.volunteers[0].distance_km, 0.0);
    }

    #[tokio::test]
    async fn test_tighter_radius_shrinks_results() {
        let store = seeded_store();
        let provider = FixedLocation(NEW_DELHI);

        let help = find_nearby_help(&store, &provider, NearbyHelpKind::All, 10.0, None)
            .await
            .unwrap();
        assert_eq!(help.volunteers.len(), 2);
        assert_eq!(help.organizations.len(), 3);
    }

    #[tokio::test]
    async fn test_limit_truncates_each_collection() {
        let store = seeded_store();
        let provider = FixedLocation(NEW_DELHI);

        let unlimited = find_nearby_help(&store, &provider, NearbyHelpKind::All, 15.0, None)
            .await
            .unwrap();
        let limited = find_nearby_help(&store, &provider, NearbyHelpKind::All, 15.0, Some(2))
            .await
            .unwrap();

        assert_eq!(limited.volunteers.len(), 2);
        assert_eq!(limited.organizations.len(), 2);
        for (l, u) in limited.volunteers.iter().zip(unlimited.volunteers.iter()) {
            assert_eq!(l.candidate.id, u.candidate.id);
        }
    }

    #[tokio::test]
    async fn test_single_kind_leaves_other_source_empty() {
        let store = seeded_store();
        let provider = FixedLocation(NEW_DELHI);

        let help = find_nearby_help(&store, &provider, NearbyHelpKind::Volunteers, 15.0, None)
            .await
            .unwrap();
        assert_eq!(help.volunteers.len(), 5);
        assert!(help.organizations.is_empty());
    }

    #[tokio::test]
    async fn test_denied_location_surfaces_as_location_error() {
        let store = seeded_store();

        let err = find_nearby_help(&store, &DeniedLocation, NearbyHelpKind::All, 15.0, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LookupError::Location(LocationError::PermissionDenied)
        ));
    }

    #[tokio::test]
    async fn test_unranked_fallback_keeps_stored_order() {
        let store = seeded_store();

        let volunteers: Vec<StoredRecord<VolunteerRecord>> =
            list_unranked(&store, VOLUNTEERS_COLLECTION, Some(3)).await.unwrap();
        assert_eq!(volunteers.len(), 3);
        assert_eq!(volunteers[0].record.name, "Rahul Sharma");
        assert_eq!(volunteers[1].record.name, "Priya Patel");
    }

    #[tokio::test]
    async fn test_single_collection_adapters_match_combined_query() {
        let store = seeded_store();
        let provider = FixedLocation(NEW_DELHI);

        let volunteers =
            crate::lookup::find_nearby_volunteers(&store, &provider, 15.0, None)
                .await
                .unwrap();
        let organizations =
            crate::lookup::find_nearby_organizations(&store, &provider, 15.0, None)
                .await
                .unwrap();
        let combined = find_nearby_help(&store, &provider, NearbyHelpKind::All, 15.0, None)
            .await
            .unwrap();

        assert_eq!(volunteers.len(), combined.volunteers.len());
        assert_eq!(organizations.len(), combined.organizations.len());
        for (a, c) in volunteers.iter().zip(combined.volunteers.iter()) {
            assert_eq!(a.candidate.id, c.candidate.id);
            assert_eq!(a.distance_km, c.distance_km);
        }
    }

    #[tokio::test]
    async fn test_shelter_lookup_uses_own_radius() {
        let store = seeded_store();
        let provider = FixedLocation(NEW_DELHI);

        let shelters = find_nearby_shelters(&store, &provider, 10.0, None)
            .await
            .unwrap();
        assert_eq!(shelters.len(), 2);
        assert_eq!(shelters[0].candidate.record.name, "Central Community Center");
        assert_eq!(shelters[0].distance_km, 0.0);
    }
}
