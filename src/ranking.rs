//! Great-circle distance ranking for relief candidates.
//!
//! Pure, synchronous computation: callers hand in an origin and a batch
//! of candidates, and get back the ones inside the radius, closest
//! first. Nothing here touches storage or the network.

use serde::Serialize;

use crate::errors::InvalidInputError;
use crate::models::{Coordinate, Locatable};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A candidate annotated with its distance from the query origin.
/// Ephemeral: recomputed per query, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate<T> {
    pub candidate: T,
    /// Kilometers from the origin, rounded to two decimal places.
    pub distance_km: f64,
}

/// Haversine great-circle distance between two coordinates, in
/// kilometers. Inputs are unchecked degrees; out-of-range values yield
/// a meaningless but finite result rather than a panic.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = ((d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Ranks `candidates` by distance from `origin`, dropping anything
/// farther than `radius_km`. The sort is stable: candidates at equal
/// distance keep their input order. `limit` truncates after sorting.
///
/// An empty result is not an error; a negative radius is.
pub fn rank<T: Locatable>(
    origin: Coordinate,
    candidates: impl IntoIterator<Item = T>,
    radius_km: f64,
    limit: Option<usize>,
) -> Result<Vec<RankedCandidate<T>>, InvalidInputError> {
    if radius_km < 0.0 {
        return Err(InvalidInputError::NegativeRadius(radius_km));
    }

    let mut ranked: Vec<RankedCandidate<T>> = candidates
        .into_iter()
        .map(|candidate| {
            let distance_km = round_km(distance_km(origin, candidate.coordinate()));
            RankedCandidate {
                candidate,
                distance_km,
            }
        })
        .filter(|entry| entry.distance_km <= radius_km)
        .collect();

    // Vec::sort_by is stable, which is what keeps tied candidates in
    // submission order.
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    Ok(ranked)
}

/// Rounds to two decimal places so the same query always displays the
/// same distance.
fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW_DELHI: Coordinate = Coordinate {
        latitude: 28.6139,
        longitude: 77.2090,
    };
    const NORTH_DELHI: Coordinate = Coordinate {
        latitude: 28.7041,
        longitude: 77.1025,
    };

    #[derive(Debug, Clone, PartialEq)]
    struct Pin {
        label: &'static str,
        at: Coordinate,
    }

    impl Locatable for Pin {
        fn coordinate(&self) -> Coordinate {
            self.at
        }
    }

    fn pin(label: &'static str, latitude: f64, longitude: f64) -> Pin {
        Pin {
            label,
            at: Coordinate::new(latitude, longitude),
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let d1 = distance_km(NEW_DELHI, NORTH_DELHI);
        let d2 = distance_km(NORTH_DELHI, NEW_DELHI);
        assert!((d1 - d2).abs() < 1e-6);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance_km(NEW_DELHI, NEW_DELHI), 0.0);
        let antimeridian = Coordinate::new(-41.3, 179.99);
        assert_eq!(distance_km(antimeridian, antimeridian), 0.0);
    }

    #[test]
    fn test_known_delhi_distance() {
        // North Delhi pin sits about 14.44 km from Connaught Place.
        let d = distance_km(NEW_DELHI, NORTH_DELHI);
        assert!((d - 14.44).abs() < 0.1, "got {}", d);
    }

    #[test]
    fn test_out_of_range_degrees_do_not_panic() {
        let bogus = Coordinate::new(1234.5, -9876.1);
        let d = distance_km(NEW_DELHI, bogus);
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }

    #[test]
    fn test_rank_filters_by_radius() {
        let candidates = vec![pin("north", 28.7041, 77.1025)];

        // ~14.44 km away: inside a 15 km radius...
        let within = rank(NEW_DELHI, candidates.clone(), 15.0, None).unwrap();
        assert_eq!(within.len(), 1);
        assert!((within[0].distance_km - 14.44).abs() < 0.1);
        assert!(within[0].distance_km <= 15.0);

        // ...but outside a 10 km one.
        let outside = rank(NEW_DELHI, candidates, 10.0, None).unwrap();
        assert!(outside.is_empty());
    }

    #[test]
    fn test_rank_sorts_ascending() {
        let candidates = vec![
            pin("far", 28.7041, 77.1025),
            pin("near", 28.6304, 77.2177),
            pin("mid", 28.6484, 77.3051),
        ];

        let ranked = rank(NEW_DELHI, candidates, 50.0, None).unwrap();
        let labels: Vec<_> = ranked.iter().map(|r| r.candidate.label).collect();
        assert_eq!(labels, vec!["near", "mid", "far"]);
        for pair in ranked.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        // Same coordinate, so identical distance; submission order wins.
        let candidates = vec![pin("x", 28.6484, 77.3051), pin("y", 28.6484, 77.3051)];

        let ranked = rank(NEW_DELHI, candidates, 50.0, None).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate.label, "x");
        assert_eq!(ranked[1].candidate.label, "y");
    }

    #[test]
    fn test_rank_limit_is_prefix_of_unlimited() {
        let candidates = vec![
            pin("a", 28.7041, 77.1025),
            pin("b", 28.6304, 77.2177),
            pin("c", 28.6484, 77.3051),
            pin("d", 28.5198, 77.2182),
        ];

        let unlimited = rank(NEW_DELHI, candidates.clone(), 50.0, None).unwrap();
        let limited = rank(NEW_DELHI, candidates, 50.0, Some(2)).unwrap();
        assert_eq!(limited.len(), 2);
        for (l, u) in limited.iter().zip(unlimited.iter()) {
            assert_eq!(l.candidate, u.candidate);
            assert_eq!(l.distance_km, u.distance_km);
        }
    }

    #[test]
    fn test_rank_limit_larger_than_result_is_harmless() {
        let candidates = vec![pin("only", 28.6304, 77.2177)];
        let ranked = rank(NEW_DELHI, candidates, 50.0, Some(10)).unwrap();
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_rank_empty_input_yields_empty_output() {
        let ranked = rank(NEW_DELHI, Vec::<Pin>::new(), 15.0, None).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_negative_radius_is_rejected() {
        let candidates = vec![pin("near", 28.6304, 77.2177)];
        let err = rank(NEW_DELHI, candidates, -1.0, None).unwrap_err();
        assert_eq!(err, InvalidInputError::NegativeRadius(-1.0));
    }

    #[test]
    fn test_rank_zero_radius_keeps_colocated_candidates() {
        let candidates = vec![pin("here", 28.6139, 77.2090), pin("away", 28.7041, 77.1025)];
        let ranked = rank(NEW_DELHI, candidates, 0.0, None).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].candidate.label, "here");
        assert_eq!(ranked[0].distance_km, 0.0);
    }

    #[test]
    fn test_distances_round_to_two_decimals() {
        let ranked = rank(NEW_DELHI, vec![pin("north", 28.7041, 77.1025)], 50.0, None).unwrap();
        let d = ranked[0].distance_km;
        assert_eq!(d, (d * 100.0).round() / 100.0);
    }
}
