//! Nearest-store ranking with optional parallelism.
//!
//! Distances from a customer coordinate are computed for every registered
//! store and sorted ascending. The sort is stable, so stores at equal
//! distance keep their registry order.

use crate::{distance_km, Coordinate, DeliveryError, FulfillmentLocation, LocationRegistry, Result};
use serde::{Deserialize, Serialize};

/// A store together with its distance from a query coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLocation {
    /// The store
    #[serde(flatten)]
    pub location: FulfillmentLocation,
    /// Distance in kilometers, rounded to 2 decimals
    pub distance_km: f64,
}

/// Rank every store in the registry by distance from `origin`.
///
/// # Example
/// ```
/// use shopfusion_geo::{rank_locations, Coordinate, LocationRegistry};
///
/// let registry = LocationRegistry::jakarta();
/// let ranked = rank_locations(&registry, &Coordinate::new(-6.2000, 106.8300));
///
/// assert_eq!(ranked.len(), 5);
/// assert_eq!(ranked[0].location.id, "store-1");
/// ```
pub fn rank_locations(registry: &LocationRegistry, origin: &Coordinate) -> Vec<RankedLocation> {
    let stores = registry.all();

    #[cfg(feature = "parallel")]
    let mut ranked: Vec<RankedLocation> = {
        use rayon::prelude::*;
        stores
            .par_iter()
            .map(|store| measure(origin, store))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let mut ranked: Vec<RankedLocation> = stores
        .iter()
        .map(|store| measure(origin, store))
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    tracing::debug!(
        stores = ranked.len(),
        nearest_km = ranked.first().map(|r| r.distance_km),
        "Ranked fulfillment locations"
    );

    ranked
}

/// The closest store to `origin`.
///
/// Fails only when the registry is empty, which is a configuration error.
pub fn nearest_location(registry: &LocationRegistry, origin: &Coordinate) -> Result<RankedLocation> {
    rank_locations(registry, origin)
        .into_iter()
        .next()
        .ok_or_else(DeliveryError::empty_registry)
}

#[inline]
fn measure(origin: &Coordinate, store: &FulfillmentLocation) -> RankedLocation {
    RankedLocation {
        location: store.clone(),
        distance_km: distance_km(origin, &store.coordinate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_ascending() {
        let registry = LocationRegistry::jakarta();
        let ranked = rank_locations(&registry, &Coordinate::new(-6.2000, 106.8300));

        assert_eq!(ranked.len(), 5);
        for window in ranked.windows(2) {
            assert!(window[0].distance_km <= window[1].distance_km);
        }
        assert_eq!(ranked[0].location.id, "store-1");
        assert_eq!(ranked[0].distance_km, 1.0);
        assert_eq!(ranked[1].location.id, "store-2");
    }

    #[test]
    fn test_nearest_matches_first_ranked() {
        let registry = LocationRegistry::jakarta();
        let origin = Coordinate::new(-6.1600, 106.9000);
        let nearest = nearest_location(&registry, &origin).unwrap();
        assert_eq!(nearest.location.id, "store-4");
        assert_eq!(nearest, rank_locations(&registry, &origin)[0]);
    }

    #[test]
    fn test_ties_keep_registry_order() {
        let spot = Coordinate::new(-6.2, 106.8);
        let registry = LocationRegistry::new(vec![
            FulfillmentLocation::new("b", "B", "Jl. B", spot, "1"),
            FulfillmentLocation::new("a", "A", "Jl. A", spot, "2"),
            FulfillmentLocation::new("c", "C", "Jl. C", spot, "3"),
        ])
        .unwrap();

        let ids: Vec<_> = rank_locations(&registry, &Coordinate::new(-6.3, 106.9))
            .into_iter()
            .map(|r| r.location.id)
            .collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_ranking_is_repeatable() {
        let registry = LocationRegistry::jakarta();
        let origin = Coordinate::new(-6.25, 106.80);
        assert_eq!(rank_locations(&registry, &origin), rank_locations(&registry, &origin));
    }

    #[test]
    fn test_empty_registry_is_configuration_error() {
        let registry = LocationRegistry::new(Vec::new()).unwrap();
        let err = nearest_location(&registry, &Coordinate::new(-6.2, 106.8)).unwrap_err();
        assert!(err.is_fatal());
    }
}
