//! Address geocoding and service-area checks.
//!
//! The [`SimulatedGeocoder`] stands in for a real geocoding API. It looks the
//! address up in an ordered keyword table of known areas and jitters the
//! area's coordinate to approximate street-level precision. Addresses that
//! match no keyword fall back to the region's center with a wider jitter.

use crate::Coordinate;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Center of the Jakarta service region, used when no area keyword matches.
pub const JAKARTA_CENTER: Coordinate = Coordinate::new(-6.2088, 106.8456);

/// Jitter applied around a matched area, in degrees.
pub const MATCHED_JITTER_DEG: f64 = 0.005;

/// Jitter applied around the fallback center, in degrees.
pub const FALLBACK_JITTER_DEG: f64 = 0.05;

/// Resolves free-text addresses to coordinates.
///
/// Geocoding never fails: implementations fall back to an approximate
/// coordinate when the address is not recognized.
pub trait Geocoder: Send + Sync {
    /// Resolve an address to an approximate coordinate.
    fn geocode(&self, address: &str) -> impl Future<Output = Coordinate> + Send;
}

/// A keyword and the approximate coordinate of the area it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaKeyword {
    /// Lowercase substring searched for in the address
    pub keyword: String,
    /// Approximate area center
    pub coordinate: Coordinate,
}

impl AreaKeyword {
    /// Creates a new table entry. The keyword is lowercased.
    pub fn new(keyword: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            coordinate,
        }
    }
}

/// Known Jakarta areas in match priority order.
///
/// District names come before neighbourhoods so that an address naming both
/// resolves to the district.
pub(crate) fn jakarta_areas() -> Vec<AreaKeyword> {
    [
        ("jakarta pusat", -6.1944, 106.8229),
        ("jakarta selatan", -6.2088, 106.8456),
        ("jakarta barat", -6.1888, 106.7378),
        ("jakarta utara", -6.1588, 106.9056),
        ("jakarta timur", -6.1744, 106.9497),
        ("menteng", -6.1944, 106.8229),
        ("kebayoran", -6.2297, 106.7834),
        ("kelapa gading", -6.1588, 106.9056),
        ("puri indah", -6.1888, 106.7378),
        ("cakung", -6.1744, 106.9497),
        ("thamrin", -6.1944, 106.8229),
        ("sudirman", -6.2088, 106.8456),
        ("senayan", -6.2297, 106.7834),
        ("kemang", -6.2615, 106.8106),
        ("pondok indah", -6.2615, 106.7834),
    ]
    .into_iter()
    .map(|(keyword, lat, lng)| AreaKeyword::new(keyword, Coordinate::new(lat, lng)))
    .collect()
}

/// Keyword-table geocoder with randomized jitter.
///
/// The random source is owned by the geocoder and guarded by a mutex, so a
/// single instance can serve concurrent requests while each call still gets
/// its own draw. Inject a seeded generator for reproducible output.
#[derive(Debug)]
pub struct SimulatedGeocoder<R = StdRng> {
    areas: Vec<AreaKeyword>,
    default_center: Coordinate,
    matched_jitter: f64,
    fallback_jitter: f64,
    latency: Duration,
    rng: Mutex<R>,
}

impl SimulatedGeocoder<StdRng> {
    /// Jakarta geocoder seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Jakarta geocoder with a deterministic seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for SimulatedGeocoder<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + Send> SimulatedGeocoder<R> {
    /// Jakarta geocoder drawing jitter from the given generator.
    pub fn with_rng(rng: R) -> Self {
        Self {
            areas: jakarta_areas(),
            default_center: JAKARTA_CENTER,
            matched_jitter: MATCHED_JITTER_DEG,
            fallback_jitter: FALLBACK_JITTER_DEG,
            latency: Duration::ZERO,
            rng: Mutex::new(rng),
        }
    }

    /// Replace the keyword table. Entries are matched in the given order.
    #[must_use]
    pub fn areas(mut self, areas: Vec<AreaKeyword>) -> Self {
        self.areas = areas
            .into_iter()
            .map(|area| AreaKeyword::new(area.keyword, area.coordinate))
            .collect();
        self
    }

    /// Set the fallback center for unrecognized addresses.
    #[must_use]
    pub fn default_center(mut self, center: Coordinate) -> Self {
        self.default_center = center;
        self
    }

    /// Set the jitter half-widths, in degrees, for matched and fallback lookups.
    #[must_use]
    pub fn jitter(mut self, matched: f64, fallback: f64) -> Self {
        self.matched_jitter = matched.max(0.0);
        self.fallback_jitter = fallback.max(0.0);
        self
    }

    /// Simulated round-trip latency of the lookup.
    #[must_use]
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The keyword table in match order.
    pub fn area_table(&self) -> &[AreaKeyword] {
        &self.areas
    }

    /// Finds the first area whose keyword occurs in the address.
    pub fn match_area(&self, address: &str) -> Option<&AreaKeyword> {
        let normalized = address.to_lowercase();
        self.areas
            .iter()
            .find(|area| normalized.contains(area.keyword.as_str()))
    }

    /// Synchronous lookup without the simulated latency.
    pub fn locate(&self, address: &str) -> Coordinate {
        let (base, spread) = match self.match_area(address) {
            Some(area) => {
                tracing::debug!(keyword = %area.keyword, "Geocoder matched area keyword");
                (area.coordinate, self.matched_jitter)
            }
            None => {
                tracing::debug!("Geocoder fell back to region center");
                (self.default_center, self.fallback_jitter)
            }
        };

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Coordinate::new(
            base.latitude + draw_offset(&mut *rng, spread),
            base.longitude + draw_offset(&mut *rng, spread),
        )
    }
}

impl<R: RngCore + Send> Geocoder for SimulatedGeocoder<R> {
    async fn geocode(&self, address: &str) -> Coordinate {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.locate(address)
    }
}

/// Uniform offset in `[-spread, spread)`.
#[inline]
fn draw_offset<R: Rng>(rng: &mut R, spread: f64) -> f64 {
    if spread > 0.0 {
        rng.gen_range(-spread..spread)
    } else {
        0.0
    }
}

/// Rectangular bounding box of the supported delivery region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceArea {
    /// Northern latitude bound
    pub north: f64,
    /// Southern latitude bound
    pub south: f64,
    /// Eastern longitude bound
    pub east: f64,
    /// Western longitude bound
    pub west: f64,
}

impl ServiceArea {
    /// Jakarta and its immediate surroundings.
    pub const JAKARTA: ServiceArea = ServiceArea {
        north: -5.9,
        south: -6.5,
        east: 107.2,
        west: 106.5,
    };

    /// Returns true if the coordinate lies inside the box, bounds included.
    #[inline]
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        coordinate.latitude >= self.south
            && coordinate.latitude <= self.north
            && coordinate.longitude >= self.west
            && coordinate.longitude <= self.east
    }

    /// Returns true if south ≤ north and west ≤ east.
    pub fn is_well_formed(&self) -> bool {
        self.south <= self.north && self.west <= self.east
    }
}

impl Default for ServiceArea {
    fn default() -> Self {
        Self::JAKARTA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(actual: Coordinate, base: Coordinate, spread: f64) -> bool {
        (actual.latitude - base.latitude).abs() <= spread
            && (actual.longitude - base.longitude).abs() <= spread
    }

    #[test]
    fn test_matched_address_stays_near_area() {
        let geocoder = SimulatedGeocoder::with_seed(7);
        for _ in 0..200 {
            let coord = geocoder.locate("Jl. Kemang Raya No. 5, Jakarta");
            assert!(within(coord, Coordinate::new(-6.2615, 106.8106), MATCHED_JITTER_DEG));
        }
    }

    #[test]
    fn test_unknown_address_falls_back_to_center() {
        let geocoder = SimulatedGeocoder::with_seed(7);
        assert!(geocoder.match_area("Jl. Antah Berantah").is_none());
        for _ in 0..200 {
            let coord = geocoder.locate("Jl. Antah Berantah");
            assert!(within(coord, JAKARTA_CENTER, FALLBACK_JITTER_DEG));
        }
    }

    #[test]
    fn test_keyword_priority_follows_table_order() {
        let geocoder = SimulatedGeocoder::with_seed(1);
        // Mentions both a district and a neighbourhood; the district is listed first.
        let area = geocoder.match_area("Jl. Kemang, Jakarta Selatan").unwrap();
        assert_eq!(area.keyword, "jakarta selatan");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let geocoder = SimulatedGeocoder::with_seed(1);
        let area = geocoder.match_area("JL. THAMRIN NO. 1").unwrap();
        assert_eq!(area.keyword, "thamrin");
    }

    #[test]
    fn test_same_seed_same_coordinates() {
        let a = SimulatedGeocoder::with_seed(42);
        let b = SimulatedGeocoder::with_seed(42);
        assert_eq!(a.locate("Jl. Sudirman"), b.locate("Jl. Sudirman"));
    }

    #[test]
    fn test_zero_jitter_is_exact() {
        let geocoder = SimulatedGeocoder::with_seed(3).jitter(0.0, 0.0);
        assert_eq!(geocoder.locate("Senayan"), Coordinate::new(-6.2297, 106.7834));
        assert_eq!(geocoder.locate("nowhere"), JAKARTA_CENTER);
    }

    #[test]
    fn test_custom_area_table() {
        let bogor = Coordinate::new(-6.5971, 106.8060);
        let geocoder = SimulatedGeocoder::with_seed(3)
            .areas(vec![AreaKeyword::new("Bogor", bogor)])
            .jitter(0.0, 0.0);
        assert_eq!(geocoder.area_table()[0].keyword, "bogor");
        assert_eq!(geocoder.locate("Jl. Pajajaran, bogor"), bogor);
    }

    #[tokio::test]
    async fn test_geocode_applies_latency() {
        let geocoder = SimulatedGeocoder::with_seed(5)
            .jitter(0.0, 0.0)
            .latency(Duration::from_millis(5));
        let coord = geocoder.geocode("Kebayoran Baru").await;
        assert_eq!(coord, Coordinate::new(-6.2297, 106.7834));
    }

    #[test]
    fn test_service_area_bounds() {
        let area = ServiceArea::JAKARTA;
        assert!(area.contains(&Coordinate::new(-6.2088, 106.8456)));
        // Surabaya
        assert!(!area.contains(&Coordinate::new(-7.2574, 112.7521)));
        // Bandung
        assert!(!area.contains(&Coordinate::new(-6.9175, 107.6191)));
        // Edges are inclusive
        assert!(area.contains(&Coordinate::new(-5.9, 106.5)));
        assert!(area.contains(&Coordinate::new(-6.5, 107.2)));
        assert!(!area.contains(&Coordinate::new(-6.5001, 107.0)));
    }

    #[test]
    fn test_fallback_always_in_service_area() {
        let geocoder = SimulatedGeocoder::with_seed(11);
        for _ in 0..500 {
            assert!(ServiceArea::JAKARTA.contains(&geocoder.locate("unknown street")));
        }
    }
}
