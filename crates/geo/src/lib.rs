//! Delivery distance and shipping resolution for ShopFusion.
//!
//! This crate provides:
//! - Haversine distance calculations rounded for display and pricing
//! - A fixed registry of fulfillment locations (stores)
//! - A simulated geocoder with a rectangular service-area check
//! - Distance-tiered shipping quotes with a free-shipping threshold
//! - Nearest-store ranking with optional parallelism
//! - Address suggestions and validation for checkout input
//! - An end-to-end [`DeliveryResolver`] composing all of the above
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use shopfusion_geo::{distance_km, Coordinate};
//!
//! let pusat = Coordinate::new(-6.1944, 106.8229);
//! let selatan = Coordinate::new(-6.2088, 106.8456);
//!
//! let km = distance_km(&pusat, &selatan);
//! assert!((km - 2.98).abs() < 0.05);
//! ```

mod haversine;
mod error;
mod format;
mod geocode;
mod registry;
mod resolve;
mod settings;
mod shipping;
mod suggest;
mod validation;
pub mod ranking;

#[cfg(feature = "wasm")]
mod wasm;

pub use haversine::{distance_km, haversine_distance, round_km, EARTH_RADIUS_KM};
pub use error::{DeliveryError, DeliveryErrorCode, Result};
pub use format::{format_currency, format_distance};
pub use geocode::{AreaKeyword, Geocoder, ServiceArea, SimulatedGeocoder, JAKARTA_CENTER};
pub use registry::{FulfillmentLocation, LocationRegistry};
pub use ranking::{nearest_location, rank_locations, RankedLocation};
pub use resolve::{DeliveryResolution, DeliveryResolver, ResolvedDelivery};
pub use settings::DeliverySettings;
pub use shipping::{FulfillmentMethod, ShippingPolicy, ShippingQuote, ShippingTier};
pub use suggest::AddressSuggestionIndex;
pub use validation::{AddressValidation, AddressValidator};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
