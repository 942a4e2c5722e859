//! Fulfillment location registry.

use crate::{Coordinate, DeliveryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A store that can ship orders or serve pickups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentLocation {
    /// Unique store id
    pub id: String,
    /// Display name
    pub name: String,
    /// Street address
    pub address: String,
    /// Store position
    pub coordinate: Coordinate,
    /// Contact phone number
    pub phone: String,
}

impl FulfillmentLocation {
    /// Creates a new location record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        coordinate: Coordinate,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            coordinate,
            phone: phone.into(),
        }
    }
}

/// Read-only set of fulfillment locations.
///
/// Iteration order is the insertion order and is only used to break distance
/// ties during ranking.
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    locations: Vec<FulfillmentLocation>,
}

impl LocationRegistry {
    /// Builds a registry, rejecting duplicate ids.
    ///
    /// An empty registry is accepted here; resolving against it reports a
    /// configuration error.
    pub fn new(locations: Vec<FulfillmentLocation>) -> Result<Self> {
        let mut seen = HashSet::new();
        for location in &locations {
            if !seen.insert(location.id.as_str()) {
                return Err(DeliveryError::Configuration(format!(
                    "duplicate fulfillment location id: {}",
                    location.id
                )));
            }
        }
        Ok(Self { locations })
    }

    /// The five ShopFusion stores across Jakarta.
    pub fn jakarta() -> Self {
        Self {
            locations: jakarta_stores(),
        }
    }

    /// All locations in registry order.
    #[inline]
    pub fn all(&self) -> &[FulfillmentLocation] {
        &self.locations
    }

    /// Looks up a location by id.
    pub fn get(&self, id: &str) -> Option<&FulfillmentLocation> {
        self.locations.iter().find(|location| location.id == id)
    }

    /// Number of registered locations.
    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if no locations are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for LocationRegistry {
    fn default() -> Self {
        Self::jakarta()
    }
}

pub(crate) fn jakarta_stores() -> Vec<FulfillmentLocation> {
    vec![
        FulfillmentLocation::new(
            "store-1",
            "ShopFusion Jakarta Pusat",
            "Jl. Thamrin No. 1, Jakarta Pusat",
            Coordinate::new(-6.1944, 106.8229),
            "021-12345678",
        ),
        FulfillmentLocation::new(
            "store-2",
            "ShopFusion Jakarta Selatan",
            "Jl. Sudirman No. 25, Jakarta Selatan",
            Coordinate::new(-6.2088, 106.8456),
            "021-87654321",
        ),
        FulfillmentLocation::new(
            "store-3",
            "ShopFusion Jakarta Barat",
            "Jl. Puri Indah No. 10, Jakarta Barat",
            Coordinate::new(-6.1888, 106.7378),
            "021-11223344",
        ),
        FulfillmentLocation::new(
            "store-4",
            "ShopFusion Jakarta Utara",
            "Jl. Kelapa Gading No. 15, Jakarta Utara",
            Coordinate::new(-6.1588, 106.9056),
            "021-55667788",
        ),
        FulfillmentLocation::new(
            "store-5",
            "ShopFusion Jakarta Timur",
            "Jl. Cakung No. 20, Jakarta Timur",
            Coordinate::new(-6.1744, 106.9497),
            "021-99887766",
        ),
    ]
}
