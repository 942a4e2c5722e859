//! Deserializable delivery settings.
//!
//! Every field has a default matching the built-in Jakarta setup, so an empty
//! `[delivery]` table yields the stock resolver.

use crate::geocode::{jakarta_areas, FALLBACK_JITTER_DEG, MATCHED_JITTER_DEG};
use crate::registry::jakarta_stores;
use crate::shipping::{jakarta_tiers, FALLBACK_SHIPPING_COST, FREE_SHIPPING_THRESHOLD};
use crate::suggest::jakarta_addresses;
use crate::validation::{MIN_ADDRESS_LENGTH, REGION_NAME};
use crate::{
    AddressSuggestionIndex, AddressValidator, AreaKeyword, Coordinate, DeliveryError,
    DeliveryResolver, FulfillmentLocation, LocationRegistry, Result, ServiceArea, ShippingPolicy,
    ShippingTier, SimulatedGeocoder, JAKARTA_CENTER,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delivery engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliverySettings {
    /// Region token required in every address
    pub region_name: String,
    /// Minimum trimmed address length
    pub min_address_length: usize,
    /// Order total from which shipping is free
    pub free_shipping_threshold: u64,
    /// Flat shipping charge before an address is resolved
    pub fallback_shipping_cost: u64,
    /// Simulated geocoding latency in milliseconds
    pub simulated_latency_ms: u64,
    /// Jitter around matched areas, in degrees
    pub matched_jitter_deg: f64,
    /// Jitter around the default center, in degrees
    pub fallback_jitter_deg: f64,
    /// Fallback geocoding center
    pub default_center: Coordinate,
    /// Supported delivery bounding box
    pub service_area: ServiceArea,
    /// Shipping tiers in ascending distance order
    pub tiers: Vec<ShippingTier>,
    /// Fulfillment locations
    pub locations: Vec<FulfillmentLocation>,
    /// Geocoder keyword table in match order
    pub areas: Vec<AreaKeyword>,
    /// Address suggestions for input assist
    pub suggestions: Vec<String>,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            region_name: REGION_NAME.to_string(),
            min_address_length: MIN_ADDRESS_LENGTH,
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            fallback_shipping_cost: FALLBACK_SHIPPING_COST,
            simulated_latency_ms: 0,
            matched_jitter_deg: MATCHED_JITTER_DEG,
            fallback_jitter_deg: FALLBACK_JITTER_DEG,
            default_center: JAKARTA_CENTER,
            service_area: ServiceArea::JAKARTA,
            tiers: jakarta_tiers(),
            locations: jakarta_stores(),
            areas: jakarta_areas(),
            suggestions: jakarta_addresses(),
        }
    }
}

impl DeliverySettings {
    /// Check the settings without building anything long-lived.
    pub fn validate(&self) -> Result<()> {
        if self.region_name.trim().is_empty() {
            return Err(DeliveryError::Configuration("region_name must not be empty".into()));
        }
        if !self.service_area.is_well_formed() {
            return Err(DeliveryError::Configuration(
                "service_area requires south <= north and west <= east".into(),
            ));
        }
        for jitter in [self.matched_jitter_deg, self.fallback_jitter_deg] {
            if !jitter.is_finite() || jitter < 0.0 {
                return Err(DeliveryError::Configuration(format!(
                    "jitter must be a finite non-negative number of degrees, got {jitter}"
                )));
            }
        }
        if let Some(bad) = self.locations.iter().find(|l| !l.coordinate.is_valid()) {
            return Err(DeliveryError::Configuration(format!(
                "location {} has an invalid coordinate",
                bad.id
            )));
        }
        self.shipping_policy()?;
        self.registry()?;
        Ok(())
    }

    /// Shipping policy from the configured tiers.
    pub fn shipping_policy(&self) -> Result<ShippingPolicy> {
        ShippingPolicy::new(
            self.free_shipping_threshold,
            self.fallback_shipping_cost,
            self.tiers.clone(),
        )
    }

    /// Store registry from the configured locations.
    pub fn registry(&self) -> Result<LocationRegistry> {
        LocationRegistry::new(self.locations.clone())
    }

    /// Address validator for the configured region.
    pub fn validator(&self) -> AddressValidator {
        AddressValidator::new(self.min_address_length, self.region_name.clone())
    }

    /// Suggestion index over the configured addresses.
    pub fn suggestion_index(&self) -> AddressSuggestionIndex {
        AddressSuggestionIndex::new(self.suggestions.iter().cloned())
    }

    /// Geocoder drawing jitter from `rng`.
    pub fn geocoder<R: RngCore + Send>(&self, rng: R) -> SimulatedGeocoder<R> {
        SimulatedGeocoder::with_rng(rng)
            .areas(self.areas.clone())
            .default_center(self.default_center)
            .jitter(self.matched_jitter_deg, self.fallback_jitter_deg)
            .latency(Duration::from_millis(self.simulated_latency_ms))
    }

    /// Resolver seeded from OS entropy.
    pub fn build_resolver(&self) -> Result<DeliveryResolver> {
        self.build_resolver_with_rng(StdRng::from_entropy())
    }

    /// Resolver with a reproducible geocoder.
    pub fn build_seeded_resolver(&self, seed: u64) -> Result<DeliveryResolver> {
        self.build_resolver_with_rng(StdRng::seed_from_u64(seed))
    }

    /// Resolver drawing geocoder jitter from `rng`.
    pub fn build_resolver_with_rng<R: RngCore + Send>(
        &self,
        rng: R,
    ) -> Result<DeliveryResolver<SimulatedGeocoder<R>>> {
        self.validate()?;
        Ok(DeliveryResolver::new(
            self.validator(),
            self.geocoder(rng),
            self.service_area,
            self.registry()?,
            self.shipping_policy()?,
        ))
    }
}
