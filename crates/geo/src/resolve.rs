//! End-to-end delivery resolution.
//!
//! [`DeliveryResolver::resolve`] runs validation, geocoding, the service-area
//! check, store ranking and pricing in sequence, stopping at the first failing
//! step. Invalid input never panics or errors out; it is reported as a
//! [`DeliveryResolution::Failure`].

use crate::{
    rank_locations, AddressValidator, Coordinate, DeliveryError, FulfillmentMethod, Geocoder,
    LocationRegistry, RankedLocation, ServiceArea, ShippingPolicy, ShippingQuote, SimulatedGeocoder,
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Successful resolution of a delivery address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDelivery {
    /// Geocoded customer position
    pub coordinate: Coordinate,
    /// Closest store, equal to the first element of `ranked`
    pub nearest: RankedLocation,
    /// Shipping quote from the closest store
    pub quote: ShippingQuote,
    /// Every store, ascending by distance
    pub ranked: Vec<RankedLocation>,
}

impl ResolvedDelivery {
    /// Looks up a ranked store by id, e.g. for choosing a pickup store.
    pub fn location(&self, id: &str) -> Option<&RankedLocation> {
        self.ranked.iter().find(|ranked| ranked.location.id == id)
    }

    /// Shipping charged for the chosen fulfillment method.
    pub fn shipping_cost(&self, method: FulfillmentMethod) -> u64 {
        match method {
            FulfillmentMethod::Delivery => self.quote.cost,
            FulfillmentMethod::Pickup => 0,
        }
    }

    /// Order total plus shipping for the chosen fulfillment method.
    pub fn grand_total(&self, order_total: u64, method: FulfillmentMethod) -> u64 {
        order_total.saturating_add(self.shipping_cost(method))
    }
}

/// Outcome of [`DeliveryResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryResolution {
    /// The address can be served
    Success(Box<ResolvedDelivery>),
    /// The address cannot be served; `errors` is never empty
    Failure {
        /// Reasons, in the order they were detected
        errors: Vec<DeliveryError>,
    },
}

impl DeliveryResolution {
    fn failure(error: DeliveryError) -> Self {
        DeliveryResolution::Failure { errors: vec![error] }
    }

    /// Returns true for the success variant.
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryResolution::Success(_))
    }

    /// The resolved delivery, if any.
    pub fn resolved(&self) -> Option<&ResolvedDelivery> {
        match self {
            DeliveryResolution::Success(resolved) => Some(resolved),
            DeliveryResolution::Failure { .. } => None,
        }
    }

    /// Failure reasons; empty on success.
    pub fn errors(&self) -> &[DeliveryError] {
        match self {
            DeliveryResolution::Success(_) => &[],
            DeliveryResolution::Failure { errors } => errors,
        }
    }

    /// Human-readable failure reasons; empty on success.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }

    /// Returns true if any failure reason is a configuration fault.
    pub fn is_fatal(&self) -> bool {
        self.errors().iter().any(DeliveryError::is_fatal)
    }
}

/// Composes validation, geocoding, ranking and pricing.
///
/// The resolver holds no per-request state and can be shared across tasks.
#[derive(Debug)]
pub struct DeliveryResolver<G = SimulatedGeocoder> {
    validator: AddressValidator,
    geocoder: G,
    service_area: ServiceArea,
    registry: LocationRegistry,
    policy: ShippingPolicy,
}

impl DeliveryResolver<SimulatedGeocoder> {
    /// Resolver with the default Jakarta stores, areas and rate card.
    pub fn jakarta() -> Self {
        Self::new(
            AddressValidator::jakarta(),
            SimulatedGeocoder::new(),
            ServiceArea::JAKARTA,
            LocationRegistry::jakarta(),
            ShippingPolicy::jakarta(),
        )
    }
}

impl<G: Geocoder> DeliveryResolver<G> {
    /// Assembles a resolver from its parts.
    pub fn new(
        validator: AddressValidator,
        geocoder: G,
        service_area: ServiceArea,
        registry: LocationRegistry,
        policy: ShippingPolicy,
    ) -> Self {
        Self {
            validator,
            geocoder,
            service_area,
            registry,
            policy,
        }
    }

    /// Replace the geocoder, keeping everything else.
    pub fn with_geocoder<H: Geocoder>(self, geocoder: H) -> DeliveryResolver<H> {
        DeliveryResolver {
            validator: self.validator,
            geocoder,
            service_area: self.service_area,
            registry: self.registry,
            policy: self.policy,
        }
    }

    /// Replace the store registry.
    #[must_use]
    pub fn with_registry(mut self, registry: LocationRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The address validator.
    pub fn validator(&self) -> &AddressValidator {
        &self.validator
    }

    /// The geocoder.
    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// The service-area bounding box.
    pub fn service_area(&self) -> &ServiceArea {
        &self.service_area
    }

    /// The store registry.
    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    /// The shipping policy.
    pub fn policy(&self) -> &ShippingPolicy {
        &self.policy
    }

    /// Rank all stores by distance from a coordinate.
    pub fn rank(&self, origin: &Coordinate) -> Vec<RankedLocation> {
        rank_locations(&self.registry, origin)
    }

    /// Resolve an address and order total into a delivery plan.
    #[instrument(skip(self))]
    pub async fn resolve(&self, address: &str, order_total: u64) -> DeliveryResolution {
        let validation = self.validator.validate(address);
        if !validation.is_valid() {
            warn!(reasons = ?validation.messages(), "Address rejected");
            return DeliveryResolution::Failure {
                errors: validation.into_errors(),
            };
        }

        let coordinate = self.geocoder.geocode(address).await;

        if !self.service_area.contains(&coordinate) {
            warn!(
                latitude = coordinate.latitude,
                longitude = coordinate.longitude,
                "Geocoded address outside service area"
            );
            return DeliveryResolution::failure(DeliveryError::CoordinateOutsideServiceArea);
        }

        let ranked = self.rank(&coordinate);
        let Some(nearest) = ranked.first().cloned() else {
            let err = DeliveryError::empty_registry();
            error!(error = %err, "Cannot resolve delivery");
            return DeliveryResolution::failure(err);
        };

        let quote = self.policy.quote(nearest.distance_km, order_total);

        info!(
            store = %nearest.location.id,
            distance_km = nearest.distance_km,
            cost = quote.cost,
            method = %quote.method,
            "Delivery resolved"
        );

        DeliveryResolution::Success(Box::new(ResolvedDelivery {
            coordinate,
            nearest,
            quote,
            ranked,
        }))
    }
}
