//! Distance-tiered shipping policy.
//!
//! Tiers are matched by inclusive upper bound: a distance exactly on a
//! breakpoint belongs to the cheaper, faster tier. Orders at or above the
//! free-shipping threshold cost nothing but keep the method and time labels
//! of their distance tier.

use crate::{round_km, DeliveryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order total from which shipping is free, in rupiah.
pub const FREE_SHIPPING_THRESHOLD: u64 = 500_000;

/// Flat shipping charge used before a delivery has been resolved.
pub const FALLBACK_SHIPPING_COST: u64 = 25_000;

/// One distance bracket of the shipping policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingTier {
    /// Inclusive upper bound in kilometers; `None` for the open-ended last tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance_km: Option<f64>,
    /// Shipping cost in rupiah
    pub cost: u64,
    /// Delivery method label
    pub method: String,
    /// Estimated delivery time label
    pub estimated_time: String,
}

impl ShippingTier {
    /// Creates a tier.
    pub fn new(
        max_distance_km: Option<f64>,
        cost: u64,
        method: impl Into<String>,
        estimated_time: impl Into<String>,
    ) -> Self {
        Self {
            max_distance_km,
            cost,
            method: method.into(),
            estimated_time: estimated_time.into(),
        }
    }

    #[inline]
    fn covers(&self, distance_km: f64) -> bool {
        self.max_distance_km.is_none_or(|max| distance_km <= max)
    }
}

pub(crate) fn jakarta_tiers() -> Vec<ShippingTier> {
    vec![
        ShippingTier::new(Some(5.0), 15_000, "Express Delivery", "1-2 jam"),
        ShippingTier::new(Some(10.0), 25_000, "Same Day Delivery", "2-4 jam"),
        ShippingTier::new(Some(20.0), 35_000, "Same Day Delivery", "4-8 jam"),
        ShippingTier::new(Some(50.0), 50_000, "Regular Delivery", "1-2 hari"),
        ShippingTier::new(None, 75_000, "Standard Delivery", "2-3 hari"),
    ]
}

/// Shipping price and timing for one delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuote {
    /// Distance from the serving store, rounded to 2 decimals
    pub distance_km: f64,
    /// Cost in rupiah; zero exactly when shipping is free
    pub cost: u64,
    /// Estimated delivery time label
    pub estimated_time: String,
    /// Delivery method label
    pub method: String,
    /// True when `cost` is zero
    pub is_free_shipping: bool,
}

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentMethod {
    /// Shipped to the customer's address
    #[default]
    Delivery,
    /// Collected at a store; never charged shipping
    Pickup,
}

impl fmt::Display for FulfillmentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FulfillmentMethod::Delivery => write!(f, "delivery"),
            FulfillmentMethod::Pickup => write!(f, "pickup"),
        }
    }
}

impl FromStr for FulfillmentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delivery" => Ok(FulfillmentMethod::Delivery),
            "pickup" => Ok(FulfillmentMethod::Pickup),
            other => Err(format!("unknown fulfillment method: {other}")),
        }
    }
}

/// Maps (distance, order total) to a [`ShippingQuote`].
#[derive(Debug, Clone)]
pub struct ShippingPolicy {
    free_shipping_threshold: u64,
    fallback_cost: u64,
    tiers: Vec<ShippingTier>,
}

impl ShippingPolicy {
    /// Builds a policy from ordered tiers.
    ///
    /// Tiers must be non-empty with strictly ascending finite bounds, and only
    /// the last tier may (and must) be open-ended.
    pub fn new(free_shipping_threshold: u64, fallback_cost: u64, tiers: Vec<ShippingTier>) -> Result<Self> {
        let Some((last, bounded)) = tiers.split_last() else {
            return Err(DeliveryError::Configuration("shipping policy has no tiers".into()));
        };
        if last.max_distance_km.is_some() {
            return Err(DeliveryError::Configuration(
                "last shipping tier must not have max_distance_km".into(),
            ));
        }

        let mut previous = f64::NEG_INFINITY;
        for tier in bounded {
            match tier.max_distance_km {
                Some(max) if max.is_finite() && max > previous => previous = max,
                Some(max) => {
                    return Err(DeliveryError::Configuration(format!(
                        "shipping tier bound {max} km is not strictly ascending"
                    )));
                }
                None => {
                    return Err(DeliveryError::Configuration(
                        "only the last shipping tier may be open-ended".into(),
                    ));
                }
            }
        }

        Ok(Self {
            free_shipping_threshold,
            fallback_cost,
            tiers,
        })
    }

    /// The default Jakarta rate card.
    pub fn jakarta() -> Self {
        Self {
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
            fallback_cost: FALLBACK_SHIPPING_COST,
            tiers: jakarta_tiers(),
        }
    }

    /// Order total from which shipping is free.
    pub fn free_shipping_threshold(&self) -> u64 {
        self.free_shipping_threshold
    }

    /// Tiers in ascending distance order.
    pub fn tiers(&self) -> &[ShippingTier] {
        &self.tiers
    }

    /// Selects the tier for a distance.
    pub fn tier_for(&self, distance_km: f64) -> &ShippingTier {
        // The constructor guarantees a non-empty list ending in an open tier.
        self.tiers
            .iter()
            .find(|tier| tier.covers(distance_km))
            .unwrap_or(&self.tiers[self.tiers.len() - 1])
    }

    /// Shipping cost alone.
    pub fn cost(&self, distance_km: f64, order_total: u64) -> u64 {
        if order_total >= self.free_shipping_threshold {
            0
        } else {
            self.tier_for(distance_km).cost
        }
    }

    /// Full quote with method and time labels.
    ///
    /// # Example
    /// ```
    /// use shopfusion_geo::ShippingPolicy;
    ///
    /// let policy = ShippingPolicy::jakarta();
    /// let quote = policy.quote(5.0, 100_000);
    /// assert_eq!(quote.cost, 15_000);
    /// assert_eq!(quote.method, "Express Delivery");
    /// ```
    pub fn quote(&self, distance_km: f64, order_total: u64) -> ShippingQuote {
        let tier = self.tier_for(distance_km);
        let cost = self.cost(distance_km, order_total);

        ShippingQuote {
            distance_km: round_km(distance_km),
            cost,
            estimated_time: tier.estimated_time.clone(),
            method: tier.method.clone(),
            is_free_shipping: cost == 0,
        }
    }

    /// Shipping charge shown before the address has been resolved.
    pub fn fallback_cost(&self, order_total: u64) -> u64 {
        if order_total >= self.free_shipping_threshold {
            0
        } else {
            self.fallback_cost
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::jakarta()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_boundaries_belong_to_lower_tier() {
        let policy = ShippingPolicy::jakarta();
        assert_eq!(policy.quote(5.0, 100_000).cost, 15_000);
        assert_eq!(policy.quote(5.01, 100_000).cost, 25_000);
        assert_eq!(policy.quote(10.0, 100_000).cost, 25_000);
        assert_eq!(policy.quote(20.0, 100_000).cost, 35_000);
        assert_eq!(policy.quote(50.0, 100_000).cost, 50_000);
        assert_eq!(policy.quote(50.01, 100_000).cost, 75_000);
    }

    #[test]
    fn test_labels_per_tier() {
        let policy = ShippingPolicy::jakarta();
        let cases = [
            (3.0, "Express Delivery", "1-2 jam"),
            (7.0, "Same Day Delivery", "2-4 jam"),
            (15.0, "Same Day Delivery", "4-8 jam"),
            (30.0, "Regular Delivery", "1-2 hari"),
            (60.0, "Standard Delivery", "2-3 hari"),
        ];
        for (distance, method, time) in cases {
            let quote = policy.quote(distance, 300_000);
            assert_eq!(quote.method, method, "{distance} km");
            assert_eq!(quote.estimated_time, time, "{distance} km");
        }
    }

    #[test]
    fn test_free_shipping_keeps_tier_labels() {
        let policy = ShippingPolicy::jakarta();
        let quote = policy.quote(50.0, 600_000);
        assert_eq!(quote.cost, 0);
        assert!(quote.is_free_shipping);
        assert_eq!(quote.method, "Regular Delivery");
        assert_eq!(quote.estimated_time, "1-2 hari");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let policy = ShippingPolicy::jakarta();
        assert_eq!(policy.cost(3.0, 499_999), 15_000);
        assert_eq!(policy.cost(3.0, 500_000), 0);
    }

    #[test]
    fn test_quote_rounds_distance() {
        let quote = ShippingPolicy::jakarta().quote(2.976_695, 0);
        assert_eq!(quote.distance_km, 2.98);
    }

    #[test]
    fn test_fallback_cost() {
        let policy = ShippingPolicy::jakarta();
        assert_eq!(policy.fallback_cost(100_000), 25_000);
        assert_eq!(policy.fallback_cost(500_000), 0);
    }

    #[test]
    fn test_rejects_invalid_tiers() {
        assert!(ShippingPolicy::new(1, 1, Vec::new()).is_err());

        let closed = vec![ShippingTier::new(Some(5.0), 1, "a", "b")];
        assert!(ShippingPolicy::new(1, 1, closed).is_err());

        let descending = vec![
            ShippingTier::new(Some(10.0), 1, "a", "b"),
            ShippingTier::new(Some(5.0), 2, "a", "b"),
            ShippingTier::new(None, 3, "a", "b"),
        ];
        assert!(ShippingPolicy::new(1, 1, descending).is_err());

        let open_middle = vec![
            ShippingTier::new(None, 1, "a", "b"),
            ShippingTier::new(None, 2, "a", "b"),
        ];
        assert!(ShippingPolicy::new(1, 1, open_middle).is_err());
    }

    #[test]
    fn test_single_open_tier() {
        let policy =
            ShippingPolicy::new(1_000, 5, vec![ShippingTier::new(None, 9_000, "Kurir", "1 hari")]).unwrap();
        assert_eq!(policy.quote(999.0, 0).cost, 9_000);
        assert_eq!(policy.quote(999.0, 1_000).cost, 0);
    }

    #[test]
    fn test_fulfillment_method_parsing() {
        assert_eq!("Pickup".parse::<FulfillmentMethod>(), Ok(FulfillmentMethod::Pickup));
        assert_eq!("delivery".parse::<FulfillmentMethod>(), Ok(FulfillmentMethod::Delivery));
        assert!("drone".parse::<FulfillmentMethod>().is_err());
        assert_eq!(FulfillmentMethod::Pickup.to_string(), "pickup");
    }

    proptest! {
        #[test]
        fn prop_threshold_always_free(distance in 0.0f64..10_000.0, extra in 0u64..10_000_000) {
            let quote = ShippingPolicy::jakarta().quote(distance, FREE_SHIPPING_THRESHOLD + extra);
            prop_assert!(quote.is_free_shipping);
            prop_assert_eq!(quote.cost, 0);
        }

        #[test]
        fn prop_free_iff_zero_cost(distance in 0.0f64..10_000.0, total in 0u64..1_000_000) {
            let quote = ShippingPolicy::jakarta().quote(distance, total);
            prop_assert_eq!(quote.is_free_shipping, quote.cost == 0);
        }

        #[test]
        fn prop_cost_never_decreases_with_distance(a in 0.0f64..200.0, b in 0.0f64..200.0) {
            let policy = ShippingPolicy::jakarta();
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(policy.cost(near, 0) <= policy.cost(far, 0));
        }
    }
}
