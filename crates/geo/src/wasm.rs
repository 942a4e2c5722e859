//! WASM bindings for the delivery engine.
//!
//! These bindings let the storefront checkout page call the engine from
//! JavaScript. Structured results are returned as JSON strings.

use crate::{
    distance_km, format_currency, format_distance, AddressSuggestionIndex, AddressValidator,
    Coordinate, DeliveryResolver, ShippingPolicy,
};
use js_sys::Promise;
use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

static RESOLVER: Lazy<DeliveryResolver> = Lazy::new(DeliveryResolver::jakarta);
static SUGGESTIONS: Lazy<AddressSuggestionIndex> = Lazy::new(AddressSuggestionIndex::jakarta);

/// Rupiah amounts arrive as JS numbers.
fn to_rupiah(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

/// Distance between two coordinates in kilometers, rounded to 2 decimals.
#[wasm_bindgen]
pub fn distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    distance_km(&Coordinate::new(lat1, lng1), &Coordinate::new(lat2, lng2))
}

/// Shipping quote for a distance and order total, as JSON.
#[wasm_bindgen]
pub fn shipping_quote(distance_km: f64, order_total: f64) -> Result<String, JsValue> {
    to_json(&RESOLVER.policy().quote(distance_km, to_rupiah(order_total)))
}

/// Shipping charge before the address is resolved.
#[wasm_bindgen]
pub fn fallback_shipping_cost(order_total: f64) -> f64 {
    ShippingPolicy::jakarta().fallback_cost(to_rupiah(order_total)) as f64
}

/// Address suggestions for the given input, as a JSON array.
#[wasm_bindgen]
pub fn suggest_addresses(input: &str) -> Result<String, JsValue> {
    to_json(&SUGGESTIONS.suggest(input))
}

/// Address validation result as JSON: `{"is_valid": bool, "errors": [...]}`.
#[wasm_bindgen]
pub fn validate_address(address: &str) -> Result<String, JsValue> {
    let validation = AddressValidator::jakarta().validate(address);
    to_json(&serde_json::json!({
        "is_valid": validation.is_valid(),
        "errors": validation.messages(),
    }))
}

/// Stores ranked by distance from a coordinate, as JSON.
#[wasm_bindgen]
pub fn rank_stores(lat: f64, lng: f64) -> Result<String, JsValue> {
    to_json(&RESOLVER.rank(&Coordinate::new(lat, lng)))
}

/// Resolve a delivery address. The promise yields the resolution as JSON.
#[wasm_bindgen]
pub fn resolve_delivery(address: String, order_total: f64) -> Promise {
    let total = to_rupiah(order_total);
    future_to_promise(async move {
        let resolution = RESOLVER.resolve(&address, total).await;
        to_json(&resolution).map(|json| JsValue::from_str(&json))
    })
}

/// Display string for a distance in kilometers.
#[wasm_bindgen(js_name = formatDistance)]
pub fn format_distance_js(distance_km: f64) -> String {
    format_distance(distance_km)
}

/// Display string for a shipping cost.
#[wasm_bindgen(js_name = formatShippingCost)]
pub fn format_shipping_cost_js(cost: f64) -> String {
    format_currency(to_rupiah(cost))
}
