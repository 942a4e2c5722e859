//! Plain-text rendering of delivery results.
//!
//! Each function returns lines without color so that output can be tested
//! and piped; callers decide how to print them.

use shopfusion_geo::{
    format_currency, format_distance, FulfillmentMethod, RankedLocation, ResolvedDelivery,
    ShippingQuote,
};

/// Lines describing a shipping quote.
pub fn quote_lines(quote: &ShippingQuote) -> Vec<String> {
    let mut lines = vec![
        format!("Method:   {}", quote.method),
        format!("Distance: {}", format_distance(quote.distance_km)),
        format!("Time:     {}", quote.estimated_time),
        format!("Cost:     {}", format_currency(quote.cost)),
    ];
    if quote.is_free_shipping {
        lines.push("Free shipping applied".to_string());
    }
    lines
}

/// One line per store, closest first.
pub fn ranking_lines(ranked: &[RankedLocation]) -> Vec<String> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, store)| {
            format!(
                "{:>2}. {:<28} {:>9}  {}  ({})",
                i + 1,
                store.location.name,
                format_distance(store.distance_km),
                store.location.address,
                store.location.phone,
            )
        })
        .collect()
}

/// Full summary of a resolved delivery for the chosen method.
pub fn resolution_lines(
    resolved: &ResolvedDelivery,
    order_total: u64,
    method: FulfillmentMethod,
) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Location: {:.5}, {:.5}",
            resolved.coordinate.latitude, resolved.coordinate.longitude
        ),
        format!(
            "Nearest:  {} ({})",
            resolved.nearest.location.name,
            format_distance(resolved.nearest.distance_km)
        ),
    ];

    match method {
        FulfillmentMethod::Delivery => lines.extend(quote_lines(&resolved.quote)),
        FulfillmentMethod::Pickup => {
            lines.push(format!("Pickup:   {}", resolved.nearest.location.address));
            lines.push(format!("Cost:     {}", format_currency(0)));
        }
    }

    lines.push(format!(
        "Total:    {}",
        format_currency(resolved.grand_total(order_total, method))
    ));
    lines
}
