//! Display formatting for distances and rupiah amounts.

/// Formats a distance: meters below 1 km, otherwise kilometers with one decimal.
///
/// Kilometers round half away from zero, so `1.25` renders as `1.3 km`.
///
/// # Example
/// ```
/// use shopfusion_geo::format_distance;
///
/// assert_eq!(format_distance(0.45), "450 m");
/// assert_eq!(format_distance(2.98), "3.0 km");
/// ```
pub fn format_distance(distance_km: f64) -> String {
    if distance_km < 1.0 {
        format!("{} m", (distance_km * 1000.0).round() as u64)
    } else {
        format!("{:.1} km", (distance_km * 10.0).round() / 10.0)
    }
}

/// Formats a shipping amount, `GRATIS` when zero, otherwise `Rp` with
/// Indonesian thousands separators.
///
/// # Example
/// ```
/// use shopfusion_geo::format_currency;
///
/// assert_eq!(format_currency(0), "GRATIS");
/// assert_eq!(format_currency(15_000), "Rp 15.000");
/// ```
pub fn format_currency(amount: u64) -> String {
    if amount == 0 {
        return "GRATIS".to_string();
    }

    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("Rp {grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_in_meters() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(0.999), "999 m");
    }

    #[test]
    fn test_distance_in_kilometers() {
        assert_eq!(format_distance(1.0), "1.0 km");
        assert_eq!(format_distance(14.19), "14.2 km");
    }

    #[test]
    fn test_distance_ties_round_up() {
        assert_eq!(format_distance(1.25), "1.3 km");
        assert_eq!(format_distance(3.25), "3.3 km");
        assert_eq!(format_distance(2.75), "2.8 km");
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(500), "Rp 500");
        assert_eq!(format_currency(1_000), "Rp 1.000");
        assert_eq!(format_currency(75_000), "Rp 75.000");
        assert_eq!(format_currency(1_234_567), "Rp 1.234.567");
    }
}
