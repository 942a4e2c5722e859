//! Address validation before geocoding.

use crate::DeliveryError;
use serde::Serialize;

/// Minimum trimmed address length in characters.
pub const MIN_ADDRESS_LENGTH: usize = 10;

/// Name token every served address must contain.
pub const REGION_NAME: &str = "jakarta";

/// Outcome of [`AddressValidator::validate`]. Valid exactly when there are no errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressValidation {
    errors: Vec<DeliveryError>,
}

impl AddressValidation {
    /// Returns true if no rule failed.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failed rules in check order.
    pub fn errors(&self) -> &[DeliveryError] {
        &self.errors
    }

    /// Human-readable reasons in check order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub(crate) fn into_errors(self) -> Vec<DeliveryError> {
        self.errors
    }
}

/// Checks address length and region name. Every rule runs; errors accumulate.
#[derive(Debug, Clone)]
pub struct AddressValidator {
    min_length: usize,
    region_name: String,
}

impl AddressValidator {
    /// Creates a validator. The region name is matched case-insensitively.
    pub fn new(min_length: usize, region_name: impl Into<String>) -> Self {
        Self {
            min_length,
            region_name: region_name.into().to_lowercase(),
        }
    }

    /// Validator for Jakarta addresses.
    pub fn jakarta() -> Self {
        Self::new(MIN_ADDRESS_LENGTH, REGION_NAME)
    }

    /// Region token required in addresses.
    pub fn region_name(&self) -> &str {
        &self.region_name
    }

    /// Validate an address.
    ///
    /// # Example
    /// ```
    /// use shopfusion_geo::AddressValidator;
    ///
    /// let validator = AddressValidator::jakarta();
    /// assert!(validator.validate("Jl. Thamrin No. 1, Jakarta Pusat").is_valid());
    /// assert_eq!(validator.validate("123456789").errors().len(), 2);
    /// ```
    pub fn validate(&self, address: &str) -> AddressValidation {
        let mut errors = Vec::new();

        if address.trim().chars().count() < self.min_length {
            errors.push(DeliveryError::AddressTooShort {
                min_length: self.min_length,
            });
        }

        if !address.to_lowercase().contains(&self.region_name) {
            errors.push(DeliveryError::AddressOutsideNamedRegion {
                region: self.region_name.clone(),
            });
        }

        AddressValidation { errors }
    }
}

impl Default for AddressValidator {
    fn default() -> Self {
        Self::jakarta()
    }
}
