//! Error types for delivery resolution.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

/// Result type alias for delivery operations.
pub type Result<T> = std::result::Result<T, DeliveryError>;

/// Reasons a delivery cannot be resolved.
///
/// Validation reasons accumulate; the service-area reason is always reported
/// alone; configuration faults indicate a broken deployment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// Trimmed address is shorter than the configured minimum
    #[error("address too short (minimum {min_length} characters)")]
    AddressTooShort { min_length: usize },

    /// Address text does not name the served region
    #[error("outside supported region by name: only {region} addresses are served")]
    AddressOutsideNamedRegion { region: String },

    /// Geocoded coordinate falls outside the service-area bounding box
    #[error("address outside service area")]
    CoordinateOutsideServiceArea,

    /// Invalid or incomplete delivery configuration
    #[error("delivery configuration error: {0}")]
    Configuration(String),
}

/// Error code for integration with shopfusion-core error handling.
/// Range: 10xxx for delivery errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryErrorCode {
    /// Address too short
    AddressTooShort = 10001,
    /// Address outside the named region
    AddressOutsideNamedRegion = 10002,
    /// Coordinate outside the service area
    CoordinateOutsideServiceArea = 10003,
    /// Configuration error
    Configuration = 10004,
}

impl DeliveryError {
    /// Returns the error code for this error.
    pub fn code(&self) -> DeliveryErrorCode {
        match self {
            DeliveryError::AddressTooShort { .. } => DeliveryErrorCode::AddressTooShort,
            DeliveryError::AddressOutsideNamedRegion { .. } => {
                DeliveryErrorCode::AddressOutsideNamedRegion
            }
            DeliveryError::CoordinateOutsideServiceArea => {
                DeliveryErrorCode::CoordinateOutsideServiceArea
            }
            DeliveryError::Configuration(_) => DeliveryErrorCode::Configuration,
        }
    }

    /// Returns true for faults a correct deployment never produces.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DeliveryError::Configuration(_))
    }

    /// Configuration error for a resolver without any fulfillment locations.
    pub(crate) fn empty_registry() -> Self {
        DeliveryError::Configuration("no fulfillment locations registered".to_string())
    }
}

impl Serialize for DeliveryError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DeliveryError", 2)?;
        state.serialize_field("code", &(self.code() as u32))?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
