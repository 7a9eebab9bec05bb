//! Creation-time field checks for donor registration.

use crate::geo::Coordinates;

/// Minimum number of characters in a contact phone
pub const MIN_PHONE_LENGTH: usize = 10;

/// Registration validation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Phone number too short: {length} characters (minimum {minimum})")]
    PhoneTooShort { length: usize, minimum: usize },
    #[error("Coordinates out of range: latitude {lat}, longitude {lon}")]
    CoordinatesOutOfRange { lat: f64, lon: f64 },
}

/// Check that a phone is long enough to be dialable.
///
/// Only the length is checked; the characters themselves are not inspected.
///
/// # Examples
///
/// ```
/// use bloodlink::utils::validation::validate_phone;
///
/// assert!(validate_phone("9876543210").is_ok());
/// assert!(validate_phone("98765").is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::PhoneTooShort` if the phone has fewer than
/// [`MIN_PHONE_LENGTH`] characters.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let length = phone.chars().count();
    if length < MIN_PHONE_LENGTH {
        return Err(ValidationError::PhoneTooShort {
            length,
            minimum: MIN_PHONE_LENGTH,
        });
    }
    Ok(())
}

/// Check that a location is a real point on the globe.
///
/// # Errors
///
/// Returns `ValidationError::CoordinatesOutOfRange` when latitude is outside
/// [-90, 90], longitude is outside [-180, 180], or either is not finite.
pub fn validate_coordinates(location: Coordinates) -> Result<(), ValidationError> {
    let lat_ok = location.lat.is_finite() && (-90.0..=90.0).contains(&location.lat);
    let lon_ok = location.lon.is_finite() && (-180.0..=180.0).contains(&location.lon);
    if lat_ok && lon_ok {
        Ok(())
    } else {
        Err(ValidationError::CoordinatesOutOfRange {
            lat: location.lat,
            lon: location.lon,
        })
    }
}
