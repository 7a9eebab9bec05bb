use serde::{Deserialize, Serialize};

use crate::core::types::{BloodType, UrgencyLevel};
use crate::geo::Coordinates;

/// An incoming request for blood. Never persisted.
///
/// `blood_type` and `urgency` are optional because the form collaborator may
/// hand over an empty or unrecognized selection; the scorer and the
/// compatibility filter both have defined behavior for `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    pub blood_type: Option<BloodType>,
    pub urgency: Option<UrgencyLevel>,
    pub location: Coordinates,
    pub phone: String,
}

impl BloodRequest {
    #[must_use]
    pub fn new(
        blood_type: Option<BloodType>,
        urgency: Option<UrgencyLevel>,
        location: Coordinates,
    ) -> Self {
        Self {
            blood_type,
            urgency,
            location,
            phone: String::new(),
        }
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}
