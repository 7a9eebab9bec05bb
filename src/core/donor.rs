use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::types::{BloodType, DonorId};
use crate::geo::Coordinates;
use crate::utils::validation::{validate_coordinates, validate_phone, ValidationError};

/// A registered donor, as stored in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorRecord {
    /// Stable unique identifier
    pub id: DonorId,

    /// Display name
    pub name: String,

    pub blood_type: BloodType,

    pub location: Coordinates,

    /// Unknown for donors who never gave a date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_donation_date: Option<NaiveDate>,

    /// Contact number, at least 10 characters
    pub phone: String,
}

impl DonorRecord {
    pub fn new(
        id: DonorId,
        name: impl Into<String>,
        blood_type: BloodType,
        location: Coordinates,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            blood_type,
            location,
            last_donation_date: None,
            phone: phone.into(),
        }
    }

    #[must_use]
    pub fn with_last_donation(mut self, date: NaiveDate) -> Self {
        self.last_donation_date = Some(date);
        self
    }
}

/// Registration form data, before an id is assigned.
///
/// Produced by the registration collaborator once its verification step
/// passes. Field checks happen here so the directory can append blindly.
#[derive(Debug, Clone, PartialEq)]
pub struct DonorRegistration {
    pub name: String,
    pub blood_type: BloodType,
    pub phone: String,
    pub location: Coordinates,
    pub last_donation_date: Option<NaiveDate>,
}

impl DonorRegistration {
    /// Validate the form and turn it into a directory record.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::PhoneTooShort` for phones under 10 characters
    /// and `ValidationError::CoordinatesOutOfRange` for impossible locations.
    pub fn into_record(self, id: DonorId) -> Result<DonorRecord, ValidationError> {
        validate_phone(&self.phone)?;
        validate_coordinates(self.location)?;

        Ok(DonorRecord {
            id,
            name: self.name,
            blood_type: self.blood_type,
            location: self.location,
            last_donation_date: self.last_donation_date,
            phone: self.phone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> DonorRegistration {
        DonorRegistration {
            name: "Neha R.".to_string(),
            blood_type: BloodType::BNegative,
            phone: "9123456780".to_string(),
            location: Coordinates::new(28.64, 77.23),
            last_donation_date: NaiveDate::from_ymd_opt(2024, 3, 2),
        }
    }

    #[test]
    fn test_registration_into_record() {
        let record = registration().into_record(DonorId::new(42)).unwrap();
        assert_eq!(record.id, DonorId::new(42));
        assert_eq!(record.name, "Neha R.");
        assert_eq!(record.blood_type, BloodType::BNegative);
        assert_eq!(record.last_donation_date, NaiveDate::from_ymd_opt(2024, 3, 2));
    }

    #[test]
    fn test_registration_rejects_short_phone() {
        let mut form = registration();
        form.phone = "12345".to_string();
        assert!(matches!(
            form.into_record(DonorId::new(1)),
            Err(ValidationError::PhoneTooShort { length: 5, .. })
        ));
    }

    #[test]
    fn test_record_json_layout() {
        let record = DonorRecord::new(
            DonorId::new(7),
            "Test Donor",
            BloodType::AbNegative,
            Coordinates::new(28.6, 77.2),
            "0123456789",
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["bloodType"], "AB-");
        assert_eq!(json["location"]["lat"], 28.6);
        assert!(json.get("lastDonationDate").is_none());

        let dated = record.with_last_donation(NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
        let json = serde_json::to_value(&dated).unwrap();
        assert_eq!(json["lastDonationDate"], "2023-11-15");
    }
}
