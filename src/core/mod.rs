//! Core data types for donor matching.
//!
//! - [`DonorRecord`]: a registered donor as persisted in the directory
//! - [`DonorRegistration`]: validated form data that becomes a `DonorRecord`
//! - [`BloodRequest`]: an ephemeral request the match engine answers
//! - [`BloodType`], [`UrgencyLevel`], [`DonorId`]: shared vocabulary
//!
//! ## Blood types
//!
//! | Type | Rare | Universal donor |
//! |------|------|-----------------|
//! | O-   | yes  | yes             |
//! | AB-  | yes  | no              |
//! | B-   | yes  | no              |
//! | others | no | no              |
//!
//! [`DonorRecord`]: donor::DonorRecord
//! [`DonorRegistration`]: donor::DonorRegistration
//! [`BloodRequest`]: request::BloodRequest
//! [`BloodType`]: types::BloodType
//! [`UrgencyLevel`]: types::UrgencyLevel
//! [`DonorId`]: types::DonorId

pub mod donor;
pub mod request;
pub mod types;
