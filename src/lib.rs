//! # bloodlink
//!
//! A library for matching blood donation requests to nearby registered donors.
//!
//! When a hospital or family needs blood, the useful question is not "who has
//! this type" but "who has a compatible type, is close by, and should be called
//! first". `bloodlink` answers it by scanning a locally persisted donor
//! directory, measuring great-circle distance to each compatible donor, and
//! ranking them with an additive urgency score.
//!
//! ## Features
//!
//! - **Persistent directory**: donors live in a key-value slot and are
//!   rewritten on every registration; a fixed seed set fills an empty store
//! - **Silent recovery**: malformed persisted state falls back to the seed set
//! - **Haversine distance**: great-circle kilometres on a 6371 km sphere
//! - **Urgency scoring**: urgency, distance, rarity, and a random reliability
//!   factor, with an injectable random source for reproducible runs
//! - **Bounded results**: at most five candidates, best first
//!
//! ## Example
//!
//! ```rust
//! use bloodlink::{BloodRequest, BloodType, Coordinates, DonorDirectory, MatchingEngine};
//! use bloodlink::core::types::UrgencyLevel;
//! use bloodlink::directory::MemoryStore;
//!
//! // Start from the seed donors
//! let directory = DonorDirectory::initialize(Box::new(MemoryStore::new()));
//!
//! let request = BloodRequest::new(
//!     Some(BloodType::ANegative),
//!     Some(UrgencyLevel::High),
//!     Coordinates::new(28.61, 77.20),
//! );
//!
//! let engine = MatchingEngine::new(&directory);
//! let matches = engine.find_matches(&request);
//! assert_eq!(matches[0].donor.name, "Priya M.");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Donor, request, and blood type data types
//! - [`directory`]: Donor directory and its key-value persistence
//! - [`geo`]: Great-circle distance
//! - [`matching`]: Matching engine and urgency scoring
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod directory;
pub mod geo;
pub mod matching;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::donor::{DonorRecord, DonorRegistration};
pub use core::request::BloodRequest;
pub use core::types::*;
pub use directory::DonorDirectory;
pub use geo::{distance_km, Coordinates};
pub use matching::engine::{MatchCandidate, MatchingEngine};
pub use matching::scoring::score;
