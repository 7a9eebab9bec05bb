//! Donor matching engine and urgency scoring.
//!
//! - [`MatchingEngine`]: ranks directory donors against a [`BloodRequest`]
//! - [`ScoreBreakdown`]: component scores for one donor/request pair
//!
//! ## Matching Algorithm
//!
//! 1. **Compatibility filter**: donors of the requested type, plus every O-
//!    donor (universal donor rule, no further ABO/Rh modelling)
//! 2. **Distance**: haversine distance from requester to donor
//! 3. **Scoring**: additive urgency score per candidate
//! 4. **Ranking**: score descending, ties in directory order
//! 5. **Truncation**: at most [`MAX_MATCHES`] candidates
//!
//! ## Scoring
//!
//! | Component   | Value                                    |
//! |-------------|------------------------------------------|
//! | Urgency     | critical 40, high 30, scheduled/other 15 |
//! | Distance    | `max(0, 30 - 2 * km)`                    |
//! | Rarity      | +20 when O-, AB-, or B- is requested     |
//! | Reliability | uniform random in [0, 10]                |
//!
//! The total is rounded to the nearest integer. Because reliability is random,
//! rankings can change between calls; inject a seeded generator through
//! [`MatchingEngine::find_matches_with_rng`] for repeatable output.
//!
//! ## Example
//!
//! ```rust
//! use bloodlink::core::request::BloodRequest;
//! use bloodlink::core::types::{BloodType, UrgencyLevel};
//! use bloodlink::directory::{DonorDirectory, MemoryStore};
//! use bloodlink::geo::Coordinates;
//! use bloodlink::matching::MatchingEngine;
//!
//! let directory = DonorDirectory::initialize(Box::new(MemoryStore::new()));
//! let engine = MatchingEngine::new(&directory);
//!
//! let request = BloodRequest::new(
//!     Some(BloodType::OPositive),
//!     Some(UrgencyLevel::Critical),
//!     Coordinates::new(28.61, 77.20),
//! );
//! for m in engine.find_matches(&request) {
//!     println!("{}: {} ({} km)", m.donor.name, m.score, m.distance_km);
//! }
//! ```
//!
//! [`BloodRequest`]: crate::core::request::BloodRequest

pub mod engine;
pub mod scoring;

pub use engine::{MatchCandidate, MatchingEngine, MAX_MATCHES};
pub use scoring::ScoreBreakdown;
