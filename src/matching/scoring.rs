use rand::Rng;
use serde::Serialize;

use crate::core::donor::DonorRecord;
use crate::core::request::BloodRequest;
use crate::core::types::UrgencyLevel;

/// Urgency weight for an unrecognized or missing level
pub const DEFAULT_URGENCY_WEIGHT: f64 = 15.0;

/// Distance bonus at 0 km; loses 2 points per km
pub const MAX_DISTANCE_BONUS: f64 = 30.0;

/// Points lost per kilometre of distance
pub const DISTANCE_PENALTY_PER_KM: f64 = 2.0;

/// Flat boost when the requested type is rare
pub const RARITY_BOOST: f64 = 20.0;

/// Upper bound of the sampled reliability factor
pub const MAX_RELIABILITY: f64 = 10.0;

/// Score for one (request, donor, distance) triple, broken into components
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// 40 critical, 30 high, 15 scheduled or unknown
    pub urgency: f64,

    /// `max(0, 30 - 2 * distance_km)`
    pub distance: f64,

    /// 20 when the requested type is O-, AB-, or B-
    pub rarity: f64,

    /// Uniform sample in [0, 10], drawn fresh on every call
    pub reliability: f64,

    /// Sum of the components, rounded to the nearest integer
    pub total: i64,
}

impl ScoreBreakdown {
    /// Score a donor for a request.
    ///
    /// The reliability component is sampled from `rng`, so two calls with the
    /// same inputs generally differ. Pass a seeded generator for reproducible
    /// results.
    pub fn calculate<R: Rng + ?Sized>(
        request: &BloodRequest,
        _donor: &DonorRecord,
        distance_km: f64,
        rng: &mut R,
    ) -> Self {
        let urgency = urgency_weight(request.urgency);
        let distance = distance_factor(distance_km);
        let rarity = if request.blood_type.is_some_and(|t| t.is_rare()) {
            RARITY_BOOST
        } else {
            0.0
        };
        let reliability = rng.gen_range(0.0..=MAX_RELIABILITY);

        #[allow(clippy::cast_possible_truncation)] // Bounded well inside i64
        let total = (urgency + distance + rarity + reliability).round() as i64;

        Self {
            urgency,
            distance,
            rarity,
            reliability,
            total,
        }
    }

    /// The deterministic part of the score (everything except reliability)
    #[must_use]
    pub fn base(&self) -> f64 {
        self.urgency + self.distance + self.rarity
    }
}

/// Weight contributed by the request's urgency
#[must_use]
pub fn urgency_weight(urgency: Option<UrgencyLevel>) -> f64 {
    match urgency {
        Some(UrgencyLevel::Critical) => 40.0,
        Some(UrgencyLevel::High) => 30.0,
        Some(UrgencyLevel::Scheduled) | None => DEFAULT_URGENCY_WEIGHT,
    }
}

/// Linear distance bonus: 30 at 0 km, 20 at 5 km, 0 from 15 km on.
///
/// There is no flat plateau for nearby donors; every kilometre costs two
/// points.
#[must_use]
pub fn distance_factor(distance_km: f64) -> f64 {
    (MAX_DISTANCE_BONUS - distance_km * DISTANCE_PENALTY_PER_KM).max(0.0)
}

/// Score a donor with the thread-local generator.
pub fn score(request: &BloodRequest, donor: &DonorRecord, distance_km: f64) -> i64 {
    ScoreBreakdown::calculate(request, donor, distance_km, &mut rand::thread_rng()).total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BloodType, DonorId};
    use crate::geo::Coordinates;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn donor() -> DonorRecord {
        DonorRecord::new(
            DonorId::new(1),
            "Rahul S.",
            BloodType::OPositive,
            Coordinates::new(28.61, 77.20),
            "9876543210",
        )
    }

    fn request(blood_type: Option<BloodType>, urgency: Option<UrgencyLevel>) -> BloodRequest {
        BloodRequest::new(blood_type, urgency, Coordinates::new(28.61, 77.20))
    }

    #[test]
    fn test_urgency_weights() {
        assert!((urgency_weight(Some(UrgencyLevel::Critical)) - 40.0).abs() < 1e-12);
        assert!((urgency_weight(Some(UrgencyLevel::High)) - 30.0).abs() < 1e-12);
        assert!((urgency_weight(Some(UrgencyLevel::Scheduled)) - 15.0).abs() < 1e-12);
        assert!((urgency_weight(None) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_factor_is_linear() {
        assert!((distance_factor(0.0) - 30.0).abs() < 1e-12);
        // 5 km keeps 20, not the full 30
        assert!((distance_factor(5.0) - 20.0).abs() < 1e-12);
        assert!((distance_factor(7.5) - 15.0).abs() < 1e-12);
        assert!(distance_factor(15.0).abs() < 1e-12);
        assert!(distance_factor(20.0).abs() < 1e-12);
        assert!(distance_factor(20_000.0).abs() < 1e-12);
    }

    #[test]
    fn test_critical_rare_at_zero_distance() {
        let mut rng = StdRng::seed_from_u64(7);
        let req = request(Some(BloodType::ONegative), Some(UrgencyLevel::Critical));

        for _ in 0..200 {
            let s = ScoreBreakdown::calculate(&req, &donor(), 0.0, &mut rng);
            assert!((s.urgency - 40.0).abs() < 1e-12);
            assert!((s.distance - 30.0).abs() < 1e-12);
            assert!((s.rarity - 20.0).abs() < 1e-12);
            assert!((0.0..=10.0).contains(&s.reliability));
            assert!((90..=100).contains(&s.total), "total {}", s.total);
        }
    }

    #[test]
    fn test_scheduled_unknown_type_far_away() {
        let mut rng = StdRng::seed_from_u64(11);
        let req = request(None, Some(UrgencyLevel::Scheduled));

        for _ in 0..200 {
            let s = ScoreBreakdown::calculate(&req, &donor(), 20.0, &mut rng);
            assert!((s.base() - 15.0).abs() < 1e-12);
            assert!((15..=25).contains(&s.total), "total {}", s.total);
        }
    }

    #[test]
    fn test_rarity_depends_on_requested_type_only() {
        let mut rng = StdRng::seed_from_u64(3);
        for blood_type in BloodType::ALL {
            let req = request(Some(blood_type), Some(UrgencyLevel::High));
            let s = ScoreBreakdown::calculate(&req, &donor(), 1.0, &mut rng);
            let expected = if blood_type.is_rare() { 20.0 } else { 0.0 };
            assert!((s.rarity - expected).abs() < 1e-12, "{blood_type}");
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let req = request(Some(BloodType::ANegative), Some(UrgencyLevel::High));
        let a = ScoreBreakdown::calculate(&req, &donor(), 2.3, &mut StdRng::seed_from_u64(42));
        let b = ScoreBreakdown::calculate(&req, &donor(), 2.3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_reliability_varies_between_calls() {
        let req = request(Some(BloodType::ANegative), None);
        let mut rng = StdRng::seed_from_u64(5);
        let samples: Vec<f64> = (0..20)
            .map(|_| ScoreBreakdown::calculate(&req, &donor(), 3.0, &mut rng).reliability)
            .collect();
        assert!(samples.windows(2).any(|w| (w[0] - w[1]).abs() > 1e-9));
    }

    #[test]
    fn test_total_is_rounded_sum() {
        let req = request(Some(BloodType::BPositive), Some(UrgencyLevel::High));
        let mut rng = StdRng::seed_from_u64(99);
        for distance in [0.0, 1.3, 4.44, 9.9, 14.0] {
            let s = ScoreBreakdown::calculate(&req, &donor(), distance, &mut rng);
            let raw = s.base() + s.reliability;
            assert!((raw - s.total as f64).abs() <= 0.5 + 1e-9);
        }
    }

    #[test]
    fn test_breakdown_serializes_components() {
        let req = request(Some(BloodType::BNegative), Some(UrgencyLevel::High));
        let s = ScoreBreakdown::calculate(&req, &donor(), 5.0, &mut StdRng::seed_from_u64(1));
        let json = serde_json::to_value(s).unwrap();
        assert_eq!(json["urgency"], 30.0);
        assert_eq!(json["distance"], 20.0);
        assert_eq!(json["rarity"], 20.0);
        assert_eq!(json["total"], s.total);
    }

    #[test]
    fn test_score_with_thread_rng_in_range() {
        let req = request(Some(BloodType::AbNegative), Some(UrgencyLevel::Critical));
        let total = score(&req, &donor(), 0.0);
        assert!((90..=100).contains(&total));
    }
}
