use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::core::donor::DonorRecord;
use crate::core::request::BloodRequest;
use crate::directory::DonorDirectory;
use crate::geo::{distance_km, round_to_tenth};
use crate::matching::scoring::ScoreBreakdown;

/// Maximum number of candidates returned for a request
pub const MAX_MATCHES: usize = 5;

/// A donor projected against one request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    /// The matched donor
    #[serde(flatten)]
    pub donor: DonorRecord,

    /// Requester-to-donor distance, one decimal place
    pub distance_km: f64,

    /// Ranking key
    pub score: i64,

    /// Component scores behind `score`
    #[serde(skip)]
    pub breakdown: ScoreBreakdown,
}

impl MatchCandidate {
    pub fn new<R: Rng + ?Sized>(donor: &DonorRecord, request: &BloodRequest, rng: &mut R) -> Self {
        let distance = distance_km(request.location, donor.location);
        let breakdown = ScoreBreakdown::calculate(request, donor, distance, rng);

        Self {
            donor: donor.clone(),
            distance_km: round_to_tenth(distance),
            score: breakdown.total,
            breakdown,
        }
    }
}

/// Ranks directory donors against blood requests
pub struct MatchingEngine<'a> {
    directory: &'a DonorDirectory,
}

impl<'a> MatchingEngine<'a> {
    pub fn new(directory: &'a DonorDirectory) -> Self {
        Self { directory }
    }

    /// Find the best donors for a request, sampling reliability from the
    /// thread-local generator.
    pub fn find_matches(&self, request: &BloodRequest) -> Vec<MatchCandidate> {
        self.find_matches_with_rng(request, &mut rand::thread_rng())
    }

    /// Find the best donors for a request.
    ///
    /// Candidates are donors of the requested type plus every O- donor. They
    /// are ranked by score, highest first; equal scores keep directory order.
    /// At most [`MAX_MATCHES`] are returned, and an empty result means no
    /// donor passed the filter.
    pub fn find_matches_with_rng<R: Rng + ?Sized>(
        &self,
        request: &BloodRequest,
        rng: &mut R,
    ) -> Vec<MatchCandidate> {
        // Step 1: Compatibility filter
        let mut results: Vec<MatchCandidate> = self
            .directory
            .all()
            .iter()
            .filter(|donor| donor.blood_type.can_donate_to(request.blood_type))
            // Step 2: Distance and score
            .map(|donor| MatchCandidate::new(donor, request, &mut *rng))
            .collect();

        debug!(
            scanned = self.directory.len(),
            candidates = results.len(),
            "Compatibility filter applied"
        );

        // Step 3: Stable sort by score descending
        results.sort_by(|a, b| b.score.cmp(&a.score));

        // Step 4: Truncate
        results.truncate(MAX_MATCHES);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BloodType, DonorId, UrgencyLevel};
    use crate::directory::MemoryStore;
    use crate::geo::Coordinates;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const REQUESTER: Coordinates = Coordinates::new(28.61, 77.20);

    fn seeded_directory() -> DonorDirectory {
        DonorDirectory::initialize(Box::new(MemoryStore::new()))
    }

    fn donor(id: u64, blood_type: BloodType, location: Coordinates) -> DonorRecord {
        DonorRecord::new(
            DonorId::new(id),
            format!("Donor {id}"),
            blood_type,
            location,
            "9000000000",
        )
    }

    fn request(blood_type: Option<BloodType>, urgency: UrgencyLevel) -> BloodRequest {
        BloodRequest::new(blood_type, Some(urgency), REQUESTER)
    }

    #[test]
    fn test_find_matches_seed_a_negative() {
        let directory = seeded_directory();
        let engine = MatchingEngine::new(&directory);
        let mut rng = StdRng::seed_from_u64(1);

        let req = request(Some(BloodType::ANegative), UrgencyLevel::High);
        let matches = engine.find_matches_with_rng(&req, &mut rng);

        let ids: Vec<u64> = matches.iter().map(|m| m.donor.id.0).collect();
        assert_eq!(ids, vec![2]);
        assert!((matches[0].distance_km - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_find_matches_seed_o_positive() {
        let directory = seeded_directory();
        let engine = MatchingEngine::new(&directory);
        let mut rng = StdRng::seed_from_u64(2);

        let req = request(Some(BloodType::OPositive), UrgencyLevel::Critical);
        let matches = engine.find_matches_with_rng(&req, &mut rng);

        let mut ids: Vec<u64> = matches.iter().map(|m| m.donor.id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_find_matches_no_candidates() {
        let directory = seeded_directory();
        let engine = MatchingEngine::new(&directory);
        let mut rng = StdRng::seed_from_u64(3);

        let req = request(Some(BloodType::AbPositive), UrgencyLevel::Critical);
        assert!(engine.find_matches_with_rng(&req, &mut rng).is_empty());

        // Unknown type only reaches O- donors, and the seed set has none
        let req = request(None, UrgencyLevel::Critical);
        let matches = engine.find_matches_with_rng(&req, &mut rng);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_universal_donor_always_included() {
        let mut directory = seeded_directory();
        directory
            .add(donor(10, BloodType::ONegative, Coordinates::new(28.70, 77.30)))
            .unwrap();
        let engine = MatchingEngine::new(&directory);
        let mut rng = StdRng::seed_from_u64(4);

        for requested in [Some(BloodType::AbPositive), Some(BloodType::ANegative), None] {
            let req = request(requested, UrgencyLevel::Scheduled);
            let matches = engine.find_matches_with_rng(&req, &mut rng);
            assert!(matches.iter().any(|m| m.donor.id == DonorId::new(10)));
            assert!(matches.iter().all(|m| {
                Some(m.donor.blood_type) == requested || m.donor.blood_type == BloodType::ONegative
            }));
        }
    }

    #[test]
    fn test_find_matches_limit_and_order() {
        let store = MemoryStore::new().with_slot(crate::directory::STORAGE_KEY, "[]");
        let mut directory = DonorDirectory::initialize(Box::new(store));
        for i in 0..12u32 {
            let offset = f64::from(i) * 0.01;
            directory
                .add(donor(
                    u64::from(i) + 1,
                    BloodType::BPositive,
                    Coordinates::new(28.61 + offset, 77.20),
                ))
                .unwrap();
        }
        let engine = MatchingEngine::new(&directory);
        let mut rng = StdRng::seed_from_u64(5);

        let req = request(Some(BloodType::BPositive), UrgencyLevel::High);
        let matches = engine.find_matches_with_rng(&req, &mut rng);

        assert_eq!(matches.len(), MAX_MATCHES);
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_directory_order() {
        /// Always samples zero reliability
        struct ZeroRng;

        impl rand::RngCore for ZeroRng {
            fn next_u32(&mut self) -> u32 {
                0
            }
            fn next_u64(&mut self) -> u64 {
                0
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                dest.fill(0);
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                dest.fill(0);
                Ok(())
            }
        }

        let store = MemoryStore::new().with_slot(crate::directory::STORAGE_KEY, "[]");
        let mut directory = DonorDirectory::initialize(Box::new(store));
        for id in [30, 10, 20] {
            directory.add(donor(id, BloodType::APositive, REQUESTER)).unwrap();
        }
        let engine = MatchingEngine::new(&directory);

        let req = request(Some(BloodType::APositive), UrgencyLevel::High);
        let matches = engine.find_matches_with_rng(&req, &mut ZeroRng);

        let ids: Vec<u64> = matches.iter().map(|m| m.donor.id.0).collect();
        assert_eq!(ids, vec![30, 10, 20]);
        assert!(matches.iter().all(|m| m.score == 60));
    }

    #[test]
    fn test_registered_donor_is_found() {
        let mut directory = seeded_directory();
        directory
            .add(donor(77, BloodType::AbNegative, Coordinates::new(28.611, 77.201)))
            .unwrap();
        let engine = MatchingEngine::new(&directory);
        let mut rng = StdRng::seed_from_u64(6);

        let req = request(Some(BloodType::AbNegative), UrgencyLevel::Critical);
        let matches = engine.find_matches_with_rng(&req, &mut rng);
        let best = &matches[0];
        assert_eq!(best.donor.id, DonorId::new(77));
        assert!(best.score >= 89);
    }

    #[test]
    fn test_candidate_serializes_flat() {
        let directory = seeded_directory();
        let candidate = MatchCandidate::new(
            &directory.all()[1],
            &request(Some(BloodType::ANegative), UrgencyLevel::High),
            &mut StdRng::seed_from_u64(8),
        );
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["bloodType"], "A-");
        assert_eq!(json["distanceKm"], 1.5);
        assert!(json["score"].is_i64());
        assert!(json.get("breakdown").is_none());
    }
}
