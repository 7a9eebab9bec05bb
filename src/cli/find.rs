use std::path::Path;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::{open_directory, truncate, OutputFormat};
use crate::core::request::BloodRequest;
use crate::core::types::{BloodType, UrgencyLevel};
use crate::geo::Coordinates;
use crate::matching::{MatchCandidate, MatchingEngine};
use crate::utils::validation::validate_coordinates;

/// Requester location used when none is given
pub const DEFAULT_LOCATION: Coordinates = Coordinates::new(28.61, 77.20);

/// Scores above this are flagged as high matches in text output
const HIGH_MATCH_SCORE: i64 = 80;

/// Shown when no donor passes the compatibility filter
pub const NO_MATCHES_MESSAGE: &str = "No immediate matches found. Network alert sent.";

#[derive(Args)]
pub struct MatchArgs {
    /// Requested blood type (O+, O-, A+, A-, B+, B-, AB+, AB-)
    #[arg(long, required = true)]
    pub blood_type: String,

    /// Urgency level (critical, high, scheduled)
    #[arg(long, default_value = "scheduled")]
    pub urgency: String,

    /// Requester latitude
    #[arg(long, default_value_t = DEFAULT_LOCATION.lat, allow_negative_numbers = true)]
    pub lat: f64,

    /// Requester longitude
    #[arg(long, default_value_t = DEFAULT_LOCATION.lon, allow_negative_numbers = true)]
    pub lon: f64,

    /// Contact phone for the request
    #[arg(long)]
    pub phone: Option<String>,

    /// Seed the reliability factor for a reproducible ranking
    #[arg(long)]
    pub seed: Option<u64>,
}

impl MatchArgs {
    /// Build the request. Unknown types and urgencies become `None` rather
    /// than errors, so an unknown type only reaches O- donors.
    fn to_request(&self) -> BloodRequest {
        let blood_type = self.blood_type.parse::<BloodType>().ok();
        let urgency = UrgencyLevel::parse_lenient(&self.urgency);
        let request = BloodRequest::new(blood_type, urgency, Coordinates::new(self.lat, self.lon));
        match &self.phone {
            Some(phone) => request.with_phone(phone),
            None => request,
        }
    }
}

pub fn run(
    args: MatchArgs,
    data_dir: &Path,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let request = args.to_request();
    validate_coordinates(request.location)?;

    let directory = open_directory(data_dir);

    if verbose {
        eprintln!(
            "Searching {} donors for {} ({}) near {}",
            directory.len(),
            display_type(request.blood_type),
            display_urgency(request.urgency),
            request.location
        );
    }

    let engine = MatchingEngine::new(&directory);
    let matches = match args.seed {
        Some(seed) => engine.find_matches_with_rng(&request, &mut StdRng::seed_from_u64(seed)),
        None => engine.find_matches(&request),
    };

    match format {
        OutputFormat::Text => print_text_results(&request, &matches, verbose),
        OutputFormat::Json => print_json_results(&request, &matches)?,
        OutputFormat::Tsv => print_tsv_results(&matches),
    }

    Ok(())
}

fn display_type(blood_type: Option<BloodType>) -> &'static str {
    blood_type.map_or("unknown type", BloodType::as_str)
}

fn display_urgency(urgency: Option<UrgencyLevel>) -> &'static str {
    urgency.map_or("unspecified", UrgencyLevel::as_str)
}

fn print_text_results(request: &BloodRequest, matches: &[MatchCandidate], verbose: bool) {
    if matches.is_empty() {
        println!("{NO_MATCHES_MESSAGE}");
        return;
    }

    println!(
        "Donor matches for {} ({}) near {}\n",
        display_type(request.blood_type),
        display_urgency(request.urgency),
        request.location
    );
    println!(
        "{:>4}  {:<20} {:<5} {:>10} {:>6}",
        "Rank", "Donor", "Type", "Distance", "Score"
    );
    println!("{}", "-".repeat(50));

    for (i, m) in matches.iter().enumerate() {
        let marker = if m.score > HIGH_MATCH_SCORE {
            "  HIGH MATCH"
        } else {
            ""
        };
        println!(
            "{:>4}  {:<20} {:<5} {:>7.1} km {:>6}{}",
            i + 1,
            truncate(&m.donor.name, 20),
            m.donor.blood_type,
            m.distance_km,
            m.score,
            marker
        );
        if verbose {
            let b = &m.breakdown;
            println!(
                "      └─ urgency {:.0} + distance {:.1} + rarity {:.0} + reliability {:.1}  phone {}",
                b.urgency, b.distance, b.rarity, b.reliability, m.donor.phone
            );
        }
    }
}

fn print_json_results(request: &BloodRequest, matches: &[MatchCandidate]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = matches
        .iter()
        .enumerate()
        .map(|(i, m)| {
            serde_json::json!({
                "rank": i + 1,
                "donor": m.donor,
                "distance_km": m.distance_km,
                "score": m.score,
                "components": {
                    "urgency": m.breakdown.urgency,
                    "distance": m.breakdown.distance,
                    "rarity": m.breakdown.rarity,
                    "reliability": m.breakdown.reliability,
                },
            })
        })
        .collect();

    let json = serde_json::json!({
        "request": request,
        "matches": output,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_tsv_results(matches: &[MatchCandidate]) {
    println!("rank\tid\tname\tblood_type\tdistance_km\tscore\tphone");
    for (i, m) in matches.iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{}\t{:.1}\t{}\t{}",
            i + 1,
            m.donor.id,
            m.donor.name,
            m.donor.blood_type,
            m.distance_km,
            m.score,
            m.donor.phone
        );
    }
}
