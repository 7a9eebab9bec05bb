use clap::Args;

use crate::cli::OutputFormat;
use crate::geo::{distance_km, round_to_tenth, Coordinates};
use crate::utils::validation::validate_coordinates;

#[derive(Args)]
pub struct DistanceArgs {
    /// Latitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lat1: f64,

    /// Longitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lon1: f64,

    /// Latitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lat2: f64,

    /// Longitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lon2: f64,
}

pub fn run(args: DistanceArgs, format: OutputFormat) -> anyhow::Result<()> {
    let from = Coordinates::new(args.lat1, args.lon1);
    let to = Coordinates::new(args.lat2, args.lon2);
    validate_coordinates(from)?;
    validate_coordinates(to)?;

    let km = distance_km(from, to);

    match format {
        OutputFormat::Text => println!("{:.1} km", round_to_tenth(km)),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "from": from,
                "to": to,
                "distance_km": km,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("lat1\tlon1\tlat2\tlon2\tdistance_km");
            println!(
                "{}\t{}\t{}\t{}\t{:.4}",
                from.lat, from.lon, to.lat, to.lon, km
            );
        }
    }

    Ok(())
}
