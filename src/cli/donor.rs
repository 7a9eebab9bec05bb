use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::cli::{open_directory, truncate, OutputFormat};
use crate::core::donor::{DonorRecord, DonorRegistration};
use crate::core::types::{BloodType, DonorId};
use crate::geo::Coordinates;

#[derive(Args)]
pub struct DonorArgs {
    #[command(subcommand)]
    pub command: DonorCommands,
}

#[derive(Subcommand)]
pub enum DonorCommands {
    /// List all donors in the directory
    List {
        /// Filter by blood type (e.g., "O-")
        #[arg(long)]
        blood_type: Option<String>,
    },

    /// Show details of a specific donor
    Show {
        /// Donor ID
        #[arg(required = true)]
        id: u64,
    },

    /// Register a new donor
    Register {
        /// Donor display name
        #[arg(long, required = true)]
        name: String,

        /// Blood type (O+, O-, A+, A-, B+, B-, AB+, AB-)
        #[arg(long, required = true)]
        blood_type: String,

        /// Contact phone, at least 10 characters
        #[arg(long, required = true)]
        phone: String,

        /// Latitude of the donor's location
        #[arg(long, required = true, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude of the donor's location
        #[arg(long, required = true, allow_negative_numbers = true)]
        lon: f64,

        /// Date of the last donation (YYYY-MM-DD)
        #[arg(long)]
        last_donated: Option<NaiveDate>,
    },

    /// Export the directory to a JSON file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,
    },
}

pub fn run(
    args: DonorArgs,
    data_dir: &Path,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    match args.command {
        DonorCommands::List { blood_type } => {
            run_list(data_dir, blood_type.as_deref(), format, verbose)
        }
        DonorCommands::Show { id } => run_show(data_dir, DonorId::new(id), format),
        DonorCommands::Register {
            name,
            blood_type,
            phone,
            lat,
            lon,
            last_donated,
        } => {
            let registration = DonorRegistration {
                name,
                blood_type: blood_type.parse::<BloodType>()?,
                phone,
                location: Coordinates::new(lat, lon),
                last_donation_date: last_donated,
            };
            run_register(data_dir, registration, format)
        }
        DonorCommands::Export { output } => run_export(data_dir, &output),
    }
}

fn run_list(
    data_dir: &Path,
    blood_type_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let directory = open_directory(data_dir);

    if verbose {
        eprintln!(
            "Loaded {} donors from {} ({:?})",
            directory.len(),
            data_dir.display(),
            directory.source()
        );
    }

    let filter = blood_type_filter
        .map(str::parse::<BloodType>)
        .transpose()?;

    let filtered: Vec<&DonorRecord> = directory
        .all()
        .iter()
        .filter(|d| filter.map_or(true, |t| d.blood_type == t))
        .collect();

    match format {
        OutputFormat::Text => {
            let id_width = filtered
                .iter()
                .map(|d| d.id.to_string().len())
                .max()
                .unwrap_or(2)
                .max(2);
            let name_width = filtered
                .iter()
                .map(|d| d.name.chars().count().min(30))
                .max()
                .unwrap_or(4)
                .max(4);

            let total_width = id_width + name_width + 5 + 12 + 12 + 4;

            println!("Donor Directory ({} donors)\n", filtered.len());
            println!(
                "{:<id_w$} {:<name_w$} {:<5} {:<12} {:<12}",
                "ID",
                "Name",
                "Type",
                "Phone",
                "Last Donated",
                id_w = id_width,
                name_w = name_width
            );
            println!("{}", "-".repeat(total_width));

            for d in &filtered {
                println!(
                    "{:<id_w$} {:<name_w$} {:<5} {:<12} {:<12}",
                    d.id,
                    truncate(&d.name, name_width),
                    d.blood_type,
                    d.phone,
                    last_donated(d),
                    id_w = id_width,
                    name_w = name_width
                );
                if verbose {
                    println!("  └─ Location: {}", d.location);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        OutputFormat::Tsv => {
            println!("id\tname\tblood_type\tlat\tlon\tlast_donation_date\tphone");
            for d in &filtered {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    d.id,
                    d.name,
                    d.blood_type,
                    d.location.lat,
                    d.location.lon,
                    d.last_donation_date
                        .map(|date| date.to_string())
                        .unwrap_or_default(),
                    d.phone
                );
            }
        }
    }

    Ok(())
}

fn run_show(data_dir: &Path, id: DonorId, format: OutputFormat) -> anyhow::Result<()> {
    let directory = open_directory(data_dir);
    let donor = directory
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Donor '{}' not found", id))?;

    match format {
        OutputFormat::Text => print_donor(donor),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(donor)?),
        OutputFormat::Tsv => {
            println!("field\tvalue");
            println!("id\t{}", donor.id);
            println!("name\t{}", donor.name);
            println!("blood_type\t{}", donor.blood_type);
            println!("lat\t{}", donor.location.lat);
            println!("lon\t{}", donor.location.lon);
            println!("last_donation_date\t{}", last_donated(donor));
            println!("phone\t{}", donor.phone);
        }
    }

    Ok(())
}

fn run_register(
    data_dir: &Path,
    registration: DonorRegistration,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut directory = open_directory(data_dir);

    let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
    let record = registration.into_record(directory.next_id(now)?)?;
    directory.add(record.clone())?;

    match format {
        OutputFormat::Text => {
            println!("Registered donor {} ({})\n", record.name, record.blood_type);
            print_donor(&record);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Tsv => {
            println!("id\tname\tblood_type");
            println!("{}\t{}\t{}", record.id, record.name, record.blood_type);
        }
    }

    Ok(())
}

fn run_export(data_dir: &Path, output: &Path) -> anyhow::Result<()> {
    let directory = open_directory(data_dir);

    let json = directory.to_json()?;
    std::fs::write(output, json)?;

    println!(
        "Exported {} donors to {}",
        directory.len(),
        output.display()
    );

    Ok(())
}

fn print_donor(donor: &DonorRecord) {
    println!("Donor: {}\n", donor.name);
    println!("ID:           {}", donor.id);
    println!("Blood Type:   {}", donor.blood_type);
    println!("Location:     {}", donor.location);
    println!("Last Donated: {}", last_donated(donor));
    println!("Phone:        {}", donor.phone);
}

fn last_donated(donor: &DonorRecord) -> String {
    donor
        .last_donation_date
        .map_or_else(|| "-".to_string(), |date| date.to_string())
}
