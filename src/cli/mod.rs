//! Command-line interface for bloodlink.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **match**: Rank nearby compatible donors for a blood request
//! - **donor**: List, show, register, or export donors in the directory
//! - **distance**: Great-circle distance between two points
//!
//! ## Usage
//!
//! ```text
//! # Find donors for a critical O- request at the default location
//! bloodlink match --blood-type O- --urgency critical
//!
//! # Reproducible ranking, JSON output for scripting
//! bloodlink match --blood-type A- --urgency high --seed 7 --format json
//!
//! # Register a donor into a specific data directory
//! bloodlink --data-dir /var/lib/bloodlink donor register \
//!     --name "Neha R." --blood-type B- --phone 9123456789 --lat 28.63 --lon 77.22
//!
//! # Distance between two points
//! bloodlink distance 28.61 77.20 28.62 77.21
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::directory::{DonorDirectory, FileStore};

pub mod distance;
pub mod donor;
pub mod find;

#[derive(Parser)]
#[command(name = "bloodlink")]
#[command(author = "BloodLink")]
#[command(version)]
#[command(about = "Match blood requests to nearby compatible donors")]
#[command(
    long_about = "bloodlink keeps a local directory of registered blood donors and ranks them against incoming requests.\n\nFor each request it:\n- Keeps donors of the requested type plus every O- (universal) donor\n- Measures great-circle distance from the requester\n- Scores candidates on urgency, distance, rarity, and reliability\n- Returns the five best, highest score first"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory holding the persisted donor directory
    #[arg(
        long,
        global = true,
        env = "BLOODLINK_DATA_DIR",
        default_value = ".bloodlink"
    )]
    pub data_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the best donors for a blood request
    Match(find::MatchArgs),

    /// Manage the donor directory
    Donor(donor::DonorArgs),

    /// Great-circle distance between two coordinates
    Distance(distance::DistanceArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Open the file-backed directory under `data_dir`
pub(crate) fn open_directory(data_dir: &Path) -> DonorDirectory {
    DonorDirectory::initialize(Box::new(FileStore::new(data_dir)))
}

/// Truncate a string for fixed-width columns
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
