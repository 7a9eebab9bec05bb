use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::donor::DonorRecord;
use crate::core::types::DonorId;
use crate::directory::kv::{KeyValueStore, StoreError};

/// Name of the key-value slot holding the donor collection
pub const STORAGE_KEY: &str = "bloodLinkDonors";

/// Sample donors used when no persisted collection exists
const SEED_DONORS: &str = include_str!("../../seeds/sample_donors.json");

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Donor {0} is already registered")]
    DuplicateId(DonorId),

    #[error("Failed to persist donor directory: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to serialize donor directory: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No unused donor id is left")]
    IdsExhausted,
}

/// Why a persisted collection was rejected
#[derive(Error, Debug)]
enum LoadError {
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate donor id {0}")]
    DuplicateId(DonorId),
}

/// Where the in-memory collection came from on initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorySource {
    Persisted,
    Seed,
}

/// The authoritative donor collection, kept in insertion order and written
/// through to a key-value slot on every mutation.
pub struct DonorDirectory {
    donors: Vec<DonorRecord>,

    /// Index: donor ID -> index in donors vec
    id_to_index: HashMap<DonorId, usize>,

    store: Box<dyn KeyValueStore>,

    source: DirectorySource,
}

impl std::fmt::Debug for DonorDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DonorDirectory")
            .field("donors", &self.donors.len())
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl DonorDirectory {
    /// Load the persisted collection, falling back to the seed set.
    ///
    /// Never fails: a missing, unreadable, or malformed slot yields the seed
    /// donors. Nothing is written here; the slot is only touched by [`add`].
    ///
    /// [`add`]: DonorDirectory::add
    pub fn initialize(store: Box<dyn KeyValueStore>) -> Self {
        let (donors, source) = match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => match parse_collection(&raw) {
                Ok(donors) => (donors, DirectorySource::Persisted),
                Err(e) => {
                    warn!("Persisted donor directory is malformed ({e}); using seed donors");
                    (seed_donors(), DirectorySource::Seed)
                }
            },
            Ok(None) => {
                debug!("No persisted donor directory; using seed donors");
                (seed_donors(), DirectorySource::Seed)
            }
            Err(e) => {
                warn!("Could not read donor directory ({e}); using seed donors");
                (seed_donors(), DirectorySource::Seed)
            }
        };

        let id_to_index = donors
            .iter()
            .enumerate()
            .map(|(index, donor)| (donor.id, index))
            .collect();

        info!(donors = donors.len(), ?source, "Donor directory loaded");

        Self {
            donors,
            id_to_index,
            store,
            source,
        }
    }

    /// Append a donor and persist the whole collection before returning.
    ///
    /// Field semantics are the caller's responsibility; only id uniqueness is
    /// enforced. If persisting fails the donor is not added.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::DuplicateId` if the id is taken, or a store or
    /// serialization error if the collection cannot be written.
    pub fn add(&mut self, donor: DonorRecord) -> Result<(), DirectoryError> {
        if self.id_to_index.contains_key(&donor.id) {
            return Err(DirectoryError::DuplicateId(donor.id));
        }

        self.donors.push(donor);
        if let Err(e) = self.persist() {
            self.donors.pop();
            return Err(e);
        }

        let index = self.donors.len() - 1;
        let donor = &self.donors[index];
        info!(id = %donor.id, blood_type = %donor.blood_type, "Donor registered");
        self.id_to_index.insert(donor.id, index);
        Ok(())
    }

    /// Overwrite the slot with the full collection
    fn persist(&self) -> Result<(), DirectoryError> {
        let serialized = serde_json::to_string(&self.donors)?;
        self.store.set(STORAGE_KEY, &serialized)?;
        debug!(donors = self.donors.len(), "Donor directory persisted");
        Ok(())
    }

    /// Every donor, in insertion order
    #[must_use]
    pub fn all(&self) -> &[DonorRecord] {
        &self.donors
    }

    /// Get a donor by ID
    #[must_use]
    pub fn get(&self, id: DonorId) -> Option<&DonorRecord> {
        self.id_to_index.get(&id).map(|&idx| &self.donors[idx])
    }

    /// An id not yet used in this directory.
    ///
    /// Prefers `timestamp_millis` (registration time), bumping past the current
    /// maximum when the clock would collide or go backwards. When the maximum
    /// is already `u64::MAX`, the smallest unused id is handed out instead.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::IdsExhausted` if every id is taken.
    pub fn next_id(&self, timestamp_millis: u64) -> Result<DonorId, DirectoryError> {
        let max_id = self.donors.iter().map(|d| d.id.0).max().unwrap_or(0);
        if timestamp_millis > max_id {
            return Ok(DonorId::new(timestamp_millis));
        }
        if let Some(next) = max_id.checked_add(1) {
            return Ok(DonorId::new(next));
        }

        (1..=u64::MAX)
            .map(DonorId::new)
            .find(|id| !self.id_to_index.contains_key(id))
            .ok_or(DirectoryError::IdsExhausted)
    }

    /// Export the collection in the persisted layout
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, DirectoryError> {
        Ok(serde_json::to_string_pretty(&self.donors)?)
    }

    /// Whether the collection came from storage or from the seed set
    #[must_use]
    pub fn source(&self) -> DirectorySource {
        self.source
    }

    /// Number of donors in the directory
    #[must_use]
    pub fn len(&self) -> usize {
        self.donors.len()
    }

    /// Check if directory is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }
}

/// Structural validation of a persisted collection
fn parse_collection(raw: &str) -> Result<Vec<DonorRecord>, LoadError> {
    let donors: Vec<DonorRecord> = serde_json::from_str(raw)?;

    let mut seen = HashSet::new();
    for donor in &donors {
        if !seen.insert(donor.id) {
            return Err(LoadError::DuplicateId(donor.id));
        }
    }

    Ok(donors)
}

/// The fixed sample donors
///
/// # Panics
///
/// Never in practice: the embedded file is validated by `build.rs`.
#[must_use]
pub fn seed_donors() -> Vec<DonorRecord> {
    serde_json::from_str(SEED_DONORS).expect("embedded seed donors are validated at build time")
}
