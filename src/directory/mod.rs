//! Donor directory storage.
//!
//! The directory is the single source of truth for registered donors. It is
//! constructed once per process from a [`KeyValueStore`] slot, falling back
//! to a fixed seed set of sample donors when the slot is absent or malformed.
//! Every [`DonorDirectory::add`] rewrites the whole slot.
//!
//! ## Example
//!
//! ```rust
//! use bloodlink::directory::{DonorDirectory, MemoryStore};
//!
//! let directory = DonorDirectory::initialize(Box::new(MemoryStore::new()));
//! for donor in directory.all() {
//!     println!("{} ({})", donor.name, donor.blood_type);
//! }
//! ```
//!
//! ## Persistent storage
//!
//! ```rust,no_run
//! use bloodlink::directory::{DonorDirectory, FileStore};
//!
//! // Reads and writes `.bloodlink/bloodLinkDonors.json`
//! let directory = DonorDirectory::initialize(Box::new(FileStore::new(".bloodlink")));
//! println!("{}", directory.to_json().unwrap());
//! ```

pub mod kv;
pub mod store;

pub use kv::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use store::{DirectoryError, DirectorySource, DonorDirectory, STORAGE_KEY};
