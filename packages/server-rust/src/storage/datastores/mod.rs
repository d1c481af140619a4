//! `MapDataStore` implementations.
//!
//! [`NullDataStore`] for ephemeral data and tests, [`FileDataStore`] for
//! JSON-file persistence under a data directory.

mod file;
mod null;

pub use file::FileDataStore;
pub use null::NullDataStore;
