// Base
pub mod consts;
pub mod error;
pub mod config;

// Codec (src/mo/{mod,header,index,strings,layout,reader,writer}.rs)
pub mod mo;

// In-memory catalog and its consumers
pub mod catalog;
pub mod search;
pub mod export;
pub mod doctor;

pub use catalog::{Catalog, Entry};
pub use config::MoConfig;
pub use error::{MoError, Result, StringTable};
pub use mo::{load, load as open, save, save_atomic, save_with_config, IndexEntry, Layout, MoHeader};
