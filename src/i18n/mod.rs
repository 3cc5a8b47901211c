//! Language data for target selection.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for every language the generation
//!   service can target, with lookup by code and grouping by family
//! - `selection`: The ordered set of codes a user has picked for a request
//!
//! # Example
//!
//! ```rust,ignore
//! use linguist::i18n::{LanguageCatalog, SelectedLanguages};
//!
//! let catalog = LanguageCatalog::get();
//! let french = catalog.resolve("fr");
//!
//! let mut selection = SelectedLanguages::from_iter(["en"]);
//! selection.add("fr");
//! ```

mod registry;
mod selection;

pub use registry::{CodePartition, LanguageCatalog, LanguageFamily, LanguageRecord};
pub use selection::SelectedLanguages;
