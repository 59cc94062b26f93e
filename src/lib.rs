pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::html::HtmlSink;
pub use config::CatalogSettings;
pub use core::engine::{CatalogEngine, RunSummary, JSON_TARGET, XML_TARGET};
pub use core::fetch::CatalogClient;
pub use domain::model::{FilterCriteria, Part};
pub use utils::error::{CatalogError, Result};
