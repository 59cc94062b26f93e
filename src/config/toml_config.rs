use crate::domain::model::ChartStyle;
use crate::utils::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File form of the catalog configuration. Every field is optional so a
/// file only has to name what it wants to change; CLI flags override file
/// values on top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogToml {
    pub feeds: Option<FeedsSection>,
    pub http: Option<HttpSection>,
    pub filter: Option<FilterSection>,
    pub render: Option<RenderSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedsSection {
    pub json_endpoint: Option<String>,
    pub xml_endpoint: Option<String>,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpSection {
    pub timeout_seconds: Option<u64>,
}

/// Price bounds are kept as text here on purpose: they follow the same
/// permissive parse as the CLI flags, where a non-numeric bound means
/// "no bound" instead of a hard error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSection {
    pub r#type: Option<String>,
    pub manufacturer: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSection {
    pub chart_style: Option<ChartStyle>,
    pub show_quantity: Option<bool>,
}

impl CatalogToml {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CatalogError::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }
}
