pub mod toml_config;

use crate::config::toml_config::CatalogToml;
use crate::domain::model::{FilterCriteria, RenderOptions};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_JSON_ENDPOINT: &str =
    "https://raw.githubusercontent.com/AndreiRetsja104/APIOfComputerParts/main/data.json";
pub const DEFAULT_XML_ENDPOINT: &str =
    "https://raw.githubusercontent.com/AndreiRetsja104/APIOfComputerParts/main/data.xml";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Fully merged runtime configuration: defaults, then the optional TOML
/// file, then CLI flags.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub json_endpoint: Option<String>,
    pub xml_endpoint: Option<String>,
    pub output_path: String,
    pub timeout_seconds: u64,
    pub criteria: FilterCriteria,
    pub render: RenderOptions,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            json_endpoint: Some(DEFAULT_JSON_ENDPOINT.to_string()),
            xml_endpoint: Some(DEFAULT_XML_ENDPOINT.to_string()),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            criteria: FilterCriteria::default(),
            render: RenderOptions::default(),
        }
    }
}

impl CatalogSettings {
    pub fn from_file(path: &str) -> Result<Self> {
        let mut settings = Self::default();
        settings.apply_file(CatalogToml::from_file(path)?);
        Ok(settings)
    }

    pub fn apply_file(&mut self, file: CatalogToml) {
        if let Some(feeds) = file.feeds {
            if let Some(endpoint) = feeds.json_endpoint {
                self.json_endpoint = Some(endpoint);
            }
            if let Some(endpoint) = feeds.xml_endpoint {
                self.xml_endpoint = Some(endpoint);
            }
            if let Some(path) = feeds.output_path {
                self.output_path = path;
            }
        }
        if let Some(http) = file.http {
            if let Some(timeout) = http.timeout_seconds {
                self.timeout_seconds = timeout;
            }
        }
        if let Some(filter) = file.filter {
            if let Some(part_type) = filter.r#type {
                self.criteria.type_contains = Some(part_type);
            }
            if let Some(manufacturer) = filter.manufacturer {
                self.criteria.manufacturer_contains = Some(manufacturer);
            }
            if filter.price_min.is_some() {
                self.criteria.price_min = FilterCriteria::price_bound(filter.price_min.as_deref());
            }
            if filter.price_max.is_some() {
                self.criteria.price_max = FilterCriteria::price_bound(filter.price_max.as_deref());
            }
        }
        if let Some(render) = file.render {
            if let Some(style) = render.chart_style {
                self.render.chart_style = style;
            }
            if let Some(show) = render.show_quantity {
                self.render.show_quantity = show;
            }
        }
    }
}

impl Validate for CatalogSettings {
    fn validate(&self) -> Result<()> {
        if self.json_endpoint.is_none() && self.xml_endpoint.is_none() {
            return Err(CatalogError::MissingConfig {
                field: "json_endpoint or xml_endpoint".to_string(),
            });
        }
        if let Some(endpoint) = &self.json_endpoint {
            validate_url("json_endpoint", endpoint)?;
        }
        if let Some(endpoint) = &self.xml_endpoint {
            validate_url("xml_endpoint", endpoint)?;
        }
        validate_non_empty_string("output_path", &self.output_path)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

impl ConfigProvider for CatalogSettings {
    fn json_endpoint(&self) -> Option<&str> {
        self.json_endpoint.as_deref()
    }

    fn xml_endpoint(&self) -> Option<&str> {
        self.xml_endpoint.as_deref()
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    fn render_options(&self) -> RenderOptions {
        self.render
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use crate::domain::model::ChartStyle;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "parts-catalog")]
    #[command(about = "Fetches a computer-parts catalog (JSON/XML) and renders HTML cards with a stock chart")]
    pub struct CliConfig {
        #[arg(long, help = "TOML configuration file")]
        pub config: Option<String>,

        #[arg(long, help = "JSON catalog endpoint")]
        pub json_endpoint: Option<String>,

        #[arg(long, help = "XML catalog endpoint")]
        pub xml_endpoint: Option<String>,

        #[arg(long, help = "Directory for the rendered pages")]
        pub output_path: Option<String>,

        #[arg(long, help = "Request timeout in seconds")]
        pub timeout_seconds: Option<u64>,

        #[arg(long = "type", help = "Keep only parts whose type contains this text")]
        pub part_type: Option<String>,

        #[arg(long, help = "Keep only parts whose manufacturer contains this text")]
        pub manufacturer: Option<String>,

        #[arg(long, help = "Inclusive lower price bound")]
        pub price_min: Option<String>,

        #[arg(long, help = "Inclusive upper price bound")]
        pub price_max: Option<String>,

        #[arg(long, value_enum, help = "Stock chart style")]
        pub chart_style: Option<ChartStyle>,

        #[arg(long, help = "Show the legacy quantity field on cards")]
        pub show_quantity: bool,

        #[arg(long, help = "Submit a JSON part file to the JSON endpoint instead of rendering")]
        pub submit_file: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Defaults, then the optional config file, then explicit flags.
        pub fn into_settings(self) -> Result<CatalogSettings> {
            let mut settings = CatalogSettings::default();
            if let Some(path) = &self.config {
                settings.apply_file(CatalogToml::from_file(path)?);
            }

            if let Some(endpoint) = self.json_endpoint {
                settings.json_endpoint = Some(endpoint);
            }
            if let Some(endpoint) = self.xml_endpoint {
                settings.xml_endpoint = Some(endpoint);
            }
            if let Some(path) = self.output_path {
                settings.output_path = path;
            }
            if let Some(timeout) = self.timeout_seconds {
                settings.timeout_seconds = timeout;
            }
            if let Some(part_type) = self.part_type {
                settings.criteria.type_contains = Some(part_type);
            }
            if let Some(manufacturer) = self.manufacturer {
                settings.criteria.manufacturer_contains = Some(manufacturer);
            }
            if self.price_min.is_some() {
                settings.criteria.price_min =
                    FilterCriteria::price_bound(self.price_min.as_deref());
            }
            if self.price_max.is_some() {
                settings.criteria.price_max =
                    FilterCriteria::price_bound(self.price_max.as_deref());
            }
            if let Some(style) = self.chart_style {
                settings.render.chart_style = style;
            }
            if self.show_quantity {
                settings.render.show_quantity = true;
            }

            Ok(settings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ChartStyle;

    #[test]
    fn test_default_settings_validate() {
        let settings = CatalogSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_no_endpoints_fails_validation() {
        let settings = CatalogSettings {
            json_endpoint: None,
            xml_endpoint: None,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate().unwrap_err(),
            CatalogError::MissingConfig { .. }
        ));
    }

    #[test]
    fn test_bad_endpoint_fails_validation() {
        let settings = CatalogSettings {
            json_endpoint: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_apply_file_overrides_defaults() {
        let file: CatalogToml = toml::from_str(
            r#"
[feeds]
xml_endpoint = "https://feeds.example.com/parts.xml"

[filter]
manufacturer = "amd"
price_min = "not-a-number"
price_max = "800"

[render]
chart_style = "3d"
"#,
        )
        .unwrap();

        let mut settings = CatalogSettings::default();
        settings.apply_file(file);

        assert_eq!(
            settings.xml_endpoint.as_deref(),
            Some("https://feeds.example.com/parts.xml")
        );
        // Untouched sections keep their defaults
        assert_eq!(settings.json_endpoint.as_deref(), Some(DEFAULT_JSON_ENDPOINT));
        assert_eq!(
            settings.criteria.manufacturer_contains.as_deref(),
            Some("amd")
        );
        // The bad bound degrades, the good one applies
        assert_eq!(settings.criteria.price_min, None);
        assert_eq!(settings.criteria.price_max, Some(800.0));
        assert_eq!(settings.render.chart_style, ChartStyle::ThreeD);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_file() {
        use clap::Parser;

        let cli = CliConfig::parse_from([
            "parts-catalog",
            "--json-endpoint",
            "https://cli.example.com/data.json",
            "--type",
            "gpu",
            "--price-max",
            "500",
            "--show-quantity",
        ]);

        let settings = cli.into_settings().unwrap();
        assert_eq!(
            settings.json_endpoint.as_deref(),
            Some("https://cli.example.com/data.json")
        );
        assert_eq!(settings.criteria.type_contains.as_deref(), Some("gpu"));
        assert_eq!(settings.criteria.price_max, Some(500.0));
        assert!(settings.render.show_quantity);
        assert!(settings.validate().is_ok());
    }
}
