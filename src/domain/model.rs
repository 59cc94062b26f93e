use serde::{Deserialize, Serialize};

/// A pre-validation record extracted from one JSON array entry or one
/// `<part>` element. JSON objects pass through as-is; the XML path builds
/// string leaves that the normalizer coerces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// One catalog record after normalization. Immutable once constructed;
/// later stages only read or drop it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub part_type: String,
    pub price: f64,
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    /// Legacy field from one feed variant; coexists with `stock`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Specifications>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specifications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    #[serde(rename = "clockSpeed", default, skip_serializing_if = "Option::is_none")]
    pub clock_speed: Option<String>,
}

/// Declared media type family of a catalog response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Xml,
}

impl ContentKind {
    /// Classifies a `Content-Type` header value. A `text/plain` body is
    /// treated as JSON carried as plain text, which one known feed serves.
    pub fn classify(content_type: &str) -> Option<Self> {
        let ct = content_type.to_ascii_lowercase();
        if ct.contains("json") || ct.contains("text/plain") {
            Some(ContentKind::Json)
        } else if ct.contains("xml") {
            Some(ContentKind::Xml)
        } else {
            None
        }
    }
}

/// Filter criteria for the in-memory catalog. Absent criteria always match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub type_contains: Option<String>,
    pub manufacturer_contains: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.type_contains.is_none()
            && self.manufacturer_contains.is_none()
            && self.price_min.is_none()
            && self.price_max.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ChartStyle {
    #[default]
    Flat,
    #[serde(rename = "3d")]
    #[cfg_attr(feature = "cli", value(name = "3d"))]
    ThreeD,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub chart_style: ChartStyle,
    /// Show the legacy `quantity` column alongside `stock`.
    #[serde(default)]
    pub show_quantity: bool,
}
