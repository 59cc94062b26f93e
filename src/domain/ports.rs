use crate::domain::model::{FilterCriteria, Part, RenderOptions};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn json_endpoint(&self) -> Option<&str>;
    fn xml_endpoint(&self) -> Option<&str>;
    fn request_timeout(&self) -> Duration;
    fn criteria(&self) -> &FilterCriteria;
    fn render_options(&self) -> RenderOptions;
}

/// Boundary to the display layer. The pipeline hands over a well-formed,
/// ordered sequence per target region; on failure or empty input the sink
/// must show a human-readable message rather than nothing.
#[async_trait]
pub trait PresentationSink: Send + Sync {
    async fn render(&self, target: &str, parts: &[Part]) -> Result<()>;
    async fn render_unavailable(&self, target: &str, message: &str) -> Result<()>;
}
