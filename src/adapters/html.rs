use crate::adapters::chart::stock_chart;
use crate::domain::model::{Part, RenderOptions};
use crate::domain::ports::PresentationSink;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Renders each target region as a static HTML page under the output
/// directory: part cards followed by the stock chart, or a visible
/// unavailability message. Regions must be registered up front; rendering
/// to an unknown target is an error, never a silent no-op.
pub struct HtmlSink {
    output_dir: PathBuf,
    options: RenderOptions,
    targets: Vec<String>,
}

impl HtmlSink {
    pub fn new(output_dir: impl Into<PathBuf>, options: RenderOptions) -> Self {
        Self {
            output_dir: output_dir.into(),
            options,
            targets: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: &str) -> Self {
        self.targets.push(target.to_string());
        self
    }

    fn resolve(&self, target: &str) -> Result<PathBuf> {
        if !self.targets.iter().any(|t| t == target) {
            return Err(CatalogError::TargetMissing {
                target: target.to_string(),
            });
        }
        Ok(self.output_dir.join(format!("{}.html", target)))
    }

    fn write_page(&self, path: &Path, target: &str, body: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let page = format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Computer Parts</title></head>\n\
             <body>\n<section id=\"{}\">\n{}\n</section>\n</body>\n</html>\n",
            escape(target),
            body
        );
        fs::write(path, page)?;
        Ok(())
    }

    fn render_cards(&self, parts: &[Part]) -> String {
        let mut body = String::new();

        for part in parts {
            body.push_str("<div class=\"part-card\">");
            let _ = write!(body, "<h3>{}</h3>", escape(&part.name));
            if let Some(id) = &part.id {
                let _ = write!(body, "<p class=\"id\">ID: {}</p>", escape(id));
            }
            let _ = write!(body, "<p>Type: {}</p>", escape(&part.part_type));
            let _ = write!(body, "<p>Manufacturer: {}</p>", escape(&part.manufacturer));
            let _ = write!(body, "<p>Price: ${:.2}</p>", part.price);
            if let Some(stock) = part.stock {
                let _ = write!(body, "<p>Stock: {}</p>", stock);
            }
            if self.options.show_quantity {
                if let Some(quantity) = part.quantity {
                    let _ = write!(body, "<p>Quantity: {}</p>", quantity);
                }
            }
            if let Some(spec) = &part.specifications {
                body.push_str("<ul class=\"specifications\">");
                if let Some(cores) = spec.cores {
                    let _ = write!(body, "<li>Cores: {}</li>", cores);
                }
                if let Some(clock) = &spec.clock_speed {
                    let _ = write!(body, "<li>Clock speed: {}</li>", escape(clock));
                }
                body.push_str("</ul>");
            }
            body.push_str("</div>\n");
        }

        if let Some(svg) = stock_chart(parts, self.options.chart_style) {
            body.push_str(&svg);
            body.push('\n');
        }

        body
    }
}

#[async_trait]
impl PresentationSink for HtmlSink {
    async fn render(&self, target: &str, parts: &[Part]) -> Result<()> {
        let path = self.resolve(target)?;

        // An empty region must still say something human-readable.
        let body = if parts.is_empty() {
            "<p class=\"empty\">No parts to display.</p>".to_string()
        } else {
            self.render_cards(parts)
        };

        tracing::debug!("Writing {} part(s) to {}", parts.len(), path.display());
        self.write_page(&path, target, &body)
    }

    async fn render_unavailable(&self, target: &str, message: &str) -> Result<()> {
        let path = self.resolve(target)?;
        let body = format!("<p class=\"error\">{}</p>", escape(message));

        tracing::debug!("Writing unavailability notice to {}", path.display());
        self.write_page(&path, target, &body)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
