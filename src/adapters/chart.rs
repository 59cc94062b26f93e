use crate::domain::model::{ChartStyle, Part};
use std::fmt::Write;

const CHART_WIDTH: u32 = 400;
const BAR_HEIGHT: u32 = 30;
const BAR_SPACING: u32 = 40;
const BAR_X: u32 = 10;
const DEPTH: u32 = 8;

/// Renders stock levels as an SVG bar chart, one bar per part that carries
/// a stock figure. Bars scale linearly from zero to the maximum stock over
/// the full chart width. Returns `None` when no part has stock data.
pub fn stock_chart(parts: &[Part], style: ChartStyle) -> Option<String> {
    let stocks: Vec<(&str, u32)> = parts
        .iter()
        .filter_map(|p| p.stock.map(|s| (p.name.as_str(), s)))
        .collect();
    if stocks.is_empty() {
        return None;
    }

    let max = stocks.iter().map(|(_, s)| *s).max().unwrap_or(0);
    let height = stocks.len() as u32 * BAR_SPACING;

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg class=\"stock-chart\" width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">",
        CHART_WIDTH + BAR_X + DEPTH,
        height + DEPTH
    );

    for (i, (name, stock)) in stocks.iter().enumerate() {
        let y = i as u32 * BAR_SPACING + DEPTH;
        let width = scale(*stock, max);
        match style {
            ChartStyle::Flat => {
                let _ = write!(
                    svg,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"blue\"><title>{}: {}</title></rect>",
                    BAR_X, y, width, BAR_HEIGHT, escape(name), stock
                );
            }
            ChartStyle::ThreeD => {
                let _ = write!(
                    svg,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"blue\"><title>{}: {}</title></rect>",
                    BAR_X, y, width, BAR_HEIGHT, escape(name), stock
                );
                // Top face
                let _ = write!(
                    svg,
                    "<polygon points=\"{},{} {},{} {},{} {},{}\" fill=\"#4444cc\"/>",
                    BAR_X,
                    y,
                    BAR_X + DEPTH,
                    y - DEPTH,
                    BAR_X + width + DEPTH,
                    y - DEPTH,
                    BAR_X + width,
                    y
                );
                // Right face
                let _ = write!(
                    svg,
                    "<polygon points=\"{},{} {},{} {},{} {},{}\" fill=\"#222288\"/>",
                    BAR_X + width,
                    y,
                    BAR_X + width + DEPTH,
                    y - DEPTH,
                    BAR_X + width + DEPTH,
                    y + BAR_HEIGHT - DEPTH,
                    BAR_X + width,
                    y + BAR_HEIGHT
                );
            }
        }
    }

    svg.push_str("</svg>");
    Some(svg)
}

fn scale(stock: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    ((stock as f64 / max as f64) * CHART_WIDTH as f64).round() as u32
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
