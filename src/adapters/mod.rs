// Adapters layer: concrete implementations at the presentation boundary.

pub mod chart;
pub mod html;
