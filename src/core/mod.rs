pub mod engine;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod xml;

pub use crate::domain::model::{
    ChartStyle, ContentKind, FilterCriteria, Part, RawRecord, RenderOptions, Specifications,
};
pub use crate::domain::ports::{ConfigProvider, PresentationSink};
pub use crate::utils::error::Result;
