use crate::core::fetch::CatalogClient;
use crate::core::filter;
use crate::core::normalize::normalize_all;
use crate::domain::ports::{ConfigProvider, PresentationSink};
use crate::utils::error::Result;

/// Fallback text shown in a feed's region when its fetch fails.
pub const UNAVAILABLE_MESSAGE: &str = "Error fetching data. Please try again later.";

/// Display region fed by the JSON catalog.
pub const JSON_TARGET: &str = "json-parts";
/// Display region fed by the XML catalog.
pub const XML_TARGET: &str = "xml-parts";

#[derive(Debug, Clone)]
pub struct FeedReport {
    pub target: String,
    pub rendered: usize,
    pub skipped: usize,
    pub failure: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub feeds: Vec<FeedReport>,
}

impl RunSummary {
    pub fn all_available(&self) -> bool {
        self.feeds.iter().all(|f| f.failure.is_none())
    }
}

/// Drives the fetch -> normalize -> filter -> render pipeline for the
/// configured feeds. The feeds are independent: they run concurrently,
/// share no state, and a failure in one never aborts the other.
pub struct CatalogEngine<S: PresentationSink, C: ConfigProvider> {
    sink: S,
    config: C,
    client: CatalogClient,
}

impl<S: PresentationSink, C: ConfigProvider> CatalogEngine<S, C> {
    pub fn new(sink: S, config: C) -> Result<Self> {
        let client = CatalogClient::new(config.request_timeout())?;
        Ok(Self {
            sink,
            config,
            client,
        })
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let json_feed = async {
            match self.config.json_endpoint() {
                Some(endpoint) => Some(self.run_feed(endpoint, JSON_TARGET).await),
                None => None,
            }
        };
        let xml_feed = async {
            match self.config.xml_endpoint() {
                Some(endpoint) => Some(self.run_feed(endpoint, XML_TARGET).await),
                None => None,
            }
        };

        let (json_report, xml_report) = tokio::join!(json_feed, xml_feed);

        let mut summary = RunSummary::default();
        for report in [json_report, xml_report].into_iter().flatten() {
            summary.feeds.push(report?);
        }
        Ok(summary)
    }

    /// One feed end to end. A fetch or parse failure is recovered by
    /// rendering the unavailability message into this feed's region;
    /// only sink failures propagate.
    async fn run_feed(&self, endpoint: &str, target: &str) -> Result<FeedReport> {
        match self.client.fetch_catalog(endpoint).await {
            Ok(raws) => {
                let total = raws.len();
                let (parts, skipped) = normalize_all(raws);
                let parts = filter::apply(parts, self.config.criteria());

                tracing::info!(
                    "{}: rendering {} of {} records ({} defective)",
                    target,
                    parts.len(),
                    total,
                    skipped
                );
                self.sink.render(target, &parts).await?;

                Ok(FeedReport {
                    target: target.to_string(),
                    rendered: parts.len(),
                    skipped,
                    failure: None,
                })
            }
            Err(e) => {
                tracing::warn!("{}: catalog fetch failed: {}", target, e);
                self.sink.render_unavailable(target, UNAVAILABLE_MESSAGE).await?;

                Ok(FeedReport {
                    target: target.to_string(),
                    rendered: 0,
                    skipped: 0,
                    failure: Some(e.to_string()),
                })
            }
        }
    }
}
