use clap::Parser;
use parts_catalog::domain::model::RawRecord;
use parts_catalog::domain::ports::ConfigProvider;
use parts_catalog::utils::{logger, validation::Validate};
use parts_catalog::{
    CatalogClient, CatalogEngine, CatalogSettings, CliConfig, HtmlSink, JSON_TARGET, XML_TARGET,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting parts-catalog");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let submit_file = cli.submit_file.clone();
    let settings = cli.into_settings()?;

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Some(path) = submit_file {
        return submit(&settings, &path).await;
    }

    let sink = HtmlSink::new(&settings.output_path, settings.render)
        .with_target(JSON_TARGET)
        .with_target(XML_TARGET);
    let output_path = settings.output_path.clone();

    let engine = CatalogEngine::new(sink, settings)?;
    let summary = engine.run().await?;

    for feed in &summary.feeds {
        match &feed.failure {
            None => {
                println!(
                    "✅ {}: rendered {} part(s) ({} defective record(s) skipped)",
                    feed.target, feed.rendered, feed.skipped
                );
            }
            Some(reason) => {
                println!("⚠️  {}: data unavailable ({})", feed.target, reason);
            }
        }
    }
    println!("📁 Pages written to: {}", output_path);

    Ok(())
}

async fn submit(settings: &CatalogSettings, path: &str) -> anyhow::Result<()> {
    let endpoint = settings
        .json_endpoint
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("--submit-file requires a JSON endpoint"))?;

    let content = std::fs::read_to_string(path)?;
    let raw = match serde_json::from_str(&content)? {
        serde_json::Value::Object(data) => RawRecord { data },
        _ => anyhow::bail!("expected a JSON object in {}", path),
    };

    let client = CatalogClient::new(settings.request_timeout())?;
    let part = client.submit_record(endpoint, &raw).await?;

    println!("✅ Submitted '{}' to {}", part.name, endpoint);
    Ok(())
}
