use httpmock::prelude::*;
use parts_catalog::domain::model::{ChartStyle, FilterCriteria, RenderOptions};
use parts_catalog::{
    CatalogEngine, CatalogSettings, HtmlSink, JSON_TARGET, XML_TARGET,
};
use tempfile::TempDir;

const XML_CATALOG: &str = r#"<?xml version="1.0"?>
<computerParts>
  <part>
    <name>Ryzen 5 7600</name>
    <type>CPU</type>
    <price>229.99</price>
    <manufacturer>AMD</manufacturer>
    <stock>14</stock>
    <specifications><cores>6</cores><clockSpeed>5.1GHz</clockSpeed></specifications>
  </part>
  <part>
    <name>Broken record</name>
    <type>GPU</type>
    <price>599.99</price>
  </part>
  <part>
    <name>Vengeance 32GB</name>
    <type>RAM</type>
    <price>104.99</price>
    <manufacturer>Corsair</manufacturer>
    <stock>40</stock>
    <quantity>2</quantity>
  </part>
</computerParts>"#;

fn json_catalog() -> serde_json::Value {
    serde_json::json!([
        {"id": "cpu-1", "name": "Core i5-13600K", "type": "CPU", "price": 319.0,
         "manufacturer": "Intel", "stock": 8,
         "specifications": {"cores": 14, "clockSpeed": "5.1GHz"}},
        {"name": "RTX 4070", "type": "GPU", "price": 599.99, "manufacturer": "NVIDIA", "stock": 3}
    ])
}

fn settings(server: &MockServer, output: &TempDir) -> CatalogSettings {
    CatalogSettings {
        json_endpoint: Some(server.url("/data.json")),
        xml_endpoint: Some(server.url("/data.xml")),
        output_path: output.path().to_str().unwrap().to_string(),
        timeout_seconds: 5,
        criteria: FilterCriteria::default(),
        render: RenderOptions::default(),
    }
}

fn sink(output: &TempDir, render: RenderOptions) -> HtmlSink {
    HtmlSink::new(output.path(), render)
        .with_target(JSON_TARGET)
        .with_target(XML_TARGET)
}

fn read_page(output: &TempDir, target: &str) -> String {
    std::fs::read_to_string(output.path().join(format!("{}.html", target))).unwrap()
}

#[tokio::test]
async fn test_end_to_end_renders_both_feeds() {
    let output = TempDir::new().unwrap();
    let server = MockServer::start();

    let json_mock = server.mock(|when, then| {
        when.method(GET).path("/data.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json_catalog());
    });
    let xml_mock = server.mock(|when, then| {
        when.method(GET).path("/data.xml");
        then.status(200)
            .header("Content-Type", "application/xml")
            .body(XML_CATALOG);
    });

    let settings = settings(&server, &output);
    let engine = CatalogEngine::new(sink(&output, settings.render), settings).unwrap();

    let summary = engine.run().await.unwrap();

    json_mock.assert();
    xml_mock.assert();
    assert!(summary.all_available());
    assert_eq!(summary.feeds.len(), 2);

    let json_page = read_page(&output, JSON_TARGET);
    assert!(json_page.contains("Core i5-13600K"));
    assert!(json_page.contains("RTX 4070"));
    assert!(json_page.contains("Cores: 14"));
    assert!(json_page.contains("<svg class=\"stock-chart\""));

    // The defective XML record is skipped, the rest render in order
    let xml_page = read_page(&output, XML_TARGET);
    assert!(xml_page.contains("Ryzen 5 7600"));
    assert!(xml_page.contains("Vengeance 32GB"));
    assert!(!xml_page.contains("Broken record"));

    let xml_report = summary
        .feeds
        .iter()
        .find(|f| f.target == XML_TARGET)
        .unwrap();
    assert_eq!(xml_report.rendered, 2);
    assert_eq!(xml_report.skipped, 1);
}

#[tokio::test]
async fn test_failed_feed_renders_fallback_and_sibling_survives() {
    let output = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/data.json");
        then.status(503);
    });
    server.mock(|when, then| {
        when.method(GET).path("/data.xml");
        then.status(200)
            .header("Content-Type", "text/xml")
            .body(XML_CATALOG);
    });

    let settings = settings(&server, &output);
    let engine = CatalogEngine::new(sink(&output, settings.render), settings).unwrap();

    let summary = engine.run().await.unwrap();

    assert!(!summary.all_available());

    let json_page = read_page(&output, JSON_TARGET);
    assert!(json_page.contains("Error fetching data. Please try again later."));

    let xml_page = read_page(&output, XML_TARGET);
    assert!(xml_page.contains("Ryzen 5 7600"));
}

#[tokio::test]
async fn test_unsupported_content_type_renders_fallback() {
    let output = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/data.json");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>not a feed</html>");
    });

    let mut settings = settings(&server, &output);
    settings.xml_endpoint = None;
    let engine = CatalogEngine::new(sink(&output, settings.render), settings).unwrap();

    let summary = engine.run().await.unwrap();

    assert_eq!(summary.feeds.len(), 1);
    let report = &summary.feeds[0];
    assert!(report
        .failure
        .as_deref()
        .unwrap()
        .contains("Unsupported content type"));
    assert!(read_page(&output, JSON_TARGET).contains("Error fetching data"));
}

#[tokio::test]
async fn test_filtered_run_with_render_variants() {
    let output = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/data.xml");
        then.status(200)
            .header("Content-Type", "application/xml")
            .body(XML_CATALOG);
    });

    let mut settings = settings(&server, &output);
    settings.json_endpoint = None;
    settings.criteria = FilterCriteria {
        price_min: Some(100.0),
        price_max: Some(150.0),
        ..Default::default()
    };
    settings.render = RenderOptions {
        chart_style: ChartStyle::ThreeD,
        show_quantity: true,
    };

    let engine = CatalogEngine::new(sink(&output, settings.render), settings).unwrap();
    let summary = engine.run().await.unwrap();

    assert_eq!(summary.feeds[0].rendered, 1);

    let page = read_page(&output, XML_TARGET);
    assert!(page.contains("Vengeance 32GB"));
    assert!(!page.contains("Ryzen 5 7600"));
    assert!(page.contains("Quantity: 2"));
    assert!(page.contains("<polygon"));
}

#[tokio::test]
async fn test_empty_catalog_shows_message() {
    let output = TempDir::new().unwrap();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/data.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([]));
    });

    let mut settings = settings(&server, &output);
    settings.xml_endpoint = None;
    let engine = CatalogEngine::new(sink(&output, settings.render), settings).unwrap();

    let summary = engine.run().await.unwrap();

    assert!(summary.all_available());
    assert_eq!(summary.feeds[0].rendered, 0);
    assert!(read_page(&output, JSON_TARGET).contains("No parts to display."));
}
