//! Integration tests for logging and tracing

use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::subscriber::with_default;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Collects formatted log output in memory
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_env_filter_parsing() {
    for directive in [
        "info",
        "transparency_data_downloader=debug",
        "warn,transparency_data_downloader::downloader=trace",
    ] {
        assert!(EnvFilter::try_new(directive).is_ok(), "{directive}");
    }
}

#[test]
fn test_dataset_span_fields_in_json_output() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(captured.clone())
        .finish();

    with_default(subscriber, || {
        let span = tracing::info_span!("dataset_job", dataset = "despesa");
        let _enter = span.enter();
        tracing::warn!(chunk = "2022-01-01..2022-12-31", stage = "fetch", "Chunk skipped");
    });

    let line = captured.contents();
    let event: serde_json::Value = serde_json::from_str(line.lines().next().unwrap()).unwrap();
    assert_eq!(event["level"], "WARN");
    assert_eq!(event["fields"]["message"], "Chunk skipped");
    assert_eq!(event["fields"]["stage"], "fetch");
    assert_eq!(event["span"]["name"], "dataset_job");
    assert_eq!(event["span"]["dataset"], "despesa");
}

#[test]
fn test_filter_hides_debug_by_default() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(captured.clone())
        .with_ansi(false)
        .finish();

    with_default(subscriber, || {
        tracing::debug!("Fetching chunk");
        tracing::info!(artifact = "despesa - 1 a 12 - 2022.json", "Chunk written");
    });

    let output = captured.contents();
    assert!(!output.contains("Fetching chunk"));
    assert!(output.contains("Chunk written"));
    assert!(output.contains("despesa - 1 a 12 - 2022.json"));
}
