//! Span exporter writing OTLP-JSON lines to a rotating file.
//!
//! Each exported batch becomes one line holding a complete OTLP `resourceSpans`
//! document, so the file can be replayed into any OTLP-compatible collector.

use super::rotating::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, SpanKind, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Value as JsonValue};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SCOPE_NAME: &str = "MovieDeck";

pub struct OtlpFileExporter {
    file: RotatingFile,
    resource: Resource,
    is_shutdown: bool,
}

impl OtlpFileExporter {
    pub fn new(path: PathBuf, resource: Resource) -> Self {
        Self {
            file: RotatingFile::new(path),
            resource,
            is_shutdown: false,
        }
    }
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("exporter is shut down"))
        } else {
            let line = format_batch(&self.resource, &batch).to_string();
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

impl std::fmt::Debug for OtlpFileExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpFileExporter")
            .field("file", &self.file)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Tracer provider exporting every finished span immediately to `path`.
pub fn file_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter::new(path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

/// One OTLP-JSON document for a batch of spans.
pub fn format_batch(resource: &Resource, batch: &[SpanData]) -> JsonValue {
    let attributes: Vec<JsonValue> = resource
        .iter()
        .map(|(key, value)| attribute(key.as_str(), value))
        .collect();

    json!({
        "resourceSpans": [{
            "resource": { "attributes": attributes },
            "scopeSpans": [{
                "scope": { "name": SCOPE_NAME },
                "spans": batch.iter().map(format_span).collect::<Vec<_>>(),
            }],
        }],
    })
}

fn format_span(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };
    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            json!({
                "timeUnixNano": unix_nanos(event.timestamp),
                "name": event.name,
                "attributes": attributes(&event.attributes),
            })
        })
        .collect();

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "kind": kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": events,
        "status": { "code": code, "message": message },
    })
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn attributes(pairs: &[KeyValue]) -> Vec<JsonValue> {
    pairs
        .iter()
        .map(|kv| attribute(kv.key.as_str(), &kv.value))
        .collect()
}

fn attribute(key: &str, value: &Value) -> JsonValue {
    let value = match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        other => json!({ "stringValue": other.as_str() }),
    };
    json!({ "key": key, "value": value })
}

/// Nanoseconds since the epoch as a decimal string, the OTLP-JSON encoding for fixed64.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_attributes_are_typed() {
        let resource = Resource::new(vec![
            KeyValue::new("service.name", "MovieDeck"),
            KeyValue::new("pid", 7_i64),
        ]);
        let doc = format_batch(&resource, &[]);

        let attrs = &doc["resourceSpans"][0]["resource"]["attributes"];
        let find = |key: &str| {
            attrs
                .as_array()
                .unwrap()
                .iter()
                .find(|a| a["key"] == key)
                .cloned()
                .unwrap()
        };
        assert_eq!(find("service.name")["value"]["stringValue"], "MovieDeck");
        assert_eq!(find("pid")["value"]["intValue"], "7");
        assert_eq!(doc["resourceSpans"][0]["scopeSpans"][0]["scope"]["name"], SCOPE_NAME);
    }

    #[test]
    fn epoch_before_unix_is_zero() {
        assert_eq!(unix_nanos(UNIX_EPOCH), "0");
    }
}
