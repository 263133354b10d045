//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer provider → OtlpFileExporter → file
//! ```
//!
//! Spans land in `<data_dir>/moviedeck-otlp.json`, one OTLP-JSON document per line. The
//! file rotates at 10 MB and three backups are kept. The level comes from the
//! `trace_level` option (default `info`) and accepts `EnvFilter` directives such as
//! `moviedeck=debug`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and OTLP-JSON encoding
//! - [`rotating`]: Size-rotated line writer

pub mod exporter;
pub mod init;
pub mod rotating;

pub use init::{init_tracing, TRACE_FILE};
