//! Result aggregation and report generation
//!
//! Consumes the ordered result records of one suite run and renders three
//! artifacts into the report directory:
//! - `test_report.html`: styled report with stat cards and per-module blocks
//! - `test_summary.txt`: plain-text execution summary
//! - `test_report.json`: machine-readable dump carrying the records verbatim
//!
//! Aggregation is a single pass over immutable records; the renderers never
//! mutate or reorder them.

pub mod error;
pub mod html;
pub mod json;
pub mod record;
pub mod summary;
pub mod text;
pub mod writer;

pub use error::{ReportError, ReportResult};
pub use html::render_html;
pub use json::{JsonReport, JsonSummary};
pub use record::{TestResult, TestStatus};
pub use summary::{group_by_module, RunSummary};
pub use text::render_text_summary;
pub use writer::{ReportPaths, ReportWriter};
