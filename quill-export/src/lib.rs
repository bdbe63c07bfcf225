//! Template-driven text export engine
//!
//! Renders the resolved record set to a text artifact through a declarative
//! template: literal fragments with placeholder tokens, no code execution.
//! List-typed and vector-typed fields expand through their own nested
//! templates; everything else is plain substitution. Placeholders that a
//! template does not use are simply left as literal text.

pub mod error;
pub mod exporter;
pub mod template;

pub use error::{ExportError, Result};
pub use exporter::Exporter;
pub use template::{placeholder, ExportTemplates, RecordExportTemplate};
