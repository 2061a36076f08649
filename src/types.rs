//! Core types and events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Target document family
///
/// Selects both the export endpoint and the sheet shape sent to the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Spreadsheet (.xlsx)
    Excel,
    /// Word document
    Word,
    /// PDF document
    Pdf,
}

impl DocumentType {
    /// All document types, in display order
    pub const ALL: [DocumentType; 3] = [DocumentType::Excel, DocumentType::Word, DocumentType::Pdf];

    /// Wire token used in endpoint paths and the `data_type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Excel => "excel",
            DocumentType::Word => "word",
            DocumentType::Pdf => "pdf",
        }
    }

    /// File extension used for the saved file
    ///
    /// Word maps to the literal type token `word`, not `docx`. Saved files have
    /// always been named this way and the mapping is kept as-is until the naming
    /// is confirmed by the product owner.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentType::Excel => "xlsx",
            DocumentType::Word => "word",
            DocumentType::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excel" => Ok(DocumentType::Excel),
            "word" => Ok(DocumentType::Word),
            "pdf" => Ok(DocumentType::Pdf),
            other => Err(crate::error::Error::Other(format!(
                "unsupported document type: {other}"
            ))),
        }
    }
}

/// Metadata record describing one selectable template
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDescriptor {
    /// Template identifier sent back as `template_id`
    pub id: String,
    /// Display name (usually the template file name)
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Document family the template belongs to (`excel`, `word`, `pdf`)
    #[serde(rename = "type")]
    pub template_type: String,
    /// Server-side path of the template file
    pub path: String,
}

/// Values the user filled in for one export action
///
/// Constructed per action and passed by reference; nothing in the client keeps it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportForm {
    /// Report title, sent as `data.title`
    pub title: String,
    /// Selected template id
    pub template_id: String,
    /// Base name of the saved file, without extension
    pub file_name: String,
}

impl Default for ExportForm {
    fn default() -> Self {
        Self {
            title: "测试报告".to_string(),
            template_id: "default".to_string(),
            file_name: "export".to_string(),
        }
    }
}

impl ExportForm {
    /// Create a form from its three fields
    pub fn new(
        title: impl Into<String>,
        template_id: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            template_id: template_id.into(),
            file_name: file_name.into(),
        }
    }
}

/// Stage of the per-export state machine
///
/// `Idle → Building → Sending → {Saving → Idle | Failed → Idle}`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStage {
    /// No export running
    #[default]
    Idle,
    /// Building the request payload
    Building,
    /// Waiting on the generation service
    Sending,
    /// Writing the returned bytes to disk
    Saving,
    /// The export failed; the next transition is back to idle
    Failed,
}

impl ExportStage {
    /// Whether an export holds the in-progress token in this stage
    pub fn is_busy(&self) -> bool {
        !matches!(self, ExportStage::Idle)
    }
}

/// Bytes returned by the service, held only until they are saved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportResult {
    /// Opaque file contents
    pub bytes: Vec<u8>,
    /// Suggested base name of the saved file
    pub base_name: String,
    /// Document type the bytes were generated as
    pub document_type: DocumentType,
}

impl ExportResult {
    /// File name the bytes will be saved under, before collision handling
    pub fn file_name(&self) -> crate::error::Result<String> {
        crate::sink::file_name_for(&self.base_name, self.document_type)
    }
}

/// Result of a successful export
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportOutcome {
    /// Document type that was exported
    pub document_type: DocumentType,
    /// Final file name (may carry a collision suffix)
    pub file_name: String,
    /// Full path of the saved file
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes_written: u64,
    /// When the file was saved
    pub saved_at: DateTime<Utc>,
}

/// Event emitted by the export client
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Template catalog loaded
    CatalogLoaded {
        /// Number of usable (excel) templates
        count: usize,
    },

    /// Template catalog could not be loaded; exports remain available
    CatalogUnavailable {
        /// Advisory message for the user
        message: String,
    },

    /// The export state machine moved to a new stage
    StageChanged {
        /// The stage just entered
        stage: ExportStage,
    },

    /// Export finished and the file was saved
    ExportSaved {
        /// Exported document type
        document_type: DocumentType,
        /// Where the file was written
        path: PathBuf,
    },

    /// Export failed
    ExportFailed {
        /// Document type that was being exported
        document_type: DocumentType,
        /// User-facing failure message
        message: String,
    },
}
