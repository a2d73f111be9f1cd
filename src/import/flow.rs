use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

use super::parser;
use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::forms::FormPhase;
use crate::types::{ContactRecord, Id, ImportRequest, ImportResult};

/// Where an import batch gets sent
#[async_trait]
pub trait ImportBackend: Send + Sync {
    async fn import_contacts(&self, request: &ImportRequest) -> ClientResult<ImportResult>;
}

#[async_trait]
impl ImportBackend for ApiClient {
    async fn import_contacts(&self, request: &ImportRequest) -> ClientResult<ImportResult> {
        ApiClient::import_contacts(self, request).await
    }
}

/// Operator-facing reasons an import did not go through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFailure {
    /// Text looked like JSON but did not parse
    InvalidPayload,
    /// Nothing usable after filtering
    EmptyPayload,
    /// Session expired or missing
    Unauthenticated,
    /// Transport error or non-2xx response
    ImportFailed,
}

impl ImportFailure {
    pub fn message(&self) -> &'static str {
        match self {
            ImportFailure::InvalidPayload => "Invalid payload: could not read the contacts as JSON",
            ImportFailure::EmptyPayload => "Empty payload: no contacts with both a name and a number",
            ImportFailure::Unauthenticated => "Session expired, log in again",
            ImportFailure::ImportFailed => "Failed to import contacts",
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ImportFailure::InvalidPayload => "MALFORMED_PAYLOAD",
            ImportFailure::EmptyPayload => "EMPTY_PAYLOAD",
            ImportFailure::Unauthenticated => "UNAUTHENTICATED",
            ImportFailure::ImportFailed => "IMPORT_FAILED",
        }
    }

    pub fn from_error(error: &ClientError) -> Self {
        match error {
            ClientError::MalformedPayload(_) => ImportFailure::InvalidPayload,
            ClientError::EmptyPayload => ImportFailure::EmptyPayload,
            ClientError::Unauthenticated => ImportFailure::Unauthenticated,
            _ => ImportFailure::ImportFailed,
        }
    }
}

impl fmt::Display for ImportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ImportFailure {}

pub type ImportPhase = FormPhase<ImportResult, ImportFailure>;

/// State of the contact import form
#[derive(Debug, Clone, Default)]
pub struct ImportForm {
    text: String,
    tag_ids: Vec<Id>,
    list_id: Option<Id>,
    phase: ImportPhase,
}

impl ImportForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tag_ids(&self) -> &[Id] {
        &self.tag_ids
    }

    pub fn list_id(&self) -> Option<&Id> {
        self.list_id.as_ref()
    }

    pub fn phase(&self) -> &ImportPhase {
        &self.phase
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Uploaded files go through the same text path as pasted input
    pub fn load_file(&mut self, path: &Path) -> ClientResult<()> {
        self.text = std::fs::read_to_string(path)?;
        Ok(())
    }

    /// Select a tag, or deselect it if already selected
    pub fn toggle_tag(&mut self, id: Id) {
        if let Some(pos) = self.tag_ids.iter().position(|t| *t == id) {
            self.tag_ids.remove(pos);
        } else {
            self.tag_ids.push(id);
        }
    }

    pub fn select_list(&mut self, id: Option<Id>) {
        self.list_id = id;
    }

    /// First few parsed rows for display
    pub fn preview(&self, limit: usize) -> Vec<ContactRecord> {
        parser::preview(&self.text, limit)
    }

    /// Parse the current text into a request, without sending anything
    pub fn build_request(&self) -> Result<ImportRequest, ImportFailure> {
        let contacts = parser::parse(&self.text).map_err(|e| ImportFailure::from_error(&e))?;
        if contacts.is_empty() {
            return Err(ImportFailure::EmptyPayload);
        }
        Ok(ImportRequest {
            contacts,
            tag_ids: self.tag_ids.clone(),
            list_id: self.list_id.clone(),
        })
    }

    /// Parse, post once, and record the outcome in the form phase.
    ///
    /// Parse failures and empty batches never reach the backend. On success
    /// the inputs are cleared for the next import. Returns `None` when a
    /// submission is already in flight. Dropping the returned future before
    /// it completes leaves the inputs untouched and the phase `Idle`.
    pub async fn submit<B>(&mut self, backend: &B) -> Option<&ImportPhase>
    where
        B: ImportBackend + ?Sized,
    {
        let request = self.build_request();

        let Some(flight) = self.phase.begin() else {
            warn!("import already in progress, ignoring submit");
            return None;
        };

        let request = match request {
            Ok(request) => request,
            Err(failure) => {
                warn!(reason = ?failure, "import payload rejected");
                flight.fail(failure);
                return Some(&self.phase);
            }
        };

        match backend.import_contacts(&request).await {
            Ok(result) => {
                info!(%result, "contacts imported");
                flight.succeed(result);
                self.text.clear();
                self.tag_ids.clear();
                self.list_id = None;
            }
            Err(e) => {
                warn!(error = %e, "contact import failed");
                flight.fail(ImportFailure::from_error(&e));
            }
        }

        Some(&self.phase)
    }

    /// Operator has seen the outcome
    pub fn acknowledge(&mut self) {
        self.phase.acknowledge();
    }
}
