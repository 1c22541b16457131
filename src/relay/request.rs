//! Upload validation gates.
//!
//! # Design Decisions
//! - Gates run in a fixed order: file, client identifier, bureau. A form
//!   failing several gates always reports the first one.
//! - `client_id` wins over `user_id` whenever it is present, even if blank.
//! - Values are trimmed only to test for blankness; they are forwarded as sent.

use crate::relay::error::RelayError;
use crate::relay::form::{FormEntry, InboundForm, UploadedFile};
use crate::relay::outbound::OutboundForm;

/// Field carrying the uploaded document.
pub const FILE_FIELD: &str = "file";
/// Canonical client identifier field.
pub const CLIENT_ID_FIELD: &str = "client_id";
/// Legacy alias of the client identifier, still read by older endpoints.
pub const LEGACY_CLIENT_ID_FIELD: &str = "user_id";
/// Credit bureau selection.
pub const BUREAU_FIELD: &str = "bureau";

/// A form that passed every gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: UploadedFile,
    pub client_id: String,
    pub bureau: String,
    /// Text fields not interpreted by the relay, in original order.
    pub passthrough: Vec<(String, String)>,
}

impl UploadRequest {
    pub fn from_form(form: InboundForm) -> Result<Self, RelayError> {
        let file = form
            .get(FILE_FIELD)
            .and_then(FormEntry::as_file)
            .cloned()
            .ok_or(RelayError::MissingFile)?;

        let client_id = form
            .get(CLIENT_ID_FIELD)
            .or_else(|| form.get(LEGACY_CLIENT_ID_FIELD))
            .and_then(non_blank_text)
            .ok_or(RelayError::MissingClientId)?;

        let bureau = form
            .get(BUREAU_FIELD)
            .and_then(non_blank_text)
            .ok_or(RelayError::MissingBureau)?;

        let passthrough = form
            .into_entries()
            .into_iter()
            .filter(|(name, _)| !is_managed_field(name))
            .filter_map(|(name, entry)| match entry {
                FormEntry::Text(value) => Some((name, value)),
                FormEntry::File(_) => None,
            })
            .collect();

        Ok(Self {
            file,
            client_id,
            bureau,
            passthrough,
        })
    }

    /// Build the form sent upstream.
    pub fn into_outbound(self) -> OutboundForm {
        let mut fields = self.passthrough;
        fields.push((CLIENT_ID_FIELD.to_string(), self.client_id.clone()));
        fields.push((LEGACY_CLIENT_ID_FIELD.to_string(), self.client_id));
        fields.push((BUREAU_FIELD.to_string(), self.bureau));

        OutboundForm::new(fields, self.file)
    }
}

fn non_blank_text(entry: &FormEntry) -> Option<String> {
    entry
        .as_text()
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

fn is_managed_field(name: &str) -> bool {
    matches!(
        name,
        FILE_FIELD | CLIENT_ID_FIELD | LEGACY_CLIENT_ID_FIELD | BUREAU_FIELD
    )
}
