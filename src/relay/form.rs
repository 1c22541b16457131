//! Inbound multipart form parsing.
//!
//! A part with a filename is a file entry, anything else is a text entry.
//! Entries keep their original order and duplicates, and `get` returns the
//! first entry under a name, matching browser `FormData.get`.

use axum::extract::multipart::Multipart;
use bytes::Bytes;

use crate::relay::error::RelayError;

/// A file part of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// One value of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEntry {
    Text(String),
    File(UploadedFile),
}

impl FormEntry {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormEntry::Text(value) => Some(value),
            FormEntry::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            FormEntry::File(file) => Some(file),
            FormEntry::Text(_) => None,
        }
    }
}

/// A fully read multipart form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundForm {
    entries: Vec<(String, FormEntry)>,
}

impl InboundForm {
    pub fn new(entries: Vec<(String, FormEntry)>) -> Self {
        Self { entries }
    }

    /// Drain every part of `multipart`. Any read failure (bad boundary,
    /// truncated stream, body over the limit) is an invalid payload.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, RelayError> {
        let mut entries = Vec::new();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read multipart field");
            RelayError::InvalidPayload
        })? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);

            let entry = match file_name {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await.map_err(|e| {
                        tracing::debug!(field = %name, error = %e, "Failed to read file part");
                        RelayError::InvalidPayload
                    })?;
                    FormEntry::File(UploadedFile {
                        file_name,
                        content_type,
                        data,
                    })
                }
                None => FormEntry::Text(field.text().await.map_err(|e| {
                    tracing::debug!(field = %name, error = %e, "Failed to read text part");
                    RelayError::InvalidPayload
                })?),
            };

            entries.push((name, entry));
        }

        Ok(Self { entries })
    }

    /// First entry stored under `name`.
    pub fn get(&self, name: &str) -> Option<&FormEntry> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, entry)| entry)
    }

    /// Every entry stored under `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FormEntry> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, entry)| entry)
    }

    pub fn entries(&self) -> &[(String, FormEntry)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(String, FormEntry)> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
