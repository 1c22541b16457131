//! The multipart form sent to the upstream reports service.

use reqwest::multipart::{Form, Part};

use crate::relay::form::UploadedFile;
use crate::relay::request::FILE_FIELD;

/// Text fields plus exactly one file, in send order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundForm {
    fields: Vec<(String, String)>,
    file: UploadedFile,
}

impl OutboundForm {
    pub fn new(fields: Vec<(String, String)>, file: UploadedFile) -> Self {
        Self { fields, file }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Values of every text field called `name`.
    pub fn field_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn file(&self) -> &UploadedFile {
        &self.file
    }

    /// Encode as a `reqwest` form. The file goes last and keeps its bytes,
    /// filename and content type; a fresh boundary is generated.
    pub fn into_multipart(self) -> Form {
        let form = self
            .fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        form.part(FILE_FIELD, file_part(&self.file))
    }
}

fn file_part(file: &UploadedFile) -> Part {
    let build = || {
        Part::stream_with_length(reqwest::Body::from(file.data.clone()), file.data.len() as u64)
            .file_name(file.file_name.clone())
    };

    match file.content_type.as_deref() {
        Some(mime) => build().mime_str(mime).unwrap_or_else(|e| {
            tracing::debug!(content_type = %mime, error = %e, "Dropping unparseable file content type");
            build()
        }),
        None => build(),
    }
}
