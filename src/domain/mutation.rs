use serde_json::Value;

use crate::domain::types::RowId;

/// A file attached to a multipart mutation, e.g. a gallery image.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Text fields plus file parts sent as `multipart/form-data`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipartPayload {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartPayload {
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }
}

/// Request body of a mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationBody {
    Empty,
    Json(Value),
    Multipart(MultipartPayload),
}

/// What the caller wants changed in the remote collection.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationIntent {
    Create(MutationBody),
    Update(RowId, MutationBody),
    Delete(RowId),
    ToggleStatus(RowId),
}

impl MutationIntent {
    /// Short label used in log lines.
    pub fn action(&self) -> &'static str {
        match self {
            MutationIntent::Create(_) => "create",
            MutationIntent::Update(..) => "update",
            MutationIntent::Delete(_) => "delete",
            MutationIntent::ToggleStatus(_) => "toggle-status",
        }
    }

    pub fn target(&self) -> Option<&RowId> {
        match self {
            MutationIntent::Create(_) => None,
            MutationIntent::Update(id, _)
            | MutationIntent::Delete(id)
            | MutationIntent::ToggleStatus(id) => Some(id),
        }
    }
}
