//! FAQ entries and blog posts.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::mutation::FilePart;
use crate::domain::resource::Row;
use crate::domain::types::{Headline, RowId, SanitizedHtml};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Faq {
    #[serde(alias = "_id")]
    pub id: RowId,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub status: bool,
}

impl Row for Faq {
    fn row_id(&self) -> &RowId {
        &self.id
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewFaq {
    pub question: Headline,
    pub answer: SanitizedHtml,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Blog {
    #[serde(alias = "_id")]
    pub id: RowId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: bool,
}

impl Row for Blog {
    fn row_id(&self) -> &RowId {
        &self.id
    }
}

/// Blog post ready to be sent; images travel as multipart file parts.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBlog {
    pub title: Headline,
    pub content: SanitizedHtml,
    pub images: Vec<FilePart>,
}
