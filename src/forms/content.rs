use serde::Deserialize;
use validator::Validate;

use crate::domain::content::{NewBlog, NewFaq};
use crate::domain::mutation::{FilePart, MultipartPayload, MutationBody};
use crate::domain::types::{Headline, SanitizedHtml};
use crate::forms::{FormError, json_body};

/// Image types accepted for blog galleries.
const IMAGE_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

const MAX_BLOG_IMAGES: usize = 10;

#[derive(Debug, Deserialize, Validate)]
pub struct FaqForm {
    #[validate(length(min = 1, max = 300))]
    pub question: String,
    #[validate(length(min = 1))]
    pub answer: String,
}

impl TryFrom<FaqForm> for NewFaq {
    type Error = FormError;

    fn try_from(form: FaqForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            question: Headline::new(form.question).map_err(|_| FormError::InvalidName)?,
            answer: SanitizedHtml::new(form.answer).map_err(|_| FormError::InvalidContent)?,
        })
    }
}

impl NewFaq {
    pub fn into_body(self) -> Result<MutationBody, FormError> {
        json_body(&self)
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Blog editor contents. Images arrive as already-read file parts.
pub struct BlogForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(skip)]
    pub images: Vec<FilePart>,
}

impl TryFrom<BlogForm> for NewBlog {
    type Error = FormError;

    fn try_from(form: BlogForm) -> Result<Self, Self::Error> {
        form.validate()?;
        if form.images.len() > MAX_BLOG_IMAGES
            || form
                .images
                .iter()
                .any(|image| !IMAGE_MIME_TYPES.contains(&image.mime.as_str()))
        {
            return Err(FormError::InvalidContent);
        }
        Ok(Self {
            title: Headline::new(form.title).map_err(|_| FormError::InvalidName)?,
            content: SanitizedHtml::new(form.content).map_err(|_| FormError::InvalidContent)?,
            images: form.images,
        })
    }
}

impl NewBlog {
    /// Posts without images go as JSON, the rest as multipart.
    pub fn into_body(self) -> Result<MutationBody, FormError> {
        if self.images.is_empty() {
            return json_body(&serde_json::json!({
                "title": self.title.as_str(),
                "content": self.content.as_str(),
            }));
        }
        let payload = self.images.into_iter().fold(
            MultipartPayload::default()
                .text("title", self.title.into_inner())
                .text("content", self.content.into_inner()),
            MultipartPayload::file,
        );
        Ok(MutationBody::Multipart(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(mime: &str) -> FilePart {
        FilePart {
            field: "images".to_string(),
            file_name: "cover.png".to_string(),
            mime: mime.to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[test]
    fn faq_answer_is_sanitized() {
        let faq = NewFaq::try_from(FaqForm {
            question: "Do you accept walk-ins?".to_string(),
            answer: "<b>Yes</b><img src=x onerror=alert(1)>".to_string(),
        })
        .unwrap();
        assert!(faq.answer.as_str().starts_with("<b>Yes</b>"));
        assert!(!faq.answer.as_str().contains("onerror"));
    }

    #[test]
    fn blog_with_images_is_multipart() {
        let blog = NewBlog::try_from(BlogForm {
            title: "Flu season".to_string(),
            content: "<p>Get vaccinated.</p>".to_string(),
            images: vec![image("image/png"), image("image/jpeg")],
        })
        .unwrap();

        let MutationBody::Multipart(payload) = blog.into_body().unwrap() else {
            panic!("expected multipart body");
        };
        assert_eq!(payload.files.len(), 2);
        assert_eq!(payload.fields[0], ("title".to_string(), "Flu season".to_string()));
    }

    #[test]
    fn blog_without_images_is_json() {
        let blog = NewBlog::try_from(BlogForm {
            title: "Opening hours".to_string(),
            content: "Mon-Fri".to_string(),
            images: vec![],
        })
        .unwrap();
        assert!(matches!(blog.into_body().unwrap(), MutationBody::Json(_)));
    }

    #[test]
    fn blog_gallery_is_capped_at_ten_images() {
        let form = |count: usize| BlogForm {
            title: "Clinic tour".to_string(),
            content: "<p>Take a look around.</p>".to_string(),
            images: (0..count).map(|_| image("image/webp")).collect(),
        };

        assert!(NewBlog::try_from(form(10)).is_ok());
        assert!(matches!(
            NewBlog::try_from(form(11)),
            Err(FormError::InvalidContent)
        ));
    }

    #[test]
    fn blog_rejects_non_images() {
        let result = NewBlog::try_from(BlogForm {
            title: "Report".to_string(),
            content: "See attached".to_string(),
            images: vec![image("application/pdf")],
        });
        assert!(matches!(result, Err(FormError::InvalidContent)));
    }
}
