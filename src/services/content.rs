use crate::controller::{FetchOutcome, ListController};
use crate::domain::content::{Blog, Faq, NewBlog, NewFaq};
use crate::domain::types::RowId;
use crate::forms::content::{BlogForm, FaqForm};
use crate::remote::{CollectionReader, CollectionWriter};
use crate::services::{ServiceError, ServiceResult, submit};

/// Validates and sanitizes the FAQ entry before saving it.
pub async fn save_faq<C>(
    controller: &ListController<Faq, C>,
    id: Option<RowId>,
    form: FaqForm,
) -> ServiceResult<FetchOutcome>
where
    C: CollectionReader + CollectionWriter,
{
    let body = NewFaq::try_from(form)
        .and_then(NewFaq::into_body)
        .map_err(|err| {
            log::error!("Failed to validate faq form: {err}");
            ServiceError::from(err)
        })?;
    submit(controller, id, body).await
}

/// Publishes a new blog post or edits an existing one, images included.
pub async fn publish_blog<C>(
    controller: &ListController<Blog, C>,
    id: Option<RowId>,
    form: BlogForm,
) -> ServiceResult<FetchOutcome>
where
    C: CollectionReader + CollectionWriter,
{
    let body = NewBlog::try_from(form)
        .and_then(NewBlog::into_body)
        .map_err(|err| {
            log::error!("Failed to validate blog form: {err}");
            ServiceError::from(err)
        })?;
    submit(controller, id, body).await
}
