use crate::controller::{FetchOutcome, ListController};
use crate::domain::booking::{Appointment, Review, Transaction};
use crate::domain::page::Filters;
use crate::domain::types::RowId;
use crate::forms::booking::{AppointmentFilterForm, ReviewReplyForm, TransactionFilterForm};
use crate::remote::{CollectionReader, CollectionWriter};
use crate::services::{ServiceError, ServiceResult, submit};

/// Posts the clinic's public reply to a patient review.
pub async fn reply_to_review<C>(
    controller: &ListController<Review, C>,
    id: RowId,
    form: ReviewReplyForm,
) -> ServiceResult<FetchOutcome>
where
    C: CollectionReader + CollectionWriter,
{
    let body = form.into_body().map_err(|err| {
        log::error!("Failed to validate reply to review {id}: {err}");
        ServiceError::from(err)
    })?;
    submit(controller, Some(id), body).await
}

/// Applies the appointments filter bar and reloads from page 1.
pub async fn search_appointments<C>(
    controller: &ListController<Appointment, C>,
    form: AppointmentFilterForm,
) -> ServiceResult<FetchOutcome>
where
    C: CollectionReader + CollectionWriter,
{
    let patch = Filters::try_from(form).map_err(|err| {
        log::warn!("Ignoring appointment filters: {err}");
        ServiceError::from(err)
    })?;
    Ok(controller.set_filters(patch).await)
}

pub async fn search_transactions<C>(
    controller: &ListController<Transaction, C>,
    form: TransactionFilterForm,
) -> ServiceResult<FetchOutcome>
where
    C: CollectionReader + CollectionWriter,
{
    let patch = Filters::try_from(form).map_err(|err| {
        log::warn!("Ignoring transaction filters: {err}");
        ServiceError::from(err)
    })?;
    Ok(controller.set_filters(patch).await)
}
