//! Screen workflows: validate input, run it through the screen's controller
//! and report failures.

use thiserror::Error;

use crate::controller::{FetchOutcome, ListController};
use crate::domain::mutation::MutationBody;
use crate::domain::resource::Row;
use crate::domain::types::RowId;
use crate::dto::list::{ErrorInfo, ErrorKind};
use crate::forms::FormError;
use crate::remote::errors::RemoteError;
use crate::remote::{CollectionReader, CollectionWriter};

pub mod booking;
pub mod content;
pub mod directory;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("form error: {0}")]
    Form(FormError),

    #[error(transparent)]
    Remote(RemoteError),

    #[error("type constraint error: {0}")]
    TypeConstraint(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Alert/inline message for the screen that triggered the workflow.
    pub fn info(&self) -> ErrorInfo {
        match self {
            ServiceError::Form(err) => ErrorInfo::new(ErrorKind::Validation, err.to_string()),
            ServiceError::Remote(err) => err.info(),
            ServiceError::TypeConstraint(message) => {
                ErrorInfo::new(ErrorKind::Validation, message.clone())
            }
        }
    }
}

/// Creates when `id` is `None`, updates otherwise.
async fn submit<T, C>(
    controller: &ListController<T, C>,
    id: Option<RowId>,
    body: MutationBody,
) -> ServiceResult<FetchOutcome>
where
    T: Row,
    C: CollectionReader + CollectionWriter,
{
    let result = match id {
        Some(id) => controller.update(id, body).await,
        None => controller.create(body).await,
    };
    result.map_err(|err| {
        log::error!("Failed to save {}: {err}", controller.resource().name);
        ServiceError::from(err)
    })
}

/// Deletes a row from any management table.
pub async fn delete_row<T, C>(
    controller: &ListController<T, C>,
    id: &str,
) -> ServiceResult<FetchOutcome>
where
    T: Row,
    C: CollectionReader + CollectionWriter,
{
    let id = RowId::try_from(id)?;
    controller.remove(id).await.map_err(|err| {
        log::error!("Failed to delete {}: {err}", controller.resource().name);
        ServiceError::from(err)
    })
}

/// Flips the active/inactive status of a row.
pub async fn toggle_row<T, C>(
    controller: &ListController<T, C>,
    id: &str,
) -> ServiceResult<FetchOutcome>
where
    T: Row,
    C: CollectionReader + CollectionWriter,
{
    let id = RowId::try_from(id)?;
    controller.toggle_status(id).await.map_err(|err| {
        log::error!("Failed to toggle {}: {err}", controller.resource().name);
        ServiceError::from(err)
    })
}


#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::test_support::{controller, expect_any_list};
    use super::*;
    use crate::domain::mutation::MutationIntent;
    use crate::domain::resource::ResourceKind;
    use crate::dto::api::MutationEnvelope;
    use crate::remote::mock::MockCollection;

    #[tokio::test]
    async fn delete_row_issues_delete_and_refetches() {
        let mut mock = MockCollection::new();
        mock.expect_mutate()
            .withf(|_, intent| matches!(intent, MutationIntent::Delete(id) if id.as_str() == "7"))
            .times(1)
            .returning(|_, _| Ok(MutationEnvelope::ok()));
        expect_any_list(&mut mock, 1);

        let controller = controller(ResourceKind::Patients, mock);
        let outcome = delete_row(&controller, "7").await.unwrap();

        assert_eq!(outcome, FetchOutcome::Applied);
    }

    #[tokio::test]
    async fn blank_id_never_reaches_backend() {
        let mock = MockCollection::new();
        let controller = controller(ResourceKind::Clinics, mock);

        let err = toggle_row(&controller, "  ").await.unwrap_err();

        assert!(matches!(err, ServiceError::TypeConstraint(_)));
        assert_eq!(err.info().kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn toggle_failure_surfaces_remote_message() {
        let mut mock = MockCollection::new();
        mock.expect_mutate()
            .times(1)
            .returning(|_, _| Ok(MutationEnvelope::rejected("Doctor not found")));

        let controller = controller(ResourceKind::Doctors, mock);
        let err = toggle_row(&controller, "3").await.unwrap_err();

        assert_eq!(err.info().message, "Doctor not found");
        assert_eq!(err.info().kind, ErrorKind::Application);
    }
}
