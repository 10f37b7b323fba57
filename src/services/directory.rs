use crate::controller::{FetchOutcome, ListController};
use crate::domain::directory::{
    Clinic, Doctor, NewClinic, NewDoctor, NewPartner, NewSpecialty, Partner, Specialty,
};
use crate::domain::mutation::FilePart;
use crate::domain::types::RowId;
use crate::forms::directory::{ClinicForm, DoctorForm, PartnerForm, SpecialtyForm};
use crate::remote::{CollectionReader, CollectionWriter};
use crate::services::{ServiceError, ServiceResult, submit};

fn invalid(resource: &str, err: impl Into<ServiceError> + std::fmt::Display) -> ServiceError {
    log::error!("Failed to validate {resource} form: {err}");
    err.into()
}

/// Validates the clinic form and creates or updates the clinic.
pub async fn save_clinic<C>(
    controller: &ListController<Clinic, C>,
    id: Option<RowId>,
    form: ClinicForm,
) -> ServiceResult<FetchOutcome>
where
    C: CollectionReader + CollectionWriter,
{
    let body = NewClinic::try_from(form)
        .and_then(NewClinic::into_body)
        .map_err(|err| invalid("clinic", err))?;
    submit(controller, id, body).await
}

/// Validates the doctor form and creates or updates the doctor profile.
pub async fn save_doctor<C>(
    controller: &ListController<Doctor, C>,
    id: Option<RowId>,
    form: DoctorForm,
) -> ServiceResult<FetchOutcome>
where
    C: CollectionReader + CollectionWriter,
{
    let body = NewDoctor::try_from(form)
        .and_then(NewDoctor::into_body)
        .map_err(|err| invalid("doctor", err))?;
    submit(controller, id, body).await
}

pub async fn save_specialty<C>(
    controller: &ListController<Specialty, C>,
    id: Option<RowId>,
    form: SpecialtyForm,
) -> ServiceResult<FetchOutcome>
where
    C: CollectionReader + CollectionWriter,
{
    let body = NewSpecialty::try_from(form)
        .and_then(NewSpecialty::into_body)
        .map_err(|err| invalid("specialty", err))?;
    submit(controller, id, body).await
}

/// Saves a partner entry, uploading the logo when one was picked.
pub async fn save_partner<C>(
    controller: &ListController<Partner, C>,
    id: Option<RowId>,
    form: PartnerForm,
    logo: Option<FilePart>,
) -> ServiceResult<FetchOutcome>
where
    C: CollectionReader + CollectionWriter,
{
    let partner = NewPartner::try_from(form).map_err(|err| invalid("partner", err))?;
    submit(controller, id, partner.into_body(logo)).await
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::controller::ControllerOptions;
    use crate::domain::mutation::{MutationBody, MutationIntent};
    use crate::domain::resource::ResourceKind;
    use crate::dto::api::{ListEnvelope, MutationEnvelope};
    use crate::forms::FormError;
    use crate::remote::mock::MockCollection;

    fn clinic_form(email: &str) -> ClinicForm {
        ClinicForm {
            name: "Northside Clinic".to_string(),
            email: email.to_string(),
            phone: "+44 20 7946 0958".to_string(),
            address: "12 Main St".to_string(),
        }
    }

    fn list_once(mock: &mut MockCollection) {
        mock.expect_list().times(1).returning(|_, _| {
            Ok(ListEnvelope::paged(
                vec![json!({ "id": 1, "name": "Northside Clinic" })],
                1,
            ))
        });
    }

    #[tokio::test]
    async fn save_clinic_creates_with_normalized_payload() {
        let mut mock = MockCollection::new();
        mock.expect_mutate()
            .withf(|_, intent| match intent {
                MutationIntent::Create(MutationBody::Json(body)) => {
                    body["email"] == "desk@northside.example" && body["phone"] == "+442079460958"
                }
                _ => false,
            })
            .times(1)
            .returning(|_, _| Ok(MutationEnvelope::ok()));
        list_once(&mut mock);

        let controller: ListController<Clinic, _> = ListController::new(
            ResourceKind::Clinics.spec(),
            Arc::new(mock),
            ControllerOptions::default(),
        );
        let outcome = save_clinic(&controller, None, clinic_form("Desk@Northside.example"))
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(controller.state().rows.len(), 1);
    }

    #[tokio::test]
    async fn invalid_clinic_form_sends_nothing() {
        let controller: ListController<Clinic, _> = ListController::new(
            ResourceKind::Clinics.spec(),
            Arc::new(MockCollection::new()),
            ControllerOptions::default(),
        );

        let err = save_clinic(&controller, None, clinic_form("not-an-email"))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Form(FormError::Validation(_))));
    }

    #[tokio::test]
    async fn save_partner_updates_as_multipart() {
        let mut mock = MockCollection::new();
        mock.expect_mutate()
            .withf(|_, intent| match intent {
                MutationIntent::Update(id, MutationBody::Multipart(payload)) => {
                    id.as_str() == "p-1" && payload.files.len() == 1
                }
                _ => false,
            })
            .times(1)
            .returning(|_, _| Ok(MutationEnvelope::ok()));
        mock.expect_list().times(1).returning(|_, _| {
            Ok(ListEnvelope::bare(vec![
                json!({ "_id": "p-1", "name": "Acme" }),
            ]))
        });

        let controller: ListController<Partner, _> = ListController::new(
            ResourceKind::Partners.spec(),
            Arc::new(mock),
            ControllerOptions::default(),
        );
        let logo = FilePart {
            field: "logo".to_string(),
            file_name: "acme.png".to_string(),
            mime: "image/png".to_string(),
            bytes: vec![0x89, 0x50],
        };
        let form = PartnerForm {
            name: "Acme".to_string(),
            website: "https://acme.example".to_string(),
        };

        let outcome = save_partner(&controller, Some(RowId::new("p-1").unwrap()), form, Some(logo))
            .await
            .unwrap();

        assert_eq!(outcome, FetchOutcome::Applied);
    }
}
