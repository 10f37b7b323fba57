use serde::Deserialize;
use validator::Validate;

use crate::domain::directory::{NewClinic, NewDoctor, NewPartner, NewSpecialty};
use crate::domain::mutation::{FilePart, MultipartPayload, MutationBody};
use crate::domain::types::{DisplayName, EmailAddress, PhoneNumber, RowId, WebsiteUrl};
use crate::forms::{FormError, json_body};

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding or editing a clinic.
pub struct ClinicForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl TryFrom<ClinicForm> for NewClinic {
    type Error = FormError;

    fn try_from(form: ClinicForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let address = Some(form.address.trim().to_string()).filter(|s| !s.is_empty());
        Ok(Self {
            name: DisplayName::new(form.name).map_err(|_| FormError::InvalidName)?,
            email: EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: PhoneNumber::new(form.phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            address,
        })
    }
}

impl NewClinic {
    pub fn into_body(self) -> Result<MutationBody, FormError> {
        json_body(&self)
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for adding or editing a doctor profile.
pub struct DoctorForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    #[validate(length(min = 1))]
    pub specialty_id: String,
    #[validate(range(min = 0, max = 70))]
    pub experience_years: u8,
    #[validate(range(min = 0.0))]
    pub consultation_fee: f64,
}

impl TryFrom<DoctorForm> for NewDoctor {
    type Error = FormError;

    fn try_from(form: DoctorForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: DisplayName::new(form.name).map_err(|_| FormError::InvalidName)?,
            email: EmailAddress::new(form.email).map_err(|_| FormError::InvalidEmail)?,
            phone: PhoneNumber::new(form.phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            specialty_id: RowId::new(form.specialty_id).map_err(|_| FormError::InvalidId)?,
            experience_years: form.experience_years,
            consultation_fee: form.consultation_fee,
        })
    }
}

impl NewDoctor {
    pub fn into_body(self) -> Result<MutationBody, FormError> {
        json_body(&self)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SpecialtyForm {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
}

impl TryFrom<SpecialtyForm> for NewSpecialty {
    type Error = FormError;

    fn try_from(form: SpecialtyForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: DisplayName::new(form.name).map_err(|_| FormError::InvalidName)?,
        })
    }
}

impl NewSpecialty {
    pub fn into_body(self) -> Result<MutationBody, FormError> {
        json_body(&self)
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Partner/compliance entry; the logo is uploaded alongside.
pub struct PartnerForm {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(url)]
    pub website: String,
}

impl TryFrom<PartnerForm> for NewPartner {
    type Error = FormError;

    fn try_from(form: PartnerForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: DisplayName::new(form.name).map_err(|_| FormError::InvalidName)?,
            website: WebsiteUrl::new(form.website).map_err(|_| FormError::InvalidUrl)?,
        })
    }
}

impl NewPartner {
    /// Partners are always sent as multipart so a logo can ride along.
    pub fn into_body(self, logo: Option<FilePart>) -> MutationBody {
        let mut payload = MultipartPayload::default()
            .text("name", self.name.into_inner())
            .text("website", self.website.into_inner());
        if let Some(logo) = logo {
            payload = payload.file(logo);
        }
        MutationBody::Multipart(payload)
    }
}
