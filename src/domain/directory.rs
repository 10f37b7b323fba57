//! Clinics, doctors, specialties and partners.

use serde::{Deserialize, Serialize};

use crate::domain::resource::Row;
use crate::domain::types::{DisplayName, EmailAddress, PhoneNumber, RowId, WebsiteUrl};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Clinic {
    #[serde(alias = "_id")]
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: bool,
}

impl Row for Clinic {
    fn row_id(&self) -> &RowId {
        &self.id
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewClinic {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    #[serde(alias = "_id")]
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u8>,
    #[serde(default)]
    pub consultation_fee: Option<f64>,
    #[serde(default)]
    pub status: bool,
}

impl Row for Doctor {
    fn row_id(&self) -> &RowId {
        &self.id
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewDoctor {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub specialty_id: RowId,
    pub experience_years: u8,
    pub consultation_fee: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Specialty {
    #[serde(alias = "_id")]
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub status: bool,
}

impl Row for Specialty {
    fn row_id(&self) -> &RowId {
        &self.id
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewSpecialty {
    pub name: DisplayName,
}

/// Partner and compliance logos shown on the marketing site.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Partner {
    #[serde(alias = "_id")]
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub status: bool,
}

impl Row for Partner {
    fn row_id(&self) -> &RowId {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewPartner {
    pub name: DisplayName,
    pub website: WebsiteUrl,
}
