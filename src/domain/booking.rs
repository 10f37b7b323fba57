//! Appointments, transactions, reviews and patients.
//!
//! Availability and booking happen server-side; these rows only mirror what
//! the list endpoints return.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::resource::Row;
use crate::domain::types::RowId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    #[serde(alias = "_id")]
    pub id: RowId,
    pub patient_name: String,
    #[serde(default)]
    pub doctor_name: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub slot: Option<String>,
    pub status: AppointmentStatus,
}

impl Row for Appointment {
    fn row_id(&self) -> &RowId {
        &self.id
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Paid,
    Pending,
    Failed,
    Refunded,
}

/// An invoice line as shown on the transactions screen.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(alias = "_id")]
    pub id: RowId,
    #[serde(default)]
    pub invoice_number: Option<String>,
    pub patient_name: String,
    pub amount: f64,
    pub status: TransactionStatus,
    pub created_at: NaiveDateTime,
}

impl Row for Transaction {
    fn row_id(&self) -> &RowId {
        &self.id
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: RowId,
    pub patient_name: String,
    #[serde(default)]
    pub doctor_name: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub status: bool,
}

impl Row for Review {
    fn row_id(&self) -> &RowId {
        &self.id
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    #[serde(alias = "_id")]
    pub id: RowId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub status: bool,
}

impl Row for Patient {
    fn row_id(&self) -> &RowId {
        &self.id
    }
}
