use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "payroll_number": "COOP08",
        "first_name": "John",
        "last_name": "William",
        "birthday": "1955-01-26",
        "telephone": "12345678",
        "mobile": "987654231",
        "address": "12 Foreman road",
        "address_2": "London",
        "postcode": "GU12 6JW",
        "email_home": "nomadic20@hotmail.co.uk",
        "start_date": "2013-04-18"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    /// Natural business key; unique across the store when present.
    /// Blank payroll numbers are stored as NULL and exempt.
    #[schema(example = "COOP08", nullable = true)]
    pub payroll_number: Option<String>,

    #[schema(example = "John")]
    pub first_name: String,

    #[schema(example = "William")]
    pub last_name: String,

    #[schema(example = "1955-01-26", value_type = String, format = "date")]
    pub birthday: NaiveDate,

    #[schema(example = "12345678")]
    pub telephone: String,

    #[schema(example = "987654231")]
    pub mobile: String,

    #[schema(example = "12 Foreman road")]
    pub address: String,

    #[schema(example = "London")]
    pub address_2: String,

    #[schema(example = "GU12 6JW")]
    pub postcode: String,

    #[schema(example = "nomadic20@hotmail.co.uk")]
    pub email_home: String,

    #[schema(example = "2013-04-18", value_type = String, format = "date")]
    pub start_date: NaiveDate,
}

/// A parsed-but-not-yet-persisted employee row. Produced by the csv
/// importer, consumed by the bulk insert; never stored as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub payroll_number: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub telephone: String,
    pub mobile: String,
    pub address: String,
    pub address_2: String,
    pub postcode: String,
    pub email_home: String,
    pub start_date: NaiveDate,
}

impl NewEmployee {
    /// Attach the id the store assigned on insert
    pub fn into_employee(self, id: i64) -> Employee {
        Employee {
            id,
            payroll_number: self.payroll_number,
            first_name: self.first_name,
            last_name: self.last_name,
            birthday: self.birthday,
            telephone: self.telephone,
            mobile: self.mobile,
            address: self.address,
            address_2: self.address_2,
            postcode: self.postcode,
            email_home: self.email_home,
            start_date: self.start_date,
        }
    }
}

/// Closed set of value shapes an employee field can hold. Grid edits
/// arrive as one of these; the field registry knows which one each
/// field expects, so a mismatch is caught before anything is written.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Date(_) => FieldKind::Date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Date => write!(f, "date"),
        }
    }
}
