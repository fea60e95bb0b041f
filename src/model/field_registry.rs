use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::model::employee::{Employee, FieldKind, FieldValue};

/// A named, typed accessor/mutator pair for one editable employee
/// field. The registry replaces runtime reflection: a bad field name
/// is a map miss, a wrong value shape is caught against `kind` before
/// anything touches the record.
#[derive(Debug)]
pub struct FieldDescriptor {
    /// External field name as callers send it
    pub name: &'static str,
    /// Column the field maps to in the employees table
    pub column: &'static str,
    pub kind: FieldKind,
    /// Blank values collapse to NULL on this column (payroll number
    /// uniqueness exempts NULL)
    pub nullable: bool,
    pub get: fn(&Employee) -> FieldValue,
    pub set: fn(&mut Employee, FieldValue),
}

/// Every editable field of the employee record (everything except id),
/// keyed by external name. Built once on first use.
static FIELD_REGISTRY: Lazy<HashMap<&'static str, FieldDescriptor>> = Lazy::new(|| {
    descriptors().into_iter().map(|d| (d.name, d)).collect()
});

/// Resolve an external field name to its descriptor
pub fn lookup(name: &str) -> Option<&'static FieldDescriptor> {
    FIELD_REGISTRY.get(name)
}

/// Sorted external names of every editable field, for error payloads
pub fn field_names() -> Vec<&'static str> {
    let mut names: Vec<_> = FIELD_REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}

fn descriptors() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor {
            name: "payroll_number",
            column: "payroll_number",
            kind: FieldKind::Text,
            nullable: true,
            // grid shows a blank cell for a missing payroll number
            get: |e| FieldValue::Text(e.payroll_number.clone().unwrap_or_default()),
            set: |e, v| {
                if let FieldValue::Text(s) = v {
                    e.payroll_number = if s.trim().is_empty() { None } else { Some(s) };
                }
            },
        },
        FieldDescriptor {
            name: "first_name",
            column: "first_name",
            kind: FieldKind::Text,
            nullable: false,
            get: |e| FieldValue::Text(e.first_name.clone()),
            set: |e, v| {
                if let FieldValue::Text(s) = v {
                    e.first_name = s;
                }
            },
        },
        FieldDescriptor {
            name: "last_name",
            column: "last_name",
            kind: FieldKind::Text,
            nullable: false,
            get: |e| FieldValue::Text(e.last_name.clone()),
            set: |e, v| {
                if let FieldValue::Text(s) = v {
                    e.last_name = s;
                }
            },
        },
        FieldDescriptor {
            name: "birthday",
            column: "birthday",
            kind: FieldKind::Date,
            nullable: false,
            get: |e| FieldValue::Date(e.birthday),
            set: |e, v| {
                if let FieldValue::Date(d) = v {
                    e.birthday = d;
                }
            },
        },
        FieldDescriptor {
            name: "telephone",
            column: "telephone",
            kind: FieldKind::Text,
            nullable: false,
            get: |e| FieldValue::Text(e.telephone.clone()),
            set: |e, v| {
                if let FieldValue::Text(s) = v {
                    e.telephone = s;
                }
            },
        },
        FieldDescriptor {
            name: "mobile",
            column: "mobile",
            kind: FieldKind::Text,
            nullable: false,
            get: |e| FieldValue::Text(e.mobile.clone()),
            set: |e, v| {
                if let FieldValue::Text(s) = v {
                    e.mobile = s;
                }
            },
        },
        FieldDescriptor {
            name: "address",
            column: "address",
            kind: FieldKind::Text,
            nullable: false,
            get: |e| FieldValue::Text(e.address.clone()),
            set: |e, v| {
                if let FieldValue::Text(s) = v {
                    e.address = s;
                }
            },
        },
        FieldDescriptor {
            name: "address_2",
            column: "address_2",
            kind: FieldKind::Text,
            nullable: false,
            get: |e| FieldValue::Text(e.address_2.clone()),
            set: |e, v| {
                if let FieldValue::Text(s) = v {
                    e.address_2 = s;
                }
            },
        },
        FieldDescriptor {
            name: "postcode",
            column: "postcode",
            kind: FieldKind::Text,
            nullable: false,
            get: |e| FieldValue::Text(e.postcode.clone()),
            set: |e, v| {
                if let FieldValue::Text(s) = v {
                    e.postcode = s;
                }
            },
        },
        FieldDescriptor {
            name: "email_home",
            column: "email_home",
            kind: FieldKind::Text,
            nullable: false,
            get: |e| FieldValue::Text(e.email_home.clone()),
            set: |e, v| {
                if let FieldValue::Text(s) = v {
                    e.email_home = s;
                }
            },
        },
        FieldDescriptor {
            name: "start_date",
            column: "start_date",
            kind: FieldKind::Date,
            nullable: false,
            get: |e| FieldValue::Date(e.start_date),
            set: |e, v| {
                if let FieldValue::Date(d) = v {
                    e.start_date = d;
                }
            },
        },
    ]
}
