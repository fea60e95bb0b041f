use chrono::NaiveDate;
use thiserror::Error;

use crate::model::employee::NewEmployee;

// Header names exactly as the personnel system exports them.
pub const PAYROLL_NUMBER_HEADER: &str = "Personnel_Records.Payroll_Number";
pub const FORENAMES_HEADER: &str = "Personnel_Records.Forenames";
pub const SURNAME_HEADER: &str = "Personnel_Records.Surname";
pub const DATE_OF_BIRTH_HEADER: &str = "Personnel_Records.Date_of_Birth";
pub const TELEPHONE_HEADER: &str = "Personnel_Records.Telephone";
pub const MOBILE_HEADER: &str = "Personnel_Records.Mobile";
pub const ADDRESS_HEADER: &str = "Personnel_Records.Address";
pub const ADDRESS_2_HEADER: &str = "Personnel_Records.Address_2";
pub const POSTCODE_HEADER: &str = "Personnel_Records.Postcode";
pub const EMAIL_HOME_HEADER: &str = "Personnel_Records.EMail_Home";
pub const START_DATE_HEADER: &str = "Personnel_Records.Start_Date";

/// Upload date format; day and month may omit the leading zero (`18/4/2013`)
const DATE_INPUT_FORMAT: &str = "%d/%m/%Y";

/// Error type returned by the CSV importer.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The header line does not declare every required column.
    #[error("csv file is missing required headers: {}", missing.join(", "))]
    HeaderMismatch { missing: Vec<String> },

    /// A data row could not be turned into an employee candidate.
    #[error("csv row {row}: {message}")]
    Row { row: usize, message: String },

    /// Underlying csv reader error outside any particular row.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Column index of each required header, resolved by name so column
/// order in the upload does not matter.
struct HeaderIndex {
    payroll_number: usize,
    first_name: usize,
    last_name: usize,
    birthday: usize,
    telephone: usize,
    mobile: usize,
    address: usize,
    address_2: usize,
    postcode: usize,
    email_home: usize,
    start_date: usize,
}

impl HeaderIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, ImportError> {
        let mut missing = Vec::new();
        let mut position = |name: &'static str| match headers.iter().position(|h| h == name) {
            Some(idx) => idx,
            None => {
                missing.push(name.to_string());
                0
            }
        };

        let index = HeaderIndex {
            payroll_number: position(PAYROLL_NUMBER_HEADER),
            first_name: position(FORENAMES_HEADER),
            last_name: position(SURNAME_HEADER),
            birthday: position(DATE_OF_BIRTH_HEADER),
            telephone: position(TELEPHONE_HEADER),
            mobile: position(MOBILE_HEADER),
            address: position(ADDRESS_HEADER),
            address_2: position(ADDRESS_2_HEADER),
            postcode: position(POSTCODE_HEADER),
            email_home: position(EMAIL_HOME_HEADER),
            start_date: position(START_DATE_HEADER),
        };

        if missing.is_empty() {
            Ok(index)
        } else {
            Err(ImportError::HeaderMismatch { missing })
        }
    }
}

/// Parse an uploaded CSV byte stream into employee candidates.
///
/// Rules:
///
/// - The header line must declare all eleven `Personnel_Records.*`
///   columns (any order; extra columns are ignored).
/// - `Date_of_Birth` and `Start_Date` use day/month/year (`26/1/1955`).
/// - Every string field is trimmed; a blank payroll number becomes
///   `None` so it stays exempt from the uniqueness constraint.
///
/// The import is all-or-nothing: a missing header or one bad row fails
/// the whole batch and no candidates are produced.
pub fn read_employees_from_csv(data: &[u8]) -> Result<Vec<NewEmployee>, ImportError> {
    // Excel exports usually lead with a UTF-8 BOM
    let data = data.strip_prefix(b"\xef\xbb\xbf").unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let index = HeaderIndex::resolve(&headers)?;

    let mut employees = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        // 1-based for messages, +1 again because the header is line 1
        let row = row_idx + 2;
        let record = result.map_err(|e| ImportError::Row {
            row,
            message: e.to_string(),
        })?;
        employees.push(parse_row(row, &record, &index)?);
    }

    Ok(employees)
}

fn parse_row(
    row: usize,
    record: &csv::StringRecord,
    index: &HeaderIndex,
) -> Result<NewEmployee, ImportError> {
    let text = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

    let payroll_number = text(index.payroll_number);
    Ok(NewEmployee {
        payroll_number: if payroll_number.is_empty() {
            None
        } else {
            Some(payroll_number)
        },
        first_name: text(index.first_name),
        last_name: text(index.last_name),
        birthday: parse_date(row, DATE_OF_BIRTH_HEADER, record.get(index.birthday))?,
        telephone: text(index.telephone),
        mobile: text(index.mobile),
        address: text(index.address),
        address_2: text(index.address_2),
        postcode: text(index.postcode),
        email_home: text(index.email_home),
        start_date: parse_date(row, START_DATE_HEADER, record.get(index.start_date))?,
    })
}

fn parse_date(
    row: usize,
    column: &'static str,
    raw: Option<&str>,
) -> Result<NaiveDate, ImportError> {
    let raw = raw.unwrap_or("").trim();
    let parsed = NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT).map_err(|e| ImportError::Row {
        row,
        message: format!("column '{column}': cannot parse date '{raw}': {e}"),
    })?;

    // chrono's %Y also takes short and signed years, reading 26/1/55 as
    // year 55. The upload format requires a four digit year.
    if !has_four_digit_year(raw) {
        return Err(ImportError::Row {
            row,
            message: format!(
                "column '{column}': cannot parse date '{raw}': the year must have four digits"
            ),
        });
    }

    Ok(parsed)
}

fn has_four_digit_year(value: &str) -> bool {
    match value.rsplit_once('/') {
        Some((_, year)) => year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const VALID_CSV: &str = "\
Personnel_Records.Payroll_Number,Personnel_Records.Forenames,Personnel_Records.Surname,Personnel_Records.Date_of_Birth,Personnel_Records.Telephone,Personnel_Records.Mobile,Personnel_Records.Address,Personnel_Records.Address_2,Personnel_Records.Postcode,Personnel_Records.EMail_Home,Personnel_Records.Start_Date
COOP08,John ,William,26/1/1955,12345678,987654231,12 Foreman road,London,GU12 6JW,nomadic20@hotmail.co.uk,18/4/2013
JACK13,Jerry,Jackson,11/5/1974,2050508,6987457,115 Spinney Road,Luton,LU33DF,gerry.jackson@bt.com,18/4/2013
";

    #[test]
    fn parses_valid_rows_in_order() {
        let employees = read_employees_from_csv(VALID_CSV.as_bytes()).unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].payroll_number.as_deref(), Some("COOP08"));
        assert_eq!(employees[1].payroll_number.as_deref(), Some("JACK13"));
    }

    #[test]
    fn trims_strings_and_parses_unpadded_dates() {
        let employees = read_employees_from_csv(VALID_CSV.as_bytes()).unwrap();
        let john = &employees[0];
        // "John " exported with a trailing space comes back clean
        assert_eq!(john.first_name, "John");
        assert_eq!(john.last_name, "William");
        assert_eq!(john.birthday, NaiveDate::from_ymd_opt(1955, 1, 26).unwrap());
        assert_eq!(john.start_date, NaiveDate::from_ymd_opt(2013, 4, 18).unwrap());
    }

    #[test]
    fn header_order_does_not_matter() {
        let csv = "\
Personnel_Records.Start_Date,Personnel_Records.Forenames,Personnel_Records.Surname,Personnel_Records.Date_of_Birth,Personnel_Records.Telephone,Personnel_Records.Mobile,Personnel_Records.Address,Personnel_Records.Address_2,Personnel_Records.Postcode,Personnel_Records.EMail_Home,Personnel_Records.Payroll_Number
18/4/2013,John,William,26/1/1955,12345678,987654231,12 Foreman road,London,GU12 6JW,nomadic20@hotmail.co.uk,COOP08
";
        let employees = read_employees_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(employees[0].payroll_number.as_deref(), Some("COOP08"));
        assert_eq!(
            employees[0].start_date,
            NaiveDate::from_ymd_opt(2013, 4, 18).unwrap()
        );
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "\
Personnel_Records.Payroll_Number,Personnel_Records.Forenames,Personnel_Records.Surname,Personnel_Records.Date_of_Birth,Personnel_Records.Telephone,Personnel_Records.Mobile,Personnel_Records.Address,Personnel_Records.Address_2,Personnel_Records.Postcode,Personnel_Records.EMail_Home,Personnel_Records.Start_Date,Personnel_Records.Notes
COOP08,John,William,26/1/1955,12345678,987654231,12 Foreman road,London,GU12 6JW,nomadic20@hotmail.co.uk,18/4/2013,ignore me
";
        let employees = read_employees_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(employees.len(), 1);
    }

    #[test]
    fn missing_header_fails_the_whole_import() {
        // Surname column renamed, everything else intact
        let csv = VALID_CSV.replace("Personnel_Records.Surname", "Personnel_Records.LastName");
        let err = read_employees_from_csv(csv.as_bytes()).unwrap_err();
        match err {
            ImportError::HeaderMismatch { missing } => {
                assert_eq!(missing, vec!["Personnel_Records.Surname".to_string()]);
            }
            other => panic!("expected HeaderMismatch, got {other:?}"),
        }
    }

    #[test]
    fn header_names_are_case_exact() {
        let csv = VALID_CSV.replace(
            "Personnel_Records.Payroll_Number",
            "personnel_records.payroll_number",
        );
        let err = read_employees_from_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::HeaderMismatch { .. }));
    }

    #[test]
    fn empty_input_reports_all_headers_missing() {
        let err = read_employees_from_csv(b"").unwrap_err();
        match err {
            ImportError::HeaderMismatch { missing } => assert_eq!(missing.len(), 11),
            other => panic!("expected HeaderMismatch, got {other:?}"),
        }
    }

    #[test]
    fn header_only_input_yields_no_candidates() {
        let header_line = VALID_CSV.lines().next().unwrap();
        let employees = read_employees_from_csv(header_line.as_bytes()).unwrap();
        assert!(employees.is_empty());
    }

    #[test]
    fn bad_date_aborts_with_row_number() {
        let csv = VALID_CSV.replace("11/5/1974", "1974-05-11");
        let err = read_employees_from_csv(csv.as_bytes()).unwrap_err();
        match err {
            ImportError::Row { row, message } => {
                // JACK13 is the second data row, so line 3
                assert_eq!(row, 3);
                assert!(message.contains("Personnel_Records.Date_of_Birth"));
                assert!(message.contains("1974-05-11"));
            }
            other => panic!("expected Row, got {other:?}"),
        }
    }

    #[test]
    fn non_four_digit_year_aborts_the_import() {
        // chrono alone would take both of these, as years 55 and 1955
        for bad in ["26/1/55", "26/1/+1955"] {
            let csv = VALID_CSV.replace("26/1/1955", bad);
            let err = read_employees_from_csv(csv.as_bytes()).unwrap_err();
            match err {
                ImportError::Row { row, message } => {
                    // COOP08 is the first data row, so line 2
                    assert_eq!(row, 2, "input {bad:?}");
                    assert!(message.contains("Personnel_Records.Date_of_Birth"));
                    assert!(message.contains("four digits"));
                }
                other => panic!("expected Row for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn short_row_aborts_the_import() {
        let csv = format!("{}COOP09,Ann\n", VALID_CSV);
        let err = read_employees_from_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::Row { row: 4, .. }));
    }

    #[test]
    fn blank_payroll_number_becomes_none() {
        let csv = VALID_CSV.replace("JACK13", "   ");
        let employees = read_employees_from_csv(csv.as_bytes()).unwrap();
        assert_eq!(employees[1].payroll_number, None);
    }

    #[test]
    fn utf8_bom_is_tolerated() {
        let mut bytes = b"\xef\xbb\xbf".to_vec();
        bytes.extend_from_slice(VALID_CSV.as_bytes());
        let employees = read_employees_from_csv(&bytes).unwrap();
        assert_eq!(employees.len(), 2);
    }
}
