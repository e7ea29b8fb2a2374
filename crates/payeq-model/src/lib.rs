//! Payroll data model shared by every stage of the pay-equity pipeline.

pub mod enums;
pub mod error;
pub mod field;
pub mod options;
pub mod record;
pub mod schema;

pub use enums::{EmployeeStatus, Gender, RaceEth, TitleClassification};
pub use error::{ConfigError, ParseError, SchemaError};
pub use field::{Field, FieldKind, UnknownField};
pub use options::{ColumnNames, DeriveOptions, ParsePolicy, StatusFilter};
pub use record::EmployeeRecord;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_serialize() {
        let options = DeriveOptions::new(2023).with_status_filter(StatusFilter::FullTime);
        let json = serde_json::to_string(&options).expect("serialize options");
        let round: DeriveOptions = serde_json::from_str(&json).expect("deserialize options");
        assert_eq!(round.reference_year, Some(2023));
        assert_eq!(round.status_filter, StatusFilter::FullTime);
    }

    #[test]
    fn errors_render_messages() {
        let error = SchemaError::ColumnCountMismatch {
            expected: 25,
            actual: 3,
        };
        assert_eq!(
            error.to_string(),
            "column count mismatch: input has 3 columns, 25 names supplied"
        );
        let error = ParseError::new(4, "start_date", "13/45/2020", "date");
        assert_eq!(
            error.to_string(),
            "row 4: cannot parse start_date value '13/45/2020' as date"
        );
    }
}
