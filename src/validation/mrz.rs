use crate::models::{
    CheckDigits, MrzValidationResult, ParsedDocument, ValidationIssue, ValidationIssueType,
};
use crate::processing::mrz::FILLER;
use log::warn;

const WEIGHTS: [u32; 3] = [7, 3, 1];

pub struct MrzValidator;

impl MrzValidator {
    /// Verifies the line 2 check digits against the decoded fields.
    /// A field whose check digit was not read is not counted as a failure.
    pub fn validate(document: &ParsedDocument, check_digits: &CheckDigits) -> MrzValidationResult {
        let mut issues = Vec::new();

        let mut verify = |label: &str, value: &str, printed: Option<char>| -> bool {
            let Some(printed) = printed else {
                return true;
            };
            let expected = Self::check_digit(value);
            if expected == Some(printed) {
                return true;
            }
            warn!(
                "{} check digit mismatch: printed {:?}, computed {:?}",
                label, printed, expected
            );
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Mrz,
                message: format!("{} check digit does not match", label),
            });
            false
        };

        let document_number_check_valid = verify(
            "Document number",
            &document.document_number,
            check_digits.document_number_check,
        );
        let date_of_birth_check_valid = verify(
            "Date of birth",
            &document.date_of_birth,
            check_digits.date_of_birth_check,
        );
        let date_of_expiry_check_valid = verify(
            "Date of expiry",
            &document.expiry_date,
            check_digits.date_of_expiry_check,
        );

        MrzValidationResult {
            is_valid: document_number_check_valid
                && date_of_birth_check_valid
                && date_of_expiry_check_valid,
            document_number_check_valid,
            date_of_birth_check_valid,
            date_of_expiry_check_valid,
            issues,
        }
    }

    /// ICAO 9303 check digit: weights 7, 3, 1 repeating; digits count as
    /// themselves, A-Z as 10-35, the filler as 0. `None` for any other character.
    pub fn check_digit(value: &str) -> Option<char> {
        let mut total = 0;
        for (i, c) in value.chars().enumerate() {
            let v = match c {
                '0'..='9' => c as u32 - '0' as u32,
                'A'..='Z' => c as u32 - 'A' as u32 + 10,
                FILLER => 0,
                _ => return None,
            };
            total += v * WEIGHTS[i % 3];
        }
        char::from_digit(total % 10, 10)
    }
}
