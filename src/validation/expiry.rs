use chrono::{Local, NaiveDate};
use crate::models::{ExpiryValidationResult, ParsedDocument, ValidationIssue, ValidationIssueType};
use crate::processing::DateNormalizer;

pub struct ExpiryValidator;

impl ExpiryValidator {
    pub fn validate(
        document: &ParsedDocument,
        normalizer: &DateNormalizer,
    ) -> ExpiryValidationResult {
        Self::validate_on(document, normalizer, Local::now().date_naive())
    }

    pub fn validate_on(
        document: &ParsedDocument,
        normalizer: &DateNormalizer,
        today: NaiveDate,
    ) -> ExpiryValidationResult {
        let mut issues = Vec::new();
        let mut not_expired = false;

        match normalizer.to_date(&document.expiry_date, true) {
            Some(expiry) => {
                not_expired = expiry >= today;
                if !not_expired {
                    issues.push(ValidationIssue {
                        issue_type: ValidationIssueType::Expiry,
                        message: format!("Document expired on {}", normalizer.format(expiry)),
                    });
                }
            }
            None => issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Expiry,
                message: "Invalid expiry date format".to_string(),
            }),
        }

        if normalizer.to_date(&document.date_of_birth, false).is_none() {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Expiry,
                message: "Invalid date of birth".to_string(),
            });
        }

        ExpiryValidationResult {
            is_valid: issues.is_empty(),
            not_expired,
            issues,
        }
    }
}
