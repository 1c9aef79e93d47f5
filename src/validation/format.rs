use crate::models::{FormatValidationResult, ParsedDocument, ValidationIssue, ValidationIssueType};

pub struct FormatValidator;

impl FormatValidator {
    /// Decoding tolerates partial reads, so the fields needed to identify the
    /// traveller are checked here before the record is trusted.
    pub fn validate(document: &ParsedDocument) -> FormatValidationResult {
        let required = [
            ("document_number", "Document number", &document.document_number),
            ("surname", "Surname", &document.surname),
            ("first_name", "First name", &document.first_name),
            ("nationality", "Nationality", &document.nationality),
            ("date_of_birth", "Date of birth", &document.date_of_birth),
            ("sex", "Sex", &document.sex),
            ("expiry_date", "Date of expiry", &document.expiry_date),
        ];

        let mut missing_fields = Vec::new();
        let mut issues = Vec::new();
        for (field, label, value) in required {
            if value.is_empty() {
                missing_fields.push(field.to_string());
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::Format,
                    message: format!("{} is missing", label),
                });
            }
        }

        for (label, value) in [
            ("Date of birth", &document.date_of_birth),
            ("Date of expiry", &document.expiry_date),
        ] {
            let compact = value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit());
            if !value.is_empty() && !compact {
                issues.push(ValidationIssue {
                    issue_type: ValidationIssueType::Format,
                    message: format!("{} is not in YYMMDD form", label),
                });
            }
        }

        if !document.sex.is_empty() && !matches!(document.sex.as_str(), "M" | "F" | "X" | "<") {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Format,
                message: format!("Unrecognised sex code {:?}", document.sex),
            });
        }

        FormatValidationResult {
            is_valid: issues.is_empty(),
            missing_fields,
            issues,
        }
    }
}
