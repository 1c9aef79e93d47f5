use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    TD1, // ID Card, 3 lines of 30
    TD2, // ID Card, 2 lines of 36
    TD3, // Passport, 2 lines of 44
}

impl DocumentFormat {
    pub fn mrz_lines(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 3,
            DocumentFormat::TD2 => 2,
            DocumentFormat::TD3 => 2,
        }
    }

    pub fn mrz_chars_per_line(&self) -> usize {
        match self {
            DocumentFormat::TD1 => 30,
            DocumentFormat::TD2 => 36,
            DocumentFormat::TD3 => 44,
        }
    }

    /// Guesses the layout from the lines a scan produced. OCR output is often
    /// short by a character or two, so this only matches exact widths.
    pub fn detect(lines: &[String]) -> Option<DocumentFormat> {
        let width = lines.first()?.chars().count();
        [DocumentFormat::TD3, DocumentFormat::TD2, DocumentFormat::TD1]
            .into_iter()
            .find(|format| {
                format.mrz_chars_per_line() == width && lines.len() >= format.mrz_lines()
            })
    }
}

/// Structured fields decoded from the first two MRZ lines.
///
/// Every field is a trimmed string. Anything the OCR read did not cover is an
/// empty string, so downstream formatting never has to deal with absence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub document_type: String,
    pub issuing_country: String,
    pub surname: String,
    pub first_name: String,
    pub middle_name: String,
    pub document_number: String,
    pub nationality: String,
    /// Raw `YYMMDD`.
    pub date_of_birth: String,
    pub sex: String,
    /// Raw `YYMMDD`.
    pub expiry_date: String,
}

impl ParsedDocument {
    pub fn given_names(&self) -> String {
        [self.first_name.as_str(), self.middle_name.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Check digit characters as printed on line 2. `None` when the line was too
/// short to contain the position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDigits {
    pub document_number_check: Option<char>,
    pub date_of_birth_check: Option<char>,
    pub date_of_expiry_check: Option<char>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelDetails {
    pub airline: String,
    pub flight_number: String,
    pub arrival_date: String,
    pub port_of_entry: String,
    pub country_of_departure: String,
    pub purpose_of_travel: String,
    pub destination_address: String,
    pub destination_city: String,
    pub destination_state: String,
    pub destination_zip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub phone: String,
    pub email: String,
    pub home_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub email: String,
}

/// A decoded document enriched with what the traveller entered by hand.
/// Every optional field defaults to an empty string here and nowhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelRecord {
    pub document: ParsedDocument,
    pub travel: TravelDetails,
    pub contact: ContactDetails,
    pub emergency: EmergencyContact,
    /// Raw MRZ text the document was decoded from.
    pub raw_mrz: String,
    /// RFC 3339 timestamp of the scan.
    pub scanned_at: String,
}

impl TravelRecord {
    pub fn from_document(document: ParsedDocument, raw_mrz: &str) -> Self {
        TravelRecord {
            document,
            raw_mrz: raw_mrz.to_string(),
            scanned_at: chrono::Utc::now().to_rfc3339(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub issue_type: ValidationIssueType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssueType {
    Mrz,
    Format,
    Expiry,
}

#[derive(Debug, Clone, Serialize)]
pub struct MrzValidationResult {
    pub is_valid: bool,
    pub document_number_check_valid: bool,
    pub date_of_birth_check_valid: bool,
    pub date_of_expiry_check_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormatValidationResult {
    pub is_valid: bool,
    pub missing_fields: Vec<String>,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpiryValidationResult {
    pub is_valid: bool,
    pub not_expired: bool,
    pub issues: Vec<ValidationIssue>,
}
