use log::{info, warn};
use serde::Serialize;

use crate::config::{InputMode, IntakeConfig};
use crate::models::{
    CheckDigits, DocumentFormat, ExpiryValidationResult, FormatValidationResult,
    MrzValidationResult, ParsedDocument, ValidationIssue,
};
use crate::processing::correction::{correct_document, normalize_ocr_text};
use crate::processing::{legacy, DateNormalizer, MrzDecoder, ScanConsensus};
use crate::utils::PassportError;
use crate::validation::{ExpiryValidator, FormatValidator, MrzValidator};

/// Everything learned from one OCR read.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub document: ParsedDocument,
    pub format: Option<DocumentFormat>,
    pub check_digits: CheckDigits,
    pub date_of_birth_display: String,
    pub expiry_date_display: String,
    pub mrz_validation: MrzValidationResult,
    pub format_validation: FormatValidationResult,
    pub expiry_validation: ExpiryValidationResult,
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

pub struct ScanPipeline {
    config: IntakeConfig,
    normalizer: DateNormalizer,
    consensus: ScanConsensus,
}

impl ScanPipeline {
    pub fn new(config: IntakeConfig) -> Self {
        let normalizer = config.normalizer();
        let consensus = ScanConsensus::new(config.consensus_window, config.consensus_required);
        ScanPipeline {
            config,
            normalizer,
            consensus,
        }
    }

    pub fn normalizer(&self) -> &DateNormalizer {
        &self.normalizer
    }

    /// Decodes and validates a single OCR read.
    pub fn scan(&self, raw_text: &str) -> Result<ScanReport, PassportError> {
        // Step 1: Bring the text into line form
        let text = if self.config.correct_ocr {
            normalize_ocr_text(raw_text)
        } else {
            raw_text.to_string()
        };

        // Step 2: Decode
        let (mut document, text) = match self.config.input_mode {
            InputMode::Lines => (MrzDecoder::decode(&text)?, text),
            InputMode::Fixed44 => (legacy::decode_fixed_width(&text)?, legacy::reslice(&text)),
        };
        if self.config.correct_ocr {
            document = correct_document(&document);
        }
        let lines = MrzDecoder::split_lines(&text);
        let format = DocumentFormat::detect(&lines);
        let check_digits = MrzDecoder::check_digits(&text);

        // Step 3: Validate
        let mrz_validation = MrzValidator::validate(&document, &check_digits);
        let format_validation = FormatValidator::validate(&document);
        let expiry_validation = ExpiryValidator::validate(&document, &self.normalizer);

        let is_valid = mrz_validation.is_valid
            && format_validation.is_valid
            && expiry_validation.is_valid;

        let mut issues = Vec::new();
        issues.extend(mrz_validation.issues.clone());
        issues.extend(format_validation.issues.clone());
        issues.extend(expiry_validation.issues.clone());
        for issue in &issues {
            warn!("{:?}: {}", issue.issue_type, issue.message);
        }
        info!(
            "Decoded document {:?} ({:?}), valid: {}",
            document.document_number, format, is_valid
        );

        Ok(ScanReport {
            date_of_birth_display: self.normalizer.normalize(&document.date_of_birth, false),
            expiry_date_display: self.normalizer.normalize(&document.expiry_date, true),
            document,
            format,
            check_digits,
            mrz_validation,
            format_validation,
            expiry_validation,
            is_valid,
            issues,
        })
    }

    /// Feeds one read of a repeated scan. Decodes only once the configured
    /// number of identical reads has been seen.
    pub fn observe(&mut self, raw_text: &str) -> Option<Result<ScanReport, PassportError>> {
        let agreed = self.consensus.observe(raw_text)?;
        Some(self.scan(&agreed))
    }
}
