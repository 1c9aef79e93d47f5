// Field-aware cleanup of common OCR character confusions in MRZ text

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::models::ParsedDocument;
use crate::processing::mrz::FILLER;

/// Field types for context-aware correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Alphanumeric, e.g. document numbers
    DocumentNumber,
    /// Letters only: names, country codes
    Alpha,
    /// Digits only: compact dates
    Numeric,
    Sex,
}

lazy_static! {
    static ref INLINE_WHITESPACE: Regex = Regex::new(r"[ \t\u{00A0}]+").unwrap();

    static ref FIELD_CHAR_PREFERENCES: HashMap<FieldType, HashMap<char, char>> = {
        let mut prefs = HashMap::new();

        let mut doc_prefs = HashMap::new();
        doc_prefs.insert('«', FILLER);
        doc_prefs.insert('|', '1');
        prefs.insert(FieldType::DocumentNumber, doc_prefs);

        let mut alpha_prefs = HashMap::new();
        alpha_prefs.insert('0', 'O');
        alpha_prefs.insert('1', 'I');
        alpha_prefs.insert('2', 'Z');
        alpha_prefs.insert('5', 'S');
        alpha_prefs.insert('6', 'G');
        alpha_prefs.insert('8', 'B');
        alpha_prefs.insert('«', FILLER);
        prefs.insert(FieldType::Alpha, alpha_prefs);

        let mut numeric_prefs = HashMap::new();
        numeric_prefs.insert('O', '0');
        numeric_prefs.insert('Q', '0');
        numeric_prefs.insert('D', '0');
        numeric_prefs.insert('I', '1');
        numeric_prefs.insert('L', '1');
        numeric_prefs.insert('|', '1');
        numeric_prefs.insert('Z', '2');
        numeric_prefs.insert('S', '5');
        numeric_prefs.insert('G', '6');
        numeric_prefs.insert('B', '8');
        prefs.insert(FieldType::Numeric, numeric_prefs);

        let mut sex_prefs = HashMap::new();
        sex_prefs.insert('H', 'M');
        sex_prefs.insert('N', 'M');
        sex_prefs.insert('E', 'F');
        sex_prefs.insert('P', 'F');
        prefs.insert(FieldType::Sex, sex_prefs);

        prefs
    };
}

/// Upper-cases each line and strips whitespace inside it, which is what the
/// OCR source is expected to do before handing text over.
pub fn normalize_ocr_text(text: &str) -> String {
    text.lines()
        .map(|line| INLINE_WHITESPACE.replace_all(line.trim(), "").to_uppercase())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn correct_text_with_context(text: &str, field_type: FieldType) -> String {
    let upper = text.to_uppercase();
    match FIELD_CHAR_PREFERENCES.get(&field_type) {
        Some(preferences) => upper
            .chars()
            .map(|c| preferences.get(&c).copied().unwrap_or(c))
            .collect(),
        None => upper,
    }
}

/// Repairs a decoded document field by field. Sex is corrected before the
/// decoder's code mapping would apply, so `1`/`2` are left alone.
pub fn correct_document(document: &ParsedDocument) -> ParsedDocument {
    ParsedDocument {
        document_type: correct_text_with_context(&document.document_type, FieldType::Alpha),
        issuing_country: correct_text_with_context(&document.issuing_country, FieldType::Alpha),
        surname: correct_text_with_context(&document.surname, FieldType::Alpha),
        first_name: correct_text_with_context(&document.first_name, FieldType::Alpha),
        middle_name: correct_text_with_context(&document.middle_name, FieldType::Alpha),
        document_number: correct_text_with_context(
            &document.document_number,
            FieldType::DocumentNumber,
        ),
        nationality: correct_text_with_context(&document.nationality, FieldType::Alpha),
        date_of_birth: correct_text_with_context(&document.date_of_birth, FieldType::Numeric),
        sex: correct_text_with_context(&document.sex, FieldType::Sex),
        expiry_date: correct_text_with_context(&document.expiry_date, FieldType::Numeric),
    }
}
