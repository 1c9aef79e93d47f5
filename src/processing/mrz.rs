// Fixed-column decoding of two-line MRZ text

use crate::models::{CheckDigits, ParsedDocument};
use crate::utils::PassportError;
use log::debug;

/// Padding character used between and inside MRZ fields.
pub const FILLER: char = '<';
const NAME_SEPARATOR: &str = "<<";

pub struct MrzDecoder;

impl MrzDecoder {
    /// Decodes raw OCR text into document fields.
    ///
    /// Only a missing second line is fatal. Short lines yield empty fields so
    /// a partial read can still be shown for manual correction; callers must
    /// check required fields before trusting the result.
    pub fn decode(raw_text: &str) -> Result<ParsedDocument, PassportError> {
        let lines = Self::split_lines(raw_text);
        if lines.len() < 2 {
            return Err(PassportError::InsufficientLines { found: lines.len() });
        }

        let line1 = &lines[0];
        let line2 = &lines[1];
        debug!("Decoding MRZ lines {:?} / {:?}", line1, line2);

        // Line 1: document type, issuing country, name block
        let document_type = column(line1, 0, 2);
        let issuing_country = column(line1, 2, 5);
        let name_block: String = line1.chars().skip(5).collect();
        let (surname, first_name, middle_name) = Self::parse_names(&name_block);

        // Line 2: document number, nationality, birth date, sex, expiry date.
        // Positions 9 and 19 hold check digits.
        let document_number = column(line2, 0, 9);
        let nationality = column(line2, 10, 13);
        let date_of_birth = column(line2, 13, 19);
        let sex = Self::normalize_sex(&column(line2, 20, 21));
        let expiry_date = column(line2, 21, 27);

        Ok(ParsedDocument {
            document_type,
            issuing_country,
            surname,
            first_name,
            middle_name,
            document_number,
            nationality,
            date_of_birth,
            sex,
            expiry_date,
        })
    }

    /// Splits on any line terminator, trims, and drops empty lines.
    pub fn split_lines(raw_text: &str) -> Vec<String> {
        raw_text
            .split(['\n', '\r'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Splits a name block into surname, first name and middle names.
    pub fn parse_names(name_block: &str) -> (String, String, String) {
        let mut segments = name_block.splitn(3, NAME_SEPARATOR);
        let surname = segments.next().map(fillers_to_spaces).unwrap_or_default();
        let given_names = segments.next().map(fillers_to_spaces).unwrap_or_default();

        let mut tokens = given_names.split_whitespace();
        let first_name = tokens.next().unwrap_or_default().to_string();
        let middle_name = tokens.collect::<Vec<_>>().join(" ");

        (surname, first_name, middle_name)
    }

    /// `1` is female and `2` is male; everything else is passed through
    /// uppercased, so decoders that already emit `M`/`F` are unaffected.
    pub fn normalize_sex(code: &str) -> String {
        match code {
            "1" => "F".to_string(),
            "2" => "M".to_string(),
            other => other.to_uppercase(),
        }
    }

    /// Reads the check digit characters from line 2 of the raw text.
    pub fn check_digits(raw_text: &str) -> CheckDigits {
        let lines = Self::split_lines(raw_text);
        let line2 = lines.get(1).map(String::as_str).unwrap_or_default();
        CheckDigits {
            document_number_check: line2.chars().nth(9),
            date_of_birth_check: line2.chars().nth(19),
            date_of_expiry_check: line2.chars().nth(27),
        }
    }
}

/// Character-indexed slice that stops at the end of the line instead of failing.
pub(crate) fn column(line: &str, start: usize, end: usize) -> String {
    line.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect::<String>()
        .trim()
        .to_string()
}

fn fillers_to_spaces(segment: &str) -> String {
    segment
        .split(FILLER)
        .filter(|part| !part.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LINE2: &str = "AB12345670USA9001011M3001015<<<<<<<<<<<<<<02";

    #[test]
    fn test_insufficient_lines() {
        for raw in ["", "   ", "\n\n", "P<USADOE<<JOHN", "P<USADOE<<JOHN\n   \r\n"] {
            match MrzDecoder::decode(raw) {
                Err(PassportError::InsufficientLines { found }) => assert!(found < 2),
                other => panic!("expected InsufficientLines for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_decode_full_document() {
        let raw = format!("P<USADOE<<JOHN<MICHAEL<<<<<<<<<<<<<<<<<<<<<<\n{}", LINE2);
        let doc = MrzDecoder::decode(&raw).unwrap();
        assert_eq!(
            doc,
            ParsedDocument {
                document_type: "P<".to_string(),
                issuing_country: "USA".to_string(),
                surname: "DOE".to_string(),
                first_name: "JOHN".to_string(),
                middle_name: "MICHAEL".to_string(),
                document_number: "AB1234567".to_string(),
                nationality: "USA".to_string(),
                date_of_birth: "900101".to_string(),
                sex: "M".to_string(),
                expiry_date: "300101".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_is_deterministic() {
        let raw = format!("P<USADOE<<JOHN<MICHAEL\n{}", LINE2);
        assert_eq!(MrzDecoder::decode(&raw).unwrap(), MrzDecoder::decode(&raw).unwrap());
    }

    #[test]
    fn test_line_without_document_number_check_digit() {
        // Without the check digit every later field shifts one column left.
        let doc = MrzDecoder::decode("P<USADOE<<JOHN<MICHAEL\nAB1234567USA9001011M300101").unwrap();
        assert_eq!(
            doc,
            ParsedDocument {
                document_type: "P<".to_string(),
                issuing_country: "USA".to_string(),
                surname: "DOE".to_string(),
                first_name: "JOHN".to_string(),
                middle_name: "MICHAEL".to_string(),
                document_number: "AB1234567".to_string(),
                nationality: "SA9".to_string(),
                date_of_birth: "001011".to_string(),
                sex: "3".to_string(),
                expiry_date: "00101".to_string(),
            }
        );
    }

    #[test]
    fn test_tolerates_whitespace_and_crlf() {
        let raw = format!("\r\n  P<USADOE<<JOHN<MICHAEL  \r\n\r\n\t{}  \r\n", LINE2);
        let doc = MrzDecoder::decode(&raw).unwrap();
        assert_eq!(doc.surname, "DOE");
        assert_eq!(doc.document_number, "AB1234567");
        assert_eq!(doc.expiry_date, "300101");
    }

    #[test]
    fn test_sex_codes() {
        let cases = [
            ("1", "F"),
            ("2", "M"),
            ("M", "M"),
            ("F", "F"),
            ("f", "F"),
            ("<", "<"),
        ];
        for (code, expected) in cases {
            let line2 = format!("AB12345670USA9001011{}300101", code);
            let doc = MrzDecoder::decode(&format!("P<USADOE<<JOHN\n{}", line2)).unwrap();
            assert_eq!(doc.sex, expected, "code {}", code);
        }
    }

    #[test]
    fn test_name_parsing() {
        assert_eq!(
            MrzDecoder::parse_names("DOE<<JOHN<MICHAEL"),
            ("DOE".to_string(), "JOHN".to_string(), "MICHAEL".to_string())
        );
        assert_eq!(
            MrzDecoder::parse_names("DOE<<"),
            ("DOE".to_string(), String::new(), String::new())
        );
        assert_eq!(
            MrzDecoder::parse_names("DOE"),
            ("DOE".to_string(), String::new(), String::new())
        );
        assert_eq!(
            MrzDecoder::parse_names("CHAIREZ<DE<LA<CRUZ<<DULCE<IVONNE<<<<<<<"),
            (
                "CHAIREZ DE LA CRUZ".to_string(),
                "DULCE".to_string(),
                "IVONNE".to_string()
            )
        );
        assert_eq!(
            MrzDecoder::parse_names("ERIKSSON<<ANNA<MARIA<LOUISE<<<<"),
            (
                "ERIKSSON".to_string(),
                "ANNA".to_string(),
                "MARIA LOUISE".to_string()
            )
        );
    }

    #[test]
    fn test_short_second_line_degrades_to_empty_fields() {
        let doc = MrzDecoder::decode("P<USADOE<<JOHN\nAB12345670USA90").unwrap();
        assert_eq!(doc.document_number, "AB1234567");
        assert_eq!(doc.nationality, "USA");
        assert_eq!(doc.date_of_birth, "90");
        assert_eq!(doc.sex, "");
        assert_eq!(doc.expiry_date, "");
    }

    #[test]
    fn test_short_first_line() {
        let doc = MrzDecoder::decode(&format!("P\n{}", LINE2)).unwrap();
        assert_eq!(doc.document_type, "P");
        assert_eq!(doc.issuing_country, "");
        assert_eq!(doc.surname, "");
        assert_eq!(doc.first_name, "");
    }

    #[test]
    fn test_third_line_is_ignored() {
        let raw = format!("P<USADOE<<JOHN\n{}\nEXTRA<<<LINE", LINE2);
        let doc = MrzDecoder::decode(&raw).unwrap();
        assert_eq!(doc.document_number, "AB1234567");
    }

    #[test]
    fn test_non_ascii_noise_does_not_panic() {
        let doc = MrzDecoder::decode("P<ÜSADÖE<<JÖHN\nÅB12345670USA9001011M300101").unwrap();
        assert_eq!(doc.issuing_country, "ÜSA");
        assert_eq!(doc.surname, "DÖE");
        assert_eq!(doc.document_number, "ÅB1234567");
        assert_eq!(doc.sex, "M");
    }

    #[test]
    fn test_check_digits() {
        let digits = MrzDecoder::check_digits(&format!("P<USADOE<<JOHN\n{}", LINE2));
        assert_eq!(digits.document_number_check, Some('0'));
        assert_eq!(digits.date_of_birth_check, Some('1'));
        assert_eq!(digits.date_of_expiry_check, Some('5'));

        let digits = MrzDecoder::check_digits("P<USADOE<<JOHN\nAB1234567");
        assert_eq!(digits.document_number_check, None);
    }

    fn blank_lines() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[ \t]{0,3}", 0..4)
    }

    proptest! {
        /// At most one non-blank line, wherever blanks and terminators fall.
        #[test]
        fn single_line_is_insufficient(
            before in blank_lines(),
            line in "[^\r\n]{0,60}",
            after in blank_lines(),
            crlf in any::<bool>(),
        ) {
            let terminator = if crlf { "\r\n" } else { "\n" };
            let mut parts = before;
            parts.push(line.clone());
            parts.extend(after);
            let raw = parts.join(terminator);

            let expected = if line.trim().is_empty() { 0 } else { 1 };
            match MrzDecoder::decode(&raw) {
                Err(PassportError::InsufficientLines { found }) => prop_assert_eq!(found, expected),
                other => prop_assert!(false, "expected InsufficientLines, got {:?}", other),
            }
        }

        #[test]
        fn decode_is_deterministic(raw in any::<String>()) {
            let first = MrzDecoder::decode(&raw).map_err(|e| e.to_string());
            let second = MrzDecoder::decode(&raw).map_err(|e| e.to_string());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn decode_two_line_layout_is_deterministic(
            line1 in "[A-Z<]{5,44}",
            line2 in "[A-Z0-9<]{0,44}",
        ) {
            prop_assume!(!line2.is_empty());
            let raw = format!("{}\n{}", line1, line2);
            prop_assert_eq!(MrzDecoder::decode(&raw).unwrap(), MrzDecoder::decode(&raw).unwrap());
        }

        #[test]
        fn sex_code_mapping(code in any::<char>().prop_filter("visible", |c| !c.is_whitespace())) {
            let raw = format!("P<USADOE<<JOHN\nAB12345670USA9001011{}300101", code);
            let doc = MrzDecoder::decode(&raw).unwrap();
            let expected = match code {
                '1' => "F".to_string(),
                '2' => "M".to_string(),
                other => other.to_uppercase().to_string(),
            };
            prop_assert_eq!(doc.sex, expected);
        }
    }
}
