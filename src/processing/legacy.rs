// Input adapter for OCR sources that hand over one concatenated buffer

use crate::models::ParsedDocument;
use crate::processing::mrz::MrzDecoder;
use crate::utils::PassportError;

/// Width of a passport (TD3) MRZ line.
pub const SEGMENT_WIDTH: usize = 44;

/// Drops every line terminator and re-slices the buffer into 44-character
/// segments, one per line.
pub fn reslice(raw_text: &str) -> String {
    let chars: Vec<char> = raw_text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    chars
        .chunks(SEGMENT_WIDTH)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decodes a buffer whose line breaks cannot be trusted.
pub fn decode_fixed_width(raw_text: &str) -> Result<ParsedDocument, PassportError> {
    MrzDecoder::decode(&reslice(raw_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE1: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<";
    const LINE2: &str = "L898902C36UTO7408122F1204159ZE184226B<<<<<10";

    #[test]
    fn test_reslice_rebuilds_lines() {
        let buffer = format!("{}{}", LINE1, LINE2);
        assert_eq!(reslice(&buffer), format!("{}\n{}", LINE1, LINE2));
    }

    #[test]
    fn test_reslice_ignores_broken_line_breaks() {
        let broken = format!("{}\r\n{}\n{}", &LINE1[..20], &LINE1[20..], LINE2);
        let doc = decode_fixed_width(&broken).unwrap();
        assert_eq!(doc.surname, "ERIKSSON");
        assert_eq!(doc.first_name, "ANNA");
        assert_eq!(doc.middle_name, "MARIA");
        assert_eq!(doc.document_number, "L898902C3");
        assert_eq!(doc.nationality, "UTO");
        assert_eq!(doc.sex, "F");
    }

    #[test]
    fn test_single_segment_fails() {
        assert!(matches!(
            decode_fixed_width(LINE1),
            Err(PassportError::InsufficientLines { found: 1 })
        ));
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(reslice(""), "");
        assert!(decode_fixed_width("\n\r\n").is_err());
    }
}
