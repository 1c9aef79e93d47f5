// Named field values for the DS-3072 form template

use std::collections::BTreeMap;

use crate::models::TravelRecord;
use crate::processing::DateNormalizer;

/// Field name to value, ready for a form-filling library. Keys match the
/// template's field names.
pub type FormFields = BTreeMap<String, String>;

pub fn form_fields(record: &TravelRecord, normalizer: &DateNormalizer) -> FormFields {
    let doc = &record.document;
    let travel = &record.travel;
    let contact = &record.contact;
    let emergency = &record.emergency;

    let full_name = [doc.first_name.as_str(), doc.middle_name.as_str(), doc.surname.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

    let entries = [
        ("LastName", doc.surname.clone()),
        ("FirstName", doc.first_name.clone()),
        ("MiddleName", doc.middle_name.clone()),
        ("FullName", full_name),
        ("DateOfBirth", normalizer.normalize(&doc.date_of_birth, false)),
        ("Sex", doc.sex.clone()),
        ("Nationality", doc.nationality.clone()),
        ("DocumentType", doc.document_type.trim_end_matches('<').to_string()),
        ("PassportNumber", doc.document_number.clone()),
        ("IssuingCountry", doc.issuing_country.clone()),
        ("PassportExpiration", normalizer.normalize(&doc.expiry_date, true)),
        ("Airline", travel.airline.clone()),
        ("FlightNumber", travel.flight_number.clone()),
        ("ArrivalDate", travel.arrival_date.clone()),
        ("PortOfEntry", travel.port_of_entry.clone()),
        ("CountryOfDeparture", travel.country_of_departure.clone()),
        ("PurposeOfTravel", travel.purpose_of_travel.clone()),
        ("USAddress", travel.destination_address.clone()),
        ("USCity", travel.destination_city.clone()),
        ("USState", travel.destination_state.clone()),
        ("USZip", travel.destination_zip.clone()),
        ("Phone", contact.phone.clone()),
        ("Email", contact.email.clone()),
        ("HomeAddress", contact.home_address.clone()),
        ("EmergencyName", emergency.name.clone()),
        ("EmergencyRelationship", emergency.relationship.clone()),
        ("EmergencyPhone", emergency.phone.clone()),
        ("EmergencyEmail", emergency.email.clone()),
    ];

    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParsedDocument;
    use crate::processing::{DateOrder, INVALID_DATE};

    fn record() -> TravelRecord {
        let mut record = TravelRecord {
            document: ParsedDocument {
                document_type: "P<".to_string(),
                issuing_country: "USA".to_string(),
                surname: "DOE".to_string(),
                first_name: "JOHN".to_string(),
                middle_name: "MICHAEL".to_string(),
                document_number: "AB1234567".to_string(),
                nationality: "USA".to_string(),
                date_of_birth: "900101".to_string(),
                sex: "M".to_string(),
                expiry_date: "300215".to_string(),
            },
            ..Default::default()
        };
        record.travel.flight_number = "UA901".to_string();
        record.emergency.name = "JANE DOE".to_string();
        record
    }

    #[test]
    fn test_document_fields() {
        let n = DateNormalizer::new(DateOrder::MonthFirst).with_reference_year(2026);
        let fields = form_fields(&record(), &n);
        assert_eq!(fields["LastName"], "DOE");
        assert_eq!(fields["FullName"], "JOHN MICHAEL DOE");
        assert_eq!(fields["DocumentType"], "P");
        assert_eq!(fields["DateOfBirth"], "01/01/1990");
        assert_eq!(fields["PassportExpiration"], "02/15/2030");
        assert_eq!(fields["FlightNumber"], "UA901");
        assert_eq!(fields["EmergencyName"], "JANE DOE");
        assert_eq!(fields["Email"], "");
    }

    #[test]
    fn test_day_first_dates() {
        let n = DateNormalizer::new(DateOrder::DayFirst).with_reference_year(2026);
        let fields = form_fields(&record(), &n);
        assert_eq!(fields["PassportExpiration"], "15/02/2030");
    }

    #[test]
    fn test_empty_record_is_total() {
        let n = DateNormalizer::default().with_reference_year(2026);
        let fields = form_fields(&TravelRecord::default(), &n);
        assert_eq!(fields["LastName"], "");
        assert_eq!(fields["FullName"], "");
        assert_eq!(fields["DateOfBirth"], INVALID_DATE);
        assert_eq!(fields.len(), 28);
    }
}
