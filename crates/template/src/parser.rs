//! JSON parsing of layouts and records

use crate::record::ApplicantRecord;
use crate::schema::LayoutTable;
use crate::{Result, TemplateError};

/// Parse a layout table from JSON string
pub fn parse_layout(json: &str) -> Result<LayoutTable> {
    serde_json::from_str(json).map_err(|e| TemplateError::ParseError(e.to_string()))
}

/// Parse an applicant record from JSON string
pub fn parse_record(json: &str) -> Result<ApplicantRecord> {
    serde_json::from_str(json).map_err(|e| TemplateError::RecordError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FamilyDetails, LanguageLevel};
    use crate::schema::{Country, Field, Office};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_layout() {
        let json = r#"{
            "country": "jordan",
            "office": "EWAN",
            "fields": {
                "refNo": { "x": 141.5, "y": 76.25 },
                "placeOfIssue": { "x": 0, "y": 0 },
                "photoFace": { "x": 32.5, "y": 46.5, "width": 27, "height": 35 }
            }
        }"#;

        let layout = parse_layout(json).unwrap();
        assert_eq!(layout.country, Country::Jordan);
        assert_eq!(layout.office, Office::Ewan);
        assert!(layout.text(Field::RefNo).is_some());
        assert!(layout.text(Field::PlaceOfIssue).is_none());
        assert!(layout.image(Field::PhotoFace).is_some());
        assert!(layout.name_fit.is_none());
        assert!(layout.marks.is_empty());
    }

    #[test]
    fn test_parse_layout_unknown_field() {
        let json = r#"{
            "country": "kuwait",
            "office": "ALNOOR",
            "fields": { "shoeSize": { "x": 1, "y": 1 } }
        }"#;
        assert!(matches!(
            parse_layout(json),
            Err(TemplateError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_record() {
        let json = r#"{
            "fullName": "ABEBE KEBEDE TEST",
            "dob": "1998-03-05",
            "hasExperience": true,
            "expCountry": "KUWAIT",
            "englishLevel": "FAIR",
            "photos": { "face": null },
            "details": {
                "family": "kuwait",
                "refNo": "TK-001",
                "salary": "110 KD",
                "skills": { "cooking": true }
            }
        }"#;

        let record = parse_record(json).unwrap();
        assert_eq!(record.core.full_name, "ABEBE KEBEDE TEST");
        assert!(record.core.has_experience);
        assert_eq!(record.core.english_level, Some(LanguageLevel::Fair));
        assert!(record.core.photos.face.is_none());
        match &record.details {
            FamilyDetails::Kuwait(d) => {
                assert_eq!(d.salary, "110 KD");
                assert!(d.skills.cooking);
                assert!(!d.skills.washing);
            }
            other => panic!("unexpected family {}", other.family_name()),
        }
    }

    #[test]
    fn test_parse_record_unknown_family() {
        let json = r#"{ "fullName": "X", "details": { "family": "qatar" } }"#;
        assert!(matches!(
            parse_record(json),
            Err(TemplateError::RecordError(_))
        ));
    }
}
