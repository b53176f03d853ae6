//! Applicant record model
//!
//! A record is a common core plus a payload that depends on the office
//! family the form was filled for. The payload is a closed sum type, so every
//! family-specific rule is an exhaustive match.

use crate::format::parse_iso_date;
use crate::schema::Office;
use crate::TemplateError;
use base64::Engine as _;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language proficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LanguageLevel {
    Poor,
    Fair,
    Fluent,
}

impl FromStr for LanguageLevel {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "POOR" => Ok(LanguageLevel::Poor),
            "FAIR" => Ok(LanguageLevel::Fair),
            "FLUENT" => Ok(LanguageLevel::Fluent),
            other => Err(TemplateError::RecordError(format!(
                "unknown language level '{other}'"
            ))),
        }
    }
}

/// Blank means unset, anything else must be a level (any case)
fn deserialize_level<'de, D>(deserializer: D) -> Result<Option<LanguageLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Skills across every office family's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    Cooking,
    BabySitting,
    BabyCare,
    Cleaning,
    Washing,
    Ironing,
    Sewing,
}

/// Raw image bytes of an applicant photo
///
/// Written in JSON as base64, with or without a `data:` URL prefix.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Photo(Vec<u8>);

impl Photo {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<String> for Photo {
    type Error = TemplateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let payload = match value.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => value.as_str(),
        };
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map(Photo)
            .map_err(|e| TemplateError::RecordError(format!("invalid photo data: {e}")))
    }
}

impl From<Photo> for String {
    fn from(photo: Photo) -> Self {
        base64::engine::general_purpose::STANDARD.encode(photo.0)
    }
}

impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Photo({} bytes)", self.0.len())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Photos {
    pub face: Option<Photo>,
    pub full: Option<Photo>,
    pub passport: Option<Photo>,
}

/// Fields every office family shares
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicantCore {
    pub full_name: String,
    pub religion: String,
    /// `YYYY-MM-DD`
    pub dob: String,
    pub pob: String,
    pub marital_status: String,
    pub children: String,

    pub passport_number: String,
    pub issue_date: String,
    pub place_of_issue: String,
    pub expiry_date: String,

    pub has_experience: bool,
    pub exp_country: String,
    pub exp_period: String,
    pub exp_position: String,
    pub exp_country2: String,
    pub exp_period2: String,
    pub exp_position2: String,

    #[serde(deserialize_with = "deserialize_level")]
    pub english_level: Option<LanguageLevel>,
    #[serde(deserialize_with = "deserialize_level")]
    pub arabic_level: Option<LanguageLevel>,

    pub photos: Photos,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KuwaitSkills {
    pub cooking: bool,
    pub baby_sitting: bool,
    pub cleaning: bool,
    pub washing: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KuwaitDetails {
    pub ref_no: String,
    /// e.g. `110 KD`
    pub salary: String,
    /// `YYYY-MM-DD`, printed by offices that date their forms
    pub print_date: String,
    pub height: String,
    pub weight: String,
    pub contact_person: String,
    pub contact_phone: String,
    pub skills: KuwaitSkills,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaudiSkills {
    pub washing: bool,
    pub cleaning: bool,
    pub ironing: bool,
    pub sewing: bool,
    pub cooking: bool,
    pub baby_care: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaudiDetails {
    pub ref_no: String,
    pub education: String,
    /// Kept with the record; the printed position is always HOUSEMAID
    pub applied_for: String,
    /// e.g. `1000 SR`
    pub monthly_salary: String,
    pub contact_person: String,
    pub relationship: String,
    pub contact_phone: String,
    pub address: String,
    pub height: String,
    pub weight: String,
    pub skills: SaudiSkills,
}

/// Office selector of the Jordan form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JordanOffice {
    #[default]
    Ewan,
    Option,
    Injaz,
}

impl JordanOffice {
    pub fn office(self) -> Office {
        match self {
            JordanOffice::Ewan => Office::Ewan,
            JordanOffice::Option => Office::Option,
            JordanOffice::Injaz => Office::Injaz,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JordanSkills {
    pub baby_sitting: bool,
    pub cleaning: bool,
    pub cooking: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JordanDetails {
    pub ref_no: String,
    pub weight: String,
    pub height: String,
    pub education: String,
    pub office: JordanOffice,
    pub skills: JordanSkills,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombinedSkills {
    pub cooking: bool,
    pub baby_sitting: bool,
    pub cleaning: bool,
    pub washing: bool,
    pub ironing: bool,
    pub sewing: bool,
}

/// The "generate all" form: enough to derive all six documents
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombinedDetails {
    /// Shared reference, used when an office's own is blank
    pub ref_no: String,
    pub ref_alnoor: String,
    pub ref_fahad: String,
    pub ref_aldhahran: String,
    pub ref_ewan: String,
    pub ref_option: String,
    pub ref_injaz: String,

    pub print_date: String,
    pub education: String,
    pub weight: String,
    pub height: String,
    pub applied_for: String,
    pub monthly_salary: String,
    pub contact_person: String,
    pub relationship: String,
    pub contact_phone: String,
    pub address: String,
    pub skills: CombinedSkills,
}

impl CombinedDetails {
    /// Reference number for one office, falling back to the shared one
    pub fn ref_for(&self, office: Office) -> &str {
        let specific = match office {
            Office::Alnoor => &self.ref_alnoor,
            Office::Fahad => &self.ref_fahad,
            Office::Aldhahran => &self.ref_aldhahran,
            Office::Ewan => &self.ref_ewan,
            Office::Option => &self.ref_option,
            Office::Injaz => &self.ref_injaz,
        };
        if specific.trim().is_empty() {
            &self.ref_no
        } else {
            specific
        }
    }
}

/// Family-specific part of a record, tagged by `"family"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum FamilyDetails {
    Kuwait(KuwaitDetails),
    Saudi(SaudiDetails),
    Jordan(JordanDetails),
    Combined(CombinedDetails),
}

impl FamilyDetails {
    pub fn ref_no(&self) -> &str {
        match self {
            FamilyDetails::Kuwait(d) => &d.ref_no,
            FamilyDetails::Saudi(d) => &d.ref_no,
            FamilyDetails::Jordan(d) => &d.ref_no,
            FamilyDetails::Combined(d) => &d.ref_no,
        }
    }

    /// Whether the skill is ticked; skills outside the family's vocabulary are not
    pub fn has_skill(&self, skill: Skill) -> bool {
        match self {
            FamilyDetails::Kuwait(d) => match skill {
                Skill::Cooking => d.skills.cooking,
                Skill::BabySitting => d.skills.baby_sitting,
                Skill::Cleaning => d.skills.cleaning,
                Skill::Washing => d.skills.washing,
                Skill::BabyCare | Skill::Ironing | Skill::Sewing => false,
            },
            FamilyDetails::Saudi(d) => match skill {
                Skill::Washing => d.skills.washing,
                Skill::Cleaning => d.skills.cleaning,
                Skill::Ironing => d.skills.ironing,
                Skill::Sewing => d.skills.sewing,
                Skill::Cooking => d.skills.cooking,
                Skill::BabyCare => d.skills.baby_care,
                Skill::BabySitting => false,
            },
            FamilyDetails::Jordan(d) => match skill {
                Skill::BabySitting => d.skills.baby_sitting,
                Skill::Cleaning => d.skills.cleaning,
                Skill::Cooking => d.skills.cooking,
                Skill::BabyCare | Skill::Washing | Skill::Ironing | Skill::Sewing => false,
            },
            FamilyDetails::Combined(d) => match skill {
                Skill::Cooking => d.skills.cooking,
                Skill::BabySitting => d.skills.baby_sitting,
                Skill::Cleaning => d.skills.cleaning,
                Skill::Washing => d.skills.washing,
                Skill::Ironing => d.skills.ironing,
                Skill::Sewing => d.skills.sewing,
                Skill::BabyCare => false,
            },
        }
    }

    pub fn family_name(&self) -> &'static str {
        match self {
            FamilyDetails::Kuwait(_) => "kuwait",
            FamilyDetails::Saudi(_) => "saudi",
            FamilyDetails::Jordan(_) => "jordan",
            FamilyDetails::Combined(_) => "combined",
        }
    }
}

/// One applicant as filled in by a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    #[serde(flatten)]
    pub core: ApplicantCore,
    pub details: FamilyDetails,
}

impl ApplicantRecord {
    pub fn new(core: ApplicantCore, details: FamilyDetails) -> Self {
        Self { core, details }
    }

    pub fn ref_no(&self) -> &str {
        self.details.ref_no()
    }

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.details.has_skill(skill)
    }

    /// Age in whole years on `reference`
    ///
    /// `None` when the date of birth is missing, unparseable or after `reference`.
    pub fn age_on(&self, reference: NaiveDate) -> Option<u32> {
        let dob = parse_iso_date(&self.core.dob)?;
        let mut years = reference.year() - dob.year();
        if (reference.month(), reference.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }

    /// Office a single-family record is naturally printed for
    pub fn default_office(&self) -> Office {
        match &self.details {
            FamilyDetails::Kuwait(_) | FamilyDetails::Combined(_) => Office::Alnoor,
            FamilyDetails::Saudi(_) => Office::Aldhahran,
            FamilyDetails::Jordan(d) => d.office.office(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record_born(dob: &str) -> ApplicantRecord {
        ApplicantRecord::new(
            ApplicantCore {
                dob: dob.to_string(),
                ..Default::default()
            },
            FamilyDetails::Kuwait(KuwaitDetails::default()),
        )
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let record = record_born("1998-03-05");
        assert_eq!(record.age_on(date(2024, 3, 4)), Some(25));
        assert_eq!(record.age_on(date(2024, 3, 5)), Some(26));
        assert_eq!(record.age_on(date(2024, 12, 31)), Some(26));
    }

    #[test]
    fn test_age_invalid() {
        assert_eq!(record_born("").age_on(date(2024, 1, 1)), None);
        assert_eq!(record_born("05/03/1998").age_on(date(2024, 1, 1)), None);
        assert_eq!(record_born("2030-01-01").age_on(date(2024, 1, 1)), None);
    }

    #[test]
    fn test_skill_outside_vocabulary() {
        let jordan = FamilyDetails::Jordan(JordanDetails {
            skills: JordanSkills {
                cooking: true,
                cleaning: true,
                baby_sitting: true,
            },
            ..Default::default()
        });
        assert!(jordan.has_skill(Skill::Cooking));
        assert!(!jordan.has_skill(Skill::Ironing));
        assert!(!jordan.has_skill(Skill::BabyCare));
    }

    #[test]
    fn test_language_level_parsing() {
        let core: ApplicantCore =
            serde_json::from_str(r#"{"englishLevel": "fluent", "arabicLevel": ""}"#).unwrap();
        assert_eq!(core.english_level, Some(LanguageLevel::Fluent));
        assert_eq!(core.arabic_level, None);

        let err = serde_json::from_str::<ApplicantCore>(r#"{"englishLevel": "GOOD"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_photo_data_url() {
        let photo = Photo::try_from("data:image/png;base64,AQID".to_string()).unwrap();
        assert_eq!(photo.bytes(), &[1, 2, 3]);

        let photo = Photo::try_from("AQID".to_string()).unwrap();
        assert_eq!(photo.bytes(), &[1, 2, 3]);
        assert_eq!(String::from(photo), "AQID");

        assert!(Photo::try_from("not base64!".to_string()).is_err());
    }

    #[test]
    fn test_family_tag() {
        let record: ApplicantRecord = serde_json::from_str(
            r#"{
                "fullName": "ABEBE KEBEDE TEST",
                "details": { "family": "jordan", "refNo": "JO-1", "office": "injaz" }
            }"#,
        )
        .unwrap();
        assert_eq!(record.core.full_name, "ABEBE KEBEDE TEST");
        assert_eq!(record.ref_no(), "JO-1");
        assert_eq!(record.default_office(), Office::Injaz);
    }

    #[test]
    fn test_combined_ref_fallback() {
        let details = CombinedDetails {
            ref_no: "TK-100".to_string(),
            ref_fahad: "TK-200".to_string(),
            ref_ewan: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(details.ref_for(Office::Fahad), "TK-200");
        assert_eq!(details.ref_for(Office::Alnoor), "TK-100");
        assert_eq!(details.ref_for(Office::Ewan), "TK-100");
    }
}
