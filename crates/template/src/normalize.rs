//! Record normalization
//!
//! Turns a record of any family into the text of every field, in draw order,
//! for one resolved layout.

use crate::format::{format_numeric_date, long_date_text, parse_iso_date};
use crate::record::{ApplicantRecord, FamilyDetails, Photo};
use crate::schema::{Field, LayoutTable, Office};
use chrono::NaiveDate;

pub const CONTRACT_PERIOD: &str = "2 YEARS";
pub const AGENT_NAME: &str = "TK-AGENT";
pub const APPLIED_FOR: &str = "HOUSEMAID";
pub const NATIONALITY: &str = "ETHIOPIAN";

/// Text of one field, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct FieldText {
    pub field: Field,
    pub text: String,
}

/// Everything the renderer draws from a record, family differences resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord<'a> {
    /// Page-one text in draw order, empty values already dropped
    pub texts: Vec<FieldText>,
    pub face: Option<&'a Photo>,
    pub full: Option<&'a Photo>,
    pub passport: Option<&'a Photo>,
}

impl NormalizedRecord<'_> {
    pub fn text(&self, field: Field) -> Option<&str> {
        self.texts
            .iter()
            .find(|t| t.field == field)
            .map(|t| t.text.as_str())
    }
}

/// Salary as printed by an office
///
/// FAHAD's form prints the currency itself, so the first ` KD` is removed.
pub fn salary_text(details: &FamilyDetails, office: Office) -> String {
    match details {
        FamilyDetails::Kuwait(d) if office == Office::Fahad => strip_kd(&d.salary),
        FamilyDetails::Kuwait(d) => d.salary.clone(),
        FamilyDetails::Saudi(d) => d.monthly_salary.clone(),
        FamilyDetails::Combined(d) => d.monthly_salary.clone(),
        FamilyDetails::Jordan(_) => String::new(),
    }
}

fn strip_kd(salary: &str) -> String {
    let lower = salary.to_ascii_lowercase();
    match lower.find(" kd") {
        Some(at) => format!("{}{}", &salary[..at], &salary[at + 3..])
            .trim()
            .to_string(),
        None => salary.trim().to_string(),
    }
}

fn print_date_text(details: &FamilyDetails, reference: NaiveDate) -> Option<String> {
    let raw = match details {
        FamilyDetails::Kuwait(d) => &d.print_date,
        FamilyDetails::Combined(d) => &d.print_date,
        FamilyDetails::Saudi(_) | FamilyDetails::Jordan(_) => return None,
    };
    let date = if raw.trim().is_empty() {
        Some(reference)
    } else {
        parse_iso_date(raw)
    };
    date.map(format_numeric_date)
}

struct Measures<'a> {
    weight: &'a str,
    height: &'a str,
    education: Option<&'a str>,
}

fn measures(details: &FamilyDetails) -> Measures<'_> {
    match details {
        FamilyDetails::Kuwait(d) => Measures {
            weight: &d.weight,
            height: &d.height,
            education: None,
        },
        FamilyDetails::Saudi(d) => Measures {
            weight: &d.weight,
            height: &d.height,
            education: Some(d.education.as_str()),
        },
        FamilyDetails::Jordan(d) => Measures {
            weight: &d.weight,
            height: &d.height,
            education: Some(d.education.as_str()),
        },
        FamilyDetails::Combined(d) => Measures {
            weight: &d.weight,
            height: &d.height,
            education: Some(d.education.as_str()),
        },
    }
}

/// (person, phone, relationship, address); Jordan forms have no contact block
fn contact(details: &FamilyDetails) -> Option<(&str, &str, Option<&str>, Option<&str>)> {
    match details {
        FamilyDetails::Kuwait(d) => Some((
            d.contact_person.as_str(),
            d.contact_phone.as_str(),
            None,
            None,
        )),
        FamilyDetails::Saudi(d) => Some((
            d.contact_person.as_str(),
            d.contact_phone.as_str(),
            Some(d.relationship.as_str()),
            Some(d.address.as_str()),
        )),
        FamilyDetails::Combined(d) => Some((
            d.contact_person.as_str(),
            d.contact_phone.as_str(),
            Some(d.relationship.as_str()),
            Some(d.address.as_str()),
        )),
        FamilyDetails::Jordan(_) => None,
    }
}

/// Normalize `record` for `layout`, deriving age and default dates from `reference`
pub fn normalize<'a>(
    record: &'a ApplicantRecord,
    layout: &LayoutTable,
    reference: NaiveDate,
) -> NormalizedRecord<'a> {
    let core = &record.core;
    let details = &record.details;
    let mut texts = Vec::new();
    let mut push = |field: Field, text: String| {
        if !text.is_empty() {
            texts.push(FieldText { field, text });
        }
    };

    // Header
    push(Field::RefNo, details.ref_no().to_string());
    push(Field::Salary, salary_text(details, layout.office));
    push(Field::ContractPeriod, CONTRACT_PERIOD.to_string());
    push(Field::AgentName, AGENT_NAME.to_string());
    push(Field::AppliedFor, APPLIED_FOR.to_string());
    if let Some(date) = print_date_text(details, reference) {
        push(Field::PrintDate, date);
    }

    // Personal
    push(Field::FullName, core.full_name.clone());
    push(Field::Religion, core.religion.clone());
    push(Field::Dob, long_date_text(&core.dob));
    push(
        Field::Age,
        record
            .age_on(reference)
            .map(|age| age.to_string())
            .unwrap_or_default(),
    );
    push(Field::Pob, core.pob.clone());
    push(Field::MaritalStatus, core.marital_status.clone());
    push(Field::Children, core.children.clone());
    let m = measures(details);
    push(Field::Weight, m.weight.to_string());
    push(Field::Height, m.height.to_string());
    if let Some(education) = m.education {
        push(Field::Education, education.to_string());
    }
    push(Field::Nationality, NATIONALITY.to_string());

    // Passport
    push(Field::PassportNumber, core.passport_number.clone());
    push(Field::IssueDate, long_date_text(&core.issue_date));
    push(Field::PlaceOfIssue, core.place_of_issue.clone());
    push(Field::ExpiryDate, long_date_text(&core.expiry_date));

    // Employment
    if core.has_experience {
        push(Field::ExpCountry, core.exp_country.clone());
        push(Field::ExpPeriod, core.exp_period.clone());
        push(Field::ExpPosition, core.exp_position.clone());

        if !core.exp_country2.is_empty() {
            push(Field::ExpCountry2, core.exp_country2.clone());
            push(Field::ExpPeriod2, core.exp_period2.clone());
            push(Field::ExpPosition2, core.exp_position2.clone());
        }
    }

    // Contact, only where the office prints it
    if layout.is_visible(Field::ContactName) {
        if let Some((person, phone, relationship, address)) = contact(details) {
            push(Field::ContactName, person.to_string());
            push(Field::ContactPhone, phone.to_string());
            if let Some(relationship) = relationship {
                push(Field::ContactRelationship, relationship.to_string());
            }
            if let Some(address) = address {
                push(Field::ContactAddress, address.to_string());
            }
        }
    }

    NormalizedRecord {
        texts,
        face: core.photos.face.as_ref(),
        full: core.photos.full.as_ref(),
        passport: core.photos.passport.as_ref(),
    }
}
