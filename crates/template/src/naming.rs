//! Output file names

use crate::record::ApplicantRecord;
use crate::schema::Office;

fn sanitize(value: &str, replacement: char) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { replacement })
        .collect()
}

/// `TK-{ref}_{name}_{OFFICE}.pdf`
///
/// Non-alphanumerics become `-` in the reference and `_` in the name. A blank
/// reference is written as `REF`.
pub fn output_file_name(record: &ApplicantRecord, office: Office) -> String {
    let ref_no = record.ref_no();
    let safe_ref = if ref_no.is_empty() {
        "REF".to_string()
    } else {
        sanitize(ref_no, '-')
    };
    let safe_name = sanitize(&record.core.full_name, '_');
    format!("TK-{safe_ref}_{safe_name}_{}.pdf", office.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ApplicantCore, FamilyDetails, SaudiDetails};
    use pretty_assertions::assert_eq;

    fn record(ref_no: &str, name: &str) -> ApplicantRecord {
        ApplicantRecord::new(
            ApplicantCore {
                full_name: name.to_string(),
                ..Default::default()
            },
            FamilyDetails::Saudi(SaudiDetails {
                ref_no: ref_no.to_string(),
                ..Default::default()
            }),
        )
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            output_file_name(&record("TK/2024 07", "ABEBE KEBEDE"), Office::Aldhahran),
            "TK-TK-2024-07_ABEBE_KEBEDE_ALDHAHRAN.pdf"
        );
    }

    #[test]
    fn test_blank_ref() {
        assert_eq!(
            output_file_name(&record("", "Ã.B"), Office::Injaz),
            "TK-REF___B_INJAZ.pdf"
        );
    }
}
