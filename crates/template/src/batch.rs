//! Batch planning for combined records
//!
//! A combined record projects onto one concrete record per office. Rendering
//! and the pacing between documents belong to the caller.

use crate::record::{
    ApplicantRecord, CombinedDetails, FamilyDetails, JordanDetails, JordanOffice, JordanSkills,
    KuwaitDetails, KuwaitSkills, SaudiDetails, SaudiSkills,
};
use crate::schema::Office;
use crate::{Result, TemplateError};

/// Kuwait salary with prior experience
pub const KUWAIT_SALARY_EXPERIENCED: &str = "120 KD";

/// Kuwait salary without prior experience
pub const KUWAIT_SALARY_NEW: &str = "110 KD";

/// One document of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchJob {
    pub office: Office,
    pub record: ApplicantRecord,
}

/// Project a combined record onto all six offices, in [`Office::ALL`] order
pub fn plan_batch(record: &ApplicantRecord) -> Result<Vec<BatchJob>> {
    let FamilyDetails::Combined(combined) = &record.details else {
        return Err(TemplateError::NotCombined(
            record.details.family_name().to_string(),
        ));
    };

    let jobs = Office::ALL
        .into_iter()
        .map(|office| BatchJob {
            office,
            record: ApplicantRecord::new(
                record.core.clone(),
                project(combined, office, record.core.has_experience),
            ),
        })
        .collect();
    Ok(jobs)
}

fn project(d: &CombinedDetails, office: Office, has_experience: bool) -> FamilyDetails {
    let ref_no = d.ref_for(office).to_string();
    let kuwait_salary = if has_experience {
        KUWAIT_SALARY_EXPERIENCED
    } else {
        KUWAIT_SALARY_NEW
    };

    match office {
        Office::Alnoor | Office::Fahad => FamilyDetails::Kuwait(KuwaitDetails {
            ref_no,
            salary: kuwait_salary.to_string(),
            print_date: d.print_date.clone(),
            height: d.height.clone(),
            weight: d.weight.clone(),
            contact_person: d.contact_person.clone(),
            contact_phone: d.contact_phone.clone(),
            skills: KuwaitSkills {
                cooking: d.skills.cooking,
                baby_sitting: d.skills.baby_sitting,
                cleaning: d.skills.cleaning,
                washing: d.skills.washing,
            },
        }),
        Office::Aldhahran => FamilyDetails::Saudi(SaudiDetails {
            ref_no,
            education: d.education.clone(),
            applied_for: d.applied_for.clone(),
            monthly_salary: d.monthly_salary.clone(),
            contact_person: d.contact_person.clone(),
            relationship: d.relationship.clone(),
            contact_phone: d.contact_phone.clone(),
            address: d.address.clone(),
            height: d.height.clone(),
            weight: d.weight.clone(),
            skills: SaudiSkills {
                washing: d.skills.washing,
                cleaning: d.skills.cleaning,
                ironing: d.skills.ironing,
                sewing: d.skills.sewing,
                cooking: d.skills.cooking,
                // combined forms only collect baby sitting
                baby_care: false,
            },
        }),
        Office::Ewan | Office::Option | Office::Injaz => {
            let selector = match office {
                Office::Option => JordanOffice::Option,
                Office::Injaz => JordanOffice::Injaz,
                _ => JordanOffice::Ewan,
            };
            FamilyDetails::Jordan(JordanDetails {
                ref_no,
                weight: d.weight.clone(),
                height: d.height.clone(),
                education: d.education.clone(),
                office: selector,
                skills: JordanSkills {
                    baby_sitting: d.skills.baby_sitting,
                    // OPTION never lists cleaning
                    cleaning: d.skills.cleaning && office != Office::Option,
                    cooking: d.skills.cooking,
                },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ApplicantCore, CombinedSkills, Skill};
    use pretty_assertions::assert_eq;

    fn combined(has_experience: bool) -> ApplicantRecord {
        ApplicantRecord::new(
            ApplicantCore {
                full_name: "ABEBE KEBEDE TEST".to_string(),
                has_experience,
                ..Default::default()
            },
            FamilyDetails::Combined(CombinedDetails {
                ref_no: "TK-0".to_string(),
                ref_fahad: "TK-F".to_string(),
                monthly_salary: "1200 SR".to_string(),
                skills: CombinedSkills {
                    cooking: true,
                    cleaning: true,
                    baby_sitting: true,
                    ..Default::default()
                },
                ..Default::default()
            }),
        )
    }

    #[test]
    fn test_plan_order_and_families() {
        let jobs = plan_batch(&combined(false)).unwrap();
        let offices: Vec<Office> = jobs.iter().map(|j| j.office).collect();
        assert_eq!(offices, Office::ALL.to_vec());

        for job in &jobs {
            let family = job.record.details.family_name();
            assert_eq!(family, job.office.country().name());
        }
    }

    #[test]
    fn test_kuwait_salary_override() {
        for (experienced, expected) in [(true, "120 KD"), (false, "110 KD")] {
            let jobs = plan_batch(&combined(experienced)).unwrap();
            for job in jobs.iter().take(2) {
                match &job.record.details {
                    FamilyDetails::Kuwait(d) => assert_eq!(d.salary, expected),
                    other => panic!("unexpected family {}", other.family_name()),
                }
            }
        }
    }

    #[test]
    fn test_refs_and_option_cleaning() {
        let jobs = plan_batch(&combined(true)).unwrap();
        let refs: Vec<&str> = jobs.iter().map(|j| j.record.ref_no()).collect();
        assert_eq!(refs, vec!["TK-0", "TK-F", "TK-0", "TK-0", "TK-0", "TK-0"]);

        let cleaning: Vec<bool> = jobs
            .iter()
            .map(|j| j.record.has_skill(Skill::Cleaning))
            .collect();
        assert_eq!(cleaning, vec![true, true, true, true, false, true]);

        assert!(jobs[0].record.has_skill(Skill::BabySitting));
        assert!(!jobs[2].record.has_skill(Skill::BabyCare));
        assert_eq!(jobs[4].record.default_office(), Office::Option);
    }

    #[test]
    fn test_non_combined_rejected() {
        let record = ApplicantRecord::new(
            ApplicantCore::default(),
            FamilyDetails::Kuwait(Default::default()),
        );
        assert!(matches!(
            plan_batch(&record),
            Err(TemplateError::NotCombined(family)) if family == "kuwait"
        ));
    }
}
