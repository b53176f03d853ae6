//! Country/office selection

use crate::schema::{Country, Office};

/// How an office was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// The requested office exists in the requested country
    Exact,
    /// Known country, unknown office: the country's primary office
    UnknownOffice,
    /// Unknown country: Kuwait's primary office
    UnknownCountry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub office: Office,
    pub matched: Match,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        self.matched != Match::Exact
    }
}

/// Pick the office for free-text selectors
///
/// Matching is case-insensitive. An office outside the requested country
/// counts as unknown. Fallbacks are logged but never fail.
pub fn resolve_office(country: &str, office: &str) -> Resolution {
    let Ok(country_id) = country.parse::<Country>() else {
        log::warn!("unknown country '{country}', using {}", Office::Alnoor);
        return Resolution {
            office: Office::Alnoor,
            matched: Match::UnknownCountry,
        };
    };

    match office.parse::<Office>() {
        Ok(found) if found.country() == country_id => Resolution {
            office: found,
            matched: Match::Exact,
        },
        _ => {
            let primary = country_id.primary_office();
            log::warn!("unknown office '{office}' for {country_id}, using {primary}");
            Resolution {
                office: primary,
                matched: Match::UnknownOffice,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_matches() {
        let cases = [
            ("kuwait", "ALNOOR", Office::Alnoor),
            ("kuwait", "fahad", Office::Fahad),
            ("saudi", "Aldhahran", Office::Aldhahran),
            ("jordan", "ewan", Office::Ewan),
            ("jordan", "OPTION", Office::Option),
            (" JORDAN ", " injaz ", Office::Injaz),
        ];
        for (country, office, expected) in cases {
            let resolution = resolve_office(country, office);
            assert_eq!(resolution.office, expected);
            assert!(!resolution.is_fallback());
        }
    }

    #[test]
    fn test_unknown_office_uses_primary() {
        assert_eq!(
            resolve_office("kuwait", "MYSTERY"),
            Resolution {
                office: Office::Alnoor,
                matched: Match::UnknownOffice
            }
        );
        assert_eq!(resolve_office("saudi", "").office, Office::Aldhahran);
        assert_eq!(resolve_office("jordan", "nowhere").office, Office::Ewan);
    }

    #[test]
    fn test_office_from_other_country() {
        let resolution = resolve_office("jordan", "FAHAD");
        assert_eq!(resolution.office, Office::Ewan);
        assert_eq!(resolution.matched, Match::UnknownOffice);
    }

    #[test]
    fn test_unknown_country() {
        let resolution = resolve_office("qatar", "INJAZ");
        assert_eq!(resolution.office, Office::Alnoor);
        assert_eq!(resolution.matched, Match::UnknownCountry);
    }
}
