//! Registry of the built-in layout tables

use crate::parser::parse_layout;
use crate::resolve::{resolve_office, Resolution};
use crate::schema::{LayoutTable, Office};
use crate::{Result, TemplateError};

/// Layout JSON compiled into the binary, in [`Office::ALL`] order
const BUILTIN_LAYOUTS: [(Office, &str); 6] = [
    (
        Office::Alnoor,
        include_str!("../data/layouts/kuwait_alnoor.json"),
    ),
    (
        Office::Fahad,
        include_str!("../data/layouts/kuwait_fahad.json"),
    ),
    (
        Office::Aldhahran,
        include_str!("../data/layouts/saudi_aldhahran.json"),
    ),
    (Office::Ewan, include_str!("../data/layouts/jordan_ewan.json")),
    (
        Office::Option,
        include_str!("../data/layouts/jordan_option.json"),
    ),
    (
        Office::Injaz,
        include_str!("../data/layouts/jordan_injaz.json"),
    ),
];

/// One immutable table per office
///
/// Build it once and share it (e.g. behind an `Arc`); renders work on clones
/// of the tables they use.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    /// Indexed by [`Office::index`]
    tables: Vec<LayoutTable>,
}

impl LayoutRegistry {
    /// Parse the layouts shipped with the crate
    pub fn builtin() -> Result<Self> {
        let tables = BUILTIN_LAYOUTS
            .iter()
            .map(|(office, json)| {
                parse_layout(json).map_err(|e| {
                    TemplateError::InvalidRegistry(format!("layout {office}: {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_tables(tables)
    }

    /// Build a registry from exactly one table per office
    pub fn from_tables(tables: impl IntoIterator<Item = LayoutTable>) -> Result<Self> {
        let mut slots: Vec<Option<LayoutTable>> = vec![None; Office::ALL.len()];

        for table in tables {
            if table.office.country() != table.country {
                return Err(TemplateError::InvalidRegistry(format!(
                    "office {} does not belong to {}",
                    table.office, table.country
                )));
            }
            let slot = &mut slots[table.office.index()];
            if slot.is_some() {
                return Err(TemplateError::InvalidRegistry(format!(
                    "duplicate layout for {}",
                    table.office
                )));
            }
            *slot = Some(table);
        }

        let mut complete = Vec::with_capacity(slots.len());
        for (office, slot) in Office::ALL.into_iter().zip(slots) {
            match slot {
                Some(table) => complete.push(table),
                None => {
                    return Err(TemplateError::InvalidRegistry(format!(
                        "missing layout for {office}"
                    )))
                }
            }
        }

        log::debug!("layout registry ready with {} tables", complete.len());
        Ok(Self { tables: complete })
    }

    /// Table of an office
    pub fn get(&self, office: Office) -> &LayoutTable {
        &self.tables[office.index()]
    }

    /// Table for free-text country and office selectors
    ///
    /// Never fails: unknown input falls back as [`resolve_office`] describes.
    pub fn resolve(&self, country: &str, office: &str) -> &LayoutTable {
        self.get(resolve_office(country, office).office)
    }

    /// Like [`resolve`](Self::resolve), also reporting whether a fallback was taken
    pub fn resolve_with_details(&self, country: &str, office: &str) -> (Resolution, &LayoutTable) {
        let resolution = resolve_office(country, office);
        (resolution, self.get(resolution.office))
    }

    pub fn tables(&self) -> impl Iterator<Item = &LayoutTable> {
        self.tables.iter()
    }
}
