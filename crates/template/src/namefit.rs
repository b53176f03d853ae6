//! Full-name overflow adjustment

use crate::schema::{Field, LayoutTable, NameFit, Rgb, TextFont, DEFAULT_FONT_SIZE};

/// Return a copy of `layout` with the full-name placement fitted to `full_name`
///
/// The input table is never modified. Once a rule has been applied it is
/// removed from the copy, so adjusting the result again changes nothing.
pub fn adjust_full_name(layout: &LayoutTable, full_name: &str) -> LayoutTable {
    let mut adjusted = layout.clone();

    let Some(rule) = adjusted.name_fit.clone() else {
        return adjusted;
    };
    if full_name.is_empty() {
        return adjusted;
    }

    let chars = full_name.chars().count();
    if chars < rule.min_chars() {
        return adjusted;
    }

    let Some(placement) = adjusted.text_mut(Field::FullName) else {
        return adjusted;
    };

    match rule {
        NameFit::Shrink {
            size_step, x_shift, ..
        } => {
            placement.size = Some(placement.size.unwrap_or(DEFAULT_FONT_SIZE) - size_step);
            placement.x -= x_shift;
        }
        NameFit::Replace { x, y, size, .. } => {
            placement.x = x;
            placement.y = y;
            placement.size = Some(size);
            placement.font = Some(TextFont::Helvetica);
            placement.color.get_or_insert(Rgb::BLACK);
        }
    }

    log::debug!(
        "{}: fitted {chars}-character name to x={} size={:?}",
        layout.office,
        placement.x,
        placement.size
    );
    adjusted.name_fit = None;
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LayoutRegistry;
    use crate::schema::{Office, TextPlacement};
    use pretty_assertions::assert_eq;

    fn name_of(len: usize) -> String {
        "A".repeat(len)
    }

    fn full_name(layout: &LayoutTable) -> TextPlacement {
        layout.text(Field::FullName).cloned().unwrap()
    }

    #[test]
    fn test_shrink_boundary() {
        let registry = LayoutRegistry::builtin().unwrap();
        let alnoor = registry.get(Office::Alnoor);

        let short = adjust_full_name(alnoor, &name_of(23));
        assert_eq!(full_name(&short), full_name(alnoor));

        let long = adjust_full_name(alnoor, &name_of(24));
        let placement = full_name(&long);
        assert_eq!(placement.x, 59.0);
        assert_eq!(placement.size, Some(16.0));
        assert_eq!(placement.y, 91.5);
    }

    #[test]
    fn test_replace_boundary() {
        let registry = LayoutRegistry::builtin().unwrap();
        let saudi = registry.get(Office::Aldhahran);

        let short = adjust_full_name(saudi, &name_of(18));
        assert_eq!(full_name(&short), TextPlacement::at(43.0, 55.0));

        let long = adjust_full_name(saudi, &name_of(19));
        assert_eq!(
            full_name(&long),
            TextPlacement {
                x: 35.0,
                y: 55.0,
                size: Some(9.0),
                color: Some(Rgb::BLACK),
                font: Some(TextFont::Helvetica),
            }
        );
    }

    #[test]
    fn test_office_without_rule_is_untouched() {
        let registry = LayoutRegistry::builtin().unwrap();
        let fahad = registry.get(Office::Fahad);
        assert_eq!(&adjust_full_name(fahad, &name_of(40)), fahad);
    }

    #[test]
    fn test_input_not_mutated_and_idempotent() {
        let registry = LayoutRegistry::builtin().unwrap();
        let ewan = registry.get(Office::Ewan);
        let before = ewan.clone();

        let once = adjust_full_name(ewan, &name_of(30));
        let twice = adjust_full_name(&once, &name_of(30));
        assert_eq!(once, twice);
        assert_eq!(ewan, &before);

        let short = adjust_full_name(ewan, "SHORT NAME");
        assert_eq!(full_name(&short), full_name(&before));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let registry = LayoutRegistry::builtin().unwrap();
        let alnoor = registry.get(Office::Alnoor);
        let name = "É".repeat(23);
        assert_eq!(name.len(), 46);
        assert_eq!(full_name(&adjust_full_name(alnoor, &name)), full_name(alnoor));
    }
}
