//! Table layout shared by the listing commands.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Row, Table};

/// Table width when stdout is not a terminal
pub const FALLBACK_WIDTH: u16 = 160;

/// Widest a name or custom value cell may grow, in characters
pub const NAME_WIDTH: usize = 32;

/// A listing table with its header row set, fitted to the terminal width.
pub fn listing_table<H: Into<Row>>(header: H) -> Table {
    let width = crossterm::terminal::size().map_or(FALLBACK_WIDTH, |(w, _)| w);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width)
        .set_header(header);
    table
}

/// Text for one listing cell: `-` for an empty value, otherwise at most
/// `max` characters, cut values ending in `...`.
pub fn cell_text(value: &str, max: usize) -> String {
    if value.is_empty() {
        return "-".to_string();
    }
    if value.char_indices().nth(max).is_none() {
        return value.to_string();
    }
    let end = value
        .char_indices()
        .nth(max.saturating_sub(3))
        .map_or(value.len(), |(at, _)| at);
    format!("{}...", &value[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_empty_is_dash() {
        assert_eq!(cell_text("", NAME_WIDTH), "-");
    }

    #[test]
    fn test_cell_text_fits() {
        assert_eq!(cell_text("Lot", 10), "Lot");
        assert_eq!(cell_text("Street", 6), "Street");
    }

    #[test]
    fn test_cell_text_cut() {
        assert_eq!(
            cell_text("Sample text 1 for architect_notes", 14),
            "Sample text..."
        );
    }

    #[test]
    fn test_cell_text_multibyte() {
        assert_eq!(cell_text("Café Müller Haus", 7), "Café...");
    }

    #[test]
    fn test_listing_table_has_header() {
        let table = listing_table(vec!["ID", "Name"]);
        assert_eq!(table.header().map(|row| row.cell_count()), Some(2));
    }
}
