//! Mapping from API records to what the card panel shows.

use crate::models::{Card, SetSummary};

pub const UNKNOWN_TYPE: &str = "Unknown Type";
pub const NO_ORACLE_TEXT: &str = "No text";
pub const NO_FLAVOR_TEXT: &str = "No flavor text available";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A labelled value in the stats block (Power/Toughness, Loyalty, Mana Cost)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub label: &'static str,
    pub value: String,
}

/// Fully mapped card, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub name: String,
    pub type_line: String,
    pub set_name: String,
    pub image_url: Option<String>,
    pub stats: Vec<StatRow>,
    pub oracle_text: String,
    /// Already wrapped in quotes
    pub flavor_text: String,
    /// "Illustrated by ..."
    pub artist_credit: String,
}

impl CardView {
    pub fn new(card: &Card, sets: &[SetSummary]) -> Self {
        Self {
            name: card.name.clone(),
            type_line: non_empty(&card.type_line).unwrap_or(UNKNOWN_TYPE).to_string(),
            set_name: resolve_set_name(&card.set_code, sets),
            image_url: non_empty(&card.image_url).map(str::to_string),
            stats: stat_rows(card),
            oracle_text: non_empty(&card.oracle_text)
                .unwrap_or(NO_ORACLE_TEXT)
                .to_string(),
            flavor_text: format!(
                "\"{}\"",
                non_empty(&card.flavor_text).unwrap_or(NO_FLAVOR_TEXT)
            ),
            artist_credit: format!(
                "Illustrated by {}",
                non_empty(&card.artist).unwrap_or(UNKNOWN_ARTIST)
            ),
        }
    }
}

/// Name of the set with this code, or the uppercased code if it isn't loaded
pub fn resolve_set_name(set_code: &str, sets: &[SetSummary]) -> String {
    sets.iter()
        .find(|s| s.code == set_code)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| set_code.to_uppercase())
}

/// Stat rows in display order; absent or empty fields produce no row
pub fn stat_rows(card: &Card) -> Vec<StatRow> {
    let mut rows = Vec::new();

    if let (Some(power), Some(toughness)) = (non_empty(&card.power), non_empty(&card.toughness)) {
        rows.push(StatRow {
            label: "Power/Toughness",
            value: format!("{} / {}", power, toughness),
        });
    }
    if let Some(loyalty) = non_empty(&card.loyalty) {
        rows.push(StatRow {
            label: "Loyalty",
            value: loyalty.to_string(),
        });
    }
    if let Some(cost) = non_empty(&card.mana_cost) {
        rows.push(StatRow {
            label: "Mana Cost",
            value: cost.to_string(),
        });
    }

    rows
}

/// Physical sets only, newest first. Sets released on the same day keep
/// their API order.
pub fn prepare_set_catalog(sets: Vec<SetSummary>) -> Vec<SetSummary> {
    let mut physical: Vec<SetSummary> = sets.into_iter().filter(|s| !s.digital).collect();
    physical.sort_by(|a, b| b.release_date.cmp(&a.release_date));
    physical
}

// Scryfall sends "" for some fields (e.g. mana_cost on lands)
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn set(code: &str, name: &str, date: &str, digital: bool) -> SetSummary {
        SetSummary {
            code: code.to_string(),
            name: name.to_string(),
            release_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            digital,
        }
    }

    fn bear() -> Card {
        Card {
            name: "Grizzly Bears".to_string(),
            type_line: Some("Creature — Bear".to_string()),
            set_code: "lea".to_string(),
            image_url: Some("https://example.com/bears.jpg".to_string()),
            power: Some("2".to_string()),
            toughness: Some("2".to_string()),
            mana_cost: Some("{1}{G}".to_string()),
            oracle_text: None,
            flavor_text: Some("Don't try to outrun one.".to_string()),
            artist: Some("Jeff A. Menges".to_string()),
            loyalty: None,
        }
    }

    #[test]
    fn maps_all_present_fields() {
        let sets = vec![set("lea", "Limited Edition Alpha", "1993-08-05", false)];
        let view = CardView::new(&bear(), &sets);

        assert_eq!(view.name, "Grizzly Bears");
        assert_eq!(view.type_line, "Creature — Bear");
        assert_eq!(view.set_name, "Limited Edition Alpha");
        assert_eq!(view.image_url.as_deref(), Some("https://example.com/bears.jpg"));
        assert_eq!(view.oracle_text, "No text");
        assert_eq!(view.flavor_text, "\"Don't try to outrun one.\"");
        assert_eq!(view.artist_credit, "Illustrated by Jeff A. Menges");
    }

    #[test]
    fn defaults_for_missing_fields() {
        let card = Card {
            name: "Mystery".to_string(),
            set_code: "xyz".to_string(),
            ..Default::default()
        };
        let view = CardView::new(&card, &[]);

        assert_eq!(view.type_line, UNKNOWN_TYPE);
        assert_eq!(view.oracle_text, NO_ORACLE_TEXT);
        assert_eq!(view.flavor_text, "\"No flavor text available\"");
        assert_eq!(view.artist_credit, "Illustrated by Unknown Artist");
        assert!(view.image_url.is_none());
        assert!(view.stats.is_empty());
    }

    #[test]
    fn unknown_set_code_falls_back_to_uppercase() {
        let sets = vec![set("m21", "Core Set 2021", "2020-07-03", false)];
        assert_eq!(resolve_set_name("plist", &sets), "PLIST");
        assert_eq!(resolve_set_name("m21", &sets), "Core Set 2021");
    }

    #[test]
    fn power_toughness_row_needs_both_values() {
        let mut card = bear();
        card.mana_cost = None;
        let rows = stat_rows(&card);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Power/Toughness");
        assert_eq!(rows[0].value, "2 / 2");

        card.toughness = None;
        assert!(stat_rows(&card).is_empty());
    }

    #[test]
    fn stat_rows_keep_display_order() {
        let card = Card {
            name: "Odd Walker".to_string(),
            power: Some("*".to_string()),
            toughness: Some("1+*".to_string()),
            loyalty: Some("3".to_string()),
            mana_cost: Some("{2}{U}{U}".to_string()),
            ..Default::default()
        };
        let labels: Vec<&str> = stat_rows(&card).iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Power/Toughness", "Loyalty", "Mana Cost"]);
    }

    #[test]
    fn empty_mana_cost_is_omitted() {
        let card = Card {
            name: "Forest".to_string(),
            type_line: Some("Basic Land — Forest".to_string()),
            mana_cost: Some(String::new()),
            ..Default::default()
        };
        assert!(stat_rows(&card).is_empty());
    }

    #[test]
    fn catalog_drops_digital_and_sorts_newest_first() {
        let sets = vec![
            set("lea", "Alpha", "1993-08-05", false),
            set("ana", "Arena Starter", "2018-07-14", true),
            set("m21", "Core Set 2021", "2020-07-03", false),
            set("neo", "Kamigawa: Neon Dynasty", "2022-02-18", false),
        ];
        let codes: Vec<String> = prepare_set_catalog(sets)
            .into_iter()
            .map(|s| s.code)
            .collect();
        assert_eq!(codes, vec!["neo", "m21", "lea"]);
    }

    #[test]
    fn catalog_keeps_api_order_for_equal_dates() {
        let sets = vec![
            set("mh2", "Modern Horizons 2", "2021-06-18", false),
            set("h1r", "Modern Horizons 1 Timeshifts", "2021-06-18", false),
        ];
        let codes: Vec<String> = prepare_set_catalog(sets)
            .into_iter()
            .map(|s| s.code)
            .collect();
        assert_eq!(codes, vec!["mh2", "h1r"]);
    }
}
