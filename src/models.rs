use chrono::NaiveDate;

/// A card set as shown in the set selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSummary {
    pub code: String,
    pub name: String,
    pub release_date: NaiveDate,
    pub digital: bool,
}

impl SetSummary {
    /// Selector label, e.g. "Alpha (1993)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.release_date.format("%Y"))
    }
}

/// A card returned by one of the queries, reduced to the fields we display
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Card {
    pub name: String,
    pub type_line: Option<String>,
    pub set_code: String,
    /// Normal-size image, from the card itself or its front face
    pub image_url: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub loyalty: Option<String>,
    pub mana_cost: Option<String>,
    pub oracle_text: Option<String>,
    pub flavor_text: Option<String>,
    pub artist: Option<String>,
}

/// Result of a name search
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResults {
    pub total_cards: u32,
    pub cards: Vec<Card>,
}

impl SearchResults {
    pub fn empty() -> Self {
        Self::default()
    }

    /// First result in API order, if there is one
    pub fn first(&self) -> Option<&Card> {
        if self.total_cards == 0 {
            return None;
        }
        self.cards.first()
    }
}

/// One entry in the set selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOption {
    pub code: String,
    pub label: String,
}

impl From<&SetSummary> for SetOption {
    fn from(set: &SetSummary) -> Self {
        Self {
            code: set.code.clone(),
            label: set.label(),
        }
    }
}
