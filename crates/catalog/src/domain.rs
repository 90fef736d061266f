use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActivityId(pub u32);

/// Number of leading catalog positions covered by the "basic" preset.
/// Preset membership is positional: reordering the catalog changes which
/// activities the presets select.
pub const BASIC_SPLIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Basic,
    Advanced,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Basic => "Basic",
            Tier::Advanced => "Advanced",
        }
    }
}

pub fn tier_for_position(position: usize) -> Tier {
    if position < BASIC_SPLIT {
        Tier::Basic
    } else {
        Tier::Advanced
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub id: ActivityId,
    pub title: String,
    pub summary: String,
}

const BUILTIN: &[(u32, &str, &str)] = &[
    (1, "Open HTML Files", "Open and read HTML files, measure loading times"),
    (2, "Clean HTML", "Remove HTML tags and extract clean text"),
    (3, "Process Words", "Extract and sort words from cleaned text"),
    (4, "Consolidate Words", "Create consolidated sorted word list"),
    (5, "Tokenize", "Tokenize text files for indexing"),
    (6, "Build Dictionary", "Create dictionary with document frequency"),
    (7, "Dictionary & Posting", "Generate dictionary and posting lists"),
    (8, "Hash Table Dictionary", "Build hash table-based dictionary"),
    (9, "Refine Dictionary", "Remove stop words and filter tokens"),
    (10, "Weight Tokens", "Calculate TF.IDF weights for tokens"),
    (11, "Document Index", "Create document index with unique IDs"),
    (12, "Search Dictionary", "Search for words in dictionary and posting files"),
];

/// The activities the indexer web application exposes, in catalog order.
pub fn builtin_activities() -> Vec<ActivitySummary> {
    BUILTIN
        .iter()
        .map(|(id, title, summary)| ActivitySummary {
            id: ActivityId(*id),
            title: (*title).to_string(),
            summary: (*summary).to_string(),
        })
        .collect()
}
