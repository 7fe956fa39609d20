use serde::{Deserialize, Serialize};

fn default_foot() -> String {
    "Right".to_string()
}

/// A player record from the catalog with the attributes the game can reveal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    /// Unique ID from the catalog
    #[serde(default)]
    pub id: String,

    /// First name
    #[serde(default)]
    pub first_name: String,

    /// Last name
    #[serde(default)]
    pub last_name: String,

    /// Common/nickname ("Neymar Jr"), preferred for display when present
    #[serde(default)]
    pub common_name: Option<String>,

    /// Playing position ("ST", "GK", ...)
    #[serde(default)]
    pub position: String,

    /// Nationality
    #[serde(default)]
    pub nationality: String,

    /// Current club
    #[serde(default)]
    pub club: String,

    /// Overall rating (0-100)
    #[serde(default)]
    pub overall: u8,

    /// Preferred foot
    #[serde(default = "default_foot")]
    pub preferred_foot: String,

    /// Portrait URL (opaque to the engine, used by the presentation layer)
    #[serde(default)]
    pub image_url: String,
}

impl Player {
    /// Create a new Player with required fields
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            common_name: None,
            position: String::new(),
            nationality: String::new(),
            club: String::new(),
            overall: 0,
            preferred_foot: default_foot(),
            image_url: String::new(),
        }
    }

    /// Name guesses are evaluated against: the common name when the catalog
    /// has one, "first last" otherwise
    pub fn display_name(&self) -> String {
        match &self.common_name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new("0", "Unknown", "Player")
    }
}
