use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical photo position on a progress entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPosition {
    Front,
    Back,
    Side,
}

impl SlotPosition {
    pub const ALL: [SlotPosition; 3] =
        [SlotPosition::Front, SlotPosition::Back, SlotPosition::Side];

    pub fn as_str(&self) -> &str {
        match self {
            SlotPosition::Front => "front",
            SlotPosition::Back => "back",
            SlotPosition::Side => "side",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "front" => Some(SlotPosition::Front),
            "back" => Some(SlotPosition::Back),
            "side" => Some(SlotPosition::Side),
            _ => None,
        }
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
