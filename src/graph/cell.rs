use crate::consts::MAX_NEIGHBORS;
use crate::core_types::CellId;
use serde::{Deserialize, Serialize};

/// One physical cell as stored in the pack description.
///
/// Neighbor slots are keyed "0".."5" in JSON; an absent key means the
/// cell has no neighbor in that direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub n: CellId,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,

    #[serde(rename = "0", default, skip_serializing_if = "Option::is_none")]
    pub slot0: Option<CellId>,
    #[serde(rename = "1", default, skip_serializing_if = "Option::is_none")]
    pub slot1: Option<CellId>,
    #[serde(rename = "2", default, skip_serializing_if = "Option::is_none")]
    pub slot2: Option<CellId>,
    #[serde(rename = "3", default, skip_serializing_if = "Option::is_none")]
    pub slot3: Option<CellId>,
    #[serde(rename = "4", default, skip_serializing_if = "Option::is_none")]
    pub slot4: Option<CellId>,
    #[serde(rename = "5", default, skip_serializing_if = "Option::is_none")]
    pub slot5: Option<CellId>,
}

impl CellRecord {
    pub fn new(n: CellId, x: f64, y: f64) -> Self {
        Self {
            n,
            x,
            y,
            slot0: None,
            slot1: None,
            slot2: None,
            slot3: None,
            slot4: None,
            slot5: None,
        }
    }

    /// Sets neighbor slot `slot` (0..=5). Out-of-range slots are ignored.
    pub fn with_neighbor(mut self, slot: usize, neighbor: CellId) -> Self {
        match slot {
            0 => self.slot0 = Some(neighbor),
            1 => self.slot1 = Some(neighbor),
            2 => self.slot2 = Some(neighbor),
            3 => self.slot3 = Some(neighbor),
            4 => self.slot4 = Some(neighbor),
            5 => self.slot5 = Some(neighbor),
            _ => {}
        }
        self
    }

    pub fn slots(&self) -> [Option<CellId>; MAX_NEIGHBORS] {
        [
            self.slot0, self.slot1, self.slot2, self.slot3, self.slot4, self.slot5,
        ]
    }

    pub fn populated_slots(&self) -> usize {
        self.slots().iter().filter(|s| s.is_some()).count()
    }

    /// Fewer than six populated slots: the cell sits on the pack boundary.
    pub fn is_edge(&self) -> bool {
        self.populated_slots() < MAX_NEIGHBORS
    }
}
