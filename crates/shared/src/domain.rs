use serde::{Deserialize, Serialize};

/// Zero-based position of a record within the console's stored roster.
/// Shown 1-based to the operator via [`SlotIndex::display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotIndex(pub u8);

impl SlotIndex {
    pub fn display(self) -> u16 {
        u16::from(self.0) + 1
    }
}

/// Capacity of the device's record storage.
pub const MAX_ROSTER_SLOTS: usize = 6;
