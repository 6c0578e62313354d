use std::fmt;

/// Bitfield of the two independent generation toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MaskSetting {
    mask: u32,
}

impl MaskSetting {
    /// Convert land unreachable from the border into water after generation
    pub const REMOVE_ISOLATED_LAND: u32 = 1;
    /// Bound diffusion by Euclidean distance instead of step count
    pub const PROLIFEWAY_CIRCLE: u32 = 2;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bits(bits: u32) -> Self {
        MaskSetting {
            mask: bits & (Self::REMOVE_ISOLATED_LAND | Self::PROLIFEWAY_CIRCLE),
        }
    }

    pub fn bits(&self) -> u32 {
        self.mask
    }

    fn toggle(mut self, bit: u32, on: bool) -> Self {
        if on {
            self.mask |= bit;
        } else {
            self.mask &= !bit;
        }
        self
    }

    pub fn remove_isolated_land(self, on: bool) -> Self {
        self.toggle(Self::REMOVE_ISOLATED_LAND, on)
    }

    pub fn prolifeway_circle(self, on: bool) -> Self {
        self.toggle(Self::PROLIFEWAY_CIRCLE, on)
    }

    pub fn removes_isolated_land(&self) -> bool {
        self.mask & Self::REMOVE_ISOLATED_LAND != 0
    }

    pub fn is_circular(&self) -> bool {
        self.mask & Self::PROLIFEWAY_CIRCLE != 0
    }
}

impl fmt::Display for MaskSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08b}", self.mask)
    }
}
