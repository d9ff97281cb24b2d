//! Contains the performance-level patch state

use serde::{Deserialize, Serialize};

use crate::voice::{Part, PartParam};
use crate::NUM_PARTS;

/// The number of performance locations on the DarkStar
pub const NUM_LOCATIONS: u8 = 64;

/// The hardware generation a message is laid out for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Generation {
    /// The original DarkStar
    #[default]
    Base,
    /// The DarkStar XP2, which adds FX sends and a chorus
    Xp2,
}

impl Generation {
    /// Convert from the persisted XP2 preference
    pub const fn from_xp2(xp2: bool) -> Self {
        if xp2 {
            Self::Xp2
        } else {
            Self::Base
        }
    }
    /// True for [Generation::Xp2]
    pub const fn is_xp2(&self) -> bool {
        matches!(self, Self::Xp2)
    }
    /// The display name of the generation
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::Base => "DarkStar",
            Self::Xp2 => "DarkStar XP2",
        }
    }
}

/// Performance-wide parameters
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlobalParam {
    /// The performance location, 0-63
    Number,
    /// The part currently selected for editing on the panel, 0-4
    EditPart,
    /// Chorus depth, 0-15 (XP2 only)
    ChorusDepth,
    /// Chorus rate, 0-15 (XP2 only)
    ChorusRate,
}

impl GlobalParam {
    /// An array containing all possible `GlobalParam` values, in order
    pub const ELEM: [GlobalParam; 4] = [
        Self::Number,
        Self::EditPart,
        Self::ChorusDepth,
        Self::ChorusRate,
    ];
    /// Short identifier for this parameter
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::EditPart => "currenteditpart",
            Self::ChorusDepth => "chorusdepth",
            Self::ChorusRate => "chorusrate",
        }
    }
    /// Human readable name
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Number => "Patch Number",
            Self::EditPart => "Current Edit Part",
            Self::ChorusDepth => "Chorus Depth",
            Self::ChorusRate => "Chorus Rate",
        }
    }
    /// Largest valid value
    pub const fn max(&self) -> u8 {
        match self {
            Self::Number => NUM_LOCATIONS - 1,
            Self::EditPart => NUM_PARTS as u8 - 1,
            Self::ChorusDepth => 15,
            Self::ChorusRate => 15,
        }
    }
    /// True for parameters that only exist on the XP2
    pub const fn is_xp2_only(&self) -> bool {
        matches!(self, Self::ChorusDepth | Self::ChorusRate)
    }
}

impl TryFrom<&str> for GlobalParam {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ELEM
            .iter()
            .find(|elem| value == elem.key())
            .copied()
            .ok_or("GlobalParam::try_from::<&str> parse failure")
    }
}

/// A reference to any single value in a [Patch]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamRef {
    /// A performance-wide parameter
    Global(GlobalParam),
    /// A parameter of the part with the given index (0-4)
    Part(usize, PartParam),
}

impl ParamRef {
    /// True if this value only exists on the XP2
    pub fn is_xp2_only(&self) -> bool {
        match self {
            Self::Global(global) => global.is_xp2_only(),
            Self::Part(_, param) => param.is_xp2_only(),
        }
    }
}

/// A full performance: five parts plus the shared globals
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Patch {
    /// Performance location, 0-63
    pub number: u8,
    /// The part selected for editing, 0-4
    pub edit_part: u8,
    /// Chorus depth, 0-15 (XP2 only)
    pub chorus_depth: u8,
    /// Chorus rate, 0-15 (XP2 only)
    pub chorus_rate: u8,
    /// The five parts
    pub parts: [Part; NUM_PARTS],
}

impl Default for Patch {
    fn default() -> Self {
        Self {
            number: 0,
            edit_part: 0,
            chorus_depth: 0,
            chorus_rate: 0,
            parts: core::array::from_fn(|_| Part::init()),
        }
    }
}

impl Patch {
    /// Get the value of a global parameter
    pub fn global(&self, param: GlobalParam) -> u8 {
        match param {
            GlobalParam::Number => self.number,
            GlobalParam::EditPart => self.edit_part,
            GlobalParam::ChorusDepth => self.chorus_depth,
            GlobalParam::ChorusRate => self.chorus_rate,
        }
    }
    fn global_mut(&mut self, param: GlobalParam) -> &mut u8 {
        match param {
            GlobalParam::Number => &mut self.number,
            GlobalParam::EditPart => &mut self.edit_part,
            GlobalParam::ChorusDepth => &mut self.chorus_depth,
            GlobalParam::ChorusRate => &mut self.chorus_rate,
        }
    }
    /// Get any value of the patch, or `None` if the part index is invalid
    pub fn get(&self, param: ParamRef) -> Option<u8> {
        match param {
            ParamRef::Global(global) => Some(self.global(global)),
            ParamRef::Part(idx, param) => self.parts.get(idx).map(|part| part.get(param)),
        }
    }
    /// Set any value of the patch.  Returns false (and does nothing) if the
    /// part index is invalid.  Values are not range checked.
    pub fn set(&mut self, param: ParamRef, value: u8) -> bool {
        match param {
            ParamRef::Global(global) => {
                *self.global_mut(global) = value;
                true
            }
            ParamRef::Part(idx, param) => match self.parts.get_mut(idx) {
                Some(part) => {
                    part.set(param, value);
                    true
                }
                None => false,
            },
        }
    }
    /// Exchange two parts.  Indices out of range are ignored.
    pub fn swap_parts(&mut self, a: usize, b: usize) {
        if a < NUM_PARTS && b < NUM_PARTS {
            self.parts.swap(a, b);
        }
    }
    /// Overwrite part `to` with a copy of part `from`.  Indices out of range
    /// are ignored.
    pub fn copy_part(&mut self, from: usize, to: usize) {
        if from < NUM_PARTS && to < NUM_PARTS && from != to {
            self.parts[to] = self.parts[from].clone();
        }
    }
    /// The display name of this patch's location, "01" to "64"
    pub fn location_name(&self) -> LocationName {
        LocationName(self.number)
    }
    /// The default name for a patch stored at this location, "Patch 01" to
    /// "Patch 64"
    pub fn patch_name(&self) -> PatchName {
        PatchName(self.number)
    }
    /// A copy of this patch's location, advanced by one and wrapping at 64.
    /// The returned patch is otherwise default.
    pub fn next_location(&self) -> Self {
        Self {
            number: self.number.wrapping_add(1) % NUM_LOCATIONS,
            ..Default::default()
        }
    }
}

/// Formats a performance number for display: zero padded and one-based
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocationName(pub u8);

impl core::fmt::Display for LocationName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}", self.0 as u16 + 1)
    }
}

/// Formats the default name of a patch from its number
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatchName(pub u8);

impl core::fmt::Display for PatchName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Patch {}", LocationName(self.0))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use std::string::ToString;

    #[test]
    fn location_names() {
        let mut patch = Patch::default();
        assert_eq!(patch.location_name().to_string(), "01");
        patch.number = 9;
        assert_eq!(patch.location_name().to_string(), "10");
        patch.number = 63;
        assert_eq!(patch.location_name().to_string(), "64");
        assert_eq!(patch.patch_name().to_string(), "Patch 64");
    }
    #[test]
    fn next_location_wraps() {
        let mut patch = Patch::default();
        patch.number = 62;
        assert_eq!(patch.next_location().number, 63);
        patch.number = 63;
        assert_eq!(patch.next_location().number, 0);
    }
    #[test]
    fn swap_and_copy_move_whole_parts() {
        let mut patch = Patch::default();
        patch.parts[0].lfo1_speed = 11;
        patch.parts[0].fx_send = 3;
        patch.parts[3].lfo1_speed = 44;
        patch.swap_parts(0, 3);
        assert_eq!(patch.parts[0].lfo1_speed, 44);
        assert_eq!(patch.parts[3].lfo1_speed, 11);
        assert_eq!(patch.parts[3].fx_send, 3);
        patch.copy_part(3, 1);
        assert_eq!(patch.parts[1], patch.parts[3]);
        // out of range does nothing
        let before = patch.clone();
        patch.swap_parts(0, 5);
        patch.copy_part(7, 0);
        assert_eq!(patch, before);
    }
    #[test]
    fn param_refs() {
        let mut patch = Patch::default();
        assert!(patch.set(ParamRef::Global(GlobalParam::ChorusRate), 7));
        assert_eq!(patch.chorus_rate, 7);
        assert!(patch.set(ParamRef::Part(2, PartParam::FilterRes), 99));
        assert_eq!(patch.parts[2].filter_res, 99);
        assert_eq!(patch.get(ParamRef::Part(2, PartParam::FilterRes)), Some(99));
        assert!(!patch.set(ParamRef::Part(5, PartParam::FilterRes), 1));
        assert_eq!(patch.get(ParamRef::Part(5, PartParam::FilterRes)), None);
    }
    #[test]
    fn xp2_only_params() {
        assert!(ParamRef::Global(GlobalParam::ChorusDepth).is_xp2_only());
        assert!(!ParamRef::Global(GlobalParam::EditPart).is_xp2_only());
        assert!(ParamRef::Part(0, PartParam::FxSend).is_xp2_only());
        assert!(!ParamRef::Part(0, PartParam::Volume).is_xp2_only());
    }
    #[test]
    fn global_keys() {
        for global in GlobalParam::ELEM {
            assert_eq!(GlobalParam::try_from(global.key()), Ok(global));
        }
        assert_eq!(GlobalParam::EditPart.max(), 4);
    }
}
