//! The bit layout of one part's voice data.
//!
//! Voice data is a sequence of 2-byte slots, each holding one 8-bit value as
//! a nibble pair (see [crate::sysex::denybble]).  Most slots hold a single
//! parameter, but several pack a handful of narrow parameters together.
//! [LAYOUT] lists every parameter with its slot, bit position, and width, and
//! is the only description of the format: decoding and encoding both walk it.

use super::PartParam;
use super::PartParam as P;

/// The number of 2-byte slots in use.  The two bytes after the last slot are
/// unused and always zero.
pub const NUM_SLOTS: usize = 49;

/// The value factory patches sometimes send for LFO 2 delay when they mean 0
pub const LFO2_DELAY_FACTORY_BUG: u8 = 148;

/// Adjustments applied on top of the bit extraction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transform {
    /// Stored as is
    Plain,
    /// Stored as `127 - value`.  The DarkStar treats 127 as 100% oscillator 1
    /// and 0 as 100% oscillator 2, opposite to the panel.
    Inverted,
    /// The wire value is a known firmware bug meaning 0
    Sentinel(u8),
}

/// One parameter's position within the voice data
#[derive(Clone, Copy, Debug)]
pub struct SlotField {
    /// The parameter stored here
    pub param: PartParam,
    /// Slot index; the byte offset within the voice data is `2 * slot`
    pub slot: u8,
    /// Bit position of the least significant bit within the slot value
    pub shift: u8,
    /// Number of bits
    pub width: u8,
    /// Value mapping applied on top of the bit extraction
    pub transform: Transform,
}

impl SlotField {
    const fn full(param: PartParam, slot: u8) -> Self {
        Self::bits(param, slot, 0, 8)
    }
    const fn bits(param: PartParam, slot: u8, shift: u8, width: u8) -> Self {
        Self {
            param,
            slot,
            shift,
            width,
            transform: Transform::Plain,
        }
    }
    const fn with(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }
    /// The mask for this field's value, before shifting
    pub const fn mask(&self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }
    /// Byte offset of the slot within the voice data
    pub const fn byte_offset(&self) -> usize {
        2 * self.slot as usize
    }
    /// Pull this field's value out of a slot value
    pub fn extract(&self, slot_value: u8) -> u8 {
        let value = (slot_value >> self.shift) & self.mask();
        match self.transform {
            Transform::Plain => value,
            Transform::Inverted => self.mask() - value,
            Transform::Sentinel(bug) if value == bug => {
                log::warn!("{} read as {}, treating as 0", self.param.key(), bug);
                0
            }
            Transform::Sentinel(_) => value,
        }
    }
    /// The bits this field contributes to its slot value.  `value` is masked
    /// to the field width first so it cannot spill into its neighbours.
    pub fn insert(&self, value: u8) -> u8 {
        let value = value & self.mask();
        let value = match self.transform {
            Transform::Plain => value,
            Transform::Inverted => self.mask() - value,
            Transform::Sentinel(bug) if value == bug => 0,
            Transform::Sentinel(_) => value,
        };
        value << self.shift
    }
}

/// Every voice parameter, in slot order
pub static LAYOUT: [SlotField; 78] = [
    SlotField::full(P::Lfo1Speed, 0),
    SlotField::full(P::Lfo2Speed, 1),
    SlotField::full(P::Lfo1Delay, 2),
    SlotField::full(P::Lfo2Delay, 3).with(Transform::Sentinel(LFO2_DELAY_FACTORY_BUG)),
    SlotField::bits(P::Lfo1Shape, 4, 0, 3),
    SlotField::bits(P::Lfo1Sync, 4, 3, 1),
    SlotField::bits(P::Lfo1MidiSync, 4, 4, 4),
    SlotField::bits(P::Lfo2Shape, 5, 0, 3),
    SlotField::bits(P::Lfo2Sync, 5, 3, 1),
    SlotField::bits(P::Lfo2MidiSync, 5, 4, 4),
    SlotField::full(P::Env1Attack, 6),
    SlotField::full(P::Env2Attack, 7),
    SlotField::full(P::Env1Decay, 8),
    SlotField::full(P::Env2Decay, 9),
    SlotField::full(P::Env1Sustain, 10),
    SlotField::full(P::Env2Sustain, 11),
    SlotField::full(P::Env1Release, 12),
    SlotField::full(P::Env2Release, 13),
    SlotField::bits(P::Env1Velocity, 14, 0, 3),
    SlotField::bits(P::Env2Velocity, 14, 3, 3),
    SlotField::full(P::Osc1PitchMod, 15),
    SlotField::full(P::Osc2PitchMod, 16),
    SlotField::full(P::Osc1Detune, 17),
    SlotField::full(P::Osc2Detune, 18),
    SlotField::full(P::Osc1PulseWidth, 19),
    SlotField::full(P::Osc2PulseWidth, 20),
    SlotField::full(P::Osc1PulseWidthMod, 21),
    SlotField::full(P::Osc2PulseWidthMod, 22),
    SlotField::full(P::Osc1Waveform, 23),
    SlotField::full(P::Osc2Waveform, 24),
    SlotField::bits(P::Osc1PitchModSource, 25, 0, 2),
    SlotField::bits(P::Osc1PulseWidthModSource, 25, 2, 2),
    SlotField::bits(P::Osc2PitchModSource, 25, 4, 2),
    SlotField::bits(P::Osc2PulseWidthModSource, 25, 6, 2),
    // bit 3 of this slot is unused
    SlotField::bits(P::Osc2PitchOffset, 26, 0, 3),
    SlotField::bits(P::Osc2Sync, 26, 4, 1),
    SlotField::bits(P::Osc2Source, 26, 5, 3),
    SlotField::bits(P::Mix, 27, 0, 7).with(Transform::Inverted),
    SlotField::full(P::Ring, 28),
    SlotField::full(P::FilterFreq, 29),
    SlotField::bits(P::FilterKeyTracking, 30, 0, 3),
    SlotField::bits(P::FilterOn, 30, 3, 1),
    SlotField::bits(P::FilterType, 30, 4, 2),
    SlotField::bits(P::FilterResModSource, 30, 6, 2),
    SlotField::full(P::FilterEnvMod, 31),
    SlotField::full(P::FilterLfoMod, 32),
    SlotField::full(P::FilterRes, 33),
    SlotField::full(P::FilterResMod, 34),
    SlotField::full(P::Volume, 35),
    SlotField::full(P::Pan, 36),
    SlotField::full(P::Tremolo, 37),
    SlotField::bits(P::TremoloModSource, 38, 0, 1),
    SlotField::bits(P::PanModSource, 38, 1, 3),
    SlotField::bits(P::Channel, 39, 0, 4),
    SlotField::bits(P::Polyphony, 39, 4, 4),
    SlotField::full(P::NoteLo, 40),
    SlotField::full(P::NoteHi, 41),
    SlotField::bits(P::Transpose, 42, 0, 6),
    SlotField::bits(P::Sustain, 42, 6, 1),
    SlotField::bits(P::PortamentoTime, 43, 0, 7),
    SlotField::bits(P::AutoGlide, 43, 7, 1),
    SlotField::bits(P::BendRange, 44, 0, 4),
    SlotField::bits(P::PortamentoType, 44, 4, 4),
    SlotField::bits(P::AftertouchPitch, 45, 0, 4),
    SlotField::bits(P::AftertouchFilter, 45, 4, 4),
    SlotField::bits(P::ModWheelPitch, 46, 0, 4),
    SlotField::bits(P::ModWheelFilter, 46, 4, 4),
    SlotField::bits(P::JoystickAssign, 47, 0, 3),
    SlotField::bits(P::OutputAssign, 47, 3, 1),
    SlotField::bits(P::AuditionType, 47, 4, 4),
    SlotField::bits(P::PartOutputShift, 48, 0, 1),
    SlotField::bits(P::EnvShift, 48, 1, 1),
    SlotField::bits(P::EnvHalfShift, 48, 2, 1),
    SlotField::bits(P::OscShift, 48, 3, 1),
    SlotField::bits(P::OscHalfShift, 48, 4, 1),
    SlotField::bits(P::LfoShift, 48, 5, 1),
    SlotField::bits(P::LfoHalfShift, 48, 6, 1),
    SlotField::bits(P::FilterShift, 48, 7, 1),
];

/// Iterate over the fields stored in `slot`
pub fn fields_in_slot(slot: u8) -> impl Iterator<Item = &'static SlotField> {
    LAYOUT.iter().filter(move |field| field.slot == slot)
}
