//! Identifiers and metadata for every per-part parameter.
//!
//! The codec only uses [PartParam] as a plain enum.  The metadata here
//! (keys, labels, ranges, centre values, choice names) is for editors.

/// LFO wave shapes
pub const LFO_WAVES: &[&str] = &[
    "Ramp",
    "Triangle",
    "Square",
    "Sine",
    "Pulse",
    "Sample & Hold",
    "Random",
];
/// LFO MIDI clock divisions
pub const MIDI_SYNC: &[&str] = &[
    "Off", "1/8 beat", "1/6 beat", "1/4 beat", "1/3 beat", "1/2 beat", "2/3 beat", "3/4 beat",
    "1 beat", "2 beats", "3 beats", "1 bar", "1.5 bars", "2 bars", "3 bars", "4 bars",
];
/// Modulation sources for pitch, pulse width, and resonance
pub const MOD_SOURCES: &[&str] = &["Envelope 1", "Envelope 2", "LFO 1", "LFO 2"];
/// Oscillator 2 interval above oscillator 1
pub const PITCH_OFFSETS: &[&str] = &[
    "None",
    "Fourth",
    "Fifth",
    "Octave",
    "Octave + Major 3rd",
    "Octave + Fourth",
    "Octave + Fifth",
    "2 Octaves",
];
/// Oscillator 2 signal source
pub const OSCILLATOR_SOURCES: &[&str] = &[
    "Normal",
    "Formant",
    "White Noise",
    "Pink Noise",
    "Blue Noise",
    "External 1",
    "External 2",
];
/// Filter keyboard tracking amounts
pub const KEY_TRACKING: &[&str] = &["Off", "25%", "50%", "100%", "150%", "-25%", "-50%"];
/// Filter modes
pub const FILTER_TYPES: &[&str] = &["Low Pass", "Band Pass", "High Pass"];
/// Tremolo modulation sources
pub const TREMOLO_SOURCES: &[&str] = &["LFO 1", "LFO 2"];
/// Pan modulation sources
pub const PAN_MOD_SOURCES: &[&str] = &["Pot", "Envelope 1", "Envelope 2", "LFO 1", "LFO 2"];
/// Portamento modes
pub const PORTAMENTO_TYPES: &[&str] = &[
    "Off",
    "Type 1",
    "Type 2",
    "Pre-glide 1",
    "Pre-glide 2",
    "Pre-glide 3",
    "Pre-glide 4",
    "Pre-glide 5",
    "Pre-glide 6",
];
/// Joystick assignments.  All but the first two need an XP2.
pub const JOYSTICK_ASSIGNMENTS: &[&str] = &[
    "Off",
    "X: Filter Freq  Y: Resonance",
    "X: Mix  Y: Ring Mod",
    "X: Env1 Attack  Y: Decay",
    "X: Env2 Attack  Y: Decay",
    "X: LFO1 Speed  Y: LFO2 Speed",
];
/// Part output routing (XP2)
pub const OUTPUT_ASSIGNMENTS: &[&str] = &["Main Outputs", "Aux Outputs"];
/// Audition phrases (XP2)
pub const AUDITION_TYPES: &[&str] = &[
    "Arp 3", "Note 1", "Note 2", "Note 3", "Bass 1", "Bass 2", "Bass 3", "Bass Drum", "Chord 1",
    "Chord 2", "Snare", "Arp 1", "Arp 2",
];

/// Editor-facing description of a parameter
#[derive(Debug)]
pub struct ParamInfo {
    /// The parameter this entry describes
    pub param: PartParam,
    /// Short identifier, unique within a part (e.g. `"filterfreq"`)
    pub key: &'static str,
    /// Human readable name
    pub label: &'static str,
    /// Largest valid value (the smallest is always 0)
    pub max: u8,
    /// The value a symmetric control rests at, if any
    pub center: Option<u8>,
    /// The value of this parameter in a freshly initialised part
    pub default: u8,
    /// Names for each value, if this is a choice parameter
    pub choices: Option<&'static [&'static str]>,
}

impl ParamInfo {
    const fn dial(param: PartParam, key: &'static str, label: &'static str, max: u8) -> Self {
        Self {
            param,
            key,
            label,
            max,
            center: None,
            default: 0,
            choices: None,
        }
    }
    const fn centered(
        param: PartParam,
        key: &'static str,
        label: &'static str,
        max: u8,
        center: u8,
    ) -> Self {
        Self {
            param,
            key,
            label,
            max,
            center: Some(center),
            default: center,
            choices: None,
        }
    }
    const fn choice(
        param: PartParam,
        key: &'static str,
        label: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        Self {
            param,
            key,
            label,
            max: choices.len() as u8 - 1,
            center: None,
            default: 0,
            choices: Some(choices),
        }
    }
    const fn switch(param: PartParam, key: &'static str, label: &'static str) -> Self {
        Self::dial(param, key, label, 1)
    }
    const fn with_default(mut self, default: u8) -> Self {
        self.default = default;
        self
    }
    /// True if `value` is within `0..=max`
    pub const fn contains(&self, value: u8) -> bool {
        value <= self.max
    }
    /// The name of `value` for choice parameters
    pub fn choice_name(&self, value: u8) -> Option<&'static str> {
        self.choices?.get(value as usize).copied()
    }
}

/// Every scalar parameter of a [super::Part], in the order it appears in the
/// voice data.  [PartParam::FxSend] is last since it lives in the XP2
/// performance trailer rather than the voice data.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PartParam {
    Lfo1Speed,
    Lfo2Speed,
    Lfo1Delay,
    Lfo2Delay,
    Lfo1Shape,
    Lfo1Sync,
    Lfo1MidiSync,
    Lfo2Shape,
    Lfo2Sync,
    Lfo2MidiSync,
    Env1Attack,
    Env2Attack,
    Env1Decay,
    Env2Decay,
    Env1Sustain,
    Env2Sustain,
    Env1Release,
    Env2Release,
    Env1Velocity,
    Env2Velocity,
    Osc1PitchMod,
    Osc2PitchMod,
    Osc1Detune,
    Osc2Detune,
    Osc1PulseWidth,
    Osc2PulseWidth,
    Osc1PulseWidthMod,
    Osc2PulseWidthMod,
    Osc1Waveform,
    Osc2Waveform,
    Osc1PitchModSource,
    Osc1PulseWidthModSource,
    Osc2PitchModSource,
    Osc2PulseWidthModSource,
    Osc2PitchOffset,
    Osc2Sync,
    Osc2Source,
    Mix,
    Ring,
    FilterFreq,
    FilterKeyTracking,
    FilterOn,
    FilterType,
    FilterResModSource,
    FilterEnvMod,
    FilterLfoMod,
    FilterRes,
    FilterResMod,
    Volume,
    Pan,
    Tremolo,
    TremoloModSource,
    PanModSource,
    Channel,
    Polyphony,
    NoteLo,
    NoteHi,
    Transpose,
    Sustain,
    PortamentoTime,
    AutoGlide,
    BendRange,
    PortamentoType,
    AftertouchPitch,
    AftertouchFilter,
    ModWheelPitch,
    ModWheelFilter,
    JoystickAssign,
    OutputAssign,
    AuditionType,
    PartOutputShift,
    EnvShift,
    EnvHalfShift,
    OscShift,
    OscHalfShift,
    LfoShift,
    LfoHalfShift,
    FilterShift,
    FxSend,
}

use PartParam as P;

static INFO: [ParamInfo; PartParam::numel()] = [
    ParamInfo::dial(P::Lfo1Speed, "lfo1speed", "LFO 1 Speed", 127),
    ParamInfo::dial(P::Lfo2Speed, "lfo2speed", "LFO 2 Speed", 127),
    ParamInfo::dial(P::Lfo1Delay, "lfo1delay", "LFO 1 Delay", 127),
    ParamInfo::dial(P::Lfo2Delay, "lfo2delay", "LFO 2 Delay", 127),
    ParamInfo::choice(P::Lfo1Shape, "lfo1shape", "LFO 1 Shape", LFO_WAVES),
    ParamInfo::switch(P::Lfo1Sync, "lfo1sync", "LFO 1 Sync"),
    ParamInfo::choice(P::Lfo1MidiSync, "lfo1midisync", "LFO 1 MIDI Sync", MIDI_SYNC),
    ParamInfo::choice(P::Lfo2Shape, "lfo2shape", "LFO 2 Shape", LFO_WAVES),
    ParamInfo::switch(P::Lfo2Sync, "lfo2sync", "LFO 2 Sync"),
    ParamInfo::choice(P::Lfo2MidiSync, "lfo2midisync", "LFO 2 MIDI Sync", MIDI_SYNC),
    ParamInfo::dial(P::Env1Attack, "env1attack", "Env 1 Attack", 127),
    ParamInfo::dial(P::Env2Attack, "env2attack", "Env 2 Attack", 127),
    ParamInfo::dial(P::Env1Decay, "env1decay", "Env 1 Decay", 127),
    ParamInfo::dial(P::Env2Decay, "env2decay", "Env 2 Decay", 127),
    ParamInfo::dial(P::Env1Sustain, "env1sustain", "Env 1 Sustain", 127),
    ParamInfo::dial(P::Env2Sustain, "env2sustain", "Env 2 Sustain", 127),
    ParamInfo::dial(P::Env1Release, "env1release", "Env 1 Release", 127),
    ParamInfo::dial(P::Env2Release, "env2release", "Env 2 Release", 127),
    ParamInfo::dial(P::Env1Velocity, "env1velocity", "Env 1 Velocity", 7),
    ParamInfo::dial(P::Env2Velocity, "env2velocity", "Env 2 Velocity", 7),
    ParamInfo::centered(P::Osc1PitchMod, "osc1pitchmod", "Osc 1 Pitch Mod", 127, 64),
    ParamInfo::centered(P::Osc2PitchMod, "osc2pitchmod", "Osc 2 Pitch Mod", 127, 64),
    ParamInfo::centered(P::Osc1Detune, "osc1detune", "Osc 1 Detune", 127, 64),
    ParamInfo::centered(P::Osc2Detune, "osc2detune", "Osc 2 Detune", 127, 64),
    ParamInfo::centered(P::Osc1PulseWidth, "osc1pulsewidth", "Osc 1 Pulse Width", 127, 64),
    ParamInfo::centered(P::Osc2PulseWidth, "osc2pulsewidth", "Osc 2 Pulse Width", 127, 64),
    ParamInfo::centered(P::Osc1PulseWidthMod, "osc1pulsewidthmod", "Osc 1 PW Mod", 127, 64),
    ParamInfo::centered(P::Osc2PulseWidthMod, "osc2pulsewidthmod", "Osc 2 PW Mod", 127, 64),
    ParamInfo::dial(P::Osc1Waveform, "osc1waveform", "Osc 1 Waveform", 127),
    ParamInfo::dial(P::Osc2Waveform, "osc2waveform", "Osc 2 Waveform", 127),
    ParamInfo::choice(P::Osc1PitchModSource, "osc1pitchmodsource", "Osc 1 Pitch Mod Source", MOD_SOURCES),
    ParamInfo::choice(P::Osc1PulseWidthModSource, "osc1pulsewidthmodsource", "Osc 1 PW Mod Source", MOD_SOURCES),
    ParamInfo::choice(P::Osc2PitchModSource, "osc2pitchmodsource", "Osc 2 Pitch Mod Source", MOD_SOURCES),
    ParamInfo::choice(P::Osc2PulseWidthModSource, "osc2pulsewidthmodsource", "Osc 2 PW Mod Source", MOD_SOURCES),
    ParamInfo::choice(P::Osc2PitchOffset, "osc2pitchoffset", "Osc 2 Pitch Offset", PITCH_OFFSETS),
    ParamInfo::switch(P::Osc2Sync, "osc2sync", "Osc 2 Sync"),
    ParamInfo::choice(P::Osc2Source, "osc2source", "Osc 2 Source", OSCILLATOR_SOURCES),
    ParamInfo::centered(P::Mix, "mix", "Mix", 127, 64),
    ParamInfo::dial(P::Ring, "ring", "Ring", 127),
    ParamInfo::dial(P::FilterFreq, "filterfreq", "Filter Frequency", 127),
    ParamInfo::choice(P::FilterKeyTracking, "filterkeytracking", "Key Tracking", KEY_TRACKING),
    ParamInfo::switch(P::FilterOn, "filteron", "Filter On"),
    ParamInfo::choice(P::FilterType, "filtertype", "Filter Type", FILTER_TYPES),
    ParamInfo::choice(P::FilterResModSource, "filterresmodsource", "Resonance Mod Source", MOD_SOURCES),
    ParamInfo::centered(P::FilterEnvMod, "filterenvmod", "Envelope 2 Mod", 127, 64),
    ParamInfo::centered(P::FilterLfoMod, "filterlfomod", "LFO 2 Mod", 127, 64),
    ParamInfo::dial(P::FilterRes, "filterres", "Resonance", 127),
    ParamInfo::centered(P::FilterResMod, "filterresmod", "Resonance Mod", 127, 64),
    ParamInfo::dial(P::Volume, "volume", "Volume", 127),
    ParamInfo::centered(P::Pan, "pan", "Pan", 127, 64),
    ParamInfo::centered(P::Tremolo, "tremolo", "Tremolo", 127, 64),
    ParamInfo::choice(P::TremoloModSource, "tremolomodsource", "Tremolo Mod Source", TREMOLO_SOURCES),
    ParamInfo::choice(P::PanModSource, "panmodsource", "Pan Mod Source", PAN_MOD_SOURCES),
    ParamInfo::dial(P::Channel, "channel", "Channel", 15),
    ParamInfo::dial(P::Polyphony, "polyphony", "Polyphony", 8),
    ParamInfo::dial(P::NoteLo, "notelo", "Note Lo", 127),
    ParamInfo::dial(P::NoteHi, "notehi", "Note Hi", 127).with_default(127),
    ParamInfo::centered(P::Transpose, "transpose", "Transpose", 48, 24),
    ParamInfo::switch(P::Sustain, "sustain", "Sustain"),
    ParamInfo::dial(P::PortamentoTime, "portamentotime", "Portamento Time", 127),
    ParamInfo::switch(P::AutoGlide, "autoglide", "Portamento Auto Glide"),
    ParamInfo::dial(P::BendRange, "bendrange", "Bend Range", 12),
    ParamInfo::choice(P::PortamentoType, "portamentotype", "Portamento Type", PORTAMENTO_TYPES),
    ParamInfo::centered(P::AftertouchPitch, "aftertouchpitch", "Aftertouch Pitch", 14, 7),
    ParamInfo::centered(P::AftertouchFilter, "aftertouchfilter", "Aftertouch Filter", 14, 7),
    ParamInfo::centered(P::ModWheelPitch, "modwheelpitch", "Mod Wheel Pitch", 14, 7),
    ParamInfo::centered(P::ModWheelFilter, "modwheelfilter", "Mod Wheel Filter", 14, 7),
    ParamInfo::choice(P::JoystickAssign, "joystickassign", "Joystick Assign", JOYSTICK_ASSIGNMENTS),
    ParamInfo::choice(P::OutputAssign, "outputassign", "Output Assign", OUTPUT_ASSIGNMENTS),
    ParamInfo::choice(P::AuditionType, "auditiontype", "Audition Type", AUDITION_TYPES),
    ParamInfo::switch(P::PartOutputShift, "partoutputshift", "Part Output Shift"),
    ParamInfo::switch(P::EnvShift, "envshift", "Env Shift"),
    ParamInfo::switch(P::EnvHalfShift, "envhalfshift", "Env 1/2 Shift"),
    ParamInfo::switch(P::OscShift, "oscshift", "Osc Shift"),
    ParamInfo::switch(P::OscHalfShift, "oschalfshift", "Osc 1/2 Shift"),
    ParamInfo::switch(P::LfoShift, "lfoshift", "LFO Shift"),
    ParamInfo::switch(P::LfoHalfShift, "lfohalfshift", "LFO 1/2 Shift"),
    ParamInfo::switch(P::FilterShift, "filtershift", "Filter Shift"),
    ParamInfo::dial(P::FxSend, "fxsend", "FX Send", 15),
];

impl PartParam {
    /// The first parameter, in order
    pub const fn min() -> Self {
        Self::Lfo1Speed
    }
    /// The last parameter, in order
    pub const fn max() -> Self {
        Self::FxSend
    }
    /// The number of per-part parameters
    pub const fn numel() -> usize {
        Self::max() as usize + 1
    }
    /// An iterator over all parameters, in order
    pub fn elements() -> impl core::iter::Iterator<Item = PartParam> {
        INFO.iter().map(|info| info.param)
    }
    /// Convert a `u8` to a `PartParam`
    pub fn from_u8(value: u8) -> Option<Self> {
        INFO.get(value as usize).map(|info| info.param)
    }
    /// Metadata for this parameter
    pub fn info(self) -> &'static ParamInfo {
        &INFO[self as usize]
    }
    /// Short identifier, unique within a part
    pub fn key(self) -> &'static str {
        self.info().key
    }
    /// True for parameters that only exist on the XP2
    pub const fn is_xp2_only(self) -> bool {
        matches!(self, Self::FxSend)
    }
}

impl TryFrom<&str> for PartParam {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        INFO.iter()
            .find(|info| info.key == value)
            .map(|info| info.param)
            .ok_or("PartParam::try_from::<&str> parse failure")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_in_enum_order() {
        for (idx, info) in INFO.iter().enumerate() {
            assert_eq!(info.param as usize, idx, "{}", info.key);
        }
    }
    #[test]
    fn keys_are_unique_and_parse() {
        for param in PartParam::elements() {
            assert_eq!(PartParam::try_from(param.key()), Ok(param));
            assert_eq!(PartParam::elements().filter(|p| p.key() == param.key()).count(), 1);
        }
        assert!(PartParam::try_from("nonsense").is_err());
    }
    #[test]
    fn defaults_are_in_range() {
        for param in PartParam::elements() {
            let info = param.info();
            assert!(info.contains(info.default), "{}", info.key);
            if let Some(center) = info.center {
                assert!(info.contains(center));
            }
        }
    }
    #[test]
    fn choice_names() {
        let info = PartParam::FilterType.info();
        assert_eq!(info.max, 2);
        assert_eq!(info.choice_name(1), Some("Band Pass"));
        assert_eq!(info.choice_name(3), None);
        assert_eq!(PartParam::Volume.info().choice_name(0), None);
    }
    #[test]
    fn from_u8_bounds() {
        assert_eq!(PartParam::from_u8(0), Some(PartParam::Lfo1Speed));
        assert_eq!(PartParam::from_u8(78), Some(PartParam::FxSend));
        assert_eq!(PartParam::from_u8(79), None);
    }
}
