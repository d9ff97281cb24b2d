//! An editing session for one DarkStar

use darkstar::patch::NUM_LOCATIONS;
use darkstar::{
    encode, encode_single_voice, Destination, Generation, ParamRef, PartResolver, Patch,
    SysexBuffer, NUM_PARTS,
};
use wmidi::MidiMessage;

use crate::keys::{all_params, key_of, max_of, parse_key};
use crate::midi;
use crate::prefs::{PreferenceStore, Preferences};
use crate::EditorError;

/// The patch being edited, the hardware generation it is sent as, and where
/// that choice is remembered
pub struct DarkStarEditor<S: PreferenceStore> {
    patch: Patch,
    generation: Generation,
    store: S,
}

impl<S: PreferenceStore> DarkStarEditor<S> {
    /// Start a session with a freshly initialised patch.  The generation is
    /// read from `store`; if that fails the base DarkStar is assumed.
    pub fn new(store: S) -> Self {
        let prefs = store.load().unwrap_or_else(|e| {
            log::warn!("Could not load preferences, using defaults: {}", e);
            Preferences::default()
        });
        Self {
            patch: Patch::default(),
            generation: prefs.generation(),
            store,
        }
    }
    /// The patch being edited
    pub fn patch(&self) -> &Patch {
        &self.patch
    }
    /// Replace the patch being edited
    pub fn set_patch(&mut self, patch: Patch) {
        self.patch = patch;
    }
    /// The generation patches are sent as
    pub fn generation(&self) -> Generation {
        self.generation
    }
    /// The preference store
    pub fn store(&self) -> &S {
        &self.store
    }
    /// Change the generation and remember the choice.  Failing to save is
    /// logged but does not undo the change.
    pub fn set_generation(&mut self, generation: Generation) {
        if generation == self.generation {
            return;
        }
        log::info!("Switching to {}", generation.to_str());
        self.generation = generation;
        let prefs = Preferences {
            xp2: generation.is_xp2(),
        };
        if let Err(e) = self.store.save(&prefs) {
            log::warn!("Could not save preferences: {}", e);
        }
    }
    /// Shorthand for [Self::set_generation]
    pub fn set_xp2(&mut self, xp2: bool) {
        self.set_generation(Generation::from_xp2(xp2));
    }
    /// Decode a received message into the patch.  Performance messages also
    /// set the generation to match.  On error nothing changes.
    pub fn receive<R: PartResolver + ?Sized>(
        &mut self,
        bytes: &[u8],
        resolver: &mut R,
    ) -> Result<(), EditorError> {
        if let Some(generation) = self.patch.apply_sysex(bytes, resolver)? {
            self.set_generation(generation);
        }
        Ok(())
    }
    /// [Self::receive] for a MIDI message, which must be System Exclusive
    pub fn receive_midi<R: PartResolver + ?Sized>(
        &mut self,
        msg: &MidiMessage<'_>,
        resolver: &mut R,
    ) -> Result<(), EditorError> {
        let bytes = midi::from_midi(msg)?;
        self.receive(&bytes, resolver)
    }
    /// Encode the patch for sending or saving
    pub fn emit(&self, destination: Destination, to_file: bool) -> SysexBuffer {
        encode(&self.patch, self.generation, destination, to_file)
    }
    /// Encode one part as a single voice
    pub fn emit_part(&self, idx: usize) -> Option<SysexBuffer> {
        self.patch.parts.get(idx).map(encode_single_voice)
    }
    /// Select the patch's location on the synth
    pub fn program_change(&self, channel: wmidi::Channel) -> MidiMessage<'static> {
        midi::program_change(channel, self.patch.number.min(NUM_LOCATIONS - 1))
    }
    /// Get a value by key
    pub fn get(&self, key: &str) -> Result<u8, EditorError> {
        let param = parse_key(key)?;
        self.patch
            .get(param)
            .ok_or_else(|| EditorError::UnknownKey(key.to_owned()))
    }
    /// Set a value by key.  Values above the parameter's range are rejected.
    pub fn set(&mut self, key: &str, value: u8) -> Result<(), EditorError> {
        let param = parse_key(key)?;
        let max = max_of(param);
        if value > max {
            return Err(EditorError::OutOfRange {
                key: key.to_owned(),
                value,
                max,
            });
        }
        self.patch.set(param, value);
        Ok(())
    }
    /// Set the location from its display form, "1" to "64"
    pub fn set_location(&mut self, name: &str) -> Result<(), EditorError> {
        let bad = || EditorError::BadLocation(name.to_owned());
        let number: u8 = name.trim().parse().map_err(|_| bad())?;
        if !(1..=NUM_LOCATIONS).contains(&number) {
            return Err(bad());
        }
        self.patch.number = number - 1;
        Ok(())
    }
    /// Exchange two parts, 0-based
    pub fn swap_parts(&mut self, a: usize, b: usize) -> Result<(), EditorError> {
        check_part(a)?;
        check_part(b)?;
        self.patch.swap_parts(a, b);
        Ok(())
    }
    /// Copy one part over another, 0-based
    pub fn copy_part(&mut self, from: usize, to: usize) -> Result<(), EditorError> {
        check_part(from)?;
        check_part(to)?;
        self.patch.copy_part(from, to);
        Ok(())
    }
    /// True if `param` is not expected to survive a round trip through the
    /// synth.  A base DarkStar does not store the XP2 values.
    pub fn is_exempt(&self, param: ParamRef) -> bool {
        !self.generation.is_xp2() && param.is_xp2_only()
    }
    /// The keys of every value that differs between the patch and
    /// `received`, skipping exempt values
    pub fn mismatches(&self, received: &Patch) -> Vec<String> {
        all_params()
            .filter(|param| !self.is_exempt(*param))
            .filter(|param| self.patch.get(*param) != received.get(*param))
            .map(key_of)
            .collect()
    }
}

fn check_part(idx: usize) -> Result<(), EditorError> {
    if idx < NUM_PARTS {
        Ok(())
    } else {
        Err(EditorError::BadPart(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;
    use darkstar::{FixedPart, SysexError};

    fn editor(xp2: bool) -> DarkStarEditor<MemoryStore> {
        DarkStarEditor::new(MemoryStore::new(Preferences { xp2 }))
    }

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn load(&self) -> Result<Preferences, EditorError> {
            Err(std::io::Error::other("unreadable").into())
        }
        fn save(&mut self, _prefs: &Preferences) -> Result<(), EditorError> {
            Err(std::io::Error::other("read only").into())
        }
    }

    #[test]
    fn generation_comes_from_store() {
        assert_eq!(editor(true).generation(), Generation::Xp2);
        assert_eq!(editor(false).generation(), Generation::Base);
        let mut broken = DarkStarEditor::new(BrokenStore);
        assert_eq!(broken.generation(), Generation::Base);
        broken.set_xp2(true);
        assert_eq!(broken.generation(), Generation::Xp2);
    }
    #[test]
    fn classification_overrides_preference() {
        let mut ed = editor(false);
        let mut other = editor(true);
        other.set("chorusdepth", 9).unwrap();
        let bytes = other.emit(Destination::WorkingMemory, false);
        ed.receive(&bytes, &mut FixedPart(None)).unwrap();
        assert_eq!(ed.generation(), Generation::Xp2);
        assert_eq!(ed.get("chorusdepth").unwrap(), 9);
        assert!(ed.store().prefs.xp2);
        assert_eq!(ed.store().saves, 1);

        // the same generation again does not write
        ed.receive(&bytes, &mut FixedPart(None)).unwrap();
        assert_eq!(ed.store().saves, 1);

        // a single voice says nothing about the generation
        let voice = ed.emit_part(0).unwrap();
        ed.set_xp2(false);
        ed.receive(&voice, &mut FixedPart(Some(1))).unwrap();
        assert_eq!(ed.generation(), Generation::Base);
    }
    #[test]
    fn failed_receive_changes_nothing() {
        let mut ed = editor(false);
        ed.set("part2filterfreq", 77).unwrap();
        let voice = ed.emit_part(1).unwrap();
        let before = ed.patch().clone();
        assert!(matches!(
            ed.receive(&voice, &mut FixedPart(None)),
            Err(EditorError::Sysex(SysexError::Cancelled))
        ));
        assert!(matches!(
            ed.receive(&[0u8; 518], &mut FixedPart(None)),
            Err(EditorError::Sysex(SysexError::UnrecognizedLength(518)))
        ));
        assert_eq!(ed.patch(), &before);
        assert_eq!(ed.store().saves, 0);
    }
    #[test]
    fn midi_round_trip() {
        let mut ed = editor(true);
        ed.set("part4volume", 100).unwrap();
        ed.set("part4fxsend", 12).unwrap();
        let bytes = ed.emit(Destination::Addressed, false);
        let msg = midi::to_midi(&bytes).unwrap();
        let mut received = editor(false);
        received.receive_midi(&msg, &mut FixedPart(None)).unwrap();
        assert_eq!(received.patch(), ed.patch());
        assert!(received.mismatches(ed.patch()).is_empty());

        let pc = midi::program_change(wmidi::Channel::Ch1, 0);
        assert!(matches!(
            received.receive_midi(&pc, &mut FixedPart(None)),
            Err(EditorError::NotSysex)
        ));
    }
    #[test]
    fn keyed_access_checks_ranges() {
        let mut ed = editor(false);
        ed.set("part1lfo1shape", 6).unwrap();
        assert_eq!(ed.patch().parts[0].lfo1_shape, 6);
        assert!(matches!(
            ed.set("part1lfo1shape", 7),
            Err(EditorError::OutOfRange { max: 6, value: 7, .. })
        ));
        assert!(matches!(ed.get("part9mix"), Err(EditorError::UnknownKey(_))));
        ed.set("number", 63).unwrap();
        assert!(ed.set("number", 64).is_err());
    }
    #[test]
    fn base_verification_skips_xp2_values() {
        let ed = editor(false);
        let mut received = ed.patch().clone();
        received.chorus_rate = 3;
        received.parts[2].fx_send = 1;
        assert!(ed.mismatches(&received).is_empty());
        received.parts[2].pan = 0;
        assert_eq!(ed.mismatches(&received), ["part3pan"]);

        let ed = editor(true);
        assert_eq!(
            ed.mismatches(&received),
            ["chorusrate", "part3pan", "part3fxsend"]
        );
        assert!(!ed.is_exempt(ParamRef::Global(darkstar::GlobalParam::ChorusRate)));
    }
    #[test]
    fn locations_and_program_change() {
        let mut ed = editor(false);
        ed.set_location("12").unwrap();
        assert_eq!(ed.patch().number, 11);
        assert_eq!(ed.patch().patch_name().to_string(), "Patch 12");
        for bad in ["0", "65", "x", ""] {
            assert!(matches!(ed.set_location(bad), Err(EditorError::BadLocation(_))));
        }
        let mut bytes = [0u8; 2];
        ed.program_change(wmidi::Channel::Ch2)
            .copy_to_slice(&mut bytes)
            .unwrap();
        assert_eq!(bytes, [0xC1, 11]);
    }
    #[test]
    fn part_operations_are_checked() {
        let mut ed = editor(false);
        ed.set("part1ring", 5).unwrap();
        ed.copy_part(0, 4).unwrap();
        assert_eq!(ed.get("part5ring").unwrap(), 5);
        ed.set("part2ring", 9).unwrap();
        ed.swap_parts(1, 4).unwrap();
        assert_eq!(ed.get("part2ring").unwrap(), 5);
        assert_eq!(ed.get("part5ring").unwrap(), 9);
        assert!(matches!(ed.swap_parts(0, 5), Err(EditorError::BadPart(5))));
        assert!(ed.emit_part(5).is_none());
    }
}
