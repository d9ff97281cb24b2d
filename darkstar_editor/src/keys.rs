//! String keys for patch values.
//!
//! Panels and patch files name values with short keys: the four globals
//! (`number`, `currenteditpart`, `chorusdepth`, `chorusrate`) and
//! `part<N><param>` for part parameters, with `N` counted from 1
//! (`part3filterfreq`).  These are only used at the edge of the editor;
//! everything else works with [ParamRef].

use darkstar::{GlobalParam, ParamRef, PartParam, NUM_PARTS};

use crate::EditorError;

const PART_PREFIX: &str = "part";

/// Resolve a key to the value it names
pub fn parse_key(key: &str) -> Result<ParamRef, EditorError> {
    if let Ok(global) = GlobalParam::try_from(key) {
        return Ok(ParamRef::Global(global));
    }
    let unknown = || EditorError::UnknownKey(key.to_owned());
    let rest = key.strip_prefix(PART_PREFIX).ok_or_else(unknown)?;
    let digit = rest.chars().next().ok_or_else(unknown)?;
    let number = digit.to_digit(10).ok_or_else(unknown)? as usize;
    if !(1..=NUM_PARTS).contains(&number) {
        return Err(unknown());
    }
    let param = PartParam::try_from(&rest[digit.len_utf8()..]).map_err(|_| unknown())?;
    Ok(ParamRef::Part(number - 1, param))
}

/// The key naming `param`
pub fn key_of(param: ParamRef) -> String {
    match param {
        ParamRef::Global(global) => global.key().to_owned(),
        ParamRef::Part(idx, param) => format!("{}{}{}", PART_PREFIX, idx + 1, param.key()),
    }
}

/// The human readable name of `param`
pub fn label_of(param: ParamRef) -> String {
    match param {
        ParamRef::Global(global) => global.label().to_owned(),
        ParamRef::Part(idx, param) => format!("Part {} {}", idx + 1, param.info().label),
    }
}

/// The largest valid value of `param`
pub fn max_of(param: ParamRef) -> u8 {
    match param {
        ParamRef::Global(global) => global.max(),
        ParamRef::Part(_, param) => param.info().max,
    }
}

/// Every value in a patch: the globals, then each part in turn
pub fn all_params() -> impl Iterator<Item = ParamRef> {
    let globals = GlobalParam::ELEM.into_iter().map(ParamRef::Global);
    let parts = (0..NUM_PARTS)
        .flat_map(|idx| PartParam::elements().map(move |param| ParamRef::Part(idx, param)));
    globals.chain(parts)
}
