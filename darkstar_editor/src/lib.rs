//! Host-side support for editing Red Sound DarkStar patches: an editing
//! session ([DarkStarEditor]), persisted preferences, string keys for patch
//! values, and conversion to and from `wmidi` messages.  The codec itself
//! lives in the `darkstar` crate.
use std::fs;
use std::path::Path;

use darkstar::Patch;

mod editor;
mod error;
pub mod keys;
pub mod midi;
pub mod prefs;

pub use editor::DarkStarEditor;
pub use error::EditorError;

/// Read a patch stored as JSON.  Missing fields take their default values.
pub fn load_patch(path: &Path) -> Result<Patch, EditorError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Write a patch as JSON
pub fn save_patch(path: &Path, patch: &Patch) -> Result<(), EditorError> {
    fs::write(path, serde_json::to_string_pretty(patch)?)?;
    log::info!("Saved patch to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_json_round_trip() {
        let path = std::env::temp_dir().join(format!("darkstar-patch-{}.json", std::process::id()));
        let mut patch = Patch::default();
        patch.number = 17;
        patch.parts[4].filter_res = 88;
        save_patch(&path, &patch).unwrap();
        assert_eq!(load_patch(&path).unwrap(), patch);
        fs::remove_file(&path).unwrap();
    }
    #[test]
    fn partial_json_uses_defaults() {
        let patch: Patch = serde_json::from_str(r#"{"number": 5}"#).unwrap();
        assert_eq!(patch.number, 5);
        assert_eq!(patch.parts, Patch::default().parts);
    }
}
