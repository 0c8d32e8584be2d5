//! Animation clip manifest loading.
//!
//! Loads the clip manifest JSON which defines frame counts, timing, looping
//! and the placeholder tint for every animation state.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::AnimationState;

/// Timing and presentation of a single animation clip.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ClipDef {
    /// Number of animation frames (1 for static poses).
    pub frames: u32,
    /// Seconds per frame.
    pub frame_duration: f32,
    pub looping: bool,
    /// RGB tint used while the clip plays.
    #[serde(default = "default_tint")]
    pub tint: [f32; 3],
}

fn default_tint() -> [f32; 3] {
    [0.9, 0.9, 0.9]
}

impl ClipDef {
    pub fn color(&self) -> Color {
        Color::srgb(self.tint[0], self.tint[1], self.tint[2])
    }
}

/// Resource containing every clip, keyed by animation state.
#[derive(Resource, Debug, Clone)]
pub struct AnimationClips {
    /// Version of the manifest schema (0 for built-in clips).
    pub version: u32,
    pub clips: HashMap<AnimationState, ClipDef>,
}

impl Default for AnimationClips {
    fn default() -> Self {
        let clip = |frames, frame_duration, looping, tint| ClipDef {
            frames,
            frame_duration,
            looping,
            tint,
        };
        Self {
            version: 0,
            clips: HashMap::from([
                (AnimationState::Idle, clip(4, 0.15, true, [0.9, 0.9, 0.9])),
                (AnimationState::Walk, clip(4, 0.12, true, [0.85, 0.95, 0.85])),
                (AnimationState::Dash, clip(3, 0.06, true, [0.6, 0.85, 1.0])),
                (AnimationState::Jump, clip(2, 0.1, false, [1.0, 0.95, 0.7])),
                (AnimationState::Fall, clip(2, 0.12, true, [0.95, 0.75, 0.7])),
            ]),
        }
    }
}

/// Raw manifest JSON structure.
#[derive(Deserialize)]
struct ManifestJson {
    version: u32,
    clips: HashMap<String, ClipDef>,
}

impl AnimationClips {
    /// Parse manifest JSON, overriding the built-in clips it names.
    pub fn apply_json(&mut self, contents: &str) -> Result<usize, String> {
        let manifest: ManifestJson =
            serde_json::from_str(contents).map_err(|e| format!("Parse error: {}", e))?;

        let mut applied = 0;
        for (name, def) in manifest.clips {
            match AnimationState::from_clip_name(&name) {
                Some(state) => {
                    self.clips.insert(state, def);
                    applied += 1;
                }
                None => warn!("Unknown animation clip '{}' in manifest", name),
            }
        }
        self.version = manifest.version;
        Ok(applied)
    }

    /// Load the manifest from a JSON file, keeping built-in clips on failure.
    pub fn load_from_file(&mut self, path: &str) {
        let manifest_path = Path::new(path);

        if !manifest_path.exists() {
            warn!(
                "Clip manifest not found at {:?}, using built-in clips",
                path
            );
            return;
        }

        let contents = match fs::read_to_string(manifest_path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to read clip manifest: {}", e);
                return;
            }
        };

        match self.apply_json(&contents) {
            Ok(applied) => info!(
                "Loaded clip manifest v{} with {} clips",
                self.version, applied
            ),
            Err(e) => error!("Failed to parse clip manifest: {}", e),
        }
    }

    /// Clip for a state, falling back to a one-frame looping pose.
    pub fn get(&self, state: AnimationState) -> ClipDef {
        self.clips.get(&state).copied().unwrap_or(ClipDef {
            frames: 1,
            frame_duration: 0.15,
            looping: true,
            tint: default_tint(),
        })
    }
}
