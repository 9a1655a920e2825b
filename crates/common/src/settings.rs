//! # Tree Settings
//!
//! Persistent configuration for the composition.
//!
//! ## Persistence
//! - **Location**: `~/.tinsel/settings.json`
//! - **Format**: pretty-printed JSON
//! - **Auto-save**: saved whenever the resource changes, via Bevy's change
//!   detection
//! - **Fallback**: defaults are used when the file is missing or unreadable
//!
//! Density and field radius are layout-time parameters: they shape the
//! generated position tables, so edits apply on the next run. Everything
//! else takes effect live.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Errors from writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not determine home directory")]
    NoHome,

    #[error("failed to write settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ============================================================================
// TreeSettings Resource
// ============================================================================

/// User-tunable parameters, persisted to `~/.tinsel/settings.json`.
#[derive(Resource, Serialize, Deserialize, Clone, Debug)]
pub struct TreeSettings {
    /// Idle spin rate of the whole tree, radians per second.
    pub spin: f32,

    /// Uniform scale applied to the tree root.
    pub scale: f32,

    /// Foliage count multiplier (layout-time).
    pub density: f32,

    /// Wind distortion amplitude, unitless slider value.
    pub distortion: f32,

    /// Chaos scatter radius in world units (layout-time).
    pub field_radius: f32,

    /// Draw the 2D hand skeleton overlay.
    pub show_skeleton: bool,

    /// Run the hand tracking producer at all. When off, only the manual
    /// toggle changes the mode.
    pub hand_tracking_enabled: bool,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            spin: 0.2,
            scale: 1.1,
            density: 1.0,
            distortion: 0.008,
            field_radius: 22.59,
            show_skeleton: true,
            hand_tracking_enabled: true,
        }
    }
}

impl TreeSettings {
    /// The settings file path (`~/.tinsel/settings.json`).
    fn settings_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".tinsel").join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults on any failure.
    pub fn load() -> Self {
        if let Some(path) = Self::settings_path() {
            if path.exists() {
                match fs::read_to_string(&path) {
                    Ok(content) => match serde_json::from_str::<TreeSettings>(&content) {
                        Ok(settings) => {
                            info!("Loaded settings from {:?}", path);
                            return settings;
                        }
                        Err(e) => {
                            warn!("Failed to parse settings file: {}. Using defaults.", e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read settings file: {}. Using defaults.", e);
                    }
                }
            }
        } else {
            warn!("Could not determine home directory. Using default settings.");
        }
        Self::default()
    }

    /// Save settings to disk, creating the directory if needed.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoHome)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(())
    }
}

// ============================================================================
// Plugin
// ============================================================================

/// Loads settings at startup and auto-saves them when they change.
pub struct TreeSettingsPlugin;

impl Plugin for TreeSettingsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(TreeSettings::load())
            .add_systems(Update, auto_save_settings);
    }
}

fn auto_save_settings(settings: Res<TreeSettings>) {
    if settings.is_changed() && !settings.is_added() {
        if let Err(e) = settings.save() {
            warn!("Failed to save settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let s = TreeSettings::default();
        assert_eq!(s.spin, 0.2);
        assert_eq!(s.scale, 1.1);
        assert_eq!(s.density, 1.0);
        assert_eq!(s.distortion, 0.008);
        assert_eq!(s.field_radius, 22.59);
        assert!(s.show_skeleton);
        assert!(s.hand_tracking_enabled);
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = TreeSettings::default();
        s.spin = 0.45;
        s.show_skeleton = false;
        let json = serde_json::to_string_pretty(&s).unwrap();
        let back: TreeSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.spin, 0.45);
        assert!(!back.show_skeleton);
        assert_eq!(back.field_radius, s.field_radius);
    }
}
