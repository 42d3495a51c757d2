use crate::color::ColorScheme;
use crate::settings::GridSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// A named preset bundling grid settings with a color scheme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub settings: GridSettings,
    pub color_scheme: ColorScheme,
}

impl Preset {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        settings: GridSettings,
        color_scheme: ColorScheme,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            settings,
            color_scheme,
        }
    }
}

/// Manager for loading and saving presets
pub struct PresetManager {
    /// Built-in presets that ship with the app
    pub builtin: Vec<Preset>,
    /// User-created presets loaded from disk
    pub user: Vec<Preset>,
}

impl Default for PresetManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetManager {
    pub fn new() -> Self {
        let mut manager = Self {
            builtin: Vec::new(),
            user: Vec::new(),
        };
        manager.load_builtin_presets();
        manager.load_user_presets();
        manager
    }

    fn load_builtin_presets(&mut self) {
        self.builtin = vec![
            Preset::new(
                "Default",
                "Sparse rainbow rain at the stock cadence",
                GridSettings::default(),
                ColorScheme::Rainbow,
            ),
            Preset::new(
                "Drizzle",
                "Slow, scattered drops",
                GridSettings {
                    speed: 0.6,
                    density: 0.02,
                    ..Default::default()
                },
                ColorScheme::Ocean,
            ),
            Preset::new(
                "Steady",
                "Moderate rainfall",
                GridSettings {
                    speed: 1.0,
                    density: 0.05,
                    ..Default::default()
                },
                ColorScheme::Rainbow,
            ),
            Preset::new(
                "Downpour",
                "Fast, dense rain",
                GridSettings {
                    speed: 2.0,
                    density: 0.15,
                    ..Default::default()
                },
                ColorScheme::Ocean,
            ),
            Preset::new(
                "Monsoon",
                "Near-saturation rainfall on a wide grid",
                GridSettings {
                    width: 50,
                    height: 30,
                    speed: 2.6,
                    density: 0.4,
                },
                ColorScheme::Ocean,
            ),
            Preset::new(
                "Matrix",
                "Green code rain",
                GridSettings {
                    width: 50,
                    height: 30,
                    speed: 1.2,
                    density: 0.08,
                },
                ColorScheme::Matrix,
            ),
            Preset::new(
                "Embers",
                "Slow falling sparks",
                GridSettings {
                    speed: 0.3,
                    density: 0.03,
                    ..Default::default()
                },
                ColorScheme::Fire,
            ),
            Preset::new(
                "Abyss",
                "Slow monochrome trickle on a tall grid",
                GridSettings {
                    width: 30,
                    height: 50,
                    speed: 0.5,
                    density: 0.04,
                },
                ColorScheme::Mono,
            ),
        ];
    }

    /// Get the presets directory path
    fn presets_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rain-grid").join("presets"))
    }

    /// Load user presets from disk
    fn load_user_presets(&mut self) {
        if let Some(dir) = Self::presets_dir() {
            if dir.exists() {
                if let Ok(entries) = fs::read_dir(&dir) {
                    for entry in entries.flatten() {
                        if entry.path().extension().is_some_and(|e| e == "json") {
                            if let Ok(content) = fs::read_to_string(entry.path()) {
                                if let Ok(preset) = serde_json::from_str::<Preset>(&content) {
                                    self.user.push(preset);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Save a preset to disk
    #[allow(dead_code)]
    pub fn save_preset(&mut self, preset: Preset) -> Result<(), String> {
        let dir = Self::presets_dir().ok_or("Could not determine config directory")?;

        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create presets directory: {}", e))?;

        let filename = sanitize_name(&preset.name);
        let path = dir.join(format!("{}.json", filename));

        let json = serde_json::to_string_pretty(&preset)
            .map_err(|e| format!("Failed to serialize preset: {}", e))?;

        fs::write(&path, json).map_err(|e| format!("Failed to write preset file: {}", e))?;

        if !self.user.iter().any(|p| p.name == preset.name) {
            self.user.push(preset);
        }

        Ok(())
    }

    /// Delete a user preset
    #[allow(dead_code)]
    pub fn delete_preset(&mut self, name: &str) -> Result<(), String> {
        let dir = Self::presets_dir().ok_or("Could not determine config directory")?;

        if let Some(pos) = self.user.iter().position(|p| p.name == name) {
            self.user.remove(pos);
        }

        let path = dir.join(format!("{}.json", sanitize_name(name)));
        if path.exists() {
            fs::remove_file(&path).map_err(|e| format!("Failed to delete preset file: {}", e))?;
        }

        Ok(())
    }

    /// Get all presets (builtin + user)
    pub fn all_presets(&self) -> impl Iterator<Item = &Preset> {
        self.builtin.iter().chain(self.user.iter())
    }

    /// Find a preset by name
    pub fn find(&self, name: &str) -> Option<&Preset> {
        self.all_presets()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

#[allow(dead_code)]
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
