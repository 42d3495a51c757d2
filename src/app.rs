use crate::clock::TickClock;
use crate::color::ColorScheme;
use crate::export::{self, GifRecorder};
use crate::presets::{Preset, PresetManager};
use crate::settings::GridSettings;
use crate::simulation::RainSimulation;
use std::path::PathBuf;
use std::time::Instant;

/// Focus state for parameter editing in the sidebar
/// Alphabetically ordered for consistent UI display
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    None,
    // Alphabetical order
    Density,
    Height,
    Scheme,
    Speed,
    Width,
    // Controls box (not a param)
    Controls,
}

impl Focus {
    /// Tab cycles through parameters in alphabetical order
    pub fn next(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Density,
            Focus::Density => Focus::Height,
            Focus::Height => Focus::Scheme,
            Focus::Scheme => Focus::Speed,
            Focus::Speed => Focus::Width,
            Focus::Width => Focus::Density, // Loop back
        }
    }

    /// Shift+Tab cycles through parameters in reverse order
    pub fn prev(&self) -> Focus {
        match self {
            Focus::None | Focus::Controls => Focus::Width,
            Focus::Density => Focus::Width, // Loop back
            Focus::Height => Focus::Density,
            Focus::Scheme => Focus::Height,
            Focus::Speed => Focus::Scheme,
            Focus::Width => Focus::Speed,
        }
    }

    /// Check if focus is on a parameter (not Controls or None)
    pub fn is_param(&self) -> bool {
        !matches!(self, Focus::None | Focus::Controls)
    }

    /// Width and height accept typed numeric entry
    pub fn is_dimension(&self) -> bool {
        matches!(self, Focus::Width | Focus::Height)
    }
}

/// Main application state
pub struct App {
    pub simulation: RainSimulation,
    pub settings: GridSettings,
    pub clock: TickClock,
    pub color_scheme: ColorScheme,
    pub presets: PresetManager,
    pub focus: Focus,
    pub fullscreen_mode: bool,
    pub show_help: bool,
    pub help_scroll: u16,
    /// Digits typed so far while editing width/height; None when not editing
    pub dimension_input: Option<String>,
    pub recorder: Option<GifRecorder>,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(settings: GridSettings, color_scheme: ColorScheme) -> Self {
        let clock = TickClock::new(settings.speed);
        Self {
            simulation: RainSimulation::new(),
            settings,
            clock,
            color_scheme,
            presets: PresetManager::new(),
            focus: Focus::Controls,
            fullscreen_mode: false,
            show_help: false,
            help_scroll: 0,
            dimension_input: None,
            recorder: None,
            status_message: None,
        }
    }

    /// Advance the field if a clock deadline is due; at most one step per call.
    pub fn tick(&mut self, now: Instant) {
        if !self.clock.tick_ready(now) {
            return;
        }
        self.simulation.tick(&self.settings, self.color_scheme);
        if let Some(recorder) = &mut self.recorder {
            recorder.capture(&self.simulation, &self.settings);
        }
        if self.recorder.as_ref().is_some_and(|r| r.is_full()) {
            self.finish_recording();
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.clock.toggle();
    }

    /// Clear the field and resume play, even if paused
    pub fn reset(&mut self) {
        self.simulation.reset();
        self.clock.restart();
    }

    pub fn adjust_speed(&mut self, delta: f32) {
        self.settings.adjust_speed(delta);
        self.clock.set_speed(self.settings.speed);
    }

    pub fn adjust_density(&mut self, delta: f32) {
        self.settings.adjust_density(delta);
    }

    pub fn adjust_width(&mut self, delta: i32) {
        self.settings.adjust_width(delta);
    }

    pub fn adjust_height(&mut self, delta: i32) {
        self.settings.adjust_height(delta);
    }

    /// Cycle color scheme; in-flight drops keep their colors
    pub fn cycle_scheme(&mut self) {
        self.color_scheme = self.color_scheme.next();
    }

    pub fn cycle_scheme_prev(&mut self) {
        self.color_scheme = self.color_scheme.prev();
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_up(&mut self) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::Density => self.adjust_density(0.01),
            Focus::Height => self.adjust_height(1),
            Focus::Scheme => self.cycle_scheme(),
            Focus::Speed => self.adjust_speed(0.1),
            Focus::Width => self.adjust_width(1),
        }
    }

    /// Handle adjusting the currently focused parameter
    pub fn adjust_focused_down(&mut self) {
        match self.focus {
            Focus::None | Focus::Controls => {}
            Focus::Density => self.adjust_density(-0.01),
            Focus::Height => self.adjust_height(-1),
            Focus::Scheme => self.cycle_scheme_prev(),
            Focus::Speed => self.adjust_speed(-0.1),
            Focus::Width => self.adjust_width(-1),
        }
    }

    /// Cycle to next focus
    pub fn next_focus(&mut self) {
        self.dimension_input = None;
        self.focus = self.focus.next();
    }

    /// Navigate to previous parameter (Shift+Tab)
    pub fn prev_focus(&mut self) {
        self.dimension_input = None;
        self.focus = self.focus.prev();
    }

    // === Dimension text entry ===

    pub fn is_editing_dimension(&self) -> bool {
        self.dimension_input.is_some()
    }

    /// Append a typed digit to the pending width/height value
    pub fn push_dimension_digit(&mut self, c: char) {
        if !self.focus.is_dimension() {
            return;
        }
        let buffer = self.dimension_input.get_or_insert_with(String::new);
        if buffer.len() < 3 {
            buffer.push(c);
        }
    }

    pub fn pop_dimension_digit(&mut self) {
        if let Some(buffer) = &mut self.dimension_input {
            buffer.pop();
        }
    }

    /// Apply the typed value; unparsable input falls back to 1
    pub fn commit_dimension_input(&mut self) {
        let Some(buffer) = self.dimension_input.take() else {
            return;
        };
        let value = GridSettings::parse_dimension(&buffer);
        match self.focus {
            Focus::Width => self.settings.set_width(value),
            Focus::Height => self.settings.set_height(value),
            _ => {}
        }
    }

    pub fn cancel_dimension_input(&mut self) {
        self.dimension_input = None;
    }

    // === Presets ===

    /// Apply a builtin preset by number-key index
    pub fn apply_preset_index(&mut self, index: usize) {
        if let Some(preset) = self.presets.builtin.get(index).cloned() {
            self.apply_preset(&preset);
        }
    }

    /// Reconfigure from a preset; the field itself is left untouched
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.settings = preset.settings.clone();
        self.color_scheme = preset.color_scheme;
        self.clock.set_speed(self.settings.speed);
        self.status_message = Some(format!("preset: {}", preset.name));
    }

    // === Export ===

    /// Write a PNG snapshot of the current grid
    pub fn snapshot(&mut self) {
        let path = PathBuf::from(format!("rain-grid-{}.png", export::timestamp()));
        self.status_message = Some(match export::save_png(&self.simulation, &self.settings, &path) {
            Ok(()) => format!("saved {}", path.display()),
            Err(e) => e,
        });
    }

    /// Arm the GIF recorder, or finish and write the file if already armed
    pub fn toggle_recording(&mut self) {
        if self.recorder.is_some() {
            self.finish_recording();
        } else {
            self.recorder = Some(GifRecorder::new(&self.settings, self.clock.period()));
            self.status_message = Some("recording...".to_string());
        }
    }

    pub fn finish_recording(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let path = PathBuf::from(format!("rain-grid-{}.gif", export::timestamp()));
        self.status_message = Some(match recorder.finish(&path) {
            Ok(frames) => format!("saved {} ({} frames)", path.display(), frames),
            Err(e) => e,
        });
    }

    // === UI toggles ===

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen_mode = !self.fullscreen_mode;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn scroll_help_down(&mut self, max_scroll: u16) {
        self.help_scroll = (self.help_scroll + 1).min(max_scroll);
    }
}
