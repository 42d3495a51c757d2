use serde::{Deserialize, Serialize};

pub const MIN_DIMENSION: u16 = 1;
pub const MAX_DIMENSION: u16 = 50;
pub const MIN_SPEED: f32 = 0.1;
pub const MAX_SPEED: f32 = 3.0;
pub const MIN_DENSITY: f32 = 0.0;
pub const MAX_DENSITY: f32 = 1.0;

/// Grid configuration: everything the user can adjust while the rain falls.
///
/// Changing any field never invalidates drops already in flight; the next tick's
/// cull and spawn logic simply observes the new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Grid width in cells (1-50)
    pub width: u16,
    /// Grid height in cells (1-50)
    pub height: u16,
    /// Tick-rate multiplier (0.1-3.0)
    pub speed: f32,
    /// Per-column, per-tick spawn probability (0.0-1.0)
    pub density: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            width: 40,
            height: 25,
            speed: 1.4,
            density: 0.01,
        }
    }
}

impl GridSettings {
    pub fn set_width(&mut self, width: u16) {
        self.width = width.clamp(MIN_DIMENSION, MAX_DIMENSION);
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height.clamp(MIN_DIMENSION, MAX_DIMENSION);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn set_density(&mut self, density: f32) {
        self.density = density.clamp(MIN_DENSITY, MAX_DENSITY);
    }

    /// Adjust width within bounds
    pub fn adjust_width(&mut self, delta: i32) {
        let new_val = (self.width as i32 + delta).clamp(MIN_DIMENSION as i32, MAX_DIMENSION as i32);
        self.width = new_val as u16;
    }

    /// Adjust height within bounds
    pub fn adjust_height(&mut self, delta: i32) {
        let new_val =
            (self.height as i32 + delta).clamp(MIN_DIMENSION as i32, MAX_DIMENSION as i32);
        self.height = new_val as u16;
    }

    /// Adjust speed within bounds
    pub fn adjust_speed(&mut self, delta: f32) {
        self.speed = (self.speed + delta).clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Adjust density within bounds
    pub fn adjust_density(&mut self, delta: f32) {
        self.density = (self.density + delta).clamp(MIN_DENSITY, MAX_DENSITY);
    }

    /// Parse a typed width/height value; unparsable input falls back to 1.
    pub fn parse_dimension(input: &str) -> u16 {
        input
            .trim()
            .parse::<u16>()
            .unwrap_or(MIN_DIMENSION)
            .clamp(MIN_DIMENSION, MAX_DIMENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_clamp_to_bounds() {
        let mut settings = GridSettings::default();
        settings.set_width(0);
        assert_eq!(settings.width, MIN_DIMENSION);
        settings.set_width(200);
        assert_eq!(settings.width, MAX_DIMENSION);
        settings.set_height(0);
        assert_eq!(settings.height, MIN_DIMENSION);
        settings.set_height(51);
        assert_eq!(settings.height, MAX_DIMENSION);
    }

    #[test]
    fn speed_and_density_clamp_to_bounds() {
        let mut settings = GridSettings::default();
        settings.set_speed(0.0);
        assert_eq!(settings.speed, MIN_SPEED);
        settings.set_speed(10.0);
        assert_eq!(settings.speed, MAX_SPEED);
        settings.set_density(-0.5);
        assert_eq!(settings.density, MIN_DENSITY);
        settings.set_density(2.0);
        assert_eq!(settings.density, MAX_DENSITY);
    }

    #[test]
    fn adjusters_saturate_at_bounds() {
        let mut settings = GridSettings::default();
        settings.adjust_width(1000);
        assert_eq!(settings.width, MAX_DIMENSION);
        settings.adjust_width(-1000);
        assert_eq!(settings.width, MIN_DIMENSION);
        settings.adjust_speed(100.0);
        assert_eq!(settings.speed, MAX_SPEED);
        settings.adjust_density(-1.0);
        assert_eq!(settings.density, MIN_DENSITY);
    }

    #[test]
    fn unparsable_dimension_falls_back_to_one() {
        assert_eq!(GridSettings::parse_dimension("abc"), 1);
        assert_eq!(GridSettings::parse_dimension(""), 1);
        assert_eq!(GridSettings::parse_dimension("-3"), 1);
        assert_eq!(GridSettings::parse_dimension("25"), 25);
        assert_eq!(GridSettings::parse_dimension(" 12 "), 12);
        assert_eq!(GridSettings::parse_dimension("200"), MAX_DIMENSION);
        assert_eq!(GridSettings::parse_dimension("0"), MIN_DIMENSION);
    }
}
