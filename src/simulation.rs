use crate::color::{ColorScheme, GradientColor, Rgb};
use crate::settings::GridSettings;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MIN_DROP_LENGTH: u16 = 6;
const MAX_DROP_LENGTH: u16 = 8;

/// One falling rain streak.
///
/// `y` is the row of the topmost edge; the body covers rows `[y, y + length)`.
/// A drop is staged above the visible grid at spawn (`y = 1 - length`) so the
/// body enters one row per tick, and it survives until the full body has
/// scrolled past the bottom edge (`y < height + length`). `x`, `length` and
/// `color` are fixed for the drop's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct RainDrop {
    pub x: u16,
    pub y: i32,
    pub length: u16,
    pub color: GradientColor,
}

impl RainDrop {
    /// Whether this drop covers the cell at `(x, y)`.
    pub fn covers(&self, x: u16, y: u16) -> bool {
        self.x == x && (y as i32) >= self.y && (y as i32) < self.y + self.length as i32
    }
}

/// The drop field: the authoritative set of active drops.
pub struct RainSimulation {
    drops: Vec<RainDrop>,
    ticks: u64,
    rng: StdRng,
}

impl RainSimulation {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic field for a fixed seed: identical seeds, settings and
    /// schemes produce identical tick sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            drops: Vec::new(),
            ticks: 0,
            rng,
        }
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Advance the field by one tick: move, cull, spawn.
    ///
    /// Every drop descends one row; drops whose full body has left the grid are
    /// discarded; then each column spawns a new drop with probability
    /// `density`, unless a drop in that column is still staged above row 0.
    pub fn tick(&mut self, settings: &GridSettings, scheme: ColorScheme) {
        for drop in &mut self.drops {
            drop.y += 1;
        }

        let height = settings.height as i32;
        self.drops.retain(|d| d.y < height + d.length as i32);

        for x in 0..settings.width {
            if self.rng.gen::<f32>() < settings.density && !self.column_staged(x) {
                let drop = self.make_drop(x, scheme);
                self.drops.push(drop);
            }
        }

        self.ticks += 1;
    }

    /// A column is closed to spawning while a drop there is still entering.
    fn column_staged(&self, x: u16) -> bool {
        self.drops.iter().any(|d| d.x == x && d.y < 0)
    }

    fn make_drop(&mut self, x: u16, scheme: ColorScheme) -> RainDrop {
        let length = self.rng.gen_range(MIN_DROP_LENGTH..=MAX_DROP_LENGTH);
        RainDrop {
            x,
            y: 1 - length as i32,
            length,
            color: scheme.pick_gradient(&mut self.rng),
        }
    }

    /// Color of the cell at `(x, y)`, or `None` if no drop covers it.
    ///
    /// The gradient runs from the drop's top row to its bottom row.
    pub fn cell_color(&self, x: u16, y: u16) -> Option<Rgb> {
        self.drops.iter().find_map(|d| {
            if !d.covers(x, y) {
                return None;
            }
            let offset = y as i32 - d.y;
            let t = if d.length <= 1 {
                0.0
            } else {
                offset as f32 / (d.length - 1) as f32
            };
            Some(d.color.at(t))
        })
    }

    /// Destroy all drops immediately.
    pub fn reset(&mut self) {
        self.drops.clear();
        self.ticks = 0;
    }
}

impl Default for RainSimulation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(width: u16, height: u16, density: f32) -> GridSettings {
        GridSettings {
            width,
            height,
            speed: 1.0,
            density,
        }
    }

    #[test]
    fn zero_density_never_spawns() {
        let mut sim = RainSimulation::with_seed(1);
        let settings = settings(10, 10, 0.0);
        for _ in 0..100 {
            sim.tick(&settings, ColorScheme::Rainbow);
        }
        assert!(sim.is_empty());
        assert_eq!(sim.tick_count(), 100);
    }

    #[test]
    fn full_density_spawns_one_drop_per_column() {
        let mut sim = RainSimulation::with_seed(2);
        sim.tick(&settings(3, 10, 1.0), ColorScheme::Rainbow);

        assert_eq!(sim.len(), 3);
        let mut columns: Vec<u16> = sim.drops().iter().map(|d| d.x).collect();
        columns.sort_unstable();
        assert_eq!(columns, vec![0, 1, 2]);
        for drop in sim.drops() {
            // Staged so the bottom row of the body sits on the top row
            assert_eq!(drop.y, 1 - drop.length as i32);
            assert!(drop.covers(drop.x, 0));
        }
    }

    #[test]
    fn spawn_count_never_exceeds_width() {
        let mut sim = RainSimulation::with_seed(3);
        let settings = settings(5, 40, 1.0);
        // No culls happen this early, so the length delta is the spawn count.
        for _ in 0..10 {
            let before = sim.len();
            sim.tick(&settings, ColorScheme::Rainbow);
            assert!(sim.len() - before <= settings.width as usize);
        }
    }

    #[test]
    fn drops_descend_one_row_per_tick_with_fields_unchanged() {
        let mut sim = RainSimulation::with_seed(4);
        let mut config = settings(4, 30, 1.0);
        sim.tick(&config, ColorScheme::Rainbow);
        let before: Vec<RainDrop> = sim.drops().to_vec();

        config.density = 0.0;
        sim.tick(&config, ColorScheme::Rainbow);

        assert_eq!(sim.len(), before.len());
        for old in &before {
            let moved = sim
                .drops()
                .iter()
                .find(|d| d.x == old.x)
                .expect("drop survived the tick");
            assert_eq!(moved.y, old.y + 1);
            assert_eq!(moved.length, old.length);
            assert_eq!(moved.color, old.color);
        }
    }

    #[test]
    fn drop_survives_until_full_body_leaves_the_grid() {
        let mut sim = RainSimulation::with_seed(5);
        let mut config = settings(1, 3, 1.0);
        sim.tick(&config, ColorScheme::Rainbow);
        let drop = sim.drops()[0].clone();
        config.density = 0.0;

        // From y = 1 - length, the drop reaches y = height + length - 1 (its
        // last retained row) after height + 2*length - 2 more ticks.
        let last_tick = (config.height as i32 + 2 * drop.length as i32 - 2) as u64;
        for elapsed in 1..=last_tick {
            sim.tick(&config, ColorScheme::Rainbow);
            assert_eq!(sim.len(), 1, "culled early at tick {elapsed}");
            let current = &sim.drops()[0];
            assert!(current.y < config.height as i32 + current.length as i32);
        }

        sim.tick(&config, ColorScheme::Rainbow);
        assert!(sim.is_empty());
    }

    #[test]
    fn no_second_spawn_while_column_is_staged() {
        let mut sim = RainSimulation::with_seed(6);
        let config = settings(1, 20, 1.0);
        sim.tick(&config, ColorScheme::Rainbow);
        assert_eq!(sim.len(), 1);
        let length = sim.drops()[0].length;

        // The first drop's top edge stays above row 0 for length - 2 further
        // ticks; the column must stay closed the whole time.
        for _ in 0..length - 2 {
            sim.tick(&config, ColorScheme::Rainbow);
            assert_eq!(sim.len(), 1);
        }

        // Top edge reaches row 0: the column reopens.
        sim.tick(&config, ColorScheme::Rainbow);
        assert_eq!(sim.len(), 2);
    }

    #[test]
    fn identical_seeds_produce_identical_fields() {
        let mut a = RainSimulation::with_seed(42);
        let mut b = RainSimulation::with_seed(42);
        let config = settings(12, 15, 0.3);
        for _ in 0..50 {
            a.tick(&config, ColorScheme::Ocean);
            b.tick(&config, ColorScheme::Ocean);
            assert_eq!(a.drops(), b.drops());
        }
    }

    #[test]
    fn reset_destroys_all_drops() {
        let mut sim = RainSimulation::with_seed(8);
        let config = settings(10, 10, 1.0);
        for _ in 0..5 {
            sim.tick(&config, ColorScheme::Rainbow);
        }
        assert!(!sim.is_empty());
        sim.reset();
        assert!(sim.is_empty());
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn spawned_columns_stay_within_width() {
        let mut sim = RainSimulation::with_seed(9);
        let config = settings(7, 10, 1.0);
        for _ in 0..20 {
            sim.tick(&config, ColorScheme::Rainbow);
            assert!(sim.drops().iter().all(|d| d.x < config.width));
        }
    }

    #[test]
    fn field_stays_bounded_below_the_grid() {
        let mut sim = RainSimulation::with_seed(10);
        let config = settings(20, 8, 1.0);
        for _ in 0..200 {
            sim.tick(&config, ColorScheme::Rainbow);
            for drop in sim.drops() {
                assert!(drop.y < config.height as i32 + drop.length as i32);
                assert!(drop.length >= 1);
            }
        }
    }

    #[test]
    fn shrinking_the_grid_keeps_existing_drops() {
        let mut sim = RainSimulation::with_seed(11);
        let mut config = settings(10, 30, 1.0);
        sim.tick(&config, ColorScheme::Rainbow);
        assert_eq!(sim.len(), 10);

        // Narrow the grid mid-flight: out-of-range columns keep descending
        // until culled; only spawning observes the new width.
        config.width = 3;
        config.density = 0.0;
        sim.tick(&config, ColorScheme::Rainbow);
        assert_eq!(sim.len(), 10);
        assert!(sim.drops().iter().any(|d| d.x >= 3));
    }

    #[test]
    fn cell_color_interpolates_along_the_body() {
        let mut sim = RainSimulation::with_seed(12);
        let mut config = settings(1, 20, 1.0);
        sim.tick(&config, ColorScheme::Rainbow);
        let drop = sim.drops()[0].clone();
        config.density = 0.0;

        // Advance until the whole body is on the grid.
        for _ in 0..drop.length as i32 - 1 {
            sim.tick(&config, ColorScheme::Rainbow);
        }
        let top_row = sim.drops()[0].y as u16;
        let bottom_row = top_row + drop.length - 1;
        assert_eq!(sim.cell_color(0, top_row), Some(drop.color.top));
        assert_eq!(sim.cell_color(0, bottom_row), Some(drop.color.bottom));
        assert_eq!(sim.cell_color(0, bottom_row + 1), None);
    }
}
