mod app;
mod clock;
mod color;
mod config;
mod export;
mod presets;
mod settings;
mod simulation;
mod ui;

use app::{App, Focus};
use clap::Parser;
use color::ColorScheme;
use config::AppConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::GridSettings;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "rain-grid")]
#[command(about = "Falling rain animation on a color cell grid in the terminal")]
struct Args {
    /// Grid width in cells (1-50)
    #[arg(short = 'W', long, default_value = "40")]
    width: u16,

    /// Grid height in cells (1-50)
    #[arg(short = 'H', long, default_value = "25")]
    height: u16,

    /// Tick-rate multiplier (0.1-3.0); the base tick period is 100ms
    #[arg(short, long, default_value = "1.4")]
    speed: f32,

    /// Per-column spawn probability per tick (0.0-1.0)
    #[arg(short, long, default_value = "0.01")]
    density: f32,

    /// Color scheme (rainbow, matrix, fire, ocean, neon, mono)
    #[arg(long, default_value = "rainbow")]
    scheme: String,

    /// Start from a named preset (overrides the size/speed/density flags)
    #[arg(long)]
    preset: Option<String>,

    /// Load settings from a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with the simulation paused
    #[arg(long, default_value = "false")]
    paused: bool,
}

fn parse_scheme(s: &str) -> ColorScheme {
    match s.to_lowercase().as_str() {
        "matrix" | "green" => ColorScheme::Matrix,
        "fire" | "embers" => ColorScheme::Fire,
        "ocean" | "blue" => ColorScheme::Ocean,
        "neon" => ColorScheme::Neon,
        "mono" | "gray" | "grey" => ColorScheme::Mono,
        _ => ColorScheme::Rainbow,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Flags first, then an optional config file, then an optional preset
    let mut settings = GridSettings::default();
    settings.set_width(args.width);
    settings.set_height(args.height);
    settings.set_speed(args.speed);
    settings.set_density(args.density);
    let mut scheme = parse_scheme(&args.scheme);
    let mut start_paused = args.paused;

    if let Some(path) = &args.config {
        let config = AppConfig::load_from_file(path)?;
        // Values from an edited file get the same clamping as flags
        settings.set_width(config.settings.width);
        settings.set_height(config.settings.height);
        settings.set_speed(config.settings.speed);
        settings.set_density(config.settings.density);
        scheme = config.color_scheme;
        start_paused = start_paused || config.start_paused;
    }

    let mut app = App::new(settings, scheme);

    if let Some(name) = &args.preset {
        match app.presets.find(name).cloned() {
            Some(preset) => app.apply_preset(&preset),
            None => return Err(format!("Unknown preset: {}", name).into()),
        }
    }

    if start_paused {
        app.toggle_pause();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Block until the next tick deadline or a key event
        let timeout = app.clock.timeout(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process Press events
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Handle Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    app.finish_recording();
                    return Ok(());
                }

                // === Typed width/height entry takes the keys first ===
                if app.focus.is_dimension() {
                    match key.code {
                        KeyCode::Char(c) if c.is_ascii_digit() => {
                            app.push_dimension_digit(c);
                            continue;
                        }
                        KeyCode::Backspace => {
                            app.pop_dimension_digit();
                            continue;
                        }
                        KeyCode::Enter if app.is_editing_dimension() => {
                            app.commit_dimension_input();
                            continue;
                        }
                        KeyCode::Esc if app.is_editing_dimension() => {
                            app.cancel_dimension_input();
                            continue;
                        }
                        _ => {}
                    }
                }

                // === Process normal key events ===
                match key.code {
                    // System controls
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        app.finish_recording();
                        return Ok(());
                    }
                    KeyCode::Char(' ') => app.toggle_pause(),
                    KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),
                    KeyCode::Char('v') | KeyCode::Char('V') => app.toggle_fullscreen(),
                    KeyCode::Char('h') | KeyCode::Char('H') => app.toggle_help(),
                    KeyCode::Char('c') | KeyCode::Char('C') => {
                        app.cycle_scheme();
                        app.focus = Focus::Scheme;
                    }
                    KeyCode::Char('s') | KeyCode::Char('S') => app.snapshot(),
                    KeyCode::Char('g') | KeyCode::Char('G') => app.toggle_recording(),
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        app.adjust_speed(0.1);
                        app.focus = Focus::Speed;
                    }
                    KeyCode::Char('-') | KeyCode::Char('_') => {
                        app.adjust_speed(-0.1);
                        app.focus = Focus::Speed;
                    }
                    KeyCode::Char('[') => {
                        app.adjust_density(-0.01);
                        app.focus = Focus::Density;
                    }
                    KeyCode::Char(']') => {
                        app.adjust_density(0.01);
                        app.focus = Focus::Density;
                    }
                    KeyCode::Char(c @ '1'..='9') => {
                        let index = c as usize - '1' as usize;
                        app.apply_preset_index(index);
                    }

                    // Navigation
                    KeyCode::Tab => app.next_focus(),
                    KeyCode::BackTab => app.prev_focus(),
                    KeyCode::Up => {
                        if !app.show_help && app.focus.is_param() {
                            app.adjust_focused_up();
                        }
                    }
                    KeyCode::Down => {
                        if !app.show_help && app.focus.is_param() {
                            app.adjust_focused_down();
                        }
                    }
                    KeyCode::Esc => {
                        if app.show_help {
                            app.toggle_help();
                        } else if app.focus.is_param() {
                            app.focus = Focus::Controls;
                        }
                    }
                    KeyCode::Char('j') | KeyCode::Char('J') => {
                        if app.show_help {
                            app.scroll_help_down(ui::HELP_CONTENT_LINES);
                        }
                    }
                    KeyCode::Char('k') | KeyCode::Char('K') => {
                        if app.show_help {
                            app.scroll_help_up();
                        }
                    }
                    _ => {}
                }
            }
        }

        // Run simulation tick if the clock deadline is due
        app.tick(Instant::now());
    }
}
