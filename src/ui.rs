use crate::app::{App, Focus};
use crate::color::Rgb;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 22;

/// Terminal columns per grid cell (two for roughly square cells)
const CELL_WIDTH: u16 = 2;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;
const BACKGROUND_COLOR: Color = Color::Black;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.fullscreen_mode {
        render_canvas(frame, area, app);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app);
        render_canvas(frame, layout[1], app);
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // Status
            Constraint::Length(7),  // Parameters
            Constraint::Min(10),    // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2], app);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Rain Grid ");

    let status_text = if app.clock.is_running() {
        "RUNNING"
    } else {
        "PAUSED"
    };
    let status_color = if app.clock.is_running() {
        BORDER_COLOR
    } else {
        HIGHLIGHT_COLOR
    };

    let mut content = vec![
        Line::from(Span::styled(
            format!("{} drops", app.simulation.len()),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(Span::styled(
            format!("tick {}", app.simulation.tick_count()),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
    ];

    if let Some(recorder) = &app.recorder {
        content.push(Line::from(Span::styled(
            format!("REC {} frames", recorder.frame_count()),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(message) = &app.status_message {
        content.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(DIM_TEXT_COLOR),
        )));
    }

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");

    let make_line = |label: &str, value: String, focused: bool| {
        let prefix = if focused { "> " } else { "  " };
        let style = if focused {
            Style::default().fg(HIGHLIGHT_COLOR)
        } else {
            Style::default().fg(TEXT_COLOR)
        };
        Line::from(Span::styled(format!("{}{}: {}", prefix, label, value), style))
    };

    // A pending typed value is shown in place of the committed one
    let dimension_value = |committed: u16, focus: Focus| {
        if app.focus == focus {
            if let Some(buffer) = &app.dimension_input {
                return format!("{}_", buffer);
            }
        }
        format!("{}", committed)
    };

    let content = vec![
        make_line(
            "Density",
            format!("{:.2}", app.settings.density),
            app.focus == Focus::Density,
        ),
        make_line(
            "Height",
            dimension_value(app.settings.height, Focus::Height),
            app.focus == Focus::Height,
        ),
        make_line(
            "Scheme",
            app.color_scheme.name().to_string(),
            app.focus == Focus::Scheme,
        ),
        make_line(
            "Speed",
            format!("{:.1}x", app.settings.speed),
            app.focus == Focus::Speed,
        ),
        make_line(
            "Width",
            dimension_value(app.settings.width, Focus::Width),
            app.focus == Focus::Width,
        ),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    // Helper to create a control line
    let make_control = |key: &str, desc: String| -> Line<'_> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let preset_keys = format!("1-{}", app.presets.builtin.len().min(9));

    let content = vec![
        make_control("Space", "pause/resume".to_string()),
        make_control("R", "reset".to_string()),
        make_control("H", "help".to_string()),
        make_control("Tab", "focus param".to_string()),
        make_control("↑/↓", "adjust param".to_string()),
        make_control("+/-", "speed".to_string()),
        make_control("[/]", "density".to_string()),
        make_control("C", format!("scheme: {}", app.color_scheme.name())),
        make_control(&preset_keys, "presets".to_string()),
        make_control("S", "png snapshot".to_string()),
        make_control("G", "record gif".to_string()),
        make_control("V", "fullscreen".to_string()),
        make_control("Q", "quit".to_string()),
    ];

    let block = styled_block(" Controls ");
    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block("");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Center the grid; crop what the terminal cannot fit
    let visible_cols = (inner.width / CELL_WIDTH).min(app.settings.width);
    let visible_rows = inner.height.min(app.settings.height);
    if visible_cols == 0 || visible_rows == 0 {
        return;
    }

    let x_offset = inner.x + (inner.width.saturating_sub(visible_cols * CELL_WIDTH)) / 2;
    let y_offset = inner.y + (inner.height.saturating_sub(visible_rows)) / 2;

    let mut lines = Vec::with_capacity(visible_rows as usize);
    for y in 0..visible_rows {
        let mut spans = Vec::with_capacity(visible_cols as usize);
        for x in 0..visible_cols {
            let style = match app.simulation.cell_color(x, y) {
                Some(Rgb(r, g, b)) => Style::default().bg(Color::Rgb(r, g, b)),
                None => Style::default().bg(BACKGROUND_COLOR),
            };
            spans.push(Span::styled("  ", style));
        }
        lines.push(Line::from(spans));
    }

    let grid_rect = Rect {
        x: x_offset,
        y: y_offset,
        width: visible_cols * CELL_WIDTH,
        height: visible_rows,
    };
    frame.render_widget(Paragraph::new(lines), grid_rect);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    // Calculate the canvas area (exclude sidebar unless fullscreen)
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    // Center the help dialog within the canvas
    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(30);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    // Clear the background
    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("RAIN GRID", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("Colored streaks fall down a cell grid. Each tick every drop descends one row; new drops appear at the top of each column with the configured probability."),
        Line::from(""),
        Line::from(Span::styled("PARAMETERS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Density: per-column spawn probability per tick (0-1)"),
        Line::from("Speed: tick-rate multiplier, 100ms base period (0.1-3.0)"),
        Line::from("Width/Height: grid size in cells (1-50)"),
        Line::from("Changing the grid never clears drops already falling."),
        Line::from(""),
        Line::from(Span::styled("EDITING:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Tab/Shift-Tab selects a parameter, Up/Down adjusts it. With Width or Height selected, type a number and press Enter to set it directly (bad input becomes 1, Esc cancels)."),
        Line::from(""),
        Line::from(Span::styled("PRESETS (1-8):", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("1=Default, 2=Drizzle, 3=Steady, 4=Downpour, 5=Monsoon, 6=Matrix, 7=Embers, 8=Abyss"),
        Line::from("Presets change the parameters, not the falling drops."),
        Line::from(""),
        Line::from(Span::styled("EXPORT:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("S writes a PNG of the grid. G starts a GIF recording (one frame per tick); press G again to finish and write the file."),
        Line::from(""),
        Line::from(Span::styled("BASIC CONTROLS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Space=Pause, R=Reset (clears drops, resumes play), C=Scheme, V=Fullscreen, +/-=Speed, [/]=Density, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let max_scroll = content_height.saturating_sub(visible_height);
    let is_scrollable = max_scroll > 0;

    // Update title to show scroll hint if scrollable
    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
