use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ws_core::config::{ScopeConfig, Slope};
use ws_core::frame::FrameBuffer;

use crate::canvas;
use crate::fps::FpsCounter;

/// Application state enum (mirrored for rendering decisions).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderState {
    /// Normal running state, activation traces on screen.
    Running,
    /// Weight matrix view.
    Weights,
    /// Help overlay visible.
    Help,
}

/// Draw the full UI: canvas + status bar, plus the help overlay on top.
pub fn draw(
    frame: &mut Frame,
    fb: &FrameBuffer,
    config: &ScopeConfig,
    fps_counter: &FpsCounter,
    state: &RenderState,
    triggered: bool,
) {
    let area = frame.area();

    // Vertical split: [canvas | status(1)]
    let chunks = Layout::vertical([Constraint::Min(4), Constraint::Length(1)]).split(area);

    canvas::render_frame(frame.buffer_mut(), chunks[0], fb);
    draw_status(frame, chunks[1], config, fps_counter, state, triggered);

    if *state == RenderState::Help {
        draw_help_overlay(frame, area);
    }
}

/// One-line status bar: gains, trigger level/slope/armed state, fps.
fn draw_status(
    frame: &mut Frame,
    area: Rect,
    config: &ScopeConfig,
    fps_counter: &FpsCounter,
    state: &RenderState,
    triggered: bool,
) {
    let dim = Style::default().fg(Color::DarkGray);
    let slope = match config.slope {
        Slope::Rising => "/",
        Slope::Falling => "\\",
    };
    let trig_span = if triggered {
        Span::styled("TRIG", Style::default().fg(Color::Green))
    } else {
        Span::styled("----", dim)
    };
    let view = match state {
        RenderState::Weights => " [weights]",
        _ => "",
    };

    let line = Line::from(vec![
        Span::styled(" wavescope", Style::default().fg(Color::Cyan)),
        Span::raw(format!("{view}  ")),
        Span::raw(format!(
            "in ×{:.2}  out ×{:.2}  ",
            config.input_gain, config.output_gain
        )),
        Span::raw(format!("trig {:+.3} {slope}  ", config.trigger_level)),
        trig_span,
        Span::styled(format!("  {:.0} fps  ", fps_counter.fps()), dim),
        Span::styled("? help  q quit", dim),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Centered key-binding overlay, shown while `?` is toggled on.
fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let lines = [
        "=   increase input gain",
        "'   decrease input gain",
        "]   increase output gain",
        "[   decrease output gain",
        "-   raise trigger level",
        "p   lower trigger level",
        "s   flip trigger slope",
        "w   toggle weights view",
        "?   toggle this help",
        "q   quit",
    ];

    let w = 34u16.min(area.width);
    let h = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    };

    let text: Vec<Line> = lines.iter().map(|l| Line::from(*l)).collect();
    let block = Block::default()
        .title(" keys ")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).block(block), popup);
}
