//! Result view: the computed mortality estimate.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::MortalityEstimate;
use crate::tui::styles::{Theme, APP_TITLE};

/// Result screen state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing computed since start or the last reset
    #[default]
    Idle,
    /// Computed estimate plus the values it was computed from
    Complete {
        estimate: MortalityEstimate,
        summary: String,
    },
}

/// Render the result screen
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_result_header(f, chunks[0]);
    match state {
        ResultState::Idle => render_idle(f, chunks[1]),
        ResultState::Complete { estimate, summary } => {
            render_estimate(f, chunks[1], estimate, summary)
        }
    }
    render_result_footer(f, chunks[2]);
}

fn render_result_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", Theme::text()),
        Span::styled(APP_TITLE, Theme::title()),
        Span::styled(" │ Estimated Mortality", Theme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No estimate yet",
            Theme::text_secondary(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Fill in the patient form and press Enter",
            Theme::text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    f.render_widget(content, area);
}

fn render_estimate(f: &mut Frame, area: Rect, estimate: &MortalityEstimate, summary: &str) {
    let block = Block::default()
        .title(Span::styled(" Probability of Mortality ", Theme::subtitle()))
        .borders(Borders::ALL)
        .border_style(Theme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Probability
            Constraint::Length(2), // Linear predictor + timestamp
            Constraint::Min(0),    // Input summary
        ])
        .margin(1)
        .split(inner);

    let percent = estimate.percent();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .gauge_style(Theme::info())
        .ratio(estimate.probability.clamp(0.0, 1.0))
        .label(format!("{percent:.4} %"));
    f.render_widget(gauge, chunks[0]);

    let detail = Paragraph::new(vec![Line::from(vec![
        Span::styled("Log-odds: ", Theme::text_secondary()),
        Span::styled(format!("{:.6}", estimate.linear_predictor), Theme::text()),
        Span::styled("   Computed: ", Theme::text_secondary()),
        Span::styled(
            estimate.computed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            Theme::success(),
        ),
    ])])
    .alignment(Alignment::Center);
    f.render_widget(detail, chunks[1]);

    let lines: Vec<Line> = summary
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Theme::text_muted())))
        .collect();
    let values = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Values used ", Theme::text_secondary()))
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );
    f.render_widget(values, chunks[2]);
}

fn render_result_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[Enter/Esc] ", Theme::key_hint()),
        Span::styled("Edit Values ", Theme::key_desc()),
        Span::styled("[R] ", Theme::key_hint()),
        Span::styled("Reset ", Theme::key_desc()),
        Span::styled("[Q] ", Theme::key_hint()),
        Span::styled("Quit", Theme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}
