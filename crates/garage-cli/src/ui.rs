use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use garage_core::actions::{ClickTarget, KeyInput};
use garage_core::format::ColorRole;
use garage_core::protocol::HostRequest;
use garage_core::registry::ThemeRegistry;
use garage_core::render::{GaugeView, PanelView, RowView};
use garage_exec::port::HostPort;
use garage_exec::session::GarageSession;

use crate::host::{DemoHost, HostOutcome};

const COMPACT_ROW_HEIGHT: u16 = 2;
const DETAIL_ROW_HEIGHT: u16 = 6;
const GAUGE_WIDTH: usize = 20;

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            crossterm::cursor::Show
        );
    }
}

pub fn run<P: HostPort>(
    session: &mut GarageSession<P>,
    requests: &Receiver<HostRequest>,
    host: &mut DemoHost,
) -> Result<HostOutcome, Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        crossterm::cursor::Hide
    )?;
    let _guard = TuiGuard; // Ensures terminal is restored on exit or panic

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, session, requests, host).map_err(|e| e.into())
}

fn run_app<B: Backend, P: HostPort>(
    terminal: &mut Terminal<B>,
    session: &mut GarageSession<P>,
    requests: &Receiver<HostRequest>,
    host: &mut DemoHost,
) -> io::Result<HostOutcome> {
    loop {
        if let Some(outcome) = host.drain(session, requests) {
            return Ok(outcome);
        }

        terminal.draw(|f| ui(f, session.view(), &session.state().theme))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c');
                if ctrl_c {
                    return Ok(HostOutcome::Interrupted);
                }
                let input = key_input(key.code);
                let quit = input == KeyInput::Other("q".to_string());
                // Unhandled keys belong to the page; here that means `q` quits.
                if session.handle_key(input) == garage_core::KeyDisposition::PassThrough && quit {
                    return Ok(HostOutcome::Interrupted);
                }
            }
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    let size = terminal.size()?;
                    let list = list_area(Rect::new(0, 0, size.width, size.height));
                    let slots = layout_rows(session.view(), list);
                    if let Some(target) = hit_test(&slots, mouse.column, mouse.row) {
                        session.click(target);
                    }
                }
            }
            _ => {}
        }
    }
}

pub fn key_input(code: KeyCode) -> KeyInput {
    match code {
        KeyCode::Esc => KeyInput::Escape,
        KeyCode::Down => KeyInput::ArrowDown,
        KeyCode::Up => KeyInput::ArrowUp,
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Char(c) => KeyInput::Other(c.to_string()),
        other => KeyInput::Other(format!("{other:?}")),
    }
}

#[derive(Clone, Copy)]
struct UiPalette {
    primary: Color,
    text: Color,
    muted: Color,
    border: Color,
    good: Color,
    warn: Color,
    bad: Color,
}

impl UiPalette {
    fn role(self, role: ColorRole) -> Color {
        match role {
            ColorRole::Good => self.good,
            ColorRole::Warn => self.warn,
            ColorRole::Bad => self.bad,
        }
    }
}

fn palette_for(theme: &ThemeRegistry) -> UiPalette {
    let pick = |key: &str, fallback: Color| parse_css_color(theme.get(key)).unwrap_or(fallback);
    UiPalette {
        primary: pick("primary", Color::Blue),
        text: pick("text", Color::White),
        muted: pick("muted", Color::DarkGray),
        border: pick("border", Color::Gray),
        good: pick("good", Color::Green),
        warn: pick("warn", Color::Yellow),
        bad: pick("bad", Color::Red),
    }
}

/// Accepts `#rgb` and `#rrggbb`; anything else is left to the fallback.
pub fn parse_css_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut parts = hex.chars().map(|c| channel(&format!("{c}{c}")));
            Some(Color::Rgb(parts.next()??, parts.next()??, parts.next()??))
        }
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

fn outer_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area)
}

pub fn list_area(area: Rect) -> Rect {
    let body = outer_chunks(area)[1];
    Block::default().borders(Borders::ALL).inner(body)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSlot {
    pub index: usize,
    pub rect: Rect,
    pub take: Option<Rect>,
    pub close: Option<Rect>,
}

fn row_height(row: &RowView) -> u16 {
    if row.detail.is_some() {
        DETAIL_ROW_HEIGHT
    } else {
        COMPACT_ROW_HEIGHT
    }
}

/// Places rows top-down, scrolled just enough to keep the selection visible.
pub fn layout_rows(view: &PanelView, area: Rect) -> Vec<RowSlot> {
    let selected = view.selected_row().map_or(0, |row| row.index);
    let mut start = 0;
    while start < selected {
        let needed: u16 = view.rows[start..=selected].iter().map(row_height).sum();
        if needed <= area.height {
            break;
        }
        start += 1;
    }

    let mut slots = Vec::new();
    let mut y = area.y;
    let bottom = area.y.saturating_add(area.height);
    for row in &view.rows[start.min(view.rows.len())..] {
        let height = row_height(row);
        if y.saturating_add(height) > bottom {
            break;
        }
        let rect = Rect::new(area.x, y, area.width, height);
        let (take, close) = match &row.detail {
            Some(detail) => {
                let action_y = y + height - 1;
                let take_w = (detail.take_label.chars().count() as u16).saturating_add(4);
                let close_w = (detail.close_label.chars().count() as u16).saturating_add(4);
                let take_x = area.x.saturating_add(2);
                let close_x = take_x.saturating_add(take_w).saturating_add(2);
                (
                    Some(Rect::new(take_x, action_y, take_w, 1).intersection(rect)),
                    Some(Rect::new(close_x, action_y, close_w, 1).intersection(rect)),
                )
            }
            None => (None, None),
        };
        slots.push(RowSlot {
            index: row.index,
            rect,
            take,
            close,
        });
        y += height;
    }
    slots
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Buttons are checked before the row so a button press never selects.
pub fn hit_test(slots: &[RowSlot], column: u16, row: u16) -> Option<ClickTarget> {
    let slot = slots.iter().find(|slot| contains(slot.rect, column, row))?;
    if slot.take.is_some_and(|r| contains(r, column, row)) {
        return Some(ClickTarget::Take { row: slot.index });
    }
    if slot.close.is_some_and(|r| contains(r, column, row)) {
        return Some(ClickTarget::Close { row: slot.index });
    }
    Some(ClickTarget::Row(slot.index))
}

fn ui(f: &mut ratatui::Frame, view: &PanelView, theme: &ThemeRegistry) {
    let palette = palette_for(theme);
    let chunks = outer_chunks(f.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            view.title.clone(),
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            view.subtitle.clone(),
            Style::default().fg(palette.muted),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(palette.border)));
    f.render_widget(header, chunks[0]);

    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    let list = list_block.inner(chunks[1]);
    f.render_widget(list_block, chunks[1]);

    if !view.visible {
        let idle = Paragraph::new("Waiting for the host to open the garage…")
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center);
        f.render_widget(idle, list);
    } else {
        for slot in layout_rows(view, list) {
            let row = &view.rows[slot.index];
            f.render_widget(Paragraph::new(row_lines(row, palette)), slot.rect);
        }
    }

    let hint = Paragraph::new(view.hint.clone()).style(Style::default().fg(palette.muted));
    f.render_widget(hint, chunks[2]);
}

fn row_lines(row: &RowView, palette: UiPalette) -> Vec<Line<'static>> {
    let marker = if row.selected { "▌" } else { " " };
    let name_style = if row.selected {
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };
    let badge_color = if row.stored { palette.good } else { palette.warn };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(marker.to_string(), Style::default().fg(palette.primary)),
            Span::raw(" "),
            Span::styled(row.name.clone(), name_style),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("[{}] ", row.plate), Style::default().fg(palette.muted)),
            Span::styled(row.badge.clone(), Style::default().fg(badge_color)),
        ]),
    ];

    if let Some(detail) = &row.detail {
        for gauge in &detail.gauges {
            lines.push(gauge_line(gauge, palette));
        }
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("[ {} ]", detail.take_label),
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[ {} ]", detail.close_label),
                Style::default().fg(palette.muted),
            ),
        ]));
    }
    lines
}

fn gauge_line(gauge: &GaugeView, palette: UiPalette) -> Line<'static> {
    let filled = usize::from(gauge.pct) * GAUGE_WIDTH / 100;
    let color = parse_css_color(&gauge.color).unwrap_or_else(|| palette.role(gauge.role));
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<12}", gauge.label), Style::default().fg(palette.muted)),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(GAUGE_WIDTH - filled),
            Style::default().fg(palette.border),
        ),
        Span::raw(" "),
        Span::styled(gauge.tag_label.clone(), Style::default().fg(color)),
    ])
}
