// UI rendering logic
use std::time::Instant;

use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use reporeel_core::{FeedStatus, Severity};

use crate::{card::card_lines, theme::Theme, App, InputMode};

pub const LOADING_TEXT: &str = "Loading amazing repositories...";
pub const END_TITLE: &str = "You've scrolled through all trending repos!";
pub const END_HINT: &str = "Try changing the filters above for more discoveries.";
pub const EMPTY_TEXT: &str = "No repositories found";

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = app.theme();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.foreground)),
        frame.area(),
    );

    let has_error = app.feed.error().is_some();
    let mut constraints = vec![
        Constraint::Length(3), // Header
        Constraint::Length(3), // Filter bar
    ];
    if has_error {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(5)); // Feed
    constraints.push(Constraint::Length(1)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    render_header(frame, app, &theme, chunks[0]);
    render_filter_bar(frame, app, &theme, chunks[1]);

    let (feed_area, status_area) = if has_error {
        render_error_banner(frame, app, &theme, chunks[2]);
        (chunks[3], chunks[4])
    } else {
        (chunks[2], chunks[3])
    };

    render_feed(frame, app, &theme, feed_area);
    render_status_bar(frame, app, &theme, status_area);
    render_toasts(frame, app, &theme, frame.area());
}

fn render_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(14)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "RepoReel",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Discover amazing repositories", Style::default().fg(theme.muted)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(title, header_chunks[0]);

    let icon = if app.dark_mode { "☾" } else { "☀" };
    let mode = Paragraph::new(Line::from(vec![
        Span::styled(icon, Style::default().fg(theme.stars)),
        Span::raw(" "),
        Span::styled(theme.name, Style::default().fg(theme.subtitle)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" t "),
    );
    frame.render_widget(mode, header_chunks[1]);
}

fn render_filter_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Search box
            Constraint::Percentage(25), // Language
            Constraint::Percentage(25), // Sort
        ])
        .split(area);

    let editing = app.input_mode == InputMode::Searching;
    let search_line = if editing {
        Line::from(vec![
            Span::styled(app.filter_bar.input().to_string(), Style::default().fg(theme.foreground)),
            Span::styled("█", Style::default().fg(theme.border_focused)),
        ])
    } else if app.filter_bar.input().is_empty() {
        Line::from(Span::styled(
            "Search repositories...",
            Style::default().fg(theme.muted),
        ))
    } else {
        Line::from(Span::styled(
            app.filter_bar.input().to_string(),
            Style::default().fg(theme.subtitle),
        ))
    };

    let search_border = if editing { theme.border_focused } else { theme.border };
    let search = Paragraph::new(search_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(search_border))
            .title(" Search (/) "),
    );
    frame.render_widget(search, chunks[0]);

    let language = Paragraph::new(Span::styled(
        app.filter_bar.language_label().to_string(),
        Style::default().fg(theme.foreground),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Language (l/L) "),
    );
    frame.render_widget(language, chunks[1]);

    let sort = Paragraph::new(Span::styled(
        app.filter_bar.sort().label(),
        Style::default().fg(theme.foreground),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Sort (s/S) "),
    );
    frame.render_widget(sort, chunks[2]);
}

fn render_error_banner(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let message = app.feed.error().unwrap_or_default();
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(message.to_string(), Style::default().fg(theme.error)),
        Span::styled("  (r: retry)", Style::default().fg(theme.muted)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error)),
    );
    frame.render_widget(banner, area);
}

fn feed_title(app: &App) -> String {
    let query = &app.feed.filters().query;
    if query.is_empty() {
        format!(" Trending · {} ({}) ", app.filter_bar.indicator(), app.feed.repos().len())
    } else {
        format!(
            " \"{}\" · {} ({}) ",
            query,
            app.filter_bar.indicator(),
            app.feed.repos().len()
        )
    }
}

fn render_feed(frame: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(feed_title(app));

    if app.feed.repos().is_empty() {
        let lines = match app.feed.status() {
            FeedStatus::Loading => vec![
                Line::from(""),
                Line::from(Span::styled(
                    LOADING_TEXT,
                    Style::default().fg(theme.info).add_modifier(Modifier::BOLD),
                )),
            ],
            FeedStatus::Exhausted => vec![
                Line::from(""),
                Line::from(Span::styled(
                    EMPTY_TEXT,
                    Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(END_HINT, Style::default().fg(theme.muted))),
            ],
            // Nothing to say yet, or the banner above already says it
            FeedStatus::Idle | FeedStatus::Error => Vec::new(),
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    // Borders plus the highlight symbol
    let card_width = area.width.saturating_sub(4);
    let now = Utc::now();

    let mut items: Vec<ListItem> = app
        .feed
        .repos()
        .iter()
        .map(|repo| ListItem::new(card_lines(repo, theme, now, card_width)))
        .collect();

    // Footer slot past the last card
    match app.feed.status() {
        FeedStatus::Loading => items.push(ListItem::new(vec![Line::from(Span::styled(
            LOADING_TEXT,
            Style::default().fg(theme.info),
        ))
        .centered()])),
        FeedStatus::Exhausted => items.push(ListItem::new(vec![
            Line::from(Span::styled(
                END_TITLE,
                Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(END_HINT, Style::default().fg(theme.muted))).centered(),
        ])),
        FeedStatus::Idle | FeedStatus::Error => {}
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.selected_bg))
        .highlight_symbol("▌ ");

    // Use stateful rendering for proper scrolling
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let status = match app.input_mode {
        InputMode::Searching => Span::styled(
            "SEARCH | type to edit | ENTER: search | Ctrl+U: clear | ESC: cancel",
            Style::default().fg(theme.stars),
        ),
        InputMode::Normal => Span::styled(
            "j/k: scroll | /: search | c: clear search | l/s: language/sort | f: star | ENTER: open | t: theme | q: quit",
            Style::default().fg(theme.muted),
        ),
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

fn render_toasts(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width - width;

    for (i, toast) in app.toasts.visible(Instant::now()).iter().enumerate() {
        let y = area.y + 1 + i as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);

        let accent = match toast.severity {
            Severity::Info => theme.info,
            Severity::Error => theme.error,
        };
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                toast.title.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                toast.description.clone(),
                Style::default().fg(theme.subtitle),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .style(Style::default().bg(theme.background)),
        );

        frame.render_widget(Clear, rect);
        frame.render_widget(body, rect);
    }
}
