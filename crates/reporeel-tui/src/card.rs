// Repository card: the lines one feed entry renders as
use chrono::{DateTime, Utc};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use reporeel_core::{format_number, format_relative_date, language_color, models::Owner, Repository};

use crate::theme::{hex_color, Theme};

pub const MAX_TOPICS: usize = 6;

/// Shown instead of the owner's initial when there's no usable avatar
pub const AVATAR_PLACEHOLDER: &str = "</>";

/// First topics to show, plus how many were left out
pub fn topic_chips(topics: &[String]) -> (&[String], usize) {
    let shown = topics.len().min(MAX_TOPICS);
    (&topics[..shown], topics.len() - shown)
}

/// Stand-in for the avatar image: the owner's initial, or a placeholder
/// glyph if the avatar URL is unusable
pub fn avatar_glyph(owner: &Owner) -> String {
    let usable = owner.avatar_url.starts_with("http://") || owner.avatar_url.starts_with("https://");
    match owner.login.chars().next() {
        Some(initial) if usable => initial.to_uppercase().collect(),
        _ => AVATAR_PLACEHOLDER.to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}

/// Render `repo` as card lines for a list that is `width` columns wide
pub fn card_lines(repo: &Repository, theme: &Theme, now: DateTime<Utc>, width: u16) -> Vec<Line<'static>> {
    let text_width = (width as usize).saturating_sub(6).max(10);
    let mut lines = Vec::with_capacity(8);

    // Owner row with the like toggle on the right
    let heart = if repo.starred { "♥" } else { "♡" };
    let heart_style = if repo.starred {
        Style::default().fg(theme.liked).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("[{}]", avatar_glyph(&repo.owner)),
            Style::default().fg(theme.title),
        ),
        Span::raw(" "),
        Span::styled(
            repo.owner.login.clone(),
            Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" / {}", repo.name), Style::default().fg(theme.muted)),
        Span::raw("  "),
        Span::styled(heart, heart_style),
    ]));

    lines.push(Line::from(Span::styled(
        truncate(&repo.full_name, text_width),
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    )));

    if let Some(desc) = repo.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(Line::from(Span::styled(
            truncate(desc, text_width),
            Style::default().fg(theme.subtitle),
        )));
    }

    lines.push(Line::from(vec![
        Span::styled("★ ", Style::default().fg(theme.stars)),
        Span::styled(
            format_number(repo.stars as u64),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("⑂ ", Style::default().fg(theme.forks)),
        Span::styled(
            format_number(repo.forks as u64),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("⊙ ", Style::default().fg(theme.issues)),
        Span::styled(
            format_number(repo.open_issues as u64),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));

    let mut meta = Vec::new();
    if let Some(lang) = repo.language.as_deref() {
        meta.push(Span::styled(
            "● ",
            Style::default().fg(hex_color(language_color(Some(lang)))),
        ));
        meta.push(Span::raw(lang.to_string()));
        meta.push(Span::raw("   "));
    }
    meta.push(Span::styled(
        format!("⏱ {}", format_relative_date(repo.updated_at, now)),
        Style::default().fg(theme.muted),
    ));
    lines.push(Line::from(meta));

    let (shown, overflow) = topic_chips(&repo.topics);
    if !shown.is_empty() {
        let mut chips: Vec<Span> = shown
            .iter()
            .map(|topic| Span::styled(format!("#{} ", topic), Style::default().fg(theme.topic)))
            .collect();
        if overflow > 0 {
            chips.push(Span::styled(
                format!("+{} more", overflow),
                Style::default().fg(theme.muted),
            ));
        }
        lines.push(Line::from(chips));
    }

    lines.push(Line::from(Span::styled(
        format!("↗ {}", repo.url),
        Style::default().fg(theme.muted).add_modifier(Modifier::UNDERLINED),
    )));
    lines.push(Line::from(""));

    lines
}
