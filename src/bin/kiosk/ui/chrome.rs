//! Header and footer bars shared by every screen

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use what_is_music::content::{self, text, Language, ModuleId, Text, Theme};

use super::palette::{rgb, Palette};

/// Key hints as one line: key in the accent colour, label muted
pub fn hint_line<'a>(hints: &[(&'a str, &'a str)], palette: &Palette) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!("{label}  "), Style::default().fg(palette.muted)));
    }
    Line::from(spans)
}

/// Render the header. Returns where the back button landed, if shown.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    module: ModuleId,
    language: Language,
    theme: Theme,
    palette: &Palette,
) -> Option<Rect> {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let back_label = format!("← {}", text(Text::BackToMenu, language));
    let back_width = if module.is_menu() {
        0
    } else {
        back_label.chars().count() as u16 + 2
    };
    let theme_label = match theme {
        Theme::Dark => "☾",
        Theme::Light => "☀",
    };
    let settings = format!("{} {}  {} {} ", text(Text::Language, language), language.code(), text(Text::Theme, language), theme_label);

    let [back, title, right] = Layout::horizontal([
        Constraint::Length(back_width),
        Constraint::Min(0),
        Constraint::Length(settings.chars().count() as u16),
    ])
    .areas(inner);

    let mut spans = vec![Span::styled(
        format!("♪ {}", text(Text::Title, language)),
        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
    )];
    if let Some(info) = content::info(module) {
        spans.push(Span::styled("  ·  ", Style::default().fg(palette.muted)));
        spans.push(Span::styled(
            format!("{:02} {} {}", info.number, info.icon, info.title(language)),
            Style::default().fg(rgb(info.color)).add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled(
            format!("  {}", text(Text::Exhibition, language)),
            Style::default().fg(palette.muted),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), title);
    frame.render_widget(
        Paragraph::new(settings).style(Style::default().fg(palette.muted)),
        right,
    );

    if module.is_menu() {
        return None;
    }
    frame.render_widget(
        Paragraph::new(back_label).style(Style::default().fg(palette.accent)),
        back,
    );
    Some(back)
}

/// Render the footer: the alert if one is up, otherwise the global keys.
pub fn render_footer(
    frame: &mut Frame,
    area: Rect,
    module: ModuleId,
    language: Language,
    alert: Option<Text>,
    palette: &Palette,
) {
    if let Some(alert) = alert {
        let line = Line::styled(
            format!(" ⚠ {}", text(alert, language)),
            Style::default().fg(palette.alert).add_modifier(Modifier::BOLD),
        );
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hints: Vec<(&str, &str)> = if module.is_menu() {
        vec![
            ("1-5", text(Text::StartExhibition, language)),
            ("L", text(Text::Language, language)),
            ("T", text(Text::Theme, language)),
            ("Q", text(Text::Quit, language)),
        ]
    } else {
        vec![
            ("Esc", text(Text::BackToMenu, language)),
            ("[", text(Text::PrevModule, language)),
            ("]", text(Text::NextModule, language)),
            ("L", text(Text::Language, language)),
            ("T", text(Text::Theme, language)),
            ("Q", text(Text::Quit, language)),
        ]
    };
    frame.render_widget(Paragraph::new(hint_line(&hints, palette)), area);
}
