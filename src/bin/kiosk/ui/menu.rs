//! Menu - the five exhibition cards

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use what_is_music::content::{text, ModuleId, Text, MODULES};

use super::{hit, palette::rgb, Outbox, Request, Screen, View};

pub struct MenuScreen {
    cards: Vec<(Rect, ModuleId)>,
    start_button: Option<Rect>,
}

impl MenuScreen {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            start_button: None,
        }
    }

    fn first_module() -> ModuleId {
        ModuleId::ORDER[0]
    }
}

impl Screen for MenuScreen {
    fn enter(&mut self, _out: &mut Outbox) {}

    fn leave(&mut self, _out: &mut Outbox) {}

    fn key(&mut self, code: KeyCode, out: &mut Outbox) -> bool {
        match code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                out.request(Request::Open(Self::first_module()));
                true
            }
            _ => false,
        }
    }

    fn mouse(&mut self, event: MouseEvent, out: &mut Outbox) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if self
            .start_button
            .is_some_and(|button| hit(button, event.column, event.row))
        {
            out.request(Request::Open(Self::first_module()));
            return;
        }
        if let Some(&(_, id)) = self
            .cards
            .iter()
            .find(|(area, _)| hit(*area, event.column, event.row))
        {
            out.request(Request::Open(id));
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, view: &View) {
        let palette = &view.palette;
        let [intro, cards, start] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(3),
        ])
        .areas(area);

        let intro_text = Paragraph::new(vec![
            Line::styled(
                text(Text::Title, view.language),
                Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
            ),
            Line::styled(text(Text::Exhibition, view.language), Style::default().fg(palette.muted)),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(intro_text, intro);

        let columns = Layout::horizontal(MODULES.iter().map(|_| Constraint::Ratio(1, MODULES.len() as u32)))
            .spacing(1)
            .split(cards);

        self.cards.clear();
        for (module, &card) in MODULES.iter().zip(columns.iter()) {
            let accent = rgb(module.color);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(accent))
                .title(format!(" {:02} ", module.number));
            let body = Paragraph::new(vec![
                Line::styled(module.icon, Style::default().fg(accent).add_modifier(Modifier::BOLD)),
                Line::default(),
                Line::styled(
                    module.title(view.language),
                    Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
                ),
                Line::styled(module.description(view.language), Style::default().fg(palette.muted)),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(body, card);
            self.cards.push((card, module.id));
        }

        let label = format!("▶ {}", text(Text::StartExhibition, view.language));
        let width = (label.chars().count() as u16 + 4).min(start.width);
        let [_, button, _] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .areas(start);
        frame.render_widget(
            Paragraph::new(label)
                .alignment(Alignment::Center)
                .style(Style::default().fg(palette.bg).bg(palette.accent).add_modifier(Modifier::BOLD)),
            button,
        );
        self.start_button = Some(button);
    }
}
