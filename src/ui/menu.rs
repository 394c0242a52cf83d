use crate::app::App;
use crate::bank::RowSource;
use crate::models::QuestionType;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn key_span(key: &'static str) -> Span<'static> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn menu_label<S: RowSource>(app: &App<S>, ty: QuestionType) -> String {
    match app.bank.cached(ty) {
        Some(set) => format!("{} ({} loaded)", ty.title(), set.len()),
        None => ty.title().to_string(),
    }
}

pub fn draw_menu<S: RowSource>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Question Drill v0.1.0")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = QuestionType::ALL
        .into_iter()
        .enumerate()
        .map(|(i, ty)| {
            let selected = i == app.menu_index;
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if selected { "> " } else { "  " };
            ListItem::new(format!("{}{}", marker, menu_label(app, ty))).style(style)
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Question Types"),
    );
    f.render_widget(list, chunks[1]);

    let notice = Paragraph::new(app.notice.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(notice, chunks[2]);

    let help = Paragraph::new(Line::from(vec![
        key_span("↑/↓"),
        Span::from(" Select  "),
        key_span("Enter"),
        Span::from(" Start  "),
        key_span("r"),
        Span::from(" Reload files  "),
        key_span("q"),
        Span::from(" Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}
