use crate::app::App;
use crate::bank::RowSource;
use crate::models::{QuestionType, BLANK_COUNT};
use crate::render::{render_blanks_with, render_numbered_blanks, TERMINAL_BLANK};
use crate::session::EXHAUSTED_NOTICE;
use crate::ui::layout::{calculate_quiz_chunks, centered_rect};
use crate::ui::markdown::render_markdown;
use crate::utils::calculate_wrapped_cursor_position;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const CLOZE_PREFIX_WIDTH: u16 = 6;

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn heading(text: &'static str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

pub fn draw_quiz<S: RowSource>(f: &mut Frame, app: &mut App<S>) {
    let layout = calculate_quiz_chunks(f.area());
    let ty = app.session.question_type();
    let total = app.total();

    let progress = match app.displayed_index() {
        Some(index) if ty.is_cloze() => format!("{} - Passage {} / {}", ty, index + 1, total),
        Some(index) => format!("{} - Question {} / {}", ty, index + 1, total),
        None => format!("{} - {} questions", ty, total),
    };
    let header = Paragraph::new(progress)
        .style(key_style())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let notice = Paragraph::new(app.notice.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(notice, layout.notice_area);

    draw_help(f, layout.help_area, ty);

    let Some(index) = app.displayed_index() else {
        let empty = Paragraph::new(EXHAUSTED_NOTICE)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Question"));
        f.render_widget(empty, layout.question_area);
        return;
    };

    let stem = match app.current_set.as_ref() {
        Some(set) if ty.is_cloze() => set
            .passage(index)
            .map(|p| render_numbered_blanks(&p.text))
            .unwrap_or_default(),
        Some(set) => set
            .question(index)
            .map(|q| render_blanks_with(&q.stem, TERMINAL_BLANK))
            .unwrap_or_default(),
        None => String::new(),
    };
    let title = if ty.is_cloze() { "Passage" } else { "Question" };
    let question = Paragraph::new(Text::from(stem))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(question, layout.question_area);

    if ty.is_cloze() {
        draw_cloze_inputs(f, app, index, layout.answer_area);
    } else if ty.takes_free_text() {
        draw_text_input(f, app, layout.answer_area);
    } else {
        draw_options(f, app, index, layout.answer_area);
    }

    draw_reveal(f, app, index, layout.reveal_area);
}

fn draw_options<S: RowSource>(f: &mut Frame, app: &App<S>, index: usize, area: Rect) {
    let Some(question) = app.current_set.as_ref().and_then(|set| set.question(index)) else {
        return;
    };
    if question.has_no_options() {
        let empty = Paragraph::new("No options found for this question.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Choose an answer"));
        f.render_widget(empty, area);
        return;
    }

    // Nothing recorded yet leaves the marker on A, dimmed.
    let selected = app.session.selected_option(index, &question.options);
    let marker_style = if app.session.answer(index).is_some() {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            if i == selected {
                Line::from(Span::styled(format!("(•) {}", option), marker_style))
            } else {
                Line::from(format!("( ) {}", option))
            }
        })
        .collect();

    let options = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Choose an answer"));
    f.render_widget(options, area);
}

fn draw_text_input<S: RowSource>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let text_width = area.width.saturating_sub(2) as usize;
    let (cursor_line, cursor_col) =
        calculate_wrapped_cursor_position(&app.input_buffer, app.cursor_position, text_width);

    let mut scroll = app.input_scroll_y as usize;
    if cursor_line < scroll {
        scroll = cursor_line;
    } else if visible_height > 0 && cursor_line >= scroll + visible_height {
        scroll = cursor_line + 1 - visible_height;
    }
    app.input_scroll_y = scroll as u16;

    let content = if app.input_buffer.is_empty() {
        Text::from(Span::styled(
            "[Type your translation here...]",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(app.input_buffer.as_str())
    };
    let input = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((app.input_scroll_y, 0))
        .block(Block::default().borders(Borders::ALL).title("Your Translation"));
    f.render_widget(input, area);

    let cursor_x = area.x + 1 + cursor_col as u16;
    let cursor_y = area.y + 1 + (cursor_line as u16).saturating_sub(app.input_scroll_y);
    f.set_cursor_position((cursor_x, cursor_y));
}

fn draw_cloze_inputs<S: RowSource>(f: &mut Frame, app: &App<S>, index: usize, area: Rect) {
    let grade = app.session.cloze_grade(index);
    let lines: Vec<Line> = (0..BLANK_COUNT)
        .map(|blank| {
            let focused = blank == app.focused_blank;
            let value = if focused {
                app.input_buffer.as_str()
            } else {
                app.session.blank_input(index, blank)
            };
            let marker = if focused { "> " } else { "  " };
            let mut spans = vec![Span::from(format!("{}{:>2}. ", marker, blank + 1))];
            let style = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            spans.push(Span::styled(value.to_string(), style));
            if let Some(report) = grade {
                spans.push(if report.per_blank_correct[blank] {
                    Span::styled("  ✓", Style::default().fg(Color::Green))
                } else {
                    Span::styled("  ✗", Style::default().fg(Color::Red))
                });
            }
            Line::from(spans)
        })
        .collect();

    let title = match grade {
        Some(report) => format!("Blanks - {} / {} correct", report.correct_count, report.total()),
        None => "Blanks".to_string(),
    };
    let inputs = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(inputs, area);

    let row = app.focused_blank as u16;
    if row + 2 < area.height {
        let typed = app
            .input_buffer
            .get(..app.cursor_position)
            .map_or(0, UnicodeWidthStr::width) as u16;
        let x = (area.x + 1 + CLOZE_PREFIX_WIDTH)
            .saturating_add(typed)
            .min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y + 1 + row));
    }
}

fn draw_reveal<S: RowSource>(f: &mut Frame, app: &App<S>, index: usize, area: Rect) {
    let reveal = app.session.reveal();
    let Some(set) = app.current_set.as_ref() else {
        return;
    };
    let (answer, explanation) = match (set.question(index), set.passage(index)) {
        (Some(q), _) => (q.correct_answer.clone(), q.explanation.as_str()),
        (None, Some(p)) => (
            p.expected_answers
                .iter()
                .enumerate()
                .map(|(i, a)| format!("{}. {}", i + 1, a))
                .collect::<Vec<_>>()
                .join("  "),
            p.explanation.as_str(),
        ),
        (None, None) => return,
    };

    let mut text = Text::default();
    if reveal.answer {
        text.push_line(heading("Correct Answer:", Color::Green));
        text.push_line(Line::from(answer));
        text.push_line(Line::from(""));
    }
    if reveal.explanation {
        text.push_line(heading("Explanation:", Color::Cyan));
        text.extend(render_markdown(explanation));
    }
    if !reveal.answer && !reveal.explanation {
        text.push_line(Line::from(Span::styled(
            "Hidden. Use Ctrl+A / Ctrl+E to show.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Answer & Explanation"));
    f.render_widget(panel, area);
}

fn draw_help(f: &mut Frame, area: Rect, ty: QuestionType) {
    let mut first = vec![Span::styled("↑/↓", key_style()), Span::from(" Prev/Next  ")];
    if ty.is_cloze() {
        first.extend([
            Span::styled("Tab", key_style()),
            Span::from(" Next blank  "),
            Span::styled("Enter", key_style()),
            Span::from(" Check  "),
        ]);
    } else if ty.takes_free_text() {
        first.extend([Span::styled("Enter", key_style()), Span::from(" Save  ")]);
    } else {
        first.extend([
            Span::styled("←/→ 1-4", key_style()),
            Span::from(" Choose  "),
        ]);
    }
    first.extend([Span::styled("Esc", key_style()), Span::from(" Menu")]);

    let mut second = Vec::new();
    if !ty.takes_free_text() {
        second.extend([Span::styled("Ctrl+A", key_style()), Span::from(" Answer  ")]);
    }
    second.extend([
        Span::styled("Ctrl+E", key_style()),
        Span::from(" Explanation  "),
        Span::styled("Ctrl+C", key_style()),
        Span::from(" Exit App"),
    ]);

    let help = Paragraph::new(vec![Line::from(first), Line::from(second)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let area = centered_rect(f.area(), 50, 7);
    f.render_widget(Clear, area);

    let text = vec![
        Line::from("Return to the question type menu?"),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" Yes  "),
            Span::styled(
                "n",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::from(" No"),
        ]),
    ];
    let popup = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Back to Menu")
            .style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::rows;
    use crate::ui::draw_menu;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_draw_choice_question() {
        let mut app = App::new(rows());
        app.open_type(QuestionType::Vocabulary);
        app.choose_option(1);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw_quiz(f, &mut app)).unwrap();
        let out = screen(&terminal);
        assert!(out.contains("Vocabulary - Question 1 / 3"));
        assert!(out.contains(&format!("He {} home.", TERMINAL_BLANK)));
        assert!(out.contains("(•) B. goes"));
        assert!(out.contains("( ) A. go"));
        assert!(!out.contains("because"));
    }

    #[test]
    fn test_draw_unanswered_question_marks_first_option() {
        let mut app = App::new(rows());
        app.open_type(QuestionType::Vocabulary);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw_quiz(f, &mut app)).unwrap();
        let out = screen(&terminal);
        assert!(out.contains("(•) A. go"));
        assert!(out.contains("( ) B. goes"));
        assert_eq!(app.session.answer(0), None);
    }

    #[test]
    fn test_draw_question_without_options() {
        let mut rows = rows();
        rows.insert(
            QuestionType::Reading,
            vec![crate::models::SourceRow {
                question: "1. Summarise the passage in one word.".to_string(),
                answer: None,
                explanation: None,
                answers: None,
            }],
        );
        let mut app = App::new(rows);
        app.open_type(QuestionType::Reading);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw_quiz(f, &mut app)).unwrap();
        assert!(screen(&terminal).contains("No options found for this question."));
    }

    #[test]
    fn test_cloze_cursor_stays_inside_long_input() {
        let mut app = App::new(rows());
        app.open_type(QuestionType::Cloze);
        for _ in 0..200 {
            app.insert_char('w');
        }
        let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();
        terminal.draw(|f| draw_quiz(f, &mut app)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 60);
    }

    #[test]
    fn test_draw_reveal_panel() {
        let mut app = App::new(rows());
        app.open_type(QuestionType::Vocabulary);
        app.session.toggle_answer();
        app.session.toggle_explanation();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw_quiz(f, &mut app)).unwrap();
        let out = screen(&terminal);
        assert!(out.contains("Correct Answer:"));
        assert!(out.contains("because"));
        assert!(!out.contains("**because**"));
    }

    #[test]
    fn test_draw_exhausted() {
        let mut app = App::new(rows());
        app.open_type(QuestionType::Reading);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw_quiz(f, &mut app)).unwrap();
        assert!(screen(&terminal).contains("No more questions"));
    }

    #[test]
    fn test_draw_cloze_and_menu() {
        let mut app = App::new(rows());
        app.open_type(QuestionType::Cloze);
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw_quiz(f, &mut app)).unwrap();
        let out = screen(&terminal);
        assert!(out.contains("Passage 1 / 1"));
        assert!(out.contains("(1)[________]"));
        assert!(out.contains(">  1. "));

        app.back_to_menu();
        terminal.draw(|f| draw_menu(f, &app)).unwrap();
        assert!(screen(&terminal).contains("Cloze (1 loaded)"));
    }

    #[test]
    fn test_draw_quit_confirmation() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(draw_quit_confirmation).unwrap();
        assert!(screen(&terminal).contains("Back to Menu"));
    }
}
