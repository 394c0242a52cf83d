use crate::app::App;
use crate::bank::RowSource;
use crate::logger;
use crate::models::{AppState, QuestionType};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const SAVED_NOTICE: &str = "Answer saved.";
pub const RELOADED_NOTICE: &str = "Question files will be re-read on next open.";

pub fn handle_key<S: RowSource>(app: &mut App<S>, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.commit_input();
        app.should_quit = true;
        return;
    }

    match app.state {
        AppState::Menu => handle_menu_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::QuitConfirm => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.back_to_menu(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Quiz;
            }
            _ => {}
        },
    }
}

fn handle_menu_input<S: RowSource>(app: &mut App<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Up => {
            if app.menu_index > 0 {
                app.menu_index -= 1;
            }
        }
        KeyCode::Down => {
            if app.menu_index < QuestionType::ALL.len() - 1 {
                app.menu_index += 1;
            }
        }
        KeyCode::Enter => {
            let ty = app.menu_type();
            app.open_type(ty);
        }
        KeyCode::Char('r') => {
            app.bank.reload();
            app.current_set = None;
            app.notice = Some(RELOADED_NOTICE.to_string());
            logger::log("Question cache cleared");
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        _ => {}
    }
}

fn handle_quiz_input<S: RowSource>(app: &mut App<S>, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let ty = app.session.question_type();

    match key.code {
        KeyCode::Esc => {
            app.commit_input();
            app.state = AppState::QuitConfirm;
        }
        KeyCode::Up => app.prev(),
        KeyCode::Down => app.next(),
        KeyCode::Char('a') if ctrl => {
            // Translation prompts have no reference answer to show.
            if !ty.takes_free_text() {
                app.session.toggle_answer();
            }
        }
        KeyCode::Char('e') if ctrl => app.session.toggle_explanation(),
        _ if ctrl => {}
        _ if app.takes_text() => handle_text_input(app, key),
        KeyCode::Left => app.cycle_option(false),
        KeyCode::Right => app.cycle_option(true),
        KeyCode::Enter => app.next(),
        KeyCode::Char(c) => {
            if let Some(position) = option_position(c) {
                app.choose_option(position);
            }
        }
        _ => {}
    }
}

fn handle_text_input<S: RowSource>(app: &mut App<S>, key: KeyEvent) {
    let cloze = app.session.question_type().is_cloze();
    match key.code {
        KeyCode::Enter => {
            if cloze {
                app.submit_cloze();
            } else {
                app.commit_input();
                app.notice = Some(SAVED_NOTICE.to_string());
            }
        }
        KeyCode::Tab if cloze => app.focus_blank(true),
        KeyCode::BackTab if cloze => app.focus_blank(false),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

/// Map `1`-`4` and `a`-`d` (either case) to an option position.
fn option_position(c: char) -> Option<usize> {
    match c.to_ascii_lowercase() {
        '1' | 'a' => Some(0),
        '2' | 'b' => Some(1),
        '3' | 'c' => Some(2),
        '4' | 'd' => Some(3),
        _ => None,
    }
}
