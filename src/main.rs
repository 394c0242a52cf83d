use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use question_drill::{
    available_types, draw_menu, draw_quit_confirmation, draw_quiz, handle_key, logger, App,
    AppState, Config, CsvSource, RowSource,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;

fn main() -> io::Result<()> {
    let config = Config::parse();
    if let Some(path) = config.log_path() {
        logger::init(path);
    }
    logger::log(&format!(
        "Starting with data dir {}",
        config.data_dir.display()
    ));

    let mut app = App::new(CsvSource::new(&config.data_dir));
    let data_dir = app.bank.source().dir();
    if available_types(data_dir).is_empty() {
        app.notice = Some(format!("No question files found in {}", data_dir.display()));
    } else if let Some(path) = config.log_path()
        && !logger::is_enabled()
    {
        app.notice = Some(format!("Could not open log file {}", path.display()));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Exiting with error: {}", e));
    }
    result
}

fn run<B: Backend, S: RowSource>(terminal: &mut Terminal<B>, app: &mut App<S>) -> io::Result<()> {
    loop {
        terminal.draw(|f| match app.state {
            AppState::Menu => draw_menu(f, app),
            AppState::Quiz => draw_quiz(f, app),
            AppState::QuitConfirm => {
                draw_quiz(f, app);
                draw_quit_confirmation(f);
            }
        })?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
