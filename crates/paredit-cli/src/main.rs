use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use paredit_config::Config;
use paredit_engine::editing::RopeEditor;
use paredit_engine::{Operation, Session};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    fs::{self, OpenOptions},
    io::{self, Read, Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

mod app;
mod args;
mod batch;
mod clipboard;
mod keymap;
mod ui;

use app::App;
use args::{Input, Invocation, parse_args, usage};
use batch::{BatchRequest, run_batch};
use clipboard::{Clipboard, SystemClipboard};
use keymap::KeyMap;

const LOG_FILE_VAR: &str = "PAREDIT_LOG";
const SCRATCH_LANGUAGE: &str = "clojure";
const UNKNOWN_LANGUAGE: &str = "plaintext";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("paredit", String::as_str);
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("{}", usage(program));
            process::exit(2);
        }
    };

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!(
                "Error: Failed to load config file '{}': {e}",
                Config::config_path().display()
            );
            process::exit(1);
        }
    };
    let session = Session::new()
        .with_languages(config.languages.iter().cloned())
        .with_indent_width(config.indent_width)
        .with_enabled(config.enabled);

    match invocation {
        Invocation::Help => println!("{}", usage(program)),
        Invocation::ListCommands => {
            for op in Operation::all() {
                println!("{op}");
            }
        }
        Invocation::Batch {
            input,
            selection,
            language,
            commands,
            print_clipboard,
        } => {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Warn)
                .parse_default_env()
                .init();

            let (source, language) = match &input {
                Input::Stdin => {
                    let mut source = String::new();
                    io::stdin()
                        .read_to_string(&mut source)
                        .context("Failed to read stdin")?;
                    (source, language.unwrap_or_else(|| SCRATCH_LANGUAGE.into()))
                }
                Input::File(path) => {
                    let source = fs::read_to_string(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    let language = language.unwrap_or_else(|| language_for(&config, path));
                    (source, language)
                }
            };

            let request = BatchRequest {
                language,
                selection,
                commands,
            };
            let mut session = session;
            let result = run_batch(&source, &request, &mut session)?;
            log::info!(
                "selection {}..{} cursor {}",
                result.selection.start,
                result.selection.end,
                result.selection.cursor
            );
            if print_clipboard {
                print!("{}", result.clipboard.unwrap_or_default());
            } else {
                print!("{}", result.text);
            }
        }
        Invocation::Interactive { path } => {
            init_file_logging(&config)?;

            let (text, language) = match &path {
                Some(path) if path.exists() => (
                    fs::read_to_string(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                    language_for(&config, path),
                ),
                Some(path) => (String::new(), language_for(&config, path)),
                None => (String::new(), SCRATCH_LANGUAGE.to_string()),
            };
            log::info!("paredit starting up with {language}");

            let app = App::new(
                RopeEditor::new(language, &text),
                session,
                SystemClipboard::new(),
                KeyMap::from_config(&config),
                path,
            );
            run_terminal(app)?;
        }
    }

    Ok(())
}

fn language_for(config: &Config, path: &Path) -> String {
    config
        .language_for_path(path)
        .unwrap_or(UNKNOWN_LANGUAGE)
        .to_string()
}

/// The terminal belongs to the editor, so interactive sessions only log to a
/// file: `PAREDIT_LOG`, else the configured `log_file`.
fn init_file_logging(config: &Config) -> Result<()> {
    let Some(log_path) = env::var_os(LOG_FILE_VAR)
        .map(PathBuf::from)
        .or_else(|| config.log_file.clone())
    else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_terminal<C: Clipboard>(mut app: App<C>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<C: Clipboard>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<C>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
        if app.should_quit() {
            return Ok(());
        }
    }
}
