use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::{error::ReadlineError, history::DefaultHistory, Editor};

use crate::{
    config::Config,
    storage::{EntryStore, SqliteStore},
};

use super::core::{CliError, CliMode, LineSource, ScriptSource, Session};
use super::output::{self, OutputPreferences};

/// Set to any value to read menu answers from stdin without a line editor.
pub const SCRIPT_ENV: &str = "CASHBOOK_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut config = Config::resolve()?;
    if mode == CliMode::Script {
        config.plain_output = true;
    }
    output::set_preferences(OutputPreferences {
        plain_mode: config.plain_output,
    });

    let store = SqliteStore::new(config.database_path.clone())
        .with_default_account(config.default_account.clone());
    store.initialize()?;
    tracing::info!(database = %store.path().display(), ?mode, "cashbook session started");

    let mut session = Session::new(store, &config);
    match mode {
        CliMode::Interactive => {
            if let Ok((columns, rows)) = crossterm::terminal::size() {
                session.fit_chart_to(columns, rows);
            }
            let mut source = EditorSource::new()?;
            session.run(&mut source)
        }
        CliMode::Script => {
            let stdin = io::stdin();
            let mut source = ScriptSource::new(stdin.lock());
            session.run(&mut source)
        }
    }
}

/// Line editor with in-memory history for interactive use.
struct EditorSource {
    editor: Editor<(), DefaultHistory>,
    theme: ColorfulTheme,
}

impl EditorSource {
    fn new() -> Result<Self, CliError> {
        Ok(Self {
            editor: Editor::new()?,
            theme: ColorfulTheme::default(),
        })
    }

    fn confirm_exit(&self) -> Result<bool, CliError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit cashbook?")
            .default(false)
            .interact()?)
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        self.editor.add_history_entry(trimmed).ok();
                    }
                    return Ok(Some(line));
                }
                // Declining the exit prompt asks the same question again.
                Err(ReadlineError::Interrupted) => {
                    if self.confirm_exit()? {
                        return Ok(None);
                    }
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(err.into()),
            }
        }
    }
}
