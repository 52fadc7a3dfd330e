use std::{
    io::{self, BufRead},
    str::FromStr,
};

use rustyline::error::ReadlineError;

use crate::{
    balance::{closing_balance, derive},
    config::{ChartSettings, Config, ConfigError},
    errors::LedgerError,
    ledger::{parse_amount, EntryDraft, EntryInputError, EntryKind},
    report::{
        format_money, render_chart, render_table, ChartOptions, ReportStyle,
        EMPTY_LEDGER_MESSAGE,
    },
    storage::EntryStore,
};

use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Numbered options of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddIncome,
    AddExpense,
    ViewCashFlow,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::AddIncome,
        MenuChoice::AddExpense,
        MenuChoice::ViewCashFlow,
        MenuChoice::Exit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MenuChoice::AddIncome => "1",
            MenuChoice::AddExpense => "2",
            MenuChoice::ViewCashFlow => "3",
            MenuChoice::Exit => "4",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddIncome => "Add income",
            MenuChoice::AddExpense => "Add expense",
            MenuChoice::ViewCashFlow => "View cash flow",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = CommandError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        MenuChoice::ALL
            .into_iter()
            .find(|choice| choice.key() == trimmed)
            .ok_or_else(|| CommandError::InvalidChoice(trimmed.to_string()))
    }
}

/// Failure of a single menu action. Reported, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Invalid option `{0}`.")]
    InvalidChoice(String),
    #[error("Invalid input: {0}")]
    Input(#[from] EntryInputError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Cli(#[from] CliError),
}

/// Errors that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Terminal error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where the shell reads answers from.
pub trait LineSource {
    /// Reads one line for `prompt`; `Ok(None)` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, CliError>;
}

/// Feeds answers from any buffered reader, one per line. Prompts are not echoed.
pub struct ScriptSource<R> {
    reader: R,
}

impl<R: BufRead> ScriptSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ScriptSource<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>, CliError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// The menu loop over a ledger store.
pub struct Session<S> {
    store: S,
    style: ReportStyle,
    chart: ChartSettings,
    default_account: String,
    database_label: String,
}

impl<S: EntryStore> Session<S> {
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            store,
            style: ReportStyle::new(config.currency_symbol.clone(), config.plain_output),
            chart: config.chart,
            default_account: config.default_account.clone(),
            database_label: config.database_path.display().to_string(),
        }
    }

    /// Caps the chart to the space actually available.
    pub fn fit_chart_to(&mut self, columns: u16, rows: u16) {
        self.chart.width = self.chart.width.min(columns.saturating_sub(1));
        self.chart.height = self.chart.height.min(rows.saturating_sub(18).max(5));
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs until the user exits or input ends.
    pub fn run(&mut self, input: &mut dyn LineSource) -> Result<(), CliError> {
        loop {
            print_menu();
            let Some(line) = input.read_line("Choose: ")? else {
                self.farewell();
                return Ok(());
            };

            match self.process_choice(&line, input) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => {
                    self.farewell();
                    return Ok(());
                }
                Err(CommandError::Cli(err)) => return Err(err),
                Err(err) => self.report_error(err),
            }
        }
    }

    pub fn process_choice(
        &self,
        line: &str,
        input: &mut dyn LineSource,
    ) -> Result<LoopControl, CommandError> {
        match line.parse::<MenuChoice>()? {
            MenuChoice::AddIncome => self.add_entry(EntryKind::Income, input),
            MenuChoice::AddExpense => self.add_entry(EntryKind::Expense, input),
            MenuChoice::ViewCashFlow => self.show_cash_flow(),
            MenuChoice::Exit => Ok(LoopControl::Exit),
        }
    }

    fn add_entry(
        &self,
        kind: EntryKind,
        input: &mut dyn LineSource,
    ) -> Result<LoopControl, CommandError> {
        let symbol = &self.style.currency_symbol;
        let Some(amount) = input.read_line(&format!("{} amount ({symbol}): ", kind.label()))?
        else {
            return Ok(LoopControl::Exit);
        };
        // Reject a bad amount before asking for anything else.
        parse_amount(&amount)?;

        let examples = match kind {
            EntryKind::Income => "e.g. Sales, Client payment",
            EntryKind::Expense => "e.g. Rent, Supplier, Energy",
        };
        let prompts = [
            format!("Category ({examples}): "),
            "Description (optional): ".to_string(),
            format!("Account [{}]: ", self.default_account),
        ];
        let mut answers = Vec::with_capacity(prompts.len());
        for prompt in &prompts {
            match input.read_line(prompt)? {
                Some(answer) => answers.push(answer),
                None => return Ok(LoopControl::Exit),
            }
        }
        let mut answers = answers.into_iter();
        let draft = EntryDraft {
            amount,
            category: answers.next().unwrap_or_default(),
            description: answers.next().unwrap_or_default(),
            account: answers.next().unwrap_or_default(),
        };

        let request = draft.parse(kind)?;
        let entry = self.store.append(&request)?;
        output::success(format!(
            "{} of {} recorded as #{} ({}).",
            kind.label(),
            format_money(entry.amount, symbol),
            entry.id,
            entry.account
        ));
        Ok(LoopControl::Continue)
    }

    fn show_cash_flow(&self) -> Result<LoopControl, CommandError> {
        let entries = self.store.list_all()?;
        let rows = derive(&entries);
        if rows.is_empty() {
            output::info(EMPTY_LEDGER_MESSAGE);
            return Ok(LoopControl::Continue);
        }

        output::section("Cash flow");
        println!("{}", render_table(&rows, &self.style));
        output::info(format!(
            "\nClosing balance: {}",
            format_money(closing_balance(&rows), &self.style.currency_symbol)
        ));

        let options = ChartOptions::new(
            usize::from(self.chart.width),
            usize::from(self.chart.height),
            self.style.currency_symbol.clone(),
        );
        if let Some(chart) = render_chart(&rows, &options) {
            println!("\n{chart}");
        }
        Ok(LoopControl::Continue)
    }

    fn report_error(&self, err: CommandError) {
        match err {
            CommandError::InvalidChoice(choice) if choice.is_empty() => {
                output::warning("No option chosen. Choose 1-4.");
            }
            CommandError::InvalidChoice(choice) => {
                output::warning(format!("Invalid option `{choice}`. Choose 1-4."));
            }
            CommandError::Input(err) => {
                output::error(format!("Invalid input: {err}. Nothing was recorded."));
            }
            CommandError::Ledger(err) => {
                tracing::error!(error = %err, "ledger operation failed");
                output::error(format!("Could not access the ledger: {err}"));
            }
            CommandError::Cli(err) => output::error(err),
        }
    }

    fn farewell(&self) {
        output::info(format!(
            "Goodbye! Your entries are saved in {}.",
            self.database_label
        ));
    }
}

const MENU_TITLE: &str = "CASHBOOK - OFFLINE CASH FLOW";

fn print_menu() {
    let rule = "=".repeat(40);
    output::info(format!("\n{rule}\n {MENU_TITLE}\n{rule}"));
    for choice in MenuChoice::ALL {
        output::info(format!("{}. {}", choice.key(), choice.label()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn menu_choice_parses_numbered_options() {
        assert_eq!("1".parse::<MenuChoice>().unwrap(), MenuChoice::AddIncome);
        assert_eq!(" 4 ".parse::<MenuChoice>().unwrap(), MenuChoice::Exit);
        assert!(matches!(
            "9".parse::<MenuChoice>(),
            Err(CommandError::InvalidChoice(choice)) if choice == "9"
        ));
        assert!(matches!(
            "  ".parse::<MenuChoice>(),
            Err(CommandError::InvalidChoice(choice)) if choice.is_empty()
        ));
    }

    #[test]
    fn script_source_strips_line_endings_and_signals_eof() {
        let mut source = ScriptSource::new(Cursor::new("1\r\n25,50\n"));
        assert_eq!(source.read_line("").unwrap().as_deref(), Some("1"));
        assert_eq!(source.read_line("").unwrap().as_deref(), Some("25,50"));
        assert_eq!(source.read_line("").unwrap(), None);
    }
}
