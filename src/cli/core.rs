//! CLI dispatch and shell context for the expense ledger.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::ledger_manager::LedgerManager,
    core::services::Forecast,
    core::utils::{app_data_dir, default_store_file, ensure_dir},
    errors::ExpenseError,
    ledger::{expense::parse_date, DateRange},
    storage::JsonStorage,
};

use super::output;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Failure of a single command; the shell reports it and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Core(#[from] ExpenseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub(crate) type CommandResult = Result<LoopControl, CommandError>;

const COMMANDS: &[(&str, &str)] = &[
    (
        "add",
        "add <description> <amount> <category> [date] : record an expense",
    ),
    ("list", "list [start] [end] : show expenses in a date range"),
    ("total", "total [start] [end] : sum expenses in a date range"),
    (
        "report",
        "report [start] [end] : per-category totals in a date range",
    ),
    ("predict", "predict : forecast tomorrow's expense from the trend"),
    ("help", "help : show this message"),
    ("exit", "exit : leave the shell"),
];

/// Holds the open ledger, configuration, and loop state for one session.
pub struct ShellContext {
    manager: LedgerManager,
    config: Config,
    pub mode: CliMode,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        ensure_dir(&app_data_dir())?;
        let config = ConfigManager::new().load()?;
        let store_path: PathBuf = config
            .data_file
            .clone()
            .unwrap_or_else(default_store_file);
        let storage = JsonStorage::new(store_path);
        let manager = LedgerManager::open(Box::new(storage))?;
        Ok(Self {
            manager,
            config,
            mode,
            running: true,
        })
    }

    pub fn command_names() -> Vec<&'static str> {
        COMMANDS.iter().map(|(name, _)| *name).collect()
    }

    pub fn prompt(&self) -> String {
        "expense> ".to_string()
    }

    pub fn report_error(&self, err: CommandError) {
        output::error(err);
    }

    pub(crate) fn dispatch(&mut self, command: &str, args: &[&str]) -> CommandResult {
        match command {
            "add" => self.cmd_add(args),
            "list" => self.cmd_list(args),
            "total" => self.cmd_total(args),
            "report" => self.cmd_report(args),
            "predict" => self.cmd_predict(args),
            "help" => self.cmd_help(),
            "exit" | "quit" => Ok(LoopControl::Exit),
            other => Err(CommandError::Usage(format!(
                "Unknown command `{other}`. Type `help` for the command list."
            ))),
        }
    }

    fn cmd_add(&mut self, args: &[&str]) -> CommandResult {
        if args.len() < 3 || args.len() > 4 {
            return Err(CommandError::Usage(
                "Usage: add <description> <amount> <category> [date]".into(),
            ));
        }
        let description = args[0];
        let amount: f64 = args[1]
            .parse()
            .map_err(|_| CommandError::Invalid(format!("`{}` is not a valid amount", args[1])))?;
        if !amount.is_finite() {
            return Err(CommandError::Invalid(format!(
                "`{}` is not a finite amount",
                args[1]
            )));
        }
        let category = args[2];
        let date = match args.get(3) {
            Some(raw) => Some(parse_date(raw)?),
            None => None,
        };

        let stored = self
            .manager
            .add_expense(description, amount, category, date)?
            .clone();
        output::success(format!(
            "Recorded {} {} [{}] on {}.",
            self.amount_cell(stored.amount),
            stored.description,
            stored.category,
            stored.date
        ));
        Ok(LoopControl::Continue)
    }

    fn cmd_list(&mut self, args: &[&str]) -> CommandResult {
        let range = parse_range(args)?;
        let expenses = self.manager.expenses_between(&range)?;
        if expenses.is_empty() {
            output::info("No expenses in that range.");
            return Ok(LoopControl::Continue);
        }
        for expense in expenses {
            output::info(format!(
                "{}: {} - {} [{}]",
                expense.date,
                expense.description,
                self.amount_cell(expense.amount),
                expense.category
            ));
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_total(&mut self, args: &[&str]) -> CommandResult {
        let range = parse_range(args)?;
        let total = self.manager.total_between(&range)?;
        output::info(format!("Total Expenses: {}", self.amount_cell(total)));
        Ok(LoopControl::Continue)
    }

    fn cmd_report(&mut self, args: &[&str]) -> CommandResult {
        let range = parse_range(args)?;
        let report = self.manager.category_report(&range)?;
        if report.is_empty() {
            output::info("No expenses in that range.");
            return Ok(LoopControl::Continue);
        }
        for (category, total) in report {
            output::info(format!("{}: {}", category, self.amount_cell(total)));
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_predict(&mut self, _args: &[&str]) -> CommandResult {
        match self.manager.predict_next()? {
            Forecast::Projected { amount } => output::info(format!(
                "Predicted expense for tomorrow: {}",
                self.amount_cell(amount)
            )),
            Forecast::InsufficientData { observed } => output::info(format!(
                "Not enough data to make a prediction ({observed} expense(s) on file, need 2)."
            )),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_help(&self) -> CommandResult {
        output::section("Commands");
        for (_, usage) in COMMANDS {
            output::info(format!("  {usage}"));
        }
        output::info("  Date bounds are YYYY-MM-DD; pass `-` to leave a side unbounded.");
        Ok(LoopControl::Continue)
    }

    fn amount_cell(&self, amount: f64) -> String {
        format!("{}{:.2}", self.config.currency_symbol, amount)
    }
}

/// Parses up to two optional date bounds; `-` keeps a side unbounded so an
/// end bound can be supplied without a start.
fn parse_range(args: &[&str]) -> Result<DateRange, CommandError> {
    if args.len() > 2 {
        return Err(CommandError::Usage(
            "Expected at most two dates: [start] [end]".into(),
        ));
    }
    let start = parse_bound(args.first())?;
    let end = parse_bound(args.get(1))?;
    Ok(DateRange::new(start, end))
}

fn parse_bound(arg: Option<&&str>) -> Result<Option<NaiveDate>, CommandError> {
    match arg {
        None => Ok(None),
        Some(&"-") => Ok(None),
        Some(raw) => Ok(Some(parse_date(raw)?)),
    }
}
