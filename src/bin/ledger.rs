//! CLI front end for the finance ledger.

use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone as _, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use finance_ledger::filter::TransactionFilter;
use finance_ledger::ledger::Ledger;
use finance_ledger::models::{
    Budget, BudgetId, BudgetPeriod, Category, Transaction, TransactionId, TransactionType,
    parse_amount,
};
use finance_ledger::stats::{BudgetUsage, CategoryShare, PeriodSummary};
use finance_ledger::storage::{FileStore, KeyValueStore};
use owo_colors::OwoColorize;

/// Personal finance ledger: record transactions, set budgets, view
/// statistics.
#[derive(Debug, Parser)]
#[command(name = "ledger", version, about)]
struct Cli {
    /// Override the storage directory (default: XDG data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Record a new income or expense.
    Add(AddArgs),
    /// Replace fields of an existing transaction.
    Edit(EditArgs),
    /// Delete a transaction by ID.
    Delete {
        /// Transaction ID.
        id: String,
    },
    /// List transactions, newest first.
    List(ListArgs),
    /// Manage category budgets.
    #[command(subcommand)]
    Budget(BudgetCommand),
    /// Show all-time totals and category breakdowns.
    Stats,
    /// Show income, expense and balance for the current month.
    Summary,
    /// List preset categories.
    Categories {
        /// Only show categories for this type.
        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,
    },
    /// Delete every transaction and budget.
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

/// Budget subcommands.
#[derive(Debug, Subcommand)]
enum BudgetCommand {
    /// Declare a spending limit for an expense category.
    Add {
        /// Expense category name.
        #[arg(long)]
        category: String,
        /// Spending limit.
        #[arg(long)]
        limit: String,
        /// Declared period.
        #[arg(long, value_enum, default_value_t = PeriodArg::Monthly)]
        period: PeriodArg,
        /// Currency code.
        #[arg(long)]
        currency: Option<String>,
    },
    /// List budgets with their usage.
    List,
    /// Delete a budget by ID.
    Delete {
        /// Budget ID.
        id: String,
    },
}

/// Transaction type as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}

impl From<KindArg> for TransactionType {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Income => Self::Income,
            KindArg::Expense => Self::Expense,
        }
    }
}

/// Budget period as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PeriodArg {
    /// One week.
    Weekly,
    /// One month.
    Monthly,
    /// One year.
    Yearly,
}

impl From<PeriodArg> for BudgetPeriod {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Weekly => Self::Weekly,
            PeriodArg::Monthly => Self::Monthly,
            PeriodArg::Yearly => Self::Yearly,
        }
    }
}

/// Arguments for the `add` subcommand.
#[derive(Debug, Args)]
struct AddArgs {
    /// Income or expense.
    #[arg(long = "type", value_enum)]
    kind: KindArg,
    /// Positive amount.
    #[arg(long)]
    amount: String,
    /// Preset category name (see `ledger categories`).
    #[arg(long)]
    category: String,
    /// Optional note.
    #[arg(long)]
    note: Option<String>,
    /// Date (YYYY-MM-DD, local). Defaults to now.
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Currency code.
    #[arg(long)]
    currency: Option<String>,
}

/// Arguments for the `edit` subcommand.
#[derive(Debug, Args)]
struct EditArgs {
    /// Transaction ID.
    id: String,
    /// New type.
    #[arg(long = "type", value_enum)]
    kind: Option<KindArg>,
    /// New amount.
    #[arg(long)]
    amount: Option<String>,
    /// New preset category name.
    #[arg(long)]
    category: Option<String>,
    /// New note (an empty string clears it).
    #[arg(long)]
    note: Option<String>,
    /// New date (YYYY-MM-DD, local).
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

/// Arguments for the `list` subcommand.
#[derive(Debug, Args)]
struct ListArgs {
    /// Only list this type.
    #[arg(long = "type", value_enum)]
    kind: Option<KindArg>,
    /// Case-insensitive text matched against category or note.
    #[arg(long)]
    search: Option<String>,
    /// Only list transactions from the current month.
    #[arg(long)]
    month: bool,
}

/// Parses a date string in `YYYY-MM-DD` format for clap.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("{err}"))
}

/// Converts a local calendar date to the UTC instant of its local midnight.
fn local_midnight_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

/// Prints an error line to stderr and returns [`ExitCode::FAILURE`].
fn fail(message: &str) -> io::Result<ExitCode> {
    writeln!(io::stderr().lock(), "{} {message}", "error:".red().bold())?;
    Ok(ExitCode::FAILURE)
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let store = match create_store(cli.data_dir) {
        Ok(store) => store,
        Err(err) => return fail(&format!("failed to initialize storage: {err}")),
    };

    let mut ledger = Ledger::new(store);
    dispatch(&mut ledger, cli.command)
}

/// Creates the file store, using `data_dir` if provided or the default
/// XDG data directory otherwise.
fn create_store(data_dir: Option<PathBuf>) -> finance_ledger::error::Result<FileStore> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => FileStore::default_dir()?,
    };
    FileStore::new(dir)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<S: KeyValueStore>(ledger: &mut Ledger<S>, command: Command) -> io::Result<ExitCode> {
    match command {
        Command::Add(args) => cmd_add(ledger, args),
        Command::Edit(args) => cmd_edit(ledger, args),
        Command::Delete { id } => cmd_delete(ledger, &id),
        Command::List(args) => cmd_list(ledger, &args),
        Command::Budget(BudgetCommand::Add {
            category,
            limit,
            period,
            currency,
        }) => cmd_budget_add(ledger, category, &limit, period, currency),
        Command::Budget(BudgetCommand::List) => cmd_budget_list(ledger),
        Command::Budget(BudgetCommand::Delete { id }) => cmd_budget_delete(ledger, &id),
        Command::Stats => cmd_stats(ledger),
        Command::Summary => cmd_summary(ledger),
        Command::Categories { kind } => cmd_categories(kind),
        Command::Clear { yes } => cmd_clear(ledger, yes),
    }
}

/// Checks that `name` is a preset category for `kind`.
fn check_category(kind: TransactionType, name: &str) -> io::Result<bool> {
    if Category::find(kind, name).is_some() {
        return Ok(true);
    }
    let names: Vec<&str> = Category::presets(kind).iter().map(|c| c.name).collect();
    let mut err = io::stderr().lock();
    writeln!(
        err,
        "{} unknown {kind} category: {}",
        "error:".red().bold(),
        name.bold()
    )?;
    writeln!(err, "  {} one of: {}", "hint:".cyan(), names.join(", "))?;
    Ok(false)
}

/// Executes the `add` subcommand.
fn cmd_add<S: KeyValueStore>(ledger: &mut Ledger<S>, args: AddArgs) -> io::Result<ExitCode> {
    let kind = TransactionType::from(args.kind);
    let amount = match parse_amount(&args.amount) {
        Ok(amount) => amount,
        Err(err) => return fail(&err.to_string()),
    };
    if !check_category(kind, &args.category)? {
        return Ok(ExitCode::FAILURE);
    }

    let mut tx = Transaction::new(amount, kind, args.category);
    if let Some(note) = args.note {
        tx = tx.with_note(note);
    }
    if let Some(date) = args.date {
        let Some(instant) = local_midnight_utc(date) else {
            return fail(&format!("date {date} does not exist in the local time zone"));
        };
        tx = tx.with_date(instant);
    }
    if let Some(currency) = args.currency {
        tx = tx.with_currency(currency);
    }

    let id = tx.id;
    ledger.add_transaction(tx);
    writeln!(io::stdout().lock(), "{} {id}", "Added".green().bold())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `edit` subcommand.
fn cmd_edit<S: KeyValueStore>(ledger: &mut Ledger<S>, args: EditArgs) -> io::Result<ExitCode> {
    let Ok(id) = args.id.parse::<TransactionId>() else {
        return fail(&format!("invalid transaction ID: {}", args.id));
    };
    let Some(existing) = ledger.transaction(&id) else {
        return fail(&format!("transaction not found: {id}"));
    };

    let mut tx = existing.clone();
    if let Some(kind) = args.kind {
        tx.kind = kind.into();
    }
    if let Some(raw) = args.amount.as_deref() {
        match parse_amount(raw) {
            Ok(amount) => tx.amount = amount,
            Err(err) => return fail(&err.to_string()),
        }
    }
    if let Some(category) = args.category {
        tx.category = category;
    }
    if (args.kind.is_some() || tx.category != existing.category)
        && !check_category(tx.kind, &tx.category)?
    {
        return Ok(ExitCode::FAILURE);
    }
    if let Some(note) = args.note {
        tx.note = Some(note).filter(|text| !text.is_empty());
    }
    if let Some(date) = args.date {
        let Some(instant) = local_midnight_utc(date) else {
            return fail(&format!("date {date} does not exist in the local time zone"));
        };
        tx.date = instant;
    }

    ledger.update_transaction(tx);
    writeln!(io::stdout().lock(), "{} {id}", "Updated".green().bold())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `delete` subcommand.
fn cmd_delete<S: KeyValueStore>(ledger: &mut Ledger<S>, raw_id: &str) -> io::Result<ExitCode> {
    let Ok(id) = raw_id.parse::<TransactionId>() else {
        return fail(&format!("invalid transaction ID: {raw_id}"));
    };
    if ledger.transaction(&id).is_none() {
        return fail(&format!("transaction not found: {id}"));
    }
    ledger.delete_transaction(&id);
    writeln!(io::stdout().lock(), "{} {id}", "Deleted".green().bold())?;
    Ok(ExitCode::SUCCESS)
}

/// Builds a [`TransactionFilter`] from CLI arguments.
fn build_filter(args: &ListArgs) -> TransactionFilter {
    let mut filter = TransactionFilter::new();
    if let Some(kind) = args.kind {
        filter = filter.kind(kind.into());
    }
    if let Some(text) = args.search.as_deref() {
        filter = filter.search(text);
    }
    filter
}

/// Executes the `list` subcommand.
fn cmd_list<S: KeyValueStore>(ledger: &Ledger<S>, args: &ListArgs) -> io::Result<ExitCode> {
    let filter = build_filter(args);
    let txs = if args.month {
        filter.apply(&ledger.transactions_for_current_month())
    } else {
        ledger.filter_transactions(&filter)
    };
    print_transactions_table(&txs)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `budget add` subcommand.
fn cmd_budget_add<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    category: String,
    raw_limit: &str,
    period: PeriodArg,
    currency: Option<String>,
) -> io::Result<ExitCode> {
    let limit = match parse_amount(raw_limit) {
        Ok(limit) => limit,
        Err(err) => return fail(&err.to_string()),
    };
    if !check_category(TransactionType::Expense, &category)? {
        return Ok(ExitCode::FAILURE);
    }

    let mut budget = Budget::new(category, limit).with_period(period.into());
    if let Some(code) = currency {
        budget = budget.with_currency(code);
    }
    let id = budget.id;
    ledger.add_budget(budget);
    writeln!(io::stdout().lock(), "{} {id}", "Added budget".green().bold())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `budget list` subcommand.
fn cmd_budget_list<S: KeyValueStore>(ledger: &Ledger<S>) -> io::Result<ExitCode> {
    print_budgets_table(&ledger.budget_usages())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `budget delete` subcommand.
fn cmd_budget_delete<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    raw_id: &str,
) -> io::Result<ExitCode> {
    let Ok(id) = raw_id.parse::<BudgetId>() else {
        return fail(&format!("invalid budget ID: {raw_id}"));
    };
    if ledger.budget(&id).is_none() {
        return fail(&format!("budget not found: {id}"));
    }
    ledger.delete_budget(&id);
    writeln!(io::stdout().lock(), "{} {id}", "Deleted budget".green().bold())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `stats` subcommand.
fn cmd_stats<S: KeyValueStore>(ledger: &Ledger<S>) -> io::Result<ExitCode> {
    let totals = PeriodSummary {
        income: ledger.total_income(),
        expense: ledger.total_expense(),
        balance: ledger.balance(),
    };
    print_summary("All time", &totals)?;
    print_breakdown_table("Expenses by category", &ledger.expense_breakdown())?;
    print_breakdown_table("Income by category", &ledger.income_breakdown())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `summary` subcommand.
fn cmd_summary<S: KeyValueStore>(ledger: &Ledger<S>) -> io::Result<ExitCode> {
    let title = Local::now().format("%B %Y").to_string();
    print_summary(&title, &ledger.current_month_summary())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `categories` subcommand.
fn cmd_categories(kind: Option<KindArg>) -> io::Result<ExitCode> {
    let kinds: Vec<TransactionType> = kind.map_or_else(
        || TransactionType::ALL.to_vec(),
        |only| vec![only.into()],
    );
    for kind in kinds {
        print_categories_table(kind, Category::presets(kind))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `clear` subcommand.
fn cmd_clear<S: KeyValueStore>(ledger: &mut Ledger<S>, confirmed: bool) -> io::Result<ExitCode> {
    if !confirmed {
        return fail("refusing to delete all data without --yes");
    }
    let (txs, budgets) = (ledger.transactions().len(), ledger.budgets().len());
    ledger.clear_all();
    writeln!(
        io::stdout().lock(),
        "{} {txs} transactions and {budgets} budgets",
        "Deleted".green().bold()
    )?;
    Ok(ExitCode::SUCCESS)
}

// ── Output formatting ────────────────────────────────────────────────

/// Formats an amount with its currency code.
fn format_money(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

/// Prints transactions in a table.
fn print_transactions_table(txs: &[Transaction]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if txs.is_empty() {
        writeln!(out, "{}", "No transactions found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
        Cell::new("Note").fg(Color::Cyan),
        Cell::new("ID").fg(Color::Cyan),
    ]);

    for tx in txs {
        let amount_cell = match tx.kind {
            TransactionType::Income => {
                Cell::new(format!("+{}", format_money(tx.amount, &tx.currency))).fg(Color::Green)
            }
            TransactionType::Expense => {
                Cell::new(format!("-{}", format_money(tx.amount, &tx.currency))).fg(Color::Red)
            }
        };
        _ = table.add_row(vec![
            Cell::new(tx.date.with_timezone(&Local).format("%Y-%m-%d %H:%M")),
            Cell::new(&tx.category),
            amount_cell,
            Cell::new(tx.note()),
            Cell::new(tx.id).fg(Color::DarkGrey),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Transactions".green().bold(),
        format_args!("({})", txs.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints budgets and their usage in a table.
fn print_budgets_table(usages: &[(&Budget, BudgetUsage)]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if usages.is_empty() {
        writeln!(out, "{}", "No budgets found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Period").fg(Color::Cyan),
        Cell::new("Spent").fg(Color::Cyan),
        Cell::new("Limit").fg(Color::Cyan),
        Cell::new("Used").fg(Color::Cyan),
        Cell::new("ID").fg(Color::Cyan),
    ]);

    for &(budget, usage) in usages {
        let used_cell = if usage.is_over_budget {
            Cell::new(format!("{:.0}% over", usage.percentage)).fg(Color::Red)
        } else {
            Cell::new(format!("{:.0}%", usage.percentage)).fg(Color::Green)
        };
        _ = table.add_row(vec![
            Cell::new(&budget.category),
            Cell::new(budget.period),
            Cell::new(format_money(usage.spent, &budget.currency)),
            Cell::new(format_money(usage.limit, &budget.currency)),
            used_cell,
            Cell::new(budget.id).fg(Color::DarkGrey),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Budgets".green().bold(),
        format_args!("({})", usages.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints a category breakdown in a table.
fn print_breakdown_table(title: &str, rows: &[CategoryShare]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", title.green().bold())?;
    if rows.is_empty() {
        writeln!(out, "{}", "  nothing recorded".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Category").fg(Color::Cyan),
        Cell::new("Amount").fg(Color::Cyan),
        Cell::new("Share").fg(Color::Cyan),
    ]);
    for row in rows {
        _ = table.add_row(vec![
            Cell::new(&row.category),
            Cell::new(format!("{:.2}", row.amount)),
            Cell::new(format!("{:.1}%", row.percentage)),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints income, expense and balance.
fn print_summary(title: &str, summary: &PeriodSummary) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", title.green().bold())?;
    writeln!(out, "  {} {:.2}", "Income: ".bold(), summary.income)?;
    writeln!(out, "  {} {:.2}", "Expense:".bold(), summary.expense)?;
    if summary.balance < 0.0_f64 {
        writeln!(out, "  {} {:.2}", "Balance:".bold(), summary.balance.red())?;
    } else {
        writeln!(out, "  {} {:.2}", "Balance:".bold(), summary.balance.green())?;
    }
    writeln!(out)?;
    Ok(())
}

/// Prints a preset category list.
fn print_categories_table(kind: TransactionType, presets: &[Category]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Icon").fg(Color::Cyan),
        Cell::new("Color").fg(Color::Cyan),
    ]);
    for category in presets {
        _ = table.add_row(vec![
            Cell::new(category.name),
            Cell::new(category.icon),
            Cell::new(format!("{:?}", category.color).to_lowercase()),
        ]);
    }
    writeln!(out, "{} {}", "Categories:".green().bold(), kind)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // Last-resort error output; if stderr itself failed, nothing
            // we can do.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use finance_ledger::storage::InMemoryStore;

    /// Creates an empty ledger over an in-memory store.
    fn mock_ledger() -> Ledger<InMemoryStore> {
        Ledger::new(InMemoryStore::new())
    }

    /// Creates `add` arguments for an expense.
    fn add_args(amount: &str, category: &str) -> AddArgs {
        AddArgs {
            kind: KindArg::Expense,
            amount: amount.to_owned(),
            category: category.to_owned(),
            note: None,
            date: None,
            currency: None,
        }
    }

    /// Creates `edit` arguments that change nothing.
    fn edit_args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_owned(),
            kind: None,
            amount: None,
            category: None,
            note: None,
            date: None,
        }
    }

    // ── parsing tests ─────────────────────────────────────────────────

    #[test]
    fn parse_date_valid() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn parse_date_invalid() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("15.01.2024").is_err());
    }

    #[test]
    fn cli_parses_add_command() {
        let cli = Cli::try_parse_from([
            "ledger", "add", "--type", "expense", "--amount", "12.5", "--category", "Food",
        ])
        .unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(args.kind, KindArg::Expense);
        assert_eq!(args.amount, "12.5");
    }

    #[test]
    fn cli_budget_period_defaults_to_monthly() {
        let cli = Cli::try_parse_from([
            "ledger", "budget", "add", "--category", "Food", "--limit", "1000",
        ])
        .unwrap();
        let Command::Budget(BudgetCommand::Add { period, .. }) = cli.command else {
            panic!("expected budget add command");
        };
        assert_eq!(period, PeriodArg::Monthly);
    }

    #[test]
    fn kind_and_period_conversions() {
        assert_eq!(TransactionType::from(KindArg::Income), TransactionType::Income);
        assert_eq!(BudgetPeriod::from(PeriodArg::Yearly), BudgetPeriod::Yearly);
    }

    // ── create_store tests ────────────────────────────────────────────

    #[test]
    fn create_store_with_custom_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_store(Some(dir.path().to_path_buf()));
        assert!(store.is_ok());
    }

    // ── cmd_* tests ──────────────────────────────────────────────────

    #[test]
    fn cmd_add_records_transaction() {
        let mut ledger = mock_ledger();
        let mut args = add_args("1000", "Food");
        args.note = Some("groceries".to_owned());
        args.date = NaiveDate::from_ymd_opt(2024, 2, 10);
        let code = cmd_add(&mut ledger, args).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        let tx = &ledger.transactions()[0];
        assert!((tx.amount - 1000.0).abs() < f64::EPSILON);
        assert_eq!(tx.note(), "groceries");
        assert_eq!(
            tx.date.with_timezone(&Local).date_naive(),
            NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
        );
    }

    #[test]
    fn cmd_add_rejects_bad_amount() {
        let mut ledger = mock_ledger();
        let code = cmd_add(&mut ledger, add_args("-3", "Food")).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn cmd_add_rejects_unknown_category() {
        let mut ledger = mock_ledger();
        let code = cmd_add(&mut ledger, add_args("3", "Yachts")).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn cmd_edit_updates_fields() {
        let mut ledger = mock_ledger();
        let tx = Transaction::new(10.0, TransactionType::Expense, "Food");
        let id = tx.id;
        ledger.add_transaction(tx);

        let mut args = edit_args(&id.to_string());
        args.amount = Some("25".to_owned());
        args.category = Some("Health".to_owned());
        let code = cmd_edit(&mut ledger, args).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        let edited = ledger.transaction(&id).unwrap();
        assert!((edited.amount - 25.0).abs() < f64::EPSILON);
        assert_eq!(edited.category, "Health");
    }

    #[test]
    fn cmd_edit_empty_note_clears_it() {
        let mut ledger = mock_ledger();
        let tx = Transaction::new(10.0, TransactionType::Expense, "Food").with_note("lunch");
        let id = tx.id;
        ledger.add_transaction(tx);

        let mut args = edit_args(&id.to_string());
        args.note = Some(String::new());
        assert_eq!(cmd_edit(&mut ledger, args).unwrap(), ExitCode::SUCCESS);
        assert!(ledger.transaction(&id).unwrap().note.is_none());
    }

    #[test]
    fn cmd_edit_unknown_id_fails() {
        let mut ledger = mock_ledger();
        let missing = TransactionId::generate().to_string();
        assert_eq!(cmd_edit(&mut ledger, edit_args(&missing)).unwrap(), ExitCode::FAILURE);
        assert_eq!(cmd_edit(&mut ledger, edit_args("junk")).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn cmd_delete_removes_transaction() {
        let mut ledger = mock_ledger();
        let tx = Transaction::new(10.0, TransactionType::Income, "Salary");
        let id = tx.id;
        ledger.add_transaction(tx);
        let code = cmd_delete(&mut ledger, &id.to_string()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(ledger.transactions().is_empty());
        assert_eq!(cmd_delete(&mut ledger, &id.to_string()).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn cmd_list_with_filters() {
        let mut ledger = mock_ledger();
        ledger.add_transaction(Transaction::new(1.0, TransactionType::Expense, "Food"));
        let args = ListArgs {
            kind: Some(KindArg::Income),
            search: Some("food".to_owned()),
            month: true,
        };
        assert_eq!(build_filter(&args).kind, Some(TransactionType::Income));
        assert_eq!(cmd_list(&ledger, &args).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn cmd_budget_lifecycle() {
        let mut ledger = mock_ledger();
        let code = cmd_budget_add(
            &mut ledger,
            "Food".to_owned(),
            "1000",
            PeriodArg::Weekly,
            Some("EUR".to_owned()),
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        let budget = ledger.budgets()[0].clone();
        assert_eq!(budget.period, BudgetPeriod::Weekly);
        assert_eq!(budget.currency, "EUR");

        assert_eq!(cmd_budget_list(&ledger).unwrap(), ExitCode::SUCCESS);
        let code = cmd_budget_delete(&mut ledger, &budget.id.to_string()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(ledger.budgets().is_empty());
    }

    #[test]
    fn cmd_budget_add_rejects_income_category() {
        let mut ledger = mock_ledger();
        let code =
            cmd_budget_add(&mut ledger, "Salary".to_owned(), "10", PeriodArg::Monthly, None)
                .unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn cmd_reports_succeed_on_empty_and_populated_ledgers() {
        let mut ledger = mock_ledger();
        assert_eq!(cmd_stats(&ledger).unwrap(), ExitCode::SUCCESS);
        assert_eq!(cmd_summary(&ledger).unwrap(), ExitCode::SUCCESS);
        ledger.add_transaction(Transaction::new(5.0, TransactionType::Expense, "Food"));
        ledger.add_transaction(Transaction::new(50.0, TransactionType::Income, "Salary"));
        assert_eq!(cmd_stats(&ledger).unwrap(), ExitCode::SUCCESS);
        assert_eq!(cmd_summary(&ledger).unwrap(), ExitCode::SUCCESS);
        assert_eq!(cmd_categories(None).unwrap(), ExitCode::SUCCESS);
        assert_eq!(cmd_categories(Some(KindArg::Income)).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn cmd_clear_requires_confirmation() {
        let mut ledger = mock_ledger();
        ledger.add_transaction(Transaction::new(5.0, TransactionType::Expense, "Food"));
        assert_eq!(cmd_clear(&mut ledger, false).unwrap(), ExitCode::FAILURE);
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(cmd_clear(&mut ledger, true).unwrap(), ExitCode::SUCCESS);
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn format_money_uses_two_decimals() {
        assert_eq!(format_money(1234.5, "RUB"), "1234.50 RUB");
    }
}
