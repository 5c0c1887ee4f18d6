//! These structs provide the CLI interface for the dotp CLI.

use crate::config::DEFAULT_API_URL;
use crate::model::TransactionType;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// dotp: A command-line tool for tracking personal income and expenses.
///
/// The purpose of this program is to view and manage the income and expense records
/// held by a remote dotproduct service. You log in once with your account
/// credentials, after which a session token is stored locally and used for every
/// request until you log out.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration files.
    ///
    /// This is the first command you should run when setting up the dotp CLI.
    /// Decide what directory you want to store configuration in and pass this as
    /// --dotp-home. By default, it will be $HOME/dotp.
    Init(InitArgs),
    /// Log in and store a session token locally.
    Login(LoginArgs),
    /// Notify the service and discard the local session token.
    Logout,
    /// Show income and expenses totaled per category, plus the balance.
    Summary(SummaryArgs),
    /// Show income vs expense totals for each month of a year.
    Monthly(MonthlyArgs),
    /// Show transactions as a filtered, paginated table.
    List(ListArgs),
    /// Create a new income or expense record.
    Add(AddArgs),
    /// Edit an existing transaction.
    Update(UpdateArgs),
    /// Delete one or more transactions.
    Delete(DeleteArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for
    /// instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where dotp configuration is held. Defaults to ~/dotp
    #[arg(long, env = "DOTP_HOME", default_value_t = default_dotp_home())]
    dotp_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, dotp_home: PathBuf) -> Self {
        Self {
            log_level,
            dotp_home: dotp_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn dotp_home(&self) -> &DisplayPath {
        &self.dotp_home
    }
}

/// Args for the `dotp init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The base URL of the dotproduct API. The default points at the hosted service.
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,
}

impl InitArgs {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Args for the `dotp login` command.
#[derive(Debug, Parser, Clone)]
pub struct LoginArgs {
    /// The account username.
    username: String,

    /// The account password. When omitted you are prompted for it, which keeps the
    /// password out of your shell history.
    #[arg(long)]
    password: Option<String>,
}

impl LoginArgs {
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

/// Args for the `dotp summary` command.
#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    /// Drill down into one category, listing its individual transactions. Requires
    /// --transaction-type to say which side of the ledger to look at.
    #[arg(long, requires = "transaction_type")]
    category: Option<String>,

    /// The side of the ledger to drill into: "income" or "expense".
    #[arg(long, requires = "category")]
    transaction_type: Option<TransactionType>,
}

impl SummaryArgs {
    pub fn new(category: Option<String>, transaction_type: Option<TransactionType>) -> Self {
        Self {
            category,
            transaction_type,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
    }
}

/// Args for the `dotp monthly` command.
#[derive(Debug, Parser, Clone)]
pub struct MonthlyArgs {
    /// The year to report on. Defaults to the current year.
    year: Option<i32>,
}

impl MonthlyArgs {
    pub fn new(year: Option<i32>) -> Self {
        Self { year }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }
}

/// Args for the `dotp list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// Only show transactions in this category. The name must match exactly.
    #[arg(long)]
    category: Option<String>,

    /// Only show transactions of at least this amount.
    #[arg(long)]
    min_amount: Option<Decimal>,

    /// Only show transactions of at most this amount.
    #[arg(long)]
    max_amount: Option<Decimal>,

    /// Only show transactions created on this UTC calendar day, e.g. 2025-03-05.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// The page of results to show, starting at 1.
    #[arg(long, default_value_t = 1)]
    page: usize,
}

impl ListArgs {
    pub fn new(
        category: Option<String>,
        min_amount: Option<Decimal>,
        max_amount: Option<Decimal>,
        date: Option<NaiveDate>,
        page: usize,
    ) -> Self {
        Self {
            category,
            min_amount,
            max_amount,
            date,
            page,
        }
    }

    pub fn filters(&self) -> crate::report::Filters {
        crate::report::Filters::new(
            self.category.clone(),
            self.min_amount,
            self.max_amount,
            self.date,
        )
    }

    pub fn page(&self) -> usize {
        // Default derives to zero; treat that as the first page.
        self.page.max(1)
    }
}

/// Args for the `dotp add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The kind of record to create: "income" or "expense".
    transaction_type: TransactionType,

    /// The category name, e.g. "Food". Must be one of the categories on record.
    category: String,

    /// A short description of the transaction.
    name: String,

    /// The amount, e.g. 42.50.
    amount: Decimal,
}

impl AddArgs {
    pub fn new(
        transaction_type: TransactionType,
        category: impl Into<String>,
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            transaction_type,
            category: category.into(),
            name: name.into(),
            amount,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Args for the `dotp update` command. Fields that are not given keep their current
/// values.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    /// The id of the transaction to edit, as shown by `dotp list`.
    id: u64,

    /// A new category name.
    #[arg(long)]
    category: Option<String>,

    /// A new description.
    #[arg(long)]
    name: Option<String>,

    /// A new amount.
    #[arg(long)]
    amount: Option<Decimal>,
}

impl UpdateArgs {
    pub fn new(
        id: u64,
        category: Option<String>,
        name: Option<String>,
        amount: Option<Decimal>,
    ) -> Self {
        Self {
            id,
            category,
            name,
            amount,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }
}

/// Args for the `dotp delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ids of the transactions to delete, as shown by `dotp list`.
    #[arg(required = true)]
    ids: Vec<u64>,
}

impl DeleteArgs {
    pub fn new(ids: Vec<u64>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }
}

fn default_dotp_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("dotp"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --dotp-home or DOTP_HOME instead of relying on the default \
                dotp home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("dotp")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
