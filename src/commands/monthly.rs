//! Handler for the `dotp monthly` command: income vs expense per calendar month.

use crate::api::{self, Mode};
use crate::args::MonthlyArgs;
use crate::commands::{fmt_amount, load_dashboard, Out};
use crate::report::{self, MonthlyTotal};
use crate::{Config, Result, Session};
use chrono::Datelike;
use comfy_table::Table;

/// The budget-vs-expense view: exactly twelve rows (Jan through Dec) for the
/// selected year, months without data at zero.
pub async fn monthly(config: &Config, mode: Mode, args: &MonthlyArgs) -> Result<Out<Vec<MonthlyTotal>>> {
    let session = Session::require(config).await?;
    let api = api::client(config, Some(&session), mode)?;
    let dashboard = load_dashboard(config, &api, &session).await;

    let year = args.year().unwrap_or_else(|| chrono::Utc::now().year());
    let months = report::by_month(dashboard.transactions(), year);

    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expense"]);
    for m in &months {
        table.add_row(vec![
            m.label().to_string(),
            fmt_amount(m.income()),
            fmt_amount(m.expense()),
        ]);
    }

    let message = format!("{year}\n{table}");
    Ok(Out::new(message, months.to_vec()))
}
