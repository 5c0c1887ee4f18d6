//! Handler for the `dotp summary` command: the dashboard's headline view.

use crate::api::{self, Mode};
use crate::args::SummaryArgs;
use crate::commands::{fmt_amount, load_dashboard, Out};
use crate::model::TransactionType;
use crate::report::{self, CategoryTotal};
use crate::{Config, Result, Session};
use comfy_table::Table;

/// Per-category income and expense breakdowns plus the balance, or, when a category
/// and type are given, the per-transaction drill-down behind one chart slice.
pub async fn summary(config: &Config, mode: Mode, args: &SummaryArgs) -> Result<Out<Vec<CategoryTotal>>> {
    let session = Session::require(config).await?;
    let api = api::client(config, Some(&session), mode)?;
    let dashboard = load_dashboard(config, &api, &session).await;

    if let (Some(category), Some(transaction_type)) = (args.category(), args.transaction_type()) {
        let rows = report::drill_down(
            dashboard.transactions(),
            dashboard.categories(),
            category,
            transaction_type,
        );
        let title = format!("{} - {category}", transaction_type.to_string().to_uppercase());
        let message = format!("{title}\n{}", totals_table(&rows, "Name"));
        return Ok(Out::new(message, rows));
    }

    let (incomes, expenses): (Vec<_>, Vec<_>) = dashboard
        .transactions()
        .iter()
        .cloned()
        .partition(|t| t.transaction_type() == TransactionType::Income);

    let income_totals = report::by_category(&incomes, dashboard.categories());
    let expense_totals = report::by_category(&expenses, dashboard.categories());
    let total_income = report::total(&income_totals);
    let total_expense = report::total(&expense_totals);

    let message = format!(
        "Income (total {})\n{}\n\nExpense (total {})\n{}\n\nBalance: {}",
        fmt_amount(total_income),
        totals_table(&income_totals, "Category"),
        fmt_amount(total_expense),
        totals_table(&expense_totals, "Category"),
        fmt_amount(total_income - total_expense),
    );

    let mut all = income_totals;
    all.extend(expense_totals);
    Ok(Out::new(message, all))
}

/// Renders category totals as a two-column table, or the "no data" placeholder.
fn totals_table(totals: &[CategoryTotal], label: &str) -> String {
    if totals.is_empty() {
        return "No data available".to_string();
    }
    let mut table = Table::new();
    table.set_header(vec![label, "Amount"]);
    for t in totals {
        table.add_row(vec![t.category().to_string(), fmt_amount(t.amount())]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_summary_renders_both_sections_and_balance() {
        let env = TestEnv::logged_in().await;
        let out = summary(&env.config(), Mode::Test, &SummaryArgs::new(None, None))
            .await
            .unwrap();
        let message = out.message();
        assert!(message.contains("Income (total 6,400.00)"));
        assert!(message.contains("Expense (total"));
        assert!(message.contains("Balance:"));
        assert!(message.contains("Salary"));
        assert!(!message.contains("No data available"));
    }

    #[tokio::test]
    async fn test_summary_requires_login() {
        let env = TestEnv::new().await;
        let result = summary(&env.config(), Mode::Test, &SummaryArgs::new(None, None)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_summary_drill_down() {
        let env = TestEnv::logged_in().await;
        let args = SummaryArgs::new(Some("Food".to_string()), Some(TransactionType::Expense));
        let out = summary(&env.config(), Mode::Test, &args).await.unwrap();
        assert!(out.message().starts_with("EXPENSE - Food"));
        let rows = out.structure().unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().any(|r| r.category() == "Takeout"));
    }

    #[tokio::test]
    async fn test_summary_drill_down_empty_shows_placeholder() {
        let env = TestEnv::logged_in().await;
        let args = SummaryArgs::new(Some("Rent".to_string()), Some(TransactionType::Income));
        let out = summary(&env.config(), Mode::Test, &args).await.unwrap();
        assert!(out.message().contains("No data available"));
    }
}
