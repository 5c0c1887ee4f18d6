//! Handler for the `dotp list` command: the filtered, paginated transaction table.

use crate::api::{self, Mode};
use crate::args::ListArgs;
use crate::commands::{fmt_amount, load_dashboard, Out};
use crate::model::category::{category_name, UNKNOWN_CATEGORY};
use crate::model::Transaction;
use crate::report::{self, PAGE_SIZE};
use crate::{Config, Result, Session};
use comfy_table::Table;

/// Applies the filter predicate to the merged transaction list and shows one page of
/// seven rows. Out-of-range pages show an empty page, not an error.
pub async fn list(config: &Config, mode: Mode, args: &ListArgs) -> Result<Out<Vec<Transaction>>> {
    let session = Session::require(config).await?;
    let api = api::client(config, Some(&session), mode)?;
    let dashboard = load_dashboard(config, &api, &session).await;

    let filtered = report::apply(
        dashboard.transactions(),
        dashboard.categories(),
        &args.filters(),
    );
    if filtered.is_empty() {
        let message = if args.filters().is_empty() {
            "No transactions on record".to_string()
        } else {
            "No transactions match the current filters".to_string()
        };
        return Ok(Out::new(message, Vec::new()));
    }

    let page = report::page(&filtered, args.page());
    let mut table = Table::new();
    table.set_header(vec!["ID", "Type", "Category", "Name", "Amount", "Date"]);
    for tx in page {
        table.add_row(vec![
            tx.id().to_string(),
            tx.transaction_type().to_string(),
            category_name(dashboard.categories(), tx.category_id())
                .unwrap_or(UNKNOWN_CATEGORY)
                .to_string(),
            tx.name().to_string(),
            fmt_amount(tx.amount()),
            tx.created_at().date_naive().to_string(),
        ]);
    }

    let message = format!(
        "{table}\nPage {} of {} ({} transaction{}, {} per page)",
        args.page(),
        report::page_count(filtered.len()),
        filtered.len(),
        if filtered.len() == 1 { "" } else { "s" },
        PAGE_SIZE,
    );
    Ok(Out::new(message, page.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_list_first_page() {
        let env = TestEnv::logged_in().await;
        let out = list(&env.config(), Mode::Test, &ListArgs::default())
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().len(), PAGE_SIZE);
        assert!(out.message().contains("Page 1 of 2 (8 transactions"));
    }

    #[tokio::test]
    async fn test_list_page_past_the_end_is_empty_not_an_error() {
        let env = TestEnv::logged_in().await;
        let args = ListArgs::new(None, None, None, None, 5);
        let out = list(&env.config(), Mode::Test, &args).await.unwrap();
        assert!(out.structure().unwrap().is_empty());
        assert!(out.message().contains("Page 5 of 2"));
    }

    #[tokio::test]
    async fn test_list_filters_combine() {
        let env = TestEnv::logged_in().await;
        let args = ListArgs::new(
            Some("Food".to_string()),
            Some(Decimal::from(50)),
            None,
            None,
            1,
        );
        let out = list(&env.config(), Mode::Test, &args).await.unwrap();
        let rows = out.structure().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|t| t.amount() >= Decimal::from(50)));
    }

    #[tokio::test]
    async fn test_list_date_filter_no_match() {
        let env = TestEnv::logged_in().await;
        let args = ListArgs::new(
            None,
            None,
            None,
            NaiveDate::from_ymd_opt(2030, 1, 1),
            1,
        );
        let out = list(&env.config(), Mode::Test, &args).await.unwrap();
        assert!(out.structure().unwrap().is_empty());
        assert!(out.message().contains("No transactions match"));
    }
}
