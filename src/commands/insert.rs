//! Handler for the `dotp add` command.

use crate::api::{self, Mode};
use crate::args::AddArgs;
use crate::commands::{load_dashboard, Out};
use crate::model::category::category_id;
use crate::model::{Category, TransactionDraft};
use crate::{gateway, Config, Result, Session};
use anyhow::bail;

/// Creates a new income or expense record. The category is given by name, as in the
/// original form's select control, and resolved to its id against the fetched
/// category list.
pub async fn add(config: &Config, mode: Mode, args: &AddArgs) -> Result<Out<()>> {
    let session = Session::require(config).await?;
    let api = api::client(config, Some(&session), mode)?;
    let dashboard = load_dashboard(config, &api, &session).await;

    let category_id = resolve_category(dashboard.categories(), args.category())?;
    let draft = TransactionDraft::new(
        None,
        args.transaction_type(),
        category_id,
        args.name(),
        args.amount(),
    );

    let refetched = gateway::submit(&api, session.token(), &draft).await?;
    Ok(Out::new_message(format!(
        "Created {} '{}' ({} transactions on record)",
        args.transaction_type(),
        args.name(),
        refetched.transactions().len()
    )))
}

/// Resolves a category name to its id, listing the valid names on failure.
pub(crate) fn resolve_category(categories: &[Category], name: &str) -> Result<u64> {
    match category_id(categories, name) {
        Some(id) => Ok(id),
        None => {
            let known: Vec<&str> = categories.iter().map(|c| c.name()).collect();
            bail!(
                "Unknown category '{name}'. Known categories: {}",
                known.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionType;
    use crate::test::TestEnv;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_add_creates_and_reports_refetched_count() {
        let env = TestEnv::logged_in().await;
        let args = AddArgs::new(
            TransactionType::Expense,
            "Food",
            "Coffee",
            Decimal::new(450, 2),
        );
        let out = add(&env.config(), Mode::Test, &args).await.unwrap();
        assert!(out.message().contains("Created expense 'Coffee'"));
        assert!(out.message().contains("9 transactions"));
    }

    #[tokio::test]
    async fn test_add_unknown_category() {
        let env = TestEnv::logged_in().await;
        let args = AddArgs::new(
            TransactionType::Expense,
            "Gambling",
            "Poker night",
            Decimal::from(100),
        );
        let err = add(&env.config(), Mode::Test, &args).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("Unknown category 'Gambling'"));
        assert!(text.contains("Food"));
    }
}
