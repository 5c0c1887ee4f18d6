//! Handler for the `dotp update` command.

use crate::api::{self, Mode};
use crate::args::UpdateArgs;
use crate::commands::insert::resolve_category;
use crate::commands::{load_dashboard, Out};
use crate::model::TransactionDraft;
use crate::{gateway, Config, Result, Session};
use anyhow::Context;

/// Edits an existing transaction. Fields that are not given keep their current
/// values, mirroring the original edit form's pre-populated inputs. The update is
/// routed to the income or expense sub-resource matching the record's own type.
pub async fn update(config: &Config, mode: Mode, args: &UpdateArgs) -> Result<Out<()>> {
    let session = Session::require(config).await?;
    let api = api::client(config, Some(&session), mode)?;
    let dashboard = load_dashboard(config, &api, &session).await;

    let existing = dashboard
        .find(args.id())
        .with_context(|| format!("Transaction {} is not in the current list", args.id()))?;

    let category_id = match args.category() {
        Some(name) => resolve_category(dashboard.categories(), name)?,
        None => existing.category_id(),
    };
    let draft = TransactionDraft::new(
        Some(existing.id()),
        existing.transaction_type(),
        category_id,
        args.name().unwrap_or(existing.name()),
        args.amount().unwrap_or(existing.amount()),
    );

    gateway::submit(&api, session.token(), &draft).await?;
    Ok(Out::new_message(format!(
        "Updated {} {}",
        existing.transaction_type(),
        existing.id()
    )))
}
