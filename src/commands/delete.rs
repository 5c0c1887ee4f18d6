//! Handler for the `dotp delete` command.

use crate::api::{self, Mode};
use crate::args::DeleteArgs;
use crate::commands::{load_dashboard, Out};
use crate::{gateway, Config, Result, Session};

/// Deletes one or more transactions in a single all-or-nothing batch. Each id is
/// routed to the income or expense endpoint matching the record's own type, and a
/// full refetch follows the batch.
pub async fn delete(config: &Config, mode: Mode, args: &DeleteArgs) -> Result<Out<()>> {
    let session = Session::require(config).await?;
    let api = api::client(config, Some(&session), mode)?;
    let dashboard = load_dashboard(config, &api, &session).await;

    let (count, refetched) =
        gateway::delete(&api, session.token(), &dashboard, args.ids().to_vec()).await?;

    Ok(Out::new_message(format!(
        "Deleted {} transaction{} ({} remaining)",
        count,
        if count == 1 { "" } else { "s" },
        refetched.transactions().len()
    )))
}
