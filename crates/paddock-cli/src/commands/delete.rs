use std::path::Path;

use paddock_core::CarId;

use crate::commands::common::{build_coordinator, open_store, require_signed_in};
use crate::error::CliError;

pub async fn run_delete(
    id: &str,
    base_url: Option<&str>,
    prefs_path: Option<&Path>,
) -> Result<(), CliError> {
    let id: CarId = id.parse().map_err(|_| CliError::InvalidId(id.to_string()))?;
    let store = open_store(prefs_path)?;
    let profile = require_signed_in(&store)?;

    let coordinator = build_coordinator(base_url)?;
    coordinator.delete(id, &profile.email).await;

    if coordinator.snapshot().toast.is_armed() {
        return Err(CliError::MutationFailed);
    }
    println!("Deleted {id}.");
    Ok(())
}
