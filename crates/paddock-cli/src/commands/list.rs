use std::path::Path;

use chrono::Utc;
use paddock_core::feed::{FetchStatus, LoadError};

use crate::commands::common::{
    build_coordinator, car_to_list_item, format_car_lines, open_store, require_signed_in,
};
use crate::error::CliError;

pub async fn run_list(
    as_json: bool,
    base_url: Option<&str>,
    prefs_path: Option<&Path>,
) -> Result<(), CliError> {
    let store = open_store(prefs_path)?;
    let profile = require_signed_in(&store)?;
    let coordinator = build_coordinator(base_url)?;

    coordinator.refresh(&profile.email).await;
    let snapshot = coordinator.snapshot();

    if snapshot.status == FetchStatus::Success {
        if as_json {
            let now = Utc::now();
            let items = snapshot
                .entries
                .iter()
                .map(|entry| car_to_list_item(entry, coordinator.gateway(), now))
                .collect::<Vec<_>>();
            println!("{}", serde_json::to_string_pretty(&items)?);
        } else {
            for line in format_car_lines(&snapshot.entries, coordinator.gateway(), store.layout()) {
                println!("{line}");
            }
        }
        return Ok(());
    }

    match snapshot.load_error {
        Some(LoadError::NoEntries) => {
            println!("{}", LoadError::NoEntries.message());
            Ok(())
        }
        _ => Err(CliError::LoadFailed),
    }
}
