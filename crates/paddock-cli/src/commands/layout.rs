use std::path::Path;

use paddock_core::LayoutMode;

use crate::commands::common::open_store;
use crate::error::CliError;

pub async fn run_layout(mode: Option<LayoutMode>, prefs_path: Option<&Path>) -> Result<(), CliError> {
    let store = open_store(prefs_path)?;
    match mode {
        Some(mode) => {
            store.save_layout(mode).await?;
            println!("Layout set to {mode}.");
        }
        None => println!("{}", store.layout()),
    }
    Ok(())
}
