use std::path::Path;

use paddock_core::feed::FetchStatus;
use paddock_core::media::{prepare_upload_image, UploadImageOptions};
use paddock_core::CarDraft;

use crate::commands::common::{build_coordinator, open_store, require_signed_in};
use crate::error::CliError;

pub async fn run_add(
    name: &str,
    category: &str,
    location: &str,
    image_path: &Path,
    base_url: Option<&str>,
    prefs_path: Option<&Path>,
) -> Result<(), CliError> {
    let store = open_store(prefs_path)?;
    let profile = require_signed_in(&store)?;

    let source = std::fs::read(image_path).map_err(|source| CliError::ImageRead {
        path: image_path.display().to_string(),
        source,
    })?;
    let image = prepare_upload_image(&source, UploadImageOptions::default())?;
    let draft = CarDraft::new(profile.email, name, category, location)?;

    let coordinator = build_coordinator(base_url)?;
    coordinator.create(draft, image).await;

    let snapshot = coordinator.snapshot();
    if snapshot.toast.is_armed() {
        return Err(CliError::MutationFailed);
    }
    match snapshot.status {
        FetchStatus::Success => {
            println!("Uploaded. You now have {} cars.", snapshot.entries.len());
        }
        _ => println!("Uploaded."),
    }
    Ok(())
}
