use std::path::Path;

use paddock_core::UserProfile;

use crate::commands::common::open_store;
use crate::error::CliError;

pub async fn run_login(
    name: &str,
    email: &str,
    photo_url: &str,
    prefs_path: Option<&Path>,
) -> Result<(), CliError> {
    let profile = UserProfile::new(name.trim(), email.trim(), photo_url.trim());
    if !profile.is_signed_in() {
        return Err(CliError::EmptyEmail);
    }

    let store = open_store(prefs_path)?;
    store.save_profile(profile.clone()).await?;
    println!("Signed in as {}.", profile.email);
    Ok(())
}

pub async fn run_logout(prefs_path: Option<&Path>) -> Result<(), CliError> {
    let store = open_store(prefs_path)?;
    store.clear_profile().await?;
    println!("Signed out.");
    Ok(())
}

pub fn run_whoami(as_json: bool, prefs_path: Option<&Path>) -> Result<(), CliError> {
    let store = open_store(prefs_path)?;
    let profile = store.profile();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }
    if !profile.is_signed_in() {
        println!("Not signed in.");
        return Ok(());
    }
    println!("{} <{}>", profile.name, profile.email);
    if !profile.photo_url.is_empty() {
        println!("{}", profile.photo_url);
    }
    Ok(())
}
