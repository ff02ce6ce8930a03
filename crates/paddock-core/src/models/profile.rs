//! Signed-in user profile and layout preference models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user.
///
/// All-empty fields denote "signed out". The email acts as the tenant
/// key that scopes every catalog operation. The profile is replaced
/// wholesale on sign-in and sign-out, never partially updated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Account email; owns every uploaded entry
    #[serde(default)]
    pub email: String,
    /// Profile photo URL
    #[serde(default)]
    pub photo_url: String,
}

impl UserProfile {
    /// Build a profile from sign-in data.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        photo_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            photo_url: photo_url.into(),
        }
    }

    /// Whether a user is currently signed in.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

/// Gallery layout preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Single-column list with full details
    #[default]
    List,
    /// Compact photo grid
    Grid,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Grid => write!(f, "grid"),
        }
    }
}
