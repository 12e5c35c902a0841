//! Console settings (theme and auth session) as a pure reducer.
//!
//! State transitions never perform I/O. Persistence and theme application go through a
//! [`SettingsEnvironment`] that only [`SettingsStore`] calls, after the reducer has run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Light and dark swap; `System` toggles to light.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark | Self::System => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Vendor,
    Buyer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user_id: String,
    pub role: UserRole,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub theme: Theme,
    pub auth: Option<AuthSession>,
}

impl AppSettings {
    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        self.auth
            .as_ref()
            .is_some_and(|session| session.expires_at > now)
    }

    pub fn is_admin(&self, now: DateTime<Utc>) -> bool {
        self.is_authenticated(now)
            && self
                .auth
                .as_ref()
                .is_some_and(|session| session.role == UserRole::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    SetTheme(Theme),
    ToggleTheme,
    SignIn(AuthSession),
    SignOut,
}

pub fn reduce(settings: &AppSettings, action: SettingsAction) -> AppSettings {
    let mut next = settings.clone();
    match action {
        SettingsAction::SetTheme(theme) => next.theme = theme,
        SettingsAction::ToggleTheme => next.theme = settings.theme.toggled(),
        SettingsAction::SignIn(session) => next.auth = Some(session),
        SettingsAction::SignOut => next.auth = None,
    }
    next
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("settings file {path} is not valid json: {source}")]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Side-effect port invoked at the application boundary.
pub trait SettingsEnvironment {
    fn apply_theme(&self, theme: Theme);
    fn persist(&self, settings: &AppSettings) -> Result<(), SettingsError>;
}

/// Holds current settings and forwards changes to the environment.
pub struct SettingsStore<E> {
    settings: AppSettings,
    environment: E,
}

impl<E: SettingsEnvironment> SettingsStore<E> {
    pub fn new(settings: AppSettings, environment: E) -> Self {
        environment.apply_theme(settings.theme);
        Self {
            settings,
            environment,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn dispatch(&mut self, action: SettingsAction) -> Result<&AppSettings, SettingsError> {
        let next = reduce(&self.settings, action);
        if next == self.settings {
            return Ok(&self.settings);
        }

        if next.theme != self.settings.theme {
            self.environment.apply_theme(next.theme);
        }
        self.environment.persist(&next)?;
        debug!(theme = ?next.theme, signed_in = next.auth.is_some(), "settings updated");

        self.settings = next;
        Ok(&self.settings)
    }
}

/// Environment that persists settings as JSON on disk. Theme application is a no-op here.
#[derive(Debug, Clone)]
pub struct FileSettingsEnvironment {
    path: PathBuf,
}

impl FileSettingsEnvironment {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load persisted settings, falling back to defaults when the file does not exist yet.
    pub fn load(&self) -> Result<AppSettings, SettingsError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| SettingsError::Format {
                path: self.path.clone(),
                source,
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(AppSettings::default()),
            Err(source) => Err(SettingsError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl SettingsEnvironment for FileSettingsEnvironment {
    fn apply_theme(&self, _theme: Theme) {}

    fn persist(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        let payload = serde_json::to_vec_pretty(settings).map_err(|source| SettingsError::Format {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, payload).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
