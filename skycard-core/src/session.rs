//! Lookup session: the single "current weather" slot and its loading flag.
//!
//! State only changes through [`Session::begin`], [`Session::complete`] and
//! [`Session::back`], so a session can never be loading and showing a record
//! at once.

use tracing::{debug, info};

use crate::{
    LookupError,
    model::WeatherRecord,
    provider::{WeatherProvider, lookup},
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Loaded(WeatherRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

/// A short message for the user, shown once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub severity: Severity,
}

impl Notification {
    pub fn updated(city: &str) -> Self {
        Self {
            title: "Weather updated".to_string(),
            description: Some(format!("Showing weather for {city}")),
            severity: Severity::Info,
        }
    }

    /// The one notification shown for any failed submit; detail stays in `err`.
    pub fn failed(err: &LookupError) -> Self {
        match err {
            LookupError::EmptyQuery => Self {
                title: err.user_message().to_string(),
                description: None,
                severity: Severity::Destructive,
            },
            _ => Self {
                title: "Error".to_string(),
                description: Some(err.user_message().to_string()),
                severity: Severity::Destructive,
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(d) => write!(f, "{}: {}", self.title, d),
            None => f.write_str(&self.title),
        }
    }
}

/// Proof that a lookup was started. Only [`Session::begin`] hands these out.
#[derive(Debug)]
#[must_use]
pub struct PendingLookup {
    query: String,
}

impl PendingLookup {
    /// The trimmed query to look up.
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug)]
pub enum Submission {
    Started(PendingLookup),
    /// Input failed validation; nothing was sent.
    Rejected(Notification),
    /// A lookup is already in flight.
    Ignored,
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn record(&self) -> Option<&WeatherRecord> {
        match &self.state {
            SessionState::Loaded(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    pub fn begin(&mut self, query: &str) -> Submission {
        if self.is_loading() {
            debug!("submit ignored while a lookup is in flight");
            return Submission::Ignored;
        }

        let query = query.trim();
        if query.is_empty() {
            return Submission::Rejected(Notification::failed(&LookupError::EmptyQuery));
        }

        self.state = SessionState::Loading;
        Submission::Started(PendingLookup { query: query.to_string() })
    }

    pub fn complete(
        &mut self,
        pending: PendingLookup,
        outcome: Result<WeatherRecord, LookupError>,
    ) -> Notification {
        match outcome {
            Ok(record) => {
                info!(query = pending.query(), city = %record.city, "weather loaded");
                let notification = Notification::updated(&record.city);
                self.state = SessionState::Loaded(record);
                notification
            }
            Err(e) => {
                debug!(query = pending.query(), error = %e, "lookup ended without a record");
                self.state = SessionState::Idle;
                Notification::failed(&e)
            }
        }
    }

    /// Run one full lookup. Returns `None` when the submit was ignored.
    pub async fn submit(
        &mut self,
        provider: &dyn WeatherProvider,
        query: &str,
    ) -> Option<Notification> {
        match self.begin(query) {
            Submission::Started(pending) => {
                let outcome = lookup(provider, pending.query()).await;
                Some(self.complete(pending, outcome))
            }
            Submission::Rejected(notification) => Some(notification),
            Submission::Ignored => None,
        }
    }

    /// Dismiss the shown record.
    pub fn back(&mut self) {
        if let SessionState::Loaded(_) = self.state {
            self.state = SessionState::Idle;
        }
    }
}
