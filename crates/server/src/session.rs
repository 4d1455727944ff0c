//! # Session Orchestration
//!
//! Each browser session owns a [`Session`]: the form values, the last generated
//! content, an optional manually entered API key and a small state machine:
//!
//! ```text
//! Idle -> Validating -> Generating -> Displaying
//!   ^          |              |
//!   +----------+--------------+   (validation error / generation failure)
//! ```
//!
//! `reset` returns to `Idle` from any state. The session lock is never held
//! while the completion request is in flight; instead the session refuses a
//! second submission until the first completes (even across a reset), and a
//! generation that finishes after a reset is dropped.

use contentgen::{
    Credential, ContentGenerator, ContentType, GeneratedContent, GenerationError,
    GenerationRequest, GenerationResult, ValidationError,
};
use contentgen_pdf::{RenderError, RenderedDocument};
use serde::Serialize;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock},
    time::{Duration, Instant},
};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Validating,
    Generating,
    Displaying,
}

/// A one-shot message for the user, shown on the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Error(String),
    Info(String),
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Content is already being generated for this session. Please wait.")]
    Busy,
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("The session was reset before generation finished.")]
    Superseded,
    #[error("There is no generated content to download yet.")]
    NoContent,
    #[error("Could not create the PDF: {0}")]
    Render(#[from] RenderError),
}

/// Proof that a submission entered `Generating`; redeemed by [`Session::complete`].
#[derive(Debug)]
pub struct Ticket {
    epoch: u64,
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    content_type: ContentType,
    sector: String,
    topic: String,
    result: Option<GeneratedContent>,
    credential: Option<Credential>,
    notice: Option<Notice>,
    // Bumped by every reset so late generations can be told apart.
    epoch: u64,
    // Set from `begin_submission` until `complete`; survives `reset`.
    in_flight: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn result(&self) -> Option<&GeneratedContent> {
        self.result.as_ref()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Whether a completion request started by this session is still pending.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Removes and returns the pending notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Caches a manually entered API key. A blank value clears it.
    pub fn set_credential(&mut self, secret: &str) {
        self.credential = Credential::new(secret);
        self.notice = Some(match self.credential {
            Some(_) => Notice::Info("API key saved for this session.".to_string()),
            None => Notice::Info("API key cleared.".to_string()),
        });
    }

    /// Records the form and moves towards `Generating`.
    ///
    /// On invalid input the session goes back to `Idle` with an error notice.
    /// Any previously generated content is kept until replaced or reset.
    pub fn begin_submission(
        &mut self,
        content_type: ContentType,
        sector: &str,
        topic: &str,
    ) -> Result<(GenerationRequest, Ticket), SessionError> {
        if self.in_flight {
            self.notice = Some(Notice::Error(SessionError::Busy.to_string()));
            return Err(SessionError::Busy);
        }

        self.content_type = content_type;
        self.sector = sector.to_string();
        self.topic = topic.to_string();
        self.state = SessionState::Validating;

        match GenerationRequest::new(content_type, sector, topic) {
            Ok(request) => {
                self.state = SessionState::Generating;
                self.in_flight = true;
                self.notice = None;
                Ok((request, Ticket { epoch: self.epoch }))
            }
            Err(e) => {
                debug!(error = %e, "Submission failed validation.");
                self.state = SessionState::Idle;
                self.notice = Some(Notice::Error(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Applies the outcome of the generation started with `ticket`.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: GenerationResult,
    ) -> Result<&GeneratedContent, SessionError> {
        self.in_flight = false;
        if ticket.epoch != self.epoch {
            info!("Discarding generation that finished after a reset.");
            return Err(SessionError::Superseded);
        }

        match outcome {
            Ok(content) => {
                self.state = SessionState::Displaying;
                self.notice = None;
                Ok(self.result.insert(content))
            }
            Err(e) => {
                warn!(error = %e, "Generation failed.");
                self.state = SessionState::Idle;
                self.notice = Some(Notice::Error(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Clears the form, the generated content and any notice, and returns to
    /// `Idle`. A manually entered API key is kept, and a pending generation
    /// still blocks new submissions until it completes.
    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.state = SessionState::Idle;
        self.content_type = ContentType::default();
        self.sector.clear();
        self.topic.clear();
        self.result = None;
        self.notice = None;
    }

    /// Renders the stored content as a fresh PDF. Returns the download file
    /// name alongside the document.
    pub fn render_download(&self) -> Result<(String, RenderedDocument), SessionError> {
        let content = self.result.as_ref().ok_or(SessionError::NoContent)?;
        let document = contentgen_pdf::render(&content.text)?;
        Ok((content.content_type.pdf_file_name(), document))
    }
}

/// A shared, lockable session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Locks a session, recovering the data if a previous holder panicked.
pub fn lock(handle: &SessionHandle) -> MutexGuard<'_, Session> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs one submission end to end: validate, generate, record the outcome.
pub async fn submit(
    generator: &ContentGenerator,
    handle: &SessionHandle,
    content_type: ContentType,
    sector: &str,
    topic: &str,
) -> Result<GeneratedContent, SessionError> {
    let (request, ticket, credential) = {
        let mut session = lock(handle);
        let (request, ticket) = session.begin_submission(content_type, sector, topic)?;
        (request, ticket, session.credential().cloned())
    };

    let outcome = generator.generate(&request, credential.as_ref()).await;

    let mut session = lock(handle);
    session.complete(ticket, outcome).cloned()
}

struct StoredSession {
    handle: SessionHandle,
    last_seen: Instant,
}

/// All live sessions, keyed by the id carried in the session cookie.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, StoredSession>>>,
    max_idle: Duration,
}

impl SessionStore {
    pub fn new(max_idle: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_idle,
        }
    }

    /// Returns the session for `id`, or a new one with a fresh id.
    pub fn get_or_create(&self, id: Option<&str>) -> (String, SessionHandle) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let max_idle = self.max_idle;
        sessions.retain(|_, stored| now.duration_since(stored.last_seen) <= max_idle);

        if let Some(id) = id {
            if let Some(stored) = sessions.get_mut(id) {
                stored.last_seen = now;
                return (id.to_string(), stored.handle.clone());
            }
        }

        let id = Uuid::new_v4().to_string();
        let handle = Arc::new(Mutex::new(Session::new()));
        sessions.insert(
            id.clone(),
            StoredSession {
                handle: handle.clone(),
                last_seen: now,
            },
        );
        debug!(session_id = %id, "Created session.");
        (id, handle)
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generating_session() -> (Session, Ticket) {
        let mut session = Session::new();
        let (_, ticket) = session
            .begin_submission(ContentType::BlogPost, "Fintech", "Open Banking")
            .unwrap();
        (session, ticket)
    }

    fn content(text: &str) -> GeneratedContent {
        GeneratedContent {
            content_type: ContentType::BlogPost,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_new_session_is_idle_with_press_release() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.content_type(), ContentType::PressRelease);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_empty_fields_return_to_idle_with_notice() {
        let mut session = Session::new();
        let err = session
            .begin_submission(ContentType::GuestColumn, "Fintech", "   ")
            .unwrap_err();

        assert!(matches!(err, SessionError::Validation(_)));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(
            session.notice(),
            Some(&Notice::Error("Please enter both sector and topic!".to_string()))
        );
        assert_eq!(session.content_type(), ContentType::GuestColumn);
        assert_eq!(session.sector(), "Fintech");
    }

    #[test]
    fn test_valid_submission_enters_generating() {
        let (session, _) = generating_session();
        assert_eq!(session.state(), SessionState::Generating);
    }

    #[test]
    fn test_second_submission_while_generating_is_busy() {
        let (mut session, _) = generating_session();
        let err = session
            .begin_submission(ContentType::BlogPost, "Fintech", "Payments")
            .unwrap_err();
        assert!(matches!(err, SessionError::Busy));
        assert_eq!(session.state(), SessionState::Generating);
        assert_eq!(session.topic(), "Open Banking");
    }

    #[test]
    fn test_success_moves_to_displaying_and_stores_result() {
        let (mut session, ticket) = generating_session();
        session.complete(ticket, Ok(content("Blog body"))).unwrap();

        assert_eq!(session.state(), SessionState::Displaying);
        assert_eq!(session.result().unwrap().text, "Blog body");
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_failure_returns_to_idle_with_specific_reason() {
        let (mut session, ticket) = generating_session();
        let err = session
            .complete(ticket, Err(GenerationError::EmptyResponse))
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Generation(GenerationError::EmptyResponse)
        ));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.result().is_none());
        match session.notice() {
            Some(Notice::Error(msg)) => assert!(msg.contains("empty response")),
            other => panic!("expected error notice, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let (mut session, ticket) = generating_session();
        session.complete(ticket, Ok(content("first"))).unwrap();

        let (_, ticket) = session
            .begin_submission(ContentType::BlogPost, "Fintech", "Payments")
            .unwrap();
        let _ = session.complete(ticket, Err(GenerationError::MissingCredential));

        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.result().unwrap().text, "first");
    }

    #[test]
    fn test_reset_from_every_state() {
        let mut idle = Session::new();
        idle.begin_submission(ContentType::SocialMedia, "", "x").ok();

        let (generating, _) = generating_session();

        let (mut displaying, ticket) = generating_session();
        displaying.complete(ticket, Ok(content("text"))).unwrap();

        for mut session in [idle, generating, displaying] {
            session.reset();
            assert_eq!(session.state(), SessionState::Idle);
            assert_eq!(session.content_type(), ContentType::PressRelease);
            assert_eq!(session.sector(), "");
            assert_eq!(session.topic(), "");
            assert!(session.result().is_none());
            assert!(session.notice().is_none());
        }
    }

    #[test]
    fn test_reset_keeps_manual_credential() {
        let mut session = Session::new();
        session.set_credential("sk-manual");
        session.reset();
        assert_eq!(session.credential().unwrap().expose(), "sk-manual");
    }

    #[test]
    fn test_generation_finishing_after_reset_is_discarded() {
        let (mut session, ticket) = generating_session();
        session.reset();

        let err = session.complete(ticket, Ok(content("late"))).unwrap_err();

        assert!(matches!(err, SessionError::Superseded));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_reset_does_not_allow_a_second_request_in_flight() {
        let (mut session, ticket) = generating_session();
        session.reset();
        assert!(session.is_in_flight());

        let err = session
            .begin_submission(ContentType::BlogPost, "Fintech", "Payments")
            .unwrap_err();
        assert!(matches!(err, SessionError::Busy));
        assert_eq!(session.state(), SessionState::Idle);

        let err = session.complete(ticket, Ok(content("late"))).unwrap_err();
        assert!(matches!(err, SessionError::Superseded));
        assert!(!session.is_in_flight());

        let (request, _) = session
            .begin_submission(ContentType::BlogPost, "Fintech", "Payments")
            .unwrap();
        assert_eq!(request.topic(), "Payments");
        assert!(session.is_in_flight());
    }

    #[test]
    fn test_download_requires_content() {
        let session = Session::new();
        assert!(matches!(
            session.render_download(),
            Err(SessionError::NoContent)
        ));
    }

    #[test]
    fn test_download_uses_content_type_file_name() {
        let (mut session, ticket) = generating_session();
        session
            .complete(ticket, Ok(content("# Title\nBody")))
            .unwrap();

        let (file_name, document) = session.render_download().unwrap();
        assert_eq!(file_name, "blog_post.pdf");
        assert!(document.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_store_reuses_known_ids_and_creates_unknown_ones() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (id, first) = store.get_or_create(None);
        let (same_id, again) = store.get_or_create(Some(&id));
        assert_eq!(id, same_id);
        assert!(Arc::ptr_eq(&first, &again));

        let (other_id, _) = store.get_or_create(Some("not-a-session"));
        assert_ne!(other_id, id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_drops_idle_sessions() {
        let store = SessionStore::new(Duration::ZERO);
        let (id, _) = store.get_or_create(None);
        std::thread::sleep(Duration::from_millis(5));
        let (new_id, _) = store.get_or_create(Some(&id));
        assert_ne!(id, new_id);
        assert_eq!(store.len(), 1);
    }
}
