//! Generation session: form state, API key lifecycle and the request state
//! machine.
//!
//! A [`Session`] owns everything the user edits plus the status of the one
//! generation that may be in flight. Every transition publishes a fresh
//! [`SessionSnapshot`] on a `tokio::sync::watch` channel, so a front end can
//! render from snapshots without reaching into the session.
//!
//! Request status moves through:
//!
//! ```text
//! Idle | Succeeded | Failed --generate--> Validating --ok--> Generating --> Succeeded | Failed
//!                                             \--rejected--> Idle
//! ```
//!
//! The API key lives in an injected [`KeyValueStore`]; it is read once at
//! start and written only when the user submits a new one.

use anyhow::Result;
use std::fmt;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::{GenerationClient, GenerationFailure};
use crate::credential::{KeyValueStore, CREDENTIAL_KEY};
use crate::error::SessionError;
use crate::generation::{ContentType, GenerationRequest, GenerationResponse, Length, Tone};
use crate::i18n::SelectedLanguages;

/// Shown in the credential prompt when an empty key is submitted.
pub const EMPTY_CREDENTIAL_MESSAGE: &str = "Please enter a valid API key";

/// Language selected when a session starts.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Everything the user edits before generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInputs {
    pub prompt: String,
    pub content_type: ContentType,
    pub tone: Tone,
    pub length: Length,
    pub languages: SelectedLanguages,
}

impl Default for FormInputs {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            content_type: ContentType::default(),
            tone: Tone::default(),
            length: Length::default(),
            languages: SelectedLanguages::from_iter([DEFAULT_LANGUAGE]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestStatus {
    Idle,
    Validating,
    Generating,
    Succeeded(GenerationResponse),
    Failed(SessionError),
}

/// Where the API key stands, as seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    Unset,
    PromptOpen,
    Set,
}

/// The API key entry prompt.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialPrompt {
    pub open: bool,
    /// Text typed so far; pre-filled with the current key on change requests
    pub input: String,
    /// Cancel is only offered when a key is already stored
    pub cancellable: bool,
    /// Validation message for the last submission
    pub message: Option<String>,
}

impl fmt::Debug for CredentialPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPrompt")
            .field("open", &self.open)
            .field("input", &format_args!("<{} chars>", self.input.chars().count()))
            .field("cancellable", &self.cancellable)
            .field("message", &self.message)
            .finish()
    }
}

/// Immutable view of a session at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub form: FormInputs,
    pub status: RequestStatus,
    /// Inline error next to the generate control
    pub error: Option<SessionError>,
    pub has_credential: bool,
    pub credential_prompt: CredentialPrompt,
}

impl SessionSnapshot {
    fn initial(has_credential: bool) -> Self {
        Self {
            form: FormInputs::default(),
            status: RequestStatus::Idle,
            error: None,
            has_credential,
            credential_prompt: CredentialPrompt {
                open: !has_credential,
                ..CredentialPrompt::default()
            },
        }
    }

    pub fn credential_state(&self) -> CredentialState {
        if self.credential_prompt.open {
            CredentialState::PromptOpen
        } else if self.has_credential {
            CredentialState::Set
        } else {
            CredentialState::Unset
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.status, RequestStatus::Generating)
    }

    /// Whether the generate control should be enabled.
    pub fn can_generate(&self) -> bool {
        !matches!(
            self.status,
            RequestStatus::Generating | RequestStatus::Validating
        ) && !self.form.prompt.trim().is_empty()
            && !self.form.languages.is_empty()
    }

    pub fn response(&self) -> Option<&GenerationResponse> {
        match &self.status {
            RequestStatus::Succeeded(response) => Some(response),
            _ => None,
        }
    }
}

/// A validated request waiting to be sent.
#[derive(Clone)]
pub struct PendingGeneration {
    pub request: GenerationRequest,
    api_key: String,
}

impl PendingGeneration {
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for PendingGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingGeneration")
            .field("request", &self.request)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Outcome of asking the session to start a generation.
#[derive(Debug, Clone)]
pub enum GenerationStart {
    /// Validation passed; send this request and report back with
    /// [`Session::finish_generation`].
    Ready(PendingGeneration),
    /// Validation failed locally; nothing should be sent.
    Rejected(SessionError),
    /// A generation is already in flight; the action is ignored.
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSubmit {
    Saved,
    /// Empty input; the prompt stays open with a message.
    Rejected,
    /// The prompt was not open.
    Ignored,
}

pub struct Session<S> {
    store: S,
    credential: Option<String>,
    state: SessionSnapshot,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl<S> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Start a session, picking up a previously stored API key.
    ///
    /// Without a stored key the credential prompt opens immediately.
    pub fn start(store: S) -> Result<Self> {
        let credential = store
            .get(CREDENTIAL_KEY)?
            .filter(|key| !key.trim().is_empty());

        if credential.is_some() {
            debug!("Using stored API key");
        } else {
            info!("No stored API key, opening credential prompt");
        }

        let state = SessionSnapshot::initial(credential.is_some());
        let (snapshots, _) = watch::channel(state.clone());

        Ok(Self {
            store,
            credential,
            state,
            snapshots,
        })
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.state
    }

    /// Receive a new snapshot after every transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn publish(&mut self) {
        self.snapshots.send_replace(self.state.clone());
    }

    // ==================== Form ====================

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.state.form.prompt = prompt.into();
        self.publish();
    }

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.state.form.content_type = content_type;
        self.publish();
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.state.form.tone = tone;
        self.publish();
    }

    pub fn set_length(&mut self, length: Length) {
        self.state.form.length = length;
        self.publish();
    }

    /// Add a target language. Returns `false` (and changes nothing) if it is
    /// already selected.
    pub fn add_language(&mut self, code: &str) -> bool {
        let changed = self.state.form.languages.add(code);
        if changed {
            self.publish();
        }
        changed
    }

    /// Remove a target language. Returns `false` (and changes nothing) if it
    /// was not selected.
    pub fn remove_language(&mut self, code: &str) -> bool {
        let changed = self.state.form.languages.remove(code);
        if changed {
            self.publish();
        }
        changed
    }

    // ==================== Credential ====================

    pub fn set_credential_input(&mut self, input: impl Into<String>) {
        self.state.credential_prompt.input = input.into();
        self.publish();
    }

    /// Persist the key typed into the open prompt.
    ///
    /// # Errors
    /// Fails only if the store cannot be written; the prompt stays open.
    pub fn submit_credential(&mut self) -> Result<CredentialSubmit> {
        if !self.state.credential_prompt.open {
            debug!("Credential submitted with no prompt open, ignoring");
            return Ok(CredentialSubmit::Ignored);
        }

        let candidate = self.state.credential_prompt.input.trim().to_string();
        if candidate.is_empty() {
            self.state.credential_prompt.message = Some(EMPTY_CREDENTIAL_MESSAGE.to_string());
            self.publish();
            return Ok(CredentialSubmit::Rejected);
        }

        self.store.set(CREDENTIAL_KEY, &candidate)?;
        info!("API key saved");

        self.credential = Some(candidate);
        self.state.has_credential = true;
        self.state.credential_prompt = CredentialPrompt::default();
        self.publish();
        Ok(CredentialSubmit::Saved)
    }

    /// Re-open the prompt, pre-filled with the current key.
    pub fn request_credential_change(&mut self) {
        self.state.credential_prompt = CredentialPrompt {
            open: true,
            input: self.credential.clone().unwrap_or_default(),
            cancellable: self.credential.is_some(),
            message: None,
        };
        self.publish();
    }

    /// Close the prompt without saving. Refused when no key is stored yet.
    pub fn cancel_credential_prompt(&mut self) -> bool {
        let prompt = &self.state.credential_prompt;
        if !prompt.open || !prompt.cancellable {
            return false;
        }
        self.state.credential_prompt = CredentialPrompt::default();
        self.publish();
        true
    }

    fn open_credential_prompt(&mut self) {
        self.state.credential_prompt = CredentialPrompt {
            open: true,
            input: String::new(),
            cancellable: self.credential.is_some(),
            message: None,
        };
    }

    // ==================== Generation ====================

    /// Validate the form and, if it passes, move to `Generating`.
    ///
    /// Ignored while a generation is already running.
    pub fn begin_generation(&mut self) -> GenerationStart {
        if matches!(
            self.state.status,
            RequestStatus::Generating | RequestStatus::Validating
        ) {
            debug!("Generation already in flight, ignoring request");
            return GenerationStart::Busy;
        }

        self.state.status = RequestStatus::Validating;
        self.publish();

        let checked = match &self.credential {
            None => Err(SessionError::MissingCredential),
            Some(_) if self.state.form.prompt.trim().is_empty() => Err(SessionError::EmptyPrompt),
            Some(_) if self.state.form.languages.is_empty() => {
                Err(SessionError::NoLanguageSelected)
            }
            Some(key) => Ok(key.clone()),
        };

        let api_key = match checked {
            Ok(key) => key,
            Err(error) => {
                debug!("Generation rejected: {}", error);
                if error == SessionError::MissingCredential {
                    self.open_credential_prompt();
                }
                self.state.status = RequestStatus::Idle;
                self.state.error = Some(error.clone());
                self.publish();
                return GenerationStart::Rejected(error);
            }
        };

        let form = &self.state.form;
        let request = GenerationRequest {
            prompt: form.prompt.trim().to_string(),
            content_type: form.content_type,
            target_languages: form.languages.clone(),
            tone: form.tone,
            length: form.length,
        };

        self.state.status = RequestStatus::Generating;
        self.state.error = None;
        self.publish();

        GenerationStart::Ready(PendingGeneration { request, api_key })
    }

    /// Record the outcome of the request handed out by
    /// [`begin_generation`](Self::begin_generation).
    pub fn finish_generation(&mut self, outcome: Result<GenerationResponse, GenerationFailure>) {
        if !self.state.is_generating() {
            warn!("Generation result arrived with nothing in flight, dropping it");
            return;
        }

        match outcome {
            Ok(response) => {
                info!(
                    "Generation succeeded with {} translation(s)",
                    response.translations.len()
                );
                self.state.status = RequestStatus::Succeeded(response);
                self.state.error = None;
            }
            Err(GenerationFailure::Unauthorized) => {
                // The stored key is kept; the user decides whether to replace it
                warn!("API key rejected, re-opening credential prompt");
                self.open_credential_prompt();
                self.state.status = RequestStatus::Failed(SessionError::InvalidCredential);
                self.state.error = Some(SessionError::InvalidCredential);
            }
            Err(failure) => {
                warn!("Generation failed: {}", failure);
                let error = SessionError::GenerationError(failure.user_message());
                self.state.status = RequestStatus::Failed(error.clone());
                self.state.error = Some(error);
            }
        }
        self.publish();
    }

    /// Validate, send one request through `client`, and record the outcome.
    pub async fn generate(&mut self, client: &GenerationClient) -> &RequestStatus {
        if let GenerationStart::Ready(pending) = self.begin_generation() {
            let outcome = client.generate(pending.api_key(), &pending.request).await;
            self.finish_generation(outcome);
        }
        &self.state.status
    }

    /// Clipboard writes are best effort: log and move on.
    pub fn note_copy_failure(&self, target: &str, cause: impl fmt::Display) {
        warn!(
            "{} ({})",
            SessionError::CopyFailure(cause.to_string()),
            target
        );
    }
}
