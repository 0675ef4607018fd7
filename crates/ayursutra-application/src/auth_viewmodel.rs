//! Login / signup view model.

use crate::busy::BusyGuard;
use crate::notice::{Notice, Notifier};
use crate::view::AuthView;
use ayursutra_core::api::{ClinicApi, LoginRequest, RegisterRequest, RegisterResponse};
use ayursutra_core::auth::{AuthDraft, AuthField, AuthMode, CurrentUser, UserSessionRepository};
use ayursutra_core::{PortalError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

pub const SIGNUP_CONFIRMATION: &str = "Signup successful! Please login.";

/// Result of a signup or login attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Another auth request is still in flight. Nothing was sent.
    AlreadyInFlight,
    /// The account was created and the modal switched to login.
    Registered(RegisterResponse),
    /// The user is signed in and the modal closed.
    LoggedIn(CurrentUser),
    /// The request failed; mode, draft and persisted user are unchanged.
    Failed(PortalError),
}

#[derive(Debug, Default)]
struct AuthState {
    draft: AuthDraft,
    mode: AuthMode,
    modal_open: bool,
    current_user: Option<CurrentUser>,
}

pub struct AuthViewModel {
    api: Arc<dyn ClinicApi>,
    repository: Arc<dyn UserSessionRepository>,
    notifier: Arc<dyn Notifier>,
    state: RwLock<AuthState>,
    busy: AtomicBool,
}

impl AuthViewModel {
    pub fn new(
        api: Arc<dyn ClinicApi>,
        repository: Arc<dyn UserSessionRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            repository,
            notifier,
            state: RwLock::new(AuthState::default()),
            busy: AtomicBool::new(false),
        }
    }

    /// Loads the persisted user into memory.
    ///
    /// A missing or unreadable entry leaves the user signed out.
    pub async fn restore(&self) -> Option<CurrentUser> {
        let user = match self.repository.load().await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring unreadable persisted user");
                None
            }
        };
        if let Some(user) = &user {
            tracing::info!(user = %user.display_name(), "Restored signed-in user");
        }
        self.state.write().await.current_user = user.clone();
        user
    }

    pub async fn open_modal(&self) {
        self.state.write().await.modal_open = true;
    }

    pub async fn close_modal(&self) {
        self.state.write().await.modal_open = false;
    }

    pub async fn is_modal_open(&self) -> bool {
        self.state.read().await.modal_open
    }

    pub async fn mode(&self) -> AuthMode {
        self.state.read().await.mode
    }

    /// Flips between login and signup. Entered values are kept.
    pub async fn toggle_mode(&self) -> AuthMode {
        let mut state = self.state.write().await;
        state.mode = state.mode.toggled();
        state.mode
    }

    pub async fn set_field(&self, field: AuthField, value: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.draft = state.draft.with_field(field, value)?;
        Ok(())
    }

    pub async fn draft(&self) -> AuthDraft {
        self.state.read().await.draft.clone()
    }

    pub async fn current_user(&self) -> Option<CurrentUser> {
        self.state.read().await.current_user.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn view(&self) -> AuthView {
        let state = self.state.read().await;
        AuthView {
            mode: state.mode,
            modal_open: state.modal_open,
            busy: self.is_busy(),
            fields: state.mode.visible_fields(),
            draft: state.draft.clone(),
            current_user: state.current_user.clone(),
        }
    }

    /// Sends the draft to the endpoint of the current mode.
    pub async fn submit(&self) -> AuthOutcome {
        match self.mode().await {
            AuthMode::Login => self.login().await,
            AuthMode::Signup => self.signup().await,
        }
    }

    /// Registers the draft as a new account.
    ///
    /// On success the mode switches to login; the draft is kept so the
    /// username and password can be reused.
    pub async fn signup(&self) -> AuthOutcome {
        let Some(_busy) = BusyGuard::try_acquire(&self.busy) else {
            tracing::warn!("Auth request already in flight, ignoring signup");
            return AuthOutcome::AlreadyInFlight;
        };

        let request = RegisterRequest::from(&self.draft().await);
        tracing::info!(username = %request.username, role = %request.role, "Signing up");

        match self.api.register(&request).await {
            Ok(response) => {
                self.state.write().await.mode = AuthMode::Login;
                self.notifier.notify(Notice::confirmation(SIGNUP_CONFIRMATION)).await;
                AuthOutcome::Registered(response)
            }
            Err(err) => self.fail("Signup", err).await,
        }
    }

    /// Signs in with the draft's username and password.
    pub async fn login(&self) -> AuthOutcome {
        let Some(_busy) = BusyGuard::try_acquire(&self.busy) else {
            tracing::warn!("Auth request already in flight, ignoring login");
            return AuthOutcome::AlreadyInFlight;
        };

        let request = LoginRequest::from(&self.draft().await);
        tracing::info!(username = %request.username, "Logging in");

        let user = match self.api.login(&request).await {
            Ok(response) => match response.user {
                Some(user) => CurrentUser::new(user),
                None => {
                    return self
                        .fail("Login", PortalError::malformed("missing field 'user'"))
                        .await;
                }
            },
            Err(err) => return self.fail("Login", err).await,
        };

        // The in-memory sign-in stands even if the copy on disk could not be written.
        if let Err(err) = self.repository.save(&user).await {
            tracing::warn!(error = %err, "Failed to persist signed-in user");
        }

        let mut state = self.state.write().await;
        state.current_user = Some(user.clone());
        state.modal_open = false;
        tracing::info!(user = %user.display_name(), "Logged in");
        AuthOutcome::LoggedIn(user)
    }

    /// Signs out in memory. The persisted copy stays and is restored on the
    /// next start.
    pub async fn logout(&self) {
        if let Some(user) = self.state.write().await.current_user.take() {
            tracing::info!(user = %user.display_name(), "Logged out");
        }
    }

    /// Signs out and removes the persisted copy.
    pub async fn logout_and_forget(&self) -> Result<()> {
        self.logout().await;
        self.repository.clear().await
    }

    async fn fail(&self, action: &str, err: PortalError) -> AuthOutcome {
        tracing::error!(error = %err, "{} failed", action);
        self.notifier
            .notify(Notice::alert(format!("{} failed: {}", action, err.user_message())))
            .await;
        AuthOutcome::Failed(err)
    }
}
