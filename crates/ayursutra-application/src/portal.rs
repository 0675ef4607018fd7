//! Portal facade wiring both view models from configuration.

use crate::auth_viewmodel::AuthViewModel;
use crate::consultation_viewmodel::ConsultationViewModel;
use crate::notice::{NoticeLog, Notifier};
use ayursutra_core::Result;
use ayursutra_core::api::ClinicApi;
use ayursutra_core::auth::UserSessionRepository;
use ayursutra_core::config::PortalConfig;
use ayursutra_infrastructure::storage::LocalStorage;
use ayursutra_infrastructure::{AyurPaths, LocalStorageUserRepository};
use ayursutra_interaction::HttpClinicApi;
use std::sync::Arc;

/// The consultation view model plus, when enabled, the auth view model.
///
/// Both share one API client and one notice log.
pub struct Portal {
    consultation: ConsultationViewModel,
    auth: Option<AuthViewModel>,
    notices: Arc<NoticeLog>,
}

impl Portal {
    /// Wires the portal around explicit collaborators.
    pub fn new(
        config: &PortalConfig,
        api: Arc<dyn ClinicApi>,
        repository: Arc<dyn UserSessionRepository>,
        notices: Arc<NoticeLog>,
    ) -> Self {
        let notifier: Arc<dyn Notifier> = notices.clone();

        let consultation = ConsultationViewModel::new(api.clone(), notifier.clone())
            .with_policy(config.features.response_policy())
            .with_alert_on_failure(config.features.alert_on_failure);

        let auth = config
            .features
            .auth_enabled
            .then(|| AuthViewModel::new(api, repository, notifier));

        Self {
            consultation,
            auth,
            notices,
        }
    }

    /// Builds the HTTP client and the file-backed user repository from
    /// `config`.
    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        let api = HttpClinicApi::from_config(&config.api)?;
        let storage_path = AyurPaths::local_storage_for(&config.storage)?;
        tracing::debug!(path = %storage_path.display(), "Using local storage file");
        let repository =
            LocalStorageUserRepository::new(LocalStorage::new(storage_path), config.storage.user_key.clone());

        Ok(Self::new(
            config,
            Arc::new(api),
            Arc::new(repository),
            Arc::new(NoticeLog::new()),
        ))
    }

    /// Restores the persisted user, if auth is enabled.
    pub async fn start(&self) {
        if let Some(auth) = &self.auth {
            auth.restore().await;
        }
    }

    pub fn consultation(&self) -> &ConsultationViewModel {
        &self.consultation
    }

    /// `None` when auth is disabled.
    pub fn auth(&self) -> Option<&AuthViewModel> {
        self.auth.as_ref()
    }

    pub fn notices(&self) -> &Arc<NoticeLog> {
        &self.notices
    }
}
