//! Production wiring of the login flow.

use facegate_capture::{CameraSource, ScanSource};
use facegate_flow::{AuthFlow, Navigator, SessionController};
use facegate_lookup::StoredImageClient;
use facegate_session::{FileSessionStore, SessionRecord, SessionStore};
use facegate_verification::VerificationClient;
use std::sync::Arc;

use crate::{ClientConfig, ClientError};

/// A flow wired to the HTTP verifier and the file-backed session.
pub type KioskFlow<C, Sc, N> = AuthFlow<C, Sc, VerificationClient, Arc<FileSessionStore>, N>;

/// Shared infrastructure built once from a [`ClientConfig`].
pub struct Kiosk {
    config: ClientConfig,
    verifier: VerificationClient,
    session: Arc<FileSessionStore>,
}

impl Kiosk {
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let verifier = VerificationClient::new(
            &config.server_url,
            &config.login_path,
            config.request_timeout(),
        )?;
        let session = Arc::new(FileSessionStore::open(&config.session_file)?);
        tracing::info!(
            endpoint = verifier.endpoint(),
            session_file = %config.session_file.display(),
            "kiosk ready"
        );
        Ok(Self {
            config,
            verifier,
            session,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<FileSessionStore> {
        &self.session
    }

    /// A fresh flow instance sharing this kiosk's verifier and session.
    pub fn flow<C, Sc, N>(&self, camera: C, scanner: Sc, navigator: N) -> KioskFlow<C, Sc, N>
    where
        C: CameraSource,
        Sc: ScanSource,
        N: Navigator,
    {
        let controller =
            SessionController::new(self.session.clone(), self.config.admin_identifier.as_str());
        AuthFlow::new(camera, scanner, self.verifier.clone(), controller, navigator)
    }

    pub fn lookup_client(&self) -> Result<StoredImageClient, ClientError> {
        Ok(StoredImageClient::new(
            &self.config.server_url,
            self.config.request_timeout(),
        )?)
    }

    pub fn session_record(&self) -> SessionRecord {
        self.session.record()
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.session.clear()?;
        tracing::info!("session cleared");
        Ok(())
    }
}
