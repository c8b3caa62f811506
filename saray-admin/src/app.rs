//! Root controller of the admin panel

use saray_client::ResourceClient;
use shared::ResourceKind;
use std::sync::Arc;

use crate::error::{AdminError, AdminResult};
use crate::login::LoginForm;
use crate::manager::AdminResourceManager;
use crate::session::SessionGate;

/// Owns the session, the login form and, once logged in, the panel
pub struct AdminApp {
    client: Arc<dyn ResourceClient>,
    gate: SessionGate,
    login: LoginForm,
    panel: Option<AdminResourceManager>,
}

impl AdminApp {
    pub fn new(client: Arc<dyn ResourceClient>, gate: SessionGate) -> Self {
        Self {
            client,
            gate,
            login: LoginForm::new(),
            panel: None,
        }
    }

    /// Restore a persisted session and, if there is one, open the panel
    ///
    /// A failing first fetch leaves the panel open with an error notice.
    pub async fn load(&mut self) -> AdminResult<()> {
        if self.gate.load()? {
            self.open_panel().await;
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    pub async fn login(&mut self, password: &str) -> AdminResult<()> {
        self.login.set_password(password);
        self.login.submit(&mut self.gate)?;
        self.open_panel().await;
        Ok(())
    }

    /// The panel stays open if the stored session cannot be cleared
    pub fn logout(&mut self) -> AdminResult<()> {
        self.gate.logout()?;
        self.panel = None;
        Ok(())
    }

    pub fn panel(&self) -> Option<&AdminResourceManager> {
        self.panel.as_ref()
    }

    /// The panel, only while authenticated
    pub fn panel_mut(&mut self) -> AdminResult<&mut AdminResourceManager> {
        if !self.gate.is_authenticated() {
            return Err(AdminError::NotAuthenticated);
        }
        self.panel.as_mut().ok_or(AdminError::NotAuthenticated)
    }

    async fn open_panel(&mut self) {
        let mut panel = AdminResourceManager::new(self.client.clone());
        if let Err(e) = panel.select_tab(ResourceKind::Tables).await {
            tracing::warn!(error = %e, "Initial load of the admin panel failed");
        }
        self.panel = Some(panel);
    }
}
