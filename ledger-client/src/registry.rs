//! Supplier list with its "add supplier" form.

use tracing::warn;

use crate::api::LedgerApi;
use crate::error::ClientResult;

const ADD_FAILED_MESSAGE: &str = "Error adding supplier";

/// What a submitted add form led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Blank name; nothing was sent.
    Skipped,
    Added(String),
    /// The message is in [`SupplierRegistry::add_error`].
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct SupplierRegistry {
    suppliers: Vec<String>,
    loading: bool,
    show_add: bool,
    new_name: String,
    add_error: Option<String>,
}

impl SupplierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suppliers(&self) -> &[String] {
        &self.suppliers
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_adding(&self) -> bool {
        self.show_add
    }

    pub fn new_name(&self) -> &str {
        &self.new_name
    }

    pub fn add_error(&self) -> Option<&str> {
        self.add_error.as_deref()
    }

    /// Reload the supplier list. On failure the previous list is kept.
    pub async fn refresh(&mut self, api: &dyn LedgerApi) -> ClientResult<()> {
        self.loading = true;
        let result = api.list_suppliers().await;
        self.loading = false;

        self.suppliers = result?;
        Ok(())
    }

    pub fn toggle_add(&mut self) {
        self.show_add = !self.show_add;
    }

    pub fn set_new_name(&mut self, name: impl Into<String>) {
        self.new_name = name.into();
    }

    /// Register the typed name, trimmed.
    ///
    /// On success the add form is cleared and closed and the list reloaded.
    /// On failure the form stays as typed and the server's message (or
    /// `Network error`) is kept for display.
    pub async fn submit_add(&mut self, api: &dyn LedgerApi) -> AddOutcome {
        self.add_error = None;

        let name = self.new_name.trim().to_string();
        if name.is_empty() {
            return AddOutcome::Skipped;
        }

        if let Err(err) = api.register_supplier(&name).await {
            let message = err.user_message();
            self.add_error = Some(if message.is_empty() {
                ADD_FAILED_MESSAGE.to_string()
            } else {
                message
            });
            return AddOutcome::Failed;
        }

        self.new_name.clear();
        self.show_add = false;
        if let Err(err) = self.refresh(api).await {
            warn!(error = %err, "Supplier list reload failed after registration");
        }

        AddOutcome::Added(name)
    }
}
