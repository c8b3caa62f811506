//! Admin Resource Manager
//!
//! Owns the active tab, the displayed collection, the single create/edit
//! form and every CRUD path of the admin panel.
//!
//! The displayed collection is never patched locally. Every successful
//! mutation goes through [`AdminResourceManager::mutate_then_sync`], which
//! refetches the whole collection from the server.
//!
//! Fetches are ticketed: each [`begin_fetch`](AdminResourceManager::begin_fetch)
//! issues a new [`FetchTicket`] and only the latest ticket, for the kind
//! still on screen, may replace the collection.

use saray_client::{ClientError, ClientResult, ResourceClient};
use shared::{Record, RecordInput, ResourceKind};
use std::sync::Arc;

use crate::error::{AdminError, AdminResult};
use crate::form::FormState;
use crate::validation;

/// Notice shown for any remote failure; the cause goes to the log
pub const REMOTE_FAILURE: &str = "The operation failed. Please try again.";

/// A remote write, the input of [`AdminResourceManager::mutate_then_sync`]
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Insert(RecordInput),
    Update { id: String, fields: RecordInput },
    Delete { id: String },
}

impl Mutation {
    fn action(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
        }
    }
}

/// Outcome of the refetch that follows a successful mutation
#[derive(Debug)]
pub enum Synced {
    /// Collection reloaded
    Fresh,
    /// Mutation applied, but the refetch failed
    Stale(ClientError),
}

/// Identity of one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub kind: ResourceKind,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Last message for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Synchronous yes/no gate asked before a delete
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub struct AdminResourceManager {
    client: Arc<dyn ResourceClient>,
    active: ResourceKind,
    records: Vec<Record>,
    next_seq: u64,
    /// Latest issued fetch, while it is outstanding
    pending: Option<FetchTicket>,
    form: Option<FormState>,
    editing: Option<String>,
    notice: Option<Notice>,
}

impl AdminResourceManager {
    /// New manager on the Tables tab with nothing loaded yet
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            active: ResourceKind::Tables,
            records: Vec::new(),
            next_seq: 0,
            pending: None,
            form: None,
            editing: None,
            notice: None,
        }
    }

    pub fn active(&self) -> ResourceKind {
        self.active
    }

    /// Displayed collection of the active kind, in server order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    /// Id of the record being edited; `None` while creating
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    // ── Fetching ────────────────────────────────────────────────────

    /// Issue a new fetch ticket; any older ticket becomes stale
    pub fn begin_fetch(&mut self, kind: ResourceKind) -> FetchTicket {
        self.next_seq += 1;
        let ticket = FetchTicket {
            kind,
            seq: self.next_seq,
        };
        self.pending = Some(ticket);
        ticket
    }

    /// Apply a fetch result if its ticket is still the latest
    ///
    /// Returns `Ok(false)` when the result was ignored as stale.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: ClientResult<Vec<Record>>,
    ) -> ClientResult<bool> {
        if self.pending != Some(ticket) {
            tracing::debug!(kind = %ticket.kind, seq = ticket.seq, "Ignoring stale fetch result");
            return Ok(false);
        }
        self.pending = None;
        if ticket.kind != self.active {
            tracing::debug!(kind = %ticket.kind, "Ignoring fetch for inactive tab");
            return Ok(false);
        }
        let rows = result?;
        tracing::debug!(kind = %ticket.kind, count = rows.len(), "Collection loaded");
        self.records = rows;
        Ok(true)
    }

    async fn fetch(&mut self, kind: ResourceKind) -> ClientResult<bool> {
        let ticket = self.begin_fetch(kind);
        let result = self.client.select(kind).await;
        self.complete_fetch(ticket, result)
    }

    // ── Tabs and forms ──────────────────────────────────────────────

    /// Switch tab, drop any open form, reload the collection
    pub async fn select_tab(&mut self, kind: ResourceKind) -> AdminResult<()> {
        self.active = kind;
        self.form = None;
        self.editing = None;
        self.notice = None;
        self.records.clear();

        if let Err(e) = self.fetch(kind).await {
            tracing::error!(kind = %kind, error = %e, "Failed to load collection");
            self.notice = Some(Notice::error(REMOTE_FAILURE));
            return Err(e.into());
        }
        Ok(())
    }

    /// Reload the active collection
    pub async fn refresh(&mut self) -> AdminResult<()> {
        let kind = self.active;
        if let Err(e) = self.fetch(kind).await {
            tracing::error!(kind = %kind, error = %e, "Failed to refresh collection");
            self.notice = Some(Notice::error(REMOTE_FAILURE));
            return Err(e.into());
        }
        Ok(())
    }

    /// Writes and forms only apply to the displayed tab, whose refetch is kept
    fn ensure_active(&self, kind: ResourceKind) -> AdminResult<()> {
        if kind != self.active {
            return Err(AdminError::NotActiveTab {
                active: self.active,
                requested: kind,
            });
        }
        Ok(())
    }

    pub fn open_create_form(&mut self, kind: ResourceKind) -> AdminResult<()> {
        let form = FormState::empty(kind).ok_or(AdminError::ReadOnly(kind))?;
        self.ensure_active(kind)?;
        self.form = Some(form);
        self.editing = None;
        Ok(())
    }

    pub fn open_edit_form(&mut self, kind: ResourceKind, record: &Record) -> AdminResult<()> {
        if !kind.is_editable() {
            return Err(AdminError::ReadOnly(kind));
        }
        if record.kind() != kind {
            return Err(AdminError::FormKindMismatch {
                open: record.kind(),
                requested: kind,
            });
        }
        self.ensure_active(kind)?;
        let form = FormState::from_record(record).ok_or(AdminError::ReadOnly(kind))?;
        self.form = Some(form);
        self.editing = Some(record.id().to_string());
        Ok(())
    }

    /// Open the edit form for a record of the displayed collection
    pub fn open_edit_form_by_id(&mut self, id: &str) -> AdminResult<()> {
        let kind = self.active;
        let record = self
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| AdminError::RecordNotFound {
                kind,
                id: id.to_string(),
            })?;
        self.open_edit_form(kind, &record)
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> AdminResult<()> {
        self.form
            .as_mut()
            .ok_or(AdminError::NoOpenForm)?
            .set(field, value)
    }

    /// Close the form, discarding its input
    pub fn cancel_form(&mut self) {
        self.form = None;
        self.editing = None;
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Validate the open form and insert or update it
    ///
    /// Invalid input makes no remote call and keeps the form open. A remote
    /// failure also keeps the form and its input.
    pub async fn submit(&mut self, kind: ResourceKind) -> AdminResult<()> {
        if !kind.is_editable() {
            return Err(AdminError::ReadOnly(kind));
        }
        self.ensure_active(kind)?;
        let form = self.form.as_ref().ok_or(AdminError::NoOpenForm)?;
        if form.kind() != kind {
            return Err(AdminError::FormKindMismatch {
                open: form.kind(),
                requested: kind,
            });
        }

        let fields = match validation::validate(form) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::debug!(kind = %kind, error = %e, "Form rejected");
                self.notice = Some(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        let mutation = match self.editing.clone() {
            Some(id) => Mutation::Update { id, fields },
            None => Mutation::Insert(fields),
        };

        match self.mutate_then_sync(kind, mutation).await {
            Ok(synced) => {
                self.form = None;
                self.editing = None;
                self.notice = Some(match synced {
                    Synced::Fresh => Notice::info("Saved"),
                    Synced::Stale(_) => Notice::error("Saved, but the list could not be reloaded"),
                });
                Ok(())
            }
            Err(e) => {
                self.notice = Some(Notice::error(REMOTE_FAILURE));
                Err(e)
            }
        }
    }

    /// Delete a record after confirmation
    ///
    /// Returns `Ok(false)` when the operator declined.
    pub async fn remove(
        &mut self,
        kind: ResourceKind,
        id: &str,
        confirm: &mut impl Confirm,
    ) -> AdminResult<bool> {
        if !kind.is_editable() {
            return Err(AdminError::ReadOnly(kind));
        }
        self.ensure_active(kind)?;
        let prompt = format!("Delete {} record {}?", kind.label(), id);
        if !confirm.confirm(&prompt) {
            tracing::debug!(kind = %kind, id, "Delete declined");
            return Ok(false);
        }

        let mutation = Mutation::Delete { id: id.to_string() };
        match self.mutate_then_sync(kind, mutation).await {
            Ok(synced) => {
                if self.editing.as_deref() == Some(id) {
                    self.cancel_form();
                }
                self.notice = Some(match synced {
                    Synced::Fresh => Notice::info("Deleted"),
                    Synced::Stale(_) => {
                        Notice::error("Deleted, but the list could not be reloaded")
                    }
                });
                Ok(true)
            }
            Err(e) => {
                self.notice = Some(Notice::error(REMOTE_FAILURE));
                Err(e)
            }
        }
    }

    /// Run one remote write and, if it succeeds, refetch `kind`
    ///
    /// Every CRUD path goes through here. A failed write makes no refetch.
    pub async fn mutate_then_sync(
        &mut self,
        kind: ResourceKind,
        mutation: Mutation,
    ) -> AdminResult<Synced> {
        if !kind.is_editable() {
            return Err(AdminError::ReadOnly(kind));
        }
        self.ensure_active(kind)?;
        let action = mutation.action();
        let result = match &mutation {
            Mutation::Insert(fields) => self.client.insert(kind, fields).await.map(|_| ()),
            Mutation::Update { id, fields } => {
                self.client.update(kind, id, fields).await.map(|_| ())
            }
            Mutation::Delete { id } => self.client.delete(kind, id).await,
        };
        if let Err(e) = result {
            tracing::error!(kind = %kind, action, error = %e, "Remote mutation failed");
            return Err(e.into());
        }
        tracing::info!(kind = %kind, action, "Remote mutation applied");

        match self.fetch(kind).await {
            Ok(_) => Ok(Synced::Fresh),
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "Refetch after mutation failed");
                Ok(Synced::Stale(e))
            }
        }
    }
}
