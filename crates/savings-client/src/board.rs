//! Optimistically edited project list.
//!
//! A [`ProjectBoard`] is the client's local copy of the project collection.
//! Edits apply locally at once; each record tracks whether the server has
//! confirmed it:
//!
//! ```text
//!            begin_save              confirm_save
//!   Clean ──────────────► PendingSave ────────────► Clean
//!     │                        │ fail
//!     │ begin_delete           ▼
//!     └──────────► PendingDelete ──fail──► Error(msg)
//!                        │
//!                        └─confirm_delete─► (record dropped)
//! ```
//!
//! Every record keeps the last server-confirmed version as a snapshot; a
//! failed save rolls back to it. A failed delete brings the record back as
//! it was locally, unsaved edits included. A record added locally has no
//! snapshot yet, so a failed first save drops it.

use std::fmt;

use savings_core::{
    Derived, Project, ProjectDraft, ProjectPatch, ProjectView, Settings, SettingsPatch, Totals,
    compute_derived,
};

use crate::{Error, Result, SavingsClient};

// ============================================================================
// RecordState
// ============================================================================

/// Server-sync state of one record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordState {
    /// Matches what the server last confirmed, apart from unsaved local edits.
    Clean,
    /// A save has been sent and not yet confirmed.
    PendingSave,
    /// A delete has been sent and not yet confirmed; the record is hidden.
    PendingDelete,
    /// The last save or delete failed and was undone locally.
    Error(String),
}

impl RecordState {
    /// Returns `true` while a request for this record is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingSave | Self::PendingDelete)
    }
}

impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::PendingSave => write!(f, "pending save"),
            Self::PendingDelete => write!(f, "pending delete"),
            Self::Error(message) => write!(f, "error: {message}"),
        }
    }
}

// ============================================================================
// Record
// ============================================================================

/// One project on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    project: Project,
    snapshot: Option<Project>,
    state: RecordState,
}

impl Record {
    fn confirmed(project: Project) -> Self {
        Self {
            snapshot: Some(project.clone()),
            project,
            state: RecordState::Clean,
        }
    }

    /// Current local version, including unsaved edits.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Sync state.
    pub fn state(&self) -> &RecordState {
        &self.state
    }

    /// Returns `true` if the local version differs from the snapshot.
    pub fn is_modified(&self) -> bool {
        self.snapshot.as_ref() != Some(&self.project)
    }
}

// ============================================================================
// ProjectBoard
// ============================================================================

/// Local project list plus the rates used for live previews.
#[derive(Debug, Clone, Default)]
pub struct ProjectBoard {
    settings: Settings,
    records: Vec<Record>,
}

impl ProjectBoard {
    /// Empty board priced at `settings`.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            records: Vec::new(),
        }
    }

    /// Replace every record with server state; all records become `Clean`.
    pub fn load(&mut self, views: Vec<ProjectView>) {
        self.records = views
            .into_iter()
            .map(|view| Record::confirmed(view.project))
            .collect();
    }

    /// Rates used for previews.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Record with `id`, including one pending delete.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.project.id == id)
    }

    /// Records to display: everything except pending deletes, in order.
    pub fn visible(&self) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(|r| r.state != RecordState::PendingDelete)
    }

    /// Returns `true` if any record (visible or not) uses `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Live savings of one record at the board's rates.
    pub fn preview(&self, id: &str) -> Option<Derived> {
        self.get(id)
            .map(|r| compute_derived(&r.project, &self.settings))
    }

    /// Savings summed over the visible records.
    pub fn totals(&self) -> Totals {
        let derived: Vec<Derived> = self
            .visible()
            .map(|r| compute_derived(&r.project, &self.settings))
            .collect();
        derived.iter().collect()
    }

    /// Apply `patch` locally. Not allowed while a delete is pending.
    pub fn edit(&mut self, id: &str, patch: &ProjectPatch) -> Result<()> {
        let record = self.record_mut(id)?;
        if record.state == RecordState::PendingDelete {
            return Err(transition(record, "edit"));
        }
        patch.apply_to(&mut record.project);
        Ok(())
    }

    /// Settle `draft` into a new record with an id unique on this board.
    ///
    /// The record starts as `PendingSave`; send the returned project with
    /// [`SavingsClient::upsert_project`].
    pub fn add(&mut self, draft: ProjectDraft) -> Result<Project> {
        let project = draft.into_project(|id| self.contains(id))?;
        self.records.push(Record {
            project: project.clone(),
            snapshot: None,
            state: RecordState::PendingSave,
        });
        Ok(project)
    }

    /// Mark `id` as being saved and return the full record to upsert.
    pub fn begin_save(&mut self, id: &str) -> Result<Project> {
        let record = self.record_mut(id)?;
        if record.state == RecordState::PendingDelete {
            return Err(transition(record, "save"));
        }
        record.state = RecordState::PendingSave;
        Ok(record.project.clone())
    }

    /// The server confirmed a save; its version becomes the snapshot.
    pub fn confirm_save(&mut self, view: ProjectView) -> Result<()> {
        let record = self.record_mut(&view.project.id)?;
        record.snapshot = Some(view.project.clone());
        record.project = view.project;
        record.state = RecordState::Clean;
        Ok(())
    }

    /// Hide `id` while its delete is in flight.
    pub fn begin_delete(&mut self, id: &str) -> Result<()> {
        let record = self.record_mut(id)?;
        if record.state.is_pending() {
            return Err(transition(record, "delete"));
        }
        record.state = RecordState::PendingDelete;
        Ok(())
    }

    /// The server confirmed the delete.
    pub fn confirm_delete(&mut self, id: &str) {
        self.records.retain(|r| r.project.id != id);
    }

    /// A request for `id` failed: record the error and undo the request.
    ///
    /// A failed delete unhides the record with its local edits intact. A
    /// failed save restores the snapshot, or drops a record that never had a
    /// confirmed version.
    pub fn fail(&mut self, id: &str, message: impl Into<String>) -> Result<()> {
        let index = self
            .records
            .iter()
            .position(|r| r.project.id == id)
            .ok_or_else(|| Error::UnknownProject { id: id.to_string() })?;

        let record = &mut self.records[index];
        if record.state == RecordState::PendingDelete {
            record.state = RecordState::Error(message.into());
            return Ok(());
        }
        match record.snapshot.clone() {
            Some(snapshot) => {
                record.project = snapshot;
                record.state = RecordState::Error(message.into());
            }
            None => {
                self.records.remove(index);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Server round trips
    // ------------------------------------------------------------------------

    /// Reload rates and projects from the server.
    pub async fn refresh(&mut self, client: &SavingsClient) -> Result<()> {
        let settings = client.settings().await?;
        let views = client.list_projects().await?;
        self.settings = settings;
        self.load(views);
        Ok(())
    }

    /// Change rates on the server and reprice the board with the result.
    pub async fn update_settings(
        &mut self,
        client: &SavingsClient,
        patch: &SettingsPatch,
    ) -> Result<Settings> {
        let settings = client.update_settings(patch).await?;
        self.settings = settings;
        Ok(settings)
    }

    /// Save `id`. On failure, roll back and resynchronize from the server.
    pub async fn save(&mut self, client: &SavingsClient, id: &str) -> Result<ProjectView> {
        let project = self.begin_save(id)?;
        match client.upsert_project(&project).await {
            Ok(view) => {
                self.confirm_save(view.clone())?;
                Ok(view)
            }
            Err(e) => {
                self.fail(id, e.to_string())?;
                if let Err(resync) = self.refresh(client).await {
                    tracing::warn!(id, error = %resync, "Resync after failed save also failed");
                }
                Err(e)
            }
        }
    }

    /// Add a project from `draft` and save it.
    pub async fn create(
        &mut self,
        client: &SavingsClient,
        draft: ProjectDraft,
    ) -> Result<ProjectView> {
        let project = self.add(draft)?;
        self.save(client, &project.id).await
    }

    /// Delete `id`. On failure, restore the record in the `Error` state.
    pub async fn delete(&mut self, client: &SavingsClient, id: &str) -> Result<()> {
        self.begin_delete(id)?;
        match client.delete_project(id).await {
            Ok(()) => {
                self.confirm_delete(id);
                Ok(())
            }
            Err(e) => {
                self.fail(id, e.to_string())?;
                Err(e)
            }
        }
    }

    fn record_mut(&mut self, id: &str) -> Result<&mut Record> {
        self.records
            .iter_mut()
            .find(|r| r.project.id == id)
            .ok_or_else(|| Error::UnknownProject { id: id.to_string() })
    }
}

fn transition(record: &Record, action: &'static str) -> Error {
    Error::InvalidTransition {
        id: record.project.id.clone(),
        action,
        state: record.state.clone(),
    }
}
