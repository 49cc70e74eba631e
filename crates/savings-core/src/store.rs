//! The in-memory project store.
//!
//! [`ProjectStore`] owns the project collection exclusively. Every method runs
//! its whole read-modify-write sequence inside a single lock section, so a
//! listing never sees a half-applied change and concurrent upserts of the same
//! id resolve as whole-operation last-writer-wins.
//!
//! Reads are priced against the [`SettingsStore`] at read time. The two locks
//! are never held together.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    Error, Project, ProjectInput, ProjectPatch, ProjectView, Result, SettingsStore, Totals,
    demo_projects,
};

/// Insertion-ordered, thread-safe collection of projects.
#[derive(Debug)]
pub struct ProjectStore {
    settings: Arc<SettingsStore>,
    projects: RwLock<Vec<Project>>,
}

impl ProjectStore {
    /// Create an empty store priced by `settings`.
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self::with_projects(settings, Vec::new())
    }

    /// Create a store holding `projects`, in order.
    ///
    /// Later duplicates of an id replace earlier ones, as an upsert would.
    pub fn with_projects(settings: Arc<SettingsStore>, projects: Vec<Project>) -> Self {
        let store = Self {
            settings,
            projects: RwLock::new(Vec::with_capacity(projects.len())),
        };
        {
            let mut guard = store.write();
            for project in projects {
                upsert_in(&mut guard, project);
            }
        }
        store
    }

    /// Create a store holding the demo projects.
    pub fn seeded(settings: Arc<SettingsStore>) -> Self {
        Self::with_projects(settings, demo_projects())
    }

    /// Every project with its savings, in insertion order.
    ///
    /// One settings snapshot prices the whole listing.
    pub fn list(&self) -> Vec<ProjectView> {
        let settings = self.settings.get();
        self.read()
            .iter()
            .map(|p| ProjectView::new(p.clone(), &settings))
            .collect()
    }

    /// One project with its savings.
    pub fn get(&self, id: &str) -> Result<ProjectView> {
        let project = self
            .read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(id))?;
        Ok(ProjectView::new(project, &self.settings.get()))
    }

    /// Insert a new project, or replace the stored one with the same id
    /// wholesale.
    ///
    /// Fails with [`Error::Validation`] (`id required`) when the input has no
    /// usable id.
    pub fn upsert(&self, input: ProjectInput) -> Result<ProjectView> {
        let project = input.into_project()?;
        let replaced = upsert_in(&mut self.write(), project.clone());
        log::debug!(
            "Project '{}' {}",
            project.id,
            if replaced { "replaced" } else { "inserted" }
        );
        Ok(ProjectView::new(project, &self.settings.get()))
    }

    /// Merge `patch` onto the stored project with `id`.
    pub fn patch(&self, id: &str, patch: &ProjectPatch) -> Result<ProjectView> {
        let updated = {
            let mut projects = self.write();
            let project = projects
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| Error::not_found(id))?;
            patch.apply_to(project);
            project.clone()
        };
        log::debug!("Project '{id}' patched");
        Ok(ProjectView::new(updated, &self.settings.get()))
    }

    /// Remove the project with `id`. Returns whether anything was removed;
    /// removing an unknown id is not an error.
    pub fn remove(&self, id: &str) -> bool {
        let mut projects = self.write();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        let removed = projects.len() != before;
        if removed {
            log::debug!("Project '{id}' removed");
        }
        removed
    }

    /// Returns `true` if a project with `id` is stored.
    pub fn contains(&self, id: &str) -> bool {
        self.read().iter().any(|p| p.id == id)
    }

    /// Stored ids, in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.read().iter().map(|p| p.id.clone()).collect()
    }

    /// Number of stored projects.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if no projects are stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Savings summed across every project.
    pub fn totals(&self) -> Totals {
        self.list().iter().map(|view| &view.derived).collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Project>> {
        self.projects.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Project>> {
        self.projects.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Replace in place or append. Returns `true` when an existing record was
/// replaced.
fn upsert_in(projects: &mut Vec<Project>, project: Project) -> bool {
    match projects.iter_mut().find(|p| p.id == project.id) {
        Some(existing) => {
            *existing = project;
            true
        }
        None => {
            projects.push(project);
            false
        }
    }
}
