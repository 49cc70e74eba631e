//! Shared handler state.

use std::sync::Arc;

use savings_core::{Project, ProjectStore, Settings, SettingsStore};

/// Stores injected into every handler.
///
/// Cheap to clone (Arc internals). Each instance is independent, so tests can
/// build as many isolated servers as they like.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Global rates.
    pub settings: Arc<SettingsStore>,
    /// Project collection, priced by `settings`.
    pub projects: Arc<ProjectStore>,
}

impl AppState {
    /// Build state with the given rates and initial projects.
    pub fn new(settings: Settings, projects: Vec<Project>) -> Self {
        let settings = Arc::new(SettingsStore::new(settings));
        let projects = Arc::new(ProjectStore::with_projects(settings.clone(), projects));
        Self { settings, projects }
    }

    /// Default rates and no projects.
    pub fn empty() -> Self {
        Self::new(Settings::default(), Vec::new())
    }

    /// Default rates and the demo projects.
    pub fn seeded() -> Self {
        Self::new(Settings::default(), savings_core::demo_projects())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::empty()
    }
}
