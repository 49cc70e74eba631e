//! Derived savings.
//!
//! Savings are never stored: they are computed from a [`Project`] and the
//! current [`Settings`] every time a project is read. This is the only place
//! the formula lives.

use serde::{Deserialize, Serialize};

use crate::{Project, Settings};

/// Minutes in an hour.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Savings computed for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Derived {
    /// IT hours saved: `count * timePerTransactionMin / 60`.
    pub it_hours: f64,
    /// `itHours * itRate`.
    pub it_saving: f64,
    /// `businessHoursBack * businessRate`.
    pub business_saving: f64,
    /// `itSaving + businessSaving`.
    pub total: f64,
}

/// Compute the savings of `project` at `settings`' rates.
///
/// Pure: no rounding, no mutation, same output for the same inputs.
/// `businessHoursBack` is a flat number of hours, independent of `count`.
///
/// # Examples
///
/// ```
/// use savings_core::{Settings, compute_derived, demo_projects};
///
/// let powerbi = &demo_projects()[0];
/// let derived = compute_derived(powerbi, &Settings::default());
/// assert_eq!(derived.business_saving, 4500.0);
/// assert!((derived.total - 9166.666_666).abs() < 1e-6);
/// ```
pub fn compute_derived(project: &Project, settings: &Settings) -> Derived {
    let it_hours = (project.count * project.time_per_transaction_min) / MINUTES_PER_HOUR;
    let it_saving = it_hours * settings.it_rate;
    let business_saving = project.business_hours_back * settings.business_rate;
    Derived {
        it_hours,
        it_saving,
        business_saving,
        total: it_saving + business_saving,
    }
}

/// A project together with its derived savings, as returned by every read.
///
/// Serializes flat: the stored fields followed by `itHours`, `itSaving`,
/// `businessSaving` and `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectView {
    /// The stored record.
    #[serde(flatten)]
    pub project: Project,
    /// Savings at the rates current when the view was built.
    #[serde(flatten)]
    pub derived: Derived,
}

impl ProjectView {
    /// Price `project` at `settings`.
    pub fn new(project: Project, settings: &Settings) -> Self {
        let derived = compute_derived(&project, settings);
        Self { project, derived }
    }
}

/// Sums of the derived figures across a set of projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Number of projects summed.
    pub projects: usize,
    /// Sum of `itHours`.
    pub it_hours: f64,
    /// Sum of `itSaving`.
    pub it_saving: f64,
    /// Sum of `businessSaving`.
    pub business_saving: f64,
    /// Sum of `total`.
    pub total: f64,
}

impl Totals {
    /// Add one project's savings.
    pub fn add(&mut self, derived: &Derived) {
        self.projects += 1;
        self.it_hours += derived.it_hours;
        self.it_saving += derived.it_saving;
        self.business_saving += derived.business_saving;
        self.total += derived.total;
    }
}

impl<'a> FromIterator<&'a Derived> for Totals {
    fn from_iter<I: IntoIterator<Item = &'a Derived>>(iter: I) -> Self {
        iter.into_iter().fold(Totals::default(), |mut totals, d| {
            totals.add(d);
            totals
        })
    }
}
