//! Global hourly rates.
//!
//! [`SettingsStore`] holds the single process-wide [`Settings`] value. Rates
//! are read by the project store on every listing, so a rate change reprices
//! every project on the next read without touching any stored record.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::numbers::deserialize_optional_number;
use crate::{Error, Result};

/// Default IT hourly rate.
pub const DEFAULT_IT_RATE: f64 = 100.0;

/// Default business hourly rate.
pub const DEFAULT_BUSINESS_RATE: f64 = 150.0;

// ============================================================================
// Settings
// ============================================================================

/// The two global rates, in currency per hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// IT hourly rate.
    pub it_rate: f64,
    /// Business hourly rate.
    pub business_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            it_rate: DEFAULT_IT_RATE,
            business_rate: DEFAULT_BUSINESS_RATE,
        }
    }
}

impl Settings {
    /// Return a copy with every supplied field of `patch` applied.
    pub fn merged(self, patch: &SettingsPatch) -> Self {
        Self {
            it_rate: patch.it_rate.unwrap_or(self.it_rate),
            business_rate: patch.business_rate.unwrap_or(self.business_rate),
        }
    }
}

/// A partial settings update. `None` leaves the stored value untouched.
///
/// Supplied values are coerced with
/// [`to_non_negative_number`](crate::util::numbers::to_non_negative_number),
/// so `"120"` becomes `120.0` and `"abc"` becomes `0.0`. A JSON `null` counts
/// as not supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    /// New IT hourly rate.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub it_rate: Option<f64>,
    /// New business hourly rate.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub business_rate: Option<f64>,
}

impl SettingsPatch {
    /// Parse a patch from a request body.
    ///
    /// Fails only when the body is not a JSON object.
    pub fn from_json(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::validation("settings body must be a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| Error::validation(e.to_string()))
    }

    /// Returns `true` if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.it_rate.is_none() && self.business_rate.is_none()
    }
}

// ============================================================================
// SettingsStore
// ============================================================================

/// Thread-safe holder of the current [`Settings`].
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: RwLock<Settings>,
}

impl SettingsStore {
    /// Create a store starting from `initial`.
    pub fn new(initial: Settings) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Current settings.
    pub fn get(&self) -> Settings {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a partial update and return the resulting settings.
    pub fn update(&self, patch: &SettingsPatch) -> Settings {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = current.merged(patch);
        log::debug!(
            "Settings updated: it_rate={}, business_rate={}",
            current.it_rate,
            current.business_rate
        );
        *current
    }
}
