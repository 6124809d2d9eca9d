//! Named schedule definitions: a base expression plus adjustments.

use cronmath_core::CronMath;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, ScheduleError};
use crate::operation::{apply_all, Operation};

/// A schedule as written in a YAML definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleDefinition {
    pub name: String,
    pub base_cron: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub adjustments: Vec<Operation>,
}

/// A definition with its adjusted expression computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSchedule {
    /// `"cron_{name}"`.
    pub id: String,
    pub name: String,
    pub base_cron: String,
    pub final_cron: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ScheduleDefinition {
    /// Identifier derived from the name.
    pub fn id(&self) -> String {
        format!("cron_{}", self.name)
    }

    /// Compute `final_cron` from `base_cron` and the adjustments.
    ///
    /// Deterministic: resolving an unchanged definition again gives the same result.
    pub fn resolve(&self) -> Result<ResolvedSchedule> {
        if self.name.trim().is_empty() {
            return Err(ScheduleError::Validation(
                "schedule name must not be empty".to_string(),
            ));
        }

        trace!(name = %self.name, base_cron = %self.base_cron, "resolving cron schedule");

        let cm = apply_all(CronMath::new(&self.base_cron), &self.adjustments)?;
        if let Some(e) = cm.error() {
            return Err(e.clone().into());
        }

        let resolved = ResolvedSchedule {
            id: self.id(),
            name: self.name.clone(),
            base_cron: self.base_cron.clone(),
            final_cron: cm.to_string(),
            description: self.description.clone(),
        };
        trace!(id = %resolved.id, final_cron = %resolved.final_cron, "resolved cron schedule");
        Ok(resolved)
    }
}
