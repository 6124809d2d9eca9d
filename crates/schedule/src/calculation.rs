//! One-off calculation: an input expression plus a list of operations.

use cronmath_core::CronMath;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::operation::{apply_all, Operation};

/// Input expression and the operations to apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Calculation {
    pub input: String,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// Outcome of a successful [`Calculation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// `"{input}-{operation count}"`.
    pub id: String,
    pub input: String,
    pub result: String,
}

impl Calculation {
    pub fn new(input: impl Into<String>, operations: Vec<Operation>) -> Self {
        Self {
            input: input.into(),
            operations,
        }
    }

    /// Apply every operation, then read the shifted expression.
    pub fn calculate(&self) -> Result<CalculationResult> {
        trace!(
            input = %self.input,
            operations_count = self.operations.len(),
            "processing cron expression"
        );

        let cm = apply_all(CronMath::new(&self.input), &self.operations)?;
        if let Some(e) = cm.error() {
            return Err(e.clone().into());
        }

        let result = CalculationResult {
            id: format!("{}-{}", self.input, self.operations.len()),
            input: self.input.clone(),
            result: cm.to_string(),
        };
        trace!(result = %result.result, "cron calculation complete");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use crate::operation::{OperationKind, Unit};

    #[test]
    fn calculate_reports_id_and_result() {
        let calc = Calculation::new(
            "0 9 * * *",
            vec![
                Operation::new(OperationKind::Add, 30, Unit::Minutes),
                Operation::new(OperationKind::Add, 1, Unit::Hours),
            ],
        );
        let out = calc.calculate().unwrap();
        assert_eq!(out.id, "0 9 * * *-2");
        assert_eq!(out.result, "30 10 * * *");
    }

    #[test]
    fn calculate_without_operations_canonicalizes() {
        let out = Calculation::new("0 9 * * 1,2,3", vec![]).calculate().unwrap();
        assert_eq!(out.id, "0 9 * * 1,2,3-0");
        assert_eq!(out.result, "0 9 * * 1-3");
    }

    #[test]
    fn calculate_surfaces_core_errors() {
        let calc = Calculation::new(
            "0,30 9 * * *",
            vec![Operation::new(OperationKind::Add, 45, Unit::Minutes)],
        );
        let err = calc.calculate().unwrap_err();
        assert!(matches!(err, ScheduleError::Calculation(ref e) if e.is_non_representable()));
        assert!(err.to_string().starts_with("Calculation Error:"));

        let err = Calculation::new("bogus", vec![]).calculate().unwrap_err();
        assert!(matches!(err, ScheduleError::Calculation(ref e) if e.is_parse()));
    }

    #[test]
    fn calculation_deserializes_from_yaml() {
        let yaml = r#"
input: "0 23 * * *"
operations:
  - type: add
    value: 2
    unit: h
"#;
        let calc: Calculation = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(calc.calculate().unwrap().result, "0 1 * * *");
    }
}
