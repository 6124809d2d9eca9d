//! Canonical re-emission of a field from its enumerated value-set.
//!
//! Shape is decided from the value-set, with the written kind as a hint:
//! - full domain → `*`
//! - one value → `v`
//! - contiguous run → `lo-hi`
//! - a step-written field whose values still form a progression →
//!   `*/k`, `start/k` or `lo-hi/k`
//! - anything else → `a,b,c`

use std::fmt;

use super::{Field, FieldKind, Position};

impl Field {
    /// Build the canonical field for an arbitrary set of values.
    ///
    /// Returns `None` when the set is empty or holds a value outside the domain.
    pub fn from_values(position: Position, values: impl IntoIterator<Item = u8>) -> Option<Field> {
        let mut values: Vec<u8> = values.into_iter().collect();
        if values.is_empty() || values.iter().any(|v| !position.contains(u32::from(*v))) {
            return None;
        }
        values.sort_unstable();
        values.dedup();
        Some(Self::from_set(position, values, false))
    }

    /// Canonical field for a non-empty, ascending, duplicate-free, in-domain set.
    ///
    /// `stepped` keeps progression syntax available when the source was a step.
    pub(crate) fn from_set(position: Position, values: Vec<u8>, stepped: bool) -> Field {
        debug_assert!(!values.is_empty(), "field value-set must not be empty");
        Field {
            position,
            kind: canonical_kind(position, values, stepped),
        }
    }

    /// This field rewritten in canonical shape; the value-set is unchanged.
    pub fn canonical(&self) -> Field {
        Self::from_set(self.position, self.values(), self.is_step())
    }

    pub(crate) fn is_step(&self) -> bool {
        matches!(self.kind, FieldKind::Step { .. })
    }
}

fn canonical_kind(position: Position, values: Vec<u8>, stepped: bool) -> FieldKind {
    let len = values.len();
    let (first, last) = match (values.first(), values.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return FieldKind::List(values),
    };

    if len == usize::from(position.size()) {
        return FieldKind::Any;
    }
    if len == 1 {
        return FieldKind::Single(first);
    }
    if usize::from(last - first) + 1 == len {
        return FieldKind::Range { lo: first, hi: last };
    }

    if stepped {
        if let Some(stride) = uniform_stride(&values) {
            let reaches_max = u32::from(last) + stride > u32::from(position.max());
            let end = if reaches_max { position.max() } else { last };
            return FieldKind::Step {
                start: first,
                end,
                stride,
            };
        }
    }

    FieldKind::List(values)
}

/// Common gap between consecutive values, if there is one.
fn uniform_stride(values: &[u8]) -> Option<u32> {
    let mut gaps = values.windows(2).map(|w| u32::from(w[1] - w[0]));
    let stride = gaps.next()?;
    gaps.all(|gap| gap == stride).then_some(stride)
}

/// Write `field`'s kind verbatim in cron syntax.
pub(super) fn render(field: &Field, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let position = field.position;
    match &field.kind {
        FieldKind::Any => write!(f, "*"),
        FieldKind::Single(v) => write!(f, "{v}"),
        FieldKind::Range { lo, hi } => write!(f, "{lo}-{hi}"),
        FieldKind::List(values) => {
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{v}")?;
            }
            Ok(())
        }
        FieldKind::Step { start, end, stride } => {
            if *end != position.max() {
                write!(f, "{start}-{end}/{stride}")
            } else if *start == position.min() {
                write!(f, "*/{stride}")
            } else {
                write!(f, "{start}/{stride}")
            }
        }
    }
}
