//! Token grammar for a single field.
//!
//! Applied in order: `*`, step (`*/k`, `a/k`, `a-b/k`), range (`a-b`),
//! list (`a,b,...`), bare value.

use crate::error::ParseError;

use super::{Field, FieldKind, Position};

impl Field {
    /// Parse one field token against `position`'s domain.
    pub fn parse(token: &str, position: Position) -> Result<Field, ParseError> {
        let token = token.trim();
        let kind = if token == "*" {
            FieldKind::Any
        } else if let Some((base, stride)) = token.split_once('/') {
            parse_step(token, base, stride, position)?
        } else if let Some((lo, hi)) = token.split_once('-') {
            let (lo, hi) = parse_bounds(token, lo, hi, position)?;
            FieldKind::Range { lo, hi }
        } else if token.contains(',') {
            parse_list(token, position)?
        } else {
            FieldKind::Single(parse_value(token, token, position)?)
        };

        Ok(Field { position, kind })
    }
}

fn parse_step(token: &str, base: &str, stride: &str, position: Position) -> Result<FieldKind, ParseError> {
    let stride = parse_number(stride).ok_or_else(|| invalid(token, position))?;
    if stride == 0 {
        return Err(ParseError::ZeroStride { position });
    }

    let (start, end) = if base == "*" {
        (position.min(), position.max())
    } else if let Some((lo, hi)) = base.split_once('-') {
        parse_bounds(token, lo, hi, position)?
    } else {
        (parse_value(token, base, position)?, position.max())
    };

    Ok(FieldKind::Step { start, end, stride })
}

fn parse_bounds(token: &str, lo: &str, hi: &str, position: Position) -> Result<(u8, u8), ParseError> {
    let lo = parse_value(token, lo, position)?;
    let hi = parse_value(token, hi, position)?;
    if lo > hi {
        return Err(ParseError::InvertedRange { position, lo, hi });
    }
    Ok((lo, hi))
}

fn parse_list(token: &str, position: Position) -> Result<FieldKind, ParseError> {
    let mut values = Vec::new();
    for part in token.split(',') {
        if part.is_empty() {
            return Err(ParseError::EmptyListElement {
                position,
                token: token.to_string(),
            });
        }
        values.push(parse_value(token, part, position)?);
    }
    values.sort_unstable();
    values.dedup();
    Ok(FieldKind::List(values))
}

/// Parse a bare in-domain value; `token` is the whole field for error reporting.
fn parse_value(token: &str, raw: &str, position: Position) -> Result<u8, ParseError> {
    let value = parse_number(raw).ok_or_else(|| invalid(token, position))?;
    if !position.contains(value) {
        return Err(ParseError::OutOfRange {
            position,
            value,
            min: position.min(),
            max: position.max(),
        });
    }
    // In-domain values always fit: every domain tops out below 60.
    u8::try_from(value).map_err(|_| invalid(token, position))
}

/// Unsigned decimal with no sign, whitespace or other decoration.
fn parse_number(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn invalid(token: &str, position: Position) -> ParseError {
    ParseError::InvalidToken {
        position,
        token: token.to_string(),
    }
}
