// mapping/fields.rs - Field access helpers shared by the record mappers
//
// Airtable field labels are typed by people and drift over time ("TSG - Target"
// becomes "TSG Target", a "+ VAT" suffix comes and goes). `resolve` absorbs
// that drift: exact names first, then a case-insensitive substring search in
// field declaration order. The first matching key wins, so overlapping
// candidates can pick an unintended field; matches are logged to make that
// visible.

use serde_json::Value;
use tracing::debug;

use crate::airtable::Fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Substring,
}

/// The key that satisfied a lookup and its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMatch<'a> {
    pub candidate: &'a str,
    pub key: &'a str,
    pub value: &'a Value,
    pub kind: MatchKind,
}

/// Resolve the first candidate name present in `fields` with a non-null value.
pub fn resolve<'a>(fields: &'a Fields, candidates: &[&'a str]) -> Option<FieldMatch<'a>> {
    for &candidate in candidates {
        if let Some(value) = fields.get(candidate) {
            if !value.is_null() {
                return Some(FieldMatch {
                    candidate,
                    key: candidate,
                    value,
                    kind: MatchKind::Exact,
                });
            }
        }
    }

    for &candidate in candidates {
        let needle = candidate.to_lowercase();
        // only the first key containing the candidate is considered
        let Some((key, value)) = fields.iter().find(|(k, _)| k.to_lowercase().contains(&needle)) else {
            continue;
        };
        if !value.is_null() {
            debug!(candidate, matched = %key, "resolved Airtable field by substring");
            return Some(FieldMatch {
                candidate,
                key,
                value,
                kind: MatchKind::Substring,
            });
        }
    }

    None
}

/// Value of the first resolvable candidate, see [`resolve`].
pub fn lookup<'a>(fields: &'a Fields, candidates: &[&'a str]) -> Option<&'a Value> {
    resolve(fields, candidates).map(|m| m.value)
}

/// Exact-name access, no drift tolerance.
pub fn exact<'a>(fields: &'a Fields, name: &str) -> Option<&'a Value> {
    fields.get(name)
}

/// JavaScript-style truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `true` when the field is present and truthy.
pub fn has(fields: &Fields, name: &str) -> bool {
    exact(fields, name).is_some_and(is_truthy)
}

fn or_else(value: Option<&Value>, fallback: Value) -> Value {
    match value {
        Some(v) if is_truthy(v) => v.clone(),
        _ => fallback,
    }
}

/// Numeric-like fields: falsy or missing becomes `0`.
pub fn or_zero(value: Option<&Value>) -> Value {
    or_else(value, Value::from(0))
}

/// Text-like fields: falsy or missing becomes `""`.
pub fn or_empty(value: Option<&Value>) -> Value {
    or_else(value, Value::from(""))
}

/// Only a missing value becomes `null`; `0` and `""` pass through.
pub fn or_null(value: Option<&Value>) -> Value {
    value.cloned().unwrap_or(Value::Null)
}

/// Sorted field names of the first record, used by the `debugFields` block.
pub fn field_names(fields: Option<&Fields>) -> Vec<String> {
    let mut names: Vec<String> = fields.map(|f| f.keys().cloned().collect()).unwrap_or_default();
    names.sort();
    names
}
