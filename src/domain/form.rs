//! Declarative form schema and validation.
//!
//! Each assessment publishes a static list of [`FieldSpec`]s. The same schema
//! drives validation here and form rendering in the TUI, so bounds and labels
//! live in exactly one place.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

/// One selectable value of a categorical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Wire value ("0", "1", ...)
    pub value: &'static str,
    /// Human-readable label
    pub label: &'static str,
}

/// How a field's raw text is checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Numeric, must lie in `[min, max]`.
    Bounded { min: f64, max: f64 },
    /// Numeric with no range constraint.
    Unbounded,
    /// Categorical, must be one of `options`.
    Choice { options: &'static [ChoiceOption] },
}

/// Static description of a single form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Stable key used by callers (`"age"`, `"qrs_duration"`, ...)
    pub key: &'static str,
    /// Label shown to the user and used in validation messages
    pub label: &'static str,
    /// Unit appended to range messages, if the field reports one
    pub unit: Option<&'static str>,
    /// Short input hint for the form renderer
    pub hint: &'static str,
    pub kind: FieldKind,
    /// Value a fresh (or reset) form starts with
    pub default: Option<&'static str>,
}

impl FieldSpec {
    /// Whether the field takes a numeric value.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        !matches!(self.kind, FieldKind::Choice { .. })
    }

    /// Check one raw value against this field.
    ///
    /// Returns the error message, if any.
    #[must_use]
    pub fn check(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Some(format!("{} is required", self.label));
        }

        match self.kind {
            FieldKind::Choice { options } => {
                if options.iter().any(|o| o.value == raw) {
                    None
                } else {
                    let values: Vec<&str> = options.iter().map(|o| o.value).collect();
                    Some(format!("{} must be one of {}", self.label, values.join(", ")))
                }
            }
            FieldKind::Unbounded => match parse_number(raw) {
                Some(_) => None,
                None => Some(format!("{} must be a number", self.label)),
            },
            FieldKind::Bounded { min, max } => match parse_number(raw) {
                None => Some(format!("{} must be a number", self.label)),
                Some(v) if v < min || v > max => Some(match self.unit {
                    Some(unit) => format!("{} must be between {}-{} {}", self.label, min, max, unit),
                    None => format!("{} must be between {}-{}", self.label, min, max),
                }),
                Some(_) => None,
            },
        }
    }
}

/// Parse a finite decimal number. `NaN` and infinities are rejected.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Smallest allocation for a growing field buffer.
const MIN_FIELD_CAPACITY: usize = 16;

/// Validation failure: every message, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{}", .messages.join("; "))]
pub struct ValidationError {
    pub messages: Vec<String>,
}

impl ValidationError {
    /// Wrap a list of messages. Returns `None` when the list is empty.
    #[must_use]
    pub fn from_messages(messages: Vec<String>) -> Option<Self> {
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }
}

/// Raw, unvalidated values of one form, aligned with its schema.
#[derive(Debug, Clone)]
pub struct FormValues {
    schema: &'static [FieldSpec],
    values: Vec<String>,
}

impl FormValues {
    /// All fields empty.
    #[must_use]
    pub fn empty(schema: &'static [FieldSpec]) -> Self {
        Self {
            schema,
            values: vec![String::new(); schema.len()],
        }
    }

    /// Fields pre-filled with their schema defaults.
    #[must_use]
    pub fn with_defaults(schema: &'static [FieldSpec]) -> Self {
        Self {
            schema,
            values: schema
                .iter()
                .map(|f| f.default.unwrap_or_default().to_string())
                .collect(),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &'static [FieldSpec] {
        self.schema
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set a field by key. Returns `false` if the key is unknown.
    ///
    /// The previous value is zeroized before it is replaced.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.index_of(key) {
            Some(i) => {
                let value = Zeroizing::new(value.into());
                overwrite(&mut self.values[i], &value);
                true
            }
            None => false,
        }
    }

    /// Builder-style [`FormValues::set`]; unknown keys are ignored.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index_of(key).map(|i| self.values[i].as_str())
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Replace the value at `index`, zeroizing the old one.
    pub fn replace_at(&mut self, index: usize, text: &str) {
        if let Some(buf) = self.values.get_mut(index) {
            overwrite(buf, text);
        }
    }

    /// Append a character at `index`.
    ///
    /// When the buffer must grow, the old allocation is zeroized before it is
    /// freed.
    pub fn push_at(&mut self, index: usize, c: char) {
        let Some(buf) = self.values.get_mut(index) else {
            return;
        };
        if buf.len() + c.len_utf8() > buf.capacity() {
            let mut grown = String::with_capacity((buf.capacity() * 2).max(MIN_FIELD_CAPACITY));
            grown.push_str(buf);
            grown.push(c);
            buf.zeroize();
            *buf = grown;
        } else {
            buf.push(c);
        }
    }

    /// Remove the last character at `index`, zeroizing the buffer it came from.
    pub fn pop_at(&mut self, index: usize) {
        let Some(buf) = self.values.get_mut(index) else {
            return;
        };
        let Some(last) = buf.chars().next_back() else {
            return;
        };
        let kept = Zeroizing::new(buf[..buf.len() - last.len_utf8()].to_owned());
        overwrite(buf, &kept);
    }

    /// Zeroize and empty the value at `index`.
    pub fn clear_at(&mut self, index: usize) {
        if let Some(buf) = self.values.get_mut(index) {
            buf.zeroize();
        }
    }

    /// Parsed numeric value of a field, if present and finite.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(parse_number)
    }

    /// Trimmed categorical value of a field, if non-empty.
    #[must_use]
    pub fn choice(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Validate every field independently.
    ///
    /// Total: always returns a list, empty when the form is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        self.schema
            .iter()
            .zip(&self.values)
            .filter_map(|(spec, raw)| spec.check(raw))
            .collect()
    }

    /// Validate and wrap failures in a [`ValidationError`].
    ///
    /// # Errors
    /// Returns every message when at least one field is invalid.
    pub fn ensure_valid(&self) -> Result<(), ValidationError> {
        match ValidationError::from_messages(self.validate()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Wipe all buffers and restore schema defaults.
    pub fn reset(&mut self) {
        self.wipe();
        for (value, spec) in self.values.iter_mut().zip(self.schema) {
            value.push_str(spec.default.unwrap_or_default());
        }
    }

    /// Zero every buffer in place, leaving all fields empty.
    pub fn wipe(&mut self) {
        for value in &mut self.values {
            value.zeroize();
        }
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.schema.iter().position(|f| f.key == key)
    }
}

/// Zeroize `buf` in place, then write `text` into it.
fn overwrite(buf: &mut String, text: &str) {
    buf.zeroize();
    buf.push_str(text);
}

/// Look up a categorical field and map it through `parse`.
///
/// # Errors
/// Returns a single-message error when the value is missing or unknown.
pub(crate) fn require_choice<T>(
    values: &FormValues,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    values
        .choice(key)
        .and_then(parse)
        .ok_or_else(|| missing(values, key))
}

/// Look up a numeric field.
///
/// # Errors
/// Returns a single-message error when the value is missing or not a number.
pub(crate) fn require_number(values: &FormValues, key: &str) -> Result<f64, ValidationError> {
    values.number(key).ok_or_else(|| missing(values, key))
}

fn missing(values: &FormValues, key: &str) -> ValidationError {
    let label = values
        .schema
        .iter()
        .find(|f| f.key == key)
        .map_or(key, |f| f.label);
    ValidationError {
        messages: vec![format!("{label} is required")],
    }
}
