//! Read-only accessors over one exported unitdef JSON object
//!
//! The export is an untyped bag of engine fields whose presence depends on
//! the kind of unit. Nothing here mutates the underlying value.

use serde_json::{Map, Number, Value};

use crate::error::{ReshapeError, Result};

const UNNAMED: &str = "<unnamed>";

/// A raw unitdef as exported by the engine.
#[derive(Debug, Clone, Copy)]
pub struct RawUnitDef<'a> {
    label: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> RawUnitDef<'a> {
    pub fn new(value: &'a Value) -> Result<Self> {
        let fields = value.as_object().ok_or_else(|| ReshapeError::InvalidField {
            unit: UNNAMED.to_string(),
            field: "<root>",
            expected: "JSON object",
        })?;
        let label = fields.get("name").and_then(Value::as_str).unwrap_or(UNNAMED);
        Ok(Self { label, fields })
    }

    /// Name used in diagnostics, available even when `name` is missing.
    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub fn required(&self, field: &'static str) -> Result<&'a Value> {
        self.get(field).ok_or_else(|| ReshapeError::MissingField {
            unit: self.label.to_string(),
            field,
        })
    }

    pub fn required_str(&self, field: &'static str) -> Result<&'a str> {
        self.required(field)?
            .as_str()
            .ok_or_else(|| self.invalid(field, "string"))
    }

    /// Numeric field, kept exactly as exported (integers stay integers).
    pub fn required_number(&self, field: &'static str) -> Result<Number> {
        self.required(field)?
            .as_number()
            .cloned()
            .ok_or_else(|| self.invalid(field, "number"))
    }

    pub fn required_i64(&self, field: &'static str) -> Result<i64> {
        self.required(field)?
            .as_i64()
            .ok_or_else(|| self.invalid(field, "integer"))
    }

    pub fn required_bool(&self, field: &'static str) -> Result<bool> {
        self.required(field)?
            .as_bool()
            .ok_or_else(|| self.invalid(field, "boolean"))
    }

    /// Numeric field kept as exported, 0 when the engine omits it.
    pub fn number_or_zero(&self, field: &'static str) -> Result<Number> {
        match self.get(field) {
            None => Ok(Number::from(0)),
            Some(value) => value
                .as_number()
                .cloned()
                .ok_or_else(|| self.invalid(field, "number")),
        }
    }

    /// Numeric field that defaults to 0 when the engine omits it.
    pub fn f64_or_zero(&self, field: &'static str) -> Result<f64> {
        match self.get(field) {
            None => Ok(0.0),
            Some(value) => value.as_f64().ok_or_else(|| self.invalid(field, "number")),
        }
    }

    /// Boolean-ish engine flag; absent means false.
    pub fn flag(&self, field: &str) -> bool {
        self.get(field).is_some_and(truthy)
    }

    pub fn str_field(&self, field: &str) -> Option<&'a str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn custom_params(&self) -> Option<CustomParams<'a>> {
        self.get("customParams")
            .and_then(Value::as_object)
            .map(CustomParams)
    }

    /// Category tags, from `modCategories` or else `springCategories`.
    pub fn categories(&self) -> Categories<'a> {
        let tags = self
            .get("modCategories")
            .or_else(|| self.get("springCategories"))
            .and_then(Value::as_object);
        Categories(tags)
    }

    pub fn weapon_defs(&self) -> &'a [Value] {
        self.get("wDefs")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn invalid(&self, field: &'static str, expected: &'static str) -> ReshapeError {
        ReshapeError::InvalidField {
            unit: self.label.to_string(),
            field,
            expected,
        }
    }
}

/// The nested `customParams` mapping. The engine stringifies most values.
#[derive(Debug, Clone, Copy)]
pub struct CustomParams<'a>(&'a Map<String, Value>);

impl<'a> CustomParams<'a> {
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(truthy)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Categories<'a>(Option<&'a Map<String, Value>>);

impl Categories<'_> {
    pub fn has(&self, tag: &str) -> bool {
        self.0
            .and_then(|tags| tags.get(tag))
            .is_some_and(truthy)
    }
}

/// Truthiness of an engine value: `true`, non-zero numbers, and strings
/// other than "", "0" and "false".
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
        }
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}
