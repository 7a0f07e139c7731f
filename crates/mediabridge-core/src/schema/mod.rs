//! Per-provider wire-shape validators.
//!
//! A validator consumes an arbitrary [`Value`] and either returns the
//! provider's typed shape or a [`ValidationError`] listing every mismatched
//! path. Known fields are typed; every key a validator does not store ends up
//! in the object's `extra` passthrough map. Validators never translate enums
//! or build URLs.
//!
//! Validated types stay private to the crate: only adapters consume them.

pub(crate) mod arr;
pub(crate) mod jellyfin;
pub(crate) mod jellyseerr;
pub(crate) mod radarr;
pub(crate) mod sonarr;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{IssueCode, ValidationError, ValidationIssue};
use crate::Timestamp;

/// Keys of a validated object that the validator did not store.
pub(crate) type Passthrough = Map<String, Value>;

/// Issue collector shared by one validation run.
#[derive(Debug, Default)]
pub(crate) struct Issues {
    items: Vec<ValidationIssue>,
}

impl Issues {
    pub(crate) fn push(&mut self, path: &str, code: IssueCode, message: impl Into<String>) {
        self.items.push(ValidationIssue::new(path, code, message));
    }

    fn mismatch(&mut self, path: &str, expected: &str, actual: &Value) {
        self.push(
            path,
            IssueCode::InvalidType,
            format!("expected {expected}, received {}", kind(actual)),
        );
    }
}

/// Runs a validator against a payload root.
pub(crate) fn validate<T, F>(value: Value, parse: F) -> Result<T, ValidationError>
where
    F: FnOnce(Value, &str, &mut Issues) -> Option<T>,
{
    let mut issues = Issues::default();
    let parsed = parse(value, "", &mut issues);
    match parsed {
        Some(parsed) if issues.items.is_empty() => Ok(parsed),
        _ => Err(ValidationError::new(issues.items)),
    }
}

/// Lookup payloads: `null`, an empty array, a one-element array or a bare
/// object. Only the first array element is validated.
pub(crate) fn validate_optional<T, F>(value: Value, parse: F) -> Result<Option<T>, ValidationError>
where
    F: FnOnce(Value, &str, &mut Issues) -> Option<T>,
{
    match value {
        Value::Null => Ok(None),
        Value::Array(elements) => match elements.into_iter().next() {
            Some(first) => validate(first, |value, _, issues| parse(value, &child_index("", 0), issues))
                .map(Some),
            None => Ok(None),
        },
        other => validate(other, parse).map(Some),
    }
}

/// Validates a JSON array element-wise.
pub(crate) fn array_of<T, F>(value: Value, path: &str, issues: &mut Issues, mut parse: F) -> Option<Vec<T>>
where
    F: FnMut(Value, &str, &mut Issues) -> Option<T>,
{
    let Value::Array(elements) = value else {
        issues.mismatch(path, "array", &value);
        return None;
    };

    let mut parsed = Vec::with_capacity(elements.len());
    let mut complete = true;
    for (index, element) in elements.into_iter().enumerate() {
        match parse(element, &child_index(path, index), issues) {
            Some(item) => parsed.push(item),
            None => complete = false,
        }
    }
    complete.then_some(parsed)
}

pub(crate) fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{path}.{key}")
    }
}

pub(crate) fn child_index(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Cursor over one JSON object being validated.
///
/// Typed readers remove the key they read. `check_*` readers only inspect a
/// key, leaving it for the passthrough map. Required readers record an issue
/// and return `None` on mismatch; optional readers treat `null` as absent.
pub(crate) struct Object {
    fields: Map<String, Value>,
    path: String,
}

impl Object {
    pub(crate) fn open(value: Value, path: &str, issues: &mut Issues) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self {
                fields,
                path: path.to_owned(),
            }),
            other => {
                issues.mismatch(path, "object", &other);
                None
            }
        }
    }

    pub(crate) fn into_passthrough(self) -> Passthrough {
        self.fields
    }

    fn take_required(&mut self, key: &str, expected: &str, issues: &mut Issues) -> Option<Value> {
        let path = child(&self.path, key);
        match self.fields.remove(key) {
            None => {
                issues.push(&path, IssueCode::Required, format!("Required {expected}"));
                None
            }
            Some(Value::Null) => {
                issues.mismatch(&path, expected, &Value::Null);
                None
            }
            Some(value) => Some(value),
        }
    }

    fn take_optional(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key).filter(|value| !value.is_null())
    }

    pub(crate) fn required_str(&mut self, key: &str, issues: &mut Issues) -> Option<String> {
        let value = self.take_required(key, "string", issues)?;
        read_str(value, &child(&self.path, key), issues)
    }

    pub(crate) fn optional_str(&mut self, key: &str, issues: &mut Issues) -> Option<String> {
        let value = self.take_optional(key)?;
        read_str(value, &child(&self.path, key), issues)
    }

    pub(crate) fn required_i64(&mut self, key: &str, issues: &mut Issues) -> Option<i64> {
        let value = self.take_required(key, "integer", issues)?;
        read_i64(&value, &child(&self.path, key), issues)
    }

    pub(crate) fn optional_i64(&mut self, key: &str, issues: &mut Issues) -> Option<i64> {
        let value = self.take_optional(key)?;
        read_i64(&value, &child(&self.path, key), issues)
    }

    pub(crate) fn required_f64(&mut self, key: &str, issues: &mut Issues) -> Option<f64> {
        let value = self.take_required(key, "number", issues)?;
        read_f64(&value, &child(&self.path, key), issues)
    }

    pub(crate) fn optional_f64(&mut self, key: &str, issues: &mut Issues) -> Option<f64> {
        let value = self.take_optional(key)?;
        read_f64(&value, &child(&self.path, key), issues)
    }

    pub(crate) fn required_bool(&mut self, key: &str, issues: &mut Issues) -> Option<bool> {
        let value = self.take_required(key, "boolean", issues)?;
        read_bool(&value, &child(&self.path, key), issues)
    }

    pub(crate) fn optional_bool(&mut self, key: &str, issues: &mut Issues) -> Option<bool> {
        let value = self.take_optional(key)?;
        read_bool(&value, &child(&self.path, key), issues)
    }

    pub(crate) fn required_timestamp(&mut self, key: &str, issues: &mut Issues) -> Option<Timestamp> {
        let value = self.take_required(key, "timestamp", issues)?;
        read_timestamp(value, &child(&self.path, key), issues)
    }

    /// Provider date strings: the value must be a string, but an unreadable
    /// date resolves to `None` instead of failing the payload.
    pub(crate) fn optional_timestamp(&mut self, key: &str, issues: &mut Issues) -> Option<Timestamp> {
        let value = self.take_optional(key)?;
        let text = read_str(value, &child(&self.path, key), issues)?;
        Timestamp::parse_lenient(&text)
    }

    /// String restricted to `allowed`.
    pub(crate) fn required_one_of(
        &mut self,
        key: &str,
        allowed: &[&str],
        issues: &mut Issues,
    ) -> Option<String> {
        let path = child(&self.path, key);
        let value = self.required_str(key, issues)?;
        if allowed.contains(&value.as_str()) {
            Some(value)
        } else {
            issues.push(
                &path,
                IssueCode::InvalidEnumValue,
                format!("expected one of {}, received '{value}'", allowed.join(" | ")),
            );
            None
        }
    }

    pub(crate) fn required_str_list(&mut self, key: &str, issues: &mut Issues) -> Option<Vec<String>> {
        let value = self.take_required(key, "array", issues)?;
        array_of(value, &child(&self.path, key), issues, read_str)
    }

    pub(crate) fn optional_str_list(&mut self, key: &str, issues: &mut Issues) -> Option<Vec<String>> {
        let value = self.take_optional(key)?;
        array_of(value, &child(&self.path, key), issues, read_str)
    }

    pub(crate) fn optional_i64_list(&mut self, key: &str, issues: &mut Issues) -> Option<Vec<i64>> {
        let value = self.take_optional(key)?;
        array_of(value, &child(&self.path, key), issues, |value, path, issues| {
            read_i64(&value, path, issues)
        })
    }

    /// Object whose values are all strings.
    pub(crate) fn optional_str_map(
        &mut self,
        key: &str,
        issues: &mut Issues,
    ) -> Option<BTreeMap<String, String>> {
        let value = self.take_optional(key)?;
        let path = child(&self.path, key);
        let Value::Object(entries) = value else {
            issues.mismatch(&path, "object", &value);
            return None;
        };

        let mut map = BTreeMap::new();
        let mut complete = true;
        for (name, entry) in entries {
            let entry_path = child(&path, &name);
            if entry.is_null() {
                continue;
            }
            match read_str(entry, &entry_path, issues) {
                Some(text) => {
                    map.insert(name, text);
                }
                None => complete = false,
            }
        }
        complete.then_some(map)
    }

    pub(crate) fn required_object<T, F>(&mut self, key: &str, issues: &mut Issues, parse: F) -> Option<T>
    where
        F: FnOnce(Value, &str, &mut Issues) -> Option<T>,
    {
        let value = self.take_required(key, "object", issues)?;
        parse(value, &child(&self.path, key), issues)
    }

    pub(crate) fn optional_object<T, F>(&mut self, key: &str, issues: &mut Issues, parse: F) -> Option<T>
    where
        F: FnOnce(Value, &str, &mut Issues) -> Option<T>,
    {
        let value = self.take_optional(key)?;
        parse(value, &child(&self.path, key), issues)
    }

    pub(crate) fn required_array<T, F>(&mut self, key: &str, issues: &mut Issues, parse: F) -> Option<Vec<T>>
    where
        F: FnMut(Value, &str, &mut Issues) -> Option<T>,
    {
        let value = self.take_required(key, "array", issues)?;
        array_of(value, &child(&self.path, key), issues, parse)
    }

    pub(crate) fn optional_array<T, F>(&mut self, key: &str, issues: &mut Issues, parse: F) -> Option<Vec<T>>
    where
        F: FnMut(Value, &str, &mut Issues) -> Option<T>,
    {
        let value = self.take_optional(key)?;
        array_of(value, &child(&self.path, key), issues, parse)
    }

    /// Type-checks a declared string without consuming it.
    pub(crate) fn check_str(&self, key: &str, required: bool, issues: &mut Issues) {
        self.check(key, required, "string", Value::is_string, issues);
    }

    /// Type-checks a declared number without consuming it.
    pub(crate) fn check_number(&self, key: &str, required: bool, issues: &mut Issues) {
        self.check(key, required, "number", Value::is_number, issues);
    }

    pub(crate) fn check_bool(&self, key: &str, required: bool, issues: &mut Issues) {
        self.check(key, required, "boolean", Value::is_boolean, issues);
    }

    pub(crate) fn check_array(&self, key: &str, required: bool, issues: &mut Issues) {
        self.check(key, required, "array", Value::is_array, issues);
    }

    pub(crate) fn check_object(&self, key: &str, required: bool, issues: &mut Issues) {
        self.check(key, required, "object", Value::is_object, issues);
    }

    /// Runs `parse` over a declared object without consuming it.
    pub(crate) fn check_object_with<T, F>(&self, key: &str, required: bool, issues: &mut Issues, parse: F)
    where
        F: FnOnce(Value, &str, &mut Issues) -> Option<T>,
    {
        let path = child(&self.path, key);
        match self.fields.get(key) {
            None if required => issues.push(&path, IssueCode::Required, "Required object"),
            None => {}
            Some(Value::Null) if !required => {}
            Some(value) => {
                let _ = parse(value.clone(), &path, issues);
            }
        }
    }

    fn check(
        &self,
        key: &str,
        required: bool,
        expected: &str,
        matches: fn(&Value) -> bool,
        issues: &mut Issues,
    ) {
        let path = child(&self.path, key);
        match self.fields.get(key) {
            None if required => {
                issues.push(&path, IssueCode::Required, format!("Required {expected}"));
            }
            None => {}
            Some(Value::Null) if !required => {}
            Some(value) if !matches(value) => issues.mismatch(&path, expected, value),
            Some(_) => {}
        }
    }
}

fn read_str(value: Value, path: &str, issues: &mut Issues) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        other => {
            issues.mismatch(path, "string", &other);
            None
        }
    }
}

fn read_i64(value: &Value, path: &str, issues: &mut Issues) -> Option<i64> {
    let Value::Number(number) = value else {
        issues.mismatch(path, "integer", value);
        return None;
    };
    if let Some(integer) = number.as_i64() {
        return Some(integer);
    }
    match number.as_f64() {
        Some(float) if float.fract() == 0.0 && float.abs() < 9.0e15 => Some(float as i64),
        _ => {
            issues.push(
                path,
                IssueCode::InvalidInteger,
                format!("expected integer, received {number}"),
            );
            None
        }
    }
}

fn read_f64(value: &Value, path: &str, issues: &mut Issues) -> Option<f64> {
    match value.as_f64() {
        Some(number) => Some(number),
        None => {
            issues.mismatch(path, "number", value);
            None
        }
    }
}

fn read_bool(value: &Value, path: &str, issues: &mut Issues) -> Option<bool> {
    match value.as_bool() {
        Some(flag) => Some(flag),
        None => {
            issues.mismatch(path, "boolean", value);
            None
        }
    }
}

fn read_timestamp(value: Value, path: &str, issues: &mut Issues) -> Option<Timestamp> {
    let text = read_str(value, path, issues)?;
    match Timestamp::parse(&text) {
        Ok(timestamp) => Some(timestamp),
        Err(_) => {
            issues.push(
                path,
                IssueCode::InvalidTimestamp,
                format!("expected RFC 3339 timestamp, received '{text}'"),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Sample {
        name: String,
        count: Option<i64>,
        extra: Passthrough,
    }

    fn sample(value: Value, path: &str, issues: &mut Issues) -> Option<Sample> {
        let mut object = Object::open(value, path, issues)?;
        let name = object.required_str("name", issues);
        let count = object.optional_i64("count", issues);
        object.check_str("label", false, issues);
        Some(Sample {
            name: name?,
            count,
            extra: object.into_passthrough(),
        })
    }

    #[test]
    fn unknown_and_checked_keys_are_kept() {
        let parsed = validate(json!({"name": "a", "label": "x", "new": 1}), sample).expect("valid");
        assert_eq!(parsed.name, "a");
        assert_eq!(parsed.count, None);
        assert_eq!(parsed.extra.get("label"), Some(&json!("x")));
        assert_eq!(parsed.extra.get("new"), Some(&json!(1)));
        assert!(!parsed.extra.contains_key("name"));
    }

    #[test]
    fn collects_every_issue_with_paths() {
        let error = validate(json!([{"count": 1.5}, {"name": null, "label": 3}]), |value, path, issues| {
            array_of(value, path, issues, sample)
        })
        .expect_err("invalid");

        let issues = error.issues();
        let paths: Vec<&str> = issues.iter().map(|issue| issue.path.as_str()).collect();
        assert_eq!(paths, vec!["[0].name", "[0].count", "[1].name", "[1].label"]);
        assert_eq!(issues[0].code, IssueCode::Required);
        assert_eq!(issues[1].code, IssueCode::InvalidInteger);
        assert_eq!(issues[2].code, IssueCode::InvalidType);
    }

    #[test]
    fn null_optional_counts_as_absent() {
        let parsed = validate(json!({"name": "a", "count": null}), sample).expect("valid");
        assert_eq!(parsed.count, None);
    }

    #[test]
    fn integral_floats_are_integers() {
        let parsed = validate(json!({"name": "a", "count": 3.0}), sample).expect("valid");
        assert_eq!(parsed.count, Some(3));
    }

    #[test]
    fn root_mismatch_uses_empty_path() {
        let error = validate(json!("nope"), sample).expect_err("invalid");
        assert_eq!(error.issues()[0].path, "");
    }
}
