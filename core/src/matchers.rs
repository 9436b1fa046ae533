//! Partial, inclusion-based matching of live response bodies.
//!
//! # Design
//! The remote service assigns ids and defaults we do not control, and its
//! list endpoints return whatever the shared dataset currently holds. A
//! pattern therefore maps each field name to a [`Rule`]: either the value
//! must equal a literal the caller supplied, or it merely has to be of some
//! JSON type. Objects are matched as subsets (unlisted fields are ignored);
//! arrays are matched by inclusion (each pattern needs at least one
//! conforming element, other elements are ignored).

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::{CreatePost, CreateTodo, CreateUser, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Null,
    Bool,
    /// A number with no fractional part.
    Integer,
    /// Any number, integers included.
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    pub fn of(value: &Value) -> JsonType {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => JsonType::Integer,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    pub fn admits(self, value: &Value) -> bool {
        match (self, JsonType::of(value)) {
            (JsonType::Number, JsonType::Integer) => true,
            (expected, actual) => expected == actual,
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::Null => "null",
            JsonType::Bool => "boolean",
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        };
        f.write_str(name)
    }
}

/// What a single field must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Literal(Value),
    AnyOf(JsonType),
}

impl Rule {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Rule::Literal(expected) => literal_eq(expected, value),
            Rule::AnyOf(ty) => ty.admits(value),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Literal(v) => write!(f, "{v}"),
            Rule::AnyOf(ty) => write!(f, "any {ty}"),
        }
    }
}

/// `5` and `5.0` are the same literal; everything else compares structurally.
fn literal_eq(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (a.as_u64(), b.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => a.as_f64() == b.as_f64(),
            },
        },
        _ => expected == actual,
    }
}

/// One field that failed its rule. `actual` is `None` when the field is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMismatch {
    pub field: String,
    pub expected: Rule,
    pub actual: Option<Value>,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.actual {
            Some(v) => write!(f, "`{}`: expected {}, found {v}", self.field, self.expected),
            None => write!(f, "`{}`: expected {}, field missing", self.field, self.expected),
        }
    }
}

/// Object-subset pattern: field name to rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectPattern {
    fields: BTreeMap<String, Rule>,
}

impl ObjectPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn literal(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), Rule::Literal(value.into()));
        self
    }

    pub fn any(mut self, field: &str, ty: JsonType) -> Self {
        self.fields.insert(field.to_string(), Rule::AnyOf(ty));
        self
    }

    /// Literal when `value` is given, otherwise any value of `ty`.
    pub fn literal_or_any<V: Into<Value>>(self, field: &str, value: Option<V>, ty: JsonType) -> Self {
        match value {
            Some(v) => self.literal(field, v),
            None => self.any(field, ty),
        }
    }

    /// Add or replace literals with the non-null fields of `partial`, so a
    /// created resource's shape overlaid with an update payload describes
    /// the resource after the update.
    pub fn overlay<T: Serialize>(mut self, partial: &T) -> Result<Self, serde_json::Error> {
        let Value::Object(map) = serde_json::to_value(partial)? else {
            return Err(serde::ser::Error::custom("partial must serialize to a JSON object"));
        };
        for (field, value) in map {
            if !value.is_null() {
                self.fields.insert(field, Rule::Literal(value));
            }
        }
        Ok(self)
    }

    pub fn check(&self, value: &Value) -> Result<(), Vec<FieldMismatch>> {
        let Value::Object(obj) = value else {
            return Err(self
                .fields
                .iter()
                .map(|(field, rule)| FieldMismatch {
                    field: field.clone(),
                    expected: rule.clone(),
                    actual: None,
                })
                .collect());
        };
        let mismatches: Vec<FieldMismatch> = self
            .fields
            .iter()
            .filter_map(|(field, rule)| match obj.get(field) {
                Some(actual) if rule.accepts(actual) => None,
                actual => Some(FieldMismatch {
                    field: field.clone(),
                    expected: rule.clone(),
                    actual: actual.cloned(),
                }),
            })
            .collect();
        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(mismatches)
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        self.check(value).is_ok()
    }
}

impl fmt::Display for ObjectPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (field, rule)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {rule}")?;
        }
        f.write_str("}")
    }
}

/// A body that failed its expectation, with everything needed to diagnose it
/// against a live, mutable dataset.
#[derive(Debug, Error)]
#[error("body does not match {expected}\n{reason}\nactual body:\n{actual}")]
pub struct MatchError {
    pub expected: String,
    pub reason: String,
    pub actual: String,
}

/// Expected shape of a whole response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// The body is an object satisfying the pattern.
    Object(ObjectPattern),
    /// The body is an array; every pattern is satisfied by some element.
    ArrayContaining(Vec<ObjectPattern>),
    /// The body is exactly `[]`.
    EmptyArray,
}

impl Expectation {
    pub fn object(pattern: ObjectPattern) -> Self {
        Expectation::Object(pattern)
    }

    pub fn contains(pattern: ObjectPattern) -> Self {
        Expectation::ArrayContaining(vec![pattern])
    }

    pub fn verify(&self, body: &Value) -> Result<(), MatchError> {
        let reason = match (self, body) {
            (Expectation::Object(pattern), _) => match pattern.check(body) {
                Ok(()) => return Ok(()),
                Err(mismatches) => render_mismatches(&mismatches),
            },
            (Expectation::EmptyArray, Value::Array(items)) if items.is_empty() => return Ok(()),
            (Expectation::EmptyArray, Value::Array(items)) => {
                format!("expected no elements, found {}", items.len())
            }
            (Expectation::ArrayContaining(patterns), Value::Array(items)) => {
                let missing: Vec<String> = patterns
                    .iter()
                    .filter(|p| !items.iter().any(|item| p.matches(item)))
                    .map(|p| describe_miss(p, items))
                    .collect();
                if missing.is_empty() {
                    return Ok(());
                }
                missing.join("\n")
            }
            (_, other) => format!("expected an array, found {}", JsonType::of(other)),
        };
        Err(MatchError {
            expected: self.to_string(),
            reason,
            actual: serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string()),
        })
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Object(p) => write!(f, "object containing {p}"),
            Expectation::EmptyArray => f.write_str("[]"),
            Expectation::ArrayContaining(patterns) => {
                f.write_str("array containing [")?;
                for (i, p) in patterns.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{p}")?;
                }
                f.write_str("]")
            }
        }
    }
}

fn render_mismatches(mismatches: &[FieldMismatch]) -> String {
    mismatches
        .iter()
        .map(|m| format!("  {m}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Explain a pattern no element satisfied, using the closest element.
fn describe_miss(pattern: &ObjectPattern, items: &[Value]) -> String {
    let closest = items
        .iter()
        .filter_map(|item| pattern.check(item).err())
        .min_by_key(Vec::len);
    match closest {
        Some(mismatches) => format!(
            "no element of {} matches {pattern}; closest differs in:\n{}",
            items.len(),
            render_mismatches(&mismatches)
        ),
        None => format!("no element matches {pattern} (array is empty)"),
    }
}

/// The 422 matcher: the body is an array containing each descriptor.
pub fn errors_containing(errors: &[FieldError]) -> Expectation {
    Expectation::ArrayContaining(
        errors
            .iter()
            .map(|e| {
                ObjectPattern::new()
                    .literal("field", e.field.as_str())
                    .literal("message", e.message.as_str())
            })
            .collect(),
    )
}

/// A user: explicit fields echo back unchanged, the id is some integer.
pub fn user_shape(expected: Option<&CreateUser>, id: Option<u64>) -> ObjectPattern {
    ObjectPattern::new()
        .literal_or_any("id", id, JsonType::Integer)
        .literal_or_any("name", expected.map(|u| u.name.as_str()), JsonType::String)
        .literal_or_any("email", expected.map(|u| u.email.as_str()), JsonType::String)
        .literal_or_any("gender", expected.map(|u| u.gender.as_str()), JsonType::String)
        .literal_or_any("status", expected.map(|u| u.status.as_str()), JsonType::String)
}

pub fn post_shape(expected: Option<&CreatePost>, user_id: Option<u64>) -> ObjectPattern {
    ObjectPattern::new()
        .any("id", JsonType::Integer)
        .literal_or_any("user_id", user_id, JsonType::Integer)
        .literal_or_any("title", expected.map(|p| p.title.as_str()), JsonType::String)
        .literal_or_any("body", expected.map(|p| p.body.as_str()), JsonType::String)
}

pub fn todo_shape(expected: Option<&CreateTodo>, user_id: Option<u64>) -> ObjectPattern {
    ObjectPattern::new()
        .any("id", JsonType::Integer)
        .literal_or_any("user_id", user_id, JsonType::Integer)
        .literal_or_any("title", expected.map(|t| t.title.as_str()), JsonType::String)
        .literal_or_any("status", expected.map(|t| t.status.as_str()), JsonType::String)
}
