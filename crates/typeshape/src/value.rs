// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::{Deferred, Function, Issue, IssueKind, PathSegment, ValidationError};

/// A dynamically typed value that descriptors validate.
///
/// Values are cheap to clone: strings, arrays, objects, functions, and deferred values are
/// reference counted, so a clone refers to the same underlying data. Use [`Value::same`] to
/// check whether two values are the same reference, and `==` to compare them structurally.
///
/// # Examples
///
/// ```
/// use typeshape::{Function, Value};
///
/// let dog = Value::object([
///     ("legCount", Value::from(4)),
///     ("getNoise", Function::new(|_| Value::from("woof")).into()),
/// ]);
///
/// assert_eq!(dog.get("legCount"), Some(&Value::from(4)));
/// assert_eq!(dog.call_method("getNoise", &[]).unwrap(), Value::from("woof"));
/// ```
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. All numbers are double precision floats.
    Number(f64),
    /// An immutable string.
    String(Arc<str>),
    /// An ordered sequence of values.
    Array(Arc<[Self]>),
    /// A map from field names to values.
    Object(Object),
    /// A callable value.
    Function(Function),
    /// A value that becomes available later.
    Deferred(Deferred),
}

/// The kind of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Number`]
    Number,
    /// [`Value::String`]
    String,
    /// [`Value::Array`]
    Array,
    /// [`Value::Object`]
    Object,
    /// [`Value::Function`]
    Function,
    /// [`Value::Deferred`]
    Deferred,
}

impl ValueKind {
    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
            Self::Function => "function",
            Self::Deferred => "deferred",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Creates an object value from `(name, value)` pairs.
    pub fn object<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Arc<str>>,
        V: Into<Self>,
    {
        Self::Object(fields.into_iter().collect())
    }

    /// Creates an array value.
    pub fn array<V: Into<Self>>(items: impl IntoIterator<Item = V>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Function(_) => ValueKind::Function,
            Self::Deferred(_) => ValueKind::Deferred,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the number, if this is one.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the array items, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the object, if this is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the function, if this is one.
    #[must_use]
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the deferred value, if this is one.
    #[must_use]
    pub const fn as_deferred(&self) -> Option<&Deferred> {
        match self {
            Self::Deferred(deferred) => Some(deferred),
            _ => None,
        }
    }

    /// Returns the field `name` if this value is an object that has it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Self> {
        self.as_object().and_then(|object| object.get(name))
    }

    /// Calls the function stored in field `name`, passing this value as the receiver.
    ///
    /// # Errors
    ///
    /// Fails if the field is missing or is not a function, or if the function itself fails.
    pub fn call_method(&self, name: &str, args: &[Self]) -> Result<Self, ValidationError> {
        match self.get(name) {
            Some(Self::Function(function)) => function.call_with(self, args),
            Some(other) => Err(ValidationError::from(Issue::new(
                vec![PathSegment::from(name)],
                IssueKind::InvalidType {
                    expected: "function",
                    received: other.kind(),
                },
            ))),
            None => Err(ValidationError::from(Issue::new(vec![PathSegment::from(name)], IssueKind::Required))),
        }
    }

    /// Returns `true` if both values are the same reference.
    ///
    /// Scalars (null, booleans, numbers, strings) have no identity and compare by value.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            #[expect(clippy::float_cmp, reason = "scalars are identical exactly when they are equal")]
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Arc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => a.same(b),
            (Self::Function(a), Self::Function(b)) => a.same(b),
            (Self::Deferred(a), Self::Deferred(b)) => a.same(b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            #[expect(clippy::float_cmp, reason = "structural equality of numbers is exact")]
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a.same(b),
            (Self::Deferred(a), Self::Deferred(b)) => a.same(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => fmt::Debug::fmt(value, f),
            Self::Number(value) => fmt::Debug::fmt(value, f),
            Self::String(value) => fmt::Debug::fmt(value, f),
            Self::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Self::Object(object) => fmt::Debug::fmt(object, f),
            Self::Function(function) => fmt::Debug::fmt(function, f),
            Self::Deferred(deferred) => fmt::Debug::fmt(deferred, f),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(Arc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(Arc::from(value))
    }
}

impl From<Arc<str>> for Value {
    fn from(value: Arc<str>) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::array(items)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Deferred> for Value {
    fn from(deferred: Deferred) -> Self {
        Self::Deferred(deferred)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(value) => Self::from(value),
            serde_json::Value::Array(items) => Self::array(items),
            serde_json::Value::Object(fields) => Self::object(fields),
        }
    }
}

/// An immutable map from field names to values.
///
/// Cloning an object shares the underlying map. Objects are ordered by field name.
#[derive(Clone, Default, PartialEq)]
pub struct Object {
    fields: Arc<BTreeMap<Arc<str>, Value>>,
}

impl Object {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_map(fields: BTreeMap<Arc<str>, Value>) -> Self {
        Self { fields: Arc::new(fields) }
    }

    /// Returns the value of field `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns `true` if the object has field `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the object has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (&**name, value))
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&Arc<str>, &Value)> {
        self.fields.iter()
    }

    /// Returns a copy of this object with field `name` set to `value`.
    ///
    /// The receiver is left untouched.
    #[must_use]
    pub fn with(&self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        let mut fields = BTreeMap::clone(&self.fields);
        fields.insert(name.into(), value.into());
        Self::from_map(fields)
    }

    /// Returns `true` if both objects share the same underlying map.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<Arc<str>>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect())
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let object = Value::object([("name", "steve")]);
        let clone = object.clone();

        assert!(object.same(&clone));
        assert_eq!(object, clone);
    }

    #[test]
    fn equal_objects_are_not_the_same() {
        let a = Value::object([("name", "steve")]);
        let b = Value::object([("name", "steve")]);

        assert_eq!(a, b);
        assert!(!a.same(&b));
    }

    #[test]
    fn scalars_are_the_same_when_equal() {
        assert!(Value::from(4).same(&Value::from(4.0)));
        assert!(!Value::from(true).same(&Value::from(false)));
        assert!(Value::Null.same(&Value::default()));
    }

    #[test]
    fn object_with_leaves_original_untouched() {
        let original = Object::new().with("a", 1);
        let extended = original.with("b", 2);

        assert_eq!(original.len(), 1);
        assert_eq!(extended.len(), 2);
        assert!(!original.contains("b"));
    }

    #[test]
    fn call_method_reports_missing_field() {
        let value = Value::object([("legCount", 4)]);

        let error = value.call_method("getNoise", &[]).unwrap_err();

        assert_eq!(error.issues()[0].kind(), &IssueKind::Required);
    }

    #[test]
    fn call_method_reports_non_function_field() {
        let value = Value::object([("getNoise", "woof")]);

        let error = value.call_method("getNoise", &[]).unwrap_err();

        assert!(matches!(
            error.issues()[0].kind(),
            IssueKind::InvalidType {
                expected: "function",
                received: ValueKind::String
            }
        ));
    }

    #[test]
    fn debug_renders_nested_values() {
        let value = Value::object([("tags", Value::array(["a", "b"])), ("none", Value::Null)]);

        assert_eq!(format!("{value:?}"), r#"{"none": null, "tags": ["a", "b"]}"#);
    }

    #[cfg(feature = "json")]
    #[test]
    fn converts_from_json() {
        let value = Value::from(serde_json::json!({ "pet": { "legCount": 4 }, "tags": ["a"] }));

        assert_eq!(value.get("pet").and_then(|pet| pet.get("legCount")), Some(&Value::from(4)));
        assert_eq!(value.get("tags").and_then(Value::as_array).map(<[Value]>::len), Some(1));
    }
}
