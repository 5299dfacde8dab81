// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Signature, ValidationError, Value};

static NEXT_DESCRIPTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Descriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u64);

impl DescriptorId {
    fn next() -> Self {
        Self(NEXT_DESCRIPTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How an object descriptor treats fields it does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnknownKeys {
    /// Undeclared fields are dropped from the parsed value.
    #[default]
    Strip,
    /// Undeclared fields are a validation issue.
    Strict,
    /// Undeclared fields are kept as they are.
    Passthrough,
}

/// The declared fields of an object descriptor.
#[derive(Debug, Clone)]
pub struct ObjectShape {
    fields: Vec<(Arc<str>, Descriptor)>,
    unknown_keys: UnknownKeys,
}

impl ObjectShape {
    /// The declared fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[(Arc<str>, Descriptor)] {
        &self.fields
    }

    /// The policy for undeclared fields.
    #[must_use]
    pub fn unknown_keys(&self) -> UnknownKeys {
        self.unknown_keys
    }

    pub(crate) fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| &**field == name)
    }
}

/// The structure a [`Descriptor`] checks for.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Shape {
    /// Accepts every value unchanged.
    Any,
    /// Accepts only [`Value::Null`].
    Null,
    /// Accepts booleans.
    Bool,
    /// Accepts numbers.
    Number,
    /// Accepts strings.
    String,
    /// Accepts arrays whose items all satisfy the inner descriptor.
    Array(Descriptor),
    /// Accepts objects with the declared fields.
    Object(ObjectShape),
    /// Accepts null or a value satisfying the inner descriptor. Object fields with this shape may be absent.
    Optional(Descriptor),
    /// Accepts functions; the parsed value validates every call against the signature.
    Function(Signature),
    /// Accepts deferred values; the parsed value validates the eventual result.
    Deferred(Descriptor),
}

impl Shape {
    /// Returns the name used for this shape in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Optional(_) => "optional",
            Self::Function(_) => "function",
            Self::Deferred(_) => "deferred",
        }
    }
}

struct DescriptorInner {
    id: DescriptorId,
    name: Option<Cow<'static, str>>,
    shape: Shape,
}

/// An immutable, identity-keyed description of a runtime shape.
///
/// A descriptor is a handle: cloning it yields another handle to the *same* descriptor, with the
/// same [`DescriptorId`]. Equality and hashing use only that identity, so two descriptors built
/// separately are never equal, however alike their shapes are.
///
/// # Examples
///
/// ```
/// use typeshape::{Descriptor, Value};
///
/// let animal = Descriptor::object([("legCount", Descriptor::number())]).named("Animal");
///
/// let dog = Value::object([("legCount", Value::from(4)), ("name", Value::from("rex"))]);
/// let parsed = animal.parse(&dog).unwrap();
///
/// // Undeclared fields are stripped by default.
/// assert_eq!(parsed, Value::object([("legCount", 4)]));
///
/// // Identity, not structure, decides equality.
/// assert_eq!(animal, animal.clone());
/// assert_ne!(Descriptor::string(), Descriptor::string());
/// ```
#[derive(Clone)]
pub struct Descriptor {
    inner: Arc<DescriptorInner>,
}

impl Descriptor {
    /// Creates a descriptor with a fresh identity.
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        Self::with_name(None, shape)
    }

    fn with_name(name: Option<Cow<'static, str>>, shape: Shape) -> Self {
        Self {
            inner: Arc::new(DescriptorInner {
                id: DescriptorId::next(),
                name,
                shape,
            }),
        }
    }

    /// Creates a descriptor that accepts every value.
    #[must_use]
    pub fn any() -> Self {
        Self::new(Shape::Any)
    }

    /// Creates a descriptor that accepts only null.
    #[must_use]
    pub fn null() -> Self {
        Self::new(Shape::Null)
    }

    /// Creates a boolean descriptor.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(Shape::Bool)
    }

    /// Creates a number descriptor.
    #[must_use]
    pub fn number() -> Self {
        Self::new(Shape::Number)
    }

    /// Creates a string descriptor.
    #[must_use]
    pub fn string() -> Self {
        Self::new(Shape::String)
    }

    /// Creates an array descriptor whose items satisfy `item`.
    #[must_use]
    pub fn array(item: impl Into<Self>) -> Self {
        Self::new(Shape::Array(item.into()))
    }

    /// Creates an object descriptor that strips undeclared fields.
    pub fn object<K, D>(fields: impl IntoIterator<Item = (K, D)>) -> Self
    where
        K: Into<Arc<str>>,
        D: Into<Self>,
    {
        Self::object_with(fields, UnknownKeys::Strip)
    }

    /// Creates an object descriptor that rejects undeclared fields.
    pub fn strict_object<K, D>(fields: impl IntoIterator<Item = (K, D)>) -> Self
    where
        K: Into<Arc<str>>,
        D: Into<Self>,
    {
        Self::object_with(fields, UnknownKeys::Strict)
    }

    /// Creates an object descriptor with an explicit policy for undeclared fields.
    pub fn object_with<K, D>(fields: impl IntoIterator<Item = (K, D)>, unknown_keys: UnknownKeys) -> Self
    where
        K: Into<Arc<str>>,
        D: Into<Self>,
    {
        Self::new(Shape::Object(ObjectShape {
            fields: fields.into_iter().map(|(name, field)| (name.into(), field.into())).collect(),
            unknown_keys,
        }))
    }

    /// Creates a descriptor that accepts null, an absent field, or a value satisfying `inner`.
    #[must_use]
    pub fn optional(inner: impl Into<Self>) -> Self {
        Self::new(Shape::Optional(inner.into()))
    }

    /// Creates a function descriptor.
    pub fn function<D>(args: impl IntoIterator<Item = D>, returns: impl Into<Self>) -> Self
    where
        D: Into<Self>,
    {
        Self::new(Shape::Function(Signature::new(args, returns)))
    }

    /// Creates a descriptor for a value that completes later with a value satisfying `inner`.
    #[must_use]
    pub fn deferred(inner: impl Into<Self>) -> Self {
        Self::new(Shape::Deferred(inner.into()))
    }

    /// Returns a new descriptor with the same shape and a diagnostic name.
    ///
    /// The result has a fresh identity; the receiver is unaffected.
    #[must_use]
    pub fn named(&self, name: impl Into<Cow<'static, str>>) -> Self {
        Self::with_name(Some(name.into()), self.inner.shape.clone())
    }

    /// Returns the identity of this descriptor.
    #[must_use]
    pub fn id(&self) -> DescriptorId {
        self.inner.id
    }

    /// Returns the diagnostic name, if one was given.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Returns the shape this descriptor checks for.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.inner.shape
    }

    /// Returns a descriptor that keeps undeclared object fields instead of stripping or rejecting them.
    ///
    /// Only the outermost object is relaxed, looking through [`Shape::Optional`] and
    /// [`Shape::Deferred`]; fields of that object keep their own policy. Descriptors with nothing
    /// to relax are returned as they are, with their identity intact. Otherwise the result is a
    /// new descriptor with a fresh identity.
    #[must_use]
    pub fn passthrough(&self) -> Self {
        let shape = match self.shape() {
            Shape::Object(object) if object.unknown_keys != UnknownKeys::Passthrough => Shape::Object(ObjectShape {
                fields: object.fields.clone(),
                unknown_keys: UnknownKeys::Passthrough,
            }),
            Shape::Optional(inner) => match Self::relaxed(inner) {
                Some(relaxed) => Shape::Optional(relaxed),
                None => return self.clone(),
            },
            Shape::Deferred(inner) => match Self::relaxed(inner) {
                Some(relaxed) => Shape::Deferred(relaxed),
                None => return self.clone(),
            },
            _ => return self.clone(),
        };

        Self::with_name(self.inner.name.clone(), shape)
    }

    fn relaxed(inner: &Self) -> Option<Self> {
        let relaxed = inner.passthrough();
        (relaxed != *inner).then_some(relaxed)
    }

    /// Validates `value` and returns the parsed value.
    ///
    /// The parsed value may differ from the input: undeclared fields may be stripped, functions
    /// are wrapped so their calls are validated, and deferred values validate their result once
    /// it arrives. When parsing changes nothing, the input itself is returned.
    ///
    /// # Errors
    ///
    /// Returns every issue found in `value`.
    pub fn parse(&self, value: &Value) -> Result<Value, ValidationError> {
        let mut issues = Vec::new();
        let parsed = self.parse_at(value, &[], &mut issues);

        if issues.is_empty() {
            Ok(parsed)
        } else {
            Err(ValidationError::new(issues))
        }
    }

    /// Returns `true` if `value` satisfies this descriptor.
    #[must_use]
    pub fn is_valid(&self, value: &Value) -> bool {
        self.parse(value).is_ok()
    }
}

impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Descriptor {}

impl Hash for Descriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl From<&Self> for Descriptor {
    fn from(descriptor: &Self) -> Self {
        descriptor.clone()
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("shape", self.shape())
            .finish()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}{}", self.shape().kind_name(), self.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Descriptor: Send, Sync, Clone);

    #[test]
    fn identical_shapes_are_distinct_descriptors() {
        let a = Descriptor::string();
        let b = Descriptor::string();

        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn clones_keep_identity() {
        let a = Descriptor::object([("name", Descriptor::string())]);

        assert_eq!(a, a.clone());
        assert_eq!(a.id(), a.clone().id());
    }

    #[test]
    fn named_creates_new_identity() {
        let a = Descriptor::number();
        let named = a.named("Count");

        assert_ne!(a, named);
        assert_eq!(named.name(), Some("Count"));
        assert_eq!(named.to_string(), "Count");
    }

    #[test]
    fn display_without_name_uses_kind_and_id() {
        let a = Descriptor::boolean();

        assert_eq!(a.to_string(), format!("boolean{}", a.id()));
    }

    #[test]
    fn passthrough_relaxes_objects_only() {
        let text = Descriptor::string();
        let object = Descriptor::strict_object([("name", &text)]).named("Person");

        assert_eq!(text.passthrough(), text);

        let relaxed = object.passthrough();
        assert_ne!(relaxed, object);
        assert_eq!(relaxed.name(), Some("Person"));
        assert!(matches!(
            relaxed.shape(),
            Shape::Object(shape) if shape.unknown_keys() == UnknownKeys::Passthrough
        ));

        // Already relaxed descriptors are returned unchanged.
        assert_eq!(relaxed.passthrough(), relaxed);
    }

    #[test]
    fn passthrough_looks_through_optional_and_deferred() {
        let person = Descriptor::strict_object([("name", Descriptor::string())]);
        let maybe = Descriptor::optional(&person).named("MaybePerson");
        let later = Descriptor::deferred(&person);

        let relaxed = maybe.passthrough();
        assert_ne!(relaxed, maybe);
        assert_eq!(relaxed.name(), Some("MaybePerson"));
        assert!(matches!(
            relaxed.shape(),
            Shape::Optional(inner)
                if matches!(inner.shape(), Shape::Object(shape) if shape.unknown_keys() == UnknownKeys::Passthrough)
        ));

        let extra = Value::object([("name", Value::from("steve")), ("age", Value::from(40))]);
        maybe.parse(&extra).unwrap_err();
        assert_eq!(relaxed.parse(&extra).unwrap().get("age"), Some(&Value::from(40)));

        assert!(matches!(later.passthrough().shape(), Shape::Deferred(inner) if inner != &person));

        // Nothing to relax: identity is kept.
        let maybe_text = Descriptor::optional(Descriptor::string());
        assert_eq!(maybe_text.passthrough(), maybe_text);
        assert_eq!(relaxed.passthrough(), relaxed);
    }
}
