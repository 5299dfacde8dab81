// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{Descriptor, Issue, IssueKind, Object, ObjectShape, PathSegment, Shape, UnknownKeys, Value};

impl Descriptor {
    /// Parses `value` found at `path`, appending any issues to `issues`.
    ///
    /// Always returns a value; when issues were recorded the returned value is meaningless.
    pub(crate) fn parse_at(&self, value: &Value, path: &[PathSegment], issues: &mut Vec<Issue>) -> Value {
        match (self.shape(), value) {
            (Shape::Any, _)
            | (Shape::Null, Value::Null)
            | (Shape::Bool, Value::Bool(_))
            | (Shape::Number, Value::Number(_))
            | (Shape::String, Value::String(_)) => value.clone(),
            (Shape::Optional(_), Value::Null) => Value::Null,
            (Shape::Optional(inner), _) => inner.parse_at(value, path, issues),
            (Shape::Array(item), Value::Array(items)) => parse_array(item, value, items, path, issues),
            (Shape::Object(shape), Value::Object(object)) => parse_object(shape, value, object, path, issues),
            (Shape::Function(signature), Value::Function(function)) => Value::Function(signature.wrap(function.clone())),
            (Shape::Deferred(inner), Value::Deferred(deferred)) => Value::Deferred(deferred.validated(inner.clone())),
            (shape, _) => {
                issues.push(Issue::new(
                    path.to_vec(),
                    IssueKind::InvalidType {
                        expected: shape.kind_name(),
                        received: value.kind(),
                    },
                ));
                value.clone()
            }
        }
    }
}

fn child_path(path: &[PathSegment], segment: PathSegment) -> Vec<PathSegment> {
    let mut child = Vec::with_capacity(path.len() + 1);
    child.extend_from_slice(path);
    child.push(segment);
    child
}

fn parse_array(item: &Descriptor, original: &Value, items: &[Value], path: &[PathSegment], issues: &mut Vec<Issue>) -> Value {
    let mut changed = false;
    let parsed: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let parsed = item.parse_at(value, &child_path(path, PathSegment::Index(index)), issues);
            changed |= !parsed.same(value);
            parsed
        })
        .collect();

    if changed { Value::array(parsed) } else { original.clone() }
}

fn parse_object(shape: &ObjectShape, original: &Value, object: &Object, path: &[PathSegment], issues: &mut Vec<Issue>) -> Value {
    let mut changed = false;
    let mut parsed = BTreeMap::new();

    for (name, field) in shape.fields() {
        let field_path = child_path(path, PathSegment::Field(Arc::clone(name)));
        match object.get(name) {
            Some(value) => {
                let value_parsed = field.parse_at(value, &field_path, issues);
                changed |= !value_parsed.same(value);
                parsed.insert(Arc::clone(name), value_parsed);
            }
            None if matches!(field.shape(), Shape::Optional(_) | Shape::Any) => {}
            None => issues.push(Issue::new(field_path, IssueKind::Required)),
        }
    }

    let unknown: Vec<(&Arc<str>, &Value)> = object.entries().filter(|(name, _)| !shape.declares(name)).collect();
    if !unknown.is_empty() {
        match shape.unknown_keys() {
            UnknownKeys::Strip => changed = true,
            UnknownKeys::Strict => issues.push(Issue::new(
                path.to_vec(),
                IssueKind::UnrecognizedKeys(unknown.iter().map(|(name, _)| Arc::clone(name)).collect()),
            )),
            UnknownKeys::Passthrough => {
                for (name, value) in unknown {
                    parsed.insert(Arc::clone(name), value.clone());
                }
            }
        }
    }

    if changed {
        Value::Object(Object::from_map(parsed))
    } else {
        original.clone()
    }
}
