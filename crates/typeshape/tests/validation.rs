// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for descriptor parsing.

use typeshape::{Descriptor, Function, IssueKind, PathSegment, UnknownKeys, ValidationError, Value};

type TestResult = Result<(), ValidationError>;

fn animal() -> Descriptor {
    Descriptor::object([
        ("legCount", Descriptor::number()),
        ("getNoise", Descriptor::function([] as [Descriptor; 0], Descriptor::string())),
    ])
    .named("Animal")
}

fn dog() -> Value {
    Value::object([
        ("legCount", Value::from(4)),
        ("getNoise", Function::new(|_| Value::from("woof")).into()),
    ])
}

#[test]
fn parsed_methods_stay_callable() -> TestResult {
    let parsed = animal().parse(&dog())?;

    assert_eq!(parsed.get("legCount"), Some(&Value::from(4)));
    assert_eq!(parsed.call_method("getNoise", &[])?, Value::from("woof"));
    Ok(())
}

#[test]
fn parsed_methods_validate_their_return_value() -> TestResult {
    let liar = Value::object([
        ("legCount", Value::from(4)),
        ("getNoise", Function::new(|_| Value::from(7)).into()),
    ]);

    let parsed = animal().parse(&liar)?;
    let error = parsed.call_method("getNoise", &[]).unwrap_err();

    assert!(matches!(error.issues()[0].kind(), IssueKind::InvalidReturnType(_)));
    Ok(())
}

#[test]
fn nested_objects_report_nested_paths() {
    let owner = Descriptor::object([("name", Descriptor::string()), ("pet", animal())]);
    let value = Value::object([
        ("name", Value::from("steve")),
        ("pet", Value::object([("getNoise", Function::new(|_| Value::from("woof")))])),
    ]);

    let error = owner.parse(&value).unwrap_err();
    let issue = &error.issues()[0];

    assert_eq!(issue.path(), &[PathSegment::from("pet"), PathSegment::from("legCount")]);
    assert_eq!(issue.kind(), &IssueKind::Required);
}

#[test]
fn passthrough_is_shallow() -> TestResult {
    let owner = Descriptor::object_with([("pet", Descriptor::object([("legCount", Descriptor::number())]))], UnknownKeys::Strict);
    let value = Value::object([
        ("pet", Value::object([("legCount", Value::from(4)), ("name", Value::from("rex"))])),
        ("extra", Value::from(true)),
    ]);

    owner.parse(&value).unwrap_err();

    let parsed = owner.passthrough().parse(&value)?;
    assert_eq!(parsed.get("extra"), Some(&Value::from(true)));
    // The nested object still strips its undeclared fields.
    assert_eq!(parsed.get("pet"), Some(&Value::object([("legCount", 4)])));
    Ok(())
}

#[test]
fn any_accepts_everything_unchanged() -> TestResult {
    let value = dog();

    let parsed = Descriptor::any().parse(&value)?;

    assert!(parsed.same(&value));
    Ok(())
}

#[test]
fn arrays_validate_every_item() {
    let numbers = Descriptor::array(Descriptor::number());

    let error = numbers
        .parse(&Value::array([Value::from(1), Value::from("two"), Value::from(3), Value::Null]))
        .unwrap_err();

    let paths: Vec<String> = error.issues().iter().map(ToString::to_string).collect();
    assert_eq!(
        paths,
        ["[1]: expected number, received string", "[3]: expected number, received null"]
    );
}

#[test]
fn descriptors_are_usable_from_many_threads() {
    let shared = animal();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let descriptor = shared.clone();
            std::thread::spawn(move || descriptor.is_valid(&Value::object([("legCount", 1)])))
        })
        .collect();

    for handle in handles {
        // legCount alone is missing getNoise.
        assert!(!handle.join().unwrap());
    }
}
