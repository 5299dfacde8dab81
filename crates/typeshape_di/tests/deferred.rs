// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for bindings that produce deferred values.

use testing_aids::CallCounter;
use typeshape::{Deferred, Descriptor, IssueKind, Value};
use typeshape_di::{Container, Error};

type TestResult = Result<(), Error>;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

fn deferred_of(value: &Value) -> Deferred {
    value.as_deferred().cloned().unwrap_or_else(|| Deferred::ready(Value::Null))
}

#[test]
fn deferred_factory_is_cached_and_awaited_by_the_caller() -> TestResult {
    let noise = Descriptor::deferred(Descriptor::string());
    let counter = CallCounter::new();
    let container = Container::new();

    let calls = counter.clone();
    container.bind(&noise).to_factory(move |_| {
        calls.hit();
        Deferred::new(async { Value::from("woof") }).into()
    });

    let first = container.resolve(&noise)?;
    let second = container.resolve(&noise)?;

    counter.assert_count(1);
    assert!(first.same(&second));
    assert_eq!(block_on(deferred_of(&first)).unwrap(), Value::from("woof"));
    Ok(())
}

#[test]
fn deferred_result_is_validated_on_completion() -> TestResult {
    let noise = Descriptor::deferred(Descriptor::string());
    let container = Container::new();

    container.bind(&noise).to_factory(|_| Deferred::new(async { Value::from(7) }).into());

    // Resolution succeeds: the value has not completed yet.
    let resolved = container.resolve(&noise)?;
    let error = block_on(deferred_of(&resolved)).unwrap_err();

    assert!(matches!(error.issues()[0].kind(), IssueKind::InvalidType { expected: "string", .. }));
    Ok(())
}

#[test]
fn deferred_dependencies_are_passed_unawaited() -> TestResult {
    let count = Descriptor::deferred(Descriptor::number());
    let doubled = Descriptor::deferred(Descriptor::number());
    let container = Container::new();

    container.bind(&count).to_instance(Deferred::ready(Value::from(21)));
    container.bind(&doubled).with([&count]).to_factory(|args| {
        let count = deferred_of(&args[0]);
        Deferred::try_new(async move {
            let value = count.await?;
            Ok(Value::from(value.as_f64().unwrap_or_default() * 2.0))
        })
        .into()
    });

    let resolved = container.resolve(&doubled)?;

    assert_eq!(block_on(deferred_of(&resolved)).unwrap(), Value::from(42));
    Ok(())
}

#[test]
fn plain_value_for_deferred_binding_fails() {
    let noise = Descriptor::deferred(Descriptor::string());
    let container = Container::new();

    container.bind(&noise).to_instance("woof");

    assert!(container.resolve(&noise).unwrap_err().is_validation());
}
