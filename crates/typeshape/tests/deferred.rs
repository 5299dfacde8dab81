// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for deferred values.

use futures::channel::oneshot;
use typeshape::{Deferred, Descriptor, IssueKind, Signature, Value};

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

#[test]
fn parsing_a_deferred_value_does_not_wait_for_it() {
    let (sender, receiver) = oneshot::channel::<Value>();
    let pending = Deferred::new(async move { receiver.await.unwrap_or_default() });

    let parsed = Descriptor::deferred(Descriptor::string()).parse(&pending.into()).unwrap();
    let parsed = parsed.as_deferred().unwrap().clone();
    assert!(parsed.peek().is_none());

    sender.send(Value::from("woof")).unwrap();

    assert_eq!(block_on(parsed).unwrap(), Value::from("woof"));
}

#[test]
fn deferred_result_is_validated_on_completion() {
    let noise = Deferred::new(async { Value::from(12) });

    let parsed = Descriptor::deferred(Descriptor::string()).parse(&noise.into()).unwrap();
    let error = block_on(parsed.as_deferred().unwrap().clone()).unwrap_err();

    assert!(matches!(error.issues()[0].kind(), IssueKind::InvalidType { expected: "string", .. }));
}

#[test]
fn async_factories_validate_their_result() {
    let factory = Signature::new([Descriptor::number()], Descriptor::deferred(Descriptor::number())).implement(|_, args| {
        let doubled = args[0].as_f64().unwrap_or_default() * 2.0;
        Deferred::new(async move { Value::from(doubled) }).into()
    });

    let result = factory.call(&[Value::from(21)]).unwrap();

    assert_eq!(block_on(result.as_deferred().unwrap().clone()).unwrap(), Value::from(42));
}

#[test]
fn non_deferred_value_is_rejected() {
    let error = Descriptor::deferred(Descriptor::string()).parse(&Value::from("now")).unwrap_err();

    assert_eq!(error.to_string(), "expected deferred, received string");
}
