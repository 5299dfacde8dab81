// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for validating JSON documents.

#![cfg(feature = "json")]

use serde_json::json;
use typeshape::{Descriptor, Value};

fn owner() -> Descriptor {
    Descriptor::object([
        ("name", Descriptor::string()),
        ("pets", Descriptor::array(Descriptor::object([("legCount", Descriptor::number())]))),
        ("nickname", Descriptor::optional(Descriptor::string())),
    ])
}

#[test]
fn json_document_validates() {
    let document = Value::from(json!({
        "name": "steve",
        "pets": [{ "legCount": 4 }, { "legCount": 2 }],
        "nickname": null
    }));

    let parsed = owner().parse(&document).unwrap();

    assert!(parsed.same(&document));
}

#[test]
fn json_document_reports_every_issue() {
    let document = Value::from(json!({
        "pets": [{ "legCount": "four" }],
        "nickname": 3
    }));

    let error = owner().parse(&document).unwrap_err();

    assert_eq!(
        error.to_string(),
        "name: required; pets[0].legCount: expected number, received string; nickname: expected string, received number"
    );
}
