// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Pet Owner Example
//!
//! Binds an animal, its owner and a groomer, resolves the groomer, and shows what happens when a
//! keyed animal is missing or a factory produces a value of the wrong shape.

use typeshape::{Descriptor, Function, Value};
use typeshape_di::{Construct, Container, Key, dep};

struct Groomer {
    customer: Value,
}

impl Construct for Groomer {
    fn construct(args: &[Value]) -> Self {
        Self { customer: args[0].clone() }
    }
}

impl From<Groomer> for Value {
    fn from(groomer: Groomer) -> Self {
        Self::object([("customer", groomer.customer), ("tools", Self::array(["brush", "shears"]))])
    }
}

fn animal(noise: &'static str) -> Value {
    Value::object([
        ("legCount", Value::from(4)),
        ("getNoise", Function::new(move |_| Value::from(noise)).into()),
    ])
}

fn main() -> Result<(), typeshape_di::Error> {
    let animal_shape = Descriptor::object([
        ("legCount", Descriptor::number()),
        ("getNoise", Descriptor::function([] as [Descriptor; 0], Descriptor::string())),
    ])
    .named("Animal");
    let owner_shape = Descriptor::strict_object([("pet", &animal_shape)]).named("PetOwner");
    let groomer_shape = Descriptor::object([("customer", &owner_shape)]).named("PetGroomer");
    let cat = Key::unique("sneaky-cat");

    let container = Container::new();
    container.bind(&animal_shape).to_factory(|_| animal("woof"));
    container
        .bind(&owner_shape)
        .with([dep(&animal_shape).key(&cat).strict(false)])
        .to_factory(|args| Value::object([("pet", args[0].clone())]));
    container.bind(&groomer_shape).with([&owner_shape]).to_type::<Groomer>();

    // No cat is bound yet, so the owner's lenient dependency falls back to the default animal.
    let groomer = container.resolve(&groomer_shape)?;
    let pet = groomer.get("customer").and_then(|owner| owner.get("pet")).cloned().unwrap_or_default();
    println!("the customer's pet says {:?}", pet.call_method("getNoise", &[]));

    // Keyed bindings are separate from the default one.
    container.bind_keyed(&animal_shape, &cat).to_factory(|_| animal("meow"));
    let cat_value = container.resolve_keyed(&animal_shape, &cat)?;
    println!("the cat says {:?}", cat_value.call_method("getNoise", &[]));

    // A value of the wrong shape surfaces when it is resolved, not when it is bound.
    let age = Descriptor::number().named("Age");
    container.bind(&age).to_instance("forty");
    match container.resolve(&age) {
        Ok(value) => println!("unexpected age {value:?}"),
        Err(error) => println!("{error}"),
    }

    Ok(())
}
