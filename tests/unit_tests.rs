//! Integration tests exercising full class hierarchies end to end:
//! derivation, visibility policy, superclass dispatch, instance field
//! isolation, statics, and the registry.

use std::sync::Arc;

use classkit::prelude::*;

/// Build the Animal -> Cat -> Lion hierarchy used across the suite.
fn menagerie() -> (Arc<Class>, Arc<Class>, Arc<Class>) {
    let animal = Class::derive(
        &Class::base(),
        "Animal",
        ClassDef::new()
            .field("name", "")
            .field("attributes", Value::Record(Default::default()))
            .field("traits", Value::list(["Beast"]))
            .method("init", |ctx| {
                let name: String = ctx.arg_or(0, String::new())?;
                ctx.set_field("name", name)?;
                Ok(Value::Null)
            })
            .method("eat", |ctx| {
                Ok(Value::String(format!("{}:eat", ctx.qualified_name())))
            })
            .declare(
                MethodDecl::new("sleep", |ctx| {
                    Ok(Value::String(format!("{}:sleep", ctx.qualified_name())))
                })
                .protected(),
            )
            .method("growl", |_ctx| Ok(Value::from("growl")))
            .declare(MethodDecl::new("die", |_ctx| Ok(Value::from("oops"))).private()),
    )
    .unwrap();

    let cat = Class::derive(
        &animal,
        "Cat",
        ClassDef::new()
            .field("type", "")
            .field("attributes", Value::record([("nocturnal", true)]))
            .method("init", |ctx| {
                let name = ctx.args().first().cloned().unwrap_or(Value::Null);
                ctx.call_super(&[name])?;
                let kind: String = ctx.arg_or(1, String::new())?;
                ctx.set_field("type", kind)?;
                Ok(Value::Null)
            })
            .method("growl", |_ctx| Ok(Value::from("meow")))
            .method("sleep", |_ctx| Ok(Value::from("zzz"))),
    )
    .unwrap();

    let lion = Class::derive(
        &cat,
        "Lion",
        ClassDef::new()
            .method("growl", |ctx| {
                let base: String = ctx
                    .call_super(&[])?
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                Ok(Value::String(format!("{base}:roar")))
            })
            .declare(MethodDecl::new("hunt", |_ctx| Ok(Value::from("hunt"))).private()),
    )
    .unwrap();

    (animal, cat, lion)
}

// =============================================================================
// Naming and ancestry
// =============================================================================

#[test]
fn qualified_name_is_inherited_through_the_chain() {
    let (animal, cat, lion) = menagerie();

    let mut a = animal.instantiate(&[]).unwrap();
    let mut c = cat.instantiate(&[]).unwrap();
    let mut l = lion.instantiate(&[]).unwrap();

    assert_eq!(a.call("qualified_name", &[]).unwrap(), Value::from("Animal"));
    assert_eq!(c.call("qualified_name", &[]).unwrap(), Value::from("Animal.Cat"));
    assert_eq!(
        l.call("qualified_name", &[]).unwrap(),
        Value::from("Animal.Cat.Lion")
    );
}

#[test]
fn qualified_name_holds_at_any_depth() {
    let mut class = Class::derive(&Class::base(), "L1", ClassDef::new()).unwrap();
    let mut expected = "L1".to_string();
    for level in 2..=8 {
        class = Class::derive(&class, format!("L{level}").as_str(), ClassDef::new()).unwrap();
        expected = format!("{expected}.L{level}");
    }

    let instance = class.instantiate(&[]).unwrap();
    assert_eq!(instance.qualified_name().to_string(), expected);
}

#[test]
fn instance_of_comparisons() {
    let (animal, cat, lion) = menagerie();

    let a = animal.instantiate(&[]).unwrap();
    let c = cat.instantiate(&[]).unwrap();
    let l = lion.instantiate(&[]).unwrap();

    assert!(a.instance_of(&Class::base()));
    assert!(c.instance_of(&animal));
    assert!(c.instance_of(&cat));
    assert!(l.instance_of(&lion));
    assert!(l.instance_of(&animal));

    assert!(!c.instance_of(&lion));
}

#[test]
fn parent_references_the_correct_class() {
    let (_, cat, lion) = menagerie();

    assert_eq!(cat.parent().unwrap().qualified_name().to_string(), "Animal");
    assert_eq!(
        lion.parent().unwrap().qualified_name().to_string(),
        "Animal.Cat"
    );
    assert_eq!(
        lion.parent()
            .unwrap()
            .parent()
            .unwrap()
            .qualified_name()
            .to_string(),
        "Animal"
    );
}

// =============================================================================
// Initializers
// =============================================================================

#[test]
fn init_runs_on_instantiation_and_chains_through_super() {
    let (_, _, lion) = menagerie();

    let l = lion
        .instantiate(&[Value::from("Simba"), Value::from("King")])
        .unwrap();

    assert_eq!(l.field::<String>("name").unwrap(), "Simba");
    assert_eq!(l.field::<String>("type").unwrap(), "King");
}

#[test]
fn raw_instantiation_suppresses_init() {
    let (_, cat, _) = menagerie();

    let raw = cat.instantiate_raw();
    assert_eq!(raw.field::<String>("name").unwrap(), "");
    assert_eq!(raw.field::<String>("type").unwrap(), "");
}

// =============================================================================
// Inheritance and visibility
// =============================================================================

#[test]
fn parent_methods_are_inherited() {
    let (_, cat, lion) = menagerie();

    let mut c = cat.instantiate(&[]).unwrap();
    let mut l = lion.instantiate(&[]).unwrap();

    assert_eq!(c.call("eat", &[]).unwrap(), Value::from("Animal.Cat:eat"));
    assert_eq!(l.call("eat", &[]).unwrap(), Value::from("Animal.Cat.Lion:eat"));
}

#[test]
fn protected_methods_are_not_overwritten() {
    let (_, cat, lion) = menagerie();

    let mut c = cat.instantiate(&[]).unwrap();
    let mut l = lion.instantiate(&[]).unwrap();

    // Cat declared sleep() -> "zzz" but the protected original stands.
    assert_eq!(c.call("sleep", &[]).unwrap(), Value::from("Animal.Cat:sleep"));
    assert_eq!(
        l.call("sleep", &[]).unwrap(),
        Value::from("Animal.Cat.Lion:sleep")
    );
}

#[test]
fn private_methods_are_not_inherited() {
    let (animal, cat, lion) = menagerie();

    let mut a = animal.instantiate(&[]).unwrap();
    assert_eq!(a.call("die", &[]).unwrap(), Value::from("oops"));

    let mut c = cat.instantiate(&[]).unwrap();
    let mut l = lion.instantiate(&[]).unwrap();
    assert!(matches!(
        c.call("die", &[]).unwrap_err(),
        CallError::UnknownMethod { .. }
    ));
    assert!(matches!(
        l.call("die", &[]).unwrap_err(),
        CallError::UnknownMethod { .. }
    ));

    // hunt is private on Lion: callable there, absent one level down.
    let mut l2 = lion.instantiate(&[]).unwrap();
    assert_eq!(l2.call("hunt", &[]).unwrap(), Value::from("hunt"));

    let cub = Class::derive(&lion, "Cub", ClassDef::new()).unwrap();
    let mut cub_instance = cub.instantiate(&[]).unwrap();
    assert!(matches!(
        cub_instance.call("hunt", &[]).unwrap_err(),
        CallError::UnknownMethod { .. }
    ));
}

// =============================================================================
// Superclass dispatch
// =============================================================================

#[test]
fn super_calls_execute_the_replaced_method() {
    let (_, _, lion) = menagerie();

    let mut l = lion.instantiate(&[]).unwrap();
    // Lion's growl reaches Cat's growl; Cat's does not call super, so
    // Animal's "growl" never runs.
    assert_eq!(l.call("growl", &[]).unwrap(), Value::from("meow:roar"));
}

#[test]
fn chained_overrides_resolve_one_level_at_a_time() {
    let a = Class::derive(
        &Class::base(),
        "A",
        ClassDef::new().method("tag", |_ctx| Ok(Value::from("a"))),
    )
    .unwrap();
    let b = Class::derive(
        &a,
        "B",
        ClassDef::new().method("tag", |ctx| {
            let base: String = ctx.call_super(&[])?.as_str().unwrap_or_default().to_string();
            Ok(Value::String(format!("{base}b")))
        }),
    )
    .unwrap();
    let c = Class::derive(
        &b,
        "C",
        ClassDef::new().method("tag", |ctx| {
            let base: String = ctx.call_super(&[])?.as_str().unwrap_or_default().to_string();
            Ok(Value::String(format!("{base}c")))
        }),
    )
    .unwrap();

    let mut instance = c.instantiate(&[]).unwrap();
    assert_eq!(instance.call("tag", &[]).unwrap(), Value::from("abc"));

    // The middle class still resolves its own chain independently.
    let mut middle = b.instantiate(&[]).unwrap();
    assert_eq!(middle.call("tag", &[]).unwrap(), Value::from("ab"));
}

#[test]
fn super_without_an_override_context_errors() {
    let class = Class::derive(
        &Class::base(),
        "Orphan",
        ClassDef::new().method("alone", |ctx| ctx.call_super(&[])),
    )
    .unwrap();

    let mut instance = class.instantiate(&[]).unwrap();
    assert_eq!(
        instance.call("alone", &[]).unwrap_err(),
        CallError::InvalidSuperCall {
            method: "alone".to_string()
        }
    );
}

#[test]
fn failing_override_leaves_no_stale_dispatch_state() {
    let a = Class::derive(
        &Class::base(),
        "A",
        ClassDef::new().method("work", |_ctx| Ok(Value::from("done"))),
    )
    .unwrap();
    let b = Class::derive(
        &a,
        "B",
        ClassDef::new()
            .method("work", |ctx| {
                // Fail before and independently of the super call.
                let _: i64 = ctx.arg(0)?;
                ctx.call_super(&[])
            })
            .method("other", |ctx| ctx.call_super(&[])),
    )
    .unwrap();

    let mut instance = b.instantiate(&[]).unwrap();

    // First call fails on argument extraction.
    assert!(instance.call("work", &[]).is_err());

    // Subsequent dispatch is unaffected: work() succeeds with an argument,
    // and other() still reports its own missing super target.
    assert_eq!(
        instance.call("work", &[Value::Int(1)]).unwrap(),
        Value::from("done")
    );
    assert_eq!(
        instance.call("other", &[]).unwrap_err(),
        CallError::InvalidSuperCall {
            method: "other".to_string()
        }
    );
}

#[test]
fn recursive_dispatch_carries_its_own_context() {
    let class = Class::derive(
        &Class::base(),
        "Counter",
        ClassDef::new().method("countdown", |ctx| {
            let n: i64 = ctx.arg(0)?;
            if n <= 0 {
                return Ok(Value::Int(0));
            }
            let this = ctx.this_mut()?;
            this.call("countdown", &[Value::Int(n - 1)])
        }),
    )
    .unwrap();

    let mut instance = class.instantiate(&[]).unwrap();
    assert_eq!(
        instance.call("countdown", &[Value::Int(5)]).unwrap(),
        Value::Int(0)
    );
}

// =============================================================================
// Instance field isolation
// =============================================================================

#[test]
fn sibling_instances_do_not_reference_each_other() {
    let (_, cat, _) = menagerie();

    let mut a = cat.instantiate(&[Value::from("Cinda")]).unwrap();
    let mut b = cat.instantiate(&[Value::from("Quano")]).unwrap();

    assert_eq!(a.field::<String>("name").unwrap(), "Cinda");
    assert_eq!(b.field::<String>("name").unwrap(), "Quano");

    a.set("foo", "bar");
    assert_eq!(a.get("foo"), Some(&Value::from("bar")));
    assert_eq!(b.get("foo"), None);

    b.set("bar", "foo");
    assert_eq!(a.get("bar"), None);
    assert_eq!(b.get("bar"), Some(&Value::from("foo")));
}

#[test]
fn inherited_aggregates_break_references() {
    let (_, cat, _) = menagerie();

    let mut a = cat.instantiate(&[]).unwrap();
    let b = cat.instantiate(&[]).unwrap();

    a.get_mut("traits")
        .unwrap()
        .as_list_mut()
        .unwrap()
        .push(Value::from("Mammal"));

    assert_eq!(
        a.get("traits").unwrap(),
        &Value::list(["Beast", "Mammal"])
    );
    assert_eq!(b.get("traits").unwrap(), &Value::list(["Beast"]));

    a.get_mut("attributes")
        .unwrap()
        .as_record_mut()
        .unwrap()
        .insert("nocturnal".to_string(), Value::Bool(false));

    assert_eq!(
        a.get("attributes").unwrap().as_record().unwrap()["nocturnal"],
        Value::Bool(false)
    );
    assert_eq!(
        b.get("attributes").unwrap().as_record().unwrap()["nocturnal"],
        Value::Bool(true)
    );
}

// =============================================================================
// Statics
// =============================================================================

#[test]
fn statics_are_reachable_from_derived_classes() {
    let animal = Class::derive(
        &Class::base(),
        "Animal",
        ClassDef::new()
            .declare(
                MethodDecl::new("kingdom", |_ctx| Ok(Value::from("Animalia"))).as_static(),
            )
            .static_value("legs", 4i64),
    )
    .unwrap();
    let cat = Class::derive(&animal, "Cat", ClassDef::new()).unwrap();

    assert_eq!(
        cat.call_static("kingdom", &[]).unwrap(),
        Value::from("Animalia")
    );
    assert_eq!(cat.static_value("legs"), Some(&Value::Int(4)));

    let spider = Class::derive(
        &animal,
        "Spider",
        ClassDef::new().static_value("legs", 8i64),
    )
    .unwrap();
    assert_eq!(spider.static_value("legs"), Some(&Value::Int(8)));
    assert_eq!(animal.static_value("legs"), Some(&Value::Int(4)));
}

// =============================================================================
// Derive errors
// =============================================================================

#[test]
fn deriving_without_a_name_fails_fast() {
    let (animal, _, _) = menagerie();

    assert_eq!(
        Class::derive(&animal, "", ClassDef::new()).unwrap_err(),
        DeriveError::EmptyClassName
    );
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn registry_round_trips_a_hierarchy() {
    let (animal, cat, lion) = menagerie();

    let mut registry = ClassRegistry::new();
    registry.register(Arc::clone(&animal)).unwrap();
    registry.register(Arc::clone(&cat)).unwrap();
    registry.register(Arc::clone(&lion)).unwrap();

    let found = registry.get_by_name("Animal.Cat.Lion").unwrap();
    assert!(found.derives_from(&animal));

    let mut instance = found.instantiate(&[Value::from("Nala")]).unwrap();
    assert_eq!(instance.call("growl", &[]).unwrap(), Value::from("meow:roar"));

    assert_eq!(registry.classes_in_namespace("Animal").count(), 1);
    assert_eq!(registry.classes_in_namespace("Animal.Cat").count(), 1);
}
