use joinery::{core::registry::Registry, prelude::*, registry_from_toml};
use serde_json::json;

fn value(json: serde_json::Value) -> Value {
    serde_json::from_value(json).expect("fixture should decode as a value")
}

fn fetch(registry: &Registry, name: &str, args: Vec<Arg>) -> Function {
    registry
        .fetch(name, args)
        .unwrap_or_else(|err| panic!("fetch '{name}' failed: {err}"))
}

#[test]
fn combine_then_trim_every_user() {
    let registry = Registry::core();

    let combine = fetch(
        &registry,
        "combine",
        vec![Arg::from(value(json!([[
            "tasks",
            { "name": "user" },
            [["tags", { "title": "task" }]]
        ]])))],
    );
    let trim = fetch(
        &registry,
        "map_array",
        vec![Arg::from(fetch(
            &registry,
            "reject_keys",
            vec![Arg::fields(&["email"])],
        ))],
    );

    let pipeline = combine >> trim;
    let output = pipeline
        .call(value(json!([
            [
                { "name": "Jane", "email": "jane@doe.org" },
                { "name": "Joe", "email": "joe@doe.org" }
            ],
            [[
                [
                    { "user": "Jane", "title": "One" },
                    { "user": "Joe", "title": "Two" }
                ],
                [[{ "task": "Two", "tag": "red" }]]
            ]]
        ])))
        .expect("pipeline should run");

    assert_eq!(
        output,
        value(json!([
            { "name": "Jane", "tasks": [
                { "user": "Jane", "title": "One", "tags": [] }
            ]},
            { "name": "Joe", "tasks": [
                { "user": "Joe", "title": "Two", "tags": [{ "task": "Two", "tag": "red" }] }
            ]}
        ]))
    );
    assert_eq!(pipeline.name(), "combine >> map_array");
}

#[test]
fn group_and_ungroup_are_inverse_for_complete_rows() {
    let registry = Registry::core();
    let rows = value(json!([
        { "name": "Jane", "title": "One" },
        { "name": "Jane", "title": "Two" },
        { "name": "Joe", "title": "Three" }
    ]));

    let group = fetch(
        &registry,
        "group",
        vec![Arg::from("tasks"), Arg::fields(&["title"])],
    );
    let ungroup = fetch(
        &registry,
        "ungroup",
        vec![Arg::from("tasks"), Arg::fields(&["title"])],
    );

    let grouped = group.call(rows.clone()).expect("group");
    assert_eq!(
        grouped,
        value(json!([
            { "name": "Jane", "tasks": [{ "title": "One" }, { "title": "Two" }] },
            { "name": "Joe", "tasks": [{ "title": "Three" }] }
        ]))
    );

    assert_eq!(ungroup.call(grouped).expect("ungroup"), rows);
}

#[test]
fn wrap_then_extract_builds_a_column() {
    let registry = Registry::core();

    let pipeline = fetch(
        &registry,
        "wrap",
        vec![Arg::from("address"), Arg::fields(&["city"])],
    ) >> fetch(&registry, "extract_key", vec![Arg::from("address")]);

    let output = pipeline
        .call(value(json!([
            { "name": "Jane", "city": "NYC" },
            { "name": "Joe" }
        ])))
        .expect("pipeline should run");

    assert_eq!(output, value(json!([{ "city": "NYC" }, {}])));
}

#[test]
fn custom_functions_compose_with_builtins() {
    let mut registry = Registry::core();
    registry
        .register_fn("shout", |v| {
            Ok(Value::from(v.into_text()?.to_uppercase()))
        })
        .expect("register");

    let shout = fetch(&registry, "shout", Vec::new());
    let pipeline = fetch(
        &registry,
        "map_value",
        vec![Arg::from("name"), Arg::from(shout)],
    );

    assert_eq!(
        pipeline
            .call(Value::Tuple(tuple! { "name" => "jane" }))
            .expect("call"),
        Value::Tuple(tuple! { "name" => "JANE" })
    );
}

#[test]
fn registry_reads_depth_limit_from_toml() {
    let registry = registry_from_toml("max_depth = 2\n").expect("config should parse");
    assert_eq!(registry.config().max_depth, Some(2));

    let identity = Function::new("identity", Ok);
    let walk = fetch(&registry, "recursion", vec![Arg::from(identity)]);

    assert!(walk.call(value(json!([[1]]))).is_ok());
    let err = walk.call(value(json!([[[1]]]))).expect_err("three levels");
    assert_eq!(err.class(), joinery::ErrorClass::Unsupported);
}

#[test]
fn invalid_toml_surfaces_as_config_error() {
    let err = registry_from_toml("max_depth = 0\n").expect_err("zero depth");

    assert!(matches!(err, joinery::Error::Config(_)));
    assert_eq!(err.class(), joinery::ErrorClass::InvalidInput);
}
