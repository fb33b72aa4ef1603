//! Constructors for every transform `Registry::core` ships with.

use super::{ArgumentError, Args, Constructor};
use crate::{
    combine::{CombineInput, Combiner},
    error::TransformError,
    function::Function,
    mapping::prepare_mappings,
    recursion::{Guard, Recursion},
    reshape::{self, UnwrapOptions},
    transform,
    value::{Sequence, Tuple, Value},
};
use joinery_config::ToolkitConfig;
use std::sync::Arc;

type Built = Result<Function, ArgumentError>;

pub(super) fn all() -> Vec<(&'static str, Constructor)> {
    vec![
        // join and reshape
        ("combine", constructor(combine)),
        ("nest", constructor(nest)),
        ("unwrap", constructor(unwrap)),
        ("group", constructor(group)),
        ("ungroup", constructor(ungroup)),
        ("split", constructor(split)),
        ("fold", constructor(fold)),
        // recursion
        (
            "recursion",
            constructor(|args, config| recursive("recursion", Guard::Any, args, config)),
        ),
        (
            "list_recursion",
            constructor(|args, config| recursive("list_recursion", Guard::List, args, config)),
        ),
        (
            "tuple_recursion",
            constructor(|args, config| recursive("tuple_recursion", Guard::Tuple, args, config)),
        ),
        // arrays
        ("map_array", constructor(map_array)),
        ("wrap", constructor(wrap)),
        ("extract_key", constructor(extract_key)),
        ("insert_key", constructor(insert_key)),
        ("add_keys", constructor(add_keys)),
        // tuples
        ("map_keys", constructor(map_keys)),
        ("map_values", constructor(map_values)),
        ("map_value", constructor(map_value)),
        ("rename_keys", constructor(rename_keys)),
        ("reject_keys", constructor(reject_keys)),
        ("accept_keys", constructor(accept_keys)),
    ]
}

fn constructor<F>(f: F) -> Constructor
where
    F: Fn(&mut Args, &ToolkitConfig) -> Built + Send + Sync + 'static,
{
    Arc::new(f)
}

fn on_tuple<F>(name: &'static str, f: F) -> Function
where
    F: Fn(Tuple) -> Result<Value, TransformError> + Send + Sync + 'static,
{
    Function::new(name, move |value| f(value.into_tuple()?))
}

fn on_sequence<F>(name: &'static str, f: F) -> Function
where
    F: Fn(Sequence) -> Result<Value, TransformError> + Send + Sync + 'static,
{
    Function::new(name, move |value| f(value.into_sequence()?))
}

fn on_list<F>(name: &'static str, f: F) -> Function
where
    F: Fn(Vec<Value>) -> Result<Value, TransformError> + Send + Sync + 'static,
{
    Function::new(name, move |value| f(value.into_list()?))
}

///
/// JOIN / RESHAPE
///

// Anything that is not a list passes through untouched.
fn combine(args: &mut Args, config: &ToolkitConfig) -> Built {
    let mappings = prepare_mappings(&args.mappings()?)?;
    let combiner = Combiner::new().with_debug(config.debug);

    Ok(Function::new("combine", move |value| {
        if !matches!(value, Value::List(_)) {
            return Ok(value);
        }

        let input = CombineInput::from_value(value, &mappings)?;
        Ok(Value::from_sequence(combiner.execute(input, &mappings)))
    }))
}

fn nest(args: &mut Args, _: &ToolkitConfig) -> Built {
    let root = args.text()?;
    let fields = args.fields()?;

    Ok(on_tuple("nest", move |mut tuple| {
        reshape::nest_in_place(&mut tuple, &root, &fields);
        Ok(Value::Tuple(tuple))
    }))
}

fn unwrap(args: &mut Args, _: &ToolkitConfig) -> Built {
    let root = args.text()?;
    let selected = args.optional_fields()?;
    let options = match args.optional_tuple()? {
        Some(tuple) => UnwrapOptions::from_tuple(&tuple)?,
        None => UnwrapOptions::default(),
    };

    Ok(on_tuple("unwrap", move |mut tuple| {
        reshape::unwrap_in_place(&mut tuple, &root, selected.as_deref(), options);
        Ok(Value::Tuple(tuple))
    }))
}

fn group(args: &mut Args, _: &ToolkitConfig) -> Built {
    let new_field = args.text()?;
    let fields = args.fields()?;

    Ok(on_sequence("group", move |sequence| {
        Ok(Value::from_sequence(reshape::group(
            sequence, &new_field, &fields,
        )))
    }))
}

fn ungroup(args: &mut Args, _: &ToolkitConfig) -> Built {
    let field = args.text()?;
    let fields = args.fields()?;

    Ok(on_sequence("ungroup", move |sequence| {
        Ok(Value::from_sequence(reshape::ungroup(
            sequence, &field, &fields,
        )?))
    }))
}

fn split(args: &mut Args, _: &ToolkitConfig) -> Built {
    let field = args.text()?;
    let subkeys = args.fields()?;

    Ok(on_tuple("split", move |tuple| {
        Ok(Value::from_sequence(reshape::split(tuple, &field, &subkeys)?))
    }))
}

fn fold(args: &mut Args, _: &ToolkitConfig) -> Built {
    let field = args.text()?;
    let subfield = args.text()?;

    Ok(on_tuple("fold", move |mut tuple| {
        reshape::fold_in_place(&mut tuple, &field, &subfield)?;
        Ok(Value::Tuple(tuple))
    }))
}

///
/// RECURSION
///

fn recursive(name: &'static str, guard: Guard, args: &mut Args, config: &ToolkitConfig) -> Built {
    let f = args.function()?;
    let recursion = Recursion::new(guard).with_max_depth(config.max_depth);

    Ok(Function::new(name, move |value| {
        recursion.apply(value, |node| f.call(node))
    }))
}

///
/// ARRAYS
///

fn map_array(args: &mut Args, _: &ToolkitConfig) -> Built {
    let f = args.function()?;

    Ok(on_list("map_array", move |items| {
        transform::map_array(items, &f).map(Value::List)
    }))
}

fn wrap(args: &mut Args, _: &ToolkitConfig) -> Built {
    let root = args.text()?;
    let fields = args.fields()?;

    Ok(on_sequence("wrap", move |sequence| {
        Ok(Value::from_sequence(transform::wrap(sequence, &root, &fields)))
    }))
}

fn extract_key(args: &mut Args, _: &ToolkitConfig) -> Built {
    let key = args.text()?;

    Ok(on_sequence("extract_key", move |sequence| {
        Ok(Value::List(transform::extract_key(&sequence, &key)))
    }))
}

fn insert_key(args: &mut Args, _: &ToolkitConfig) -> Built {
    let key = args.text()?;

    Ok(on_list("insert_key", move |items| {
        Ok(Value::from_sequence(transform::insert_key(items, &key)))
    }))
}

fn add_keys(args: &mut Args, _: &ToolkitConfig) -> Built {
    let keys = args.fields()?;

    Ok(on_sequence("add_keys", move |sequence| {
        Ok(Value::from_sequence(transform::add_keys(sequence, &keys)))
    }))
}

///
/// TUPLES
///

fn map_keys(args: &mut Args, _: &ToolkitConfig) -> Built {
    let f = args.function()?;

    Ok(on_tuple("map_keys", move |tuple| {
        transform::map_keys(tuple, &f).map(Value::Tuple)
    }))
}

fn map_values(args: &mut Args, _: &ToolkitConfig) -> Built {
    let f = args.function()?;

    Ok(on_tuple("map_values", move |tuple| {
        transform::map_values(tuple, &f).map(Value::Tuple)
    }))
}

fn map_value(args: &mut Args, _: &ToolkitConfig) -> Built {
    let key = args.text()?;
    let f = args.function()?;

    Ok(on_tuple("map_value", move |tuple| {
        transform::map_value(tuple, &key, &f).map(Value::Tuple)
    }))
}

fn rename_keys(args: &mut Args, _: &ToolkitConfig) -> Built {
    let mapping = args.key_pairs()?;

    Ok(on_tuple("rename_keys", move |mut tuple| {
        transform::rename_keys_in_place(&mut tuple, &mapping);
        Ok(Value::Tuple(tuple))
    }))
}

fn reject_keys(args: &mut Args, _: &ToolkitConfig) -> Built {
    let keys = args.fields()?;

    Ok(on_tuple("reject_keys", move |mut tuple| {
        transform::reject_keys_in_place(&mut tuple, &keys);
        Ok(Value::Tuple(tuple))
    }))
}

fn accept_keys(args: &mut Args, _: &ToolkitConfig) -> Built {
    let keys = args.fields()?;

    Ok(on_tuple("accept_keys", move |mut tuple| {
        transform::accept_keys_in_place(&mut tuple, &keys);
        Ok(Value::Tuple(tuple))
    }))
}
