use jsonish_rs::{coerce, extract_typed, parse_value, TypeSchema, Value};

#[test]
fn float_with_zero_fraction_narrows_to_int() {
    assert_eq!(
        coerce(&Value::Float(4.0), &TypeSchema::Int).unwrap(),
        Value::Int(4)
    );
    let err = coerce(&Value::Float(4.5), &TypeSchema::Int).unwrap_err();
    assert_eq!(err.expected, "int");
    assert_eq!(err.actual, "float with decimal");
}

#[test]
fn yes_no_vocabulary_maps_to_bool() {
    assert_eq!(
        coerce(&Value::String("yes".into()), &TypeSchema::Bool).unwrap(),
        Value::Bool(true)
    );
    assert!(coerce(&Value::String("maybe".into()), &TypeSchema::Bool).is_err());
}

#[test]
fn optional_accepts_null_and_delegates_otherwise() {
    let schema = TypeSchema::Optional(Box::new(TypeSchema::Int));
    assert_eq!(coerce(&Value::Null, &schema).unwrap(), Value::Null);
    assert_eq!(coerce(&Value::Int(5), &schema).unwrap(), Value::Int(5));
}

#[test]
fn union_member_order_is_the_tie_break() {
    let schema = TypeSchema::Union(vec![TypeSchema::Int, TypeSchema::String]);
    assert_eq!(coerce(&Value::Int(3), &schema).unwrap(), Value::Int(3));
}

#[test]
fn nested_structures_coerce_recursively() {
    let schema = TypeSchema::Map(
        Box::new(TypeSchema::String),
        Box::new(TypeSchema::List(Box::new(TypeSchema::Float))),
    );
    let value = parse_value(r#"{"readings": [1, "2.5", 3.5]}"#).expect("decode");
    let coerced = coerce(&value, &schema).expect("coerce");
    assert_eq!(
        coerced.get("readings"),
        Some(&Value::Array(vec![
            Value::Float(1.0),
            Value::Float(2.5),
            Value::Float(3.5),
        ]))
    );
}

#[test]
fn dirty_model_output_coerces_end_to_end() {
    let raw = "Here's what I found:\n```json\n{\n  name: 'Widget', // product\n  price: \"19.99\",\n  in_stock: 'yes',\n  tags: ['a', 'b',],\n}\n```";
    let schema = TypeSchema::Map(
        Box::new(TypeSchema::String),
        Box::new(TypeSchema::Union(vec![
            TypeSchema::Float,
            TypeSchema::Bool,
            TypeSchema::List(Box::new(TypeSchema::String)),
            TypeSchema::String,
        ])),
    );
    let value = extract_typed(raw, true, &schema).expect("end-to-end");
    assert_eq!(value.get("name"), Some(&Value::String("Widget".into())));
    assert_eq!(value.get("price"), Some(&Value::Float(19.99)));
    assert_eq!(value.get("in_stock"), Some(&Value::Bool(true)));
    assert_eq!(
        value.get("tags"),
        Some(&Value::Array(vec![
            Value::String("a".into()),
            Value::String("b".into()),
        ]))
    );
}

#[test]
fn coercion_error_reports_failing_node_kinds() {
    let schema = TypeSchema::List(Box::new(TypeSchema::Bool));
    let value = parse_value(r#"[true, {"not": "a bool"}]"#).expect("decode");
    let err = coerce(&value, &schema).unwrap_err();
    assert_eq!(err.expected, "bool");
    assert_eq!(err.actual, "map");
}

#[test]
fn schema_renders_wire_level_json_schema() {
    let schema = TypeSchema::Map(
        Box::new(TypeSchema::String),
        Box::new(TypeSchema::Optional(Box::new(TypeSchema::Int))),
    );
    assert_eq!(
        schema.to_json_schema(),
        serde_json::json!({
            "type": "object",
            "additionalProperties": {
                "anyOf": [{"type": "integer"}, {"type": "null"}],
            },
        })
    );
}
