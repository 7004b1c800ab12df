use serde::{Deserialize, Serialize};

/// Recursive type descriptor used as the coercion target.
///
/// `Union` member order is significant: it defines the try-order during
/// coercion, not a commutative set. `Reference` is a pass-through at this
/// layer — resolution against the named type happens in an outer
/// collaborator, so the coercer never inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeSchema {
    String,
    Int,
    Float,
    Bool,
    Null,
    LiteralString(String),
    LiteralInt(i64),
    LiteralBool(bool),
    List(Box<TypeSchema>),
    Map(Box<TypeSchema>, Box<TypeSchema>),
    Optional(Box<TypeSchema>),
    Union(Vec<TypeSchema>),
    Reference(String),
}

impl TypeSchema {
    /// Short label for this schema kind, used in coercion diagnostics.
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match self {
            TypeSchema::String => "string",
            TypeSchema::Int => "int",
            TypeSchema::Float => "float",
            TypeSchema::Bool => "bool",
            TypeSchema::Null => "null",
            TypeSchema::LiteralString(_) => "literal string",
            TypeSchema::LiteralInt(_) => "literal int",
            TypeSchema::LiteralBool(_) => "literal bool",
            TypeSchema::List(_) => "list",
            TypeSchema::Map(_, _) => "map",
            TypeSchema::Optional(_) => "optional",
            TypeSchema::Union(_) => "union",
            TypeSchema::Reference(_) => "reference",
        }
    }

    /// Render a wire-level JSON-Schema-like description of this type.
    ///
    /// Optionals and unions map to `anyOf`, literals to `const`, references
    /// to a `$ref` under `#/definitions/`. Map key schemas are not
    /// representable in JSON Schema (object keys are always strings) and are
    /// omitted.
    #[must_use]
    pub fn to_json_schema(&self) -> serde_json::Value {
        match self {
            TypeSchema::String => serde_json::json!({"type": "string"}),
            TypeSchema::Int => serde_json::json!({"type": "integer"}),
            TypeSchema::Float => serde_json::json!({"type": "number"}),
            TypeSchema::Bool => serde_json::json!({"type": "boolean"}),
            TypeSchema::Null => serde_json::json!({"type": "null"}),
            TypeSchema::LiteralString(text) => serde_json::json!({"const": text}),
            TypeSchema::LiteralInt(int) => serde_json::json!({"const": int}),
            TypeSchema::LiteralBool(flag) => serde_json::json!({"const": flag}),
            TypeSchema::List(element) => serde_json::json!({
                "type": "array",
                "items": element.to_json_schema(),
            }),
            TypeSchema::Map(_, value) => serde_json::json!({
                "type": "object",
                "additionalProperties": value.to_json_schema(),
            }),
            TypeSchema::Optional(inner) => serde_json::json!({
                "anyOf": [inner.to_json_schema(), {"type": "null"}],
            }),
            TypeSchema::Union(members) => serde_json::json!({
                "anyOf": members
                    .iter()
                    .map(TypeSchema::to_json_schema)
                    .collect::<Vec<_>>(),
            }),
            TypeSchema::Reference(name) => serde_json::json!({
                "$ref": format!("#/definitions/{name}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_schemas_render_type_keyword() {
        assert_eq!(
            TypeSchema::Int.to_json_schema(),
            serde_json::json!({"type": "integer"})
        );
        assert_eq!(
            TypeSchema::Null.to_json_schema(),
            serde_json::json!({"type": "null"})
        );
    }

    #[test]
    fn optional_renders_any_of_with_null() {
        let schema = TypeSchema::Optional(Box::new(TypeSchema::String));
        assert_eq!(
            schema.to_json_schema(),
            serde_json::json!({"anyOf": [{"type": "string"}, {"type": "null"}]})
        );
    }

    #[test]
    fn list_and_map_render_composite_keywords() {
        let list = TypeSchema::List(Box::new(TypeSchema::Int));
        assert_eq!(
            list.to_json_schema(),
            serde_json::json!({"type": "array", "items": {"type": "integer"}})
        );

        let map = TypeSchema::Map(Box::new(TypeSchema::String), Box::new(TypeSchema::Bool));
        assert_eq!(
            map.to_json_schema(),
            serde_json::json!({"type": "object", "additionalProperties": {"type": "boolean"}})
        );
    }

    #[test]
    fn union_preserves_member_order() {
        let schema = TypeSchema::Union(vec![TypeSchema::String, TypeSchema::Int]);
        assert_eq!(
            schema.to_json_schema(),
            serde_json::json!({"anyOf": [{"type": "string"}, {"type": "integer"}]})
        );
    }

    #[test]
    fn reference_renders_ref_pointer() {
        let schema = TypeSchema::Reference("Person".to_string());
        assert_eq!(
            schema.to_json_schema(),
            serde_json::json!({"$ref": "#/definitions/Person"})
        );
    }
}
