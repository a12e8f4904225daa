//! JSON-deserializable field tree description.
//!
//! These types describe the *shape* of a record. They are intended to be
//! loaded from JSON (for example a layout file per card operator) and then
//! converted into a [Field] tree, or straight into a [Schema] with
//! [Schema::from_json].

use serde::{Deserialize, Serialize};

use crate::{
    bits::BitOrder,
    errors::CompileError,
    field::{Field, IntKind, PresenceOrder, StringEncoding},
    schema::Schema,
};

/// Top-level layout: the root node plus decode options.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SchemaDef {
    pub root: FieldDef,
    #[serde(default)]
    pub bit_order: BitOrder,
    #[serde(default)]
    pub bit_offset: usize,
}

/// Description of one node of a field tree.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type")]
pub enum FieldDef {
    /// Integer leaf. For semantic kinds `name` is the base name and `bits`
    /// defaults to the usual width of the kind.
    Integer {
        name: String,
        #[serde(default)]
        bits: Option<usize>,
        #[serde(default)]
        kind: IntKind,
        #[serde(default)]
        signed: bool,
    },
    Hex {
        name: String,
        bits: usize,
    },
    Text {
        name: String,
        bits: usize,
        #[serde(default)]
        encoding: StringEncoding,
    },
    Container {
        children: Vec<FieldDef>,
    },
    Bitmap {
        /// Field decoded between the presence bits and the children.
        #[serde(default)]
        infix: Option<Box<FieldDef>>,
        #[serde(default)]
        order: PresenceOrder,
        children: Vec<FieldDef>,
    },
    Repeat {
        count: usize,
        child: Box<FieldDef>,
    },
}

impl TryFrom<FieldDef> for Field {
    type Error = CompileError;

    fn try_from(value: FieldDef) -> Result<Self, Self::Error> {
        let field = match value {
            FieldDef::Integer {
                name,
                bits,
                kind,
                signed,
            } => {
                let bits = bits.or(kind.default_bits()).ok_or_else(|| {
                    CompileError::InvalidDefinition(format!("integer `{name}` has no width"))
                })?;

                Field::Integer {
                    name: kind.key(&name),
                    bits,
                    kind,
                    signed,
                }
            }
            FieldDef::Hex { name, bits } => Field::hex(name, bits),
            FieldDef::Text {
                name,
                bits,
                encoding,
            } => Field::Text {
                name,
                bits,
                encoding,
            },
            FieldDef::Container { children } => Field::Container(convert_all(children)?),
            FieldDef::Bitmap {
                infix,
                order,
                children,
            } => Field::Bitmap {
                infix: infix
                    .map(|infix| Field::try_from(*infix).map(Box::new))
                    .transpose()?,
                order,
                children: convert_all(children)?,
            },
            FieldDef::Repeat { count, child } => Field::repeat(count, Field::try_from(*child)?),
        };

        Ok(field)
    }
}

fn convert_all(defs: Vec<FieldDef>) -> Result<Vec<Field>, CompileError> {
    defs.into_iter().map(Field::try_from).collect()
}

impl TryFrom<SchemaDef> for Schema {
    type Error = CompileError;

    fn try_from(value: SchemaDef) -> Result<Self, Self::Error> {
        let root = Field::try_from(value.root)?;

        Ok(Schema::compile(root)?
            .with_bit_order(value.bit_order)
            .with_bit_offset(value.bit_offset))
    }
}

impl Schema {
    /// Parses a [SchemaDef] from JSON and compiles it.
    pub fn from_json(json: &str) -> Result<Self, CompileError> {
        let def: SchemaDef = serde_json::from_str(json)
            .map_err(|err| CompileError::InvalidDefinition(err.to_string()))?;

        Schema::try_from(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_bitmap() {
        let schema = Schema::from_json(
            r#"{
                "root": {
                    "type": "Bitmap",
                    "children": [
                        { "type": "Integer", "name": "A", "bits": 2 },
                        { "type": "Integer", "name": "B", "bits": 5 }
                    ]
                }
            }"#,
        )
        .unwrap();

        let parsed = schema.decode(&[0xB4]).unwrap();
        assert_eq!(parsed.get_int("A"), Some(3));
        assert!(!parsed.contains("B"));
    }

    #[test]
    fn test_semantic_kind_uses_default_width() {
        let def: FieldDef = serde_json::from_str(
            r#"{ "type": "Integer", "name": "Event", "kind": "Date" }"#,
        )
        .unwrap();

        assert_eq!(Field::try_from(def), Ok(Field::date("Event")));
    }

    #[test]
    fn test_plain_integer_needs_width() {
        let def: FieldDef =
            serde_json::from_str(r#"{ "type": "Integer", "name": "A" }"#).unwrap();

        assert!(matches!(
            Field::try_from(def),
            Err(CompileError::InvalidDefinition(_))
        ));
    }

    #[test]
    fn test_options_and_nesting() {
        let schema = Schema::from_json(
            r#"{
                "bit_offset": 4,
                "root": {
                    "type": "Repeat",
                    "count": 2,
                    "child": {
                        "type": "Bitmap",
                        "order": "LsbFirst",
                        "infix": { "type": "Hex", "name": "Tag", "bits": 4 },
                        "children": [
                            { "type": "Text", "name": "Label", "bits": 8 }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(schema.options().bit_offset, 4);
        assert_eq!(schema.full_width_bits(), 26);
    }

    #[test]
    fn test_invalid_json_and_invalid_tree() {
        assert!(matches!(
            Schema::from_json("{"),
            Err(CompileError::InvalidDefinition(_))
        ));
        assert_eq!(
            Schema::from_json(
                r#"{ "root": { "type": "Repeat", "count": 0, "child": { "type": "Hex", "name": "X", "bits": 8 } } }"#
            ),
            Err(CompileError::InvalidRepeatCount)
        );
    }

    #[test]
    fn test_parsed_serializes_to_flat_object() {
        let schema = Schema::compile(Field::container([
            Field::int("A", 4),
            Field::hex("Key", 12),
        ]))
        .unwrap();
        let parsed = schema.decode(&[0x5A, 0xBC]).unwrap();

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json, serde_json::json!({ "A": 5, "Key": "abc" }));
    }
}
