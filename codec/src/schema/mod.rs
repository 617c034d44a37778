// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Logic for defining, parsing and inspecting schemas.
//!
//! Schemas are built programmatically with [`Schema::define_enum`], [`Schema::define_record`]
//! and [`Schema::define_union`] (or their builder forms), or parsed from their JSON
//! description with [`Schema::parse_str`]. Either way every constraint is checked at
//! construction and the result is immutable.

mod builders;
mod name;
mod parser;
mod record;
mod union;

pub use crate::schema::{
    name::{Name, Namespace, NamespaceRef},
    record::{RecordField, RecordFieldBuilder, RecordSchema},
    union::UnionSchema,
};
use crate::{
    CodecResult,
    error::Details,
    schema::parser::Parser,
    validator::validate_enum_symbol_name,
};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;
use strum_macros::{Display, EnumDiscriminants};

/// Represents documentation for named schemas and record fields.
pub type Documentation = Option<String>;

/// Represents any valid schema.
#[derive(Clone, Debug, PartialEq, EnumDiscriminants, Display)]
#[strum_discriminants(name(SchemaKind), derive(Hash, Ord, PartialOrd, Display))]
pub enum Schema {
    /// A `null` schema, encoded as zero bytes.
    Null,
    /// A `boolean` schema, encoded as a single byte.
    Boolean,
    /// A 32-bit signed integer schema.
    Int,
    /// A 64-bit signed integer schema.
    Long,
    /// A `string` schema.
    ///
    /// `String` represents a unicode character sequence.
    String,
    /// An `enum` schema.
    Enum(EnumSchema),
    /// A `union` schema.
    Union(UnionSchema),
    /// A `record` schema.
    Record(RecordSchema),
}

impl SchemaKind {
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            SchemaKind::Null
                | SchemaKind::Boolean
                | SchemaKind::Int
                | SchemaKind::Long
                | SchemaKind::String
        )
    }

    pub fn is_named(self) -> bool {
        matches!(self, SchemaKind::Record | SchemaKind::Enum)
    }
}

/// A description of an Enum schema.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumSchema {
    pub(crate) name: Name,
    pub(crate) doc: Documentation,
    pub(crate) symbols: Vec<String>,
}

impl EnumSchema {
    /// Creates an enum from its symbols, in index order.
    ///
    /// # Errors
    /// Will return an error if there are no symbols, a symbol is not a valid identifier or a
    /// symbol is given twice.
    pub fn new(name: Name, symbols: Vec<String>, doc: Documentation) -> CodecResult<Self> {
        if symbols.is_empty() {
            return Err(Details::EnumSymbolsEmpty(name.to_string()).into());
        }
        let mut existing_symbols: HashSet<&str> = HashSet::with_capacity(symbols.len());
        for symbol in symbols.iter() {
            validate_enum_symbol_name(symbol)?;
            if !existing_symbols.insert(symbol.as_str()) {
                return Err(Details::EnumSymbolDuplicate(symbol.clone()).into());
            }
        }
        Ok(EnumSchema { name, doc, symbols })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// The position of `symbol` in the symbol list, matched exactly.
    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|item| item == symbol)
    }
}

impl Schema {
    /// Defines an enum schema named `name` with the given symbols.
    ///
    /// ```
    /// # use schema_codec::Schema;
    /// let schema = Schema::define_enum("Enum", ["A", "B", "C"])?;
    /// # Ok::<(), schema_codec::Error>(())
    /// ```
    pub fn define_enum<S: Into<String>>(
        name: impl Into<String>,
        symbols: impl IntoIterator<Item = S>,
    ) -> CodecResult<Self> {
        let symbols = symbols.into_iter().map(Into::into).collect();
        Ok(Schema::Enum(EnumSchema::new(Name::new(name)?, symbols, None)?))
    }

    /// Defines a record schema named `name` with the given `(field name, schema)` pairs.
    pub fn define_record<S: Into<String>>(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (S, Schema)>,
    ) -> CodecResult<Self> {
        let fields = fields
            .into_iter()
            .map(|(name, schema)| RecordField::new(name, schema))
            .collect();
        Ok(Schema::Record(RecordSchema::new(Name::new(name)?, fields, None)?))
    }

    /// Defines a union schema over `branches`, in index order.
    pub fn define_union(branches: impl IntoIterator<Item = Schema>) -> CodecResult<Self> {
        Ok(Schema::Union(UnionSchema::new(branches.into_iter().collect())?))
    }

    /// Create a `Schema` from a string representing a JSON schema.
    pub fn parse_str(input: &str) -> CodecResult<Schema> {
        Parser::default().parse_str(input)
    }

    /// Create a `Schema` from an already parsed JSON value.
    pub fn parse(value: &JsonValue) -> CodecResult<Schema> {
        Parser::default().parse(value, None)
    }

    /// Create a list of `Schema`s from JSON strings.
    ///
    /// Each schema may refer by name to the named types defined by the schemas before it.
    pub fn parse_list(inputs: impl IntoIterator<Item = impl AsRef<str>>) -> CodecResult<Vec<Schema>> {
        let mut parser = Parser::default();
        inputs
            .into_iter()
            .map(|input| parser.parse_str(input.as_ref()))
            .collect()
    }

    /// The name of a `record` or `enum` schema.
    pub fn name(&self) -> Option<&Name> {
        match self {
            Schema::Enum(EnumSchema { name, .. }) | Schema::Record(RecordSchema { name, .. }) => {
                Some(name)
            }
            _ => None,
        }
    }

    pub fn is_named(&self) -> bool {
        SchemaKind::from(self).is_named()
    }

    /// Converts this schema to its JSON description.
    ///
    /// Each named type is written out in full once; later uses refer to it by its full name.
    pub fn to_json(&self) -> JsonValue {
        self.to_json_internal(None, &mut HashSet::new())
    }

    fn to_json_internal<'a>(
        &'a self,
        enclosing_namespace: NamespaceRef,
        written: &mut HashSet<&'a Name>,
    ) -> JsonValue {
        fn named_header(
            kind: &str,
            name: &Name,
            doc: &Documentation,
            enclosing_namespace: NamespaceRef,
        ) -> Map<String, JsonValue> {
            let mut map = Map::new();
            map.insert("type".into(), kind.into());
            map.insert("name".into(), name.fullname().into());
            if name.namespace().is_none() && enclosing_namespace.is_some() {
                // keep the name from inheriting the enclosing namespace when parsed again
                map.insert("namespace".into(), "".into());
            }
            if let Some(doc) = doc {
                map.insert("doc".into(), doc.as_str().into());
            }
            map
        }

        fn reference(name: &Name, enclosing_namespace: NamespaceRef) -> JsonValue {
            match enclosing_namespace {
                // a bare name would be qualified with the enclosing namespace when parsed again
                Some(namespace) if !namespace.is_empty() && name.namespace().is_none() => {
                    let mut map = Map::new();
                    map.insert("type".into(), name.fullname().into());
                    map.insert("namespace".into(), "".into());
                    map.into()
                }
                _ => name.fullname().into(),
            }
        }

        match self {
            Schema::Null => "null".into(),
            Schema::Boolean => "boolean".into(),
            Schema::Int => "int".into(),
            Schema::Long => "long".into(),
            Schema::String => "string".into(),
            Schema::Enum(EnumSchema { name, doc, symbols }) => {
                if !written.insert(name) {
                    return reference(name, enclosing_namespace);
                }
                let mut map = named_header("enum", name, doc, enclosing_namespace);
                map.insert("symbols".into(), symbols.clone().into());
                map.into()
            }
            Schema::Union(union) => union
                .variants()
                .iter()
                .map(|branch| branch.to_json_internal(enclosing_namespace, written))
                .collect::<Vec<_>>()
                .into(),
            Schema::Record(RecordSchema {
                name, doc, fields, ..
            }) => {
                if !written.insert(name) {
                    return reference(name, enclosing_namespace);
                }
                let mut map = named_header("record", name, doc, enclosing_namespace);
                let fields = fields
                    .iter()
                    .map(|field| {
                        let mut json = Map::new();
                        json.insert("name".into(), field.name.as_str().into());
                        if let Some(doc) = &field.doc {
                            json.insert("doc".into(), doc.as_str().into());
                        }
                        json.insert(
                            "type".into(),
                            field.schema.to_json_internal(name.namespace(), written),
                        );
                        JsonValue::Object(json)
                    })
                    .collect::<Vec<_>>();
                map.insert("fields".into(), fields.into());
                map.into()
            }
        }
    }
}

impl Serialize for Schema {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TestResult, error::ErrorKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SIMPLE_ENUM_FIELD: &str = r#"
        {
            "type": "record",
            "name": "SimpleEnumField",
            "namespace": "net.radai.simple",
            "fields": [
                {"name": "f", "type": {"type": "enum", "name": "Enum", "symbols": ["A", "B"]}}
            ]
        }
    "#;

    const UNION_ENUM_FIELD: &str = r#"
        {
            "type": "record",
            "name": "UnionEnumField",
            "namespace": "net.radai.union",
            "fields": [
                {
                    "name": "f",
                    "type": ["null", {"type": "enum", "name": "Enum", "symbols": ["A", "B"]}]
                }
            ]
        }
    "#;

    #[test]
    fn define_enum_keeps_symbol_order() -> TestResult {
        let schema = Schema::define_enum("Enum", ["A", "B", "C"])?;
        let Schema::Enum(enum_schema) = &schema else {
            panic!("Expected an enum schema, got {schema:?}");
        };
        assert_eq!(enum_schema.symbols(), ["A", "B", "C"]);
        assert_eq!(enum_schema.index_of("C"), Some(2));
        assert_eq!(enum_schema.index_of("c"), None);
        assert_eq!(enum_schema.name().fullname(), "Enum");
        Ok(())
    }

    #[test]
    fn define_enum_rejects_empty_symbols() {
        let err = Schema::define_enum("Enum", Vec::<String>::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);
        assert_eq!(err.to_string(), "Enum Enum must declare at least one symbol");
    }

    #[test]
    fn define_enum_rejects_duplicate_symbols() {
        let err = Schema::define_enum("Enum", ["A", "B", "A"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);
        assert_eq!(err.to_string(), "Duplicate enum symbol A");
    }

    #[test]
    fn define_enum_rejects_invalid_names() {
        let err = Schema::define_enum("my-enum", ["A"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);
        let err = Schema::define_enum("Enum", ["A B"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);
    }

    #[test]
    fn define_record_rejects_duplicate_fields() {
        let err =
            Schema::define_record("R", [("f", Schema::Int), ("f", Schema::Int)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);
    }

    #[test]
    fn define_union_rejects_two_enums() -> TestResult {
        let err = Schema::define_union([
            Schema::define_enum("First", ["A"])?,
            Schema::define_enum("Second", ["B"])?,
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);
        Ok(())
    }

    #[test]
    fn define_union_rejects_empty_branches() {
        let err = Schema::define_union(Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSchema);
    }

    #[test]
    fn parsed_schema_equals_defined_schema() -> TestResult {
        let parsed = Schema::parse_str(r#"{"type": "enum", "name": "Enum", "symbols": ["A", "B"]}"#)?;
        assert_eq!(parsed, Schema::define_enum("Enum", ["A", "B"])?);
        Ok(())
    }

    #[test]
    fn parse_nested_enum_inherits_record_namespace() -> TestResult {
        let schema = Schema::parse_str(SIMPLE_ENUM_FIELD)?;
        let Schema::Record(record) = &schema else {
            panic!("Expected a record schema, got {schema:?}");
        };
        assert_eq!(record.name().fullname(), "net.radai.simple.SimpleEnumField");
        let field = record.field("f").expect("field f is declared");
        assert_eq!(
            field.schema.name().map(Name::fullname),
            Some("net.radai.simple.Enum")
        );
        Ok(())
    }

    #[test]
    fn parse_union_field() -> TestResult {
        let schema = Schema::parse_str(UNION_ENUM_FIELD)?;
        let Schema::Record(record) = &schema else {
            panic!("Expected a record schema, got {schema:?}");
        };
        let Schema::Union(union) = &record.fields()[0].schema else {
            panic!("Expected a union field");
        };
        assert!(union.is_nullable());
        assert_eq!(SchemaKind::from(&union.variants()[1]), SchemaKind::Enum);
        Ok(())
    }

    #[test]
    fn json_round_trip_of_nested_schema() -> TestResult {
        for input in [SIMPLE_ENUM_FIELD, UNION_ENUM_FIELD] {
            let schema = Schema::parse_str(input)?;
            let json = serde_json::to_string(&schema)?;
            assert_eq!(Schema::parse_str(&json)?, schema);
        }
        Ok(())
    }

    #[test]
    fn json_writes_repeated_named_types_by_reference() -> TestResult {
        let letters = Schema::define_enum("Letters", ["A", "B"])?;
        let schema = Schema::define_record(
            "Pair",
            [
                ("first", letters.clone()),
                ("second", Schema::define_union([Schema::Null, letters])?),
            ],
        )?;
        let expected = json!({
            "type": "record",
            "name": "Pair",
            "fields": [
                {"name": "first", "type": {"type": "enum", "name": "Letters", "symbols": ["A", "B"]}},
                {"name": "second", "type": ["null", "Letters"]}
            ]
        });
        assert_eq!(schema.to_json(), expected);
        assert_eq!(Schema::parse(&expected)?, schema);
        Ok(())
    }

    #[test]
    fn json_keeps_namespace_free_types_out_of_the_enclosing_namespace() -> TestResult {
        let inner = Schema::define_enum("Letters", ["A"])?;
        let schema = Schema::define_record("outer.Holder", [("f", inner)])?;
        assert_eq!(Schema::parse(&schema.to_json())?, schema);
        Ok(())
    }

    #[test]
    fn json_refers_to_namespace_free_types_unambiguously() -> TestResult {
        let namespaced = Schema::define_enum("outer.Letters", ["A"])?;
        let bare = Schema::define_enum("Letters", ["B"])?;
        let schema = Schema::define_record(
            "outer.Holder",
            [
                ("a", namespaced),
                ("b", bare.clone()),
                ("c", Schema::define_union([Schema::Null, bare])?),
            ],
        )?;

        let json = schema.to_json();
        assert_eq!(
            json["fields"][2]["type"],
            json!(["null", {"type": "Letters", "namespace": ""}])
        );
        assert_eq!(Schema::parse(&json)?, schema);
        Ok(())
    }

    #[test]
    fn json_refers_to_namespaced_types_by_full_name() -> TestResult {
        let letters = Schema::define_enum("outer.Letters", ["A"])?;
        let schema = Schema::define_record(
            "Holder",
            [
                ("a", letters.clone()),
                ("b", Schema::define_union([Schema::Null, letters])?),
            ],
        )?;

        let json = schema.to_json();
        assert_eq!(json["fields"][1]["type"], json!(["null", "outer.Letters"]));
        assert_eq!(Schema::parse(&json)?, schema);
        Ok(())
    }

    #[test]
    fn schema_kind_classification() {
        assert!(SchemaKind::Int.is_primitive());
        assert!(!SchemaKind::Union.is_primitive());
        assert!(SchemaKind::Enum.is_named());
        assert!(!Schema::String.is_named());
        assert_eq!(Schema::Long.to_string(), "Long");
    }
}
