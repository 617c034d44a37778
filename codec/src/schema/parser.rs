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

use crate::error::Details;
use crate::schema::{
    EnumSchema, Name, NamespaceRef, RecordField, RecordSchema, Schema, UnionSchema,
};
use crate::util::MapHelper;
use crate::{CodecResult, Error};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Parses JSON schema descriptions, remembering the named types it has seen so that later
/// occurrences can refer to them by name.
#[derive(Default)]
pub(crate) struct Parser {
    parsed_schemas: HashMap<Name, Schema>,
}

impl Parser {
    /// Create a `Schema` from a string representing a JSON schema.
    pub(super) fn parse_str(&mut self, input: &str) -> CodecResult<Schema> {
        let value = serde_json::from_str(input).map_err(Details::ParseSchemaJson)?;
        self.parse(&value, None)
    }

    /// Create a `Schema` from a `serde_json::Value` representing a JSON schema.
    pub(super) fn parse(
        &mut self,
        value: &Value,
        enclosing_namespace: NamespaceRef,
    ) -> CodecResult<Schema> {
        match *value {
            Value::String(ref t) => self.parse_known_schema(t.as_str(), enclosing_namespace),
            Value::Object(ref data) => self.parse_complex(data, enclosing_namespace),
            Value::Array(ref data) => self.parse_union(data, enclosing_namespace),
            _ => Err(Details::ParseSchemaFromValidJson.into()),
        }
    }

    /// Parse a string as a primitive type or a reference to an already parsed named type.
    fn parse_known_schema(
        &mut self,
        name: &str,
        enclosing_namespace: NamespaceRef,
    ) -> CodecResult<Schema> {
        match name {
            "null" => Ok(Schema::Null),
            "boolean" => Ok(Schema::Boolean),
            "int" => Ok(Schema::Int),
            "long" => Ok(Schema::Long),
            "string" => Ok(Schema::String),
            _ => self.fetch_schema_ref(name, enclosing_namespace),
        }
    }

    /// Looks up a named type parsed earlier.
    ///
    /// A simple name is first qualified with the enclosing namespace, then tried as is. The
    /// referenced schema is copied in place; schemas never refer back to themselves.
    fn fetch_schema_ref(
        &mut self,
        name: &str,
        enclosing_namespace: NamespaceRef,
    ) -> CodecResult<Schema> {
        let fully_qualified_name = Name::new_with_enclosing_namespace(name, enclosing_namespace)
            .map_err(|_| Details::ParsePrimitive(name.to_string()))?;
        if let Some(schema) = self.parsed_schemas.get(&fully_qualified_name) {
            return Ok(schema.clone());
        }
        if let Ok(bare_name) = Name::new(name)
            && let Some(schema) = self.parsed_schemas.get(&bare_name)
        {
            return Ok(schema.clone());
        }
        Err(Details::ParsePrimitive(fully_qualified_name.to_string()).into())
    }

    /// Parse a `serde_json::Value` representing a complex type into a `Schema`.
    ///
    /// Nested definitions such as `{"type": {"type": "string"}}` are supported.
    fn parse_complex(
        &mut self,
        complex: &Map<String, Value>,
        enclosing_namespace: NamespaceRef,
    ) -> CodecResult<Schema> {
        match complex.get("type") {
            Some(Value::String(t)) => match t.as_str() {
                "record" => self.parse_record(complex, enclosing_namespace),
                "enum" => self.parse_enum(complex, enclosing_namespace),
                other => {
                    // `{"type": "Name", "namespace": ""}` refers to a type outside of any namespace
                    let namespace = complex.string("namespace");
                    self.parse_known_schema(other, namespace.as_deref().or(enclosing_namespace))
                }
            },
            Some(Value::Object(data)) => self.parse_complex(data, enclosing_namespace),
            Some(Value::Array(variants)) => self.parse_union(variants, enclosing_namespace),
            Some(unknown) => Err(Details::GetComplexType(unknown.clone()).into()),
            None => Err(Details::GetComplexTypeField.into()),
        }
    }

    fn register_parsed_schema(&mut self, name: &Name, schema: &Schema) -> CodecResult<()> {
        if self.parsed_schemas.contains_key(name) {
            return Err(Details::NameCollision(name.to_string()).into());
        }
        debug!("Parsed named schema {name}");
        self.parsed_schemas.insert(name.clone(), schema.clone());
        Ok(())
    }

    fn parse_record(
        &mut self,
        complex: &Map<String, Value>,
        enclosing_namespace: NamespaceRef,
    ) -> CodecResult<Schema> {
        let fully_qualified_name = Name::parse(complex, enclosing_namespace)?;

        let fields = complex
            .get("fields")
            .and_then(|fields| fields.as_array())
            .ok_or(Details::GetRecordFieldsJson)?
            .iter()
            .map(|field| match field {
                Value::Object(field) => {
                    self.parse_record_field(field, fully_qualified_name.namespace())
                }
                other => Err(Details::GetRecordFieldJson(other.clone()).into()),
            })
            .collect::<CodecResult<Vec<_>>>()?;

        let schema = Schema::Record(RecordSchema::new(
            fully_qualified_name.clone(),
            fields,
            complex.doc(),
        )?);
        self.register_parsed_schema(&fully_qualified_name, &schema)?;
        Ok(schema)
    }

    fn parse_record_field(
        &mut self,
        field: &Map<String, Value>,
        record_namespace: NamespaceRef,
    ) -> CodecResult<RecordField> {
        let name = field.name().ok_or(Details::GetNameFieldFromRecord)?;
        let ty = field.get("type").ok_or(Details::GetComplexTypeField)?;
        let schema = self.parse(ty, record_namespace)?;
        Ok(RecordField::builder()
            .name(name)
            .doc(field.doc())
            .schema(schema)
            .build())
    }

    fn parse_enum(
        &mut self,
        complex: &Map<String, Value>,
        enclosing_namespace: NamespaceRef,
    ) -> CodecResult<Schema> {
        let fully_qualified_name = Name::parse(complex, enclosing_namespace)?;

        let symbols: Vec<String> = complex
            .get("symbols")
            .and_then(|v| v.as_array())
            .ok_or_else(|| Error::from(Details::GetEnumSymbolsField))
            .and_then(|symbols| {
                symbols
                    .iter()
                    .map(|symbol| symbol.as_str().map(|s| s.to_string()))
                    .collect::<Option<_>>()
                    .ok_or_else(|| Error::from(Details::GetEnumSymbols))
            })?;

        let schema = Schema::Enum(EnumSchema::new(
            fully_qualified_name.clone(),
            symbols,
            complex.doc(),
        )?);
        self.register_parsed_schema(&fully_qualified_name, &schema)?;
        Ok(schema)
    }

    fn parse_union(
        &mut self,
        items: &[Value],
        enclosing_namespace: NamespaceRef,
    ) -> CodecResult<Schema> {
        let schemas = items
            .iter()
            .map(|v| self.parse(v, enclosing_namespace))
            .collect::<CodecResult<Vec<_>>>()?;
        if schemas.len() == 1 {
            warn!("Union declared in JSON with a single branch: {items:?}");
        }
        Ok(Schema::Union(UnionSchema::new(schemas)?))
    }
}
