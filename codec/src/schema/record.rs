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

use crate::CodecResult;
use crate::error::Details;
use crate::schema::{Documentation, Name, Schema};
use crate::validator::validate_record_field_name;
use std::collections::{BTreeMap, HashMap};

/// Represents a `field` in a `record` schema.
#[derive(bon::Builder, Clone, Debug, PartialEq)]
pub struct RecordField {
    /// Name of the field.
    #[builder(into)]
    pub name: String,
    /// Documentation of the field.
    #[builder(default)]
    pub doc: Documentation,
    /// Schema of the field.
    pub schema: Schema,
    /// Position of the field in the list of `fields` of its parent record.
    ///
    /// Assigned when the record is constructed.
    #[builder(default)]
    pub position: usize,
}

impl RecordField {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        RecordField::builder().name(name).schema(schema).build()
    }
}

/// A description of a Record schema.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordSchema {
    pub(crate) name: Name,
    pub(crate) doc: Documentation,
    pub(crate) fields: Vec<RecordField>,
    /// Maps field names to their position in `fields`.
    pub(crate) lookup: BTreeMap<String, usize>,
}

impl RecordSchema {
    /// Creates a record from its fields, in declaration order.
    ///
    /// # Errors
    /// Will return an error if a field name is invalid or declared twice.
    pub fn new(name: Name, fields: Vec<RecordField>, doc: Documentation) -> CodecResult<Self> {
        let mut lookup = BTreeMap::new();
        let mut fields = fields;
        for (position, field) in fields.iter_mut().enumerate() {
            validate_record_field_name(&field.name)?;
            if lookup.insert(field.name.clone(), position).is_some() {
                return Err(Details::FieldNameDuplicate(field.name.clone()).into());
            }
            field.position = position;
        }

        let mut named = HashMap::new();
        for field in &fields {
            collect_named_schemas(&field.schema, &mut named)?;
        }
        if named.contains_key(&name) {
            return Err(Details::NameCollision(name.to_string()).into());
        }

        Ok(RecordSchema {
            name,
            doc,
            fields,
            lookup,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// The fields in declaration order.
    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&RecordField> {
        self.lookup.get(name).map(|&position| &self.fields[position])
    }
}

/// Walks the named schemas nested in `schema`. A full name may be used by several identical
/// definitions, but not by two different ones.
fn collect_named_schemas<'a>(
    schema: &'a Schema,
    named: &mut HashMap<&'a Name, &'a Schema>,
) -> CodecResult<()> {
    match schema {
        Schema::Enum(_) | Schema::Record(_) => {
            let Some(name) = schema.name() else {
                return Ok(());
            };
            match named.get(name) {
                Some(&existing) if existing != schema => {
                    return Err(Details::NameCollision(name.to_string()).into());
                }
                Some(_) => return Ok(()),
                None => {
                    named.insert(name, schema);
                }
            }
            if let Schema::Record(record) = schema {
                for field in record.fields() {
                    collect_named_schemas(&field.schema, named)?;
                }
            }
            Ok(())
        }
        Schema::Union(union) => union
            .variants()
            .iter()
            .try_for_each(|branch| collect_named_schemas(branch, named)),
        _ => Ok(()),
    }
}
