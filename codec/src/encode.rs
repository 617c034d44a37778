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

use crate::{
    CodecResult, Error,
    error::Details,
    schema::{EnumSchema, RecordSchema, Schema, SchemaKind, UnionSchema},
    types::{Value, ValueKind},
};
use log::error;
use std::{collections::HashMap, io::Write};

/// Encode a `Value` into its binary form and write it to `writer`.
///
/// The value is validated against the schema as it is encoded. Nothing reaches `writer`
/// unless the whole value is valid.
///
/// Returns the number of bytes written.
pub fn encode<W: Write>(value: &Value, schema: &Schema, writer: &mut W) -> CodecResult<usize> {
    let buffer = encode_to_vec(value, schema)?;
    writer.write_all(&buffer).map_err(Details::WriteBytes)?;
    Ok(buffer.len())
}

/// Encode a `Value` into a new byte vector.
pub fn encode_to_vec(value: &Value, schema: &Schema) -> CodecResult<Vec<u8>> {
    let mut buffer = Vec::new();
    encode_internal(value, schema, &mut buffer)?;
    Ok(buffer)
}

pub(crate) fn encode_int(i: i32, buffer: &mut Vec<u8>) {
    buffer.extend_from_slice(&i.to_be_bytes());
}

pub(crate) fn encode_long(i: i64, buffer: &mut Vec<u8>) {
    buffer.extend_from_slice(&i.to_be_bytes());
}

pub(crate) fn encode_string(s: &str, buffer: &mut Vec<u8>) -> CodecResult<()> {
    let len = u32::try_from(s.len()).map_err(|_| Details::StringTooLong(s.len()))?;
    buffer.extend_from_slice(&len.to_be_bytes());
    buffer.extend_from_slice(s.as_bytes());
    Ok(())
}

fn mismatch(value: &Value, schema: &Schema) -> Error {
    let value_kind = ValueKind::from(value);
    error!("invalid schema type for {value_kind}: {schema:?}");
    Details::EncodeValueAsSchemaError {
        value_kind,
        expected: SchemaKind::from(schema),
    }
    .into()
}

pub(crate) fn encode_internal(
    value: &Value,
    schema: &Schema,
    buffer: &mut Vec<u8>,
) -> CodecResult<()> {
    match (schema, value) {
        (Schema::Null, Value::Null) => {}
        (Schema::Boolean, Value::Boolean(b)) => buffer.push(u8::from(*b)),
        (Schema::Int, Value::Int(i)) => encode_int(*i, buffer),
        (Schema::Long, Value::Long(i)) => encode_long(*i, buffer),
        (Schema::String, Value::String(s)) => encode_string(s, buffer)?,
        (Schema::Enum(enum_schema), Value::Enum(symbol)) => {
            encode_enum(symbol, enum_schema, buffer)?
        }
        (Schema::Union(union), Value::Union(inner)) => encode_union(inner, union, buffer)?,
        (Schema::Record(record), Value::Record(fields)) => encode_record(fields, record, buffer)?,
        _ => return Err(mismatch(value, schema)),
    }
    Ok(())
}

/// Every enum value goes through here, whether it sits in a record field, a union branch or
/// at the top level.
fn encode_enum(symbol: &str, schema: &EnumSchema, buffer: &mut Vec<u8>) -> CodecResult<()> {
    match schema.index_of(symbol) {
        Some(index) => {
            buffer.extend_from_slice(&(index as u32).to_be_bytes());
            Ok(())
        }
        None => {
            error!("Invalid symbol {symbol:?} for enum {}.", schema.name());
            Err(Details::GetEnumSymbol {
                symbol: symbol.to_string(),
                symbols: schema.symbols().to_vec(),
            }
            .into())
        }
    }
}

fn encode_union(inner: &Value, schema: &UnionSchema, buffer: &mut Vec<u8>) -> CodecResult<()> {
    let Some((index, branch)) = schema.find_branch(SchemaKind::from(inner)) else {
        let value_kind = ValueKind::from(inner);
        error!("No branch of {schema:?} accepts a {value_kind} value");
        return Err(Details::FindUnionVariant {
            value_kind,
            branches: schema.variants().iter().map(SchemaKind::from).collect(),
        }
        .into());
    };
    // unions hold at most two branches
    buffer.push(index as u8);
    encode_internal(inner, branch, buffer)
}

fn encode_record(
    value_fields: &[(String, Value)],
    schema: &RecordSchema,
    buffer: &mut Vec<u8>,
) -> CodecResult<()> {
    let mut lookup: HashMap<&str, &Value> = HashMap::with_capacity(value_fields.len());
    for (name, value) in value_fields {
        if schema.field(name).is_none() {
            return Err(Details::UnknownRecordField {
                record: schema.name().to_string(),
                field: name.clone(),
            }
            .into());
        }
        if lookup.insert(name.as_str(), value).is_some() {
            return Err(Details::DuplicateRecordValueField {
                record: schema.name().to_string(),
                field: name.clone(),
            }
            .into());
        }
    }

    for field in schema.fields() {
        let value = lookup
            .get(field.name.as_str())
            .ok_or_else(|| Details::MissingField {
                record: schema.name().to_string(),
                field: field.name.clone(),
            })?;
        encode_internal(value, &field.schema, buffer)?;
    }
    Ok(())
}
