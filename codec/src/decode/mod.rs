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
    schema::{EnumSchema, RecordSchema, Schema, UnionSchema},
    types::Value,
    util::safe_len,
};
use std::io::{ErrorKind as IoErrorKind, Read};

/// Decode a `Value` from `bytes`, which must hold exactly one encoded value.
///
/// Leftover bytes after the value are an error.
pub fn decode(schema: &Schema, bytes: &[u8]) -> CodecResult<Value> {
    let mut reader = bytes;
    let value = decode_internal(schema, &mut reader)?;
    if !reader.is_empty() {
        return Err(Details::TrailingBytes(reader.len()).into());
    }
    Ok(value)
}

/// Decode one `Value` from `reader`, leaving whatever follows it unread.
pub fn decode_from<R: Read>(schema: &Schema, reader: &mut R) -> CodecResult<Value> {
    decode_internal(schema, reader)
}

fn read_error(error: std::io::Error, what: &'static str) -> Error {
    if error.kind() == IoErrorKind::UnexpectedEof {
        Details::Truncated(what).into()
    } else {
        Details::ReadBytes(error).into()
    }
}

fn read_array<const N: usize, R: Read>(reader: &mut R, what: &'static str) -> CodecResult<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|e| read_error(e, what))?;
    Ok(buf)
}

pub(crate) fn decode_int<R: Read>(reader: &mut R) -> CodecResult<i32> {
    read_array(reader, "int").map(i32::from_be_bytes)
}

pub(crate) fn decode_long<R: Read>(reader: &mut R) -> CodecResult<i64> {
    read_array(reader, "long").map(i64::from_be_bytes)
}

pub(crate) fn decode_string<R: Read>(reader: &mut R) -> CodecResult<String> {
    let len = u32::from_be_bytes(read_array(reader, "string length")?) as usize;
    let len = safe_len(len)?;
    // read what is actually there instead of trusting the length prefix with an allocation
    let mut bytes = Vec::new();
    reader
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut bytes)
        .map_err(|e| read_error(e, "string"))?;
    if bytes.len() < len {
        return Err(Details::Truncated("string").into());
    }
    String::from_utf8(bytes).map_err(|e| Details::ConvertToUtf8(e).into())
}

fn decode_internal<R: Read>(schema: &Schema, reader: &mut R) -> CodecResult<Value> {
    match schema {
        Schema::Null => Ok(Value::Null),
        Schema::Boolean => match read_array::<1, _>(reader, "boolean")? {
            [0] => Ok(Value::Boolean(false)),
            [1] => Ok(Value::Boolean(true)),
            [byte] => Err(Details::BoolValue(byte).into()),
        },
        Schema::Int => decode_int(reader).map(Value::Int),
        Schema::Long => decode_long(reader).map(Value::Long),
        Schema::String => decode_string(reader).map(Value::String),
        Schema::Enum(enum_schema) => decode_enum(enum_schema, reader),
        Schema::Union(union) => decode_union(union, reader),
        Schema::Record(record) => decode_record(record, reader),
    }
}

fn decode_enum<R: Read>(schema: &EnumSchema, reader: &mut R) -> CodecResult<Value> {
    let index = u32::from_be_bytes(read_array(reader, "enum index")?);
    let symbol = schema
        .symbols()
        .get(index as usize)
        .ok_or(Details::GetEnumIndex {
            index,
            num_symbols: schema.symbols().len(),
        })?;
    Ok(Value::Enum(symbol.clone()))
}

fn decode_union<R: Read>(schema: &UnionSchema, reader: &mut R) -> CodecResult<Value> {
    let [index] = read_array::<1, _>(reader, "union index")?;
    let variants = schema.variants();
    let branch = variants
        .get(usize::from(index))
        .ok_or(Details::GetUnionVariant {
            index,
            num_variants: variants.len(),
        })?;
    let inner = decode_internal(branch, reader)?;
    Ok(Value::Union(Box::new(inner)))
}

fn decode_record<R: Read>(schema: &RecordSchema, reader: &mut R) -> CodecResult<Value> {
    let mut collected = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let value = decode_internal(&field.schema, reader)?;
        collected.push((field.name.clone(), value));
    }
    Ok(Value::Record(collected))
}
