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

//! A record field typed as an enum, or as a nullable enum, must be validated the same way
//! whether the enum value is spelled out by hand or produced by a typed Rust enum, and whether
//! or not the enum sits inside a union.

use hex_literal::hex;
use pretty_assertions::assert_eq;
use schema_codec::{
    CodecResult, Schema, decode, encode_to_vec,
    error::ErrorKind,
    types::{EnumSymbols, Record, Value},
};

type TestResult = anyhow::Result<()>;

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
        {"name": "f", "type": ["null", {"type": "enum", "name": "Enum", "symbols": ["A", "B"]}]}
    ]
}
"#;

/// A typed enum declared for a schema other than the ones the records use.
#[derive(Debug, PartialEq)]
enum Grade {
    A,
    B,
    Z,
}

impl EnumSymbols for Grade {
    const NAME: &'static str = "school.Grade";
    const SYMBOLS: &'static [&'static str] = &["A", "B", "Z"];

    fn symbol(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::Z => "Z",
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "Z" => Some(Grade::Z),
            _ => None,
        }
    }
}

fn simple_record(schema: &Schema, f: Value) -> CodecResult<Value> {
    let mut record = Record::new(schema).expect("a record schema");
    record.put("f", f)?;
    Ok(record.into())
}

#[test]
fn proper_simple_field_works() -> TestResult {
    let schema = Schema::parse_str(SIMPLE_ENUM_FIELD)?;
    let value = simple_record(&schema, Value::symbol("B"))?;

    let bytes = encode_to_vec(&value, &schema)?;
    assert_eq!(bytes, hex!("00000001"));
    assert_eq!(decode(&schema, &bytes)?, value);
    Ok(())
}

#[test]
fn typed_enum_in_simple_field_encodes_like_generic_symbol() -> TestResult {
    let schema = Schema::parse_str(SIMPLE_ENUM_FIELD)?;
    let typed = simple_record(&schema, Value::from_enum(&Grade::B))?;
    let generic = simple_record(&schema, Value::symbol("B"))?;

    assert_eq!(encode_to_vec(&typed, &schema)?, encode_to_vec(&generic, &schema)?);
    Ok(())
}

#[test]
fn foreign_symbol_in_simple_field_is_rejected() -> TestResult {
    let schema = Schema::parse_str(SIMPLE_ENUM_FIELD)?;
    let value = simple_record(&schema, Value::from_enum(&Grade::Z))?;

    let err = encode_to_vec(&value, &schema).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownSymbol);
    Ok(())
}

#[test]
fn proper_union_field_works() -> TestResult {
    let schema = Schema::parse_str(UNION_ENUM_FIELD)?;
    let value = simple_record(&schema, Value::branch(Value::symbol("B")))?;

    let bytes = encode_to_vec(&value, &schema)?;
    assert_eq!(bytes, hex!("01 00000001"));
    assert_eq!(decode(&schema, &bytes)?, value);
    Ok(())
}

#[test]
fn typed_enum_in_union_field_encodes_like_generic_symbol() -> TestResult {
    let schema = Schema::parse_str(UNION_ENUM_FIELD)?;
    let typed = simple_record(&schema, Value::branch(Value::from_enum(&Grade::B)))?;
    let generic = simple_record(&schema, Value::branch(Value::symbol("B")))?;

    assert_eq!(encode_to_vec(&typed, &schema)?, encode_to_vec(&generic, &schema)?);
    Ok(())
}

#[test]
fn foreign_symbol_in_union_field_is_rejected_like_in_simple_field() -> TestResult {
    let simple = Schema::parse_str(SIMPLE_ENUM_FIELD)?;
    let union = Schema::parse_str(UNION_ENUM_FIELD)?;

    let simple_err = encode_to_vec(
        &simple_record(&simple, Value::from_enum(&Grade::Z))?,
        &simple,
    )
    .unwrap_err();
    let union_err = encode_to_vec(
        &simple_record(&union, Value::branch(Value::from_enum(&Grade::Z)))?,
        &union,
    )
    .unwrap_err();

    assert_eq!(simple_err.kind(), ErrorKind::UnknownSymbol);
    assert_eq!(union_err.kind(), simple_err.kind());
    assert_eq!(union_err.to_string(), simple_err.to_string());
    Ok(())
}

#[test]
fn bare_enum_in_union_field_is_not_wrapped_implicitly() -> TestResult {
    let schema = Schema::parse_str(UNION_ENUM_FIELD)?;
    let value = simple_record(&schema, Value::from_enum(&Grade::B))?;

    let err = encode_to_vec(&value, &schema).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    Ok(())
}

#[test]
fn null_union_field() -> TestResult {
    let schema = Schema::parse_str(UNION_ENUM_FIELD)?;
    let value = simple_record(&schema, Value::null_branch())?;

    let bytes = encode_to_vec(&value, &schema)?;
    assert_eq!(bytes, hex!("00"));
    assert_eq!(decode(&schema, &bytes)?, value);
    Ok(())
}

#[test]
fn decoded_symbols_convert_back_to_typed_enums() -> TestResult {
    let schema = Schema::parse_str(UNION_ENUM_FIELD)?;
    let Value::Record(mut fields) = decode(&schema, &hex!("01 00000000"))? else {
        panic!("Expected a record value");
    };
    let (name, f) = fields.remove(0);
    assert_eq!(name, "f");
    assert_eq!(f.into_enum::<Grade>()?, Grade::A);
    Ok(())
}

#[test]
fn typed_enum_schema_is_checked_like_any_other() -> TestResult {
    let schema = Grade::schema()?;
    assert_eq!(encode_to_vec(&Value::from_enum(&Grade::Z), &schema)?, hex!("00000002"));
    Ok(())
}
