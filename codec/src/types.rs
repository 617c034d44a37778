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

//! Logic handling the intermediate representation of values.

use crate::{
    CodecResult,
    error::Details,
    schema::{RecordSchema, Schema, SchemaKind},
};
use strum_macros::{Display, EnumDiscriminants};

/// Represents any valid value.
///
/// There is exactly one representation per kind of data: an enum symbol produced by a typed
/// Rust enum (see [`EnumSymbols`]) is the very same `Value::Enum` as one spelled out by hand.
#[derive(Clone, Debug, EnumDiscriminants)]
#[strum_discriminants(name(ValueKind), derive(Hash, Display))]
pub enum Value {
    /// A `null` value.
    Null,
    /// A `boolean` value.
    Boolean(bool),
    /// A 32-bit signed integer.
    Int(i32),
    /// A 64-bit signed integer.
    Long(i64),
    /// A `string` value.
    String(String),
    /// An `enum` value, identified by its symbol.
    ///
    /// Whether the symbol belongs to the schema is checked when encoding.
    Enum(String),
    /// A `union` value. The inner value selects the branch: `Value::Null` selects the `null`
    /// branch, anything else the branch of the same kind.
    Union(Box<Value>),
    /// A `record` value: `(field name, value)` pairs.
    ///
    /// Encoding follows the schema's field order, so the order here does not matter, neither
    /// for encoding nor for equality.
    Record(Vec<(String, Value)>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::String(a), Value::String(b)) | (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Union(a), Value::Union(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => same_fields(a, b) && same_fields(b, a),
            _ => false,
        }
    }
}

/// Whether every field of `fields` is present in `others` with an equal value.
fn same_fields(fields: &[(String, Value)], others: &[(String, Value)]) -> bool {
    fields.len() == others.len()
        && fields.iter().all(|(name, value)| {
            others
                .iter()
                .any(|(other_name, other_value)| name == other_name && value == other_value)
        })
}

impl From<&Value> for SchemaKind {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Boolean(_) => Self::Boolean,
            Value::Int(_) => Self::Int,
            Value::Long(_) => Self::Long,
            Value::String(_) => Self::String,
            Value::Enum(_) => Self::Enum,
            Value::Union(_) => Self::Union,
            Value::Record(_) => Self::Record,
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl Value {
    /// An enum value holding `symbol`.
    pub fn symbol(symbol: impl Into<String>) -> Self {
        Self::Enum(symbol.into())
    }

    /// The `null` branch of a union.
    pub fn null_branch() -> Self {
        Self::Union(Box::new(Value::Null))
    }

    /// A union value selecting the branch matching `value`.
    pub fn branch(value: impl Into<Value>) -> Self {
        Self::Union(Box::new(value.into()))
    }

    /// An enum value holding the symbol of a typed enum.
    pub fn from_enum<E: EnumSymbols>(value: &E) -> Self {
        Self::Enum(value.symbol().to_owned())
    }

    /// Converts an enum value back into a typed enum.
    ///
    /// Unions are looked through, so the enum branch of a nullable union converts as well.
    pub fn into_enum<E: EnumSymbols>(self) -> CodecResult<E> {
        match self {
            Value::Enum(symbol) => E::from_symbol(&symbol).ok_or_else(|| {
                Details::GetEnumSymbol {
                    symbol,
                    symbols: E::SYMBOLS.iter().map(|s| s.to_string()).collect(),
                }
                .into()
            }),
            Value::Union(inner) => (*inner).into_enum(),
            other => Err(Details::EncodeValueAsSchemaError {
                value_kind: ValueKind::from(&other),
                expected: SchemaKind::Enum,
            }
            .into()),
        }
    }
}

/// A Rust enum with a fixed set of symbols.
///
/// This is the typed way of producing enum values. The schema declared here is only a
/// convenience: a typed value is encoded against whatever schema it is given, and its symbol
/// is checked against that schema like any other enum value.
///
/// ```
/// # use schema_codec::{Schema, types::{EnumSymbols, Value}};
/// enum Suit {
///     Spades,
///     Hearts,
/// }
///
/// impl EnumSymbols for Suit {
///     const NAME: &'static str = "Suit";
///     const SYMBOLS: &'static [&'static str] = &["Spades", "Hearts"];
///
///     fn symbol(&self) -> &'static str {
///         match self {
///             Suit::Spades => "Spades",
///             Suit::Hearts => "Hearts",
///         }
///     }
///
///     fn from_symbol(symbol: &str) -> Option<Self> {
///         match symbol {
///             "Spades" => Some(Suit::Spades),
///             "Hearts" => Some(Suit::Hearts),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Value::from_enum(&Suit::Hearts), Value::symbol("Hearts"));
/// assert_eq!(Suit::schema()?, Schema::define_enum("Suit", ["Spades", "Hearts"])?);
/// # Ok::<(), schema_codec::Error>(())
/// ```
pub trait EnumSymbols: Sized {
    /// The full name of the enum schema.
    const NAME: &'static str;
    /// The symbols, in index order.
    const SYMBOLS: &'static [&'static str];

    fn symbol(&self) -> &'static str;

    fn from_symbol(symbol: &str) -> Option<Self>;

    /// The enum schema this type declares.
    fn schema() -> CodecResult<Schema> {
        Schema::define_enum(Self::NAME, Self::SYMBOLS.iter().copied())
    }
}

/// Utility for building record values against a record schema.
///
/// Fields are set by name; names the schema doesn't declare are rejected right away. Fields
/// that are never set are left out of the produced value, so encoding it reports the missing
/// field instead of writing a placeholder.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    schema: &'a RecordSchema,
    fields: Vec<Option<Value>>,
}

impl<'a> Record<'a> {
    /// Create a `Record` given a `Schema`.
    ///
    /// If the `Schema` is not a `Schema::Record` variant, `None` will be returned.
    pub fn new(schema: &'a Schema) -> Option<Record<'a>> {
        match schema {
            Schema::Record(record) => Some(Record {
                schema: record,
                fields: vec![None; record.fields().len()],
            }),
            _ => None,
        }
    }

    /// Put a compatible value (implementing the `Into<Value>` trait) in the
    /// `Record` for a given `field` name.
    ///
    /// **NOTE** Only the field name is checked here. The value is checked against the field's
    /// schema when the record is encoded.
    pub fn put<V>(&mut self, field: &str, value: V) -> CodecResult<()>
    where
        V: Into<Value>,
    {
        match self.schema.lookup.get(field) {
            Some(&position) => {
                self.fields[position] = Some(value.into());
                Ok(())
            }
            None => Err(Details::UnknownRecordField {
                record: self.schema.name().to_string(),
                field: field.to_string(),
            }
            .into()),
        }
    }

    /// Get the value for a given field name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.schema
            .lookup
            .get(field)
            .and_then(|&position| self.fields[position].as_ref())
    }
}

impl From<Record<'_>> for Value {
    fn from(value: Record<'_>) -> Self {
        Self::Record(
            value
                .schema
                .fields()
                .iter()
                .zip(value.fields)
                .filter_map(|(field, value)| value.map(|value| (field.name.clone(), value)))
                .collect(),
        )
    }
}
