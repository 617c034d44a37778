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

//! Errors returned by schema construction, encoding and decoding.
//!
//! Every failure is an [`Error`], which wraps a boxed [`Details`] describing exactly what went
//! wrong. Callers that only care about the broad category use [`Error::kind`].

use crate::{schema::SchemaKind, types::ValueKind};
use std::{error::Error as _, fmt};
use strum_macros::Display;

/// Errors encountered by the codec.
///
/// To inspect the details of the error use [`details`](Self::details) or
/// [`into_details`](Self::into_details) to get a [`Details`] which contains more precise
/// error information.
#[derive(thiserror::Error, Debug)]
#[repr(transparent)]
#[error(transparent)]
pub struct Error {
    details: Box<Details>,
}

impl Error {
    pub fn new(details: Details) -> Self {
        Self {
            details: Box::new(details),
        }
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    pub fn into_details(self) -> Details {
        *self.details
    }

    /// The category this error falls into.
    pub fn kind(&self) -> ErrorKind {
        self.details.kind()
    }
}

impl From<Details> for Error {
    fn from(details: Details) -> Self {
        Self::new(details)
    }
}

/// The broad category of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// A schema definition is malformed.
    InvalidSchema,
    /// The variant of a value does not match the variant of its schema.
    TypeMismatch,
    /// A record value lacks a field its schema declares.
    MissingField,
    /// An enum symbol is not part of the schema, or a decoded index is out of range.
    UnknownSymbol,
    /// A decoded union branch index has no corresponding branch.
    InvalidUnionTag,
    /// The input ended before a complete value was read.
    TruncatedInput,
    /// The input is complete but malformed.
    InvalidData,
    /// The underlying reader or writer failed.
    Io,
}

#[derive(thiserror::Error)]
pub enum Details {
    #[error("Invalid schema name {0}. It must match the regex '{1}'")]
    InvalidSchemaName(String, &'static str),

    #[error("Invalid enum symbol name {0}")]
    EnumSymbolName(String),

    #[error("Invalid field name {0}")]
    FieldName(String),

    #[error("Enum {0} must declare at least one symbol")]
    EnumSymbolsEmpty(String),

    #[error("Duplicate enum symbol {0}")]
    EnumSymbolDuplicate(String),

    #[error("Duplicate field name {0}")]
    FieldNameDuplicate(String),

    #[error("Unions must have at least one branch")]
    UnionEmpty,

    #[error("Unions may only contain null and enum branches, got: {0}")]
    UnionUnsupportedBranch(SchemaKind),

    #[error("Unions cannot contain duplicate {0} branches")]
    UnionDuplicate(SchemaKind),

    #[error("Two schemas with the same fullname were given: {0:?}")]
    NameCollision(String),

    #[error("Failed to parse schema from JSON")]
    ParseSchemaJson(#[source] serde_json::Error),

    #[error("Must be a JSON string, object or array")]
    ParseSchemaFromValidJson,

    #[error("Unknown type: {0}")]
    ParsePrimitive(String),

    #[error("Unknown complex type: {0}")]
    GetComplexType(serde_json::Value),

    #[error("No `type` in complex type")]
    GetComplexTypeField,

    #[error("No `name` field")]
    GetNameField,

    #[error("No `name` in record field")]
    GetNameFieldFromRecord,

    #[error("No `fields` in record")]
    GetRecordFieldsJson,

    #[error("Record field must be a JSON object, got: {0}")]
    GetRecordFieldJson(serde_json::Value),

    #[error("No `symbols` field in enum")]
    GetEnumSymbolsField,

    #[error("Unable to parse `symbols` in enum")]
    GetEnumSymbols,

    #[error("Value {value_kind} cannot be encoded as schema {expected}")]
    EncodeValueAsSchemaError {
        value_kind: ValueKind,
        expected: SchemaKind,
    },

    #[error("Union value of kind {value_kind} matches none of the branches {branches:?}")]
    FindUnionVariant {
        value_kind: ValueKind,
        branches: Vec<SchemaKind>,
    },

    #[error("Field {field} is not declared by record {record}")]
    UnknownRecordField { record: String, field: String },

    #[error("Field {field} is given more than once for record {record}")]
    DuplicateRecordValueField { record: String, field: String },

    #[error("Field {field} of record {record} has no value")]
    MissingField { record: String, field: String },

    #[error("Enum symbol {symbol} is not one of {symbols:?}")]
    GetEnumSymbol {
        symbol: String,
        symbols: Vec<String>,
    },

    #[error("Enum index {index} is out of bounds for {num_symbols} symbols")]
    GetEnumIndex { index: u32, num_symbols: usize },

    #[error("Union index {index} is out of bounds: {num_variants}")]
    GetUnionVariant { index: u8, num_variants: usize },

    #[error("Unexpected end of input while reading {0}")]
    Truncated(&'static str),

    #[error("String of {0} bytes does not fit a 4-byte length prefix")]
    StringTooLong(usize),

    #[error("Invalid u8 for bool: {0}")]
    BoolValue(u8),

    #[error("Invalid utf-8 string")]
    ConvertToUtf8(#[source] std::string::FromUtf8Error),

    #[error("Unable to allocate {desired} bytes (maximum allowed: {maximum})")]
    MemoryAllocation { desired: usize, maximum: usize },

    #[error("{0} bytes left over after decoding the value")]
    TrailingBytes(usize),

    #[error("Failed to read bytes: {0}")]
    ReadBytes(#[source] std::io::Error),

    #[error("Failed to write bytes: {0}")]
    WriteBytes(#[source] std::io::Error),
}

impl Details {
    /// The category this error falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Details::InvalidSchemaName(..)
            | Details::EnumSymbolName(_)
            | Details::FieldName(_)
            | Details::EnumSymbolsEmpty(_)
            | Details::EnumSymbolDuplicate(_)
            | Details::FieldNameDuplicate(_)
            | Details::UnionEmpty
            | Details::UnionUnsupportedBranch(_)
            | Details::UnionDuplicate(_)
            | Details::NameCollision(_)
            | Details::ParseSchemaJson(_)
            | Details::ParseSchemaFromValidJson
            | Details::ParsePrimitive(_)
            | Details::GetComplexType(_)
            | Details::GetComplexTypeField
            | Details::GetNameField
            | Details::GetNameFieldFromRecord
            | Details::GetRecordFieldsJson
            | Details::GetRecordFieldJson(_)
            | Details::GetEnumSymbolsField
            | Details::GetEnumSymbols => ErrorKind::InvalidSchema,
            Details::EncodeValueAsSchemaError { .. }
            | Details::FindUnionVariant { .. }
            | Details::UnknownRecordField { .. }
            | Details::DuplicateRecordValueField { .. } => ErrorKind::TypeMismatch,
            Details::MissingField { .. } => ErrorKind::MissingField,
            Details::GetEnumSymbol { .. } | Details::GetEnumIndex { .. } => {
                ErrorKind::UnknownSymbol
            }
            Details::GetUnionVariant { .. } => ErrorKind::InvalidUnionTag,
            Details::Truncated(_) => ErrorKind::TruncatedInput,
            Details::StringTooLong(_)
            | Details::BoolValue(_)
            | Details::ConvertToUtf8(_)
            | Details::MemoryAllocation { .. }
            | Details::TrailingBytes(_) => ErrorKind::InvalidData,
            Details::ReadBytes(_) | Details::WriteBytes(_) => ErrorKind::Io,
        }
    }
}

impl fmt::Debug for Details {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut msg = self.to_string();
        if let Some(e) = self.source() {
            msg.extend([": ", &e.to_string()]);
        }
        write!(f, "{msg}")
    }
}
