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

//! A strict, schema-driven binary codec for records, enums and nullable enums.
//!
//! A [`Schema`] describes the shape of the data: records of named fields, enums with a fixed
//! list of symbols, unions of `null` and an enum, and the primitives `null`, `boolean`, `int`,
//! `long` and `string`. A [`Value`](types::Value) is encoded against a schema into a compact
//! binary form and decoded back from it.
//!
//! Validation is never optional. Every value is checked against its schema while it is
//! encoded, and in particular every enum symbol is looked up in the schema it is written
//! with, whether the enum is a record field, the branch of a union or the whole value, and
//! whether the value was spelled out by hand or produced by a typed Rust enum implementing
//! [`EnumSymbols`](types::EnumSymbols). There are no implicit conversions between kinds.
//!
//! ```
//! use schema_codec::{Schema, decode, encode_to_vec, error::ErrorKind, types::Value};
//!
//! let schema = Schema::parse_str(r#"
//!     {
//!         "type": "record",
//!         "name": "UnionEnumField",
//!         "fields": [
//!             {"name": "f", "type": ["null", {"type": "enum", "name": "Enum", "symbols": ["A", "B"]}]}
//!         ]
//!     }
//! "#)?;
//!
//! let value = Value::Record(vec![("f".to_string(), Value::branch(Value::symbol("B")))]);
//! let bytes = encode_to_vec(&value, &schema)?;
//! assert_eq!(bytes, [1u8, 0, 0, 0, 1]);
//! assert_eq!(decode(&schema, &bytes)?, value);
//!
//! let foreign = Value::Record(vec![("f".to_string(), Value::branch(Value::symbol("Z")))]);
//! let err = encode_to_vec(&foreign, &schema).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnknownSymbol);
//! # Ok::<(), schema_codec::Error>(())
//! ```
//!
//! # Wire format
//!
//! | Schema    | Encoding                                              |
//! |-----------|-------------------------------------------------------|
//! | `null`    | nothing                                               |
//! | `boolean` | 1 byte, `0x00` or `0x01`                              |
//! | `int`     | 4 bytes, big-endian two's complement                  |
//! | `long`    | 8 bytes, big-endian two's complement                  |
//! | `string`  | 4-byte big-endian length, then the UTF-8 bytes        |
//! | `enum`    | 4-byte big-endian index of the symbol                 |
//! | `union`   | 1-byte branch index, then the branch's encoding       |
//! | `record`  | the field encodings in declaration order, no tags     |
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade and never installs a logger.
//! Rejected values are logged at `error` level, suspicious schemas at `warn` level.

mod decode;
mod encode;

pub mod error;
pub mod schema;
pub mod types;
pub mod util;
pub mod validator;

pub use decode::{decode, decode_from};
pub use encode::{encode, encode_to_vec};
pub use error::Error;
pub use schema::Schema;

/// A convenience type alias for `Result`s with `Error`s.
pub type CodecResult<T> = Result<T, Error>;

#[cfg(test)]
pub(crate) type TestResult = anyhow::Result<()>;
