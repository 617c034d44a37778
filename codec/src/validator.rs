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

//! # Name validation
//!
//! Schema full names, enum symbols and record field names must be identifiers: a letter or
//! underscore followed by letters, digits or underscores. Full names may carry a dotted
//! namespace in front of the name.
//!
//! Each of these checks can be replaced, once per process, by a custom validator. This is
//! useful when the schemas come from a system with looser naming rules.
//!
//! ```
//! # use schema_codec::validator::{EnumSymbolNameValidator, set_enum_symbol_name_validator};
//! # use regex_lite::Regex;
//! # use std::sync::OnceLock;
//! struct AllowDashes;
//!
//! impl EnumSymbolNameValidator for AllowDashes {
//!     fn regex(&self) -> &'static Regex {
//!         static SYMBOL_ONCE: OnceLock<Regex> = OnceLock::new();
//!         SYMBOL_ONCE.get_or_init(|| {
//!             Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("Regex is valid")
//!         })
//!     }
//! }
//!
//! // register before defining any schema
//! if set_enum_symbol_name_validator(Box::new(AllowDashes)).is_err() {
//!     panic!("There was already an enum symbol validator configured")
//! }
//! ```
//!
//! **Note**: a validator can be set only once per process. Defining a schema before setting a
//! validator registers the default one for the rest of the process lifetime.

use crate::{CodecResult, error::Details};
use log::debug;
use regex_lite::Regex;
use std::sync::OnceLock;

/// The default validator, accepting plain identifiers.
struct IdentifierValidator;

fn identifier_regex() -> &'static Regex {
    static IDENTIFIER_ONCE: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER_ONCE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Regex is valid"))
}

/// A trait that validates the full names of record and enum schemas.
///
/// To register a custom one use [`set_schema_name_validator`].
pub trait SchemaNameValidator: Send + Sync {
    /// The regex used to validate the full name.
    ///
    /// When the name part of the full name is provided as a capture group named `name`, the
    /// default implementation of [`Self::validate`] can be used.
    fn regex(&self) -> &'static Regex {
        static SCHEMA_NAME_ONCE: OnceLock<Regex> = OnceLock::new();
        SCHEMA_NAME_ONCE.get_or_init(|| {
            Regex::new(
                // An optional dotted namespace followed by a name without any dots in it.
                r"^((?P<namespace>[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*)\.)?(?P<name>[A-Za-z_][A-Za-z0-9_]*)$",
            )
            .expect("Regex is valid")
        })
    }

    /// Validates the full name and returns the start byte of the name part.
    ///
    /// Should return [`Details::InvalidSchemaName`] if it is invalid.
    fn validate(&self, schema_name: &str) -> CodecResult<usize> {
        let regex = SchemaNameValidator::regex(self);
        let caps = regex
            .captures(schema_name)
            .ok_or_else(|| Details::InvalidSchemaName(schema_name.to_string(), regex.as_str()))?;
        caps.name("name")
            .map(|name| name.start())
            .ok_or_else(|| Details::InvalidSchemaName(schema_name.to_string(), regex.as_str()).into())
    }
}

impl SchemaNameValidator for IdentifierValidator {}

static NAME_VALIDATOR_ONCE: OnceLock<Box<dyn SchemaNameValidator>> = OnceLock::new();

/// Sets a custom schema name validator.
///
/// Returns `Err(validator)` if a validator is already configured.
pub fn set_schema_name_validator(
    validator: Box<dyn SchemaNameValidator>,
) -> Result<(), Box<dyn SchemaNameValidator>> {
    debug!("Setting a custom schema name validator.");
    NAME_VALIDATOR_ONCE.set(validator)
}

pub(crate) fn validate_schema_name(schema_name: &str) -> CodecResult<usize> {
    NAME_VALIDATOR_ONCE
        .get_or_init(|| {
            debug!("Going to use the default name validator.");
            Box::new(IdentifierValidator)
        })
        .validate(schema_name)
}

/// A trait that validates enum symbols.
///
/// To register a custom one use [`set_enum_symbol_name_validator`].
pub trait EnumSymbolNameValidator: Send + Sync {
    fn regex(&self) -> &'static Regex {
        identifier_regex()
    }

    /// Should return [`Details::EnumSymbolName`] if the symbol is invalid.
    fn validate(&self, symbol: &str) -> CodecResult<()> {
        if !EnumSymbolNameValidator::regex(self).is_match(symbol) {
            return Err(Details::EnumSymbolName(symbol.to_string()).into());
        }
        Ok(())
    }
}

impl EnumSymbolNameValidator for IdentifierValidator {}

static ENUM_SYMBOL_NAME_VALIDATOR_ONCE: OnceLock<Box<dyn EnumSymbolNameValidator>> =
    OnceLock::new();

/// Sets a custom enum symbol validator.
///
/// Returns `Err(validator)` if a validator is already configured.
pub fn set_enum_symbol_name_validator(
    validator: Box<dyn EnumSymbolNameValidator>,
) -> Result<(), Box<dyn EnumSymbolNameValidator>> {
    debug!("Setting a custom enum symbol validator.");
    ENUM_SYMBOL_NAME_VALIDATOR_ONCE.set(validator)
}

pub(crate) fn validate_enum_symbol_name(symbol: &str) -> CodecResult<()> {
    ENUM_SYMBOL_NAME_VALIDATOR_ONCE
        .get_or_init(|| {
            debug!("Going to use the default enum symbol validator.");
            Box::new(IdentifierValidator)
        })
        .validate(symbol)
}

/// A trait that validates record field names.
///
/// To register a custom one use [`set_record_field_name_validator`].
pub trait RecordFieldNameValidator: Send + Sync {
    fn regex(&self) -> &'static Regex {
        identifier_regex()
    }

    /// Should return [`Details::FieldName`] if the field name is invalid.
    fn validate(&self, field_name: &str) -> CodecResult<()> {
        if !RecordFieldNameValidator::regex(self).is_match(field_name) {
            return Err(Details::FieldName(field_name.to_string()).into());
        }
        Ok(())
    }
}

impl RecordFieldNameValidator for IdentifierValidator {}

static RECORD_FIELD_NAME_VALIDATOR_ONCE: OnceLock<Box<dyn RecordFieldNameValidator>> =
    OnceLock::new();

/// Sets a custom record field name validator.
///
/// Returns `Err(validator)` if a validator is already configured.
pub fn set_record_field_name_validator(
    validator: Box<dyn RecordFieldNameValidator>,
) -> Result<(), Box<dyn RecordFieldNameValidator>> {
    debug!("Setting a custom record field name validator.");
    RECORD_FIELD_NAME_VALIDATOR_ONCE.set(validator)
}

pub(crate) fn validate_record_field_name(field_name: &str) -> CodecResult<()> {
    RECORD_FIELD_NAME_VALIDATOR_ONCE
        .get_or_init(|| {
            debug!("Going to use the default record field name validator.");
            Box::new(IdentifierValidator)
        })
        .validate(field_name)
}
