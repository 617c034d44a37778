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

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt::{Debug, Display, Formatter};

use crate::{
    CodecResult, Error, error::Details, util::MapHelper, validator::validate_schema_name,
};

/// Represents the full name of a `record` or `enum` schema.
///
/// A full name is composed of two parts:
///   * an optional dotted namespace
///   * a name
///
/// Full names are unique within one parsed schema.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name {
    /// The full name
    namespace_and_name: String,
    /// Start byte of the name part
    ///
    /// If this is zero, then there is no namespace.
    index_of_name: usize,
}

/// Represents the namespace of a named schema
pub type Namespace = Option<String>;
/// Borrowed form of [`Namespace`]
pub type NamespaceRef<'a> = Option<&'a str>;

impl Name {
    /// Create a new `Name`, splitting off the namespace if `name` is dotted.
    pub fn new(name: impl Into<String>) -> CodecResult<Self> {
        let namespace_and_name = name.into();
        let index_of_name = validate_schema_name(&namespace_and_name)?;
        Ok(Self {
            namespace_and_name,
            index_of_name,
        })
    }

    /// Create a new `Name` using `enclosing_namespace` if `name` has no namespace of its own.
    pub fn new_with_enclosing_namespace(
        name: impl Into<String>,
        enclosing_namespace: NamespaceRef,
    ) -> CodecResult<Self> {
        let name = name.into();
        match enclosing_namespace {
            Some(namespace) if !namespace.is_empty() && !name.contains('.') => {
                Self::new(format!("{namespace}.{name}"))
            }
            _ => Self::new(name),
        }
    }

    /// Parse the `name` and `namespace` attributes of a JSON schema object.
    pub(crate) fn parse(
        complex: &Map<String, Value>,
        enclosing_namespace: NamespaceRef,
    ) -> CodecResult<Self> {
        let name_field = complex.name().ok_or(Details::GetNameField)?;
        let namespace = complex.string("namespace");
        Self::new_with_enclosing_namespace(
            name_field,
            namespace.as_deref().or(enclosing_namespace),
        )
    }

    pub fn name(&self) -> &str {
        &self.namespace_and_name[self.index_of_name..]
    }

    pub fn namespace(&self) -> NamespaceRef<'_> {
        if self.index_of_name == 0 {
            None
        } else {
            Some(&self.namespace_and_name[..(self.index_of_name - 1)])
        }
    }

    /// The namespace and the name joined by a dot, or just the name without a namespace.
    pub fn fullname(&self) -> &str {
        &self.namespace_and_name
    }
}

impl TryFrom<&str> for Name {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Name {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Debug for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("Name");
        debug.field("name", &self.name());
        if let Some(namespace) = self.namespace() {
            debug.field("namespace", &namespace);
        }
        debug.finish()
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.namespace_and_name)
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.fullname())
    }
}
