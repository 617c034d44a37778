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
use crate::schema::{Schema, SchemaKind};
use log::warn;

/// A description of a Union schema.
///
/// The branches are restricted to `null` and a single `enum`, which keeps the choice of branch
/// for any value unambiguous.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionSchema {
    /// The schemas that make up this union
    pub(crate) schemas: Vec<Schema>,
}

impl UnionSchema {
    /// Creates a new UnionSchema from a vector of schemas.
    ///
    /// # Errors
    /// Will return an error if `schemas` is empty, contains a branch other than `null` or an
    /// `enum`, or contains either of those twice.
    pub fn new(schemas: Vec<Schema>) -> CodecResult<Self> {
        if schemas.is_empty() {
            return Err(Details::UnionEmpty.into());
        }
        let mut seen = Vec::with_capacity(schemas.len());
        for schema in &schemas {
            let kind = SchemaKind::from(schema);
            if !matches!(kind, SchemaKind::Null | SchemaKind::Enum) {
                return Err(Details::UnionUnsupportedBranch(kind).into());
            }
            if seen.contains(&kind) {
                return Err(Details::UnionDuplicate(kind).into());
            }
            seen.push(kind);
        }
        if schemas.len() == 1 {
            warn!("Union schema with just one branch! Consider dropping the union!");
        }
        Ok(UnionSchema { schemas })
    }

    /// Returns a slice to all variants of this schema.
    pub fn variants(&self) -> &[Schema] {
        &self.schemas
    }

    /// Returns true if any of the variants of this `UnionSchema` is `Null`.
    pub fn is_nullable(&self) -> bool {
        self.schemas.iter().any(|x| matches!(x, Schema::Null))
    }

    /// Returns the branch matching `kind` and its position within this union.
    pub fn find_branch(&self, kind: SchemaKind) -> Option<(usize, &Schema)> {
        self.schemas
            .iter()
            .enumerate()
            .find(|(_, schema)| SchemaKind::from(*schema) == kind)
    }
}
