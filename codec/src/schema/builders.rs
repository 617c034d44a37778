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

use crate::schema::{EnumSchema, Name, RecordField, RecordSchema};
use crate::{CodecResult, Schema};
use bon::bon;

#[bon]
impl Schema {
    /// Returns a `Schema::Enum` with the given name, symbols and optional doc.
    ///
    /// Runs the same checks as [`Schema::define_enum`].
    #[builder(finish_fn = build)]
    pub fn r#enum(
        #[builder(start_fn)] name: Name,
        #[builder(start_fn)] symbols: Vec<impl Into<String>>,
        doc: Option<String>,
    ) -> CodecResult<Self> {
        let symbols = symbols.into_iter().map(Into::into).collect();
        EnumSchema::new(name, symbols, doc).map(Schema::Enum)
    }

    /// Returns a `Schema::Record` with the given name, fields and optional doc.
    ///
    /// Runs the same checks as [`Schema::define_record`].
    #[builder(finish_fn = build)]
    pub fn record(
        #[builder(start_fn)] name: Name,
        #[builder(default)] fields: Vec<RecordField>,
        doc: Option<String>,
    ) -> CodecResult<Self> {
        RecordSchema::new(name, fields, doc).map(Schema::Record)
    }
}
