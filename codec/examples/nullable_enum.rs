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

use schema_codec::{
    Schema, decode, encode_to_vec,
    types::{Record, Value},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let schema = Schema::parse_str(
        r#"
        {
            "type": "record",
            "name": "Shipment",
            "namespace": "demo",
            "fields": [
                {"name": "id", "type": "long"},
                {"name": "carrier", "type": ["null", {"type": "enum", "name": "Carrier", "symbols": ["POST", "COURIER"]}]}
            ]
        }
        "#,
    )?;

    for carrier in [Value::null_branch(), Value::branch(Value::symbol("COURIER"))] {
        let mut record = Record::new(&schema).ok_or("Shipment is a record")?;
        record.put("id", 42i64)?;
        record.put("carrier", carrier)?;
        let value = Value::from(record);

        let bytes = encode_to_vec(&value, &schema)?;
        println!("{bytes:02x?}");
        assert_eq!(decode(&schema, &bytes)?, value);
    }

    let mut record = Record::new(&schema).ok_or("Shipment is a record")?;
    record.put("id", 43i64)?;
    record.put("carrier", Value::branch(Value::symbol("PIGEON")))?;
    match encode_to_vec(&record.into(), &schema) {
        Ok(_) => unreachable!("PIGEON is not a Carrier"),
        Err(e) => println!("{} error: {e}", e.kind()),
    }

    Ok(())
}
