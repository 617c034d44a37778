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

use criterion::{Criterion, criterion_group, criterion_main};
use schema_codec::{
    CodecResult, Schema, decode_from, encode,
    types::{Record, Value},
};
use std::{hint::black_box, time::Duration};

const RAW_SMALL_SCHEMA: &str = r#"
{
  "namespace": "test",
  "type": "record",
  "name": "Test",
  "fields": [
    {
      "type": {"type": "enum", "name": "Kind", "symbols": ["A", "B", "C"]},
      "name": "kind"
    }
  ]
}
"#;

const RAW_BIG_SCHEMA: &str = r#"
{
  "namespace": "my.example",
  "type": "record",
  "name": "userInfo",
  "fields": [
    {"name": "username", "type": "string"},
    {"name": "age", "type": "int"},
    {"name": "phone", "type": "string"},
    {"name": "housenum", "type": "string"},
    {"name": "created", "type": "long"},
    {"name": "active", "type": "boolean"},
    {
      "name": "status",
      "type": {"type": "enum", "name": "Status", "symbols": ["ACTIVE", "SUSPENDED", "CLOSED"]}
    },
    {"name": "previous_status", "type": ["null", "Status"]},
    {
      "name": "address",
      "type": {
        "type": "record",
        "name": "mailing_address",
        "fields": [
          {"name": "street", "type": "string"},
          {"name": "city", "type": "string"},
          {"name": "state_prov", "type": "string"},
          {"name": "country", "type": "string"},
          {"name": "zip", "type": "string"}
        ]
      }
    }
  ]
}
"#;

fn make_small_record() -> CodecResult<(Schema, Value)> {
    let schema = Schema::parse_str(RAW_SMALL_SCHEMA)?;
    let value = Value::Record(vec![("kind".to_string(), Value::symbol("B"))]);
    Ok((schema, value))
}

fn make_big_record() -> CodecResult<(Schema, Value)> {
    let schema = Schema::parse_str(RAW_BIG_SCHEMA)?;
    let Schema::Record(user_info) = &schema else {
        unreachable!("userInfo is a record");
    };
    let address_schema = &user_info
        .field("address")
        .expect("address is declared")
        .schema;

    let mut address = Record::new(address_schema).expect("address is a record");
    address.put("street", "23 Elm St")?;
    address.put("city", "Springfield")?;
    address.put("state_prov", "Oregon")?;
    address.put("country", "USA")?;
    address.put("zip", "97477")?;
    let address = Value::from(address);

    let mut big_record = Record::new(&schema).expect("userInfo is a record");
    big_record.put("username", "username")?;
    big_record.put("age", 10i32)?;
    big_record.put("phone", "000000000")?;
    big_record.put("housenum", "0000")?;
    big_record.put("created", 1_700_000_000_000i64)?;
    big_record.put("active", true)?;
    big_record.put("status", Value::symbol("SUSPENDED"))?;
    big_record.put("previous_status", Value::branch(Value::symbol("ACTIVE")))?;
    big_record.put("address", address)?;
    let value = big_record.into();

    Ok((schema, value))
}

fn write(schema: &Schema, records: &[Value]) -> CodecResult<Vec<u8>> {
    let mut bytes = Vec::new();
    for record in records {
        encode(record, schema, &mut bytes)?;
    }
    Ok(bytes)
}

fn read(schema: &Schema, bytes: &[u8], count: usize) -> CodecResult<()> {
    let mut reader = bytes;
    for _ in 0..count {
        black_box(decode_from(schema, &mut reader)?);
    }
    Ok(())
}

fn bench_write(
    c: &mut Criterion,
    make_record: fn() -> CodecResult<(Schema, Value)>,
    n_records: usize,
    name: &str,
) -> CodecResult<()> {
    let (schema, record) = make_record()?;
    let records = vec![record; n_records];
    c.bench_function(name, |b| b.iter(|| write(black_box(&schema), black_box(&records))));
    Ok(())
}

fn bench_read(
    c: &mut Criterion,
    make_record: fn() -> CodecResult<(Schema, Value)>,
    n_records: usize,
    name: &str,
) -> CodecResult<()> {
    let (schema, record) = make_record()?;
    let records = vec![record; n_records];
    let bytes = write(&schema, &records)?;
    c.bench_function(name, |b| {
        b.iter(|| read(black_box(&schema), black_box(&bytes), n_records))
    });
    Ok(())
}

fn bench_small_schema_write_1_record(c: &mut Criterion) {
    bench_write(c, make_small_record, 1, "small schema, write 1 record").unwrap();
}

fn bench_small_schema_write_100_record(c: &mut Criterion) {
    bench_write(c, make_small_record, 100, "small schema, write 100 records").unwrap();
}

fn bench_small_schema_read_1_record(c: &mut Criterion) {
    bench_read(c, make_small_record, 1, "small schema, read 1 record").unwrap();
}

fn bench_small_schema_read_100_record(c: &mut Criterion) {
    bench_read(c, make_small_record, 100, "small schema, read 100 records").unwrap();
}

fn bench_big_schema_write_1_record(c: &mut Criterion) {
    bench_write(c, make_big_record, 1, "big schema, write 1 record").unwrap();
}

fn bench_big_schema_write_100_record(c: &mut Criterion) {
    bench_write(c, make_big_record, 100, "big schema, write 100 records").unwrap();
}

fn bench_big_schema_read_1_record(c: &mut Criterion) {
    bench_read(c, make_big_record, 1, "big schema, read 1 record").unwrap();
}

fn bench_big_schema_read_100_record(c: &mut Criterion) {
    bench_read(c, make_big_record, 100, "big schema, read 100 records").unwrap();
}

fn bench_big_schema_write_10_000_record(c: &mut Criterion) {
    bench_write(c, make_big_record, 10_000, "big schema, write 10k records").unwrap();
}

fn bench_big_schema_read_10_000_record(c: &mut Criterion) {
    bench_read(c, make_big_record, 10_000, "big schema, read 10k records").unwrap();
}

criterion_group!(
    benches,
    bench_small_schema_write_1_record,
    bench_small_schema_write_100_record,
    bench_small_schema_read_1_record,
    bench_small_schema_read_100_record,
    bench_big_schema_write_1_record,
    bench_big_schema_write_100_record,
    bench_big_schema_read_1_record,
    bench_big_schema_read_100_record,
);

criterion_group!(
    name = long_benches;
    config = Criterion::default().sample_size(20).measurement_time(Duration::from_secs(10));
    targets =
        bench_big_schema_write_10_000_record,
        bench_big_schema_read_10_000_record
);

criterion_main!(benches, long_benches);
