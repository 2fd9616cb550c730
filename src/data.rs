// TrustGig smart contracts SDK for the Cardano blockchain
//
// SPDX-License-Identifier: Apache-2.0
//
// Written in 2024-2025 by
//     TrustGig Labs contributors
//
// Copyright (C) 2024-2025 TrustGig Labs. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Plutus data interchange form shared by all five contract codecs.
//!
//! Every datum and redeemer crosses the wire as a *tagged record*: a
//! constructor alternative plus an ordered field list. Tag values and field
//! order are fixed by the on-chain validators and are not free to change.

use serde::{Deserialize, Serialize};

/// Untyped Plutus data tree.
///
/// Booleans have no native representation and travel as the integers 0/1;
/// enums travel as small integers under per-type mapping tables. The JSON
/// rendering (`{"alternative": n, "fields": [...]}` for records) matches the
/// form chain-data providers attach to inline datums.
#[derive(Clone, Eq, PartialEq, Hash, Debug, From)]
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlutusData {
    #[from]
    Int(i128),
    #[from]
    Text(String),
    #[from]
    List(Vec<PlutusData>),
    #[from]
    Constr(TaggedRecord),
}

impl From<&str> for PlutusData {
    fn from(text: &str) -> Self { PlutusData::Text(text.to_owned()) }
}

impl From<u64> for PlutusData {
    fn from(value: u64) -> Self { PlutusData::Int(value as i128) }
}

impl From<i64> for PlutusData {
    fn from(value: i64) -> Self { PlutusData::Int(value as i128) }
}

impl PlutusData {
    /// Wire encoding of a boolean flag.
    pub fn flag(value: bool) -> Self { PlutusData::Int(value as i128) }

    pub fn as_record(&self) -> Result<&TaggedRecord, MalformedDatumError> {
        match self {
            PlutusData::Constr(record) => Ok(record),
            _ => Err(MalformedDatumError::NotARecord),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, MalformedDatumError> {
        serde_json::from_str(json).map_err(|_| MalformedDatumError::NotARecord)
    }
}

/// Constructor alternative with an ordered field list.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[derive(Serialize, Deserialize)]
pub struct TaggedRecord {
    pub alternative: u64,
    pub fields: Vec<PlutusData>,
}

impl TaggedRecord {
    /// Record with the given constructor tag and no payload.
    pub fn tag(alternative: u64) -> Self {
        TaggedRecord {
            alternative,
            fields: vec![],
        }
    }

    pub fn with(alternative: u64, fields: Vec<PlutusData>) -> Self {
        TaggedRecord {
            alternative,
            fields,
        }
    }

    pub fn require_fields(&self, expected: usize) -> Result<(), MalformedDatumError> {
        if self.fields.len() < expected {
            return Err(MalformedDatumError::FieldCount {
                expected,
                found: self.fields.len(),
            });
        }
        Ok(())
    }

    fn field(&self, index: usize) -> Result<&PlutusData, MalformedDatumError> {
        self.fields
            .get(index)
            .ok_or(MalformedDatumError::FieldCount {
                expected: index + 1,
                found: self.fields.len(),
            })
    }

    pub fn int(&self, index: usize) -> Result<i128, MalformedDatumError> {
        match self.field(index)? {
            PlutusData::Int(value) => Ok(*value),
            _ => Err(MalformedDatumError::FieldKind {
                index,
                expected: "an integer",
            }),
        }
    }

    pub fn int64(&self, index: usize) -> Result<i64, MalformedDatumError> {
        let value = self.int(index)?;
        i64::try_from(value).map_err(|_| MalformedDatumError::IntRange { index, value })
    }

    pub fn uint(&self, index: usize) -> Result<u64, MalformedDatumError> {
        let value = self.int(index)?;
        u64::try_from(value).map_err(|_| MalformedDatumError::IntRange { index, value })
    }

    /// Integer field constrained to the inclusive 0–100 range.
    pub fn percent(&self, index: usize) -> Result<u8, MalformedDatumError> {
        let value = self.int(index)?;
        match u8::try_from(value) {
            Ok(pct) if pct <= 100 => Ok(pct),
            _ => Err(MalformedDatumError::IntRange { index, value }),
        }
    }

    pub fn flag(&self, index: usize) -> Result<bool, MalformedDatumError> {
        match self.int(index)? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(MalformedDatumError::BoolEncoding { index, value }),
        }
    }

    pub fn text(&self, index: usize) -> Result<&str, MalformedDatumError> {
        match self.field(index)? {
            PlutusData::Text(text) => Ok(text),
            _ => Err(MalformedDatumError::FieldKind {
                index,
                expected: "a text string",
            }),
        }
    }

    pub fn list(&self, index: usize) -> Result<&[PlutusData], MalformedDatumError> {
        match self.field(index)? {
            PlutusData::List(items) => Ok(items),
            _ => Err(MalformedDatumError::FieldKind {
                index,
                expected: "a list",
            }),
        }
    }

    pub fn record(&self, index: usize) -> Result<&TaggedRecord, MalformedDatumError> {
        match self.field(index)? {
            PlutusData::Constr(record) => Ok(record),
            _ => Err(MalformedDatumError::FieldKind {
                index,
                expected: "a tagged record",
            }),
        }
    }
}

/// An on-chain datum does not match the tagged-record layout expected for
/// its contract kind.
#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum MalformedDatumError {
    /// datum is not a tagged record.
    NotARecord,

    /// tagged record holds {found} fields while at least {expected} are
    /// required.
    FieldCount { expected: usize, found: usize },

    /// field {index} is not {expected}.
    FieldKind {
        index: usize,
        expected: &'static str,
    },

    /// integer {value} in field {index} does not fit the target width.
    IntRange { index: usize, value: i128 },

    /// field {index} encodes a boolean as {value}; only 0 and 1 are allowed.
    BoolEncoding { index: usize, value: i128 },

    /// value {value} is not a known {kind} discriminant.
    Discriminant { kind: &'static str, value: i128 },

    /// milestone flags mark approval without completion.
    MilestoneFlags,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn typed_accessors() {
        let record = TaggedRecord::with(0, vec![
            PlutusData::from("deadbeef"),
            PlutusData::from(42u64),
            PlutusData::flag(true),
            PlutusData::List(vec![PlutusData::from(1u64)]),
        ]);
        assert_eq!(record.text(0).unwrap(), "deadbeef");
        assert_eq!(record.uint(1).unwrap(), 42);
        assert!(record.flag(2).unwrap());
        assert_eq!(record.list(3).unwrap().len(), 1);
    }

    #[test]
    fn missing_field_reports_count() {
        let record = TaggedRecord::tag(0);
        assert_eq!(record.int(2), Err(MalformedDatumError::FieldCount {
            expected: 3,
            found: 0,
        }));
        assert_eq!(record.require_fields(1), Err(MalformedDatumError::FieldCount {
            expected: 1,
            found: 0,
        }));
    }

    #[test]
    fn booleans_only_accept_zero_and_one() {
        let record = TaggedRecord::with(0, vec![PlutusData::from(2u64)]);
        assert_eq!(record.flag(0), Err(MalformedDatumError::BoolEncoding {
            index: 0,
            value: 2,
        }));
    }

    #[test]
    fn percent_rejects_values_over_hundred() {
        let record = TaggedRecord::with(0, vec![PlutusData::from(101u64)]);
        assert_eq!(record.percent(0), Err(MalformedDatumError::IntRange {
            index: 0,
            value: 101,
        }));
    }

    #[test]
    fn json_interchange_round_trip() {
        let data = PlutusData::Constr(TaggedRecord::with(1, vec![
            PlutusData::from("cafe"),
            PlutusData::from(7u64),
            PlutusData::List(vec![PlutusData::flag(false)]),
        ]));
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(PlutusData::from_json_str(&json).unwrap(), data);
    }

    #[test]
    fn provider_shaped_json_parses() {
        let json = r#"{"alternative":0,"fields":["ab01",100,{"alternative":0,"fields":[]}]}"#;
        let data = PlutusData::from_json_str(json).unwrap();
        let record = data.as_record().unwrap();
        assert_eq!(record.alternative, 0);
        assert_eq!(record.text(0).unwrap(), "ab01");
        assert_eq!(record.uint(1).unwrap(), 100);
        assert_eq!(record.record(2).unwrap().alternative, 0);
    }
}
