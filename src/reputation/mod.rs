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

//! Per-user reputation record: a running score plus job counters, created
//! once and mutated for the lifetime of the account.

mod builder;
pub mod reader;

pub use builder::ReputationBuilder;

use crate::chain::KeyHash;
use crate::data::{MalformedDatumError, PlutusData, TaggedRecord};

/// Score every fresh reputation record starts from.
pub const INITIAL_SCORE: i64 = 100;

/// On-chain reputation state of one user.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ReputationDatum {
    pub user: KeyHash,
    /// Floor-clamped at zero; no ceiling is enforced at this layer.
    pub score: i64,
    pub total_jobs: u64,
    pub completed_jobs: u64,
}

impl ReputationDatum {
    pub fn initial(user: KeyHash) -> Self {
        ReputationDatum {
            user,
            score: INITIAL_SCORE,
            total_jobs: 0,
            completed_jobs: 0,
        }
    }

    /// Field order is part of the wire contract with the reputation
    /// validator.
    pub fn to_plutus(&self) -> TaggedRecord {
        TaggedRecord::with(0, vec![
            PlutusData::from(self.user.as_str()),
            PlutusData::from(self.score),
            PlutusData::from(self.total_jobs),
            PlutusData::from(self.completed_jobs),
        ])
    }

    pub fn from_plutus(data: &PlutusData) -> Result<Self, MalformedDatumError> {
        let record = data.as_record()?;
        record.require_fields(4)?;
        Ok(ReputationDatum {
            user: KeyHash::from(record.text(0)?),
            score: record.int64(1)?,
            total_jobs: record.uint(2)?,
            completed_jobs: record.uint(3)?,
        })
    }

    /// Successor state with the score shifted by `delta`, clamped at zero.
    pub fn with_score_delta(&self, delta: i64) -> Self {
        ReputationDatum {
            score: self.score.saturating_add(delta).max(0),
            ..self.clone()
        }
    }

    /// Successor state after one more job; the completed counter moves only
    /// for finished work.
    pub fn with_job_recorded(&self, completed: bool) -> Self {
        ReputationDatum {
            total_jobs: self.total_jobs + 1,
            completed_jobs: self.completed_jobs + completed as u64,
            ..self.clone()
        }
    }
}

/// Action authorizing a spend of the reputation output.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ReputationRedeemer {
    UpdateScore { delta: i64 },
    IncrementJobs,
}

impl ReputationRedeemer {
    pub fn to_plutus(&self) -> TaggedRecord {
        match self {
            ReputationRedeemer::UpdateScore { delta } => {
                TaggedRecord::with(0, vec![PlutusData::from(*delta)])
            }
            ReputationRedeemer::IncrementJobs => TaggedRecord::tag(1),
        }
    }

    pub fn from_plutus(data: &PlutusData) -> Result<Self, MalformedDatumError> {
        let record = data.as_record()?;
        match record.alternative {
            0 => Ok(ReputationRedeemer::UpdateScore {
                delta: record.int64(0)?,
            }),
            1 => Ok(ReputationRedeemer::IncrementJobs),
            value => Err(MalformedDatumError::Discriminant {
                kind: "ReputationRedeemer",
                value: value as i128,
            }),
        }
    }
}
