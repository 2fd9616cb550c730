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

//! Committee-governed proposals: signatures accumulate on-chain until a
//! threshold admits execution.

mod builder;
pub mod reader;

pub use builder::MultisigBuilder;

use crate::assembler::PreconditionViolation;
use crate::chain::KeyHash;
use crate::data::{MalformedDatumError, PlutusData, TaggedRecord};

/// On-chain state of one proposal.
///
/// `committee` is an ordered sequence, not a set: the cancellation rule
/// selects members by list position.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MultisigDatum {
    pub committee: Vec<KeyHash>,
    pub threshold: u64,
    pub proposal_id: String,
    pub proposal_hash: String,
    /// Append-only; a signer appears at most once.
    pub signatures: Vec<KeyHash>,
    /// Write-once true.
    pub executed: bool,
}

impl MultisigDatum {
    pub fn proposal(
        committee: Vec<KeyHash>,
        threshold: u64,
        proposal_id: impl Into<String>,
        proposal_hash: impl Into<String>,
    ) -> Self {
        MultisigDatum {
            committee,
            threshold,
            proposal_id: proposal_id.into(),
            proposal_hash: proposal_hash.into(),
            signatures: vec![],
            executed: false,
        }
    }

    /// Field order is part of the wire contract with the multisig
    /// validator.
    pub fn to_plutus(&self) -> TaggedRecord {
        TaggedRecord::with(0, vec![
            PlutusData::List(
                self.committee
                    .iter()
                    .map(|member| PlutusData::from(member.as_str()))
                    .collect(),
            ),
            PlutusData::from(self.threshold),
            PlutusData::from(self.proposal_id.as_str()),
            PlutusData::from(self.proposal_hash.as_str()),
            PlutusData::List(
                self.signatures
                    .iter()
                    .map(|signer| PlutusData::from(signer.as_str()))
                    .collect(),
            ),
            PlutusData::flag(self.executed),
        ])
    }

    pub fn from_plutus(data: &PlutusData) -> Result<Self, MalformedDatumError> {
        let record = data.as_record()?;
        record.require_fields(6)?;
        Ok(MultisigDatum {
            committee: key_list(record, 0)?,
            threshold: record.uint(1)?,
            proposal_id: record.text(2)?.to_owned(),
            proposal_hash: record.text(3)?.to_owned(),
            signatures: key_list(record, 4)?,
            executed: record.flag(5)?,
        })
    }

    /// Whether the accumulated signatures admit execution. Counting, not
    /// set semantics: a duplicate entry would be double-counted, which is
    /// why [`MultisigDatum::with_signature`] refuses duplicates.
    pub fn is_threshold_met(&self) -> bool { self.signatures.len() as u64 >= self.threshold }

    pub fn has_signed(&self, member: &KeyHash) -> bool { self.signatures.contains(member) }

    pub fn is_committee_member(&self, member: &KeyHash) -> bool {
        self.committee.contains(member)
    }

    /// Successor state with one more signature appended; signing twice is a
    /// precondition violation.
    pub fn with_signature(&self, signer: &KeyHash) -> Result<Self, PreconditionViolation> {
        if self.has_signed(signer) {
            return Err(PreconditionViolation::AlreadySigned(signer.clone()));
        }
        let mut next = self.clone();
        next.signatures.push(signer.clone());
        Ok(next)
    }

    /// Terminal executed state, gated on the signature threshold.
    pub fn mark_executed(&self) -> Result<Self, PreconditionViolation> {
        if self.executed {
            return Err(PreconditionViolation::AlreadyExecuted);
        }
        if !self.is_threshold_met() {
            return Err(PreconditionViolation::ThresholdNotMet {
                have: self.signatures.len(),
                need: self.threshold,
            });
        }
        Ok(MultisigDatum {
            executed: true,
            ..self.clone()
        })
    }

    /// Committee members whose signatures cancellation demands: the first
    /// ⌈n/2⌉ by list position, not an arbitrary majority subset.
    pub fn required_cancellers(&self) -> &[KeyHash] {
        let take = self.committee.len().div_ceil(2);
        &self.committee[..take]
    }
}

fn key_list(record: &TaggedRecord, index: usize) -> Result<Vec<KeyHash>, MalformedDatumError> {
    record
        .list(index)?
        .iter()
        .map(|item| match item {
            PlutusData::Text(text) => Ok(KeyHash::from(text.as_str())),
            _ => Err(MalformedDatumError::FieldKind {
                index,
                expected: "a list of key hashes",
            }),
        })
        .collect()
}

/// Minimum signature count for a committee at a percentage quorum, rounded
/// up.
pub fn threshold_for(committee_size: usize, percent: u8) -> u64 {
    ((committee_size * percent as usize).div_ceil(100)) as u64
}

/// Stock governance thresholds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
#[display(Debug)]
pub enum ThresholdPolicy {
    Unanimous,
    Supermajority,
    Majority,
    Quorum,
}

impl ThresholdPolicy {
    pub fn required(self, committee_size: usize) -> u64 {
        match self {
            ThresholdPolicy::Unanimous => committee_size as u64,
            ThresholdPolicy::Supermajority => threshold_for(committee_size, 67),
            ThresholdPolicy::Majority => threshold_for(committee_size, 51),
            ThresholdPolicy::Quorum => threshold_for(committee_size, 33),
        }
    }
}

/// Action authorizing a spend of the proposal output.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MultisigRedeemer {
    Sign,
    Execute,
    Cancel,
}

impl MultisigRedeemer {
    pub fn to_plutus(&self) -> TaggedRecord {
        match self {
            MultisigRedeemer::Sign => TaggedRecord::tag(0),
            MultisigRedeemer::Execute => TaggedRecord::tag(1),
            MultisigRedeemer::Cancel => TaggedRecord::tag(2),
        }
    }

    pub fn from_plutus(data: &PlutusData) -> Result<Self, MalformedDatumError> {
        let record = data.as_record()?;
        match record.alternative {
            0 => Ok(MultisigRedeemer::Sign),
            1 => Ok(MultisigRedeemer::Execute),
            2 => Ok(MultisigRedeemer::Cancel),
            value => Err(MalformedDatumError::Discriminant {
                kind: "MultisigRedeemer",
                value: value as i128,
            }),
        }
    }
}
