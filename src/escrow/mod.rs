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

//! Job escrow: funds locked per job, released per milestone schedule.

mod builder;
pub mod reader;

pub use builder::EscrowBuilder;

use crate::assembler::PreconditionViolation;
use crate::chain::{KeyHash, Timestamp};
use crate::data::{MalformedDatumError, PlutusData, TaggedRecord};
use crate::value::Lovelace;

/// Lifecycle status of an escrowed job.
///
/// Wire discriminants are pinned explicitly; reordering the Rust variants
/// must never change the encoding.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[display(Debug)]
pub enum JobStatus {
    Active,
    InProgress,
    Disputed,
    Completed,
    Cancelled,
}

impl JobStatus {
    pub const fn to_int(self) -> i128 {
        match self {
            JobStatus::Active => 0,
            JobStatus::InProgress => 1,
            JobStatus::Disputed => 2,
            JobStatus::Completed => 3,
            JobStatus::Cancelled => 4,
        }
    }

    pub fn from_int(value: i128) -> Result<Self, MalformedDatumError> {
        match value {
            0 => Ok(JobStatus::Active),
            1 => Ok(JobStatus::InProgress),
            2 => Ok(JobStatus::Disputed),
            3 => Ok(JobStatus::Completed),
            4 => Ok(JobStatus::Cancelled),
            value => Err(MalformedDatumError::Discriminant {
                kind: "JobStatus",
                value,
            }),
        }
    }
}

/// Two-step acceptance ladder of a milestone.
///
/// The on-chain `CompleteMilestone` action advances one rung per
/// transaction: worker delivery first (`Completed`), client sign-off second
/// (`Approved`). On the wire the rung travels as two 0/1 flags.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default, Display)]
#[display(Debug)]
pub enum MilestoneStage {
    #[default]
    Pending,
    Completed,
    Approved,
}

impl MilestoneStage {
    /// Next rung of the ladder; `None` once approved.
    pub fn advance(self) -> Option<MilestoneStage> {
        match self {
            MilestoneStage::Pending => Some(MilestoneStage::Completed),
            MilestoneStage::Completed => Some(MilestoneStage::Approved),
            MilestoneStage::Approved => None,
        }
    }

    pub const fn is_completed(self) -> bool { !matches!(self, MilestoneStage::Pending) }

    pub const fn is_approved(self) -> bool { matches!(self, MilestoneStage::Approved) }

    const fn flags(self) -> (bool, bool) {
        match self {
            MilestoneStage::Pending => (false, false),
            MilestoneStage::Completed => (true, false),
            MilestoneStage::Approved => (true, true),
        }
    }

    fn from_flags(completed: bool, approved: bool) -> Result<Self, MalformedDatumError> {
        match (completed, approved) {
            (false, false) => Ok(MilestoneStage::Pending),
            (true, false) => Ok(MilestoneStage::Completed),
            (true, true) => Ok(MilestoneStage::Approved),
            // approval without completion cannot be produced by any
            // transition of this contract
            (false, true) => Err(MalformedDatumError::MilestoneFlags),
        }
    }
}

/// One entry of a job's milestone schedule.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Milestone {
    pub description: String,
    pub amount: Lovelace,
    pub stage: MilestoneStage,
}

impl Milestone {
    pub fn new(description: impl Into<String>, amount: Lovelace) -> Self {
        Milestone {
            description: description.into(),
            amount,
            stage: MilestoneStage::Pending,
        }
    }

    pub fn to_plutus(&self) -> TaggedRecord {
        let (completed, approved) = self.stage.flags();
        TaggedRecord::with(0, vec![
            PlutusData::from(self.description.as_str()),
            PlutusData::from(self.amount.value()),
            PlutusData::flag(completed),
            PlutusData::flag(approved),
        ])
    }

    pub fn from_plutus(data: &PlutusData) -> Result<Self, MalformedDatumError> {
        let record = data.as_record()?;
        record.require_fields(4)?;
        Ok(Milestone {
            description: record.text(0)?.to_owned(),
            amount: Lovelace::from(record.uint(1)?),
            stage: MilestoneStage::from_flags(record.flag(2)?, record.flag(3)?)?,
        })
    }
}

/// On-chain state of one escrowed job.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct EscrowDatum {
    pub client: KeyHash,
    pub worker: KeyHash,
    pub amount: Lovelace,
    pub job_id: String,
    pub milestones: Vec<Milestone>,
    pub status: JobStatus,
    pub deadline: Timestamp,
}

impl EscrowDatum {
    /// Field order is part of the wire contract with the escrow validator.
    pub fn to_plutus(&self) -> TaggedRecord {
        TaggedRecord::with(0, vec![
            PlutusData::from(self.client.as_str()),
            PlutusData::from(self.worker.as_str()),
            PlutusData::from(self.amount.value()),
            PlutusData::from(self.job_id.as_str()),
            PlutusData::List(self.milestones.iter().map(|m| m.to_plutus().into()).collect()),
            PlutusData::Int(self.status.to_int()),
            PlutusData::from(self.deadline.millis()),
        ])
    }

    pub fn from_plutus(data: &PlutusData) -> Result<Self, MalformedDatumError> {
        let record = data.as_record()?;
        record.require_fields(7)?;
        let mut milestones = Vec::new();
        for item in record.list(4)? {
            milestones.push(Milestone::from_plutus(item)?);
        }
        Ok(EscrowDatum {
            client: KeyHash::from(record.text(0)?),
            worker: KeyHash::from(record.text(1)?),
            amount: Lovelace::from(record.uint(2)?),
            job_id: record.text(3)?.to_owned(),
            milestones,
            status: JobStatus::from_int(record.int(5)?)?,
            deadline: Timestamp::from_millis(record.int64(6)?),
        })
    }

    /// Successor state with one milestone advanced a single rung.
    pub fn with_milestone_advanced(&self, index: usize) -> Result<Self, PreconditionViolation> {
        let len = self.milestones.len();
        let milestone = self
            .milestones
            .get(index)
            .ok_or(PreconditionViolation::MilestoneIndex { index, len })?;
        let stage = milestone
            .stage
            .advance()
            .ok_or(PreconditionViolation::MilestoneSettled(index))?;
        let mut next = self.clone();
        next.milestones[index].stage = stage;
        Ok(next)
    }

    /// Successor state after a dispute is opened; only the status changes.
    pub fn disputed(&self) -> Self {
        EscrowDatum {
            status: JobStatus::Disputed,
            ..self.clone()
        }
    }
}

/// Action authorizing a spend of the escrow output.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum EscrowRedeemer {
    Release,
    Refund,
    CompleteMilestone { index: u64 },
    Dispute,
}

impl EscrowRedeemer {
    pub fn to_plutus(&self) -> TaggedRecord {
        match self {
            EscrowRedeemer::Release => TaggedRecord::tag(0),
            EscrowRedeemer::Refund => TaggedRecord::tag(1),
            EscrowRedeemer::CompleteMilestone { index } => {
                TaggedRecord::with(2, vec![PlutusData::from(*index)])
            }
            EscrowRedeemer::Dispute => TaggedRecord::tag(3),
        }
    }

    pub fn from_plutus(data: &PlutusData) -> Result<Self, MalformedDatumError> {
        let record = data.as_record()?;
        match record.alternative {
            0 => Ok(EscrowRedeemer::Release),
            1 => Ok(EscrowRedeemer::Refund),
            2 => Ok(EscrowRedeemer::CompleteMilestone {
                index: record.uint(0)?,
            }),
            3 => Ok(EscrowRedeemer::Dispute),
            value => Err(MalformedDatumError::Discriminant {
                kind: "EscrowRedeemer",
                value: value as i128,
            }),
        }
    }
}
