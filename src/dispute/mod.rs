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

//! Mediated dispute over an escrowed job: funds re-locked until a mediator
//! splits them between client and worker, or rejects the dispute.

mod builder;
pub mod reader;

pub use builder::DisputeBuilder;

use crate::assembler::PreconditionViolation;
use crate::chain::{KeyHash, Timestamp};
use crate::data::{MalformedDatumError, PlutusData, TaggedRecord};
use crate::value::Lovelace;

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[display(Debug)]
pub enum DisputeStatus {
    Open,
    UnderReview,
    Resolved,
    Rejected,
}

impl DisputeStatus {
    pub const fn to_int(self) -> i128 {
        match self {
            DisputeStatus::Open => 0,
            DisputeStatus::UnderReview => 1,
            DisputeStatus::Resolved => 2,
            DisputeStatus::Rejected => 3,
        }
    }

    pub fn from_int(value: i128) -> Result<Self, MalformedDatumError> {
        match value {
            0 => Ok(DisputeStatus::Open),
            1 => Ok(DisputeStatus::UnderReview),
            2 => Ok(DisputeStatus::Resolved),
            3 => Ok(DisputeStatus::Rejected),
            value => Err(MalformedDatumError::Discriminant {
                kind: "DisputeStatus",
                value,
            }),
        }
    }
}

/// Percentage split of disputed funds between the two parties.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
#[display("{client}/{worker}")]
pub struct DisputeSplit {
    pub client: u8,
    pub worker: u8,
}

impl DisputeSplit {
    pub const FULL_CLIENT: DisputeSplit = DisputeSplit {
        client: 100,
        worker: 0,
    };
    pub const FULL_WORKER: DisputeSplit = DisputeSplit {
        client: 0,
        worker: 100,
    };
    pub const EVEN_SPLIT: DisputeSplit = DisputeSplit {
        client: 50,
        worker: 50,
    };
    pub const MOSTLY_CLIENT: DisputeSplit = DisputeSplit {
        client: 75,
        worker: 25,
    };
    pub const MOSTLY_WORKER: DisputeSplit = DisputeSplit {
        client: 25,
        worker: 75,
    };

    pub const fn new(client: u8, worker: u8) -> Self { DisputeSplit { client, worker } }

    /// A resolution is only meaningful when the shares exhaust the pot.
    pub fn validate(self) -> Result<(), PreconditionViolation> {
        if self.client as u16 + self.worker as u16 != 100 {
            return Err(PreconditionViolation::PercentageSplit {
                client: self.client,
                worker: self.worker,
            });
        }
        Ok(())
    }

    /// Split proposal proportional to milestone completion, rounded half-up
    /// to the worker's favor. An empty schedule proposes an even split.
    pub fn fair(completed_milestones: usize, total_milestones: usize) -> Self {
        if total_milestones == 0 {
            return DisputeSplit::EVEN_SPLIT;
        }
        let worker = ((completed_milestones * 200 + total_milestones) / (2 * total_milestones))
            .min(100) as u8;
        DisputeSplit {
            client: 100 - worker,
            worker,
        }
    }
}

/// On-chain state of one dispute.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DisputeDatum {
    pub job_id: String,
    pub client: KeyHash,
    pub worker: KeyHash,
    pub mediator: KeyHash,
    /// Content-addressed reference to the full dispute description.
    pub reason: String,
    pub status: DisputeStatus,
    pub client_percentage: u8,
    pub worker_percentage: u8,
    pub total_amount: Lovelace,
    pub created_at: Timestamp,
    /// Zero until the dispute reaches a terminal status.
    pub resolved_at: Timestamp,
}

impl DisputeDatum {
    /// Freshly opened dispute: both percentages zero, no resolution time.
    pub fn open(
        job_id: impl Into<String>,
        client: KeyHash,
        worker: KeyHash,
        mediator: KeyHash,
        reason: impl Into<String>,
        total_amount: Lovelace,
        created_at: Timestamp,
    ) -> Self {
        DisputeDatum {
            job_id: job_id.into(),
            client,
            worker,
            mediator,
            reason: reason.into(),
            status: DisputeStatus::Open,
            client_percentage: 0,
            worker_percentage: 0,
            total_amount,
            created_at,
            resolved_at: Timestamp::from_millis(0),
        }
    }

    /// Field order is part of the wire contract with the dispute validator.
    pub fn to_plutus(&self) -> TaggedRecord {
        TaggedRecord::with(0, vec![
            PlutusData::from(self.job_id.as_str()),
            PlutusData::from(self.client.as_str()),
            PlutusData::from(self.worker.as_str()),
            PlutusData::from(self.mediator.as_str()),
            PlutusData::from(self.reason.as_str()),
            PlutusData::Int(self.status.to_int()),
            PlutusData::from(self.client_percentage as u64),
            PlutusData::from(self.worker_percentage as u64),
            PlutusData::from(self.total_amount.value()),
            PlutusData::from(self.created_at.millis()),
            PlutusData::from(self.resolved_at.millis()),
        ])
    }

    pub fn from_plutus(data: &PlutusData) -> Result<Self, MalformedDatumError> {
        let record = data.as_record()?;
        record.require_fields(11)?;
        Ok(DisputeDatum {
            job_id: record.text(0)?.to_owned(),
            client: KeyHash::from(record.text(1)?),
            worker: KeyHash::from(record.text(2)?),
            mediator: KeyHash::from(record.text(3)?),
            reason: record.text(4)?.to_owned(),
            status: DisputeStatus::from_int(record.int(5)?)?,
            client_percentage: record.percent(6)?,
            worker_percentage: record.percent(7)?,
            total_amount: Lovelace::from(record.uint(8)?),
            created_at: Timestamp::from_millis(record.int64(9)?),
            resolved_at: Timestamp::from_millis(record.int64(10)?),
        })
    }

    /// Terminal resolved state; fails fast when the split is inconsistent.
    pub fn resolve(
        &self,
        split: DisputeSplit,
        resolved_at: Timestamp,
    ) -> Result<Self, PreconditionViolation> {
        split.validate()?;
        Ok(DisputeDatum {
            status: DisputeStatus::Resolved,
            client_percentage: split.client,
            worker_percentage: split.worker,
            resolved_at,
            ..self.clone()
        })
    }

    /// Terminal rejected state.
    pub fn reject(&self, resolved_at: Timestamp) -> Self {
        DisputeDatum {
            status: DisputeStatus::Rejected,
            resolved_at,
            ..self.clone()
        }
    }

    /// Exact integer distribution of the pot under the recorded
    /// percentages. Floor division on both shares: a remainder is lost, not
    /// returned to either party.
    pub fn distribution(&self) -> (Lovelace, Lovelace) {
        (
            self.total_amount.share(self.client_percentage),
            self.total_amount.share(self.worker_percentage),
        )
    }
}

/// Action authorizing a spend of the dispute output.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DisputeRedeemer {
    Open,
    Resolve {
        client_percentage: u8,
        worker_percentage: u8,
    },
    Reject,
}

impl DisputeRedeemer {
    pub fn to_plutus(&self) -> TaggedRecord {
        match self {
            DisputeRedeemer::Open => TaggedRecord::tag(0),
            DisputeRedeemer::Resolve {
                client_percentage,
                worker_percentage,
            } => TaggedRecord::with(1, vec![
                PlutusData::from(*client_percentage as u64),
                PlutusData::from(*worker_percentage as u64),
            ]),
            DisputeRedeemer::Reject => TaggedRecord::tag(2),
        }
    }

    pub fn from_plutus(data: &PlutusData) -> Result<Self, MalformedDatumError> {
        let record = data.as_record()?;
        match record.alternative {
            0 => Ok(DisputeRedeemer::Open),
            1 => Ok(DisputeRedeemer::Resolve {
                client_percentage: record.percent(0)?,
                worker_percentage: record.percent(1)?,
            }),
            2 => Ok(DisputeRedeemer::Reject),
            value => Err(MalformedDatumError::Discriminant {
                kind: "DisputeRedeemer",
                value: value as i128,
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::ThreadRng;
    use rand::Rng;

    use super::*;
    use crate::testutils::hex_string;

    fn arbitrary_status(rng: &mut ThreadRng) -> DisputeStatus {
        match rng.random_range(0..4) {
            0 => DisputeStatus::Open,
            1 => DisputeStatus::UnderReview,
            2 => DisputeStatus::Resolved,
            _ => DisputeStatus::Rejected,
        }
    }

    fn arbitrary_datum(rng: &mut ThreadRng) -> DisputeDatum {
        let client_percentage = rng.random_range(0..=100u8);
        DisputeDatum {
            job_id: format!("job-{}", hex_string(rng, 8)),
            client: KeyHash::from(hex_string(rng, 56)),
            worker: KeyHash::from(hex_string(rng, 56)),
            mediator: KeyHash::from(hex_string(rng, 56)),
            reason: format!("ipfs://{}", hex_string(rng, 32)),
            status: arbitrary_status(rng),
            client_percentage,
            worker_percentage: 100 - client_percentage,
            total_amount: Lovelace::from(rng.random_range(0..=u64::MAX / 2)),
            created_at: Timestamp::from_millis(rng.random_range(0..=i64::MAX / 2)),
            resolved_at: Timestamp::from_millis(rng.random_range(0..=i64::MAX / 2)),
        }
    }

    #[test]
    fn status_mapping_table_is_pinned() {
        assert_eq!(DisputeStatus::Open.to_int(), 0);
        assert_eq!(DisputeStatus::UnderReview.to_int(), 1);
        assert_eq!(DisputeStatus::Resolved.to_int(), 2);
        assert_eq!(DisputeStatus::Rejected.to_int(), 3);
        assert!(DisputeStatus::from_int(4).is_err());
    }

    #[test]
    fn datum_round_trip() {
        let mut rng = rand::rng();
        for _ in 0..64 {
            let datum = arbitrary_datum(&mut rng);
            let decoded = DisputeDatum::from_plutus(&datum.to_plutus().into()).unwrap();
            assert_eq!(decoded, datum);
        }
    }

    #[test]
    fn redeemer_round_trip() {
        let cases = [
            DisputeRedeemer::Open,
            DisputeRedeemer::Resolve {
                client_percentage: 33,
                worker_percentage: 67,
            },
            DisputeRedeemer::Reject,
        ];
        for redeemer in cases {
            let decoded = DisputeRedeemer::from_plutus(&redeemer.to_plutus().into()).unwrap();
            assert_eq!(decoded, redeemer);
        }
    }

    #[test]
    fn every_invalid_percentage_pair_is_rejected() {
        for client in 0..=100u8 {
            for worker in 0..=100u8 {
                let split = DisputeSplit::new(client, worker);
                if client as u16 + worker as u16 == 100 {
                    assert_eq!(split.validate(), Ok(()));
                } else {
                    assert_eq!(
                        split.validate(),
                        Err(PreconditionViolation::PercentageSplit { client, worker })
                    );
                }
            }
        }
    }

    #[test]
    fn fair_split_tracks_milestone_completion() {
        assert_eq!(DisputeSplit::fair(0, 0), DisputeSplit::EVEN_SPLIT);
        assert_eq!(DisputeSplit::fair(0, 4), DisputeSplit::FULL_CLIENT);
        assert_eq!(DisputeSplit::fair(4, 4), DisputeSplit::FULL_WORKER);
        assert_eq!(DisputeSplit::fair(1, 3), DisputeSplit::new(67, 33));
        assert_eq!(DisputeSplit::fair(2, 3), DisputeSplit::new(33, 67));
    }

    #[test]
    fn resolution_requires_consistent_split() {
        let mut rng = rand::rng();
        let datum = DisputeDatum::open(
            "job-9",
            KeyHash::from(hex_string(&mut rng, 56)),
            KeyHash::from(hex_string(&mut rng, 56)),
            KeyHash::from(hex_string(&mut rng, 56)),
            "ipfs://reason",
            Lovelace::from(100u64),
            Timestamp::from_millis(1_000),
        );
        assert!(datum.resolve(DisputeSplit::new(60, 50), Timestamp::from_millis(2_000)).is_err());

        let resolved = datum
            .resolve(DisputeSplit::new(30, 70), Timestamp::from_millis(2_000))
            .unwrap();
        assert_eq!(resolved.status, DisputeStatus::Resolved);
        assert_eq!(resolved.distribution(), (Lovelace::from(30u64), Lovelace::from(70u64)));
    }

    #[test]
    fn distribution_rounding_loss() {
        let datum = DisputeDatum {
            client_percentage: 33,
            worker_percentage: 67,
            total_amount: Lovelace::from(10u64),
            ..DisputeDatum::open(
                "job-r",
                KeyHash::from("c1"),
                KeyHash::from("77"),
                KeyHash::from("3d"),
                "reason",
                Lovelace::from(10u64),
                Timestamp::from_millis(0),
            )
        };
        let (client, worker) = datum.distribution();
        assert_eq!(client, Lovelace::from(3u64));
        assert_eq!(worker, Lovelace::from(6u64));
    }
}
