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

//! Read-only queries over dispute outputs.

use crate::chain::{DatumReading, KeyHash, Timestamp, Utxo};
use crate::dispute::{DisputeDatum, DisputeStatus};
use crate::value::Lovelace;

/// Disputes open longer than this many days count as stale.
pub const DEFAULT_STALE_DAYS: i64 = 30;

pub fn read_datum(utxo: &Utxo) -> DatumReading<DisputeDatum> {
    DatumReading::read(utxo, "dispute", DisputeDatum::from_plutus)
}

fn filter_by<'u>(utxos: &'u [Utxo], pred: impl Fn(&DisputeDatum) -> bool) -> Vec<&'u Utxo> {
    utxos
        .iter()
        .filter(|utxo| read_datum(utxo).ok().is_some_and(|datum| pred(&datum)))
        .collect()
}

/// First dispute recorded for the given job, if any.
pub fn find_by_job<'u>(utxos: &'u [Utxo], job_id: &str) -> Option<&'u Utxo> {
    utxos
        .iter()
        .find(|utxo| read_datum(utxo).ok().is_some_and(|datum| datum.job_id == job_id))
}

pub fn find_by_client<'u>(utxos: &'u [Utxo], client: &KeyHash) -> Vec<&'u Utxo> {
    filter_by(utxos, |datum| &datum.client == client)
}

pub fn find_by_worker<'u>(utxos: &'u [Utxo], worker: &KeyHash) -> Vec<&'u Utxo> {
    filter_by(utxos, |datum| &datum.worker == worker)
}

pub fn find_by_mediator<'u>(utxos: &'u [Utxo], mediator: &KeyHash) -> Vec<&'u Utxo> {
    filter_by(utxos, |datum| &datum.mediator == mediator)
}

pub fn find_by_status(utxos: &[Utxo], status: DisputeStatus) -> Vec<&Utxo> {
    filter_by(utxos, |datum| datum.status == status)
}

pub fn open_disputes(utxos: &[Utxo]) -> Vec<&Utxo> {
    find_by_status(utxos, DisputeStatus::Open)
}

pub fn resolved_disputes(utxos: &[Utxo]) -> Vec<&Utxo> {
    find_by_status(utxos, DisputeStatus::Resolved)
}

/// Whole days a dispute has existed at `now`.
pub fn age_days(datum: &DisputeDatum, now: Timestamp) -> i64 {
    datum.created_at.elapsed_days(now)
}

/// Days between opening and resolution; `None` while unresolved.
pub fn resolution_days(datum: &DisputeDatum) -> Option<i64> {
    if datum.resolved_at.millis() == 0 {
        return None;
    }
    Some(datum.created_at.elapsed_days(datum.resolved_at))
}

/// An open dispute older than `max_days` needs mediator attention.
pub fn is_stale(datum: &DisputeDatum, now: Timestamp, max_days: i64) -> bool {
    datum.status == DisputeStatus::Open && age_days(datum, now) > max_days
}

/// Exact integer shares of the pot under the recorded percentages.
pub fn distribution(datum: &DisputeDatum) -> (Lovelace, Lovelace) { datum.distribution() }

#[cfg(test)]
mod test {
    use super::*;
    use crate::chain::{Outpoint, MILLIS_PER_DAY};
    use crate::value::Asset;

    fn dispute_utxo(job_id: &str, status: DisputeStatus, mediator: &str) -> Utxo {
        let mut datum = DisputeDatum::open(
            job_id,
            KeyHash::from("c11e47"),
            KeyHash::from("3012e5"),
            KeyHash::from(mediator),
            "ipfs://QmReason",
            Lovelace::from(50_000_000u64),
            Timestamp::from_millis(0),
        );
        datum.status = status;
        if status == DisputeStatus::Resolved {
            datum.resolved_at = Timestamp::from_millis(10 * MILLIS_PER_DAY);
        }
        Utxo {
            outpoint: Outpoint::new(job_id, 0),
            address: "addr_test1wdispute".to_owned(),
            value: vec![Asset::lovelace(Lovelace::from(52_000_000u64))],
            datum: Some(datum.to_plutus().into()),
        }
    }

    #[test]
    fn lookups_by_identity_and_status() {
        let utxos = vec![
            dispute_utxo("job-1", DisputeStatus::Open, "4ed1a7"),
            dispute_utxo("job-2", DisputeStatus::Resolved, "4ed1a7"),
            dispute_utxo("job-3", DisputeStatus::Open, "aaaaaa"),
        ];
        assert!(find_by_job(&utxos, "job-2").is_some());
        assert!(find_by_job(&utxos, "job-9").is_none());
        assert_eq!(find_by_mediator(&utxos, &KeyHash::from("4ed1a7")).len(), 2);
        assert_eq!(open_disputes(&utxos).len(), 2);
        assert_eq!(resolved_disputes(&utxos).len(), 1);
        assert_eq!(find_by_client(&utxos, &KeyHash::from("c11e47")).len(), 3);
        assert_eq!(find_by_worker(&utxos, &KeyHash::from("3012e5")).len(), 3);
    }

    #[test]
    fn age_staleness_and_resolution_time() {
        let utxos = vec![
            dispute_utxo("job-1", DisputeStatus::Open, "4ed1a7"),
            dispute_utxo("job-2", DisputeStatus::Resolved, "4ed1a7"),
        ];
        let open = read_datum(&utxos[0]).ok().unwrap();
        let resolved = read_datum(&utxos[1]).ok().unwrap();

        let now = Timestamp::from_millis(45 * MILLIS_PER_DAY);
        assert_eq!(age_days(&open, now), 45);
        assert!(is_stale(&open, now, DEFAULT_STALE_DAYS));
        assert!(!is_stale(&open, Timestamp::from_millis(MILLIS_PER_DAY), DEFAULT_STALE_DAYS));

        assert_eq!(resolution_days(&open), None);
        assert_eq!(resolution_days(&resolved), Some(10));
        // resolved disputes never go stale
        assert!(!is_stale(&resolved, now, DEFAULT_STALE_DAYS));
    }
}
