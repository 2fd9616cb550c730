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

//! Read-only queries over multisig proposal outputs.

use crate::chain::{DatumReading, KeyHash, Utxo};
use crate::multisig::MultisigDatum;

pub fn read_datum(utxo: &Utxo) -> DatumReading<MultisigDatum> {
    DatumReading::read(utxo, "multisig", MultisigDatum::from_plutus)
}

/// The proposal with the given id, if present.
pub fn find_by_proposal<'u>(utxos: &'u [Utxo], proposal_id: &str) -> Option<&'u Utxo> {
    utxos.iter().find(|utxo| {
        read_datum(utxo)
            .ok()
            .is_some_and(|datum| datum.proposal_id == proposal_id)
    })
}

fn filter_by<'u>(utxos: &'u [Utxo], pred: impl Fn(&MultisigDatum) -> bool) -> Vec<&'u Utxo> {
    utxos
        .iter()
        .filter(|utxo| read_datum(utxo).ok().is_some_and(|datum| pred(&datum)))
        .collect()
}

/// Proposals that have not been executed yet.
pub fn active_proposals(utxos: &[Utxo]) -> Vec<&Utxo> {
    filter_by(utxos, |datum| !datum.executed)
}

/// Active proposals a committee member still has to sign.
pub fn pending_signature<'u>(utxos: &'u [Utxo], member: &KeyHash) -> Vec<&'u Utxo> {
    filter_by(utxos, |datum| {
        !datum.executed && datum.is_committee_member(member) && !datum.has_signed(member)
    })
}

/// Active proposals whose signature threshold is already met.
pub fn ready_for_execution(utxos: &[Utxo]) -> Vec<&Utxo> {
    filter_by(utxos, |datum| !datum.executed && datum.is_threshold_met())
}

pub fn is_threshold_met(datum: &MultisigDatum) -> bool { datum.is_threshold_met() }

pub fn has_signed(datum: &MultisigDatum, member: &KeyHash) -> bool { datum.has_signed(member) }

pub fn is_committee_member(datum: &MultisigDatum, member: &KeyHash) -> bool {
    datum.is_committee_member(member)
}

/// Progress line for listings, e.g. `2/3`.
pub fn signature_progress(datum: &MultisigDatum) -> String {
    format!("{}/{}", datum.signatures.len(), datum.threshold)
}

/// Signatures still missing before the threshold is met.
pub fn remaining_signatures(datum: &MultisigDatum) -> u64 {
    datum.threshold.saturating_sub(datum.signatures.len() as u64)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chain::Outpoint;
    use crate::value::{Asset, Lovelace};

    fn proposal_utxo(id: &str, signed: &[&str], executed: bool) -> Utxo {
        let datum = MultisigDatum {
            signatures: signed.iter().copied().map(KeyHash::from).collect(),
            executed,
            ..MultisigDatum::proposal(
                vec![KeyHash::from("a1"), KeyHash::from("b2"), KeyHash::from("c3")],
                2,
                id,
                "h1",
            )
        };
        Utxo {
            outpoint: Outpoint::new(id, 0),
            address: "addr_test1wmultisig".to_owned(),
            value: vec![Asset::lovelace(Lovelace::from(2_000_000u64))],
            datum: Some(datum.to_plutus().into()),
        }
    }

    #[test]
    fn proposal_lookups() {
        let utxos = vec![
            proposal_utxo("p1", &["a1"], false),
            proposal_utxo("p2", &["a1", "b2"], false),
            proposal_utxo("p3", &["a1", "b2"], true),
        ];
        assert!(find_by_proposal(&utxos, "p2").is_some());
        assert!(find_by_proposal(&utxos, "p9").is_none());
        assert_eq!(active_proposals(&utxos).len(), 2);
        assert_eq!(ready_for_execution(&utxos).len(), 1);
        // b2 still has to sign p1 only; the executed p3 no longer counts
        assert_eq!(pending_signature(&utxos, &KeyHash::from("b2")).len(), 1);
        // an outsider is never pending
        assert!(pending_signature(&utxos, &KeyHash::from("zz")).is_empty());
    }

    #[test]
    fn progress_reporting() {
        let utxo = proposal_utxo("p1", &["a1"], false);
        let datum = read_datum(&utxo).ok().unwrap();
        assert_eq!(signature_progress(&datum), "1/2");
        assert_eq!(remaining_signatures(&datum), 1);
        assert!(!is_threshold_met(&datum));
        assert!(has_signed(&datum, &KeyHash::from("a1")));
        assert!(is_committee_member(&datum, &KeyHash::from("c3")));

        let met = read_datum(&proposal_utxo("p2", &["a1", "b2", "c3"], false))
            .ok()
            .unwrap();
        assert_eq!(remaining_signatures(&met), 0);
        assert!(is_threshold_met(&met));
    }
}
