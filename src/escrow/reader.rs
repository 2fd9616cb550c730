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

//! Read-only queries over escrow outputs.

use crate::chain::{DatumReading, KeyHash, Utxo};
use crate::escrow::EscrowDatum;
use crate::value::Lovelace;

pub fn read_datum(utxo: &Utxo) -> DatumReading<EscrowDatum> {
    DatumReading::read(utxo, "escrow", EscrowDatum::from_plutus)
}

fn filter_by<'u>(utxos: &'u [Utxo], pred: impl Fn(&EscrowDatum) -> bool) -> Vec<&'u Utxo> {
    utxos
        .iter()
        .filter(|utxo| read_datum(utxo).ok().is_some_and(|datum| pred(&datum)))
        .collect()
}

/// All escrow outputs funding the given job.
pub fn find_by_job<'u>(utxos: &'u [Utxo], job_id: &str) -> Vec<&'u Utxo> {
    filter_by(utxos, |datum| datum.job_id == job_id)
}

pub fn find_by_client<'u>(utxos: &'u [Utxo], client: &KeyHash) -> Vec<&'u Utxo> {
    filter_by(utxos, |datum| &datum.client == client)
}

pub fn find_by_worker<'u>(utxos: &'u [Utxo], worker: &KeyHash) -> Vec<&'u Utxo> {
    filter_by(utxos, |datum| &datum.worker == worker)
}

/// Whether every milestone of the schedule is both completed and approved.
pub fn all_milestones_settled(datum: &EscrowDatum) -> bool {
    datum.milestones.iter().all(|m| m.stage.is_approved())
}

/// Native coin locked in an escrow output.
pub fn locked_amount(utxo: &Utxo) -> Lovelace { utxo.lovelace() }
