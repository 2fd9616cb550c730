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

//! Read-only queries over credential outputs.

use crate::chain::{DatumReading, KeyHash, Timestamp, Utxo, MILLIS_PER_DAY};
use crate::credentials::{CredentialDatum, CredentialType};

pub fn read_datum(utxo: &Utxo) -> DatumReading<CredentialDatum> {
    DatumReading::read(utxo, "credential", CredentialDatum::from_plutus)
}

fn filter_by<'u>(utxos: &'u [Utxo], pred: impl Fn(&CredentialDatum) -> bool) -> Vec<&'u Utxo> {
    utxos
        .iter()
        .filter(|utxo| read_datum(utxo).ok().is_some_and(|datum| pred(&datum)))
        .collect()
}

pub fn find_by_holder<'u>(utxos: &'u [Utxo], holder: &KeyHash) -> Vec<&'u Utxo> {
    filter_by(utxos, |datum| &datum.holder == holder)
}

pub fn find_by_issuer<'u>(utxos: &'u [Utxo], issuer: &KeyHash) -> Vec<&'u Utxo> {
    filter_by(utxos, |datum| &datum.issuer == issuer)
}

pub fn find_by_type(utxos: &[Utxo], credential_type: CredentialType) -> Vec<&Utxo> {
    filter_by(utxos, |datum| datum.credential_type == credential_type)
}

/// Unexpired, unrevoked credentials of a holder at `now`.
pub fn valid_credentials<'u>(
    utxos: &'u [Utxo],
    holder: &KeyHash,
    now: Timestamp,
) -> Vec<&'u Utxo> {
    filter_by(utxos, |datum| &datum.holder == holder && datum.is_valid(now))
}

/// Whole days until expiry; zero once expired.
pub fn days_until_expiry(datum: &CredentialDatum, now: Timestamp) -> i64 {
    if now >= datum.expires_at {
        return 0;
    }
    (datum.expires_at.millis() - now.millis()) / MILLIS_PER_DAY
}

/// Count of a holder's valid credentials of one type.
pub fn count_by_type(
    utxos: &[Utxo],
    holder: &KeyHash,
    credential_type: CredentialType,
    now: Timestamp,
) -> usize {
    filter_by(utxos, |datum| {
        &datum.holder == holder && datum.credential_type == credential_type && datum.is_valid(now)
    })
    .len()
}
