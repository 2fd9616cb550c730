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

use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::data::{MalformedDatumError, PlutusData};
use crate::value::{lovelace_of, Asset, Lovelace};

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Blake2b-224 hash of a payment verification key, hex-encoded.
///
/// Identities throughout the SDK (clients, workers, mediators, committee
/// members, credential issuers and holders) are key hashes.
#[derive(Wrapper, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default, From)]
#[wrapper(Deref, Display, FromStr)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyHash(#[from] String);

impl From<&str> for KeyHash {
    fn from(pkh: &str) -> Self { KeyHash(pkh.to_owned()) }
}

impl KeyHash {
    pub fn as_str(&self) -> &str { &self.0 }
}

/// POSIX timestamp in milliseconds, as carried by on-chain datums.
#[derive(Wrapper, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default, From)]
#[wrapper(Display, FromStr)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[from] i64);

impl Timestamp {
    pub fn now() -> Self { Timestamp(Utc::now().timestamp_millis()) }

    pub const fn from_millis(millis: i64) -> Self { Timestamp(millis) }

    pub const fn millis(self) -> i64 { self.0 }

    /// Timestamp shifted by a millisecond period; saturates instead of
    /// wrapping so "lifetime" validity periods stay representable.
    pub fn offset(self, millis: i64) -> Timestamp { Timestamp(self.0.saturating_add(millis)) }

    /// Whole days elapsed between `self` and a later `now`.
    pub fn elapsed_days(self, now: Timestamp) -> i64 { (now.0 - self.0) / MILLIS_PER_DAY }
}

#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display("unknown network name `{0}`")]
pub struct UnknownNetwork(pub String);

/// Cardano network the SDK can target.
///
/// The two test networks share the numeric id and the address prefix; only
/// mainnet differs.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[display(lowercase)]
pub enum Network {
    Mainnet,
    Preprod,
    Preview,
}

impl Network {
    pub const fn id(self) -> u8 {
        match self {
            Network::Mainnet => 1,
            Network::Preprod | Network::Preview => 0,
        }
    }

    pub const fn address_prefix(self) -> &'static str {
        match self {
            Network::Mainnet => "addr",
            Network::Preprod | Network::Preview => "addr_test",
        }
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "preprod" => Ok(Network::Preprod),
            "preview" => Ok(Network::Preview),
            other => Err(UnknownNetwork(other.to_owned())),
        }
    }
}

/// Plutus language version a validator was compiled for. All TrustGig
/// validators are V3.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default, Display)]
#[display(Debug)]
pub enum PlutusVersion {
    V1,
    V2,
    #[default]
    V3,
}

/// Reference to a transaction output.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[display("{txid}:{vout}")]
#[derive(Serialize, Deserialize)]
pub struct Outpoint {
    pub txid: String,
    pub vout: u32,
}

impl Outpoint {
    pub fn new(txid: impl Into<String>, vout: u32) -> Self {
        Outpoint {
            txid: txid.into(),
            vout,
        }
    }
}

/// Snapshot of an unspent output as supplied by a chain-data provider.
#[derive(Clone, Eq, PartialEq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utxo {
    pub outpoint: Outpoint,
    pub address: String,
    pub value: Vec<Asset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datum: Option<PlutusData>,
}

impl Utxo {
    pub fn lovelace(&self) -> Lovelace { lovelace_of(&self.value) }
}

/// Outcome of decoding the datum attached to an output.
///
/// Readers never raise on decode: an output with no datum, or with a datum
/// belonging to another script version, is simply not one of ours. The
/// three cases stay distinguishable for callers which care.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum DatumReading<T> {
    Present(T),
    Absent,
    Malformed(MalformedDatumError),
}

impl<T> DatumReading<T> {
    /// Decodes an output's datum, keeping the absent/malformed distinction
    /// and recording a diagnostic for undecodable payloads.
    pub fn read(
        utxo: &Utxo,
        kind: &'static str,
        decode: impl FnOnce(&PlutusData) -> Result<T, MalformedDatumError>,
    ) -> Self {
        match &utxo.datum {
            None => DatumReading::Absent,
            Some(data) => match decode(data) {
                Ok(state) => DatumReading::Present(state),
                Err(err) => {
                    log::debug!("undecodable {kind} datum at {}: {err}", utxo.outpoint);
                    DatumReading::Malformed(err)
                }
            },
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            DatumReading::Present(state) => Some(state),
            DatumReading::Absent | DatumReading::Malformed(_) => None,
        }
    }

    pub fn is_present(&self) -> bool { matches!(self, DatumReading::Present(_)) }
}
