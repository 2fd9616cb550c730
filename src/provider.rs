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

//! Chain-data provider seam.
//!
//! The SDK never fetches chain state itself: readers operate over
//! caller-supplied snapshots, and the assembly engine receives protocol
//! parameters from whatever provider backs it.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chain::Utxo;
use crate::value::{Lovelace, MIN_UTXO_LOVELACE};

#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display("chain data provider failure: {0}")]
pub struct ProviderError(pub String);

/// Execution-unit budget pair.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[derive(Serialize, Deserialize)]
pub struct ExUnits {
    pub mem: u64,
    pub steps: u64,
}

/// Protocol parameters the assembly engine needs for fee calculation and
/// budget checks.
#[derive(Clone, Eq, PartialEq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolParams {
    pub min_fee_a: u64,
    pub min_fee_b: u64,
    pub max_tx_size: u32,
    pub max_execution_units: ExUnits,
    pub coins_per_utxo_byte: u64,
    pub min_utxo: Lovelace,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        ProtocolParams {
            min_fee_a: 44,
            min_fee_b: 155_381,
            max_tx_size: 16_384,
            max_execution_units: ExUnits {
                mem: 14_000_000,
                steps: 10_000_000_000,
            },
            coins_per_utxo_byte: 4_310,
            min_utxo: MIN_UTXO_LOVELACE,
        }
    }
}

/// External source of chain state: the current output set of an address and
/// the network's protocol parameters.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    async fn utxos_at(&self, address: &str) -> Result<Vec<Utxo>, ProviderError>;

    async fn protocol_params(&self) -> Result<ProtocolParams, ProviderError>;
}

/// Provider over a fixed in-memory snapshot. Backs the test-suites and
/// offline tooling; production deployments plug a network provider into the
/// same trait.
#[derive(Clone, Default, Debug)]
pub struct SnapshotProvider {
    utxos: HashMap<String, Vec<Utxo>>,
    params: ProtocolParams,
}

impl SnapshotProvider {
    pub fn new(params: ProtocolParams) -> Self {
        SnapshotProvider {
            utxos: HashMap::new(),
            params,
        }
    }

    /// Adds an output to the snapshot under its own address.
    pub fn insert(&mut self, utxo: Utxo) {
        self.utxos.entry(utxo.address.clone()).or_default().push(utxo);
    }
}

#[async_trait]
impl ChainProvider for SnapshotProvider {
    async fn utxos_at(&self, address: &str) -> Result<Vec<Utxo>, ProviderError> {
        Ok(self.utxos.get(address).cloned().unwrap_or_default())
    }

    async fn protocol_params(&self) -> Result<ProtocolParams, ProviderError> {
        Ok(self.params.clone())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chain::Outpoint;
    use crate::value::Asset;

    #[tokio::test]
    async fn snapshot_provider_serves_by_address() {
        let mut provider = SnapshotProvider::new(ProtocolParams::default());
        provider.insert(Utxo {
            outpoint: Outpoint::new("aa", 0),
            address: "addr_test1w1".to_owned(),
            value: vec![Asset::lovelace(Lovelace::from(2_000_000u64))],
            datum: None,
        });

        let found = provider.utxos_at("addr_test1w1").await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(provider.utxos_at("addr_test1w2").await.unwrap().is_empty());
        assert_eq!(
            provider.protocol_params().await.unwrap().min_utxo,
            MIN_UTXO_LOVELACE
        );
    }
}
