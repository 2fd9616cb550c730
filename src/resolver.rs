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

//! Script address derivation, memoized per contract and network.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::chain::{Network, PlutusVersion};
use crate::registry::{ContractName, ContractRegistry, NotFoundError};

#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display("script serializer failure: {0}")]
pub struct SerializerError(pub String);

/// External collaborator deriving script addresses and hashes from compiled
/// validator bytecode.
pub trait ScriptSerializer: Send + Sync {
    fn script_address(
        &self,
        bytecode: &str,
        version: PlutusVersion,
        network_id: u8,
    ) -> Result<String, SerializerError>;

    fn script_hash(&self, bytecode: &str, version: PlutusVersion)
        -> Result<String, SerializerError>;
}

#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
#[display(inner)]
pub enum AddressError {
    #[from]
    NotFound(NotFoundError),

    #[from]
    Serializer(SerializerError),
}

/// Summary of one deployed contract on one network.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ContractInfo {
    pub name: ContractName,
    pub network: Network,
    pub address: String,
    pub script_hash: String,
    pub plutus_version: PlutusVersion,
}

/// Derives and caches deterministic script addresses.
///
/// The cache is owned by the resolver instance rather than being process
/// state; derivation is idempotent, so concurrent lookups at worst repeat
/// work and never disagree.
pub struct AddressResolver {
    registry: Arc<ContractRegistry>,
    serializer: Box<dyn ScriptSerializer>,
    cache: RwLock<HashMap<(ContractName, Network), String>>,
}

impl AddressResolver {
    pub fn new(
        registry: Arc<ContractRegistry>,
        serializer: impl ScriptSerializer + 'static,
    ) -> Self {
        AddressResolver {
            registry,
            serializer: Box::new(serializer),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &ContractRegistry { &self.registry }

    /// Deterministic script address of a contract on a network.
    pub fn address_for(
        &self,
        name: ContractName,
        network: Network,
    ) -> Result<String, AddressError> {
        let key = (name, network);
        if let Some(address) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(address.clone());
        }

        let bytecode = self.registry.bytecode_of(name)?;
        let address =
            self.serializer
                .script_address(bytecode, PlutusVersion::V3, network.id())?;
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, address.clone());
        Ok(address)
    }

    /// Addresses of all five contracts on a network, in registry order.
    pub fn addresses_for(
        &self,
        network: Network,
    ) -> Result<IndexMap<ContractName, String>, AddressError> {
        let mut addresses = IndexMap::new();
        for name in ContractName::ALL {
            addresses.insert(name, self.address_for(name, network)?);
        }
        Ok(addresses)
    }

    /// Recomputes the script hash from bytecode and compares it against the
    /// blueprint. A mismatch means a stale or tampered build artifact.
    ///
    /// Never raises: mismatch and derivation failure both collapse to
    /// `false`, leaving the abort decision to the caller.
    pub fn verify_hash(&self, name: ContractName) -> bool {
        let Ok(validator) = self.registry.validator(name) else {
            return false;
        };
        match self
            .serializer
            .script_hash(&validator.compiled_code, PlutusVersion::V3)
        {
            Ok(computed) if computed == validator.hash => true,
            Ok(computed) => {
                log::warn!(
                    "script hash mismatch for {name}: blueprint records {}, bytecode yields \
                     {computed}",
                    validator.hash
                );
                false
            }
            Err(err) => {
                log::warn!("cannot compute script hash for {name}: {err}");
                false
            }
        }
    }

    /// Per-contract hash verification map.
    pub fn verify_all(&self) -> IndexMap<ContractName, bool> {
        ContractName::ALL
            .into_iter()
            .map(|name| (name, self.verify_hash(name)))
            .collect()
    }

    pub fn contract_info(
        &self,
        name: ContractName,
        network: Network,
    ) -> Result<ContractInfo, AddressError> {
        Ok(ContractInfo {
            name,
            network,
            address: self.address_for(name, network)?,
            script_hash: self.registry.hash_of(name)?.to_owned(),
            plutus_version: PlutusVersion::V3,
        })
    }

    /// Drops every memoized address. Lookups after this re-derive.
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
