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

#![deny(
    non_upper_case_globals,
    non_camel_case_types,
    non_snake_case,
    unused_mut,
    unused_imports,
    dead_code
)]

// WRITE PATH:
// blueprint  :: json -> ContractRegistry
// resolve    :: ContractRegistry, Network -> script address   (memoized)
// factory    :: ContractRegistry, ScriptSerializer, Config -> Builders
// build      :: Builder, prior state, action -> UnsignedTx    (via engine)
//
// READ PATH:
// provider   :: address -> [Utxo]                              (external)
// readers    :: [Utxo] -> decoded state, derived facts
// the decoded state feeds back into the builders as prior-state input.

#[macro_use]
extern crate amplify;

pub mod assembler;
pub mod chain;
pub mod credentials;
pub mod data;
pub mod dispute;
pub mod escrow;
pub mod factory;
pub mod multisig;
pub mod provider;
pub mod registry;
pub mod reputation;
pub mod resolver;
pub mod value;

pub use assembler::{
    AssemblyFailure, BuilderError, PreconditionViolation, SpendProof, TxAssembler, UnsignedTx,
};
pub use chain::{DatumReading, KeyHash, Network, Outpoint, PlutusVersion, Timestamp, Utxo};
pub use data::{MalformedDatumError, PlutusData, TaggedRecord};
pub use factory::{BuilderFactory, FactoryConfig};
pub use provider::{ChainProvider, ProtocolParams, ProviderError};
pub use registry::{Blueprint, ContractName, ContractRegistry, NotFoundError, ValidatorInfo};
pub use resolver::{AddressResolver, ContractInfo, ScriptSerializer};
pub use value::{Asset, Lovelace, MIN_UTXO_LOVELACE};

#[cfg(test)]
pub(crate) mod testutils {
    use rand::rngs::ThreadRng;
    use rand::Rng;

    /// Random lowercase hex string, the shape of key hashes and content
    /// references.
    pub(crate) fn hex_string(rng: &mut ThreadRng, len: usize) -> String {
        (0..len)
            .map(|_| char::from_digit(rng.random_range(0..16), 16).unwrap())
            .collect()
    }
}
