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

//! Registry over the compiled-contract manifest ("plutus blueprint").
//!
//! The validators themselves are opaque: the SDK only ever sees their
//! compiled bytecode and hash. The registry indexes the five spend
//! validators by the `<name>.<name>.spend` title convention.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One of the five TrustGig on-chain contracts.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[display(lowercase)]
pub enum ContractName {
    Escrow,
    Dispute,
    Reputation,
    Multisig,
    Credentials,
}

impl ContractName {
    pub const ALL: [ContractName; 5] = [
        ContractName::Escrow,
        ContractName::Dispute,
        ContractName::Reputation,
        ContractName::Multisig,
        ContractName::Credentials,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ContractName::Escrow => "escrow",
            ContractName::Dispute => "dispute",
            ContractName::Reputation => "reputation",
            ContractName::Multisig => "multisig",
            ContractName::Credentials => "credentials",
        }
    }

    /// Validator title under which the contract appears in the blueprint.
    pub fn title(self) -> String { format!("{0}.{0}.spend", self.as_str()) }
}

impl FromStr for ContractName {
    type Err = NotFoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "escrow" => Ok(ContractName::Escrow),
            "dispute" => Ok(ContractName::Dispute),
            "reputation" => Ok(ContractName::Reputation),
            "multisig" => Ok(ContractName::Multisig),
            "credentials" => Ok(ContractName::Credentials),
            other => Err(NotFoundError::Contract(other.to_owned())),
        }
    }
}

/// A requested entity is absent from the registry or a queried output set.
#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum NotFoundError {
    /// `{0}` is not a known contract name.
    Contract(String),

    /// validator `{0}` is absent from the contract blueprint.
    Validator(String),
}

#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display("invalid contract blueprint: {0}")]
pub struct BlueprintError(String);

impl From<serde_json::Error> for BlueprintError {
    fn from(err: serde_json::Error) -> Self { BlueprintError(err.to_string()) }
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preamble {
    pub title: String,
    pub description: String,
    pub version: String,
    pub plutus_version: String,
    pub compiler: CompilerInfo,
    pub license: String,
}

/// Compiled validator entry of the blueprint: a title, the compiled
/// bytecode as a hex string, and its hash.
#[derive(Clone, Eq, PartialEq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorInfo {
    pub title: String,
    pub compiled_code: String,
    pub hash: String,
}

/// Manifest produced by the contract compiler.
#[derive(Clone, Eq, PartialEq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub preamble: Preamble,
    pub validators: Vec<ValidatorInfo>,
}

impl Blueprint {
    pub fn from_json_str(json: &str) -> Result<Self, BlueprintError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Pure lookup over the loaded blueprint. Holds no other state.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ContractRegistry {
    preamble: Preamble,
    validators: IndexMap<ContractName, ValidatorInfo>,
}

impl ContractRegistry {
    pub fn new(blueprint: Blueprint) -> Self {
        let mut validators = IndexMap::new();
        for name in ContractName::ALL {
            let title = name.title();
            if let Some(validator) = blueprint.validators.iter().find(|v| v.title == title) {
                validators.insert(name, validator.clone());
            }
        }
        ContractRegistry {
            preamble: blueprint.preamble,
            validators,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, BlueprintError> {
        Blueprint::from_json_str(json).map(Self::new)
    }

    pub fn validator(&self, name: ContractName) -> Result<&ValidatorInfo, NotFoundError> {
        self.validators
            .get(&name)
            .ok_or_else(|| NotFoundError::Validator(name.title()))
    }

    pub fn bytecode_of(&self, name: ContractName) -> Result<&str, NotFoundError> {
        self.validator(name).map(|v| v.compiled_code.as_str())
    }

    pub fn hash_of(&self, name: ContractName) -> Result<&str, NotFoundError> {
        self.validator(name).map(|v| v.hash.as_str())
    }

    /// All indexed spend validators, in blueprint order.
    pub fn validators(&self) -> impl Iterator<Item = (ContractName, &ValidatorInfo)> {
        self.validators.iter().map(|(name, v)| (*name, v))
    }

    /// Whether every one of the five contracts is present.
    pub fn is_complete(&self) -> bool { self.validators.len() == ContractName::ALL.len() }

    pub fn preamble(&self) -> &Preamble { &self.preamble }

    pub fn plutus_version(&self) -> &str { &self.preamble.plutus_version }
}
