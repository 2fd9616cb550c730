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

//! Wires registry, resolver and configuration into ready-to-use contract
//! builders.

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use crate::assembler::{PreconditionViolation, TxAssembler};
use crate::chain::Network;
use crate::credentials::CredentialsBuilder;
use crate::dispute::DisputeBuilder;
use crate::escrow::EscrowBuilder;
use crate::multisig::MultisigBuilder;
use crate::provider::ChainProvider;
use crate::registry::{ContractName, ContractRegistry, NotFoundError};
use crate::reputation::ReputationBuilder;
use crate::resolver::{AddressError, AddressResolver, ContractInfo, ScriptSerializer};

/// Environment variable naming the target network.
pub const NETWORK_ENV: &str = "TRUSTGIG_CARDANO_NETWORK";
/// Environment variable carrying the chain provider's API key.
pub const PROVIDER_KEY_ENV: &str = "TRUSTGIG_PROVIDER_KEY";

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FactoryConfig {
    pub network: Network,
    pub api_key: Option<String>,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        FactoryConfig {
            network: Network::Preprod,
            api_key: None,
        }
    }
}

impl FactoryConfig {
    pub fn new(network: Network) -> Self {
        FactoryConfig {
            network,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Configuration from the process environment; unset or unparsable
    /// values fall back to the preprod defaults.
    pub fn from_env() -> Self {
        let network = env::var(NETWORK_ENV)
            .ok()
            .and_then(|name| Network::from_str(&name).ok())
            .unwrap_or(Network::Preprod);
        FactoryConfig {
            network,
            api_key: env::var(PROVIDER_KEY_ENV).ok(),
        }
    }

    /// The provider API key; callers wiring a network provider check this
    /// before any chain interaction.
    pub fn api_key(&self) -> Result<&str, PreconditionViolation> {
        self.api_key
            .as_deref()
            .ok_or(PreconditionViolation::MissingApiKey)
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
#[display(inner)]
pub enum FactoryError {
    #[from]
    Address(AddressError),

    #[from]
    NotFound(NotFoundError),
}

/// Produces contract builders pre-loaded with the script address and
/// bytecode of their validator on the configured network.
pub struct BuilderFactory {
    registry: Arc<ContractRegistry>,
    resolver: AddressResolver,
    config: FactoryConfig,
    provider: Option<Arc<dyn ChainProvider>>,
}

impl BuilderFactory {
    pub fn new(
        registry: Arc<ContractRegistry>,
        serializer: impl ScriptSerializer + 'static,
        config: FactoryConfig,
    ) -> Self {
        let resolver = AddressResolver::new(registry.clone(), serializer);
        BuilderFactory {
            registry,
            resolver,
            config,
            provider: None,
        }
    }

    /// Attaches the chain-data provider readers and callers fetch output
    /// snapshots from.
    pub fn with_provider(mut self, provider: Arc<dyn ChainProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn registry(&self) -> &ContractRegistry { &self.registry }

    pub fn resolver(&self) -> &AddressResolver { &self.resolver }

    pub fn config(&self) -> &FactoryConfig { &self.config }

    /// The attached chain-data provider; absence is the same configuration
    /// precondition as a missing API key.
    pub fn provider(&self) -> Result<&dyn ChainProvider, PreconditionViolation> {
        self.provider
            .as_deref()
            .ok_or(PreconditionViolation::MissingApiKey)
    }

    fn script_parts(&self, name: ContractName) -> Result<(String, String), FactoryError> {
        let address = self.resolver.address_for(name, self.config.network)?;
        let bytecode = self.registry.bytecode_of(name)?.to_owned();
        Ok((address, bytecode))
    }

    pub fn escrow<A: TxAssembler>(&self, engine: A) -> Result<EscrowBuilder<A>, FactoryError> {
        let (address, bytecode) = self.script_parts(ContractName::Escrow)?;
        Ok(EscrowBuilder::with(engine, address, bytecode))
    }

    pub fn dispute<A: TxAssembler>(&self, engine: A) -> Result<DisputeBuilder<A>, FactoryError> {
        let (address, bytecode) = self.script_parts(ContractName::Dispute)?;
        Ok(DisputeBuilder::with(engine, address, bytecode))
    }

    pub fn reputation<A: TxAssembler>(
        &self,
        engine: A,
    ) -> Result<ReputationBuilder<A>, FactoryError> {
        let (address, bytecode) = self.script_parts(ContractName::Reputation)?;
        Ok(ReputationBuilder::with(engine, address, bytecode))
    }

    pub fn multisig<A: TxAssembler>(&self, engine: A) -> Result<MultisigBuilder<A>, FactoryError> {
        let (address, bytecode) = self.script_parts(ContractName::Multisig)?;
        Ok(MultisigBuilder::with(engine, address, bytecode))
    }

    pub fn credentials<A: TxAssembler>(
        &self,
        engine: A,
    ) -> Result<CredentialsBuilder<A>, FactoryError> {
        let (address, bytecode) = self.script_parts(ContractName::Credentials)?;
        Ok(CredentialsBuilder::with(engine, address, bytecode))
    }

    /// Deployment summary of every contract on the configured network.
    pub fn contracts_info(&self) -> Result<Vec<ContractInfo>, FactoryError> {
        ContractName::ALL
            .into_iter()
            .map(|name| {
                self.resolver
                    .contract_info(name, self.config.network)
                    .map_err(FactoryError::from)
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assembler::RecordingAssembler;
    use crate::chain::PlutusVersion;
    use crate::resolver::SerializerError;

    const BLUEPRINT: &str = r#"{
        "preamble": {
            "title": "trustgig/contracts",
            "description": "TrustGig validators",
            "version": "0.4.1",
            "plutusVersion": "v3",
            "compiler": { "name": "aiken", "version": "1.1.5" },
            "license": "Apache-2.0"
        },
        "validators": [
            { "title": "escrow.escrow.spend", "compiledCode": "aa01", "hash": "hash-aa01" },
            { "title": "dispute.dispute.spend", "compiledCode": "bb02", "hash": "hash-bb02" },
            { "title": "reputation.reputation.spend", "compiledCode": "cc03", "hash": "hash-cc03" },
            { "title": "multisig.multisig.spend", "compiledCode": "dd04", "hash": "hash-dd04" },
            { "title": "credentials.credentials.spend", "compiledCode": "ee05", "hash": "hash-ee05" }
        ]
    }"#;

    struct PrefixSerializer;

    impl ScriptSerializer for PrefixSerializer {
        fn script_address(
            &self,
            bytecode: &str,
            _version: PlutusVersion,
            network_id: u8,
        ) -> Result<String, SerializerError> {
            let prefix = if network_id == 1 { "addr" } else { "addr_test" };
            Ok(format!("{prefix}1w{bytecode}"))
        }

        fn script_hash(
            &self,
            bytecode: &str,
            _version: PlutusVersion,
        ) -> Result<String, SerializerError> {
            Ok(format!("hash-{bytecode}"))
        }
    }

    fn factory(config: FactoryConfig) -> BuilderFactory {
        let registry = Arc::new(ContractRegistry::from_json_str(BLUEPRINT).unwrap());
        BuilderFactory::new(registry, PrefixSerializer, config)
    }

    #[test]
    fn missing_api_key_is_a_precondition_violation() {
        let config = FactoryConfig::new(Network::Preprod);
        assert_eq!(config.api_key(), Err(PreconditionViolation::MissingApiKey));
        let with_key = config.with_api_key("preprodAbc123");
        assert_eq!(with_key.api_key(), Ok("preprodAbc123"));
    }

    #[test]
    fn builders_come_wired_for_the_configured_network() {
        let factory = factory(FactoryConfig::new(Network::Mainnet));
        let escrow = factory.escrow(RecordingAssembler::new()).unwrap();
        assert_eq!(escrow.script_address(), "addr1waa01");

        let infos = factory.contracts_info().unwrap();
        assert_eq!(infos.len(), 5);
        assert_eq!(infos[3].address, "addr1wdd04");
        assert_eq!(infos[3].script_hash, "hash-dd04");
    }

    #[test]
    fn hash_verification_runs_through_the_factory_resolver() {
        let factory = factory(FactoryConfig::default());
        assert!(factory.resolver().verify_all().values().all(|ok| *ok));
    }

    #[test]
    fn missing_provider_is_a_precondition_violation() {
        let factory = factory(FactoryConfig::default());
        assert_eq!(
            factory.provider().err(),
            Some(PreconditionViolation::MissingApiKey)
        );
    }
}
