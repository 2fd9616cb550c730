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

//! Seam to the generic transaction-assembly engine.
//!
//! Builders drive an engine through intent-building calls and a terminal
//! `finalize`. The engine owns fee calculation, coin selection and size
//! accounting; this layer never retries and never inspects the produced
//! transaction.

use async_trait::async_trait;

use crate::chain::{KeyHash, PlutusVersion, Utxo};
use crate::data::TaggedRecord;
use crate::value::Asset;

/// Spending proof attached when consuming a script-controlled output: the
/// validator bytecode, the fact that the datum travels inline with the
/// output, and the serialized redeemer authorizing the transition.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SpendProof {
    pub script_cbor: String,
    pub version: PlutusVersion,
    pub datum_present: bool,
    pub redeemer: TaggedRecord,
}

impl SpendProof {
    /// Proof for a V3 validator with an inline datum, the shape every
    /// TrustGig contract uses.
    pub fn inline(script_cbor: impl Into<String>, redeemer: TaggedRecord) -> Self {
        SpendProof {
            script_cbor: script_cbor.into(),
            version: PlutusVersion::V3,
            datum_present: true,
            redeemer,
        }
    }
}

/// Serialized unsigned transaction produced by the engine. Opaque to this
/// layer; the external signer consumes it.
#[derive(Wrapper, Clone, Eq, PartialEq, Hash, Debug, From)]
#[wrapper(Deref, Display)]
pub struct UnsignedTx(#[from] String);

impl UnsignedTx {
    pub fn as_str(&self) -> &str { &self.0 }
}

/// Raised by the external engine on infeasibility: insufficient funds,
/// size or execution-unit overflow.
#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display("transaction assembly failed: {0}")]
pub struct AssemblyFailure(pub String);

/// A builder-level invariant check failed before any engine interaction.
///
/// Builders refuse to construct a transaction they can statically tell
/// would be rejected on-chain.
#[derive(Clone, Eq, PartialEq, Debug, Display, Error)]
#[display(doc_comments)]
pub enum PreconditionViolation {
    /// percentage split {client}/{worker} does not sum to 100.
    PercentageSplit { client: u8, worker: u8 },

    /// committee member {0} has already signed this proposal.
    AlreadySigned(KeyHash),

    /// only {have} of the {need} required signatures are present.
    ThresholdNotMet { have: usize, need: u64 },

    /// proposal has already been executed.
    AlreadyExecuted,

    /// milestone index {index} is outside the schedule of {len} milestones.
    MilestoneIndex { index: usize, len: usize },

    /// milestone {0} has already been completed and approved.
    MilestoneSettled(usize),

    /// credential is already revoked.
    AlreadyRevoked,

    /// no chain provider API key is configured.
    MissingApiKey,
}

#[derive(Clone, Eq, PartialEq, Debug, Display, Error, From)]
#[display(inner)]
pub enum BuilderError {
    #[from]
    Precondition(PreconditionViolation),

    #[from]
    Assembly(AssemblyFailure),
}

/// Generic transaction-assembly engine.
///
/// Intent-building calls are synchronous accumulation; only `finalize`
/// reaches the network (fee evaluation, execution-unit budgeting) and is
/// therefore async. Infeasibility (insufficient funds, size or budget
/// overflow) surfaces as [`AssemblyFailure`] and is propagated unchanged.
#[async_trait]
pub trait TxAssembler: Send {
    /// Consume a script-controlled output under the given spending proof.
    fn spend_script_output(&mut self, utxo: &Utxo, proof: SpendProof);

    /// Emit an output; continuing outputs carry the successor datum, while
    /// terminal payouts carry none.
    fn add_output(&mut self, address: &str, value: Vec<Asset>, datum: Option<TaggedRecord>);

    /// Demand a signature from the given key hash for the transaction to
    /// validate.
    fn require_signer(&mut self, signer: &KeyHash);

    async fn finalize(&mut self) -> Result<UnsignedTx, AssemblyFailure>;
}

/// Output recorded by [`RecordingAssembler`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RecordedOutput {
    pub address: String,
    pub value: Vec<Asset>,
    pub datum: Option<TaggedRecord>,
}

/// Engine double that records the issued intent instead of assembling a
/// transaction. Backs the builder test-suites and offline inspection of
/// what a builder would submit.
#[derive(Clone, Default, Debug)]
pub struct RecordingAssembler {
    pub inputs: Vec<(Utxo, SpendProof)>,
    pub outputs: Vec<RecordedOutput>,
    pub signers: Vec<KeyHash>,
    /// When set, `finalize` fails with this message instead of succeeding.
    pub fail_with: Option<String>,
}

impl RecordingAssembler {
    pub fn new() -> Self { Self::default() }

    pub fn failing(message: impl Into<String>) -> Self {
        RecordingAssembler {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl TxAssembler for RecordingAssembler {
    fn spend_script_output(&mut self, utxo: &Utxo, proof: SpendProof) {
        self.inputs.push((utxo.clone(), proof));
    }

    fn add_output(&mut self, address: &str, value: Vec<Asset>, datum: Option<TaggedRecord>) {
        self.outputs.push(RecordedOutput {
            address: address.to_owned(),
            value,
            datum,
        });
    }

    fn require_signer(&mut self, signer: &KeyHash) { self.signers.push(signer.clone()); }

    async fn finalize(&mut self) -> Result<UnsignedTx, AssemblyFailure> {
        if let Some(message) = &self.fail_with {
            return Err(AssemblyFailure(message.clone()));
        }
        Ok(UnsignedTx::from(format!(
            "unsigned-tx({} inputs, {} outputs, {} signers)",
            self.inputs.len(),
            self.outputs.len(),
            self.signers.len()
        )))
    }
}
