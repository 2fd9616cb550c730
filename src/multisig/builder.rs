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

use crate::assembler::{BuilderError, SpendProof, TxAssembler, UnsignedTx};
use crate::chain::{KeyHash, Utxo};
use crate::multisig::{MultisigDatum, MultisigRedeemer};
use crate::value::{Asset, Lovelace};

/// Transaction builder for the multisig contract.
pub struct MultisigBuilder<A: TxAssembler> {
    engine: A,
    script_address: String,
    script_cbor: String,
}

impl<A: TxAssembler> MultisigBuilder<A> {
    pub fn with(
        engine: A,
        script_address: impl Into<String>,
        script_cbor: impl Into<String>,
    ) -> Self {
        MultisigBuilder {
            engine,
            script_address: script_address.into(),
            script_cbor: script_cbor.into(),
        }
    }

    pub fn engine(&self) -> &A { &self.engine }

    fn spend(&mut self, utxo: &Utxo, redeemer: MultisigRedeemer) {
        self.engine
            .spend_script_output(utxo, SpendProof::inline(self.script_cbor.as_str(), redeemer.to_plutus()));
    }

    /// Locks a fresh proposal record with no signatures.
    pub async fn create_proposal(
        &mut self,
        committee: Vec<KeyHash>,
        threshold: u64,
        proposal_id: impl Into<String>,
        proposal_hash: impl Into<String>,
        min_ada: Lovelace,
    ) -> Result<UnsignedTx, BuilderError> {
        let datum = MultisigDatum::proposal(committee, threshold, proposal_id, proposal_hash);
        self.engine.add_output(
            &self.script_address,
            vec![Asset::lovelace(min_ada)],
            Some(datum.to_plutus()),
        );
        Ok(self.engine.finalize().await?)
    }

    /// Appends the signer and re-attaches the proposal; a second signature
    /// by the same member is refused before any intent is issued.
    pub async fn sign_proposal(
        &mut self,
        proposal_utxo: &Utxo,
        datum: &MultisigDatum,
        signer: &KeyHash,
    ) -> Result<UnsignedTx, BuilderError> {
        let updated = datum.with_signature(signer)?;
        self.spend(proposal_utxo, MultisigRedeemer::Sign);
        self.engine.add_output(
            &self.script_address,
            proposal_utxo.value.clone(),
            Some(updated.to_plutus()),
        );
        self.engine.require_signer(signer);
        Ok(self.engine.finalize().await?)
    }

    /// Pays the locked value to the recipient once the threshold is met.
    ///
    /// Every signer recorded on the proposal is demanded again as a
    /// required signer of the executing transaction: the enclosing
    /// multi-signed context re-proves the on-chain tally.
    pub async fn execute_proposal(
        &mut self,
        proposal_utxo: &Utxo,
        datum: &MultisigDatum,
        recipient_address: &str,
    ) -> Result<UnsignedTx, BuilderError> {
        let executed = datum.mark_executed()?;
        self.spend(proposal_utxo, MultisigRedeemer::Execute);
        self.engine
            .add_output(recipient_address, proposal_utxo.value.clone(), None);
        for signer in &executed.signatures {
            self.engine.require_signer(signer);
        }
        Ok(self.engine.finalize().await?)
    }

    /// Returns the locked value; demands signatures from the positional
    /// first half of the committee (see
    /// [`MultisigDatum::required_cancellers`]).
    pub async fn cancel_proposal(
        &mut self,
        proposal_utxo: &Utxo,
        datum: &MultisigDatum,
        return_address: &str,
    ) -> Result<UnsignedTx, BuilderError> {
        self.spend(proposal_utxo, MultisigRedeemer::Cancel);
        self.engine
            .add_output(return_address, proposal_utxo.value.clone(), None);
        for canceller in datum.required_cancellers() {
            self.engine.require_signer(canceller);
        }
        Ok(self.engine.finalize().await?)
    }
}
