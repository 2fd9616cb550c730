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
use crate::chain::{KeyHash, Timestamp, Utxo};
use crate::dispute::{DisputeDatum, DisputeRedeemer, DisputeSplit};
use crate::value::{Asset, Lovelace};

/// Transaction builder for the dispute contract.
pub struct DisputeBuilder<A: TxAssembler> {
    engine: A,
    script_address: String,
    script_cbor: String,
}

impl<A: TxAssembler> DisputeBuilder<A> {
    pub fn with(
        engine: A,
        script_address: impl Into<String>,
        script_cbor: impl Into<String>,
    ) -> Self {
        DisputeBuilder {
            engine,
            script_address: script_address.into(),
            script_cbor: script_cbor.into(),
        }
    }

    pub fn engine(&self) -> &A { &self.engine }

    fn spend(&mut self, utxo: &Utxo, redeemer: DisputeRedeemer) {
        self.engine
            .spend_script_output(utxo, SpendProof::inline(self.script_cbor.as_str(), redeemer.to_plutus()));
    }

    /// Locks the disputed pot plus the min-ada deposit at the script
    /// address with an open dispute record.
    #[allow(clippy::too_many_arguments)]
    pub async fn open_dispute(
        &mut self,
        job_id: impl Into<String>,
        client: KeyHash,
        worker: KeyHash,
        mediator: KeyHash,
        reason: impl Into<String>,
        total_amount: Lovelace,
        min_ada: Lovelace,
        created_at: Timestamp,
    ) -> Result<UnsignedTx, BuilderError> {
        let datum =
            DisputeDatum::open(job_id, client, worker, mediator, reason, total_amount, created_at);
        self.engine.add_output(
            &self.script_address,
            vec![Asset::lovelace(total_amount.saturating_add(min_ada))],
            Some(datum.to_plutus()),
        );
        Ok(self.engine.finalize().await?)
    }

    /// Splits the pot between the parties per the mediator's verdict.
    ///
    /// Shares are floor divisions of the recorded total; a party whose
    /// share computes to zero receives no output at all. Requires the
    /// mediator's signature.
    pub async fn resolve_dispute(
        &mut self,
        dispute_utxo: &Utxo,
        datum: &DisputeDatum,
        split: DisputeSplit,
        client_address: &str,
        worker_address: &str,
    ) -> Result<UnsignedTx, BuilderError> {
        let resolved = datum.resolve(split, Timestamp::now())?;
        let (client_amount, worker_amount) = resolved.distribution();

        self.spend(dispute_utxo, DisputeRedeemer::Resolve {
            client_percentage: split.client,
            worker_percentage: split.worker,
        });
        if !client_amount.is_zero() {
            self.engine
                .add_output(client_address, vec![Asset::lovelace(client_amount)], None);
        }
        if !worker_amount.is_zero() {
            self.engine
                .add_output(worker_address, vec![Asset::lovelace(worker_amount)], None);
        }
        self.engine.require_signer(&datum.mediator);
        Ok(self.engine.finalize().await?)
    }

    /// Returns the full locked value to `return_address` when the dispute
    /// is invalid or withdrawn. Requires the mediator's signature.
    pub async fn reject_dispute(
        &mut self,
        dispute_utxo: &Utxo,
        datum: &DisputeDatum,
        return_address: &str,
    ) -> Result<UnsignedTx, BuilderError> {
        self.spend(dispute_utxo, DisputeRedeemer::Reject);
        self.engine
            .add_output(return_address, dispute_utxo.value.clone(), None);
        self.engine.require_signer(&datum.mediator);
        Ok(self.engine.finalize().await?)
    }
}
