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
use crate::escrow::{EscrowDatum, EscrowRedeemer, JobStatus, Milestone};
use crate::value::{Asset, Lovelace};

/// Transaction builder for the escrow contract.
pub struct EscrowBuilder<A: TxAssembler> {
    engine: A,
    script_address: String,
    script_cbor: String,
}

impl<A: TxAssembler> EscrowBuilder<A> {
    pub fn with(
        engine: A,
        script_address: impl Into<String>,
        script_cbor: impl Into<String>,
    ) -> Self {
        EscrowBuilder {
            engine,
            script_address: script_address.into(),
            script_cbor: script_cbor.into(),
        }
    }

    pub fn script_address(&self) -> &str { &self.script_address }

    pub fn engine(&self) -> &A { &self.engine }

    fn spend(&mut self, utxo: &Utxo, redeemer: EscrowRedeemer) {
        self.engine
            .spend_script_output(utxo, SpendProof::inline(self.script_cbor.as_str(), redeemer.to_plutus()));
    }

    /// Locks `amount` at the script address for a freshly funded job.
    pub async fn create_escrow(
        &mut self,
        client: KeyHash,
        worker: KeyHash,
        amount: Lovelace,
        job_id: impl Into<String>,
        milestones: Vec<Milestone>,
        deadline: Timestamp,
    ) -> Result<UnsignedTx, BuilderError> {
        let datum = EscrowDatum {
            client,
            worker,
            amount,
            job_id: job_id.into(),
            milestones,
            status: JobStatus::Active,
            deadline,
        };
        self.engine.add_output(
            &self.script_address,
            vec![Asset::lovelace(amount)],
            Some(datum.to_plutus()),
        );
        Ok(self.engine.finalize().await?)
    }

    /// Pays the full locked amount to the worker. Requires the client's
    /// signature.
    pub async fn release_funds(
        &mut self,
        escrow_utxo: &Utxo,
        worker_address: &str,
        datum: &EscrowDatum,
    ) -> Result<UnsignedTx, BuilderError> {
        self.spend(escrow_utxo, EscrowRedeemer::Release);
        self.engine
            .add_output(worker_address, vec![Asset::lovelace(datum.amount)], None);
        self.engine.require_signer(&datum.client);
        Ok(self.engine.finalize().await?)
    }

    /// Returns the full locked amount to the client. Also requires the
    /// client's signature, not the worker's.
    pub async fn refund_client(
        &mut self,
        escrow_utxo: &Utxo,
        client_address: &str,
        datum: &EscrowDatum,
    ) -> Result<UnsignedTx, BuilderError> {
        self.spend(escrow_utxo, EscrowRedeemer::Refund);
        self.engine
            .add_output(client_address, vec![Asset::lovelace(datum.amount)], None);
        self.engine.require_signer(&datum.client);
        Ok(self.engine.finalize().await?)
    }

    /// Advances one milestone a single rung (delivery, then approval) and
    /// re-attaches the updated schedule at the script address.
    pub async fn complete_milestone(
        &mut self,
        escrow_utxo: &Utxo,
        index: usize,
        datum: &EscrowDatum,
        signer: &KeyHash,
    ) -> Result<UnsignedTx, BuilderError> {
        let updated = datum.with_milestone_advanced(index)?;
        self.spend(escrow_utxo, EscrowRedeemer::CompleteMilestone {
            index: index as u64,
        });
        self.engine.add_output(
            &self.script_address,
            escrow_utxo.value.clone(),
            Some(updated.to_plutus()),
        );
        self.engine.require_signer(signer);
        Ok(self.engine.finalize().await?)
    }

    /// Flips the job into the disputed state, keeping funds locked.
    pub async fn initiate_dispute(
        &mut self,
        escrow_utxo: &Utxo,
        datum: &EscrowDatum,
        signer: &KeyHash,
    ) -> Result<UnsignedTx, BuilderError> {
        let updated = datum.disputed();
        self.spend(escrow_utxo, EscrowRedeemer::Dispute);
        self.engine.add_output(
            &self.script_address,
            escrow_utxo.value.clone(),
            Some(updated.to_plutus()),
        );
        self.engine.require_signer(signer);
        Ok(self.engine.finalize().await?)
    }
}
