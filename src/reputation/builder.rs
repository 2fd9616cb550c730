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
use crate::reputation::{ReputationDatum, ReputationRedeemer};
use crate::value::{Asset, Lovelace};

/// Transaction builder for the reputation contract.
pub struct ReputationBuilder<A: TxAssembler> {
    engine: A,
    script_address: String,
    script_cbor: String,
}

impl<A: TxAssembler> ReputationBuilder<A> {
    pub fn with(
        engine: A,
        script_address: impl Into<String>,
        script_cbor: impl Into<String>,
    ) -> Self {
        ReputationBuilder {
            engine,
            script_address: script_address.into(),
            script_cbor: script_cbor.into(),
        }
    }

    pub fn engine(&self) -> &A { &self.engine }

    fn spend(&mut self, utxo: &Utxo, redeemer: ReputationRedeemer) {
        self.engine
            .spend_script_output(utxo, SpendProof::inline(self.script_cbor.as_str(), redeemer.to_plutus()));
    }

    /// Creates the one reputation record of a user, seeded at the starting
    /// score.
    pub async fn initialize_reputation(
        &mut self,
        user: KeyHash,
        min_ada: Lovelace,
    ) -> Result<UnsignedTx, BuilderError> {
        let datum = ReputationDatum::initial(user);
        self.engine.add_output(
            &self.script_address,
            vec![Asset::lovelace(min_ada)],
            Some(datum.to_plutus()),
        );
        Ok(self.engine.finalize().await?)
    }

    /// Shifts the score by `delta`, clamped at zero, and re-attaches the
    /// record.
    pub async fn update_score(
        &mut self,
        reputation_utxo: &Utxo,
        datum: &ReputationDatum,
        delta: i64,
        signer: &KeyHash,
    ) -> Result<UnsignedTx, BuilderError> {
        let updated = datum.with_score_delta(delta);
        self.spend(reputation_utxo, ReputationRedeemer::UpdateScore { delta });
        self.engine.add_output(
            &self.script_address,
            reputation_utxo.value.clone(),
            Some(updated.to_plutus()),
        );
        self.engine.require_signer(signer);
        Ok(self.engine.finalize().await?)
    }

    /// Counts one more job, marking it completed when `completed` holds.
    pub async fn increment_jobs(
        &mut self,
        reputation_utxo: &Utxo,
        datum: &ReputationDatum,
        completed: bool,
        signer: &KeyHash,
    ) -> Result<UnsignedTx, BuilderError> {
        let updated = datum.with_job_recorded(completed);
        self.spend(reputation_utxo, ReputationRedeemer::IncrementJobs);
        self.engine.add_output(
            &self.script_address,
            reputation_utxo.value.clone(),
            Some(updated.to_plutus()),
        );
        self.engine.require_signer(signer);
        Ok(self.engine.finalize().await?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assembler::RecordingAssembler;
    use crate::chain::Outpoint;
    use crate::reputation::INITIAL_SCORE;

    const SCRIPT_ADDR: &str = "addr_test1wreputation";
    const SCRIPT_CBOR: &str = "590101010011aa";

    fn builder() -> ReputationBuilder<RecordingAssembler> {
        ReputationBuilder::with(RecordingAssembler::new(), SCRIPT_ADDR, SCRIPT_CBOR)
    }

    fn locked_utxo(datum: &ReputationDatum) -> Utxo {
        Utxo {
            outpoint: Outpoint::new("cc33", 0),
            address: SCRIPT_ADDR.to_owned(),
            value: vec![Asset::lovelace(Lovelace::from(2_000_000u64))],
            datum: Some(datum.to_plutus().into()),
        }
    }

    #[tokio::test]
    async fn initialization_seeds_the_starting_score() {
        let mut builder = builder();
        builder
            .initialize_reputation(KeyHash::from("u5e4"), Lovelace::from(2_000_000u64))
            .await
            .unwrap();

        let out = &builder.engine().outputs[0];
        let datum = ReputationDatum::from_plutus(&out.datum.clone().unwrap().into()).unwrap();
        assert_eq!(datum.score, INITIAL_SCORE);
        assert_eq!(datum.total_jobs, 0);
        assert_eq!(datum.completed_jobs, 0);
    }

    #[tokio::test]
    async fn negative_delta_clamps_at_zero() {
        let datum = ReputationDatum::initial(KeyHash::from("u5e4"));
        let utxo = locked_utxo(&datum);
        let mut builder = builder();
        builder
            .update_score(&utxo, &datum, -250, &KeyHash::from("0facle"))
            .await
            .unwrap();

        let out = &builder.engine().outputs[0];
        let updated = ReputationDatum::from_plutus(&out.datum.clone().unwrap().into()).unwrap();
        assert_eq!(updated.score, 0);
        // the redeemer still records the requested delta
        assert_eq!(
            builder.engine().inputs[0].1.redeemer.int64(0).unwrap(),
            -250
        );
    }

    #[tokio::test]
    async fn job_recording_re_locks_the_record() {
        let datum = ReputationDatum::initial(KeyHash::from("u5e4"));
        let utxo = locked_utxo(&datum);
        let mut builder = builder();
        builder
            .increment_jobs(&utxo, &datum, true, &KeyHash::from("0facle"))
            .await
            .unwrap();

        let engine = builder.engine();
        assert_eq!(engine.outputs[0].address, SCRIPT_ADDR);
        let updated =
            ReputationDatum::from_plutus(&engine.outputs[0].datum.clone().unwrap().into()).unwrap();
        assert_eq!(updated.total_jobs, 1);
        assert_eq!(updated.completed_jobs, 1);
    }
}
