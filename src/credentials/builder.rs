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
use crate::credentials::{CredentialDatum, CredentialRedeemer, CredentialType};
use crate::value::{Asset, Lovelace};

/// What presenting a credential does to its on-chain record.
///
/// The deployed contract treats verification as consumption: presenting a
/// credential spends its output and pays the deposit back to the holder, a
/// one-time-proof model. The preserving alternative re-locks the record
/// unchanged so it can be presented again; both go through the same codec.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Display)]
#[display(Debug)]
pub enum VerificationPolicy {
    #[default]
    OneTimeProof,
    Preserving,
}

/// Transaction builder for the credentials contract.
pub struct CredentialsBuilder<A: TxAssembler> {
    engine: A,
    script_address: String,
    script_cbor: String,
    verification: VerificationPolicy,
}

impl<A: TxAssembler> CredentialsBuilder<A> {
    pub fn with(
        engine: A,
        script_address: impl Into<String>,
        script_cbor: impl Into<String>,
    ) -> Self {
        CredentialsBuilder {
            engine,
            script_address: script_address.into(),
            script_cbor: script_cbor.into(),
            verification: VerificationPolicy::default(),
        }
    }

    pub fn verification_policy(mut self, policy: VerificationPolicy) -> Self {
        self.verification = policy;
        self
    }

    pub fn engine(&self) -> &A { &self.engine }

    fn spend(&mut self, utxo: &Utxo, redeemer: CredentialRedeemer) {
        self.engine
            .spend_script_output(utxo, SpendProof::inline(self.script_cbor.as_str(), redeemer.to_plutus()));
    }

    /// Issues a credential expiring `validity_millis` after `issued_at`.
    /// Requires the issuer's signature.
    #[allow(clippy::too_many_arguments)]
    pub async fn issue_credential(
        &mut self,
        holder: KeyHash,
        issuer: KeyHash,
        credential_type: CredentialType,
        credential_hash: impl Into<String>,
        issued_at: Timestamp,
        validity_millis: i64,
        min_ada: Lovelace,
    ) -> Result<UnsignedTx, BuilderError> {
        let issuer_key = issuer.clone();
        let datum = CredentialDatum::issue(
            holder,
            issuer,
            credential_type,
            credential_hash,
            issued_at,
            validity_millis,
        );
        self.engine.add_output(
            &self.script_address,
            vec![Asset::lovelace(min_ada)],
            Some(datum.to_plutus()),
        );
        self.engine.require_signer(&issuer_key);
        Ok(self.engine.finalize().await?)
    }

    /// Sets the write-once revocation flag; the record stays on-chain so
    /// the revocation itself is verifiable. Requires the issuer's
    /// signature.
    pub async fn revoke_credential(
        &mut self,
        credential_utxo: &Utxo,
        datum: &CredentialDatum,
    ) -> Result<UnsignedTx, BuilderError> {
        let updated = datum.mark_revoked()?;
        self.spend(credential_utxo, CredentialRedeemer::Revoke);
        self.engine.add_output(
            &self.script_address,
            credential_utxo.value.clone(),
            Some(updated.to_plutus()),
        );
        self.engine.require_signer(&datum.issuer);
        Ok(self.engine.finalize().await?)
    }

    /// Presents the credential under the configured
    /// [`VerificationPolicy`]. Requires the holder's signature.
    pub async fn verify_credential(
        &mut self,
        credential_utxo: &Utxo,
        datum: &CredentialDatum,
        return_address: &str,
    ) -> Result<UnsignedTx, BuilderError> {
        self.spend(credential_utxo, CredentialRedeemer::Verify);
        match self.verification {
            VerificationPolicy::OneTimeProof => {
                self.engine
                    .add_output(return_address, credential_utxo.value.clone(), None);
            }
            VerificationPolicy::Preserving => {
                self.engine.add_output(
                    &self.script_address,
                    credential_utxo.value.clone(),
                    Some(datum.to_plutus()),
                );
            }
        }
        self.engine.require_signer(&datum.holder);
        Ok(self.engine.finalize().await?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assembler::{PreconditionViolation, RecordingAssembler};
    use crate::chain::Outpoint;
    use crate::credentials::validity;

    const SCRIPT_ADDR: &str = "addr_test1wcredentials";
    const SCRIPT_CBOR: &str = "5901440100cc30";

    fn builder() -> CredentialsBuilder<RecordingAssembler> {
        CredentialsBuilder::with(RecordingAssembler::new(), SCRIPT_ADDR, SCRIPT_CBOR)
    }

    fn datum() -> CredentialDatum {
        CredentialDatum::issue(
            KeyHash::from("401de4"),
            KeyHash::from("155e04"),
            CredentialType::Certification,
            "ipfs://QmCert",
            Timestamp::from_millis(1_700_000_000_000),
            validity::ONE_YEAR,
        )
    }

    fn locked_utxo(datum: &CredentialDatum) -> Utxo {
        Utxo {
            outpoint: Outpoint::new("ee55", 0),
            address: SCRIPT_ADDR.to_owned(),
            value: vec![Asset::lovelace(Lovelace::from(2_000_000u64))],
            datum: Some(datum.to_plutus().into()),
        }
    }

    #[tokio::test]
    async fn issue_computes_expiry_and_requires_issuer() {
        let mut builder = builder();
        builder
            .issue_credential(
                KeyHash::from("401de4"),
                KeyHash::from("155e04"),
                CredentialType::Certification,
                "ipfs://QmCert",
                Timestamp::from_millis(1_700_000_000_000),
                validity::ONE_YEAR,
                Lovelace::from(2_000_000u64),
            )
            .await
            .unwrap();

        let engine = builder.engine();
        let issued =
            CredentialDatum::from_plutus(&engine.outputs[0].datum.clone().unwrap().into()).unwrap();
        assert_eq!(
            issued.expires_at,
            Timestamp::from_millis(1_700_000_000_000).offset(validity::ONE_YEAR)
        );
        assert!(!issued.revoked);
        assert_eq!(engine.signers, vec![KeyHash::from("155e04")]);
    }

    #[tokio::test]
    async fn revocation_keeps_the_record_on_chain() {
        let datum = datum();
        let utxo = locked_utxo(&datum);
        let mut builder = builder();
        builder.revoke_credential(&utxo, &datum).await.unwrap();

        let engine = builder.engine();
        assert_eq!(engine.outputs[0].address, SCRIPT_ADDR);
        let revoked =
            CredentialDatum::from_plutus(&engine.outputs[0].datum.clone().unwrap().into()).unwrap();
        assert!(revoked.revoked);
        assert_eq!(engine.signers, vec![KeyHash::from("155e04")]);
    }

    #[tokio::test]
    async fn re_revocation_is_refused() {
        let datum = datum().mark_revoked().unwrap();
        let utxo = locked_utxo(&datum);
        let mut builder = builder();
        let err = builder.revoke_credential(&utxo, &datum).await.unwrap_err();
        assert_eq!(
            err,
            BuilderError::Precondition(PreconditionViolation::AlreadyRevoked)
        );
    }

    #[tokio::test]
    async fn consuming_verification_pays_the_holder() {
        let datum = datum();
        let utxo = locked_utxo(&datum);
        let mut builder = builder();
        builder
            .verify_credential(&utxo, &datum, "addr_test1vholder")
            .await
            .unwrap();

        let engine = builder.engine();
        assert_eq!(engine.outputs[0].address, "addr_test1vholder");
        assert_eq!(engine.outputs[0].datum, None);
        assert_eq!(engine.signers, vec![KeyHash::from("401de4")]);
    }

    #[tokio::test]
    async fn preserving_verification_re_locks_the_record() {
        let datum = datum();
        let utxo = locked_utxo(&datum);
        let mut builder = builder().verification_policy(VerificationPolicy::Preserving);
        builder
            .verify_credential(&utxo, &datum, "addr_test1vholder")
            .await
            .unwrap();

        let engine = builder.engine();
        assert_eq!(engine.outputs[0].address, SCRIPT_ADDR);
        let kept =
            CredentialDatum::from_plutus(&engine.outputs[0].datum.clone().unwrap().into()).unwrap();
        assert_eq!(kept, datum);
    }
}
