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

//! Verifiable worker credentials issued on-chain: education, certification,
//! experience and skill records with expiry and revocation.

mod builder;
pub mod reader;

pub use builder::{CredentialsBuilder, VerificationPolicy};

use crate::assembler::PreconditionViolation;
use crate::chain::{KeyHash, Timestamp, MILLIS_PER_DAY};
use crate::data::{MalformedDatumError, PlutusData, TaggedRecord};

/// Validity periods in milliseconds.
pub mod validity {
    use super::MILLIS_PER_DAY;

    pub const fn days(days: i64) -> i64 { days * MILLIS_PER_DAY }

    pub const ONE_YEAR: i64 = days(365);
    pub const TWO_YEARS: i64 = days(730);
    pub const FIVE_YEARS: i64 = days(1825);
    /// Saturating offset never overflows, so "never expires" is the full
    /// timestamp range.
    pub const LIFETIME: i64 = i64::MAX;
}

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[display(Debug)]
pub enum CredentialType {
    Education,
    Certification,
    Experience,
    Skill,
}

impl CredentialType {
    pub const fn to_int(self) -> i128 {
        match self {
            CredentialType::Education => 0,
            CredentialType::Certification => 1,
            CredentialType::Experience => 2,
            CredentialType::Skill => 3,
        }
    }

    pub fn from_int(value: i128) -> Result<Self, MalformedDatumError> {
        match value {
            0 => Ok(CredentialType::Education),
            1 => Ok(CredentialType::Certification),
            2 => Ok(CredentialType::Experience),
            3 => Ok(CredentialType::Skill),
            value => Err(MalformedDatumError::Discriminant {
                kind: "CredentialType",
                value,
            }),
        }
    }
}

/// On-chain state of one issued credential.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CredentialDatum {
    pub holder: KeyHash,
    pub issuer: KeyHash,
    pub credential_type: CredentialType,
    /// Content-addressed reference to the credential document.
    pub credential_hash: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
    /// Write-once true.
    pub revoked: bool,
}

impl CredentialDatum {
    /// Fresh credential valid for `validity_millis` past the issue time.
    pub fn issue(
        holder: KeyHash,
        issuer: KeyHash,
        credential_type: CredentialType,
        credential_hash: impl Into<String>,
        issued_at: Timestamp,
        validity_millis: i64,
    ) -> Self {
        CredentialDatum {
            holder,
            issuer,
            credential_type,
            credential_hash: credential_hash.into(),
            issued_at,
            expires_at: issued_at.offset(validity_millis),
            revoked: false,
        }
    }

    /// Field order is part of the wire contract with the credentials
    /// validator.
    pub fn to_plutus(&self) -> TaggedRecord {
        TaggedRecord::with(0, vec![
            PlutusData::from(self.holder.as_str()),
            PlutusData::from(self.issuer.as_str()),
            PlutusData::Int(self.credential_type.to_int()),
            PlutusData::from(self.credential_hash.as_str()),
            PlutusData::from(self.issued_at.millis()),
            PlutusData::from(self.expires_at.millis()),
            PlutusData::flag(self.revoked),
        ])
    }

    pub fn from_plutus(data: &PlutusData) -> Result<Self, MalformedDatumError> {
        let record = data.as_record()?;
        record.require_fields(7)?;
        Ok(CredentialDatum {
            holder: KeyHash::from(record.text(0)?),
            issuer: KeyHash::from(record.text(1)?),
            credential_type: CredentialType::from_int(record.int(2)?)?,
            credential_hash: record.text(3)?.to_owned(),
            issued_at: Timestamp::from_millis(record.int64(4)?),
            expires_at: Timestamp::from_millis(record.int64(5)?),
            revoked: record.flag(6)?,
        })
    }

    /// Successor state with the write-once revocation flag set.
    pub fn mark_revoked(&self) -> Result<Self, PreconditionViolation> {
        if self.revoked {
            return Err(PreconditionViolation::AlreadyRevoked);
        }
        Ok(CredentialDatum {
            revoked: true,
            ..self.clone()
        })
    }

    /// A credential counts while it is neither revoked nor past expiry.
    pub fn is_valid(&self, now: Timestamp) -> bool { !self.revoked && now <= self.expires_at }

    pub fn is_expired(&self, now: Timestamp) -> bool { now > self.expires_at }
}

/// Action authorizing a spend of the credential output.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum CredentialRedeemer {
    Issue,
    Revoke,
    Verify,
}

impl CredentialRedeemer {
    pub fn to_plutus(&self) -> TaggedRecord {
        match self {
            CredentialRedeemer::Issue => TaggedRecord::tag(0),
            CredentialRedeemer::Revoke => TaggedRecord::tag(1),
            CredentialRedeemer::Verify => TaggedRecord::tag(2),
        }
    }

    pub fn from_plutus(data: &PlutusData) -> Result<Self, MalformedDatumError> {
        let record = data.as_record()?;
        match record.alternative {
            0 => Ok(CredentialRedeemer::Issue),
            1 => Ok(CredentialRedeemer::Revoke),
            2 => Ok(CredentialRedeemer::Verify),
            value => Err(MalformedDatumError::Discriminant {
                kind: "CredentialRedeemer",
                value: value as i128,
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::ThreadRng;
    use rand::Rng;

    use super::*;
    use crate::testutils::hex_string;

    fn arbitrary_type(rng: &mut ThreadRng) -> CredentialType {
        match rng.random_range(0..4) {
            0 => CredentialType::Education,
            1 => CredentialType::Certification,
            2 => CredentialType::Experience,
            _ => CredentialType::Skill,
        }
    }

    fn arbitrary_datum(rng: &mut ThreadRng) -> CredentialDatum {
        let issued_at = Timestamp::from_millis(rng.random_range(0..=i64::MAX / 4));
        CredentialDatum {
            holder: KeyHash::from(hex_string(rng, 56)),
            issuer: KeyHash::from(hex_string(rng, 56)),
            credential_type: arbitrary_type(rng),
            credential_hash: format!("ipfs://{}", hex_string(rng, 32)),
            issued_at,
            expires_at: issued_at.offset(rng.random_range(0..validity::FIVE_YEARS)),
            revoked: rng.random_bool(0.1),
        }
    }

    #[test]
    fn type_mapping_table_is_pinned() {
        assert_eq!(CredentialType::Education.to_int(), 0);
        assert_eq!(CredentialType::Certification.to_int(), 1);
        assert_eq!(CredentialType::Experience.to_int(), 2);
        assert_eq!(CredentialType::Skill.to_int(), 3);
        assert!(CredentialType::from_int(4).is_err());
    }

    #[test]
    fn datum_round_trip() {
        let mut rng = rand::rng();
        for _ in 0..64 {
            let datum = arbitrary_datum(&mut rng);
            let decoded = CredentialDatum::from_plutus(&datum.to_plutus().into()).unwrap();
            assert_eq!(decoded, datum);
        }
    }

    #[test]
    fn redeemer_round_trip() {
        for redeemer in
            [CredentialRedeemer::Issue, CredentialRedeemer::Revoke, CredentialRedeemer::Verify]
        {
            let decoded = CredentialRedeemer::from_plutus(&redeemer.to_plutus().into()).unwrap();
            assert_eq!(decoded, redeemer);
        }
    }

    #[test]
    fn validity_matrix() {
        let issued = Timestamp::from_millis(1_000_000);
        let datum = CredentialDatum::issue(
            KeyHash::from("h1"),
            KeyHash::from("i1"),
            CredentialType::Skill,
            "ipfs://QmSkill",
            issued,
            validity::days(30),
        );
        assert_eq!(datum.expires_at, issued.offset(30 * MILLIS_PER_DAY));

        let before = issued.offset(29 * MILLIS_PER_DAY);
        let at_expiry = datum.expires_at;
        let after = datum.expires_at.offset(1);

        assert!(datum.is_valid(before));
        assert!(datum.is_valid(at_expiry));
        assert!(!datum.is_valid(after));
        assert!(datum.is_expired(after));
        assert!(!datum.is_expired(at_expiry));

        let revoked = datum.mark_revoked().unwrap();
        assert!(!revoked.is_valid(before));
    }

    #[test]
    fn revocation_is_write_once() {
        let datum = CredentialDatum::issue(
            KeyHash::from("h1"),
            KeyHash::from("i1"),
            CredentialType::Education,
            "ipfs://QmDegree",
            Timestamp::from_millis(0),
            validity::ONE_YEAR,
        );
        let revoked = datum.mark_revoked().unwrap();
        assert_eq!(revoked.mark_revoked(), Err(PreconditionViolation::AlreadyRevoked));
    }

    #[test]
    fn lifetime_validity_never_expires() {
        let datum = CredentialDatum::issue(
            KeyHash::from("h1"),
            KeyHash::from("i1"),
            CredentialType::Experience,
            "ipfs://QmWork",
            Timestamp::now(),
            validity::LIFETIME,
        );
        assert!(datum.is_valid(Timestamp::from_millis(i64::MAX)));
    }
}
