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

//! Read-only queries over reputation outputs.
//!
//! Completion rates and star ratings are presentational approximations and
//! the only place this module leaves integer arithmetic; nothing here feeds
//! a settlement.

use crate::chain::{DatumReading, KeyHash, Utxo};
use crate::reputation::ReputationDatum;

/// Score the presentational helpers treat as a perfect record.
pub const MAX_DISPLAY_SCORE: i64 = 1_000;

/// Coarse reputation tier used by listings.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Display)]
#[display(Debug)]
pub enum ReputationLevel {
    Novice,
    Beginner,
    Intermediate,
    Expert,
    Elite,
}

pub fn read_datum(utxo: &Utxo) -> DatumReading<ReputationDatum> {
    DatumReading::read(utxo, "reputation", ReputationDatum::from_plutus)
}

/// The single reputation record of a user, if one exists.
pub fn find_by_user<'u>(utxos: &'u [Utxo], user: &KeyHash) -> Option<&'u Utxo> {
    utxos
        .iter()
        .find(|utxo| read_datum(utxo).ok().is_some_and(|datum| &datum.user == user))
}

pub fn find_by_min_score(utxos: &[Utxo], min_score: i64) -> Vec<&Utxo> {
    utxos
        .iter()
        .filter(|utxo| read_datum(utxo).ok().is_some_and(|datum| datum.score >= min_score))
        .collect()
}

pub fn level(score: i64) -> ReputationLevel {
    match score {
        s if s >= 800 => ReputationLevel::Elite,
        s if s >= 600 => ReputationLevel::Expert,
        s if s >= 400 => ReputationLevel::Intermediate,
        s if s >= 200 => ReputationLevel::Beginner,
        _ => ReputationLevel::Novice,
    }
}

/// High-reputation users with a track record qualify for premium listings.
pub fn is_premium_eligible(datum: &ReputationDatum) -> bool {
    datum.score >= 600 && datum.completed_jobs >= 10
}

/// Share of recorded jobs that completed, 0–100. A blank record counts as
/// perfect.
pub fn completion_rate(datum: &ReputationDatum) -> f64 {
    if datum.total_jobs == 0 {
        return 100.0;
    }
    datum.completed_jobs as f64 / datum.total_jobs as f64 * 100.0
}

/// Star rating, 0–5 in tenths: completion rate weighted 70%, score 30%.
pub fn trust_rating(datum: &ReputationDatum) -> f64 {
    let completion = if datum.total_jobs == 0 {
        1.0
    } else {
        datum.completed_jobs as f64 / datum.total_jobs as f64
    };
    let score = (datum.score as f64 / MAX_DISPLAY_SCORE as f64).clamp(0.0, 1.0);
    let rating = (completion * 0.7 + score * 0.3) * 5.0;
    (rating * 10.0).round() / 10.0
}
