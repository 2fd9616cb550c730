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

use std::iter::Sum;

use serde::{Deserialize, Serialize};

/// Asset unit name under which the native coin appears in a multi-asset
/// value list.
pub const LOVELACE_UNIT: &str = "lovelace";

/// Default minimum amount of native coin every script output must carry.
pub const MIN_UTXO_LOVELACE: Lovelace = Lovelace(2_000_000);

/// Amount of the Cardano native coin, in lovelace.
///
/// All settlement-path arithmetic stays in exact integers; floating point is
/// reserved for presentational ratios which never reach a transaction.
#[derive(
    Wrapper, WrapperMut, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Default, From
)]
#[wrapper(Display, FromStr, Add, Sub)]
#[wrapper_mut(AddAssign, SubAssign)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lovelace(
    #[from]
    #[from(u32)]
    #[from(u16)]
    #[from(u8)]
    u64,
);

impl Lovelace {
    pub const ZERO: Self = Lovelace(0);

    pub fn value(self) -> u64 { self.0 }

    pub fn is_zero(self) -> bool { self.0 == 0 }

    /// Percentage share of an amount, floor division.
    ///
    /// The two shares of a split may sum below the total: the remainder of
    /// `amount * pct / 100` is not returned to either party.
    pub fn share(self, pct: u8) -> Lovelace {
        Lovelace((self.0 as u128 * pct as u128 / 100) as u64)
    }

    pub fn saturating_add(&self, other: impl Into<Self>) -> Self {
        self.0.saturating_add(other.into().0).into()
    }
    pub fn saturating_sub(&self, other: impl Into<Self>) -> Self {
        self.0.saturating_sub(other.into().0).into()
    }

    #[must_use]
    pub fn checked_add(&self, other: impl Into<Self>) -> Option<Self> {
        self.0.checked_add(other.into().0).map(Self)
    }
    #[must_use]
    pub fn checked_sub(&self, other: impl Into<Self>) -> Option<Self> {
        self.0.checked_sub(other.into().0).map(Self)
    }
}

impl Sum<u64> for Lovelace {
    fn sum<I: Iterator<Item = u64>>(iter: I) -> Self {
        iter.fold(Lovelace::ZERO, |sum, value| sum.saturating_add(value))
    }
}

impl Sum for Lovelace {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Lovelace::ZERO, |sum, value| sum.saturating_add(value))
    }
}

/// Single entry of a multi-asset output value.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
#[derive(Serialize, Deserialize)]
pub struct Asset {
    pub unit: String,
    pub quantity: u64,
}

impl Asset {
    pub fn new(unit: impl Into<String>, quantity: u64) -> Self {
        Asset {
            unit: unit.into(),
            quantity,
        }
    }

    pub fn lovelace(amount: Lovelace) -> Self { Asset::new(LOVELACE_UNIT, amount.value()) }

    pub fn is_lovelace(&self) -> bool { self.unit == LOVELACE_UNIT }
}

/// Total native-coin amount held in a multi-asset value list.
pub fn lovelace_of(value: &[Asset]) -> Lovelace {
    value
        .iter()
        .filter(|asset| asset.is_lovelace())
        .map(|asset| asset.quantity)
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn share_is_floor_division() {
        let total = Lovelace::from(100u64);
        assert_eq!(total.share(30), Lovelace::from(30u64));
        assert_eq!(total.share(70), Lovelace::from(70u64));
        assert_eq!(total.share(33), Lovelace::from(33u64));
    }

    #[test]
    fn share_remainder_is_lost() {
        // 33% + 67% of 10 leaves one lovelace unaccounted for.
        let total = Lovelace::from(10u64);
        let client = total.share(33);
        let worker = total.share(67);
        assert_eq!(client, Lovelace::from(3u64));
        assert_eq!(worker, Lovelace::from(6u64));
        assert_eq!(client + worker, Lovelace::from(9u64));
    }

    #[test]
    fn share_of_large_amounts_does_not_overflow() {
        let total = Lovelace::from(u64::MAX);
        assert_eq!(total.share(100), total);
        assert_eq!(total.share(0), Lovelace::ZERO);
    }

    #[test]
    fn lovelace_sum_skips_foreign_assets() {
        let value = vec![
            Asset::lovelace(Lovelace::from(1_500_000u64)),
            Asset::new("d87a9fd8.54727573744769674e4654", 1),
            Asset::lovelace(Lovelace::from(500_000u64)),
        ];
        assert_eq!(lovelace_of(&value), Lovelace::from(2_000_000u64));
    }
}
