// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Surrogate identifiers for stored records

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Surrogate key of a radio unit
    AssetId
);
define_id!(
    /// Surrogate key of a registered person
    PersonId
);
define_id!(
    /// Surrogate key of a loan episode
    LoanId
);
define_id!(
    /// Surrogate key of a maintenance episode
    MaintenanceId
);
define_id!(TeamId);
define_id!(CenterId);

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
