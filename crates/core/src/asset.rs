// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Radio unit records

use crate::code::Code;
use crate::id::AssetId;
use crate::patch::Field;
use crate::validation::{require_text, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive attributes supplied when registering a radio
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetAttributes {
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub geolocatable: bool,
}

impl AssetAttributes {
    pub fn new(brand: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            serial: None,
            geolocatable: false,
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }

    pub fn geolocatable(mut self, geolocatable: bool) -> Self {
        self.geolocatable = geolocatable;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("brand", &self.brand)?;
        require_text("model", &self.model)?;
        Ok(())
    }
}

/// A registered radio unit
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub code: Code,
    pub brand: String,
    pub model: String,
    pub serial: Option<String>,
    pub geolocatable: bool,
    /// Cached projection of "an open maintenance episode exists"
    in_maintenance: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(id: AssetId, code: Code, attributes: AssetAttributes, at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            brand: attributes.brand,
            model: attributes.model,
            serial: attributes.serial,
            geolocatable: attributes.geolocatable,
            in_maintenance: false,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn in_maintenance(&self) -> bool {
        self.in_maintenance
    }

    /// Recompute the cached maintenance flag from ledger facts
    ///
    /// Only state replay calls this, with the result of an open-episode
    /// lookup. There is no patch field for the flag.
    pub fn sync_maintenance_flag(&mut self, open_episode_exists: bool) {
        self.in_maintenance = open_episode_exists;
    }

    /// `brand model` label used by listings and labels
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// Partial update of an asset's descriptive attributes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPatch {
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub brand: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub model: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub serial: Field<Option<String>>,
    #[serde(default, skip_serializing_if = "Field::is_unset")]
    pub geolocatable: Field<bool>,
}

impl AssetPatch {
    pub fn is_empty(&self) -> bool {
        self.brand.is_unset()
            && self.model.is_unset()
            && self.serial.is_unset()
            && self.geolocatable.is_unset()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Field::Set(brand) = &self.brand {
            require_text("brand", brand)?;
        }
        if let Field::Set(model) = &self.model {
            require_text("model", model)?;
        }
        Ok(())
    }

    pub fn apply(self, asset: &mut Asset, at: DateTime<Utc>) {
        self.brand.apply_to(&mut asset.brand);
        self.model.apply_to(&mut asset.model);
        self.serial.apply_to(&mut asset.serial);
        self.geolocatable.apply_to(&mut asset.geolocatable);
        asset.updated_at = at;
    }
}

#[cfg(test)]
#[path = "asset_tests.rs"]
mod tests;
