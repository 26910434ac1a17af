// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Present/absent fields for partial updates
//!
//! A patch field is either `Unset` (leave the stored value alone) or `Set`
//! with a new value. Nullable columns use `Field<Option<T>>`, so "clear the
//! value" (`Set(None)`) is distinct from "not supplied" (`Unset`).
//!
//! On the wire an unset field is simply omitted; combine with
//! `#[serde(default, skip_serializing_if = "Field::is_unset")]`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Unset,
    Set(T),
}

impl<T> Field<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Field::Set(_))
    }

    /// Write the new value into `target` if one was supplied
    pub fn apply_to(self, target: &mut T) {
        if let Field::Set(value) = self {
            *target = value;
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Unset => Field::Unset,
            Field::Set(value) => Field::Set(value),
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    /// `None` means "not supplied"; use `Field::Set(None)` to clear a
    /// nullable value.
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Set(v),
            None => Field::Unset,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Set(value) => value.serialize(serializer),
            Field::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Field::Set)
    }
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;
