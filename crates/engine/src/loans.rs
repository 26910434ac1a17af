// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loan ledger queries and comment edits

use crate::directory::Directory;
use crate::error::EngineError;
use crate::runtime::{normalize_comment, Engine};
use rp_core::{AssetId, Clock, HistoryFilter, LoanEpisode, LoanId, Operation, PersonId};

impl<C: Clock, D: Directory> Engine<C, D> {
    pub fn get_loan(&self, id: LoanId) -> Result<LoanEpisode, EngineError> {
        self.store
            .read(|s| s.loans.get(&id).cloned())
            .ok_or_else(|| EngineError::not_found("loan", id))
    }

    /// Replace the comment of a loan, open or closed. Dates are never touched.
    pub fn set_loan_comment(
        &self,
        id: LoanId,
        comment: Option<String>,
    ) -> Result<LoanEpisode, EngineError> {
        let loan = self.store.commit(|state| -> Result<_, EngineError> {
            let mut loan = state
                .loans
                .get(&id)
                .cloned()
                .ok_or_else(|| EngineError::not_found("loan", id))?;
            let comment = normalize_comment(comment);
            loan.comment = comment.clone();
            Ok((Operation::LoanComment { id, comment }, loan))
        })?;
        tracing::info!(loan = %loan.id, "loan comment updated");
        Ok(loan)
    }

    pub fn active_loan_for(&self, asset_id: AssetId) -> Result<Option<LoanEpisode>, EngineError> {
        self.store.read(|s| {
            if !s.assets.contains_key(&asset_id) {
                return Err(EngineError::not_found("asset", asset_id));
            }
            Ok(s.open_loan_for(asset_id).cloned())
        })
    }

    pub fn active_loans_for(&self, person_id: PersonId) -> Result<Vec<LoanEpisode>, EngineError> {
        self.store.read(|s| {
            if !s.people.contains_key(&person_id) {
                return Err(EngineError::not_found("person", person_id));
            }
            Ok(s.open_loans_for_person(person_id).cloned().collect())
        })
    }

    /// Loans matching `filter`, newest first
    pub fn loan_history(&self, filter: &HistoryFilter) -> Vec<LoanEpisode> {
        self.store.read(|s| filter.apply(s.loans.values()))
    }
}

#[cfg(test)]
#[path = "loans_tests.rs"]
mod tests;
