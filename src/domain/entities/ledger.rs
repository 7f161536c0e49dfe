//! Experience ledger - append-only record of grants and spends
//!
//! The ledger is the authoritative source for a character's spendable
//! balance. Balance is a fold over entry deltas; each entry also snapshots
//! `balance_after` for fast reads and auditing. The balance is never stored
//! as an independently mutable field that could drift from the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::EngineError;
use crate::domain::value_objects::{CharacterId, LedgerEntryId};

/// One grant or spend of experience
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: LedgerEntryId,
    pub character_id: CharacterId,
    /// Positive for grants, negative for spends
    pub delta: i64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
    /// Running balance after this entry was applied
    pub balance_after: i64,
    /// Cool points awarded alongside this entry, if any
    pub cool_points: u32,
}

/// Append-only experience log for one character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceLedger {
    entries: Vec<LedgerEntry>,
}

impl ExperienceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Current spendable balance: the last entry's snapshot, or 0
    pub fn current_balance(&self) -> i64 {
        self.entries.last().map_or(0, |e| e.balance_after)
    }

    /// Total experience ever granted, spends excluded
    pub fn lifetime_experience(&self) -> i64 {
        self.entries.iter().filter(|e| e.delta > 0).map(|e| e.delta).sum()
    }

    /// Total cool points ever awarded
    pub fn lifetime_cool_points(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.cool_points)).sum()
    }

    /// Append a grant of a positive amount
    pub fn grant(
        &mut self,
        character_id: CharacterId,
        amount: i64,
        reason: impl Into<String>,
    ) -> Result<&LedgerEntry, EngineError> {
        if amount <= 0 {
            return Err(EngineError::InvalidAmount(amount));
        }
        Ok(self.append(character_id, amount, reason.into(), 0))
    }

    /// Append a cool-point award, converted to experience at `xp_per_point`
    pub fn grant_cool_points(
        &mut self,
        character_id: CharacterId,
        points: u32,
        xp_per_point: u32,
        reason: impl Into<String>,
    ) -> Result<&LedgerEntry, EngineError> {
        if points == 0 {
            return Err(EngineError::InvalidAmount(0));
        }
        let delta = i64::from(points) * i64::from(xp_per_point);
        Ok(self.append(character_id, delta, reason.into(), points))
    }

    /// Append a spend, failing if the balance cannot cover it
    pub fn spend(
        &mut self,
        character_id: CharacterId,
        amount: i64,
        reason: impl Into<String>,
    ) -> Result<&LedgerEntry, EngineError> {
        if amount <= 0 {
            return Err(EngineError::InvalidAmount(amount));
        }
        let available = self.current_balance();
        if amount > available {
            return Err(EngineError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        Ok(self.append(character_id, -amount, reason.into(), 0))
    }

    fn append(
        &mut self,
        character_id: CharacterId,
        delta: i64,
        reason: String,
        cool_points: u32,
    ) -> &LedgerEntry {
        let entry = LedgerEntry {
            id: LedgerEntryId::new(),
            character_id,
            delta,
            reason,
            timestamp: Utc::now(),
            balance_after: self.current_balance() + delta,
            cool_points,
        };
        self.entries.push(entry);
        self.entries.last().unwrap()
    }

    /// Check the chain invariant: every `balance_after` equals the previous
    /// snapshot plus the entry's delta, and no committed spend overdraws.
    pub fn verify(&self) -> bool {
        let mut running = 0i64;
        for entry in &self.entries {
            running += entry.delta;
            if entry.balance_after != running || running < 0 {
                return false;
            }
        }
        true
    }
}
