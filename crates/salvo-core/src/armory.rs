//! Per-player weapon inventory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::WeaponKind;
use crate::error::{SalvoError, SalvoResult};

/// Remaining copies of one weapon kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ammo {
    Unlimited,
    Finite(u32),
}

impl Ammo {
    pub fn is_empty(&self) -> bool {
        matches!(self, Ammo::Finite(0))
    }
}

impl std::fmt::Display for Ammo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ammo::Unlimited => write!(f, "[∞]"),
            Ammo::Finite(n) => write!(f, "[{n}]"),
        }
    }
}

/// Mapping from weapon kind to remaining count.
///
/// Every kind always has an entry. Counts never go negative and unlimited
/// entries are never decremented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armory {
    counts: BTreeMap<WeaponKind, Ammo>,
}

impl Default for Armory {
    /// Unlimited baby missiles, nothing else.
    fn default() -> Self {
        let mut counts = BTreeMap::new();
        for kind in WeaponKind::ALL {
            counts.insert(kind, Ammo::Finite(0));
        }
        counts.insert(WeaponKind::BabyMissile, Ammo::Unlimited);
        Self { counts }
    }
}

impl Armory {
    /// Build an armory from explicit counts; kinds not listed start empty.
    pub fn from_counts(entries: impl IntoIterator<Item = (WeaponKind, Ammo)>) -> Self {
        let mut armory = Self {
            counts: WeaponKind::ALL.iter().map(|k| (*k, Ammo::Finite(0))).collect(),
        };
        armory.counts.extend(entries);
        armory
    }

    pub fn count(&self, kind: WeaponKind) -> Ammo {
        self.counts.get(&kind).copied().unwrap_or(Ammo::Finite(0))
    }

    pub fn is_unlimited(&self, kind: WeaponKind) -> bool {
        self.count(kind) == Ammo::Unlimited
    }

    pub fn has(&self, kind: WeaponKind) -> bool {
        !self.count(kind).is_empty()
    }

    /// All entries in cycling order.
    pub fn iter(&self) -> impl Iterator<Item = (WeaponKind, Ammo)> + '_ {
        self.counts.iter().map(|(k, a)| (*k, *a))
    }

    /// The kind after `cur`, regardless of remaining count.
    pub fn next_weapon(&self, cur: WeaponKind) -> WeaponKind {
        cur.next()
    }

    /// The kind before `cur`, regardless of remaining count.
    pub fn prev_weapon(&self, cur: WeaponKind) -> WeaponKind {
        cur.prev()
    }

    /// Add purchased copies. Unlimited entries stay unlimited.
    pub fn add(&mut self, kind: WeaponKind, amount: u32) {
        let entry = self.counts.entry(kind).or_insert(Ammo::Finite(0));
        if let Ammo::Finite(n) = entry {
            *n = n.saturating_add(amount);
        }
    }

    /// Consume one copy of `kind` and return the kind that should be selected
    /// afterwards.
    ///
    /// Firing an empty kind is refused without mutation. When the last copy is
    /// used, selection advances forward to the next kind that still has ammo;
    /// if nothing has ammo the spent kind stays selected.
    pub fn use_weapon(&mut self, kind: WeaponKind) -> SalvoResult<WeaponKind> {
        match self.count(kind) {
            Ammo::Unlimited => Ok(kind),
            Ammo::Finite(0) => Err(SalvoError::OutOfAmmo(kind)),
            Ammo::Finite(n) => {
                self.counts.insert(kind, Ammo::Finite(n - 1));
                if n > 1 {
                    return Ok(kind);
                }
                let mut candidate = kind.next();
                while candidate != kind {
                    if self.has(candidate) {
                        tracing::debug!(spent = ?kind, selected = ?candidate, "weapon exhausted");
                        return Ok(candidate);
                    }
                    candidate = candidate.next();
                }
                Ok(kind)
            }
        }
    }
}
