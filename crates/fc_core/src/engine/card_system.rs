//! Card tracking with ejection support (yellow accumulation + red cards).
//!
//! Driven from foul events: every foul maps to a card, and a second yellow
//! escalates to ejection. The escalation lives here, outside the collision
//! system proper, so the detector stays a pure classifier.

use std::collections::{BTreeMap, BTreeSet};

use crate::engine::events::{CardType, DisciplineRecord, FoulType};
use crate::engine::state::PlayerId;

#[derive(Debug, Default)]
pub struct CardSystem {
    yellow_cards: BTreeMap<PlayerId, u8>,
    ejected: BTreeSet<PlayerId>,
}

impl CardSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a foul against `player` and return the resulting discipline
    /// record. Two yellows escalate to ejection; dangerous play ejects
    /// outright.
    pub fn record_foul(&mut self, player: PlayerId, foul: FoulType) -> DisciplineRecord {
        let card = foul.card();
        let ejected = match card {
            CardType::Yellow => {
                let count = {
                    let entry = self.yellow_cards.entry(player).or_insert(0);
                    *entry = entry.saturating_add(1);
                    *entry
                };
                if count >= 2 {
                    self.ejected.insert(player);
                    true
                } else {
                    false
                }
            }
            CardType::Red => {
                self.ejected.insert(player);
                true
            }
        };
        DisciplineRecord { player, foul, card, ejected }
    }

    pub fn is_ejected(&self, player: PlayerId) -> bool {
        self.ejected.contains(&player)
    }

    pub fn yellow_count(&self, player: PlayerId) -> u8 {
        self.yellow_cards.get(&player).copied().unwrap_or(0)
    }

    pub fn ejected_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.ejected.iter().copied()
    }
}
