use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One pot tier: an amount and the seats allowed to win it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Seats eligible to win this tier, ascending
    pub eligible: Vec<usize>,
}

/// Pot partitioning for showdown. Tiers are bounded by each distinct
/// commitment level: every player who bet past a tier's floor funds it, but
/// only live players who reached its cap can win it. Folded players fund
/// tiers and are never eligible, so an uncalled overbet forms a final tier
/// whose sole eligible seat simply gets those chips back.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotManager {
    pub pots: Vec<Pot>,
}

impl PotManager {
    /// Build pots from `(seat, total_bet_this_hand, live)` triples, where
    /// `live` means the seat's cards still play.
    pub fn from_contributions(contributions: &[(usize, u32, bool)]) -> Self {
        let mut levels: Vec<u32> = contributions
            .iter()
            .filter(|(_, bet, _)| *bet > 0)
            .map(|(_, bet, _)| *bet)
            .collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::new();
        let mut floor = 0u32;
        for cap in levels {
            let slice = cap - floor;
            let funders = contributions
                .iter()
                .filter(|(_, bet, _)| *bet > floor)
                .count() as u32;
            let mut eligible: Vec<usize> = contributions
                .iter()
                .filter(|(_, bet, live)| *live && *bet >= cap)
                .map(|(seat, _, _)| *seat)
                .collect();
            eligible.sort_unstable();

            let amount = slice * funders;
            if amount > 0 {
                // dead money: a tier funded only by folded seats rolls down
                // into the tier below rather than orphaning chips
                match (eligible.is_empty(), pots.last_mut()) {
                    (true, Some(prev)) => prev.amount += amount,
                    _ => pots.push(Pot { amount, eligible }),
                }
            }
            floor = cap;
        }
        Self { pots }
    }

    /// Main pot is the first tier (everyone is eligible for it).
    pub fn main_pot(&self) -> u32 {
        self.pots.first().map_or(0, |p| p.amount)
    }

    pub fn side_pots(&self) -> &[Pot] {
        self.pots.get(1..).unwrap_or(&[])
    }

    /// Sum over all tiers; must equal the sum of contributions.
    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }

    /// Distribute each tier among its winners. `winners_by_pot[i]` lists the
    /// winning seats of tier `i` in seat order; each tier splits equally
    /// with the integer remainder going to the first listed winner.
    /// Returns seat -> amount won.
    pub fn award(&self, winners_by_pot: &[Vec<usize>]) -> BTreeMap<usize, u32> {
        let mut payouts = BTreeMap::new();
        for (pot, winners) in self.pots.iter().zip(winners_by_pot) {
            if winners.is_empty() {
                continue;
            }
            let share = pot.amount / winners.len() as u32;
            let remainder = pot.amount % winners.len() as u32;
            for (i, seat) in winners.iter().enumerate() {
                let amount = if i == 0 { share + remainder } else { share };
                *payouts.entry(*seat).or_insert(0) += amount;
            }
        }
        payouts
    }
}
