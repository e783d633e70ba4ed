use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};
use crate::errors::{GameError, GameResult};

/// Hand categories in ascending strength order. The discriminant is the
/// category ordinal compared before any kicker.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

/// The evaluated strength of one five-card hand.
///
/// `kickers` is the category-specific tiebreak key, most-significant first
/// and zero-padded, so two strengths of the same category compare by plain
/// lexicographic order:
///
/// - straight / straight flush: `[high, 0, 0, 0, 0]` (wheel high = 5)
/// - royal flush: all zeros (royals always tie)
/// - four of a kind: `[quad, kicker, 0, 0, 0]`
/// - full house: `[trips, pair, 0, 0, 0]`
/// - flush / high card: the five ranks descending
/// - three of a kind: `[trips, k1, k2, 0, 0]`
/// - two pair: `[high pair, low pair, kicker, 0, 0]`
/// - one pair: `[pair, k1, k2, k3, 0]`
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    /// The five cards forming the hand, sorted by descending rank.
    pub best_five: [Card; 5],
    pub kickers: [u8; 5],
}

/// Find the best five-card hand among 5 to 7 cards.
///
/// Enumerates every C(n,5) combination (at most 21), evaluates each and
/// keeps the maximum. Pure and deterministic: the same input always yields
/// the same category and tiebreak key.
pub fn evaluate(cards: &[Card]) -> GameResult<HandStrength> {
    if cards.len() < 5 {
        return Err(GameError::InsufficientCards {
            needed: 5,
            available: cards.len(),
        });
    }

    let mut best: Option<HandStrength> = None;
    let mut combo = [cards[0]; 5];
    pick_five(cards, 0, 0, &mut combo, &mut best);
    best.ok_or(GameError::InsufficientCards {
        needed: 5,
        available: cards.len(),
    })
}

fn pick_five(
    cards: &[Card],
    start: usize,
    depth: usize,
    combo: &mut [Card; 5],
    best: &mut Option<HandStrength>,
) {
    if depth == 5 {
        let hs = evaluate_five(combo);
        let better = match best {
            Some(b) => compare_hands(&hs, b) == Ordering::Greater,
            None => true,
        };
        if better {
            *best = Some(hs);
        }
        return;
    }
    // keep enough cards in reserve to fill the remaining slots
    for i in start..=cards.len() - (5 - depth) {
        combo[depth] = cards[i];
        pick_five(cards, i + 1, depth + 1, combo, best);
    }
}

/// Evaluate exactly five cards. Category checks run high to low; the first
/// match wins.
pub fn evaluate_five(five: &[Card; 5]) -> HandStrength {
    let mut sorted = *five;
    sorted.sort_unstable_by(|a, b| b.rank.cmp(&a.rank));
    let ranks: [u8; 5] = sorted.map(|c| c.rank as u8);

    let flush = is_flush(&sorted);
    let straight_high = straight_high(&ranks);

    if flush {
        if let Some(high) = straight_high {
            if high == 14 {
                return strength(Category::RoyalFlush, sorted, [0; 5]);
            }
            return strength(Category::StraightFlush, sorted, [high, 0, 0, 0, 0]);
        }
    }

    let mut counts = [0u8; 15];
    for r in ranks {
        counts[r as usize] += 1;
    }

    if let Some((quad, kicker)) = detect_quads(&counts) {
        return strength(Category::FourOfAKind, sorted, [quad, kicker, 0, 0, 0]);
    }
    if let Some((trips, pair)) = detect_full_house(&counts) {
        return strength(Category::FullHouse, sorted, [trips, pair, 0, 0, 0]);
    }
    if flush {
        return strength(Category::Flush, sorted, ranks);
    }
    if let Some(high) = straight_high {
        return strength(Category::Straight, sorted, [high, 0, 0, 0, 0]);
    }

    let (trips, pairs, singles) = classify_multiples(&counts);
    if let Some(&t) = trips.first() {
        return strength(
            Category::ThreeOfAKind,
            sorted,
            [t, singles[0], singles[1], 0, 0],
        );
    }
    if pairs.len() >= 2 {
        return strength(
            Category::TwoPair,
            sorted,
            [pairs[0], pairs[1], singles[0], 0, 0],
        );
    }
    if let Some(&p) = pairs.first() {
        return strength(
            Category::OnePair,
            sorted,
            [p, singles[0], singles[1], singles[2], 0],
        );
    }
    strength(Category::HighCard, sorted, ranks)
}

/// Total order over hand strengths: category ordinal first, then the
/// tiebreak key lexicographically. `Equal` means a true tie (split pot).
pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn strength(category: Category, best_five: [Card; 5], kickers: [u8; 5]) -> HandStrength {
    HandStrength {
        category,
        best_five,
        kickers,
    }
}

fn is_flush(cards: &[Card; 5]) -> bool {
    let suit: Suit = cards[0].suit;
    cards.iter().all(|c| c.suit == suit)
}

/// High card of a five-card straight, or None. Expects ranks sorted
/// descending. The wheel (A-5-4-3-2) counts Ace low and reports 5.
fn straight_high(ranks_desc: &[u8; 5]) -> Option<u8> {
    if ranks_desc == &[14, 5, 4, 3, 2] {
        return Some(5);
    }
    for w in ranks_desc.windows(2) {
        if w[0] != w[1] + 1 {
            return None;
        }
    }
    Some(ranks_desc[0])
}

fn detect_quads(counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut quad = 0u8;
    for r in (2..=14).rev() {
        if counts[r as usize] == 4 {
            quad = r;
            break;
        }
    }
    if quad == 0 {
        return None;
    }
    let mut kicker = 0u8;
    for r in (2..=14).rev() {
        if r != quad && counts[r as usize] > 0 {
            kicker = r;
            break;
        }
    }
    Some((quad, kicker))
}

fn detect_full_house(counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips = 0u8;
    let mut pair = 0u8;
    for r in (2..=14).rev() {
        match counts[r as usize] {
            3 if trips == 0 => trips = r,
            2 if pair == 0 => pair = r,
            _ => {}
        }
    }
    if trips != 0 && pair != 0 {
        Some((trips, pair))
    } else {
        None
    }
}

/// Ranks appearing three, two and one time, each list descending.
fn classify_multiples(counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14).rev() {
        match counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}
