//! # holdem-engine: Multi-Player Texas Hold'em Engine Core
//!
//! A deterministic No-Limit Texas Hold'em cash-game engine for 2 to N
//! players: card dealing, hand-strength evaluation and the betting-round
//! state machine, with reproducible seeded shuffles and JSONL hand
//! histories. The engine is single-writer and does no I/O or timing of its
//! own; hosts submit actions through [`engine::Engine::apply_action`] and
//! observe state through snapshots or a [`engine::StateObserver`].
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Poker hand evaluation and strength comparison
//! - [`player`] - Player state, actions and stack management
//! - [`pot`] - Pot partitioning and side-pot handling
//! - [`rules`] - Betting validation and legal-action bounds
//! - [`game`] - Table configuration, stages and the game state snapshot
//! - [`engine`] - The table engine: turn order, streets, showdown
//! - [`logger`] - Hand-history records and JSONL serialization
//! - [`errors`] - Error types for table operations
//!
//! ## Evaluating a hand
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::hand::{evaluate, Category};
//!
//! let cards = [
//!     Card::new(Suit::Hearts, Rank::Ace),
//!     Card::new(Suit::Hearts, Rank::King),
//!     Card::new(Suit::Hearts, Rank::Queen),
//!     Card::new(Suit::Hearts, Rank::Jack),
//!     Card::new(Suit::Hearts, Rank::Ten),
//!     Card::new(Suit::Clubs, Rank::Two),
//!     Card::new(Suit::Diamonds, Rank::Three),
//! ];
//! let strength = evaluate(&cards).unwrap();
//! assert_eq!(strength.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic dealing
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! // Same seed, same shuffle order
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.deal_card(), b.deal_card());
//! ```
//!
//! ## Running a hand
//!
//! ```rust
//! use holdem_engine::engine::Engine;
//! use holdem_engine::game::TableConfig;
//! use holdem_engine::player::PlayerAction;
//!
//! let mut table = Engine::new_with_seed(TableConfig::default(), 7);
//! table.seat_player("alice", "Alice", 0, 2_000).unwrap();
//! table.seat_player("bob", "Bob", 1, 2_000).unwrap();
//! table.start_hand().unwrap();
//!
//! // heads-up: the dealer posts the small blind and acts first
//! let actor = table.state().actor_seat.unwrap();
//! let id = table.state().player_at(actor).unwrap().id.clone();
//! table.apply_action(&id, PlayerAction::Call).unwrap();
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
