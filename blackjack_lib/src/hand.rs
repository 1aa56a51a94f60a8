use crate::card::Card;
use serde::{Deserialize, Serialize};

pub const BLACKJACK: u8 = 21;

/// How aces are counted when totalling a hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AceRule {
    /// Every ace counts 11, even when that busts the hand. This is the house rule of the game.
    #[default]
    AlwaysEleven,
    /// Aces drop to 1, one at a time, while the hand would otherwise bust.
    Soft,
}

/// Totals `cards` under `rule`.
pub fn total_of<'a, I: IntoIterator<Item = &'a Card>>(cards: I, rule: AceRule) -> u8 {
    let (mut total, mut aces) = (0u8, 0u8);
    for card in cards {
        total = total.saturating_add(card.point_value());
        if card.is_ace() {
            aces += 1;
        }
    }

    if rule == AceRule::Soft {
        while total > BLACKJACK && aces > 0 {
            total -= 10;
            aces -= 1;
        }
    }
    total
}

/// The cards held by one participant for the current round. Player and dealer hands share this type,
/// the dealer's hole card is simply added face down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
    shown: Vec<bool>,
    total: u8,
    ace_rule: AceRule,
}

impl Hand {
    pub fn new(ace_rule: AceRule) -> Hand {
        Hand {
            cards: Vec::new(),
            shown: Vec::new(),
            total: 0,
            ace_rule,
        }
    }

    /// Method to receive a face up card, updates the total of the hand.
    pub fn add_card(&mut self, card: Card) {
        self.push(card, true);
    }

    /// Method to receive a face down card. It counts towards `total()` but not `revealed_total()`.
    pub fn add_hidden_card(&mut self, card: Card) {
        self.push(card, false);
    }

    fn push(&mut self, card: Card, shown: bool) {
        self.cards.push(card);
        self.shown.push(shown);
        self.total = total_of(&self.cards, self.ace_rule);
    }

    /// Turns every face down card over and returns the cards that were revealed.
    pub fn reveal_all(&mut self) -> Vec<Card> {
        let mut revealed = vec![];
        for (card, shown) in self.cards.iter().zip(self.shown.iter_mut()) {
            if !*shown {
                *shown = true;
                revealed.push(*card);
            }
        }
        revealed
    }

    /// Total of every card in the hand, hidden or not.
    pub fn total(&self) -> u8 {
        self.total
    }

    /// Total of the face up cards, i.e. what the other side of the table can see.
    pub fn revealed_total(&self) -> u8 {
        total_of(self.revealed_cards(), self.ace_rule)
    }

    pub fn is_bust(&self) -> bool {
        self.total > BLACKJACK
    }

    /// The face up cards in the order they were dealt.
    pub fn revealed_view(&self) -> Vec<Card> {
        self.revealed_cards().copied().collect()
    }

    fn revealed_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards
            .iter()
            .zip(self.shown.iter())
            .filter(|(_, shown)| **shown)
            .map(|(card, _)| card)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Hand::new(AceRule::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn card(rank: u8) -> Card {
        Card::new(rank, Suit::Spades).unwrap()
    }

    #[test]
    fn totals_sum_point_values() {
        let mut hand = Hand::default();
        hand.add_card(card(13));
        hand.add_card(card(7));
        assert_eq!(hand.total(), 17);
        assert!(!hand.is_bust());
        hand.add_card(card(5));
        assert_eq!(hand.total(), 22);
        assert!(hand.is_bust());
    }

    #[test]
    fn aces_always_count_eleven_by_default() {
        let mut hand = Hand::default();
        hand.add_card(card(1));
        hand.add_card(card(1));
        assert_eq!(hand.total(), 22);
        assert!(hand.is_bust());

        let mut hand = Hand::default();
        hand.add_card(card(1));
        hand.add_card(card(12));
        assert_eq!(hand.total(), 21);
    }

    #[test]
    fn soft_rule_drops_aces_to_one_when_needed() {
        let mut hand = Hand::new(AceRule::Soft);
        hand.add_card(card(1));
        hand.add_card(card(1));
        assert_eq!(hand.total(), 12);
        hand.add_card(card(9));
        assert_eq!(hand.total(), 21);
        hand.add_card(card(10));
        assert_eq!(hand.total(), 21);
        hand.add_card(card(2));
        assert_eq!(hand.total(), 23);
        assert!(hand.is_bust());
    }

    #[test]
    fn hole_card_is_hidden_until_revealed() {
        let mut dealer = Hand::default();
        dealer.add_card(card(10));
        dealer.add_hidden_card(card(9));
        assert_eq!(dealer.total(), 19);
        assert_eq!(dealer.revealed_total(), 10);
        assert_eq!(dealer.revealed_view(), vec![card(10)]);

        assert_eq!(dealer.reveal_all(), vec![card(9)]);
        assert_eq!(dealer.revealed_total(), 19);
        assert_eq!(dealer.revealed_view(), vec![card(10), card(9)]);
        assert!(dealer.reveal_all().is_empty());
    }
}
