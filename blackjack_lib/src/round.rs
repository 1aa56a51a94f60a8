//! Module that plays a single hand of blackjack, from the wager to the payout.
//!
//! A round moves through `Betting -> InitialDeal -> PlayerDecision -> DealerPlay -> Settled`, any
//! step may jump straight to `Settled` once the win rule produces a verdict. The state of the hand
//! lives in a `RoundState` owned by the round and dropped when it is settled.

use crate::card::Card;
use crate::config::SessionConfig;
use crate::console::Console;
use crate::error::Result;
use crate::hand::{AceRule, Hand};
use crate::participant::Participant;
use crate::prompt::{self, Decision};
use crate::rules::{self, Reason, Verdict, DEALER_STANDS_ON};
use crate::shoe::Shoe;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where a round currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    Betting,
    InitialDeal,
    PlayerDecision,
    DealerPlay,
    Settled(Verdict),
}

/// Everything that changes while a single hand is played.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub phase: RoundPhase,
    pub wager: u32,
    pub player_hand: Hand,
    pub dealer_hand: Hand,
}

impl RoundState {
    pub fn new(ace_rule: AceRule) -> RoundState {
        RoundState {
            phase: RoundPhase::Betting,
            wager: 0,
            player_hand: Hand::new(ace_rule),
            dealer_hand: Hand::new(ace_rule),
        }
    }

    pub fn player_total(&self) -> u8 {
        self.player_hand.total()
    }

    /// The dealer's total as far as the player can see it.
    pub fn dealer_total(&self) -> u8 {
        self.dealer_hand.revealed_total()
    }

    /// Applies the win rule to what is currently on the table.
    pub fn judge(&self) -> Option<Verdict> {
        rules::judge(self.player_total(), self.dealer_total())
    }
}

/// What happened in a settled round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub wager: u32,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Card>,
    pub player_total: u8,
    pub dealer_total: u8,
    pub verdict: Verdict,
    pub credited: u32,
    pub balance: u32,
}

/// Plays rounds of blackjack between a player and the dealer.
#[derive(Clone, Debug)]
pub struct RoundEngine {
    ace_rule: AceRule,
    deal_delay: Duration,
    max_attempts: u32,
}

impl RoundEngine {
    pub fn new(config: &SessionConfig) -> RoundEngine {
        RoundEngine {
            ace_rule: config.ace_rule,
            deal_delay: config.deal_delay,
            max_attempts: config.max_attempts,
        }
    }

    /// Plays one complete round with cards from `shoe`, which should be freshly built and shuffled.
    /// The player's wager is taken from their balance and any winnings are paid back before returning.
    /// A round that fails before its verdict returns the wager to the player along with the error.
    pub fn play_round<C: Console + ?Sized>(
        &self,
        shoe: &mut Shoe,
        player: &mut Participant,
        dealer: &Participant,
        console: &mut C,
    ) -> Result<RoundReport> {
        let mut state = RoundState::new(self.ace_rule);
        info!(player = %player.name(), balance = player.balance(), "round started");

        match self.advance(&mut state, shoe, player, dealer, console) {
            Ok(verdict) => Ok(self.settle(state, verdict, player, console)),
            Err(e) => {
                self.refund(&state, player, console);
                Err(e)
            }
        }
    }

    /// Steps through the phases until the round has a verdict.
    fn advance<C: Console + ?Sized>(
        &self,
        state: &mut RoundState,
        shoe: &mut Shoe,
        player: &mut Participant,
        dealer: &Participant,
        console: &mut C,
    ) -> Result<Verdict> {
        loop {
            state.phase = match state.phase {
                RoundPhase::Betting => self.take_wager(state, player, console)?,
                RoundPhase::InitialDeal => self.initial_deal(state, shoe, player, dealer, console)?,
                RoundPhase::PlayerDecision => self.player_decision(state, shoe, player, console)?,
                RoundPhase::DealerPlay => self.dealer_play(state, shoe, dealer, console)?,
                RoundPhase::Settled(verdict) => return Ok(verdict),
            };
            debug!(phase = ?state.phase, "round advanced");
        }
    }

    /// Gives back the wager of a round that ended without a verdict.
    fn refund<C: Console + ?Sized>(
        &self,
        state: &RoundState,
        player: &mut Participant,
        console: &mut C,
    ) {
        if state.wager == 0 {
            return;
        }
        player.deposit(state.wager);
        console.print_line(&format!(
            "Round abandoned, {}'s wager of {} is returned. Balance is now {}",
            player.name(),
            state.wager,
            player.balance()
        ));
        warn!(
            wager = state.wager,
            phase = ?state.phase,
            balance = player.balance(),
            "round abandoned, wager refunded"
        );
    }

    /// Asks for a wager until a valid one is placed.
    fn take_wager<C: Console + ?Sized>(
        &self,
        state: &mut RoundState,
        player: &mut Participant,
        console: &mut C,
    ) -> Result<RoundPhase> {
        console.print_line(&format!(
            "{}'s current balance is {}",
            player.name(),
            player.balance()
        ));
        let question = format!("How much would {} like to bet: ", player.name());
        state.wager = prompt::ask(console, &question, self.max_attempts, |answer| {
            player.place_wager(answer)
        })?;
        console.print_line(&format!(
            "{}'s new balance is {}",
            player.name(),
            player.balance()
        ));
        info!(wager = state.wager, balance = player.balance(), "wager accepted");
        Ok(RoundPhase::InitialDeal)
    }

    /// Deals two cards each, player first. The dealer's second card stays face down.
    fn initial_deal<C: Console + ?Sized>(
        &self,
        state: &mut RoundState,
        shoe: &mut Shoe,
        player: &Participant,
        dealer: &Participant,
        console: &mut C,
    ) -> Result<RoundPhase> {
        for _ in 0..2 {
            state.player_hand.add_card(shoe.draw()?);
            if state.dealer_hand.is_empty() {
                state.dealer_hand.add_card(shoe.draw()?);
            } else {
                state.dealer_hand.add_hidden_card(shoe.draw()?);
            }
        }
        debug!(
            player_cards = ?state.player_hand.cards(),
            dealer_up_card = ?state.dealer_hand.revealed_view(),
            "initial deal"
        );

        redraw(console);
        console.print_line(&format!("{}'s hand:", dealer.name()));
        self.show_cards(console, &state.dealer_hand.revealed_view(), true);
        console.print_line(&format!(
            "{}'s total is: {}",
            dealer.name(),
            state.dealer_total()
        ));
        console.print_line(&format!("{}'s hand:", player.name()));
        self.show_cards(console, state.player_hand.cards(), true);
        console.print_line(&format!(
            "{}'s total is: {}",
            player.name(),
            state.player_total()
        ));

        Ok(self.after_cards_dealt(state, RoundPhase::PlayerDecision))
    }

    /// One hit or stand decision by the player.
    fn player_decision<C: Console + ?Sized>(
        &self,
        state: &mut RoundState,
        shoe: &mut Shoe,
        player: &Participant,
        console: &mut C,
    ) -> Result<RoundPhase> {
        redraw(console);
        console.print_line(&format!("Dealer's total is: {}", state.dealer_total()));
        self.show_cards(console, &state.dealer_hand.revealed_view(), false);
        console.print_line(&format!(
            "{}'s total is: {}",
            player.name(),
            state.player_total()
        ));
        self.show_cards(console, state.player_hand.cards(), false);

        let decision = prompt::ask(
            console,
            "Hit or stand(H/S): ",
            self.max_attempts,
            prompt::parse_decision,
        )?;
        debug!(%decision, "player decided");

        match decision {
            Decision::Stand => Ok(RoundPhase::DealerPlay),
            Decision::Hit => {
                let card = shoe.draw()?;
                state.player_hand.add_card(card);
                console.print_line(&format!("{} draws the {}", player.name(), card));
                console.pause(self.deal_delay);
                debug!(%card, total = state.player_total(), "player hit");
                Ok(self.after_cards_dealt(state, RoundPhase::PlayerDecision))
            }
        }
    }

    /// Turns over the hole card and draws until the dealer reaches 17.
    fn dealer_play<C: Console + ?Sized>(
        &self,
        state: &mut RoundState,
        shoe: &mut Shoe,
        dealer: &Participant,
        console: &mut C,
    ) -> Result<RoundPhase> {
        for card in state.dealer_hand.reveal_all() {
            console.print_line(&format!("{} reveals the {}", dealer.name(), card));
            console.pause(self.deal_delay);
        }

        while state.dealer_total() < DEALER_STANDS_ON {
            let card = shoe.draw()?;
            state.dealer_hand.add_card(card);
            console.print_line(&format!("{} draws the {}", dealer.name(), card));
            console.pause(self.deal_delay);
            debug!(%card, total = state.dealer_total(), "dealer drew");
        }
        console.print_line(&format!(
            "{}'s total is: {}",
            dealer.name(),
            state.dealer_total()
        ));

        Ok(RoundPhase::Settled(rules::showdown(
            state.player_total(),
            state.dealer_total(),
        )))
    }

    /// Checks the win rule after new cards hit the table, moving on to `otherwise` if nobody has won yet.
    fn after_cards_dealt(&self, state: &RoundState, otherwise: RoundPhase) -> RoundPhase {
        match state.judge() {
            Some(verdict) => {
                debug!(?verdict, "hand decided");
                RoundPhase::Settled(verdict)
            }
            None => otherwise,
        }
    }

    fn settle<C: Console + ?Sized>(
        &self,
        state: RoundState,
        verdict: Verdict,
        player: &mut Participant,
        console: &mut C,
    ) -> RoundReport {
        console.print_line(&verdict.to_string());
        console.print_line(&describe(&verdict, &state, player.name()));

        let credited = player.settle(verdict.outcome, state.wager);
        if verdict.player_wins() {
            console.print_line(&format!(
                "{} wins {}. Balance is now {}",
                player.name(),
                credited,
                player.balance()
            ));
        } else {
            console.print_line(&format!(
                "{} loses {}. Balance is now {}",
                player.name(),
                state.wager,
                player.balance()
            ));
        }
        info!(
            outcome = ?verdict.outcome,
            reason = ?verdict.reason,
            player_total = state.player_total(),
            dealer_total = state.dealer_total(),
            wager = state.wager,
            credited,
            balance = player.balance(),
            "round settled"
        );

        RoundReport {
            wager: state.wager,
            player_cards: state.player_hand.cards().to_vec(),
            dealer_cards: state.dealer_hand.cards().to_vec(),
            player_total: state.player_total(),
            dealer_total: state.dealer_total(),
            verdict,
            credited,
            balance: player.balance(),
        }
    }

    /// Prints `cards`, pausing after each one when `paced` is set.
    fn show_cards<C: Console + ?Sized>(&self, console: &mut C, cards: &[Card], paced: bool) {
        for card in cards {
            console.print_line(&card.display_name());
            if paced {
                console.pause(self.deal_delay);
            }
        }
    }
}

fn redraw<C: Console + ?Sized>(console: &mut C) {
    console.clear_screen();
    console.print_banner();
}

fn describe(verdict: &Verdict, state: &RoundState, player_name: &str) -> String {
    match verdict.reason {
        Reason::DealerTwentyOne => "Dealer has 21.".to_string(),
        Reason::PlayerBust => format!("{} busts with {}.", player_name, state.player_total()),
        Reason::PlayerTwentyOne => format!("{} has 21!", player_name),
        Reason::DealerBust => format!("Dealer busts with {}.", state.dealer_total()),
        Reason::DealerHolds => format!(
            "Dealer's {} beats or ties {}'s {}.",
            state.dealer_total(),
            player_name,
            state.player_total()
        ),
        Reason::PlayerHigher => format!(
            "{}'s {} beats the dealer's {}.",
            player_name,
            state.player_total(),
            state.dealer_total()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;
    use crate::console::ScriptedConsole;
    use crate::error::BlackjackError;
    use crate::shoe::PresetOrder;

    fn card(rank: u8, suit: Suit) -> Card {
        Card::new(rank, suit).unwrap()
    }

    #[test]
    fn new_round_starts_in_betting() {
        let state = RoundState::new(AceRule::AlwaysEleven);
        assert_eq!(state.phase, RoundPhase::Betting);
        assert_eq!(state.wager, 0);
        assert!(state.player_hand.is_empty());
        assert_eq!(state.judge(), None);
    }

    #[test]
    fn hole_card_is_left_out_of_the_dealer_total() {
        let mut state = RoundState::new(AceRule::AlwaysEleven);
        state.player_hand.add_card(card(10, Suit::Hearts));
        state.player_hand.add_card(card(6, Suit::Hearts));
        state.dealer_hand.add_card(card(9, Suit::Spades));
        state.dealer_hand.add_hidden_card(card(12, Suit::Spades));
        assert_eq!(state.dealer_total(), 9);
        assert_eq!(state.judge(), None);

        state.dealer_hand.reveal_all();
        assert_eq!(state.dealer_total(), 19);
        assert_eq!(state.judge().unwrap().reason, Reason::DealerHolds);
    }

    #[test]
    fn engine_settles_and_pays() {
        let mut shoe = Shoe::build();
        shoe.shuffle(&mut PresetOrder::new(vec![
            card(10, Suit::Spades),
            card(5, Suit::Diamonds),
            card(10, Suit::Hearts),
            card(10, Suit::Clubs),
            card(9, Suit::Clubs),
        ]));
        let mut player = Participant::new("Ada", 500);
        let mut console = ScriptedConsole::new(["250", "s"]);

        let report = RoundEngine::new(&SessionConfig::default())
            .play_round(&mut shoe, &mut player, &Participant::dealer(), &mut console)
            .unwrap();

        assert_eq!(report.dealer_total, 24);
        assert_eq!(report.verdict.reason, Reason::DealerBust);
        assert_eq!(report.credited, 500);
        assert_eq!(player.balance(), 750);
        assert!(console.printed("Dealer busts with 24."));
        assert!(console.printed("Ada wins 500. Balance is now 750"));
    }

    #[test]
    fn losing_message_names_the_wager() {
        let mut state = RoundState::new(AceRule::AlwaysEleven);
        state.wager = 40;
        state.player_hand.add_card(card(10, Suit::Hearts));
        state.player_hand.add_card(card(10, Suit::Spades));
        state.player_hand.add_card(card(5, Suit::Spades));
        let verdict = state.judge().unwrap();
        assert_eq!(describe(&verdict, &state, "Ada"), "Ada busts with 25.");

        let mut player = Participant::new("Ada", 60);
        let mut console = ScriptedConsole::default();
        let report = RoundEngine::new(&SessionConfig::default()).settle(
            state,
            verdict,
            &mut player,
            &mut console,
        );
        assert_eq!(report.balance, 60);
        assert!(console.printed("Ada loses 40. Balance is now 60"));
    }

    #[test]
    fn wager_is_returned_when_input_closes_mid_round() {
        let mut shoe = Shoe::build();
        shoe.shuffle(&mut PresetOrder::new(vec![
            card(10, Suit::Spades),
            card(9, Suit::Diamonds),
            card(6, Suit::Hearts),
            card(8, Suit::Clubs),
        ]));
        let mut player = Participant::new("Ada", 1000);
        let mut console = ScriptedConsole::new(["100"]);

        let result = RoundEngine::new(&SessionConfig::default()).play_round(
            &mut shoe,
            &mut player,
            &Participant::dealer(),
            &mut console,
        );
        assert!(matches!(result, Err(BlackjackError::InputClosed)));
        assert_eq!(player.balance(), 1000);
        assert!(console.printed("Ada's new balance is 900"));
        assert!(console.printed(
            "Round abandoned, Ada's wager of 100 is returned. Balance is now 1000"
        ));
    }
}
