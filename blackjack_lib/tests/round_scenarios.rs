use blackjack_lib::prelude::*;
use blackjack_lib::{NoShuffle, PresetOrder, Reason, RoundReport, ScriptedConsole};
use std::time::Duration;

fn card(rank: u8, suit: Suit) -> Card {
    Card::new(rank, suit).unwrap()
}

/// Plays a single round from a shoe stacked with `deal`, cards going player, dealer, player, dealer
/// and then to whoever draws next.
fn play_stacked(
    deal: Vec<Card>,
    answers: &[&str],
    config: SessionConfig,
) -> (RoundReport, Participant, ScriptedConsole) {
    let mut shoe = Shoe::build();
    shoe.shuffle(&mut PresetOrder::new(deal));
    let mut player = Participant::new("Ada", config.starting_balance);
    let mut console = ScriptedConsole::new(answers.iter().copied());

    let report = RoundEngine::new(&config)
        .play_round(&mut shoe, &mut player, &Participant::dealer(), &mut console)
        .unwrap();
    (report, player, console)
}

#[test]
fn blackjack_on_the_deal_wins_immediately() {
    let deal = vec![
        card(1, Suit::Spades),
        card(9, Suit::Diamonds),
        card(13, Suit::Hearts),
        card(7, Suit::Clubs),
    ];
    let (report, player, console) = play_stacked(deal, &["100"], SessionConfig::default());

    assert_eq!(report.player_cards, vec![card(1, Suit::Spades), card(13, Suit::Hearts)]);
    assert_eq!(report.player_total, 21);
    assert_eq!(report.dealer_total, 9);
    assert_eq!(report.verdict.outcome, Outcome::Win);
    assert_eq!(report.verdict.reason, Reason::PlayerTwentyOne);
    assert_eq!(report.credited, 200);
    assert_eq!(player.balance(), 1100);

    // No hit or stand question, and the hole card was never shown
    assert_eq!(console.prompts.len(), 1);
    assert!(!console.printed("7 of clubs"));
    assert!(console.printed("You win!"));
    assert!(console.printed("Ada's new balance is 900"));
}

#[test]
fn hitting_past_21_loses() {
    let deal = vec![
        card(10, Suit::Spades),
        card(9, Suit::Diamonds),
        card(6, Suit::Hearts),
        card(8, Suit::Clubs),
        card(13, Suit::Clubs),
    ];
    let (report, player, console) = play_stacked(deal, &["100", "h"], SessionConfig::default());

    assert_eq!(report.player_total, 26);
    assert_eq!(report.verdict.outcome, Outcome::Loss);
    assert_eq!(report.verdict.reason, Reason::PlayerBust);
    assert_eq!(report.credited, 0);
    assert_eq!(player.balance(), 900);
    assert!(console.printed("Ada draws the King of clubs"));
    assert!(console.printed("You lose!"));
    assert!(!console.printed("8 of clubs"));
}

#[test]
fn dealer_draws_until_17() {
    let deal = vec![
        card(10, Suit::Spades),
        card(6, Suit::Diamonds),
        card(8, Suit::Hearts),
        card(5, Suit::Clubs),
        card(2, Suit::Spades),
        card(4, Suit::Hearts),
    ];
    let (report, player, console) = play_stacked(deal, &["100", "s"], SessionConfig::default());

    assert_eq!(
        report.dealer_cards,
        vec![
            card(6, Suit::Diamonds),
            card(5, Suit::Clubs),
            card(2, Suit::Spades),
            card(4, Suit::Hearts),
        ]
    );
    assert_eq!(report.dealer_total, 17);
    assert_eq!(report.player_total, 18);
    assert_eq!(report.verdict.reason, Reason::PlayerHigher);
    assert_eq!(player.balance(), 1100);
    assert!(console.printed("Dealer reveals the 5 of clubs"));
    assert!(console.printed("Dealer draws the 2 of spades"));
    assert!(console.printed("Dealer draws the 4 of hearts"));
}

#[test]
fn dealer_wins_ties() {
    let deal = vec![
        card(10, Suit::Spades),
        card(10, Suit::Diamonds),
        card(7, Suit::Hearts),
        card(7, Suit::Clubs),
    ];
    let (report, player, _) = play_stacked(deal, &["50", "s"], SessionConfig::default());

    assert_eq!(report.player_total, 17);
    assert_eq!(report.dealer_total, 17);
    assert_eq!(report.verdict.outcome, Outcome::Loss);
    assert_eq!(report.verdict.reason, Reason::DealerHolds);
    assert_eq!(player.balance(), 950);
}

#[test]
fn dealer_hole_card_making_21_beats_the_player() {
    let deal = vec![
        card(10, Suit::Spades),
        card(1, Suit::Diamonds),
        card(9, Suit::Hearts),
        card(13, Suit::Clubs),
    ];
    let (report, _, _) = play_stacked(deal, &["100", "s"], SessionConfig::default());

    assert_eq!(report.dealer_total, 21);
    assert_eq!(report.dealer_cards.len(), 2);
    assert_eq!(report.verdict.reason, Reason::DealerTwentyOne);
}

#[test]
fn several_hits_then_stand() {
    let deal = vec![
        card(5, Suit::Spades),
        card(10, Suit::Diamonds),
        card(4, Suit::Hearts),
        card(7, Suit::Clubs),
        card(6, Suit::Diamonds),
        card(3, Suit::Spades),
    ];
    let answers = ["10", "h", "H", "stand"];
    let (report, _, console) = play_stacked(deal, &answers, SessionConfig::default());

    assert_eq!(report.player_cards.len(), 4);
    assert_eq!(report.player_total, 18);
    assert_eq!(report.dealer_total, 17);
    assert_eq!(report.verdict.outcome, Outcome::Win);
    // Once after the deal and once per decision
    assert_eq!(console.count_printed("Dealer's total is: 10"), 4);
}

#[test]
fn bad_answers_are_explained_and_asked_again() {
    let deal = vec![
        card(10, Suit::Spades),
        card(10, Suit::Diamonds),
        card(9, Suit::Hearts),
        card(8, Suit::Clubs),
    ];
    let answers = ["lots", "-5", "5000", "100", "maybe", "s"];
    let (report, player, console) = play_stacked(deal, &answers, SessionConfig::default());

    assert_eq!(report.wager, 100);
    assert_eq!(report.verdict.outcome, Outcome::Win);
    assert_eq!(player.balance(), 1100);
    assert_eq!(console.count_printed("Wager must be a positive whole number!"), 2);
    assert_eq!(console.count_printed("Insufficient funds!"), 1);
    assert_eq!(console.count_printed("Answer must be H or S!"), 1);
    assert_eq!(console.remaining_answers(), 0);
}

#[test]
fn aces_count_eleven_unless_configured_soft() {
    let deal = vec![
        card(1, Suit::Spades),
        card(10, Suit::Diamonds),
        card(5, Suit::Hearts),
        card(8, Suit::Clubs),
        card(7, Suit::Spades),
    ];

    let (report, _, _) = play_stacked(deal.clone(), &["100", "h"], SessionConfig::default());
    assert_eq!(report.player_total, 23);
    assert_eq!(report.verdict.reason, Reason::PlayerBust);

    let soft = SessionConfig::new().ace_rule(AceRule::Soft).build();
    let (report, _, _) = play_stacked(deal, &["100", "h", "s"], soft);
    assert_eq!(report.player_total, 13);
    assert_eq!(report.dealer_total, 18);
    assert_eq!(report.verdict.reason, Reason::DealerHolds);
}

#[test]
fn unshuffled_shoe_deals_from_the_top() {
    let mut shoe = Shoe::build();
    shoe.shuffle(&mut NoShuffle);
    let mut player = Participant::new("Ada", 1000);
    let mut console = ScriptedConsole::new(["100", "s"]);

    let report = RoundEngine::new(&SessionConfig::default())
        .play_round(&mut shoe, &mut player, &Participant::dealer(), &mut console)
        .unwrap();

    assert_eq!(report.player_cards, vec![card(13, Suit::Clubs), card(11, Suit::Clubs)]);
    assert_eq!(report.dealer_cards, vec![card(12, Suit::Clubs), card(10, Suit::Clubs)]);
    assert_eq!(report.verdict.reason, Reason::DealerHolds);
    assert_eq!(shoe.len(), 48);
}

#[test]
fn dealt_cards_are_paced() {
    let deal = vec![
        card(10, Suit::Spades),
        card(6, Suit::Diamonds),
        card(8, Suit::Hearts),
        card(5, Suit::Clubs),
        card(2, Suit::Spades),
        card(4, Suit::Hearts),
    ];
    let config = SessionConfig::new()
        .deal_delay(Duration::from_millis(10))
        .build();
    let (_, _, console) = play_stacked(deal, &["100", "s"], config);

    // Up card and two player cards, then the reveal and two dealer draws
    assert_eq!(console.paused, Duration::from_millis(60));
}

#[test]
fn closed_input_is_reported() {
    let mut shoe = Shoe::build();
    let mut player = Participant::new("Ada", 1000);
    let mut console = ScriptedConsole::new(Vec::<String>::new());

    let result = RoundEngine::new(&SessionConfig::default()).play_round(
        &mut shoe,
        &mut player,
        &Participant::dealer(),
        &mut console,
    );
    assert!(matches!(result, Err(BlackjackError::InputClosed)));
    assert_eq!(player.balance(), 1000);
}
