use crate::{Card, RoundPhase};

/// Presentation hooks. The round controller calls these synchronously after
/// every state change and ignores whatever the implementation does with them.
pub trait TableObserver {
    /// `dealer_value` covers only the up card while the hole card is hidden.
    fn on_hands_changed(
        &mut self,
        _player: &[Card],
        _player_value: u8,
        _dealer: &[Card],
        _dealer_value: u8,
        _dealer_hole_hidden: bool,
    ) {
    }

    fn on_message(&mut self, _text: &str) {}

    fn on_bankroll_changed(&mut self, _amount: u64) {}

    fn on_bet_changed(&mut self, _amount: u64) {}

    fn on_round_phase_changed(&mut self, _phase: RoundPhase) {}
}

/// Headless play.
impl TableObserver for () {}
