//! Live game session
//!
//! Tracks one interactive game: the player puts coins on the pans, the
//! session reports the outcome from ground truth, narrows the candidate set,
//! and appends to the [`MoveHistory`] that is later handed to the analysis
//! view. Hints come from a planner owned by the session, so its memo table
//! lives exactly as long as the game.

use crate::advice::{explain, Explanation, Hint, Rating};
use crate::candidates::{CandidateSet, CoinIndex};
use crate::error::{EngineResult, SessionError};
use crate::planner::{optimal_weighings, Split, SplitPlanner};
use crate::simulator::validate_game;
use crate::weighing::{MoveHistory, Outcome, Weighing};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// Tunables for a live game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Hints a player may request per game
    pub hint_limit: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig { hint_limit: 3 }
    }
}

/// Result of a final guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    Correct,
    Wrong,
}

/// One interactive game.
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    planner: SplitPlanner,
    candidates: CandidateSet,
    history: MoveHistory,
    attempts: u32,
    hints_used: u32,
    over: bool,
}

impl GameSession {
    pub fn new(total_coins: u32, fake_coin: CoinIndex, config: SessionConfig) -> EngineResult<Self> {
        validate_game(total_coins, fake_coin)?;
        info!(total_coins, hint_limit = config.hint_limit, "new game");
        Ok(GameSession {
            config,
            planner: SplitPlanner::new(),
            candidates: CandidateSet::full(total_coins),
            history: MoveHistory::new(total_coins, fake_coin),
            attempts: 0,
            hints_used: 0,
            over: false,
        })
    }

    pub fn total_coins(&self) -> u32 {
        self.history.total_coins
    }

    /// Coins not yet ruled out.
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Weighings plus wrong guesses.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn hints_left(&self) -> u32 {
        self.config.hint_limit.saturating_sub(self.hints_used)
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Reference count shown next to the attempts counter.
    pub fn optimal_weighings(&self) -> u32 {
        optimal_weighings(self.total_coins())
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn into_history(self) -> MoveHistory {
        self.history
    }

    pub fn eliminated(&self) -> usize {
        self.total_coins() as usize - self.candidates.len()
    }

    /// `log2(N / |candidates|)`.
    pub fn information_gained_bits(&self) -> f64 {
        (self.total_coins() as f64 / self.candidates.len().max(1) as f64).log2()
    }

    /// Performance band, available once the fake coin has been found.
    pub fn rating(&self) -> Option<Rating> {
        self.over
            .then(|| Rating::for_attempts(self.total_coins(), self.attempts))
    }

    /// Weigh `left` against `right`.
    pub fn weigh(&mut self, left: &[CoinIndex], right: &[CoinIndex]) -> Result<Weighing, SessionError> {
        if self.over {
            return Err(SessionError::GameOver);
        }
        if left.is_empty() || right.is_empty() {
            return Err(SessionError::EmptyPan);
        }
        if left.len() != right.len() {
            return Err(SessionError::UnequalPans {
                left: left.len(),
                right: right.len(),
            });
        }
        self.check_pans(left, right)?;

        let outcome = Outcome::observe(left, right, self.history.fake_coin);
        let remaining = outcome.narrow(&self.candidates, left, right);
        self.attempts += 1;

        // Steps count weighings only
        let weighing = Weighing {
            step: self.history.len() as u32 + 1,
            left_pan: left.to_vec(),
            right_pan: right.to_vec(),
            outcome,
            remaining: remaining.clone(),
        };
        info!(
            step = weighing.step,
            %outcome,
            remaining = remaining.len(),
            "weighed coins"
        );
        self.history.push(weighing.clone());
        self.candidates = remaining;
        Ok(weighing)
    }

    fn check_pans(&self, left: &[CoinIndex], right: &[CoinIndex]) -> Result<(), SessionError> {
        let total = self.total_coins();
        let mut seen_left = HashSet::with_capacity(left.len());
        for &coin in left {
            if coin >= total {
                return Err(SessionError::CoinOutOfRange { index: coin, total });
            }
            if !seen_left.insert(coin) {
                return Err(SessionError::DuplicateCoin(coin));
            }
        }
        let mut seen_right = HashSet::with_capacity(right.len());
        for &coin in right {
            if coin >= total {
                return Err(SessionError::CoinOutOfRange { index: coin, total });
            }
            if seen_left.contains(&coin) {
                return Err(SessionError::CoinOnBothPans(coin));
            }
            if !seen_right.insert(coin) {
                return Err(SessionError::DuplicateCoin(coin));
            }
        }
        Ok(())
    }

    /// Make a final guess. A wrong guess costs an attempt; a right one ends the game.
    pub fn guess(&mut self, coin: CoinIndex) -> Result<GuessOutcome, SessionError> {
        if self.over {
            return Err(SessionError::GameOver);
        }
        let total = self.total_coins();
        if coin >= total {
            return Err(SessionError::CoinOutOfRange { index: coin, total });
        }
        if coin == self.history.fake_coin {
            self.over = true;
            self.history.final_guess = Some(coin);
            info!(attempts = self.attempts, hints = self.hints_used, "fake coin found");
            Ok(GuessOutcome::Correct)
        } else {
            self.attempts += 1;
            info!(guess = coin, "wrong guess");
            Ok(GuessOutcome::Wrong)
        }
    }

    /// Planner recommendation for the current candidates. Does not count as a hint.
    pub fn recommendation(&mut self) -> Result<(Split, Explanation), SessionError> {
        let split = self.planner.plan(&self.candidates)?;
        let explanation = explain(&self.candidates, &split);
        Ok((split, explanation))
    }

    /// Memoized subproblems behind this session's recommendations.
    pub fn subproblems_solved(&self) -> usize {
        self.planner.len()
    }

    /// Spend one hint on the next weighing.
    pub fn hint(&mut self) -> Result<Hint, SessionError> {
        if self.over {
            return Err(SessionError::GameOver);
        }
        if self.hints_used >= self.config.hint_limit {
            return Err(SessionError::HintsExhausted(self.config.hint_limit));
        }
        if self.candidates.len() <= 1 {
            return Err(SessionError::AlreadySolved);
        }
        let split = self.planner.plan(&self.candidates)?;
        self.hints_used += 1;
        Ok(Hint::new(&self.candidates, &split))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(total: u32, fake: CoinIndex) -> GameSession {
        GameSession::new(total, fake, SessionConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_game() {
        assert!(GameSession::new(0, 0, SessionConfig::default()).is_err());
        assert!(GameSession::new(3, 3, SessionConfig::default()).is_err());
    }

    #[test]
    fn test_pan_validation() {
        let mut game = session(6, 2);
        assert_eq!(game.weigh(&[], &[1]), Err(SessionError::EmptyPan));
        assert_eq!(
            game.weigh(&[0, 1], &[2]),
            Err(SessionError::UnequalPans { left: 2, right: 1 })
        );
        assert_eq!(game.weigh(&[0, 1], &[1, 2]), Err(SessionError::CoinOnBothPans(1)));
        assert_eq!(game.weigh(&[0, 0], &[1, 2]), Err(SessionError::DuplicateCoin(0)));
        assert_eq!(
            game.weigh(&[0], &[6]),
            Err(SessionError::CoinOutOfRange { index: 6, total: 6 })
        );
        assert_eq!(game.attempts(), 0);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_weighing_narrows_candidates() {
        let mut game = session(6, 2);
        let w = game.weigh(&[0, 1], &[2, 3]).unwrap();
        assert_eq!(w.outcome, Outcome::RightLighter);
        assert_eq!(game.candidates().as_slice(), &[2, 3]);

        let w = game.weigh(&[0], &[1]).unwrap();
        assert_eq!(w.outcome, Outcome::Balanced);
        // Coins already ruled out do not come back
        assert_eq!(game.candidates().as_slice(), &[2, 3]);
        assert_eq!(w.step, 2);
        assert_eq!(game.eliminated(), 4);
        assert!((game.information_gained_bits() - 3.0_f64.log2()).abs() < 1e-12);
    }

    #[test]
    fn test_guessing() {
        let mut game = session(4, 1);
        assert_eq!(game.guess(0), Ok(GuessOutcome::Wrong));
        assert_eq!(game.attempts(), 1);
        assert_eq!(game.rating(), None);
        assert_eq!(game.guess(1), Ok(GuessOutcome::Correct));
        assert!(game.is_over());
        assert_eq!(game.history().final_guess, Some(1));
        assert_eq!(game.rating(), Some(Rating::Perfect));
        assert_eq!(game.guess(1), Err(SessionError::GameOver));
        assert_eq!(game.weigh(&[0], &[1]), Err(SessionError::GameOver));
    }

    #[test]
    fn test_wrong_guess_does_not_skip_a_step() {
        let mut game = session(8, 5);
        game.weigh(&[0, 1, 2, 3], &[4, 5, 6, 7]).unwrap();
        assert_eq!(game.guess(0), Ok(GuessOutcome::Wrong));
        let w = game.weigh(&[4, 5], &[6, 7]).unwrap();
        assert_eq!(w.step, 2);
        assert_eq!(game.attempts(), 3);
        let steps: Vec<u32> = game.history().moves.iter().map(|w| w.step).collect();
        assert_eq!(steps, vec![1, 2]);
    }

    #[test]
    fn test_hint_limit() {
        let mut game = GameSession::new(16, 5, SessionConfig { hint_limit: 2 }).unwrap();
        let hint = game.hint().unwrap();
        assert_eq!(hint.left_pan.len(), 8);
        game.hint().unwrap();
        assert_eq!(game.hints_left(), 0);
        assert_eq!(game.hint(), Err(SessionError::HintsExhausted(2)));
        // recommendations are free
        assert!(game.recommendation().is_ok());
        assert_eq!(game.subproblems_solved(), 1);
    }

    #[test]
    fn test_no_hint_when_solved() {
        let mut game = session(2, 0);
        game.weigh(&[0], &[1]).unwrap();
        assert_eq!(game.hint(), Err(SessionError::AlreadySolved));
        assert_eq!(game.hints_used(), 0);
    }
}
