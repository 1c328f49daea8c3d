//! Persisted move-history codec
//!
//! The on-disk record uses camelCase field names and carries each outcome as
//! a fixed display sentence. Those sentences exist only at this edge: the
//! rest of the engine works with [`Outcome`].
//!
//! Decoding is deliberately lenient about absence. A record with `numCoins`
//! missing or zero decodes to `None` ("nothing to analyze"), a missing
//! `finalGuess` means the game was not finished, and a missing `moves` list is
//! empty. Anything present but malformed is an error.

use crate::candidates::{CandidateSet, CoinIndex};
use crate::error::HistoryError;
use crate::simulator::{validate_coin, validate_game};
use crate::weighing::{MoveHistory, Outcome, Weighing};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const LEFT_LIGHTER_TEXT: &str = "Left side is lighter - Fake coin is on the left side";
const RIGHT_LIGHTER_TEXT: &str = "Right side is lighter - Fake coin is on the right side";
const BALANCED_TEXT: &str = "Both sides are equal - Fake coin is not in these groups";

impl Outcome {
    /// Sentence stored in persisted histories and shown to players.
    pub fn display_text(self) -> &'static str {
        match self {
            Outcome::LeftLighter => LEFT_LIGHTER_TEXT,
            Outcome::RightLighter => RIGHT_LIGHTER_TEXT,
            Outcome::Balanced => BALANCED_TEXT,
        }
    }

    /// Inverse of [`Outcome::display_text`]; the match is exact.
    pub fn from_display_text(text: &str) -> Option<Outcome> {
        Outcome::ALL.into_iter().find(|o| o.display_text() == text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedMove {
    left_pan: Vec<CoinIndex>,
    right_pan: Vec<CoinIndex>,
    result: String,
    remaining_coins: Vec<CoinIndex>,
    step: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedHistory {
    #[serde(default)]
    moves: Vec<PersistedMove>,
    #[serde(default)]
    fake_coin_index: Option<CoinIndex>,
    #[serde(default)]
    num_coins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    final_guess: Option<CoinIndex>,
}

impl From<&MoveHistory> for PersistedHistory {
    fn from(history: &MoveHistory) -> Self {
        PersistedHistory {
            moves: history
                .moves
                .iter()
                .map(|w| PersistedMove {
                    left_pan: w.left_pan.clone(),
                    right_pan: w.right_pan.clone(),
                    result: w.outcome.display_text().to_string(),
                    remaining_coins: w.remaining.as_slice().to_vec(),
                    step: w.step,
                })
                .collect(),
            fake_coin_index: Some(history.fake_coin),
            num_coins: Some(history.total_coins),
            final_guess: history.final_guess,
        }
    }
}

impl PersistedHistory {
    fn into_history(self) -> Result<Option<MoveHistory>, HistoryError> {
        let total_coins = match self.num_coins {
            None | Some(0) => return Ok(None),
            Some(n) => n,
        };
        let fake_coin = self
            .fake_coin_index
            .ok_or(HistoryError::MissingField("fakeCoinIndex"))?;
        validate_game(total_coins, fake_coin)?;

        let check_all = |coins: &[CoinIndex]| -> Result<(), HistoryError> {
            for &coin in coins {
                validate_coin(coin, total_coins)?;
            }
            Ok(())
        };
        if let Some(guess) = self.final_guess {
            validate_coin(guess, total_coins)?;
        }

        let moves = self
            .moves
            .into_iter()
            .map(|m| {
                check_all(&m.left_pan)?;
                check_all(&m.right_pan)?;
                check_all(&m.remaining_coins)?;
                let outcome = Outcome::from_display_text(&m.result)
                    .ok_or_else(|| HistoryError::UnknownOutcome(m.result.clone()))?;
                Ok(Weighing {
                    step: m.step,
                    left_pan: m.left_pan,
                    right_pan: m.right_pan,
                    outcome,
                    remaining: CandidateSet::new(m.remaining_coins),
                })
            })
            .collect::<Result<Vec<_>, HistoryError>>()?;

        Ok(Some(MoveHistory {
            moves,
            fake_coin,
            total_coins,
            final_guess: self.final_guess,
        }))
    }
}

/// Serialize a history in the persisted layout.
pub fn encode(history: &MoveHistory) -> Result<String, HistoryError> {
    Ok(serde_json::to_string_pretty(&PersistedHistory::from(history))?)
}

/// Parse a persisted history. `Ok(None)` means there is no game to analyze.
pub fn decode(json: &str) -> Result<Option<MoveHistory>, HistoryError> {
    let persisted: PersistedHistory = serde_json::from_str(json)?;
    persisted.into_history()
}

/// Write a history to `path`, replacing any previous record.
pub fn save(history: &MoveHistory, path: impl AsRef<Path>) -> Result<(), HistoryError> {
    fs::write(path, encode(history)?)?;
    Ok(())
}

/// Read a history from `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Option<MoveHistory>, HistoryError> {
    decode(&fs::read_to_string(path)?)
}
