//! One pairing round
//!
//! Load config → matcher → announce → fold pairs into history → save.
//! An incomplete matching is announced as the end of the rotation and
//! leaves the config untouched.

use chrono::{Local, NaiveDate};
use matching_engine::{MatchOutcome, MatchingEngine};
use persistence::{ConfigError, ConfigStore, PairingConfig, QuoteBook, ScheduledRound};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::message::{format_announcement, OUT_OF_PAIRS};
use crate::notifier::{notifier_from_config, Notifier};

/// Wall-clock inputs of a round, injectable for tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub today: NaiveDate,
    /// Seconds since the Unix epoch; selects the prompt quote
    pub unix_secs: u64,
}

impl Clock {
    pub fn now() -> Self {
        Self {
            today: Local::now().date_naive(),
            unix_secs: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundOptions {
    /// Do not write the config back
    pub debug: bool,
    /// Skip the round unless today is a scheduled date
    pub respect_schedule: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    /// Pairs were announced
    Announced,
    /// No complete matching exists; the end-of-rotation notice was sent
    Exhausted,
    /// Today is not a scheduled date; nothing was sent
    NotScheduled,
}

#[derive(Debug, Clone)]
pub struct RoundReport {
    pub status: RoundStatus,
    pub round: Option<ScheduledRound>,
    pub outcome: Option<MatchOutcome>,
    /// Whether the config was written back
    pub saved: bool,
}

/// Load the config and run a round through the configured delivery channel
///
/// The notifier is only built once the round is known to go out, so an
/// off day needs no credentials.
pub async fn run_round(
    store: &ConfigStore,
    clock: Clock,
    options: RoundOptions,
) -> Result<RoundReport, GatewayError> {
    let config = store.load()?;
    if let Some(skipped) = skip_off_day(&config, clock, options)? {
        return Ok(skipped);
    }
    let notifier = notifier_from_config(&config, options.debug)?;
    execute_round(store, &*notifier, clock, options).await
}

pub async fn execute_round(
    store: &ConfigStore,
    notifier: &dyn Notifier,
    clock: Clock,
    options: RoundOptions,
) -> Result<RoundReport, GatewayError> {
    let mut config = store.load()?;

    if let Some(skipped) = skip_off_day(&config, clock, options)? {
        return Ok(skipped);
    }
    let round = scheduled_round(&config, clock)?;

    let roster = config.roster()?;
    let history = config.history();

    let mut engine = match config.seed {
        Some(seed) => MatchingEngine::from_seed(seed),
        None => MatchingEngine::from_entropy(),
    };
    let outcome = engine.generate(roster.as_slice(), &history);

    info!(
        participants = roster.len(),
        past_pairs = history.len(),
        pairs = outcome.matching.len(),
        attempts = outcome.attempts,
        complete = outcome.complete,
        "Generated matching"
    );

    if !outcome.complete || outcome.matching.is_empty() {
        warn!("No complete round left, announcing end of rotation");
        notifier.send(OUT_OF_PAIRS).await?;
        return Ok(RoundReport {
            status: RoundStatus::Exhausted,
            round,
            outcome: Some(outcome),
            saved: false,
        });
    }

    for id in outcome.matching.unmatched(roster.as_slice()) {
        info!(participant = %id, "Left out of this round");
    }

    let prompt = load_prompt(&config, clock.unix_secs);
    let text = format_announcement(
        &config.message_header,
        &outcome.matching,
        &config.participants,
        prompt.as_deref(),
    );
    notifier.send(&text).await?;

    let saved = if options.debug {
        false
    } else {
        config.record_round(&outcome.matching);
        store.save(&config)?;
        true
    };

    Ok(RoundReport {
        status: RoundStatus::Announced,
        round,
        outcome: Some(outcome),
        saved,
    })
}

/// Round that `clock.today` falls into, when a schedule is configured
fn scheduled_round(
    config: &PairingConfig,
    clock: Clock,
) -> Result<Option<ScheduledRound>, ConfigError> {
    let Some(schedule) = config.schedule()? else {
        return Ok(None);
    };
    let round = schedule.round_for(clock.today)?;
    info!(round = round.number, date = %round.date, "Computed round");
    Ok(Some(round))
}

/// `NotScheduled` report when the schedule is respected and today is off
fn skip_off_day(
    config: &PairingConfig,
    clock: Clock,
    options: RoundOptions,
) -> Result<Option<RoundReport>, ConfigError> {
    if !options.respect_schedule {
        return Ok(None);
    }
    let Some(schedule) = config.schedule()? else {
        return Ok(None);
    };
    if schedule.is_due(clock.today)? {
        return Ok(None);
    }

    let round = schedule.round_for(clock.today)?;
    info!(today = %clock.today, next = %round.date, "Not a scheduled date, skipping");
    Ok(Some(RoundReport {
        status: RoundStatus::NotScheduled,
        round: Some(round),
        outcome: None,
        saved: false,
    }))
}

/// Conversation prompt for the announcement; an unreadable file only costs the prompt
fn load_prompt(config: &PairingConfig, unix_secs: u64) -> Option<String> {
    let path = config.quotes_file.as_ref()?;
    match QuoteBook::load(path) {
        Ok(book) => {
            debug!(path = %path.display(), quotes = book.len(), "Loaded prompts");
            book.pick(unix_secs).map(str::to_string)
        }
        Err(e) => {
            warn!(error = %e, "Skipping conversation prompt");
            None
        }
    }
}
