//! Configuration store: JSON round configuration with atomic saves
//!
//! The configuration file is the only persistent state of the system. It
//! holds the participants, the accumulated pair history, the schedule and
//! the Slack delivery settings.
//!
//! Features:
//! - Missing `past_pairs` loads as an empty history
//! - Unknown keys are kept and written back untouched
//! - History orientation is preserved (`[pivot, partner]`)
//! - Atomic write: tmp file, fsync, rename
//! - 4-space indented output, diff-friendly for hand edits

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use types::errors::TypesError;
use types::ids::{Participant, ParticipantId};
use types::matching::Matching;
use types::pair::{History, PairKey};
use types::roster::Roster;

use crate::schedule::{Schedule, ScheduleError};

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid roster: {0}")]
    InvalidRoster(#[from] TypesError),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(#[from] ScheduleError),
}

// ── Config Document ─────────────────────────────────────────────────

/// The persisted configuration record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingConfig {
    /// Roster source, in file order
    #[serde(default)]
    pub participants: Vec<Participant>,

    /// Every pair formed so far, oldest first
    #[serde(default)]
    pub past_pairs: Vec<PairKey>,

    /// Seed for the round's random source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Schedule anchor, `YYYY-MM-DD` or RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_weeks: Option<u32>,

    /// First line of every announcement
    #[serde(default)]
    pub message_header: String,

    /// Fortune-format file of conversation prompts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotes_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_webhook_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack_bot_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,

    /// Setup reads reactions from the first message starting with this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kickstart_message_prefix: Option<String>,

    /// Keys this tool does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PairingConfig {
    /// Validated roster of participant ids, in file order
    pub fn roster(&self) -> Result<Roster, ConfigError> {
        Ok(Roster::from_participants(&self.participants)?)
    }

    /// History set built from `past_pairs`
    pub fn history(&self) -> History {
        self.past_pairs.iter().cloned().collect()
    }

    /// Look up a participant record by id
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == *id)
    }

    /// Schedule, when both `start_date` and `frequency_weeks` are set
    pub fn schedule(&self) -> Result<Option<Schedule>, ConfigError> {
        match (&self.start_date, self.frequency_weeks) {
            (Some(start), Some(weeks)) => Ok(Some(Schedule::parse(start, weeks)?)),
            _ => Ok(None),
        }
    }

    /// Fold a round's pairs into the history list
    pub fn record_round(&mut self, matching: &Matching) {
        self.past_pairs.extend(matching.pairs().iter().cloned());
    }
}

// ── Store ───────────────────────────────────────────────────────────

/// Reads and writes one configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and parse the configuration.
    pub fn load(&self) -> Result<PairingConfig, ConfigError> {
        let data = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        let config: PairingConfig =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            path = %self.path.display(),
            participants = config.participants.len(),
            past_pairs = config.past_pairs.len(),
            "Loaded config"
        );
        Ok(config)
    }

    /// Write the configuration atomically: serialize → tmp → fsync → rename.
    pub fn save(&self, config: &PairingConfig) -> Result<(), ConfigError> {
        let data = to_pretty_json(config)?;

        let tmp_path = self.tmp_path();
        let io_err = |source: io::Error| ConfigError::Io {
            path: tmp_path.clone(),
            source,
        };

        {
            let mut file = File::create(&tmp_path).map_err(io_err)?;
            file.write_all(&data).map_err(io_err)?;
            file.write_all(b"\n").map_err(io_err)?;
            file.sync_all().map_err(io_err)?;
        }
        fs::rename(&tmp_path, &self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), "Updated config");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Serialize with 4-space indentation.
fn to_pretty_json(config: &PairingConfig) -> Result<Vec<u8>, ConfigError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    config
        .serialize(&mut ser)
        .map_err(|e| ConfigError::Serialization(e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "names": "legacy field",
        "rounds": 12,
        "seed": 1234,
        "start_date": "2024-01-08",
        "frequency_weeks": 2,
        "message_header": "This week's coffee chats:",
        "participants": [
            {"id": "U1", "name": "Ada"},
            {"id": "U2", "name": "Brian"},
            {"id": "U3", "name": "Chen"}
        ],
        "past_pairs": [["U2", "U1"]],
        "slack_webhook_url": "https://hooks.example.com/T000"
    }"#;

    fn write_sample(dir: &TempDir, body: &str) -> ConfigStore {
        let path = dir.path().join("config.json");
        fs::write(&path, body).unwrap();
        ConfigStore::open(path)
    }

    #[test]
    fn test_load_sample_config() {
        let tmp = TempDir::new().unwrap();
        let store = write_sample(&tmp, SAMPLE);
        let config = store.load().unwrap();

        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.participants.len(), 3);
        assert_eq!(config.roster().unwrap().len(), 3);
        assert!(config.history().contains(&"U1".into(), &"U2".into()));
        assert_eq!(config.slack_webhook_url.as_deref(), Some("https://hooks.example.com/T000"));
        assert_eq!(config.extra.get("rounds"), Some(&Value::from(12)));
    }

    #[test]
    fn test_missing_past_pairs_is_empty_history() {
        let tmp = TempDir::new().unwrap();
        let store = write_sample(&tmp, r#"{"participants": [{"id": "U1", "name": "Ada"}]}"#);
        let config = store.load().unwrap();
        assert!(config.past_pairs.is_empty());
        assert!(config.history().is_empty());
        assert!(config.schedule().unwrap().is_none());
    }

    #[test]
    fn test_save_round_trip_preserves_unknown_keys_and_orientation() {
        let tmp = TempDir::new().unwrap();
        let store = write_sample(&tmp, SAMPLE);
        let mut config = store.load().unwrap();

        let matching = Matching::from_pairs(vec![PairKey::new("U3", "U1").unwrap()]);
        config.record_round(&matching);
        store.save(&config).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.extra.get("names"), Some(&Value::from("legacy field")));

        let last = reloaded.past_pairs.last().unwrap();
        assert_eq!(last.first().as_str(), "U3");
        assert_eq!(last.second().as_str(), "U1");
    }

    #[test]
    fn test_save_uses_four_space_indent_and_no_tmp_left() {
        let tmp = TempDir::new().unwrap();
        let store = write_sample(&tmp, SAMPLE);
        let config = store.load().unwrap();
        store.save(&config).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n    \"participants\": ["));
        assert!(!tmp.path().join("config.json.tmp").exists());
    }

    #[test]
    fn test_duplicate_participants_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = write_sample(
            &tmp,
            r#"{"participants": [{"id": "U1", "name": "Ada"}, {"id": "U1", "name": "Ada again"}]}"#,
        );
        let config = store.load().unwrap();
        assert!(matches!(config.roster(), Err(ConfigError::InvalidRoster(_))));
    }

    #[test]
    fn test_self_pair_in_history_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let store = write_sample(&tmp, r#"{"past_pairs": [["U1", "U1"]]}"#);
        assert!(matches!(store.load(), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let store = ConfigStore::open(tmp.path().join("absent.json"));
        assert!(matches!(store.load(), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_participant_lookup() {
        let tmp = TempDir::new().unwrap();
        let config = write_sample(&tmp, SAMPLE).load().unwrap();
        assert_eq!(config.participant(&"U2".into()).map(|p| p.name.as_str()), Some("Brian"));
        assert!(config.participant(&"U9".into()).is_none());
    }
}
