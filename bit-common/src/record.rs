use crate::error::HistoryError;
use crate::history::{HistoryEntry, HistoryLog};
use crate::run_state::RunState;
use crate::snapshot::{Checkpoint, Snapshot};
use crate::world::{Facing, Grid};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Everything a finished run leaves behind for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRun", into = "StoredRun")]
pub struct RunRecord {
    pub history: HistoryLog,
    pub checkpoints: Vec<Checkpoint>,
    pub state: RunState,
}

// On-disk layout: the goal grid once, then one step per history entry.
#[derive(Serialize, Deserialize)]
struct StoredRun {
    goal: Grid,
    steps: Vec<StoredStep>,
    checkpoints: Vec<Checkpoint>,
    state: RunState,
}

#[derive(Serialize, Deserialize)]
struct StoredStep {
    label: String,
    facing: Facing,
    step_count: u32,
    x: usize,
    y: usize,
    world: Grid,
}

impl From<RunRecord> for StoredRun {
    fn from(record: RunRecord) -> Self {
        let goal = record.history.current().snapshot.goal.as_ref().clone();
        let entries: Vec<HistoryEntry> = record.history.into();
        let steps = entries
            .into_iter()
            .map(|entry| StoredStep {
                label: entry.label,
                facing: entry.snapshot.facing,
                step_count: entry.snapshot.step_count,
                x: entry.snapshot.x,
                y: entry.snapshot.y,
                world: entry.snapshot.world,
            })
            .collect();
        StoredRun {
            goal,
            steps,
            checkpoints: record.checkpoints,
            state: record.state,
        }
    }
}

impl TryFrom<StoredRun> for RunRecord {
    type Error = HistoryError;

    fn try_from(stored: StoredRun) -> Result<Self, Self::Error> {
        let goal = Arc::new(stored.goal);
        let mut entries = Vec::with_capacity(stored.steps.len());
        for (index, step) in stored.steps.into_iter().enumerate() {
            if !step.world.same_dimensions(&goal) {
                return Err(HistoryError::ShapeMismatch {
                    index,
                    height: step.world.height(),
                    width: step.world.width(),
                    goal_height: goal.height(),
                    goal_width: goal.width(),
                });
            }
            entries.push(HistoryEntry {
                snapshot: Snapshot {
                    facing: step.facing,
                    step_count: step.step_count,
                    x: step.x,
                    y: step.y,
                    world: step.world,
                    goal: Arc::clone(&goal),
                },
                label: step.label,
                index,
            });
        }
        Ok(RunRecord {
            history: HistoryLog::try_from(entries)?,
            checkpoints: stored.checkpoints,
            state: stored.state,
        })
    }
}

/// On-disk encoding of a run record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Bincode,
    #[serde(rename = "messagepack")]
    MessagePack,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown output format '{0}' (expected json, bincode or messagepack)")]
pub struct UnknownFormat(pub String);

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Bincode => "bin",
            OutputFormat::MessagePack => "msgpack",
        }
    }

    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(OutputFormat::Json),
            "bin" => Some(OutputFormat::Bincode),
            "msgpack" => Some(OutputFormat::MessagePack),
            _ => None,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "bincode" => Ok(OutputFormat::Bincode),
            "messagepack" => Ok(OutputFormat::MessagePack),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

/// `<base>_history.<ext>`
pub fn history_path(base_filename: &str, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("{}_history.{}", base_filename, format.extension()))
}

impl RunRecord {
    pub fn save<P: AsRef<Path>>(&self, path: P, format: OutputFormat) -> Result<()> {
        let path_ref = path.as_ref();
        let file = File::create(path_ref)
            .with_context(|| format!("Failed to create record file '{}'", path_ref.display()))?;
        let mut writer = BufWriter::new(file);

        match format {
            OutputFormat::Json => serde_json::to_writer(&mut writer, self)
                .context("Failed to serialize run record to JSON")?,
            OutputFormat::Bincode => bincode::serialize_into(&mut writer, self)
                .context("Failed to serialize run record to bincode")?,
            OutputFormat::MessagePack => rmp_serde::encode::write(&mut writer, self)
                .context("Failed to serialize run record to MessagePack")?,
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write record file '{}'", path_ref.display()))?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P, format: OutputFormat) -> Result<Self> {
        let path_ref = path.as_ref();
        let file = File::open(path_ref)
            .with_context(|| format!("Failed to open record file '{}'", path_ref.display()))?;
        let reader = BufReader::new(file);

        let record = match format {
            OutputFormat::Json => serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse JSON record '{}'", path_ref.display()))?,
            OutputFormat::Bincode => bincode::deserialize_from(reader)
                .with_context(|| format!("Failed to parse bincode record '{}'", path_ref.display()))?,
            OutputFormat::MessagePack => rmp_serde::from_read(reader).with_context(|| {
                format!("Failed to parse MessagePack record '{}'", path_ref.display())
            })?,
        };
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_world;
    use crate::run_state::HaltReason;
    use crate::snapshot::Snapshot;
    use std::sync::Arc;

    fn sample_record() -> RunRecord {
        let start = parse_world("r\n-x-\n0 0").unwrap();
        let goal = parse_world("r\n-x-\n2 0").unwrap();
        let snapshot = Snapshot {
            facing: start.facing,
            step_count: 0,
            x: start.x,
            y: start.y,
            world: start.grid,
            goal: Arc::new(goal.grid),
        };
        let mut history = HistoryLog::new(snapshot.clone());
        history.append(
            Snapshot {
                step_count: 1,
                ..snapshot
            },
            "Blocked",
        );
        RunRecord {
            history,
            checkpoints: vec![Checkpoint {
                step_count: 0,
                name: "start".to_string(),
            }],
            state: RunState::Halted(HaltReason::Blocked),
        }
    }

    #[test]
    fn every_format_reads_back_what_it_wrote() {
        let dir = tempfile::tempdir().unwrap();
        let record = sample_record();
        for format in [OutputFormat::Json, OutputFormat::Bincode, OutputFormat::MessagePack] {
            let path = dir.path().join(format!("run.{}", format.extension()));
            record.save(&path, format).unwrap();
            assert_eq!(OutputFormat::from_path(&path), Some(format));
            let loaded = RunRecord::load(&path, format).unwrap();
            assert_eq!(loaded, record, "{format:?}");
        }
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("messagepack".parse::<OutputFormat>(), Ok(OutputFormat::MessagePack));
        assert_eq!(
            "yaml".parse::<OutputFormat>(),
            Err(UnknownFormat("yaml".to_string()))
        );
        assert_eq!(OutputFormat::from_path(Path::new("run.txt")), None);
        assert_eq!(
            history_path("out/run", OutputFormat::Bincode),
            PathBuf::from("out/run_history.bin")
        );
    }

    #[test]
    fn goal_is_written_once_and_shared_after_loading() {
        let record = sample_record();
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["goal"].is_array());
        let steps = value["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 2);
        assert!(steps.iter().all(|step| step.get("goal").is_none()));
        assert_eq!(steps[1]["label"], "Blocked");

        let loaded: RunRecord = serde_json::from_value(value).unwrap();
        let entries = loaded.history.entries();
        assert!(Arc::ptr_eq(&entries[0].snapshot.goal, &entries[1].snapshot.goal));
        assert_eq!(loaded, record);
    }

    #[test]
    fn loading_rejects_steps_shaped_unlike_the_goal() {
        let mut value = serde_json::to_value(sample_record()).unwrap();
        value["goal"] = serde_json::to_value(parse_world("r\n--\n0 0").unwrap().grid).unwrap();
        let err = serde_json::from_value::<RunRecord>(value).unwrap_err();
        assert!(err.to_string().contains("entry 0"), "{err}");

        let mut value = serde_json::to_value(sample_record()).unwrap();
        value["steps"] = serde_json::json!([]);
        assert!(serde_json::from_value::<RunRecord>(value).is_err());
    }

    #[test]
    fn loading_garbage_fails_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"history\": []}").unwrap();
        let err = RunRecord::load(&path, OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
