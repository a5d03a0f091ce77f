//! Append-only Markdown sinks for the run's two artifacts.
//!
//! A run produces `timeline.md` (every logged moment of the workday) and
//! `gossip.md` (who whispered what at the kettle). Both are created
//! fresh with a header when the run starts and only ever appended to
//! afterwards. The run loop is the single writer, so no locking is
//! needed; rows are flushed as they land so a tail keeps up with the
//! simulation.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use bullpen_types::{AgentKind, LogKind, RunId, SimHours};

use crate::error::ArtifactError;

/// Timeline artifact filename under the output root.
const TIMELINE_FILE: &str = "timeline.md";
/// Gossip artifact filename under the output root.
const GOSSIP_FILE: &str = "gossip.md";

/// The run's log sink: owns both append-only artifacts.
pub struct RunLog {
    timeline: File,
    timeline_path: PathBuf,
    gossip: File,
    gossip_path: PathBuf,
}

impl RunLog {
    /// Create both artifacts fresh under `dir`, writing their headers.
    ///
    /// Existing files at the artifact paths are truncated; the run loop
    /// appends from here on.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Io`] when either file cannot be created
    /// or the header write fails.
    pub async fn create(
        dir: &Path,
        run: RunId,
        started: DateTime<Utc>,
    ) -> Result<Self, ArtifactError> {
        let timeline_path = dir.join(TIMELINE_FILE);
        let gossip_path = dir.join(GOSSIP_FILE);

        let stamp = started.format("%Y-%m-%dT%H:%M:%SZ");
        let timeline_header = format!(
            "# Timeline\n\nRun {run} started {stamp}\n\n\
             | Sim Time | Kind | Message | Morale | Fatigue | Cost |\n\
             |:---:|:---|:---|:---:|:---:|:---:|\n"
        );
        let gossip_header = format!(
            "# Gossip Log\n\nRun {run} started {stamp}\n\n\
             | Sim Time | Speaker | Line |\n\
             |:---:|:---|:---|\n"
        );

        let timeline = create_with_header(&timeline_path, &timeline_header).await?;
        let gossip = create_with_header(&gossip_path, &gossip_header).await?;

        Ok(Self {
            timeline,
            timeline_path,
            gossip,
            gossip_path,
        })
    }

    /// Append one row to the timeline.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Io`] when the append fails.
    pub async fn record(
        &mut self,
        time: SimHours,
        kind: LogKind,
        message: &str,
        morale: f64,
        fatigue: f64,
        cost: Decimal,
    ) -> Result<(), ArtifactError> {
        let row = format!(
            "| {time} | {kind} | {} | {morale:.1} | {fatigue:.1} | ${cost:.4} |\n",
            table_cell(message)
        );
        append_row(&mut self.timeline, &self.timeline_path, &row).await
    }

    /// Append one row to the gossip log.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Io`] when the append fails.
    pub async fn record_gossip(
        &mut self,
        time: SimHours,
        speaker: AgentKind,
        line: &str,
    ) -> Result<(), ArtifactError> {
        let row = format!("| {time} | {speaker} | {} |\n", table_cell(line));
        append_row(&mut self.gossip, &self.gossip_path, &row).await
    }

    /// Where the timeline artifact lives.
    pub fn timeline_path(&self) -> &Path {
        &self.timeline_path
    }

    /// Where the gossip artifact lives.
    pub fn gossip_path(&self) -> &Path {
        &self.gossip_path
    }
}

/// Create a file, truncating any previous contents, and write the header.
async fn create_with_header(path: &Path, header: &str) -> Result<File, ArtifactError> {
    let mut file = File::create(path)
        .await
        .map_err(|e| ArtifactError::io(path, e))?;
    file.write_all(header.as_bytes())
        .await
        .map_err(|e| ArtifactError::io(path, e))?;
    file.flush().await.map_err(|e| ArtifactError::io(path, e))?;
    Ok(file)
}

/// Append one row and flush it.
async fn append_row(file: &mut File, path: &Path, row: &str) -> Result<(), ArtifactError> {
    file.write_all(row.as_bytes())
        .await
        .map_err(|e| ArtifactError::io(path, e))?;
    file.flush().await.map_err(|e| ArtifactError::io(path, e))
}

/// Flatten a value into one Markdown table cell.
///
/// Model replies carry newlines and the occasional pipe; either would
/// tear the table apart.
fn table_cell(text: &str) -> String {
    text.replace('\r', "").replace('\n', "; ").replace('|', "/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn fresh_log(dir: &Path) -> RunLog {
        RunLog::create(dir, RunId::new(), Utc::now()).await.unwrap()
    }

    #[tokio::test]
    async fn create_writes_both_headers() {
        let dir = tempfile::tempdir().unwrap();
        let log = fresh_log(dir.path()).await;

        let timeline = std::fs::read_to_string(log.timeline_path()).unwrap();
        assert!(timeline.starts_with("# Timeline\n"));
        assert!(timeline.contains("| Sim Time | Kind | Message | Morale | Fatigue | Cost |"));

        let gossip = std::fs::read_to_string(log.gossip_path()).unwrap();
        assert!(gossip.starts_with("# Gossip Log\n"));
        assert!(gossip.contains("| Sim Time | Speaker | Line |"));
    }

    #[tokio::test]
    async fn record_appends_formatted_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = fresh_log(dir.path()).await;

        let t0 = SimHours::new(0.0).unwrap();
        let t1 = SimHours::new(0.5).unwrap();
        log.record(t0, LogKind::Info, "Manager: Planning project", 75.0, 0.0, Decimal::ZERO)
            .await
            .unwrap();
        log.record(t1, LogKind::Event, "Coffee break", 80.0, 0.5, Decimal::new(12, 4))
            .await
            .unwrap();

        let contents = std::fs::read_to_string(log.timeline_path()).unwrap();
        let planning = contents
            .find("| 0.00 | INFO | Manager: Planning project | 75.0 | 0.0 | $0.0000 |");
        let coffee = contents.find("| 0.50 | EVENT | Coffee break | 80.0 | 0.5 | $0.0012 |");
        assert!(planning.is_some());
        assert!(coffee.is_some());
        assert!(planning < coffee);
    }

    #[tokio::test]
    async fn record_gossip_targets_the_gossip_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = fresh_log(dir.path()).await;

        let t = SimHours::new(1.5).unwrap();
        log.record_gossip(t, AgentKind::Qa, "the roadmap is fiction")
            .await
            .unwrap();

        let gossip = std::fs::read_to_string(log.gossip_path()).unwrap();
        assert!(gossip.contains("| 1.50 | QA | the roadmap is fiction |"));

        let timeline = std::fs::read_to_string(log.timeline_path()).unwrap();
        assert!(!timeline.contains("the roadmap is fiction"));
    }

    #[tokio::test]
    async fn multiline_and_piped_messages_stay_in_one_cell() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = fresh_log(dir.path()).await;

        let t = SimHours::ZERO;
        log.record(
            t,
            LogKind::Info,
            "Project plan:\n1. one | first\n2. two",
            75.0,
            0.0,
            Decimal::ZERO,
        )
        .await
        .unwrap();

        let contents = std::fs::read_to_string(log.timeline_path()).unwrap();
        assert!(contents.contains("| Project plan:; 1. one / first; 2. two |"));
    }
}
