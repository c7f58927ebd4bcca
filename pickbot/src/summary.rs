//! Per-episode summaries of evaluation runs.
use anyhow::Result;
use pickbot_core::record::{BufferedRecorder, Record};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, path::Path};

/// One row of the evaluation CSV.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EpisodeSummary {
    pub episode: usize,
    #[serde(rename = "return")]
    pub episode_return: f32,
    pub length: usize,
    pub n_picked: usize,

    /// `delivered`, `collision` or `truncated`.
    pub outcome: String,
}

impl TryFrom<(&Record, f32)> for EpisodeSummary {
    type Error = anyhow::Error;

    /// Builds a summary from the last record of an episode and its return.
    fn try_from((record, episode_return): (&Record, f32)) -> Result<Self> {
        Ok(Self {
            episode: record.get_scalar("episode")? as _,
            episode_return,
            length: record.get_scalar("episode_length")? as _,
            n_picked: record.get_scalar("n_picked")? as _,
            outcome: record.get_string("outcome")?,
        })
    }
}

/// Collects per-episode summaries from per-step records.
///
/// Rewards are summed until a record carrying `episode_length`, which the
/// environment adds at the last step of an episode.
pub fn summarize(recorder: &BufferedRecorder) -> Result<Vec<EpisodeSummary>> {
    let mut summaries = vec![];
    let mut r_total = 0f32;

    for record in recorder.iter() {
        r_total += record.get_scalar("reward")?;
        if record.get("episode_length").is_some() {
            summaries.push(EpisodeSummary::try_from((record, r_total))?);
            r_total = 0.0;
        }
    }

    Ok(summaries)
}

/// Writes summaries as CSV with a header row.
pub fn write_csv(summaries: &[EpisodeSummary], path: impl AsRef<Path>) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for s in summaries {
        wtr.serialize(s)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickbot_core::record::{RecordValue, Recorder};

    fn step(episode: usize, reward: f32, last: Option<(usize, usize)>) -> Record {
        let mut record = Record::from_slice(&[
            ("episode", RecordValue::Scalar(episode as _)),
            ("reward", RecordValue::Scalar(reward)),
        ]);
        if let Some((length, n_picked)) = last {
            record.insert("episode_length", RecordValue::Scalar(length as _));
            record.insert("n_picked", RecordValue::Scalar(n_picked as _));
            record.insert("outcome", RecordValue::String("delivered".to_string()));
        }
        record
    }

    #[test]
    fn test_summarize() -> Result<()> {
        let mut recorder = BufferedRecorder::new();
        recorder.write(step(0, -0.01, None));
        recorder.write(step(0, 0.99, Some((2, 1))));
        recorder.write(step(1, -2.01, Some((1, 0))));

        let summaries = summarize(&recorder)?;
        assert_eq!(summaries.len(), 2);
        assert!((summaries[0].episode_return - 0.98).abs() < 1e-6);
        assert_eq!((summaries[0].length, summaries[0].n_picked), (2, 1));
        assert_eq!(summaries[1].episode, 1);
        assert_eq!(summaries[1].episode_return, -2.01);
        Ok(())
    }

    #[test]
    fn test_missing_key() {
        let mut recorder = BufferedRecorder::new();
        let mut record = Record::from_scalar("reward", 1.0);
        record.insert("episode_length", RecordValue::Scalar(1.0));
        recorder.write(record);
        assert!(summarize(&recorder).is_err());
    }
}
