//! Behavioural Survey
//!
//! Self-reported study and phone habits, one row per respondent. Question
//! headers are mapped onto short field names, `H:MM[:SS]` durations become
//! hours, and respondents are grouped by whether their self-description
//! mentions studying.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use feature_engine::CognitiveState;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dataset::pearson;
use crate::error::DatasetError;

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(rename = "How many hours did you study yesterday?", default)]
    study_hours: Option<String>,
    #[serde(
        rename = "Rate your focus level while studying",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    focus_level: Option<f64>,
    #[serde(
        rename = "Rate your understanding/clarity while studying",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    clarity_level: Option<f64>,
    #[serde(
        rename = "How many hours did you use your phone for entertainment yesterday?",
        default
    )]
    phone_hours: Option<String>,
    #[serde(
        rename = "Rate your level of distraction during the day",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    distraction_level: Option<f64>,
    #[serde(
        rename = "How stressed were you yesterday?",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    stress_level: Option<f64>,
    #[serde(rename = "How many hours did you sleep last night?", default)]
    sleep_hours: Option<String>,
    #[serde(rename = "What was your overall mood today?", default)]
    mood: Option<String>,
    #[serde(rename = "Which statement describes you best?", default)]
    behavior: Option<String>,
}

/// One respondent with both focus and distraction ratings present
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyResponse {
    pub study_hours: Option<f64>,
    pub focus_level: f64,
    pub clarity_level: Option<f64>,
    pub phone_hours: Option<f64>,
    pub distraction_level: f64,
    pub stress_level: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub mood: Option<String>,
    pub behavior: Option<String>,
    pub state: CognitiveState,
}

impl SurveyResponse {
    fn from_raw(raw: RawResponse) -> Option<Self> {
        let state = match &raw.behavior {
            Some(text) if text.to_lowercase().contains("study") => CognitiveState::Study,
            _ => CognitiveState::Phone,
        };
        Some(Self {
            study_hours: raw.study_hours.as_deref().and_then(parse_time_to_hours),
            focus_level: raw.focus_level?,
            clarity_level: raw.clarity_level,
            phone_hours: raw.phone_hours.as_deref().and_then(parse_time_to_hours),
            distraction_level: raw.distraction_level?,
            stress_level: raw.stress_level,
            sleep_hours: raw.sleep_hours.as_deref().and_then(parse_time_to_hours),
            mood: raw.mood,
            behavior: raw.behavior,
            state,
        })
    }
}

/// Parse `"H:MM"`, `"H:MM:SS"` or a plain number of hours.
///
/// Missing minute or second parts count as zero; anything unparseable is
/// `None`.
pub fn parse_time_to_hours(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if !value.contains(':') {
        return value.parse().ok();
    }

    let mut parts = value.split(':').map(|p| p.trim().parse::<f64>());
    let hours = parts.next()?.ok()?;
    let minutes = parts.next().transpose().ok()?.unwrap_or(0.0);
    let seconds = parts.next().transpose().ok()?.unwrap_or(0.0);
    Some(hours + minutes / 60.0 + seconds / 3600.0)
}

/// Focus and habit averages for one group of respondents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub state: CognitiveState,
    pub count: usize,
    pub focus_mean: Option<f64>,
    /// Sample standard deviation (N-1); `None` below two respondents
    pub focus_std: Option<f64>,
    pub phone_hours_mean: Option<f64>,
    pub sleep_hours_mean: Option<f64>,
}

/// Headline survey numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveySummary {
    pub total: usize,
    pub study: usize,
    pub phone: usize,
    /// Rows dropped for a missing focus or distraction rating
    pub dropped: usize,
    pub distraction_focus_corr: Option<f64>,
    pub phone_focus_corr: Option<f64>,
    pub sleep_focus_corr: Option<f64>,
    pub groups: Vec<GroupSummary>,
}

/// Cleaned survey responses
#[derive(Debug, Clone)]
pub struct SurveyDataset {
    responses: Vec<SurveyResponse>,
    dropped: usize,
}

impl SurveyDataset {
    /// Load a survey export with question headers
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        info!("Loading survey from {}", path.display());

        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parse survey CSV from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut responses = Vec::new();
        let mut dropped = 0;
        for raw in reader.deserialize::<RawResponse>() {
            match SurveyResponse::from_raw(raw?) {
                Some(response) => responses.push(response),
                None => dropped += 1,
            }
        }
        if responses.is_empty() {
            return Err(DatasetError::Empty);
        }

        debug!("Dropped {} incomplete survey rows", dropped);
        info!("Loaded {} survey responses", responses.len());
        Ok(Self { responses, dropped })
    }

    pub fn responses(&self) -> &[SurveyResponse] {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Always false for a loaded survey
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Correlation of `field` with the focus rating over rows where both exist
    pub fn focus_correlation(&self, field: impl Fn(&SurveyResponse) -> Option<f64>) -> Option<f64> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = self
            .responses
            .iter()
            .filter_map(|r| field(r).map(|x| (x, r.focus_level)))
            .unzip();
        pearson(&xs, &ys)
    }

    /// Statistics for one group of respondents
    pub fn group(&self, state: CognitiveState) -> GroupSummary {
        let members: Vec<&SurveyResponse> =
            self.responses.iter().filter(|r| r.state == state).collect();
        let focus: Vec<f64> = members.iter().map(|r| r.focus_level).collect();

        GroupSummary {
            state,
            count: members.len(),
            focus_mean: mean(&focus),
            focus_std: sample_std(&focus),
            phone_hours_mean: mean(&members.iter().filter_map(|r| r.phone_hours).collect::<Vec<_>>()),
            sleep_hours_mean: mean(&members.iter().filter_map(|r| r.sleep_hours).collect::<Vec<_>>()),
        }
    }

    pub fn summary(&self) -> SurveySummary {
        let groups: Vec<GroupSummary> = CognitiveState::ALL.iter().map(|&s| self.group(s)).collect();
        SurveySummary {
            total: self.responses.len(),
            study: groups[0].count,
            phone: groups[1].count,
            dropped: self.dropped,
            distraction_focus_corr: self.focus_correlation(|r| Some(r.distraction_level)),
            phone_focus_corr: self.focus_correlation(|r| r.phone_hours),
            sleep_focus_corr: self.focus_correlation(|r| r.sleep_hours),
            groups,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}
