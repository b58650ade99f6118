//! Behavioural survey summary

use anyhow::{Context, Result};
use eeg_dataset::{SurveyDataset, SurveySummary};
use serde::Serialize;

use crate::context::AppContext;
use crate::report::{opt, table, Report};

#[derive(Debug, Serialize)]
pub struct SurveyReport {
    pub source: String,
    #[serde(flatten)]
    pub summary: SurveySummary,
}

/// Group counts, focus statistics and habit correlations from the survey
pub fn run(ctx: &AppContext) -> Result<SurveyReport> {
    let path = &ctx.settings.paths.survey_csv;
    let survey = SurveyDataset::load(path)
        .with_context(|| format!("failed to load survey {}", path.display()))?;
    Ok(SurveyReport {
        source: path.display().to_string(),
        summary: survey.summary(),
    })
}

impl Report for SurveyReport {
    fn render(&self) -> String {
        let s = &self.summary;
        let correlations = vec![
            vec!["distraction".to_string(), opt(s.distraction_focus_corr)],
            vec!["phone hours".to_string(), opt(s.phone_focus_corr)],
            vec!["sleep hours".to_string(), opt(s.sleep_focus_corr)],
        ];
        let groups: Vec<Vec<String>> = s
            .groups
            .iter()
            .map(|g| {
                vec![
                    g.state.to_string(),
                    g.count.to_string(),
                    opt(g.focus_mean),
                    opt(g.focus_std),
                    opt(g.phone_hours_mean),
                    opt(g.sleep_hours_mean),
                ]
            })
            .collect();

        [
            format!(
                "Respondents: {} (study {}, phone {}; {} incomplete dropped)",
                s.total, s.study, s.phone, s.dropped
            ),
            table(&["vs focus", "pearson"], &correlations),
            table(
                &["group", "n", "focus mean", "focus std", "phone h", "sleep h"],
                &groups,
            ),
        ]
        .join("\n\n")
    }
}
