//! EEG Feature Dataset
//!
//! Loads the band-power feature CSV (one row per recording segment, labelled
//! study or phone), validates it, and answers the aggregate questions the
//! report asks: class balance, per-band means, per-class feature means,
//! column statistics and correlations. The behavioural survey and the model
//! comparison table exported by training are read here as well.

mod dataset;
mod error;
mod model_comparison;
mod record;
mod survey;
mod validator;

pub use dataset::{ClassCounts, ColumnSummary, EegDataset};
pub use error::DatasetError;
pub use model_comparison::{
    best_model, load_model_comparison, read_model_comparison, AccuracyTier, ModelScore,
    EXCELLENT_ACCURACY_PCT, GOOD_ACCURACY_PCT,
};
pub use record::{EegRecord, FEATURE_COLUMNS};
pub use survey::{parse_time_to_hours, GroupSummary, SurveyDataset, SurveyResponse, SurveySummary};
pub use validator::{ValidationConfig, Validator};
