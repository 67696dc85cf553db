pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::MergeConfig;
pub use crate::core::{
    cleaner::{CleanOutcome, LeadRecordCleaner},
    dedup::{DedupDecision, DedupStats, DeduplicationEngine},
    phone::PhoneNormalizer,
    pipeline::MergePipeline,
    similarity::{IndelRatio, JaroWinklerRatio, LevenshteinRatio},
    url::clean_url,
};
pub use domain::model::{
    CanonicalLeadRecord, MergeReport, MergeStats, RawLeadRecord, SourceBatch, SourceStats,
};
pub use domain::ports::{ConfigProvider, SimilarityScorer};
pub use utils::error::{MergeError, Result};
