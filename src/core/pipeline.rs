use crate::core::cleaner::{CleanOutcome, LeadRecordCleaner};
use crate::core::dedup::{DeduplicationEngine, DEFAULT_SIMILARITY_THRESHOLD};
use crate::core::phone::PhoneNormalizer;
use crate::core::similarity::IndelRatio;
use crate::domain::model::{CanonicalLeadRecord, MergeReport, MergeStats, SourceBatch, SourceStats};
use crate::domain::ports::{ConfigProvider, SimilarityScorer};
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range};
use tracing::Dispatch;

pub const DEFAULT_MAX_RECORDS_PER_SOURCE: usize = 50;

/// 清理所有來源的原始資料後合併去重，先出現的記錄優先保留
pub struct MergePipeline<S: SimilarityScorer = IndelRatio> {
    cleaner: LeadRecordCleaner,
    engine: DeduplicationEngine<S>,
    max_records_per_source: usize,
    dispatch: Option<Dispatch>,
}

impl Default for MergePipeline {
    fn default() -> Self {
        Self::new(
            LeadRecordCleaner::default(),
            DeduplicationEngine::new(DEFAULT_SIMILARITY_THRESHOLD),
        )
    }
}

impl MergePipeline {
    /// 從配置建立管道，門檻、地區代碼或來源上限無效時回傳錯誤
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        validate_range(
            "dedup.similarity_threshold",
            config.similarity_threshold(),
            0,
            100,
        )?;
        validate_positive_number(
            "sources.max_records_per_source",
            config.max_records_per_source(),
            1,
        )?;

        let phone = PhoneNormalizer::from_region_code(config.default_region())?;
        let pipeline = Self::new(
            LeadRecordCleaner::new(phone),
            DeduplicationEngine::new(config.similarity_threshold()),
        )
        .with_max_records_per_source(config.max_records_per_source());
        Ok(pipeline)
    }
}

impl<S: SimilarityScorer> MergePipeline<S> {
    pub fn new(cleaner: LeadRecordCleaner, engine: DeduplicationEngine<S>) -> Self {
        Self {
            cleaner,
            engine,
            max_records_per_source: DEFAULT_MAX_RECORDS_PER_SOURCE,
            dispatch: None,
        }
    }

    pub fn with_max_records_per_source(mut self, max: usize) -> Self {
        self.max_records_per_source = max;
        self
    }

    /// 注入日誌 dispatcher，合併過程中的事件都會送到這裡
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn max_records_per_source(&self) -> usize {
        self.max_records_per_source
    }

    pub fn merge(&self, batches: &[SourceBatch]) -> Vec<CanonicalLeadRecord> {
        self.merge_with_report(batches).leads
    }

    /// 兩個來源的便捷版本，`first` 整批先於 `second`
    pub fn merge_two(&self, first: &SourceBatch, second: &SourceBatch) -> Vec<CanonicalLeadRecord> {
        self.report_for([first, second]).leads
    }

    pub fn merge_with_report(&self, batches: &[SourceBatch]) -> MergeReport {
        self.report_for(batches)
    }

    fn report_for<'a, I>(&self, batches: I) -> MergeReport
    where
        I: IntoIterator<Item = &'a SourceBatch>,
    {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, || self.run(batches)),
            None => self.run(batches),
        }
    }

    fn run<'a, I>(&self, batches: I) -> MergeReport
    where
        I: IntoIterator<Item = &'a SourceBatch>,
    {
        tracing::info!("Cleaning and merging leads...");

        let mut stats = MergeStats::default();
        let mut cleaned = Vec::new();

        for batch in batches {
            let source_stats = self.clean_batch(batch, &mut cleaned);
            stats.raw_records += source_stats.raw_records;
            stats.dropped_records += source_stats.dropped_records;
            stats.cleaned_records += source_stats.cleaned_records;
            stats.sources.push(source_stats);
        }

        tracing::info!("Total leads before deduplication: {}", cleaned.len());

        let (leads, dedup_stats) = self.engine.dedupe_with_stats(cleaned);
        stats.phone_duplicates = dedup_stats.phone_duplicates;
        stats.name_duplicates = dedup_stats.name_duplicates;
        stats.unique_records = dedup_stats.unique_records;

        tracing::info!(
            "Merge complete: {} raw, {} dropped, {} duplicates, {} unique",
            stats.raw_records,
            stats.dropped_records,
            stats.duplicates_removed(),
            stats.unique_records
        );

        MergeReport { leads, stats }
    }

    fn clean_batch(&self, batch: &SourceBatch, out: &mut Vec<CanonicalLeadRecord>) -> SourceStats {
        if batch.len() > self.max_records_per_source {
            tracing::warn!(
                "Source '{}' handed in {} records, above the limit of {}",
                batch.source,
                batch.len(),
                self.max_records_per_source
            );
        }

        let mut stats = SourceStats {
            source: batch.source.clone(),
            raw_records: batch.len(),
            ..SourceStats::default()
        };

        for raw in &batch.records {
            match self.cleaner.clean(raw) {
                CleanOutcome::Cleaned(record) => {
                    stats.cleaned_records += 1;
                    out.push(record);
                }
                CleanOutcome::Dropped => stats.dropped_records += 1,
            }
        }

        tracing::debug!(
            "Source '{}': {} cleaned, {} dropped",
            batch.source,
            stats.cleaned_records,
            stats.dropped_records
        );
        stats
    }
}
