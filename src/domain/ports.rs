/// Name similarity on a 0-100 scale, 100 meaning identical.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, left: &str, right: &str) -> u8;
}

impl<F> SimilarityScorer for F
where
    F: Fn(&str, &str) -> u8 + Send + Sync,
{
    fn score(&self, left: &str, right: &str) -> u8 {
        self(left, right)
    }
}

pub trait ConfigProvider: Send + Sync {
    fn similarity_threshold(&self) -> u8;
    fn default_region(&self) -> &str;
    fn max_records_per_source(&self) -> usize;
}
