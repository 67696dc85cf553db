use crate::core::similarity::IndelRatio;
use crate::domain::model::CanonicalLeadRecord;
use crate::domain::ports::SimilarityScorer;
use std::borrow::Borrow;
use std::collections::HashSet;

pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupDecision {
    Unique,
    /// Phone already seen on a retained record.
    PhoneMatch,
    /// Name scored at or above the threshold against the retained record at
    /// `retained_index`.
    NameMatch { retained_index: usize, score: u8 },
}

impl DedupDecision {
    pub fn is_duplicate(&self) -> bool {
        !matches!(self, DedupDecision::Unique)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupStats {
    pub phone_duplicates: usize,
    pub name_duplicates: usize,
    pub unique_records: usize,
}

impl DedupStats {
    fn record(&mut self, decision: DedupDecision) {
        match decision {
            DedupDecision::Unique => self.unique_records += 1,
            DedupDecision::PhoneMatch => self.phone_duplicates += 1,
            DedupDecision::NameMatch { .. } => self.name_duplicates += 1,
        }
    }

    pub fn duplicates_removed(&self) -> usize {
        self.phone_duplicates + self.name_duplicates
    }
}

// Lives for one dedupe call only.
#[derive(Default)]
struct RetainedSet {
    phones: HashSet<String>,
    folded_names: Vec<String>,
}

impl RetainedSet {
    fn classify<S: SimilarityScorer>(
        &self,
        record: &CanonicalLeadRecord,
        folded_name: &str,
        threshold: u8,
        scorer: &S,
    ) -> DedupDecision {
        if let Some(phone) = &record.phone {
            if self.phones.contains(phone) {
                return DedupDecision::PhoneMatch;
            }
        }

        self.folded_names
            .iter()
            .enumerate()
            .find_map(|(retained_index, seen)| {
                let score = scorer.score(folded_name, seen);
                (score >= threshold).then_some(DedupDecision::NameMatch {
                    retained_index,
                    score,
                })
            })
            .unwrap_or(DedupDecision::Unique)
    }

    fn retain(&mut self, record: &CanonicalLeadRecord, folded_name: String) {
        if let Some(phone) = &record.phone {
            self.phones.insert(phone.clone());
        }
        self.folded_names.push(folded_name);
    }
}

/// First-seen-wins duplicate removal: exact phone match first, then fuzzy,
/// case-insensitive name match against every retained name in order.
#[derive(Debug, Clone)]
pub struct DeduplicationEngine<S: SimilarityScorer = IndelRatio> {
    threshold: u8,
    scorer: S,
}

impl Default for DeduplicationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl DeduplicationEngine {
    pub fn new(threshold: u8) -> Self {
        Self::with_scorer(threshold, IndelRatio)
    }
}

impl<S: SimilarityScorer> DeduplicationEngine<S> {
    pub fn with_scorer(threshold: u8, scorer: S) -> Self {
        Self { threshold, scorer }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn dedupe(&self, records: Vec<CanonicalLeadRecord>) -> Vec<CanonicalLeadRecord> {
        self.dedupe_with_stats(records).0
    }

    pub fn dedupe_with_stats(
        &self,
        records: Vec<CanonicalLeadRecord>,
    ) -> (Vec<CanonicalLeadRecord>, DedupStats) {
        tracing::info!("Deduplicating {} leads...", records.len());

        let total = records.len();
        let mut retained = Vec::with_capacity(total);
        let mut stats = DedupStats::default();
        self.scan(records, |record, decision| {
            stats.record(decision);
            if decision.is_duplicate() {
                tracing::debug!("Dropping duplicate lead '{}': {:?}", record.name, decision);
            } else {
                retained.push(record);
            }
        });

        tracing::info!(
            "Removed {} duplicates. {} unique leads remain",
            total - retained.len(),
            retained.len()
        );
        (retained, stats)
    }

    /// One decision per input record, in input order.
    pub fn decisions(&self, records: &[CanonicalLeadRecord]) -> Vec<DedupDecision> {
        let mut decisions = Vec::with_capacity(records.len());
        self.scan(records.iter(), |_, decision| decisions.push(decision));
        decisions
    }

    fn scan<R, I, F>(&self, records: I, mut on_decision: F)
    where
        R: Borrow<CanonicalLeadRecord>,
        I: IntoIterator<Item = R>,
        F: FnMut(R, DedupDecision),
    {
        let mut state = RetainedSet::default();

        for item in records {
            let record = item.borrow();
            let folded_name = record.name.to_lowercase();
            let decision = state.classify(record, &folded_name, self.threshold, &self.scorer);
            if decision == DedupDecision::Unique {
                state.retain(record, folded_name);
            }
            on_decision(item, decision);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(name: &str, phone: Option<&str>) -> CanonicalLeadRecord {
        CanonicalLeadRecord {
            name: name.to_string(),
            phone: phone.map(str::to_string),
            website: None,
            address: None,
            instagram: None,
            maps_url: None,
            source: "Unknown".to_string(),
        }
    }

    #[test]
    fn test_same_phone_different_name_keeps_first() {
        let engine = DeduplicationEngine::default();
        let result = engine.dedupe(vec![
            lead("Royal Bakery", Some("+919876543210")),
            lead("Sunrise Stores", Some("+919876543210")),
        ]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Royal Bakery");
    }

    #[test]
    fn test_case_insensitive_name_match() {
        let engine = DeduplicationEngine::default();
        let records = vec![lead("Royal Bakery", None), lead("royal bakery", None)];

        let decisions = engine.decisions(&records);
        assert_eq!(
            decisions,
            vec![
                DedupDecision::Unique,
                DedupDecision::NameMatch {
                    retained_index: 0,
                    score: 100
                }
            ]
        );

        let result = engine.dedupe(records);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Royal Bakery");
    }

    #[test]
    fn test_dissimilar_names_are_both_retained() {
        let engine = DeduplicationEngine::default();
        let result = engine.dedupe(vec![
            lead("Royal Bakery", None),
            lead("Royal Hardware", None),
        ]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_name_with_appended_suffix_is_duplicate() {
        let engine = DeduplicationEngine::default();
        let records = vec![
            lead("Apollo Pharmacy", None),
            lead("Apollo Pharmacy 24", None),
        ];

        assert_eq!(
            engine.decisions(&records)[1],
            DedupDecision::NameMatch {
                retained_index: 0,
                score: 90
            }
        );
        let result = engine.dedupe(records);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Apollo Pharmacy");
    }

    #[test]
    fn test_threshold_100_only_collapses_identical_names() {
        let engine = DeduplicationEngine::new(100);
        let long = "a".repeat(250);
        let result = engine.dedupe(vec![
            lead(&long, None),
            lead(&format!("{}b", long), None),
            lead(&long.to_uppercase(), None),
        ]);

        assert_eq!(result.len(), 2);
        assert_eq!(result[1].name, format!("{}b", long));
    }

    #[test]
    fn test_null_phones_never_match_each_other() {
        let engine = DeduplicationEngine::with_scorer(85, |_: &str, _: &str| 0u8);
        let result = engine.dedupe(vec![lead("A", None), lead("B", None)]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_duplicate_does_not_register_its_phone() {
        // The second record is a name duplicate; its phone must not be retained,
        // so the third record (same phone as the dropped one) survives.
        let engine = DeduplicationEngine::default();
        let result = engine.dedupe(vec![
            lead("Royal Bakery", Some("+911111111111")),
            lead("ROYAL BAKERY", Some("+912222222222")),
            lead("Sunrise Stores", Some("+912222222222")),
        ]);

        let names: Vec<&str> = result.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Royal Bakery", "Sunrise Stores"]);
    }

    #[test]
    fn test_first_qualifying_match_wins() {
        let engine = DeduplicationEngine::with_scorer(50, |a: &str, b: &str| {
            if a.starts_with('x') && b.starts_with('x') {
                90
            } else {
                0
            }
        });
        let records = vec![lead("Xa", None), lead("B", None), lead("Xb", None)];

        // "xa" and "xb" would match, but "B" sits between them and is retained.
        let decisions = engine.decisions(&records);
        assert_eq!(decisions[1], DedupDecision::Unique);
        assert_eq!(
            decisions[2],
            DedupDecision::NameMatch {
                retained_index: 0,
                score: 90
            }
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let engine = DeduplicationEngine::with_scorer(85, |_: &str, _: &str| 85u8);
        assert_eq!(engine.dedupe(vec![lead("A", None), lead("B", None)]).len(), 1);

        let engine = DeduplicationEngine::with_scorer(86, |_: &str, _: &str| 85u8);
        assert_eq!(engine.dedupe(vec![lead("A", None), lead("B", None)]).len(), 2);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let engine = DeduplicationEngine::default();
        let records = vec![
            lead("Royal Bakery", Some("+919876543210")),
            lead("royal bakery", None),
            lead("Sunrise Stores", Some("+919876543210")),
            lead("Cafe X", Some("+911234567890")),
            lead("Royal Hardware", None),
        ];

        let once = engine.dedupe(records);
        let twice = engine.dedupe(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_stats_add_up() {
        let engine = DeduplicationEngine::default();
        let (retained, stats) = engine.dedupe_with_stats(vec![
            lead("Royal Bakery", Some("+919876543210")),
            lead("Sunrise Stores", Some("+919876543210")),
            lead("royal bakery", None),
            lead("Cafe X", None),
        ]);

        assert_eq!(retained.len(), 2);
        assert_eq!(stats.phone_duplicates, 1);
        assert_eq!(stats.name_duplicates, 1);
        assert_eq!(stats.unique_records, 2);
        assert_eq!(stats.duplicates_removed(), 2);
    }

    #[test]
    fn test_empty_input() {
        let engine = DeduplicationEngine::default();
        assert!(engine.dedupe(Vec::new()).is_empty());
    }
}
