/// What happened to a single fetched article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleOutcome {
    Inserted,
    /// Slug already stored, either found up front or lost at insert time.
    Duplicate,
    /// Title produced an empty slug.
    InvalidTitle,
    /// The existence check itself failed.
    LookupFailed,
    NoPlace,
    GeocodeFailed,
    InsertFailed,
}

/// Per-run tally of article outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub fetched: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub invalid_title: usize,
    pub lookup_failed: usize,
    pub no_place: usize,
    pub geocode_failed: usize,
    pub insert_failed: usize,
}

impl RunReport {
    pub fn record(&mut self, outcome: ArticleOutcome) {
        let counter = match outcome {
            ArticleOutcome::Inserted => &mut self.inserted,
            ArticleOutcome::Duplicate => &mut self.duplicates,
            ArticleOutcome::InvalidTitle => &mut self.invalid_title,
            ArticleOutcome::LookupFailed => &mut self.lookup_failed,
            ArticleOutcome::NoPlace => &mut self.no_place,
            ArticleOutcome::GeocodeFailed => &mut self.geocode_failed,
            ArticleOutcome::InsertFailed => &mut self.insert_failed,
        };
        *counter += 1;
    }

    /// Articles that were fetched but not stored.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.fetched.saturating_sub(self.inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_bumps_matching_counter() {
        let mut report = RunReport {
            fetched: 4,
            ..RunReport::default()
        };
        report.record(ArticleOutcome::Inserted);
        report.record(ArticleOutcome::Duplicate);
        report.record(ArticleOutcome::Duplicate);
        report.record(ArticleOutcome::NoPlace);

        assert_eq!(report.inserted, 1);
        assert_eq!(report.duplicates, 2);
        assert_eq!(report.no_place, 1);
        assert_eq!(report.geocode_failed, 0);
        assert_eq!(report.skipped(), 3);
    }
}
