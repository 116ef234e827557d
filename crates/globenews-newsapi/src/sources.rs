use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::SourceInfo;

/// How many sources one extraction run samples from the full list.
pub const NUM_SOURCES: usize = 20;

/// Shuffle `sources` and keep at most `n` of them.
pub fn pick_sources<R: Rng + ?Sized>(
    mut sources: Vec<SourceInfo>,
    n: usize,
    rng: &mut R,
) -> Vec<SourceInfo> {
    sources.shuffle(rng);
    sources.truncate(n);
    sources
}

/// Comma-join source ids into the `sources` selector NewsAPI expects.
#[must_use]
pub fn encode_sources(sources: &[SourceInfo]) -> String {
    sources
        .iter()
        .map(|s| s.id.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn source(id: &str) -> SourceInfo {
        SourceInfo {
            id: id.to_string(),
            name: id.to_uppercase(),
            language: Some("en".to_string()),
            country: None,
        }
    }

    #[test]
    fn pick_sources_caps_at_n_and_keeps_members() {
        let all: Vec<SourceInfo> = (0..30).map(|i| source(&format!("src-{i}"))).collect();
        let ids: HashSet<String> = all.iter().map(|s| s.id.clone()).collect();
        let mut rng = StdRng::seed_from_u64(7);

        let picked = pick_sources(all, NUM_SOURCES, &mut rng);

        assert_eq!(picked.len(), NUM_SOURCES);
        let unique: HashSet<&str> = picked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(unique.len(), NUM_SOURCES, "no source picked twice");
        assert!(picked.iter().all(|s| ids.contains(&s.id)));
    }

    #[test]
    fn pick_sources_returns_all_when_fewer_than_n() {
        let all = vec![source("bbc-news"), source("the-verge")];
        let mut rng = StdRng::seed_from_u64(1);

        let picked = pick_sources(all, NUM_SOURCES, &mut rng);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn encode_sources_joins_ids_with_commas() {
        let encoded = encode_sources(&[source("bbc-news"), source("the-verge")]);
        assert_eq!(encoded, "bbc-news,the-verge");
    }

    #[test]
    fn encode_sources_of_empty_list_is_empty() {
        assert_eq!(encode_sources(&[]), "");
    }
}
