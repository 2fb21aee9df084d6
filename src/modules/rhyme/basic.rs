//! BasicRhymeClusterer (spec.md §4.7): group tokens by hashed rhyme tail,
//! suppress singleton classes, order deterministically by `word_index`.

use super::{extract_tail, hash_tail, Cluster, WordClusterEntry, EMPTY_TAIL_CLASS};
use crate::modules::token::Token;
use crate::modules::unify::UnifiedSequence;
use rustc_hash::FxHashMap;

/// One token's unified phoneme sequence, keyed back to its [`Token`] so the
/// clusterer can recover `word_index` and `surface`.
pub struct TokenSequence<'a> {
    pub token: &'a Token,
    pub unified: UnifiedSequence,
    /// When set, overrides the computed tail hash — used by oracle
    /// augmentation (spec.md §4.10) to reassign a word to an existing
    /// class rather than whatever its own tail would hash to.
    pub class_override: Option<super::RhymeClassId>,
}

impl<'a> TokenSequence<'a> {
    pub fn new(token: &'a Token, unified: UnifiedSequence) -> Self {
        Self { token, unified, class_override: None }
    }
}

pub struct BasicRhymeClusterer;

impl BasicRhymeClusterer {
    /// Clusters tokens by rhyme tail (spec.md §4.7). Singleton classes and
    /// the empty-tail class are suppressed from the output.
    pub fn cluster(sequences: &[TokenSequence<'_>]) -> Vec<Cluster> {
        let mut by_class: FxHashMap<super::RhymeClassId, Vec<WordClusterEntry>> =
            FxHashMap::default();

        for seq in sequences {
            let class_id = match seq.class_override {
                Some(id) => id,
                None => {
                    let tail = extract_tail(&seq.unified);
                    hash_tail(tail)
                }
            };
            if class_id == EMPTY_TAIL_CLASS {
                continue;
            }
            by_class.entry(class_id).or_default().push(WordClusterEntry {
                word_index: seq.token.index,
                surface: seq.token.surface.clone(),
                class_id,
                spans: vec![(0, seq.token.surface.chars().count())],
            });
        }

        let mut clusters: Vec<Cluster> = by_class
            .into_iter()
            .filter(|(_, members)| members.len() >= 2)
            .map(|(class_id, mut members)| {
                members.sort_by_key(|m| m.word_index);
                Cluster { class_id, members }
            })
            .collect();

        clusters.sort_by_key(|c| c.members.first().map(|m| m.word_index).unwrap_or(usize::MAX));
        clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::phoneme::english::EnglishPhonemeMapper;
    use crate::modules::token::tokenize;
    use crate::modules::unify::UnifiedPhonemeMapper;

    fn sequences_for(lyrics: &str) -> Vec<(Token, UnifiedSequence)> {
        tokenize(lyrics)
            .into_iter()
            .map(|(surface, index)| {
                let token = Token::new(&surface, index, crate::modules::token::Script::English);
                let mapping = EnglishPhonemeMapper::map(&surface, None);
                let unified = UnifiedPhonemeMapper::unify(&mapping.sequence);
                (token, unified)
            })
            .collect()
    }

    #[test]
    fn groups_tokens_sharing_a_tail() {
        let pairs = sequences_for("cat bat hill");
        let seqs: Vec<TokenSequence> = pairs
            .iter()
            .map(|(t, u)| TokenSequence::new(t, u.clone()))
            .collect();
        let clusters = BasicRhymeClusterer::cluster(&seqs);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 2);
        assert_eq!(clusters[0].members[0].surface, "cat");
        assert_eq!(clusters[0].members[1].surface, "bat");
    }

    #[test]
    fn singleton_classes_are_suppressed() {
        let pairs = sequences_for("cat dog hill");
        let seqs: Vec<TokenSequence> = pairs
            .iter()
            .map(|(t, u)| TokenSequence::new(t, u.clone()))
            .collect();
        let clusters = BasicRhymeClusterer::cluster(&seqs);
        assert!(clusters.is_empty());
    }

    #[test]
    fn clusters_ordered_by_smallest_word_index() {
        let pairs = sequences_for("hill cat mill bat");
        let seqs: Vec<TokenSequence> = pairs
            .iter()
            .map(|(t, u)| TokenSequence::new(t, u.clone()))
            .collect();
        let clusters = BasicRhymeClusterer::cluster(&seqs);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members[0].surface, "hill");
        assert_eq!(clusters[1].members[0].surface, "cat");
    }
}
