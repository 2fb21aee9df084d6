//! quickcheck-driven structural invariants (spec.md §8): member indices stay
//! in bounds, singleton classes never survive, and cluster/member ordering
//! follows `word_index` regardless of input shape.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rhymecore::{analyze, AnalysisFlags};

#[derive(Debug, Clone)]
struct Lyrics(String);

impl Arbitrary for Lyrics {
    fn arbitrary(g: &mut Gen) -> Self {
        let letters = ["a", "e", "i", "o", "u", "b", "c", "d", "r", "t", "s", "n", "l"];
        let separators = [" ", ", ", "\n", " - ", "! "];

        let word_count = g.size() % 8 + 1;
        let mut out = String::new();
        for i in 0..word_count {
            let word_len = g.size() % 6 + 1;
            for _ in 0..word_len {
                out.push_str(g.choose(&letters).unwrap());
            }
            if i + 1 < word_count {
                out.push_str(g.choose(&separators).unwrap());
            }
        }
        Lyrics(out)
    }
}

#[quickcheck]
fn prop_every_member_index_is_in_bounds(input: Lyrics) -> bool {
    let result = analyze(&input.0, AnalysisFlags { multisyllable: true, ..Default::default() });
    let token_count = result.tokens.len();
    result
        .clusters
        .iter()
        .flat_map(|c| c.members.iter())
        .all(|m| m.word_index < token_count)
}

#[quickcheck]
fn prop_no_singleton_classes_survive(input: Lyrics) -> bool {
    let result = analyze(&input.0, AnalysisFlags::default());
    result.clusters.iter().all(|c| c.members.len() >= 2)
}

#[quickcheck]
fn prop_clusters_ordered_by_smallest_member_index(input: Lyrics) -> bool {
    let result = analyze(&input.0, AnalysisFlags { multisyllable: true, ..Default::default() });
    let firsts: Vec<usize> = result
        .clusters
        .iter()
        .map(|c| c.members.first().map(|m| m.word_index).unwrap_or(usize::MAX))
        .collect();
    firsts.windows(2).all(|pair| pair[0] <= pair[1])
}

#[quickcheck]
fn prop_members_within_a_cluster_are_index_ordered(input: Lyrics) -> bool {
    let result = analyze(&input.0, AnalysisFlags { multisyllable: true, ..Default::default() });
    result.clusters.iter().all(|c| {
        c.members
            .windows(2)
            .all(|pair| pair[0].word_index <= pair[1].word_index)
    })
}
