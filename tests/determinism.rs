//! quickcheck-driven determinism invariants (spec.md §8): "analyze(lyrics,
//! flags) is deterministic with fixed injected inputs" and the idempotence
//! property ("analyze(analyze_and_reserialize(...), flags) ... is
//! bit-equal" — checked here as a serialize/deserialize/re-serialize
//! roundtrip, since `AnalysisResult` is the reserialized artifact itself).

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

fn all_flag_combinations() -> Vec<AnalysisFlags> {
    let mut out = Vec::new();
    for multisyllable in [false, true] {
        for multilingual in [false, true] {
            out.push(AnalysisFlags { multisyllable, multilingual, cache: false, oracle: false });
        }
    }
    out
}

#[quickcheck]
fn prop_analysis_is_deterministic(input: Lyrics) -> bool {
    for flags in all_flag_combinations() {
        let a = analyze(&input.0, flags.clone());
        let b = analyze(&input.0, flags);
        if serde_json::to_string(&a).unwrap() != serde_json::to_string(&b).unwrap() {
            return false;
        }
    }
    true
}

#[quickcheck]
fn prop_result_roundtrips_through_its_own_serialization(input: Lyrics) -> bool {
    let flags = AnalysisFlags { multisyllable: true, multilingual: true, ..Default::default() };
    let first = analyze(&input.0, flags);
    let reserialized = serde_json::to_string(&first).unwrap();
    let roundtripped: rhymecore::AnalysisResult = serde_json::from_str(&reserialized).unwrap();
    serde_json::to_string(&roundtripped).unwrap() == reserialized
}
