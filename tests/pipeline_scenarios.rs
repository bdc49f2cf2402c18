//! End-to-end behaviour of the admission pipeline on small synthetic inputs.

use wordlist_core::core::types::normalize;
use wordlist_core::{
    AdmissionPipeline, CategoryFilters, CategoryTables, LexicalLimits, PipelineConfig,
    PipelineState, QualityTier, RejectionReason,
};

fn filters() -> CategoryFilters {
    CategoryFilters::from_tables(&CategoryTables {
        proper_nouns: vec!["moscow".to_string(), "london".to_string()],
        abbreviations: vec!["etc".to_string()],
        foreign_words: vec!["niente".to_string()],
        archaic_words: vec!["thou".to_string()],
        technical_terms: vec!["mutex".to_string()],
    })
}

fn config(target_size: usize) -> PipelineConfig {
    PipelineConfig { target_size, ..PipelineConfig::default() }
}

fn reason_of(outcomes: &[wordlist_core::ValidationOutcome], index: usize) -> Option<RejectionReason> {
    outcomes[index].reason
}

#[test]
fn small_corpus_under_fills_with_expected_rejections() {
    let cfg = PipelineConfig {
        target_size: 5,
        limits: LexicalLimits { max_consecutive_consonants: 3, ..LexicalLimits::default() },
        ..PipelineConfig::default()
    };
    let candidates = ["cat", "xyz", "aaa", "strength", "tree", "moscow", "cat", "hisss"];
    let run = AdmissionPipeline::run(cfg, filters(), ["abandon", "ability"], candidates).unwrap();

    assert_eq!(run.words, ["abandon", "ability", "cat", "tree"]);
    assert!(run.report.under_filled);
    assert_eq!(run.report.shortfall(), 1);
    assert_eq!(run.report.foundation_count, 2);

    let outcomes = &run.outcomes;
    assert_eq!(outcomes.len(), candidates.len());
    assert!(outcomes[0].accepted);
    assert_eq!(reason_of(outcomes, 1), Some(RejectionReason::NoVowels));
    // No consonants is checked before tripled letters.
    assert_eq!(reason_of(outcomes, 2), Some(RejectionReason::NoConsonants));
    assert_eq!(reason_of(outcomes, 3), Some(RejectionReason::TooManyConsecutiveConsonants));
    assert!(outcomes[4].accepted);
    assert_eq!(reason_of(outcomes, 5), Some(RejectionReason::ProperNoun));
    assert_eq!(reason_of(outcomes, 6), Some(RejectionReason::Duplicate));
    assert_eq!(reason_of(outcomes, 7), Some(RejectionReason::TripleLetterPattern));

    assert_eq!(run.report.total_rejected, 6);

    let analysis = &run.report.analysis;
    assert_eq!(analysis.total_words, 4);
    assert_eq!(analysis.length_distribution[&7], 2);
    // abandon, ability
    assert_eq!(analysis.starts_with_vowel, 2);
    // tree
    assert_eq!(analysis.contains_double, 1);
    assert_eq!(analysis.cvc, 1);
    assert!(analysis.mean_score.is_some());
    assert_eq!(run.report.rejection_histogram[&RejectionReason::Duplicate], 1);
}

#[test]
fn default_limits_admit_four_consonant_runs() {
    let pipeline = AdmissionPipeline::new(config(10), filters()).unwrap();
    assert!(pipeline.evaluate("strength").accepted);
    assert_eq!(
        pipeline.evaluate("angstrom").reason,
        Some(RejectionReason::TooManyConsecutiveConsonants)
    );
}

#[test]
fn reaches_exact_target_and_stops() {
    let candidates = ["cat", "tree", "lemon", "melon", "tiger", "river"];
    let run = AdmissionPipeline::run(config(4), filters(), ["abandon"], candidates).unwrap();
    assert_eq!(run.words, ["abandon", "cat", "tree", "lemon"]);
    assert!(!run.report.under_filled);
    assert_eq!(run.report.achieved, 4);
    // Scanning stopped at the candidate that filled the list.
    assert_eq!(run.outcomes.len(), 3);
}

#[test]
fn foundation_words_lead_and_are_never_rescored() {
    // "rhythm" has no vowels and would be rejected as a candidate.
    let foundation = ["zoo", "rhythm", "abandon"];
    let run = AdmissionPipeline::run(config(5), filters(), foundation, ["cat", "rhythm", "tree"]).unwrap();
    assert_eq!(&run.words[..3], ["zoo", "rhythm", "abandon"]);
    assert_eq!(run.outcomes[1].reason, Some(RejectionReason::Duplicate));
    assert_eq!(run.words.len(), 5);
}

#[test]
fn same_inputs_give_identical_lists() {
    let candidates: Vec<String> = ["river", "cat", "queue", "table", "lemon", "moscow", "tiger", "cat"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let first = AdmissionPipeline::run(config(6), filters(), ["abandon"], &candidates).unwrap();
    let second = AdmissionPipeline::run(config(6), filters(), ["abandon"], &candidates).unwrap();
    assert_eq!(first.words, second.words);
    assert_eq!(first.outcomes, second.outcomes);
}

#[test]
fn case_and_whitespace_variants_are_duplicates() {
    let run = AdmissionPipeline::run(config(10), filters(), ["abandon"], ["Cat", " cat ", "CAT", "Abandon"]).unwrap();
    assert_eq!(run.words, ["abandon", "cat"]);
    let duplicates = run
        .outcomes
        .iter()
        .filter(|o| o.reason == Some(RejectionReason::Duplicate))
        .count();
    assert_eq!(duplicates, 3);
}

#[test]
fn length_boundaries() {
    let pipeline = AdmissionPipeline::new(config(10), filters()).unwrap();
    assert_eq!(pipeline.evaluate("at").reason, Some(RejectionReason::LengthOutOfRange));
    assert_eq!(
        pipeline.evaluate("international").reason,
        Some(RejectionReason::LengthOutOfRange)
    );
    assert!(pipeline.evaluate("cat").accepted);
    assert!(pipeline.evaluate("relationship").accepted);
}

#[test]
fn non_ascii_lookalikes_fail_the_alphabet_rule() {
    let mut pipeline = AdmissionPipeline::new(config(10), filters()).unwrap();
    pipeline.seed(["kite"]).unwrap();
    let outcome = pipeline.evaluate("\u{212A}ite");
    assert_eq!(outcome.reason, Some(RejectionReason::NonAlphabetic));
    assert_ne!(outcome.word, "kite");
    assert_eq!(pipeline.evaluate("\u{0130}con").reason, Some(RejectionReason::NonAlphabetic));
}

#[test]
fn every_category_filter_applies() {
    let pipeline = AdmissionPipeline::new(config(10), filters()).unwrap();
    assert_eq!(pipeline.evaluate("London").reason, Some(RejectionReason::ProperNoun));
    assert_eq!(pipeline.evaluate("etc").reason, Some(RejectionReason::Abbreviation));
    assert_eq!(pipeline.evaluate("niente").reason, Some(RejectionReason::ForeignWord));
    assert_eq!(pipeline.evaluate("thou").reason, Some(RejectionReason::ArchaicWord));
    assert_eq!(pipeline.evaluate("mutex").reason, Some(RejectionReason::TechnicalTerm));
}

#[test]
fn bundled_tables_reject_known_entries() {
    let pipeline = AdmissionPipeline::new(config(10), CategoryFilters::bundled().unwrap()).unwrap();
    assert_eq!(pipeline.evaluate("moscow").reason, Some(RejectionReason::ProperNoun));
    assert_eq!(pipeline.evaluate("hath").reason, Some(RejectionReason::ArchaicWord));
    assert!(pipeline.evaluate("table").accepted);
}

#[test]
fn doubled_openings_follow_the_allow_list() {
    let strict = AdmissionPipeline::new(config(10), CategoryFilters::empty()).unwrap();
    assert_eq!(strict.evaluate("eerie").reason, Some(RejectionReason::UnusualStartingPattern));

    let mut cfg = config(10);
    cfg.limits.doubled_opening_allow_list = vec!["ee".to_string()];
    let relaxed = AdmissionPipeline::new(cfg, CategoryFilters::empty()).unwrap();
    assert!(relaxed.evaluate("eerie").accepted);
    assert_eq!(relaxed.evaluate("llama").reason, Some(RejectionReason::UnusualStartingPattern));
}

#[test]
fn well_formed_words_score_excellent() {
    let pipeline = AdmissionPipeline::new(config(10), CategoryFilters::empty()).unwrap();
    for word in ["table", "lemon", "tiger"] {
        let outcome = pipeline.evaluate(word);
        assert!(outcome.accepted, "{word} should be accepted");
        assert!(outcome.tier >= QualityTier::Excellent, "{word} scored {}", outcome.score);
    }
}

#[test]
fn empty_candidate_stream_completes_under_filled() {
    let mut pipeline = AdmissionPipeline::new(config(3), filters()).unwrap();
    pipeline.seed(["abandon"]).unwrap();
    assert_eq!(pipeline.scan(Vec::<String>::new()), PipelineState::Complete);
    let run = pipeline.finish().unwrap();
    assert_eq!(run.words, ["abandon"]);
    assert!(run.report.under_filled);
    assert!(run.report.batches.is_empty());
}

#[test]
fn batches_partition_the_scan() {
    let mut cfg = config(100);
    cfg.batch_size = 3;
    let candidates = ["cat", "xyz", "tree", "lemon", "qqq", "tiger", "river"];
    let run = AdmissionPipeline::run(cfg, filters(), Vec::<String>::new(), candidates).unwrap();
    let sizes: Vec<usize> = run.report.batches.iter().map(|b| b.processed).collect();
    assert_eq!(sizes, [3, 3, 1]);
    let accepted: usize = run.report.batches.iter().map(|b| b.accepted).sum();
    assert_eq!(accepted, run.report.total_accepted);
}

#[test]
fn accepted_words_are_normalized() {
    let run = AdmissionPipeline::run(config(3), filters(), [" Abandon "], ["TREE", "Lemon"]).unwrap();
    for word in &run.words {
        assert_eq!(word, &normalize(word));
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_scan_matches_serial_scan() {
    let candidates: Vec<String> = (0..400)
        .map(|i| match i % 7 {
            0 => "cat".to_string(),
            1 => format!("tree{}", i),
            2 => "lemon".to_string(),
            3 => "xyz".to_string(),
            4 => ["tiger", "river", "melon", "paper", "table"][i % 5].to_string(),
            5 => "moscow".to_string(),
            _ => ["banana", "camera", "dinner", "garden", "window", "yellow"][i % 6].to_string(),
        })
        .collect();

    for batch_size in [1, 4, 64] {
        let mut cfg = config(12);
        cfg.batch_size = batch_size;

        let mut serial = AdmissionPipeline::new(cfg.clone(), filters()).unwrap();
        serial.seed(["abandon", "ability"]).unwrap();
        serial.scan(&candidates);
        let serial = serial.finish().unwrap();

        let mut parallel = AdmissionPipeline::new(cfg, filters()).unwrap();
        parallel.seed(["abandon", "ability"]).unwrap();
        parallel.scan_parallel(&candidates);
        let parallel = parallel.finish().unwrap();

        assert_eq!(serial.words, parallel.words);
        assert_eq!(serial.outcomes, parallel.outcomes);
        assert_eq!(serial.report, parallel.report);
    }
}
