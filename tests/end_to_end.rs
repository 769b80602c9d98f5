use indicatif::ProgressBar;
use wordle_bitset::constraint::{ConstraintSet, apply_history, cross_check, filter};
use wordle_bitset::core::{Feedback, Tag, Word};
use wordle_bitset::index::{CandidateIndex, cache};
use wordle_bitset::search::{Metric, SearchEngine, Sequential};

fn words(list: &[&str]) -> Vec<Word> {
    list.iter().map(|w| Word::new(*w).unwrap()).collect()
}

fn four_word_index() -> CandidateIndex {
    let vocabulary = words(&["crane", "slate", "crate", "speed"]);
    CandidateIndex::build(&vocabulary, &vocabulary, &ProgressBar::hidden())
}

fn brute_force(index: &CandidateIndex, guess: usize, feedback: Feedback) -> Vec<usize> {
    index
        .answers()
        .iter()
        .enumerate()
        .filter(|(_, answer)| Feedback::calculate(&index.guesses()[guess], answer) == feedback)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn filtering_matches_brute_force_on_small_vocabulary() {
    let index = four_word_index();

    for guess in 0..index.guesses().len() {
        for answer in 0..index.answers().len() {
            let feedback = index.feedback(guess, answer);
            let bitset: Vec<usize> = filter(&index, index.answer_set(), guess, feedback)
                .iter()
                .collect();
            let constraints = ConstraintSet::from_feedback(&index.guesses()[guess], feedback);
            let structural: Vec<usize> = constraints.matching(index.answers()).iter().collect();

            let expected = brute_force(&index, guess, feedback);
            assert_eq!(bitset, expected);
            assert_eq!(structural, expected);
            assert!(cross_check(&index, None, guess, answer).agrees());
        }
    }
}

#[test]
fn crane_against_crate() {
    let index = four_word_index();
    let crane = index.guess_id("crane").unwrap();
    let crate_ = index.answer_id("crate").unwrap();

    let feedback = index.feedback(crane, crate_);
    assert_eq!(
        feedback.tags(),
        [Tag::Correct, Tag::Correct, Tag::Correct, Tag::Absent, Tag::Correct]
    );

    let remaining = apply_history(&index, &[(crane, feedback)]);
    assert_eq!(remaining.iter().collect::<Vec<_>>(), vec![crate_]);
}

#[test]
fn speed_against_abide_regression() {
    let speed = Word::new("speed").unwrap();
    let abide = Word::new("abide").unwrap();
    // The first 'e' claims abide's only 'e'; 'd' is present elsewhere
    assert_eq!(
        Feedback::calculate(&speed, &abide).tags(),
        [Tag::Absent, Tag::Absent, Tag::Present, Tag::Absent, Tag::Present]
    );
}

#[test]
fn cache_round_trip_preserves_search() {
    let guesses = words(&["crane", "slate", "crate", "speed", "abide", "light", "dowry"]);
    let answers = words(&["crane", "slate", "crate", "speed", "abide"]);
    let path = std::env::temp_dir().join(format!("wordle_bitset_e2e_{}.bin", std::process::id()));
    std::fs::remove_file(&path).ok();

    let built = cache::load_or_build(&path, &guesses, &answers, &ProgressBar::hidden());
    let loaded = cache::load(&path, &guesses, &answers).unwrap();
    std::fs::remove_file(&path).ok();

    let a = SearchEngine::new(&built, Metric::Average)
        .best_pair(&ProgressBar::hidden())
        .unwrap();
    let b = SearchEngine::new(&loaded, Metric::Average)
        .best_pair(&ProgressBar::hidden())
        .unwrap();
    assert_eq!(a.ids, b.ids);
    assert!((a.score - b.score).abs() < f64::EPSILON);
}

#[test]
fn parallel_and_sequential_searches_agree() {
    let guesses = words(&[
        "crane", "slate", "crate", "irate", "grate", "fight", "light", "might", "dowry", "plumb",
        "geese", "vouch",
    ]);
    let answers = words(&["crate", "irate", "grate", "fight", "light", "might", "geese"]);
    let index = CandidateIndex::build(&guesses, &answers, &ProgressBar::hidden());

    for metric in [Metric::Average, Metric::WorstCase] {
        let parallel = SearchEngine::new(&index, metric);
        let sequential = SearchEngine::with_executor(&index, metric, Sequential);

        let p = parallel.best_pair(&ProgressBar::hidden()).unwrap();
        let s = sequential.best_pair(&ProgressBar::hidden()).unwrap();
        assert_eq!(p.ids, s.ids);
        assert!((p.score - s.score).abs() < f64::EPSILON);

        let p = parallel.best_guess(&ProgressBar::hidden()).unwrap();
        let s = sequential.best_guess(&ProgressBar::hidden()).unwrap();
        assert_eq!(p.ids, s.ids);
    }
}
