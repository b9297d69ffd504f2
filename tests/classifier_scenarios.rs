use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use penmark::analysis::Tokenizer;
use penmark::classifier::AuthorClassifier;
use penmark::config::{ClassifierConfig, StopWords, TokenizerConfig};
use penmark::document::Document;
use penmark::error::{ErrorKind, Result};

fn fruit_and_vehicles() -> Vec<Document> {
    vec![
        Document::labeled("apple apple banana", "X").with_title("A"),
        Document::labeled("car car truck", "Y").with_title("B"),
    ]
}

fn three_authors() -> Vec<Document> {
    vec![
        Document::labeled(
            "Call me Ishmael. The whale breached and the ship rolled on the sea.",
            "Melville",
        ),
        Document::labeled(
            "The river carried the raft past the island while Jim slept.",
            "Twain",
        ),
        Document::labeled(
            "It was the best of times, it was the worst of times, in London and Paris.",
            "Dickens",
        ),
    ]
}

#[test]
fn apple_query_prefers_fruit_author() -> Result<()> {
    let classifier = AuthorClassifier::default();
    classifier.train(&fruit_and_vehicles())?;

    let result = classifier.classify(&Document::new("apple apple"))?;
    assert_eq!(result.labels().collect::<Vec<_>>(), vec!["X", "Y"]);
    assert!(result.probability_of("X").unwrap() > result.probability_of("Y").unwrap());
    Ok(())
}

#[test]
fn untrained_classifier_reports_state_error() {
    let classifier = AuthorClassifier::default();
    let err = classifier.classify(&Document::new("apple")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
}

#[test]
fn single_label_training_reports_configuration_error() {
    let classifier = AuthorClassifier::default();
    let err = classifier
        .train(&[
            Document::labeled("apple apple", "X"),
            Document::labeled("banana", "X"),
        ])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(!classifier.is_trained());
}

#[test]
fn probabilities_are_normalized_with_one_entry_per_label() -> Result<()> {
    let classifier = AuthorClassifier::default();
    classifier.train(&three_authors())?;

    let long = "sea ".repeat(5000);
    for query in [
        "the whale and the river",
        "London",
        "",
        "completely unseen words only",
        long.as_str(),
    ] {
        let result = classifier.classify_text(query)?;
        assert_eq!(result.len(), 3);
        let total: f64 = result.iter().map(|p| p.probability).sum();
        assert!((total - 1.0).abs() < 1e-6, "sum {total} for {query:?}");
        for entry in &result {
            assert!((0.0..=1.0).contains(&entry.probability));
        }
    }
    Ok(())
}

#[test]
fn unseen_words_do_not_grow_the_vocabulary() -> Result<()> {
    let classifier = AuthorClassifier::default();
    classifier.train(&three_authors())?;
    let model = classifier.model().unwrap();
    let size = model.vocabulary().len();

    classifier.classify_text("zeppelin quasar xylophone whale")?;
    assert_eq!(classifier.model().unwrap().vocabulary().len(), size);
    assert!(!model.vocabulary().contains("zeppelin"));
    Ok(())
}

#[test]
fn repeating_a_document_keeps_the_ranking() -> Result<()> {
    // One document per label keeps the priors equal.
    let classifier = AuthorClassifier::default();
    classifier.train(&three_authors())?;

    let base = "the whale rolled on the sea past the island in London";
    let expected: Vec<String> = classifier
        .classify_text(base)?
        .labels()
        .map(str::to_string)
        .collect();

    for k in 2..=5 {
        let repeated = vec![base; k].join(" ");
        let result = classifier.classify_text(&repeated)?;
        let labels: Vec<String> = result.labels().map(str::to_string).collect();
        assert_eq!(labels, expected, "ranking changed at k = {k}");
    }
    Ok(())
}

#[test]
fn tokenization_is_deterministic() -> Result<()> {
    let tokenizer = Tokenizer::new(TokenizerConfig::default())?;
    let text = "It was the best of times, it was the worst of times.";
    assert_eq!(tokenizer.terms(text), tokenizer.terms(text));
    assert_eq!(tokenizer.terms(text), vec!["times,", "worst", "times."]);
    Ok(())
}

#[test]
fn stop_words_can_be_disabled() -> Result<()> {
    let config = ClassifierConfig {
        tokenizer: TokenizerConfig {
            stop_words: StopWords::None,
            ..TokenizerConfig::default()
        },
        ..ClassifierConfig::default()
    };
    let classifier = AuthorClassifier::new(config)?;
    classifier.train(&[
        Document::labeled("the the the", "X"),
        Document::labeled("a a a", "Y"),
    ])?;

    let result = classifier.classify_text("the")?;
    assert_eq!(result.best().unwrap().label, "X");
    Ok(())
}

#[test]
fn deferred_documents_train_like_loaded_ones() -> Result<()> {
    let loaded = AuthorClassifier::default();
    loaded.train(&fruit_and_vehicles())?;

    let deferred = AuthorClassifier::default();
    deferred.train(&[
        Document::deferred(|| Ok("apple apple banana".to_string())).with_label("X"),
        Document::deferred(|| Ok("car car truck".to_string())).with_label("Y"),
    ])?;

    let a = loaded.model().unwrap();
    let b = deferred.model().unwrap();
    assert_eq!(a.vocabulary(), b.vocabulary());
    assert_eq!(a.log_likelihoods(), b.log_likelihoods());
    Ok(())
}

#[test]
fn concurrent_classification_during_retraining() -> Result<()> {
    let classifier = Arc::new(AuthorClassifier::default());
    classifier.train(&fruit_and_vehicles())?;

    thread::scope(|scope| {
        for _ in 0..4 {
            let classifier = Arc::clone(&classifier);
            scope.spawn(move || {
                for _ in 0..200 {
                    let result = classifier.classify_text("apple car whale").unwrap();
                    // Either the two-label or the three-label model, never a mix.
                    assert!(result.len() == 2 || result.len() == 3);
                    let total: f64 = result.iter().map(|p| p.probability).sum();
                    assert!((total - 1.0).abs() < 1e-6);
                }
            });
        }
        for _ in 0..10 {
            classifier.train(&three_authors()).unwrap();
            classifier.train(&fruit_and_vehicles()).unwrap();
        }
    });
    Ok(())
}

#[test]
fn overlapping_training_keeps_the_last_model_to_return() -> Result<()> {
    let classifier = Arc::new(AuthorClassifier::default());
    let (started_tx, started_rx) = mpsc::channel();

    let slow = {
        let classifier = Arc::clone(&classifier);
        thread::spawn(move || {
            let slow_doc = Document::deferred(move || {
                let _ = started_tx.send(());
                thread::sleep(Duration::from_millis(300));
                Ok("slow old words".to_string())
            })
            .with_label("OLD_A");
            classifier.train(&[slow_doc, Document::labeled("older words", "OLD_B")])
        })
    };

    // The slow fit is underway before the second one starts.
    started_rx.recv().unwrap();
    classifier.train(&[
        Document::labeled("fresh new words", "NEW_A"),
        Document::labeled("newer words", "NEW_B"),
    ])?;
    assert_eq!(classifier.labels(), vec!["NEW_A", "NEW_B"]);

    slow.join().unwrap()?;
    assert_eq!(classifier.labels(), vec!["NEW_A", "NEW_B"]);
    Ok(())
}

#[test]
fn classification_display_lists_every_label() -> Result<()> {
    let classifier = AuthorClassifier::default();
    classifier.train(&fruit_and_vehicles())?;

    let rendered = classifier.classify_text("apple apple")?.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("  X: "));
    assert!(lines[1].starts_with("  Y: "));
    assert!(lines.iter().all(|line| line.ends_with('%')));
    Ok(())
}
