use std::fs;

use penmark::classifier::AuthorClassifier;
use penmark::config::{ClassifierConfig, StopWords, TokenizerConfig, TrainingConfig};
use penmark::document::Document;
use penmark::error::{ErrorKind, Result};
use penmark::model::codec::{MAGIC, read_model};
use tempfile::TempDir;

fn corpus() -> Vec<Document> {
    vec![
        Document::labeled(
            "Whale ship harpoon whale. The sea, the sea!",
            "Melville",
        ),
        Document::labeled("Ahab watched the whale from the deck.", "Melville"),
        Document::labeled("River raft island river. Jim and Huck.", "Twain"),
        Document::labeled("Fog in London, fog up the river.", "Dickens"),
    ]
}

fn queries() -> Vec<&'static str> {
    vec![
        "whale river fog",
        "the raft drifted toward London",
        "harpoon harpoon harpoon",
        "nothing in the vocabulary",
    ]
}

fn assert_same_outputs(a: &AuthorClassifier, b: &AuthorClassifier) -> Result<()> {
    for query in queries() {
        let left = a.classify_text(query)?;
        let right = b.classify_text(query)?;
        assert_eq!(left.len(), right.len());
        for (x, y) in left.iter().zip(right.iter()) {
            assert_eq!(x.label, y.label, "rank order differs for {query:?}");
            assert!((x.probability - y.probability).abs() < 1e-9);
        }
    }
    Ok(())
}

#[test]
fn round_trip_through_bytes() -> Result<()> {
    let classifier = AuthorClassifier::default();
    classifier.train(&corpus())?;

    let mut bytes = Vec::new();
    classifier.save(&mut bytes)?;
    assert_eq!(&bytes[..4], MAGIC);

    let restored = AuthorClassifier::default();
    restored.load(&mut bytes.as_slice())?;
    assert_same_outputs(&classifier, &restored)?;

    let original = classifier.model().unwrap();
    let loaded = restored.model().unwrap();
    assert_eq!(original.metadata(), loaded.metadata());
    assert_eq!(original.labels(), loaded.labels());
    assert_eq!(original.vocabulary(), loaded.vocabulary());
    Ok(())
}

#[test]
fn round_trip_through_file() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("authors.pnmk");

    let classifier = AuthorClassifier::default();
    classifier.train(&corpus())?;
    let written = classifier.save_to_path(&path)?;
    assert_eq!(fs::metadata(&path)?.len(), written);

    let opened = AuthorClassifier::open(&path)?;
    assert_same_outputs(&classifier, &opened)?;

    let reloaded = AuthorClassifier::default();
    reloaded.load_from_path(&path)?;
    assert_same_outputs(&classifier, &reloaded)?;
    Ok(())
}

#[test]
fn custom_configuration_survives_round_trip() -> Result<()> {
    let config = ClassifierConfig {
        tokenizer: TokenizerConfig {
            pattern: r"[A-Za-z]+".to_string(),
            lowercase: false,
            stop_words: StopWords::Custom(vec!["the".to_string(), "The".to_string()]),
        },
        training: TrainingConfig {
            smoothing: 0.25,
            max_vocabulary_size: None,
        },
    };
    let classifier = AuthorClassifier::new(config.clone())?;
    classifier.train(&corpus())?;

    let mut bytes = Vec::new();
    classifier.save(&mut bytes)?;
    let restored = AuthorClassifier::from_reader(&mut bytes.as_slice())?;

    assert_eq!(restored.config().tokenizer, config.tokenizer);
    assert_eq!(restored.config().training.smoothing, 0.25);
    assert_eq!(restored.model().unwrap().tokenizer_config(), &config.tokenizer);
    assert_same_outputs(&classifier, &restored)?;
    Ok(())
}

#[test]
fn corrupted_data_is_rejected() -> Result<()> {
    let classifier = AuthorClassifier::default();
    classifier.train(&corpus())?;
    let mut bytes = Vec::new();
    classifier.save(&mut bytes)?;

    let mut flipped = bytes.clone();
    let last = flipped.len() - 10;
    flipped[last] ^= 0x5a;
    let err = read_model(&mut flipped.as_slice()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);

    let truncated = &bytes[..bytes.len() / 3];
    let err = AuthorClassifier::from_reader(&mut &truncated[..]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);

    let err = AuthorClassifier::from_reader(&mut &b"not a model at all"[..]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);

    let err = AuthorClassifier::from_reader(&mut &b""[..]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);
    Ok(())
}

#[test]
fn saving_without_a_model_is_a_state_error() {
    let temp_dir = TempDir::new().unwrap();
    let classifier = AuthorClassifier::default();

    let err = classifier.save(&mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);

    let err = classifier
        .save_to_path(temp_dir.path().join("empty.pnmk"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
}

#[test]
fn missing_model_file_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = AuthorClassifier::open(temp_dir.path().join("absent.pnmk")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
