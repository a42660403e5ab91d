use docmap::{analyze, AnalysisConfig, Error, SetRole, Split, TfidfParams};
use rand::prelude::*;

fn corpus() -> Vec<&'static str> {
    vec![
        "chat noir dort sur le canape",
        "chat blanc dort au soleil",
        "petit chat noir joue",
        "chat gris dort encore",
        "voiture rouge roule vite",
        "voiture bleue roule en ville",
        "grande voiture rouge garee",
        "voiture noire roule la nuit",
    ]
}

fn config() -> AnalysisConfig {
    AnalysisConfig {
        tfidf: TfidfParams::new(1, 1.0, 1, 1),
        n_components: 2,
        k: 2,
        eigen_max_iter: 2000,
        eigen_tolerance: 1e-10,
        kmeans_max_iter: 100,
        seed: 42,
    }
}

#[test]
fn pipeline_labels_every_document() {
    let docs = corpus();
    let split = Split::new(vec![0, 1, 2, 4, 5, 6], vec![3, 7], docs.len()).unwrap();
    let analysis = analyze(&docs, &split, &config()).unwrap();

    assert_eq!(analysis.features.len(), docs.len());
    assert_eq!(analysis.projected.len(), docs.len());
    assert!(analysis.projected.iter().all(|r| r.len() == 2));
    assert_eq!(analysis.labels.len(), docs.len());
    assert!(analysis.labels.iter().all(|&l| l < 2));
    assert_eq!(analysis.explained_variance_ratio.len(), 2);
    assert!(analysis.explained_variance_ratio[0] >= analysis.explained_variance_ratio[1]);
}

#[test]
fn pipeline_is_reproducible() {
    let docs = corpus();
    let mut rng = StdRng::seed_from_u64(3);
    let split = Split::shuffled(docs.len(), 0.75, &mut rng).unwrap();
    let a = analyze(&docs, &split, &config()).unwrap();
    let b = analyze(&docs, &split, &config()).unwrap();
    assert_eq!(a.labels, b.labels);
    assert_eq!(a.projected, b.projected);
}

#[test]
fn test_rows_do_not_influence_training_projection() {
    let mut docs = corpus();
    let split = Split::new(vec![0, 1, 2, 3, 4, 5, 6], vec![7], docs.len()).unwrap();
    let base = analyze(&docs, &split, &config()).unwrap();

    // Same distinct words, so document frequencies and idf are unchanged;
    // only the held-out row's term frequencies move.
    docs[7] = "voiture voiture noire roule la nuit nuit";
    let changed = analyze(&docs, &split, &config()).unwrap();
    assert_eq!(base.vocabulary, changed.vocabulary);
    assert_ne!(base.features[7], changed.features[7]);
    for &i in split.train() {
        assert_eq!(base.projected[i], changed.projected[i]);
        assert_eq!(base.labels[i], changed.labels[i]);
    }
}

#[test]
fn pipeline_errors_surface() {
    let docs = corpus();
    let split = Split::all(docs.len()).unwrap();

    let mut cfg = config();
    cfg.tfidf = TfidfParams::new(100, 1.0, 1, 1);
    assert!(matches!(
        analyze(&docs, &split, &cfg),
        Err(Error::EmptyVocabulary { .. })
    ));

    let mut cfg = config();
    cfg.n_components = 10_000;
    assert!(matches!(
        analyze(&docs, &split, &cfg),
        Err(Error::InvalidComponentCount { requested: 10_000, .. })
    ));

    let mut cfg = config();
    cfg.eigen_max_iter = 0;
    assert!(matches!(
        analyze(&docs, &split, &cfg),
        Err(Error::InvalidParameter { name: "max_iter", .. })
    ));

    let one = Split::new(vec![0], (1..docs.len()).collect(), docs.len()).unwrap();
    assert!(matches!(
        analyze(&docs, &one, &config()),
        Err(Error::InsufficientTrainData { required: 2, found: 1 })
    ));

    let short = Split::all(3).unwrap();
    assert!(matches!(
        analyze(&docs, &short, &config()),
        Err(Error::DimensionMismatch { .. })
    ));
}

#[test]
fn records_export_as_json() {
    let docs = corpus();
    let split = Split::new(vec![0, 1, 2, 4, 5, 6], vec![3, 7], docs.len()).unwrap();
    let analysis = analyze(&docs, &split, &config()).unwrap();

    let pairs: Vec<(String, &str)> = docs.iter().map(|d| (d.to_uppercase(), *d)).collect();
    let records = analysis.records(&pairs).unwrap();
    assert_eq!(records.len(), docs.len());
    assert_eq!(records[3].set, SetRole::Test);
    assert_eq!(records[0].set, SetRole::Train);
    assert_eq!(records[5].cluster, analysis.labels[5]);

    let json = serde_json::to_value(&records).unwrap();
    assert_eq!(json[3]["set"], "Test");
    assert_eq!(json[0]["cleaned"], docs[0]);
    assert_eq!(json[0]["vector"].as_array().unwrap().len(), 2);

    assert!(analysis.records(&pairs[..2]).is_err());
}

#[test]
fn config_round_trips_through_json() {
    let json = serde_json::to_string(&config()).unwrap();
    let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config());
}
