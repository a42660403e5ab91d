//! TF-IDF → PCA → k-means on a tiny French corpus with a 75/25 split.

use docmap::{analyze, AnalysisConfig, Split, TfidfParams};
use rand::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let docs = [
        "le chat noir dort",
        "le chat blanc dort",
        "un petit chat joue",
        "le chat gris miaule",
        "la voiture rouge roule",
        "la voiture bleue roule",
        "une grande voiture rouge",
        "la voiture noire roule vite",
    ];

    let mut rng = StdRng::seed_from_u64(7);
    let split = Split::shuffled(docs.len(), 0.75, &mut rng)?;

    let config = AnalysisConfig {
        tfidf: TfidfParams::new(1, 0.9, 1, 2),
        n_components: 2,
        k: 2,
        eigen_max_iter: 5000,
        eigen_tolerance: 1e-10,
        kmeans_max_iter: 100,
        seed: 42,
    };
    let analysis = analyze(&docs, &split, &config)?;

    println!("vocabulary: {} terms", analysis.vocabulary.len());
    println!(
        "explained variance: {:.3?}",
        analysis.explained_variance_ratio
    );
    for (i, doc) in docs.iter().enumerate() {
        let v = &analysis.projected[i];
        println!(
            "  {:5} ({:6.2}, {:6.2}) => cluster {}  {}",
            format!("{:?}", split.role(i).unwrap_or(docmap::SetRole::Test)),
            v[0],
            v[1],
            analysis.labels[i],
            doc
        );
    }

    let pairs: Vec<(&str, &str)> = docs.iter().map(|d| (*d, *d)).collect();
    println!("{}", serde_json::to_string_pretty(&analysis.records(&pairs)?)?);
    Ok(())
}
