//! Text vectorization.
//!
//! Turns a corpus of cleaned documents into a dense TF-IDF feature matrix.
//! Cleaning (stop words, punctuation, regex filters) happens upstream; this
//! module only lowercases and splits on whitespace.
//!
//! ## Weighting
//!
//! Each retained n-gram gets the smoothed inverse document frequency
//!
//! ```text
//! idf(t) = ln((N + 1) / (df(t) + 1)) + 1
//! ```
//!
//! and each row holds `tf * idf`, scaled to unit L2 norm. Rows with no
//! vocabulary term stay all-zero.
//!
//! ```rust
//! use docmap::text::{TfidfParams, TfidfVectorizer};
//!
//! let docs = ["le chat noir", "le chat blanc", "la voiture rouge"];
//! let fit = TfidfVectorizer::new(TfidfParams::new(1, 1.0, 1, 1))
//!     .fit_transform(&docs)
//!     .unwrap();
//! assert_eq!(fit.matrix.len(), 3);
//! assert!(fit.vocabulary.get("chat").is_some());
//! ```

mod tfidf;

pub use tfidf::{ngrams, smoothed_idf, tokenize, TfidfFit, TfidfParams, TfidfVectorizer, Vocabulary};
