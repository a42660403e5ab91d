use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Options for [`TfidfVectorizer`]. Every field is required.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TfidfParams {
    /// Minimum number of documents a term must appear in (>= 1).
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in, in `(0, 1]`.
    pub max_df: f64,
    /// Shortest n-gram length (>= 1).
    pub ngram_min: usize,
    /// Longest n-gram length (>= `ngram_min`).
    pub ngram_max: usize,
}

impl TfidfParams {
    /// Build a parameter set.
    pub fn new(min_df: usize, max_df: f64, ngram_min: usize, ngram_max: usize) -> Self {
        Self {
            min_df,
            max_df,
            ngram_min,
            ngram_max,
        }
    }

    /// Check the documented ranges.
    pub fn validate(&self) -> Result<()> {
        if self.min_df == 0 {
            return Err(Error::InvalidParameter {
                name: "min_df",
                message: "must be at least 1",
            });
        }
        if !(self.max_df > 0.0 && self.max_df <= 1.0) {
            return Err(Error::InvalidParameter {
                name: "max_df",
                message: "must be in (0, 1]",
            });
        }
        if self.ngram_min == 0 {
            return Err(Error::InvalidParameter {
                name: "ngram_min",
                message: "must be at least 1",
            });
        }
        if self.ngram_max < self.ngram_min {
            return Err(Error::InvalidParameter {
                name: "ngram_max",
                message: "must be at least ngram_min",
            });
        }
        Ok(())
    }
}

/// Lexicographically sorted n-gram terms; position is the column index.
///
/// Serializes as the bare term list. Loading rejects lists that are not
/// strictly increasing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Index terms already sorted and distinct.
    fn from_sorted(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self { terms, index }
    }

    /// Column index of `term`, if it survived filtering.
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term at column `col`.
    pub fn term(&self, col: usize) -> Option<&str> {
        self.terms.get(col).map(String::as_str)
    }

    /// All terms in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Number of terms (feature count).
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Always false for a fitted vocabulary.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = Error;

    fn try_from(terms: Vec<String>) -> Result<Self> {
        if !terms.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::InvalidParameter {
                name: "vocabulary",
                message: "terms must be sorted and distinct",
            });
        }
        Ok(Self::from_sorted(terms))
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(v: Vocabulary) -> Self {
        v.terms
    }
}

/// Output of [`TfidfVectorizer::fit_transform`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TfidfFit {
    /// One row per document, one column per vocabulary term.
    pub matrix: Vec<Vec<f64>>,
    /// Column labels.
    pub vocabulary: Vocabulary,
    /// Smoothed idf per column.
    pub idf: Vec<f64>,
    /// Document frequency per column.
    pub document_frequency: Vec<usize>,
}

/// TF-IDF vectorizer over word n-grams.
#[derive(Clone, Debug)]
pub struct TfidfVectorizer {
    params: TfidfParams,
}

impl TfidfVectorizer {
    /// Create a vectorizer.
    pub fn new(params: TfidfParams) -> Self {
        Self { params }
    }

    /// Configured options.
    pub fn params(&self) -> &TfidfParams {
        &self.params
    }

    /// Build the vocabulary from `documents` and weight every document against it.
    ///
    /// Pure: identical documents and options always give the same matrix and
    /// column order.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<TfidfFit> {
        self.params.validate()?;
        if documents.is_empty() {
            return Err(Error::EmptyInput);
        }
        let n_docs = documents.len();

        let doc_grams: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| {
                ngrams(
                    &tokenize(doc.as_ref()),
                    self.params.ngram_min,
                    self.params.ngram_max,
                )
            })
            .collect();

        // Sorted map: iteration order is the final column order.
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for grams in &doc_grams {
            let unique: HashSet<&str> = grams.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let n = n_docs as f64;
        let (terms, document_frequency): (Vec<String>, Vec<usize>) = df
            .into_iter()
            .filter(|&(_, count)| {
                count >= self.params.min_df && count as f64 / n <= self.params.max_df
            })
            .map(|(term, count)| (term.to_string(), count))
            .unzip();

        if terms.is_empty() {
            return Err(Error::EmptyVocabulary {
                min_df: self.params.min_df,
                max_df: self.params.max_df,
            });
        }

        let vocabulary = Vocabulary::from_sorted(terms);
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&count| smoothed_idf(n_docs, count))
            .collect();

        let matrix: Vec<Vec<f64>> = doc_grams
            .iter()
            .map(|grams| {
                let mut row = vec![0.0; vocabulary.len()];
                for gram in grams {
                    if let Some(col) = vocabulary.get(gram) {
                        row[col] += 1.0;
                    }
                }
                for (w, &weight) in row.iter_mut().zip(idf.iter()) {
                    *w *= weight;
                }
                let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for w in &mut row {
                        *w /= norm;
                    }
                }
                row
            })
            .collect();

        debug!(
            documents = n_docs,
            features = vocabulary.len(),
            "fitted tf-idf vocabulary"
        );

        Ok(TfidfFit {
            matrix,
            vocabulary,
            idf,
            document_frequency,
        })
    }
}

/// Lowercase and split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Contiguous token n-grams for every length in `min..=max`, joined by a space.
///
/// Lengths longer than the token sequence contribute nothing.
pub fn ngrams(tokens: &[String], min: usize, max: usize) -> Vec<String> {
    let mut out = Vec::new();
    for n in min.max(1)..=max {
        if n > tokens.len() {
            break;
        }
        out.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    out
}

/// Smoothed inverse document frequency: `ln((N + 1) / (df + 1)) + 1`.
pub fn smoothed_idf(n_docs: usize, df: usize) -> f64 {
    ((n_docs as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
}
