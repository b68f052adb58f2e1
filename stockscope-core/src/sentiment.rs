//! Sentiment scoring seam.
//!
//! The ranking pipeline only needs a compound polarity score in [-1, 1]
//! per headline, so that is the whole trait. Production uses the VADER
//! lexicon; tests inject fixed scores.

/// Maps a text to a compound polarity score in [-1, 1].
pub trait SentimentScorer {
    fn compound(&self, text: &str) -> f64;
}

/// VADER lexicon scorer.
#[derive(Debug, Default)]
pub struct VaderScorer;

impl VaderScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for VaderScorer {
    fn compound(&self, text: &str) -> f64 {
        let analyzer = vader_sentiment::SentimentIntensityAnalyzer::new();
        analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}
