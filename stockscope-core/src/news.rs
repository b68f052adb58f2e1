//! News ranking pipeline: score, classify, truncate, sort.
//!
//! Pipeline order matters: headlines are first sorted by published
//! timestamp (latest first, lexical on the feed's own strings) and cut to
//! the ten most recent; only then is that subset re-sorted by compound
//! score. The aggregate score sums over the retained items.
//!
//! "No news" is a distinct state (`None`), never conflated with a list
//! whose scores happen to sum to zero.

use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentScorer;

/// A raw headline entry from a news feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub link: String,
    /// Publish timestamp exactly as the feed provides it; compared
    /// lexically, never parsed.
    pub published: String,
}

/// Classification thresholds on the compound score.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Maximum number of headlines retained after the recency cut.
pub const MAX_NEWS_ITEMS: usize = 10;

/// Sentiment category of a scored headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Display color, following the Chinese-market convention where red
    /// marks gains and green marks losses.
    pub fn display_color(self) -> &'static str {
        match self {
            Sentiment::Positive => "red",
            Sentiment::Negative => "green",
            Sentiment::Neutral => "gray",
        }
    }
}

/// A scored headline. Immutable after scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: Headline,
    pub sentiment: Sentiment,
    pub compound: f64,
}

/// The display-ready ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedNews {
    /// At most [`MAX_NEWS_ITEMS`] items, compound score descending.
    pub items: Vec<NewsItem>,
    /// Sum of compound scores over `items`.
    pub aggregate_score: f64,
}

/// Score and rank raw headlines. Returns `None` when the feed is empty.
pub fn rank_news(headlines: Vec<Headline>, scorer: &dyn SentimentScorer) -> Option<RankedNews> {
    if headlines.is_empty() {
        return None;
    }

    let mut items: Vec<NewsItem> = headlines
        .into_iter()
        .map(|headline| {
            let compound = scorer.compound(&headline.title);
            NewsItem {
                sentiment: Sentiment::from_compound(compound),
                compound,
                headline,
            }
        })
        .collect();

    // Latest first, keep the ten most recent.
    items.sort_by(|a, b| b.headline.published.cmp(&a.headline.published));
    items.truncate(MAX_NEWS_ITEMS);

    // Stable: equal scores keep their recency order.
    items.sort_by(|a, b| {
        b.compound
            .partial_cmp(&a.compound)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let aggregate_score = items.iter().map(|i| i.compound).sum();
    Some(RankedNews {
        items,
        aggregate_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scorer that looks the title up in a fixed table.
    struct TableScorer(Vec<(String, f64)>);

    impl SentimentScorer for TableScorer {
        fn compound(&self, text: &str) -> f64 {
            self.0
                .iter()
                .find(|(t, _)| t == text)
                .map(|(_, c)| *c)
                .unwrap_or(0.0)
        }
    }

    fn headline(i: usize) -> Headline {
        Headline {
            title: format!("headline {i}"),
            link: format!("https://example.com/{i}"),
            // zero-padded so lexical order matches numeric order
            published: format!("2024-06-{:02}T10:00:00Z", i + 1),
        }
    }

    #[test]
    fn empty_feed_is_none_not_zero() {
        let scorer = TableScorer(vec![]);
        assert_eq!(rank_news(vec![], &scorer), None);
    }

    #[test]
    fn fifteen_headlines_keep_ten_most_recent_sorted_by_score() {
        // 15 headlines, published day i+1, score rises with i.
        let headlines: Vec<Headline> = (0..15).map(headline).collect();
        let scorer = TableScorer(
            (0..15)
                .map(|i| (format!("headline {i}"), -0.7 + i as f64 * 0.1))
                .collect(),
        );

        let ranked = rank_news(headlines, &scorer).unwrap();
        assert_eq!(ranked.items.len(), 10);

        // The 10 most recent are headlines 5..15.
        for item in &ranked.items {
            let idx: usize = item
                .headline
                .title
                .rsplit(' ')
                .next()
                .unwrap()
                .parse()
                .unwrap();
            assert!(idx >= 5, "kept a stale headline: {idx}");
        }

        // Sorted by compound descending.
        for pair in ranked.items.windows(2) {
            assert!(pair[0].compound >= pair[1].compound);
        }

        // Aggregate = sum over retained scores: i in 5..15 of (-0.7 + 0.1 i).
        let expected: f64 = (5..15).map(|i| -0.7 + i as f64 * 0.1).sum();
        assert!((ranked.aggregate_score - expected).abs() < 1e-9);
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(Sentiment::from_compound(0.05), Sentiment::Positive);
        assert_eq!(Sentiment::from_compound(-0.05), Sentiment::Negative);
        assert_eq!(Sentiment::from_compound(0.049), Sentiment::Neutral);
        assert_eq!(Sentiment::from_compound(-0.049), Sentiment::Neutral);
        assert_eq!(Sentiment::from_compound(0.0), Sentiment::Neutral);
    }

    #[test]
    fn ties_preserve_recency_order() {
        // All scores equal: order after ranking must be latest first.
        let headlines: Vec<Headline> = (0..4).map(headline).collect();
        let scorer = TableScorer((0..4).map(|i| (format!("headline {i}"), 0.3)).collect());
        let ranked = rank_news(headlines, &scorer).unwrap();
        let titles: Vec<&str> = ranked.items.iter().map(|i| i.headline.title.as_str()).collect();
        assert_eq!(titles, ["headline 3", "headline 2", "headline 1", "headline 0"]);
    }

    #[test]
    fn fewer_than_ten_keeps_all() {
        let headlines: Vec<Headline> = (0..3).map(headline).collect();
        let scorer = TableScorer(vec![]);
        let ranked = rank_news(headlines, &scorer).unwrap();
        assert_eq!(ranked.items.len(), 3);
        assert_eq!(ranked.aggregate_score, 0.0);
        assert!(ranked
            .items
            .iter()
            .all(|i| i.sentiment == Sentiment::Neutral));
    }

    #[test]
    fn color_mapping_follows_red_up_convention() {
        assert_eq!(Sentiment::Positive.display_color(), "red");
        assert_eq!(Sentiment::Negative.display_color(), "green");
        assert_eq!(Sentiment::Neutral.display_color(), "gray");
    }
}
