//! Built-in sample data: the dashboard renders something meaningful
//! before any portfolio CSV has been uploaded.

use crate::models::holding::Holding;
use crate::models::news::{NewsItem, Sentiment};

/// Six large-cap holdings with sparkline history. Allocations sum to
/// ~100 and the values total the overview's $247.5k.
#[must_use]
pub fn sample_holdings() -> Vec<Holding> {
    vec![
        Holding {
            ticker: "AAPL".into(),
            name: "Apple Inc.".into(),
            shares: 312.0,
            price: 178.45,
            change: 2.4,
            value: 55_687.50,
            allocation: 22.5,
            sparkline: vec![170.0, 172.0, 171.0, 175.0, 178.0, 177.0, 178.45],
        },
        Holding {
            ticker: "MSFT".into(),
            name: "Microsoft Corp.".into(),
            shares: 115.0,
            price: 412.30,
            change: 1.8,
            value: 47_520.00,
            allocation: 19.2,
            sparkline: vec![405.0, 408.0, 410.0, 409.0, 411.0, 413.0, 412.30],
        },
        Holding {
            ticker: "GOOGL".into(),
            name: "Alphabet Inc.".into(),
            shares: 291.0,
            price: 142.67,
            change: -0.5,
            value: 41_580.00,
            allocation: 16.8,
            sparkline: vec![145.0, 144.0, 143.0, 142.0, 143.0, 142.5, 142.67],
        },
        Holding {
            ticker: "NVDA".into(),
            name: "NVIDIA Corp.".into(),
            shares: 76.0,
            price: 495.22,
            change: 5.6,
            value: 37_867.50,
            allocation: 15.3,
            sparkline: vec![470.0, 475.0, 480.0, 485.0, 490.0, 492.0, 495.22],
        },
        Holding {
            ticker: "TSLA".into(),
            name: "Tesla Inc.".into(),
            shares: 141.0,
            price: 248.50,
            change: -1.2,
            value: 35_145.00,
            allocation: 14.2,
            sparkline: vec![255.0, 252.0, 250.0, 249.0, 251.0, 248.0, 248.50],
        },
        Holding {
            ticker: "AMZN".into(),
            name: "Amazon.com Inc.".into(),
            shares: 166.0,
            price: 178.35,
            change: 3.1,
            value: 29_700.00,
            allocation: 12.0,
            sparkline: vec![173.0, 174.0, 175.0, 176.0, 177.0, 178.0, 178.35],
        },
    ]
}

/// Four market news cards for the dashboard's news section.
#[must_use]
pub fn sample_news() -> Vec<NewsItem> {
    vec![
        NewsItem {
            id: "1".into(),
            headline: "Federal Reserve Signals Potential Rate Cuts in Coming Months".into(),
            source: "Bloomberg".into(),
            timestamp: "2 hours ago".into(),
            excerpt: "Fed officials indicated a shift in monetary policy stance as inflation \
                      shows signs of cooling. Market analysts predict implications for tech \
                      stocks."
                .into(),
            sentiment: Some(Sentiment::Positive),
            image_url: Some(
                "https://images.pexels.com/photos/534216/pexels-photo-534216.jpeg".into(),
            ),
        },
        NewsItem {
            id: "2".into(),
            headline: "Tech Giants Report Strong Q4 Earnings Amid AI Boom".into(),
            source: "CNBC".into(),
            timestamp: "4 hours ago".into(),
            excerpt: "Major technology companies exceed analyst expectations, driven by robust \
                      demand for artificial intelligence infrastructure and cloud services."
                .into(),
            sentiment: Some(Sentiment::Positive),
            image_url: Some(
                "https://images.pexels.com/photos/3861969/pexels-photo-3861969.jpeg".into(),
            ),
        },
        NewsItem {
            id: "3".into(),
            headline: "Electric Vehicle Market Sees Record Growth in 2024".into(),
            source: "Reuters".into(),
            timestamp: "6 hours ago".into(),
            excerpt: "Global EV sales surge 35% year-over-year as battery technology advances \
                      and charging infrastructure expands across major markets."
                .into(),
            sentiment: Some(Sentiment::Neutral),
            image_url: Some(
                "https://images.pexels.com/photos/110844/pexels-photo-110844.jpeg".into(),
            ),
        },
        NewsItem {
            id: "4".into(),
            headline: "Bond Markets Rally as Treasury Yields Decline".into(),
            source: "Financial Times".into(),
            timestamp: "8 hours ago".into(),
            excerpt: "Fixed income securities attract renewed investor interest as long-term \
                      Treasury yields fall to lowest levels in six months."
                .into(),
            sentiment: Some(Sentiment::Negative),
            image_url: Some(
                "https://images.pexels.com/photos/6801648/pexels-photo-6801648.jpeg".into(),
            ),
        },
    ]
}
