//! Filing and news records, searched by title and headline respectively.

use crate::domain::search::Searchable;
use chrono::{DateTime, Utc};
use scraper::Html;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilingRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Rich text (HTML) as published in the filing feed.
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
}

impl FilingRecord {
    pub fn plain_summary(&self) -> String {
        strip_markup(&self.summary)
    }
}

impl Searchable for FilingRecord {
    fn search_text(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewsRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
    /// Publication time, epoch seconds.
    #[serde(deserialize_with = "null_as_default")]
    pub datetime: i64,
}

impl NewsRecord {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.datetime, 0)
    }
}

impl Searchable for NewsRecord {
    fn search_text(&self) -> &str {
        &self.headline
    }
}

/// Feeds send `null` for fields they have no value for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Text content of an HTML fragment with whitespace collapsed.
fn strip_markup(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filing_searches_title() {
        let filing = FilingRecord {
            title: "10-Q - Quarterly report".into(),
            summary: "<b>Filed:</b> 2024-05-01".into(),
            link: "https://example.com/f".into(),
        };
        assert_eq!(filing.search_text(), "10-Q - Quarterly report");
    }

    #[test]
    fn plain_summary_strips_tags_and_entities() {
        let filing = FilingRecord {
            summary: "<b>Filed:</b> 2024-05-01 <b>AccNo:</b> 0001&nbsp;&amp; more<br>Size: 2 MB"
                .into(),
            ..FilingRecord::default()
        };
        assert_eq!(
            filing.plain_summary(),
            "Filed: 2024-05-01 AccNo: 0001 & more Size: 2 MB"
        );
    }

    #[test]
    fn news_searches_headline() {
        let news = NewsRecord {
            headline: "Chipmaker beats estimates".into(),
            ..NewsRecord::default()
        };
        assert_eq!(news.search_text(), "Chipmaker beats estimates");
    }

    #[test]
    fn news_published_at_converts_epoch() {
        let news = NewsRecord {
            datetime: 1_700_000_000,
            ..NewsRecord::default()
        };
        let at = news.published_at().unwrap();
        assert_eq!(at.format("%Y-%m-%d %H:%M").to_string(), "2023-11-14 22:13");
    }

    #[test]
    fn records_deserialize_with_missing_fields() {
        let news: NewsRecord =
            serde_json::from_str(r#"{"headline":"x","datetime":5}"#).unwrap();
        assert_eq!(news.source, "");
        assert_eq!(news.datetime, 5);
        let filing: FilingRecord = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert_eq!(filing.link, "");
    }

    #[test]
    fn null_fields_read_as_empty() {
        let news: Vec<NewsRecord> = serde_json::from_str(
            r#"[{"headline":"h","summary":null,"url":"u","source":null,"datetime":null},
                {"headline":"k","summary":"s","url":"v","source":"Wire","datetime":7}]"#,
        )
        .unwrap();
        assert_eq!(news.len(), 2);
        assert_eq!(news[0].summary, "");
        assert_eq!(news[0].source, "");
        assert_eq!(news[0].datetime, 0);
        assert_eq!(news[1].datetime, 7);

        let filing: FilingRecord =
            serde_json::from_str(r#"{"title":"t","summary":null,"link":null}"#).unwrap();
        assert_eq!(filing.summary, "");
        assert_eq!(filing.plain_summary(), "");
    }

    #[test]
    fn plain_summary_decodes_named_and_numeric_entities() {
        let filing = FilingRecord {
            summary: "O&#x27;Neil &rsquo;s <a title=\"a > b\">report</a> &#169; 2024".into(),
            ..FilingRecord::default()
        };
        assert_eq!(filing.plain_summary(), "O'Neil \u{2019}s report \u{a9} 2024");
    }
}
