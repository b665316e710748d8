#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pagination::{Pagination, total_pages};

/// One catalog entry from the `imagenes` table.
///
/// Field names on the wire follow the column names of the backing table so
/// the frontend can keep reading them unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImageRecord {
    #[cfg_attr(feature = "serde", serde(rename = "uuid"))]
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "url_image"))]
    pub image_url: String,
    #[cfg_attr(feature = "serde", serde(rename = "url_thumbnail"))]
    pub thumbnail_url: String,
    pub hashtags: Vec<String>,
    /// RFC 3339 timestamp, passed through untouched.
    #[cfg_attr(feature = "serde", serde(rename = "xata_createdat"))]
    pub created_at: String,
    pub size_kb: i64,
}

/// A single page of listing results plus the totals needed to page further.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImagePage {
    pub results: Vec<ImageRecord>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl ImagePage {
    pub fn new(
        results: Vec<ImageRecord>,
        pagination: Pagination,
        total: i64,
    ) -> Self {
        Self {
            results,
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages: total_pages(total, pagination.limit),
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ImageRecord {
        ImageRecord {
            id: "rec_01".into(),
            image_url: "https://cdn.example.com/a.png".into(),
            thumbnail_url: "https://cdn.example.com/a_thumb.png".into(),
            hashtags: vec!["mar".into(), "playa".into()],
            created_at: "2025-03-01T10:00:00Z".into(),
            size_kb: 512,
        }
    }

    #[test]
    fn image_record_uses_column_names_on_the_wire() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "uuid": "rec_01",
                "url_image": "https://cdn.example.com/a.png",
                "url_thumbnail": "https://cdn.example.com/a_thumb.png",
                "hashtags": ["mar", "playa"],
                "xata_createdat": "2025-03-01T10:00:00Z",
                "size_kb": 512,
            })
        );
    }

    #[test]
    fn empty_page_serializes_results_as_array() {
        let page = ImagePage::new(Vec::new(), Pagination::default(), 0);
        let value = serde_json::to_value(page).unwrap();
        assert_eq!(value["results"], json!([]));
        assert_eq!(value["total_pages"], json!(0));
        assert_eq!(value["page"], json!(1));
        assert_eq!(value["limit"], json!(20));
    }
}
