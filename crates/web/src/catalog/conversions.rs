//! Conversion from catalog wire types to [`BookSummary`].

use super::types::{BookSummary, DEFAULT_COVER_URL, UNKNOWN_AUTHOR, Volume, VolumesResponse};

pub(super) fn convert_volumes(response: VolumesResponse) -> Vec<BookSummary> {
    response
        .items
        .unwrap_or_default()
        .into_iter()
        .map(convert_volume)
        .collect()
}

fn convert_volume(volume: Volume) -> BookSummary {
    let info = volume.volume_info;

    let author = info
        .authors
        .filter(|authors| !authors.is_empty())
        .map_or_else(|| UNKNOWN_AUTHOR.to_string(), |authors| authors.join(", "));

    let cover_url = info
        .image_links
        .and_then(|links| links.thumbnail.or(links.small_thumbnail))
        .unwrap_or_else(|| DEFAULT_COVER_URL.to_string());

    BookSummary {
        external_id: volume.id,
        title: info.title.unwrap_or_default(),
        author,
        cover_url,
        publish_date: info.published_date,
        info_url: info.info_link,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<BookSummary> {
        convert_volumes(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_full_volume() {
        let books = parse(
            r#"{"items":[{"id":"abc","volumeInfo":{
                "title":"Good Omens",
                "authors":["Terry Pratchett","Neil Gaiman"],
                "publishedDate":"1990",
                "imageLinks":{"thumbnail":"http://img/abc"},
                "infoLink":"http://books/abc"
            }}]}"#,
        );
        assert_eq!(
            books,
            vec![BookSummary {
                external_id: "abc".into(),
                title: "Good Omens".into(),
                author: "Terry Pratchett, Neil Gaiman".into(),
                cover_url: "http://img/abc".into(),
                publish_date: Some("1990".into()),
                info_url: Some("http://books/abc".into()),
            }]
        );
    }

    #[test]
    fn test_missing_authors_and_cover() {
        let books = parse(r#"{"items":[{"id":"x","volumeInfo":{"title":"Anon"}}]}"#);
        let book = &books[0];
        assert_eq!(book.author, UNKNOWN_AUTHOR);
        assert_eq!(book.cover_url, DEFAULT_COVER_URL);
        assert!(book.publish_date.is_none());
    }

    #[test]
    fn test_empty_author_list_is_unknown() {
        let books = parse(r#"{"items":[{"id":"x","volumeInfo":{"title":"T","authors":[]}}]}"#);
        assert_eq!(books[0].author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_small_thumbnail_fallback() {
        let books = parse(
            r#"{"items":[{"id":"x","volumeInfo":{"imageLinks":{"smallThumbnail":"http://s"}}}]}"#,
        );
        assert_eq!(books[0].cover_url, "http://s");
    }

    #[test]
    fn test_no_items_is_empty() {
        assert!(parse(r#"{"kind":"books#volumes","totalItems":0}"#).is_empty());
    }
}
