//! Request validation and the two lookup entry points.
//!
//! Both the HTTP server and the CLI go through [`passage_by_id`] and
//! [`verses_by_range`], so they validate input and report failures the
//! same way. Validation happens before any store call.

use thiserror::Error;

use crate::passage::{build_passage, build_range, PassageResponse, RangeResponse};
use crate::resolve::{resolve_passage, PassageMode, ResolveError};
use crate::store::{StoreError, VerseStore};

pub const INVALID_ID: &str = "ID inválido";
pub const INITIAL_VERSE_NOT_FOUND: &str = "Versículo inicial não encontrado";
pub const INVALID_PARAMS: &str = "Parâmetros inválidos";
pub const INVALID_RANGE_FORMAT: &str =
    "Range inválido, use formato versiculoStart-versiculoEnd (ex: 1-5)";
pub const VERSES_NOT_FOUND: &str = "Versículos não encontrados";

/// Failure of a lookup, classified for the boundary.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Malformed or out-of-domain input. Never reaches the store.
    #[error("{0}")]
    Validation(&'static str),

    /// Valid input with no matching record.
    #[error("{0}")]
    NotFound(&'static str),

    /// Extend mode found nothing after the initial verse.
    #[error("Nenhum versículo encontrado a partir do ID informado.")]
    Exhausted,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<ResolveError> for LookupError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NoSubsequentVerse => LookupError::Exhausted,
            ResolveError::Store(e) => LookupError::Storage(e),
        }
    }
}

/// Parse a verse id path segment. Only positive integers are accepted.
pub fn parse_verse_id(raw: &str) -> Result<i64, LookupError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(LookupError::Validation(INVALID_ID)),
    }
}

/// The `findEnd` flag is on only for the literal string `"true"`.
pub fn find_end_flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}

/// A validated book / chapter / verse-range request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    /// Trimmed, lowercased book name.
    pub book: String,
    pub chapter: i64,
    pub start: i64,
    pub end: i64,
}

impl RangeQuery {
    /// Validate raw path segments. `range` is either `N` or `N-M` with
    /// `M >= N`.
    pub fn parse(book: &str, chapter: &str, range: &str) -> Result<Self, LookupError> {
        let book = book.trim().to_lowercase();
        let range = range.trim();
        let chapter = chapter.trim().parse::<i64>().ok();

        let chapter = match chapter {
            Some(c) if !book.is_empty() && !range.is_empty() => c,
            _ => return Err(LookupError::Validation(INVALID_PARAMS)),
        };

        let (start, end) = if range.contains('-') {
            let parts: Vec<&str> = range.split('-').collect();
            if parts.len() != 2 {
                return Err(LookupError::Validation(INVALID_RANGE_FORMAT));
            }
            (parse_number(parts[0])?, parse_number(parts[1])?)
        } else {
            let n = parse_number(range)?;
            (n, n)
        };

        if chapter <= 0 || start <= 0 || end <= 0 || end < start {
            return Err(LookupError::Validation(INVALID_PARAMS));
        }

        Ok(Self {
            book,
            chapter,
            start,
            end,
        })
    }
}

fn parse_number(raw: &str) -> Result<i64, LookupError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| LookupError::Validation(INVALID_PARAMS))
}

/// Look up the verse at `raw_id` and, when `find_end` is set, extend it to
/// the end of its passage.
pub async fn passage_by_id<S>(
    store: &S,
    raw_id: &str,
    find_end: bool,
) -> Result<PassageResponse, LookupError>
where
    S: VerseStore + ?Sized,
{
    let id = parse_verse_id(raw_id)?;
    let initial = store
        .get_verse(id)
        .await?
        .ok_or(LookupError::NotFound(INITIAL_VERSE_NOT_FOUND))?;

    let passage =
        resolve_passage(store, initial.clone(), PassageMode::from_find_end(find_end)).await?;
    Ok(build_passage(&initial, &passage))
}

/// Fetch the verses selected by a validated [`RangeQuery`].
pub async fn verses_by_range<S>(store: &S, query: &RangeQuery) -> Result<RangeResponse, LookupError>
where
    S: VerseStore + ?Sized,
{
    let verses = store
        .verses_in_range(&query.book, query.chapter, query.start, query.end)
        .await?;
    if verses.is_empty() {
        return Err(LookupError::NotFound(VERSES_NOT_FOUND));
    }
    Ok(build_range(query.chapter, query.start, query.end, verses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verse;
    use crate::store::memory::InMemoryStore;

    fn corpus() -> InMemoryStore {
        let texts = [
            "No princípio criou Deus os céus e a terra,",
            "e a terra era sem forma e vazia,",
            "e disse Deus: Haja luz.",
            "E viu Deus que era boa a luz,",
            "e foi a tarde e a manhã, o dia primeiro",
        ];
        InMemoryStore::new(texts.iter().enumerate().map(|(i, t)| Verse {
            id: i as i64 + 1,
            book: "Genesis".to_string(),
            chapter: 1,
            verse: i as i64 + 1,
            text: t.to_string(),
        }))
    }

    #[test]
    fn test_parse_verse_id() {
        assert_eq!(parse_verse_id("12").unwrap(), 12);
        assert_eq!(parse_verse_id(" 3 ").unwrap(), 3);
        for bad in ["0", "-1", "abc", "", "1.5"] {
            assert!(
                matches!(parse_verse_id(bad), Err(LookupError::Validation(INVALID_ID))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_find_end_flag_is_literal() {
        assert!(find_end_flag(Some("true")));
        assert!(!find_end_flag(Some("TRUE")));
        assert!(!find_end_flag(Some("1")));
        assert!(!find_end_flag(None));
    }

    #[test]
    fn test_range_query_single_and_span() {
        let q = RangeQuery::parse(" Genesis ", "1", "2-4").unwrap();
        assert_eq!(
            q,
            RangeQuery {
                book: "genesis".into(),
                chapter: 1,
                start: 2,
                end: 4
            }
        );
        let single = RangeQuery::parse("genesis", "1", "5").unwrap();
        assert_eq!((single.start, single.end), (5, 5));
    }

    #[test]
    fn test_range_query_rejections() {
        let invalid = |b: &str, c: &str, r: &str| match RangeQuery::parse(b, c, r) {
            Err(LookupError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        };
        assert_eq!(invalid("genesis", "1", "5-2"), INVALID_PARAMS);
        assert_eq!(invalid("genesis", "0", "1"), INVALID_PARAMS);
        assert_eq!(invalid("genesis", "x", "1"), INVALID_PARAMS);
        assert_eq!(invalid("  ", "1", "1"), INVALID_PARAMS);
        assert_eq!(invalid("genesis", "1", "-3"), INVALID_PARAMS);
        assert_eq!(invalid("genesis", "1", "a-b"), INVALID_PARAMS);
        assert_eq!(invalid("genesis", "1", "1-2-3"), INVALID_RANGE_FORMAT);
    }

    #[tokio::test]
    async fn test_passage_by_id_extend_example() {
        let store = corpus();
        let body = passage_by_id(&store, "1", true).await.unwrap();
        assert_eq!(body.chapter_verse_range, "1:1-3");
        assert_eq!(body.verses.len(), 3);
        assert_eq!(body.next_id, 4);
    }

    #[tokio::test]
    async fn test_passage_by_id_single() {
        let store = corpus();
        let body = passage_by_id(&store, "4", false).await.unwrap();
        assert_eq!(body.chapter_verse_range, "1:4");
        assert_eq!(body.verses.len(), 1);
    }

    #[tokio::test]
    async fn test_passage_by_id_missing_and_exhausted() {
        let store = corpus();
        assert!(matches!(
            passage_by_id(&store, "99", false).await,
            Err(LookupError::NotFound(INITIAL_VERSE_NOT_FOUND))
        ));
        assert!(matches!(
            passage_by_id(&store, "5", true).await,
            Err(LookupError::Exhausted)
        ));
    }

    #[tokio::test]
    async fn test_single_range_matches_id_lookup() {
        let store = corpus();
        let q = RangeQuery::parse("genesis", "1", "3").unwrap();
        let range = verses_by_range(&store, &q).await.unwrap();
        let by_id = store.get_verse(3).await.unwrap().unwrap();
        assert_eq!(range.verses, vec![by_id]);
        assert_eq!(range.verse_range, "3");
    }

    #[tokio::test]
    async fn test_range_not_found() {
        let store = corpus();
        let q = RangeQuery::parse("genesis", "2", "1-3").unwrap();
        assert!(matches!(
            verses_by_range(&store, &q).await,
            Err(LookupError::NotFound(VERSES_NOT_FOUND))
        ));
    }
}
