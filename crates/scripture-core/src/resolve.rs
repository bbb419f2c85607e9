//! Range Resolver.
//!
//! Grows a single verse into the passage it opens. In extend mode the
//! resolver walks forward with [`VerseStore::next_verse`] and applies these
//! stopping rules to each fetched verse, in order, before appending it:
//!
//! 1. No verse after the cursor: stop. If nothing at all followed the
//!    initial verse this is [`ResolveError::NoSubsequentVerse`].
//! 2. The verse belongs to another chapter: stop without appending it.
//! 3. Otherwise append it, and stop if its trimmed text ends with `.`.
//!
//! The scan is sequential: each step needs the previous verse's position.

use thiserror::Error;

use crate::models::Verse;
use crate::store::{StoreError, VerseStore};

/// How far a lookup by id should reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassageMode {
    /// Only the requested verse.
    Single,
    /// The requested verse plus its continuation up to the end of the
    /// sentence or chapter.
    Extend,
}

impl PassageMode {
    pub fn from_find_end(find_end: bool) -> Self {
        if find_end {
            PassageMode::Extend
        } else {
            PassageMode::Single
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Nenhum versículo encontrado a partir do ID informado.")]
    NoSubsequentVerse,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolve the passage that starts at `initial`.
///
/// The returned sequence always begins with `initial` and never leaves its
/// chapter.
pub async fn resolve_passage<S>(
    store: &S,
    initial: Verse,
    mode: PassageMode,
) -> Result<Vec<Verse>, ResolveError>
where
    S: VerseStore + ?Sized,
{
    match mode {
        PassageMode::Single => Ok(vec![initial]),
        PassageMode::Extend => {
            let continuation = extend(store, &initial).await?;
            let mut passage = Vec::with_capacity(continuation.len() + 1);
            passage.push(initial);
            passage.extend(continuation);
            Ok(passage)
        }
    }
}

/// Collect the verses that follow `initial` within its passage.
///
/// Returns an empty vector when the very next verse opens a new chapter.
pub async fn extend<S>(store: &S, initial: &Verse) -> Result<Vec<Verse>, ResolveError>
where
    S: VerseStore + ?Sized,
{
    let mut cursor = initial.id;
    let mut verses: Vec<Verse> = Vec::new();
    let mut first_step = true;

    loop {
        let next = match store.next_verse(cursor).await? {
            Some(v) => v,
            None if first_step => return Err(ResolveError::NoSubsequentVerse),
            None => break,
        };
        first_step = false;

        if !next.same_chapter(initial) {
            break;
        }

        cursor = next.id;
        let done = next.ends_sentence();
        verses.push(next);
        if done {
            break;
        }
    }

    Ok(verses)
}
