//! List query construction
//!
//! Each set filter field adds an exact-match predicate, combined with AND.
//! Ordering is always group name then song name so offset/limit windows are
//! stable between calls.

use sqlx::{QueryBuilder, Sqlite};

use crate::catalog::release_date::normalize_release_date;
use crate::models::SongFilter;
use crate::pagination::Page;

const LIST_SELECT: &str = "SELECT g.name AS group_name, s.name AS song_name, \
     s.release_date, s.text, s.link \
     FROM songs s INNER JOIN groups g ON g.guid = s.group_id";

const LIST_ORDER: &str = " ORDER BY g.name, s.name";

/// Build the SELECT for a filtered, paginated listing
///
/// All filter values and bounds are bound as parameters.
pub fn build_list_query(filter: &SongFilter, page: Page) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(LIST_SELECT);

    let predicates: [(&str, Option<String>); 5] = [
        ("g.name", filter.group.clone()),
        ("s.name", filter.name.clone()),
        ("s.release_date", filter.release_date.as_deref().map(release_date_filter)),
        ("s.text", filter.text.clone()),
        ("s.link", filter.link.clone()),
    ];

    let mut first = true;
    for (column, value) in predicates {
        let Some(value) = value else { continue };
        qb.push(if first { " WHERE " } else { " AND " });
        qb.push(column).push(" = ").push_bind(value);
        first = false;
    }

    qb.push(LIST_ORDER);

    // SQLite only accepts OFFSET after LIMIT; -1 means "no limit"
    if !page.is_unbounded() {
        qb.push(" LIMIT ").push_bind(page.limit.unwrap_or(-1));
        if let Some(offset) = page.offset {
            qb.push(" OFFSET ").push_bind(offset);
        }
    }

    qb
}

/// Comparison value for a release date filter
///
/// Recognized dates compare in stored ISO form. Anything else, including a
/// whitespace-only value, is compared verbatim so it can never turn into a
/// match on cleared dates.
fn release_date_filter(raw: &str) -> String {
    match normalize_release_date(raw) {
        Some(iso) if !iso.is_empty() => iso,
        _ => raw.to_string(),
    }
}
