use crate::catalog::CatalogIndex;
use crate::formats::{NavRef, Navigation};

/// Previous/next links for `current_id` over the catalog's global order.
///
/// Returns `None` when the id is not in the catalog. The last lesson of a chapter
/// links forward to the first lesson of the next non-empty chapter.
pub fn resolve(catalog: &CatalogIndex, current_id: &str) -> Option<Navigation> {
    let idx = catalog.position(current_id)?;
    let prev = idx
        .checked_sub(1)
        .and_then(|prev| catalog.get(prev))
        .map(NavRef::from_lesson);
    let next = catalog.get(idx + 1).map(NavRef::from_lesson);
    Some(Navigation { prev, next })
}
