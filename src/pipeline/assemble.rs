//! Resolution of recommended ids back to menu items.

use crate::types::{MAX_RECOMMENDATIONS, MenuItem, MenuSnapshot};

/// Resolve ids to items from the snapshot, in id order.
///
/// Every item is searched, available or not. Unknown ids are skipped, a
/// repeated id yields its item once, and at most [`MAX_RECOMMENDATIONS`]
/// items are returned.
pub fn resolve<S: AsRef<str>>(ids: &[S], menu: &MenuSnapshot) -> Vec<MenuItem> {
    let mut resolved: Vec<MenuItem> = Vec::with_capacity(ids.len().min(MAX_RECOMMENDATIONS));

    for id in ids {
        if resolved.len() == MAX_RECOMMENDATIONS {
            break;
        }
        let id = id.as_ref();
        if resolved.iter().any(|item| item.id == id) {
            continue;
        }
        if let Some((_, item)) = menu.all_items().find(|(_, item)| item.id == id) {
            resolved.push(item.clone());
        }
    }

    resolved
}
