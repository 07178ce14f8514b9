//! Menu tree construction.
//!
//! Menu items arrive from the record source as a flat list in which each item names its parent.
//! [`build_menu_tree`] nests them into the structure the frontend renders.
//!
//! Items whose parent is neither the root nor another item of the same menu are unreachable and
//! silently left out. Input that would make the recursion revisit an item (duplicate ids, an
//! item that is its own root-level parent) or nest deeper than the configured limit is reported
//! as an error instead of recursing forever.

use std::collections::{HashMap, HashSet};

use api_shared::MenuNode;

use crate::records::MenuItem;
use crate::slug::slugify;
use crate::{ContentError, ContentResult};

/// Build the menu tree rooted at `root_parent_id`.
///
/// Siblings keep the relative order they had in `items`.
///
/// # Errors
///
/// - `ContentError::MenuCycle` if an item would be placed in the tree twice.
/// - `ContentError::MenuTooDeep` if the tree nests more than `max_depth` levels.
pub fn build_menu_tree(
    items: &[MenuItem],
    root_parent_id: u64,
    max_depth: usize,
) -> ContentResult<Vec<MenuNode>> {
    let by_parent = group_by_parent(items);
    let mut visited = HashSet::with_capacity(items.len());
    build_level(&by_parent, root_parent_id, 0, max_depth, &mut visited)
}

/// Group items by parent id, keeping input order within each group.
fn group_by_parent(items: &[MenuItem]) -> HashMap<u64, Vec<&MenuItem>> {
    let mut by_parent: HashMap<u64, Vec<&MenuItem>> = HashMap::new();
    for item in items {
        by_parent.entry(item.parent).or_default().push(item);
    }
    by_parent
}

fn build_level(
    by_parent: &HashMap<u64, Vec<&MenuItem>>,
    parent_id: u64,
    depth: usize,
    max_depth: usize,
    visited: &mut HashSet<u64>,
) -> ContentResult<Vec<MenuNode>> {
    let Some(group) = by_parent.get(&parent_id) else {
        return Ok(Vec::new());
    };

    if depth >= max_depth {
        return Err(ContentError::MenuTooDeep { max_depth });
    }

    let mut nodes = Vec::with_capacity(group.len());
    for item in group {
        if !visited.insert(item.id) {
            return Err(ContentError::MenuCycle { item_id: item.id });
        }

        let children = build_level(by_parent, item.id, depth + 1, max_depth, visited)?;
        nodes.push(MenuNode {
            id: item.id,
            name: item.title.clone(),
            slug: slugify(&item.title),
            children,
        });
    }

    Ok(nodes)
}
