//! The ordered page list.
//!
//! [`PageCollection`] is the only place page order lives. It is owned by a
//! single thread (the CLI's main loop, or whatever drives the reorder engine)
//! and changed only through [`append`](PageCollection::append),
//! [`remove`](PageCollection::remove) and
//! [`move_before`](PageCollection::move_before).
//!
//! ## Snapshots
//!
//! The order is stored behind an `Arc`. [`snapshot`](PageCollection::snapshot)
//! hands out a clone of that `Arc`; the next mutation then copies the list
//! before changing it (`Arc::make_mut`), so a snapshot never sees a later
//! change. The export pipeline relies on this.

use crate::types::{PageDescriptor, PageId};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct PageCollection {
    pages: Arc<Vec<PageDescriptor>>,
}

impl PageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageDescriptor> {
        self.pages.iter()
    }

    pub fn ids(&self) -> Vec<PageId> {
        self.pages.iter().map(|p| p.id).collect()
    }

    pub fn get(&self, id: PageId) -> Option<&PageDescriptor> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PageId) -> bool {
        self.position(id).is_some()
    }

    /// Zero-based position of a page in the current order.
    pub fn position(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    /// First page carrying this file name. Names are not unique; ids are.
    pub fn find_by_name(&self, name: &str) -> Option<&PageDescriptor> {
        self.pages.iter().find(|p| p.name == name)
    }

    /// Immutable view of the current order.
    pub fn snapshot(&self) -> Arc<Vec<PageDescriptor>> {
        Arc::clone(&self.pages)
    }

    /// Add a page at the end.
    ///
    /// A descriptor whose id is already present is not added twice; ids come
    /// from [`PageId::new`] so this only guards against re-appending the same
    /// descriptor.
    pub fn append(&mut self, page: PageDescriptor) {
        if self.contains(page.id) {
            log::warn!("page {} already in collection, not appended", page.id);
            return;
        }
        Arc::make_mut(&mut self.pages).push(page);
    }

    /// Remove the page with this id. Absent ids are a no-op.
    ///
    /// Returns the removed page.
    pub fn remove(&mut self, id: PageId) -> Option<PageDescriptor> {
        let index = self.position(id)?;
        Some(Arc::make_mut(&mut self.pages).remove(index))
    }

    /// Move `moved` so it sits immediately before `target`.
    ///
    /// The moved page is taken out first and the target's position is looked
    /// up afterwards, so the result always has `moved` directly in front of
    /// `target` whichever direction it travelled. Returns `false` (and leaves
    /// the order untouched) when the two ids are equal, either is missing, or
    /// `moved` already sits right before `target`.
    pub fn move_before(&mut self, moved: PageId, target: PageId) -> bool {
        if moved == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(moved), self.position(target)) else {
            return false;
        };
        if from + 1 == to {
            return false;
        }

        let pages = Arc::make_mut(&mut self.pages);
        let page = pages.remove(from);
        let to = if from < to { to - 1 } else { to };
        pages.insert(to, page);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{collection_of, id_of, names, page};
    use std::collections::HashSet;

    // =========================================================================
    // append / remove
    // =========================================================================

    #[test]
    fn append_adds_to_end() {
        let mut c = collection_of(&["a", "b"]);
        c.append(page("c", 1, 1));
        assert_eq!(names(&c), ["a", "b", "c"]);
    }

    #[test]
    fn append_same_descriptor_twice_keeps_one() {
        let mut c = PageCollection::new();
        let p = page("a", 1, 1);
        c.append(p.clone());
        c.append(p);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn identical_content_gets_distinct_entries() {
        let mut c = PageCollection::new();
        c.append(page("same.png", 5, 5));
        c.append(page("same.png", 5, 5));
        assert_eq!(c.len(), 2);
        let ids: HashSet<_> = c.ids().into_iter().collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn remove_drops_only_that_page() {
        let mut c = collection_of(&["a", "b", "c"]);
        let a = id_of(&c, "a");
        let c_id = id_of(&c, "c");
        let b = id_of(&c, "b");

        let removed = c.remove(b).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(names(&c), ["a", "c"]);
        assert_eq!(c.ids(), vec![a, c_id]);
    }

    #[test]
    fn remove_twice_is_idempotent() {
        let mut c = collection_of(&["a", "b"]);
        let a = id_of(&c, "a");
        assert!(c.remove(a).is_some());
        let before = c.ids();
        assert!(c.remove(a).is_none());
        assert_eq!(c.ids(), before);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut c = collection_of(&["a"]);
        assert!(c.remove(PageId::new()).is_none());
        assert_eq!(names(&c), ["a"]);
    }

    // =========================================================================
    // move_before
    // =========================================================================

    #[test]
    fn move_up_lands_before_target() {
        let mut c = collection_of(&["a", "b", "c", "d"]);
        assert!(c.move_before(id_of(&c, "d"), id_of(&c, "b")));
        assert_eq!(names(&c), ["a", "d", "b", "c"]);
    }

    #[test]
    fn move_down_lands_before_target() {
        let mut c = collection_of(&["a", "b", "c", "d"]);
        assert!(c.move_before(id_of(&c, "a"), id_of(&c, "d")));
        assert_eq!(names(&c), ["b", "c", "a", "d"]);
    }

    #[test]
    fn move_to_front() {
        let mut c = collection_of(&["a", "b", "c"]);
        assert!(c.move_before(id_of(&c, "c"), id_of(&c, "a")));
        assert_eq!(names(&c), ["c", "a", "b"]);
    }

    #[test]
    fn move_onto_self_is_noop() {
        let mut c = collection_of(&["a", "b", "c"]);
        let before = c.snapshot();
        let b = id_of(&c, "b");
        assert!(!c.move_before(b, b));
        assert!(Arc::ptr_eq(&before, &c.snapshot()));
    }

    #[test]
    fn move_already_in_place_is_noop() {
        let mut c = collection_of(&["a", "b", "c"]);
        assert!(!c.move_before(id_of(&c, "a"), id_of(&c, "b")));
        assert_eq!(names(&c), ["a", "b", "c"]);
    }

    #[test]
    fn move_with_missing_ids_is_noop() {
        let mut c = collection_of(&["a", "b"]);
        let a = id_of(&c, "a");
        assert!(!c.move_before(a, PageId::new()));
        assert!(!c.move_before(PageId::new(), a));
        assert_eq!(names(&c), ["a", "b"]);
    }

    /// Every (moved, target) pair on a 5-element list: same members, moved
    /// directly before target, everyone else keeps their relative order.
    #[test]
    fn move_before_preserves_members_and_relative_order() {
        let labels = ["a", "b", "c", "d", "e"];
        for &m in &labels {
            for &t in &labels {
                if m == t {
                    continue;
                }
                let mut c = collection_of(&labels);
                let (mid, tid) = (id_of(&c, m), id_of(&c, t));
                c.move_before(mid, tid);

                let after = names(&c);
                assert_eq!(after.len(), labels.len());
                let members: HashSet<&str> = after.iter().map(String::as_str).collect();
                assert_eq!(members, labels.iter().copied().collect());

                let pm = c.position(mid).unwrap();
                let pt = c.position(tid).unwrap();
                assert_eq!(pm + 1, pt, "moving {m} before {t} gave {after:?}");

                let others: Vec<&str> =
                    after.iter().map(String::as_str).filter(|n| *n != m).collect();
                let expected: Vec<&str> = labels.iter().copied().filter(|n| *n != m).collect();
                assert_eq!(others, expected);
            }
        }
    }

    // =========================================================================
    // snapshots
    // =========================================================================

    #[test]
    fn snapshot_is_not_affected_by_later_mutation() {
        let mut c = collection_of(&["a", "b", "c"]);
        let snap = c.snapshot();

        c.move_before(id_of(&c, "c"), id_of(&c, "a"));
        c.remove(id_of(&c, "b"));
        c.append(page("d", 1, 1));

        let snap_names: Vec<&str> = snap.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(snap_names, ["a", "b", "c"]);
        assert_eq!(names(&c), ["c", "a", "d"]);
    }

    #[test]
    fn lookups() {
        let c = collection_of(&["a", "b"]);
        let b = id_of(&c, "b");
        assert_eq!(c.position(b), Some(1));
        assert_eq!(c.get(b).unwrap().name, "b");
        assert!(c.contains(b));
        assert!(c.find_by_name("zzz").is_none());
        assert!(!c.is_empty());
        assert!(PageCollection::new().is_empty());
    }
}
