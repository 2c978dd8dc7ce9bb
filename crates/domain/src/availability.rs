// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

/// The set of catalog item ids currently marked sold out.
///
/// Membership is the only query consumers make. The set does not know
/// about the catalog; callers check that an id exists before toggling it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilitySet {
    sold_out: BTreeSet<String>,
}

impl AvailabilitySet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sold_out: BTreeSet::new(),
        }
    }

    /// Builds a set from stored sold out ids.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sold_out: ids.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_sold_out(&self, item_id: &str) -> bool {
        self.sold_out.contains(item_id)
    }

    /// Flips the sold out flag for an item.
    ///
    /// Returns `true` if the item is sold out after the call.
    pub fn toggle(&mut self, item_id: &str) -> bool {
        if self.sold_out.remove(item_id) {
            false
        } else {
            self.sold_out.insert(item_id.to_string());
            true
        }
    }

    /// Sold out ids in sorted order.
    pub fn sold_out_ids(&self) -> impl Iterator<Item = &str> {
        self.sold_out.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sold_out.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sold_out.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_marks_and_unmarks() {
        let mut set: AvailabilitySet = AvailabilitySet::new();
        assert!(!set.is_sold_out("f1"));

        assert!(set.toggle("f1"));
        assert!(set.is_sold_out("f1"));

        assert!(!set.toggle("f1"));
        assert!(!set.is_sold_out("f1"));
    }

    #[test]
    fn test_double_toggle_restores_original_state() {
        let original: AvailabilitySet = AvailabilitySet::from_ids(["d1", "s2"]);
        let mut set: AvailabilitySet = original.clone();

        set.toggle("d1");
        set.toggle("d1");
        set.toggle("f4");
        set.toggle("f4");

        assert_eq!(set, original);
    }

    #[test]
    fn test_sold_out_ids_sorted() {
        let set: AvailabilitySet = AvailabilitySet::from_ids(["f2", "d1", "s3"]);
        let ids: Vec<&str> = set.sold_out_ids().collect();
        assert_eq!(ids, vec!["d1", "f2", "s3"]);
    }
}
