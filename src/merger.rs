//! Combines remote and locally authored reviews into the list a details
//! surface shows.
//!
//! Placement depends only on each record's [`ReviewOrigin`]: remote reviews
//! come first in the order the places service ranked them, local reviews
//! follow oldest first. Nothing is deduplicated, even when a local review reads
//! exactly like a remote one.

use crate::model::{ReviewOrigin, ReviewRecord};

/// Merges `remote` and `local` into one ordered sequence of
/// `remote.len() + local.len()` records.
///
/// Pure: the same inputs always give the same output.
pub fn merge_reviews(remote: &[ReviewRecord], local: &[ReviewRecord]) -> Vec<ReviewRecord> {
    let all = || remote.iter().chain(local.iter());
    all()
        .filter(|review| review.origin() == ReviewOrigin::Remote)
        .chain(all().filter(|review| review.origin() == ReviewOrigin::Local))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(author: &str) -> ReviewRecord {
        ReviewRecord::remote(4.0, Some(author), "", None)
    }

    fn local(author: &str) -> ReviewRecord {
        ReviewRecord::local(5.0, author, "")
    }

    fn authors(reviews: &[ReviewRecord]) -> Vec<&str> {
        reviews.iter().map(ReviewRecord::author).collect()
    }

    #[test]
    fn remote_reviews_precede_local_ones() {
        let merged = merge_reviews(
            &[remote("r1"), remote("r2"), remote("r3")],
            &[local("l1"), local("l2")],
        );
        assert_eq!(authors(&merged), ["r1", "r2", "r3", "l1", "l2"]);
    }

    #[test]
    fn empty_sides_are_fine() {
        assert!(merge_reviews(&[], &[]).is_empty());
        assert_eq!(authors(&merge_reviews(&[], &[local("l1")])), ["l1"]);
        assert_eq!(authors(&merge_reviews(&[remote("r1")], &[])), ["r1"]);
    }

    #[test]
    fn identical_reviews_are_not_deduplicated() {
        let twin_remote = ReviewRecord::remote(5.0, Some("Jo"), "Great!", None);
        let twin_local = ReviewRecord::local(5.0, "Jo", "Great!");
        let merged = merge_reviews(&[twin_remote], &[twin_local]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].origin(), ReviewOrigin::Remote);
        assert_eq!(merged[1].origin(), ReviewOrigin::Local);
    }

    #[test]
    fn origin_tag_decides_placement() {
        // A local record handed in on the remote side still lands after every remote one.
        let merged = merge_reviews(&[local("l0"), remote("r1")], &[local("l1")]);
        assert_eq!(authors(&merged), ["r1", "l0", "l1"]);
    }

    #[test]
    fn merge_is_deterministic() {
        let r = [remote("r1"), remote("r2")];
        let l = [local("l1")];
        assert_eq!(merge_reviews(&r, &l), merge_reviews(&r, &l));
    }
}
