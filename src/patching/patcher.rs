use itertools::Itertools;
use tracing::debug;

use crate::error::PatchError;

/// An anchor line and the block of text that goes right after it.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Insertion {
    pub anchor: &'static str,
    pub text: &'static str,
}

impl Insertion {
    pub const fn new(anchor: &'static str, text: &'static str) -> Self {
        Self { anchor, text }
    }
}

pub trait LinePatcher {
    fn insert_after(&mut self, anchor: &str, insertion: &str) -> Result<(), PatchError>;

    fn insert_all(&mut self, insertions: &[Insertion]) -> Result<(), PatchError> {
        insertions
            .iter()
            .try_for_each(|insertion| self.insert_after(insertion.anchor, insertion.text))
    }
}

impl LinePatcher for Vec<String> {
    fn insert_after(&mut self, anchor: &str, insertion: &str) -> Result<(), PatchError> {
        // Only the first matching line counts
        let (index, _) = self
            .iter()
            .find_position(|line| line.trim() == anchor)
            .ok_or_else(|| PatchError::AnchorNotFound {
                anchor: anchor.to_owned(),
                insertion: insertion.to_owned(),
            })?;

        debug!("Anchor `{}` found at line {}", anchor, index + 1);

        // The block stays a single entry even when it spans several lines
        self.insert(index + 1, insertion.to_owned());

        Ok(())
    }
}

#[cfg(test)]
mod patcher_tests {
    use super::*;

    fn document(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_insert_after_first_match() {
        let mut lines = document(&["a", "anchor", "b", "anchor"]);

        assert!(lines.insert_after("anchor", "new").is_ok());

        assert_eq!(lines, document(&["a", "anchor", "new", "b", "anchor"]));
    }

    #[test]
    fn test_insert_after_last_line() {
        let mut lines = document(&["a", "anchor"]);

        lines.insert_after("anchor", "new").unwrap();

        assert_eq!(lines, document(&["a", "anchor", "new"]));
    }

    #[test]
    fn test_missing_anchor_leaves_document_untouched() {
        let mut lines = document(&["a", "b"]);

        let err = lines.insert_after("anchor", "new").unwrap_err();

        assert!(matches!(
            &err,
            PatchError::AnchorNotFound { anchor, insertion } if anchor == "anchor" && insertion == "new"
        ));
        assert_eq!(
            err.to_string(),
            "failed to insert `new` after `anchor` - did not find the latter"
        );
        assert_eq!(lines, document(&["a", "b"]));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let mut lines = document(&["a", " \t  var moduleRtn;   ", "b"]);

        lines.insert_after("var moduleRtn;", "new").unwrap();

        assert_eq!(lines[2], "new");
    }

    #[test]
    fn test_internal_whitespace_must_match() {
        let mut lines = document(&["var  moduleRtn;"]);

        assert!(lines.insert_after("var moduleRtn;", "new").is_err());
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_multiline_block_is_one_entry() {
        let mut lines = document(&["anchor", "b"]);

        lines.insert_after("anchor", "\nfirst\nsecond\n").unwrap();

        assert_eq!(lines, document(&["anchor", "\nfirst\nsecond\n", "b"]));
    }

    #[test]
    fn test_patching_is_not_safely_repeatable() {
        let mut lines = document(&["anchor", "b"]);

        lines.insert_after("anchor", "new").unwrap();
        lines.insert_after("anchor", "new").unwrap();

        assert_eq!(lines, document(&["anchor", "new", "new", "b"]));
    }

    #[test]
    fn test_later_insertion_sees_earlier_ones() {
        let mut lines = document(&["x", "y"]);
        let insertions = [Insertion::new("x", "foo"), Insertion::new("foo", "bar")];

        lines.insert_all(&insertions).unwrap();

        assert_eq!(lines, document(&["x", "foo", "bar", "y"]));
    }

    #[test]
    fn test_insert_all_stops_at_first_missing_anchor() {
        let mut lines = document(&["x", "y"]);
        let insertions = [
            Insertion::new("x", "foo"),
            Insertion::new("missing", "bar"),
            Insertion::new("y", "baz"),
        ];

        let err = lines.insert_all(&insertions).unwrap_err();

        assert!(matches!(err, PatchError::AnchorNotFound { anchor, .. } if anchor == "missing"));
        assert_eq!(lines, document(&["x", "foo", "y"]));
    }
}
