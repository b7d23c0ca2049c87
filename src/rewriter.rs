//! File rewriting for applying fixes.
//!
//! Performs position-aware application of text edits using the byte offsets
//! captured during planning. Edits are sorted by position and applied in
//! reverse order to preserve offset validity. Identical edits are collapsed
//! first: two findings in the same file may both plan the same import
//! insertion, and applying it twice would duplicate the specifier.

use crate::planner::TextEdit;
use anyhow::Result;
use std::path::Path;

/// Applies edits to a file's contents and writes the result back.
pub fn apply_to_file(file: &Path, edits: &[TextEdit]) -> Result<()> {
    let content = std::fs::read_to_string(file)?;
    let new_content = apply_edits(&content, edits);
    std::fs::write(file, new_content)?;
    Ok(())
}

/// Applies edits to source content, returning the modified string.
///
/// Sorts edits by start offset descending and applies each in turn so
/// earlier replacements don't invalidate later offsets. An edit overlapping
/// one already applied is skipped; zero-width insertions at the same offset
/// all apply.
pub fn apply_edits(content: &str, edits: &[TextEdit]) -> String {
    let mut edits: Vec<TextEdit> = edits.to_vec();
    edits.sort_by(|a, b| (b.start, b.end).cmp(&(a.start, a.end)).then(a.text.cmp(&b.text)));
    edits.dedup();

    let mut result = content.to_string();
    // Start of the lowest edit applied so far; everything below is untouched.
    let mut floor = usize::MAX;
    for edit in &edits {
        if edit.start > edit.end || edit.end > result.len() || edit.end > floor {
            eprintln!(
                "warn: skipping conflicting edit at {}..{}",
                edit.start, edit.end
            );
            continue;
        }
        result.replace_range(edit.start..edit.end, &edit.text);
        floor = edit.start;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(start: usize, end: usize, text: &str) -> TextEdit {
        TextEdit {
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn replaces_single_range() {
        let content = "const x = <Box>hi</Box>;";
        //                        ^11
        let edits = vec![edit(11, 14, "Flex")];
        assert_eq!(apply_edits(content, &edits), "const x = <Flex>hi</Box>;");
    }

    #[test]
    fn applies_edits_in_reverse_offset_order() {
        let content = "<Box a></Box>";
        //              ^1      ^9
        let edits = vec![edit(1, 4, "Flex"), edit(9, 12, "Flex")];
        assert_eq!(apply_edits(content, &edits), "<Flex a></Flex>");
    }

    #[test]
    fn handles_different_length_replacements() {
        let content = "aa bb cc";
        let edits = vec![edit(0, 2, "x"), edit(3, 5, "yyyy"), edit(6, 8, "")];
        assert_eq!(apply_edits(content, &edits), "x yyyy ");
    }

    #[test]
    fn identical_edits_are_collapsed() {
        let content = "import { Box } from \"x\";";
        //                       ^9 ^12
        let edits = vec![edit(12, 12, ", Flex"), edit(12, 12, ", Flex")];
        assert_eq!(apply_edits(content, &edits), "import { Box, Flex } from \"x\";");
    }

    #[test]
    fn distinct_insertions_at_same_offset_both_apply() {
        let content = "import { Box } from \"x\";";
        let edits = vec![edit(12, 12, ", Flex"), edit(12, 12, ", Grid")];
        let result = apply_edits(content, &edits);
        assert!(result.contains("Flex"));
        assert!(result.contains("Grid"));
        assert!(result.starts_with("import { Box, "));
    }

    #[test]
    fn overlapping_edit_is_skipped() {
        let content = "abcdef";
        let edits = vec![edit(0, 4, "X"), edit(2, 6, "Y")];
        // the higher-offset edit applies first, the overlapping one is dropped
        assert_eq!(apply_edits(content, &edits), "abY");
    }

    #[test]
    fn out_of_bounds_edit_is_skipped() {
        let content = "abc";
        let edits = vec![edit(10, 12, "X")];
        assert_eq!(apply_edits(content, &edits), "abc");
    }

    #[test]
    fn empty_edit_list_returns_original() {
        let content = "unchanged";
        assert_eq!(apply_edits(content, &[]), "unchanged");
    }

    #[test]
    fn writes_result_back_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.tsx");
        std::fs::write(&file, "<Box>hi</Box>").unwrap();

        apply_to_file(&file, &[edit(1, 4, "Flex"), edit(9, 12, "Flex")]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            "<Flex>hi</Flex>"
        );
    }
}
