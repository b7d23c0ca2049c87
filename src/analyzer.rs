//! Element analysis and finding generation.
//!
//! Drives the per-element pipeline: eligibility filtering via symbol origin,
//! first-match attribute classification, and fix planning. Emits at most one
//! finding per element and aggregates per-run statistics for reporting.

use crate::classifier;
use crate::planner::{self, FixPlan, PlanError};
use crate::resolver::{self, ModuleIndex};
use crate::scanner::{self, JsxElement};
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One replaceable element, with its fix when one could be constructed.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub file: PathBuf,
    /// Line/column of the opening tag, 1-indexed.
    pub line: usize,
    pub column: usize,
    pub invalid_component: String,
    pub valid_component: String,
    /// Source text of the triggering attribute.
    pub attribute: String,
    /// `None` when no import declaration was available to complete the fix.
    pub fix: Option<FixPlan>,
}

impl Finding {
    pub fn message(&self) -> String {
        format!(
            "'{}' with attribute '{}' could be replaced by '{}'.",
            self.invalid_component, self.attribute, self.valid_component
        )
    }
}

/// Summary statistics from a run.
#[derive(Debug, Default, Serialize)]
pub struct Diagnostics {
    pub files_scanned: usize,
    pub elements_seen: usize,
    pub eligible_elements: usize,
    pub findings: usize,
    pub fixable: usize,
    pub unfixable: usize,
}

/// Complete detection results.
#[derive(Debug, Serialize)]
pub struct DetectionResult {
    pub findings: Vec<Finding>,
    pub diagnostics: Diagnostics,
}

/// Per-file analysis output.
#[derive(Debug)]
pub struct FileAnalysis {
    pub findings: Vec<Finding>,
    pub elements_seen: usize,
    pub eligible_elements: usize,
}

/// Parses `source` and checks every JSX element in it.
pub fn analyze_source(source: &str, file: &Path) -> Result<FileAnalysis> {
    let module = scanner::parse_source(source)?;

    let mut findings = Vec::new();
    let mut eligible = 0;
    for element in &module.elements {
        if resolver::is_eligible(element, &module.index) {
            eligible += 1;
        }
        if let Some(finding) = check_element(source, file, element, &module.index) {
            findings.push(finding);
        }
    }

    Ok(FileAnalysis {
        findings,
        elements_seen: module.elements.len(),
        eligible_elements: eligible,
    })
}

/// Checks one element, returning a finding for the first matching attribute.
///
/// Ineligible elements and elements with no matching attribute yield `None`;
/// both are expected outcomes, not faults. A missing import context is
/// caught here: the finding is still reported, but without a fix, so no
/// partial edit batch can ever escape.
pub fn check_element(
    source: &str,
    file: &Path,
    element: &JsxElement,
    index: &ModuleIndex,
) -> Option<Finding> {
    if !resolver::is_eligible(element, index) {
        return None;
    }

    for (i, attr) in element.attrs.iter().enumerate() {
        let Some(candidate) = &attr.candidate else {
            continue;
        };
        let Some(specific) = classifier::classify(&element.tag, &candidate.name, &candidate.value)
        else {
            continue;
        };

        let fix = match planner::plan(source, element, i, specific, index.import_of(&element.tag))
        {
            Ok(plan) => Some(plan),
            Err(PlanError::MissingImportContext(_)) => None,
        };

        // First matching attribute wins; later attributes are not examined.
        return Some(Finding {
            file: file.to_path_buf(),
            line: element.line,
            column: element.column,
            invalid_component: element.tag.clone(),
            valid_component: specific.to_string(),
            attribute: source[attr.start..attr.end].to_string(),
            fix,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::apply_edits;

    fn analyze(source: &str) -> FileAnalysis {
        analyze_source(source, Path::new("test.tsx")).unwrap()
    }

    fn fix(source: &str) -> String {
        let analysis = analyze(source);
        let edits: Vec<_> = analysis
            .findings
            .iter()
            .filter_map(|f| f.fix.as_ref())
            .flat_map(|p| p.edits.iter().cloned())
            .collect();
        apply_edits(source, &edits)
    }

    #[test]
    fn end_to_end_box_display_flex() {
        let source = r#"import { Box } from "@chakra-ui/react";

export const App = () => <Box display="flex">hi</Box>;
"#;
        assert_eq!(
            fix(source),
            r#"import { Box, Flex } from "@chakra-ui/react";

export const App = () => <Flex>hi</Flex>;
"#
        );
    }

    #[test]
    fn finding_carries_location_and_message_data() {
        let source = r#"import { Box } from "@chakra-ui/react";
const x = <Box display="grid">hi</Box>;
"#;
        let analysis = analyze(source);
        assert_eq!(analysis.findings.len(), 1);
        let f = &analysis.findings[0];
        assert_eq!(f.invalid_component, "Box");
        assert_eq!(f.valid_component, "Grid");
        assert_eq!(f.attribute, r#"display="grid""#);
        assert_eq!((f.line, f.column), (2, 11));
        assert_eq!(
            f.message(),
            r#"'Box' with attribute 'display="grid"' could be replaced by 'Grid'."#
        );
    }

    #[test]
    fn locally_declared_component_is_ignored() {
        let source = r#"const Box = (props) => null;
const x = <Box sx={{ m: 1 }} display="flex">hi</Box>;
"#;
        let analysis = analyze(source);
        assert!(analysis.findings.is_empty());
        assert_eq!(analysis.eligible_elements, 0);
    }

    #[test]
    fn wrong_library_is_ignored() {
        let source = r#"import { Box } from "rebass";
const x = <Box display="flex">hi</Box>;
"#;
        assert!(analyze(source).findings.is_empty());
    }

    #[test]
    fn non_tracked_tag_from_target_library_is_ignored() {
        let source = r#"import { Flex } from "@chakra-ui/react";
const x = <Flex display="grid">hi</Flex>;
"#;
        assert!(analyze(source).findings.is_empty());
    }

    #[test]
    fn aliased_import_is_not_tracked_under_its_alias() {
        let source = r#"import { Box as B } from "@chakra-ui/react";
const x = <B display="flex">hi</B>;
"#;
        assert!(analyze(source).findings.is_empty());
    }

    #[test]
    fn first_matching_attribute_wins() {
        let source = r#"import { Box } from "@chakra-ui/react";
const x = <Box display="flex" as="img">hi</Box>;
"#;
        let analysis = analyze(source);
        assert_eq!(analysis.findings.len(), 1);
        assert_eq!(analysis.findings[0].valid_component, "Flex");
        assert_eq!(analysis.findings[0].attribute, r#"display="flex""#);
    }

    #[test]
    fn non_matching_attributes_before_the_match_are_skipped() {
        let source = r#"import { Box } from "@chakra-ui/react";
const x = <Box color="red" p={2} display="flex">hi</Box>;
"#;
        let analysis = analyze(source);
        assert_eq!(analysis.findings.len(), 1);
        assert_eq!(analysis.findings[0].valid_component, "Flex");
    }

    #[test]
    fn element_with_no_matching_attribute_yields_nothing() {
        let source = r#"import { Box } from "@chakra-ui/react";
const x = <Box display="block" p={2}>hi</Box>;
"#;
        let analysis = analyze(source);
        assert!(analysis.findings.is_empty());
        assert_eq!(analysis.eligible_elements, 1);
    }

    #[test]
    fn one_finding_per_element_across_many_elements() {
        let source = r#"import { Box } from "@chakra-ui/react";
const x = (
  <Box display="flex">
    <Box display="grid">a</Box>
    <Box p={1}>b</Box>
  </Box>
);
"#;
        let analysis = analyze(source);
        assert_eq!(analysis.findings.len(), 2);
        let replacements: Vec<_> = analysis
            .findings
            .iter()
            .map(|f| f.valid_component.as_str())
            .collect();
        assert_eq!(replacements, vec!["Flex", "Grid"]);
    }

    #[test]
    fn fixing_two_elements_inserts_each_import_once() {
        let source = r#"import { Box } from "@chakra-ui/react";
const x = <Box display="flex">a</Box>;
const y = <Box display="flex">b</Box>;
"#;
        assert_eq!(
            fix(source),
            r#"import { Box, Flex } from "@chakra-ui/react";
const x = <Flex>a</Flex>;
const y = <Flex>b</Flex>;
"#
        );
    }

    #[test]
    fn applying_a_fix_twice_is_idempotent() {
        let source = r#"import { Box } from "@chakra-ui/react";
const x = <Box display="flex">a</Box>;
const y = <Box display="grid">b</Box>;
"#;
        let once = fix(source);
        assert_eq!(fix(&once), once);
    }

    #[test]
    fn as_img_is_replaced_by_image() {
        let source = r#"import { Box } from "@chakra-ui/react";
const x = <Box as="img" src="/a.png" />;
"#;
        assert_eq!(
            fix(source),
            r#"import { Box, Image } from "@chakra-ui/react";
const x = <Image src="/a.png" />;
"#
        );
    }

    #[test]
    fn diagnostics_counts_from_analysis() {
        let source = r#"import { Box } from "@chakra-ui/react";
const x = <Box display="flex">a</Box>;
const y = <Box p={1}>b</Box>;
const z = <div />;
"#;
        let analysis = analyze(source);
        assert_eq!(analysis.elements_seen, 3);
        assert_eq!(analysis.eligible_elements, 2);
        assert_eq!(analysis.findings.len(), 1);
        assert!(analysis.findings[0].fix.is_some());
    }
}
