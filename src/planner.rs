//! Fix plan construction.
//!
//! Computes the batch of text edits that replaces one generic element with
//! its specific component: rename the opening tag, rename the closing tag
//! when one exists, remove the triggering attribute, and add the replacement
//! name to the import list that brought the generic component into scope.
//! Every edit is an immutable `{range, replacement}` record against the
//! original unedited source; edits never overlap and application order is
//! the rewriter's concern.

use crate::resolver::ImportInfo;
use crate::scanner::{offset_to_line_col, JsxElement};
use serde::Serialize;
use thiserror::Error;

/// A single replacement of a half-open byte range in the original source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// The non-overlapping edit batch for one replacement.
#[derive(Debug, Clone, Serialize)]
pub struct FixPlan {
    pub edits: Vec<TextEdit>,
}

#[derive(Debug, Error)]
pub enum PlanError {
    /// No import declaration is available to receive the replacement name.
    /// The finding can still be reported, but no fix may be built from a
    /// partial plan.
    #[error("no import declaration found to add '{0}' to")]
    MissingImportContext(String),
}

/// Builds the fix plan for replacing `element` with `specific`.
///
/// `matched` indexes the attribute (in `element.attrs`) that triggered the
/// replacement. `import` is the declaration that brought the generic
/// component into scope; without one the fix cannot be constructed.
pub fn plan(
    source: &str,
    element: &JsxElement,
    matched: usize,
    specific: &str,
    import: Option<&ImportInfo>,
) -> Result<FixPlan, PlanError> {
    let import =
        import.ok_or_else(|| PlanError::MissingImportContext(specific.to_string()))?;

    let mut edits = vec![TextEdit {
        start: element.name_start,
        end: element.name_end,
        text: specific.to_string(),
    }];

    if let Some((start, end)) = element.closing_name {
        edits.push(TextEdit {
            start,
            end,
            text: specific.to_string(),
        });
    }

    edits.push(remove_attribute(element, matched));

    if let Some(edit) = insert_import(source, import, specific) {
        edits.push(edit);
    }

    Ok(FixPlan { edits })
}

/// Removal range for the matched attribute, chosen so the remaining list
/// stays syntactically valid.
///
/// The last attribute is removed together with the separator before it
/// (from the end of the previous attribute); any other attribute is removed
/// together with the separator after it (through the start of the next).
/// When the matched attribute is the only one there is no previous attribute
/// to anchor on, so removal starts at the end of the tag name instead.
fn remove_attribute(element: &JsxElement, matched: usize) -> TextEdit {
    let attr = &element.attrs[matched];
    let (start, end) = if matched + 1 < element.attrs.len() {
        (attr.start, element.attrs[matched + 1].start)
    } else if matched > 0 {
        (element.attrs[matched - 1].end, attr.end)
    } else {
        (element.name_end, attr.end)
    };
    TextEdit {
        start,
        end,
        text: String::new(),
    }
}

/// Insertion of `specific` after the last named specifier of `import`.
///
/// Returns `None` when the name is already imported. A declaration whose
/// specifiers span multiple lines gets a newline plus indentation matching
/// the last specifier's column; a single-line declaration gets `, `.
fn insert_import(source: &str, import: &ImportInfo, specific: &str) -> Option<TextEdit> {
    if import.specifiers.iter().any(|sp| sp.local == specific) {
        return None;
    }

    let last = import.specifiers.last()?;
    let (decl_line, _) = offset_to_line_col(source, import.start);
    let (last_line, last_col) = offset_to_line_col(source, last.start);

    let text = if decl_line != last_line {
        format!(",\n{}{}", " ".repeat(last_col - 1), specific)
    } else {
        format!(", {}", specific)
    };

    Some(TextEdit {
        start: last.end,
        end: last.end,
        text,
    })
}
