//! Replacement rule table.
//!
//! Maps (generic component, attribute name, attribute value) triples to the
//! specific Chakra component that expresses the same thing. The table is a
//! build-time constant; `classify` is a pure lookup with no other logic.

/// Module specifier of the library whose components are tracked.
pub const TARGET_MODULE: &str = "@chakra-ui/react";

/// The generic component this tool looks for.
pub const GENERIC_COMPONENT: &str = "Box";

/// One replacement rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub component: &'static str,
    pub attribute: &'static str,
    pub value: &'static str,
    pub replacement: &'static str,
}

/// Attribute/value combinations that prescribe a specific component.
pub const RULES: &[Rule] = &[
    Rule {
        component: "Box",
        attribute: "display",
        value: "flex",
        replacement: "Flex",
    },
    Rule {
        component: "Box",
        attribute: "display",
        value: "grid",
        replacement: "Grid",
    },
    Rule {
        component: "Box",
        attribute: "as",
        value: "img",
        replacement: "Image",
    },
];

/// Looks up the specific component prescribed for an attribute, if any.
///
/// `value` is the cooked string value of the attribute, without quotes.
pub fn classify(component: &str, attribute: &str, value: &str) -> Option<&'static str> {
    RULES
        .iter()
        .find(|r| r.component == component && r.attribute == attribute && r.value == value)
        .map(|r| r.replacement)
}
