//! Symbol origin resolution.
//!
//! `ModuleIndex` is a per-module binding table built by the scanner: each
//! local name maps either to the named-import specifier that declared it or
//! to some other kind of binding (default import, namespace import, local
//! declaration). Origin resolution answers "which module did this tag come
//! from" without guessing from the name text alone.

use crate::classifier;
use crate::scanner::JsxElement;
use std::collections::HashMap;

/// An import declaration, lowered to offsets into the original source.
#[derive(Debug, Clone)]
pub struct ImportInfo {
    /// Bare module specifier, without quotes.
    pub module: String,
    /// Byte offset of the start of the declaration.
    pub start: usize,
    /// Named, non-type-only specifiers in source order.
    pub specifiers: Vec<SpecifierInfo>,
}

/// One named import specifier, e.g. `Box` or `Box as B`.
#[derive(Debug, Clone)]
pub struct SpecifierInfo {
    /// Local binding name (the alias, when one is present).
    pub local: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy)]
enum Binding {
    /// Declared by a named specifier of `imports[import]`.
    Specifier { import: usize },
    /// Any other declaration; resolves to no origin.
    Other,
}

/// Binding table for one module.
#[derive(Debug, Default)]
pub struct ModuleIndex {
    imports: Vec<ImportInfo>,
    bindings: HashMap<String, Binding>,
}

impl ModuleIndex {
    /// Registers an import declaration and binds its named specifiers.
    ///
    /// Imports hoist, so the scanner registers them before local
    /// declarations; the first binding for a name is authoritative and is
    /// never overridden.
    pub fn add_import(&mut self, info: ImportInfo) {
        let idx = self.imports.len();
        for sp in &info.specifiers {
            self.bindings
                .entry(sp.local.clone())
                .or_insert(Binding::Specifier { import: idx });
        }
        self.imports.push(info);
    }

    /// Registers a binding that is not a named import specifier.
    pub fn add_other_binding(&mut self, name: &str) {
        self.bindings
            .entry(name.to_string())
            .or_insert(Binding::Other);
    }

    /// Module specifier the name was imported from, if its first binding is
    /// a named import specifier.
    ///
    /// Unbound names (intrinsic tags like `div`), default and namespace
    /// imports, and local declarations all yield `None`. That is the common
    /// not-applicable path, not an error.
    pub fn origin_of(&self, name: &str) -> Option<&str> {
        match self.bindings.get(name)? {
            Binding::Specifier { import } => Some(self.imports[*import].module.as_str()),
            Binding::Other => None,
        }
    }

    /// The import declaration that brought `name` into scope, if any.
    pub fn import_of(&self, name: &str) -> Option<&ImportInfo> {
        match self.bindings.get(name)? {
            Binding::Specifier { import } => Some(&self.imports[*import]),
            Binding::Other => None,
        }
    }
}

/// Whether an element is subject to analysis: its tag must be the tracked
/// generic component name and resolve to the target library. Both checks are
/// exact; a renamed import is not eligible under its alias.
pub fn is_eligible(element: &JsxElement, index: &ModuleIndex) -> bool {
    element.tag == classifier::GENERIC_COMPONENT
        && index.origin_of(&element.tag) == Some(classifier::TARGET_MODULE)
}
