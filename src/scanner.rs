//! Source file scanner.
//!
//! Recursively walks directories to collect JSX-capable source files,
//! skipping entries whose names start with `.` or `_` plus any user-supplied
//! exclude patterns. Each file is parsed with swc's TSX parser and lowered
//! into the plain element/binding data the rest of the crate consumes, so no
//! other module touches compiler types.
//!
//! Only `.js`, `.jsx` and `.tsx` files are collected; plain `.ts` cannot
//! contain JSX.

use crate::resolver::{ImportInfo, ModuleIndex, SpecifierInfo};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use swc_core::common::{BytePos, Span, Spanned};
use swc_core::ecma::ast::{
    ClassDecl, EsVersion, FnDecl, ImportDecl, ImportSpecifier, JSXAttrName, JSXAttrOrSpread,
    JSXAttrValue, JSXElement as SwcJsxElement, JSXElementName, Lit, Module, ModuleDecl,
    ModuleItem, Pat, VarDeclarator,
};
use swc_core::ecma::parser::{lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};
use swc_core::ecma::visit::{Visit, VisitWith};
use walkdir::WalkDir;

/// A JSX element lowered to tag text and byte ranges in the original source.
#[derive(Debug, Clone)]
pub struct JsxElement {
    /// Rendered tag name, e.g. `"Box"`. Member tags like `<Chakra.Box>` are
    /// not lowered.
    pub tag: String,
    /// Line of the opening tag, 1-indexed.
    pub line: usize,
    /// Column of the opening tag, 1-indexed.
    pub column: usize,
    /// Range of the opening tag's name.
    pub name_start: usize,
    pub name_end: usize,
    /// Range of the closing tag's name; `None` when self-closing.
    pub closing_name: Option<(usize, usize)>,
    /// All attributes in source order, spreads included.
    pub attrs: Vec<Attr>,
}

/// One attribute of an opening tag.
#[derive(Debug, Clone)]
pub struct Attr {
    /// Full range of the attribute, spread braces included.
    pub start: usize,
    pub end: usize,
    /// Present for plain `name="literal"` attributes; spreads, valueless
    /// attributes and expression containers are never candidates.
    pub candidate: Option<AttrCandidate>,
}

/// The (name, cooked string value) pair of a candidate attribute.
#[derive(Debug, Clone)]
pub struct AttrCandidate {
    pub name: String,
    pub value: String,
}

/// One parsed source file: its elements plus the module binding table.
#[derive(Debug)]
pub struct SourceModule {
    pub elements: Vec<JsxElement>,
    pub index: ModuleIndex,
}

/// Collects JSX-capable files under `paths`.
///
/// Entries whose names start with `.` or `_` are skipped unless
/// `default_excludes` is off; `excludes` patterns are matched against entry
/// file names. `.d.ts`-style declaration files are never collected.
pub fn collect_source_files(
    paths: &[PathBuf],
    excludes: &[glob::Pattern],
    default_excludes: bool,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        for entry in WalkDir::new(path)
            .into_iter()
            .filter_entry(|e| !is_excluded(e, excludes, default_excludes))
        {
            let entry = entry?;
            if entry.file_type().is_file() && has_jsx_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    Ok(files)
}

fn is_excluded(
    entry: &walkdir::DirEntry,
    excludes: &[glob::Pattern],
    default_excludes: bool,
) -> bool {
    let Some(name) = entry.file_name().to_str() else {
        return true;
    };
    if default_excludes && (name.starts_with('.') || name.starts_with('_')) {
        return true;
    }
    excludes.iter().any(|p| p.matches(name))
}

fn has_jsx_extension(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.ends_with(".d.ts") {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| matches!(ext, "js" | "jsx" | "tsx"))
}

/// Reads and parses one source file.
pub fn scan_file(file: &Path) -> Result<SourceModule> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    parse_source(&source).with_context(|| format!("Failed to parse {}", file.display()))
}

// The lexer is handed spans starting at 1; 0 is the dummy position.
const PARSE_BASE: u32 = 1;

fn span_range(span: Span) -> (usize, usize) {
    (
        span.lo.0.saturating_sub(PARSE_BASE) as usize,
        span.hi.0.saturating_sub(PARSE_BASE) as usize,
    )
}

/// Parses TSX source and lowers it into a [`SourceModule`].
///
/// Recoverable parse errors are reported to stderr and the file is still
/// lowered; only an unparseable module is an error.
pub fn parse_source(source: &str) -> Result<SourceModule> {
    let syntax = Syntax::Typescript(TsSyntax {
        tsx: true,
        ..Default::default()
    });
    let input = StringInput::new(
        source,
        BytePos(PARSE_BASE),
        BytePos(PARSE_BASE + source.len() as u32),
    );
    let lexer = Lexer::new(syntax, EsVersion::Es2022, input, None);
    let mut parser = Parser::new_from(lexer);

    let module = parser
        .parse_module()
        .map_err(|e| anyhow::anyhow!("parse error: {:?}", e))?;
    for err in parser.take_errors() {
        eprintln!("warn: recoverable parse error: {:?}", err);
    }

    Ok(lower_module(&module, source))
}

fn lower_module(module: &Module, source: &str) -> SourceModule {
    let mut index = ModuleIndex::default();

    // Imports hoist: register their bindings before local declarations so
    // the first-declaration rule sees them first.
    for item in &module.body {
        if let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item {
            lower_import(&mut index, decl);
        }
    }

    let mut collector = Collector {
        source,
        elements: Vec::new(),
        index,
    };
    module.visit_with(&mut collector);

    SourceModule {
        elements: collector.elements,
        index: collector.index,
    }
}

fn lower_import(index: &mut ModuleIndex, decl: &ImportDecl) {
    if decl.type_only {
        return;
    }

    let mut specifiers = Vec::new();
    for sp in &decl.specifiers {
        match sp {
            ImportSpecifier::Named(named) if !named.is_type_only => {
                let (start, end) = span_range(named.span);
                specifiers.push(SpecifierInfo {
                    local: named.local.sym.to_string(),
                    start,
                    end,
                });
            }
            ImportSpecifier::Named(_) => {}
            ImportSpecifier::Default(d) => index.add_other_binding(d.local.sym.as_ref()),
            ImportSpecifier::Namespace(ns) => index.add_other_binding(ns.local.sym.as_ref()),
        }
    }

    index.add_import(ImportInfo {
        module: decl.src.value.to_string(),
        start: span_range(decl.span).0,
        specifiers,
    });
}

struct Collector<'a> {
    source: &'a str,
    elements: Vec<JsxElement>,
    index: ModuleIndex,
}

impl Collector<'_> {
    fn lower_element(&self, n: &SwcJsxElement) -> Option<JsxElement> {
        let name_ident = match &n.opening.name {
            JSXElementName::Ident(id) => id,
            _ => return None,
        };
        let (name_start, name_end) = span_range(name_ident.span);
        let (start, _) = span_range(n.opening.span);
        let (line, column) = offset_to_line_col(self.source, start);

        Some(JsxElement {
            tag: name_ident.sym.to_string(),
            line,
            column,
            name_start,
            name_end,
            closing_name: n.closing.as_ref().map(|c| span_range(c.name.span())),
            attrs: n.opening.attrs.iter().map(|a| self.lower_attr(a)).collect(),
        })
    }

    fn lower_attr(&self, attr: &JSXAttrOrSpread) -> Attr {
        match attr {
            JSXAttrOrSpread::JSXAttr(a) => {
                let (start, end) = span_range(a.span);
                let candidate = match (&a.name, &a.value) {
                    (JSXAttrName::Ident(name), Some(JSXAttrValue::Lit(Lit::Str(s)))) => {
                        Some(AttrCandidate {
                            name: name.sym.to_string(),
                            value: s.value.to_string(),
                        })
                    }
                    _ => None,
                };
                Attr {
                    start,
                    end,
                    candidate,
                }
            }
            JSXAttrOrSpread::SpreadElement(sp) => {
                // swc spans the spread as `...expr`; the surrounding braces
                // belong to the attribute, so widen to include them.
                let (start, end) = span_range(sp.span());
                let start = self.source[..start].rfind('{').unwrap_or(start);
                let end = self.source[end..]
                    .find('}')
                    .map(|i| end + i + 1)
                    .unwrap_or(end);
                Attr {
                    start,
                    end,
                    candidate: None,
                }
            }
        }
    }
}

impl Visit for Collector<'_> {
    fn visit_jsx_element(&mut self, n: &SwcJsxElement) {
        if let Some(el) = self.lower_element(n) {
            self.elements.push(el);
        }
        n.visit_children_with(self);
    }

    fn visit_fn_decl(&mut self, n: &FnDecl) {
        self.index.add_other_binding(n.ident.sym.as_ref());
        n.visit_children_with(self);
    }

    fn visit_class_decl(&mut self, n: &ClassDecl) {
        self.index.add_other_binding(n.ident.sym.as_ref());
        n.visit_children_with(self);
    }

    fn visit_var_declarator(&mut self, n: &VarDeclarator) {
        if let Pat::Ident(ident) = &n.name {
            self.index.add_other_binding(ident.id.sym.as_ref());
        }
        n.visit_children_with(self);
    }
}

pub(crate) fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
