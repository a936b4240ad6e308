//! Occurrence resolution over type-checked modules.
//!
//! Given a compiled [`Pattern`] and a [`Module`], find every identifier or
//! selector whose *resolved* symbol the pattern accepts. Name resolution is
//! read from the module's tables; nothing is matched on source text.
//!
//! # Member accesses
//! A selector `x.m` is matched in one of two ways:
//! - **promoted**: the selector has a selection entry; its receiver type
//!   decides ownership, so `x.F` matches `T1` even when `F` is declared on
//!   a type embedded in `T1`.
//! - **qualified**: no selection entry (a package-qualified name) and `x`
//!   is a bare identifier that itself resolves to a candidate symbol; the
//!   match is keyed by the written base name.

use crate::error::Result;
use crate::pattern::{MemberPattern, Pattern};
use crate::report::{Match, Matches, Position};
use crate::semantic::{
    Ident, Loader, Module, Node, NodeId, Object, ObjectKind, Pos, Selection, SourceFile,
};
use std::collections::HashMap;

/// Identifier occurrences whose resolved object satisfies the pattern's
/// package and identifier parts, keyed by node.
type Candidates<'m> = HashMap<NodeId, &'m Object>;

/// Find every occurrence in one module.
///
/// Pure: reads only `module` and returns a fresh report.
pub fn find_in_module(pattern: &Pattern, module: &Module) -> Matches {
    let candidates = candidate_idents(pattern, module);
    log::debug!(
        "{}: {} candidate identifier(s) for {}",
        module.path,
        candidates.len(),
        pattern
    );

    // An empty candidate set does not end the search for member queries:
    // promoted selections never need a candidate base.
    let mut matches = Matches::new();
    for file in &module.files {
        match pattern.member() {
            None => scan_idents(file, &candidates, &mut matches),
            Some(member) => scan_selectors(pattern, member, module, file, &candidates, &mut matches),
        }
    }

    log::debug!(
        "{}: {} match(es) at {} position(s)",
        module.path,
        matches.len(),
        matches.total_positions()
    );
    matches
}

/// Find occurrences across modules and fold them into one report.
pub fn find_in_modules<'a>(pattern: &Pattern, modules: impl IntoIterator<Item = &'a Module>) -> Matches {
    let mut matches = Matches::new();
    for module in modules {
        matches.merge(find_in_module(pattern, module));
    }
    matches
}

/// Load `modules` through `loader`, then search them all.
///
/// # Errors
/// Any load failure aborts the search; no partial report is produced.
pub fn find_usages(pattern: &Pattern, loader: &dyn Loader, modules: &[String]) -> Result<Matches> {
    let loaded = loader.load(modules)?;
    Ok(find_in_modules(pattern, &loaded))
}

fn candidate_idents<'m>(pattern: &Pattern, module: &'m Module) -> Candidates<'m> {
    module
        .uses
        .keys()
        .filter_map(|node| {
            let obj = module.use_of(*node)?;
            let pkg = obj.pkg.as_deref()?;
            pattern
                .matches_symbol(pkg, &obj.name)
                .then_some((*node, obj))
        })
        .collect()
}

fn position(file: &SourceFile, pos: Pos) -> Position {
    Position {
        file: file.name.clone(),
        line: pos.line,
        column: pos.column,
        offset: pos.offset,
    }
}

fn scan_idents(file: &SourceFile, candidates: &Candidates<'_>, matches: &mut Matches) {
    file.root.for_each_ident(&mut |ident: &Ident| {
        let Some(obj) = candidates.get(&ident.id) else {
            return;
        };
        // Candidates always carry a package.
        if let Some(pkg) = obj.pkg.as_deref() {
            matches.add(Match::ident(pkg, obj.name.as_str()), position(file, ident.pos));
        }
    });
}

fn scan_selectors(
    pattern: &Pattern,
    member: &MemberPattern,
    module: &Module,
    file: &SourceFile,
    candidates: &Candidates<'_>,
    matches: &mut Matches,
) {
    file.root.walk(&mut |node: &Node| {
        let Node::Selector { id, pos, x, sel } = node else {
            return;
        };

        // A selection entry means the receiver type decides ownership, even
        // when the base is itself a candidate.
        let found = match module.selection(*id) {
            Some(selection) => promoted_match(pattern, member, module, selection),
            None => x
                .as_ident()
                .filter(|base| candidates.contains_key(&base.id))
                .and_then(|base| qualified_match(member, module, base, sel)),
        };

        if let Some(m) = found {
            matches.add(m, position(file, *pos));
        }
    });
}

/// `x.m` with no selection entry, where `x` itself resolves to a candidate.
fn qualified_match(
    member: &MemberPattern,
    module: &Module,
    base: &Ident,
    sel: &Ident,
) -> Option<Match> {
    let obj = module.use_of(sel.id)?;
    if !accepts(member, obj) {
        return None;
    }
    let pkg = obj.pkg.as_deref()?;
    Some(member_match(member, Match::ident(pkg, base.name.as_str()), obj))
}

/// `expr.m` resolved through the selection's receiver type.
fn promoted_match(
    pattern: &Pattern,
    member: &MemberPattern,
    module: &Module,
    selection: &Selection,
) -> Option<Match> {
    let (pkg, name) = selection.recv.unwrap_named()?;
    if !pattern.matches_symbol(pkg, name) {
        return None;
    }
    let obj = module.object(selection.obj)?;
    if !accepts(member, obj) {
        return None;
    }
    Some(member_match(member, Match::ident(pkg, name), obj))
}

fn accepts(member: &MemberPattern, obj: &Object) -> bool {
    match member {
        MemberPattern::Field(re) => obj.kind == ObjectKind::Field && re.is_match(&obj.name),
        MemberPattern::Method(re) => obj.kind == ObjectKind::Method && re.is_match(&obj.name),
    }
}

fn member_match(member: &MemberPattern, base: Match, obj: &Object) -> Match {
    match member {
        MemberPattern::Field(_) => base.with_field(obj.name.as_str()),
        MemberPattern::Method(_) => base.with_method(obj.name.as_str()),
    }
}
