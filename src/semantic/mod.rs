//! Type-resolved module representation.
//!
//! A [`Module`] is what a semantic loader hands to the resolver: syntax
//! trees for each file plus the lookup tables produced by type checking.
//! Nothing here recomputes name resolution; the tables are taken as given.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use loader::{DumpLoader, Loader};

/// Identity of a syntax node within one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

/// Index into [`Module::objects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

/// Source location of a node inside its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pos {
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based, in bytes).
    pub column: usize,
}

/// An identifier occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    /// Node identity, the key into [`Module::uses`].
    pub id: NodeId,
    /// The identifier as written.
    pub name: String,
    /// Where the identifier starts.
    pub pos: Pos,
}

/// Syntax tree node.
///
/// Only identifiers and selector expressions carry meaning for the resolver;
/// every other construct is a [`Node::Composite`] that is merely traversed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    /// Bare identifier.
    Ident(Ident),

    /// Member access `x.sel`.
    Selector {
        /// Node identity, the key into [`Module::selections`].
        id: NodeId,
        /// Position of the whole expression (the start of `x`).
        pos: Pos,
        /// The base expression.
        x: Box<Node>,
        /// The member name.
        sel: Ident,
    },

    /// Any other construct (declarations, statements, calls, literals...).
    Composite {
        /// Construct name as reported by the producer, e.g. `call_expr`.
        kind: String,
        /// Child nodes in source order.
        #[serde(default)]
        children: Vec<Node>,
    },
}

impl Node {
    /// Visit this node and all its descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        match self {
            Node::Ident(_) => {}
            Node::Selector { x, .. } => x.walk(visit),
            Node::Composite { children, .. } => {
                for child in children {
                    child.walk(visit);
                }
            }
        }
    }

    /// Visit every identifier below this node, selector members included.
    pub fn for_each_ident<'a>(&'a self, visit: &mut impl FnMut(&'a Ident)) {
        self.walk(&mut |node| match node {
            Node::Ident(ident) => visit(ident),
            Node::Selector { sel, .. } => visit(sel),
            Node::Composite { .. } => {}
        });
    }

    /// The identifier payload, if this is an identifier node.
    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Node::Ident(ident) => Some(ident),
            _ => None,
        }
    }
}

/// What kind of entity a declared object is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Struct field (including embedded fields).
    Field,
    /// Method with a receiver.
    Method,
    /// Variable that is not a field.
    Var,
    /// Function without a receiver.
    Func,
    /// Declared type.
    TypeName,
    /// Constant.
    Const,
    /// Imported package name.
    PkgName,
    /// Statement label.
    Label,
    /// Predeclared function.
    Builtin,
    /// Predeclared `nil`.
    Nil,
}

/// A declared symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    /// Declared name.
    pub name: String,
    /// Path of the declaring package; `None` for predeclared objects.
    #[serde(default)]
    pub pkg: Option<String>,
    /// Object kind.
    pub kind: ObjectKind,
}

/// A type as recorded for a selection's receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// Declared (named) type.
    Named {
        /// Declaring package path; `None` for predeclared types like `error`.
        #[serde(default)]
        pkg: Option<String>,
        /// Type name.
        name: String,
    },
    /// Pointer to another type.
    Pointer(Box<TypeRef>),
    /// Anything else: interfaces, literals, basic types. Kept for diagnostics.
    Other(String),
}

impl TypeRef {
    /// Strip at most one pointer and return the named type underneath.
    ///
    /// Returns `(package, name)`. `*T` and `T` give the same answer;
    /// `**T`, unnamed and predeclared types give `None`.
    pub fn unwrap_named(&self) -> Option<(&str, &str)> {
        let named = match self {
            TypeRef::Pointer(elem) => elem.as_ref(),
            other => other,
        };
        match named {
            TypeRef::Named {
                pkg: Some(pkg),
                name,
            } => Some((pkg.as_str(), name.as_str())),
            _ => None,
        }
    }
}

/// How a selector was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    /// `x.f` is a field access.
    FieldVal,
    /// `x.m` is a method value.
    MethodVal,
    /// `T.m` is a method expression.
    MethodExpr,
}

/// Resolution of one selector expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Selection kind.
    pub kind: SelectionKind,
    /// Static type of the base expression.
    pub recv: TypeRef,
    /// The selected member.
    pub obj: ObjectId,
}

/// One source file of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    /// File path as reported in positions.
    pub name: String,
    /// Syntax tree root.
    pub root: Node,
}

/// A type-checked module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Module (package) path.
    pub path: String,
    /// Parsed files.
    #[serde(default)]
    pub files: Vec<SourceFile>,
    /// Declared objects referenced by the tables below.
    #[serde(default)]
    pub objects: Vec<Object>,
    /// Identifier occurrence to the object it denotes.
    #[serde(default)]
    pub uses: HashMap<NodeId, ObjectId>,
    /// Selector expression to its resolved member and receiver type.
    #[serde(default)]
    pub selections: HashMap<NodeId, Selection>,
    /// Diagnostics from loading or type checking. Non-empty means unusable.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl Module {
    /// Look up an object by id.
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0 as usize)
    }

    /// The object an identifier occurrence denotes.
    pub fn use_of(&self, ident: NodeId) -> Option<&Object> {
        self.uses.get(&ident).and_then(|id| self.object(*id))
    }

    /// The resolution of a selector expression, if it is a field or method selection.
    pub fn selection(&self, selector: NodeId) -> Option<&Selection> {
        self.selections.get(&selector)
    }

    /// Check that every table entry points at an existing object.
    ///
    /// Returns a description of the first dangling reference.
    pub fn check_references(&self) -> std::result::Result<(), String> {
        for (node, obj) in &self.uses {
            if self.object(*obj).is_none() {
                return Err(format!(
                    "use of node {} refers to missing object {}",
                    node.0, obj.0
                ));
            }
        }
        for (node, sel) in &self.selections {
            if self.object(sel.obj).is_none() {
                return Err(format!(
                    "selection at node {} refers to missing object {}",
                    node.0, sel.obj.0
                ));
            }
        }
        Ok(())
    }
}
