//! Shared builder for hand-assembled type-checked modules.

#![allow(dead_code)]

use ged::semantic::{
    Ident, Module, Node, NodeId, Object, ObjectId, ObjectKind, Pos, Selection, SelectionKind,
    SourceFile, TypeRef,
};

/// Builds a [`Module`] statement by statement, assigning node ids and
/// recording uses and selections as nodes are created.
pub struct ModuleBuilder {
    module: Module,
    next_id: u32,
    file: Option<String>,
    stmts: Vec<Node>,
}

impl ModuleBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            module: Module {
                path: path.to_string(),
                ..Module::default()
            },
            next_id: 1,
            file: None,
            stmts: Vec::new(),
        }
    }

    /// Declare an object and return its id.
    pub fn object(&mut self, pkg: &str, name: &str, kind: ObjectKind) -> ObjectId {
        let id = ObjectId(self.module.objects.len() as u32);
        self.module.objects.push(Object {
            name: name.to_string(),
            pkg: Some(pkg.to_string()),
            kind,
        });
        id
    }

    /// Start a new source file; statements go into it until the next call.
    pub fn file(&mut self, name: &str) -> &mut Self {
        self.finish_file();
        self.file = Some(name.to_string());
        self
    }

    /// Identifier at `line:column`, resolving to `obj` when given.
    pub fn ident(&mut self, name: &str, obj: Option<ObjectId>, line: usize, column: usize) -> Node {
        Node::Ident(self.raw_ident(name, obj, line, column))
    }

    /// `x.name` where the member identifier starts at `column`.
    ///
    /// `selection` records the receiver type the checker saw for `x`;
    /// without it the selector is a qualified identifier.
    pub fn selector(
        &mut self,
        x: Node,
        name: &str,
        obj: ObjectId,
        column: usize,
        selection: Option<TypeRef>,
    ) -> Node {
        let pos = start_of(&x);
        let id = self.node_id();
        let sel = self.raw_ident(name, Some(obj), pos.line, column);
        if let Some(recv) = selection {
            let kind = match self.module.objects[obj.0 as usize].kind {
                ObjectKind::Method => SelectionKind::MethodVal,
                _ => SelectionKind::FieldVal,
            };
            self.module
                .selections
                .insert(id, Selection { kind, recv, obj });
        }
        Node::Selector {
            id,
            pos,
            x: Box::new(x),
            sel,
        }
    }

    /// Append a statement made of `nodes` to the current file.
    pub fn stmt(&mut self, nodes: Vec<Node>) -> &mut Self {
        self.stmts.push(Node::Composite {
            kind: "stmt".to_string(),
            children: nodes,
        });
        self
    }

    pub fn build(mut self) -> Module {
        self.finish_file();
        self.module
    }

    fn finish_file(&mut self) {
        if let Some(name) = self.file.take() {
            let root = Node::Composite {
                kind: "file".to_string(),
                children: std::mem::take(&mut self.stmts),
            };
            self.module.files.push(SourceFile { name, root });
        }
    }

    fn node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn raw_ident(&mut self, name: &str, obj: Option<ObjectId>, line: usize, column: usize) -> Ident {
        let id = self.node_id();
        if let Some(obj) = obj {
            self.module.uses.insert(id, obj);
        }
        Ident {
            id,
            name: name.to_string(),
            pos: Pos {
                offset: line * 100 + column,
                line,
                column,
            },
        }
    }
}

/// Named type reference.
pub fn named(pkg: &str, name: &str) -> TypeRef {
    TypeRef::Named {
        pkg: Some(pkg.to_string()),
        name: name.to_string(),
    }
}

/// Pointer to a named type.
pub fn pointer(pkg: &str, name: &str) -> TypeRef {
    TypeRef::Pointer(Box::new(named(pkg, name)))
}

fn start_of(node: &Node) -> Pos {
    match node {
        Node::Ident(ident) => ident.pos,
        Node::Selector { pos, .. } => *pos,
        Node::Composite { children, .. } => children.first().map(start_of).unwrap_or_default(),
    }
}
