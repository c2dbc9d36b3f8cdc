//! Name binding: one `SymbolTable` per class and per subroutine.

use std::collections::HashMap;

use crate::ast::{Class, ClassVarKind, Subroutine, SubroutineKind, Type};
use crate::error::{CompileError, CompileResult};
use crate::span::Spanned;
use crate::vm::Segment;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Static,
    Field,
    Argument,
    Local,
}

impl SymbolKind {
    /// Fields live in the receiver object; the rest map 1:1.
    pub fn segment(self) -> Segment {
        match self {
            SymbolKind::Static => Segment::Static,
            SymbolKind::Field => Segment::This,
            SymbolKind::Argument => Segment::Argument,
            SymbolKind::Local => Segment::Local,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl From<ClassVarKind> for SymbolKind {
    fn from(kind: ClassVarKind) -> Self {
        match kind {
            ClassVarKind::Static => SymbolKind::Static,
            ClassVarKind::Field => SymbolKind::Field,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub ty: Type,
    pub kind: SymbolKind,
    /// Dense, zero-based position within (scope, kind).
    pub ordinal: u32,
}

/// Name → symbol map for a single scope.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    scope: String,
    symbols: HashMap<String, Symbol>,
    counts: [u32; 4],
}

impl SymbolTable {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            symbols: HashMap::new(),
            counts: [0; 4],
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Bind `name` to the next ordinal of `kind`.
    pub fn declare(
        &mut self,
        name: &Spanned<String>,
        ty: Type,
        kind: SymbolKind,
    ) -> CompileResult<&Symbol> {
        if self.symbols.contains_key(&name.node) {
            return Err(Spanned::new(
                CompileError::DuplicateDeclaration {
                    scope: self.scope.clone(),
                    name: name.node.clone(),
                },
                name.span,
            ));
        }
        let ordinal = self.counts[kind.slot()];
        self.counts[kind.slot()] += 1;
        let symbol = self
            .symbols
            .entry(name.node.clone())
            .or_insert(Symbol { ty, kind, ordinal });
        Ok(symbol)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Number of symbols declared with `kind`.
    pub fn count(&self, kind: SymbolKind) -> u32 {
        self.counts[kind.slot()]
    }
}

// ─── Class scope ──────────────────────────────────────────────────

/// Everything a subroutine body may need from its class. Built once,
/// before any body compiles.
#[derive(Clone, Debug)]
pub struct ClassScope {
    pub name: String,
    pub symbols: SymbolTable,
    /// Qualified name (`Class.sub`) → kind.
    pub signatures: HashMap<String, SubroutineKind>,
    pub field_count: u32,
}

impl ClassScope {
    pub fn build(class: &Class) -> CompileResult<Self> {
        let name = class.name.node.clone();
        let mut symbols = SymbolTable::new(format!("class {}", name));
        for dec in &class.var_decs {
            symbols.declare(&dec.name, dec.ty.clone(), dec.kind.into())?;
        }

        let mut signatures = HashMap::new();
        for sub in &class.subroutines {
            let qualified = format!("{}.{}", name, sub.name.node);
            if signatures.insert(qualified, sub.kind).is_some() {
                return Err(Spanned::new(
                    CompileError::DuplicateDeclaration {
                        scope: format!("class {}", name),
                        name: sub.name.node.clone(),
                    },
                    sub.name.span,
                ));
            }
        }

        let field_count = symbols.count(SymbolKind::Field);
        Ok(Self {
            name,
            symbols,
            signatures,
            field_count,
        })
    }

    /// Kind of the subroutine `name` declared in this class.
    pub fn signature(&self, name: &str) -> Option<SubroutineKind> {
        self.signatures
            .get(&format!("{}.{}", self.name, name))
            .copied()
    }
}

// ─── Routine scope ────────────────────────────────────────────────

/// Arguments and locals of the subroutine being compiled.
#[derive(Clone, Debug)]
pub struct RoutineScope {
    pub symbols: SymbolTable,
}

impl RoutineScope {
    /// For methods, argument 0 is the implicit receiver.
    pub fn build(class: &ClassScope, sub: &Subroutine) -> CompileResult<Self> {
        let mut symbols = SymbolTable::new(format!("{}.{}", class.name, sub.name.node));
        if sub.kind == SubroutineKind::Method {
            symbols.declare(
                &Spanned::new("this".to_string(), sub.name.span),
                Type::Class(class.name.clone()),
                SymbolKind::Argument,
            )?;
        }
        for param in &sub.params {
            symbols.declare(&param.name, param.ty.clone(), SymbolKind::Argument)?;
        }
        for local in &sub.locals {
            symbols.declare(&local.name, local.ty.clone(), SymbolKind::Local)?;
        }
        Ok(Self { symbols })
    }

    pub fn local_count(&self) -> u32 {
        self.symbols.count(SymbolKind::Local)
    }
}

/// Routine scope first, then class scope.
pub fn lookup<'a>(
    name: &str,
    routine: &'a RoutineScope,
    class: &'a ClassScope,
) -> Option<&'a Symbol> {
    routine
        .symbols
        .get(name)
        .or_else(|| class.symbols.get(name))
}

/// `lookup` that fails with `UndeclaredVariable`.
pub fn resolve<'a>(
    name: &Spanned<String>,
    routine: &'a RoutineScope,
    class: &'a ClassScope,
) -> CompileResult<&'a Symbol> {
    lookup(&name.node, routine, class).ok_or_else(|| {
        Spanned::new(
            CompileError::UndeclaredVariable {
                scope: routine.symbols.scope().to_string(),
                name: name.node.clone(),
            },
            name.span,
        )
    })
}
