//! Call-target resolution.

use crate::ast::{SubroutineCall, SubroutineKind};
use crate::error::{CompileError, CompileResult};
use crate::span::Spanned;
use crate::vm::Segment;

use super::scope::lookup;
use super::ClassCompiler;

impl ClassCompiler<'_> {
    /// Push any implicit receiver, then the arguments, then `call`.
    ///
    /// A receiver that names a variable in scope is an instance call
    /// qualified by the variable's type; any other receiver is a class
    /// name. Without a receiver the target must be declared in this
    /// class, and methods get `this` pushed first.
    pub(crate) fn compile_call(&mut self, call: &SubroutineCall) -> CompileResult<()> {
        let mut n_args = call.args.len() as u32;

        let target = match &call.receiver {
            Some(receiver) => {
                let symbol = lookup(&receiver.node, &self.routine, &self.class).cloned();
                self.check_receiver_spelling(receiver, symbol.is_some());
                match symbol {
                    Some(sym) => {
                        self.push(sym.kind.segment(), sym.ordinal);
                        n_args += 1;
                        format!("{}.{}", sym.ty.name(), call.name.node)
                    }
                    None => format!("{}.{}", receiver.node, call.name.node),
                }
            }
            None => {
                let kind = self.class.signature(&call.name.node).ok_or_else(|| {
                    Spanned::new(
                        CompileError::UnknownSubroutine {
                            class: self.class.name.clone(),
                            name: call.name.node.clone(),
                        },
                        call.name.span,
                    )
                })?;
                if kind == SubroutineKind::Method {
                    self.push(Segment::Pointer, 0);
                    n_args += 1;
                }
                format!("{}.{}", self.class.name, call.name.node)
            }
        };

        for arg in &call.args {
            self.compile_expr(arg)?;
        }
        self.call(target, n_args);
        Ok(())
    }

    /// Capitalized receivers conventionally name classes. Binding is
    /// decided by scope alone; this only reports where spelling and
    /// scope disagree.
    fn check_receiver_spelling(&self, receiver: &Spanned<String>, bound: bool) {
        let looks_like_type = receiver
            .node
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase());
        if bound && looks_like_type {
            tracing::warn!(
                scope = self.routine.symbols.scope(),
                receiver = %receiver.node,
                "capitalized receiver is bound to a variable; compiling an instance call"
            );
        } else if !bound && !looks_like_type {
            tracing::warn!(
                scope = self.routine.symbols.scope(),
                receiver = %receiver.node,
                "lowercase receiver is not a variable in scope; treating it as a class name"
            );
        }
    }
}
