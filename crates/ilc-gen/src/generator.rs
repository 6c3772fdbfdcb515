//! The code generator (spec §4.3): lowers a [`Program`] to x86-64 NASM-syntax
//! assembly over an explicit evaluation stack.
//!
//! Grounded in the reference `Generator`
//! (`examples/original_source/src/generator.hpp`) for the `push`/`pop`
//! helpers, the `stack_size` counter, and the right-before-left operand
//! order for binary expressions; extended with the scope/if-elif-else
//! bookkeeping spec §3.3/§4.3 adds on top of the reference's flat
//! return/let-only generator, and with the linear, innermost-first
//! `bindings` lookup spec §9 calls for rather than the reference's
//! `std::unordered_map`.

use crate::error::GenError;
use ilc_par::{BinOp, Expr, IfPred, IfStmt, Program, Scope, Stmt, Term};
use ilc_util::{Interner, Symbol};

struct Binding {
    name: Symbol,
    stack_index: usize,
}

/// Generates assembly for a single compilation.
///
/// `stack_size`, `bindings`, `scope_marks`, and `label_counter` are exactly
/// the four pieces of state spec §3.3 names for the lexical environment;
/// they live only here and are never touched by any other stage.
pub struct Generator<'i> {
    interner: &'i Interner,
    output: String,
    stack_size: usize,
    bindings: Vec<Binding>,
    scope_marks: Vec<usize>,
    label_counter: usize,
}

impl<'i> Generator<'i> {
    pub fn new(interner: &'i Interner) -> Self {
        Self {
            interner,
            output: String::new(),
            stack_size: 0,
            bindings: Vec::new(),
            scope_marks: Vec::new(),
            label_counter: 0,
        }
    }

    /// Lower `program` to a complete assembly text (spec §4.3's contract).
    pub fn gen_program(mut self, program: &Program<'_>) -> Result<String, GenError> {
        self.emit_line("global _start");
        self.emit_label("_start");
        for stmt in program.stmts {
            self.gen_stmt(stmt)?;
        }
        // Default exit(0): source programs without a `return` still
        // terminate cleanly (spec §4.3 prologue/epilogue).
        self.emit_instr("mov rax, 60");
        self.emit_instr("mov rdi, 0");
        self.emit_instr("syscall");
        Ok(self.output)
    }

    // ------------------------------------------------------------------
    // Emission helpers
    // ------------------------------------------------------------------

    fn emit_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    /// An indented instruction line (spec §6.4: "intermediate lines are
    /// indented with four spaces").
    fn emit_instr(&mut self, instr: &str) {
        self.output.push_str("    ");
        self.output.push_str(instr);
        self.output.push('\n');
    }

    /// A label on its own unindented line (resolved Open Question #2).
    fn emit_label(&mut self, label: &str) {
        self.output.push_str(label);
        self.output.push_str(":\n");
    }

    fn push(&mut self, operand: &str) {
        self.emit_instr(&format!("push {operand}"));
        self.stack_size += 1;
    }

    fn pop(&mut self, reg: &str) {
        self.emit_instr(&format!("pop {reg}"));
        self.stack_size -= 1;
    }

    /// `gen_label()`: `"label" + n`, `n` starting at 0 and incrementing on
    /// each call (spec §4.3).
    fn gen_label(&mut self) -> String {
        let label = format!("label{}", self.label_counter);
        self.label_counter += 1;
        label
    }

    fn find_binding(&self, name: Symbol) -> Option<&Binding> {
        // Innermost-first: a shadowing `let` in a nested scope is never
        // introduced by this language (each `Let` must be fresh, spec
        // §3.2), but scanning from the back keeps the lookup consistent
        // with "linear and innermost-first" (spec §9) regardless.
        self.bindings.iter().rev().find(|b| b.name == name)
    }

    /// Byte displacement of a binding from the current `rsp`, recomputed
    /// for each reference (spec §4.3).
    fn displacement(&self, binding_stack_index: usize) -> usize {
        (self.stack_size - binding_stack_index - 1) * 8
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn gen_stmt(&mut self, stmt: &Stmt<'_>) -> Result<(), GenError> {
        match stmt {
            Stmt::Return { expr, .. } => {
                self.gen_expr(expr)?;
                self.emit_instr("mov rax, 60");
                self.pop("rdi");
                self.emit_instr("syscall");
                Ok(())
            }
            Stmt::Let { name, expr, line } => {
                if self.find_binding(*name).is_some() {
                    return Err(GenError::DuplicateBinding {
                        name: self.interner.resolve(*name).to_string(),
                        line: *line,
                    });
                }
                self.bindings.push(Binding {
                    name: *name,
                    stack_index: self.stack_size,
                });
                self.gen_expr(expr)
            }
            Stmt::Assign { name, expr, line } => {
                let stack_index = self
                    .find_binding(*name)
                    .ok_or_else(|| GenError::UndeclaredAssign {
                        name: self.interner.resolve(*name).to_string(),
                        line: *line,
                    })?
                    .stack_index;
                self.gen_expr(expr)?;
                let d = self.displacement(stack_index);
                // Resolved Open Question #1: store the evaluated value into
                // the binding's slot, then release the temporary so
                // `stack_size` is balanced after the statement (spec §8).
                self.emit_instr("mov rax, [rsp]");
                self.emit_instr(&format!("mov [rsp + {d}], rax"));
                self.pop("rax");
                Ok(())
            }
            Stmt::Scope(scope) => self.gen_scope(scope),
            Stmt::If(if_stmt) => self.gen_if(if_stmt),
        }
    }

    fn begin_scope(&mut self) {
        self.scope_marks.push(self.bindings.len());
    }

    fn end_scope(&mut self) {
        let mark = self.scope_marks.pop().expect("end_scope without begin_scope");
        let pop_count = self.bindings.len() - mark;
        self.emit_instr(&format!("add rsp, {}", pop_count * 8));
        self.stack_size -= pop_count;
        self.bindings.truncate(mark);
    }

    fn gen_scope(&mut self, scope: &Scope<'_>) -> Result<(), GenError> {
        self.begin_scope();
        for stmt in scope.stmts {
            self.gen_stmt(stmt)?;
        }
        self.end_scope();
        Ok(())
    }

    fn gen_if(&mut self, if_stmt: &IfStmt<'_>) -> Result<(), GenError> {
        self.gen_expr(if_stmt.cond)?;
        self.pop("rax");
        self.emit_instr("test rax, rax");
        let else_label = self.gen_label();
        self.emit_instr(&format!("jz {else_label}"));
        self.gen_scope(if_stmt.scope)?;

        match if_stmt.pred {
            None => {
                self.emit_label(&else_label);
            }
            Some(pred) => {
                let end_label = self.gen_label();
                self.emit_instr(&format!("jmp {end_label}"));
                self.emit_label(&else_label);
                self.gen_if_pred(pred, &end_label)?;
                self.emit_label(&end_label);
            }
        }
        Ok(())
    }

    /// Lowers an `elif`/`else` tail. Every minted `next` label is always
    /// defined (even when no further predicate follows), so control always
    /// falls through cleanly into the caller's `end_label:` — an elif chain
    /// never emits a jump to an undefined symbol.
    fn gen_if_pred(&mut self, pred: &IfPred<'_>, end_label: &str) -> Result<(), GenError> {
        match pred {
            IfPred::Elif {
                cond, scope, pred, ..
            } => {
                self.gen_expr(cond)?;
                self.pop("rax");
                self.emit_instr("test rax, rax");
                let next_label = self.gen_label();
                self.emit_instr(&format!("jz {next_label}"));
                self.gen_scope(scope)?;
                self.emit_instr(&format!("jmp {end_label}"));
                self.emit_label(&next_label);
                if let Some(next) = pred {
                    self.gen_if_pred(next, end_label)?;
                }
                Ok(())
            }
            IfPred::Else { scope, .. } => self.gen_scope(scope),
        }
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn gen_expr(&mut self, expr: &Expr<'_>) -> Result<(), GenError> {
        match expr {
            Expr::Term(term) => self.gen_term(term),
            Expr::Binary(bin) => {
                // Right-before-left (spec §4.3/§5): load-bearing for operand
                // placement, not an arbitrary traversal choice.
                self.gen_expr(bin.right)?;
                self.gen_expr(bin.left)?;
                self.pop("rax");
                self.pop("rbx");
                let instr = match bin.op {
                    BinOp::Add => "add rax, rbx",
                    BinOp::Sub => "sub rax, rbx",
                    BinOp::Mul => "mul rbx",
                    // Unsigned divide: defined semantics for this language
                    // (resolved Open Question #3), not an oversight.
                    BinOp::Div => "div rbx",
                };
                self.emit_instr(instr);
                self.push("rax");
                Ok(())
            }
        }
    }

    fn gen_term(&mut self, term: &Term<'_>) -> Result<(), GenError> {
        match term {
            Term::Int(sym) => {
                let text = self.interner.resolve(*sym).to_string();
                self.emit_instr(&format!("mov rax, {text}"));
                self.push("rax");
                Ok(())
            }
            Term::Ident { name, line } => {
                let stack_index = self
                    .find_binding(*name)
                    .ok_or_else(|| GenError::UndeclaredRead {
                        name: self.interner.resolve(*name).to_string(),
                        line: *line,
                    })?
                    .stack_index;
                let d = self.displacement(stack_index);
                self.push(&format!("QWORD [rsp + {d}]"));
                Ok(())
            }
            Term::Paren(inner) => self.gen_expr(inner),
        }
    }
}

/// Lower a complete [`Program`] to assembly text.
pub fn generate(program: &Program<'_>, interner: &Interner) -> Result<String, GenError> {
    Generator::new(interner).gen_program(program)
}
