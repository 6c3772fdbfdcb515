//! A canonical-spacing printer from [`Program`] back to source text.
//!
//! Exists only to exercise spec §8's round-trip property ("parsing then
//! printing the AST with canonical spacing and re-parsing yields an AST
//! equal to the first"); it is not part of the compiler's own pipeline,
//! which never prints an AST back to source. Binary expressions are
//! printed without extra parenthesization — precedence climbing
//! reconstructs the same left-associative tree from the same operator
//! sequence — except for an explicit `Term::Paren`, which is printed with
//! its parentheses so that distinction survives the round trip too.

use crate::ast::{BinOp, Expr, IfPred, IfStmt, Program, Scope, Stmt, Term};
use ilc_util::Interner;

/// Render `program` back to source text in a single canonical spacing.
pub fn print_program(program: &Program<'_>, interner: &Interner) -> String {
    let mut out = String::new();
    for stmt in program.stmts {
        print_stmt(stmt, interner, &mut out);
        out.push(' ');
    }
    out
}

fn print_stmt(stmt: &Stmt<'_>, interner: &Interner, out: &mut String) {
    match stmt {
        Stmt::Return { expr, .. } => {
            out.push_str("return(");
            print_expr(expr, interner, out);
            out.push_str(");");
        }
        Stmt::Let { name, expr, .. } => {
            out.push_str("let ");
            out.push_str(interner.resolve(*name));
            out.push_str(" = ");
            print_expr(expr, interner, out);
            out.push(';');
        }
        Stmt::Assign { name, expr, .. } => {
            out.push_str(interner.resolve(*name));
            out.push_str(" = ");
            print_expr(expr, interner, out);
            out.push(';');
        }
        Stmt::Scope(scope) => print_scope(scope, interner, out),
        Stmt::If(if_stmt) => print_if(if_stmt, interner, out),
    }
}

fn print_scope(scope: &Scope<'_>, interner: &Interner, out: &mut String) {
    out.push_str("{ ");
    for stmt in scope.stmts {
        print_stmt(stmt, interner, out);
        out.push(' ');
    }
    out.push('}');
}

fn print_if(if_stmt: &IfStmt<'_>, interner: &Interner, out: &mut String) {
    out.push_str("if (");
    print_expr(if_stmt.cond, interner, out);
    out.push_str(") ");
    print_scope(if_stmt.scope, interner, out);
    if let Some(pred) = if_stmt.pred {
        out.push(' ');
        print_if_pred(pred, interner, out);
    }
}

fn print_if_pred(pred: &IfPred<'_>, interner: &Interner, out: &mut String) {
    match pred {
        IfPred::Elif {
            cond, scope, pred, ..
        } => {
            out.push_str("elif (");
            print_expr(cond, interner, out);
            out.push_str(") ");
            print_scope(scope, interner, out);
            if let Some(next) = pred {
                out.push(' ');
                print_if_pred(next, interner, out);
            }
        }
        IfPred::Else { scope, .. } => {
            out.push_str("else ");
            print_scope(scope, interner, out);
        }
    }
}

fn print_expr(expr: &Expr<'_>, interner: &Interner, out: &mut String) {
    match expr {
        Expr::Term(term) => print_term(term, interner, out),
        Expr::Binary(bin) => {
            print_expr(bin.left, interner, out);
            out.push(' ');
            out.push_str(match bin.op {
                BinOp::Add => "+",
                BinOp::Sub => "-",
                BinOp::Mul => "*",
                BinOp::Div => "/",
            });
            out.push(' ');
            print_expr(bin.right, interner, out);
        }
    }
}

fn print_term(term: &Term<'_>, interner: &Interner, out: &mut String) {
    match term {
        Term::Int(sym) => out.push_str(interner.resolve(*sym)),
        Term::Ident { name, .. } => out.push_str(interner.resolve(*name)),
        Term::Paren(inner) => {
            out.push('(');
            print_expr(inner, interner, out);
            out.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use ilc_util::Arena;

    fn roundtrip(src: &str) {
        let mut interner = Interner::new();
        let tokens = ilc_lex::tokenize(src, &mut interner).expect("lexes");
        let arena_a = Arena::with_capacity(4096);
        let program_a = parse(tokens, &arena_a).expect("parses");

        let canonical = print_program(&program_a, &interner);

        let tokens_b = ilc_lex::tokenize(&canonical, &mut interner).expect("reprint lexes");
        let arena_b = Arena::with_capacity(4096);
        let program_b = parse(tokens_b, &arena_b).expect("reprint parses");

        assert_eq!(
            program_a, program_b,
            "reparsing the canonical reprint of {src:?} (printed as {canonical:?}) produced a different AST"
        );
    }

    #[test]
    fn roundtrips_arithmetic_precedence() {
        roundtrip("let x = 2; let y = 3; return(x + y * 4);");
    }

    #[test]
    fn roundtrips_explicit_parentheses() {
        roundtrip("let x = 20; let y = 2; return((x + y) * 2);");
    }

    #[test]
    fn roundtrips_left_associative_chain() {
        roundtrip("return(a - b - c);");
    }

    #[test]
    fn roundtrips_nested_scopes() {
        roundtrip("{ let x = 1; { let y = 2; x = y; } }");
    }

    #[test]
    fn roundtrips_if_elif_else_chain() {
        roundtrip(
            "let x = 0; if (0) { x = 1; } elif (0) { x = 2; } elif (1) { x = 3; } else { x = 4; } return(x);",
        );
    }
}
