//! SQL text rendering for backend expression trees.
//!
//! This is where composite templates are finally expanded: every placeholder is replaced
//! by its rendered parameter, parenthesized when the parameter binds more loosely than
//! the composite that contains it.

use crate::literal::Literal;
use crate::precedence::Precedence;
use crate::sql::{ColumnRef, SqlExpr, SqlExpression, UNREFERENCED_OPERAND_TEXT};
use crate::template::{TemplateToken, TemplateTokens};
use xlate_result::{Error, Result};

/// Render `expr` as SQL text.
pub fn to_sql(expr: &SqlExpr) -> Result<String> {
    let mut out = String::new();
    write_expr(&mut out, expr)?;
    Ok(out)
}

fn write_expr(out: &mut String, expr: &SqlExpr) -> Result<()> {
    match expr {
        SqlExpr::Value { value, .. } => write_literal(out, value)?,
        SqlExpr::Parameter { name, .. } => {
            out.push('@');
            out.push_str(name);
        }
        SqlExpr::Column(column) => write_column(out, column),
        SqlExpr::Binary {
            left, op, right, ..
        } => {
            let precedence = op.precedence();
            write_operand(out, left, precedence)?;
            out.push(' ');
            out.push_str(op.as_str());
            out.push(' ');
            write_operand(out, right, precedence)?;
        }
        SqlExpr::Compare { left, op, right } => {
            let precedence = op.precedence();
            write_operand(out, left, precedence)?;
            out.push(' ');
            out.push_str(op.as_str());
            out.push(' ');
            write_operand(out, right, precedence)?;
        }
        SqlExpr::Expression(composite) => write_composite(out, composite)?,
        SqlExpr::Unreferenced => out.push_str(UNREFERENCED_OPERAND_TEXT),
    }
    Ok(())
}

fn write_operand(out: &mut String, expr: &SqlExpr, parent: Precedence) -> Result<()> {
    if expr.precedence().needs_parentheses_within(parent) {
        out.push('(');
        write_expr(out, expr)?;
        out.push(')');
        Ok(())
    } else {
        write_expr(out, expr)
    }
}

fn write_composite(out: &mut String, composite: &SqlExpression) -> Result<()> {
    for token in TemplateTokens::new(&composite.template) {
        match token? {
            TemplateToken::Literal(text) => out.push_str(text),
            TemplateToken::Placeholder { index, .. } => {
                let parameter = composite.parameters.get(index).ok_or_else(|| {
                    Error::PlaceholderOutOfRange {
                        template: composite.template.to_string(),
                        index,
                        operand_count: composite.parameters.len(),
                    }
                })?;
                write_operand(out, parameter, composite.precedence)?;
            }
        }
    }
    Ok(())
}

fn write_literal(out: &mut String, value: &Literal) -> Result<()> {
    match value {
        Literal::Null => out.push_str("NULL"),
        Literal::Boolean(true) => out.push_str("TRUE"),
        Literal::Boolean(false) => out.push_str("FALSE"),
        Literal::Integer(i) => out.push_str(&i.to_string()),
        Literal::Float(f) if !f.is_finite() => {
            return Err(Error::conversion_failure(format!(
                "float literal {f} has no SQL representation"
            )));
        }
        Literal::Float(f) => out.push_str(&f.to_string()),
        Literal::String(s) => {
            out.push('\'');
            out.push_str(&s.replace('\'', "''"));
            out.push('\'');
        }
    }
    Ok(())
}

fn write_column(out: &mut String, column: &ColumnRef) {
    if let Some(table) = &column.table {
        write_identifier(out, table);
        out.push('.');
    }
    write_identifier(out, &column.name);
}

fn write_identifier(out: &mut String, ident: &str) {
    out.push('"');
    out.push_str(&ident.replace('"', "\"\""));
    out.push('"');
}
