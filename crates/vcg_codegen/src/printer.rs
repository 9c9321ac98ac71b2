//! Renders the statement IR as VHDL text.
//!
//! Operands that are not single tokens are parenthesised, so the output
//! never depends on VHDL operator precedence:
//!
//! ```text
//! g__out0 <= (g__in0(1) and g__in1(1)) & (g__in0(0) and g__in1(0));
//! m__out0 <= m__in0 when (m__SELECT = '0') else
//! m__in1 when (m__SELECT = '1') else
//! 'Z';
//! ```

use vcg_common::binary_literal;
use vcg_ir::{ConcurrentStmt, Expr, SignalDecl};

/// Returns the VHDL type of a signal `width` bits wide.
pub fn type_mark(width: u32) -> String {
    if width <= 1 {
        "std_logic".to_string()
    } else {
        format!("std_logic_vector({} downto 0)", width - 1)
    }
}

/// Renders `signal <name>: <type>;`.
pub fn signal_decl(decl: &SignalDecl) -> String {
    format!("signal {}: {};", decl.name, type_mark(decl.width))
}

/// Renders an expression.
pub fn expr(e: &Expr) -> String {
    match e {
        Expr::Signal(name) => name.clone(),
        Expr::Bit { signal, index } => format!("{signal}({index})"),
        Expr::Fill { symbol, width } => symbol.literal(*width),
        Expr::Binary { value, width } => binary_literal(*value, *width),
        Expr::Logic { op, operands } => operands
            .iter()
            .map(operand)
            .collect::<Vec<_>>()
            .join(&format!(" {} ", op.keyword())),
        Expr::Not(inner) => format!("not {}", operand(inner)),
        Expr::Concat(parts) => parts.iter().map(operand).collect::<Vec<_>>().join(" & "),
        Expr::Eq(lhs, rhs) => format!("{} = {}", operand(lhs), operand(rhs)),
    }
}

/// Renders `e`, parenthesised unless it is a single token.
fn operand(e: &Expr) -> String {
    if e.is_atom() {
        expr(e)
    } else {
        format!("({})", expr(e))
    }
}

/// Renders a concurrent statement, terminated by `;`.
///
/// Each arm of a conditional assignment ends its line with `else`; the
/// fallback value sits on the last line.
pub fn stmt(s: &ConcurrentStmt) -> String {
    match s {
        ConcurrentStmt::Assign { target, value } => format!("{target} <= {};", expr(value)),
        ConcurrentStmt::Conditional {
            target,
            branches,
            otherwise,
        } => {
            let mut text = format!("{target} <= ");
            for branch in branches {
                text.push_str(&format!(
                    "{} when ({}) else\n",
                    expr(&branch.value),
                    expr(&branch.condition)
                ));
            }
            text.push_str(&expr(otherwise));
            text.push(';');
            text
        }
    }
}
