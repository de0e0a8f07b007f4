use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::semantics::symbols::{BuiltinType, ScopeArena, ScopeId, Symbol},
};

/// Computes the static type of an expression, or `None` when it has none.
///
/// This is a pure function over the expression and an analyzed scope chain;
/// it performs no mutation and reports no errors, so the semantic analyzer
/// can call it freely and tests can probe it standalone. An expression with
/// no type is one that combines operands illegally (e.g. `1 + TRUE`,
/// `1.5 DIV 2`) or mentions an unresolvable name.
///
/// The rules:
/// - literals have their own type;
/// - a variable has its declared type;
/// - `+ - *` yield INTEGER on two INTEGERs, REAL when both operands are
///   numeric and at least one is REAL;
/// - `/` yields REAL for any numeric operands;
/// - `DIV` requires two INTEGERs and yields INTEGER;
/// - `AND OR XOR` require two BOOLEANs and yield BOOLEAN;
/// - relational operators require numeric operands and yield BOOLEAN;
/// - unary operators propagate the operand's type unchanged;
/// - a function call has the callee's declared return type.
#[must_use]
pub fn type_of(expr: &Expr, arena: &ScopeArena, scope: ScopeId) -> Option<BuiltinType> {
    match expr {
        Expr::IntegerLit { .. } => Some(BuiltinType::Integer),
        Expr::RealLit { .. } => Some(BuiltinType::Real),
        Expr::BooleanLit { .. } => Some(BuiltinType::Boolean),
        Expr::Var { name, .. } => match arena.lookup(scope, name, true) {
            Some(Symbol::Var { ty, .. }) => Some(*ty),
            _ => None,
        },
        Expr::BinOp { left, op, right, .. } => {
            let lhs = type_of(left, arena, scope);
            let rhs = type_of(right, arena, scope);
            binary_op_type(*op, lhs, rhs)
        },
        // Unary operators propagate the operand's type unchanged.
        Expr::UnaryOp { operand, .. } => type_of(operand, arena, scope),
        Expr::FunctionCall { name, .. } => match arena.lookup(scope, name, true) {
            Some(Symbol::Function { return_type, .. }) => Some(*return_type),
            _ => None,
        },
    }
}

/// Applies the binary-operator typing rules to two operand types.
fn binary_op_type(op: BinaryOperator,
                  lhs: Option<BuiltinType>,
                  rhs: Option<BuiltinType>)
                  -> Option<BuiltinType> {
    let lhs = lhs?;
    let rhs = rhs?;

    match op {
        BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul => {
            real_or_integer_type(lhs, rhs)
        },
        BinaryOperator::RealDiv => {
            real_or_integer_type(lhs, rhs).map(|_| BuiltinType::Real)
        },
        BinaryOperator::IntDiv => {
            match real_or_integer_type(lhs, rhs) {
                Some(BuiltinType::Integer) => Some(BuiltinType::Integer),
                _ => None,
            }
        },
        BinaryOperator::And | BinaryOperator::Or | BinaryOperator::Xor => {
            boolean_op_type(lhs, rhs)
        },
        BinaryOperator::Less
        | BinaryOperator::Greater
        | BinaryOperator::LessEqual
        | BinaryOperator::GreaterEqual
        | BinaryOperator::Equal
        | BinaryOperator::NotEqual => relational_op_type(lhs, rhs),
    }
}

/// INTEGER on two INTEGERs; REAL when both operands are numeric and at
/// least one is REAL; no type otherwise.
fn real_or_integer_type(lhs: BuiltinType, rhs: BuiltinType) -> Option<BuiltinType> {
    match (lhs, rhs) {
        (BuiltinType::Integer, BuiltinType::Integer) => Some(BuiltinType::Integer),
        (BuiltinType::Integer | BuiltinType::Real, BuiltinType::Integer | BuiltinType::Real) => {
            Some(BuiltinType::Real)
        },
        _ => None,
    }
}

/// BOOLEAN on two BOOLEANs; no type otherwise.
const fn boolean_op_type(lhs: BuiltinType, rhs: BuiltinType) -> Option<BuiltinType> {
    match (lhs, rhs) {
        (BuiltinType::Boolean, BuiltinType::Boolean) => Some(BuiltinType::Boolean),
        _ => None,
    }
}

/// BOOLEAN on two numeric operands; no type otherwise.
const fn relational_op_type(lhs: BuiltinType, rhs: BuiltinType) -> Option<BuiltinType> {
    match (lhs, rhs) {
        (BuiltinType::Integer | BuiltinType::Real, BuiltinType::Integer | BuiltinType::Real) => {
            Some(BuiltinType::Boolean)
        },
        _ => None,
    }
}
