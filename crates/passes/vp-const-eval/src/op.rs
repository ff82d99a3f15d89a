//! Binary operators and their precedence table

/// A binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`, truncating toward zero
    Div,
    /// `%`, sign follows the dividend
    Rem,
}

impl BinaryOp {
    /// Maps an operator character to its operator
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '+' => Self::Add,
            '-' => Self::Sub,
            '*' => Self::Mul,
            '/' => Self::Div,
            '%' => Self::Rem,
            _ => return None,
        })
    }

    /// Binding strength; every operator is left-associative
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div | Self::Rem => 2,
            Self::Add | Self::Sub => 1,
        }
    }

    /// Returns true for operators that fail on a zero right-hand side
    #[must_use]
    pub fn is_division(self) -> bool {
        matches!(self, Self::Div | Self::Rem)
    }

    /// Applies the operator, returning `None` on overflow or division by zero
    #[must_use]
    pub fn checked_apply(self, lhs: i64, rhs: i64) -> Option<i64> {
        match self {
            Self::Add => lhs.checked_add(rhs),
            Self::Sub => lhs.checked_sub(rhs),
            Self::Mul => lhs.checked_mul(rhs),
            Self::Div => lhs.checked_div(rhs),
            Self::Rem => lhs.checked_rem(rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_table() {
        for op in ['*', '/', '%'] {
            assert_eq!(BinaryOp::from_char(op).map(BinaryOp::precedence), Some(2));
        }
        for op in ['+', '-'] {
            assert_eq!(BinaryOp::from_char(op).map(BinaryOp::precedence), Some(1));
        }
        assert_eq!(BinaryOp::from_char('^'), None);
    }

    #[test]
    fn test_native_integer_semantics() {
        assert_eq!(BinaryOp::Div.checked_apply(-7, 2), Some(-3));
        assert_eq!(BinaryOp::Rem.checked_apply(-7, 2), Some(-1));
        assert_eq!(BinaryOp::Div.checked_apply(1, 0), None);
        assert_eq!(BinaryOp::Add.checked_apply(i64::MAX, 1), None);
    }
}
