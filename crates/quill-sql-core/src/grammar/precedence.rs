//! Operator precedence table.
//!
//! Levels are listed lowest first. Binding powers are derived from the
//! level index the way a Pratt parser expects them:
//! - Higher binding power = binds tighter
//! - Left associative: left_bp < right_bp
//! - Right associative: left_bp > right_bp

/// Associativity of a precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    /// `a op b op c` groups as `(a op b) op c`.
    Left,
    /// `a op b op c` groups as `a op (b op c)`.
    Right,
}

/// An operator family the parser recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    /// OR
    Or,
    /// AND
    And,
    /// `=`, `!=`, `<>`, `<`, `<=`, `>`, `>=`
    Comparison,
    /// IS [NOT]
    Is,
    /// [NOT] IN
    In,
    /// [NOT] LIKE
    Like,
    /// [NOT] BETWEEN
    Between,
    /// `+`, `-`, `||`
    Additive,
    /// `*`, `/`, `%`
    Multiplicative,
    /// Prefix `-`
    Negate,
    /// Prefix NOT
    Not,
}

/// One row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    /// Name used in debug output.
    pub name: &'static str,
    /// Associativity shared by every operator of the level.
    pub assoc: Assoc,
    /// Operators of the level.
    pub ops: &'static [OpClass],
}

/// Ordered precedence levels, lowest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceTable {
    levels: Vec<Level>,
}

impl PrecedenceTable {
    /// The table shared by every dialect.
    #[must_use]
    pub fn base() -> Self {
        Self {
            levels: vec![
                Level {
                    name: "or",
                    assoc: Assoc::Left,
                    ops: &[OpClass::Or],
                },
                Level {
                    name: "and",
                    assoc: Assoc::Left,
                    ops: &[OpClass::And],
                },
                Level {
                    name: "comparison",
                    assoc: Assoc::Left,
                    ops: &[
                        OpClass::Comparison,
                        OpClass::Is,
                        OpClass::In,
                        OpClass::Like,
                        OpClass::Between,
                    ],
                },
                Level {
                    name: "additive",
                    assoc: Assoc::Left,
                    ops: &[OpClass::Additive],
                },
                Level {
                    name: "multiplicative",
                    assoc: Assoc::Left,
                    ops: &[OpClass::Multiplicative],
                },
                Level {
                    name: "unary",
                    assoc: Assoc::Right,
                    ops: &[OpClass::Negate, OpClass::Not],
                },
            ],
        }
    }

    /// The levels, lowest first.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    fn level_of(&self, class: OpClass) -> Option<(u8, Assoc)> {
        let index = self
            .levels
            .iter()
            .position(|level| level.ops.contains(&class))?;
        Some((u8::try_from(index).ok()?, self.levels[index].assoc))
    }

    /// Returns `(left_bp, right_bp)` for an infix operator, or `None` if the
    /// class has no level.
    #[must_use]
    pub fn infix_binding_power(&self, class: OpClass) -> Option<(u8, u8)> {
        let (index, assoc) = self.level_of(class)?;
        let low = index.checked_mul(2)?.checked_add(1)?;
        let high = low.checked_add(1)?;
        Some(match assoc {
            Assoc::Left => (low, high),
            Assoc::Right => (high, low),
        })
    }

    /// Returns the binding power used for the operand of a prefix operator.
    #[must_use]
    pub fn prefix_binding_power(&self, class: OpClass) -> Option<u8> {
        self.infix_binding_power(class).map(|(_, right)| right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        let table = PrecedenceTable::base();
        let bp = |class| table.infix_binding_power(class).unwrap();

        // Multiplication should bind tighter than addition
        assert!(bp(OpClass::Multiplicative).0 > bp(OpClass::Additive).0);
        // AND should bind tighter than OR
        assert!(bp(OpClass::And).0 > bp(OpClass::Or).0);
        // Comparison should bind tighter than logical operators
        assert!(bp(OpClass::Comparison).0 > bp(OpClass::And).0);
        assert_eq!(bp(OpClass::Between), bp(OpClass::Comparison));
        assert_eq!(bp(OpClass::Is), bp(OpClass::In));
    }

    #[test]
    fn test_left_associativity() {
        let table = PrecedenceTable::base();
        let (left, right) = table.infix_binding_power(OpClass::And).unwrap();
        assert!(left < right);
    }

    #[test]
    fn test_unary_binds_tightest() {
        let table = PrecedenceTable::base();
        let neg = table.prefix_binding_power(OpClass::Negate).unwrap();
        let (mul, _) = table.infix_binding_power(OpClass::Multiplicative).unwrap();
        assert!(neg > mul);
        assert_eq!(table.levels().last().map(|l| l.name), Some("unary"));
    }
}
