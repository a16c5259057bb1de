//! Generic SQL dialect.

use super::Dialect;
use crate::grammar::GrammarBuilder;

/// The base grammar without extensions.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn extend(&self, builder: GrammarBuilder) -> GrammarBuilder {
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        let grammar = dialect.grammar();
        let base = Grammar::base();
        assert_eq!(grammar.tokens().len(), base.tokens().len());
        assert_eq!(grammar.productions().len(), base.productions().len());
    }
}
