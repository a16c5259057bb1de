//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. A dialect
//! describes its differences as additions to the base grammar: extra token
//! rules and extra productions. It never removes or rewrites base rules.

mod generic;
mod mysql;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub use generic::GenericDialect;
pub use mysql::MySqlDialect;

use crate::error::UnknownDialect;
use crate::grammar::{Grammar, GrammarBuilder};

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Adds the dialect's tokens and productions to the base grammar.
    fn extend(&self, builder: GrammarBuilder) -> GrammarBuilder;

    /// Builds the dialect's grammar.
    fn grammar(&self) -> Grammar {
        let grammar = self.extend(Grammar::builder(self.name())).build();
        tracing::trace!(
            dialect = self.name(),
            tokens = grammar.tokens().len(),
            productions = grammar.productions().len(),
            "assembled grammar"
        );
        grammar
    }
}

static GENERIC: LazyLock<Grammar> = LazyLock::new(|| GenericDialect::new().grammar());
static MYSQL: LazyLock<Grammar> = LazyLock::new(|| MySqlDialect::new().grammar());

/// The registered dialect names accepted by [`crate::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialectKind {
    /// The base grammar.
    #[default]
    Generic,
    /// Base grammar plus MySQL variables.
    Mysql,
}

impl DialectKind {
    /// All registered dialects.
    pub const ALL: [Self; 2] = [Self::Generic, Self::Mysql];

    /// The registered name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Mysql => "mysql",
        }
    }

    /// The dialect's grammar, built on first use and shared afterwards.
    #[must_use]
    pub fn grammar(self) -> &'static Grammar {
        match self {
            Self::Generic => &GENERIC,
            Self::Mysql => &MYSQL,
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DialectKind {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDialect(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_kind_from_str() {
        assert_eq!("generic".parse(), Ok(DialectKind::Generic));
        assert_eq!("MySQL".parse(), Ok(DialectKind::Mysql));
        assert_eq!(
            "oracle".parse::<DialectKind>(),
            Err(UnknownDialect(String::from("oracle")))
        );
    }

    #[test]
    fn test_display_round_trips() {
        for kind in DialectKind::ALL {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
    }

    #[test]
    fn test_grammars_are_independent() {
        let generic = DialectKind::Generic.grammar();
        let mysql = DialectKind::Mysql.grammar();
        assert_eq!(generic.name(), "generic");
        assert_eq!(mysql.name(), "mysql");
        assert!(mysql.productions().len() > generic.productions().len());
        assert!(generic.tokens().get("USER_VARIABLE").is_none());
        assert_eq!(generic.productions().len(), Grammar::base().productions().len());
    }
}
