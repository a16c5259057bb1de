//! Query node kinds: SELECT, joins and ORDER BY entries.

use serde::Serialize;

use super::{Node, NodeKind};
use crate::error::StructuralError;

/// Sort direction of an ORDER BY entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Direction {
    /// No direction written.
    #[default]
    Default,
    /// ASC.
    Asc,
    /// DESC.
    Desc,
}

impl Direction {
    /// Returns the SQL keyword, empty for [`Direction::Default`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null placement of an ORDER BY entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum NullsOrder {
    /// No placement written.
    #[default]
    Default,
    /// NULLS FIRST.
    First,
    /// NULLS LAST.
    Last,
}

impl NullsOrder {
    /// Returns the SQL keywords, empty for [`NullsOrder::Default`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "",
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBy {
    field: Box<Node>,
    direction: Direction,
    nulls: NullsOrder,
}

impl OrderBy {
    /// Creates an entry with default direction and null placement.
    #[must_use]
    pub fn new(field: Node) -> Self {
        Self {
            field: Box::new(field),
            direction: Direction::Default,
            nulls: NullsOrder::Default,
        }
    }

    /// Sets the direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the null placement.
    #[must_use]
    pub const fn with_nulls(mut self, nulls: NullsOrder) -> Self {
        self.nulls = nulls;
        self
    }

    /// The sort key.
    #[must_use]
    pub fn field(&self) -> &Node {
        &self.field
    }

    /// The direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// The null placement.
    #[must_use]
    pub const fn nulls(&self) -> NullsOrder {
        self.nulls
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = self.field.to_string();
        for suffix in [self.direction.as_str(), self.nulls.as_str()] {
            if !suffix.is_empty() {
                sql.push(' ');
                sql.push_str(suffix);
            }
        }
        sql
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoinType {
    /// Bare JOIN.
    Join,
    /// INNER JOIN.
    Inner,
    /// LEFT [OUTER] JOIN.
    Left,
    /// RIGHT [OUTER] JOIN.
    Right,
    /// FULL [OUTER] JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
    /// Comma-separated tables in FROM.
    Implicit,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Join => "JOIN",
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Implicit => ",",
        }
    }
}

/// Two table sources combined by a join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Join {
    left: Box<Node>,
    right: Box<Node>,
    join_type: JoinType,
    condition: Option<Box<Node>>,
}

impl Join {
    /// Creates a join without condition.
    #[must_use]
    pub fn new(join_type: JoinType, left: Node, right: Node) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
            join_type,
            condition: None,
        }
    }

    /// Sets the ON condition.
    #[must_use]
    pub fn with_condition(mut self, condition: Node) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    /// The left source.
    #[must_use]
    pub fn left(&self) -> &Node {
        &self.left
    }

    /// The right source.
    #[must_use]
    pub fn right(&self) -> &Node {
        &self.right
    }

    /// The join type.
    #[must_use]
    pub const fn join_type(&self) -> JoinType {
        self.join_type
    }

    /// The ON condition.
    #[must_use]
    pub fn condition(&self) -> Option<&Node> {
        self.condition.as_deref()
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = if self.join_type == JoinType::Implicit {
            format!("{}, {}", self.left, self.right)
        } else {
            format!("{} {} {}", self.left, self.join_type.as_str(), self.right)
        };
        if let Some(condition) = &self.condition {
            sql.push_str(" ON ");
            sql.push_str(&condition.to_string());
        }
        sql
    }
}

/// A SELECT query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Select {
    targets: Vec<Node>,
    from_table: Option<Box<Node>>,
    where_clause: Option<Box<Node>>,
    group_by: Vec<Node>,
    having: Option<Box<Node>>,
    order_by: Vec<Node>,
    limit: Option<Box<Node>>,
    offset: Option<Box<Node>>,
    distinct: bool,
}

impl Select {
    /// Creates a SELECT over `targets`; the other clauses are set with the
    /// `with_*` methods.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::EmptyTargets`] when `targets` is empty.
    pub fn new(targets: Vec<Node>) -> Result<Self, StructuralError> {
        if targets.is_empty() {
            return Err(StructuralError::EmptyTargets);
        }
        Ok(Self {
            targets,
            from_table: None,
            where_clause: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
            distinct: false,
        })
    }

    /// Sets the FROM source.
    #[must_use]
    pub fn with_from(mut self, from_table: Node) -> Self {
        self.from_table = Some(Box::new(from_table));
        self
    }

    /// Sets the WHERE condition.
    #[must_use]
    pub fn with_where(mut self, condition: Node) -> Self {
        self.where_clause = Some(Box::new(condition));
        self
    }

    /// Sets the GROUP BY list.
    #[must_use]
    pub fn with_group_by(mut self, group_by: Vec<Node>) -> Self {
        self.group_by = group_by;
        self
    }

    /// Sets the HAVING condition.
    #[must_use]
    pub fn with_having(mut self, condition: Node) -> Self {
        self.having = Some(Box::new(condition));
        self
    }

    /// Sets the ORDER BY list.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::NotAnOrderBy`] if an entry is not an
    /// [`OrderBy`] node.
    pub fn with_order_by(mut self, order_by: Vec<Node>) -> Result<Self, StructuralError> {
        if let Some(bad) = order_by
            .iter()
            .find(|n| !matches!(n.kind(), NodeKind::OrderBy(_)))
        {
            return Err(StructuralError::NotAnOrderBy(bad.kind_name()));
        }
        self.order_by = order_by;
        Ok(self)
    }

    /// Sets the LIMIT.
    #[must_use]
    pub fn with_limit(mut self, limit: Node) -> Self {
        self.limit = Some(Box::new(limit));
        self
    }

    /// Sets the OFFSET.
    #[must_use]
    pub fn with_offset(mut self, offset: Node) -> Self {
        self.offset = Some(Box::new(offset));
        self
    }

    /// Sets DISTINCT.
    #[must_use]
    pub const fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// The select list.
    #[must_use]
    pub fn targets(&self) -> &[Node] {
        &self.targets
    }

    /// The FROM source.
    #[must_use]
    pub fn from_table(&self) -> Option<&Node> {
        self.from_table.as_deref()
    }

    /// The WHERE condition.
    #[must_use]
    pub fn where_clause(&self) -> Option<&Node> {
        self.where_clause.as_deref()
    }

    /// The GROUP BY list.
    #[must_use]
    pub fn group_by(&self) -> &[Node] {
        &self.group_by
    }

    /// The HAVING condition.
    #[must_use]
    pub fn having(&self) -> Option<&Node> {
        self.having.as_deref()
    }

    /// The ORDER BY entries.
    #[must_use]
    pub fn order_by(&self) -> &[Node] {
        &self.order_by
    }

    /// The LIMIT.
    #[must_use]
    pub fn limit(&self) -> Option<&Node> {
        self.limit.as_deref()
    }

    /// The OFFSET.
    #[must_use]
    pub fn offset(&self) -> Option<&Node> {
        self.offset.as_deref()
    }

    /// Whether DISTINCT was specified.
    #[must_use]
    pub const fn distinct(&self) -> bool {
        self.distinct
    }

    /// Returns the SQL representation.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let list = |nodes: &[Node]| {
            nodes
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&list(&self.targets));

        let clauses = [
            ("FROM", self.from_table.as_ref().map(ToString::to_string)),
            ("WHERE", self.where_clause.as_ref().map(ToString::to_string)),
            ("GROUP BY", (!self.group_by.is_empty()).then(|| list(&self.group_by))),
            ("HAVING", self.having.as_ref().map(ToString::to_string)),
            ("ORDER BY", (!self.order_by.is_empty()).then(|| list(&self.order_by))),
            ("LIMIT", self.limit.as_ref().map(ToString::to_string)),
            ("OFFSET", self.offset.as_ref().map(ToString::to_string)),
        ];
        for (keyword, body) in clauses {
            if let Some(body) = body {
                sql.push(' ');
                sql.push_str(keyword);
                sql.push(' ');
                sql.push_str(&body);
            }
        }
        sql
    }
}
