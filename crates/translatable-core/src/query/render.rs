use crate::query::builder::{
    Cmp, JoinKind, OrderDirection, PredicateTarget, QueryPredicate, TranslatableQueryBuilder,
};

impl TranslatableQueryBuilder<'_> {
    /// Render the accumulated statement in one deterministic pass: select
    /// list, joins in insertion order, predicates joined with AND, order
    /// terms, then limit and offset.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        let mut selected = vec![self.alias.clone()];
        selected.extend(self.joins.iter().map(|join| join.alias.clone()));
        out.push_str(&format!("SELECT {}", selected.join(", ")));
        out.push_str(&format!(" FROM {} {}", self.class, self.alias));

        for join in &self.joins {
            let kind = match join.kind {
                JoinKind::Left => "LEFT JOIN",
                JoinKind::Inner => "INNER JOIN",
            };
            out.push_str(&format!(
                " {kind} {}.{} {} WITH {}.{} = :{}",
                self.alias,
                join.association,
                join.alias,
                join.alias,
                join.locale_property,
                join.locale_param
            ));
        }

        if !self.predicates.is_empty() {
            let clauses = self
                .predicates
                .iter()
                .map(|predicate| self.render_predicate(predicate))
                .collect::<Vec<_>>();
            out.push_str(&format!(" WHERE {}", clauses.join(" AND ")));
        }

        if !self.orders.is_empty() {
            let terms = self
                .orders
                .iter()
                .map(|term| {
                    let direction = match term.direction {
                        OrderDirection::Asc => "ASC",
                        OrderDirection::Desc => "DESC",
                    };
                    format!("{} {direction}", self.render_target(&term.target))
                })
                .collect::<Vec<_>>();
            out.push_str(&format!(" ORDER BY {}", terms.join(", ")));
        }

        if let Some(limit) = self.limit {
            out.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            out.push_str(&format!(" OFFSET {offset}"));
        }

        out
    }

    fn render_target(&self, target: &PredicateTarget) -> String {
        match target {
            PredicateTarget::Base { field } => format!("{}.{field}", self.alias),
            PredicateTarget::Translated { aliases, field } => {
                if let [alias] = aliases.as_slice() {
                    format!("{alias}.{field}")
                } else {
                    let refs = aliases
                        .iter()
                        .map(|alias| format!("{alias}.{field}"))
                        .collect::<Vec<_>>();
                    format!("COALESCE({})", refs.join(", "))
                }
            }
        }
    }

    fn render_predicate(&self, predicate: &QueryPredicate) -> String {
        let lhs = self.render_target(&predicate.target);
        match predicate.cmp {
            Cmp::Eq => format!("{lhs} = :{}", predicate.param),
            Cmp::Ne => format!("{lhs} <> :{}", predicate.param),
            Cmp::Lt => format!("{lhs} < :{}", predicate.param),
            Cmp::Lte => format!("{lhs} <= :{}", predicate.param),
            Cmp::Gt => format!("{lhs} > :{}", predicate.param),
            Cmp::Gte => format!("{lhs} >= :{}", predicate.param),
            Cmp::In => format!("{lhs} IN (:{})", predicate.param),
            Cmp::IsNone => format!("{lhs} IS NULL"),
            Cmp::IsSome => format!("{lhs} IS NOT NULL"),
        }
    }
}
