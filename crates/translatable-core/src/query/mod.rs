mod builder;
mod eval;
mod render;

pub use builder::{
    Cmp, JoinKind, OrderDirection, OrderTerm, PredicateTarget, QueryPredicate,
    TranslatableQueryBuilder, TranslationJoin,
};
