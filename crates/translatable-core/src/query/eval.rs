use crate::{
    query::builder::{Cmp, OrderDirection, PredicateTarget, TranslatableQueryBuilder},
    traits::{FieldAccess, Translatable},
    value::Value,
};
use std::cmp::Ordering;

///
/// In-memory evaluation of the accumulated statement against a loaded
/// entity set. Mirrors the rendered form: coalesce takes the first alias
/// whose translation carries a set value, ordering falls back to equal for
/// incomparable values.
///

impl TranslatableQueryBuilder<'_> {
    pub(crate) fn evaluate<E: Translatable>(&self, entities: Vec<E>) -> Vec<E> {
        let mut results = entities
            .into_iter()
            .filter(|entity| self.matches_entity(entity))
            .collect::<Vec<_>>();

        if !self.orders.is_empty() {
            results.sort_by(|a, b| self.compare_entities(a, b));
        }

        let offset = self.offset.and_then(|n| usize::try_from(n).ok()).unwrap_or(0);
        let limit = self
            .limit
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(usize::MAX);

        results.into_iter().skip(offset).take(limit).collect()
    }

    fn matches_entity<E: Translatable>(&self, entity: &E) -> bool {
        self.predicates.iter().all(|predicate| {
            let left = self.target_value(entity, &predicate.target);
            let right = self
                .params
                .get(&predicate.param)
                .cloned()
                .unwrap_or(Value::Unit);

            match predicate.cmp {
                Cmp::Eq => left.matches(&right),
                Cmp::Ne => !left.matches(&right),
                Cmp::Lt => left.compare(&right) == Some(Ordering::Less),
                Cmp::Lte => {
                    matches!(left.compare(&right), Some(Ordering::Less | Ordering::Equal))
                }
                Cmp::Gt => left.compare(&right) == Some(Ordering::Greater),
                Cmp::Gte => {
                    matches!(
                        left.compare(&right),
                        Some(Ordering::Greater | Ordering::Equal)
                    )
                }
                Cmp::In => match &right {
                    Value::List(items) => items.iter().any(|item| left.matches(item)),
                    _ => false,
                },
                Cmp::IsNone => left.is_unit(),
                Cmp::IsSome => !left.is_unit(),
            }
        })
    }

    fn target_value<E: Translatable>(&self, entity: &E, target: &PredicateTarget) -> Value {
        match target {
            PredicateTarget::Base { field } => entity.get_field(field).unwrap_or(Value::Unit),
            PredicateTarget::Translated { aliases, field } => {
                for alias in aliases {
                    let Some(join) = self.joins.iter().find(|join| &join.alias == alias) else {
                        continue;
                    };
                    let Some(locale) = self
                        .params
                        .get(&join.locale_param)
                        .and_then(Value::as_locale)
                    else {
                        continue;
                    };
                    let Some(collection) = entity.translations(&join.association) else {
                        continue;
                    };
                    if let Some(translation) = collection.find(&join.locale_property, &locale) {
                        let value = translation.get_field(field).unwrap_or(Value::Unit);
                        if !value.is_unit() {
                            return value;
                        }
                    }
                }
                Value::Unit
            }
        }
    }

    fn compare_entities<E: Translatable>(&self, a: &E, b: &E) -> Ordering {
        for term in &self.orders {
            let left = self.target_value(a, &term.target);
            let right = self.target_value(b, &term.target);
            let ordering = left.compare(&right).unwrap_or(Ordering::Equal);
            let ordering = match term.direction {
                OrderDirection::Asc => ordering,
                OrderDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use crate::listener::TranslatableListener;
    use crate::query::builder::{OrderDirection, TranslatableQueryBuilder};
    use crate::test_fixtures::{Article, article, locale, registry, translation};
    use crate::traits::Path;

    fn listener(current: Option<&str>, default: Option<&str>) -> TranslatableListener {
        let mut listener = TranslatableListener::new();
        listener.set_locale(current.map(locale));
        listener.set_default_locale(default.map(locale));
        listener
    }

    fn dataset() -> Vec<Article> {
        let mut first = article(1);
        first
            .translations
            .push(translation(1, "en", "Alpha", "First contents"));
        first
            .translations
            .push(translation(1, "pl", "Zeta", "Pierwsza treść"));

        let mut second = article(2);
        second
            .translations
            .push(translation(2, "pl", "Beta", "Druga treść"));

        let mut third = article(3);
        third
            .translations
            .push(translation(3, "en", "Gamma", "Third contents"));

        vec![first, second, third]
    }

    #[test]
    fn filters_on_current_locale_translation() {
        let registry = registry();
        let listener = listener(Some("en"), None);
        let mut qb =
            TranslatableQueryBuilder::new(&registry, &listener, Article::PATH, "e").unwrap();
        qb.add_translatable_where("title", "Alpha", None).unwrap();

        let results = qb.evaluate(dataset());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn coalesce_falls_back_to_default_locale() {
        let registry = registry();
        let listener = listener(Some("en"), Some("pl"));
        let mut qb =
            TranslatableQueryBuilder::new(&registry, &listener, Article::PATH, "e").unwrap();
        // article 2 has no "en" translation, only the default "pl" one
        qb.add_translatable_where("title", "Beta", None).unwrap();

        let results = qb.evaluate(dataset());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);
    }

    #[test]
    fn orders_by_coalesced_translation_field() {
        let registry = registry();
        let listener = listener(Some("en"), Some("pl"));
        let mut qb =
            TranslatableQueryBuilder::new(&registry, &listener, Article::PATH, "e").unwrap();
        qb.add_translatable_order_by("title", OrderDirection::Asc, None)
            .unwrap();

        let ids = qb
            .evaluate(dataset())
            .into_iter()
            .map(|article| article.id)
            .collect::<Vec<_>>();
        // Alpha (en), Beta (pl fallback), Gamma (en)
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn descending_order_with_limit_and_offset() {
        let registry = registry();
        let listener = listener(Some("en"), Some("pl"));
        let mut qb =
            TranslatableQueryBuilder::new(&registry, &listener, Article::PATH, "e").unwrap();
        qb.add_translatable_order_by("title", OrderDirection::Desc, None)
            .unwrap();
        qb.set_first_result(Some(1));
        qb.set_max_results(Some(1));

        let ids = qb
            .evaluate(dataset())
            .into_iter()
            .map(|article| article.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn explicit_locale_ignores_current() {
        let registry = registry();
        let listener = listener(Some("en"), None);
        let mut qb =
            TranslatableQueryBuilder::new(&registry, &listener, Article::PATH, "e").unwrap();

        let polish = locale("pl");
        qb.add_translatable_where("title", "Zeta", Some(&polish))
            .unwrap();

        let results = qb.evaluate(dataset());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
    }

    #[test]
    fn unset_condition_matches_missing_translations() {
        let registry = registry();
        let listener = listener(Some("en"), None);
        let mut qb =
            TranslatableQueryBuilder::new(&registry, &listener, Article::PATH, "e").unwrap();
        qb.add_translatable_where("title", None::<String>, None)
            .unwrap();

        let ids = qb
            .evaluate(dataset())
            .into_iter()
            .map(|article| article.id)
            .collect::<Vec<_>>();
        // article 2 has no "en" translation and no default fallback here
        assert_eq!(ids, vec![2]);
    }
}
