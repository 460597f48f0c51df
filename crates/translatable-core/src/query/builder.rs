use crate::{
    error::{Error, RuntimeError},
    listener::TranslatableListener,
    locale::Locale,
    mapping::MappingRegistry,
    model::TranslatableClassModel,
    value::{FieldValue, Value},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, rc::Rc};

///
/// JoinKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum JoinKind {
    Left,
    Inner,
}

///
/// TranslationJoin
///
/// One join of a translation association, restricted to a single locale
/// bound as a named parameter. Keyed by alias: joining the same alias twice
/// is a no-op.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TranslationJoin {
    pub association: String,
    pub alias: String,
    pub kind: JoinKind,
    pub locale_property: String,
    pub locale_param: String,
}

///
/// Cmp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Cmp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    IsNone,
    IsSome,
}

///
/// PredicateTarget
///
/// Where a field reference lands after rewriting: the base alias for plain
/// columns, or a coalesce over translation aliases (current first, default
/// second) for translatable properties.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PredicateTarget {
    Base { field: String },
    Translated { aliases: Vec<String>, field: String },
}

///
/// QueryPredicate
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct QueryPredicate {
    pub target: PredicateTarget,
    pub cmp: Cmp,
    pub param: String,
}

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

///
/// OrderTerm
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderTerm {
    pub target: PredicateTarget,
    pub direction: OrderDirection,
}

///
/// TranslatableQueryBuilder
///
/// Accumulates an explicit intermediate representation (joins, predicates,
/// order terms, named parameters) and renders it in one deterministic pass.
/// Translatable field references are rewritten onto translation aliases;
/// everything else passes through on the base alias.
///

pub struct TranslatableQueryBuilder<'a> {
    pub(crate) registry: &'a MappingRegistry,
    pub(crate) listener: &'a TranslatableListener,
    pub(crate) class: String,
    pub(crate) alias: String,
    pub(crate) meta: Rc<TranslatableClassModel>,
    pub(crate) joins: Vec<TranslationJoin>,
    pub(crate) predicates: Vec<QueryPredicate>,
    pub(crate) orders: Vec<OrderTerm>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) params: BTreeMap<String, Value>,
}

impl<'a> TranslatableQueryBuilder<'a> {
    pub fn new(
        registry: &'a MappingRegistry,
        listener: &'a TranslatableListener,
        class: &str,
        alias: &str,
    ) -> Result<Self, Error> {
        let meta = listener.extended_metadata(registry, class)?;

        Ok(Self {
            registry,
            listener,
            class: class.to_string(),
            alias: alias.to_string(),
            meta,
            joins: Vec::new(),
            predicates: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
            params: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn joins(&self) -> &[TranslationJoin] {
        &self.joins
    }

    #[must_use]
    pub fn predicates(&self) -> &[QueryPredicate] {
        &self.predicates
    }

    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, Value> {
        &self.params
    }

    ///
    /// Joins
    ///

    /// Join and select the translation association restricted to the
    /// current locale, bound under `locale_param`.
    pub fn join_and_select_current_translations(
        &mut self,
        association: &str,
        kind: JoinKind,
        alias: &str,
        locale_param: &str,
    ) -> Result<(), Error> {
        let locale = self.listener.locale().cloned();
        self.join_translations(association, kind, alias, locale_param, locale)
    }

    /// Join and select the translation association restricted to the
    /// default locale; the fallback source during hydration.
    pub fn join_and_select_default_translations(
        &mut self,
        association: &str,
        kind: JoinKind,
        alias: &str,
        locale_param: &str,
    ) -> Result<(), Error> {
        let locale = self.listener.default_locale().cloned();
        self.join_translations(association, kind, alias, locale_param, locale)
    }

    fn join_translations(
        &mut self,
        association: &str,
        kind: JoinKind,
        alias: &str,
        locale_param: &str,
        locale: Option<Locale>,
    ) -> Result<(), Error> {
        if !self.meta.translatable_properties.contains_key(association) {
            return Err(RuntimeError::UnknownTranslationAssociation {
                class: self.class.clone(),
                association: association.to_string(),
            }
            .into());
        }

        if self.has_join(alias) {
            return Ok(());
        }

        let translation_meta =
            self.listener
                .extractor()
                .translation_metadata(self.registry, &self.class, association)?;

        self.params.insert(
            locale_param.to_string(),
            locale.map_or(Value::Unit, |locale| Value::Text(locale.to_string())),
        );
        self.joins.push(TranslationJoin {
            association: association.to_string(),
            alias: alias.to_string(),
            kind,
            locale_property: translation_meta.locale_property.clone(),
            locale_param: locale_param.to_string(),
        });

        Ok(())
    }

    fn has_join(&self, alias: &str) -> bool {
        self.joins.iter().any(|join| join.alias == alias)
    }

    ///
    /// Conditions
    ///

    /// Add an equality/membership condition. Translatable fields are
    /// rewritten to the translation aliases for `locale` (or the current
    /// locale), joining on demand; other fields stay on the base alias.
    pub fn add_translatable_where(
        &mut self,
        field: &str,
        value: impl FieldValue,
        locale: Option<&Locale>,
    ) -> Result<(), Error> {
        let value = value.to_value();
        let cmp = match &value {
            Value::List(_) => Cmp::In,
            Value::Unit => Cmp::IsNone,
            _ => Cmp::Eq,
        };

        let target = self.resolve_target(field, locale)?;
        let param = format!("param_{}", self.predicates.len());
        self.params.insert(param.clone(), value);
        self.predicates.push(QueryPredicate { target, cmp, param });

        Ok(())
    }

    /// Symmetric rewrite for ORDER BY.
    pub fn add_translatable_order_by(
        &mut self,
        field: &str,
        direction: OrderDirection,
        locale: Option<&Locale>,
    ) -> Result<(), Error> {
        let target = self.resolve_target(field, locale)?;
        self.orders.push(OrderTerm { target, direction });

        Ok(())
    }

    pub fn set_max_results(&mut self, limit: Option<u64>) {
        self.limit = limit;
    }

    pub fn set_first_result(&mut self, offset: Option<u64>) {
        self.offset = offset;
    }

    fn resolve_target(
        &mut self,
        field: &str,
        locale: Option<&Locale>,
    ) -> Result<PredicateTarget, Error> {
        match self.meta.translatable_field(field) {
            Some((association, target_field)) => {
                let aliases = self.ensure_translation_joins(&association, locale)?;
                Ok(PredicateTarget::Translated {
                    aliases,
                    field: target_field,
                })
            }
            None => Ok(PredicateTarget::Base {
                field: field.to_string(),
            }),
        }
    }

    /// Join current (or explicitly given) and default translations for the
    /// association on demand, returning the aliases in coalesce order.
    fn ensure_translation_joins(
        &mut self,
        association: &str,
        locale: Option<&Locale>,
    ) -> Result<Vec<String>, Error> {
        let index = self
            .meta
            .translatable_properties
            .keys()
            .position(|name| name == association)
            .unwrap_or(0);

        let effective = locale.cloned().or_else(|| self.listener.locale().cloned());
        let current_alias = locale.map_or_else(
            || format!("t{index}"),
            |locale| format!("t{index}_{locale}"),
        );
        let current_param = format!("{current_alias}_locale");
        self.join_translations(
            association,
            JoinKind::Left,
            &current_alias,
            &current_param,
            effective.clone(),
        )?;

        let mut aliases = vec![current_alias];

        if let Some(default) = self.listener.default_locale().cloned() {
            if Some(&default) != effective.as_ref() {
                let default_alias = format!("dt{index}");
                let default_param = format!("{default_alias}_locale");
                self.join_translations(
                    association,
                    JoinKind::Left,
                    &default_alias,
                    &default_param,
                    Some(default),
                )?;
                aliases.push(default_alias);
            }
        }

        Ok(aliases)
    }
}
