//! Variant resolution.
//!
//! Maps a [`SelectionCriterion`] to the first matching [`Variant`] of a
//! [`Product`]. Lookups are linear scans over the product's variants; products
//! carry a handful of variants, so no index is kept.

use storefront_core::{DomainError, DomainResult, Entity};

use crate::config::{ResolverConfig, TupleMatching};
use crate::criterion::{OptionTuple, SelectionCriterion};
use crate::error::VariantResult;
use crate::option_array;
use crate::product::{Product, Variant, VariantId};

/// Outcome of a resolution. `NoMatch` is a normal answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'p> {
    Matched(&'p Variant),
    NoMatch,
}

impl<'p> Resolution<'p> {
    pub fn variant(&self) -> Option<&'p Variant> {
        match self {
            Resolution::Matched(v) => Some(v),
            Resolution::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }

    /// For callers that treat absence as a domain failure.
    pub fn ok_or_not_found(self) -> DomainResult<&'p Variant> {
        self.variant().ok_or_else(DomainError::not_found)
    }
}

impl<'p> From<Option<&'p Variant>> for Resolution<'p> {
    fn from(variant: Option<&'p Variant>) -> Self {
        match variant {
            Some(v) => Resolution::Matched(v),
            None => Resolution::NoMatch,
        }
    }
}

/// Stateless resolver; one instance can serve any number of products and threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantResolver {
    config: ResolverConfig,
}

impl VariantResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `criterion` against `product`.
    ///
    /// Fails only when named selections cannot be normalized (see
    /// [`option_array::build`]).
    pub fn resolve<'p>(
        &self,
        product: &'p Product,
        criterion: &SelectionCriterion,
    ) -> VariantResult<Resolution<'p>> {
        tracing::debug!(kind = criterion.kind(), "resolving variant");

        let resolution = match criterion {
            SelectionCriterion::ById(id) | SelectionCriterion::ByIdObject { id } => {
                self.find_by_id(product, id)
            }
            SelectionCriterion::ByNamedOptions(selections) => {
                let tuple = option_array::build(product, selections)?;
                self.find_by_options(product, &tuple)
            }
            SelectionCriterion::ByPositionalOptions(tuple) => self.find_by_options(product, tuple),
        };

        match resolution {
            Resolution::Matched(v) => tracing::debug!(variant_id = %v.id(), "variant matched"),
            Resolution::NoMatch => tracing::debug!("no variant matched"),
        }
        Ok(resolution)
    }

    /// First variant whose id equals `id` (numeric and numeric-string ids are equal).
    pub fn find_by_id<'p>(&self, product: &'p Product, id: &VariantId) -> Resolution<'p> {
        product.variant_by_id(id).into()
    }

    /// First variant whose option values match `tuple` under the configured policy.
    pub fn find_by_options<'p>(&self, product: &'p Product, tuple: &OptionTuple) -> Resolution<'p> {
        product
            .variants()
            .iter()
            .find(|v| self.tuple_matches(tuple, v.options()))
            .into()
    }

    fn tuple_matches(&self, tuple: &OptionTuple, values: &[String]) -> bool {
        if tuple.is_empty() {
            return values.is_empty();
        }
        if self.config.tuple_matching == TupleMatching::Exact && tuple.len() != values.len() {
            return false;
        }
        tuple
            .slots()
            .iter()
            .enumerate()
            .all(|(index, slot)| match (slot, values.get(index)) {
                (Some(wanted), Some(value)) => wanted == value,
                _ => false,
            })
    }
}

/// [`VariantResolver::resolve`] with the default configuration.
pub fn resolve<'p>(
    product: &'p Product,
    criterion: &SelectionCriterion,
) -> VariantResult<Resolution<'p>> {
    VariantResolver::default().resolve(product, criterion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::NamedSelection;
    use crate::error::VariantError;
    use crate::product::OptionDefinition;

    fn test_product() -> Product {
        Product::new(
            vec![OptionDefinition::new("Size"), OptionDefinition::new("Color")],
            vec![
                Variant::new(1, ["36", "Black"]),
                Variant::new(2, ["38", "Black"]),
                Variant::new(3, ["38", "White"]),
            ],
        )
        .unwrap()
    }

    fn matched_id(resolution: Resolution<'_>) -> VariantId {
        resolution
            .variant()
            .map(|v| v.id().clone())
            .expect("Expected a matched variant")
    }

    #[test]
    fn resolves_scalar_id() {
        let product = test_product();
        let resolution = resolve(&product, &SelectionCriterion::ById(VariantId::from(1))).unwrap();
        assert_eq!(matched_id(resolution), VariantId::from(1));
    }

    #[test]
    fn resolves_numeric_string_id() {
        let product = test_product();
        let resolution = resolve(&product, &SelectionCriterion::ById(VariantId::from("2"))).unwrap();
        assert_eq!(matched_id(resolution), VariantId::from(2));
    }

    #[test]
    fn resolves_id_object() {
        let product = test_product();
        let criterion = SelectionCriterion::ByIdObject { id: VariantId::from(2) };
        assert_eq!(matched_id(resolve(&product, &criterion).unwrap()), VariantId::from(2));
    }

    #[test]
    fn unknown_id_is_no_match() {
        let product = test_product();
        let resolution = resolve(&product, &VariantId::from(6909083098073_i64).into()).unwrap();
        assert_eq!(resolution, Resolution::NoMatch);
        assert!(!resolution.is_match());
    }

    #[test]
    fn resolves_named_options() {
        let product = test_product();
        let criterion = SelectionCriterion::ByNamedOptions(vec![
            NamedSelection::new("Size", "38"),
            NamedSelection::new("Color", "Black"),
        ]);
        assert_eq!(matched_id(resolve(&product, &criterion).unwrap()), VariantId::from(2));
    }

    #[test]
    fn named_options_with_unknown_values_is_no_match() {
        let product = test_product();
        let criterion = SelectionCriterion::ByNamedOptions(vec![
            NamedSelection::new("Size", "10"),
            NamedSelection::new("Color", "Purple"),
        ]);
        assert_eq!(resolve(&product, &criterion).unwrap(), Resolution::NoMatch);
    }

    #[test]
    fn named_options_with_unknown_name_propagates_error() {
        let product = test_product();
        let criterion = SelectionCriterion::ByNamedOptions(vec![NamedSelection::new("Fit", "Slim")]);
        let err = resolve(&product, &criterion).unwrap_err();
        assert_eq!(err, VariantError::unknown_option("Fit"));
    }

    #[test]
    fn resolves_positional_options() {
        let product = test_product();
        let criterion = OptionTuple::from_values(["36", "Black"]).into();
        assert_eq!(matched_id(resolve(&product, &criterion).unwrap()), VariantId::from(1));

        let criterion = OptionTuple::from_values(["99", "Purple"]).into();
        assert_eq!(resolve(&product, &criterion).unwrap(), Resolution::NoMatch);
    }

    #[test]
    fn positional_comparison_is_case_sensitive() {
        let product = test_product();
        let criterion = OptionTuple::from_values(["36", "black"]).into();
        assert_eq!(resolve(&product, &criterion).unwrap(), Resolution::NoMatch);
    }

    #[test]
    fn shorter_tuple_prefix_matches_first_variant() {
        let product = test_product();
        let criterion = OptionTuple::from_values(["38"]).into();
        assert_eq!(matched_id(resolve(&product, &criterion).unwrap()), VariantId::from(2));
    }

    #[test]
    fn longer_tuple_never_matches() {
        let product = test_product();
        let criterion = OptionTuple::from_values(["36", "Black", "Leather"]).into();
        assert_eq!(resolve(&product, &criterion).unwrap(), Resolution::NoMatch);
    }

    #[test]
    fn holes_never_match() {
        let product = test_product();
        let criterion = OptionTuple::new(vec![None, Some("White".to_string())]).into();
        assert_eq!(resolve(&product, &criterion).unwrap(), Resolution::NoMatch);

        let named = SelectionCriterion::ByNamedOptions(vec![NamedSelection::new("Color", "White")]);
        assert_eq!(resolve(&product, &named).unwrap(), Resolution::NoMatch);
    }

    #[test]
    fn empty_tuple_only_matches_products_without_options() {
        let product = test_product();
        let empty = SelectionCriterion::ByPositionalOptions(OptionTuple::default());
        assert_eq!(resolve(&product, &empty).unwrap(), Resolution::NoMatch);

        let named_empty = SelectionCriterion::ByNamedOptions(vec![]);
        assert_eq!(resolve(&product, &named_empty).unwrap(), Resolution::NoMatch);

        let single = Product::new(vec![], vec![Variant::new(10, Vec::<String>::new())]).unwrap();
        assert_eq!(matched_id(resolve(&single, &empty).unwrap()), VariantId::from(10));
    }

    #[test]
    fn exact_policy_rejects_partial_tuples() {
        let product = test_product();
        let resolver = VariantResolver::new(ResolverConfig::new(TupleMatching::Exact));

        let partial = OptionTuple::from_values(["38"]).into();
        assert_eq!(resolver.resolve(&product, &partial).unwrap(), Resolution::NoMatch);

        let full = OptionTuple::from_values(["38", "White"]).into();
        assert_eq!(matched_id(resolver.resolve(&product, &full).unwrap()), VariantId::from(3));
    }

    #[test]
    fn duplicate_tuples_resolve_to_first_variant() {
        let product = Product::new(
            vec![OptionDefinition::new("Size")],
            vec![Variant::new("a", ["M"]), Variant::new("b", ["M"])],
        )
        .unwrap();
        let criterion = OptionTuple::from_values(["M"]).into();
        assert_eq!(matched_id(resolve(&product, &criterion).unwrap()), VariantId::from("a"));
    }

    #[test]
    fn no_match_maps_to_not_found() {
        assert_eq!(Resolution::NoMatch.ok_or_not_found(), Err(DomainError::NotFound));
    }

    #[test]
    fn resolve_does_not_mutate_product() {
        let product = test_product();
        let before = product.clone();
        let criterion = SelectionCriterion::ByNamedOptions(vec![NamedSelection::new("Size", "36")]);

        let first = resolve(&product, &criterion).unwrap().variant().cloned();
        let second = resolve(&product, &criterion).unwrap().variant().cloned();

        assert_eq!(product, before);
        assert_eq!(first, second);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const SIZES: [&str; 4] = ["36", "38", "40", "42"];
        const COLORS: [&str; 3] = ["Black", "White", "Red"];
        const NAMES: [&str; 2] = ["Size", "Color"];

        /// Products with unique ids and unique size/color combinations.
        fn arb_product() -> impl Strategy<Value = Product> {
            proptest::sample::subsequence(
                (0..SIZES.len() * COLORS.len()).collect::<Vec<_>>(),
                1..=SIZES.len() * COLORS.len(),
            )
            .prop_map(|combos| {
                let variants = combos
                    .into_iter()
                    .enumerate()
                    .map(|(i, combo)| {
                        Variant::new(
                            1000 + i as i64,
                            [SIZES[combo / COLORS.len()], COLORS[combo % COLORS.len()]],
                        )
                    })
                    .collect();
                Product::new(NAMES.iter().map(|n| OptionDefinition::new(*n)).collect(), variants)
                    .unwrap()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: every variant resolves by its own id, in every id shape.
            #[test]
            fn every_variant_resolves_by_id(product in arb_product()) {
                for variant in product.variants() {
                    let id = variant.id().clone();

                    let by_id = resolve(&product, &SelectionCriterion::ById(id.clone())).unwrap();
                    prop_assert_eq!(by_id, Resolution::Matched(variant));

                    let by_text = resolve(&product, &SelectionCriterion::ById(VariantId::from(id.to_string()))).unwrap();
                    prop_assert_eq!(by_text, Resolution::Matched(variant));

                    let by_object = resolve(&product, &SelectionCriterion::ByIdObject { id }).unwrap();
                    prop_assert_eq!(by_object, Resolution::Matched(variant));
                }
            }

            /// Property: every variant resolves by its positional and named tuples.
            #[test]
            fn every_variant_resolves_by_options(product in arb_product()) {
                for variant in product.variants() {
                    let positional = OptionTuple::from_values(variant.options().iter().cloned());
                    let by_tuple = resolve(&product, &positional.into()).unwrap();
                    prop_assert_eq!(by_tuple, Resolution::Matched(variant));

                    let named: Vec<_> = product
                        .option_names()
                        .zip(variant.options())
                        .map(|(name, value)| NamedSelection::new(name.to_lowercase(), value.clone()))
                        .collect();
                    let by_name = resolve(&product, &SelectionCriterion::ByNamedOptions(named)).unwrap();
                    prop_assert_eq!(by_name, Resolution::Matched(variant));
                }
            }

            /// Property: ids outside the product never match.
            #[test]
            fn foreign_ids_never_match(product in arb_product(), id in 0_i64..1000) {
                let resolution = resolve(&product, &SelectionCriterion::ById(VariantId::from(id))).unwrap();
                prop_assert_eq!(resolution, Resolution::NoMatch);
            }
        }
    }
}
