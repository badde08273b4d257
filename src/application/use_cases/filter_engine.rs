// ============================================================
// FILTER ENGINE
// ============================================================
// Keyword and inclusive range predicates, combined with AND

use crate::domain::dataset::{
    Column, ColumnRoles, Dataset, FilterParams, NumericRange, RangeBounds,
};

/// Predicates after defaults have been filled in from the observed bounds
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Trimmed, non-empty keyword
    pub keyword: Option<String>,

    /// Always active
    pub val_range: NumericRange,

    /// Active only for numeric weight/ownership columns
    pub wgt_range: Option<NumericRange>,
    pub own_range: Option<NumericRange>,
}

impl FilterCriteria {
    /// Fill in omitted ranges from the observed bounds. Ranges on optional
    /// columns without bounds (absent, text, or all null) are dropped.
    pub fn resolve(params: &FilterParams, bounds: &RangeBounds) -> Self {
        Self {
            keyword: params.active_keyword().map(str::to_string),
            val_range: params
                .val_range
                .or(bounds.val)
                .unwrap_or_else(NumericRange::unbounded),
            wgt_range: bounds.wgt.map(|observed| params.wgt_range.unwrap_or(observed)),
            own_range: bounds.own.map(|observed| params.own_range.unwrap_or(observed)),
        }
    }

    /// Keyword only; every range admits any non-null value
    pub fn keyword(keyword: &str) -> Self {
        let trimmed = keyword.trim();
        Self {
            keyword: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            val_range: NumericRange::unbounded(),
            wgt_range: None,
            own_range: None,
        }
    }
}

/// Applies `FilterCriteria` to a dataset without reordering it
pub struct FilterEngine {
    roles: ColumnRoles,
}

impl FilterEngine {
    pub fn new(roles: ColumnRoles) -> Self {
        Self { roles }
    }

    /// Filtered view of `dataset`, in source order
    pub fn apply(&self, dataset: &Dataset, criteria: &FilterCriteria) -> Dataset {
        dataset.select_rows(&self.matching_rows(dataset, criteria))
    }

    /// Indices of rows that satisfy every active predicate, ascending
    pub fn matching_rows(&self, dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
        let needle = criteria.keyword.as_ref().map(|k| k.to_lowercase());
        let name = dataset.column(&self.roles.name_col);
        let val = dataset.column(&self.roles.val_col);

        let optional = |role: &Option<String>, range: Option<NumericRange>| {
            let column = role.as_deref().and_then(|r| dataset.column(r))?;
            Some((column, range?))
        };
        let wgt = optional(&self.roles.wgt_col, criteria.wgt_range);
        let own = optional(&self.roles.own_col, criteria.own_range);

        (0..dataset.row_count())
            .filter(|&row| match &needle {
                Some(needle) => name
                    .and_then(|c| c.display_at(row))
                    .map(|text| text.to_lowercase().contains(needle.as_str()))
                    .unwrap_or(false),
                None => true,
            })
            .filter(|&row| in_range(val, criteria.val_range, row))
            .filter(|&row| wgt.map_or(true, |(c, r)| in_range(Some(c), r, row)))
            .filter(|&row| own.map_or(true, |(c, r)| in_range(Some(c), r, row)))
            .collect()
    }
}

fn in_range(column: Option<&Column>, range: NumericRange, row: usize) -> bool {
    column
        .map(|c| range.admits(c.numeric_at(row)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Session;
    use crate::domain::dataset::SourceEncoding;
    use proptest::prelude::*;

    fn roles() -> ColumnRoles {
        ColumnRoles {
            name_col: "name".into(),
            val_col: "val".into(),
            wgt_col: Some("wgt".into()),
            own_col: Some("own".into()),
        }
    }

    fn dataset(names: &[Option<&str>], vals: &[Option<f64>]) -> Dataset {
        let n = names.len();
        Dataset::new(vec![
            Column::text("name", names.iter().map(|s| s.map(str::to_string)).collect()),
            Column::number("val", vals.to_vec(), false),
            Column::number("wgt", (0..n).map(|i| Some(i as f64)).collect(), true),
            Column::number("own", (0..n).map(|i| Some(10.0 * i as f64)).collect(), true),
        ])
        .unwrap()
    }

    fn names_of(ds: &Dataset) -> Vec<String> {
        (0..ds.row_count())
            .map(|r| ds.column("name").unwrap().display_at(r).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_keyword_case_insensitive() {
        let ds = dataset(
            &[Some("Apple"), Some("BANANA"), Some("cherry")],
            &[Some(1.0), Some(2.0), Some(3.0)],
        );
        let engine = FilterEngine::new(roles());
        let out = engine.apply(&ds, &FilterCriteria::keyword(" a "));
        assert_eq!(names_of(&out), vec!["Apple", "BANANA"]);
    }

    #[test]
    fn test_keyword_excludes_null_names() {
        let ds = dataset(&[None, Some("Alpha")], &[Some(1.0), Some(2.0)]);
        let engine = FilterEngine::new(roles());
        assert_eq!(engine.matching_rows(&ds, &FilterCriteria::keyword("a")), vec![1]);
        // No keyword: nulls in the name column are kept
        assert_eq!(engine.matching_rows(&ds, &FilterCriteria::keyword("")), vec![0, 1]);
    }

    #[test]
    fn test_numeric_names_are_stringified() {
        let ds = Dataset::new(vec![
            Column::number("name", vec![Some(1005.0), Some(2000.0)], true),
            Column::number("val", vec![Some(1.0), Some(2.0)], true),
        ])
        .unwrap();
        let roles = ColumnRoles {
            name_col: "name".into(),
            val_col: "val".into(),
            wgt_col: None,
            own_col: None,
        };
        let rows = FilterEngine::new(roles).matching_rows(&ds, &FilterCriteria::keyword("100"));
        assert_eq!(rows, vec![0]);
    }

    #[test]
    fn test_valuation_range_inclusive() {
        let ds = dataset(
            &[Some("A"), Some("B"), Some("C")],
            &[Some(100.0), Some(50.0), Some(200.0)],
        );
        let criteria = FilterCriteria {
            val_range: NumericRange::new(60.0, 250.0),
            ..FilterCriteria::keyword("")
        };
        let out = FilterEngine::new(roles()).apply(&ds, &criteria);
        assert_eq!(names_of(&out), vec!["A", "C"]);

        let criteria = FilterCriteria {
            val_range: NumericRange::new(100.0, 200.0),
            ..FilterCriteria::keyword("")
        };
        let out = FilterEngine::new(roles()).apply(&ds, &criteria);
        assert_eq!(names_of(&out), vec!["A", "C"]);
    }

    #[test]
    fn test_observed_bounds_exclude_only_nulls() {
        let ds = dataset(
            &[Some("A"), Some("B"), Some("C")],
            &[Some(100.0), None, Some(200.0)],
        );
        let session = Session::new("f.csv".into(), SourceEncoding::Utf8, ds.clone(), roles());
        let criteria = FilterCriteria::resolve(&FilterParams::default(), &session.bounds);
        let rows = FilterEngine::new(roles()).matching_rows(&ds, &criteria);
        assert_eq!(rows, vec![0, 2]);
    }

    #[test]
    fn test_ranges_compose_with_and() {
        let ds = dataset(
            &[Some("A"), Some("B"), Some("C"), Some("D")],
            &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        );
        let criteria = FilterCriteria {
            keyword: None,
            val_range: NumericRange::new(2.0, 4.0),
            wgt_range: Some(NumericRange::new(0.0, 2.0)),
            own_range: Some(NumericRange::new(20.0, 30.0)),
        };
        let rows = FilterEngine::new(roles()).matching_rows(&ds, &criteria);
        assert_eq!(rows, vec![2]);
    }

    #[test]
    fn test_resolve_drops_ranges_for_text_columns() {
        let ds = Dataset::new(vec![
            Column::text("name", vec![Some("A".into())]),
            Column::number("val", vec![Some(1.0)], true),
            Column::text("wgt", vec![Some("n/a-ish".into())]),
        ])
        .unwrap();
        let roles = ColumnRoles {
            name_col: "name".into(),
            val_col: "val".into(),
            wgt_col: Some("wgt".into()),
            own_col: None,
        };
        let session = Session::new("f.csv".into(), SourceEncoding::Utf8, ds, roles);
        let params = FilterParams {
            wgt_range: Some(NumericRange::new(0.0, 1.0)),
            ..FilterParams::default()
        };
        let criteria = FilterCriteria::resolve(&params, &session.bounds);
        assert_eq!(criteria.wgt_range, None);
        assert_eq!(criteria.own_range, None);
        assert_eq!(criteria.val_range, NumericRange::new(1.0, 1.0));
    }

    fn arb_dataset() -> impl Strategy<Value = Dataset> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["Apple", "apricot", "Berry", "Cherry", "date"]),
                prop::option::of(-100.0f64..1000.0),
            ),
            0..40,
        )
        .prop_map(|rows| {
            let names: Vec<Option<&str>> = rows.iter().map(|(n, _)| Some(*n)).collect();
            let vals: Vec<Option<f64>> = rows.iter().map(|(_, v)| *v).collect();
            dataset(&names, &vals)
        })
    }

    fn source_index(ds: &Dataset, row: usize) -> f64 {
        // `wgt` holds the source row index
        ds.column("wgt").unwrap().numeric_at(row).unwrap()
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent(
            ds in arb_dataset(),
            lo in -100.0f64..1000.0,
            width in 0.0f64..1100.0,
            keyword in prop::sample::select(vec!["", "a", "ERR", "x"]),
        ) {
            let engine = FilterEngine::new(roles());
            let criteria = FilterCriteria {
                val_range: NumericRange::new(lo, lo + width),
                ..FilterCriteria::keyword(keyword)
            };
            let once = engine.apply(&ds, &criteria);
            let twice = engine.apply(&once, &criteria);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_widening_never_shrinks(
            ds in arb_dataset(),
            lo in -100.0f64..1000.0,
            width in 0.0f64..500.0,
            extra in 0.0f64..500.0,
        ) {
            let engine = FilterEngine::new(roles());
            let narrow = FilterCriteria {
                val_range: NumericRange::new(lo, lo + width),
                ..FilterCriteria::keyword("")
            };
            let wide = FilterCriteria {
                val_range: NumericRange::new(lo - extra, lo + width + extra),
                ..FilterCriteria::keyword("")
            };
            let n = engine.matching_rows(&ds, &narrow).len();
            let w = engine.matching_rows(&ds, &wide).len();
            prop_assert!(w >= n);
        }

        #[test]
        fn prop_order_is_preserved(
            ds in arb_dataset(),
            lo in -100.0f64..1000.0,
            keyword in prop::sample::select(vec!["", "a", "e"]),
        ) {
            let engine = FilterEngine::new(roles());
            let criteria = FilterCriteria {
                val_range: NumericRange::new(lo, f64::INFINITY),
                ..FilterCriteria::keyword(keyword)
            };
            let out = engine.apply(&ds, &criteria);
            let order: Vec<f64> = (0..out.row_count()).map(|r| source_index(&out, r)).collect();
            prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
