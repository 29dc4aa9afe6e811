use super::model::{Attribute, Catalog, EngineConfig, FilteredView, Selection};

// ---------------------------------------------------------------------------
// Filter engine: conjunctive whole-value matching over the key columns
// ---------------------------------------------------------------------------

/// Return the view of catalog rows matching `selection`.
///
/// A row is included iff, for every attribute with a set value, the row's
/// value equals the selected one; wildcards impose no constraint, so the
/// all-wildcard selection returns the whole catalog in order. Attributes
/// listed in `config.fold_case` compare with both sides lowercased; all
/// others are exact. Matching is whole-value only, never substring.
pub fn filter<'a>(
    catalog: &'a Catalog,
    selection: &Selection,
    config: &EngineConfig,
) -> FilteredView<'a> {
    // Resolve column indices and fold the wanted values once, not per row.
    let predicates: Vec<(usize, String, bool)> = Attribute::CASCADE
        .into_iter()
        .filter_map(|attr| {
            selection.get(attr).map(|value| {
                let fold = config.fold_case.contains(&attr);
                let wanted = if fold {
                    value.to_lowercase()
                } else {
                    value.to_string()
                };
                (catalog.key_index(attr), wanted, fold)
            })
        })
        .collect();

    let indices: Vec<usize> = catalog
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            predicates.iter().all(|(idx, wanted, fold)| {
                let actual = &row.fields[*idx];
                if *fold {
                    actual.to_lowercase() == *wanted
                } else {
                    actual == wanted
                }
            })
        })
        .map(|(i, _)| i)
        .collect();

    FilteredView::new(catalog, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The three-row inventory used throughout the viewer's unit tests.
    fn sample_catalog() -> Catalog {
        let header: Vec<String> = ["SERVER", "DB", "SCHEMA", "DATA MART"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let records = vec![
            vec!["S1".into(), "D1".into(), "dbo".into(), "M1".into()],
            vec!["S1".into(), "D2".into(), "mer".into(), "M2".into()],
            vec!["S2".into(), "D1".into(), "dbo".into(), "M1".into()],
        ];
        Catalog::from_records(header, records).unwrap()
    }

    fn selection(
        server: Option<&str>,
        db: Option<&str>,
        schema: Option<&str>,
        data_mart: Option<&str>,
    ) -> Selection {
        Selection {
            server: server.map(str::to_string),
            db: db.map(str::to_string),
            schema: schema.map(str::to_string),
            data_mart: data_mart.map(str::to_string),
        }
    }

    #[test]
    fn all_wildcard_selection_returns_whole_catalog_in_order() {
        let catalog = sample_catalog();
        let view = filter(&catalog, &Selection::default(), &EngineConfig::default());
        assert_eq!(view.len(), catalog.len());
        assert_eq!(view.indices(), &[0, 1, 2]);
    }

    #[test]
    fn server_matching_folds_case() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();
        let view = filter(&catalog, &selection(Some("s1"), None, None, None), &config);
        assert_eq!(view.indices(), &[0, 1]);

        let view = filter(&catalog, &selection(Some("S1"), None, None, None), &config);
        assert_eq!(view.indices(), &[0, 1]);
    }

    #[test]
    fn db_matching_is_exact() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();
        let view = filter(&catalog, &selection(None, Some("d1"), None, None), &config);
        assert!(view.is_empty());

        let view = filter(&catalog, &selection(None, Some("D1"), None, None), &config);
        assert_eq!(view.indices(), &[0, 2]);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();
        let view = filter(
            &catalog,
            &selection(Some("s1"), None, None, Some("M1")),
            &config,
        );
        assert_eq!(view.len(), 1);
        let row = view.rows().next().unwrap();
        assert_eq!(catalog.attribute_value(row, Attribute::Db), "D1");
    }

    #[test]
    fn matching_is_whole_value_not_substring() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();
        let view = filter(&catalog, &selection(Some("S"), None, None, None), &config);
        assert!(view.is_empty());
        let view = filter(&catalog, &selection(None, None, Some("db"), None), &config);
        assert!(view.is_empty());
    }

    #[test]
    fn unknown_value_yields_empty_view_not_error() {
        let catalog = sample_catalog();
        let view = filter(
            &catalog,
            &selection(Some("s3"), None, None, None),
            &EngineConfig::default(),
        );
        assert!(view.is_empty());
    }

    #[test]
    fn included_rows_satisfy_every_set_predicate() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();
        let sel = selection(Some("s1"), Some("D1"), None, None);
        let view = filter(&catalog, &sel, &config);
        for row in view.rows() {
            assert_eq!(
                catalog.attribute_value(row, Attribute::Server).to_lowercase(),
                "s1"
            );
            assert_eq!(catalog.attribute_value(row, Attribute::Db), "D1");
        }
        // Excluded rows violate at least one predicate.
        let included: Vec<usize> = view.indices().to_vec();
        for (i, row) in catalog.rows.iter().enumerate() {
            if included.contains(&i) {
                continue;
            }
            let server_ok =
                catalog.attribute_value(row, Attribute::Server).to_lowercase() == "s1";
            let db_ok = catalog.attribute_value(row, Attribute::Db) == "D1";
            assert!(!(server_ok && db_ok));
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();
        let sel = selection(Some("S1"), None, Some("dbo"), None);
        let first = filter(&catalog, &sel, &config);
        let second = filter(&catalog, &sel, &config);
        assert_eq!(first.indices(), second.indices());
    }
}
