use std::collections::BTreeSet;

use serde::Serialize;

use super::filter::filter;
use super::model::{Attribute, Catalog, EngineConfig, Selection};

// ---------------------------------------------------------------------------
// Option deriver: cascading dropdown domains
// ---------------------------------------------------------------------------

/// Distinct values `attr` may still take, given only the selections at
/// strictly earlier cascade positions.
///
/// The attribute's own selection (and anything downstream of it) is
/// deliberately ignored, so changing an upstream dropdown refreshes the
/// deeper domains instead of leaving them pinned to a stale choice. The
/// Schema domain is additionally intersected with the configured
/// allow-list, which weeds malformed labels out of the raw data.
pub fn option_domain(
    catalog: &Catalog,
    selection: &Selection,
    attr: Attribute,
    config: &EngineConfig,
) -> BTreeSet<String> {
    let upstream = selection.restricted_before(attr);
    let view = filter(catalog, &upstream, config);

    let mut domain: BTreeSet<String> = view
        .rows()
        .map(|row| catalog.attribute_value(row, attr).to_string())
        .collect();

    if attr == Attribute::Schema {
        if let Some(allowed) = &config.schema_allow_list {
            domain.retain(|value| allowed.contains(value));
        }
    }
    domain
}

/// One pass of dropdown domains across the whole cascade. The UI wires the
/// three dependent dropdowns from here; the Server domain always equals
/// the catalog's full distinct Server set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Domains {
    pub server: BTreeSet<String>,
    pub db: BTreeSet<String>,
    pub schema: BTreeSet<String>,
    pub data_mart: BTreeSet<String>,
}

/// Derive every dropdown domain for the current selection.
pub fn cascade_domains(
    catalog: &Catalog,
    selection: &Selection,
    config: &EngineConfig,
) -> Domains {
    Domains {
        server: option_domain(catalog, selection, Attribute::Server, config),
        db: option_domain(catalog, selection, Attribute::Db, config),
        schema: option_domain(catalog, selection, Attribute::Schema, config),
        data_mart: option_domain(catalog, selection, Attribute::DataMart, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn sample_catalog() -> Catalog {
        let header: Vec<String> = ["SERVER", "DB", "SCHEMA", "DATA MART"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let records = vec![
            vec!["S1".into(), "D1".into(), "dbo".into(), "M1".into()],
            vec!["S1".into(), "D2".into(), "mer".into(), "M2".into()],
            vec!["S2".into(), "D1".into(), "dbo".into(), "M1".into()],
            // Schema label present in raw data but not canonical.
            vec!["S2".into(), "D3".into(), "dbo_old".into(), "M3".into()],
        ];
        Catalog::from_records(header, records).unwrap()
    }

    #[test]
    fn server_domain_is_always_the_full_distinct_set() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();

        let unselected = Selection::default();
        assert_eq!(
            option_domain(&catalog, &unselected, Attribute::Server, &config),
            to_set(&["S1", "S2"])
        );

        // Even its own selection does not narrow it.
        let selected = Selection {
            server: Some("S1".into()),
            ..Selection::default()
        };
        assert_eq!(
            option_domain(&catalog, &selected, Attribute::Server, &config),
            to_set(&["S1", "S2"])
        );
    }

    #[test]
    fn upstream_selection_narrows_downstream_domains() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();
        let selection = Selection {
            server: Some("s1".into()),
            ..Selection::default()
        };

        let domains = cascade_domains(&catalog, &selection, &config);
        assert_eq!(domains.db, to_set(&["D1", "D2"]));
        assert_eq!(domains.schema, to_set(&["dbo", "mer"]));
        assert_eq!(domains.data_mart, to_set(&["M1", "M2"]));
    }

    #[test]
    fn own_and_downstream_selections_do_not_constrain_a_domain() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();
        let selection = Selection {
            server: Some("S1".into()),
            db: Some("D1".into()),
            data_mart: Some("M2".into()),
            ..Selection::default()
        };

        // DB's domain sees only the SERVER selection, not its own or the
        // DATA MART one.
        assert_eq!(
            option_domain(&catalog, &selection, Attribute::Db, &config),
            to_set(&["D1", "D2"])
        );
        // SCHEMA's domain sees SERVER and DB.
        assert_eq!(
            option_domain(&catalog, &selection, Attribute::Schema, &config),
            to_set(&["dbo"])
        );
    }

    #[test]
    fn schema_domain_is_intersected_with_the_allow_list() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();

        // "dbo_old" exists in the raw data but is not canonical.
        let domains = cascade_domains(&catalog, &Selection::default(), &config);
        assert_eq!(domains.schema, to_set(&["dbo", "mer"]));

        // Disabling the guard surfaces the raw label again.
        let unguarded = EngineConfig {
            schema_allow_list: None,
            ..EngineConfig::default()
        };
        let domains = cascade_domains(&catalog, &Selection::default(), &unguarded);
        assert_eq!(domains.schema, to_set(&["dbo", "dbo_old", "mer"]));
    }

    #[test]
    fn domains_never_leak_values_from_outside_the_restricted_view() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();
        let selection = Selection {
            server: Some("S2".into()),
            ..Selection::default()
        };

        let domains = cascade_domains(&catalog, &selection, &config);
        // S2 rows only carry D1/D3, M1/M3.
        assert_eq!(domains.db, to_set(&["D1", "D3"]));
        assert_eq!(domains.data_mart, to_set(&["M1", "M3"]));
    }

    #[test]
    fn zero_match_upstream_selection_empties_every_downstream_domain() {
        let catalog = sample_catalog();
        let config = EngineConfig::default();
        let selection = Selection {
            server: Some("s3".into()),
            ..Selection::default()
        };

        let domains = cascade_domains(&catalog, &selection, &config);
        assert_eq!(domains.server, to_set(&["S1", "S2"]));
        assert!(domains.db.is_empty());
        assert!(domains.schema.is_empty());
        assert!(domains.data_mart.is_empty());
    }

    #[test]
    fn empty_catalog_yields_empty_domains() {
        let catalog = Catalog::empty();
        let domains = cascade_domains(&catalog, &Selection::default(), &EngineConfig::default());
        assert_eq!(domains, Domains::default());
    }
}
