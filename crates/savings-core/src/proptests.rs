//! Property-based tests for the savings formula and the project store.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use crate::util::ids::slugify;
    use crate::{
        Project, ProjectInput, ProjectPatch, ProjectStore, Settings, SettingsStore,
        compute_derived, to_non_negative_number,
    };
    use proptest::prelude::*;

    fn amount() -> impl Strategy<Value = f64> {
        0.0f64..1_000_000.0
    }

    prop_compose! {
        fn project()(
            id in "[a-z][a-z0-9-]{0,12}",
            name in "[A-Za-z][A-Za-z ]{0,15}",
            count in amount(),
            minutes in amount(),
            hours in amount(),
        ) -> Project {
            Project {
                id,
                name,
                count,
                time_per_transaction_min: minutes,
                business_hours_back: hours,
            }
        }
    }

    prop_compose! {
        fn settings()(it_rate in amount(), business_rate in amount()) -> Settings {
            Settings { it_rate, business_rate }
        }
    }

    proptest! {
        #[test]
        fn test_compute_derived_is_pure(p in project(), s in settings()) {
            let (p_before, s_before) = (p.clone(), s);
            let first = compute_derived(&p, &s);
            let second = compute_derived(&p, &s);
            prop_assert_eq!(first, second);
            prop_assert_eq!(p, p_before);
            prop_assert_eq!(s, s_before);
        }

        #[test]
        fn test_total_is_sum_of_parts(p in project(), s in settings()) {
            let d = compute_derived(&p, &s);
            prop_assert_eq!(d.total, d.it_saving + d.business_saving);
            prop_assert!(d.total >= 0.0);
        }

        #[test]
        fn test_coercion_never_negative_or_nan(text in "\\PC*") {
            let n = to_non_negative_number(&serde_json::Value::String(text));
            prop_assert!(n.is_finite());
            prop_assert!(n >= 0.0);
        }

        #[test]
        fn test_slugify_output_charset(name in "\\PC*") {
            let slug = slugify(&name);
            prop_assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
            prop_assert_eq!(slugify(&slug), slug);
        }

        #[test]
        fn test_upsert_then_list_contains_input(p in project()) {
            let store = ProjectStore::seeded(Arc::new(SettingsStore::default()));
            store.upsert(ProjectInput::from(p.clone())).unwrap();
            let listed = store.list();
            prop_assert!(listed.iter().any(|v| v.project == p));
        }

        #[test]
        fn test_patch_count_touches_only_count(p in project(), count in amount()) {
            let store = ProjectStore::new(Arc::new(SettingsStore::default()));
            store.upsert(ProjectInput::from(p.clone())).unwrap();
            let patch = ProjectPatch { count: Some(count), ..Default::default() };
            let updated = store.patch(&p.id, &patch).unwrap().project;
            prop_assert_eq!(updated, Project { count, ..p });
        }
    }
}
