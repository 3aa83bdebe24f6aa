use storefront_search::data_models::{
    RefinementToggle, RefinementValue, Refinements, SearchState, toggle_refinement,
};

fn refine(entries: &[(&str, RefinementValue)]) -> Refinements {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[cfg(test)]
mod toggle_value_tests {
    use super::*;

    #[test]
    fn test_toggle_adds_new_single_value() {
        let next = toggle_refinement(&Refinements::new(), &RefinementToggle::new("c_size", "M"));
        assert!(matches!(&next["c_size"], RefinementValue::Single(v) if v == "M"));
    }

    #[test]
    fn test_toggle_same_single_value_removes_key() {
        let current = refine(&[("price", RefinementValue::single("20-50"))]);
        let next = toggle_refinement(&current, &RefinementToggle::new("price", "20-50"));
        assert!(next.is_empty());
    }

    #[test]
    fn test_toggle_promotes_single_to_multiple() {
        let current = refine(&[("c_size", RefinementValue::single("M"))]);
        let next = toggle_refinement(&current, &RefinementToggle::new("c_size", "L"));
        assert!(matches!(
            &next["c_size"],
            RefinementValue::Multiple(values) if values == &["M", "L"]
        ));
    }

    #[test]
    fn test_toggle_appends_to_multiple_in_insertion_order() {
        let current = refine(&[("c_size", RefinementValue::multiple(["M", "L"]))]);
        let next = toggle_refinement(&current, &RefinementToggle::new("c_size", "S"));
        assert!(matches!(
            &next["c_size"],
            RefinementValue::Multiple(values) if values == &["M", "L", "S"]
        ));
    }

    #[test]
    fn test_toggle_removing_from_pair_collapses_to_single() {
        let current = refine(&[("c_size", RefinementValue::multiple(["M", "L"]))]);
        let next = toggle_refinement(&current, &RefinementToggle::new("c_size", "M"));
        assert!(matches!(&next["c_size"], RefinementValue::Single(v) if v == "L"));
    }

    #[test]
    fn test_toggle_removing_from_larger_set_stays_multiple() {
        let current = refine(&[("c_size", RefinementValue::multiple(["S", "M", "L"]))]);
        let next = toggle_refinement(&current, &RefinementToggle::new("c_size", "M"));
        assert!(matches!(
            &next["c_size"],
            RefinementValue::Multiple(values) if values == &["S", "L"]
        ));
    }

    #[test]
    fn test_toggle_last_value_of_degenerate_multiple_removes_key() {
        let current = refine(&[("c_size", RefinementValue::multiple(["M"]))]);
        let next = toggle_refinement(&current, &RefinementToggle::new("c_size", "M"));
        assert!(!next.contains_key("c_size"));
    }

    #[test]
    fn test_toggle_drops_empty_current_value() {
        let current = refine(&[("c_size", RefinementValue::single(""))]);
        let next = toggle_refinement(&current, &RefinementToggle::new("c_size", "M"));
        assert!(matches!(&next["c_size"], RefinementValue::Single(v) if v == "M"));

        let current = refine(&[("c_size", RefinementValue::multiple(["", "M", "L"]))]);
        let next = toggle_refinement(&current, &RefinementToggle::new("c_size", "L"));
        assert!(matches!(&next["c_size"], RefinementValue::Single(v) if v == "M"));
    }

    #[test]
    fn test_toggle_is_case_sensitive() {
        let current = refine(&[("c_refinementColor", RefinementValue::single("Red"))]);
        let next = toggle_refinement(&current, &RefinementToggle::new("c_refinementColor", "red"));
        assert_eq!(
            next["c_refinementColor"],
            RefinementValue::multiple(["Red", "red"])
        );
    }

    #[test]
    fn test_toggle_leaves_other_attributes_alone() {
        let current = refine(&[
            ("c_size", RefinementValue::single("M")),
            ("cgid", RefinementValue::single("womens")),
        ]);
        let next = toggle_refinement(&current, &RefinementToggle::new("c_size", "M"));
        assert_eq!(next.len(), 1);
        assert_eq!(next["cgid"], RefinementValue::single("womens"));
    }

    #[test]
    fn test_toggle_does_not_mutate_input() {
        let current = refine(&[("c_size", RefinementValue::multiple(["M", "L"]))]);
        let snapshot = current.clone();
        let _ = toggle_refinement(&current, &RefinementToggle::new("c_size", "S"));
        assert!(matches!(
            &current["c_size"],
            RefinementValue::Multiple(values) if values == &["M", "L"]
        ));
        assert_eq!(current, snapshot);
    }
}

#[cfg(test)]
mod presence_toggle_tests {
    use super::*;

    #[test]
    fn test_presence_toggle_adds_flag() {
        let next = toggle_refinement(&Refinements::new(), &RefinementToggle::presence("c_isNew"));
        assert_eq!(next["c_isNew"], RefinementValue::single("true"));
    }

    #[test]
    fn test_presence_toggle_removes_any_selection() {
        let current = refine(&[("c_isNew", RefinementValue::single("true"))]);
        let next = toggle_refinement(&current, &RefinementToggle::presence("c_isNew"));
        assert!(next.is_empty());

        let current = refine(&[("c_size", RefinementValue::multiple(["M", "L"]))]);
        let next = toggle_refinement(&current, &RefinementToggle::presence("c_size"));
        assert!(next.is_empty());
    }

    #[test]
    fn test_empty_value_is_presence_toggle() {
        let toggle = RefinementToggle {
            attribute_id: "c_isNew".to_string(),
            value: Some(String::new()),
        };
        let next = toggle_refinement(&Refinements::new(), &toggle);
        assert_eq!(next["c_isNew"], RefinementValue::single("true"));
    }
}

#[cfg(test)]
mod involution_tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_original() {
        let cases = vec![
            (Refinements::new(), RefinementToggle::new("c_size", "M")),
            (
                refine(&[("c_size", RefinementValue::single("M"))]),
                RefinementToggle::new("c_size", "L"),
            ),
            (
                refine(&[("c_size", RefinementValue::multiple(["S", "M", "L"]))]),
                RefinementToggle::new("c_size", "XL"),
            ),
            (
                refine(&[("c_size", RefinementValue::multiple(["S", "M", "L"]))]),
                RefinementToggle::new("c_size", "M"),
            ),
            (
                refine(&[("c_isNew", RefinementValue::single("true"))]),
                RefinementToggle::presence("c_isNew"),
            ),
        ];

        for (original, toggle) in cases {
            let once = toggle_refinement(&original, &toggle);
            let twice = toggle_refinement(&once, &toggle);
            assert_eq!(twice, original, "toggling {toggle:?} twice");
        }
    }

    #[test]
    fn test_search_state_with_toggled() {
        let state = SearchState {
            q: Some("shirt".to_string()),
            refine: refine(&[("c_size", RefinementValue::single("M"))]),
            ..SearchState::default()
        };
        let next = state.with_toggled(&RefinementToggle::new("c_size", "L"));
        assert_eq!(next.q.as_deref(), Some("shirt"));
        assert!(next.is_selected("c_size", "L"));
        assert!(next.is_selected("c_size", "M"));
        assert!(!state.is_selected("c_size", "L"));
    }
}

#[cfg(test)]
mod refinement_value_tests {
    use super::*;

    #[test]
    fn test_from_values() {
        assert_eq!(RefinementValue::from_values(vec![]), None);
        assert!(matches!(
            RefinementValue::from_values(vec!["M".into(), "M".into()]),
            Some(RefinementValue::Single(v)) if v == "M"
        ));
        assert!(matches!(
            RefinementValue::from_values(vec!["M".into(), "L".into(), "M".into()]),
            Some(RefinementValue::Multiple(v)) if v == ["M", "L"]
        ));
    }

    #[test]
    fn test_equality_ignores_order_and_representation() {
        assert_eq!(
            RefinementValue::multiple(["M", "L"]),
            RefinementValue::multiple(["L", "M"])
        );
        assert_eq!(RefinementValue::single("M"), RefinementValue::multiple(["M"]));
        assert_ne!(RefinementValue::single("M"), RefinementValue::single("L"));
    }

    #[test]
    fn test_serde_shape() {
        let single = serde_json::to_value(RefinementValue::single("M")).unwrap();
        assert_eq!(single, serde_json::json!("M"));
        let multiple: RefinementValue = serde_json::from_value(serde_json::json!(["M", "L"])).unwrap();
        assert!(matches!(multiple, RefinementValue::Multiple(_)));
    }
}
