use serde::{Deserialize, Serialize};

use crate::data_models::{PRESENCE_VALUE, RefinementToggle, SearchState};
use crate::query_string::encode_component;
use crate::search_params::{self, EncodeOptions};

/// A refinement attribute as returned by the commerce API's product search.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Refinement {
    pub attribute_id: String,
    pub label: String,
    #[serde(default)]
    pub values: Vec<RefinementOption>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefinementOption {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub hit_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SwatchVariant {
    Circle,
    Square,
}

/// How a refinement attribute is presented, which also decides how its
/// links are built.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DisplayKind {
    Checkbox,
    #[serde(rename_all = "camelCase")]
    Swatch {
        variant: SwatchVariant,
        show_label: bool,
        use_background_color: bool,
    },
    Link,
    Radio,
}

/// The refinement attributes the storefront knows how to display.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementCatalog {
    entries: Vec<(String, DisplayKind)>,
}

impl Default for RefinementCatalog {
    fn default() -> Self {
        RefinementCatalog::new()
            .with("cgid", DisplayKind::Link)
            .with("c_isNew", DisplayKind::Checkbox)
            .with(
                "c_refinementColor",
                DisplayKind::Swatch {
                    variant: SwatchVariant::Circle,
                    show_label: false,
                    use_background_color: true,
                },
            )
            .with(
                "c_size",
                DisplayKind::Swatch {
                    variant: SwatchVariant::Square,
                    show_label: false,
                    use_background_color: false,
                },
            )
            .with("price", DisplayKind::Radio)
    }
}

impl RefinementCatalog {
    pub fn new() -> Self {
        RefinementCatalog {
            entries: Vec::new(),
        }
    }

    /// Adds or replaces the display kind for `attribute_id`.
    pub fn with(mut self, attribute_id: impl Into<String>, kind: DisplayKind) -> Self {
        let attribute_id = attribute_id.into();
        match self.entries.iter_mut().find(|(id, _)| *id == attribute_id) {
            Some(entry) => entry.1 = kind,
            None => self.entries.push((attribute_id, kind)),
        }
        self
    }

    pub fn kind(&self, attribute_id: &str) -> Option<&DisplayKind> {
        self.entries
            .iter()
            .find(|(id, _)| id == attribute_id)
            .map(|(_, kind)| kind)
    }

    pub fn is_supported(&self, attribute_id: &str) -> bool {
        self.kind(attribute_id).is_some()
    }

    /// Panel indexes that start expanded: one per supported refinement.
    pub fn expanded_indexes(&self, refinements: &[Refinement]) -> Vec<usize> {
        let supported = refinements
            .iter()
            .filter(|r| self.is_supported(&r.attribute_id))
            .count();
        (0..supported).collect()
    }

    pub fn facet_groups(
        &self,
        state: &SearchState,
        refinements: &[Refinement],
        pathname: &str,
    ) -> Vec<FacetGroup> {
        refinements
            .iter()
            .filter_map(|refinement| {
                let kind = self.kind(&refinement.attribute_id)?;
                Some(facet_group(kind, state, refinement, pathname))
            })
            .collect()
    }

    pub fn view(
        &self,
        state: &SearchState,
        refinements: &[Refinement],
        pathname: &str,
    ) -> RefinementView {
        let selected = selected_refinements(state, refinements, pathname);
        let clear_all_href = (!selected.is_empty()).then(|| clear_all_href(pathname));
        RefinementView {
            expanded: self.expanded_indexes(refinements),
            groups: self.facet_groups(state, refinements, pathname),
            selected,
            clear_all_href,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FacetEntry {
    pub label: String,
    pub value: String,
    pub hit_count: u64,
    pub selected: bool,
    pub href: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FacetGroup {
    pub attribute_id: String,
    pub label: String,
    pub kind: DisplayKind,
    pub entries: Vec<FacetEntry>,
}

/// A selected refinement value with the link that removes it.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRefinement {
    pub attribute_id: String,
    pub label: String,
    pub value: String,
    pub href: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefinementView {
    pub expanded: Vec<usize>,
    pub groups: Vec<FacetGroup>,
    pub selected: Vec<SelectedRefinement>,
    pub clear_all_href: Option<String>,
}

fn toggle_href(state: &SearchState, toggle: RefinementToggle, pathname: &str) -> String {
    search_params::encode(
        state,
        &EncodeOptions::with_path().toggling(toggle),
        pathname,
    )
}

fn facet_group(
    kind: &DisplayKind,
    state: &SearchState,
    refinement: &Refinement,
    pathname: &str,
) -> FacetGroup {
    let attribute_id = refinement.attribute_id.as_str();

    let entries = match kind {
        DisplayKind::Checkbox => {
            let selected = state.refine.contains_key(attribute_id);
            vec![FacetEntry {
                label: refinement.label.clone(),
                value: PRESENCE_VALUE.to_string(),
                hit_count: refinement.values.iter().map(|v| v.hit_count).sum(),
                selected,
                href: toggle_href(state, RefinementToggle::presence(attribute_id), pathname),
            }]
        }
        DisplayKind::Link => refinement
            .values
            .iter()
            .map(|option| FacetEntry {
                label: option.label.clone(),
                value: option.value.clone(),
                hit_count: option.hit_count,
                selected: state.is_selected(attribute_id, &option.value),
                href: format!("/category/{}", encode_component(&option.value)),
            })
            .collect(),
        DisplayKind::Swatch { .. } | DisplayKind::Radio => refinement
            .values
            .iter()
            .filter(|option| option.hit_count > 0)
            .map(|option| FacetEntry {
                label: option.label.clone(),
                value: option.value.clone(),
                hit_count: option.hit_count,
                selected: state.is_selected(attribute_id, &option.value),
                href: toggle_href(
                    state,
                    RefinementToggle::new(attribute_id, option.value.clone()),
                    pathname,
                ),
            })
            .collect(),
    };

    FacetGroup {
        attribute_id: attribute_id.to_string(),
        label: refinement.label.clone(),
        kind: kind.clone(),
        entries,
    }
}

/// Chips for every selected value that the refinement list can label.
///
/// Selections naming an attribute or value missing from `refinements` are
/// not shown.
pub fn selected_refinements(
    state: &SearchState,
    refinements: &[Refinement],
    pathname: &str,
) -> Vec<SelectedRefinement> {
    let mut chips = Vec::new();
    for (attribute_id, selection) in &state.refine {
        let Some(refinement) = refinements.iter().find(|r| &r.attribute_id == attribute_id) else {
            log::debug!("no refinement metadata for selected attribute {attribute_id}");
            continue;
        };

        chips.extend(
            refinement
                .values
                .iter()
                .filter(|option| selection.contains(&option.value))
                .map(|option| SelectedRefinement {
                    attribute_id: attribute_id.clone(),
                    label: option.label.clone(),
                    value: option.value.clone(),
                    href: toggle_href(
                        state,
                        RefinementToggle::new(attribute_id.clone(), option.value.clone()),
                        pathname,
                    ),
                }),
        );
    }
    chips
}

pub fn clear_all_href(pathname: &str) -> String {
    pathname.to_string()
}
