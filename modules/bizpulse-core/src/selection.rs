//! Selection and active-surface state.
//!
//! Two independent cells: which record (if any) is selected, and which
//! surface is showing. Every transition is total.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    #[default]
    Map,
    List,
}

impl Surface {
    pub fn toggled(self) -> Self {
        match self {
            Surface::Map => Surface::List,
            Surface::List => Surface::Map,
        }
    }
}

impl std::str::FromStr for Surface {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "map" => Ok(Surface::Map),
            "list" => Ok(Surface::List),
            other => Err(format!("unknown surface: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    selected: Option<String>,
    surface: Surface,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Select a record by key. Selection is shown on the map surface, so
    /// selecting from the list switches to the map. An unknown key clears
    /// the selection and leaves the surface alone.
    pub fn select(&mut self, key: &str, catalog: &Catalog) {
        if !catalog.contains(key) {
            tracing::debug!(key, "Selection key not in catalog, clearing");
            self.selected = None;
            return;
        }
        self.selected = Some(key.to_string());
        if self.surface == Surface::List {
            self.surface = Surface::Map;
        }
    }

    pub fn dismiss(&mut self) {
        self.selected = None;
    }

    pub fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }

    /// Drop the selection if its record is no longer in `catalog`.
    pub fn revalidate(&mut self, catalog: &Catalog) {
        if let Some(key) = &self.selected {
            if !catalog.contains(key) {
                self.selected = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizpulse_common::BusinessRecord;

    fn catalog() -> Catalog {
        Catalog::new(
            ["a", "b"]
                .iter()
                .map(|k| BusinessRecord {
                    location_account: k.to_string(),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[test]
    fn starts_on_map_with_nothing_selected() {
        let view = ViewState::new();
        assert_eq!(view.selected_key(), None);
        assert_eq!(view.surface(), Surface::Map);
    }

    #[test]
    fn selecting_from_list_switches_to_map() {
        let catalog = catalog();
        let mut view = ViewState::new();
        view.set_surface(Surface::List);
        view.select("a", &catalog);
        assert_eq!(view.selected_key(), Some("a"));
        assert_eq!(view.surface(), Surface::Map);
    }

    #[test]
    fn unknown_key_clears_selection() {
        let catalog = catalog();
        let mut view = ViewState::new();
        view.select("a", &catalog);
        view.set_surface(Surface::List);
        view.select("missing", &catalog);
        assert_eq!(view.selected_key(), None);
        assert_eq!(view.surface(), Surface::List);
    }

    #[test]
    fn switching_surface_keeps_selection() {
        let catalog = catalog();
        let mut view = ViewState::new();
        view.select("b", &catalog);
        view.set_surface(Surface::List);
        assert_eq!(view.selected_key(), Some("b"));
        view.set_surface(view.surface().toggled());
        assert_eq!(view.surface(), Surface::Map);
        assert_eq!(view.selected_key(), Some("b"));
    }

    #[test]
    fn dismiss_and_revalidate() {
        let mut view = ViewState::new();
        view.select("a", &catalog());
        view.dismiss();
        assert_eq!(view.selected_key(), None);

        view.select("a", &catalog());
        view.revalidate(&Catalog::empty());
        assert_eq!(view.selected_key(), None);
    }

    #[test]
    fn surface_parses_from_path_segment() {
        assert_eq!("list".parse::<Surface>(), Ok(Surface::List));
        assert!("grid".parse::<Surface>().is_err());
    }
}
