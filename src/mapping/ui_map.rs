// Thu Oct 15 2026 - Alex

use crate::classify::StatementKind;
use crate::mapping::MappingError;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const BUILTIN_UI_MAP: &str = include_str!("../../data/ui_field_map.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiElementKind {
    Button,
    Input,
    Checkbox,
    Radio,
    Dropdown,
    Date,
    Tab,
    Subtab,
}

impl UiElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Input => "input",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Dropdown => "dropdown",
            Self::Date => "date",
            Self::Tab => "tab",
            Self::Subtab => "subtab",
        }
    }

    pub fn is_button(self) -> bool {
        matches!(self, Self::Button)
    }

    /// Widgets that hold a value bound to a column.
    pub fn is_field(self) -> bool {
        matches!(self, Self::Input | Self::Checkbox | Self::Radio | Self::Dropdown | Self::Date)
    }

    pub fn is_tab(self) -> bool {
        matches!(self, Self::Tab | Self::Subtab)
    }
}

impl fmt::Display for UiElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiElement {
    pub name: String,
    pub category: String,
    pub kind: UiElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl UiElement {
    pub fn has_binding(&self) -> bool {
        self.field.is_some() || self.table.is_some() || self.action.is_some()
    }
}

/// Hand-authored dictionary of the front end's widgets and the columns
/// behind them. Built once and passed by reference; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiFieldMap {
    elements: Vec<UiElement>,
    #[serde(default)]
    actions: IndexMap<String, Vec<StatementKind>>,
}

impl UiFieldMap {
    pub fn new(elements: Vec<UiElement>, actions: IndexMap<String, Vec<StatementKind>>) -> Result<Self, MappingError> {
        let map = Self { elements, actions };
        map.validate()?;
        Ok(map)
    }

    pub fn builtin() -> Result<Self, MappingError> {
        Self::from_json(BUILTIN_UI_MAP)
    }

    pub fn from_json(json: &str) -> Result<Self, MappingError> {
        let map: UiFieldMap = serde_json::from_str(json)?;
        map.validate()?;
        Ok(map)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let map = Self::from_json(&content)?;
        log::debug!("Loaded {} UI elements from {}", map.elements.len(), path.as_ref().display());
        Ok(map)
    }

    /// The user file when one is given, the embedded dictionary otherwise.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, MappingError> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Self::builtin(),
        }
    }

    fn validate(&self) -> Result<(), MappingError> {
        let mut seen = IndexSet::new();
        for element in &self.elements {
            if element.name.trim().is_empty() {
                return Err(MappingError::Invalid(format!(
                    "element in category '{}' has an empty name",
                    element.category
                )));
            }
            if !seen.insert((element.category.as_str(), element.name.as_str())) {
                return Err(MappingError::Invalid(format!(
                    "duplicate element '{}' in category '{}'",
                    element.name, element.category
                )));
            }
        }
        Ok(())
    }

    pub fn elements(&self) -> &[UiElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn categories(&self) -> IndexSet<&str> {
        self.elements.iter().map(|e| e.category.as_str()).collect()
    }

    /// Statement kinds an action is allowed to pair with; empty for
    /// actions the lookup does not know.
    pub fn kinds_for_action(&self, action: &str) -> &[StatementKind] {
        self.actions.get(action).map(Vec::as_slice).unwrap_or(&[])
    }
}
