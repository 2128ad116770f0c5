use std::collections::HashSet;

use serde::{Deserialize, Serialize};

static BUNDLED_MENU: &str = include_str!("../../data/menu.json");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubMenuItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    /// Price in Rappen; drinks listed as a group have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_rappen: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_items: Vec<SubMenuItem>,
    #[serde(default)]
    pub vegi: bool,
}

impl MenuItem {
    pub fn price_label(&self) -> Option<String> {
        self.price_rappen
            .map(|p| format!("CHF {}.{:02}", p / 100, p % 100))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuSection {
    pub id: String,
    pub name: String,
    pub color: String,
    pub image: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuCatalog {
    pub sections: Vec<MenuSection>,
}

impl MenuCatalog {
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let catalog: MenuCatalog = serde_json::from_str(s)?;
        let mut seen = HashSet::new();
        for section in &catalog.sections {
            if !seen.insert(section.id.as_str()) {
                anyhow::bail!("duplicate menu section: {}", section.id);
            }
            if section.items.is_empty() {
                anyhow::bail!("menu section {} has no items", section.id);
            }
        }
        Ok(catalog)
    }

    /// The menu compiled into the binary.
    pub fn bundled() -> anyhow::Result<Self> {
        Self::from_json(BUNDLED_MENU)
    }

    pub fn section(&self, id: &str) -> Option<&MenuSection> {
        self.sections.iter().find(|s| s.id == id)
    }
}
