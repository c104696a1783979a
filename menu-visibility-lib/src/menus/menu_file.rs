//! Loading menus and their per-item settings from TOML or JSON files.

use super::legacy::{parse_allowed_countries, parse_commerce, parse_language, parse_visibility};
use crate::Result;
use crate::visibility::{Menu, MenuItem, Rule};
use camino::Utf8Path;
use ohno::IntoAppError;
use serde::Deserialize;
use std::fs;
use strum::{Display, EnumString};

const LOG_TARGET: &str = "   menus";

/// On-disk encoding of a menu file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MenuFormat {
    Toml,
    Json,
}

impl MenuFormat {
    /// Pick the format from a file extension, defaulting to TOML.
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        path.extension().and_then(|ext| ext.parse().ok()).unwrap_or(Self::Toml)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MenuFile {
    #[serde(default, rename = "menu")]
    menus: Vec<MenuEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MenuEntry {
    name: String,

    #[serde(default, rename = "item")]
    items: Vec<ItemEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemEntry {
    id: u64,
    title: String,

    #[serde(default)]
    visibility: Option<String>,

    #[serde(default)]
    language: Option<String>,

    #[serde(default)]
    allowed_countries: Option<Countries>,

    #[serde(default)]
    commerce: Option<String>,
}

/// Country allow-lists are stored either as "KE, US" or as a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Countries {
    Text(String),
    List(Vec<String>),
}

impl ItemEntry {
    fn into_item(self, default_visibility: &str) -> MenuItem {
        let visibility = self
            .visibility
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default_visibility);

        let rule = Rule {
            primary: parse_visibility(visibility),
            language: self.language.as_deref().and_then(parse_language),
            allowed_countries: match self.allowed_countries {
                Some(Countries::Text(text)) => parse_allowed_countries([text]),
                Some(Countries::List(list)) => parse_allowed_countries(list),
                None => None,
            },
            commerce: self.commerce.as_deref().and_then(parse_commerce),
        };

        MenuItem::new(self.id, self.title, rule)
    }
}

/// Parse menus from text.
///
/// Items without a visibility setting get `default_visibility` instead.
///
/// # Errors
///
/// Returns an error if the text is not a valid menu document in the given format
pub fn parse_menus(text: &str, format: MenuFormat, default_visibility: &str) -> Result<Vec<Menu>> {
    let file: MenuFile = match format {
        MenuFormat::Toml => toml::from_str(text).into_app_err("parsing TOML menu document")?,
        MenuFormat::Json => serde_json::from_str(text).into_app_err("parsing JSON menu document")?,
    };

    Ok(file
        .menus
        .into_iter()
        .map(|menu| {
            let items = menu.items.into_iter().map(|item| item.into_item(default_visibility)).collect();
            Menu::new(menu.name, items)
        })
        .collect())
}

/// Load menus from a TOML or JSON file, chosen by extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn load_menus(path: &Utf8Path, default_visibility: &str) -> Result<Vec<Menu>> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading menu file '{path}'"))?;
    let menus = parse_menus(&text, MenuFormat::from_path(path), default_visibility)
        .into_app_err_with(|| format!("loading menu file '{path}'"))?;

    log::debug!(
        target: LOG_TARGET,
        "Loaded {} menu(s) with {} item(s) from {path}",
        menus.len(),
        menus.iter().map(|m| m.items.len()).sum::<usize>()
    );

    Ok(menus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::{CommerceRestriction, PrimaryRule};

    const MENUS_TOML: &str = r#"
[[menu]]
name = "primary"

[[menu.item]]
id = 10
title = "Home"

[[menu.item]]
id = 11
title = "Account"
visibility = "logged-in-only"
language = "en"

[[menu.item]]
id = 12
title = "Deals"
allowed_countries = "ke, US"
commerce = "shop-only"

[[menu.item]]
id = 13
title = "Legacy"
visibility = "members-only"

[[menu]]
name = "footer"

[[menu.item]]
id = 20
title = "Imprint"
allowed_countries = ["de", "at"]
"#;

    #[test]
    fn test_parse_toml_menus() {
        let menus = parse_menus(MENUS_TOML, MenuFormat::Toml, "").unwrap();
        assert_eq!(menus.len(), 2);
        assert_eq!(menus[0].name, "primary");
        assert_eq!(menus[0].items.len(), 4);

        let account = &menus[0].items[1];
        assert_eq!(account.rule.primary, PrimaryRule::LoggedInOnly);
        assert_eq!(account.rule.language.as_deref(), Some("en"));

        let deals = &menus[0].items[2];
        assert_eq!(deals.rule.commerce, Some(CommerceRestriction::ShopOnly));
        let countries: Vec<_> = deals.rule.allowed_countries.as_ref().unwrap().iter().cloned().collect();
        assert_eq!(countries, ["KE", "US"]);

        assert_eq!(menus[0].items[3].rule.primary, PrimaryRule::Default);
        assert_eq!(menus[1].items[0].rule.allowed_countries.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_default_visibility_applies_to_unset_items() {
        let menus = parse_menus(MENUS_TOML, MenuFormat::Toml, "logged-out-only").unwrap();
        assert_eq!(menus[0].items[0].rule.primary, PrimaryRule::LoggedOutOnly);
        assert_eq!(menus[0].items[1].rule.primary, PrimaryRule::LoggedInOnly);

        // an explicit but unknown slug is not replaced by the default
        assert_eq!(menus[0].items[3].rule.primary, PrimaryRule::Default);
    }

    #[test]
    fn test_parse_json_menus() {
        let json = r#"{
            "menu": [
                { "name": "main", "item": [
                    { "id": 1, "title": "Shop", "commerce": "product-only", "visibility": "" },
                    { "id": 2, "title": "Mobile", "visibility": "hide-on-mobile" }
                ]}
            ]
        }"#;
        let menus = parse_menus(json, MenuFormat::Json, "").unwrap();
        assert_eq!(menus[0].items.len(), 2);
        assert_eq!(menus[0].items[0].rule.primary, PrimaryRule::Default);
        assert_eq!(menus[0].items[0].rule.commerce, Some(CommerceRestriction::ProductOnly));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let toml = "[[menu]]\nname = \"x\"\n[[menu.item]]\nid = 1\ntitle = \"a\"\ncolour = \"red\"\n";
        assert!(parse_menus(toml, MenuFormat::Toml, "").is_err());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(MenuFormat::from_path(Utf8Path::new("menus.json")), MenuFormat::Json);
        assert_eq!(MenuFormat::from_path(Utf8Path::new("menus.JSON")), MenuFormat::Json);
        assert_eq!(MenuFormat::from_path(Utf8Path::new("menus.toml")), MenuFormat::Toml);
        assert_eq!(MenuFormat::from_path(Utf8Path::new("menus")), MenuFormat::Toml);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_menus_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::try_from(tmp.path().join("menus.toml")).unwrap();
        fs::write(&path, MENUS_TOML).unwrap();

        let menus = load_menus(&path, "").unwrap();
        assert_eq!(menus.len(), 2);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = load_menus(Utf8Path::new("does/not/exist.toml"), "");
        assert!(result.is_err());
    }
}
