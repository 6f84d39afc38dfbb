//! Catalog data model
//!
//! Product templates are the selectable units of work ("phases") a user can
//! add to a project. Project templates describe which product templates a
//! project of a given kind is built from.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Product template identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub u64);

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A selectable product template
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductTemplate {
    /// Identity
    pub id: TemplateId,
    /// Preferred activation key
    pub key: Option<String>,
    /// Legacy activation key, used when `key` is absent
    pub product_key: Option<String>,
    /// Display name
    pub name: String,
    /// Short description
    pub info: Option<String>,
    /// Long description, used when `info` is absent
    pub details: Option<String>,
    /// Icon identifier or legacy relative asset path
    pub icon: Option<String>,
    /// Category key
    pub category: Option<String>,
    /// Excluded from selection
    #[serde(deserialize_with = "null_as_false")]
    pub disabled: bool,
    /// Excluded from selection, still reachable by direct reference
    #[serde(deserialize_with = "null_as_false")]
    pub hidden: bool,
}

impl ProductTemplate {
    /// Create a minimal template
    #[inline]
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: TemplateId(id),
            name: name.into(),
            ..Self::default()
        }
    }

    /// With activation key
    #[inline]
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// With legacy product key
    #[inline]
    #[must_use]
    pub fn with_product_key(mut self, key: impl Into<String>) -> Self {
        self.product_key = Some(key.into());
        self
    }

    /// With category key
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// With icon identifier
    #[inline]
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// With short description
    #[inline]
    #[must_use]
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Mark disabled
    #[inline]
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Mark hidden
    #[inline]
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Key used to activate this template: `key`, else `productKey`
    #[must_use]
    pub fn activation_key(&self) -> Option<&str> {
        non_empty(self.key.as_deref()).or_else(|| non_empty(self.product_key.as_deref()))
    }

    /// Description shown on the card: `info`, else `details`
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        non_empty(self.info.as_deref()).or_else(|| non_empty(self.details.as_deref()))
    }

    /// Category key, empty when unset
    #[inline]
    #[must_use]
    pub fn category_key(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Whether the template may be offered for selection
    #[inline]
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !(self.disabled || self.hidden)
    }

    /// Whether `key` addresses this template
    #[must_use]
    pub fn answers_to(&self, key: &str) -> bool {
        !key.is_empty()
            && (self.key.as_deref() == Some(key) || self.product_key.as_deref() == Some(key))
    }
}

/// Display metadata for a category key
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductCategory {
    /// Identity
    pub key: String,
    /// Label shown above the category's cards; empty falls back to `key`
    pub display_name: String,
}

impl ProductCategory {
    /// Create new category
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
        }
    }
}

/// Product reference inside a project template phase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhaseProduct {
    /// Referenced product template id
    pub id: Option<TemplateId>,
    /// Referenced product key
    pub product_key: Option<String>,
}

/// Phase of a project template
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplatePhase {
    /// Display name
    pub name: String,
    /// Products delivered in this phase
    pub products: Vec<PhaseProduct>,
}

/// Project template: the blueprint a project was created from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectTemplate {
    /// Identity
    pub id: TemplateId,
    /// Template key
    pub key: String,
    /// Display name
    pub name: String,
    /// Category key
    pub category: Option<String>,
    /// Phases keyed by phase key, in declaration order
    pub phases: IndexMap<String, TemplatePhase>,
}

impl ProjectTemplate {
    /// Whether any phase references `template`
    #[must_use]
    pub fn references(&self, template: &ProductTemplate) -> bool {
        self.phases
            .values()
            .flat_map(|phase| phase.products.iter())
            .any(|product| {
                product.id == Some(template.id)
                    || product
                        .product_key
                        .as_deref()
                        .is_some_and(|key| template.answers_to(key))
            })
    }
}

/// Catalog flags are sometimes sent as `null`
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_key_prefers_key() {
        let t = ProductTemplate::new(1, "App")
            .with_key("app")
            .with_product_key("legacy-app");
        assert_eq!(t.activation_key(), Some("app"));

        let legacy = ProductTemplate::new(2, "Web").with_product_key("website");
        assert_eq!(legacy.activation_key(), Some("website"));

        let empty_key = ProductTemplate::new(3, "QA")
            .with_key("")
            .with_product_key("qa");
        assert_eq!(empty_key.activation_key(), Some("qa"));
    }

    #[test]
    fn description_falls_back_to_details() {
        let mut t = ProductTemplate::new(1, "App");
        t.details = Some("long".to_string());
        assert_eq!(t.description(), Some("long"));

        let t = t.with_info("short");
        assert_eq!(t.description(), Some("short"));
    }

    #[test]
    fn selectability() {
        assert!(ProductTemplate::new(1, "a").is_selectable());
        assert!(!ProductTemplate::new(1, "a").disabled().is_selectable());
        assert!(!ProductTemplate::new(1, "a").hidden().is_selectable());
    }

    #[test]
    fn deserializes_wire_shape() {
        let json = r#"{
            "id": 7,
            "productKey": "generic_dev",
            "name": "Development",
            "details": "Build it",
            "icon": "../../assets/icons/product-dev-other.svg",
            "category": "dev",
            "hidden": true
        }"#;
        let t: ProductTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, TemplateId(7));
        assert_eq!(t.activation_key(), Some("generic_dev"));
        assert!(t.hidden);
        assert!(!t.disabled);
    }

    #[test]
    fn null_flags_read_as_false() {
        let json = r#"{"id": 8, "name": "QA", "disabled": null, "hidden": null}"#;
        let t: ProductTemplate = serde_json::from_str(json).unwrap();
        assert!(!t.disabled);
        assert!(!t.hidden);
        assert!(t.is_selectable());
    }

    #[test]
    fn category_without_display_name_deserializes() {
        let categories: Vec<ProductCategory> =
            serde_json::from_str(r#"[{"key": "qa"}]"#).unwrap();
        assert_eq!(categories, vec![ProductCategory::new("qa", "")]);
    }

    #[test]
    fn project_template_references_by_key_or_id() {
        let mut tpl = ProjectTemplate::default();
        tpl.phases.insert(
            "phase-1".to_string(),
            TemplatePhase {
                name: "Design".to_string(),
                products: vec![
                    PhaseProduct {
                        id: None,
                        product_key: Some("wireframes".to_string()),
                    },
                    PhaseProduct {
                        id: Some(TemplateId(9)),
                        product_key: None,
                    },
                ],
            },
        );

        assert!(tpl.references(&ProductTemplate::new(1, "w").with_key("wireframes")));
        assert!(tpl.references(&ProductTemplate::new(9, "x")));
        assert!(!tpl.references(&ProductTemplate::new(2, "y").with_key("other")));
    }
}
