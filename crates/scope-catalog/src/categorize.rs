//! Grouping of product templates into picker sections
//!
//! Sections appear in the order their category is first seen among the
//! selectable templates; cards keep catalog order inside a section.

use crate::icon::{IconResolver, ProductIcon};
use crate::template::{ProductCategory, ProductTemplate, TemplateId};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;

/// One pickable template, ready to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateCard {
    /// Source template
    pub template_id: TemplateId,
    /// Resolved icon
    pub icon: ProductIcon,
    /// Card title
    pub title: String,
    /// Card description
    pub description: Option<String>,
    /// Key passed back when the card is picked
    pub activation_key: Option<String>,
}

impl TemplateCard {
    fn from_template(template: &ProductTemplate, resolver: &IconResolver) -> Self {
        Self {
            template_id: template.id,
            icon: resolver.resolve(template.icon.as_deref()),
            title: template.name.clone(),
            description: template.description().map(str::to_string),
            activation_key: template.activation_key().map(str::to_string),
        }
    }
}

/// Labelled group of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBucket {
    /// Category key, empty for uncategorized templates
    pub key: String,
    /// Section label
    pub label: String,
    /// Cards in catalog order
    pub items: Vec<TemplateCard>,
}

impl CategoryBucket {
    /// Template ids in this bucket, in order
    #[must_use]
    pub fn template_ids(&self) -> Vec<TemplateId> {
        self.items.iter().map(|card| card.template_id).collect()
    }
}

/// Builds picker sections from a template catalog
#[derive(Debug, Clone, Default)]
pub struct TemplateCategorizer {
    resolver: IconResolver,
}

impl TemplateCategorizer {
    /// Create categorizer with a custom icon resolver
    #[inline]
    #[must_use]
    pub fn new(resolver: IconResolver) -> Self {
        Self { resolver }
    }

    /// Partition selectable templates into labelled buckets
    ///
    /// Disabled and hidden templates are skipped. A category without a
    /// matching display name is labelled with its raw key.
    #[must_use]
    pub fn categorize(
        &self,
        templates: &[ProductTemplate],
        categories: Option<&[ProductCategory]>,
    ) -> Vec<CategoryBucket> {
        let names: HashMap<&str, &str> = categories
            .unwrap_or_default()
            .iter()
            .map(|c| (c.key.as_str(), c.display_name.as_str()))
            .collect();

        let mut buckets: IndexMap<&str, Vec<TemplateCard>> = IndexMap::new();
        for template in templates.iter().filter(|t| t.is_selectable()) {
            buckets
                .entry(template.category_key())
                .or_default()
                .push(TemplateCard::from_template(template, &self.resolver));
        }

        buckets
            .into_iter()
            .map(|(key, items)| {
                let label = names
                    .get(key)
                    .copied()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(key);
                CategoryBucket {
                    key: key.to_string(),
                    label: label.to_string(),
                    items,
                }
            })
            .collect()
    }
}

/// Categorize with the built-in icon registry
#[must_use]
pub fn categorize(
    templates: &[ProductTemplate],
    categories: Option<&[ProductCategory]>,
) -> Vec<CategoryBucket> {
    TemplateCategorizer::default().categorize(templates, categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mixed_catalog_groups_and_labels() {
        let templates = vec![
            ProductTemplate::new(1, "Crowd Testing").with_category("qa"),
            ProductTemplate::new(2, "Health Check").with_category("qa").disabled(),
            ProductTemplate::new(3, "Other"),
        ];
        let categories = vec![ProductCategory::new("qa", "Quality")];

        let buckets = categorize(&templates, Some(&categories));

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "Quality");
        assert_eq!(buckets[0].template_ids(), vec![TemplateId(1)]);
        assert_eq!(buckets[1].label, "");
        assert_eq!(buckets[1].template_ids(), vec![TemplateId(3)]);
    }

    #[test]
    fn section_order_follows_first_appearance() {
        let templates = vec![
            ProductTemplate::new(1, "a").with_category("dev"),
            ProductTemplate::new(2, "b").with_category("design"),
            ProductTemplate::new(3, "c").with_category("dev"),
        ];
        let categories = vec![
            ProductCategory::new("design", "Design"),
            ProductCategory::new("dev", "Development"),
        ];

        let buckets = categorize(&templates, Some(&categories));
        let labels: Vec<_> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Development", "Design"]);
        assert_eq!(buckets[0].template_ids(), vec![TemplateId(1), TemplateId(3)]);
    }

    #[test]
    fn missing_categories_use_raw_key() {
        let templates = vec![ProductTemplate::new(1, "a").with_category("chatbot")];
        let buckets = categorize(&templates, None);
        assert_eq!(buckets[0].label, "chatbot");

        let blank = vec![ProductCategory::new("chatbot", "")];
        let buckets = categorize(&templates, Some(&blank));
        assert_eq!(buckets[0].label, "chatbot");
    }

    #[test]
    fn category_payload_without_display_name_uses_key() {
        let categories: Vec<ProductCategory> =
            serde_json::from_str(r#"[{"key": "qa"}]"#).unwrap();
        let templates = vec![ProductTemplate::new(1, "Crowd Testing").with_category("qa")];

        let buckets = categorize(&templates, Some(&categories));
        assert_eq!(buckets[0].label, "qa");
    }

    #[test]
    fn empty_category_collapses_with_unset() {
        let templates = vec![
            ProductTemplate::new(1, "a").with_category(""),
            ProductTemplate::new(2, "b"),
        ];
        let buckets = categorize(&templates, None);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].key, "");
        assert_eq!(buckets[0].template_ids(), vec![TemplateId(1), TemplateId(2)]);
    }

    #[test]
    fn cards_carry_render_data() {
        let mut template = ProductTemplate::new(4, "Wireframes")
            .with_product_key("wireframes")
            .with_icon("../../assets/icons/product-design-wireframes.svg");
        template.details = Some("Low fidelity layouts".to_string());

        let buckets = categorize(&[template], None);
        let card = &buckets[0].items[0];
        assert_eq!(card.title, "Wireframes");
        assert_eq!(card.icon, ProductIcon::DesignWireframes);
        assert_eq!(card.description.as_deref(), Some("Low fidelity layouts"));
        assert_eq!(card.activation_key.as_deref(), Some("wireframes"));
    }
}
