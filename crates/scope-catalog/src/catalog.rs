//! Lookups over the template catalogs

use crate::template::{ProductTemplate, ProjectTemplate, TemplateId};

/// Find a product template by activation key
///
/// Direct references reach disabled and hidden templates too.
#[must_use]
pub fn find_by_key<'a>(templates: &'a [ProductTemplate], key: &str) -> Option<&'a ProductTemplate> {
    templates.iter().find(|t| t.answers_to(key))
}

/// Find a project template by id
#[must_use]
pub fn find_project_template(
    templates: &[ProjectTemplate],
    id: TemplateId,
) -> Option<&ProjectTemplate> {
    templates.iter().find(|t| t.id == id)
}

/// Product templates applicable to a project
///
/// Keeps the product templates referenced by any phase of the project's
/// project template, in product catalog order. Empty when the project has no
/// template or the template is not in the catalog.
#[must_use]
pub fn project_product_templates(
    product_templates: &[ProductTemplate],
    project_templates: &[ProjectTemplate],
    project_template_id: Option<TemplateId>,
) -> Vec<ProductTemplate> {
    let Some(project_template) =
        project_template_id.and_then(|id| find_project_template(project_templates, id))
    else {
        return Vec::new();
    };

    product_templates
        .iter()
        .filter(|t| project_template.references(t))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{PhaseProduct, TemplatePhase};

    fn project_template(id: u64, keys: &[&str]) -> ProjectTemplate {
        let mut tpl = ProjectTemplate {
            id: TemplateId(id),
            key: format!("tpl-{id}"),
            ..ProjectTemplate::default()
        };
        tpl.phases.insert(
            "main".to_string(),
            TemplatePhase {
                name: "Main".to_string(),
                products: keys
                    .iter()
                    .map(|k| PhaseProduct {
                        id: None,
                        product_key: Some((*k).to_string()),
                    })
                    .collect(),
            },
        );
        tpl
    }

    #[test]
    fn find_by_key_reaches_hidden_and_disabled() {
        let templates = vec![
            ProductTemplate::new(1, "a").with_key("visible"),
            ProductTemplate::new(2, "b").with_product_key("secret").hidden(),
            ProductTemplate::new(3, "c").with_key("off").disabled(),
        ];
        assert_eq!(find_by_key(&templates, "secret").map(|t| t.id), Some(TemplateId(2)));
        assert_eq!(find_by_key(&templates, "off").map(|t| t.id), Some(TemplateId(3)));
        assert!(find_by_key(&templates, "missing").is_none());
        assert!(find_by_key(&templates, "").is_none());
    }

    #[test]
    fn applicable_templates_keep_catalog_order() {
        let products = vec![
            ProductTemplate::new(1, "a").with_key("design"),
            ProductTemplate::new(2, "b").with_key("dev"),
            ProductTemplate::new(3, "c").with_key("qa"),
        ];
        let projects = vec![project_template(10, &["qa", "design"])];

        let applicable = project_product_templates(&products, &projects, Some(TemplateId(10)));
        let ids: Vec<_> = applicable.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TemplateId(1), TemplateId(3)]);
    }

    #[test]
    fn unknown_project_template_yields_empty() {
        let products = vec![ProductTemplate::new(1, "a").with_key("design")];
        let projects = vec![project_template(10, &["design"])];

        assert!(project_product_templates(&products, &projects, None).is_empty());
        assert!(project_product_templates(&products, &projects, Some(TemplateId(99))).is_empty());
    }
}
