//! Scope Catalog - product templates for the phase picker
//!
//! Provides:
//! - The product/project template data model
//! - Icon resolution with a total fallback
//! - Grouping of templates into labelled picker sections
//! - Direct lookups by key and project applicability
//!
//! # Example
//!
//! ```rust
//! use scope_catalog::{categorize, ProductCategory, ProductTemplate};
//!
//! let templates = vec![
//!     ProductTemplate::new(1, "Crowd Testing").with_category("qa"),
//!     ProductTemplate::new(2, "Prototype").with_category("dev").hidden(),
//! ];
//! let categories = vec![ProductCategory::new("qa", "Quality")];
//!
//! let sections = categorize(&templates, Some(&categories));
//! assert_eq!(sections.len(), 1);
//! assert_eq!(sections[0].label, "Quality");
//! ```

#![warn(unreachable_pub)]

pub mod catalog;
pub mod categorize;
pub mod icon;
pub mod template;

pub use catalog::{find_by_key, find_project_template, project_product_templates};
pub use categorize::{categorize, CategoryBucket, TemplateCard, TemplateCategorizer};
pub use icon::{resolve_icon, IconRegistry, IconResolver, ProductIcon};
pub use template::{
    PhaseProduct, ProductCategory, ProductTemplate, ProjectTemplate, TemplateId, TemplatePhase,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
