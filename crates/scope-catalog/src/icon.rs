//! Icon resolution for product templates
//!
//! Templates name their icon either by identifier (`product-qa-consulting`)
//! or, in older catalogs, by a relative asset path
//! (`../../assets/icons/product-qa-consulting.svg`). [`IconResolver`] maps
//! both forms onto the closed [`ProductIcon`] set and never fails: anything it
//! does not recognize renders as [`ProductIcon::DEFAULT`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Legacy relative-path form of an icon reference
static LEGACY_ICON_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\.\./)+assets/icons/([^.]+)\.svg").expect("valid icon path regex")
});

static DEFAULT_RESOLVER: Lazy<IconResolver> = Lazy::new(IconResolver::default);

/// Known template icons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum ProductIcon {
    AnalyticsAlgorithmOptimization,
    AnalyticsComputerVision,
    AnalyticsDataExploration,
    AnalyticsPredictiveAnalytics,
    AppApp,
    CatAnalytics,
    CatApp,
    CatChatbot,
    CatDesign,
    CatDevelopment,
    CatQa,
    CatWebsite,
    ChatbotChatbot,
    ChatbotWatson,
    DesignAppVisual,
    DesignInfographic,
    DesignOther,
    DesignWireframes,
    DevFrontEndDev,
    DevIntegration,
    DevOther,
    DevPrototype,
    OtherDesign,
    QaConsulting,
    QaCrowdTesting,
    QaDigitalAccessability,
    QaHealthCheck,
    QaMobilityTesting,
    QaOsAutomation,
    QaWebsitePerformance,
    QaSfdcAccelerator,
    WebsiteWebsite,
    OutlineWorkProject,
}

impl ProductIcon {
    /// Icon used for unknown identifiers
    pub const DEFAULT: ProductIcon = ProductIcon::DevOther;

    /// Every known icon
    pub const ALL: [ProductIcon; 33] = [
        ProductIcon::AnalyticsAlgorithmOptimization,
        ProductIcon::AnalyticsComputerVision,
        ProductIcon::AnalyticsDataExploration,
        ProductIcon::AnalyticsPredictiveAnalytics,
        ProductIcon::AppApp,
        ProductIcon::CatAnalytics,
        ProductIcon::CatApp,
        ProductIcon::CatChatbot,
        ProductIcon::CatDesign,
        ProductIcon::CatDevelopment,
        ProductIcon::CatQa,
        ProductIcon::CatWebsite,
        ProductIcon::ChatbotChatbot,
        ProductIcon::ChatbotWatson,
        ProductIcon::DesignAppVisual,
        ProductIcon::DesignInfographic,
        ProductIcon::DesignOther,
        ProductIcon::DesignWireframes,
        ProductIcon::DevFrontEndDev,
        ProductIcon::DevIntegration,
        ProductIcon::DevOther,
        ProductIcon::DevPrototype,
        ProductIcon::OtherDesign,
        ProductIcon::QaConsulting,
        ProductIcon::QaCrowdTesting,
        ProductIcon::QaDigitalAccessability,
        ProductIcon::QaHealthCheck,
        ProductIcon::QaMobilityTesting,
        ProductIcon::QaOsAutomation,
        ProductIcon::QaWebsitePerformance,
        ProductIcon::QaSfdcAccelerator,
        ProductIcon::WebsiteWebsite,
        ProductIcon::OutlineWorkProject,
    ];

    /// Catalog identifier, also the asset file stem
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ProductIcon::AnalyticsAlgorithmOptimization => "product-analytics-algorithm-optimization",
            ProductIcon::AnalyticsComputerVision => "product-analytics-computer-vision",
            ProductIcon::AnalyticsDataExploration => "product-analytics-data-exploration",
            ProductIcon::AnalyticsPredictiveAnalytics => "product-analytics-predictive-analytics",
            ProductIcon::AppApp => "product-app-app",
            ProductIcon::CatAnalytics => "product-cat-analytics",
            ProductIcon::CatApp => "product-cat-app",
            ProductIcon::CatChatbot => "product-cat-chatbot",
            ProductIcon::CatDesign => "product-cat-design",
            ProductIcon::CatDevelopment => "product-cat-development",
            ProductIcon::CatQa => "product-cat-qa",
            ProductIcon::CatWebsite => "product-cat-website",
            ProductIcon::ChatbotChatbot => "product-chatbot-chatbot",
            ProductIcon::ChatbotWatson => "product-chatbot-watson",
            ProductIcon::DesignAppVisual => "product-design-app-visual",
            ProductIcon::DesignInfographic => "product-design-infographic",
            ProductIcon::DesignOther => "product-design-other",
            ProductIcon::DesignWireframes => "product-design-wireframes",
            ProductIcon::DevFrontEndDev => "product-dev-front-end-dev",
            ProductIcon::DevIntegration => "product-dev-integration",
            ProductIcon::DevOther => "product-dev-other",
            ProductIcon::DevPrototype => "product-dev-prototype",
            ProductIcon::OtherDesign => "product-other-design",
            ProductIcon::QaConsulting => "product-qa-consulting",
            ProductIcon::QaCrowdTesting => "product-qa-crowd-testing",
            ProductIcon::QaDigitalAccessability => "product-qa-digital-accessability",
            ProductIcon::QaHealthCheck => "product-qa-health-check",
            ProductIcon::QaMobilityTesting => "product-qa-mobility-testing",
            ProductIcon::QaOsAutomation => "product-qa-os-automation",
            ProductIcon::QaWebsitePerformance => "product-qa-website-performance",
            ProductIcon::QaSfdcAccelerator => "product-qa-sfdc-accelerator",
            ProductIcon::WebsiteWebsite => "product-website-website",
            ProductIcon::OutlineWorkProject => "tech-32px-outline-work-project",
        }
    }

    /// Style class applied when rendering
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            ProductIcon::AnalyticsAlgorithmOptimization => "icon-analytics-algorithm-optimization",
            ProductIcon::AnalyticsComputerVision => "icon-analytics-computer-vision",
            ProductIcon::AnalyticsDataExploration => "icon-analytics-data-exploration",
            ProductIcon::AnalyticsPredictiveAnalytics => "icon-analytics-predictive-analytics",
            ProductIcon::AppApp => "icon-app-app",
            ProductIcon::CatAnalytics => "icon-cat-analytics",
            ProductIcon::CatApp => "icon-cat-app",
            ProductIcon::CatChatbot => "icon-cat-chatbot",
            ProductIcon::CatDesign => "icon-cat-design",
            ProductIcon::CatDevelopment => "icon-cat-development",
            ProductIcon::CatQa => "icon-cat-qa",
            ProductIcon::CatWebsite => "icon-cat-website",
            ProductIcon::ChatbotChatbot => "icon-chatbot-chatbot",
            ProductIcon::ChatbotWatson => "icon-chatbot-watson",
            ProductIcon::DesignAppVisual => "icon-design-app-visual",
            ProductIcon::DesignInfographic => "icon-design-infographic",
            ProductIcon::DesignOther => "icon-design-other",
            ProductIcon::DesignWireframes => "icon-design-wireframes",
            ProductIcon::DevFrontEndDev => "icon-dev-frontend-dev",
            ProductIcon::DevIntegration => "icon-dev-integration",
            // shares the generic class
            ProductIcon::DevOther | ProductIcon::OtherDesign => "icon-dev-other",
            ProductIcon::DevPrototype => "icon-dev-prototype",
            ProductIcon::QaConsulting => "icon-qa-consulting",
            ProductIcon::QaCrowdTesting => "icon-qa-crowd-testing",
            ProductIcon::QaDigitalAccessability => "icon-qa-digital-accessability",
            ProductIcon::QaHealthCheck => "icon-qa-health-check",
            ProductIcon::QaMobilityTesting => "icon-qa-mobility-testing",
            ProductIcon::QaOsAutomation => "icon-qa-os-automation",
            ProductIcon::QaWebsitePerformance => "icon-qa-website-performance",
            ProductIcon::QaSfdcAccelerator => "icon-qa-sfdc-accelerator",
            ProductIcon::WebsiteWebsite => "icon-website-website",
            ProductIcon::OutlineWorkProject => "icon-outline-work-project",
        }
    }
}

impl Default for ProductIcon {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for ProductIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Lookup table from identifier to icon
#[derive(Debug, Default, Clone)]
pub struct IconRegistry {
    icons: HashMap<String, ProductIcon>,
}

impl IconRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            icons: HashMap::new(),
        }
    }

    /// Create registry with every known icon under its own identifier
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for icon in ProductIcon::ALL {
            registry.register(icon.id(), icon);
        }
        registry
    }

    /// Register an identifier, replacing any previous mapping
    pub fn register(&mut self, id: &str, icon: ProductIcon) {
        self.icons.insert(id.to_string(), icon);
    }

    /// Look up an identifier
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<ProductIcon> {
        self.icons.get(id).copied()
    }

    /// Check if identifier is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.icons.contains_key(id)
    }

    /// Number of registered identifiers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// Maps template icon references to renderable icons
#[derive(Debug, Clone)]
pub struct IconResolver {
    registry: IconRegistry,
    fallback: ProductIcon,
}

impl IconResolver {
    /// Create resolver over a registry
    #[inline]
    #[must_use]
    pub fn new(registry: IconRegistry) -> Self {
        Self {
            registry,
            fallback: ProductIcon::DEFAULT,
        }
    }

    /// Resolve an icon reference
    ///
    /// Legacy asset paths are reduced to their file stem first. Unknown,
    /// empty or absent references resolve to the default icon.
    #[must_use]
    pub fn resolve(&self, reference: Option<&str>) -> ProductIcon {
        let Some(reference) = reference else {
            return self.fallback;
        };

        let id = lookup_key(reference);
        match self.registry.get(id) {
            Some(icon) => icon,
            None => {
                tracing::debug!(reference, "unrecognized template icon, using default");
                self.fallback
            }
        }
    }

    /// Underlying registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &IconRegistry {
        &self.registry
    }
}

impl Default for IconResolver {
    fn default() -> Self {
        Self::new(IconRegistry::with_defaults())
    }
}

/// Resolve with the built-in registry
#[must_use]
pub fn resolve_icon(reference: Option<&str>) -> ProductIcon {
    DEFAULT_RESOLVER.resolve(reference)
}

/// Identifier to look up for a reference: the file stem of a legacy asset
/// path, otherwise the reference itself.
fn lookup_key(reference: &str) -> &str {
    LEGACY_ICON_PATH
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map_or(reference, |m| m.as_str())
}
