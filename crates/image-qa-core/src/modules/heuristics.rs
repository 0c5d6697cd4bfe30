//! Runs the heuristic checks in their fixed order.

use image::DynamicImage;

use super::{BlurConfig, BlurModule, DarknessConfig, DarknessModule, GrayscaleField};
use crate::domain::{Issue, QaModule};

/// Blur then darkness, evaluated on one shared grayscale field.
pub struct HeuristicAnalyzer {
    modules: Vec<Box<dyn QaModule>>,
}

impl HeuristicAnalyzer {
    /// Creates an analyzer with the given check configurations.
    #[must_use]
    pub fn new(blur: BlurConfig, darkness: DarknessConfig) -> Self {
        Self {
            modules: vec![
                Box::new(BlurModule::new(blur)),
                Box::new(DarknessModule::new(darkness)),
            ],
        }
    }

    /// Names of the checks, in evaluation order.
    #[must_use]
    pub fn module_names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Analyzes an image. Every check runs; flagged issues keep check order.
    #[must_use]
    pub fn analyze(&self, image: &DynamicImage) -> Vec<Issue> {
        self.analyze_field(&GrayscaleField::from_image(image))
    }

    /// Analyzes a precomputed grayscale field.
    #[must_use]
    pub fn analyze_field(&self, field: &GrayscaleField) -> Vec<Issue> {
        self.modules.iter().filter_map(|m| m.check(field)).collect()
    }
}

impl Default for HeuristicAnalyzer {
    fn default() -> Self {
        Self::new(BlurConfig::default(), DarknessConfig::default())
    }
}
