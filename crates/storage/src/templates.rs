//! In-memory pose template catalog seeded at startup.

use std::collections::HashMap;

use posewarp_core::collaborators::TemplateCatalog;
use posewarp_core::pose::PoseTemplate;

/// Catalog holding the built-in pose templates.
///
/// Templates are keyed by id; listing is category-filtered and paginated
/// with 1-based page numbers.
pub struct SeededTemplateCatalog {
    templates: Vec<PoseTemplate>,
}

impl SeededTemplateCatalog {
    pub fn new() -> Self {
        Self {
            templates: vec![standing(), sitting(), hand_raised()],
        }
    }

    fn filtered<'a>(
        &'a self,
        category: Option<&'a str>,
    ) -> impl Iterator<Item = &'a PoseTemplate> + 'a {
        self.templates
            .iter()
            .filter(move |t| category.map_or(true, |c| t.category == c))
    }
}

impl Default for SeededTemplateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCatalog for SeededTemplateCatalog {
    fn list(&self, category: Option<&str>, page: usize, limit: usize) -> Vec<PoseTemplate> {
        let start = page.saturating_sub(1).saturating_mul(limit);
        self.filtered(category)
            .skip(start)
            .take(limit)
            .cloned()
            .collect()
    }

    fn get(&self, template_id: &str) -> Option<PoseTemplate> {
        self.templates.iter().find(|t| t.id == template_id).cloned()
    }

    fn count(&self, category: Option<&str>) -> usize {
        self.filtered(category).count()
    }
}

// ---------------------------------------------------------------------------
// Seeded templates
// ---------------------------------------------------------------------------

fn keypoints(entries: &[(&str, [f32; 2])]) -> HashMap<String, [f32; 2]> {
    entries
        .iter()
        .map(|&(name, point)| (name.to_string(), point))
        .collect()
}

fn standing() -> PoseTemplate {
    PoseTemplate {
        id: "tpl_standing_01".to_string(),
        name: "Basic standing pose".to_string(),
        category: "standing".to_string(),
        thumbnail_url: "/templates/standing_01.jpg".to_string(),
        description: "A natural standing pose suitable for most scenes".to_string(),
        keypoints: keypoints(&[
            ("nose", [0.5, 0.2]),
            ("left_shoulder", [0.4, 0.3]),
            ("right_shoulder", [0.6, 0.3]),
            ("left_elbow", [0.3, 0.4]),
            ("right_elbow", [0.7, 0.4]),
            ("left_wrist", [0.3, 0.5]),
            ("right_wrist", [0.7, 0.5]),
            ("left_hip", [0.45, 0.6]),
            ("right_hip", [0.55, 0.6]),
            ("left_knee", [0.45, 0.75]),
            ("right_knee", [0.55, 0.75]),
            ("left_ankle", [0.45, 0.9]),
            ("right_ankle", [0.55, 0.9]),
        ]),
    }
}

fn sitting() -> PoseTemplate {
    PoseTemplate {
        id: "tpl_sitting_01".to_string(),
        name: "Basic sitting pose".to_string(),
        category: "sitting".to_string(),
        thumbnail_url: "/templates/sitting_01.jpg".to_string(),
        description: "A relaxed sitting pose for office and study scenes".to_string(),
        keypoints: keypoints(&[
            ("nose", [0.5, 0.2]),
            ("left_shoulder", [0.4, 0.3]),
            ("right_shoulder", [0.6, 0.3]),
            ("left_elbow", [0.3, 0.4]),
            ("right_elbow", [0.7, 0.4]),
            ("left_wrist", [0.3, 0.5]),
            ("right_wrist", [0.7, 0.5]),
            ("left_hip", [0.45, 0.6]),
            ("right_hip", [0.55, 0.6]),
            ("left_knee", [0.4, 0.7]),
            ("right_knee", [0.6, 0.7]),
            ("left_ankle", [0.35, 0.8]),
            ("right_ankle", [0.65, 0.8]),
        ]),
    }
}

fn hand_raised() -> PoseTemplate {
    PoseTemplate {
        id: "tpl_hand_raised_01".to_string(),
        name: "Raised hand pose".to_string(),
        category: "action".to_string(),
        thumbnail_url: "/templates/hand_raised_01.jpg".to_string(),
        description: "One hand raised, suitable for interactive scenes".to_string(),
        keypoints: keypoints(&[
            ("nose", [0.5, 0.2]),
            ("left_shoulder", [0.4, 0.3]),
            ("right_shoulder", [0.6, 0.3]),
            ("left_elbow", [0.3, 0.4]),
            ("right_elbow", [0.7, 0.2]),
            ("left_wrist", [0.3, 0.5]),
            ("right_wrist", [0.7, 0.1]),
            ("left_hip", [0.45, 0.6]),
            ("right_hip", [0.55, 0.6]),
            ("left_knee", [0.45, 0.75]),
            ("right_knee", [0.55, 0.75]),
            ("left_ankle", [0.45, 0.9]),
            ("right_ankle", [0.55, 0.9]),
        ]),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Test: the three built-in templates are present
    // -----------------------------------------------------------------------

    #[test]
    fn catalog_seeds_three_templates() {
        let catalog = SeededTemplateCatalog::new();
        assert_eq!(catalog.count(None), 3);
        assert!(catalog.get("tpl_standing_01").is_some());
        assert!(catalog.get("tpl_sitting_01").is_some());
        assert!(catalog.get("tpl_hand_raised_01").is_some());
        assert!(catalog.get("tpl_unknown").is_none());
    }

    // -----------------------------------------------------------------------
    // Test: category filter
    // -----------------------------------------------------------------------

    #[test]
    fn list_filters_by_category() {
        let catalog = SeededTemplateCatalog::new();

        let action = catalog.list(Some("action"), 1, 10);
        assert_eq!(action.len(), 1);
        assert_eq!(action[0].id, "tpl_hand_raised_01");
        assert_eq!(catalog.count(Some("action")), 1);
        assert_eq!(catalog.count(Some("unknown")), 0);
    }

    // -----------------------------------------------------------------------
    // Test: pagination is 1-based with empty overflow pages
    // -----------------------------------------------------------------------

    #[test]
    fn list_paginates_from_page_one() {
        let catalog = SeededTemplateCatalog::new();

        let first = catalog.list(None, 1, 2);
        let second = catalog.list(None, 2, 2);
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 1);
        assert!(catalog.list(None, 3, 2).is_empty());
    }

    // -----------------------------------------------------------------------
    // Test: template keypoints are normalized
    // -----------------------------------------------------------------------

    #[test]
    fn seeded_keypoints_are_normalized() {
        let catalog = SeededTemplateCatalog::new();
        for template in catalog.list(None, 1, 10) {
            assert!(!template.keypoints.is_empty());
            for (name, [x, y]) in &template.keypoints {
                assert!((0.0..=1.0).contains(x), "{}: {name}", template.id);
                assert!((0.0..=1.0).contains(y), "{}: {name}", template.id);
            }
        }
    }
}
