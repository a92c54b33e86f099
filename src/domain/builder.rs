//! Builds in-memory hierarchy trees from normalized descriptions.

use serde_json::Value;
use tracing::instrument;

use crate::domain::arena::HierarchyArena;
use crate::domain::blueprints::default_rig_hierarchy;
use crate::domain::description::{Description, NodeDesc};
use crate::domain::error::DomainResult;

/// Constructs hierarchy arenas from descriptions, one arena per root.
///
/// Bare-string descriptions instantiate the builder's template with the
/// root renamed; the template defaults to the stock rig hierarchy.
pub struct HierarchyBuilder {
    template: NodeDesc,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self {
            template: default_rig_hierarchy(),
        }
    }

    pub fn with_template(template: NodeDesc) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &NodeDesc {
        &self.template
    }

    /// Parses a literal value and builds it in one step.
    #[instrument(level = "debug", skip(self, value))]
    pub fn build_from_value(&self, value: &Value) -> DomainResult<Vec<HierarchyArena>> {
        let description = Description::parse(value)?;
        self.build_object_tree(&description)
    }

    /// Builds one arena per description root. Same description, same shape:
    /// names, child order, and depth are fully determined by the input.
    #[instrument(level = "debug", skip(self, description))]
    pub fn build_object_tree(&self, description: &Description) -> DomainResult<Vec<HierarchyArena>> {
        let trees = match description {
            Description::TemplateRoot(name) => {
                let mut root = self.template.clone();
                root.name = name.clone();
                vec![self.build_tree(&root)]
            }
            Description::Nodes(nodes) => nodes.iter().map(|n| self.build_tree(n)).collect(),
        };
        Ok(trees)
    }

    fn build_tree(&self, root: &NodeDesc) -> HierarchyArena {
        let mut tree = HierarchyArena::new();
        let mut stack = vec![(root, None)];

        while let Some((desc, parent_idx)) = stack.pop() {
            let current_idx = tree.insert_node(desc.name.clone(), parent_idx);
            // Reverse push so siblings pop (and attach) in input order
            for child in desc.children.iter().rev() {
                stack.push((child, Some(current_idx)));
            }
        }

        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_root_is_renamed() {
        let builder = HierarchyBuilder::new();
        let trees = builder
            .build_object_tree(&Description::TemplateRoot("MyRig".to_string()))
            .unwrap();
        assert_eq!(trees.len(), 1);
        let root = trees[0].root().unwrap();
        assert_eq!(trees[0].name(root), Some("MyRig"));
        // Template body is untouched
        assert!(trees[0].get_child_by_name(root, "GLOBAL_MOVE").is_some());
    }

    #[test]
    fn custom_template_is_used() {
        let builder = HierarchyBuilder::with_template(NodeDesc::branch(
            "Anything",
            vec![NodeDesc::leaf("ONLY")],
        ));
        let trees = builder
            .build_object_tree(&Description::TemplateRoot("Tiny".to_string()))
            .unwrap();
        let root = trees[0].root().unwrap();
        assert_eq!(trees[0].name(root), Some("Tiny"));
        assert_eq!(trees[0].children(root).len(), 1);
    }
}
