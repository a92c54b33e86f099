/*
Workaround for error: https://doc.rust-lang.org/error_codes/E0116.html
Cannot define inherent `impl` for a type outside of the crate where the type is defined

define a trait that has the desired associated functions/types/constants and implement the trait for the type in question
*/
use generational_arena::Index;
use termtree::Tree;

use crate::domain::HierarchyArena;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for HierarchyArena {
    fn to_tree_string(&self) -> Tree<String> {
        if let Some(root_idx) = self.root() {
            let mut tree = Tree::new(
                self.name(root_idx)
                    .unwrap_or("<stale root>")
                    .to_string(),
            );

            fn build_tree(arena: &HierarchyArena, node_idx: Index, parent_tree: &mut Tree<String>) {
                for &child_idx in arena.children(node_idx) {
                    if let Some(child) = arena.get_node(child_idx) {
                        let mut child_tree = Tree::new(child.name.clone());
                        build_tree(arena, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }

            build_tree(self, root_idx, &mut tree);
            tree
        } else {
            Tree::new("Empty tree".to_string())
        }
    }
}
