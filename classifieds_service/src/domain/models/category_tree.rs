//! In-memory view of the category tree used for hierarchy walks and write validation

use std::collections::{HashMap, HashSet};

use models_classifieds::api::{CategoryNode, CategoryNodeProperty};
use models_classifieds::service::{Category, CategoryPropertySchema, NamedRef};
use thiserror::Error;
use uuid::Uuid;

/// Why a proposed parent was rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("Category cannot be parent of itself.")]
    SelfParent,
    #[error("Circular category hierarchy is not allowed.")]
    Cycle,
    #[error("Select a valid choice. That choice is not one of the available choices.")]
    ParentNotFound,
}

/// Categories indexed by id and by parent.
#[derive(Debug, Default)]
pub struct CategoryTree {
    nodes: HashMap<Uuid, Category>,
    /// children per parent (`None` = roots), ordered by name
    children: HashMap<Option<Uuid>, Vec<Uuid>>,
}

impl CategoryTree {
    pub fn new(categories: Vec<Category>) -> Self {
        let mut sorted = categories;
        sorted.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let mut children: HashMap<Option<Uuid>, Vec<Uuid>> = HashMap::new();
        for category in &sorted {
            children.entry(category.parent_id).or_default().push(category.id);
        }

        let nodes = sorted.into_iter().map(|c| (c.id, c)).collect();

        Self { nodes, children }
    }

    pub fn get(&self, id: Uuid) -> Option<&Category> {
        self.nodes.get(&id)
    }

    /// Children of `parent`, or the roots, ordered by name
    pub fn children_of(&self, parent: Option<Uuid>) -> Vec<&Category> {
        self.children
            .get(&parent)
            .map(|ids| ids.iter().filter_map(|id| self.nodes.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn is_leaf(&self, id: Uuid) -> bool {
        self.children
            .get(&Some(id))
            .is_none_or(|children| children.is_empty())
    }

    /// Path from the root down to `id`, ending with `id` itself.
    ///
    /// Stops at a missing parent, and at a node seen before so corrupt data cannot loop.
    pub fn hierarchy(&self, id: Uuid) -> Vec<NamedRef> {
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self.nodes.get(&id);

        while let Some(category) = current {
            if !visited.insert(category.id) {
                tracing::warn!(category_id = %category.id, "cycle in stored category tree");
                break;
            }
            path.push(NamedRef::new(category.id, category.name.clone()));
            current = category.parent_id.and_then(|p| self.nodes.get(&p));
        }

        path.reverse();
        path
    }

    /// Checks that `parent` may become the parent of category `id`.
    ///
    /// `id` may be a category that is not stored yet.
    pub fn validate_parent(&self, id: Uuid, parent: Option<Uuid>) -> Result<(), HierarchyError> {
        let Some(parent_id) = parent else {
            return Ok(());
        };

        if parent_id == id {
            return Err(HierarchyError::SelfParent);
        }

        let mut visited = HashSet::new();
        let mut current = Some(parent_id);
        while let Some(ancestor_id) = current {
            if ancestor_id == id || !visited.insert(ancestor_id) {
                return Err(HierarchyError::Cycle);
            }
            let ancestor = self
                .nodes
                .get(&ancestor_id)
                .ok_or(HierarchyError::ParentNotFound)?;
            current = ancestor.parent_id;
        }

        Ok(())
    }

    /// Every root with its bindings and nested children
    pub fn nest(&self, schemas: &[CategoryPropertySchema]) -> Vec<CategoryNode> {
        let mut properties: HashMap<Uuid, Vec<CategoryNodeProperty>> = HashMap::new();
        for schema in schemas {
            properties
                .entry(schema.binding.category_id)
                .or_default()
                .push(CategoryNodeProperty::from(schema));
        }

        self.nest_level(None, &mut properties)
    }

    fn nest_level(
        &self,
        parent: Option<Uuid>,
        properties: &mut HashMap<Uuid, Vec<CategoryNodeProperty>>,
    ) -> Vec<CategoryNode> {
        self.children_of(parent)
            .into_iter()
            .map(|category| {
                let children = self.nest_level(Some(category.id), properties);
                CategoryNode {
                    id: category.id,
                    name: category.name.clone(),
                    properties: properties.remove(&category.id).unwrap_or_default(),
                    children: (!children.is_empty()).then_some(children),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, parent: Option<&Category>) -> Category {
        Category::new(name.to_string(), parent.map(|p| p.id))
    }

    fn sample() -> (CategoryTree, Category, Category, Category) {
        let electronics = category("Electronics", None);
        let phones = category("Phones", Some(&electronics));
        let smartphones = category("Smartphones", Some(&phones));
        let tree = CategoryTree::new(vec![
            smartphones.clone(),
            electronics.clone(),
            phones.clone(),
        ]);
        (tree, electronics, phones, smartphones)
    }

    #[test]
    fn hierarchy_is_root_to_leaf() {
        let (tree, electronics, phones, smartphones) = sample();

        let names: Vec<_> = tree
            .hierarchy(smartphones.id)
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(names, vec!["Electronics", "Phones", "Smartphones"]);

        assert_eq!(
            tree.hierarchy(electronics.id),
            vec![NamedRef::new(electronics.id, "Electronics")]
        );
        assert_eq!(tree.hierarchy(phones.id).last().unwrap().id, phones.id);
    }

    #[test]
    fn hierarchy_stops_on_corrupt_cycle() {
        let mut a = category("A", None);
        let mut b = category("B", None);
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let tree = CategoryTree::new(vec![a.clone(), b.clone()]);

        let path = tree.hierarchy(a.id);
        assert_eq!(path.len(), 2);
        assert_eq!(path.last().unwrap().id, a.id);
    }

    #[test]
    fn rejects_self_parent() {
        let (tree, _, phones, _) = sample();
        assert_eq!(
            tree.validate_parent(phones.id, Some(phones.id)),
            Err(HierarchyError::SelfParent)
        );
    }

    #[test]
    fn rejects_cycles() {
        let (tree, electronics, _, smartphones) = sample();
        // Electronics under its own grandchild
        assert_eq!(
            tree.validate_parent(electronics.id, Some(smartphones.id)),
            Err(HierarchyError::Cycle)
        );

        // A -> B -> A
        let a = category("A", None);
        let b = category("B", Some(&a));
        let tree = CategoryTree::new(vec![a.clone(), b.clone()]);
        assert_eq!(
            tree.validate_parent(a.id, Some(b.id)),
            Err(HierarchyError::Cycle)
        );
    }

    #[test]
    fn accepts_valid_parents() {
        let (tree, electronics, phones, smartphones) = sample();
        assert_eq!(tree.validate_parent(smartphones.id, Some(electronics.id)), Ok(()));
        assert_eq!(tree.validate_parent(phones.id, None), Ok(()));
        // new category not stored yet
        assert_eq!(tree.validate_parent(Uuid::now_v7(), Some(phones.id)), Ok(()));
        assert_eq!(
            tree.validate_parent(Uuid::now_v7(), Some(Uuid::now_v7())),
            Err(HierarchyError::ParentNotFound)
        );
    }

    #[test]
    fn leaves_and_children() {
        let (tree, electronics, phones, smartphones) = sample();
        assert!(tree.is_leaf(smartphones.id));
        assert!(!tree.is_leaf(phones.id));

        let roots = tree.children_of(None);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, electronics.id);
    }

    #[test]
    fn nest_sets_null_children_on_leaves() {
        let (tree, _, _, smartphones) = sample();
        let nested = tree.nest(&[]);

        assert_eq!(nested.len(), 1);
        let phones = &nested[0].children.as_ref().unwrap()[0];
        let leaf = &phones.children.as_ref().unwrap()[0];
        assert_eq!(leaf.id, smartphones.id);
        assert!(leaf.children.is_none());
    }
}
