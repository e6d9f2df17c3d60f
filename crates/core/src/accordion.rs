//! Accordion
//!
//! Single-expansion state for the menu. At most one top level category is expanded, and inside
//! an expanded nested category at most one subcategory is expanded.

use crate::menu::{Menu, MenuCategory};

/// Next expanded key after `clicked` is toggled.
///
/// Clicking the expanded key collapses it; clicking any other key expands that key instead.
pub fn toggled(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_string())
    }
}

/// Expansion state for one rendered menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accordion {
    expanded: Option<String>,
    expanded_subcategory: Option<String>,
}

impl Accordion {
    /// Initial state: the first category is expanded.
    #[must_use]
    pub fn for_menu(menu: &Menu) -> Self {
        let mut accordion = Self::default();

        if let Some(first) = menu.categories.first() {
            accordion.expand(first);
        }

        accordion
    }

    /// Toggle a top level category.
    ///
    /// Opening a nested category expands its first subcategory. Collapsing, or moving to another
    /// category, forgets the subcategory selection.
    pub fn toggle_category(&mut self, menu: &Menu, title: &str) {
        match toggled(self.expanded.as_deref(), title) {
            Some(next) => match menu.category(&next) {
                Some(category) => self.expand(category),
                None => self.collapse(),
            },
            None => self.collapse(),
        }
    }

    /// Toggle a subcategory of the expanded category.
    ///
    /// Titles that are not subcategories of the expanded category are ignored.
    pub fn toggle_subcategory(&mut self, menu: &Menu, title: &str) {
        let belongs = self
            .expanded
            .as_deref()
            .and_then(|expanded| menu.category(expanded))
            .is_some_and(|category| {
                category
                    .subcategories()
                    .iter()
                    .any(|subcategory| subcategory.title == title)
            });

        if belongs {
            self.expanded_subcategory = toggled(self.expanded_subcategory.as_deref(), title);
        }
    }

    /// Expanded category title.
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Expanded subcategory title within the expanded category.
    pub fn expanded_subcategory(&self) -> Option<&str> {
        self.expanded_subcategory.as_deref()
    }

    /// Whether a category is expanded.
    pub fn is_expanded(&self, title: &str) -> bool {
        self.expanded.as_deref() == Some(title)
    }

    /// Whether a subcategory is expanded. Requires its parent to be expanded.
    pub fn is_subcategory_expanded(&self, category: &str, subcategory: &str) -> bool {
        self.is_expanded(category) && self.expanded_subcategory.as_deref() == Some(subcategory)
    }

    fn expand(&mut self, category: &MenuCategory) {
        self.expanded = Some(category.title.clone());
        self.expanded_subcategory = category
            .subcategories()
            .first()
            .map(|subcategory| subcategory.title.clone());
    }

    fn collapse(&mut self) {
        self.expanded = None;
        self.expanded_subcategory = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        items::ItemId,
        menu::{CategoryItems, MenuItem, RestaurantInfo, Subcategory},
    };

    use super::*;

    fn items(ids: &[u64]) -> Vec<MenuItem> {
        ids.iter()
            .map(|&id| MenuItem {
                id: ItemId::from(id),
                name: format!("dish {id}"),
                description: None,
                image_ref: None,
                price_minor_units: Some(100),
            })
            .collect()
    }

    fn menu(nested_first: bool) -> Menu {
        let flat = MenuCategory {
            title: "Recommended".to_string(),
            items: CategoryItems::Flat(items(&[1, 2])),
        };

        let nested = MenuCategory {
            title: "Beverages".to_string(),
            items: CategoryItems::Nested(vec![
                Subcategory {
                    title: "Hot".to_string(),
                    items: items(&[10, 11]),
                },
                Subcategory {
                    title: "Cold".to_string(),
                    items: items(&[20, 21, 22]),
                },
            ]),
        };

        Menu {
            restaurant: RestaurantInfo::default(),
            categories: if nested_first {
                vec![nested, flat]
            } else {
                vec![flat, nested]
            },
        }
    }

    #[test]
    fn toggled_transitions() {
        assert_eq!(toggled(None, "a"), Some("a".to_string()));
        assert_eq!(toggled(Some("a"), "a"), None);
        assert_eq!(toggled(Some("a"), "b"), Some("b".to_string()));
    }

    #[test]
    fn first_category_starts_expanded() {
        let accordion = Accordion::for_menu(&menu(false));

        assert!(accordion.is_expanded("Recommended"));
        assert!(!accordion.is_expanded("Beverages"));
        assert_eq!(accordion.expanded_subcategory(), None);
    }

    #[test]
    fn empty_menu_has_nothing_expanded() {
        let empty = Menu {
            restaurant: RestaurantInfo::default(),
            categories: Vec::new(),
        };

        assert_eq!(Accordion::for_menu(&empty), Accordion::default());
    }

    #[test]
    fn nested_first_category_expands_first_subcategory() {
        let accordion = Accordion::for_menu(&menu(true));

        assert!(accordion.is_subcategory_expanded("Beverages", "Hot"));
        assert!(!accordion.is_subcategory_expanded("Beverages", "Cold"));
    }

    #[test]
    fn subcategory_toggle_is_single_expansion() {
        let menu = menu(true);
        let mut accordion = Accordion::for_menu(&menu);

        accordion.toggle_subcategory(&menu, "Cold");

        assert!(accordion.is_subcategory_expanded("Beverages", "Cold"));
        assert!(!accordion.is_subcategory_expanded("Beverages", "Hot"));

        accordion.toggle_subcategory(&menu, "Cold");

        assert_eq!(accordion.expanded_subcategory(), None);
    }

    #[test]
    fn expanding_one_category_collapses_the_other() {
        let menu = menu(false);
        let mut accordion = Accordion::for_menu(&menu);

        accordion.toggle_category(&menu, "Beverages");

        assert!(accordion.is_expanded("Beverages"));
        assert!(!accordion.is_expanded("Recommended"));
        assert!(accordion.is_subcategory_expanded("Beverages", "Hot"));
    }

    #[test]
    fn reopening_nested_category_resets_to_first_subcategory() {
        let menu = menu(true);
        let mut accordion = Accordion::for_menu(&menu);

        accordion.toggle_subcategory(&menu, "Cold");
        accordion.toggle_category(&menu, "Beverages");

        assert_eq!(accordion.expanded(), None);
        assert_eq!(accordion.expanded_subcategory(), None);

        accordion.toggle_category(&menu, "Beverages");

        assert!(accordion.is_subcategory_expanded("Beverages", "Hot"));
    }

    #[test]
    fn foreign_subcategory_titles_are_ignored() {
        let menu = menu(false);
        let mut accordion = Accordion::for_menu(&menu);

        accordion.toggle_subcategory(&menu, "Hot");

        assert_eq!(accordion.expanded_subcategory(), None);
    }

    #[test]
    fn unknown_category_collapses() {
        let menu = menu(false);
        let mut accordion = Accordion::for_menu(&menu);

        accordion.toggle_category(&menu, "Nope");

        assert_eq!(accordion.expanded(), None);
    }
}
