//! Element-to-percentage mappings.

use rust_decimal::Decimal;

use crate::element::Element;

/// Chosen percentage per element, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    entries: Vec<(Element, Decimal)>,
}

impl Composition {
    pub fn new(entries: Vec<(Element, Decimal)>) -> Self {
        Self { entries }
    }

    /// Returns the percentage chosen for `element`.
    pub fn get(&self, element: &Element) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(e, _)| e == element)
            .map(|(_, p)| *p)
    }

    /// Returns the percentage chosen for the element named `name`.
    pub fn percentage_of(&self, name: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(e, _)| e.name() == name)
            .map(|(_, p)| *p)
    }

    /// Sum of all percentages.
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, p)| *p).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Element, Decimal)> {
        self.entries.iter().map(|(e, p)| (e, *p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Element, Decimal)> for Composition {
    fn from_iter<I: IntoIterator<Item = (Element, Decimal)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
