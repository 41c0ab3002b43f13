//! Validated element catalogs.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::element::Element;
use crate::error::{AlloyForgeError, Result};

/// Checks a catalog and returns the index of the base element.
///
/// Every element is validated first, so malformed entries are reported
/// before an unknown base name.
///
/// # Errors
///
/// - [`AlloyForgeError::InvalidElementSpec`] for a malformed element, a duplicate name,
///   or an element whose largest creep or cost contribution overflows the catalog total
/// - [`AlloyForgeError::UnknownBaseElement`] if no element is named `base_element`
pub fn validate_catalog(elements: &[Element], base_element: &str) -> Result<usize> {
    let mut seen = HashSet::with_capacity(elements.len());
    let mut creep = Decimal::ZERO;
    let mut spend = Decimal::ZERO;
    for element in elements {
        element.validate()?;
        if !seen.insert(element.name()) {
            return Err(AlloyForgeError::InvalidElementSpec {
                element: element.name().to_string(),
                reason: "duplicate element name".to_string(),
            });
        }
        creep = element
            .max_creep()
            .and_then(|c| creep.checked_add(c))
            .ok_or_else(|| overflow(element, "creep resistance"))?;
        spend = element
            .max_spend()
            .and_then(|c| spend.checked_add(c))
            .ok_or_else(|| overflow(element, "cost"))?;
    }
    elements
        .iter()
        .position(|e| e.name() == base_element)
        .ok_or_else(|| AlloyForgeError::UnknownBaseElement(base_element.to_string()))
}

fn overflow(element: &Element, metric: &str) -> AlloyForgeError {
    AlloyForgeError::InvalidElementSpec {
        element: element.name().to_string(),
        reason: format!("largest {metric} of the catalog overflows"),
    }
}

/// An ordered list of validated elements with a designated base element.
///
/// The base (filler) element balances the mixture and contributes nothing
/// to the objective.
///
/// # Example
///
/// ```
/// use alloyforge_core::{Element, ElementCatalog};
/// use rust_decimal::Decimal;
///
/// let elements = vec![
///     Element::new("Cr", Decimal::ONE, Decimal::ONE, Decimal::ZERO, Decimal::TEN, Decimal::ONE),
///     Element::new("Ni", Decimal::ZERO, Decimal::ONE, Decimal::ZERO, Decimal::ONE_HUNDRED, Decimal::ONE),
/// ];
/// let catalog = ElementCatalog::new(elements, "Ni").unwrap();
/// assert_eq!(catalog.base_element().name(), "Ni");
/// assert_eq!(catalog.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementCatalog {
    elements: Vec<Element>,
    base_index: usize,
}

impl ElementCatalog {
    /// Validates `elements` and designates `base_element` as the filler.
    pub fn new(elements: Vec<Element>, base_element: &str) -> Result<Self> {
        let base_index = validate_catalog(&elements, base_element)?;
        Ok(Self {
            elements,
            base_index,
        })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn base_element(&self) -> &Element {
        &self.elements[self.base_index]
    }

    pub fn base_index(&self) -> usize {
        self.base_index
    }

    /// Returns true if the element at `index` is the base element.
    #[inline]
    pub fn is_base(&self, index: usize) -> bool {
        index == self.base_index
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Looks up an element by name.
    pub fn get(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name() == name)
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

impl<'a> IntoIterator for &'a ElementCatalog {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests;
