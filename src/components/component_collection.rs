#![warn(missing_docs)]
//! An ordered collection of optical components
use log::warn;
use uuid::Uuid;

use super::{nearest_intersection, OpticalComponent, RayComponentIntersection};
use crate::ray::Ray;

/// An ordered collection of [`OpticalComponent`]s which itself acts as a single [`OpticalComponent`].
///
/// Collections may be nested arbitrarily. The intersection of a [`Ray`] with a collection is the intersection with
/// the nearest of its (simple) components.
///
/// # Example
///
/// ```rust
/// use rayplay::components::{ComponentCollection, IdealThinLens};
/// use rayplay::utils::Vector2D;
///
/// let mut system = ComponentCollection::new("system");
/// system.add(IdealThinLens::centred("L1", Vector2D::new(0.0, -1.0), Vector2D::new(0.0, 1.0), 0.5));
/// system.add(IdealThinLens::centred("L2", Vector2D::new(1.0, -1.0), Vector2D::new(1.0, 1.0), 0.5));
/// assert_eq!(system.len(), 2);
/// ```
#[derive(Debug)]
pub struct ComponentCollection {
    id: Uuid,
    name: String,
    components: Vec<Box<dyn OpticalComponent>>,
}
impl Default for ComponentCollection {
    fn default() -> Self {
        Self::new("collection")
    }
}
impl ComponentCollection {
    /// Creates a new, empty [`ComponentCollection`].
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            components: Vec::new(),
        }
    }
    /// Append a component to this [`ComponentCollection`].
    ///
    /// The component is consumed. This function returns its id which may be used to access it later on.
    pub fn add<T: OpticalComponent + 'static>(&mut self, component: T) -> Uuid {
        self.add_boxed(Box::new(component))
    }
    /// Append an already boxed component to this [`ComponentCollection`].
    pub fn add_boxed(&mut self, component: Box<dyn OpticalComponent>) -> Uuid {
        let id = component.id();
        self.components.push(component);
        id
    }
    /// Returns the number of (direct) components of this [`ComponentCollection`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }
    /// Returns `true` if this [`ComponentCollection`] has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
    /// Returns an iterator over the (direct) components in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn OpticalComponent> {
        self.components
            .iter()
            .map(|component| component.as_ref() as &dyn OpticalComponent)
    }
    /// Returns the (direct) component with the given id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&dyn OpticalComponent> {
        self.iter().find(|c| c.id() == id)
    }
}
impl OpticalComponent for ComponentCollection {
    fn id(&self) -> Uuid {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    /// Find the nearest intersection among all components of this collection.
    ///
    /// The component `last_hit` is skipped (on all nesting levels). Among all remaining intersections the one closest
    /// to the ray start point is returned. On equal distances the component scanned first wins.
    fn calculate_intersection(
        &self,
        ray: &Ray,
        forward_only: bool,
        last_hit: Option<Uuid>,
    ) -> Option<RayComponentIntersection<'_>> {
        nearest_intersection(self.iter(), ray, forward_only, last_hit)
    }
    fn step_through(&self, ray: &mut Ray, intersection: &RayComponentIntersection<'_>) {
        if intersection.component.id() == self.id {
            warn!(
                "collection '{}' cannot be stepped through as a whole. Ray left unchanged.",
                self.name
            );
            return;
        }
        intersection.component.step_through(ray, intersection);
    }
}
