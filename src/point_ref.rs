//! Shared handles to points in the plane.
//!
//! A [`PointRef`] is used wherever several owners refer to the *same* geometric point, e.g. the end point of a lens
//! and the principal point of a lens device. Moving the point through any handle moves it for all holders.
use std::{cell::RefCell, fmt::Display, rc::Rc};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::Vector2D;

/// Shared, mutable point.
///
/// Cloning a [`PointRef`] creates a new handle to the same point. Use [`PointRef::detached`] to obtain an independent
/// copy.
#[derive(Debug, Clone)]
pub struct PointRef(Rc<RefCell<Vector2D>>);

impl PointRef {
    /// Creates a new shared point at the given position.
    #[must_use]
    pub fn new(position: Vector2D) -> Self {
        Self(Rc::new(RefCell::new(position)))
    }
    /// Returns the current position of this point.
    #[must_use]
    pub fn get(&self) -> Vector2D {
        *self.0.borrow()
    }
    /// Moves this point (and thus all handles to it) to the given position.
    pub fn set(&self, position: Vector2D) {
        *self.0.borrow_mut() = position;
    }
    /// Returns `true` if both handles refer to the same point.
    ///
    /// Two distinct points at identical coordinates are **not** the same point.
    #[must_use]
    pub fn same_point(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
    /// Returns a new, unshared point at the current position of this point.
    #[must_use]
    pub fn detached(&self) -> Self {
        Self::new(self.get())
    }
}
impl From<Vector2D> for PointRef {
    fn from(position: Vector2D) -> Self {
        Self::new(position)
    }
}
impl Default for PointRef {
    fn default() -> Self {
        Self::new(Vector2D::zeros())
    }
}
impl Display for PointRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let p = self.get();
        write!(f, "({}, {})", p.x, p.y)
    }
}
impl Serialize for PointRef {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.get().serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for PointRef {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vector2D::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn new() {
        let p = PointRef::new(Vector2D::new(1.0, 2.0));
        assert_eq!(p.get(), Vector2D::new(1.0, 2.0));
    }
    #[test]
    fn default() {
        assert_eq!(PointRef::default().get(), Vector2D::zeros());
    }
    #[test]
    fn shared_mutation() {
        let p = PointRef::new(Vector2D::new(1.0, 2.0));
        let q = p.clone();
        q.set(Vector2D::new(3.0, 4.0));
        assert_eq!(p.get(), Vector2D::new(3.0, 4.0));
        assert!(p.same_point(&q));
    }
    #[test]
    fn detached() {
        let p = PointRef::new(Vector2D::new(1.0, 2.0));
        let q = p.detached();
        q.set(Vector2D::new(3.0, 4.0));
        assert_eq!(p.get(), Vector2D::new(1.0, 2.0));
        assert!(!p.same_point(&q));
    }
    #[test]
    fn identity_not_value() {
        let p = PointRef::new(Vector2D::new(1.0, 2.0));
        let q = PointRef::new(Vector2D::new(1.0, 2.0));
        assert!(!p.same_point(&q));
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", PointRef::new(Vector2D::new(1.0, -2.5))),
            "(1, -2.5)"
        );
    }
    #[test]
    fn serde() {
        let p = PointRef::new(Vector2D::new(1.0, 2.0));
        let s = serde_yaml::to_string(&p).unwrap();
        let q: PointRef = serde_yaml::from_str(&s).unwrap();
        assert_eq!(q.get(), p.get());
        assert!(!q.same_point(&p));
    }
}
