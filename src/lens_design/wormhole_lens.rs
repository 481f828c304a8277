#![warn(missing_docs)]
//! The wormhole lens: two nested omnidirectional lenses connected by four inside lenses.
use std::{collections::BTreeMap, iter};

use log::warn;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use uuid::Uuid;

use super::{
    imaging::{focal_length_for_imaging, image_point, normal_towards_image_side},
    LensRole, OmnidirectionalLens, OmnidirectionalLensParameters, PointRole,
};
use crate::{
    components::{nearest_intersection, IdealThinLens, OpticalComponent, RayComponentIntersection},
    point_ref::PointRef,
    ray::Ray,
    utils::{
        geom2d::{line_line_intersection, point_on_line},
        Vector2D,
    },
};

/// The roles of the inside lenses of a [`WormholeLens`].
///
/// Each inside lens connects a point of the outer device with the point of the same role of the inner device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(EnumIter, Display, Serialize, Deserialize)]
pub enum InsideLensRole {
    /// `V1` (outer) to `V1` (inner)
    W1,
    /// `V2` (outer) to `V2` (inner)
    W2,
    /// `P3` (outer) to `P3` (inner)
    W3,
    /// `PD` (outer) to `PD` (inner)
    W4,
}
impl InsideLensRole {
    /// Returns the role of the device points connected by the lens of this role.
    #[must_use]
    pub const fn connected_point_role(self) -> PointRole {
        match self {
            Self::W1 => PointRole::V1,
            Self::W2 => PointRole::V2,
            Self::W3 => PointRole::P3,
            Self::W4 => PointRole::PD,
        }
    }
}

/// The design parameters of a [`WormholeLens`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WormholeLensParameters {
    /// parameters of the outer device
    pub outer: OmnidirectionalLensParameters,
    /// parameters of the inner device
    pub inner: OmnidirectionalLensParameters,
    /// the point imaged by the outer and then by the inner base lens
    pub image_point: Vector2D,
}
impl Default for WormholeLensParameters {
    fn default() -> Self {
        Self {
            outer: OmnidirectionalLensParameters::default(),
            inner: OmnidirectionalLensParameters {
                f_d: 0.05,
                r_d: 0.25,
                h1: 1.0 / 6.0,
                h2: 1.0 / 3.0,
                h: 0.5,
                p_d: Vector2D::new(0.0, -0.25),
                d_hat: Vector2D::x(),
                c_hat: Vector2D::y(),
            },
            image_point: Vector2D::new(0.2, -1.0),
        }
    }
}

/// A wormhole lens
///
/// The device consists of an outer and an inner [`OmnidirectionalLens`] and four inside lenses `W1`..`W4` connecting
/// corresponding points of both devices. The inside lenses are designed such that they image `Q1`, the image of the
/// [`image point`](WormholeLensParameters::image_point) formed by the outer base lens, onto `Q2`, the image of `Q1`
/// formed by the inner base lens. The principal point of each inside lens is the intersection of the line `Q1Q2` with
/// the line of the lens (or the middle of the lens if both lines are parallel).
///
/// Any change of the parameters recalculates outer device, inner device and inside lenses in this order.
#[derive(Debug, Clone)]
pub struct WormholeLens {
    id: Uuid,
    name: String,
    outer: OmnidirectionalLens,
    inner: OmnidirectionalLens,
    image_point: Vector2D,
    inside: BTreeMap<InsideLensRole, IdealThinLens>,
    intermediate_images: (Vector2D, Vector2D),
}
impl WormholeLens {
    /// Creates a new [`WormholeLens`] from the given design parameters.
    #[must_use]
    pub fn new(name: &str, parameters: WormholeLensParameters) -> Self {
        let outer = OmnidirectionalLens::new(&format!("{name} outer"), parameters.outer);
        let inner = OmnidirectionalLens::new(&format!("{name} inner"), parameters.inner);
        let inside = InsideLensRole::iter()
            .map(|role| {
                let point_role = role.connected_point_role();
                let lens = IdealThinLens::new(
                    &format!("{name} {role}"),
                    outer.point(point_role).clone(),
                    inner.point(point_role).clone(),
                    PointRef::default(),
                    f64::INFINITY,
                );
                (role, lens)
            })
            .collect();
        let mut device = Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            outer,
            inner,
            image_point: parameters.image_point,
            inside,
            intermediate_images: (Vector2D::zeros(), Vector2D::zeros()),
        };
        device.calculate_inside_lenses();
        device
    }
    /// Returns the current design parameters of this [`WormholeLens`].
    #[must_use]
    pub const fn parameters(&self) -> WormholeLensParameters {
        WormholeLensParameters {
            outer: *self.outer.parameters(),
            inner: *self.inner.parameters(),
            image_point: self.image_point,
        }
    }
    /// Replace all design parameters and recalculate the device.
    pub fn set_parameters(&mut self, parameters: WormholeLensParameters) {
        self.outer.set_parameters(parameters.outer);
        self.inner.set_parameters(parameters.inner);
        self.image_point = parameters.image_point;
        self.calculate_inside_lenses();
    }
    /// Modify the parameters of the outer device and recalculate the device.
    pub fn update_outer<F: FnOnce(&mut OmnidirectionalLensParameters)>(&mut self, update: F) {
        self.outer.update_parameters(update);
        self.calculate_inside_lenses();
    }
    /// Modify the parameters of the inner device and recalculate the device.
    pub fn update_inner<F: FnOnce(&mut OmnidirectionalLensParameters)>(&mut self, update: F) {
        self.inner.update_parameters(update);
        self.calculate_inside_lenses();
    }
    /// Sets the image point and recalculates the device.
    pub fn set_image_point(&mut self, image_point: Vector2D) {
        self.image_point = image_point;
        self.calculate_inside_lenses();
    }
    /// Returns the image point of this [`WormholeLens`].
    #[must_use]
    pub const fn image_point(&self) -> Vector2D {
        self.image_point
    }
    /// Recalculate outer device, inner device and inside lenses from the current parameters.
    pub fn calculate_internal_parameters(&mut self) {
        self.outer.calculate_internal_parameters();
        self.inner.calculate_internal_parameters();
        self.calculate_inside_lenses();
    }
    fn calculate_inside_lenses(&mut self) {
        let q1 = image_through_base_lens(&self.outer, &self.image_point);
        let q2 = image_through_base_lens(&self.inner, &q1);
        self.intermediate_images = (q1, q2);
        for lens in self.inside.values_mut() {
            let (p1, p2) = lens.end_points();
            let (p1, p2) = (p1.get(), p2.get());
            let principal_point = line_line_intersection(&q1, &(q2 - q1), &p1, &(p2 - p1))
                .map_or_else(
                    || (p1 + p2) / 2.0,
                    |(t, _)| point_on_line(&q1, &(q2 - q1), t),
                );
            lens.principal_point().set(principal_point);
            let normal = normal_towards_image_side(&principal_point, &lens.normal(), &q1);
            lens.set_focal_length(focal_length_for_imaging(&principal_point, &normal, &q1, &q2));
        }
        if self.inside.values().any(|lens| !lens.focal_length().is_finite()) {
            warn!(
                "wormhole lens '{}' has inside lenses with non-finite focal lengths. Check image point.",
                self.name
            );
        }
    }
    /// Returns the outer device.
    #[must_use]
    pub const fn outer(&self) -> &OmnidirectionalLens {
        &self.outer
    }
    /// Returns the inner device.
    #[must_use]
    pub const fn inner(&self) -> &OmnidirectionalLens {
        &self.inner
    }
    /// Returns the inside lens with the given role.
    #[must_use]
    pub fn inside_lens(&self, role: InsideLensRole) -> &IdealThinLens {
        &self.inside[&role]
    }
    /// Returns the intermediate images `(Q1, Q2)` the inside lenses are designed for.
    #[must_use]
    pub const fn intermediate_images(&self) -> (Vector2D, Vector2D) {
        self.intermediate_images
    }
}
fn image_through_base_lens(device: &OmnidirectionalLens, object: &Vector2D) -> Vector2D {
    let base_lens = device.lens(LensRole::D);
    let principal_point = base_lens.principal_point().get();
    let normal = normal_towards_image_side(&principal_point, &base_lens.normal(), object);
    image_point(&principal_point, &normal, base_lens.focal_length(), object)
}
impl OpticalComponent for WormholeLens {
    fn id(&self) -> Uuid {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn calculate_intersection(
        &self,
        ray: &Ray,
        forward_only: bool,
        last_hit: Option<Uuid>,
    ) -> Option<RayComponentIntersection<'_>> {
        let components = iter::once(&self.outer as &dyn OpticalComponent)
            .chain(iter::once(&self.inner as &dyn OpticalComponent))
            .chain(self.inside.values().map(|lens| lens as &dyn OpticalComponent));
        nearest_intersection(components, ray, forward_only, last_hit)
    }
    fn step_through(&self, ray: &mut Ray, intersection: &RayComponentIntersection<'_>) {
        if intersection.component.id() != self.id {
            intersection.component.step_through(ray, intersection);
        }
    }
}
