#![warn(missing_docs)]
//! The omnidirectional lens: a cell of ideal thin lenses designed around a base lens.
//!
//! In the plane the device is the triangle spanned by the two vertices `V1`, `V2` of the base lens `D` and the top
//! point `P3`. It is subdivided by the lenses connecting both vertices to the three axial points `P1`, `P2`, `P3` and
//! by two axial lenses:
//!
//! | lens  | end points | principal point |
//! |-------|------------|-----------------|
//! | `A1`  | `V1`–`P3`  | `V1`            |
//! | `A2`  | `V2`–`P3`  | `V2`            |
//! | `B1`  | `V1`–`P2`  | `V1`            |
//! | `B2`  | `V2`–`P2`  | `V2`            |
//! | `C1`  | `V1`–`P1`  | `V1`            |
//! | `C2`  | `V2`–`P1`  | `V2`            |
//! | `D`   | `V1`–`V2`  | `PD`            |
//! | `E`   | `P1`–`P2`  | `PD`            |
//! | `F`   | `P2`–`P3`  | `PD`            |
//!
//! All principal points lie on the line of the base lens.
use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use uuid::Uuid;

use crate::{
    components::{nearest_intersection, IdealThinLens, OpticalComponent, RayComponentIntersection},
    error::{RayPlayError, RpResult},
    point_ref::PointRef,
    ray::Ray,
    utils::Vector2D,
};

/// The roles of the lenses of an [`OmnidirectionalLens`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(EnumIter, Display, Serialize, Deserialize)]
pub enum LensRole {
    /// lens from vertex 1 to `P3`
    A1,
    /// lens from vertex 2 to `P3`
    A2,
    /// lens from vertex 1 to `P2`
    B1,
    /// lens from vertex 2 to `P2`
    B2,
    /// lens from vertex 1 to `P1`
    C1,
    /// lens from vertex 2 to `P1`
    C2,
    /// the base lens
    D,
    /// axial lens from `P1` to `P2`
    E,
    /// axial lens from `P2` to `P3`
    F,
}
impl LensRole {
    /// Returns the roles of the points the lens of this role spans.
    #[must_use]
    pub const fn end_point_roles(self) -> (PointRole, PointRole) {
        match self {
            Self::A1 => (PointRole::V1, PointRole::P3),
            Self::A2 => (PointRole::V2, PointRole::P3),
            Self::B1 => (PointRole::V1, PointRole::P2),
            Self::B2 => (PointRole::V2, PointRole::P2),
            Self::C1 => (PointRole::V1, PointRole::P1),
            Self::C2 => (PointRole::V2, PointRole::P1),
            Self::D => (PointRole::V1, PointRole::V2),
            Self::E => (PointRole::P1, PointRole::P2),
            Self::F => (PointRole::P2, PointRole::P3),
        }
    }
    /// Returns the role of the principal point of the lens of this role.
    #[must_use]
    pub const fn principal_point_role(self) -> PointRole {
        match self {
            Self::A1 | Self::B1 | Self::C1 => PointRole::V1,
            Self::A2 | Self::B2 | Self::C2 => PointRole::V2,
            Self::D | Self::E | Self::F => PointRole::PD,
        }
    }
}

/// The roles of the geometric points of an [`OmnidirectionalLens`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(EnumIter, Display, Serialize, Deserialize)]
pub enum PointRole {
    /// first vertex of the base lens, `pD - dHat*rD`
    V1,
    /// second vertex of the base lens, `pD + dHat*rD`
    V2,
    /// lower axial point, `pD + cHat*h1`
    P1,
    /// middle axial point, `pD + cHat*h2`
    P2,
    /// top of the device, `pD + cHat*h`
    P3,
    /// principal point of the base lens
    PD,
    /// focal point of the base lens, `pD + cHat*fD`
    FD,
}

/// The independent design parameters of an [`OmnidirectionalLens`].
///
/// By design intent `0 < h1 < h2 < h`, `rD > 0` and `cHat ⟂ dHat`, but none of this is enforced unless
/// [`OmnidirectionalLensParameters::validate`] is called explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OmnidirectionalLensParameters {
    /// focal length of the base lens
    pub f_d: f64,
    /// radius of the base lens (half the distance between its vertices)
    pub r_d: f64,
    /// height of the lower axial point `P1`
    pub h1: f64,
    /// height of the middle axial point `P2`
    pub h2: f64,
    /// height of the top `P3`
    pub h: f64,
    /// principal point of the base lens
    pub p_d: Vector2D,
    /// unit vector in the plane of the base lens
    pub d_hat: Vector2D,
    /// unit vector along the axis of the device
    pub c_hat: Vector2D,
}
impl Default for OmnidirectionalLensParameters {
    fn default() -> Self {
        Self {
            f_d: 0.1,
            r_d: 0.5,
            h1: 1.0 / 3.0,
            h2: 2.0 / 3.0,
            h: 1.0,
            p_d: Vector2D::new(0.0, -0.5),
            d_hat: Vector2D::x(),
            c_hat: Vector2D::y(),
        }
    }
}
impl OmnidirectionalLensParameters {
    /// Check the design parameters.
    ///
    /// The lens calculation itself never calls this function: invalid parameters simply result in `NaN` or infinite
    /// focal lengths.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - any parameter is not finite
    ///   - `f_d`, `h1`, `h2` or `h` is zero
    ///   - `h1`, `h2` and `h` are not pairwise distinct
    ///   - `r_d` is negative
    ///   - `d_hat` or `c_hat` has zero length
    pub fn validate(&self) -> RpResult<()> {
        let scalars = [self.f_d, self.r_d, self.h1, self.h2, self.h];
        let vectors = [self.p_d, self.d_hat, self.c_hat];
        if scalars.iter().any(|v| !v.is_finite())
            || vectors.iter().any(|v| !v.x.is_finite() || !v.y.is_finite())
        {
            return Err(RayPlayError::LensDesign("all design parameters must be finite".into()));
        }
        if self.f_d == 0.0 {
            return Err(RayPlayError::LensDesign("focal length of base lens must be != 0.0".into()));
        }
        if self.h1 == 0.0 || self.h2 == 0.0 || self.h == 0.0 {
            return Err(RayPlayError::LensDesign("heights h1, h2 and h must be != 0.0".into()));
        }
        if self.h1 == self.h2 || self.h2 == self.h || self.h1 == self.h {
            return Err(RayPlayError::LensDesign("heights h1, h2 and h must be distinct".into()));
        }
        if self.r_d < 0.0 {
            return Err(RayPlayError::LensDesign("radius of base lens must be >= 0.0".into()));
        }
        if self.d_hat.norm() == 0.0 || self.c_hat.norm() == 0.0 {
            return Err(RayPlayError::LensDesign("direction vectors must have a length >0".into()));
        }
        Ok(())
    }
    /// Returns the position of the point with the given role.
    #[must_use]
    pub fn point_position(&self, role: PointRole) -> Vector2D {
        match role {
            PointRole::V1 => self.p_d - self.d_hat * self.r_d,
            PointRole::V2 => self.p_d + self.d_hat * self.r_d,
            PointRole::P1 => self.p_d + self.c_hat * self.h1,
            PointRole::P2 => self.p_d + self.c_hat * self.h2,
            PointRole::P3 => self.p_d + self.c_hat * self.h,
            PointRole::PD => self.p_d,
            PointRole::FD => self.p_d + self.c_hat * self.f_d,
        }
    }
}

/// The focal lengths of all lenses of an [`OmnidirectionalLens`].
///
/// The symmetric lens pairs `A1/A2`, `B1/B2` and `C1/C2` share the focal lengths `f_a`, `f_b` and `f_c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFocalLengths {
    /// focal length of `A1` and `A2`
    pub f_a: f64,
    /// focal length of `B1` and `B2`
    pub f_b: f64,
    /// focal length of `C1` and `C2`
    pub f_c: f64,
    /// focal length of the base lens `D`
    pub f_d: f64,
    /// focal length of `E`
    pub f_e: f64,
    /// focal length of `F`
    pub f_f: f64,
}
impl DerivedFocalLengths {
    /// Calculate all focal lengths from the given design parameters.
    ///
    /// Coincident or zero heights lead to infinite or `NaN` values.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn from_parameters(p: &OmnidirectionalLensParameters) -> Self {
        let (f_d, r_d, h1, h2, h) = (p.f_d, p.r_d, p.h1, p.h2, p.h);
        let r2 = r_d * r_d;
        Self {
            f_a: ((-f_d * h + (f_d + h) * h1) * (h - h2) * r_d) / (h1 * h2 * (h * h + r2).sqrt()),
            f_b: (f_d * (h - h2) * (h2 - h1) * r_d) / (h * h1 * (h2 * h2 + r2).sqrt()),
            f_c: ((f_d * h - (f_d + h) * h1) * (h1 - h2) * r_d) / (h * h2 * (h1 * h1 + r2).sqrt()),
            f_d,
            f_e: ((f_d * h - (f_d + h) * h1) * (h1 - h2) * r_d) / (2.0 * h * h1 * h2),
            f_f: ((f_d * h - (f_d + h) * h1) * (h - h2) * r_d) / (2.0 * h * h1 * h2),
        }
    }
    /// Returns the focal length of the lens with the given role.
    #[must_use]
    pub const fn for_role(&self, role: LensRole) -> f64 {
        match role {
            LensRole::A1 | LensRole::A2 => self.f_a,
            LensRole::B1 | LensRole::B2 => self.f_b,
            LensRole::C1 | LensRole::C2 => self.f_c,
            LensRole::D => self.f_d,
            LensRole::E => self.f_e,
            LensRole::F => self.f_f,
        }
    }
    /// Returns `true` if all focal lengths are finite.
    #[must_use]
    pub fn all_finite(&self) -> bool {
        [self.f_a, self.f_b, self.f_c, self.f_d, self.f_e, self.f_f]
            .iter()
            .all(|f| f.is_finite())
    }
}

/// An omnidirectional lens built from nine ideal thin lenses.
///
/// All lenses and points are derived from an [`OmnidirectionalLensParameters`] set. Changing the parameters (via
/// [`set_parameters`](OmnidirectionalLens::set_parameters) or
/// [`update_parameters`](OmnidirectionalLens::update_parameters)) always recalculates the full device. The points are
/// [`PointRef`]s shared between the device and its lenses and are moved in place, so that handles obtained from
/// [`point`](OmnidirectionalLens::point) stay valid.
///
/// # Example
///
/// ```rust
/// use rayplay::lens_design::{LensRole, OmnidirectionalLens, OmnidirectionalLensParameters};
///
/// let mut device = OmnidirectionalLens::new("omni", OmnidirectionalLensParameters::default());
/// device.update_parameters(|p| p.f_d = 0.2);
/// assert_eq!(device.lens(LensRole::D).focal_length(), 0.2);
/// ```
#[derive(Debug, Clone)]
pub struct OmnidirectionalLens {
    id: Uuid,
    name: String,
    parameters: OmnidirectionalLensParameters,
    points: BTreeMap<PointRole, PointRef>,
    lenses: BTreeMap<LensRole, IdealThinLens>,
    focal_lengths: DerivedFocalLengths,
}
impl OmnidirectionalLens {
    /// Creates a new [`OmnidirectionalLens`] from the given design parameters.
    #[must_use]
    pub fn new(name: &str, parameters: OmnidirectionalLensParameters) -> Self {
        let points: BTreeMap<PointRole, PointRef> = PointRole::iter()
            .map(|role| (role, PointRef::default()))
            .collect();
        let lenses = LensRole::iter()
            .map(|role| {
                let (p1, p2) = role.end_point_roles();
                let lens = IdealThinLens::new(
                    &format!("{name} {role}"),
                    points[&p1].clone(),
                    points[&p2].clone(),
                    points[&role.principal_point_role()].clone(),
                    f64::INFINITY,
                );
                (role, lens)
            })
            .collect();
        let mut device = Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            parameters,
            points,
            lenses,
            focal_lengths: DerivedFocalLengths::from_parameters(&parameters),
        };
        device.calculate_internal_parameters();
        device
    }
    /// Returns the design parameters of this [`OmnidirectionalLens`].
    #[must_use]
    pub const fn parameters(&self) -> &OmnidirectionalLensParameters {
        &self.parameters
    }
    /// Replace the design parameters and recalculate the device.
    pub fn set_parameters(&mut self, parameters: OmnidirectionalLensParameters) {
        self.parameters = parameters;
        self.calculate_internal_parameters();
    }
    /// Modify the design parameters with the given function and recalculate the device.
    pub fn update_parameters<F: FnOnce(&mut OmnidirectionalLensParameters)>(&mut self, update: F) {
        update(&mut self.parameters);
        self.calculate_internal_parameters();
    }
    /// Recalculate all points and focal lengths from the current design parameters.
    ///
    /// This is a full recalculation without any internal state: calling it repeatedly yields identical results.
    pub fn calculate_internal_parameters(&mut self) {
        for (role, point) in &self.points {
            point.set(self.parameters.point_position(*role));
        }
        self.focal_lengths = DerivedFocalLengths::from_parameters(&self.parameters);
        for (role, lens) in &mut self.lenses {
            lens.set_focal_length(self.focal_lengths.for_role(*role));
        }
        if !self.focal_lengths.all_finite() {
            warn!(
                "omnidirectional lens '{}' has non-finite focal lengths. Check design parameters.",
                self.name
            );
        }
    }
    /// Returns the derived focal lengths of this [`OmnidirectionalLens`].
    #[must_use]
    pub const fn focal_lengths(&self) -> &DerivedFocalLengths {
        &self.focal_lengths
    }
    /// Returns the lens with the given role.
    #[must_use]
    pub fn lens(&self, role: LensRole) -> &IdealThinLens {
        &self.lenses[&role]
    }
    /// Returns the shared point with the given role.
    #[must_use]
    pub fn point(&self, role: PointRole) -> &PointRef {
        &self.points[&role]
    }
    /// Returns an iterator over all lenses in role order.
    pub fn lenses(&self) -> impl Iterator<Item = (LensRole, &IdealThinLens)> {
        self.lenses.iter().map(|(role, lens)| (*role, lens))
    }
}
impl OpticalComponent for OmnidirectionalLens {
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
        nearest_intersection(
            self.lenses.values().map(|lens| lens as &dyn OpticalComponent),
            ray,
            forward_only,
            last_hit,
        )
    }
    fn step_through(&self, ray: &mut Ray, intersection: &RayComponentIntersection<'_>) {
        if intersection.component.id() != self.id {
            intersection.component.step_through(ray, intersection);
        }
    }
}
