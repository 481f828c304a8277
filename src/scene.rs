#![warn(missing_docs)]
//! Scene documents for the `rayplay` command line tool.
//!
//! A scene is a YAML document describing a set of optical components, the rays to be traced through them and an
//! optional enclosing circle:
//!
//! ```yaml
//! name: telescope
//! enclosing_circle:
//!   centre: [0.0, 0.0]
//!   radius: 2.0
//! components:
//!   - type: ideal_lens
//!     name: L1
//!     end_point_1: [-0.25, -1.0]
//!     end_point_2: [-0.25, 1.0]
//!     focal_length: 0.25
//! rays:
//!   - type: single
//!     start_point: [-0.5, 0.1]
//!     direction: [1.0, 0.0]
//!   - type: fan
//!     origin: [-0.5, 0.0]
//!     direction: [1.0, 0.0]
//!     opening_angle: 0.2
//!     number_of_rays: 5
//!     trace_level: 10
//! ```
use std::{fs, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    components::{ComponentCollection, FlatMirror, IdealThinLens},
    error::{RayPlayError, RpResult},
    lens_design::{
        OmnidirectionalLens, OmnidirectionalLensParameters, WormholeLens, WormholeLensParameters,
    },
    ray::Ray,
    rays::Rays,
    tracer::{Circle, TraceConfig, TraceOutcome},
    utils::Vector2D,
};

/// Description of a single optical component of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentDescription {
    /// an [`IdealThinLens`]. The principal point defaults to the middle of the end points.
    IdealLens {
        /// name of the lens
        name: String,
        /// first end point
        end_point_1: Vector2D,
        /// second end point
        end_point_2: Vector2D,
        /// principal point
        #[serde(default)]
        principal_point: Option<Vector2D>,
        /// focal length
        focal_length: f64,
    },
    /// a [`FlatMirror`]
    FlatMirror {
        /// name of the mirror
        name: String,
        /// first end point
        end_point_1: Vector2D,
        /// second end point
        end_point_2: Vector2D,
    },
    /// an [`OmnidirectionalLens`]
    OmnidirectionalLens {
        /// name of the device
        name: String,
        /// design parameters
        #[serde(default)]
        parameters: OmnidirectionalLensParameters,
    },
    /// a [`WormholeLens`]
    WormholeLens {
        /// name of the device
        name: String,
        /// design parameters
        #[serde(default)]
        parameters: WormholeLensParameters,
    },
}
impl ComponentDescription {
    /// Add the described component to the given [`ComponentCollection`].
    pub fn add_to(&self, collection: &mut ComponentCollection) {
        match self {
            Self::IdealLens {
                name,
                end_point_1,
                end_point_2,
                principal_point,
                focal_length,
            } => {
                let principal_point =
                    principal_point.unwrap_or_else(|| (end_point_1 + end_point_2) / 2.0);
                collection.add(IdealThinLens::new(
                    name,
                    (*end_point_1).into(),
                    (*end_point_2).into(),
                    principal_point.into(),
                    *focal_length,
                ));
            }
            Self::FlatMirror {
                name,
                end_point_1,
                end_point_2,
            } => {
                collection.add(FlatMirror::new(
                    name,
                    (*end_point_1).into(),
                    (*end_point_2).into(),
                ));
            }
            Self::OmnidirectionalLens { name, parameters } => {
                collection.add(OmnidirectionalLens::new(name, *parameters));
            }
            Self::WormholeLens { name, parameters } => {
                collection.add(WormholeLens::new(name, *parameters));
            }
        }
    }
}

/// Description of the rays of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RayDescription {
    /// a single [`Ray`]
    Single {
        /// start point of the ray
        start_point: Vector2D,
        /// direction of the ray (need not be normalized)
        direction: Vector2D,
        /// trace level of the ray. The scene default is used if not given.
        #[serde(default)]
        trace_level: Option<i32>,
    },
    /// a fan of rays (see [`Rays::new_fan`])
    Fan {
        /// common start point of all rays
        origin: Vector2D,
        /// central direction of the fan
        direction: Vector2D,
        /// full opening angle in radians
        opening_angle: f64,
        /// number of rays
        number_of_rays: usize,
        /// trace level of the rays. The scene default is used if not given.
        #[serde(default)]
        trace_level: Option<i32>,
    },
}

/// A scene: components, rays and trace settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default = "default_scene_name")]
    name: String,
    #[serde(default)]
    enclosing_circle: Option<Circle>,
    #[serde(default)]
    backward_intersections: bool,
    #[serde(default)]
    reverse_twins: bool,
    #[serde(default)]
    components: Vec<ComponentDescription>,
    #[serde(default)]
    rays: Vec<RayDescription>,
}
fn default_scene_name() -> String {
    "scene".into()
}
impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            name: default_scene_name(),
            enclosing_circle: None,
            backward_intersections: false,
            reverse_twins: false,
            components: Vec::new(),
            rays: Vec::new(),
        }
    }
}
impl SceneDocument {
    /// Create a new [`SceneDocument`] from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the given path is not found or readable.
    ///   - the parsing / deserialization of the file failed.
    pub fn from_file(path: &Path) -> RpResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            RayPlayError::Scene(format!("cannot read file {} : {}", path.display(), e))
        })?;
        Self::from_string(&contents)
    }
    /// Create a new [`SceneDocument`] from the given YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if the parsing of the string failed.
    pub fn from_string(scene: &str) -> RpResult<Self> {
        serde_yaml::from_str(scene)
            .map_err(|e| RayPlayError::Scene(format!("parsing of scene failed: {e}")))
    }
    /// Returns the name of this [`SceneDocument`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Returns the component descriptions of this [`SceneDocument`].
    #[must_use]
    pub fn components(&self) -> &[ComponentDescription] {
        &self.components
    }
    /// Add a component description.
    pub fn add_component(&mut self, component: ComponentDescription) {
        self.components.push(component);
    }
    /// Add a ray description.
    pub fn add_ray(&mut self, ray: RayDescription) {
        self.rays.push(ray);
    }
    /// Sets the enclosing circle of this [`SceneDocument`].
    pub fn set_enclosing_circle(&mut self, enclosing_circle: Option<Circle>) {
        self.enclosing_circle = enclosing_circle;
    }
    /// Build a [`ComponentCollection`] containing all components of this scene in document order.
    #[must_use]
    pub fn build_components(&self) -> ComponentCollection {
        let mut collection = ComponentCollection::new(&self.name);
        for component in &self.components {
            component.add_to(&mut collection);
        }
        collection
    }
    /// Build the [`Rays`] of this scene.
    ///
    /// Rays without an explicit trace level get `default_trace_level`. If reverse twins are requested, the twins of all
    /// rays are appended.
    ///
    /// # Errors
    ///
    /// This function will return an error if a fan description is invalid.
    pub fn build_rays(&self, default_trace_level: i32) -> RpResult<Rays> {
        let mut rays = Rays::default();
        for description in &self.rays {
            match description {
                RayDescription::Single {
                    start_point,
                    direction,
                    trace_level,
                } => rays.add_ray(Ray::with_trace_level(
                    *start_point,
                    *direction,
                    trace_level.unwrap_or(default_trace_level),
                )),
                RayDescription::Fan {
                    origin,
                    direction,
                    opening_angle,
                    number_of_rays,
                    trace_level,
                } => {
                    let fan = Rays::new_fan(
                        *origin,
                        *direction,
                        *opening_angle,
                        *number_of_rays,
                        trace_level.unwrap_or(default_trace_level),
                    )?;
                    for ray in &fan {
                        rays.add_ray(ray.clone());
                    }
                }
            }
        }
        if self.reverse_twins {
            rays.add_reverse_twins();
        }
        Ok(rays)
    }
    /// Returns the [`TraceConfig`] of this scene.
    ///
    /// Escaping rays end on the enclosing circle if one is given.
    #[must_use]
    pub fn trace_config(&self) -> TraceConfig {
        let mut config = self
            .enclosing_circle
            .as_ref()
            .map_or_else(TraceConfig::default, |circle| TraceConfig::with_boundary(circle));
        config.set_forward_only(!self.backward_intersections);
        config
    }
    /// Build and trace all rays of this scene.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - a ray description is invalid.
    ///   - the trace configuration is invalid.
    pub fn trace(&self, default_trace_level: i32) -> RpResult<TraceReport> {
        let components = self.build_components();
        let mut rays = self.build_rays(default_trace_level)?;
        let outcomes = rays.trace_through(&components, &self.trace_config())?;
        info!(
            "scene '{}': {} rays traced, total path length {:.6}",
            self.name,
            rays.nr_of_rays(),
            rays.total_path_length()
        );
        Ok(TraceReport {
            scene: self.name.clone(),
            rays,
            outcomes,
        })
    }
}

/// The result of tracing a scene.
#[derive(Debug, Clone, Serialize)]
pub struct TraceReport {
    scene: String,
    rays: Rays,
    outcomes: Vec<TraceOutcome>,
}
impl TraceReport {
    /// Returns the traced rays.
    #[must_use]
    pub const fn rays(&self) -> &Rays {
        &self.rays
    }
    /// Returns the [`TraceOutcome`] of each ray.
    #[must_use]
    pub fn outcomes(&self) -> &[TraceOutcome] {
        &self.outcomes
    }
    /// Serialize this [`TraceReport`] as YAML.
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization fails.
    pub fn to_yaml(&self) -> RpResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RayPlayError::Scene(format!("serialization of trace report failed: {e}")))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{components::OpticalComponent, ray::DEFAULT_TRACE_LEVEL, tracer::EscapePolicy};
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    const TELESCOPE: &str = "
name: telescope
enclosing_circle:
  centre: [0.0, 0.0]
  radius: 2.0
components:
  - type: ideal_lens
    name: L1
    end_point_1: [-0.25, -1.0]
    end_point_2: [-0.25, 1.0]
    focal_length: 0.25
  - type: ideal_lens
    name: L2
    end_point_1: [0.25, -1.0]
    end_point_2: [0.25, 1.0]
    focal_length: 0.25
rays:
  - type: single
    start_point: [-0.5, 0.1]
    direction: [1.0, 0.0]
  - type: fan
    origin: [-0.5, 0.0]
    direction: [1.0, 0.0]
    opening_angle: 0.2
    number_of_rays: 3
    trace_level: 10
";
    #[test]
    fn default() {
        let scene = SceneDocument::default();
        assert_eq!(scene.name(), "scene");
        assert!(scene.components().is_empty());
        assert_eq!(scene.trace_config(), TraceConfig::default());
    }
    #[test]
    fn from_string() {
        let scene = SceneDocument::from_string(TELESCOPE).unwrap();
        assert_eq!(scene.name(), "telescope");
        assert_eq!(scene.components().len(), 2);
        assert_matches!(
            &scene.components()[0],
            ComponentDescription::IdealLens { name, principal_point: None, .. } if name == "L1"
        );
    }
    #[test]
    fn from_string_minimal() {
        let scene = SceneDocument::from_string("{}").unwrap();
        assert_eq!(scene.name(), "scene");
        assert!(scene.build_components().is_empty());
        assert!(scene.build_rays(DEFAULT_TRACE_LEVEL).unwrap().is_empty());
    }
    #[test]
    fn from_string_invalid() {
        let result = SceneDocument::from_string("components:\n  - type: prism\n    name: P");
        assert!(result
            .unwrap_err()
            .to_string()
            .starts_with("Scene:parsing of scene failed:"));
    }
    #[test]
    fn from_file() {
        let result = SceneDocument::from_file(Path::new("./invalid_file_path/invalid_file.yaml"));
        assert!(result
            .unwrap_err()
            .to_string()
            .starts_with("Scene:cannot read file ./invalid_file_path/invalid_file.yaml"));
        assert!(SceneDocument::from_file(Path::new("./files_for_testing/telescope.yaml")).is_ok());
    }
    #[test]
    fn build_components() {
        let scene = SceneDocument::from_string(TELESCOPE).unwrap();
        let components = scene.build_components();
        assert_eq!(components.name(), "telescope");
        assert_eq!(components.len(), 2);
        let names: Vec<&str> = components.iter().map(OpticalComponent::name).collect();
        assert_eq!(names, vec!["L1", "L2"]);
    }
    #[test]
    fn build_all_component_types() {
        let mut scene = SceneDocument::default();
        scene.add_component(ComponentDescription::FlatMirror {
            name: "M".into(),
            end_point_1: Vector2D::new(1.0, -1.0),
            end_point_2: Vector2D::new(1.0, 1.0),
        });
        scene.add_component(ComponentDescription::OmnidirectionalLens {
            name: "omni".into(),
            parameters: OmnidirectionalLensParameters::default(),
        });
        scene.add_component(ComponentDescription::WormholeLens {
            name: "wormhole".into(),
            parameters: WormholeLensParameters::default(),
        });
        let names: Vec<String> = scene
            .build_components()
            .iter()
            .map(|c| c.name().to_owned())
            .collect();
        assert_eq!(names, vec!["M", "omni", "wormhole"]);
    }
    #[test]
    fn device_with_default_parameters() {
        let scene = SceneDocument::from_string(
            "components:\n  - type: omnidirectional_lens\n    name: omni\n",
        )
        .unwrap();
        assert_eq!(
            scene.components()[0],
            ComponentDescription::OmnidirectionalLens {
                name: "omni".into(),
                parameters: OmnidirectionalLensParameters::default()
            }
        );
    }
    #[test]
    fn build_rays() {
        let scene = SceneDocument::from_string(TELESCOPE).unwrap();
        let rays = scene.build_rays(20).unwrap();
        assert_eq!(rays.nr_of_rays(), 4);
        let levels: Vec<i32> = rays.iter().map(Ray::trace_level).collect();
        assert_eq!(levels, vec![20, 10, 10, 10]);
    }
    #[test]
    fn build_rays_invalid_fan() {
        let mut scene = SceneDocument::default();
        scene.add_ray(RayDescription::Fan {
            origin: Vector2D::zeros(),
            direction: Vector2D::x(),
            opening_angle: 0.1,
            number_of_rays: 0,
            trace_level: None,
        });
        assert_matches!(
            scene.build_rays(DEFAULT_TRACE_LEVEL),
            Err(RayPlayError::Geometry(_))
        );
    }
    #[test]
    fn build_rays_reverse_twins() {
        let scene = SceneDocument::from_string(
            "reverse_twins: true\nrays:\n  - type: single\n    start_point: [0.0, 0.0]\n    direction: [0.0, 2.0]\n",
        )
        .unwrap();
        let rays = scene.build_rays(DEFAULT_TRACE_LEVEL).unwrap();
        assert_eq!(rays.nr_of_rays(), 2);
        assert_eq!(rays.iter().nth(1).unwrap().direction(), Vector2D::new(0.0, -1.0));
    }
    #[test]
    fn trace_config() {
        let mut scene = SceneDocument::from_string(TELESCOPE).unwrap();
        let config = scene.trace_config();
        assert!(config.forward_only());
        assert_eq!(
            config.escape(),
            EscapePolicy::EnclosingCircle(Circle::new(Vector2D::zeros(), 2.0))
        );
        scene.set_enclosing_circle(None);
        assert_eq!(scene.trace_config().escape(), EscapePolicy::default());
        let scene = SceneDocument::from_string("backward_intersections: true").unwrap();
        assert!(!scene.trace_config().forward_only());
    }
    #[test]
    fn trace() {
        let scene = SceneDocument::from_string(TELESCOPE).unwrap();
        let report = scene.trace(DEFAULT_TRACE_LEVEL).unwrap();
        assert_eq!(report.outcomes(), &[TraceOutcome::Escaped; 4]);
        let ray = report.rays().iter().next().unwrap();
        assert_eq!(ray.trajectory().len(), 4);
        assert_abs_diff_eq!(ray.start_point().norm(), 2.0, epsilon = 1e-12);
    }
    #[test]
    fn trace_invalid_circle() {
        let mut scene = SceneDocument::from_string(TELESCOPE).unwrap();
        scene.set_enclosing_circle(Some(Circle::new(Vector2D::zeros(), -1.0)));
        assert_matches!(scene.trace(DEFAULT_TRACE_LEVEL), Err(RayPlayError::Trace(_)));
    }
    #[test]
    fn report_to_yaml() {
        let scene = SceneDocument::from_string(TELESCOPE).unwrap();
        let yaml = scene.trace(DEFAULT_TRACE_LEVEL).unwrap().to_yaml().unwrap();
        assert!(yaml.starts_with("scene: telescope\n"));
        assert!(yaml.contains("outcomes:\n- Escaped\n"));
    }
}
