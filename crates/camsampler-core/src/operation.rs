//! Operation model
//!
//! The subset of a CAM operation the sampling pipeline reads: cutter
//! description, height range, step down, ambient region and source models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ambient::AmbientRegion;
use crate::error::{Error, GeometryError, Result};

/// Cutter shape, written to the settings file by its upper-case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CutterType {
    /// Flat end mill
    End,
    /// Ball nose
    Ballnose,
    /// Bull nose (corner radius)
    Bullnose,
    /// V-carve
    Vcarve,
    /// Ball cone
    Ballcone,
    /// Cylinder cone
    Cylcone,
    Laser,
    Plasma,
    /// User supplied profile
    Custom,
}

impl Default for CutterType {
    fn default() -> Self {
        Self::End
    }
}

impl fmt::Display for CutterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::End => "END",
            Self::Ballnose => "BALLNOSE",
            Self::Bullnose => "BULLNOSE",
            Self::Vcarve => "VCARVE",
            Self::Ballcone => "BALLCONE",
            Self::Cylcone => "CYLCONE",
            Self::Laser => "LASER",
            Self::Plasma => "PLASMA",
            Self::Custom => "CUSTOM",
        };
        write!(f, "{}", name)
    }
}

/// A single mesh triangle in model space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [[f64; 3]; 3],
}

impl Triangle {
    pub fn new(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Unit normal following the right-hand rule; zero for degenerate triangles.
    pub fn normal(&self) -> [f64; 3] {
        let [a, b, c] = self.vertices;
        let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let n = [
            u[1] * v[2] - u[2] * v[1],
            u[2] * v[0] - u[0] * v[2],
            u[0] * v[1] - u[1] * v[0],
        ];
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len <= f64::EPSILON {
            [0.0, 0.0, 0.0]
        } else {
            [n[0] / len, n[1] / len, n[2] / len]
        }
    }
}

/// Source geometry for collision sampling
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub name: String,
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Self {
            name: name.into(),
            triangles,
        }
    }
}

/// Operation settings read by the sampling pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub cutter_type: CutterType,
    /// Cutter diameter in model units
    pub cutter_diameter: f64,
    /// Lowest height the cutter may reach
    pub minz: f64,
    /// Top of the stock
    pub maxz: f64,
    /// Height between waterline layers
    pub stepdown: f64,
    #[serde(default)]
    pub ambient: AmbientRegion,
    #[serde(default)]
    pub objects: Vec<TriangleMesh>,
}

impl Default for Operation {
    fn default() -> Self {
        Self {
            cutter_type: CutterType::default(),
            cutter_diameter: 3.0,
            minz: -1.0,
            maxz: 0.0,
            stepdown: 0.5,
            ambient: AmbientRegion::default(),
            objects: Vec::new(),
        }
    }
}

impl Operation {
    /// Checks the values written to the sampler settings file.
    ///
    /// This is all point sampling needs; step down and the height range
    /// only matter for waterline slicing.
    pub fn validate_cutter(&self) -> Result<()> {
        for (field, value) in [
            ("cutter_diameter", self.cutter_diameter),
            ("minz", self.minz),
        ] {
            check_finite(field, value)?;
        }

        if self.cutter_diameter <= 0.0 {
            return Err(Error::invalid_parameter(
                "cutter_diameter",
                "must be > 0",
            ));
        }

        Ok(())
    }

    /// Checks everything waterline slicing consumes.
    pub fn validate(&self) -> Result<()> {
        self.validate_cutter()?;
        check_finite("maxz", self.maxz)?;
        check_finite("stepdown", self.stepdown)?;

        if self.stepdown <= 0.0 {
            return Err(Error::invalid_parameter("stepdown", "must be > 0"));
        }

        if self.minz > self.maxz {
            return Err(Error::invalid_parameter("minz", "must not exceed maxz"));
        }

        if let Some(mesh) = self.objects.iter().find(|m| m.triangles.is_empty()) {
            return Err(GeometryError::EmptyMesh {
                name: mesh.name.clone(),
            }
            .into());
        }

        self.ambient.validate()
    }
}

fn check_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite {
            field: field.to_string(),
            value,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutter_type_names() {
        assert_eq!(CutterType::Ballnose.to_string(), "BALLNOSE");
        assert_eq!(CutterType::default().to_string(), "END");
    }

    #[test]
    fn test_cutter_type_serde_matches_display() {
        let json = serde_json::to_string(&CutterType::Bullnose).unwrap();
        assert_eq!(json, "\"BULLNOSE\"");
    }

    #[test]
    fn test_validate_rejects_bad_stepdown() {
        let op = Operation {
            stepdown: 0.0,
            ..Operation::default()
        };
        assert!(op.validate().is_err());
    }

    #[test]
    fn test_validate_cutter_ignores_waterline_fields() {
        let op = Operation {
            stepdown: 0.0,
            minz: 5.0,
            maxz: 1.0,
            objects: vec![TriangleMesh::new("empty", Vec::new())],
            ..Operation::default()
        };
        assert!(op.validate_cutter().is_ok());
        assert!(op.validate().is_err());
    }

    #[test]
    fn test_validate_cutter_rejects_bad_diameter() {
        let op = Operation {
            cutter_diameter: 0.0,
            ..Operation::default()
        };
        assert!(op.validate_cutter().is_err());

        let op = Operation {
            minz: f64::INFINITY,
            ..Operation::default()
        };
        assert!(matches!(
            op.validate_cutter(),
            Err(Error::Geometry(GeometryError::NonFinite { .. }))
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let op = Operation {
            minz: 5.0,
            maxz: 1.0,
            ..Operation::default()
        };
        assert!(op.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let op = Operation {
            cutter_diameter: f64::NAN,
            ..Operation::default()
        };
        assert!(matches!(
            op.validate(),
            Err(Error::Geometry(GeometryError::NonFinite { .. }))
        ));
    }

    #[test]
    fn test_triangle_normal() {
        let t = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(t.normal(), [0.0, 0.0, 1.0]);
        let flat = Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert_eq!(flat.normal(), [0.0, 0.0, 0.0]);
    }
}
