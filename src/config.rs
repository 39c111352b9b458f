//! Render scenarios persisted as JSON.
//!
//! A scenario bundles one camera, one tweezer-array experiment and an
//! optional lattice layout that expands into the experiment's site
//! list when the scenario is resolved.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{CmosCamera, EmccdCamera};
use crate::error::Result;
use crate::experiment::{lattice_sites, LatticeSpec, TweezerArray};
use crate::generator::ImageGenerator;

/// Camera section of a scenario, tagged by sensor type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sensor", rename_all = "snake_case")]
pub enum CameraSection {
    Emccd(EmccdCamera),
    Cmos(CmosCamera),
}

impl CameraSection {
    /// Hand the concrete camera to a generator.
    pub fn install(self, generator: &mut ImageGenerator) -> Result<()> {
        match self {
            CameraSection::Emccd(camera) => generator.set_camera(camera),
            CameraSection::Cmos(camera) => generator.set_camera(camera),
        }
    }
}

/// A complete render scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub camera: CameraSection,
    #[serde(default)]
    pub experiment: TweezerArray,
    /// Optional lattice layout; replaces the experiment's explicit
    /// site list (in the experiment's coordinate space) on resolve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lattice: Option<LatticeSpec>,
}

impl Scenario {
    /// Read a scenario from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Write the scenario as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolve into the camera and experiment to hand to a generator,
    /// expanding the lattice layout if one is present.
    pub fn into_parts(self) -> (CameraSection, TweezerArray) {
        let Scenario {
            camera,
            mut experiment,
            lattice,
        } = self;
        if let Some(spec) = lattice {
            experiment.sites = lattice_sites(&spec);
        }
        (camera, experiment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::CoordinateSpace;

    #[test]
    fn tagged_camera_section_parses() {
        let json = r#"{
            "camera": {"sensor": "emccd", "resolution": [512, 256], "quantum_efficiency": 0.86},
            "experiment": {"fill_rate": 0.6}
        }"#;
        let scenario: Scenario = serde_json::from_str(json).expect("parse scenario");

        match &scenario.camera {
            CameraSection::Emccd(camera) => {
                assert_eq!(camera.resolution, (512, 256));
                assert_eq!(camera.quantum_efficiency, Some(0.86));
            }
            CameraSection::Cmos(_) => panic!("expected an EMCCD section"),
        }
        assert_eq!(scenario.experiment.fill_rate, Some(0.6));
        assert!(scenario.lattice.is_none());
    }

    #[test]
    fn lattice_expands_on_resolve() {
        let json = r#"{
            "camera": {"sensor": "cmos", "resolution": [128, 128]},
            "experiment": {"coordinate_space": "physical"},
            "lattice": {"spacing": [5.2, 5.2], "count": [3, 2], "offset": [10.0, 10.0]}
        }"#;
        let scenario: Scenario = serde_json::from_str(json).expect("parse scenario");
        let (_, experiment) = scenario.into_parts();

        assert_eq!(experiment.sites.len(), 6);
        assert_eq!(experiment.coordinate_space, CoordinateSpace::Physical);
        assert_eq!(experiment.sites[0].x, 10.0);
        assert_eq!(experiment.sites[1].x, 15.2);
    }

    #[test]
    fn explicit_sites_survive_resolve_without_lattice() {
        let json = r#"{
            "camera": {"sensor": "emccd"},
            "experiment": {"sites": [{"x": 0.5, "y": 0.5}]}
        }"#;
        let scenario: Scenario = serde_json::from_str(json).expect("parse scenario");
        let (_, experiment) = scenario.into_parts();
        assert_eq!(experiment.sites.len(), 1);
        assert_eq!(experiment.sites[0].y, 0.5);
    }
}
