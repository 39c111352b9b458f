//! Scenario persistence and resolution, end to end on disk.

use tweezercam::camera::models;
use tweezercam::{
    CameraSection, CoordinateSpace, LatticeSpec, Scenario, Site, TweezerArray,
};

fn reference_scenario() -> Scenario {
    let mut experiment = TweezerArray::reference();
    experiment.fill_rate = Some(0.6);

    Scenario {
        camera: CameraSection::Emccd(models::EMCCD_REFERENCE.clone()),
        experiment,
        lattice: Some(LatticeSpec {
            spacing: (0.168, 0.168),
            count: (5, 4),
            offset: (0.156, 0.27),
            angle_rad: 0.0,
        }),
    }
}

#[test]
fn scenario_survives_disk_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("scenario.json");

    let scenario = reference_scenario();
    scenario.save(&path).expect("save scenario");
    let loaded = Scenario::load(&path).expect("load scenario");

    assert_eq!(loaded, scenario);
}

#[test]
fn resolved_scenario_expands_lattice_in_row_major_order() {
    let (camera, experiment) = reference_scenario().into_parts();

    match camera {
        CameraSection::Emccd(camera) => assert_eq!(camera.resolution, (512, 512)),
        CameraSection::Cmos(_) => panic!("expected an EMCCD camera"),
    }

    assert_eq!(experiment.sites.len(), 20);
    assert_eq!(experiment.coordinate_space, CoordinateSpace::CameraNormalized);
    // First site sits at the offset, its row neighbor one column
    // spacing further along x.
    assert!((experiment.sites[0].x - 0.156).abs() < 1e-12);
    assert!((experiment.sites[1].x - 0.324).abs() < 1e-12);
    assert!((experiment.sites[1].y - 0.27).abs() < 1e-12);
    // Index 5 starts the second row.
    assert!((experiment.sites[5].x - 0.156).abs() < 1e-12);
    assert!((experiment.sites[5].y - 0.438).abs() < 1e-12);
}

#[test]
fn explicit_sites_take_over_when_no_lattice_is_given() {
    let mut scenario = reference_scenario();
    scenario.lattice = None;
    scenario
        .experiment
        .set_sites_physical_space(vec![Site::new(12.0, 8.0), Site::new(17.2, 8.0)]);

    let (_, experiment) = scenario.into_parts();
    assert_eq!(experiment.sites.len(), 2);
    assert_eq!(experiment.coordinate_space, CoordinateSpace::Physical);
    assert_eq!(experiment.sites[1], Site::new(17.2, 8.0));
}

#[test]
fn missing_scenario_file_is_an_error() {
    let err = Scenario::load("/definitely/not/here/scenario.json")
        .expect_err("load must fail for a nonexistent path");
    assert!(err.to_string().contains("I/O error"));
}
