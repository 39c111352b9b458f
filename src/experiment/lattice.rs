//! Regular rotated-lattice site layouts.

use serde::{Deserialize, Serialize};

use super::Site;

/// A regular grid of atom sites, rotated about its first site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeSpec {
    /// Distance between neighboring columns and rows (x, y).
    pub spacing: (f64, f64),
    /// Number of columns and rows (x, y).
    pub count: (u32, u32),
    /// Position of the first site (x, y).
    pub offset: (f64, f64),
    /// Rotation of the whole grid about the first site, in radians.
    #[serde(default)]
    pub angle_rad: f64,
}

/// Expand a lattice spec into its site list.
///
/// Sites are produced in row-major order (row by row, columns within a
/// row) at `offset + col * c + row * r`, where `c` and `r` are the
/// column and row spacing vectors rotated by the grid angle.
pub fn lattice_sites(spec: &LatticeSpec) -> Vec<Site> {
    let (sin, cos) = spec.angle_rad.sin_cos();
    let column_step = (spec.spacing.0 * cos, spec.spacing.0 * sin);
    let row_step = (-spec.spacing.1 * sin, spec.spacing.1 * cos);
    let (columns, rows) = spec.count;

    let mut sites = Vec::with_capacity(columns as usize * rows as usize);
    for row in 0..rows {
        for column in 0..columns {
            let c = f64::from(column);
            let r = f64::from(row);
            sites.push(Site::new(
                spec.offset.0 + c * column_step.0 + r * row_step.0,
                spec.offset.1 + c * column_step.1 + r * row_step.1,
            ));
        }
    }
    sites
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn unrotated_grid_is_axis_aligned() {
        let spec = LatticeSpec {
            spacing: (2.0, 3.0),
            count: (3, 2),
            offset: (10.0, 20.0),
            angle_rad: 0.0,
        };
        let sites = lattice_sites(&spec);

        assert_eq!(sites.len(), 6);
        assert_relative_eq!(sites[0].x, 10.0);
        assert_relative_eq!(sites[0].y, 20.0);
        // Columns advance along x within a row.
        assert_relative_eq!(sites[1].x, 12.0);
        assert_relative_eq!(sites[1].y, 20.0);
        assert_relative_eq!(sites[2].x, 14.0);
        // Row-major: index 3 starts the second row.
        assert_relative_eq!(sites[3].x, 10.0);
        assert_relative_eq!(sites[3].y, 23.0);
        assert_relative_eq!(sites[5].x, 14.0);
        assert_relative_eq!(sites[5].y, 23.0);
    }

    #[test]
    fn rotation_pivots_on_first_site() {
        let offset = (0.4, 0.6);
        for angle_rad in [0.0, 0.3, FRAC_PI_2, 2.5] {
            let spec = LatticeSpec {
                spacing: (0.1, 0.1),
                count: (4, 4),
                offset,
                angle_rad,
            };
            let first = lattice_sites(&spec)[0];
            assert_relative_eq!(first.x, offset.0);
            assert_relative_eq!(first.y, offset.1);
        }
    }

    #[test]
    fn quarter_turn_swaps_axes() {
        let spec = LatticeSpec {
            spacing: (2.0, 3.0),
            count: (2, 2),
            offset: (0.0, 0.0),
            angle_rad: FRAC_PI_2,
        };
        let sites = lattice_sites(&spec);

        // Column step rotates from (2, 0) to (0, 2).
        assert_relative_eq!(sites[1].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(sites[1].y, 2.0, epsilon = 1e-12);
        // Row step rotates from (0, 3) to (-3, 0).
        assert_relative_eq!(sites[2].x, -3.0, epsilon = 1e-12);
        assert_relative_eq!(sites[2].y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rotation_preserves_spacing() {
        let spec = LatticeSpec {
            spacing: (0.2, 0.5),
            count: (3, 3),
            offset: (1.0, 1.0),
            angle_rad: 0.7,
        };
        let sites = lattice_sites(&spec);

        let column_gap = f64::hypot(sites[1].x - sites[0].x, sites[1].y - sites[0].y);
        let row_gap = f64::hypot(sites[3].x - sites[0].x, sites[3].y - sites[0].y);
        assert_relative_eq!(column_gap, 0.2, epsilon = 1e-12);
        assert_relative_eq!(row_gap, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn empty_counts_yield_no_sites() {
        let spec = LatticeSpec {
            spacing: (1.0, 1.0),
            count: (0, 5),
            offset: (0.0, 0.0),
            angle_rad: 0.0,
        };
        assert!(lattice_sites(&spec).is_empty());
    }
}
