//! Sampling of an interpolated field over a regular Cartesian plane.

use crate::{
    coordinates::{self, AzimuthalDirection},
    engine::InterpolationEngine,
    error::{FieldError, FieldResult},
    geometry::{
        Dim3::{self, X, Y, Z},
        Point3, Vec3,
    },
    grid::regular_axis,
    interpolation::fip,
    io::{utils::write_text_matrix, Verbosity},
};
use indicatif::ParallelProgressIterator;
use lazy_static::lazy_static;
use ndarray::Array2;
use rayon::prelude::*;
use std::{collections::HashMap, fmt, io::Write};

/// Plane spanned by the two varying Cartesian coordinates of a dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DumpPlane {
    XY,
    XZ,
    YZ,
}

impl DumpPlane {
    /// Returns the (first, second, fixed) dimensions of the plane.
    pub fn dims(self) -> (Dim3, Dim3, Dim3) {
        match self {
            Self::XY => (X, Y, Z),
            Self::XZ => (X, Z, Y),
            Self::YZ => (Y, Z, X),
        }
    }

    /// Parses a plane name like `xz`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "xy" => Some(Self::XY),
            "xz" => Some(Self::XZ),
            "yz" => Some(Self::YZ),
            _ => None,
        }
    }
}

impl fmt::Display for DumpPlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, second, _) = self.dims();
        write!(f, "{}{}", first, second)
    }
}

/// Field quantity written by a dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DumpQuantity {
    Bx,
    By,
    Bz,
    Br,
    Bphi,
    Bmag,
}

lazy_static! {
    static ref DUMP_QUANTITIES: HashMap<&'static str, (DumpQuantity, &'static str)> = vec![
        ("bx", (DumpQuantity::Bx, "Cartesian x-component of the field")),
        ("by", (DumpQuantity::By, "Cartesian y-component of the field")),
        ("bz", (DumpQuantity::Bz, "Axial component of the field")),
        ("br", (DumpQuantity::Br, "Radial component of the field")),
        ("bphi", (DumpQuantity::Bphi, "Toroidal component of the field")),
        ("bmag", (DumpQuantity::Bmag, "Magnitude of the field")),
    ]
    .into_iter()
    .collect();
}

impl DumpQuantity {
    /// Returns the names of all quantities that can be dumped.
    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = DUMP_QUANTITIES.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Parses a quantity name like `bphi`.
    pub fn from_name(name: &str) -> Option<Self> {
        DUMP_QUANTITIES
            .get(name.to_lowercase().as_str())
            .map(|&(quantity, _)| quantity)
    }

    /// Returns a short description of the quantity.
    pub fn description(self) -> &'static str {
        DUMP_QUANTITIES
            .values()
            .find(|(quantity, _)| *quantity == self)
            .map(|&(_, description)| description)
            .unwrap_or_default()
    }

    /// Extracts the quantity from the Cartesian field at the given position.
    fn extract(self, position: &Point3<fip>, field: &Vec3<fip>) -> fip {
        match self {
            Self::Bx => field[X],
            Self::By => field[Y],
            Self::Bz => field[Z],
            Self::Bmag => field.length(),
            Self::Br | Self::Bphi => {
                let r = coordinates::cylindrical_radius(position);
                // Transverse field components vanish on the axis
                let (radial, toroidal) = if r > 0.0 {
                    AzimuthalDirection::from_cartesian(position[X], position[Y], r)
                        .to_cylindrical(field[X], field[Y])
                } else {
                    (0.0, 0.0)
                };
                if self == Self::Br {
                    radial
                } else {
                    toroidal
                }
            }
        }
    }
}

impl fmt::Display for DumpQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Bx => "bx",
                Self::By => "by",
                Self::Bz => "bz",
                Self::Br => "br",
                Self::Bphi => "bphi",
                Self::Bmag => "bmag",
            }
        )
    }
}

/// Configuration parameters for field dumps.
#[derive(Clone, Debug)]
pub struct FieldDumpConfig {
    /// Plane to sample.
    pub plane: DumpPlane,
    /// Value of the coordinate normal to the plane.
    pub fixed_coord: fip,
    /// Range of the first varying coordinate, which indexes the rows.
    pub first_bounds: (fip, fip),
    /// Range of the second varying coordinate, which indexes the columns.
    pub second_bounds: (fip, fip),
    /// Number of samples along the first and second coordinate.
    pub shape: (usize, usize),
    /// Quantity to sample.
    pub quantity: DumpQuantity,
}

impl FieldDumpConfig {
    pub const DEFAULT_PLANE: DumpPlane = DumpPlane::XZ;
    pub const DEFAULT_FIXED_COORD: fip = 0.0;
    pub const DEFAULT_FIRST_BOUNDS: (fip, fip) = (3.5, 8.9);
    pub const DEFAULT_SECOND_BOUNDS: (fip, fip) = (-5.5, 5.5);
    pub const DEFAULT_SHAPE: (usize, usize) = (110, 220);
    pub const DEFAULT_QUANTITY: DumpQuantity = DumpQuantity::Bz;

    /// Panics if any of the configuration parameters are invalid.
    pub fn validate(&self) {
        assert!(
            self.fixed_coord.is_finite(),
            "Fixed coordinate must be finite"
        );
        assert!(
            self.first_bounds.1 > self.first_bounds.0,
            "First coordinate bounds must be increasing"
        );
        assert!(
            self.second_bounds.1 > self.second_bounds.0,
            "Second coordinate bounds must be increasing"
        );
        assert!(
            self.shape.0 >= 2 && self.shape.1 >= 2,
            "Dump must have at least two samples along each coordinate"
        );
    }

    /// Returns the sample coordinates along the first and second varying coordinate.
    pub fn coordinates(&self) -> (Vec<fip>, Vec<fip>) {
        (
            regular_axis(self.shape.0, self.first_bounds.0, self.first_bounds.1),
            regular_axis(self.shape.1, self.second_bounds.0, self.second_bounds.1),
        )
    }

    /// Returns the position corresponding to the given pair of in-plane coordinates.
    pub fn position(&self, first: fip, second: fip) -> Point3<fip> {
        let (first_dim, second_dim, _) = self.plane.dims();
        Point3::with_each_component(|dim| {
            if dim == first_dim {
                first
            } else if dim == second_dim {
                second
            } else {
                self.fixed_coord
            }
        })
    }
}

impl Default for FieldDumpConfig {
    fn default() -> Self {
        Self {
            plane: Self::DEFAULT_PLANE,
            fixed_coord: Self::DEFAULT_FIXED_COORD,
            first_bounds: Self::DEFAULT_FIRST_BOUNDS,
            second_bounds: Self::DEFAULT_SECOND_BOUNDS,
            shape: Self::DEFAULT_SHAPE,
            quantity: Self::DEFAULT_QUANTITY,
        }
    }
}

/// Evaluates a field quantity over the plane described by the configuration.
///
/// # Parameters
///
/// - `engine`: Initialized interpolation engine to evaluate with.
/// - `config`: Plane, sampling and quantity to dump.
/// - `verbosity`: Whether to print status messages and progress.
///
/// # Returns
///
/// A `FieldResult` which is either:
///
/// - `Ok`: Contains a matrix where element `[i, j]` is the quantity at the
///   `i`th first and `j`th second coordinate.
/// - `Err`: Contains the first error produced by the engine.
pub fn dump_field_component(
    engine: &InterpolationEngine,
    config: &FieldDumpConfig,
    verbosity: &Verbosity,
) -> FieldResult<Array2<fip>> {
    config.validate();
    if !engine.is_initialized() {
        return Err(FieldError::UninitializedEngine);
    }
    let (first_coords, second_coords) = config.coordinates();

    if verbosity.print_messages() {
        println!(
            "Sampling {} in {} plane at {} = {} on {}x{} points",
            config.quantity,
            config.plane,
            config.plane.dims().2,
            config.fixed_coord,
            config.shape.0,
            config.shape.1
        );
    }

    let rows = first_coords
        .par_iter()
        .progress_with(verbosity.create_progress_bar(first_coords.len()))
        .map_init(
            || engine.clone(),
            |engine, &first| {
                second_coords
                    .iter()
                    .map(|&second| -> FieldResult<fip> {
                        let position = config.position(first, second);
                        let field = engine.evaluate(&position)?;
                        Ok(config.quantity.extract(&position, &field))
                    })
                    .collect::<FieldResult<Vec<fip>>>()
            },
        )
        .collect::<FieldResult<Vec<Vec<fip>>>>()?;

    let values = rows.into_iter().flatten().collect();
    Ok(Array2::from_shape_vec(config.shape, values)
        .expect("Number of samples is consistent with shape"))
}

/// Evaluates a field quantity over a plane and writes it as a text matrix.
pub fn write_field_component<W: Write>(
    writer: W,
    engine: &InterpolationEngine,
    config: &FieldDumpConfig,
    verbosity: &Verbosity,
) -> FieldResult<()> {
    let values = dump_field_component(engine, config, verbosity)?;
    write_text_matrix(writer, &values)?;
    Ok(())
}
