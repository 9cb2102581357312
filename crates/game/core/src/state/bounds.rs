//! Map extent inferred from boundary geometry.
//!
//! The server never states the map size. It is recovered after initialization
//! as the largest corner coordinates over every BOUNDARY object.

use serde::Serialize;
use serde_json::Value;

use super::object::{ObjectKind, ObjectRecord};
use crate::error::BoundsError;

/// Width and height of the playable area.
///
/// Both start at zero and are only ever raised, so a world without boundary
/// objects is `0 x 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MapBounds {
    pub width: f64,
    pub height: f64,
}

impl MapBounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Raises the bounds to cover `(x, y)` if it lies beyond them.
    pub fn include(&mut self, x: f64, y: f64) {
        self.width = self.width.max(x);
        self.height = self.height.max(y);
    }

    /// Scans every record and folds BOUNDARY corners into the bounds.
    ///
    /// # Errors
    ///
    /// - `MissingType` if any record lacks an integer `type`
    /// - `CornerCount` / `CornerShape` if a BOUNDARY `position` is not
    ///   exactly four `[x, y]` number pairs
    pub fn derive<'a, I>(objects: I) -> Result<Self, BoundsError>
    where
        I: IntoIterator<Item = (&'a String, &'a ObjectRecord)>,
    {
        let mut bounds = Self::default();

        for (id, record) in objects {
            let tag = record
                .type_tag()
                .ok_or_else(|| BoundsError::MissingType { id: id.clone() })?;

            if ObjectKind::from_tag(tag) != Some(ObjectKind::Boundary) {
                continue;
            }

            for (x, y) in boundary_corners(id, record)? {
                bounds.include(x, y);
            }
        }

        Ok(bounds)
    }
}

/// Extracts the four `(x, y)` corners of a boundary record.
fn boundary_corners(id: &str, record: &ObjectRecord) -> Result<[(f64, f64); 4], BoundsError> {
    let corners = match record.position() {
        Some(Value::Array(corners)) if corners.len() == 4 => corners,
        _ => return Err(BoundsError::CornerCount { id: id.to_owned() }),
    };

    let mut points = [(0.0, 0.0); 4];
    for (index, corner) in corners.iter().enumerate() {
        points[index] = corner_point(corner).ok_or_else(|| BoundsError::CornerShape {
            id: id.to_owned(),
            corner: index,
        })?;
    }

    Ok(points)
}

fn corner_point(corner: &Value) -> Option<(f64, f64)> {
    match corner.as_array()?.as_slice() {
        [x, y] => Some((x.as_f64()?, y.as_f64()?)),
        _ => None,
    }
}
