use serde::Serialize;

/// Axis-aligned bounding box in 3-D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Smallest box containing every point, `None` when there are no points.
    pub fn from_points(points: impl IntoIterator<Item = [f64; 3]>) -> Option<BoundingBox> {
        points.into_iter().fold(None, |acc, p| {
            let bb = BoundingBox { min: p, max: p };
            Some(match acc {
                Some(acc) => acc.merge(&bb),
                None => bb,
            })
        })
    }

    /// Return the smallest box that contains both `self` and `other`.
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: std::array::from_fn(|i| self.min[i].min(other.min[i])),
            max: std::array::from_fn(|i| self.max[i].max(other.max[i])),
        }
    }

    /// Apply a per-axis scale followed by a translation.
    ///
    /// Negative scale factors swap the corresponding min/max.
    pub fn scaled_translated(&self, scale: [f64; 3], translation: [f64; 3]) -> BoundingBox {
        let a: [f64; 3] = std::array::from_fn(|i| self.min[i] * scale[i] + translation[i]);
        let b: [f64; 3] = std::array::from_fn(|i| self.max[i] * scale[i] + translation[i]);
        BoundingBox {
            min: std::array::from_fn(|i| a[i].min(b[i])),
            max: std::array::from_fn(|i| a[i].max(b[i])),
        }
    }
}
