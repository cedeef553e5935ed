//! Functions for reading/writing trajectory frames in CSV format.
pub use csv::Error;
use crate::{Coord, Point as _};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// One row of a trajectory: the driver angle and the four joints.
///
/// Joint columns are empty if the position is infeasible.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Frame {
    /// Driver angle
    pub theta: f64,
    /// X of the driver pivot
    pub p1x: Option<f64>,
    /// Y of the driver pivot
    pub p1y: Option<f64>,
    /// X of the driver tip
    pub p2x: Option<f64>,
    /// Y of the driver tip
    pub p2y: Option<f64>,
    /// X of the follower tip
    pub p3x: Option<f64>,
    /// Y of the follower tip
    pub p3y: Option<f64>,
    /// X of the follower pivot
    pub p4x: Option<f64>,
    /// Y of the follower pivot
    pub p4y: Option<f64>,
}

impl Frame {
    /// A feasible position.
    pub fn feasible(theta: f64, [p1, p2, p3, p4]: [Coord; 4]) -> Self {
        Self {
            theta,
            p1x: Some(p1.x()),
            p1y: Some(p1.y()),
            p2x: Some(p2.x()),
            p2y: Some(p2.y()),
            p3x: Some(p3.x()),
            p3y: Some(p3.y()),
            p4x: Some(p4.x()),
            p4y: Some(p4.y()),
        }
    }

    /// An infeasible position.
    pub fn infeasible(theta: f64) -> Self {
        Self {
            theta,
            p1x: None,
            p1y: None,
            p2x: None,
            p2y: None,
            p3x: None,
            p3y: None,
            p4x: None,
            p4y: None,
        }
    }

    /// Create from a trajectory item.
    pub fn from_item<E>((theta, joints): (f64, Result<[Coord; 4], E>)) -> Self {
        Self::from((theta, joints.ok()))
    }

    /// The joints if all columns are present.
    pub fn joints(&self) -> Option<[Coord; 4]> {
        Some([
            [self.p1x?, self.p1y?],
            [self.p2x?, self.p2y?],
            [self.p3x?, self.p3y?],
            [self.p4x?, self.p4y?],
        ])
    }
}

impl From<(f64, Option<[Coord; 4]>)> for Frame {
    fn from((theta, joints): (f64, Option<[Coord; 4]>)) -> Self {
        match joints {
            Some(joints) => Self::feasible(theta, joints),
            None => Self::infeasible(theta),
        }
    }
}

/// Read frames, lines start with `#` are skipped.
pub fn read_frames<R: Read>(r: R) -> Result<Vec<Frame>, Error> {
    ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(b'#'))
        .from_reader(r)
        .deserialize()
        .collect()
}

/// Write frames with a header row.
pub fn write_frames<'a, W, I>(w: W, frames: I) -> Result<(), Error>
where
    W: Write,
    I: IntoIterator<Item = &'a Frame>,
{
    let mut w = WriterBuilder::new().has_headers(true).from_writer(w);
    frames.into_iter().try_for_each(|f| w.serialize(f))?;
    w.flush()?;
    Ok(())
}
