//! Four-bar linkage position solver.
//!
//! The driver link of a planar four-bar linkage is placed by its input angle
//! and the follower tip is found by bilateration, the intersection of two
//! circles in closed form. Infeasible positions are reported as errors
//! instead of invalid coordinates.
//!
//! ```
//! use four_bar::FourBarLinkage;
//!
//! let mut fb = FourBarLinkage::new(1., 1., 1., 1.).unwrap();
//! for (theta, joints) in fb.trajectory(0., std::f64::consts::PI, 0.1).unwrap() {
//!     match joints {
//!         Ok([p1, p2, p3, p4]) => println!("{theta:.2}: {p1:?} {p2:?} {p3:?} {p4:?}"),
//!         Err(e) => println!("{theta:.2}: {e}"),
//!     }
//! }
//! ```
#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]
pub use crate::{bilateration::*, error::*, linkage::*, point::*, ty::*};

mod bilateration;
#[cfg(feature = "csv")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "csv")))]
pub mod csv;
mod error;
mod linkage;
#[cfg(feature = "plot")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "plot")))]
pub mod plot;
mod point;
mod ty;
