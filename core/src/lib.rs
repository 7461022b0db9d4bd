#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Summary statistics for population genetic variation data.
//!
//! This serves as the core library implementation for the `msstats` CLI, but can also be used as
//! a free-standing library for computing statistics from simulated or observed variation.
//!
//! # Overview
//!
//! The core struct is a [`VariantMatrix`], which holds genotype calls for a number of variable
//! sites and samples, along with the position of each site. Zero-copy views of single sites
//! ([`SiteView`]) and single samples ([`SampleView`]) can be taken from the matrix, and sites or
//! samples may be removed in place using [`filter_sites`] and [`filter_samples`].
//!
//! Statistics live in the [`stat`] module, and are computed from a matrix without modifying it.
//!
//! # Example
//!
//! As a very brief introduction to the API, let's create a matrix of two sites and four samples,
//! and then calculate the classic frequency spectrum statistics.
//!
//! ```
//! use msstats_core::{stat::{Classic, Polarity}, VariantMatrix};
//!
//! // Create a matrix from one string of calls per site
//! let matrix = VariantMatrix::from_sites([(0.1, "0110"), (0.2, "0001")]).unwrap();
//!
//! // Calculate statistics, treating 0 as the ancestral call
//! let classic = Classic::from_matrix(&matrix, &Polarity::Ancestral(0)).unwrap();
//!
//! assert_eq!(classic.numpoly, 2);
//! assert!((classic.thetapi - 7. / 6.).abs() < 1e-12);
//! ```

#[cfg(test)]
#[macro_use]
pub(crate) mod approx;

mod error;
pub use error::Error;

pub mod input;
pub use input::Input;

pub mod matrix;
pub use matrix::{
    filter_samples, filter_sites, Genotype, IndexError, SampleView, ShapeError, SiteView,
    VariantMatrix,
};

pub mod stat;

pub mod utils;
