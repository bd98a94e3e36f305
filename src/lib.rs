//! Import and export of strided multidimensional arrays to and from datasets in a [Zarr V3](https://zarr.dev) hierarchy.
//!
//! An in-memory array is addressed through an [`ArrayView`](array::ArrayView) or [`ArrayViewMut`](array::ArrayViewMut), which can be contiguous or strided.
//! Elements are scalars, [`RgbValue`](element::RgbValue)s or [`TinyVector`](element::TinyVector)s.
//! A dataset of composite elements has a trailing stored dimension holding the components of each element.
//!
//! ## Getting Started
//! - [`impex`] has the file level entry points: [`write_array`](impex::write_array), [`ImportInfo`](impex::ImportInfo) and [`read_array`](impex::read_array).
//! - [`container::Container`] exposes the same operations on any [`zarrs`] store, and the dataset creation, reuse and overwrite policy.
//! - [`array::shape_adapter`] translates between strided views and the flat component order of a dataset.
//!
//! ## Example
//! ```rust
//! # use zarrs_impex::{array::{ArrayView, ArrayViewMut}, element::RgbValue, impex::{read_array, write_array, ImportInfo}};
//! # let dir = tempfile::TempDir::new()?;
//! # let file_path = dir.path().join("rgb.zarr");
//! // A 5x3x8 RGB volume, exported as the strided 5x8 slice at index 0 of the middle dimension
//! let volume: Vec<RgbValue<f64>> = (0..120)
//!     .map(|i| RgbValue::new(i as f64 + 0.1, i as f64 + 0.2, i as f64 + 0.3))
//!     .collect();
//! let slice = ArrayView::from_shape(vec![5, 3, 8], &volume)?.bind_at(1, 0)?;
//! write_array(&file_path, "group/subgroup/data", &slice)?;
//!
//! let info = ImportInfo::new(&file_path, "group/subgroup/data")?;
//! assert_eq!(info.shape(), &[5, 8, 3]);
//! let mut image = vec![RgbValue::<f64>::default(); 40];
//! let shape = vec![info.shape()[0], info.shape()[1]];
//! read_array(&info, &mut ArrayViewMut::from_shape(shape, &mut image)?)?;
//! assert_eq!(image, slice.to_vec());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Features
//! #### Default
//!  - `ndarray`: [`read_ndarray`](impex::read_ndarray) to read a dataset into an [`ndarray::ArrayD`].
//!
//! ## Licence
//! `zarrs_impex` is licensed under either of
//!  - the Apache License, Version 2.0 [LICENSE-APACHE](./LICENCE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0> or
//!  - the MIT license [LICENSE-MIT](./LICENCE-MIT) or <http://opensource.org/licenses/MIT>, at your option.
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted for inclusion in the work by you, as defined in the Apache-2.0 license, shall be dual licensed as above, without any additional terms or conditions.

#![warn(unused_variables)]
#![warn(dead_code)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![deny(clippy::missing_panics_doc)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod array;
pub mod config;
pub mod container;
pub mod element;
pub mod impex;
