//! # dqm-aggregates
//!
//! Concrete statistical aggregates wrapped by monitoring elements:
//! - [`Histogram`]: 1-D, 2-D and 3-D fixed-width histograms
//! - [`Profile`]: mean of y per x bin
//! - [`Scalar`]: integer, real or string value

/// Forward every [`AggregateView`](dqm_core::AggregateView) method to a
/// `BinnedContents` field.
macro_rules! delegate_binned_view {
    ($ty:ty, $field:ident) => {
        impl dqm_core::AggregateView for $ty {
            fn kind(&self) -> dqm_core::AggregateKind {
                self.$field.kind()
            }
            fn entries(&self) -> dqm_core::DqmResult<f64> {
                self.$field.entries()
            }
            fn n_bins(&self, axis: dqm_core::Axis) -> dqm_core::DqmResult<usize> {
                self.$field.n_bins(axis)
            }
            fn bin_center(&self, axis: dqm_core::Axis, bin: usize) -> dqm_core::DqmResult<f64> {
                self.$field.bin_center(axis, bin)
            }
            fn bin_content(&self, bin: dqm_core::BinIndex) -> dqm_core::DqmResult<f64> {
                self.$field.bin_content(bin)
            }
            fn bin_error(&self, bin: dqm_core::BinIndex) -> dqm_core::DqmResult<f64> {
                self.$field.bin_error(bin)
            }
            fn bin_entries(&self, bin: usize) -> dqm_core::DqmResult<f64> {
                self.$field.bin_entries(bin)
            }
            fn mean(&self, axis: dqm_core::Axis) -> dqm_core::DqmResult<f64> {
                self.$field.mean(axis)
            }
            fn mean_error(&self, axis: dqm_core::Axis) -> dqm_core::DqmResult<f64> {
                self.$field.mean_error(axis)
            }
            fn rms(&self, axis: dqm_core::Axis) -> dqm_core::DqmResult<f64> {
                self.$field.rms(axis)
            }
            fn rms_error(&self, axis: dqm_core::Axis) -> dqm_core::DqmResult<f64> {
                self.$field.rms_error(axis)
            }
            fn y_min(&self) -> dqm_core::DqmResult<f64> {
                self.$field.y_min()
            }
            fn y_max(&self) -> dqm_core::DqmResult<f64> {
                self.$field.y_max()
            }
        }
    };
}

pub mod histogram;
pub mod labels;
pub mod profile;
pub mod scalar;

pub use histogram::Histogram;
pub use profile::Profile;
pub use scalar::Scalar;
