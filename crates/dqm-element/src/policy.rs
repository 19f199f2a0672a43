//! Which getters report values relative to the soft-reset baseline.
//!
//! | getter | histograms | profile | scalar |
//! |---|---|---|---|
//! | bin content / error, entries, mean, RMS (+ errors) | delta | delta | absolute |
//! | bin entries | n/a | delta | n/a |
//! | y min / y max | n/a | absolute | n/a |
//! | value string, binning | absolute | absolute | absolute |

use dqm_core::AggregateKind;

/// Getters whose soft-reset behaviour is defined by the policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Getter {
    BinContent,
    BinError,
    Entries,
    BinEntries,
    Mean,
    MeanError,
    Rms,
    RmsError,
    YMin,
    YMax,
    ValueString,
}

impl Getter {
    pub const ALL: [Getter; 11] = [
        Getter::BinContent,
        Getter::BinError,
        Getter::Entries,
        Getter::BinEntries,
        Getter::Mean,
        Getter::MeanError,
        Getter::Rms,
        Getter::RmsError,
        Getter::YMin,
        Getter::YMax,
        Getter::ValueString,
    ];
}

/// Per-kind soft-reset policy.
pub struct SoftResetPolicy;

impl SoftResetPolicy {
    /// True when `getter` on an element of `kind` reads `current - baseline`
    /// while soft reset is active.
    pub fn is_baseline_relative(kind: AggregateKind, getter: Getter) -> bool {
        match kind {
            AggregateKind::Scalar => false,
            AggregateKind::Histogram1D
            | AggregateKind::Histogram2D
            | AggregateKind::Histogram3D
            | AggregateKind::Profile => matches!(
                getter,
                Getter::BinContent
                    | Getter::BinError
                    | Getter::Entries
                    | Getter::BinEntries
                    | Getter::Mean
                    | Getter::MeanError
                    | Getter::Rms
                    | Getter::RmsError
            ),
        }
    }
}
