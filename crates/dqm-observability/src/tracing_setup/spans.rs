//! Span definitions. `dqm-element` opens the quality and cycle spans itself
//! under the names below; harvests are opened here.

/// Create a harvest span over a tree.
#[macro_export]
macro_rules! harvest_span {
    ($root:expr) => {
        tracing::info_span!("dqm.harvest", root = %$root)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const QUALITY: &str = "dqm.quality";
    pub const CYCLE: &str = "dqm.cycle";
    pub const HARVEST: &str = "dqm.harvest";
}
