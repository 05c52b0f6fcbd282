mod allocation;
mod layout;
mod paths;

pub use allocation::{adjust_boundary, normalize_allocations};
pub use layout::{PhaseNode, boundary_handles, layout_nodes, phase_at, ring_radius};
pub use paths::{
    PROGRESS_RADIUS_FACTOR, ProgressArc, WEDGE_RADIUS_FACTOR, Wedge, iteration_connectors,
    phase_wedges, progress_fraction,
};
