/// Number of neighbor slots on a cell record. Cells with fewer populated
/// slots sit on the physical boundary of the pack.
pub const MAX_NEIGHBORS: usize = 6;

/// Default number of groups in the series chain.
pub const DEFAULT_GROUP_COUNT: usize = 10;

/// Default number of cells per group.
pub const DEFAULT_GROUP_SIZE: usize = 14;

/// Iterations between progress reports of a single search run.
pub const DEFAULT_REPORT_INTERVAL: usize = 10_000;
