use std::collections::BTreeMap;

/// External identifier of a cell, as written in the cell records (1..=N).
pub type CellId = u32;

/// Index of a group along the series chain (1..=group_count).
pub type GroupId = u8;

/// Persisted form of a partition: cell id (text) -> group index (text).
///
/// This is the shape of both the seed solution and the optimizer output.
pub type Assignment = BTreeMap<String, String>;
