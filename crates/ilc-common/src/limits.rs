//! Centralized limits and thresholds used by the lowering pass.

/// Upper bound on fields considered when matching a sibling struct for
/// field-type refinement (spec.md §4.2 pass 5: "smallest matching struct
/// wins, ≤10 fields").
pub const STRUCT_FIELD_MATCH_MAX: usize = 10;

/// Backing capacity (in elements) allocated via `calloc` for an
/// empty-array-literal initializer before any `push` calls are seen
/// (spec.md §4.3: "`calloc(256 / sizeof(T), sizeof(T))`").
pub const EMPTY_ARRAY_BACKING_BYTES: usize = 256;
