/// Checked numeric conversions.
///
/// Mixed INTEGER/REAL arithmetic promotes integers to `f64`; the helpers
/// here refuse any promotion that would silently lose precision.
pub mod num;
