/*!
 * Validation of corrected subtitle files against their originals.
 *
 * Correction happens elsewhere; this module only asserts that the
 * correction preserved the file's structure (entry count, index sequence,
 * exact timestamp strings).
 */

pub mod structural;

pub use structural::{
    LineCountDelta, StructuralValidator, TimestampField, ValidationReport, Violation,
};
