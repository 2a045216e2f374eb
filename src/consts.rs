// Runtime parameters
pub const DEFAULT_WORKERS: usize = 8;
pub const DEFAULT_OUT_FILE: &str = "./out.png";

// Floating point comparisons, ray origin bias and plane-parallel detection
pub const FEQ_EPSILON: f64 = 0.00001;

/// Compares two floats for approximate equality.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}

// Maximum reflection/refraction bounces per camera ray
pub const MAX_RECURSION_DEPTH: usize = 5;

// Common refraction indices
pub const VACUUM_RI: f64 = 1.0;
pub const AIR_RI: f64 = 1.00029;
pub const WATER_RI: f64 = 1.333;
pub const GLASS_RI: f64 = 1.5;
pub const DIAMOND_RI: f64 = 2.417;

/* Tests */

#[test]
fn feq_within_tolerance() {
    assert!(feq(1.0, 1.0 + FEQ_EPSILON / 2.0));
    assert!(!feq(1.0, 1.0 + FEQ_EPSILON * 2.0));
}
