use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;
use strata_geom::{IVec3, Vec3};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn approx_abs_rel(a: f32, b: f32, atol: f32, rtol: f32) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= atol + rtol * scale
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e6)
}

fn bounded_nonzero_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded_nonzero", |v| {
        v.is_finite() && {
            let a = v.abs();
            (1e-3..=1e3).contains(&a)
        }
    })
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_nondegenerate_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_nonzero_f32(), bounded_nonzero_f32(), bounded_nonzero_f32())
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn small_ivec3() -> impl Strategy<Value = IVec3> {
    (-100_000i32..=100_000, -100_000i32..=100_000, -100_000i32..=100_000)
        .prop_map(|(x, y, z)| IVec3::new(x, y, z))
}

proptest! {
    // Distributive property of dot over addition: (a + b)·c = a·c + b·c
    #[test]
    fn vec3_dot_distributive(a in arb_vec3(), b in arb_vec3(), c in arb_vec3()) {
        let left = (a + b).dot(c);
        let right = a.dot(c) + b.dot(c);
        prop_assert!(approx_abs_rel(left, right, 1e-3, 1e-4));
    }

    // Normalized length is 1 for non-zero vectors
    #[test]
    fn vec3_normalized_length(v in arb_nondegenerate_vec3()) {
        prop_assert!(approx(v.normalized().length(), 1.0, 1e-3));
    }

    // Negation flips every component
    #[test]
    fn vec3_neg_is_additive_inverse(v in arb_vec3()) {
        let s = v + (-v);
        prop_assert_eq!(s, Vec3::ZERO);
    }

    // round_to_cell lands within half a unit of the input
    #[test]
    fn round_to_cell_is_nearest(x in -1e4f32..1e4, y in -1e4f32..1e4, z in -1e4f32..1e4) {
        let c = Vec3::new(x, y, z).round_to_cell();
        prop_assert!((c.x as f32 - x).abs() <= 0.5 + 1e-3);
        prop_assert!((c.y as f32 - y).abs() <= 0.5 + 1e-3);
        prop_assert!((c.z as f32 - z).abs() <= 0.5 + 1e-3);
    }

    // Integer add/sub round-trip exactly
    #[test]
    fn ivec3_add_sub_roundtrip(a in small_ivec3(), b in small_ivec3()) {
        prop_assert_eq!((a + b) - b, a);
        prop_assert_eq!(a + (-a), IVec3::ZERO);
    }
}
