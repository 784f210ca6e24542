//! Property-based invariant tests for the color model.
//!
//! These verify the contracts that must hold for any valid inputs:
//!
//! 1. Hex round-trip: parsing a 6-digit hex and re-serializing is lossless.
//! 2. Display normalization is idempotent.
//! 3. Parsing never panics, whatever the input.
//! 4. Contrast ratio is symmetric and within [1, 21].
//! 5. Luminance stays in [0, 1]; saturation stays in [0, 100].
//! 6. Hue rotation by a full turn is the identity; rotations compose.
//! 7. Mix endpoints return the inputs unchanged; the midpoint is symmetric.
//! 8. Delta E is symmetric, non-negative, and zero on identical colors.

use huelab_color::{Color, analysis, mix, normalize_hex, palette};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn color_strategy() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::from_rgb8(r, g, b))
}

fn hex6_strategy() -> impl Strategy<Value = String> {
    (0u32..=0xff_ffff).prop_map(|v| format!("#{v:06x}"))
}

fn hex_any_len_strategy() -> impl Strategy<Value = String> {
    let digit = proptest::sample::select("0123456789abcdefABCDEF".chars().collect::<Vec<_>>());
    (proptest::sample::select(vec![3usize, 4, 6, 8]), proptest::collection::vec(digit, 8))
        .prop_map(|(len, digits)| {
            let mut s = String::from("#");
            s.extend(digits.iter().take(len));
            s
        })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Hex round-trip is lossless
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hex6_round_trip(hex in hex6_strategy()) {
        let color = Color::parse(&hex).unwrap();
        prop_assert_eq!(color.to_hex(), hex);
    }

    #[test]
    fn hex8_round_trip(v in any::<u32>()) {
        let hex = format!("#{v:08x}");
        let color = Color::parse(&hex).unwrap();
        if v & 0xff == 0xff {
            // A full-opacity alpha byte serializes back to the 6-digit form.
            prop_assert_eq!(color.to_hex(), hex[..7].to_string());
        } else {
            prop_assert_eq!(color.to_hex(), hex);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Display normalization is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalize_idempotent(hex in hex_any_len_strategy()) {
        let once = normalize_hex(&hex);
        prop_assert_eq!(normalize_hex(&once), once.clone(), "input {}", hex);
    }

    #[test]
    fn normalize_of_valid_hex_is_six_digits(hex in hex_any_len_strategy()) {
        let normalized = normalize_hex(&hex);
        prop_assert_eq!(normalized.len(), 7, "input {}", hex);
        prop_assert!(normalized.starts_with('#'));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Parsing never panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn parse_never_panics(input in any::<String>()) {
        let _ = Color::parse(&input);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Contrast ratio symmetry and range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn contrast_symmetric(a in color_strategy(), b in color_strategy()) {
        prop_assert_eq!(
            analysis::contrast_ratio(&a, &b),
            analysis::contrast_ratio(&b, &a)
        );
    }

    #[test]
    fn contrast_in_range(a in color_strategy(), b in color_strategy()) {
        let ratio = analysis::contrast_ratio(&a, &b);
        prop_assert!((1.0..=21.0).contains(&ratio), "ratio {}", ratio);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Metric ranges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn luminance_in_unit_range(c in color_strategy()) {
        let lum = analysis::luminance(&c);
        prop_assert!((0.0..=1.0).contains(&lum), "luminance {}", lum);
    }

    #[test]
    fn saturation_is_percentage(c in color_strategy()) {
        let sat = analysis::saturation(&c);
        prop_assert!((0.0..=100.0).contains(&sat), "saturation {}", sat);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Hue rotation wraps
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn full_turn_is_identity(c in color_strategy()) {
        prop_assert_eq!(palette::hue_rotate(&c, 360.0), c);
        prop_assert_eq!(palette::hue_rotate(&c, -360.0), c);
    }

    #[test]
    fn rotations_compose_on_hue(c in color_strategy(), a in 0.0f64..360.0, b in 0.0f64..360.0) {
        let stepped = palette::hue_rotate(&palette::hue_rotate(&c, a), b);
        let direct = palette::hue_rotate(&c, a + b);
        let gap = (stepped.hue() - direct.hue()).abs();
        // Compare hue angles (mod 360) rather than quantized colors so a
        // float ulp at a rounding boundary cannot flip the assertion.
        prop_assert!(gap < 1e-9 || (360.0 - gap) < 1e-9, "gap {}", gap);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Mix endpoints and symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mix_endpoints(a in color_strategy(), b in color_strategy()) {
        prop_assert_eq!(mix(&a, &b, 1.0), a);
        prop_assert_eq!(mix(&a, &b, 0.0), b);
    }

    #[test]
    fn mix_midpoint_symmetric(a in color_strategy(), b in color_strategy()) {
        prop_assert_eq!(mix(&a, &b, 0.5), mix(&b, &a, 0.5));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Delta E basics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn delta_e_symmetric_and_non_negative(a in color_strategy(), b in color_strategy()) {
        let ab = analysis::delta_e(&a, &b);
        let ba = analysis::delta_e(&b, &a);
        prop_assert_eq!(ab, ba);
        prop_assert!(ab >= 0.0);
    }

    #[test]
    fn delta_e_zero_on_self(c in color_strategy()) {
        prop_assert_eq!(analysis::delta_e(&c, &c), 0.0);
    }
}
