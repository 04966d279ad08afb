//! IEEE-754 binary16 conversion.
//!
//! Conversions round to nearest, ties to even. Values too large for a half
//! become infinity; values too small become signed zero.
//!
//! Encoding starts from the `f64` bits: rounding through `f32` first can
//! land on the wrong half.

/// Converts an `f64` to binary16 bits with a single rounding step.
pub fn f64_to_f16_bits(value: f64) -> u16 {
    let bits = value.to_bits();
    let sign = ((bits >> 48) & 0x8000) as u16;
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let mantissa = bits & 0x000f_ffff_ffff_ffff;

    // Infinity and NaN; NaN keeps the quiet bit so it stays a NaN.
    if exponent == 0x7ff {
        if mantissa == 0 {
            return sign | 0x7c00;
        }
        return sign | 0x7e00 | (mantissa >> 42) as u16;
    }

    let unbiased = exponent - 1023;
    if unbiased > 15 {
        return sign | 0x7c00;
    }

    if unbiased >= -14 {
        let mut half = (((unbiased + 15) as u64) << 10) | (mantissa >> 42);
        let rest = mantissa & ((1 << 42) - 1);
        let halfway = 1 << 41;
        if rest > halfway || (rest == halfway && half & 1 == 1) {
            // A carry into the exponent is the correct rounding, up to infinity.
            half += 1;
        }
        return sign | half as u16;
    }

    if unbiased < -25 {
        return sign;
    }

    // Subnormal half: shift the full significand down to units of 2^-24.
    let significand = mantissa | (1 << 52);
    let shift = (28 - unbiased) as u32;
    let mut half = significand >> shift;
    let rest = significand & ((1 << shift) - 1);
    let halfway = 1 << (shift - 1);
    if rest > halfway || (rest == halfway && half & 1 == 1) {
        half += 1;
    }
    sign | half as u16
}

/// Converts binary16 bits to an `f32`. Every half is exactly representable.
pub fn f16_bits_to_f32(bits: u16) -> f32 {
    let negative = bits & 0x8000 != 0;
    let exponent = ((bits >> 10) & 0x1f) as u32;
    let mantissa = (bits & 0x03ff) as u32;

    if exponent == 0 {
        let magnitude = mantissa as f32 * 2f32.powi(-24);
        return if negative { -magnitude } else { magnitude };
    }

    let sign = if negative { 0x8000_0000 } else { 0 };
    let out = if exponent == 0x1f {
        sign | 0x7f80_0000 | (mantissa << 13)
    } else {
        sign | ((exponent + 127 - 15) << 23) | (mantissa << 13)
    };
    f32::from_bits(out)
}
