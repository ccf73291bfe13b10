#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use num_traits::Signed;

    use crate::ctx::pow10;
    use crate::math::Approx;
    use crate::math::fixed;

    const PI: &str = "3.14159265358979323846264338327950288419716939937510582097494";
    const E: &str = "2.71828182845904523536028747135266249775724709369995957496697";
    const LN2: &str = "0.69314718055994530941723212145817656807550013436025525412068";
    const LN10: &str = "2.30258509299404568401799145468436420760110148862877297603333";
    const SQRT2: &str = "1.41421356237309504880168872420969807856967187537694807317668";
    const PHI: &str = "1.61803398874989484820458683436563811772030917980576286213545";
    const PHI_NEG: &str = "-0.618033988749894848204586834365638117720309179805762862135449";

    /// Reference decimal truncated to `scale` fractional digits.
    fn fixed_of(text: &str, scale: usize) -> BigInt {
        let (int, frac) = text.split_once('.').unwrap();
        let digits = format!("{int}{}", &frac[..scale]);
        digits.parse().unwrap()
    }

    fn encloses(approx: &Approx, reference: &str, scale: u32) -> bool {
        let r = fixed_of(reference, scale as usize);
        let one = pow10(scale);
        let (lo, hi) = approx.bounds();
        // the reference lies in [r, r + 1] / one (towards zero for negatives)
        let (r_lo, r_hi) = if r.is_negative() { (&r - 1, r.clone()) } else { (r.clone(), &r + 1) };
        &lo * &one <= &r_hi * &approx.den && &hi * &one >= &r_lo * &approx.den
    }

    fn close(value: &BigInt, reference: &str, scale: u32) -> bool {
        (value - fixed_of(reference, scale as usize)).abs() <= BigInt::from(2)
    }

    #[test]
    fn test_constant_kernels_enclose_reference_digits() {
        for scale in [5, 20, 50] {
            assert!(encloses(&fixed::pi(scale), PI, scale), "pi at {scale}");
            assert!(encloses(&fixed::e(scale), E, scale), "e at {scale}");
            assert!(encloses(&fixed::ln2(scale), LN2, scale), "ln2 at {scale}");
            assert!(encloses(&fixed::ln10(scale), LN10, scale), "ln10 at {scale}");
            let two = BigInt::from(2);
            assert!(encloses(&fixed::sqrt(&two, &BigInt::from(1), scale), SQRT2, scale), "sqrt2 at {scale}");
            assert!(encloses(&fixed::phi(scale, false), PHI, scale), "phi at {scale}");
            assert!(encloses(&fixed::phi(scale, true), PHI_NEG, scale), "phi- at {scale}");
        }
    }

    #[test]
    fn test_error_bounds_stay_small() {
        // guard digits must comfortably cover the accumulated truncation
        assert!(fixed::pi(200).err < 100_000);
        assert!(fixed::e(200).err < 1_000);
    }

    #[test]
    fn test_sqrt_floor() {
        let nine = BigInt::from(9);
        let one = BigInt::from(1);
        assert_eq!(fixed::sqrt_floor(&nine, &one, 3), BigInt::from(3000));
        // sqrt(1/4) = 0.5
        assert_eq!(fixed::sqrt_floor(&one, &BigInt::from(4), 2), BigInt::from(50));
    }

    #[test]
    fn test_to_fixed_rescales_both_ways() {
        let x = BigInt::from(12345);
        assert_eq!(fixed::to_fixed(&x, 2, 4), BigInt::from(1_234_500));
        assert_eq!(fixed::to_fixed(&x, 4, 2), BigInt::from(123));
        assert_eq!(fixed::to_fixed(&x, -1, 0), BigInt::from(123_450));
    }

    #[test]
    fn test_transcendental_kernels() {
        let scale = 30;
        let at = |text: &str| fixed::to_fixed(&text.parse::<BigInt>().unwrap(), 1, scale);
        assert!(close(&fixed::exp(&at("15"), scale), "4.48168907033806482260205546011927581900574986836966705677265", scale));
        assert!(close(&fixed::exp(&at("10"), scale), E, scale));
        let ln = fixed::ln(&BigInt::from(3), &BigInt::from(4), scale);
        assert!(close(&ln, "-0.287682072451780927439219005993827431503509710897761056506666", scale));
        assert!(close(&fixed::sin(&at("20"), scale), "0.909297426825681695396019865911744842702254971447890268378973", scale));
        assert!(close(&fixed::cos(&at("100"), scale), "-0.839071529076452452258863947824064834519930165133168546835954", scale));
        assert!(close(&fixed::atan(&at("30"), scale), "1.24904577239825442582991707728109012307782940412989671905467", scale));
        let minus_one = at("-10");
        let angle = fixed::atan2(&minus_one, &minus_one, scale);
        assert!(close(&angle, "-2.35619449019234492884698253745962716314787704953132936573121", scale));
    }

    #[test]
    fn test_principal_angle() {
        let scale = 30;
        let at = |text: &str| fixed::to_fixed(&text.parse::<BigInt>().unwrap(), 1, scale);
        let reduced = "0.28318530717958647692528676655900576839433879875021164194989";
        assert!(close(&fixed::principal_angle(&at("-60"), scale), reduced, scale));
        assert!(close(&fixed::principal_angle(&at("60"), scale), &format!("-{reduced}"), scale));
        assert!(close(&fixed::principal_angle(&at("30"), scale), "3.0000000000000000000000000000000", scale));
    }

    #[test]
    fn test_atan2_axes() {
        let scale = 20;
        let one = pow10(scale);
        let zero = BigInt::from(0);
        let half_pi = fixed::atan2(&one, &zero, scale);
        assert!(close(&(half_pi * 2), PI, scale));
        assert_eq!(fixed::atan2(&zero, &zero, scale), zero);
        let pi = fixed::atan2(&zero, &(-&one), scale);
        assert!(close(&pi, PI, scale));
    }
}
