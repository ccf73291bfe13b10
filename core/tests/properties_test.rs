use numeris_core::val::{par_sum, parse, parse_as, sum};
use numeris_core::{
    Number, NumericError, NumericHierarchy, NumericKind, PrecisionContext, Real, RoundingMode, Sign, instantiate_constant,
};

const SAMPLES: &[&str] = &[
    "0", "7", "-12", "1/4", "-3/8", "5/2", "2.5", "-0.125", "1E+3", "1.50", "2+3i", "-1-0.5i", "0+1i",
];

fn samples() -> Vec<Number> {
    SAMPLES.iter().map(|text| parse(text).unwrap()).collect()
}

/// Deterministic pseudo-random integers.
fn lcg(seed: u64, count: usize) -> Vec<i64> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) % 20_001) as i64 - 10_000
        })
        .collect()
}

/// Mantissa digits of a Real's text, without sign, point or exponent.
fn significant(text: &str) -> String {
    let mantissa = text.split(['E', 'e']).next().unwrap_or_default();
    mantissa.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[test]
fn common_supertype_is_the_least_upper_bound() {
    for a in NumericKind::ALL {
        for b in NumericKind::ALL {
            let common = NumericHierarchy::common_supertype(a, b).unwrap();
            assert_eq!(common, a.max(b));
            assert_eq!(NumericHierarchy::common_supertype(b, a), Some(common));
            assert!(NumericHierarchy::is_subtype_of(a, common));
            assert!(NumericHierarchy::is_subtype_of(b, common));
        }
    }
}

#[test]
fn successful_coercions_preserve_value() {
    for value in samples() {
        for target in NumericKind::ALL {
            assert_eq!(value.is_coercible_to(target), value.coerce_to(target).is_ok());
            if let Ok(converted) = value.coerce_to(target) {
                assert_eq!(converted.kind(), target);
                assert!(value.num_eq(&converted).unwrap(), "{value} as {target} gave {converted}");
            }
        }
    }
}

#[test]
fn addition_and_multiplication_commute() {
    let values = samples();
    for a in &values {
        for b in &values {
            let (ab, ba) = (a.add(b).unwrap(), b.add(a).unwrap());
            assert!(ab.num_eq(&ba).unwrap(), "{a} + {b}");
            assert_eq!(ab.kind(), a.kind().max(b.kind()));
            let (ab, ba) = (a.multiply(b).unwrap(), b.multiply(a).unwrap());
            assert!(ab.num_eq(&ba).unwrap(), "{a} * {b}");
        }
    }
}

#[test]
fn exact_arithmetic_identities() {
    for a in samples() {
        assert!(a.subtract(&a).unwrap().is_zero(), "{a} - {a}");
        let negated = a.negate().unwrap();
        assert!(a.add(&negated).unwrap().is_zero(), "{a} + -{a}");
        if a.is_zero() {
            assert!(a.inverse().is_err());
            continue;
        }
        assert!(a.divide(&a).unwrap().num_eq(&Number::from(1)).unwrap(), "{a} / {a}");
        let inverse = a.inverse().unwrap();
        if inverse.is_exact() {
            let back = inverse.inverse().unwrap();
            assert!(back.num_eq(&a).unwrap(), "1 / (1 / {a}) gave {back}");
        }
    }
}

#[test]
fn negation_flips_sign() {
    for a in samples() {
        let Ok(sign) = a.sign() else {
            assert_eq!(a.kind(), NumericKind::Complex);
            continue;
        };
        let flipped = match sign {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        };
        assert_eq!(a.negate().unwrap().sign().unwrap(), flipped, "{a}");
    }
}

#[test]
fn results_carry_the_smaller_context() {
    let digits = [1u32, 5, 16, 34, 100];
    for &p in &digits {
        for &q in &digits {
            let a = Real::with_context(7, 1, PrecisionContext::with_digits(p)).unwrap();
            let b = Real::with_context(3, 0, PrecisionContext::with_digits(q)).unwrap();
            let sum = Number::Real(a).add(&Number::Real(b)).unwrap();
            assert_eq!(sum.precision().digits(), Some(p.min(q)));
        }
    }
}

#[test]
fn constants_truncate_consistently() {
    for name in ["pi", "e", "sqrt2", "ln2"] {
        let long = instantiate_constant(name, PrecisionContext::new(90, RoundingMode::Down)).unwrap();
        let long = significant(&long.to_string());
        for digits in (1..=60).step_by(7) {
            let short = instantiate_constant(name, PrecisionContext::new(digits, RoundingMode::Down)).unwrap();
            let short = significant(&short.to_string());
            let short = short.trim_start_matches('0');
            let long = long.trim_start_matches('0');
            assert_eq!(short, &long[..digits as usize], "{name} at {digits} digits");
        }
    }
}

#[test]
fn constants_lie_between_floor_and_ceiling() {
    for name in ["pi", "tau", "e", "ln10", "phi"] {
        for digits in [3u32, 17, 40] {
            let floor = instantiate_constant(name, PrecisionContext::new(digits, RoundingMode::Floor)).unwrap();
            let ceiling = instantiate_constant(name, PrecisionContext::new(digits, RoundingMode::Ceiling)).unwrap();
            let nearest = instantiate_constant(name, PrecisionContext::new(digits, RoundingMode::HalfEven)).unwrap();
            assert!(floor.compare(&ceiling).unwrap().is_lt(), "{name}");
            assert!(floor.compare(&nearest).unwrap().is_le());
            assert!(nearest.compare(&ceiling).unwrap().is_le());
        }
    }
}

#[test]
fn unknown_constant_is_reported() {
    let err = instantiate_constant("omega", PrecisionContext::DECIMAL64).unwrap_err();
    assert!(matches!(err, NumericError::NotFound(name) if name == "omega"));
}

#[test]
fn parallel_sum_matches_sequential_sum() {
    for seed in [1, 7, 42] {
        let values: Vec<Number> = lcg(seed, 2500).into_iter().map(Number::from).collect();
        assert_eq!(par_sum(&values).unwrap(), sum(&values).unwrap());

        let ratios: Vec<Number> = lcg(seed, 400)
            .chunks(2)
            .map(|pair| parse(&format!("{}/{}", pair[0], pair[1].abs() + 1)).unwrap())
            .collect();
        assert_eq!(par_sum(&ratios).unwrap(), sum(&ratios).unwrap());
    }
}

#[test]
fn display_round_trips() {
    for value in samples() {
        let text = value.to_string();
        let again = parse_as(value.kind(), &text).unwrap();
        assert_eq!(again, value, "{text}");
    }
}

#[test]
fn exact_values_read_back_through_parse() {
    for value in samples() {
        for kind in NumericKind::ALL {
            let Ok(converted) = value.coerce_to(kind) else {
                continue;
            };
            assert!(converted.is_exact());
            let text = converted.to_string();
            let again = parse(&text).unwrap();
            assert_eq!(again.kind(), kind, "{text}");
            assert_eq!(again, converted, "{text}");
        }
    }
}
