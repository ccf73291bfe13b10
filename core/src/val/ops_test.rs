#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use crate::ctx::{PrecisionContext, RoundingMode};
    use crate::error::{ArithmeticError, NumericError};
    use crate::typ::NumericKind;
    use crate::val::{Integer, Number, Real, Sign, parse};

    fn n(text: &str) -> Number {
        parse(text).unwrap()
    }

    fn real_at(unscaled: i64, scale: i64, digits: u32) -> Number {
        Number::Real(Real::with_context(unscaled, scale, PrecisionContext::new(digits, RoundingMode::HalfUp)).unwrap())
    }

    #[test]
    fn test_mixed_kind_dispatch() {
        let sum = n("3").add(&n("1/2")).unwrap();
        assert_eq!(sum.kind(), NumericKind::Rational);
        assert_eq!(sum.to_string(), "7/2");

        assert_eq!(n("1/4").add(&n("0.5")).unwrap().to_string(), "0.75");
        assert_eq!(n("2").multiply(&n("1+i")).unwrap().to_string(), "2+2i");
        assert_eq!(n("1.5").subtract(&n("2")).unwrap().to_string(), "-0.5");
        assert_eq!(n("1/2").subtract(&n("3+i")).unwrap().to_string(), "-2.5-1i");
    }

    #[test]
    fn test_result_carries_fewer_digits() {
        let a = real_at(1, 0, 32);
        let b = real_at(3, 0, 128);
        assert_eq!(a.add(&b).unwrap().precision().digits(), Some(32));
        assert_eq!(b.divide(&a).unwrap().precision().digits(), Some(32));
        assert_eq!(n("7").add(&b).unwrap().precision().digits(), Some(128));
    }

    #[test]
    fn test_non_terminating_rational_with_real() {
        let err = n("1/3").add(&n("0.5")).unwrap_err();
        assert!(err.is_coercion());

        let sum = n("1/3").add(&real_at(5, 1, 5)).unwrap();
        assert_eq!(sum.to_string(), "0.83333");
        assert!(!sum.is_exact());
    }

    #[test]
    fn test_division() {
        assert_eq!(n("6").divide(&n("3")).unwrap(), Number::from(2));
        assert_eq!(n("7").divide(&n("2")).unwrap().to_string(), "7/2");
        assert_eq!(n("1").divide(&n("4.0")).unwrap().to_string(), "0.25");
        for zero in ["0", "0/1", "0.0", "0+0i"] {
            for x in ["5", "1/4", "2.5", "1+i"] {
                let err = n(x).divide(&n(zero)).unwrap_err();
                assert_eq!(err, NumericError::Arithmetic(ArithmeticError::DivisionByZero), "{x} / {zero}");
            }
        }
        assert!(n("0").inverse().is_err());
    }

    #[test]
    fn test_square_roots() {
        let root = n("8").sqrt().unwrap();
        assert_eq!(root, Number::from(2));
        assert!(!root.is_exact());
        let root = n("9").sqrt().unwrap();
        assert_eq!(root, Number::from(3));
        assert!(root.is_exact());

        assert_eq!(n("1/4").sqrt().unwrap().to_string(), "1/2");
        assert_eq!(n("1/2").sqrt().unwrap().kind(), NumericKind::Real);
        assert_eq!(n("6.25").sqrt().unwrap().to_string(), "2.5");
        assert_eq!(n("-4").sqrt().unwrap().to_string(), "0+2i");
        assert_eq!(n("-1/4").sqrt().unwrap().to_string(), "0+0.5i");
        assert_eq!(n("3+4i").sqrt().unwrap().to_string(), "2+1i");
    }

    #[test]
    fn test_inexactness_propagates_through_dispatch() {
        let root = n("8").sqrt().unwrap();
        assert!(!root.multiply(&n("2")).unwrap().is_exact());
        assert!(!root.add(&n("0.5")).unwrap().is_exact());
        assert!(n("8").multiply(&n("2")).unwrap().is_exact());
    }

    #[test]
    fn test_pow_inverse_negate_magnitude() {
        assert_eq!(n("2").pow(-1).unwrap().to_string(), "1/2");
        assert_eq!(n("1/2").pow(3).unwrap().to_string(), "1/8");
        assert_eq!(n("1.5").pow(2).unwrap().to_string(), "2.25");
        assert_eq!(n("1+i").pow(2).unwrap().to_string(), "0+2i");
        assert!(n("0.0").pow(-3).is_err());

        assert_eq!(n("4").inverse().unwrap().to_string(), "1/4");
        assert_eq!(n("-3/5").negate().unwrap().to_string(), "3/5");
        assert_eq!(n("3+4i").magnitude().unwrap(), Number::Real(Real::new(5, 0)));
        assert_eq!(n("-2.5").magnitude().unwrap().to_string(), "2.5");
    }

    #[test]
    fn test_sign_and_compare() {
        assert_eq!(n("-3").sign().unwrap(), Sign::Negative);
        assert_eq!(n("0.0").sign().unwrap(), Sign::Zero);
        assert_eq!(n("2/3").sign().unwrap(), Sign::Positive);
        assert_eq!(n("1+i").sign().unwrap_err(), NumericError::Arithmetic(ArithmeticError::UndefinedSign));

        assert_eq!(n("1").compare(&n("1.5")).unwrap(), Ordering::Less);
        assert_eq!(n("3/2").compare(&n("1.5")).unwrap(), Ordering::Equal);
        assert_eq!(n("2").compare(&n("-7/4")).unwrap(), Ordering::Greater);
        assert!(n("1").compare(&n("1+0i")).is_err());
    }

    #[test]
    fn test_numeric_equality_across_kinds() {
        assert!(n("2").num_eq(&n("2.00")).unwrap());
        assert!(n("2").num_eq(&n("4/2")).unwrap());
        assert!(n("2").num_eq(&n("2+0i")).unwrap());
        assert!(!n("2").num_eq(&n("2.5")).unwrap());
        assert_ne!(n("2"), n("2.0"));
        assert_eq!(Number::Integer(Integer::from(2)), n("2"));
    }

    #[test]
    fn test_operator_impls() {
        let (a, b) = (n("3"), n("1/2"));
        assert_eq!((&a + &b).unwrap().to_string(), "7/2");
        assert_eq!((&a - &b).unwrap().to_string(), "5/2");
        assert_eq!((&a * &b).unwrap().to_string(), "3/2");
        assert_eq!((&a / &b).unwrap(), Number::from(6).coerce_to(NumericKind::Rational).unwrap());
        assert_eq!((-&a).unwrap(), Number::from(-3));
        assert!((&a / &n("0")).is_err());
    }
}
