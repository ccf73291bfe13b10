#[cfg(test)]
mod tests {
    use crate::error::{ArithmeticError, NumericError};
    use crate::val::{Complex, Real, Sign};

    fn z(text: &str) -> Complex {
        text.parse().unwrap()
    }

    fn real(text: &str) -> Real {
        text.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(z("2+3i").to_string(), "2+3i");
        assert_eq!(z("2-3.5i").to_string(), "2-3.5i");
        assert_eq!(z("-1.5i").to_string(), "0-1.5i");
        assert_eq!(z("i").to_string(), "0+1i");
        assert_eq!(z("2-i").to_string(), "2-1i");
        assert_eq!(z("3").to_string(), "3+0i");
        assert_eq!(z("1.5E+10-2i").to_string(), "1.5E+10-2i");
        assert_eq!(z("1e-3+2e+2i").to_string(), "0.001+2E+2i");
        assert_eq!(z("2∠0.5").to_string(), "2∠0.5");
        assert_eq!(z("2@0.5"), z("2∠0.5"));
        assert!(z("2∠0.5").is_polar());
    }

    #[test]
    fn test_parse_failures() {
        assert!("2+3j".parse::<Complex>().unwrap_err().is_parse());
        assert!("".parse::<Complex>().unwrap_err().is_parse());
        assert!("1+xi".parse::<Complex>().unwrap_err().is_parse());
        assert!(matches!(
            "-2∠1".parse::<Complex>().unwrap_err(),
            NumericError::Arithmetic(ArithmeticError::Domain(_))
        ));
    }

    #[test]
    fn test_rectangular_arithmetic() {
        assert_eq!(z("1+2i").add(&z("3-i")).unwrap().to_string(), "4+1i");
        assert_eq!(z("1+2i").subtract(&z("3-i")).unwrap().to_string(), "-2+3i");
        assert_eq!(z("1+2i").multiply(&z("3-i")).unwrap().to_string(), "5+5i");
        assert_eq!(z("5+5i").divide(&z("1+2i")).unwrap().to_string(), "3-1i");
        assert_eq!(
            z("1+i").divide(&z("0+0i")).unwrap_err(),
            NumericError::Arithmetic(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_powers() {
        assert_eq!(z("1+i").pow(2).unwrap().to_string(), "0+2i");
        assert_eq!(z("1+i").pow(-1).unwrap().to_string(), "0.5-0.5i");
        assert_eq!(z("2-3i").pow(0).unwrap(), z("1"));
        assert!(z("0+0i").pow(-2).is_err());
    }

    #[test]
    fn test_magnitude_and_roots() {
        let m = z("3+4i").magnitude().unwrap();
        assert_eq!(m, real("5"));
        assert!(m.is_exact());

        assert_eq!(z("-4").sqrt().unwrap().to_string(), "0+2i");
        assert_eq!(z("3+4i").sqrt().unwrap().to_string(), "2+1i");
        assert_eq!(z("3-4i").sqrt().unwrap().to_string(), "2-1i");
    }

    #[test]
    fn test_polar_stays_polar() {
        let product = z("2∠0.5").multiply(&z("3∠0.25")).unwrap();
        assert!(product.is_polar());
        assert_eq!(product.to_string(), "6∠0.75");

        let quotient = z("6∠0.75").divide(&z("3∠0.25")).unwrap();
        assert_eq!(quotient.to_string(), "2∠0.50");

        assert_eq!(z("2∠0.5").pow(3).unwrap().to_string(), "8∠1.5");
        assert_eq!(z("4∠1").sqrt().unwrap().to_string(), "2∠0.5");
        assert_eq!(z("2∠0.5").conjugate().to_string(), "2∠-0.5");
    }

    #[test]
    fn test_polar_arguments_stay_principal() {
        let z3 = z("1∠3");
        let square = z3.multiply(&z3).unwrap();
        let argument = square.argument().unwrap();
        assert!(argument.to_string().starts_with("-0.28318530717958647692528676655900"), "{argument}");

        for value in [square, z("1∠6")] {
            let root = value.sqrt().unwrap();
            assert!(root.is_polar());
            assert!(!root.real().unwrap().is_negative(), "{root}");
            let argument = root.argument().unwrap();
            assert!(argument.to_string().starts_with("-0.14159265358979323846"), "{argument}");
        }

        let cubed = z("2∠2").pow(3).unwrap();
        let argument = cubed.argument().unwrap();
        assert!(argument.to_string().starts_with("-0.28318530717958647692"), "{argument}");
        let quotient = z("1∠-2").divide(&z("1∠2")).unwrap();
        assert!(quotient.argument().unwrap().to_string().starts_with("2.28318530717958647692"));
    }

    #[test]
    fn test_form_conversions() {
        let polar = z("1+i").to_polar().unwrap();
        let Complex::Polar { modulus, argument } = &polar else {
            panic!("expected a polar value, got {polar}");
        };
        assert!(modulus.to_string().starts_with("1.41421356237309504880"));
        assert!(argument.to_string().starts_with("0.785398163397448309"));
        assert!(!polar.is_exact());

        let rect = z("2∠0").to_rectangular().unwrap();
        assert_eq!(rect, z("2+0i"));
        assert!(rect.is_exact());
        assert_eq!(z("2∠0"), z("2+0i"));
        assert_eq!(z("0+2i").argument().unwrap().to_string().get(..10), Some("1.57079632"));
    }

    #[test]
    fn test_accessors() {
        let value = z("2-3i");
        assert_eq!(value.real().unwrap(), real("2"));
        assert_eq!(value.imaginary().unwrap(), real("-3"));
        assert_eq!(value.conjugate(), z("2+3i"));
        assert_eq!(value.negate().unwrap(), z("-2+3i"));
        assert_eq!(Complex::unit(Sign::Negative), z("-i"));
        assert!(Complex::polar(real("-1"), real("0")).is_err());
    }

    #[test]
    fn test_inverse() {
        assert_eq!(z("0+2i").inverse().unwrap().to_string(), "0-0.5i");
        assert_eq!(z("2∠0.5").inverse().unwrap().to_string(), "0.5∠-0.5");
        assert!(z("0+0i").inverse().is_err());
    }
}
