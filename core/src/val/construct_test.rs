#[cfg(test)]
mod tests {
    use crate::typ::NumericKind;
    use crate::val::{Number, from_f64_as, from_i64_as, parse, parse_as};

    #[test]
    fn test_kind_detection() {
        let cases = [
            ("42", NumericKind::Integer),
            ("-7", NumericKind::Integer),
            ("3/4", NumericKind::Rational),
            ("1.5", NumericKind::Real),
            ("1e3", NumericKind::Real),
            ("-2.5E-3", NumericKind::Real),
            ("2+3i", NumericKind::Complex),
            ("i", NumericKind::Complex),
            ("2∠1", NumericKind::Complex),
            ("2@1", NumericKind::Complex),
        ];
        for (text, kind) in cases {
            assert_eq!(parse(text).unwrap().kind(), kind, "{text}");
        }
        assert_eq!(" 12 ".parse::<Number>().unwrap(), Number::from(12));
    }

    #[test]
    fn test_parse_as_is_strict() {
        assert!(parse_as(NumericKind::Integer, "1.5").unwrap_err().is_parse());
        assert!(parse_as(NumericKind::Integer, "1/2").unwrap_err().is_parse());
        assert!(parse_as(NumericKind::Real, "1/2").unwrap_err().is_parse());
        assert_eq!(parse_as(NumericKind::Rational, "7").unwrap().to_string(), "7/1");
        assert_eq!(parse_as(NumericKind::Real, "7").unwrap().to_string(), "7E+0");
        assert_eq!(parse_as(NumericKind::Complex, "7").unwrap().to_string(), "7+0i");
    }

    #[test]
    fn test_parse_failures() {
        for bad in ["", "abc", "1/2/3", "1..2", "+", "3/0"] {
            assert!(parse(bad).unwrap_err().is_parse(), "{bad:?}");
        }
    }

    #[test]
    fn test_display_round_trips() {
        let texts = [
            "-12345",
            "-22/7",
            "1.50",
            "1.5E+10",
            "-0.000001",
            "1E-7",
            "2-3.5i",
            "0+1i",
            "2∠0.5",
        ];
        for text in texts {
            let value = parse(text).unwrap();
            assert_eq!(value.to_string(), text);
            let again = parse_as(value.kind(), &value.to_string()).unwrap();
            assert_eq!(again, value, "{text}");
        }
    }

    #[test]
    fn test_exact_values_read_back_as_the_same_kind() {
        let values = [
            parse("7").unwrap().coerce_to(NumericKind::Real).unwrap(),
            from_f64_as(NumericKind::Real, 3.0).unwrap(),
            from_i64_as(NumericKind::Real, -12345).unwrap(),
            from_i64_as(NumericKind::Real, 0).unwrap(),
            parse_as(NumericKind::Real, "250").unwrap(),
            parse("1E+3").unwrap(),
            parse("2.5").unwrap(),
            parse("7").unwrap().coerce_to(NumericKind::Rational).unwrap(),
            parse("7").unwrap().coerce_to(NumericKind::Complex).unwrap(),
            parse("-4").unwrap(),
            parse("2∠0").unwrap(),
        ];
        for value in values {
            let text = value.to_string();
            let again = parse(&text).unwrap();
            assert_eq!(again.kind(), value.kind(), "{text}");
            assert_eq!(again, value, "{text}");
        }
        assert_eq!(from_f64_as(NumericKind::Real, 3.0).unwrap().to_string(), "3E+0");
        assert_eq!(parse_as(NumericKind::Real, "250").unwrap().to_string(), "2.50E+2");
    }

    #[test]
    fn test_from_i64() {
        assert_eq!(from_i64_as(NumericKind::Integer, -3).unwrap(), Number::from(-3));
        assert_eq!(from_i64_as(NumericKind::Rational, 4).unwrap().to_string(), "4/1");
        assert_eq!(from_i64_as(NumericKind::Real, -3).unwrap().to_string(), "-3E+0");
        assert_eq!(from_i64_as(NumericKind::Complex, 5).unwrap().to_string(), "5+0i");
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(from_f64_as(NumericKind::Real, 0.1).unwrap().to_string(), "0.1");
        assert_eq!(from_f64_as(NumericKind::Rational, 0.75).unwrap().to_string(), "3/4");
        assert_eq!(from_f64_as(NumericKind::Integer, 3.0).unwrap(), Number::from(3));
        assert_eq!(from_f64_as(NumericKind::Complex, -1.25).unwrap().to_string(), "-1.25+0i");
        assert!(from_f64_as(NumericKind::Integer, 2.5).unwrap_err().is_coercion());
        assert!(from_f64_as(NumericKind::Real, f64::NAN).unwrap_err().is_coercion());
        assert!(from_f64_as(NumericKind::Real, f64::INFINITY).unwrap_err().is_coercion());
        assert!(from_f64_as(NumericKind::Real, 1e-7).unwrap().is_exact());
    }

    #[test]
    fn test_serialized_form() {
        let json = serde_json::to_value(parse("1.50").unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "Real", "text": "1.50", "exact": true, "precision": "unlimited"})
        );
        let third = parse("1").unwrap().divide(&parse("3.0").unwrap()).unwrap();
        let json = serde_json::to_value(&third).unwrap();
        assert_eq!(json["exact"], false);
        assert_eq!(json["precision"], "34 digits (half-even)");
    }
}
