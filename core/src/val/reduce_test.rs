#[cfg(test)]
mod tests {
    use crate::typ::NumericKind;
    use crate::val::{Number, Rational, par_sum, parse, product, sum};

    fn harmonic(terms: i64) -> Vec<Number> {
        (1..=terms).map(|k| Number::Rational(Rational::new(1, k).unwrap())).collect()
    }

    #[test]
    fn test_empty_folds() {
        let zero = sum(&[]).unwrap();
        assert_eq!(zero, Number::from(0));
        assert!(zero.is_exact());
        assert_eq!(product(&[]).unwrap(), Number::from(1));
        assert_eq!(par_sum(&[]).unwrap(), Number::from(0));
    }

    #[test]
    fn test_mixed_kinds_widen_as_they_go() {
        let values: Vec<Number> = ["1", "1/2", "0.25"].into_iter().map(|t| parse(t).unwrap()).collect();
        let total = sum(&values).unwrap();
        assert_eq!(total.kind(), NumericKind::Real);
        assert_eq!(total.to_string(), "1.75");

        let values: Vec<Number> = ["2", "3/4", "2"].into_iter().map(|t| parse(t).unwrap()).collect();
        assert_eq!(product(&values).unwrap().to_string(), "3/1");
    }

    #[test]
    fn test_par_sum_matches_sum() {
        let integers: Vec<Number> = (1..=1000).map(Number::from).collect();
        assert_eq!(par_sum(&integers).unwrap(), Number::from(500_500));
        assert_eq!(par_sum(&integers).unwrap(), sum(&integers).unwrap());

        let terms = harmonic(300);
        assert_eq!(par_sum(&terms).unwrap(), sum(&terms).unwrap());
    }

    #[test]
    fn test_errors_propagate() {
        let values: Vec<Number> = ["1/3", "0.5"].into_iter().map(|t| parse(t).unwrap()).collect();
        assert!(sum(&values).unwrap_err().is_coercion());

        let mut many = harmonic(500);
        many.push(parse("0.5").unwrap());
        assert!(par_sum(&many).is_err());
    }
}
