#[cfg(test)]
mod tests {
    use crate::typ::{NumericHierarchy, NumericKind};

    use NumericKind::*;

    #[test]
    fn test_supertypes_are_reflexive_and_transitive() {
        let sup = NumericHierarchy::supertypes(Integer);
        assert_eq!(sup.into_iter().collect::<Vec<_>>(), vec![Integer, Rational, Real, Complex]);
        let sup = NumericHierarchy::supertypes(Complex);
        assert_eq!(sup.into_iter().collect::<Vec<_>>(), vec![Complex]);
    }

    #[test]
    fn test_is_subtype_of() {
        assert!(NumericHierarchy::is_subtype_of(Integer, Complex));
        assert!(NumericHierarchy::is_subtype_of(Real, Real));
        assert!(!NumericHierarchy::is_subtype_of(Real, Rational));
        assert!(!NumericHierarchy::is_subtype_of(Complex, Integer));
    }

    #[test]
    fn test_common_supertype_matches_total_order() {
        for a in NumericKind::ALL {
            for b in NumericKind::ALL {
                assert_eq!(NumericHierarchy::common_supertype(a, b), Some(a.max(b)), "{a} / {b}");
            }
        }
    }

    #[test]
    fn test_common_supertype_is_symmetric() {
        for a in NumericKind::ALL {
            for b in NumericKind::ALL {
                assert_eq!(
                    NumericHierarchy::common_supertype(a, b),
                    NumericHierarchy::common_supertype(b, a)
                );
            }
        }
    }

    #[test]
    fn test_most_general() {
        assert_eq!(NumericHierarchy::most_general([Integer, Rational, Integer]), Some(Rational));
        assert_eq!(NumericHierarchy::most_general([Real, Integer, Complex]), Some(Complex));
        assert_eq!(NumericHierarchy::most_general([]), None);
    }

    #[test]
    fn test_kind_parse_and_display() {
        assert_eq!("rational".parse::<NumericKind>().unwrap(), Rational);
        assert_eq!("Complex".parse::<NumericKind>().unwrap(), Complex);
        assert!("quaternion".parse::<NumericKind>().is_err());
        assert_eq!(Real.to_string(), "Real");
    }
}
