use crate::math::fixed;
use crate::val::{Complex, Number, Sign};

use super::registry::{ConstantDef, Generator};

const POSITIVE: &[Sign] = &[Sign::Positive];
const BOTH: &[Sign] = &[Sign::Positive, Sign::Negative];

/// The constants every registry built with
/// [`ConstantRegistry::with_builtins`](super::ConstantRegistry::with_builtins)
/// knows.
pub(super) fn builtins() -> Vec<ConstantDef> {
    vec![
        ConstantDef {
            name: "pi",
            aliases: &["π"],
            description: "ratio of a circle's circumference to its diameter",
            branches: POSITIVE,
            generator: Generator::Series(|scale, _| fixed::pi(scale)),
        },
        ConstantDef {
            name: "tau",
            aliases: &["τ"],
            description: "2 pi",
            branches: POSITIVE,
            generator: Generator::Series(|scale, _| fixed::tau(scale)),
        },
        ConstantDef {
            name: "e",
            aliases: &[],
            description: "base of the natural logarithm",
            branches: POSITIVE,
            generator: Generator::Series(|scale, _| fixed::e(scale)),
        },
        ConstantDef {
            name: "ln2",
            aliases: &[],
            description: "natural logarithm of 2",
            branches: POSITIVE,
            generator: Generator::Series(|scale, _| fixed::ln2(scale)),
        },
        ConstantDef {
            name: "ln10",
            aliases: &[],
            description: "natural logarithm of 10",
            branches: POSITIVE,
            generator: Generator::Series(|scale, _| fixed::ln10(scale)),
        },
        ConstantDef {
            name: "sqrt2",
            aliases: &["√2"],
            description: "square roots of 2",
            branches: BOTH,
            generator: Generator::Series(|scale, sign| {
                let root = fixed::sqrt(&2.into(), &1.into(), scale);
                if sign == Sign::Negative { root.negate() } else { root }
            }),
        },
        ConstantDef {
            name: "phi",
            aliases: &["golden", "φ"],
            description: "roots of x^2 = x + 1, (1 + sqrt 5) / 2 and (1 - sqrt 5) / 2",
            branches: BOTH,
            generator: Generator::Series(|scale, sign| fixed::phi(scale, sign == Sign::Negative)),
        },
        ConstantDef {
            name: "i",
            aliases: &[],
            description: "imaginary unit, the roots of x^2 = -1",
            branches: BOTH,
            generator: Generator::Exact(|sign| Number::Complex(Complex::unit(sign))),
        },
    ]
}
