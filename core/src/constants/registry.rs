use std::collections::HashMap;
use std::fmt;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::config;
use crate::ctx::{PrecisionContext, RoundingMode, round_enclosure};
use crate::error::{NumericError, Result};
use crate::math::Approx;
use crate::val::{Number, Real, Sign};

use super::catalog;

const INITIAL_GUARD: u32 = 16;
const MAX_ATTEMPTS: usize = 4;

/// How a constant produces its digits.
#[derive(Clone, Copy)]
pub enum Generator {
    /// Enclosure of the value at a working scale (`10^-scale` units) for the
    /// requested branch. Must tighten as the scale grows.
    Series(fn(u32, Sign) -> Approx),
    /// Exactly representable constants; the context is not consulted.
    Exact(fn(Sign) -> Number),
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generator::Series(_) => f.write_str("Series"),
            Generator::Exact(_) => f.write_str("Exact"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConstantDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    /// Signs the constant can be instantiated with; the first is the
    /// principal branch.
    pub branches: &'static [Sign],
    pub generator: Generator,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    name: &'static str,
    digits: u32,
    rounding: RoundingMode,
    sign: Sign,
}

/// Name to definition table with a memo of generated values.
#[derive(Debug, Default)]
pub struct ConstantRegistry {
    defs: Vec<ConstantDef>,
    index: HashMap<String, usize>,
    cache: DashMap<CacheKey, Number>,
}

static GLOBAL: Lazy<ConstantRegistry> = Lazy::new(ConstantRegistry::with_builtins);

/// The process-wide registry holding the built-in constants.
pub fn global() -> &'static ConstantRegistry {
    &GLOBAL
}

impl ConstantRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for def in catalog::builtins() {
            registry.register(def);
        }
        registry
    }

    /// Adds `def`, replacing any constant registered under the same name or
    /// alias.
    pub fn register(&mut self, def: ConstantDef) {
        let slot = self.defs.len();
        for key in std::iter::once(def.name).chain(def.aliases.iter().copied()) {
            self.index.insert(key.to_lowercase(), slot);
        }
        self.cache.retain(|key, _| key.name != def.name);
        self.defs.push(def);
    }

    pub fn lookup(&self, name: &str) -> Option<&ConstantDef> {
        self.index.get(&name.trim().to_lowercase()).map(|&slot| &self.defs[slot])
    }

    /// Canonical names, in registration order. Replaced definitions are
    /// listed once.
    pub fn names(&self) -> Vec<&'static str> {
        let mut live: Vec<usize> = self.index.values().copied().collect();
        live.sort_unstable();
        live.dedup();
        live.into_iter().map(|slot| self.defs[slot].name).collect()
    }

    #[cfg(test)]
    pub(crate) fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn instantiate(&self, name: &str, ctx: PrecisionContext) -> Result<Number> {
        self.instantiate_signed(name, ctx, Sign::Positive)
    }

    /// Value of the `sign` branch of `name`, correctly rounded to `ctx`.
    pub fn instantiate_signed(&self, name: &str, ctx: PrecisionContext, sign: Sign) -> Result<Number> {
        let def = self.lookup(name).ok_or_else(|| NumericError::NotFound(name.to_string()))?;
        if !def.branches.contains(&sign) {
            return Err(NumericError::UnsupportedBranch {
                name: def.name.to_string(),
                sign,
            });
        }
        let series = match def.generator {
            Generator::Exact(build) => return Ok(build(sign)),
            Generator::Series(series) => series,
        };

        let unsupported = |reason: String| NumericError::UnsupportedPrecision {
            name: def.name.to_string(),
            requested: ctx.to_string(),
            reason,
        };
        let Some(digits) = ctx.digits() else {
            return Err(unsupported("irrational constants need a limited precision".to_string()));
        };
        let limit = config::current().max_constant_digits;
        if digits > limit {
            return Err(unsupported(format!("more than the configured maximum of {limit} digits")));
        }

        let key = CacheKey {
            name: def.name,
            digits,
            rounding: ctx.rounding(),
            sign,
        };
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.value().clone());
        }
        debug!(target: "numeris::constants", name = def.name, digits, %sign, "generating constant");
        let value = generate(series, digits, ctx, sign)?
            .ok_or_else(|| unsupported(format!("rounding did not settle after {MAX_ATTEMPTS} attempts")))?;
        let value = Number::Real(value);
        self.cache.insert(key, value.clone());
        Ok(value)
    }
}

/// Widens the working scale until the enclosure rounds unambiguously.
fn generate(series: fn(u32, Sign) -> Approx, digits: u32, ctx: PrecisionContext, sign: Sign) -> Result<Option<Real>> {
    let mut guard = INITIAL_GUARD;
    for attempt in 0..MAX_ATTEMPTS {
        let approx = series(digits.saturating_add(guard), sign);
        let (lo, hi) = approx.bounds();
        if let Some(rounded) = round_enclosure(&lo, &hi, &approx.den, ctx)? {
            return Ok(Some(Real::from_rounded(rounded, ctx, false)?));
        }
        debug!(target: "numeris::constants", attempt, guard, "enclosure straddles a rounding boundary, widening");
        guard = guard.saturating_mul(2);
    }
    Ok(None)
}
