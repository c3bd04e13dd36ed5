use std::collections::{BTreeMap, HashMap};

use crate::expr::{Expr, Rational, one, zero};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Exponents beyond this are left symbolic instead of folded into a big constant.
const MAX_FOLDED_EXPONENT: u32 = 64;

pub fn simplify(expr: Expr) -> Expr {
    let mut cache = HashMap::new();
    simplify_cached(expr, &mut cache)
}

fn simplify_cached(expr: Expr, cache: &mut HashMap<Expr, Expr>) -> Expr {
    if let Some(hit) = cache.get(&expr) {
        return hit.clone();
    }

    let key = expr.clone();
    let result = match expr {
        Expr::Add(a, b) => simplify_add(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Sub(a, b) => simplify_sub(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Mul(a, b) => simplify_mul(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Div(a, b) => simplify_div(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Pow(a, b) => simplify_pow(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Neg(a) => simplify_neg(simplify_cached(*a, cache)),

        Expr::Sin(a) => match simplify_cached(*a, cache) {
            x if x.is_zero() => zero(),
            Expr::Neg(inner) => simplify_neg(Expr::Sin(inner)),
            x => Expr::Sin(x.boxed()),
        },

        Expr::Cos(a) => match simplify_cached(*a, cache) {
            x if x.is_zero() => one(),
            Expr::Neg(inner) => Expr::Cos(inner),
            x => Expr::Cos(x.boxed()),
        },

        Expr::Tan(a) => match simplify_cached(*a, cache) {
            x if x.is_zero() => zero(),
            Expr::Neg(inner) => simplify_neg(Expr::Tan(inner)),
            x => Expr::Tan(x.boxed()),
        },

        Expr::Atan(a) => match simplify_cached(*a, cache) {
            x if x.is_zero() => zero(),
            Expr::Neg(inner) => simplify_neg(Expr::Atan(inner)),
            x => Expr::Atan(x.boxed()),
        },

        Expr::Asin(a) => match simplify_cached(*a, cache) {
            x if x.is_zero() => zero(),
            Expr::Neg(inner) => simplify_neg(Expr::Asin(inner)),
            x => Expr::Asin(x.boxed()),
        },

        Expr::Sinh(a) => match simplify_cached(*a, cache) {
            x if x.is_zero() => zero(),
            x => Expr::Sinh(x.boxed()),
        },

        Expr::Cosh(a) => match simplify_cached(*a, cache) {
            x if x.is_zero() => one(),
            x => Expr::Cosh(x.boxed()),
        },

        Expr::Exp(a) => match simplify_cached(*a, cache) {
            x if x.is_zero() => one(),
            Expr::Log(inner) => *inner,
            x => Expr::Exp(x.boxed()),
        },

        Expr::Log(a) => match simplify_cached(*a, cache) {
            x if x.is_one() => zero(),
            x if x.is_euler() => one(),
            Expr::Exp(inner) => *inner,
            x => Expr::Log(x.boxed()),
        },

        Expr::Abs(a) => match simplify_cached(*a, cache) {
            Expr::Constant(c) => Expr::Constant(c.abs()),
            Expr::Neg(inner) => Expr::Abs(inner),
            x @ Expr::Abs(_) => x,
            x => Expr::Abs(x.boxed()),
        },

        other => other.map_children(|child| simplify_cached(child.clone(), cache)),
    };

    cache.insert(key, result.clone());
    result
}

/// Apply simplification passes until the expression stops changing or we hit the iteration cap.
pub fn simplify_fully(expr: Expr) -> Expr {
    simplify_with_limit(expr, 16)
}

pub fn simplify_with_limit(expr: Expr, max_iters: usize) -> Expr {
    let mut cache = HashMap::new();
    let mut current = expr;
    for _ in 0..max_iters {
        let next = simplify_cached(current.clone(), &mut cache);
        if next == current {
            return current;
        }
        current = next;
    }
    current
}

pub fn simplify_add(x: Expr, y: Expr) -> Expr {
    let mut terms = flatten_sum(&x);
    terms.extend(flatten_sum(&y));
    rebuild_sum(collect_like_terms(terms))
}

pub fn simplify_sub(x: Expr, y: Expr) -> Expr {
    simplify_add(x, simplify_neg(y))
}

fn flatten_sum(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Add(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b));
            out
        }
        Expr::Sub(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b).into_iter().map(simplify_neg));
            out
        }
        other => vec![other.clone()],
    }
}

/// Split a product into its rational coefficient and the remaining factor.
fn split_coeff(expr: &Expr) -> (Rational, Expr) {
    match expr {
        Expr::Constant(c) => (c.clone(), one()),
        Expr::Neg(e) => {
            let (c, b) = split_coeff(e);
            (-c, b)
        }
        Expr::Mul(a, b) => {
            let (ca, ba) = split_coeff(a);
            let (cb, bb) = split_coeff(b);
            let core = match (ba.is_one(), bb.is_one()) {
                (true, _) => bb,
                (_, true) => ba,
                _ => Expr::Mul(ba.boxed(), bb.boxed()),
            };
            (ca * cb, core)
        }
        other => (Rational::one(), other.clone()),
    }
}

/// Coefficients keyed by the non-constant part of each term; the constant term sits under `1`.
/// Terms keep the order in which their key first appeared.
fn collect_like_terms(terms: Vec<Expr>) -> Vec<(Expr, Rational)> {
    let mut index: BTreeMap<Expr, usize> = BTreeMap::new();
    let mut collected: Vec<(Expr, Rational)> = Vec::new();
    for term in terms {
        let (coef, base) = split_coeff(&term);
        if coef.is_zero() {
            continue;
        }
        match index.get(&base) {
            Some(&slot) => collected[slot].1 += coef,
            None => {
                index.insert(base.clone(), collected.len());
                collected.push((base, coef));
            }
        }
    }
    collected
}

fn rebuild_sum(collected: Vec<(Expr, Rational)>) -> Expr {
    let mut constant = Rational::zero();
    let mut terms = Vec::new();
    for (base, coef) in collected {
        if coef.is_zero() {
            continue;
        }
        if base.is_one() {
            constant += coef;
        } else {
            terms.push(term_from(&coef, base));
        }
    }
    if !constant.is_zero() {
        terms.push(Expr::Constant(constant));
    }

    let mut iter = terms.into_iter();
    let Some(first) = iter.next() else {
        return zero();
    };
    iter.fold(first, |acc, term| match term {
        Expr::Neg(inner) => Expr::Sub(acc.boxed(), inner),
        Expr::Constant(c) if c.is_negative() => Expr::Sub(acc.boxed(), Expr::Constant(-c).boxed()),
        other => Expr::Add(acc.boxed(), other.boxed()),
    })
}

fn term_from(coef: &Rational, base: Expr) -> Expr {
    if coef.is_zero() {
        return zero();
    }
    if base.is_one() {
        return Expr::Constant(coef.clone());
    }
    if coef.is_one() {
        return base;
    }
    if coef == &-Rational::one() {
        return simplify_neg(base);
    }
    Expr::Mul(Expr::Constant(coef.clone()).boxed(), base.boxed())
}

pub fn simplify_mul(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(xc), Expr::Constant(yc)) => Expr::Constant(xc * yc),
        (x, y) if x.is_zero() || y.is_zero() => zero(),
        (x, y) if x.is_one() => y,
        (x, y) if y.is_one() => x,
        (x, y) => {
            let (c, core) = split_coeff(&Expr::Mul(x.boxed(), y.boxed()));
            term_from(&c, core)
        }
    }
}

pub fn simplify_div(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(n), Expr::Constant(d)) => {
            if d.is_zero() {
                Expr::Div(Expr::Constant(n).boxed(), Expr::Constant(d).boxed())
            } else {
                Expr::Constant(n / d)
            }
        }
        (x, y) if y.is_one() => x,
        (x, y) if x.is_zero() && !y.is_zero() => zero(),
        (x, y) if x == y && !x.is_zero() => one(),
        (x, Expr::Constant(d)) if !d.is_zero() => {
            simplify_mul(Expr::Constant(Rational::one() / d), x)
        }
        (x, y) => Expr::Div(x.boxed(), y.boxed()),
    }
}

pub fn simplify_pow(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (_, Expr::Constant(e)) if e.is_zero() => one(),
        (base, Expr::Constant(e)) if e.is_one() => base,
        (Expr::Constant(b), Expr::Constant(e)) => fold_constant_pow(b, e),
        // (u^a)^n is only safe to merge for integer n.
        (Expr::Pow(inner, e1), Expr::Constant(e2)) => match *e1 {
            Expr::Constant(e1) if e2.is_integer() => {
                simplify_pow(*inner, Expr::Constant(e1 * e2))
            }
            e1 => Expr::Pow(Expr::Pow(inner, e1.boxed()).boxed(), Expr::Constant(e2).boxed()),
        },
        (x, y) => Expr::Pow(x.boxed(), y.boxed()),
    }
}

fn fold_constant_pow(b: Rational, e: Rational) -> Expr {
    if e.is_integer() {
        let k: BigInt = e.to_integer();
        if let Some(power) = k.abs().to_u32().filter(|p| *p <= MAX_FOLDED_EXPONENT) {
            if !k.is_negative() {
                return Expr::Constant(Rational::new(b.numer().pow(power), b.denom().pow(power)));
            }
            if !b.is_zero() {
                return Expr::Constant(Rational::new(b.denom().pow(power), b.numer().pow(power)));
            }
        }
    }
    Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed())
}

pub fn simplify_neg(expr: Expr) -> Expr {
    match expr {
        Expr::Constant(x) => Expr::Constant(-x),
        Expr::Neg(x) => *x,
        other => Expr::Neg(other.boxed()),
    }
}
