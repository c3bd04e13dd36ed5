use crate::expr::{Expr, Rational, add, div, half, mul, neg, one, pow, sub, two};
use crate::simplify::{simplify, simplify_add, simplify_sub};
use num_traits::{One, Zero};

/// Symbolic derivative of `expr` with respect to `var`.
///
/// Total over every expression form. Results are lightly simplified; callers
/// wanting a canonical shape should run `simplify_fully` on the output.
pub fn differentiate(var: &str, expr: &Expr) -> Expr {
    Differentiator { var }.derive(expr)
}

struct Differentiator<'a> {
    var: &'a str,
}

impl<'a> Differentiator<'a> {
    fn derive(&self, expr: &Expr) -> Expr {
        if !expr.depends_on(self.var) {
            return Expr::Constant(Rational::zero());
        }
        match expr {
            Expr::Variable(name) if name == self.var => Expr::Constant(Rational::one()),
            Expr::Variable(_) | Expr::Constant(_) | Expr::Pi => Expr::Constant(Rational::zero()),

            Expr::Add(a, b) => simplify_add(self.derive(a), self.derive(b)),
            Expr::Sub(a, b) => simplify_sub(self.derive(a), self.derive(b)),
            Expr::Mul(a, b) => self.product_rule(a, b),
            Expr::Div(a, b) => self.quotient_rule(a, b),
            Expr::Pow(a, b) => self.power_rule(a, b),
            Expr::Neg(a) => simplify(neg(self.derive(a))),

            Expr::Sin(a) => self.chain_rule(a, |u| Expr::Cos(u.boxed())),
            Expr::Cos(a) => self.chain_rule(a, |u| neg(Expr::Sin(u.boxed()))),
            Expr::Tan(a) => self.chain_rule(a, |u| pow(Expr::Sec(u.boxed()), two())),
            Expr::Sec(a) => self.chain_rule(a, |u| {
                mul(Expr::Sec(u.clone().boxed()), Expr::Tan(u.boxed()))
            }),
            Expr::Csc(a) => self.chain_rule(a, |u| {
                neg(mul(Expr::Csc(u.clone().boxed()), Expr::Cot(u.boxed())))
            }),
            Expr::Cot(a) => self.chain_rule(a, |u| neg(pow(Expr::Csc(u.boxed()), two()))),

            Expr::Asin(a) => self.chain_rule(a, |u| div(one(), sqrt(sub(one(), square(u))))),
            Expr::Acos(a) => {
                self.chain_rule(a, |u| neg(div(one(), sqrt(sub(one(), square(u))))))
            }
            Expr::Atan(a) => self.chain_rule(a, |u| div(one(), add(one(), square(u)))),
            Expr::Asec(a) => self.chain_rule(a, |u| {
                div(
                    one(),
                    mul(Expr::Abs(u.clone().boxed()), sqrt(sub(square(u), one()))),
                )
            }),
            Expr::Acsc(a) => self.chain_rule(a, |u| {
                neg(div(
                    one(),
                    mul(Expr::Abs(u.clone().boxed()), sqrt(sub(square(u), one()))),
                ))
            }),
            Expr::Acot(a) => self.chain_rule(a, |u| neg(div(one(), add(one(), square(u))))),

            Expr::Sinh(a) => self.chain_rule(a, |u| Expr::Cosh(u.boxed())),
            Expr::Cosh(a) => self.chain_rule(a, |u| Expr::Sinh(u.boxed())),
            Expr::Tanh(a) => self.chain_rule(a, |u| pow(Expr::Sech(u.boxed()), two())),
            Expr::Sech(a) => self.chain_rule(a, |u| {
                neg(mul(Expr::Sech(u.clone().boxed()), Expr::Tanh(u.boxed())))
            }),
            Expr::Csch(a) => self.chain_rule(a, |u| {
                neg(mul(Expr::Csch(u.clone().boxed()), Expr::Coth(u.boxed())))
            }),
            Expr::Coth(a) => self.chain_rule(a, |u| neg(pow(Expr::Csch(u.boxed()), two()))),
            Expr::Asinh(a) => self.chain_rule(a, |u| div(one(), sqrt(add(square(u), one())))),
            Expr::Acosh(a) => self.chain_rule(a, |u| div(one(), sqrt(sub(square(u), one())))),
            Expr::Atanh(a) => self.chain_rule(a, |u| div(one(), sub(one(), square(u)))),

            Expr::Exp(a) => self.chain_rule(a, |u| Expr::Exp(u.boxed())),
            Expr::Log(a) => self.chain_rule(a, |u| div(one(), u)),
            // d|u| = u' * u/|u|, undefined where u = 0.
            Expr::Abs(a) => self.chain_rule(a, |u| div(u.clone(), Expr::Abs(u.boxed()))),
        }
    }

    fn product_rule(&self, a: &Expr, b: &Expr) -> Expr {
        let da = self.derive(a);
        let db = self.derive(b);
        simplify(add(mul(da, b.clone()), mul(a.clone(), db)))
    }

    fn quotient_rule(&self, a: &Expr, b: &Expr) -> Expr {
        if !b.depends_on(self.var) {
            return simplify(div(self.derive(a), b.clone()));
        }
        simplify(div(
            sub(
                mul(self.derive(a), b.clone()),
                mul(a.clone(), self.derive(b)),
            ),
            pow(b.clone(), two()),
        ))
    }

    fn power_rule(&self, base: &Expr, exp: &Expr) -> Expr {
        let base_varies = base.depends_on(self.var);
        let exp_varies = exp.depends_on(self.var);
        match (base_varies, exp_varies) {
            // u^n
            (true, false) => {
                let lowered = match exp {
                    Expr::Constant(n) => Expr::Constant(n - Rational::one()),
                    other => sub(other.clone(), one()),
                };
                simplify(mul(
                    mul(exp.clone(), pow(base.clone(), lowered)),
                    self.derive(base),
                ))
            }
            // a^v
            (false, true) => simplify(mul(
                mul(
                    pow(base.clone(), exp.clone()),
                    Expr::Log(base.clone().boxed()),
                ),
                self.derive(exp),
            )),
            // u^v = exp(v log u)
            _ => {
                let f = pow(base.clone(), exp.clone());
                let da = self.derive(base);
                let db = self.derive(exp);
                simplify(mul(
                    f,
                    add(
                        mul(db, Expr::Log(base.clone().boxed())),
                        div(mul(exp.clone(), da), base.clone()),
                    ),
                ))
            }
        }
    }

    fn chain_rule<F>(&self, arg: &Expr, outer: F) -> Expr
    where
        F: Fn(Expr) -> Expr,
    {
        let da = self.derive(arg);
        simplify(mul(outer(arg.clone()), da))
    }
}

fn square(u: Expr) -> Expr {
    pow(u, two())
}

fn sqrt(u: Expr) -> Expr {
    pow(u, half())
}
