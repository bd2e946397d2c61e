use tracing::instrument;

use crate::domains::finite_field::FiniteField;
use crate::domains::integer::IntegerRing;
use crate::domains::rational::RationalField;
use crate::domains::EuclideanDomain;

use super::polynomial::MultivariatePolynomial;
use super::Exponent;

// 100 large u32 primes starting from the 203213901st prime number
pub const LARGE_U32_PRIMES: [u32; 100] = [
    4293490987, 4293491603, 4293492277, 4293492857, 4293491017, 4293491621, 4293492283, 4293492881,
    4293491023, 4293491639, 4293492293, 4293492893, 4293491051, 4293491659, 4293492331, 4293492941,
    4293491149, 4293491701, 4293492349, 4293492977, 4293491171, 4293491711, 4293492383, 4293493037,
    4293491221, 4293491747, 4293492403, 4293493049, 4293491261, 4293491779, 4293492421, 4293493069,
    4293491269, 4293491791, 4293492431, 4293493081, 4293491273, 4293491819, 4293492487, 4293493091,
    4293491281, 4293491849, 4293492499, 4293493117, 4293491299, 4293491863, 4293492523, 4293493121,
    4293491303, 4293491887, 4293492583, 4293493159, 4293491311, 4293491897, 4293492587, 4293493163,
    4293491327, 4293491911, 4293492649, 4293493207, 4293491329, 4293491953, 4293492661, 4293493229,
    4293491399, 4293491957, 4293492673, 4293493241, 4293491431, 4293492017, 4293492701, 4293493261,
    4293491467, 4293492023, 4293492739, 4293493319, 4293491509, 4293492097, 4293492751, 4293493363,
    4293491539, 4293492101, 4293492769, 4293493367, 4293491551, 4293492107, 4293492779, 4293493409,
    4293491561, 4293492113, 4293492781, 4293493423, 4293491567, 4293492139, 4293492811, 4293493433,
    4293491591, 4293492169, 4293492821, 4293493487,
];

/// Ring-specific behaviour of the polynomial GCD: the base case of the
/// recursion over the variables and the canonical form of the result.
pub trait PolynomialGCD<E: Exponent>: EuclideanDomain {
    /// The gcd of two polynomials whose variables have all been recursed over.
    fn constant_gcd(
        a: &MultivariatePolynomial<Self, E>,
        b: &MultivariatePolynomial<Self, E>,
    ) -> MultivariatePolynomial<Self, E>;

    /// Bring a gcd in canonical form: a positive leading coefficient over the integers
    /// and a unit leading coefficient over fields.
    fn normalize(a: MultivariatePolynomial<Self, E>) -> MultivariatePolynomial<Self, E>;
}

impl<E: Exponent> PolynomialGCD<E> for IntegerRing {
    fn constant_gcd(
        a: &MultivariatePolynomial<Self, E>,
        b: &MultivariatePolynomial<Self, E>,
    ) -> MultivariatePolynomial<Self, E> {
        a.constant(a.content().gcd(&b.content()))
    }

    fn normalize(a: MultivariatePolynomial<Self, E>) -> MultivariatePolynomial<Self, E> {
        if a.lcoeff().is_negative() {
            -a
        } else {
            a
        }
    }
}

impl<E: Exponent> PolynomialGCD<E> for RationalField {
    fn constant_gcd(
        a: &MultivariatePolynomial<Self, E>,
        b: &MultivariatePolynomial<Self, E>,
    ) -> MultivariatePolynomial<Self, E> {
        if a.is_zero() && b.is_zero() {
            a.zero()
        } else {
            a.one()
        }
    }

    fn normalize(a: MultivariatePolynomial<Self, E>) -> MultivariatePolynomial<Self, E> {
        a.make_monic()
    }
}

impl<E: Exponent> PolynomialGCD<E> for FiniteField {
    fn constant_gcd(
        a: &MultivariatePolynomial<Self, E>,
        b: &MultivariatePolynomial<Self, E>,
    ) -> MultivariatePolynomial<Self, E> {
        if a.is_zero() && b.is_zero() {
            a.zero()
        } else {
            a.one()
        }
    }

    fn normalize(a: MultivariatePolynomial<Self, E>) -> MultivariatePolynomial<Self, E> {
        a.make_monic()
    }
}

impl<R: PolynomialGCD<E>, E: Exponent> MultivariatePolynomial<R, E> {
    /// Compute the pseudo-quotient and pseudo-remainder `(q, r)` of `self` divided by `v`
    /// in the variable `x`, such that `lc(v)^max(m-n+1, 0) * self = q * v + r`,
    /// where `m` and `n` are the degrees of `self` and `v` in `x`
    /// and `lc(v)` is the leading coefficient of `v` in `x`.
    pub fn pseudo_division(&self, v: &Self, x: usize) -> (Self, Self) {
        if v.is_zero() {
            panic!("Cannot divide by 0 polynomial");
        }

        let m = self.degree(x).to_u32();
        let n = v.degree(x).to_u32();
        if self.is_zero() || m < n {
            return (self.zero(), self.clone());
        }

        let lc = v.univariate_lcoeff(x);
        let mut delta = m - n + 1;
        let mut q = self.zero();
        let mut r = self.clone();
        let mut e = vec![E::zero(); self.nvars()];

        while !r.is_zero() && r.degree(x).to_u32() >= n {
            e[x] = E::from_u32(r.degree(x).to_u32() - n);
            let s = r.univariate_lcoeff(x).mul_exp(&e);
            q = &(&q * &lc) + &s;
            r = &(&r * &lc) - &(&s * v);
            delta -= 1;
        }

        if delta > 0 {
            let f = lc.pow(delta as usize);
            q = &q * &f;
            r = &r * &f;
        }

        (q, r)
    }

    /// Compute the pseudo-remainder of `self` divided by `v` in the variable `x`.
    pub fn pseudo_remainder(&self, v: &Self, x: usize) -> Self {
        self.pseudo_division(v, x).1
    }

    /// Divide `self` by `v` recursively over the variables `vars`. In every step the
    /// leading coefficient in `vars[0]` is divided recursively over the remaining variables.
    /// When no variables are left, the division happens in the coefficient ring.
    ///
    /// The division stops when a leading coefficient is not divisible, so that
    /// the remainder is zero if and only if `v` divides `self`.
    pub fn rec_poly_div(&self, v: &Self, vars: &[usize]) -> (Self, Self) {
        if v.is_zero() {
            panic!("Cannot divide by 0 polynomial");
        }

        let Some((&x, rest)) = vars.split_first() else {
            if !v.is_constant() {
                return (self.zero(), self.clone());
            }

            let c = v.get_constant();
            let mut q = self.zero_with_capacity(self.nterms());
            for t in self {
                match self.field.try_div(t.coefficient, &c) {
                    Some(qc) => q.append_monomial(qc, t.exponents),
                    None => return (self.zero(), self.clone()),
                }
            }
            return (q, self.zero());
        };

        let n = v.degree(x);
        let lcv = v.univariate_lcoeff(x);

        let mut q = self.zero();
        let mut r = self.clone();
        let mut e = vec![E::zero(); self.nvars()];
        while !r.is_zero() && r.degree(x) >= n {
            let m = r.degree(x);
            let (c, rem) = r.univariate_lcoeff(x).rec_poly_div(&lcv, rest);
            if !rem.is_zero() {
                break;
            }

            e[x] = m - n;
            let t = c.mul_exp(&e);
            r = &r - &(&t * v);
            q = q + t;
        }

        (q, r)
    }

    /// The quotient of [rec_poly_div](Self::rec_poly_div).
    pub fn rec_quotient(&self, v: &Self, vars: &[usize]) -> Self {
        self.rec_poly_div(v, vars).0
    }

    /// Compute the content of `self` viewed as a polynomial in `vars[0]`
    /// with coefficients in the remaining variables of `vars`.
    pub fn polynomial_content(&self, vars: &[usize]) -> Self {
        if self.is_zero() {
            return self.zero();
        }

        let Some((&x, rest)) = vars.split_first() else {
            return R::constant_gcd(self, &self.zero());
        };

        let mut g = self.zero();
        for (c, _) in self.to_univariate_polynomial_list(x) {
            g = g.mv_sub_resultant_gcd(&c, rest);
            if g.is_one() {
                break;
            }
        }
        g
    }

    /// Compute the primitive part of `self` viewed as a polynomial in `vars[0]`,
    /// i.e. `self` divided by its [content](Self::polynomial_content).
    pub fn primitive_part(&self, vars: &[usize]) -> Self {
        if self.is_zero() {
            return self.clone();
        }

        let c = self.polynomial_content(vars);
        if c.is_one() {
            self.clone()
        } else {
            self / &c
        }
    }

    /// Compute the gcd of `self` and `v` in the variables `vars` using
    /// a primitive polynomial remainder sequence.
    pub fn mv_poly_gcd(&self, v: &Self, vars: &[usize]) -> Self {
        if self.is_zero() {
            return R::normalize(v.clone());
        }
        if v.is_zero() {
            return R::normalize(self.clone());
        }

        let Some((&x, rest)) = vars.split_first() else {
            return R::constant_gcd(self, v);
        };

        let cu = self.polynomial_content(vars);
        let cv = v.polynomial_content(vars);
        let d = cu.mv_poly_gcd(&cv, rest);

        let mut pu = self / &cu;
        let mut pv = v / &cv;
        if pu.degree(x) < pv.degree(x) {
            std::mem::swap(&mut pu, &mut pv);
        }

        while !pv.is_zero() {
            let r = pu.pseudo_remainder(&pv, x);
            pu = pv;
            pv = r.primitive_part(vars);
        }

        R::normalize(&d * &pu.primitive_part(vars))
    }

    /// Compute the gcd of `self` and `v` in the variables `vars` using
    /// the sub-resultant polynomial remainder sequence.
    pub fn mv_sub_resultant_gcd(&self, v: &Self, vars: &[usize]) -> Self {
        if self.is_zero() {
            return R::normalize(v.clone());
        }
        if v.is_zero() {
            return R::normalize(self.clone());
        }

        let Some((&x, rest)) = vars.split_first() else {
            return R::constant_gcd(self, v);
        };

        let (a, b) = if self.degree(x) >= v.degree(x) {
            (self, v)
        } else {
            (v, self)
        };

        let ca = a.polynomial_content(vars);
        let cb = b.polynomial_content(vars);
        let d = ca.mv_sub_resultant_gcd(&cb, rest);

        let mut a = a / &ca;
        let mut b = b / &cb;

        let mut delta = a.degree(x).to_u32() - b.degree(x).to_u32();
        let mut beta = if delta % 2 == 0 {
            -a.one()
        } else {
            a.one()
        };
        let mut psi = -a.one();

        loop {
            let r = a.pseudo_remainder(&b, x);
            if r.is_zero() {
                break;
            }

            let gamma = b.univariate_lcoeff(x);
            a = b;
            b = &r / &beta;

            if b.degree(x).is_zero() {
                // the primitive parts are coprime
                b = b.one();
                break;
            }

            let new_delta = a.degree(x).to_u32() - b.degree(x).to_u32();
            psi = match delta {
                0 => psi,
                1 => -&gamma,
                _ => &(-&gamma).pow(delta as usize) / &psi.pow(delta as usize - 1),
            };
            beta = -(&gamma * &psi.pow(new_delta as usize));
            delta = new_delta;
        }

        R::normalize(&d * &b.primitive_part(vars))
    }

    /// Compute the greatest common divisor of `self` and `b` in all the variables
    /// that occur in either polynomial.
    #[instrument(level = "trace", skip_all)]
    pub fn gcd(&self, b: &Self) -> Self {
        let mut vars = self.occurring_variables();
        vars.extend(b.occurring_variables());
        vars.sort_unstable();
        vars.dedup();

        self.mv_sub_resultant_gcd(b, &vars)
    }
}
