use super::{gcd::PolynomialGCD, polynomial::MultivariatePolynomial, Exponent};

impl<R: PolynomialGCD<E>, E: Exponent> MultivariatePolynomial<R, E> {
    /// Compute the resultant of `self` and `v` with respect to the variable `x`,
    /// using pseudo-remainders. The result is a polynomial in the other variables.
    ///
    /// With `m = deg(u)`, `n = deg(v)`, `r = prem(u, v)`, `s = deg(r)` and `δ = m - n + 1`,
    /// the resultant satisfies `res(u, v) = (-1)^(mn) res(v, r) / lc(v)^(δn - m + s)`.
    pub fn resultant(&self, v: &Self, x: usize) -> Self {
        if self.is_zero() || v.is_zero() {
            return self.zero();
        }

        let m = self.degree(x).to_u32();
        let n = v.degree(x).to_u32();

        if n == 0 {
            return v.pow(m as usize);
        }
        if m == 0 {
            return self.pow(n as usize);
        }

        let sign_flip = (m * n) % 2 == 1;

        if m < n {
            let r = v.resultant(self, x);
            return if sign_flip { -r } else { r };
        }

        let r = self.pseudo_remainder(v, x);
        if r.is_zero() {
            return self.zero();
        }

        let s = r.degree(x).to_u32();
        let delta = m - n + 1;

        let mut res = v.resultant(&r, x);
        let e = delta * n - m + s;
        if e > 0 {
            res = &res / &v.univariate_lcoeff(x).pow(e as usize);
        }

        if sign_flip {
            -res
        } else {
            res
        }
    }
}
