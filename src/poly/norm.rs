use rand::Rng;

use crate::domains::integer::{Integer, IntegerRing};

use super::{polynomial::MultivariatePolynomial, Exponent};

impl<E: Exponent> MultivariatePolynomial<IntegerRing, E> {
    /// The infinity norm: the largest absolute value of the coefficients.
    ///
    /// Viewing the polynomial recursively as a polynomial in any list of variables
    /// with polynomial coefficients gives the same norm, so it is computed in one pass.
    pub fn max_norm(&self) -> Integer {
        self.coefficients
            .iter()
            .map(|c| c.abs())
            .max()
            .unwrap_or_else(Integer::zero)
    }

    /// The sum of the absolute values of the coefficients.
    pub fn l1_norm(&self) -> Integer {
        self.coefficients.iter().map(|c| c.abs()).sum()
    }

    /// The infinity norm of a polynomial that is univariate in `x`.
    pub fn max_norm_in(&self, x: usize) -> Integer {
        debug_assert!(self.is_univariate_in(x));
        self.max_norm()
    }

    /// The one norm of a polynomial that is univariate in `x`.
    pub fn l1_norm_in(&self, x: usize) -> Integer {
        debug_assert!(self.is_univariate_in(x));
        self.l1_norm()
    }

    /// Compute the Landau-Mignotte bound `B` of a polynomial `u` that is univariate in `x`:
    /// the coefficients of every factor of `u` of degree at most `deg(u)/2` are bounded by `B`
    /// in absolute value.
    pub fn landau_mignotte_bound(&self, x: usize) -> Integer {
        assert!(
            self.is_univariate_in(x),
            "The Landau-Mignotte bound requires a polynomial univariate in {}: {}",
            self.variables[x],
            self
        );

        let d = (self.degree(x).to_u32() / 2) as i64;

        let sum_sq: Integer = self.coefficients.iter().map(|c| c * c).sum();
        let norm2 = sum_sq.isqrt_ceil();

        &Integer::binom(d - 1, d / 2 - 1) * &norm2
            + &Integer::binom(d - 1, d / 2) * &self.lcoeff().abs()
    }

    /// A bound on the coefficients of the factors of the polynomial:
    /// `ceil(sqrt(n+1)) * 2^n * norm(f) * |lc(f)|`, where `n` is the degree of
    /// the univariate polynomial.
    pub fn factor_coefficient_bound(&self, n: u32) -> Integer {
        let root = Integer::from(n as u64 + 1).isqrt_ceil();
        &(&(&root * &Integer::new(2).pow(n as u64)) * &self.max_norm()) * &self.lcoeff().abs()
    }

    /// A bound on the coefficients of the factors of a multivariate polynomial,
    /// scaled by its leading coefficient: `2^n * |f|_1 * |lc(f)|`, where `n` is the
    /// sum of the degrees in `vars`. The one norm bounds the two norm for any
    /// number of terms.
    pub fn multivariate_factor_bound(&self, vars: &[usize]) -> Integer {
        let n = self.degree_sum(vars);
        &(&Integer::new(2).pow(n as u64) * &self.l1_norm()) * &self.lcoeff().abs()
    }
}

/// Compute the least `l` such that `p^l > 2 * bound`.
pub fn lifting_exponent(bound: &Integer, p: &Integer) -> u32 {
    let target = bound * &Integer::new(2);
    let mut l = 1;
    let mut pl = p.clone();
    while pl <= target {
        pl = &pl * p;
        l += 1;
    }
    l
}

/// Compute `ceil(log2(n))` for `n > 0` using the bit length.
pub(crate) fn log2_ceil(n: &Integer) -> u64 {
    if n.is_zero() || n.is_one() {
        return 0;
    }
    (n - &Integer::one()).bits()
}

/// Draw a uniformly distributed integer in `[min, max]`.
pub fn random(rng: &mut impl Rng, min: i64, max: i64) -> Integer {
    Integer::new(rng.gen_range(min..=max))
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use crate::domains::integer::{Integer, IntegerRing, Z};
    use crate::poly::{polynomial::MultivariatePolynomial, Variable};

    use super::{lifting_exponent, log2_ceil, random};

    fn univariate(coeffs: &[i64]) -> MultivariatePolynomial<IntegerRing> {
        let mut p = MultivariatePolynomial::new(&Z, None, Arc::new(vec![Variable::new("x")]));
        for (i, c) in coeffs.iter().enumerate() {
            p.append_monomial(Integer::new(*c), &[i as u16]);
        }
        p
    }

    #[test]
    fn norms() {
        let p = univariate(&[3, -7, 0, 2]);
        assert_eq!(p.max_norm(), Integer::new(7));
        assert_eq!(p.l1_norm(), Integer::new(12));
        assert_eq!(p.max_norm_in(0), Integer::new(7));
        assert_eq!(p.l1_norm_in(0), Integer::new(12));
        assert_eq!(p.zero().max_norm(), Integer::zero());
    }

    #[test]
    fn bounds() {
        // x^4 + 2x^2 + 3
        let p = univariate(&[3, 0, 2, 0, 1]);
        assert_eq!(p.landau_mignotte_bound(0), Integer::new(5));

        // ceil(sqrt(3)) * 2^2 * 3 * 1
        assert_eq!(p.factor_coefficient_bound(2), Integer::new(24));

        // 2^4 * 6 * 1
        assert_eq!(p.multivariate_factor_bound(&[0]), Integer::new(96));

        assert_eq!(lifting_exponent(&Integer::new(24), &Integer::new(7)), 2);
        assert_eq!(lifting_exponent(&Integer::new(3), &Integer::new(7)), 1);
        assert_eq!(lifting_exponent(&Integer::new(4), &Integer::new(3)), 2);
    }

    #[test]
    fn logarithms() {
        assert_eq!(log2_ceil(&Integer::new(1)), 0);
        assert_eq!(log2_ceil(&Integer::new(8)), 3);
        assert_eq!(log2_ceil(&Integer::new(9)), 4);
    }

    #[test]
    fn random_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        for _ in 0..100 {
            let r = random(&mut rng, -3, 3);
            assert!(r >= Integer::new(-3) && r <= Integer::new(3));
        }
    }
}
