use rand::Rng;

use crate::domains::finite_field::FiniteField;
use crate::domains::integer::{Integer, IntegerRing};
use crate::domains::Ring;

use super::{polynomial::MultivariatePolynomial, Exponent};

impl<E: Exponent> MultivariatePolynomial<IntegerRing, E> {
    /// Map the polynomial to the finite field `field`.
    pub fn to_finite_field(&self, field: &FiniteField) -> MultivariatePolynomial<FiniteField, E> {
        self.map_coeff(|c| field.to_element(c), field.clone())
    }

    /// Reduce every coefficient to the symmetric range `(-m/2, m/2]`.
    pub fn symmetric_mod(&self, m: &Integer) -> Self {
        self.map_coeff(|c| c.symmetric_mod(m), IntegerRing::new())
    }
}

impl<E: Exponent> MultivariatePolynomial<FiniteField, E> {
    /// Lift the polynomial to the integers, using the symmetric representation
    /// of the coefficients.
    pub fn to_integer_polynomial(&self) -> MultivariatePolynomial<IntegerRing, E> {
        self.map_coeff(|c| c.clone(), IntegerRing::new())
    }

    /// Compute the monic gcd of two univariate polynomials with Euclid's algorithm.
    pub fn univariate_gcd(&self, b: &Self) -> Self {
        let mut a = self.clone();
        let mut b = b.clone();
        while !b.is_zero() {
            let r = a.quot_rem_univariate(&b).1;
            a = b;
            b = r;
        }

        a.make_monic()
    }

    /// Check if a polynomial that is univariate in `x` has no repeated factors.
    pub fn is_square_free_univariate(&self, x: usize) -> bool {
        let d = self.derivative(x);
        if d.is_zero() {
            return self.is_constant();
        }

        self.univariate_gcd(&d).is_one()
    }

    /// Generate a random polynomial in `x` of degree less than `n`.
    pub fn random_univariate(&self, rng: &mut impl Rng, x: usize, n: usize) -> Self {
        let mut res = self.zero_with_capacity(n);
        let mut e = vec![E::zero(); self.nvars()];
        for i in 0..n {
            let c = self.field.sample(rng, (0, i64::MAX));
            e[x] = E::from_u32(i as u32);
            res.append_monomial(c, &e);
        }
        res
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use crate::domains::finite_field::FiniteField;
    use crate::domains::integer::{Integer, Z};
    use crate::poly::{polynomial::MultivariatePolynomial, Variable};

    #[test]
    fn reduction_is_symmetric() {
        let mut p =
            MultivariatePolynomial::<_, u16>::new(&Z, None, Arc::new(vec![Variable::new("x")]));
        p.append_monomial(Integer::new(12), &[2]);
        p.append_monomial(Integer::new(4), &[1]);
        p.append_monomial(Integer::new(-1), &[0]);

        let field = FiniteField::new(Integer::new(7));
        let pp = p.to_finite_field(&field);
        assert_eq!(pp.coefficients, vec![Integer::new(-1), Integer::new(-3), Integer::new(-2)]);
        assert_eq!(pp.to_integer_polynomial(), p.symmetric_mod(&Integer::new(7)));

        // 14 x reduces to zero
        let mut q = p.zero();
        q.append_monomial(Integer::new(14), &[1]);
        assert!(q.to_finite_field(&field).is_zero());
    }

    #[test]
    fn euclid() {
        let field = FiniteField::new(Integer::new(5));
        let x =
            MultivariatePolynomial::<_, u16>::new(&field, None, Arc::new(vec![Variable::new("x")]))
            .variable(0);
        let one = x.one();

        // (x+1)(x+2) and (x+1)(x-2)
        let a = &(&x + &one) * &(&x + &one.clone().mul_coeff(Integer::new(2)));
        let b = &(&x + &one) * &(&x - &one.clone().mul_coeff(Integer::new(2)));
        assert_eq!(a.univariate_gcd(&b), &x + &one);
        assert!(a.is_square_free_univariate(0));
        assert!(!(&a * &a).is_square_free_univariate(0));

        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let r = a.random_univariate(&mut rng, 0, 4);
        assert!(r.degree(0) < 4);
    }
}
