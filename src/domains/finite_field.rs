use std::fmt::{Display, Formatter};

use rand::Rng;

use crate::utils;

use super::{
    integer::{Integer, Z},
    EuclideanDomain, Field, Ring,
};

/// The integers modulo `p`. When `p` is a prime this is a finite field.
/// For a prime power `p^k` only the units can be inverted, which is all
/// that Hensel lifting requires.
///
/// Elements are [Integer]s stored in the symmetric range `(-p/2, p/2]`, so that
/// a coefficient that is small in absolute value keeps its sign after reduction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FiniteField {
    p: Integer,
    is_prime: bool,
}

impl FiniteField {
    /// Create a new finite field from a prime `p`.
    pub fn new(p: Integer) -> FiniteField {
        if p <= Integer::one() {
            panic!("The modulus {} must be larger than one", p);
        }

        FiniteField { p, is_prime: true }
    }

    /// Create the ring of integers modulo `p`, where `p` is not necessarily prime.
    pub fn new_non_prime(p: Integer) -> FiniteField {
        if p <= Integer::one() {
            panic!("The modulus {} must be larger than one", p);
        }

        FiniteField { p, is_prime: false }
    }

    /// Get the modulus of the field.
    #[inline]
    pub fn get_prime(&self) -> &Integer {
        &self.p
    }

    #[inline]
    pub fn is_prime(&self) -> bool {
        self.is_prime
    }

    /// Map an integer into the symmetric range of the field.
    #[inline]
    pub fn to_element(&self, a: &Integer) -> Integer {
        a.symmetric_mod(&self.p)
    }

    /// Compute the inverse of `a`, if `a` is a unit.
    pub fn try_inv(&self, a: &Integer) -> Option<Integer> {
        let a = a % &self.p;
        if a.is_zero() || !a.gcd(&self.p).is_one() {
            return None;
        }

        Some(a.mod_inverse(&self.p).symmetric_mod(&self.p))
    }
}

impl Display for FiniteField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Z_{}", self.p)
    }
}

impl Ring for FiniteField {
    type Element = Integer;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        (a + b).symmetric_mod(&self.p)
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        (a - b).symmetric_mod(&self.p)
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        (a * b).symmetric_mod(&self.p)
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = (&*a + &(b * c)).symmetric_mod(&self.p);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = (&*a - &(b * c)).symmetric_mod(&self.p);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        (-a).symmetric_mod(&self.p)
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Integer::zero()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Integer::one()
    }

    #[inline]
    fn nth(&self, n: u64) -> Self::Element {
        Integer::from(n).symmetric_mod(&self.p)
    }

    #[inline]
    fn element_from_integer(&self, n: &Integer) -> Self::Element {
        n.symmetric_mod(&self.p)
    }

    fn pow(&self, b: &Self::Element, mut e: u64) -> Self::Element {
        let mut b = b.clone();
        let mut x = self.one();
        while e > 0 {
            if e & 1 == 1 {
                x = self.mul(&x, &b);
            }
            b = self.mul(&b, &b);
            e >>= 1;
        }
        x
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn one_is_gcd_unit() -> bool {
        false
    }

    fn characteristic(&self) -> Integer {
        self.p.clone()
    }

    fn size(&self) -> Integer {
        self.p.clone()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        self.try_inv(b).map(|i| self.mul(a, &i))
    }

    /// Sample a uniformly distributed element of the field. The `range` is only
    /// used when the modulus does not fit in an `i64`.
    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        match self.p.to_i64() {
            Some(p) => Integer::new(rng.gen_range(0..p)).symmetric_mod(&self.p),
            None => Z.sample(rng, range).symmetric_mod(&self.p),
        }
    }
}

impl EuclideanDomain for FiniteField {
    fn rem(&self, _: &Self::Element, _: &Self::Element) -> Self::Element {
        self.zero()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    fn gcd(&self, _: &Self::Element, _: &Self::Element) -> Self::Element {
        self.one()
    }
}

impl Field for FiniteField {
    #[inline]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    #[inline]
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    /// Compute the inverse when `a` and the modulus are coprime,
    /// otherwise panic.
    fn inv(&self, a: &Self::Element) -> Self::Element {
        if let Some(r) = self.try_inv(a) {
            r
        } else {
            panic!("{} is not invertible in ring {}", a, self);
        }
    }
}

/// Do a deterministic Miller test to check if `n` is a prime.
/// Since `n` is a `u64`, a basis of only 7 witnesses has to be tested.
pub fn is_prime_u64(n: u64) -> bool {
    let w = if n < 341531 {
        [9345883071009581737].as_slice()
    } else if n < 1050535501 {
        [336781006125, 9639812373923155].as_slice()
    } else if n < 350269456337 {
        [
            4230279247111683200,
            14694767155120705706,
            16641139526367750375,
        ]
        .as_slice()
    } else {
        // shortest SPRP basis from Jim Sinclair for testing primality of u64
        [2, 325, 9375, 28178, 450775, 9780504, 1795265022].as_slice()
    };

    if n < 2 {
        return false;
    }

    if n % 2 == 0 {
        return n == 2;
    }

    let mut s = 0;
    let mut d = n - 1;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    let neg_one = n - 1;

    'test: for a in w {
        let a = a % n;

        if a == 0 {
            continue;
        }

        let mut x = utils::pow_mod_u64(a, d, n);

        if x == 1 || x == neg_one {
            continue;
        }

        for _ in 0..s {
            x = utils::mul_mod_u64(x, x, n);

            if x == 1 {
                return false;
            }
            if x == neg_one {
                continue 'test;
            }
        }

        return false;
    }

    true
}

/// An iterator over consecutive 64-bit primes.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct PrimeIteratorU64 {
    current_number: u64,
}

impl PrimeIteratorU64 {
    /// Create a new prime iterator that yields primes larger than or equal to `start`.
    pub fn new(start: u64) -> PrimeIteratorU64 {
        PrimeIteratorU64 {
            current_number: start.max(1) - 1,
        }
    }
}

impl Iterator for PrimeIteratorU64 {
    type Item = u64;

    /// Yield the next prime or `None` if `u64::MAX` has been reached.
    fn next(&mut self) -> Option<u64> {
        while self.current_number < u64::MAX {
            self.current_number += 1;

            if is_prime_u64(self.current_number) {
                return Some(self.current_number);
            }
        }

        None
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{integer::Integer, Field, Ring};

    use super::{is_prime_u64, FiniteField, PrimeIteratorU64};

    #[test]
    fn primes() {
        let p: Vec<_> = PrimeIteratorU64::new(2).take(8).collect();
        assert_eq!(p, [2, 3, 5, 7, 11, 13, 17, 19]);
        assert!(is_prime_u64(4293490987));
        assert!(is_prime_u64(18446744073709551557));
        assert!(!is_prime_u64(3215031751));
        assert!(!is_prime_u64(1));
    }

    #[test]
    fn symmetric_arithmetic() {
        let f = FiniteField::new(Integer::new(7));
        assert_eq!(f.add(&Integer::new(3), &Integer::new(2)), Integer::new(-2));
        assert_eq!(f.mul(&Integer::new(3), &Integer::new(3)), Integer::new(2));
        assert_eq!(f.neg(&Integer::new(3)), Integer::new(-3));
        assert_eq!(f.mul(&f.inv(&Integer::new(3)), &Integer::new(3)), Integer::new(1));
        assert_eq!(f.pow(&Integer::new(3), 6), Integer::new(1));
        assert_eq!(f.element_from_integer(&Integer::new(-11)), Integer::new(3));
    }

    #[test]
    fn prime_power_units() {
        let f = FiniteField::new_non_prime(Integer::new(27));
        assert_eq!(f.try_inv(&Integer::new(3)), None);
        assert_eq!(f.mul(&f.inv(&Integer::new(2)), &Integer::new(2)), Integer::new(1));
    }
}
