use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Rem, Sub, SubAssign},
    str::FromStr,
};

use num_bigint::{BigInt, ParseBigIntError};
use num_integer::Integer as IntegerOps;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rand::Rng;

use crate::utils;

use super::{EuclideanDomain, Ring};

/// The integer ring.
pub type Z = IntegerRing;
/// The integer ring.
pub const Z: IntegerRing = IntegerRing::new();

/// The integer ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IntegerRing;

impl Default for IntegerRing {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegerRing {
    pub const fn new() -> IntegerRing {
        IntegerRing
    }
}

/// An arbitrary-precision integer. Numbers that fit in an `i64` are always
/// stored as [Integer::Natural], so that the derived equality and hashing are canonical.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Integer {
    Natural(i64),
    Large(BigInt),
}

macro_rules! from_with_cast {
    ($base: ty) => {
        impl From<$base> for Integer {
            #[inline]
            fn from(value: $base) -> Self {
                Integer::Natural(value as i64)
            }
        }
    };
}

from_with_cast!(i8);
from_with_cast!(i16);
from_with_cast!(i32);
from_with_cast!(i64);
from_with_cast!(u8);
from_with_cast!(u16);
from_with_cast!(u32);

impl From<u64> for Integer {
    #[inline]
    fn from(value: u64) -> Self {
        if value <= i64::MAX as u64 {
            Integer::Natural(value as i64)
        } else {
            Integer::Large(BigInt::from(value))
        }
    }
}

impl From<usize> for Integer {
    #[inline]
    fn from(value: usize) -> Self {
        Integer::from(value as u64)
    }
}

impl From<BigInt> for Integer {
    #[inline]
    fn from(value: BigInt) -> Self {
        if let Some(n) = value.to_i64() {
            Integer::Natural(n)
        } else {
            Integer::Large(value)
        }
    }
}

impl FromStr for Integer {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Integer::Natural(n));
        }

        Ok(Integer::from(s.parse::<BigInt>()?))
    }
}

impl std::fmt::Debug for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Integer {
    pub fn new(num: i64) -> Integer {
        Integer::Natural(num)
    }

    #[inline]
    pub fn zero() -> Integer {
        Integer::Natural(0)
    }

    #[inline]
    pub fn one() -> Integer {
        Integer::Natural(1)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        match self {
            Integer::Natural(n) => *n == 0,
            Integer::Large(_) => false,
        }
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        match self {
            Integer::Natural(n) => *n == 1,
            Integer::Large(_) => false,
        }
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Natural(n) => *n < 0,
            Integer::Large(r) => r.is_negative(),
        }
    }

    #[inline]
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Integer::Natural(n) => Some(*n),
            Integer::Large(_) => None,
        }
    }

    /// Convert to a multi-precision integer.
    pub fn to_big(&self) -> BigInt {
        match self {
            Integer::Natural(n) => BigInt::from(*n),
            Integer::Large(r) => r.clone(),
        }
    }

    pub fn abs(&self) -> Integer {
        match self {
            Integer::Natural(n) => match n.checked_abs() {
                Some(a) => Integer::Natural(a),
                None => Integer::Large(BigInt::from(*n).abs()),
            },
            Integer::Large(n) => Integer::Large(n.abs()),
        }
    }

    /// The number of bits needed to represent `|self|`. Zero has zero bits.
    pub fn bits(&self) -> u64 {
        match self {
            Integer::Natural(n) => 64 - n.unsigned_abs().leading_zeros() as u64,
            Integer::Large(r) => r.bits(),
        }
    }

    /// Compute the binomial coefficient `(n k) = n!/(k!(n-k)!)`.
    ///
    /// The implementation does not to overflow.
    pub fn binom(n: i64, mut k: i64) -> Integer {
        if n < 0 || k < 0 || k > n {
            return Integer::zero();
        }
        if k > n / 2 {
            k = n - k
        }
        let mut res = Integer::one();
        for i in 1..=k {
            res *= &Integer::Natural(n - k + i);
            res = &res / &Integer::Natural(i);
        }
        res
    }

    pub fn pow(&self, mut e: u64) -> Integer {
        if e == 0 {
            return Integer::one();
        }

        if let Integer::Natural(n) = self {
            if e <= u32::MAX as u64 {
                if let Some(p) = n.checked_pow(e as u32) {
                    return Integer::Natural(p);
                }
            }
        }

        let mut x = self.clone();
        let mut y = Integer::one();
        while e != 1 {
            if e % 2 == 1 {
                y = &y * &x;
                e -= 1;
            }

            x = &x * &x;
            e /= 2;
        }

        x * y
    }

    /// Compute the ceiling of the square root of a non-negative integer.
    pub fn isqrt_ceil(&self) -> Integer {
        if self.is_negative() {
            panic!("Cannot take the square root of negative number {}", self);
        }

        let n = self.to_big();
        let s = n.sqrt();
        if &s * &s < n {
            Integer::from(s + BigInt::one())
        } else {
            Integer::from(s)
        }
    }

    /// Euclidean division: the remainder is always non-negative.
    pub fn quot_rem(&self, b: &Integer) -> (Integer, Integer) {
        if b.is_zero() {
            panic!("Cannot divide by zero");
        }

        if let (Integer::Natural(aa), Integer::Natural(bb)) = (self, b) {
            if let (Some(q), Some(r)) = (aa.checked_div_euclid(*bb), aa.checked_rem_euclid(*bb)) {
                return (Integer::Natural(q), Integer::Natural(r));
            }
        }

        let (a, b) = (self.to_big(), b.to_big());
        let (mut q, mut r) = a.div_rem(&b);
        if r.is_negative() {
            if b.is_positive() {
                q -= BigInt::one();
                r += &b;
            } else {
                q += BigInt::one();
                r -= &b;
            }
        }

        (Integer::from(q), Integer::from(r))
    }

    /// Compute the non-negative greatest common divisor.
    pub fn gcd(&self, b: &Integer) -> Integer {
        match (self, b) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                Integer::from(utils::gcd_signed(*n1, *n2))
            }
            _ => Integer::from(self.to_big().gcd(&b.to_big())),
        }
    }

    /// Compute the least common multiple of two integers.
    pub fn lcm(&self, b: &Integer) -> Integer {
        let g = self.gcd(b);
        if g.is_zero() {
            Integer::zero()
        } else {
            (self / &g * b).abs()
        }
    }

    /// Perform the symmetric mod `p` on `self`, yielding a number in `(-p/2, p/2]`.
    #[inline]
    pub fn symmetric_mod(&self, p: &Integer) -> Integer {
        let c = self % p;

        if &c * &Integer::Natural(2) > *p {
            &c - p
        } else {
            c
        }
    }

    /// Compute the modular inverse of `self` in the ring with size `n`.
    /// `self` and `n` must be coprime.
    pub fn mod_inverse(&self, n: &Integer) -> Integer {
        let mut t0 = Integer::zero();
        let mut t1 = Integer::one();
        let mut r0 = n.clone();
        let mut r1 = self % n;

        while !r1.is_zero() {
            let (q, r) = r0.quot_rem(&r1);
            (t1, t0) = (&t0 - &(&q * &t1), t1);
            (r1, r0) = (r, r1);
        }

        if r0 > Integer::one() {
            panic!("{} is not invertible in ring {}", self, n);
        }
        if t0.is_negative() {
            t0 += n;
        }

        t0
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Integer::Natural(n) => n.fmt(f),
            Integer::Large(r) => r.fmt(f),
        }
    }
}

impl Display for IntegerRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Z")
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Integer::Natural(n1), Integer::Natural(n2)) => n1.cmp(n2),
            (Integer::Natural(n1), Integer::Large(n2)) => BigInt::from(*n1).cmp(n2),
            (Integer::Large(n1), Integer::Natural(n2)) => n1.cmp(&BigInt::from(*n2)),
            (Integer::Large(n1), Integer::Large(n2)) => n1.cmp(n2),
        }
    }
}

impl Ring for IntegerRing {
    type Element = Integer;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += &(b * c);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= &(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        -a
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
        Integer::from(n)
    }

    #[inline]
    fn element_from_integer(&self, n: &Integer) -> Self::Element {
        n.clone()
    }

    #[inline]
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e)
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
        true
    }

    fn characteristic(&self) -> Integer {
        Integer::zero()
    }

    fn size(&self) -> Integer {
        Integer::zero()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if b.is_zero() {
            return None;
        }

        let (q, r) = a.quot_rem(b);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        Integer::Natural(rng.gen_range(range.0..range.1))
    }
}

impl EuclideanDomain for IntegerRing {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a % b
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        a.quot_rem(b)
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.gcd(b)
    }
}

impl<'a, 'b> Add<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn add(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => match n1.checked_add(*n2) {
                Some(n) => Integer::Natural(n),
                None => Integer::from(BigInt::from(*n1) + BigInt::from(*n2)),
            },
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => Integer::from(r2 + BigInt::from(*n1)),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from(r1 + r2),
        }
    }
}

impl<'a, 'b> Sub<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn sub(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => match n1.checked_sub(*n2) {
                Some(n) => Integer::Natural(n),
                None => Integer::from(BigInt::from(*n1) - BigInt::from(*n2)),
            },
            (Integer::Natural(n1), Integer::Large(r2)) => Integer::from(BigInt::from(*n1) - r2),
            (Integer::Large(r1), Integer::Natural(n2)) => Integer::from(r1 - BigInt::from(*n2)),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from(r1 - r2),
        }
    }
}

impl<'a, 'b> Mul<&'b Integer> for &'a Integer {
    type Output = Integer;

    #[inline]
    fn mul(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => match n1.checked_mul(*n2) {
                Some(n) => Integer::Natural(n),
                None => Integer::from(BigInt::from(*n1) * BigInt::from(*n2)),
            },
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => Integer::from(r2 * BigInt::from(*n1)),
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from(r1 * r2),
        }
    }
}

impl<'a, 'b> Div<&'b Integer> for &'a Integer {
    type Output = Integer;

    /// Euclidean quotient.
    #[inline]
    fn div(self, rhs: &'b Integer) -> Integer {
        self.quot_rem(rhs).0
    }
}

impl<'a, 'b> Rem<&'b Integer> for &'a Integer {
    type Output = Integer;

    /// Euclidean remainder, which is never negative.
    #[inline]
    fn rem(self, rhs: &'b Integer) -> Integer {
        self.quot_rem(rhs).1
    }
}

macro_rules! forward_binop {
    ($tr:ident, $f:ident) => {
        impl $tr<Integer> for Integer {
            type Output = Integer;

            #[inline]
            fn $f(self, rhs: Integer) -> Integer {
                (&self).$f(&rhs)
            }
        }

        impl<'a> $tr<&'a Integer> for Integer {
            type Output = Integer;

            #[inline]
            fn $f(self, rhs: &'a Integer) -> Integer {
                (&self).$f(rhs)
            }
        }

        impl<'a> $tr<Integer> for &'a Integer {
            type Output = Integer;

            #[inline]
            fn $f(self, rhs: Integer) -> Integer {
                self.$f(&rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);
forward_binop!(Rem, rem);

impl<'a> AddAssign<&'a Integer> for Integer {
    #[inline]
    fn add_assign(&mut self, rhs: &'a Integer) {
        *self = &*self + rhs;
    }
}

impl AddAssign<Integer> for Integer {
    #[inline]
    fn add_assign(&mut self, rhs: Integer) {
        *self = &*self + &rhs;
    }
}

impl<'a> SubAssign<&'a Integer> for Integer {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a Integer) {
        *self = &*self - rhs;
    }
}

impl SubAssign<Integer> for Integer {
    #[inline]
    fn sub_assign(&mut self, rhs: Integer) {
        *self = &*self - &rhs;
    }
}

impl<'a> MulAssign<&'a Integer> for Integer {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a Integer) {
        *self = &*self * rhs;
    }
}

impl MulAssign<Integer> for Integer {
    #[inline]
    fn mul_assign(&mut self, rhs: Integer) {
        *self = &*self * &rhs;
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        match self {
            Integer::Natural(n) => match n.checked_neg() {
                Some(n) => Integer::Natural(n),
                None => Integer::Large(-BigInt::from(*n)),
            },
            Integer::Large(r) => Integer::from(-r),
        }
    }
}

impl Neg for Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        -&self
    }
}

impl std::iter::Sum for Integer {
    fn sum<I: Iterator<Item = Integer>>(iter: I) -> Self {
        iter.fold(Integer::zero(), |a, b| a + b)
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Integer::zero()
    }

    fn is_zero(&self) -> bool {
        Integer::is_zero(self)
    }
}

impl One for Integer {
    fn one() -> Self {
        Integer::one()
    }
}

#[cfg(test)]
mod test {
    use super::Integer;

    #[test]
    fn binary_ops() {
        let a = Integer::new(i64::MAX);
        let b = &a + &Integer::one();
        assert!(matches!(b, Integer::Large(_)));
        assert_eq!(&b - &Integer::one(), a);
        assert_eq!(&(&b * &b) / &b, b);
        assert_eq!(-(-&a), a);
        assert_eq!(Integer::new(i64::MIN).abs(), b);
        assert_eq!(Integer::new(2).pow(70) / Integer::new(2).pow(6), Integer::new(2).pow(64));
        assert_eq!(Integer::new(-3).pow(3), Integer::new(-27));
    }

    #[test]
    fn euclidean_division() {
        let (seven, two) = (Integer::new(7), Integer::new(2));
        assert_eq!((-&seven).quot_rem(&two), (Integer::new(-4), Integer::new(1)));
        assert_eq!((-&seven).quot_rem(&-&two), (Integer::new(4), Integer::new(1)));
        assert_eq!(seven.quot_rem(&-&two), (Integer::new(-3), Integer::new(1)));

        let big = Integer::new(-3) * Integer::new(10).pow(30) - Integer::new(1);
        let (q, r) = big.quot_rem(&Integer::new(10).pow(30));
        assert_eq!(q, Integer::new(-4));
        assert_eq!(r, Integer::new(10).pow(30) - Integer::new(1));
    }

    #[test]
    fn modular() {
        let p = Integer::new(7);
        assert_eq!(Integer::new(4).symmetric_mod(&p), Integer::new(-3));
        assert_eq!(Integer::new(3).symmetric_mod(&p), Integer::new(3));
        assert_eq!(Integer::new(-10).symmetric_mod(&p), Integer::new(-3));
        assert_eq!(Integer::new(1).symmetric_mod(&Integer::new(2)), Integer::new(1));
        assert_eq!(Integer::new(3).mod_inverse(&p), Integer::new(5));
        assert_eq!(Integer::new(-3).mod_inverse(&p), Integer::new(2));
    }

    #[test]
    #[should_panic]
    fn not_invertible() {
        Integer::new(6).mod_inverse(&Integer::new(9));
    }

    #[test]
    fn number_theory() {
        assert_eq!(Integer::new(-12).gcd(&Integer::new(18)), Integer::new(6));
        assert_eq!(Integer::new(4).lcm(&Integer::new(-6)), Integer::new(12));
        assert_eq!(Integer::binom(10, 3), Integer::new(120));
        assert_eq!(Integer::new(16).isqrt_ceil(), Integer::new(4));
        assert_eq!(Integer::new(17).isqrt_ceil(), Integer::new(5));
        assert_eq!(Integer::new(0).bits(), 0);
        assert_eq!(Integer::new(-8).bits(), 4);
        assert_eq!(
            "123456789012345678901234567890".parse::<Integer>().unwrap() % Integer::new(1000),
            Integer::new(890)
        );
    }
}
