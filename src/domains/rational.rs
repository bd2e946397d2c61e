use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
    ops::{Add, Mul, Neg, Sub},
};

use super::{
    integer::{Integer, Z},
    EuclideanDomain, Field, Ring,
};

/// The field of rational numbers.
pub type Q = RationalField;
/// The field of rational numbers.
pub const Q: RationalField = RationalField::new();

/// The field of rational numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RationalField;

impl Default for RationalField {
    fn default() -> Self {
        Self::new()
    }
}

impl RationalField {
    pub const fn new() -> RationalField {
        RationalField
    }
}

impl Display for RationalField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q")
    }
}

/// A rational number in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Rational {
    numerator: Integer,
    denominator: Integer,
}

impl<T: Into<Integer>> From<T> for Rational {
    #[inline]
    fn from(value: T) -> Self {
        Rational {
            numerator: value.into(),
            denominator: Integer::one(),
        }
    }
}

impl Rational {
    /// Create a new rational number `num/den`, bringing it to lowest terms.
    pub fn new<T: Into<Integer>>(num: T, den: T) -> Rational {
        let (num, den) = (num.into(), den.into());
        if den.is_zero() {
            panic!("Division by zero in {}/{}", num, den);
        }

        let g = num.gcd(&den);
        let (mut num, mut den) = if g.is_one() {
            (num, den)
        } else {
            (&num / &g, &den / &g)
        };

        if den.is_negative() {
            num = -num;
            den = -den;
        }

        Rational {
            numerator: num,
            denominator: den,
        }
    }

    pub fn zero() -> Rational {
        Rational {
            numerator: Integer::zero(),
            denominator: Integer::one(),
        }
    }

    pub fn one() -> Rational {
        Rational {
            numerator: Integer::one(),
            denominator: Integer::one(),
        }
    }

    pub fn numerator(&self) -> Integer {
        self.numerator.clone()
    }

    pub fn denominator(&self) -> Integer {
        self.denominator.clone()
    }

    pub fn numerator_ref(&self) -> &Integer {
        &self.numerator
    }

    pub fn denominator_ref(&self) -> &Integer {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.numerator.is_one() && self.denominator.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    pub fn abs(&self) -> Rational {
        Rational {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
        }
    }

    pub fn inv(&self) -> Rational {
        Q.inv(self)
    }

    pub fn pow(&self, e: u64) -> Rational {
        Q.pow(self, e)
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.denominator.is_one() {
            self.numerator.fmt(f)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.denominator == other.denominator {
            return self.numerator.cmp(&other.numerator);
        }

        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl Ring for RationalField {
    type Element = Rational;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.denominator == b.denominator {
            let num = &a.numerator + &b.numerator;
            let g = num.gcd(&a.denominator);
            if !g.is_one() {
                return Rational {
                    numerator: &num / &g,
                    denominator: &a.denominator / &g,
                };
            } else {
                return Rational {
                    numerator: num,
                    denominator: a.denominator.clone(),
                };
            }
        }

        let denom_gcd = a.denominator.gcd(&b.denominator);

        let mut a_den_red = Cow::Borrowed(&a.denominator);
        let mut b_den_red = Cow::Borrowed(&b.denominator);

        if !denom_gcd.is_one() {
            a_den_red = Cow::Owned(&a.denominator / &denom_gcd);
            b_den_red = Cow::Owned(&b.denominator / &denom_gcd);
        }

        let mut num = &a.numerator * b_den_red.as_ref() + &b.numerator * a_den_red.as_ref();
        let mut den = b_den_red.as_ref() * &a.denominator;

        let g = num.gcd(&denom_gcd);
        if !g.is_one() {
            num = &num / &g;
            den = &den / &g;
        }

        Rational {
            numerator: num,
            denominator: den,
        }
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.neg(b))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.is_zero() || b.is_zero() {
            return self.zero();
        }

        let gcd1 = a.numerator.gcd(&b.denominator);
        let gcd2 = a.denominator.gcd(&b.numerator);

        Rational {
            numerator: (&a.numerator / &gcd1) * (&b.numerator / &gcd2),
            denominator: (&a.denominator / &gcd2) * (&b.denominator / &gcd1),
        }
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.add_assign(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        self.sub_assign(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        Rational {
            numerator: -&a.numerator,
            denominator: a.denominator.clone(),
        }
    }

    fn zero(&self) -> Self::Element {
        Rational::zero()
    }

    fn one(&self) -> Self::Element {
        Rational::one()
    }

    #[inline]
    fn nth(&self, n: u64) -> Self::Element {
        Rational::from(n)
    }

    fn element_from_integer(&self, n: &Integer) -> Self::Element {
        Rational::from(n.clone())
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        Rational {
            numerator: b.numerator.pow(e),
            denominator: b.denominator.pow(e),
        }
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.numerator.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn one_is_gcd_unit() -> bool {
        false
    }

    fn characteristic(&self) -> Integer {
        Integer::zero()
    }

    fn size(&self) -> Integer {
        Integer::zero()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if b.is_zero() {
            None
        } else {
            Some(self.div(a, b))
        }
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        Rational::from(Z.sample(rng, range))
    }
}

impl EuclideanDomain for RationalField {
    fn rem(&self, _: &Self::Element, _: &Self::Element) -> Self::Element {
        self.zero()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let gcd_num = a.numerator.gcd(&b.numerator);
        let lcm_den = a.denominator.lcm(&b.denominator);

        Rational {
            numerator: gcd_num,
            denominator: lcm_den,
        }
    }
}

impl Field for RationalField {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        if a.is_zero() {
            panic!("Division by zero");
        }

        if a.numerator.is_negative() {
            Rational {
                numerator: -&a.denominator,
                denominator: -&a.numerator,
            }
        } else {
            Rational {
                numerator: a.denominator.clone(),
                denominator: a.numerator.clone(),
            }
        }
    }
}

impl<'a, 'b> Add<&'a Rational> for &'b Rational {
    type Output = Rational;

    fn add(self, other: &'a Rational) -> Self::Output {
        Q.add(self, other)
    }
}

impl<'a, 'b> Sub<&'a Rational> for &'b Rational {
    type Output = Rational;

    fn sub(self, other: &'a Rational) -> Self::Output {
        Q.sub(self, other)
    }
}

impl<'a, 'b> Mul<&'a Rational> for &'b Rational {
    type Output = Rational;

    fn mul(self, other: &'a Rational) -> Self::Output {
        Q.mul(self, other)
    }
}

impl<'a> Neg for &'a Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Q.neg(self)
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{integer::Integer, EuclideanDomain, Field, Ring};

    use super::{Rational, Q};

    #[test]
    fn normalization() {
        let a = Rational::new(6, -4);
        assert_eq!(a.numerator_ref(), &Integer::new(-3));
        assert_eq!(a.denominator_ref(), &Integer::new(2));
        assert_eq!(a.to_string(), "-3/2");
        assert!(Rational::new(4, 2).is_integer());
    }

    #[test]
    fn arithmetic() {
        let a = Rational::new(1, 6);
        let b = Rational::new(1, 3);
        assert_eq!(&a + &b, Rational::new(1, 2));
        assert_eq!(&a - &b, Rational::new(-1, 6));
        assert_eq!(&a * &b, Rational::new(1, 18));
        assert_eq!(Q.div(&a, &b), Rational::new(1, 2));
        assert_eq!(Q.inv(&Rational::new(-2, 3)), Rational::new(-3, 2));
        assert_eq!(&Rational::new(1, 2) + &Rational::new(1, 2), Rational::one());
        assert_eq!(&Q.zero() * &b, Q.zero());
        assert_eq!(Q.pow(&Rational::new(-2, 3), 3), Rational::new(-8, 27));
        assert_eq!(Q.gcd(&Rational::new(2, 3), &Rational::new(4, 9)), Rational::new(2, 9));
        assert!(Rational::new(1, 3) < Rational::new(1, 2));
    }
}
