use ahash::{HashMap, HashMapExt};
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::fmt::Display;
use std::mem;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use crate::domains::integer::{Integer, IntegerRing};
use crate::domains::rational::RationalField;
use crate::domains::{EuclideanDomain, Field, Ring};
use crate::printer::{PolynomialPrinter, PrintOptions};

use super::{Exponent, Variable, INLINED_EXPONENTS};

/// Multivariate polynomial with a sparse degree and variable dense representation.
#[derive(Clone)]
pub struct MultivariatePolynomial<F: Ring, E: Exponent = u16> {
    // Data format: the i-th monomial is stored as coefficients[i] and
    // exponents[i * nvars .. (i + 1) * nvars]. Terms are always expanded and sorted
    // lexicographically by the exponents, so that the last term is the leading one.
    pub coefficients: Vec<F::Element>,
    pub exponents: Vec<E>,
    pub field: F,
    pub variables: Arc<Vec<Variable>>,
}

impl<F: Ring, E: Exponent> MultivariatePolynomial<F, E> {
    /// Constructs a zero polynomial. Instead of using this constructor,
    /// prefer to create new polynomials from existing ones, so that the
    /// variable map and field are inherited.
    #[inline]
    pub fn new(field: &F, cap: Option<usize>, variables: Arc<Vec<Variable>>) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0)),
            exponents: Vec::with_capacity(cap.unwrap_or(0) * variables.len()),
            field: field.clone(),
            variables,
        }
    }

    /// Constructs a zero polynomial, inheriting the field and variable map from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            exponents: vec![],
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Constructs a zero polynomial with the given capacity,
    /// inheriting the field and variable map from `self`.
    #[inline]
    pub fn zero_with_capacity(&self, cap: usize) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap),
            exponents: Vec::with_capacity(cap * self.nvars()),
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Constructs a constant polynomial,
    /// inheriting the field and variable map from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            exponents: vec![E::zero(); self.nvars()],
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Constructs a polynomial that is one, inheriting the field and variable map from `self`.
    #[inline]
    pub fn one(&self) -> Self {
        self.constant(self.field.one())
    }

    /// Constructs a polynomial with a single term.
    #[inline]
    pub fn monomial(&self, coeff: F::Element, exponents: Vec<E>) -> Self {
        debug_assert!(self.nvars() == exponents.len());

        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            exponents,
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Constructs the polynomial `x_var`.
    pub fn variable(&self, var: usize) -> Self {
        let mut e = vec![E::zero(); self.nvars()];
        e[var] = E::one();
        self.monomial(self.field.one(), e)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.nterms() == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.nterms() == 1
            && self.field.is_one(&self.coefficients[0])
            && self.exponents.iter().all(|x| x.is_zero())
    }

    /// Returns the number of terms in the polynomial.
    #[inline]
    pub fn nterms(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the number of variables in the polynomial.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        if self.nterms() >= 2 {
            return false;
        }
        self.exponents.iter().all(|e| e.is_zero())
    }

    /// Get the constant term of the polynomial.
    #[inline]
    pub fn get_constant(&self) -> F::Element {
        if self.is_zero() || !self.exponents(0).iter().all(|e| e.is_zero()) {
            return self.field.zero();
        }

        self.coefficients[0].clone()
    }

    /// Returns the slice for the exponents of the specified monomial.
    #[inline]
    pub fn exponents(&self, index: usize) -> &[E] {
        &self.exponents[index * self.nvars()..(index + 1) * self.nvars()]
    }

    #[inline]
    pub fn last_exponents(&self) -> &[E] {
        assert!(self.nterms() > 0);
        &self.exponents[(self.nterms() - 1) * self.nvars()..self.nterms() * self.nvars()]
    }

    /// Returns an iterator over the exponents of every monomial.
    #[inline]
    pub fn exponents_iter(&self) -> std::slice::Chunks<'_, E> {
        self.exponents.chunks(self.nvars().max(1))
    }

    /// Panic when `self` and `other` do not share the same variable map.
    #[inline]
    pub(crate) fn check_variables(&self, other: &Self) {
        if !Arc::ptr_eq(&self.variables, &other.variables) && self.variables != other.variables {
            panic!(
                "Mismatched variable maps: {:?} and {:?}",
                self.variables, other.variables
            );
        }
    }

    /// Check if the polynomial is sorted and has only non-zero coefficients
    pub fn check_consistency(&self) {
        assert_eq!(self.exponents.len(), self.nterms() * self.nvars());

        for c in &self.coefficients {
            if F::is_zero(c) {
                panic!("Inconsistent polynomial (0 coefficient): {}", self);
            }
        }

        for t in 1..self.nterms() {
            match self.exponents(t).cmp(self.exponents(t - 1)) {
                Ordering::Equal => panic!("Inconsistent polynomial (equal monomials): {}", self),
                Ordering::Less => panic!(
                    "Inconsistent polynomial (wrong monomial ordering): {}",
                    self
                ),
                Ordering::Greater => {}
            }
        }
    }

    /// Appends a monomial to the polynomial.
    pub fn append_monomial(&mut self, coefficient: F::Element, exponents: &[E]) {
        if F::is_zero(&coefficient) {
            return;
        }
        if self.nvars() != exponents.len() {
            panic!(
                "nvars mismatched: got {}, expected {}",
                exponents.len(),
                self.nvars()
            );
        }

        // should we append to the back?
        if self.nterms() == 0 || self.last_exponents() < exponents {
            self.coefficients.push(coefficient);
            self.exponents.extend_from_slice(exponents);
            return;
        }

        if self.exponents(0) > exponents {
            self.coefficients.insert(0, coefficient);
            self.exponents.splice(0..0, exponents.iter().cloned());
            return;
        }

        // Binary search to find the insert-point.
        let mut l = 0;
        let mut r = self.nterms();

        while l <= r {
            let m = (l + r) / 2;
            let c = exponents.cmp(self.exponents(m)); // note the reversal

            match c {
                Ordering::Equal => {
                    // Add the two coefficients.
                    self.field
                        .add_assign(&mut self.coefficients[m], &coefficient);
                    if F::is_zero(&self.coefficients[m]) {
                        // The coefficient becomes zero. Remove this monomial.
                        self.coefficients.remove(m);
                        let i = m * self.nvars();
                        self.exponents.splice(i..i + self.nvars(), Vec::new());
                    }
                    return;
                }
                Ordering::Greater => {
                    l = m + 1;

                    if l == self.nterms() {
                        self.coefficients.push(coefficient);
                        self.exponents.extend_from_slice(exponents);
                        return;
                    }
                }
                Ordering::Less => {
                    if m == 0 {
                        self.coefficients.insert(0, coefficient);
                        self.exponents.splice(0..0, exponents.iter().cloned());
                        return;
                    }

                    r = m - 1;
                }
            }
        }

        self.coefficients.insert(l, coefficient);
        let i = l * self.nvars();
        self.exponents.splice(i..i, exponents.iter().cloned());
    }

    /// Take the derivative of the polynomial w.r.t the variable `var`.
    pub fn derivative(&self, var: usize) -> Self {
        debug_assert!(var < self.nvars());

        let mut res = self.zero_with_capacity(self.nterms());

        let mut exp = vec![E::zero(); self.nvars()];
        for x in self {
            if x.exponents[var] > E::zero() {
                exp.copy_from_slice(x.exponents);
                let pow = exp[var].to_u32() as u64;
                exp[var] = exp[var] - E::one();
                res.append_monomial(self.field.mul(x.coefficient, &self.field.nth(pow)), &exp);
            }
        }

        res
    }

    /// Multiply every coefficient with `other`.
    pub fn mul_coeff(mut self, other: F::Element) -> Self {
        for c in &mut self.coefficients {
            self.field.mul_assign(c, &other);
        }

        for i in (0..self.nterms()).rev() {
            if F::is_zero(&self.coefficients[i]) {
                self.coefficients.remove(i);
                self.exponents
                    .drain(i * self.nvars()..(i + 1) * self.nvars());
            }
        }

        self
    }

    /// Map a coefficient using the function `f`.
    pub fn map_coeff<U: Ring, T: Fn(&F::Element) -> U::Element>(
        &self,
        f: T,
        field: U,
    ) -> MultivariatePolynomial<U, E> {
        let mut coefficients = Vec::with_capacity(self.coefficients.len());
        let mut exponents = Vec::with_capacity(self.exponents.len());

        for m in self.into_iter() {
            let nc = f(m.coefficient);
            if !U::is_zero(&nc) {
                coefficients.push(nc);
                exponents.extend(m.exponents);
            }
        }

        MultivariatePolynomial {
            coefficients,
            exponents,
            field,
            variables: self.variables.clone(),
        }
    }

    /// Add `exponents` to every exponent.
    pub fn mul_exp(mut self, exponents: &[E]) -> Self {
        debug_assert_eq!(self.nvars(), exponents.len());

        if self.nvars() == 0 {
            return self;
        }

        let nvars = self.nvars();
        for e in self.exponents.chunks_mut(nvars) {
            for (e1, e2) in e.iter_mut().zip(exponents) {
                *e1 = e1.checked_add(e2).expect("overflow in adding exponents");
            }
        }

        self
    }

    #[inline]
    fn mul_monomial(self, coefficient: &F::Element, exponents: &[E]) -> Self {
        self.mul_coeff(coefficient.clone()).mul_exp(exponents)
    }

    /// Get the degree of the variable `x`.
    /// This operation is O(n).
    pub fn degree(&self, x: usize) -> E {
        if self.nvars() == 0 {
            return E::zero();
        }

        let mut max = E::zero();
        for e in self.exponents.iter().skip(x).step_by(self.nvars()) {
            if max < *e {
                max = *e;
            }
        }
        max
    }

    /// Get the sum of the degrees of the variables in `vars`.
    pub fn degree_sum(&self, vars: &[usize]) -> u32 {
        vars.iter().map(|v| self.degree(*v).to_u32()).sum()
    }

    /// Get the indices of the variables that occur in the polynomial.
    pub fn occurring_variables(&self) -> Vec<usize> {
        (0..self.nvars())
            .filter(|v| self.degree(*v) > E::zero())
            .collect()
    }

    /// Returns `true` if no variable other than `x` occurs.
    pub fn is_univariate_in(&self, x: usize) -> bool {
        self.exponents_iter()
            .all(|e| e.iter().enumerate().all(|(i, ee)| i == x || ee.is_zero()))
    }

    /// Get the leading coefficient.
    pub fn lcoeff(&self) -> F::Element {
        if self.is_zero() {
            return self.field.zero();
        }
        self.coefficients[self.nterms() - 1].clone()
    }

    /// Get the leading coefficient under a given variable ordering.
    /// All variables that occur in the polynomial must be part of `vars`.
    /// This operation is O(n) if the variables are out of order.
    pub fn lcoeff_varorder(&self, vars: &[usize]) -> F::Element {
        if self.is_zero() {
            return self.field.zero();
        }

        if vars.len() == self.nvars() && vars.iter().enumerate().all(|(i, v)| i == *v) {
            return self.lcoeff();
        }

        let mut highest = vec![E::zero(); self.nvars()];
        let mut highestc = &self.coefficients[0];

        'nextmon: for m in self.into_iter() {
            let mut more = false;
            for &v in vars {
                if more {
                    highest[v] = m.exponents[v];
                } else {
                    match m.exponents[v].cmp(&highest[v]) {
                        Ordering::Less => {
                            continue 'nextmon;
                        }
                        Ordering::Greater => {
                            highest[v] = m.exponents[v];
                            more = true;
                        }
                        Ordering::Equal => {}
                    }
                }
            }
            highestc = m.coefficient;
        }
        debug_assert!(!F::is_zero(highestc));
        highestc.clone()
    }

    /// Get the leading coefficient of a multivariate polynomial viewed as a
    /// univariate polynomial in `x`.
    pub fn univariate_lcoeff(&self, x: usize) -> Self {
        if self.is_zero() {
            return self.zero();
        }

        self.coefficient(x, self.degree(x).to_u32())
    }

    /// Get the coefficient of `x^k` as a polynomial in the other variables.
    pub fn coefficient(&self, x: usize, k: u32) -> Self {
        let mut res = self.zero();
        let mut e: SmallVec<[E; INLINED_EXPONENTS]> = smallvec![E::zero(); self.nvars()];
        for t in self {
            if t.exponents[x].to_u32() == k {
                e.copy_from_slice(t.exponents);
                e[x] = E::zero();
                res.append_monomial(t.coefficient.clone(), &e);
            }
        }

        res
    }

    /// Create a univariate polynomial coefficient list out of a multivariate polynomial.
    /// The output is sorted in the degree.
    pub fn to_univariate_polynomial_list(&self, x: usize) -> Vec<(Self, E)> {
        if self.coefficients.is_empty() {
            return vec![];
        }

        let maxdeg = self.degree(x);

        // construct the coefficient per power of x
        let mut result = vec![];
        for d in 0..maxdeg.to_u32() + 1 {
            let a = self.coefficient(x, d);
            if !a.is_zero() {
                result.push((a, E::from_u32(d)));
            }
        }

        result
    }

    /// Replace a variable `n` in the polynomial by an element from
    /// the ring `v`.
    pub fn replace(&self, n: usize, v: &F::Element) -> Self {
        let mut res = self.zero_with_capacity(self.nterms());
        let mut e: SmallVec<[E; INLINED_EXPONENTS]> = smallvec![E::zero(); self.nvars()];

        let mut powers: Vec<F::Element> = vec![self.field.one()];
        for t in self {
            if t.exponents[n] == E::zero() {
                res.append_monomial(t.coefficient.clone(), t.exponents);
                continue;
            }

            let p = t.exponents[n].to_u32() as usize;
            while powers.len() <= p {
                let next = self.field.mul(&powers[powers.len() - 1], v);
                powers.push(next);
            }

            let c = self.field.mul(t.coefficient, &powers[p]);

            e.copy_from_slice(t.exponents);
            e[n] = E::zero();
            res.append_monomial(c, &e);
        }

        res
    }

    /// Replace every variable `n` by `v` for every pair `(n, v)` in `r`.
    pub fn replace_multiple(&self, r: &[(usize, F::Element)]) -> Self {
        let mut res = self.clone();
        for (n, v) in r {
            res = res.replace(*n, v);
        }
        res
    }

    /// Compute `self^pow`.
    pub fn pow(&self, mut pow: usize) -> Self {
        if pow == 0 {
            return self.one();
        }

        if self.is_constant() {
            return self.constant(self.field.pow(&self.lcoeff(), pow as u64));
        }

        let mut x = self.clone();
        let mut y = self.one();
        while pow != 1 {
            if pow % 2 == 1 {
                y = &y * &x;
                pow -= 1;
            }

            x = &x * &x;
            pow /= 2;
        }

        x * &y
    }

    /// Shift a variable `var` to `var+shift`.
    pub fn shift_var(&self, var: usize, shift: &F::Element) -> Self {
        if self.is_zero() || F::is_zero(shift) {
            return self.clone();
        }

        let d = self.degree(var).to_u32() as usize;

        let y_poly = self.to_univariate_polynomial_list(var);

        let mut v = vec![self.zero(); d + 1];
        for (x_poly, p) in y_poly {
            v[p.to_u32() as usize] = x_poly;
        }

        for k in 0..d {
            for j in (k..d).rev() {
                v[j] = &v[j] + &v[j + 1].clone().mul_coeff(shift.clone());
            }
        }

        let mut poly = self.zero();
        for (i, mut v) in v.into_iter().enumerate() {
            let nvars = self.nvars();
            for x in v.exponents.chunks_mut(nvars) {
                x[var] = E::from_u32(i as u32);
            }

            for m in &v {
                poly.append_monomial(m.coefficient.clone(), m.exponents);
            }
        }

        poly
    }

    /// Get the dense coefficient list of a polynomial that is univariate in `var`.
    pub(crate) fn to_dense_univariate(&self, var: usize) -> Vec<F::Element> {
        debug_assert!(self.is_univariate_in(var));

        if self.is_zero() {
            return vec![];
        }

        let mut res = vec![self.field.zero(); self.degree(var).to_u32() as usize + 1];
        for t in self {
            res[t.exponents[var].to_u32() as usize] = t.coefficient.clone();
        }
        res
    }

    /// Create a polynomial in `var` from a dense coefficient list.
    pub(crate) fn from_dense_univariate(&self, var: usize, coeffs: Vec<F::Element>) -> Self {
        let mut res = self.zero_with_capacity(coeffs.len());
        let mut e = vec![E::zero(); self.nvars()];
        for (i, c) in coeffs.into_iter().enumerate() {
            if !F::is_zero(&c) {
                e[var] = E::from_u32(i as u32);
                res.coefficients.push(c);
                res.exponents.extend_from_slice(&e);
            }
        }
        res
    }
}

impl<F: Ring, E: Exponent> std::fmt::Debug for MultivariatePolynomial<F, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for monomial in self {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{{ {:?}, {:?} }}",
                monomial.coefficient, monomial.exponents
            )?;
        }
        write!(f, " ]")
    }
}

impl<F: Ring, E: Exponent> Display for MultivariatePolynomial<F, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if f.alternate() {
            let opts = PrintOptions {
                terms_descending: false,
                explicit_multiplication: false,
            };
            PolynomialPrinter::new_with_options(self, opts).fmt(f)
        } else {
            PolynomialPrinter::new(self).fmt(f)
        }
    }
}

impl<F: Ring, E: Exponent> PartialEq for MultivariatePolynomial<F, E> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.nvars() != other.nvars() {
            if self.is_constant() && other.is_constant() {
                return self.get_constant() == other.get_constant();
            }

            return false;
        }

        self.exponents.eq(&other.exponents) && self.coefficients.eq(&other.coefficients)
    }
}

impl<F: Ring, E: Exponent> std::hash::Hash for MultivariatePolynomial<F, E> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.coefficients.hash(state);
        self.exponents.hash(state);
        self.variables.hash(state);
    }
}

impl<F: Ring, E: Exponent> Eq for MultivariatePolynomial<F, E> {}

impl<F: Ring, E: Exponent> Add for MultivariatePolynomial<F, E> {
    type Output = Self;

    fn add(mut self, mut other: Self) -> Self::Output {
        debug_assert_eq!(self.field, other.field);
        self.check_variables(&other);

        if self.is_zero() {
            return other;
        }
        if other.is_zero() {
            return self;
        }

        // Merge the two polynomials, which are assumed to be already sorted.

        let mut new_coefficients = vec![self.field.zero(); self.nterms() + other.nterms()];
        let mut new_exponents: Vec<E> =
            vec![E::zero(); self.nvars() * (self.nterms() + other.nterms())];
        let mut new_nterms = 0;
        let mut i = 0;
        let mut j = 0;

        macro_rules! insert_monomial {
            ($source:expr, $index:expr) => {
                mem::swap(
                    &mut new_coefficients[new_nterms],
                    &mut $source.coefficients[$index],
                );

                new_exponents[new_nterms * $source.nvars()..(new_nterms + 1) * $source.nvars()]
                    .clone_from_slice($source.exponents($index));
                new_nterms += 1;
            };
        }

        while i < self.nterms() && j < other.nterms() {
            let c = self.exponents(i).cmp(other.exponents(j));
            match c {
                Ordering::Less => {
                    insert_monomial!(self, i);
                    i += 1;
                }
                Ordering::Greater => {
                    insert_monomial!(other, j);
                    j += 1;
                }
                Ordering::Equal => {
                    self.field
                        .add_assign(&mut self.coefficients[i], &other.coefficients[j]);
                    if !F::is_zero(&self.coefficients[i]) {
                        insert_monomial!(self, i);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        while i < self.nterms() {
            insert_monomial!(self, i);
            i += 1;
        }

        while j < other.nterms() {
            insert_monomial!(other, j);
            j += 1;
        }

        new_coefficients.truncate(new_nterms);
        new_exponents.truncate(self.nvars() * new_nterms);

        Self {
            coefficients: new_coefficients,
            exponents: new_exponents,
            field: self.field,
            variables: self.variables,
        }
    }
}

impl<'a, 'b, F: Ring, E: Exponent> Add<&'a MultivariatePolynomial<F, E>>
    for &'b MultivariatePolynomial<F, E>
{
    type Output = MultivariatePolynomial<F, E>;

    fn add(self, other: &'a MultivariatePolynomial<F, E>) -> Self::Output {
        self.clone() + other.clone()
    }
}

impl<F: Ring, E: Exponent> Sub for MultivariatePolynomial<F, E> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.add(other.neg())
    }
}

impl<'a, 'b, F: Ring, E: Exponent> Sub<&'a MultivariatePolynomial<F, E>>
    for &'b MultivariatePolynomial<F, E>
{
    type Output = MultivariatePolynomial<F, E>;

    fn sub(self, other: &'a MultivariatePolynomial<F, E>) -> Self::Output {
        self.clone() + other.clone().neg()
    }
}

impl<F: Ring, E: Exponent> Neg for MultivariatePolynomial<F, E> {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        // Negate coefficients of all terms.
        for c in &mut self.coefficients {
            *c = self.field.neg(c);
        }
        self
    }
}

impl<'a, F: Ring, E: Exponent> Neg for &'a MultivariatePolynomial<F, E> {
    type Output = MultivariatePolynomial<F, E>;
    fn neg(self) -> Self::Output {
        self.clone().neg()
    }
}

impl<'a, 'b, F: Ring, E: Exponent> Mul<&'a MultivariatePolynomial<F, E>>
    for &'b MultivariatePolynomial<F, E>
{
    type Output = MultivariatePolynomial<F, E>;

    #[inline]
    fn mul(self, rhs: &'a MultivariatePolynomial<F, E>) -> Self::Output {
        self.check_variables(rhs);

        if self.nterms() == 0 || rhs.nterms() == 0 {
            return self.zero();
        }

        if self.nterms() == 1 {
            return rhs
                .clone()
                .mul_monomial(&self.coefficients[0], &self.exponents);
        }

        if rhs.nterms() == 1 {
            return self
                .clone()
                .mul_monomial(&rhs.coefficients[0], &rhs.exponents);
        }

        self.hash_mul(rhs)
    }
}

impl<'a, F: Ring, E: Exponent> Mul<&'a MultivariatePolynomial<F, E>>
    for MultivariatePolynomial<F, E>
{
    type Output = MultivariatePolynomial<F, E>;

    #[inline]
    fn mul(self, rhs: &'a MultivariatePolynomial<F, E>) -> Self::Output {
        (&self) * rhs
    }
}

impl<F: Ring, E: Exponent> MultivariatePolynomial<F, E> {
    /// Multiply two polynomials by accumulating all products of terms
    /// in a hash map keyed by the exponent, and sorting the result.
    fn hash_mul(&self, rhs: &Self) -> Self {
        let mut acc: HashMap<SmallVec<[E; INLINED_EXPONENTS]>, F::Element> =
            HashMap::with_capacity(self.nterms() * rhs.nterms());

        let mut e: SmallVec<[E; INLINED_EXPONENTS]> = smallvec![E::zero(); self.nvars()];
        for t1 in self {
            for t2 in rhs {
                for ((m, e1), e2) in e.iter_mut().zip(t1.exponents).zip(t2.exponents) {
                    *m = *e1 + *e2;
                }

                if let Some(c) = acc.get_mut(&e) {
                    self.field.add_mul_assign(c, t1.coefficient, t2.coefficient);
                } else {
                    acc.insert(e.clone(), self.field.mul(t1.coefficient, t2.coefficient));
                }
            }
        }

        let mut terms: Vec<_> = acc.into_iter().filter(|(_, c)| !F::is_zero(c)).collect();
        terms.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut res = self.zero_with_capacity(terms.len());
        for (e, c) in terms {
            res.coefficients.push(c);
            res.exponents.extend_from_slice(&e);
        }
        res
    }
}

impl<'a, 'b, F: EuclideanDomain, E: Exponent> Div<&'a MultivariatePolynomial<F, E>>
    for &'b MultivariatePolynomial<F, E>
{
    type Output = MultivariatePolynomial<F, E>;

    fn div(self, other: &'a MultivariatePolynomial<F, E>) -> Self::Output {
        self.divides(other)
            .unwrap_or_else(|| panic!("No clean division of {} by {}", self, other))
    }
}

impl<'a, F: EuclideanDomain, E: Exponent> Div<&'a MultivariatePolynomial<F, E>>
    for MultivariatePolynomial<F, E>
{
    type Output = MultivariatePolynomial<F, E>;

    fn div(self, other: &'a MultivariatePolynomial<F, E>) -> Self::Output {
        (&self).div(other)
    }
}

impl<F: EuclideanDomain, E: Exponent> MultivariatePolynomial<F, E> {
    /// Get the content from the coefficients.
    pub fn content(&self) -> F::Element {
        if self.coefficients.is_empty() {
            return self.field.zero();
        }
        let mut c = self.coefficients[0].clone();
        for cc in self.coefficients.iter().skip(1) {
            // early return if possible (not possible for rationals)
            if F::one_is_gcd_unit() && self.field.is_one(&c) {
                break;
            }

            c = self.field.gcd(&c, cc);
        }
        c
    }

    /// Divide every coefficient with `other`.
    pub fn div_coeff(mut self, other: &F::Element) -> Self {
        for c in &mut self.coefficients {
            let (quot, rem) = self.field.quot_rem(c, other);
            debug_assert!(F::is_zero(&rem));
            *c = quot;
        }
        self
    }

    /// Make the polynomial primitive by removing the content.
    pub fn make_primitive(self) -> Self {
        if self.is_zero() {
            return self;
        }

        let c = self.content();
        self.div_coeff(&c)
    }

    /// Return the quotient if `div` divides `self` exactly.
    pub fn divides(&self, div: &Self) -> Option<Self> {
        if div.is_zero() {
            panic!("Cannot divide by 0 polynomial");
        }

        if self.is_zero() {
            return Some(self.clone());
        }

        if (0..self.nvars()).any(|v| self.degree(v) < div.degree(v)) {
            return None;
        }

        let (a, b) = self.quot_rem(div, true);
        if b.is_zero() {
            Some(a)
        } else {
            None
        }
    }

    /// Divide two multivariate polynomials and return the quotient and remainder,
    /// by repeatedly cancelling the leading term. Leading terms of the remainder that
    /// are not divisible by the leading term of `div` are moved to the remainder.
    ///
    /// If `abort_on_remainder` is set, the division stops at the first such term
    /// and returns `(0, self)`.
    pub fn quot_rem(&self, div: &Self, abort_on_remainder: bool) -> (Self, Self) {
        if div.is_zero() {
            panic!("Cannot divide by 0 polynomial");
        }

        if self.is_zero() {
            return (self.clone(), self.clone());
        }

        if div.is_one() {
            return (self.clone(), self.zero());
        }

        let lc = div.lcoeff();
        let le = div.last_exponents().to_vec();

        let mut q = self.zero();
        let mut r = self.zero();
        let mut p = self.clone();
        let mut e = vec![E::zero(); self.nvars()];

        while !p.is_zero() {
            let pe = p.last_exponents();
            let quot = if pe.iter().zip(&le).all(|(a, b)| a >= b) {
                self.field.try_div(&p.lcoeff(), &lc)
            } else {
                None
            };

            if let Some(c) = quot {
                for ((m, a), b) in e.iter_mut().zip(pe).zip(&le) {
                    *m = *a - *b;
                }

                let t = div.clone().mul_monomial(&c, &e);
                q.append_monomial(c, &e);
                p = p - t;
            } else {
                if abort_on_remainder {
                    return (self.zero(), self.clone());
                }

                let exp = pe.to_vec();
                let n = p.nterms();
                let c = p.coefficients.remove(n - 1);
                p.exponents.truncate((n - 1) * p.nvars());
                r.append_monomial(c, &exp);
            }
        }

        (q, r)
    }
}

impl<F: Field, E: Exponent> MultivariatePolynomial<F, E> {
    /// Make the polynomial monic, i.e., make the leading coefficient `1` by
    /// multiplying all monomials with `1/lcoeff`.
    pub fn make_monic(self) -> Self {
        if self.is_zero() {
            return self;
        }

        if self.lcoeff() != self.field.one() {
            let ci = self.field.inv(&self.lcoeff());
            self.mul_coeff(ci)
        } else {
            self
        }
    }

    /// Division with remainder for univariate polynomials over a field.
    /// The leading coefficient of `div` must be invertible.
    pub fn quot_rem_univariate(&self, div: &Self) -> (Self, Self) {
        if div.is_zero() {
            panic!("Cannot divide by 0 polynomial");
        }

        if self.is_zero() {
            return (self.clone(), self.clone());
        }

        if div.is_constant() {
            let inv = self.field.inv(&div.lcoeff());
            return (self.clone().mul_coeff(inv), self.zero());
        }

        let var = div
            .last_exponents()
            .iter()
            .position(|e| !e.is_zero())
            .unwrap_or(0);

        let n = div.degree(var).to_u32() as usize;
        let m = self.degree(var).to_u32() as usize;
        if m < n {
            return (self.zero(), self.clone());
        }

        let mut r = self.to_dense_univariate(var);
        let d = div.to_dense_univariate(var);
        let inv = self.field.inv(&d[n]);

        let mut q = vec![self.field.zero(); m - n + 1];
        for k in (0..=m - n).rev() {
            if F::is_zero(&r[k + n]) {
                continue;
            }

            let c = self.field.mul(&r[k + n], &inv);
            for (j, dj) in d.iter().enumerate() {
                self.field.sub_mul_assign(&mut r[k + j], &c, dj);
            }
            q[k] = c;
        }

        r.truncate(n);

        (
            self.from_dense_univariate(var, q),
            self.from_dense_univariate(var, r),
        )
    }

    /// Compute `self^n % m` where `m` is a polynomial.
    pub fn exp_mod_univariate(&self, mut n: Integer, m: &Self) -> Self {
        if n.is_zero() {
            return self.one();
        }

        // use binary exponentiation and mod at every stage
        let mut x = self.quot_rem_univariate(m).1;
        let mut y = self.one();
        let two = Integer::Natural(2);
        while !n.is_one() {
            if (&n % &two).is_one() {
                y = (&y * &x).quot_rem_univariate(m).1;
                n -= &Integer::one();
            }

            x = (&x * &x).quot_rem_univariate(m).1;
            n = &n / &two;
        }

        (x * &y).quot_rem_univariate(m).1
    }

    /// Compute `(g, s, t)` where `self * s + other * t = g`
    /// by means of the extended Euclidean algorithm.
    /// The gcd `g` is monic.
    pub fn eea_univariate(&self, other: &Self) -> (Self, Self, Self) {
        if other.is_zero() {
            let inv = self.field.inv(&self.lcoeff());
            return (self.clone().make_monic(), self.constant(inv), self.zero());
        }

        let mut r0 = self.clone().make_monic();
        let mut r1 = other.clone().make_monic();
        let mut s0 = self.constant(self.field.inv(&self.lcoeff()));
        let mut s1 = self.zero();
        let mut t0 = self.zero();
        let mut t1 = self.constant(self.field.inv(&other.lcoeff()));

        while !r1.is_zero() {
            let (q, r) = r0.quot_rem_univariate(&r1);
            if r.is_zero() {
                return (r1, s1, t1);
            }

            let a = self.field.inv(&r.lcoeff());
            (r1, r0) = (r.mul_coeff(a.clone()), r1);
            (s1, s0) = ((s0 - &q * &s1).mul_coeff(a.clone()), s1);
            (t1, t0) = ((t0 - q * &t1).mul_coeff(a), t1);
        }

        (r0, s0, t0)
    }
}

impl<E: Exponent> From<&MultivariatePolynomial<IntegerRing, E>>
    for MultivariatePolynomial<RationalField, E>
{
    fn from(val: &MultivariatePolynomial<IntegerRing, E>) -> Self {
        MultivariatePolynomial {
            coefficients: val.coefficients.iter().map(|x| x.clone().into()).collect(),
            exponents: val.exponents.clone(),
            field: RationalField,
            variables: val.variables.clone(),
        }
    }
}

/// View object for a term in a multivariate polynomial.
#[derive(Copy, Clone, Debug)]
pub struct MonomialView<'a, F: 'a + Ring, E: 'a + Exponent> {
    pub coefficient: &'a F::Element,
    pub exponents: &'a [E],
}

/// Iterator over terms in a multivariate polynomial.
pub struct MonomialViewIterator<'a, F: Ring, E: Exponent> {
    poly: &'a MultivariatePolynomial<F, E>,
    index: usize,
}

impl<'a, F: Ring, E: Exponent> Iterator for MonomialViewIterator<'a, F, E> {
    type Item = MonomialView<'a, F, E>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.poly.nterms() {
            None
        } else {
            let view = MonomialView {
                coefficient: &self.poly.coefficients[self.index],
                exponents: self.poly.exponents(self.index),
            };
            self.index += 1;
            Some(view)
        }
    }
}

impl<'a, F: Ring, E: Exponent> IntoIterator for &'a MultivariatePolynomial<F, E> {
    type Item = MonomialView<'a, F, E>;
    type IntoIter = MonomialViewIterator<'a, F, E>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            poly: self,
            index: 0,
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::domains::finite_field::FiniteField;
    use crate::domains::integer::{Integer, Z};
    use crate::domains::rational::{Rational, Q};
    use crate::poly::Variable;

    use super::MultivariatePolynomial;

    fn vars() -> Arc<Vec<Variable>> {
        Arc::new(vec![Variable::new("x"), Variable::new("y")])
    }

    fn poly(
        terms: &[(i64, [u16; 2])],
    ) -> MultivariatePolynomial<crate::domains::integer::IntegerRing> {
        let mut p = MultivariatePolynomial::new(&Z, None, vars());
        for (c, e) in terms {
            p.append_monomial(Integer::new(*c), e);
        }
        p
    }

    #[test]
    fn append_and_order() {
        let p = poly(&[(1, [0, 1]), (2, [1, 0]), (3, [0, 0]), (-2, [1, 0]), (5, [2, 3])]);
        p.check_consistency();
        assert_eq!(p.nterms(), 3);
        assert_eq!(p.lcoeff(), Integer::new(5));
        assert_eq!(p.degree(1), 3);
        assert_eq!(p.degree_sum(&[0, 1]), 5);
        assert_eq!(p.occurring_variables(), vec![0, 1]);
    }

    #[test]
    fn arithmetic() {
        // (x + y) * (x - y) = x^2 - y^2
        let a = poly(&[(1, [1, 0]), (1, [0, 1])]);
        let b = poly(&[(1, [1, 0]), (-1, [0, 1])]);
        let c = &a * &b;
        assert_eq!(c, poly(&[(1, [2, 0]), (-1, [0, 2])]));
        assert_eq!(&c / &a, b);
        assert!(c.divides(&poly(&[(1, [1, 0]), (2, [0, 1])])).is_none());
        assert_eq!(&(&a + &b) - &a, b);
        assert_eq!(a.pow(3), &(&a * &a) * &a);

        let (q, r) =
            poly(&[(1, [2, 0]), (1, [0, 0])]).quot_rem(&poly(&[(1, [1, 0]), (1, [0, 0])]), false);
        assert_eq!(q, poly(&[(1, [1, 0]), (-1, [0, 0])]));
        assert_eq!(r, poly(&[(2, [0, 0])]));
    }

    #[test]
    #[should_panic]
    fn inexact_division() {
        let a = poly(&[(2, [1, 0]), (1, [0, 0])]);
        let _ = &a / &poly(&[(2, [0, 0])]);
    }

    #[test]
    fn coefficients_and_substitution() {
        // 3x^2y + 2xy^2 + x + 4
        let p = poly(&[(3, [2, 1]), (2, [1, 2]), (1, [1, 0]), (4, [0, 0])]);
        assert_eq!(p.univariate_lcoeff(0), poly(&[(3, [0, 1])]));
        assert_eq!(p.coefficient(0, 1), poly(&[(2, [0, 2]), (1, [0, 0])]));
        assert_eq!(p.to_univariate_polynomial_list(0).len(), 3);
        assert_eq!(p.lcoeff_varorder(&[1, 0]), Integer::new(2));
        assert_eq!(p.replace(1, &Integer::new(2)), poly(&[(6, [2, 0]), (9, [1, 0]), (4, [0, 0])]));
        assert_eq!(p.derivative(0), poly(&[(6, [1, 1]), (2, [0, 2]), (1, [0, 0])]));

        // shifting x -> x + 1 and back is the identity
        let s = p.shift_var(0, &Integer::new(1));
        assert_eq!(s.replace(0, &Integer::new(0)), p.replace(0, &Integer::new(1)));
        assert_eq!(s.shift_var(0, &Integer::new(-1)), p);
    }

    #[test]
    fn univariate_field_operations() {
        let field = FiniteField::new(Integer::new(7));
        let v = Arc::new(vec![Variable::new("x")]);
        let mut a = MultivariatePolynomial::<_, u16>::new(&field, None, v.clone());
        // x^3 + 2x + 1
        a.append_monomial(Integer::new(1), &[3]);
        a.append_monomial(Integer::new(2), &[1]);
        a.append_monomial(Integer::new(1), &[0]);
        let mut b = a.zero();
        // 3x + 1
        b.append_monomial(Integer::new(3), &[1]);
        b.append_monomial(Integer::new(1), &[0]);

        let (q, r) = a.quot_rem_univariate(&b);
        assert_eq!(&(&q * &b) + &r, a);
        assert!(r.is_constant());

        let (g, s, t) = a.eea_univariate(&b);
        assert_eq!(&(&a * &s) + &(&b * &t), g);

        // x^7 = x mod (x^3 + 2x + 1) over Z_7 iff the Frobenius fixes x
        let x = a.variable(0);
        let x7 = x.exp_mod_univariate(Integer::new(7), &a);
        assert_eq!(x7, (&x.pow(7)).quot_rem_univariate(&a).1);

        let mut c = MultivariatePolynomial::<_, u16>::new(&Q, None, v);
        c.append_monomial(Rational::new(2, 3), &[1]);
        c.append_monomial(Rational::new(1, 1), &[0]);
        assert_eq!(c.make_monic().lcoeff(), Rational::one());
    }
}
