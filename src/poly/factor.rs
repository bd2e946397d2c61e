use rand::Rng;
use tracing::{debug, instrument};

use crate::combinatorics::CombinationIterator;
use crate::domains::finite_field::{FiniteField, PrimeIteratorU64};
use crate::domains::integer::{Integer, IntegerRing};
use crate::domains::rational::{Rational, RationalField};
use crate::domains::Field;
use crate::settings::FactorizationSettings;

use super::gcd::PolynomialGCD;
use super::norm::{lifting_exponent, log2_ceil};
use super::polynomial::MultivariatePolynomial;
use super::Exponent;

/// Factorization of polynomials into irreducible factors.
pub trait Factorize: Sized {
    /// The type of the content that is split off from the factors.
    type Content;

    /// Factor the polynomial into its content and irreducible factors with multiplicities,
    /// using the default [FactorizationSettings].
    fn factor(&self) -> (Self::Content, Vec<(Self, usize)>) {
        self.factor_with_settings(&FactorizationSettings::default())
    }

    /// Factor the polynomial into its content and irreducible factors with multiplicities,
    /// such that `content * f_1^e_1 * ... * f_n^e_n` equals the input.
    fn factor_with_settings(
        &self,
        settings: &FactorizationSettings,
    ) -> (Self::Content, Vec<(Self, usize)>);

    /// Perform a square-free factorization.
    /// The output is `a_1^e1*...*a_n^e_n`
    /// where each `a_i` is relative prime.
    fn square_free_factorization(&self) -> Vec<(Self, usize)>;

    /// Check if the polynomial is a single irreducible factor, up to its content.
    fn is_irreducible(&self) -> bool;
}

/// Factor `f` into its content and its irreducible factors with multiplicities.
/// The variables of the factorization are the variables of the polynomial,
/// and the coefficient domain is its ring.
pub fn factor<P: Factorize>(f: &P) -> (P::Content, Vec<(P, usize)>) {
    f.factor()
}

impl<R: PolynomialGCD<E>, E: Exponent> MultivariatePolynomial<R, E> {
    /// Compute the square-free part of a polynomial over a ring of characteristic zero:
    /// the product of its distinct irreducible factors, up to a constant.
    pub fn square_free_part(&self) -> Self {
        if self.is_constant() {
            return self.clone();
        }

        let mut g = self.clone();
        for v in self.occurring_variables() {
            g = g.gcd(&self.derivative(v));
            if g.is_constant() {
                return self.clone();
            }
        }

        self / &g
    }

    /// Perform a square-free factorization of a polynomial that is primitive in `x`
    /// using Yun's algorithm. Over a finite field, all multiplicities must be
    /// smaller than the characteristic.
    pub fn square_free_factorization_yun(&self, x: usize) -> Vec<(Self, usize)> {
        let b = self.derivative(x);
        let c = self.gcd(&b);

        if c.is_constant() {
            return vec![(self.clone(), 1)];
        }

        let mut factors = vec![];

        let mut w = self / &c;
        let mut y = &b / &c;

        let mut i = 1;
        while !w.is_constant() {
            let z = y - w.derivative(x);
            let g = w.gcd(&z);
            w = w / &g;
            y = z / &g;

            if !g.is_constant() {
                factors.push((g, i));
            }
            i += 1
        }

        factors
    }

    /// Perform a square-free factorization in all variables: the primitive part
    /// with respect to the first variable is treated with Yun's algorithm and
    /// its content is factored recursively.
    fn square_free_factorization_0_char(&self) -> Vec<(Self, usize)> {
        let vars = self.occurring_variables();
        if vars.is_empty() {
            return vec![];
        }

        let content = self.polynomial_content(&vars);
        let pp = self / &content;

        let mut factors = pp.square_free_factorization_yun(vars[0]);
        factors.extend(content.square_free_factorization_0_char());
        factors
    }

    /// Compute the multiplicity of every factor in `factors` by
    /// repeated recursive division.
    pub fn trial_division(&self, factors: &[Self]) -> Vec<(Self, usize)> {
        let vars = self.occurring_variables();
        let mut f = self.clone();

        let mut res = Vec::with_capacity(factors.len());
        for v in factors {
            let mut k = 0;
            loop {
                let (q, r) = f.rec_poly_div(v, &vars);
                if !r.is_zero() {
                    break;
                }
                f = q;
                k += 1;
            }

            res.push((v.clone(), k));
        }

        res
    }
}

/// Sort factors by their leading monomial, then by all their terms.
fn sort_factors<E: Exponent>(factors: &mut [MultivariatePolynomial<IntegerRing, E>]) {
    factors.sort_by(|a, b| {
        a.last_exponents()
            .cmp(b.last_exponents())
            .then_with(|| a.exponents.cmp(&b.exponents))
            .then_with(|| a.coefficients.cmp(&b.coefficients))
    });
}

impl<E: Exponent> Factorize for MultivariatePolynomial<IntegerRing, E> {
    type Content = Integer;

    fn factor_with_settings(
        &self,
        settings: &FactorizationSettings,
    ) -> (Integer, Vec<(Self, usize)>) {
        if self.is_zero() {
            return (Integer::zero(), vec![]);
        }

        let mut c = self.content();
        let mut p = self.clone().div_coeff(&c);
        if p.lcoeff().is_negative() {
            c = -c;
            p = -p;
        }

        if p.is_constant() {
            return (c, vec![]);
        }

        let mut rng = settings.rng();
        let s = p.square_free_part();
        let mut h = s.factor_square_free(settings, &mut rng);
        sort_factors(&mut h);

        let factors = p.trial_division(&h);
        debug!("factors of {}: {:?}", self, factors);

        (c, factors)
    }

    fn square_free_factorization(&self) -> Vec<(Self, usize)> {
        if self.is_zero() {
            return vec![];
        }

        let mut c = self.content();
        let mut stripped = self.clone().div_coeff(&c);
        if stripped.lcoeff().is_negative() {
            c = -c;
            stripped = -stripped;
        }

        let mut factors = vec![];
        if !c.is_one() {
            factors.push((self.constant(c), 1));
        }

        factors.extend(stripped.square_free_factorization_0_char());
        factors
    }

    fn is_irreducible(&self) -> bool {
        if self.is_constant() {
            return false;
        }

        let (_, f) = self.factor();
        f.len() == 1 && f[0].1 == 1
    }
}

impl<E: Exponent> MultivariatePolynomial<RationalField, E> {
    /// Split off the content and convert to a primitive integer polynomial.
    fn to_primitive_integer_polynomial(
        &self,
    ) -> (Rational, MultivariatePolynomial<IntegerRing, E>) {
        let c = self.content();

        let stripped = self.map_coeff(
            |coeff| {
                let coeff = self.field.div(coeff, &c);
                debug_assert!(coeff.is_integer());
                coeff.numerator()
            },
            IntegerRing::new(),
        );

        (c, stripped)
    }
}

impl<E: Exponent> Factorize for MultivariatePolynomial<RationalField, E> {
    type Content = Rational;

    /// Factor over the rationals by factoring the primitive integer polynomial.
    /// All factors are made monic.
    fn factor_with_settings(
        &self,
        settings: &FactorizationSettings,
    ) -> (Rational, Vec<(Self, usize)>) {
        if self.is_zero() {
            return (Rational::zero(), vec![]);
        }

        let (c, stripped) = self.to_primitive_integer_polynomial();
        let (zc, fs) = stripped.factor_with_settings(settings);

        let mut content = &c * &Rational::from(zc);
        let mut factors = Vec::with_capacity(fs.len());
        for (f, e) in fs {
            let fq: Self = (&f).into();
            content = &content * &fq.lcoeff().pow(e as u64);
            factors.push((fq.make_monic(), e));
        }

        (content, factors)
    }

    fn square_free_factorization(&self) -> Vec<(Self, usize)> {
        if self.is_zero() {
            return vec![];
        }

        let (c, stripped) = self.to_primitive_integer_polynomial();
        let fs = stripped.square_free_factorization();

        let mut content = c;
        let mut factors = vec![];
        for (f, e) in fs {
            if f.is_constant() {
                content = &content * &Rational::from(f.lcoeff().pow(e as u64));
                continue;
            }

            let fq: Self = (&f).into();
            content = &content * &fq.lcoeff().pow(e as u64);
            factors.push((fq.make_monic(), e));
        }

        if !content.is_one() {
            factors.push((self.constant(content), 1));
        }

        factors
    }

    fn is_irreducible(&self) -> bool {
        if self.is_constant() {
            return false;
        }

        let (_, f) = self.factor();
        f.len() == 1 && f[0].1 == 1
    }
}

impl<E: Exponent> MultivariatePolynomial<FiniteField, E> {
    /// Get the variable of a univariate polynomial, if it is not constant.
    fn main_variable(&self) -> Option<usize> {
        if self.is_zero() {
            return None;
        }
        self.last_exponents().iter().position(|e| !e.is_zero())
    }

    /// Perform distinct degree factorization on a univariate and square-free polynomial.
    /// The output contains pairs `(d, g)` where `g` is the product of all monic
    /// irreducible factors of degree `d`.
    pub fn distinct_degree_factorization(&self) -> Vec<(usize, Self)> {
        let Some(var) = self.main_variable() else {
            return vec![];
        };

        let x = self.variable(var);
        let p = self.field.get_prime().clone();

        let mut factors = vec![];
        let mut f = self.clone().make_monic();
        let mut h = x.clone();
        let mut i = 0;
        while f.degree(var).to_u32() as usize >= 2 * (i + 1) {
            i += 1;

            h = h.exp_mod_univariate(p.clone(), &f);

            let g = f.univariate_gcd(&(&h - &x));
            if !g.is_one() {
                f = f.quot_rem_univariate(&g).0;
                h = h.quot_rem_univariate(&f).1;
                factors.push((i, g));
            }
        }

        if !f.is_constant() {
            factors.push((f.degree(var).to_u32() as usize, f));
        }

        factors
    }

    /// Perform Cantor-Zassenhaus's probabilistic algorithm for
    /// finding the irreducible factors of a polynomial that is the product
    /// of distinct irreducible factors of degree `d`.
    pub fn equal_degree_factorization(&self, d: usize, rng: &mut impl Rng) -> Vec<Self> {
        let f = self.clone().make_monic();

        let Some(var) = f.main_variable() else {
            return vec![];
        };

        if f.degree(var).to_u32() as usize <= d {
            return vec![f];
        }

        let p = self.field.get_prime().clone();
        let one = f.one();

        let factor = loop {
            let v = f.random_univariate(rng, var, 2 * d);
            if v.is_constant() {
                continue;
            }

            let g = f.univariate_gcd(&v);
            if !g.is_one() {
                break g;
            }

            let b = if p == Integer::new(2) {
                // the trace map v + v^2 + ... + v^(2^(d-1))
                let mut t = v.clone();
                let mut w = v;
                for _ in 1..d {
                    w = (&w * &w).quot_rem_univariate(&f).1;
                    t = &t + &w;
                }
                t
            } else {
                let e = &(&p.pow(d as u64) - &Integer::one()) / &Integer::new(2);
                &v.exp_mod_univariate(e, &f) - &one
            };

            let g = f.univariate_gcd(&b);
            if !g.is_one() && g != f {
                break g;
            }
        };

        let mut factors = factor.equal_degree_factorization(d, rng);
        factors.extend(f.quot_rem_univariate(&factor).0.equal_degree_factorization(d, rng));
        factors
    }

    /// Perform distinct and equal degree factorization on a square-free univariate polynomial.
    pub fn factor_distinct_equal_degree(&self, rng: &mut impl Rng) -> Vec<Self> {
        let mut factors = vec![];
        for (d, f) in self.distinct_degree_factorization() {
            debug!("DDF {} {}", f, d);
            factors.extend(f.equal_degree_factorization(d, rng));
        }
        factors
    }
}

impl<E: Exponent> MultivariatePolynomial<IntegerRing, E> {
    /// Hensel lift a factorization `self = lc * g * h mod p`, where `g` and `h` are monic,
    /// to a factorization `self = lc * G * H mod p^l` with monic `G` and `H`.
    pub fn hensel_lift(
        &self,
        g: &MultivariatePolynomial<FiniteField, E>,
        h: &MultivariatePolynomial<FiniteField, E>,
        p: &Integer,
        l: u32,
    ) -> (Self, Self) {
        let field = g.field.clone();
        let pl = p.pow(l as u64);

        let inv = self.lcoeff().mod_inverse(&pl);
        let f = self.clone().mul_coeff(inv).symmetric_mod(&pl);

        let (_, s, t) = g.eea_univariate(h);
        debug_assert!((&(&s * g) + &(&t * h)).is_one());

        let mut g_i = g.to_integer_polynomial();
        let mut h_i = h.to_integer_polynomial();
        let mut m = p.clone();

        for _ in 1..l {
            let e = (&f - &(&g_i * &h_i)).symmetric_mod(&pl);
            if e.is_zero() {
                break;
            }

            let c = e.div_coeff(&m).to_finite_field(&field);
            let (q, dg) = (&c * &t).quot_rem_univariate(g);
            let dh = &(&c * &s) + &(&q * h);

            g_i = g_i + dg.to_integer_polynomial().mul_coeff(m.clone());
            h_i = h_i + dh.to_integer_polynomial().mul_coeff(m.clone());

            m = &m * p;
        }

        (g_i.symmetric_mod(&pl), h_i.symmetric_mod(&pl))
    }

    /// Lift multiple monic factors modulo `p` to monic factors modulo `p^l`
    /// by creating a balanced binary tree and lifting each product.
    pub fn multi_factor_hensel_lift(
        &self,
        hs: &[MultivariatePolynomial<FiniteField, E>],
        p: &Integer,
        l: u32,
    ) -> Vec<Self> {
        if hs.len() == 1 {
            let pl = p.pow(l as u64);
            let inv = self.lcoeff().mod_inverse(&pl);
            return vec![self.clone().mul_coeff(inv).symmetric_mod(&pl)];
        }

        let (gs, hs) = hs.split_at(hs.len() / 2);

        let mut g = gs[0].one();
        for x in gs {
            g = g * x;
        }

        let mut h = hs[0].one();
        for x in hs {
            h = h * x;
        }

        let (g_i, h_i) = self.hensel_lift(&g, &h, p, l);

        let mut factors = g_i.multi_factor_hensel_lift(gs, p, l);
        factors.extend(h_i.multi_factor_hensel_lift(hs, p, l));
        factors
    }

    /// Find the smallest prime that does not divide the leading coefficient and keeps
    /// the polynomial square-free. Primes are searched up to `2γ log2(γ)`, with
    /// `γ = 2(2n log2(n+1) + (2n-1) log2(A))`.
    fn zassenhaus_prime(&self, var: usize) -> FiniteField {
        let n = self.degree(var).to_u32() as u64;
        let a = self.max_norm();

        let gamma = 2 * (2 * n * log2_ceil(&Integer::from(n + 1)) + (2 * n - 1) * log2_ceil(&a));
        let max_p = 2 * gamma * log2_ceil(&Integer::from(gamma)).max(1);

        let lc = self.lcoeff();
        for p in PrimeIteratorU64::new(2).take_while(|p| *p <= max_p) {
            let p = Integer::from(p);
            if (&lc % &p).is_zero() {
                continue;
            }

            let field = FiniteField::new(p);
            if self.to_finite_field(&field).is_square_free_univariate(var) {
                return field;
            }
        }

        panic!(
            "Ran out of primes below {} during the factorization of {}",
            max_p, self
        );
    }

    /// Factor a square-free, primitive univariate polynomial with a positive leading coefficient
    /// over the integers with Zassenhaus's algorithm: the polynomial is factored modulo a prime,
    /// the factors are Hensel lifted and recombined into true factors.
    #[instrument(level = "debug", skip_all)]
    pub fn factor_reconstruct(&self, rng: &mut impl Rng) -> Vec<Self> {
        let Some(var) = self.last_exponents().iter().position(|x| !x.is_zero()) else {
            return vec![self.clone()];
        };

        let n = self.degree(var).to_u32();
        if n <= 1 {
            return vec![self.clone()];
        }

        let field = self.zassenhaus_prime(var);
        let p = field.get_prime().clone();

        let hs = self.to_finite_field(&field).factor_distinct_equal_degree(rng);
        debug!("{} has {} factors modulo {}", self, hs.len(), p);

        if hs.len() == 1 {
            return vec![self.clone()];
        }

        let bound = self.factor_coefficient_bound(n);
        let l = lifting_exponent(&bound, &p);
        let pl = p.pow(l as u64);
        debug!("Lifting to {}^{} with bound {}", p, l, bound);

        let mut lifted = self.multi_factor_hensel_lift(&hs, &p, l);

        let mut factors = vec![];
        let mut rest = self.clone();
        let mut s = 1;
        'len: while 2 * s <= lifted.len() {
            let mut it = CombinationIterator::new(lifted.len(), s);
            while let Some(c) = it.next() {
                let subset = c.to_vec();
                let complement = it.complement();

                let lc = rest.constant(rest.lcoeff());
                let mut g = lc.clone();
                for i in &subset {
                    g = (&g * &lifted[*i]).symmetric_mod(&pl);
                }
                let mut h = lc;
                for i in &complement {
                    h = (&h * &lifted[*i]).symmetric_mod(&pl);
                }

                if &g.max_norm() * &Integer::new(2) > pl || &h.max_norm() * &Integer::new(2) > pl {
                    continue;
                }

                if g.l1_norm() * h.l1_norm() <= bound {
                    let g = g.make_primitive();
                    let h = h.make_primitive();
                    debug_assert_eq!(&g * &h, rest);

                    factors.push(g);
                    rest = h;
                    lifted = complement.iter().map(|i| lifted[*i].clone()).collect();
                    continue 'len;
                }
            }

            s += 1;
        }

        factors.push(rest);
        factors
    }
}
