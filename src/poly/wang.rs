//! Multivariate factorization over the integers with Wang's algorithm:
//! the polynomial is evaluated at an integer point, the univariate image is
//! factored, the true leading coefficients are predicted from a factorization
//! of the leading coefficient, and the image factors are lifted variable by variable.

use std::fmt;

use rand::Rng;
use tracing::{debug, instrument};

use crate::domains::finite_field::FiniteField;
use crate::domains::integer::{Integer, IntegerRing, Z};
use crate::domains::Ring;
use crate::settings::FactorizationSettings;

use super::diophantine::{multivariate_diophant, taylor_coefficient};
use super::factor::Factorize;
use super::gcd::LARGE_U32_PRIMES;
use super::norm::{lifting_exponent, random};
use super::polynomial::MultivariatePolynomial;
use super::Exponent;

/// A recoverable failure of a single attempt of Wang's algorithm.
/// The attempt is retried with a different evaluation point or range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WangError {
    /// No evaluation point satisfied the conditions of Wang's algorithm.
    UnluckyEvaluation,
    /// The factors of the leading coefficient could not be distributed over the image factors.
    ExtraneousFactors,
    /// A leading coefficient could not be divided by its predicted content.
    IndivisibleContent,
    /// The lifted factors do not multiply to the input.
    LiftingFailed,
    /// A lifted factor does not divide the input.
    TrialDivisionFailed,
}

impl fmt::Display for WangError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WangError::UnluckyEvaluation => f.write_str("no suitable evaluation point found"),
            WangError::ExtraneousFactors => {
                f.write_str("leading coefficient factors could not be distributed")
            }
            WangError::IndivisibleContent => {
                f.write_str("leading coefficient is not divisible by the predicted content")
            }
            WangError::LiftingFailed => f.write_str("Hensel lifting did not reconstruct the input"),
            WangError::TrialDivisionFailed => {
                f.write_str("a lifted factor does not divide the input")
            }
        }
    }
}

impl std::error::Error for WangError {}

/// A valid evaluation point together with the factored image of the polynomial.
#[derive(Clone, Debug)]
pub struct EvaluationConfiguration<E: Exponent> {
    /// The content of the image, carrying its sign.
    pub delta: Integer,
    /// The primitive part of the image, with a positive leading coefficient.
    pub primitive_image: MultivariatePolynomial<IntegerRing, E>,
    /// The factors of the leading coefficient evaluated at the point.
    pub lc_images: Vec<Integer>,
    /// The irreducible factors of the primitive image.
    pub univariate_factors: Vec<MultivariatePolynomial<IntegerRing, E>>,
    /// The values of the evaluation variables.
    pub point: Vec<Integer>,
}

impl<E: Exponent> EvaluationConfiguration<E> {
    /// Returns `true` if `self` is a better choice than `other`: fewer univariate
    /// factors, or as many factors and a larger image.
    fn is_better_than(&self, other: &Self) -> bool {
        match self
            .univariate_factors
            .len()
            .cmp(&other.univariate_factors.len())
        {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Equal => {
                self.primitive_image.max_norm() > other.primitive_image.max_norm()
            }
        }
    }
}

/// Compute, for every `f` in `F`, a divisor of `f` that does not divide `G*d` or any of the
/// `f` before it. Returns `None` if no such divisor exists for some `f`.
pub fn nondivisors(g: &Integer, f: &[Integer], d: &Integer) -> Option<Vec<Integer>> {
    let mut x = vec![(g * d).abs()];

    for fi in f {
        let mut q = fi.abs();
        if q.is_zero() {
            return None;
        }

        for r in x.iter().rev() {
            let mut r = r.clone();
            while !r.is_one() {
                r = r.gcd(&q);
                q = &q / &r;
            }

            if q.is_one() {
                return None;
            }
        }

        x.push(q);
    }

    x.remove(0);
    Some(x)
}

/// Get the integer leading coefficient of `f` viewed recursively in the variables `vars`.
pub fn ground_lead_coeff<E: Exponent>(
    f: &MultivariatePolynomial<IntegerRing, E>,
    vars: &[usize],
) -> Integer {
    f.lcoeff_varorder(vars)
}

impl<E: Exponent> MultivariatePolynomial<IntegerRing, E> {
    /// Compute the irreducible factors of a square-free polynomial.
    /// The content in the first occurring variable is factored recursively
    /// and the primitive part is factored with Wang's algorithm.
    pub fn factor_square_free(
        &self,
        settings: &FactorizationSettings,
        rng: &mut impl Rng,
    ) -> Vec<Self> {
        let mut f = self.clone().make_primitive();
        if f.lcoeff().is_negative() {
            f = -f;
        }

        let vars = f.occurring_variables();
        match vars.len() {
            0 => return vec![],
            1 => return f.factor_reconstruct(rng),
            _ => {}
        }

        let mut factors = vec![];

        let content = f.polynomial_content(&vars);
        let pp = if content.is_constant() {
            f
        } else {
            factors.extend(content.factor_square_free(settings, rng));
            let pp = &f / &content;
            if pp.lcoeff().is_negative() {
                -pp
            } else {
                pp
            }
        };

        let pp_vars = pp.occurring_variables();
        if pp_vars.len() == 1 {
            factors.extend(pp.factor_reconstruct(rng));
        } else {
            factors.extend(pp.factors_wang(&pp_vars, settings, rng));
        }

        factors
    }

    /// Test if the point `point` for the evaluation variables is a valid evaluation point
    /// for Wang's algorithm. On success, the content and primitive part of the image and the
    /// values of the factors of the leading coefficient are returned.
    pub fn test_evaluation_point(
        &self,
        x: usize,
        eval_vars: &[usize],
        point: &[Integer],
        omega: &Integer,
        lc_factors: &[(Self, usize)],
    ) -> Result<(Integer, Self, Vec<Integer>), WangError> {
        let pairs: Vec<_> = eval_vars.iter().copied().zip(point.iter().cloned()).collect();

        if self
            .univariate_lcoeff(x)
            .replace_multiple(&pairs)
            .is_zero()
        {
            return Err(WangError::UnluckyEvaluation);
        }

        let u0 = self.replace_multiple(&pairs);
        if !u0.gcd(&u0.derivative(x)).is_constant() {
            return Err(WangError::UnluckyEvaluation);
        }

        let mut delta = u0.content();
        let mut pr = u0.div_coeff(&delta);
        if pr.lcoeff().is_negative() {
            delta = -delta;
            pr = -pr;
        }

        let lc_images: Vec<_> = lc_factors
            .iter()
            .map(|(f, _)| f.replace_multiple(&pairs).get_constant())
            .collect();

        if nondivisors(omega, &lc_images, &delta).is_none() {
            return Err(WangError::UnluckyEvaluation);
        }

        Ok((delta, pr, lc_images))
    }

    /// Search for valid evaluation points in the range `[-b, b]`, where `b` starts
    /// at `modulus` and is widened after a fixed number of tries.
    /// Only the configurations with the fewest univariate factors are kept.
    pub fn get_evaluation_points(
        &self,
        x: usize,
        eval_vars: &[usize],
        omega: &Integer,
        lc_factors: &[(Self, usize)],
        modulus: i64,
        settings: &FactorizationSettings,
        rng: &mut impl Rng,
    ) -> Result<Vec<EvaluationConfiguration<E>>, WangError> {
        let mut configs: Vec<EvaluationConfiguration<E>> = vec![];

        let mut b = modulus;
        let mut first = true;
        for _ in 0..settings.max_evaluation_widenings {
            for _ in 0..settings.tries_per_widening {
                let point = if first {
                    first = false;
                    vec![Integer::zero(); eval_vars.len()]
                } else {
                    let mut point = Vec::with_capacity(eval_vars.len());
                    for _ in eval_vars {
                        point.push(random(rng, -b, b));
                    }
                    point
                };

                if configs.iter().any(|c| c.point == point) {
                    continue;
                }

                let Ok((delta, primitive_image, lc_images)) =
                    self.test_evaluation_point(x, eval_vars, &point, omega, lc_factors)
                else {
                    continue;
                };

                let univariate_factors = primitive_image.factor_reconstruct(rng);
                let config = EvaluationConfiguration {
                    delta,
                    primitive_image,
                    lc_images,
                    univariate_factors,
                    point,
                };

                if config.univariate_factors.len() == 1 {
                    return Ok(vec![config]);
                }

                match configs.first().map(|c| c.univariate_factors.len()) {
                    Some(r) if r < config.univariate_factors.len() => {}
                    Some(r) if r == config.univariate_factors.len() => configs.push(config),
                    _ => configs = vec![config],
                }

                if configs.len() >= settings.evaluation_configurations {
                    return Ok(configs);
                }
            }

            b += 1;
        }

        if configs.is_empty() {
            Err(WangError::UnluckyEvaluation)
        } else {
            Ok(configs)
        }
    }

    /// Replace the leading coefficient in `x` by `lc`.
    fn replace_univariate_lcoeff(&self, x: usize, lc: &Self) -> Self {
        let mut e = vec![E::zero(); self.nvars()];
        e[x] = self.degree(x);

        let old = self.univariate_lcoeff(x).mul_exp(&e);
        self.clone() - old + lc.clone().mul_exp(&e)
    }

    /// Predict the true leading coefficients of the factors from the factors of the leading
    /// coefficient of `self`. Returns the polynomial to lift, which may be multiplied by a
    /// power of the content of the image, the corrected univariate factors and their
    /// leading coefficients.
    pub fn wang_leading_coeff(
        &self,
        config: &EvaluationConfiguration<E>,
        lc_factors: &[(Self, usize)],
        eval_vars: &[usize],
    ) -> Result<(Self, Vec<Self>, Vec<Self>), WangError> {
        let pairs: Vec<_> = eval_vars
            .iter()
            .copied()
            .zip(config.point.iter().cloned())
            .collect();

        let r = config.univariate_factors.len();

        let mut d = vec![self.one(); r];
        let mut distributed = vec![0; lc_factors.len()];
        for (di, u) in d.iter_mut().zip(&config.univariate_factors) {
            let mut c = &u.lcoeff() * &config.delta;
            for (k, ((f, _), e)) in lc_factors.iter().zip(&config.lc_images).enumerate().rev() {
                let e = e.abs();
                let mut m = 0;
                while (&c % &e).is_zero() {
                    c = &c / &e;
                    m += 1;
                }

                if m > 0 {
                    *di = &*di * &f.pow(m);
                    distributed[k] += m;
                }
            }
        }

        if distributed
            .iter()
            .zip(lc_factors)
            .any(|(m, (_, e))| m != e)
        {
            return Err(WangError::ExtraneousFactors);
        }

        let mut delta = config.delta.clone();
        let mut us = Vec::with_capacity(r);
        let mut cs = Vec::with_capacity(r);
        for (u, di) in config.univariate_factors.iter().zip(d) {
            let di_image = di.replace_multiple(&pairs).get_constant();
            let lc = u.lcoeff();

            if delta.is_one() {
                let q = Z
                    .try_div(&lc, &di_image)
                    .ok_or(WangError::IndivisibleContent)?;
                cs.push(di.mul_coeff(q));
                us.push(u.clone());
            } else {
                let g = lc.gcd(&di_image);
                let s = &di_image / &g;
                cs.push(di.mul_coeff(&lc / &g));
                us.push(u.clone().mul_coeff(s.clone()));
                delta = Z
                    .try_div(&delta, &s)
                    .ok_or(WangError::IndivisibleContent)?;
            }
        }

        if delta.is_one() {
            return Ok((self.clone(), us, cs));
        }

        let us = us
            .into_iter()
            .map(|u| u.mul_coeff(delta.clone()))
            .collect();
        let cs = cs
            .into_iter()
            .map(|c| c.mul_coeff(delta.clone()))
            .collect();
        let u = self.clone().mul_coeff(delta.pow(r as u64 - 1));

        Ok((u, us, cs))
    }

    /// Find a prime that does not divide the leading coefficient of the univariate
    /// polynomial `self` and keeps it square-free.
    fn wang_prime(&self, x: usize) -> Integer {
        let lc = self.lcoeff();
        for p in LARGE_U32_PRIMES {
            let p = Integer::from(p);
            if (&lc % &p).is_zero() {
                continue;
            }

            if self
                .to_finite_field(&FiniteField::new(p.clone()))
                .is_square_free_univariate(x)
            {
                return p;
            }
        }

        panic!("Ran out of primes for the Hensel lifting of {}", self);
    }

    /// Lift the univariate factors `us` of `self` evaluated at `point` to factors of `self`,
    /// one evaluation variable at a time, with leading coefficients `cs`.
    /// The Diophantine equations are solved modulo `p^l`.
    pub fn wang_hensel_lift(
        &self,
        x: usize,
        eval_vars: &[usize],
        point: &[Integer],
        us: Vec<Self>,
        cs: &[Self],
        p: &Integer,
        l: u32,
    ) -> Result<Vec<Self>, WangError> {
        let pl = p.pow(l as u64);
        let t = eval_vars.len();

        // images[j] has the evaluation variables after j substituted
        let mut images = Vec::with_capacity(t);
        let mut s = self.clone();
        images.push(s.clone());
        for j in (1..t).rev() {
            s = s.replace(eval_vars[j], &point[j]).symmetric_mod(&pl);
            images.push(s.clone());
        }
        images.reverse();

        let d = eval_vars
            .iter()
            .map(|v| self.degree(*v).to_u32())
            .max()
            .unwrap_or(0);

        let product = |fs: &[Self]| {
            let mut r = self.one();
            for f in fs {
                r = r * f;
            }
            r
        };

        let mut h = us;
        for (j, s) in images.iter().enumerate() {
            let xj = eval_vars[j];
            let aj = &point[j];
            let g = h.clone();

            let rest: Vec<_> = eval_vars[j + 1..]
                .iter()
                .copied()
                .zip(point[j + 1..].iter().cloned())
                .collect();
            for (hi, ci) in h.iter_mut().zip(cs) {
                let lc = ci.replace_multiple(&rest).symmetric_mod(&pl);
                *hi = hi.replace_univariate_lcoeff(x, &lc);
            }

            let vars: Vec<_> = std::iter::once(x)
                .chain(eval_vars[..j].iter().copied())
                .collect();
            let values = &point[..j];

            let linear = self.variable(xj) - self.constant(aj.clone());
            let mut monomial = self.one();
            let mut e = (s.clone() - product(&h)).symmetric_mod(&pl);
            for k in 1..=s.degree(xj).to_u32() {
                if e.is_zero() {
                    break;
                }

                monomial = monomial * &linear;

                let ck = taylor_coefficient(&e, xj, aj, k);
                if ck.is_zero() {
                    continue;
                }

                let ts = multivariate_diophant(&g, &ck, &vars, values, d, p, l);
                for (hi, ti) in h.iter_mut().zip(ts) {
                    *hi = (hi.clone() + ti * &monomial).symmetric_mod(&pl);
                }

                e = (s.clone() - product(&h)).symmetric_mod(&pl);
            }
        }

        if product(&h) != *self {
            return Err(WangError::LiftingFailed);
        }

        Ok(h)
    }

    /// Factor a primitive, square-free polynomial in the variables `vars`, of which the
    /// first is the main variable, using Wang's algorithm. Failed attempts are retried
    /// with a wider evaluation range.
    #[instrument(level = "debug", skip_all)]
    pub fn factors_wang(
        &self,
        vars: &[usize],
        settings: &FactorizationSettings,
        rng: &mut impl Rng,
    ) -> Vec<Self> {
        let mut modulus = settings.starting_modulus;
        for attempt in 0..=settings.max_wang_retries {
            match self.factors_wang_rec(vars, modulus, settings, rng) {
                Ok(factors) => return factors,
                Err(e) => {
                    debug!(
                        "Wang attempt {} with modulus {} failed: {}",
                        attempt, modulus, e
                    );
                    modulus += 1;
                }
            }
        }

        panic!(
            "Wang's algorithm failed to factor {} after {} retries",
            self, settings.max_wang_retries
        );
    }

    fn factors_wang_rec(
        &self,
        vars: &[usize],
        modulus: i64,
        settings: &FactorizationSettings,
        rng: &mut impl Rng,
    ) -> Result<Vec<Self>, WangError> {
        let x = vars[0];
        let eval_vars = &vars[1..];

        let (omega, lc_factors) = self.univariate_lcoeff(x).factor_with_settings(settings);

        let configs = self.get_evaluation_points(
            x,
            eval_vars,
            &omega,
            &lc_factors,
            modulus,
            settings,
            rng,
        )?;

        let Some(config) = configs
            .into_iter()
            .reduce(|best, c| if c.is_better_than(&best) { c } else { best })
        else {
            return Err(WangError::UnluckyEvaluation);
        };

        if config.univariate_factors.len() == 1 {
            return Ok(vec![self.clone()]);
        }

        debug!(
            "Evaluation point {:?} gives {} univariate factors",
            config.point,
            config.univariate_factors.len()
        );

        let (u, us, cs) = self.wang_leading_coeff(&config, &lc_factors, eval_vars)?;

        let pairs: Vec<_> = eval_vars
            .iter()
            .copied()
            .zip(config.point.iter().cloned())
            .collect();
        let p = u.replace_multiple(&pairs).wang_prime(x);

        let bound = u.multivariate_factor_bound(vars);
        let l = lifting_exponent(&bound, &p);
        debug!("Lifting modulo {}^{}", p, l);

        let lifted = u.wang_hensel_lift(x, eval_vars, &config.point, us, &cs, &p, l)?;

        let mut factors = Vec::with_capacity(lifted.len());
        for f in lifted {
            let mut f = f.make_primitive();
            if f.lcoeff().is_negative() {
                f = -f;
            }

            if !self.rec_poly_div(&f, vars).1.is_zero() {
                return Err(WangError::TrialDivisionFailed);
            }

            factors.push(f);
        }

        Ok(factors)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::domains::integer::{Integer, IntegerRing, Z};
    use crate::poly::{polynomial::MultivariatePolynomial, Variable};
    use crate::settings::FactorizationSettings;

    use crate::poly::norm::lifting_exponent;

    use super::{ground_lead_coeff, nondivisors, EvaluationConfiguration, WangError};

    fn poly(terms: &[(i64, [u16; 3])]) -> MultivariatePolynomial<IntegerRing> {
        let vars = Arc::new(vec![Variable::new("x"), Variable::new("y"), Variable::new("z")]);
        let mut p = MultivariatePolynomial::new(&Z, None, vars);
        for (c, e) in terms {
            p.append_monomial(Integer::new(*c), e);
        }
        p
    }

    fn ints(v: &[i64]) -> Vec<Integer> {
        v.iter().map(|x| Integer::new(*x)).collect()
    }

    #[test]
    fn nondivisor_sequence() {
        assert_eq!(
            nondivisors(&Integer::new(4), &ints(&[-14, 3, -11, -17]), &Integer::one()),
            Some(ints(&[7, 3, 11, 17]))
        );
        assert_eq!(
            nondivisors(&Integer::new(4), &[], &Integer::one()),
            Some(vec![])
        );
        assert_eq!(
            nondivisors(&Integer::one(), &ints(&[2, 4]), &Integer::one()),
            None
        );
        assert_eq!(
            nondivisors(&Integer::one(), &ints(&[3]), &Integer::new(9)),
            None
        );
    }

    #[test]
    fn leading_coefficient() {
        // (2y^2 + 3y + 4)x^2 + 5
        let f = poly(&[
            (2, [2, 2, 0]),
            (3, [2, 1, 0]),
            (4, [2, 0, 0]),
            (5, [0, 0, 0]),
        ]);
        assert_eq!(ground_lead_coeff(&f, &[0, 1]), Integer::new(2));
        assert_eq!(ground_lead_coeff(&f, &[1, 0]), Integer::new(2));
    }

    #[test]
    fn evaluation_points() {
        // (xy + 1)(x + y)
        let u =
            &poly(&[(1, [1, 1, 0]), (1, [0, 0, 0])]) * &poly(&[(1, [1, 0, 0]), (1, [0, 1, 0])]);
        let lc = vec![(poly(&[(1, [0, 1, 0])]), 1)];

        assert_eq!(
            u.test_evaluation_point(0, &[1], &ints(&[0]), &Integer::one(), &lc),
            Err(WangError::UnluckyEvaluation)
        );
        // the image at y = 1 is a square
        assert_eq!(
            u.test_evaluation_point(0, &[1], &ints(&[1]), &Integer::one(), &lc),
            Err(WangError::UnluckyEvaluation)
        );

        let (delta, pr, e) = u
            .test_evaluation_point(0, &[1], &ints(&[3]), &Integer::one(), &lc)
            .unwrap();
        assert!(delta.is_one());
        assert_eq!(pr, poly(&[(3, [2, 0, 0]), (10, [1, 0, 0]), (3, [0, 0, 0])]));
        assert_eq!(e, ints(&[3]));

        let (delta, pr, _) = u
            .test_evaluation_point(0, &[1], &ints(&[-2]), &Integer::one(), &lc)
            .unwrap();
        assert_eq!(delta, Integer::new(-1));
        assert_eq!(pr, poly(&[(2, [2, 0, 0]), (-5, [1, 0, 0]), (2, [0, 0, 0])]));
    }

    #[test]
    fn evaluation_point_search() {
        // (x + y + 1)(x - y + 2) has two linear factors at every point
        let u = &poly(&[(1, [1, 0, 0]), (1, [0, 1, 0]), (1, [0, 0, 0])])
            * &poly(&[(1, [1, 0, 0]), (-1, [0, 1, 0]), (2, [0, 0, 0])]);

        let settings = FactorizationSettings::default().with_evaluation_configurations(1);
        let mut rng = settings.rng();
        let configs = u
            .get_evaluation_points(0, &[1], &Integer::one(), &[], 3, &settings, &mut rng)
            .unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].point, ints(&[0]));
        assert_eq!(
            configs[0].primitive_image,
            poly(&[(1, [2, 0, 0]), (3, [1, 0, 0]), (2, [0, 0, 0])])
        );

        let settings = FactorizationSettings::default()
            .with_evaluation_configurations(2)
            .with_max_evaluation_widenings(1)
            .with_tries_per_widening(20);
        let mut rng = settings.rng();
        let configs = u
            .get_evaluation_points(0, &[1], &Integer::one(), &[], 3, &settings, &mut rng)
            .unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].point, ints(&[0]));
        assert_ne!(configs[1].point, configs[0].point);
        assert!(configs.iter().all(|c| c.univariate_factors.len() == 2));
        assert!(configs[1].point[0].abs() <= Integer::new(3));
    }

    #[test]
    fn evaluation_point_search_irreducible_image() {
        // x^2 + y^2 + 1 stays irreducible at y = 0
        let u = poly(&[(1, [2, 0, 0]), (1, [0, 2, 0]), (1, [0, 0, 0])]);

        let settings = FactorizationSettings::default();
        let mut rng = settings.rng();
        let configs = u
            .get_evaluation_points(0, &[1], &Integer::one(), &[], 3, &settings, &mut rng)
            .unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].point, ints(&[0]));
        assert_eq!(configs[0].univariate_factors.len(), 1);
    }

    #[test]
    fn evaluation_point_search_exhausted() {
        // (xy + 1)(x + y): the leading coefficient vanishes at y = 0
        let u =
            &poly(&[(1, [1, 1, 0]), (1, [0, 0, 0])]) * &poly(&[(1, [1, 0, 0]), (1, [0, 1, 0])]);
        let lc = vec![(poly(&[(1, [0, 1, 0])]), 1)];

        let settings = FactorizationSettings::default()
            .with_max_evaluation_widenings(1)
            .with_tries_per_widening(1);
        let mut rng = settings.rng();
        assert_eq!(
            u.get_evaluation_points(0, &[1], &Integer::one(), &lc, 3, &settings, &mut rng)
                .unwrap_err(),
            WangError::UnluckyEvaluation
        );

        let settings = settings.with_max_evaluation_widenings(0);
        assert_eq!(
            u.get_evaluation_points(0, &[1], &Integer::one(), &lc, 3, &settings, &mut rng)
                .unwrap_err(),
            WangError::UnluckyEvaluation
        );
    }

    #[test]
    fn leading_coefficients_paper_example() {
        // Wang's example: the leading coefficient in x is 4yz^2(y + z)^2(y - z)
        let f1 = poly(&[(1, [2, 2, 0]), (-1, [2, 0, 2]), (1, [0, 1, 0]), (-1, [0, 0, 2])]);
        let f2 = poly(&[(1, [2, 1, 2]), (3, [1, 0, 1]), (2, [0, 1, 0])]);
        let f3 = poly(&[(4, [2, 1, 0]), (4, [2, 0, 1]), (1, [1, 1, 1]), (-1, [0, 0, 0])]);
        let u = &(&f1 * &f2) * &f3;

        let y = poly(&[(1, [0, 1, 0])]);
        let z = poly(&[(1, [0, 0, 1])]);
        let lc_factors = vec![
            (y.clone(), 1),
            (z.clone(), 2),
            (&y + &z, 2),
            (&y - &z, 1),
        ];

        let point = ints(&[-14, 3]);
        let (delta, primitive_image, lc_images) = u
            .test_evaluation_point(0, &[1, 2], &point, &Integer::new(4), &lc_factors)
            .unwrap();
        assert!(delta.is_one());
        assert_eq!(lc_images, ints(&[-14, 3, -11, -17]));

        let h = vec![
            poly(&[(44, [2, 0, 0]), (42, [1, 0, 0]), (1, [0, 0, 0])]),
            poly(&[(126, [2, 0, 0]), (-9, [1, 0, 0]), (28, [0, 0, 0])]),
            poly(&[(187, [2, 0, 0]), (-23, [0, 0, 0])]),
        ];
        assert_eq!(&(&h[0] * &h[1]) * &h[2], primitive_image);

        let config = EvaluationConfiguration {
            delta,
            primitive_image,
            lc_images,
            univariate_factors: h.clone(),
            point: point.clone(),
        };

        let (v, us, cs) = u.wang_leading_coeff(&config, &lc_factors, &[1, 2]).unwrap();
        assert_eq!(v, u);
        assert_eq!(us, h);
        assert_eq!(
            cs,
            vec![
                (&y + &z).mul_coeff(Integer::new(-4)),
                -(&y * &z.pow(2)),
                &y.pow(2) - &z.pow(2),
            ]
        );

        let pairs = vec![(1, point[0].clone()), (2, point[1].clone())];
        let p = u.replace_multiple(&pairs).wang_prime(0);
        let l = lifting_exponent(&u.multivariate_factor_bound(&[0, 1, 2]), &p);
        let lifted = u
            .wang_hensel_lift(0, &[1, 2], &point, us, &cs, &p, l)
            .unwrap();
        assert_eq!(lifted, vec![-f3, -f2, f1]);
    }

    #[test]
    fn leading_coefficients_with_content() {
        // (3x + y)(x + y + 1) at y = 3 has the image 3(x + 1)(x + 4)
        let u = &poly(&[(3, [1, 0, 0]), (1, [0, 1, 0])])
            * &poly(&[(1, [1, 0, 0]), (1, [0, 1, 0]), (1, [0, 0, 0])]);

        let point = ints(&[3]);
        let (delta, primitive_image, lc_images) = u
            .test_evaluation_point(0, &[1], &point, &Integer::new(3), &[])
            .unwrap();
        assert_eq!(delta, Integer::new(3));
        assert_eq!(
            primitive_image,
            poly(&[(1, [2, 0, 0]), (5, [1, 0, 0]), (4, [0, 0, 0])])
        );

        let config = EvaluationConfiguration {
            delta,
            primitive_image,
            lc_images,
            univariate_factors: vec![
                poly(&[(1, [1, 0, 0]), (1, [0, 0, 0])]),
                poly(&[(1, [1, 0, 0]), (4, [0, 0, 0])]),
            ],
            point: point.clone(),
        };

        // the content is folded into every factor and U is scaled by 3^(r-1)
        let (v, us, cs) = u.wang_leading_coeff(&config, &[], &[1]).unwrap();
        assert_eq!(v, u.clone().mul_coeff(Integer::new(3)));
        assert_eq!(
            us,
            vec![
                poly(&[(3, [1, 0, 0]), (3, [0, 0, 0])]),
                poly(&[(3, [1, 0, 0]), (12, [0, 0, 0])]),
            ]
        );
        assert_eq!(cs, vec![u.constant(Integer::new(3)); 2]);
        assert_eq!(&us[0] * &us[1], v.replace(1, &point[0]));

        let p = v.replace(1, &point[0]).wang_prime(0);
        let l = lifting_exponent(&v.multivariate_factor_bound(&[0, 1]), &p);
        let lifted = v.wang_hensel_lift(0, &[1], &point, us, &cs, &p, l).unwrap();
        assert_eq!(
            lifted,
            vec![
                poly(&[(3, [1, 0, 0]), (1, [0, 1, 0])]),
                poly(&[(3, [1, 0, 0]), (3, [0, 1, 0]), (3, [0, 0, 0])]),
            ]
        );
    }

    #[test]
    fn leading_coefficients_not_distributable() {
        // (xy + 1)(x + 1) at y = 5
        let u =
            &poly(&[(1, [1, 1, 0]), (1, [0, 0, 0])]) * &poly(&[(1, [1, 0, 0]), (1, [0, 0, 0])]);
        let y = poly(&[(1, [0, 1, 0])]);

        let config = EvaluationConfiguration {
            delta: Integer::one(),
            primitive_image: poly(&[(5, [2, 0, 0]), (6, [1, 0, 0]), (1, [0, 0, 0])]),
            lc_images: ints(&[5]),
            univariate_factors: vec![
                poly(&[(5, [1, 0, 0]), (1, [0, 0, 0])]),
                poly(&[(1, [1, 0, 0]), (1, [0, 0, 0])]),
            ],
            point: ints(&[5]),
        };

        let (v, us, cs) = u
            .wang_leading_coeff(&config, &[(y.clone(), 1)], &[1])
            .unwrap();
        assert_eq!(v, u);
        assert_eq!(us, config.univariate_factors);
        assert_eq!(cs, vec![y.clone(), u.one()]);

        // a factor y^2 cannot be spread over images with leading coefficients 5 and 1
        assert_eq!(
            u.wang_leading_coeff(&config, &[(y.clone(), 2)], &[1])
                .unwrap_err(),
            WangError::ExtraneousFactors
        );

        // two factors both claim the content 2 of the image
        let config = EvaluationConfiguration {
            delta: Integer::new(2),
            primitive_image: poly(&[(1, [2, 0, 0]), (4, [1, 0, 0]), (3, [0, 0, 0])]),
            lc_images: ints(&[2]),
            univariate_factors: vec![
                poly(&[(1, [1, 0, 0]), (1, [0, 0, 0])]),
                poly(&[(1, [1, 0, 0]), (3, [0, 0, 0])]),
            ],
            point: ints(&[2]),
        };
        assert_eq!(
            u.wang_leading_coeff(&config, &[(y, 2)], &[1]).unwrap_err(),
            WangError::IndivisibleContent
        );
    }

    #[test]
    fn bivariate() {
        let a = poly(&[(1, [1, 1, 0]), (1, [0, 0, 0])]);
        let b = poly(&[(1, [1, 0, 0]), (1, [0, 1, 0])]);
        let u = &a * &b;

        let settings = FactorizationSettings::default();
        let mut rng = settings.rng();
        let factors = u.factors_wang(&[0, 1], &settings, &mut rng);
        assert_eq!(factors.len(), 2);
        assert!(factors.contains(&a));
        assert!(factors.contains(&b));
    }

    #[test]
    fn trivariate_with_leading_coefficient() {
        // (xyz - 3)(xyz + 3)
        let u = poly(&[(1, [2, 2, 2]), (-9, [0, 0, 0])]);

        let settings = FactorizationSettings::default();
        let mut rng = settings.rng();
        let factors = u.factors_wang(&[0, 1, 2], &settings, &mut rng);
        assert_eq!(factors.len(), 2);
        assert!(factors.contains(&poly(&[(1, [1, 1, 1]), (-3, [0, 0, 0])])));
        assert!(factors.contains(&poly(&[(1, [1, 1, 1]), (3, [0, 0, 0])])));
    }

    #[test]
    fn irreducible() {
        // x^2 + y^2 + 1
        let u = poly(&[(1, [2, 0, 0]), (1, [0, 2, 0]), (1, [0, 0, 0])]);

        let settings = FactorizationSettings::default();
        let mut rng = settings.rng();
        assert_eq!(u.factors_wang(&[0, 1], &settings, &mut rng), vec![u.clone()]);
    }

    #[test]
    fn errors_display() {
        assert_eq!(
            WangError::LiftingFailed.to_string(),
            "Hensel lifting did not reconstruct the input"
        );
    }
}
