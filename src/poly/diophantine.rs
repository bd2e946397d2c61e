//! Solvers for the polynomial Diophantine equations that arise in
//! multivariate Hensel lifting, all working modulo a prime power `p^k`.

use crate::domains::finite_field::FiniteField;
use crate::domains::integer::{Integer, IntegerRing};

use super::{polynomial::MultivariatePolynomial, Exponent};

type IntegerPolynomial<E> = MultivariatePolynomial<IntegerRing, E>;

/// Get the single variable that occurs in a list of univariate polynomials.
fn main_variable<E: Exponent>(a: &[IntegerPolynomial<E>]) -> usize {
    a.iter()
        .flat_map(|f| f.occurring_variables())
        .next()
        .unwrap_or_else(|| panic!("Expected a non-constant polynomial in {:?}", a))
}

/// Compute the `k`-th coefficient of `f` around `x = a`,
/// i.e. the coefficient of `(x - a)^k`.
pub(crate) fn taylor_coefficient<E: Exponent>(
    f: &IntegerPolynomial<E>,
    x: usize,
    a: &Integer,
    k: u32,
) -> IntegerPolynomial<E> {
    if a.is_zero() {
        f.coefficient(x, k)
    } else {
        f.shift_var(x, a).coefficient(x, k)
    }
}

/// Compute `(s, t)` with `s * a + t * b = 1 mod p^k` for univariate `a` and `b`
/// that are coprime modulo `p`. The extended Euclidean algorithm is applied modulo `p`
/// and the solution is lifted p-adically, keeping `deg(s) < deg(b)`.
pub fn ee_alift<E: Exponent>(
    a: &IntegerPolynomial<E>,
    b: &IntegerPolynomial<E>,
    p: &Integer,
    k: u32,
) -> (IntegerPolynomial<E>, IntegerPolynomial<E>) {
    let field = FiniteField::new(p.clone());
    let a_p = a.to_finite_field(&field);
    let b_p = b.to_finite_field(&field);

    let (g, s_p, t_p) = a_p.eea_univariate(&b_p);
    assert!(
        g.is_one(),
        "{} and {} are not coprime modulo {}",
        a,
        b,
        p
    );

    let mut s = s_p.to_integer_polynomial();
    let mut t = t_p.to_integer_polynomial();

    let one = a.one();
    let mut modulus = p.clone();
    for _ in 1..k {
        let e = one.clone() - &s * a - &t * b;
        let c = e.div_coeff(&modulus).to_finite_field(&field);

        let (q, sigma) = (&s_p * &c).quot_rem_univariate(&b_p);
        let tau = &(&t_p * &c) + &(&q * &a_p);

        s = s + sigma.to_integer_polynomial().mul_coeff(modulus.clone());
        t = t + tau.to_integer_polynomial().mul_coeff(modulus.clone());

        modulus = &modulus * p;
    }

    (s.symmetric_mod(&modulus), t.symmetric_mod(&modulus))
}

/// Compute `s` with `sum_i s_i * prod_{j != i} a_j = 1 mod p^k` for pairwise
/// coprime univariate polynomials `a`.
pub fn multi_term_ee_alift<E: Exponent>(
    a: &[IntegerPolynomial<E>],
    p: &Integer,
    k: u32,
) -> Vec<IntegerPolynomial<E>> {
    let r = a.len();
    assert!(r >= 2, "At least two polynomials are required");
    let x = main_variable(a);

    // q[j] = a[j + 1] * ... * a[r - 1]
    let mut q = vec![a[r - 1].clone(); r - 1];
    for j in (0..r - 2).rev() {
        q[j] = &a[j + 1] * &q[j + 1];
    }

    let mut beta = a[0].one();
    let mut s = Vec::with_capacity(r);
    for j in 0..r - 1 {
        let sigma = multivariate_diophant(&[q[j].clone(), a[j].clone()], &beta, &[x], &[], 0, p, k);
        let mut sigma = sigma.into_iter();
        if let (Some(b), Some(sj)) = (sigma.next(), sigma.next()) {
            beta = b;
            s.push(sj);
        }
    }
    s.push(beta);

    s
}

/// Solve `sum_i σ_i * prod_{j != i} a_j = x^m mod p^k` for `σ` with `deg(σ_i) < deg(a_i)`,
/// where the `a` are univariate in `x` and pairwise coprime modulo `p`.
pub fn univariate_diophant<E: Exponent>(
    a: &[IntegerPolynomial<E>],
    x: usize,
    m: u32,
    p: &Integer,
    k: u32,
) -> Vec<IntegerPolynomial<E>> {
    let pk = p.pow(k as u64);
    let field = FiniteField::new_non_prime(pk.clone());

    let mut exp = vec![E::zero(); a[0].nvars()];
    exp[x] = E::from_u32(m);
    let xm = a[0].monomial(Integer::one(), exp).to_finite_field(&field);

    if a.len() == 2 {
        let (s, t) = ee_alift(&a[1], &a[0], p, k);

        let a0 = a[0].to_finite_field(&field);
        let a1 = a[1].to_finite_field(&field);

        let (q, sigma0) = (&s.to_finite_field(&field) * &xm).quot_rem_univariate(&a0);
        let sigma1 = &(&t.to_finite_field(&field) * &xm) + &(&q * &a1);

        vec![
            sigma0.to_integer_polynomial(),
            sigma1.to_integer_polynomial(),
        ]
    } else {
        let s = multi_term_ee_alift(a, p, k);

        s.iter()
            .zip(a)
            .map(|(sj, aj)| {
                (&sj.to_finite_field(&field) * &xm)
                    .quot_rem_univariate(&aj.to_finite_field(&field))
                    .1
                    .to_integer_polynomial()
            })
            .collect()
    }
}

/// Solve `sum_i σ_i * prod_{j != i} a_j = c mod (I^(d+1), p^k)` for `σ`, where `vars` lists
/// the main variable followed by the evaluation variables, `values` holds the evaluation
/// point of every evaluation variable, and `I` is the ideal `(x_2 - values[0], ...)`.
pub fn multivariate_diophant<E: Exponent>(
    a: &[IntegerPolynomial<E>],
    c: &IntegerPolynomial<E>,
    vars: &[usize],
    values: &[Integer],
    d: u32,
    p: &Integer,
    k: u32,
) -> Vec<IntegerPolynomial<E>> {
    let pk = p.pow(k as u64);

    let (Some(&xv), Some(av)) = (vars.last(), values.last()) else {
        // univariate case: solve for every term of c
        let x = vars[0];
        let mut sigma = vec![c.zero(); a.len()];
        for t in c {
            let m = t.exponents[x].to_u32();
            let ds = univariate_diophant(a, x, m, p, k);
            for (s, dsj) in sigma.iter_mut().zip(ds) {
                *s = s.clone() + dsj.mul_coeff(t.coefficient.clone());
            }
        }

        return sigma.into_iter().map(|s| s.symmetric_mod(&pk)).collect();
    };

    let mut prod = a[0].one();
    for ai in a {
        prod = prod * ai;
    }
    let b: Vec<_> = a.iter().map(|ai| &prod / ai).collect();

    let a_eval: Vec<_> = a.iter().map(|ai| ai.replace(xv, av).symmetric_mod(&pk)).collect();
    let c_eval = c.replace(xv, av).symmetric_mod(&pk);

    let sub_vars = &vars[..vars.len() - 1];
    let sub_values = &values[..values.len() - 1];

    let mut sigma = multivariate_diophant(&a_eval, &c_eval, sub_vars, sub_values, d, p, k);

    let mut e = c.clone();
    for (s, bi) in sigma.iter().zip(&b) {
        e = e - s * bi;
    }
    e = e.symmetric_mod(&pk);

    let linear = c.variable(xv) - c.constant(av.clone());
    let mut monomial = c.one();
    for m in 1..=d {
        if e.is_zero() {
            break;
        }

        monomial = monomial * &linear;

        let cm = taylor_coefficient(&e, xv, av, m);
        if cm.is_zero() {
            continue;
        }

        let ds = multivariate_diophant(&a_eval, &cm, sub_vars, sub_values, d, p, k);
        for ((s, dsj), bi) in sigma.iter_mut().zip(ds).zip(&b) {
            let dsj = dsj * &monomial;
            e = e - &dsj * bi;
            *s = s.clone() + dsj;
        }
        e = e.symmetric_mod(&pk);
    }

    sigma.into_iter().map(|s| s.symmetric_mod(&pk)).collect()
}
