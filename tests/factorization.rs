use std::sync::Arc;

use polyfactor::{
    domains::{
        integer::{Integer, IntegerRing, Z},
        rational::{Rational, RationalField, Q},
    },
    factor,
    poly::{polynomial::MultivariatePolynomial, Variable},
    FactorizationSettings, Factorize,
};

type IntPoly = MultivariatePolynomial<IntegerRing, u16>;

fn vars(names: &[&str]) -> Arc<Vec<Variable>> {
    Arc::new(names.iter().map(|n| Variable::new(n)).collect())
}

fn poly<const N: usize>(v: &Arc<Vec<Variable>>, terms: &[(i64, [u16; N])]) -> IntPoly {
    let mut p = MultivariatePolynomial::new(&Z, None, v.clone());
    for (c, e) in terms {
        p.append_monomial(Integer::new(*c), e);
    }
    p
}

fn expand(content: &Integer, factors: &[(IntPoly, usize)], like: &IntPoly) -> IntPoly {
    let mut r = like.constant(content.clone());
    for (f, e) in factors {
        r = &r * &f.pow(*e);
    }
    r
}

/// Check that the factorization reproduces the input and that every factor is irreducible.
fn check_factorization(p: &IntPoly) -> (Integer, Vec<(IntPoly, usize)>) {
    let (c, f) = p.factor();
    assert_eq!(&expand(&c, &f, p), p);

    for (g, _) in &f {
        let (gc, gf) = g.factor();
        assert!(gc.is_one(), "{} has content {}", g, gc);
        assert_eq!(gf, vec![(g.clone(), 1)]);
    }

    (c, f)
}

#[test]
fn difference_of_squares() {
    let v = vars(&["x"]);
    let p = poly(&v, &[(1, [2]), (-1, [0])]);

    let (c, f) = factor(&p);
    assert_eq!(c, Integer::one());
    assert_eq!(
        f,
        vec![
            (poly(&v, &[(1, [1]), (-1, [0])]), 1),
            (poly(&v, &[(1, [1]), (1, [0])]), 1)
        ]
    );
}

#[test]
fn trivial_inputs() {
    let v = vars(&["x", "y"]);

    let zero = poly::<2>(&v, &[]);
    assert_eq!(zero.factor(), (Integer::zero(), vec![]));

    let constant = poly(&v, &[(-12, [0, 0])]);
    assert_eq!(constant.factor(), (Integer::new(-12), vec![]));

    let linear = poly(&v, &[(3, [1, 0]), (-2, [0, 1]), (1, [0, 0])]);
    assert_eq!(linear.factor(), (Integer::one(), vec![(linear.clone(), 1)]));
    assert!(linear.is_irreducible());
    assert!(!constant.is_irreducible());
}

#[test]
fn univariate_with_multiplicities() {
    let v = vars(&["x"]);
    // 6 (x - 2)^3 (x^2 + x + 1)^2 (5x^3 - 7)
    let a = poly(&v, &[(1, [1]), (-2, [0])]);
    let b = poly(&v, &[(1, [2]), (1, [1]), (1, [0])]);
    let d = poly(&v, &[(5, [3]), (-7, [0])]);
    let p = (&(&a.pow(3) * &b.pow(2)) * &d).mul_coeff(Integer::new(6));

    let (c, f) = check_factorization(&p);
    assert_eq!(c, Integer::new(6));
    assert_eq!(f.len(), 3);
    assert!(f.contains(&(a, 3)));
    assert!(f.contains(&(b, 2)));
    assert!(f.contains(&(d, 1)));
}

#[test]
fn swinnerton_dyer() {
    // x^4 - 10x^2 + 1 is irreducible, but splits into linear or quadratic factors modulo every prime
    let v = vars(&["x"]);
    let p = poly(&v, &[(1, [4]), (-10, [2]), (1, [0])]);
    assert_eq!(p.factor(), (Integer::one(), vec![(p.clone(), 1)]));
}

#[test]
fn cyclotomic() {
    // x^6 - 1 = (x - 1)(x + 1)(x^2 + x + 1)(x^2 - x + 1)
    let v = vars(&["x"]);
    let p = poly(&v, &[(1, [6]), (-1, [0])]);
    let (_, f) = check_factorization(&p);
    assert_eq!(f.len(), 4);
    assert!(f.contains(&(poly(&v, &[(1, [2]), (-1, [1]), (1, [0])]), 1)));
}

#[test]
fn bivariate() {
    let v = vars(&["x", "y"]);
    // (x^2 y + 3x - 1)(2x y^2 - y + 5)(x - y)^2
    let a = poly(&v, &[(1, [2, 1]), (3, [1, 0]), (-1, [0, 0])]);
    let b = poly(&v, &[(2, [1, 2]), (-1, [0, 1]), (5, [0, 0])]);
    let d = poly(&v, &[(1, [1, 0]), (-1, [0, 1])]);
    let p = &(&a * &b) * &d.pow(2);

    let (c, f) = check_factorization(&p);
    assert!(c.is_one());
    assert_eq!(f.len(), 3);
    assert!(f.contains(&(a, 1)));
    assert!(f.contains(&(b, 1)));
    assert!(f.contains(&(d, 2)));
}

#[test]
fn content_in_other_variables() {
    let v = vars(&["x", "y", "z"]);
    // (y + 1)^2 (z - 2)(x y + z)
    let a = poly(&v, &[(1, [0, 1, 0]), (1, [0, 0, 0])]);
    let b = poly(&v, &[(1, [0, 0, 1]), (-2, [0, 0, 0])]);
    let d = poly(&v, &[(1, [1, 1, 0]), (1, [0, 0, 1])]);
    let p = &(&a.pow(2) * &b) * &d;

    let (_, f) = check_factorization(&p);
    assert_eq!(f.len(), 3);
    assert!(f.contains(&(a, 2)));
    assert!(f.contains(&(b, 1)));
    assert!(f.contains(&(d, 1)));
}

#[test]
fn trivariate_squares() {
    let v = vars(&["x", "y", "z"]);
    // x^2 y^2 z^2 - 9
    let p = poly(&v, &[(1, [2, 2, 2]), (-9, [0, 0, 0])]);

    let (c, f) = check_factorization(&p);
    assert!(c.is_one());
    assert_eq!(f.len(), 2);
    assert!(f.contains(&(poly(&v, &[(1, [1, 1, 1]), (-3, [0, 0, 0])]), 1)));
    assert!(f.contains(&(poly(&v, &[(1, [1, 1, 1]), (3, [0, 0, 0])]), 1)));
}

#[test]
fn irreducible_multivariate() {
    let v = vars(&["x", "y", "z"]);
    // x^3 + y^3 + z^3 - 3
    let p = poly(&v, &[(1, [3, 0, 0]), (1, [0, 3, 0]), (1, [0, 0, 3]), (-3, [0, 0, 0])]);
    assert!(p.is_irreducible());
}

#[test]
fn negative_leading_coefficient() {
    let v = vars(&["x", "y"]);
    // -2 (x + y)(x - y)
    let p = poly(&v, &[(-2, [2, 0]), (2, [0, 2])]);

    let (c, f) = check_factorization(&p);
    assert_eq!(c, Integer::new(-2));
    assert_eq!(f.len(), 2);
    for (g, e) in &f {
        assert_eq!(*e, 1);
        assert!(!g.lcoeff().is_negative());
    }
}

#[test]
fn deterministic() {
    let v = vars(&["x", "y"]);
    // (x^3 + x y + 2)(x^2 - y^3 + 1)(x + 2y - 3)
    let a = poly(&v, &[(1, [3, 0]), (1, [1, 1]), (2, [0, 0])]);
    let b = poly(&v, &[(1, [2, 0]), (-1, [0, 3]), (1, [0, 0])]);
    let d = poly(&v, &[(1, [1, 0]), (2, [0, 1]), (-3, [0, 0])]);
    let p = &(&a * &b) * &d;

    let settings = FactorizationSettings::default().with_seed(1234);
    let first = p.factor_with_settings(&settings);
    let second = p.factor_with_settings(&settings);
    assert_eq!(first, second);
    assert_eq!(&expand(&first.0, &first.1, &p), &p);

    let other = p.factor_with_settings(&FactorizationSettings::default().with_seed(99));
    assert_eq!(first, other);
}

#[test]
fn square_free_factorization() {
    let v = vars(&["x", "y"]);
    // 3 (x + 1)^2 (x y - 1)^3
    let a = poly(&v, &[(1, [1, 0]), (1, [0, 0])]);
    let b = poly(&v, &[(1, [1, 1]), (-1, [0, 0])]);
    let p = (&a.pow(2) * &b.pow(3)).mul_coeff(Integer::new(3));

    let sqf = p.square_free_factorization();
    assert!(sqf.contains(&(a, 2)));
    assert!(sqf.contains(&(b, 3)));
    assert!(sqf.contains(&(p.constant(Integer::new(3)), 1)));
}

#[test]
fn rationals() {
    let v = vars(&["x", "y"]);
    let mut p = MultivariatePolynomial::<RationalField, u16>::new(&Q, None, v);
    // 1/3 x^2 - 4/3 y^2 = 1/3 (x - 2y)(x + 2y)
    p.append_monomial(Rational::new(1, 3), &[2, 0]);
    p.append_monomial(Rational::new(-4, 3), &[0, 2]);

    let (c, f) = p.factor();
    assert_eq!(c, Rational::new(1, 3));
    assert_eq!(f.len(), 2);

    let mut r = p.constant(c);
    for (g, e) in &f {
        assert!(g.lcoeff().is_one());
        r = &r * &g.pow(*e);
    }
    assert_eq!(r, p);
}
