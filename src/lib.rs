//! Polyfactor factors multivariate polynomials with integer or rational coefficients.
//!
//! The result is the content of the polynomial together with its irreducible factors and
//! their multiplicities, such that their product reproduces the input exactly.
//!
//! Univariate polynomials are factored with Zassenhaus's algorithm: the polynomial is factored
//! over a finite field using Cantor-Zassenhaus, the factors are Hensel lifted to a
//! sufficiently large power of the prime and recombined. Multivariate polynomials are factored
//! with Wang's algorithm, which reduces to the univariate case by evaluating all but one variable,
//! predetermines the leading coefficients of the factors and lifts the univariate factors
//! variable by variable.
//!
//! For example:
//!
//! ```
//! use std::sync::Arc;
//! use polyfactor::{
//!     domains::integer::{Integer, Z},
//!     poly::{factor::Factorize, polynomial::MultivariatePolynomial, Variable},
//! };
//!
//! let vars = Arc::new(vec![Variable::new("x")]);
//! // x^2 - 1
//! let mut p = MultivariatePolynomial::<_, u16>::new(&Z, None, vars);
//! p.append_monomial(Integer::new(1), &[2]);
//! p.append_monomial(Integer::new(-1), &[0]);
//!
//! let (content, factors) = p.factor();
//! assert_eq!(content, Integer::one());
//! assert_eq!(factors.len(), 2);
//! ```

pub mod combinatorics;
pub mod domains;
pub mod poly;
pub mod printer;
pub mod settings;
pub mod utils;

pub use poly::factor::{factor, Factorize};
pub use settings::FactorizationSettings;
