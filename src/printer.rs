use std::fmt::{self, Write};

use crate::{
    domains::Ring,
    poly::{polynomial::MultivariatePolynomial, Exponent},
};

/// Options for printing a polynomial.
#[derive(Debug, Copy, Clone)]
pub struct PrintOptions {
    /// Print the terms with the highest monomial first.
    pub terms_descending: bool,
    /// Print `*` between a coefficient and the variables.
    pub explicit_multiplication: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            terms_descending: true,
            explicit_multiplication: true,
        }
    }
}

pub struct PolynomialPrinter<'a, F: Ring, E: Exponent> {
    pub poly: &'a MultivariatePolynomial<F, E>,
    pub opts: PrintOptions,
}

impl<'a, F: Ring, E: Exponent> PolynomialPrinter<'a, F, E> {
    pub fn new(poly: &'a MultivariatePolynomial<F, E>) -> PolynomialPrinter<'a, F, E> {
        PolynomialPrinter {
            poly,
            opts: PrintOptions::default(),
        }
    }

    pub fn new_with_options(
        poly: &'a MultivariatePolynomial<F, E>,
        opts: PrintOptions,
    ) -> PolynomialPrinter<'a, F, E> {
        PolynomialPrinter { poly, opts }
    }

    fn fmt_term(&self, f: &mut fmt::Formatter, index: usize, first: bool) -> fmt::Result {
        let coeff = &self.poly.coefficients[index];
        let exponents = self.poly.exponents(index);
        let is_constant = exponents.iter().all(|e| e.is_zero());

        let mut c = coeff.to_string();
        let negative = c.starts_with('-');
        if negative {
            c.remove(0);
        }

        if negative {
            f.write_char('-')?;
        } else if !first {
            f.write_char('+')?;
        }

        let has_coeff = is_constant || c != "1";
        if has_coeff {
            if c.contains(['+', '-']) {
                write!(f, "({})", c)?;
            } else {
                f.write_str(&c)?;
            }
        }

        let mut first_var = true;
        for (v, e) in self.poly.variables.iter().zip(exponents) {
            if e.is_zero() {
                continue;
            }

            if has_coeff || !first_var {
                if self.opts.explicit_multiplication {
                    f.write_char('*')?;
                } else {
                    f.write_char(' ')?;
                }
            }
            first_var = false;

            if e.to_u32() == 1 {
                write!(f, "{}", v)?;
            } else {
                write!(f, "{}^{}", v, e)?;
            }
        }

        Ok(())
    }
}

impl<'a, F: Ring, E: Exponent> fmt::Display for PolynomialPrinter<'a, F, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.poly.is_zero() {
            return f.write_char('0');
        }

        let n = self.poly.nterms();
        for i in 0..n {
            let index = if self.opts.terms_descending {
                n - i - 1
            } else {
                i
            };
            self.fmt_term(f, index, i == 0)?;
        }

        Ok(())
    }
}
