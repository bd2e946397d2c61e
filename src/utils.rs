pub fn gcd_unsigned(mut a: u64, mut b: u64) -> u64 {
    let mut c;
    while a != 0 {
        c = a;
        a = b % a;
        b = c;
    }
    b
}

pub fn gcd_signed(a: i64, b: i64) -> u64 {
    gcd_unsigned(a.unsigned_abs(), b.unsigned_abs())
}

/// Compute `(a * b) % m` without overflow.
#[inline]
pub fn mul_mod_u64(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

/// Compute `b^e % m` using binary exponentiation.
pub fn pow_mod_u64(mut b: u64, mut e: u64, m: u64) -> u64 {
    let mut r = 1 % m;
    b %= m;
    while e > 0 {
        if e & 1 == 1 {
            r = mul_mod_u64(r, b, m);
        }
        b = mul_mod_u64(b, b, m);
        e >>= 1;
    }
    r
}

#[cfg(test)]
mod test {
    use super::{gcd_signed, gcd_unsigned, pow_mod_u64};

    #[test]
    fn gcd() {
        assert_eq!(gcd_unsigned(12, 18), 6);
        assert_eq!(gcd_signed(-12, 18), 6);
        assert_eq!(gcd_signed(0, -7), 7);
        assert_eq!(gcd_signed(i64::MIN, i64::MIN), 1 << 63);
    }

    #[test]
    fn modular_power() {
        assert_eq!(pow_mod_u64(3, 4, 7), 4);
        assert_eq!(pow_mod_u64(2, 64, u64::MAX), 1);
        assert_eq!(pow_mod_u64(5, 0, 1), 0);
    }
}
