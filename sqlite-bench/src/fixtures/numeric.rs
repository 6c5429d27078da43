//! Numeric fixtures: named mathematical constants, computed filler values and
//! the first N primes.

use super::ConstantFormula;
use std::f64::consts;

/// A constant with a name and a human description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedConstant {
    pub name: &'static str,
    pub value: f64,
    pub description: &'static str,
}

pub const NAMED_CONSTANTS: [NamedConstant; 19] = [
    NamedConstant { name: "PI", value: consts::PI, description: "Ratio of circumference to diameter" },
    NamedConstant { name: "E", value: consts::E, description: "Euler's number" },
    NamedConstant { name: "SQRT_2", value: consts::SQRT_2, description: "Square root of 2" },
    NamedConstant { name: "SQRT_3", value: 1.732_050_807_568_877_2, description: "Square root of 3" },
    NamedConstant { name: "SQRT_5", value: 2.236_067_977_499_79, description: "Square root of 5" },
    NamedConstant { name: "GOLDEN_RATIO", value: 1.618_033_988_749_895, description: "Golden ratio" },
    NamedConstant { name: "EULER_MASCHERONI", value: 0.577_215_664_901_532_9, description: "Euler-Mascheroni constant" },
    NamedConstant { name: "APERY", value: 1.202_056_903_159_594_2, description: "Apery's constant" },
    NamedConstant { name: "CATALAN", value: 0.915_965_594_177_219, description: "Catalan's constant" },
    NamedConstant { name: "SQRT_2PI", value: 2.506_628_274_631_000_2, description: "Square root of 2*PI" },
    NamedConstant { name: "LN_2", value: consts::LN_2, description: "Natural logarithm of 2" },
    NamedConstant { name: "LN_3", value: 1.098_612_288_668_109_6, description: "Natural logarithm of 3" },
    NamedConstant { name: "LN_4", value: 1.386_294_361_119_890_6, description: "Natural logarithm of 4" },
    NamedConstant { name: "LN_5", value: 1.609_437_912_434_100_3, description: "Natural logarithm of 5" },
    NamedConstant { name: "LN_6", value: 1.791_759_469_228_055, description: "Natural logarithm of 6" },
    NamedConstant { name: "LN_7", value: 1.945_910_149_055_313_3, description: "Natural logarithm of 7" },
    NamedConstant { name: "LN_8", value: 2.079_441_541_679_835_7, description: "Natural logarithm of 8" },
    NamedConstant { name: "LN_9", value: 2.197_224_577_336_219_6, description: "Natural logarithm of 9" },
    NamedConstant { name: "LN_10", value: consts::LN_10, description: "Natural logarithm of 10" },
];

impl ConstantFormula {
    /// How many leading values come from [`NAMED_CONSTANTS`].
    pub const fn seed_count(self) -> usize {
        match self {
            ConstantFormula::DampedTrig => 10,
            ConstantFormula::TrigPlusRoot => 19,
        }
    }

    pub fn value_at(self, i: usize) -> f64 {
        let x = i as f64;
        match self {
            ConstantFormula::DampedTrig => x.sin() * (x * 0.5).cos() + (x + 1.0).ln() * x.sqrt(),
            ConstantFormula::TrigPlusRoot => x.sin() * x.cos() + x.sqrt(),
        }
    }
}

pub fn generate_constants(count: usize, formula: ConstantFormula) -> Vec<f64> {
    let seeds = formula.seed_count().min(count);
    let mut values: Vec<f64> = NAMED_CONSTANTS[..seeds].iter().map(|c| c.value).collect();
    values.extend((seeds..count).map(|i| formula.value_at(i)));
    values
}

/// First `count` primes, each candidate tested against the primes found so far.
pub fn primes_by_trial_division(count: usize) -> Vec<u32> {
    let mut primes: Vec<u32> = Vec::with_capacity(count);
    if count == 0 {
        return primes;
    }
    primes.push(2);

    let mut candidate: u32 = 3;
    while primes.len() < count {
        let is_prime = primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0);
        if is_prime {
            primes.push(candidate);
        }
        candidate += 2;
    }
    primes
}

/// First `count` primes via a sieve of Eratosthenes sized from the prime
/// number theorem bound `n (ln n + ln ln n)`.
pub fn primes_by_sieve(count: usize) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }

    let limit = sieve_limit(count);
    let mut is_prime = vec![true; limit + 1];
    is_prime[0] = false;
    if limit >= 1 {
        is_prime[1] = false;
    }

    let mut i = 2;
    while i * i <= limit {
        if is_prime[i] {
            let mut j = i * i;
            while j <= limit {
                is_prime[j] = false;
                j += i;
            }
        }
        i += 1;
    }

    is_prime
        .iter()
        .enumerate()
        .filter(|&(_, &p)| p)
        .map(|(n, _)| n as u32)
        .take(count)
        .collect()
}

fn sieve_limit(count: usize) -> usize {
    if count < 6 {
        return 15;
    }
    let n = count as f64;
    (n * (n.ln() + n.ln().ln())).ceil() as usize
}
