use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("invalid seed '{0}': expected a decimal or 0x-prefixed integer")]
    Invalid(String),
    #[error("no seeds given")]
    Empty,
}

fn parse_seed(token: &str) -> Result<u64, SeedError> {
    let parsed = token.strip_prefix("0x").map_or_else(
        || token.parse::<u64>(),
        |hex| u64::from_str_radix(hex, 16),
    );
    parsed.map_err(|_| SeedError::Invalid(token.to_string()))
}

/// Resolve CLI seed tokens, keeping first occurrences in order.
pub fn resolve_seeds(tokens: &[String]) -> Result<Vec<u64>, SeedError> {
    let mut seeds = Vec::with_capacity(tokens.len());
    for token in tokens {
        let seed = parse_seed(token)?;
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    if seeds.is_empty() {
        return Err(SeedError::Empty);
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn decimal_and_hex_seeds_resolve() {
        let seeds = resolve_seeds(&tokens(&["1337", "0xff", "1337"])).unwrap();
        assert_eq!(seeds, vec![1337, 255]);
    }

    #[test]
    fn bad_tokens_are_reported() {
        assert_eq!(
            resolve_seeds(&tokens(&["abc"])),
            Err(SeedError::Invalid("abc".into()))
        );
        assert_eq!(resolve_seeds(&[]), Err(SeedError::Empty));
    }
}
