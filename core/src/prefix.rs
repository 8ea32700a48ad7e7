//! Quantifier prefixes and their canonical form.
use std::{fmt, str::FromStr};

use zwohash::HashSet;

use crate::Error;

/// Kind of a quantifier block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Quantifier {
    /// Existential quantification.
    Exists,
    /// Universal quantification.
    Forall,
}

impl Quantifier {
    /// Returns the dual quantifier.
    pub fn dual(self) -> Self {
        match self {
            Quantifier::Exists => Quantifier::Forall,
            Quantifier::Forall => Quantifier::Exists,
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Quantifier::Exists => "e",
            Quantifier::Forall => "a",
        })
    }
}

impl FromStr for Quantifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "e" | "exists" => Ok(Quantifier::Exists),
            "a" | "forall" => Ok(Quantifier::Forall),
            _ => Err(format!("unknown quantifier `{s}`, expected `e` or `a`")),
        }
    }
}

/// A quantifier together with the variables it binds.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QuantifierBlock {
    /// The quantifier kind.
    pub quantifier: Quantifier,
    /// Bound variables in insertion order.
    pub variables: Vec<String>,
}

impl QuantifierBlock {
    /// Creates a block from any displayable variable identifiers.
    pub fn new<V: fmt::Display>(
        quantifier: Quantifier,
        variables: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            quantifier,
            variables: variables.into_iter().map(|var| var.to_string()).collect(),
        }
    }
}

/// Parses `e:x,y` or `a:z`. An empty variable list (`e:`) is a valid, empty block.
impl FromStr for QuantifierBlock {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((quantifier, variables)) = s.split_once(':') else {
            return Err(format!("expected `QUANTIFIER:VAR,...`, found `{s}`"));
        };
        let quantifier = quantifier.trim().parse()?;
        let variables = variables
            .split(',')
            .map(str::trim)
            .filter(|var| !var.is_empty())
            .map(str::to_owned)
            .collect();
        Ok(Self {
            quantifier,
            variables,
        })
    }
}

impl fmt::Display for QuantifierBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.quantifier, self.variables.join(","))
    }
}

/// A canonical quantifier prefix, outermost block first.
///
/// No block is empty, no two adjacent blocks share a quantifier and no variable occurs twice.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct QuantifierPrefix {
    blocks: Vec<QuantifierBlock>,
}

impl QuantifierPrefix {
    /// Brings a sequence of blocks into canonical form.
    ///
    /// Empty blocks are dropped and a block is merged into the previously kept block when both
    /// have the same quantifier. Variables are identified by their `Display` output.
    pub fn normalize<B, V>(blocks: impl IntoIterator<Item = B>) -> Result<Self, Error>
    where
        B: Into<(Quantifier, V)>,
        V: IntoIterator,
        V::Item: fmt::Display,
    {
        let mut seen: HashSet<String> = Default::default();
        let mut normalized: Vec<QuantifierBlock> = vec![];

        for block in blocks {
            let (quantifier, variables) = block.into();
            let variables: Vec<String> = variables.into_iter().map(|var| var.to_string()).collect();

            for var in &variables {
                if !seen.insert(var.clone()) {
                    return Err(Error::DuplicateVariable(var.clone()));
                }
            }

            if variables.is_empty() {
                continue;
            }

            match normalized.last_mut() {
                Some(last) if last.quantifier == quantifier => last.variables.extend(variables),
                _ => normalized.push(QuantifierBlock {
                    quantifier,
                    variables,
                }),
            }
        }

        Ok(Self { blocks: normalized })
    }

    /// The canonical blocks, outermost first.
    pub fn blocks(&self) -> &[QuantifierBlock] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if no variable is bound.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over all bound variables, outermost block first.
    pub fn variables(&self) -> impl Iterator<Item = &str> + '_ {
        self.blocks
            .iter()
            .flat_map(|block| block.variables.iter().map(String::as_str))
    }
}

impl From<QuantifierBlock> for (Quantifier, Vec<String>) {
    fn from(block: QuantifierBlock) -> Self {
        (block.quantifier, block.variables)
    }
}

impl<'a> From<&'a QuantifierBlock> for (Quantifier, &'a [String]) {
    fn from(block: &'a QuantifierBlock) -> Self {
        (block.quantifier, &block.variables)
    }
}

impl fmt::Display for QuantifierPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, block) in self.blocks.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    use super::*;
    use Quantifier::{Exists, Forall};

    fn random_blocks(rng: &mut SmallRng) -> Vec<(Quantifier, Vec<String>)> {
        let mut next_var = 0;
        (0..rng.gen_range(0..8))
            .map(|_| {
                let quantifier = if rng.gen() { Exists } else { Forall };
                let variables = (0..rng.gen_range(0..4))
                    .map(|_| {
                        next_var += 1;
                        format!("v{next_var}")
                    })
                    .collect();
                (quantifier, variables)
            })
            .collect()
    }

    #[test]
    fn merges_and_drops() {
        let prefix = QuantifierPrefix::normalize([
            (Exists, vec!["x"]),
            (Exists, vec!["y"]),
            (Forall, vec![]),
            (Forall, vec!["z"]),
        ])
        .unwrap();

        assert_eq!(
            prefix.blocks(),
            [
                QuantifierBlock::new(Exists, ["x", "y"]),
                QuantifierBlock::new(Forall, ["z"]),
            ]
        );
    }

    #[test]
    fn empty_block_between_equal_kinds_merges() {
        let prefix =
            QuantifierPrefix::normalize([(Exists, vec![1]), (Forall, vec![]), (Exists, vec![2])])
                .unwrap();
        assert_eq!(prefix.blocks(), [QuantifierBlock::new(Exists, ["1", "2"])]);
    }

    #[test]
    fn duplicates_are_rejected() {
        let result = QuantifierPrefix::normalize([(Exists, vec!["x", "y"]), (Forall, vec!["x"])]);
        assert!(matches!(result, Err(Error::DuplicateVariable(var)) if var == "x"));

        let result = QuantifierPrefix::normalize([(Exists, vec!["y", "y"])]);
        assert!(matches!(result, Err(Error::DuplicateVariable(var)) if var == "y"));
    }

    #[test]
    fn random_prefixes_are_canonical() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..500 {
            let blocks = random_blocks(&mut rng);
            let prefix = QuantifierPrefix::normalize(blocks.clone()).unwrap();

            for block in prefix.blocks() {
                assert!(!block.variables.is_empty());
            }
            for pair in prefix.blocks().windows(2) {
                assert_ne!(pair[0].quantifier, pair[1].quantifier);
            }

            let input_vars: Vec<&str> = blocks
                .iter()
                .flat_map(|(_, vars)| vars.iter().map(String::as_str))
                .collect();
            assert_eq!(prefix.variables().collect::<Vec<_>>(), input_vars);

            for var in prefix.variables() {
                let quantifier = blocks
                    .iter()
                    .find(|(_, vars)| vars.iter().any(|v| v == var))
                    .unwrap()
                    .0;
                let block = prefix
                    .blocks()
                    .iter()
                    .find(|block| block.variables.iter().any(|v| v == var))
                    .unwrap();
                assert_eq!(block.quantifier, quantifier);
            }

            let again = QuantifierPrefix::normalize(prefix.blocks()).unwrap();
            assert_eq!(again, prefix);
        }
    }

    #[test]
    fn block_syntax() {
        let block: QuantifierBlock = "e:x, y".parse().unwrap();
        assert_eq!(block, QuantifierBlock::new(Exists, ["x", "y"]));
        assert_eq!(block.to_string(), "e:x,y");

        let block: QuantifierBlock = "forall:".parse().unwrap();
        assert_eq!(block, QuantifierBlock::new(Forall, Vec::<String>::new()));

        assert!("x,y".parse::<QuantifierBlock>().is_err());
        assert!("some:x".parse::<QuantifierBlock>().is_err());
    }

    #[test]
    fn display() {
        let prefix =
            QuantifierPrefix::normalize([(Forall, vec!["a", "b"]), (Exists, vec!["c"])]).unwrap();
        assert_eq!(prefix.to_string(), "a:a,b e:c");
        assert_eq!(Forall.dual(), Exists);
    }
}
