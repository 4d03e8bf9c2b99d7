use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Selects between the call stack (recursive) and explicit stack (iterative) form of the
/// depth first maze algorithms.
///
/// Recursion depth is bounded by the number of rooms, so large grids should use `Iterative`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Traversal {
    Iterative,
    Recursive,
}

impl Default for Traversal {
    fn default() -> Traversal {
        Traversal::Iterative
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub struct ParseTraversalError {
    unknown: String,
}

impl fmt::Display for ParseTraversalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown algorithm '{}', expected 'iterative' or 'recursive'", self.unknown)
    }
}

impl Error for ParseTraversalError {}

impl FromStr for Traversal {
    type Err = ParseTraversalError;

    fn from_str(s: &str) -> Result<Traversal, ParseTraversalError> {
        match s {
            "iterative" => Ok(Traversal::Iterative),
            "recursive" => Ok(Traversal::Recursive),
            _ => Err(ParseTraversalError { unknown: s.to_owned() }),
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Traversal::Iterative => f.write_str("iterative"),
            Traversal::Recursive => f.write_str("recursive"),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn parse_known_names() {
        assert_eq!("iterative".parse::<Traversal>(), Ok(Traversal::Iterative));
        assert_eq!("recursive".parse::<Traversal>(), Ok(Traversal::Recursive));
    }

    #[test]
    fn parse_rejects_anything_else() {
        for bad in &["", "Iterative", "RECURSIVE", "bfs", " iterative"] {
            let err = bad.parse::<Traversal>().unwrap_err();
            assert!(err.to_string().contains("unknown algorithm"));
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for t in &[Traversal::Iterative, Traversal::Recursive] {
            assert_eq!(t.to_string().parse::<Traversal>(), Ok(*t));
        }
    }

    #[test]
    fn default_is_iterative() {
        assert_eq!(Traversal::default(), Traversal::Iterative);
    }
}
