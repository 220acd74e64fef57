use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordered mark/space durations in microseconds.
///
/// Even indices are marks and odd indices are spaces. The train owns its
/// buffer and carries its own length.
///
/// # Examples
/// ```
/// use rfpulse_core::PulseTrain;
///
/// let train: PulseTrain = "950 1425, 950 2850".parse().unwrap();
/// assert_eq!(train.len(), 4);
/// assert_eq!(train.to_string(), "950 1425 950 2850");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PulseTrain(Vec<u32>);

impl PulseTrain {
    pub fn new(pulses: Vec<u32>) -> Self {
        Self(pulses)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }

    /// Copy of the train without its first `count` pulses.
    ///
    /// Receivers that split a leading header mark off into the previous
    /// stream see exactly this form of a transmitted frame.
    pub fn skip_leading(&self, count: usize) -> PulseTrain {
        PulseTrain(self.0.iter().skip(count).copied().collect())
    }

    /// Total airtime of the train in microseconds.
    pub fn duration_us(&self) -> u64 {
        self.0.iter().map(|&pulse| u64::from(pulse)).sum()
    }
}

impl From<Vec<u32>> for PulseTrain {
    fn from(pulses: Vec<u32>) -> Self {
        Self(pulses)
    }
}

impl AsRef<[u32]> for PulseTrain {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for PulseTrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for pulse in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{pulse}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PulseParseError {
    #[error("empty pulse train")]
    Empty,
    #[error("invalid duration '{token}' at position {position}")]
    InvalidDuration { token: String, position: usize },
}

impl FromStr for PulseTrain {
    type Err = PulseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pulses = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .enumerate()
            .map(|(position, token)| {
                token
                    .parse::<u32>()
                    .map_err(|_| PulseParseError::InvalidDuration {
                        token: token.to_string(),
                        position,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if pulses.is_empty() {
            return Err(PulseParseError::Empty);
        }
        Ok(Self(pulses))
    }
}

#[cfg(test)]
mod tests {
    use super::{PulseParseError, PulseTrain};

    #[test]
    fn parse_mixed_separators() {
        let train: PulseTrain = " 1,2\t3\n4 ".parse().unwrap();
        assert_eq!(train.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "10 x 30".parse::<PulseTrain>().unwrap_err();
        assert_eq!(
            err,
            PulseParseError::InvalidDuration {
                token: "x".to_string(),
                position: 1,
            }
        );
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(" , ".parse::<PulseTrain>(), Err(PulseParseError::Empty));
    }

    #[test]
    fn skip_leading_drops_prefix() {
        let train = PulseTrain::new(vec![5, 6, 7]);
        assert_eq!(train.skip_leading(1).as_slice(), &[6, 7]);
        assert!(train.skip_leading(4).is_empty());
    }

    #[test]
    fn serializes_as_plain_array() {
        let train = PulseTrain::new(vec![1, 2]);
        assert_eq!(serde_json::to_string(&train).unwrap(), "[1,2]");
        assert_eq!(train.duration_us(), 3);
    }
}
