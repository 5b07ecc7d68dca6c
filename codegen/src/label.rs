//! Labels that mark branch targets in the instruction stream.
use core::fmt;

/// A branch target. Rendered as `L<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(u32);

impl Label {
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Creates labels that are unique within one translation.
///
/// Numbering starts at 1 and labels are never reused until the allocator
/// is reset.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    last: u32,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> Label {
        self.last += 1;
        Label(self.last)
    }

    pub fn reset(&mut self) {
        self.last = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_when_new_then_starts_at_one() {
        let mut labels = LabelAllocator::new();
        assert_eq!(labels.next().to_string(), "L1");
        assert_eq!(labels.next().to_string(), "L2");
    }

    #[test]
    fn next_when_many_then_all_distinct() {
        let mut labels = LabelAllocator::new();
        let created: Vec<Label> = (0..100).map(|_| labels.next()).collect();

        for (i, label) in created.iter().enumerate() {
            assert!(!created[i + 1..].contains(label));
        }
    }

    #[test]
    fn reset_then_starts_at_one() {
        let mut labels = LabelAllocator::new();
        labels.next();
        labels.next();

        labels.reset();

        assert_eq!(labels.next().number(), 1);
    }
}
