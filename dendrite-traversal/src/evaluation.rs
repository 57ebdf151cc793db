/// Outcome of evaluating one branch: whether the path it represents is
/// part of the result, and whether its children are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    IncludeAndContinue,
    IncludeAndPrune,
    ExcludeAndContinue,
    ExcludeAndPrune,
}

impl Evaluation {
    /// Build an evaluation from its two component decisions.
    pub fn of(includes: bool, continues: bool) -> Self {
        match (includes, continues) {
            (true, true) => Evaluation::IncludeAndContinue,
            (true, false) => Evaluation::IncludeAndPrune,
            (false, true) => Evaluation::ExcludeAndContinue,
            (false, false) => Evaluation::ExcludeAndPrune,
        }
    }

    /// Whether the branch is part of the traversal result.
    pub fn includes(self) -> bool {
        matches!(
            self,
            Evaluation::IncludeAndContinue | Evaluation::IncludeAndPrune
        )
    }

    /// Whether the branch's children are expanded.
    pub fn continues(self) -> bool {
        matches!(
            self,
            Evaluation::IncludeAndContinue | Evaluation::ExcludeAndContinue
        )
    }

    /// Conjunction of two evaluations: include only if both include,
    /// continue only if both continue.
    pub fn and(self, other: Evaluation) -> Evaluation {
        Evaluation::of(
            self.includes() && other.includes(),
            self.continues() && other.continues(),
        )
    }
}
