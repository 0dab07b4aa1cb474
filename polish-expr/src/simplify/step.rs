/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Every operand is a constant, so the operation was replaced by its value.
    ///
    /// `(+ 2 3) = 5`
    FoldConstants,

    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `0-a = -a`
    SubtractFromZero,

    /// `a-0 = a`
    SubtractZero,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `0/a = 0`
    DivideZero,

    /// `a/1 = a`
    DivideOne,

    /// `-0 = 0`
    NegateZero,

    /// `0^a = 0`
    PowerZeroLeft,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^0 = 1`
    PowerZero,

    /// `log(a, 1) = 1`
    ///
    /// The mathematically correct result is `0`; this rule is kept for compatibility with existing
    /// outputs.
    LogOfOne,
}
