use paredit_syntax::{Ast, NavigatorResult, navigator};

/// Something that maps a cursor position to a target position or range.
pub trait Navigator {
    fn navigate(&self, ast: &Ast, offset: usize) -> NavigatorResult;
}

impl<F> Navigator for F
where
    F: Fn(&Ast, usize) -> NavigatorResult,
{
    fn navigate(&self, ast: &Ast, offset: usize) -> NavigatorResult {
        self(ast, offset)
    }
}

/// The motions that each back a navigate, a yank and a cut command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    RangeForDefun,
    ForwardSexp,
    BackwardSexp,
    ForwardDownSexp,
    BackwardUpSexp,
    CloseList,
}

impl Motion {
    pub const ALL: [Motion; 6] = [
        Motion::RangeForDefun,
        Motion::ForwardSexp,
        Motion::BackwardSexp,
        Motion::ForwardDownSexp,
        Motion::BackwardUpSexp,
        Motion::CloseList,
    ];

    /// Name used in command identifiers.
    pub fn name(self) -> &'static str {
        match self {
            Motion::RangeForDefun => "rangeForDefun",
            Motion::ForwardSexp => "forwardSexp",
            Motion::BackwardSexp => "backwardSexp",
            Motion::ForwardDownSexp => "forwardDownSexp",
            Motion::BackwardUpSexp => "backwardUpSexp",
            Motion::CloseList => "closeList",
        }
    }
}

impl Navigator for Motion {
    fn navigate(&self, ast: &Ast, offset: usize) -> NavigatorResult {
        match self {
            Motion::RangeForDefun => navigator::range_for_defun(ast, offset),
            Motion::ForwardSexp => navigator::forward_sexp(ast, offset),
            Motion::BackwardSexp => navigator::backward_sexp(ast, offset),
            Motion::ForwardDownSexp => navigator::forward_down_sexp(ast, offset),
            Motion::BackwardUpSexp => navigator::backward_up_sexp(ast, offset),
            Motion::CloseList => navigator::close_list(ast, offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paredit_syntax::parse;
    use rstest::rstest;

    #[rstest]
    #[case(Motion::ForwardSexp, 4, NavigatorResult::Collapsed(5))]
    #[case(Motion::BackwardSexp, 8, NavigatorResult::Collapsed(3))]
    #[case(Motion::ForwardDownSexp, 1, NavigatorResult::Collapsed(4))]
    #[case(Motion::BackwardUpSexp, 5, NavigatorResult::Collapsed(3))]
    #[case(Motion::CloseList, 5, NavigatorResult::Collapsed(8))]
    #[case(Motion::RangeForDefun, 5, NavigatorResult::Span(0, 11))]
    fn motions_dispatch_to_navigator(
        #[case] motion: Motion,
        #[case] offset: usize,
        #[case] expected: NavigatorResult,
    ) {
        let ast = parse("(a (b c) d)");
        assert_eq!(motion.navigate(&ast, offset), expected);
    }

    #[test]
    fn closures_are_navigators() {
        let ast = parse("x");
        let fixed = |_: &Ast, _: usize| NavigatorResult::Collapsed(7);
        assert_eq!(fixed.navigate(&ast, 0), NavigatorResult::Collapsed(7));
    }
}
