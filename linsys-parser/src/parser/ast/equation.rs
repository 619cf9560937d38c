use crate::{
    parser::{
        ast::literal::{Literal, LitSym},
        error::{kind, Error},
        token::op::{Relation, UnaryOp, UnaryOpKind},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The written coefficient of a term, such as the `3/2` in `3/2y`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoefficientExpr {
    /// The numerator of the coefficient.
    pub numerator: Literal,

    /// The denominator of the coefficient, if it was written as a fraction.
    pub denominator: Option<Literal>,

    /// The region of the source code that this coefficient was parsed from.
    pub span: Range<usize>,
}

impl Parse for CoefficientExpr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let numerator = input.try_parse::<Literal>()?;
        let denominator = if input.peek_kind() == Some(TokenKind::Div) {
            input.expect(&[TokenKind::Div])?;
            Some(input.try_parse::<Literal>()?)
        } else {
            None
        };

        let end = denominator.as_ref().map_or(numerator.span().end, |d| d.span().end);
        Ok(Self {
            span: numerator.span().start..end,
            numerator,
            denominator,
        })
    }
}

impl fmt::Display for CoefficientExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.numerator)?;
        if let Some(denominator) = &self.denominator {
            write!(f, "/{}", denominator)?;
        }
        Ok(())
    }
}

/// A single term of one side of an equation, such as `2x`, `- 3/2 * y` or `12`.
///
/// A term has at least a coefficient or a variable. A term without a variable is a constant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TermExpr {
    /// The sign written before the term. Only the first term of a side may omit it.
    pub sign: Option<UnaryOp>,

    /// The written coefficient. A missing coefficient means a coefficient of one.
    pub coefficient: Option<CoefficientExpr>,

    /// The variable of the term.
    pub variable: Option<LitSym>,

    /// The region of the source code that this term was parsed from.
    pub span: Range<usize>,
}

impl TermExpr {
    /// Returns true if the term was written with a minus sign.
    pub fn is_negated(&self) -> bool {
        matches!(self.sign, Some(UnaryOp { kind: UnaryOpKind::Neg, .. }))
    }

    /// Parses the body of a term, after its sign (if any) has been parsed.
    fn parse_body(input: &mut Parser, sign: Option<UnaryOp>) -> Result<Self, Error> {
        let coefficient = match input.peek_kind() {
            Some(TokenKind::Int | TokenKind::Decimal) => Some(input.try_parse::<CoefficientExpr>()?),
            _ => None,
        };

        let variable = match input.peek_kind() {
            Some(TokenKind::Mul) if coefficient.is_some() => {
                input.expect(&[TokenKind::Mul])?;
                if input.peek_kind() != Some(TokenKind::Name) {
                    return Err(Error::new(vec![input.peek_span()], kind::MissingVariable));
                }
                Some(input.try_parse::<LitSym>()?)
            },
            Some(TokenKind::Name) => Some(input.try_parse::<LitSym>()?),
            _ => None,
        };

        let start = sign.as_ref().map(|s| s.span.start)
            .or_else(|| coefficient.as_ref().map(|c| c.span.start))
            .or_else(|| variable.as_ref().map(|v| v.span.start));
        let end = variable.as_ref().map(|v| v.span.end)
            .or_else(|| coefficient.as_ref().map(|c| c.span.end));

        match (start, end) {
            (Some(start), Some(end)) => Ok(Self {
                sign,
                coefficient,
                variable,
                span: start..end,
            }),
            _ => Err(Error::new(vec![input.peek_span()], kind::ExpectedTerm)),
        }
    }

    /// Parses a term that must start with a `+` or `-` sign.
    fn parse_signed(input: &mut Parser) -> Result<Self, Error> {
        let sign = input.try_parse::<UnaryOp>()?;
        Self::parse_body(input, Some(sign))
    }
}

impl Parse for TermExpr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let sign = match input.peek_kind() {
            Some(TokenKind::Add | TokenKind::Sub) => Some(input.try_parse::<UnaryOp>()?),
            _ => None,
        };
        Self::parse_body(input, sign)
    }
}

impl fmt::Display for TermExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(coefficient) = &self.coefficient {
            write!(f, "{}", coefficient)?;
        }
        if let Some(variable) = &self.variable {
            write!(f, "{}", variable)?;
        }
        Ok(())
    }
}

/// One side of an equation: a sum of terms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SideExpr {
    /// The terms of the side, in the order they were written.
    pub terms: Vec<TermExpr>,

    /// The region of the source code that this side was parsed from.
    pub span: Range<usize>,
}

impl Parse for SideExpr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let mut terms = vec![input.try_parse::<TermExpr>()?];
        while matches!(input.peek_kind(), Some(TokenKind::Add | TokenKind::Sub)) {
            terms.push(input.try_parse_with_fn(TermExpr::parse_signed)?);
        }

        let start = terms[0].span.start;
        let end = terms[terms.len() - 1].span.end;
        Ok(Self { terms, span: start..end })
    }
}

impl fmt::Display for SideExpr {
    /// Writes the terms, attaching the sign of the first term and spacing out the others.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            match (i, &term.sign) {
                (0, Some(sign)) if sign.kind == UnaryOpKind::Neg => write!(f, "-")?,
                (0, Some(_)) => write!(f, "+")?,
                (0, None) => {},
                (_, sign) if sign.as_ref().map(|s| s.kind) == Some(UnaryOpKind::Neg) => write!(f, " - ")?,
                _ => write!(f, " + ")?,
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

/// A linear equation or inequality, such as `2x + 3y = 12` or `x - y < 1/2`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquationExpr {
    /// The left-hand side of the equation.
    pub left: SideExpr,

    /// The relation between both sides.
    pub relation: Relation,

    /// The right-hand side of the equation.
    pub right: SideExpr,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

impl Parse for EquationExpr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let left = input.try_parse::<SideExpr>()?;
        let relation = input.try_parse::<Relation>()?;
        let right = input.try_parse::<SideExpr>()?;
        let span = left.span.start..right.span.end;
        Ok(Self { left, relation, right, span })
    }
}

impl fmt::Display for EquationExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.relation.kind, self.right)
    }
}

/// A system of equations separated by semicolons, such as `2x + 3y = 12; x - y = 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SystemExpr {
    /// The equations of the system, in the order they were written.
    pub equations: Vec<EquationExpr>,

    /// The region of the source code that this system was parsed from.
    pub span: Range<usize>,
}

impl Parse for SystemExpr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let equations = input.try_parse_delimited::<EquationExpr>(TokenKind::Semicolon)?;
        let start = equations.first().map_or(0, |eq| eq.span.start);
        let end = equations.last().map_or(0, |eq| eq.span.end);
        Ok(Self { equations, span: start..end })
    }
}

impl fmt::Display for SystemExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, equation) in self.equations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", equation)?;
        }
        Ok(())
    }
}
