//! Plain-text formatter for [`Expr`].
//!
//! Prints with conventional precedence, parenthesizing children only when
//! needed. Two readability rewrites on output: `x^(1/2)` prints as
//! `sqrt(x)`, and `log(x, e)` prints as `ln(x)`.

use crate::{Constant, Expr, Func};
use num_traits::One;
use std::fmt;

fn precedence(e: &Expr) -> u8 {
    match e {
        Expr::Add(_, _) | Expr::Sub(_, _) => 1,
        Expr::Mul(_, _) | Expr::Div(_, _) => 2,
        Expr::Pow(_, _) => 3,
        Expr::Neg(_) => 4,
        Expr::Number(_) | Expr::Constant(_) | Expr::Symbol(_) | Expr::Call(_, _) => 5,
    }
}

fn is_one_half(e: &Expr) -> bool {
    match e {
        Expr::Number(n) => n.numer().is_one() && *n.denom() == 2.into(),
        _ => false,
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let my_prec = precedence(self);
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Constant(c) => write!(f, "{}", c.name()),
            Expr::Symbol(s) => write!(f, "{}", s),
            Expr::Add(l, r) => {
                if precedence(l) < my_prec {
                    write!(f, "({})", l)?
                } else {
                    write!(f, "{}", l)?
                }
                write!(f, " + ")?;
                if precedence(r) < my_prec {
                    write!(f, "({})", r)?
                } else {
                    write!(f, "{}", r)?
                }
                Ok(())
            }
            Expr::Sub(l, r) => {
                if precedence(l) < my_prec {
                    write!(f, "({})", l)?
                } else {
                    write!(f, "{}", l)?
                }
                write!(f, " - ")?;
                // Left-associative: a - (b - c) and a - (b + c) both need parens.
                if precedence(r) <= my_prec {
                    write!(f, "({})", r)?
                } else {
                    write!(f, "{}", r)?
                }
                Ok(())
            }
            Expr::Mul(l, r) => {
                if precedence(l) < my_prec {
                    write!(f, "({})", l)?
                } else {
                    write!(f, "{}", l)?
                }
                write!(f, " * ")?;
                if precedence(r) < my_prec {
                    write!(f, "({})", r)?
                } else {
                    write!(f, "{}", r)?
                }
                Ok(())
            }
            Expr::Div(l, r) => {
                if precedence(l) < my_prec {
                    write!(f, "({})", l)?
                } else {
                    write!(f, "{}", l)?
                }
                write!(f, " / ")?;
                if precedence(r) <= my_prec {
                    write!(f, "({})", r)?
                } else {
                    write!(f, "{}", r)?
                }
                Ok(())
            }
            Expr::Pow(b, e) => {
                if is_one_half(e) {
                    return write!(f, "sqrt({})", b);
                }
                if precedence(b) <= my_prec {
                    write!(f, "({})", b)?
                } else {
                    write!(f, "{}", b)?
                }
                if precedence(e) < my_prec {
                    write!(f, "^({})", e)
                } else {
                    write!(f, "^{}", e)
                }
            }
            Expr::Neg(e) => {
                write!(f, "-")?;
                if precedence(e) < my_prec {
                    write!(f, "({})", e)
                } else {
                    write!(f, "{}", e)
                }
            }
            Expr::Call(func, args) => {
                if *func == Func::Log && args.len() == 2 {
                    if let Expr::Constant(Constant::E) = &*args[1] {
                        return write!(f, "ln({})", args[0]);
                    }
                }
                write!(f, "{}(", func.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_precedence() {
        let e = Expr::add(Expr::int(1), Expr::mul(Expr::sym("x"), Expr::int(2)));
        assert_eq!(format!("{}", e), "1 + x * 2");
    }

    #[test]
    fn test_display_parenthesizes_low_precedence_child() {
        let e = Expr::pow(Expr::add(Expr::sym("a"), Expr::sym("b")), Expr::int(2));
        assert_eq!(format!("{}", e), "(a + b)^2");
    }

    #[test]
    fn test_sqrt_rendering() {
        let e = Expr::div(Expr::sqrt(Expr::int(3)), Expr::int(2));
        assert_eq!(format!("{}", e), "sqrt(3) / 2");
    }

    #[test]
    fn test_ln_rendering_for_base_e_log() {
        let e = Expr::call(Func::Log, vec![Expr::sym("x"), Expr::e()]);
        assert_eq!(format!("{}", e), "ln(x)");
    }
}
