use super::Val;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Math and comparison primitives
///
/// Every operation matches its operand tags exhaustively: `Integer` pairs
/// stay integral with checked arithmetic, any `Real` operand promotes the
/// result to `Real`, and disallowed tags return `TypeMismatch` rather than
/// coercing. Division and modulo by zero fail for both integral and real
/// operands.

pub struct Operation {}

impl Operation {
    pub fn add(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (String(l), String(r)) => Ok(String(l + &r)),
            (Integer(l), Integer(r)) => match l.checked_add(r) {
                Some(n) => Ok(Integer(n)),
                None => Err(error!(Overflow)),
            },
            (Integer(l), Real(r)) => Ok(Real(l as f64 + r)),
            (Real(l), Integer(r)) => Ok(Real(l + r as f64)),
            (Real(l), Real(r)) => Ok(Real(l + r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_sub(r) {
                Some(n) => Ok(Integer(n)),
                None => Err(error!(Overflow)),
            },
            (Integer(l), Real(r)) => Ok(Real(l as f64 - r)),
            (Real(l), Integer(r)) => Ok(Real(l - r as f64)),
            (Real(l), Real(r)) => Ok(Real(l - r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_mul(r) {
                Some(n) => Ok(Integer(n)),
                None => Err(error!(Overflow)),
            },
            (Integer(l), Real(r)) => Ok(Real(l as f64 * r)),
            (Real(l), Integer(r)) => Ok(Real(l * r as f64)),
            (Real(l), Real(r)) => Ok(Real(l * r)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_div(r) {
                Some(n) => Ok(Integer(n)),
                None => {
                    if r == 0 {
                        Err(error!(DivisionByZero))
                    } else {
                        Err(error!(Overflow))
                    }
                }
            },
            (Integer(l), Real(r)) => Self::divide_real(l as f64, r),
            (Real(l), Integer(r)) => Self::divide_real(l, r as f64),
            (Real(l), Real(r)) => Self::divide_real(l, r),
            _ => Err(error!(TypeMismatch)),
        }
    }

    fn divide_real(lhs: f64, rhs: f64) -> Result<Val> {
        if rhs == 0.0 {
            Err(error!(DivisionByZero))
        } else {
            Ok(Val::Real(lhs / rhs))
        }
    }

    pub fn modulo(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_rem(r) {
                Some(n) => Ok(Integer(n)),
                None => {
                    if r == 0 {
                        Err(error!(DivisionByZero))
                    } else {
                        Err(error!(Overflow))
                    }
                }
            },
            (Integer(l), Real(r)) => Self::modulo_real(l as f64, r),
            (Real(l), Integer(r)) => Self::modulo_real(l, r as f64),
            (Real(l), Real(r)) => Self::modulo_real(l, r),
            _ => Err(error!(TypeMismatch)),
        }
    }

    fn modulo_real(lhs: f64, rhs: f64) -> Result<Val> {
        if rhs == 0.0 {
            Err(error!(DivisionByZero))
        } else {
            Ok(Val::Real(lhs % rhs))
        }
    }

    pub fn exponent(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => {
                if r >= 0 {
                    match u32::try_from(r).ok().and_then(|r| l.checked_pow(r)) {
                        Some(n) => Ok(Integer(n)),
                        None => Err(error!(Overflow)),
                    }
                } else {
                    // r may exceed i32, so powi's cast would truncate
                    Ok(Real((l as f64).powf(r as f64)))
                }
            }
            (Integer(l), Real(r)) => Ok(Real((l as f64).powf(r))),
            (Real(l), Integer(r)) => Ok(Real(l.powf(r as f64))),
            (Real(l), Real(r)) => Ok(Real(l.powf(r))),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn min(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(Integer(l.min(r))),
            (Integer(l), Real(r)) => Ok(Real((l as f64).min(r))),
            (Real(l), Integer(r)) => Ok(Real(l.min(r as f64))),
            (Real(l), Real(r)) => Ok(Real(l.min(r))),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn max(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(Integer(l.max(r))),
            (Integer(l), Real(r)) => Ok(Real((l as f64).max(r))),
            (Real(l), Integer(r)) => Ok(Real(l.max(r as f64))),
            (Real(l), Real(r)) => Ok(Real(l.max(r))),
            _ => Err(error!(TypeMismatch)),
        }
    }

    // *** Unary math

    pub fn sin(val: Val) -> Result<Val> {
        Ok(Val::Real(Self::real(val)?.sin()))
    }
    pub fn cos(val: Val) -> Result<Val> {
        Ok(Val::Real(Self::real(val)?.cos()))
    }
    pub fn tan(val: Val) -> Result<Val> {
        Ok(Val::Real(Self::real(val)?.tan()))
    }
    pub fn asin(val: Val) -> Result<Val> {
        Ok(Val::Real(Self::real(val)?.asin()))
    }
    pub fn acos(val: Val) -> Result<Val> {
        Ok(Val::Real(Self::real(val)?.acos()))
    }
    pub fn atan(val: Val) -> Result<Val> {
        Ok(Val::Real(Self::real(val)?.atan()))
    }
    pub fn log(val: Val) -> Result<Val> {
        Ok(Val::Real(Self::real(val)?.ln()))
    }
    pub fn log2(val: Val) -> Result<Val> {
        Ok(Val::Real(Self::real(val)?.log2()))
    }
    pub fn log10(val: Val) -> Result<Val> {
        Ok(Val::Real(Self::real(val)?.log10()))
    }
    pub fn sqrt(val: Val) -> Result<Val> {
        Ok(Val::Real(Self::real(val)?.sqrt()))
    }
    pub fn cbrt(val: Val) -> Result<Val> {
        Ok(Val::Real(Self::real(val)?.cbrt()))
    }

    pub fn abs(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => match n.checked_abs() {
                Some(n) => Ok(Integer(n)),
                None => Err(error!(Overflow)),
            },
            Real(n) => Ok(Real(n.abs())),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn round(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => Ok(Integer(n)),
            Real(n) => Ok(Integer(n.round() as i64)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn ceil(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => Ok(Integer(n)),
            Real(n) => Ok(Integer(n.ceil() as i64)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn floor(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => Ok(Integer(n)),
            Real(n) => Ok(Integer(n.floor() as i64)),
            _ => Err(error!(TypeMismatch)),
        }
    }

    fn real(val: Val) -> Result<f64> {
        use Val::*;
        match val {
            Integer(n) => Ok(n as f64),
            Real(n) => Ok(n),
            _ => Err(error!(TypeMismatch)),
        }
    }

    // *** Comparisons

    pub fn equal_bool(lhs: &Val, rhs: &Val) -> Result<bool> {
        use Val::*;
        match (lhs, rhs) {
            (String(l), String(r)) => Ok(l == r),
            (Bool(l), Bool(r)) => Ok(l == r),
            (Integer(l), Integer(r)) => Ok(l == r),
            (Integer(l), Real(r)) => Ok((*l as f64 - r).abs() < f64::EPSILON),
            (Real(l), Integer(r)) => Ok((l - *r as f64).abs() < f64::EPSILON),
            (Real(l), Real(r)) => Ok((l - r).abs() < f64::EPSILON),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn less_bool(lhs: &Val, rhs: &Val) -> Result<bool> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(l < r),
            (Integer(l), Real(r)) => Ok((*l as f64) < *r),
            (Real(l), Integer(r)) => Ok(*l < *r as f64),
            (Real(l), Real(r)) => Ok(l < r),
            _ => Err(error!(TypeMismatch)),
        }
    }

    pub fn less_equal_bool(lhs: &Val, rhs: &Val) -> Result<bool> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => Ok(l <= r),
            (Integer(l), Real(r)) => Ok(*l as f64 <= *r),
            (Real(l), Integer(r)) => Ok(*l <= *r as f64),
            (Real(l), Real(r)) => Ok(l <= r),
            _ => Err(error!(TypeMismatch)),
        }
    }
}
