//! Fail-fast assertions
//!
//! Every `check_*` macro evaluates a comparison through one of the functions
//! in this module. On mismatch it emits a [`Diagnostic`] carrying the call
//! site's file and line, the operands as written, and their values, then
//! returns [`TestResult::Fail`] from the enclosing function. Nothing after a
//! failed check runs.
//!
//! The functions return `Err(message)` on mismatch and can be used directly
//! by code that wants the comparison without the early return.
//!
//! [`Diagnostic`]: crate::Diagnostic
//! [`TestResult::Fail`]: crate::TestResult::Fail

use std::fmt::Debug;
use std::ptr::NonNull;

/// Significant digits printed for `f32` operands
pub const F32_DIGITS: usize = 9;
/// Significant digits printed for `f64` operands
pub const F64_DIGITS: usize = 17;

pub type CheckResult = Result<(), String>;

pub fn truthy(condition: bool, expr: &str) -> CheckResult {
    if condition {
        Ok(())
    } else {
        Err(format!("Expected: {} evaluates to true", expr))
    }
}

pub fn falsy(condition: bool, expr: &str) -> CheckResult {
    if condition {
        Err(format!("Expected: {} evaluates to false", expr))
    } else {
        Ok(())
    }
}

pub fn eq<E, A>(expected: &E, actual: &A, expected_expr: &str, actual_expr: &str) -> CheckResult
where
    E: PartialEq<A> + Debug + ?Sized,
    A: Debug + ?Sized,
{
    if expected == actual {
        Ok(())
    } else {
        Err(format!(
            "Expected: {} == {} ({:?} vs {:?})",
            expected_expr, actual_expr, expected, actual
        ))
    }
}

pub fn ne<L, R>(lhs: &L, rhs: &R, lhs_expr: &str, rhs_expr: &str) -> CheckResult
where
    L: PartialEq<R> + Debug + ?Sized,
    R: Debug + ?Sized,
{
    if lhs != rhs {
        Ok(())
    } else {
        Err(format!(
            "Expected: {} != {} (both are {:?})",
            lhs_expr, rhs_expr, lhs
        ))
    }
}

/// Ordering relation checked by `check_lt!` and friends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Lt,
    Le,
    Gt,
    Ge,
}

impl Relation {
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Lt => "<",
            Relation::Le => "<=",
            Relation::Gt => ">",
            Relation::Ge => ">=",
        }
    }

    fn holds<L, R>(self, lhs: &L, rhs: &R) -> bool
    where
        L: PartialOrd<R> + ?Sized,
        R: ?Sized,
    {
        match self {
            Relation::Lt => lhs < rhs,
            Relation::Le => lhs <= rhs,
            Relation::Gt => lhs > rhs,
            Relation::Ge => lhs >= rhs,
        }
    }
}

pub fn order<L, R>(
    relation: Relation,
    lhs: &L,
    rhs: &R,
    lhs_expr: &str,
    rhs_expr: &str,
) -> CheckResult
where
    L: PartialOrd<R> + Debug + ?Sized,
    R: Debug + ?Sized,
{
    if relation.holds(lhs, rhs) {
        Ok(())
    } else {
        Err(format!(
            "Expected: {} {} {} ({:?} vs {:?})",
            lhs_expr,
            relation.symbol(),
            rhs_expr,
            lhs,
            rhs
        ))
    }
}

/// Single-precision equality within `f32::EPSILON`
pub fn f32_eq(expected: f32, actual: f32, expected_expr: &str, actual_expr: &str) -> CheckResult {
    let diff = (expected - actual).abs();
    // NaN never compares within tolerance
    if diff <= f32::EPSILON {
        return Ok(());
    }
    Err(format!(
        "Expected: {} == {} ({} vs {}, diff {})",
        expected_expr,
        actual_expr,
        format_general(f64::from(expected), F32_DIGITS),
        format_general(f64::from(actual), F32_DIGITS),
        format_general(f64::from(diff), F32_DIGITS)
    ))
}

/// Double-precision equality within `f64::EPSILON`
pub fn f64_eq(expected: f64, actual: f64, expected_expr: &str, actual_expr: &str) -> CheckResult {
    let diff = (expected - actual).abs();
    if diff <= f64::EPSILON {
        return Ok(());
    }
    Err(format!(
        "Expected: {} == {} ({} vs {}, diff {})",
        expected_expr,
        actual_expr,
        format_general(expected, F64_DIGITS),
        format_general(actual, F64_DIGITS),
        format_general(diff, F64_DIGITS)
    ))
}

/// Equality within a caller-supplied tolerance
pub fn near(
    expected: impl Into<f64>,
    actual: impl Into<f64>,
    tolerance: impl Into<f64>,
    expected_expr: &str,
    actual_expr: &str,
) -> CheckResult {
    let (expected, actual, tolerance) = (expected.into(), actual.into(), tolerance.into());
    let diff = (expected - actual).abs();
    if diff <= tolerance {
        return Ok(());
    }
    Err(format!(
        "Expected: {} ~= {} ({} vs {}, diff {} > tol {})",
        expected_expr,
        actual_expr,
        format_general(expected, F64_DIGITS),
        format_general(actual, F64_DIGITS),
        format_general(diff, F64_DIGITS),
        format_general(tolerance, F64_DIGITS)
    ))
}

pub fn str_eq(expected: &str, actual: &str, expected_expr: &str, actual_expr: &str) -> CheckResult {
    eq(expected, actual, expected_expr, actual_expr)
}

pub fn str_ne(lhs: &str, rhs: &str, lhs_expr: &str, rhs_expr: &str) -> CheckResult {
    ne(lhs, rhs, lhs_expr, rhs_expr)
}

/// Values that can be null: raw pointers and `Option`
pub trait Nullable {
    fn is_null_value(&self) -> bool;

    /// How the value is shown in a diagnostic
    fn describe(&self) -> String;
}

impl<T: ?Sized> Nullable for *const T {
    fn is_null_value(&self) -> bool {
        self.is_null()
    }

    fn describe(&self) -> String {
        format!("{:p}", *self)
    }
}

impl<T: ?Sized> Nullable for *mut T {
    fn is_null_value(&self) -> bool {
        self.is_null()
    }

    fn describe(&self) -> String {
        format!("{:p}", *self)
    }
}

impl<T: ?Sized> Nullable for NonNull<T> {
    fn is_null_value(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        format!("{:p}", self.as_ptr())
    }
}

impl<T> Nullable for Option<T> {
    fn is_null_value(&self) -> bool {
        self.is_none()
    }

    fn describe(&self) -> String {
        match self {
            Some(_) => "Some(..)".to_string(),
            None => "None".to_string(),
        }
    }
}

pub fn null<P: Nullable + ?Sized>(value: &P, expr: &str) -> CheckResult {
    if value.is_null_value() {
        Ok(())
    } else {
        Err(format!("{} is not null ({})", expr, value.describe()))
    }
}

pub fn not_null<P: Nullable + ?Sized>(value: &P, expr: &str) -> CheckResult {
    if value.is_null_value() {
        Err(format!("{} is null ({})", expr, value.describe()))
    } else {
        Ok(())
    }
}

/// Compare the first `len` bytes of two regions
pub fn mem_eq<E, A>(
    expected: &E,
    actual: &A,
    len: usize,
    expected_expr: &str,
    actual_expr: &str,
) -> CheckResult
where
    E: AsRef<[u8]> + ?Sized,
    A: AsRef<[u8]> + ?Sized,
{
    let expected = expected.as_ref();
    let actual = actual.as_ref();

    for (bytes, expr) in [(expected, expected_expr), (actual, actual_expr)] {
        if bytes.len() < len {
            return Err(format!(
                "Memory region {} is {} bytes, shorter than the {} compared",
                expr,
                bytes.len(),
                len
            ));
        }
    }

    match expected[..len]
        .iter()
        .zip(&actual[..len])
        .position(|(e, a)| e != a)
    {
        None => Ok(()),
        Some(offset) => Err(format!(
            "Memory differs for {} and {} (first difference at byte {}: 0x{:02x} vs 0x{:02x})",
            expected_expr, actual_expr, offset, expected[offset], actual[offset]
        )),
    }
}

/// Format like C's `%.Ng`: `significant` digits, trailing zeros dropped,
/// scientific notation for very small or very large magnitudes
pub fn format_general(value: f64, significant: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = significant.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value))
    }
}

fn trim_fraction(digits: &str) -> String {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        digits.to_string()
    }
}
