//! Declaration, registration, and assertion macros

/// Declare a suite and its tests
///
/// Expands to a module holding the test functions and a
/// `register(&mut Registry)` function that registers them in declaration
/// order under the given suite name.
///
/// A test taking `&mut F` runs inside the [`Fixture`] lifecycle of `F`.
///
/// ```no_run
/// use nutest::prelude::*;
///
/// #[derive(Default)]
/// struct Buffer {
///     bytes: Vec<u8>,
/// }
///
/// impl Fixture for Buffer {
///     fn set_up(&mut self) -> Result<(), FixtureError> {
///         self.bytes = vec![0; 16];
///         Ok(())
///     }
///
///     fn tear_down(&mut self) {
///         self.bytes.clear();
///     }
/// }
///
/// nutest::suite! {
///     pub mod buffers = "Buffers";
///
///     #[describe = "Set-up allocates sixteen zeroed bytes"]
///     fn starts_zeroed(buffer: &mut Buffer) {
///         check_eq!(buffer.bytes.len(), 16);
///         check!(buffer.bytes.iter().all(|b| *b == 0));
///     }
/// }
///
/// fn main() {
///     let mut registry = Registry::new();
///     buffers::register(&mut registry).unwrap();
///     assert_eq!(registry.test_count(), 1);
/// }
/// ```
///
/// [`Fixture`]: crate::Fixture
#[macro_export]
macro_rules! suite {
    (
        $(#[describe = $suite_desc:literal])?
        $vis:vis mod $module:ident = $suite:literal;
        $(
            $(#[describe = $desc:literal])?
            fn $name:ident ( $($state:ident : &mut $fixture:ty)? ) $body:block
        )*
    ) => {
        $vis mod $module {
            #[allow(unused_imports)]
            use super::*;

            /// Suite name the tests below are registered under
            pub const SUITE: &str = $suite;

            $(
                $crate::__nutest_test_fn!($name ($($state : $fixture)?) $body);
            )*

            /// Register every test of this suite, in declaration order
            #[allow(unused_variables)]
            pub fn register(
                registry: &mut $crate::Registry,
            ) -> ::core::result::Result<(), $crate::RegistryError> {
                $(
                    registry.describe_suite(SUITE, $suite_desc)?;
                )?
                $(
                    registry.register(
                        stringify!($name),
                        SUITE,
                        $name,
                        $crate::__nutest_optional!($($desc)?),
                    )?;
                )*
                ::core::result::Result::Ok(())
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __nutest_test_fn {
    ($name:ident () $body:block) => {
        #[allow(unreachable_code)]
        pub fn $name() -> $crate::TestResult {
            let outcome = $body;
            $crate::IntoTestResult::into_test_result(outcome)
        }
    };
    ($name:ident ($state:ident : $fixture:ty) $body:block) => {
        #[allow(unreachable_code)]
        pub fn $name() -> $crate::TestResult {
            $crate::fixture::run::<$fixture, _>(|$state: &mut $fixture| -> $crate::TestResult {
                let outcome = $body;
                $crate::IntoTestResult::into_test_result(outcome)
            })
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __nutest_optional {
    () => {
        ::core::option::Option::None
    };
    ($value:literal) => {
        ::core::option::Option::Some($value)
    };
}

/// Generate `fn main` registering the listed suite modules, in order, then
/// running every test
///
/// ```ignore
/// nutest::test_main!(math, strings);
/// ```
#[macro_export]
macro_rules! test_main {
    ($($module:ident),* $(,)?) => {
        fn main() -> ::std::process::ExitCode {
            $crate::main_with(|registry| {
                $( $module::register(registry)?; )*
                ::core::result::Result::Ok(())
            })
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __nutest_check {
    ($outcome:expr) => {
        if let ::core::result::Result::Err(message) = $outcome {
            $crate::Diagnostic::failed(file!(), line!(), message).emit();
            return $crate::TestResult::Fail;
        }
    };
}

/// Fail unless the condition is true
#[macro_export]
macro_rules! check {
    ($condition:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::truthy($condition, stringify!($condition)))
    };
}

/// Fail unless the condition is false
#[macro_export]
macro_rules! check_false {
    ($condition:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::falsy($condition, stringify!($condition)))
    };
}

/// Fail unless `expected == actual`
#[macro_export]
macro_rules! check_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::eq(
            &$expected,
            &$actual,
            stringify!($expected),
            stringify!($actual),
        ))
    };
}

/// Fail if `lhs == rhs`
#[macro_export]
macro_rules! check_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::ne(
            &$lhs,
            &$rhs,
            stringify!($lhs),
            stringify!($rhs),
        ))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __nutest_check_order {
    ($relation:ident, $lhs:expr, $rhs:expr) => {
        $crate::__nutest_check!($crate::assert::order(
            $crate::assert::Relation::$relation,
            &$lhs,
            &$rhs,
            stringify!($lhs),
            stringify!($rhs),
        ))
    };
}

/// Fail unless `lhs < rhs`
#[macro_export]
macro_rules! check_lt {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__nutest_check_order!(Lt, $lhs, $rhs)
    };
}

/// Fail unless `lhs <= rhs`
#[macro_export]
macro_rules! check_le {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__nutest_check_order!(Le, $lhs, $rhs)
    };
}

/// Fail unless `lhs > rhs`
#[macro_export]
macro_rules! check_gt {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__nutest_check_order!(Gt, $lhs, $rhs)
    };
}

/// Fail unless `lhs >= rhs`
#[macro_export]
macro_rules! check_ge {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__nutest_check_order!(Ge, $lhs, $rhs)
    };
}

/// Fail unless two `f32` values differ by at most `f32::EPSILON`
#[macro_export]
macro_rules! check_f32_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::f32_eq(
            $expected,
            $actual,
            stringify!($expected),
            stringify!($actual),
        ))
    };
}

/// Fail unless two `f64` values differ by at most `f64::EPSILON`
#[macro_export]
macro_rules! check_f64_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::f64_eq(
            $expected,
            $actual,
            stringify!($expected),
            stringify!($actual),
        ))
    };
}

/// Fail unless `|expected - actual| <= tolerance`
///
/// Operands may be any type that widens to `f64`, such as `f32` or `i32`.
#[macro_export]
macro_rules! check_near {
    ($expected:expr, $actual:expr, $tolerance:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::near(
            $expected,
            $actual,
            $tolerance,
            stringify!($expected),
            stringify!($actual),
        ))
    };
}

/// Fail unless two strings are equal
#[macro_export]
macro_rules! check_str_eq {
    ($expected:expr, $actual:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::str_eq(
            ::core::convert::AsRef::<str>::as_ref(&$expected),
            ::core::convert::AsRef::<str>::as_ref(&$actual),
            stringify!($expected),
            stringify!($actual),
        ))
    };
}

/// Fail if two strings are equal
#[macro_export]
macro_rules! check_str_ne {
    ($lhs:expr, $rhs:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::str_ne(
            ::core::convert::AsRef::<str>::as_ref(&$lhs),
            ::core::convert::AsRef::<str>::as_ref(&$rhs),
            stringify!($lhs),
            stringify!($rhs),
        ))
    };
}

/// Fail unless the pointer (or `Option`) is null
#[macro_export]
macro_rules! check_null {
    ($value:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::null(&$value, stringify!($value)))
    };
}

/// Fail if the pointer (or `Option`) is null
#[macro_export]
macro_rules! check_not_null {
    ($value:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::not_null(&$value, stringify!($value)))
    };
}

/// Fail unless the first `len` bytes of both regions are equal
#[macro_export]
macro_rules! check_mem_eq {
    ($expected:expr, $actual:expr, $len:expr $(,)?) => {
        $crate::__nutest_check!($crate::assert::mem_eq(
            &$expected,
            &$actual,
            $len,
            stringify!($expected),
            stringify!($actual),
        ))
    };
}

/// End the test as skipped
// `if true` keeps the expansion typed `()` so a body ending in `skip!()`
// still converts through `IntoTestResult`.
#[macro_export]
macro_rules! skip {
    () => {
        if true {
            return $crate::TestResult::Skip;
        }
    };
    ($($reason:tt)+) => {
        if true {
            $crate::Diagnostic::skipped(file!(), line!(), format!($($reason)+)).emit();
            return $crate::TestResult::Skip;
        }
    };
}

/// End the test as errored: the test could not be carried out
#[macro_export]
macro_rules! errored {
    ($($reason:tt)+) => {
        if true {
            $crate::Diagnostic::errored(file!(), line!(), format!($($reason)+)).emit();
            return $crate::TestResult::Error;
        }
    };
}

/// Time a block and print `[ BENCHMARK ] name: S seconds`; yields the
/// block's value
#[macro_export]
macro_rules! benchmark {
    ($name:expr, $body:block) => {{
        let bench = $crate::Benchmark::start($name);
        let value = $body;
        bench.finish();
        value
    }};
}
